use std::fmt::Display;

/// Menu category label in its stored form: trimmed, inner whitespace
/// collapsed to single spaces and lowercased. Two labels that normalize
/// to the same string are the same category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryLabel(String);

impl CategoryLabel {
    pub fn parse(label: &str) -> Result<CategoryLabel, String> {
        let normalized = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        if normalized.is_empty() {
            return Err("Category label must not be empty".to_string());
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Adds the label to `labels` unless already present. Returns whether
    /// the list changed.
    pub fn insert_into(&self, labels: &mut Vec<String>) -> bool {
        if labels.iter().any(|existing| existing == &self.0) {
            false
        } else {
            labels.push(self.0.clone());
            true
        }
    }
}

impl Display for CategoryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
