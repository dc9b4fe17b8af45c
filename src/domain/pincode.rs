#[derive(Debug, Clone)]
pub struct Pincode(String);

impl Pincode {
    pub fn parse(pincode: String) -> Result<Pincode, String> {
        let trimmed = pincode.trim();

        if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_digit()) && !trimmed.starts_with('0') {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(format!("{} is not a valid pincode", pincode))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}
