use secrecy::{ExposeSecret, SecretString};

const SPECIAL_CHARACTERS: &str = "@$!%*?&";
const MIN_LENGTH: usize = 6;

// Password accepted at registration: at least 6 characters from [A-Za-z0-9@$!%*?&]
// with one uppercase letter, one digit and one special character
#[derive(Debug)]
pub struct ValidPassword(SecretString);

impl ValidPassword {
    pub fn parse(password: SecretString) -> Result<ValidPassword, String> {
        let raw = password.expose_secret();

        let allowed = raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SPECIAL_CHARACTERS.contains(c));
        let has_upper = raw.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        let has_special = raw.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

        if raw.chars().count() >= MIN_LENGTH && allowed && has_upper && has_digit && has_special {
            Ok(Self(password))
        } else {
            Err("Password must be at least 6 characters, include an uppercase letter, \
                a number, and a special character".to_string())
        }
    }

    pub fn into_secret(self) -> SecretString {
        self.0
    }
}
