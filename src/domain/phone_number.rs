use std::fmt::Debug;

use phonenumber::country;


#[derive(Debug, Clone)]
pub struct PhoneNumberDomain(String);

impl PhoneNumberDomain{
    // Numbers without a country prefix are read as Indian numbers
    pub fn parse(number: String) -> Result<PhoneNumberDomain, String>{
        let trimmed = number.trim().to_string();

        match phonenumber::parse(Some(country::IN), &trimmed) {
            Ok(parsed) if phonenumber::is_valid(&parsed) => Ok(Self(trimmed)),
            _ => Err(format!("{} is not a valid mobile number", number))
        }
    }

    pub fn inner(&self) -> String {
        self.0.clone()
    }
}

impl std::fmt::Display for PhoneNumberDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
