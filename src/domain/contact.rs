//! Identity and contact checks shared by clients and advisors.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

use crate::errors::AppResult;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone regex"));

/// Contact fields that carry a format rule. Absent values pass.
#[derive(Debug, Default, Validate)]
pub struct ContactInfo {
    #[validate(length(equal = 18, message = "CURP must be exactly 18 characters"))]
    pub curp: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Phone must be exactly 10 digits"))]
    pub telefono: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub correo: Option<String>,
}

impl ContactInfo {
    pub fn check(self) -> AppResult<()> {
        self.validate()?;
        Ok(())
    }
}

/// Flatten a tri-state patch field into the value that will be written.
pub(crate) fn written(field: &Option<Option<String>>) -> Option<String> {
    field.clone().flatten()
}
