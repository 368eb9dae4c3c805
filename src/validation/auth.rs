use crate::error::{AppError, Result};

/// Validates that an email was entered.
///
/// # Arguments
///
/// * `email` - The email to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the email is present.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    Ok(())
}

/// Validates that a password was entered.
///
/// # Arguments
///
/// * `password` - The password to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the password is present.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    Ok(())
}

/// Validates that a confirmation, when given, repeats the new password.
pub fn validate_confirmation(password: &str, confirmation: Option<&str>) -> Result<()> {
    match confirmation {
        Some(confirm) if confirm != password => Err(AppError::Validation(
            "Passwords do not match".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_rejected() {
        assert!(matches!(validate_email(""), Err(AppError::Validation(_))));
        assert!(matches!(validate_password(""), Err(AppError::Validation(_))));
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_password(" ").is_ok());
    }

    #[test]
    fn confirmation_must_match_when_present() {
        assert!(validate_confirmation("new", None).is_ok());
        assert!(validate_confirmation("new", Some("new")).is_ok());
        assert_eq!(
            validate_confirmation("new", Some("other")),
            Err(AppError::Validation("Passwords do not match".to_string()))
        );
    }
}
