//! Password policy enforcement for new passwords.

use crate::error::PolicyError;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 10;

/// Validates password strength against the fixed policy.
///
/// Symbols and non-ASCII characters are accepted; letters count toward the
/// case requirements according to Unicode case classification. Only `0-9`
/// satisfies the digit rule.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator with the standard policy.
    pub fn new() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
        }
    }

    /// Validates a password against all policies.
    ///
    /// Rules are checked in a fixed order (length, upper, lower, digit)
    /// and only the first violation is reported.
    pub fn validate(&self, password: &str) -> Result<(), PolicyError> {
        if password.chars().count() < self.min_length {
            return Err(PolicyError::TooShort {
                min: self.min_length,
            });
        }

        if !password.chars().any(char::is_uppercase) {
            return Err(PolicyError::MissingUppercase);
        }

        if !password.chars().any(char::is_lowercase) {
            return Err(PolicyError::MissingLowercase);
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PolicyError::MissingDigit);
        }

        Ok(())
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(password: &str) -> Result<(), PolicyError> {
        PasswordValidator::new().validate(password)
    }

    #[test]
    fn test_valid_password() {
        assert_eq!(validate("Abc1234567"), Ok(()));
        assert_eq!(validate("Correct-Horse-Battery-9"), Ok(()));
    }

    #[test]
    fn test_length_checked_first() {
        assert_eq!(validate("Abc123456"), Err(PolicyError::TooShort { min: 10 }));
        assert_eq!(validate(""), Err(PolicyError::TooShort { min: 10 }));
        // Would also miss every category, but length wins.
        assert_eq!(validate("!!!"), Err(PolicyError::TooShort { min: 10 }));
    }

    #[test]
    fn test_short_regardless_of_content() {
        for candidate in ["A", "aB1", "ABCdef123", "         ", "Ünï1234"] {
            assert_eq!(
                validate(candidate),
                Err(PolicyError::TooShort { min: 10 }),
                "{candidate:?}"
            );
        }
    }

    #[test]
    fn test_missing_categories() {
        assert_eq!(validate("abcdefghij"), Err(PolicyError::MissingUppercase));
        assert_eq!(validate("ABCDEFGHIJ"), Err(PolicyError::MissingLowercase));
        assert_eq!(validate("Abcdefghij"), Err(PolicyError::MissingDigit));
        assert_eq!(validate("1234567890"), Err(PolicyError::MissingUppercase));
        assert_eq!(validate("ABCDE12345"), Err(PolicyError::MissingLowercase));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Nine characters, more than ten bytes.
        assert_eq!(validate("Äbc123456"), Err(PolicyError::TooShort { min: 10 }));
        assert_eq!(validate("Äbc1234567"), Ok(()));
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(validate("Abcdefghi٣"), Err(PolicyError::MissingDigit));
        assert_eq!(validate("Abcdefghi５"), Err(PolicyError::MissingDigit));
        assert_eq!(validate("Abcdefghi²"), Err(PolicyError::MissingDigit));
        assert_eq!(validate("Abcdefghi3"), Ok(()));
    }

    #[test]
    fn test_symbols_do_not_count_as_letters() {
        assert_eq!(validate("#$%&1234ab"), Err(PolicyError::MissingUppercase));
        assert_eq!(validate("#$%&1234AB"), Err(PolicyError::MissingLowercase));
    }
}
