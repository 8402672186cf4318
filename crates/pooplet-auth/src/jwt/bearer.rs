//! `Authorization: Bearer <token>` header parsing.

use crate::error::BearerError;

/// Extracts the token from an `Authorization` header value.
///
/// The header must be exactly `<scheme> <token>` with a case-insensitive
/// `Bearer` scheme and a non-empty token.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, BearerError> {
    let header = header
        .filter(|h| !h.is_empty())
        .ok_or(BearerError::MissingHeader)?;

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(BearerError::InvalidFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer_token(Some("bearer abc")), Ok("abc"));
        assert_eq!(extract_bearer_token(Some("BEARER abc")), Ok("abc"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer_token(None), Err(BearerError::MissingHeader));
        assert_eq!(extract_bearer_token(Some("")), Err(BearerError::MissingHeader));
    }

    #[test]
    fn test_malformed_header() {
        for header in [
            "Bearer",
            "Bearer ",
            "Basic dXNlcjpwYXNz",
            "Token abc",
            "Bearer a b",
            "Bearer  abc",
            "abc",
        ] {
            assert_eq!(
                extract_bearer_token(Some(header)),
                Err(BearerError::InvalidFormat),
                "{header:?}"
            );
        }
    }
}
