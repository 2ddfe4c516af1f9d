pub mod ip;
pub mod url_validator;

/// Characters a short code may contain.
const CODE_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Upper bound on user-supplied short code length.
pub const MAX_CODE_LENGTH: usize = 20;

pub fn generate_short_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_CHARSET[rand::random_range(0..CODE_CHARSET.len())] as char)
        .take(length)
        .collect()
}

/// Checks charset and length; codes are 1..=20 chars of `[A-Za-z0-9_-]`.
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_short_code_length() {
        assert_eq!(generate_short_code(6).len(), 6);
        assert_eq!(generate_short_code(1).len(), 1);
        assert_eq!(generate_short_code(20).len(), 20);
    }

    #[test]
    fn test_generate_short_code_charset() {
        let code = generate_short_code(64);
        assert!(code.bytes().all(|b| CODE_CHARSET.contains(&b)));
    }

    #[test]
    fn test_generated_codes_are_valid() {
        for _ in 0..32 {
            assert!(is_valid_short_code(&generate_short_code(6)));
        }
    }

    #[test]
    fn test_valid_short_codes() {
        assert!(is_valid_short_code("abc123"));
        assert!(is_valid_short_code("a"));
        assert!(is_valid_short_code("with_underscore"));
        assert!(is_valid_short_code("with-hyphen"));
        assert!(is_valid_short_code("A1b2C3d4E5f6G7h8I9j0"));
    }

    #[test]
    fn test_invalid_short_codes() {
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("a b"));
        assert!(!is_valid_short_code("with/slash"));
        assert!(!is_valid_short_code("with.dot"));
        assert!(!is_valid_short_code("émoji"));
        // 21 chars, one over the limit
        assert!(!is_valid_short_code("a123456789b123456789c"));
    }
}
