// Error Types
// One error enum shared by every engine and the service facade

use thiserror::Error;

use crate::bigint::ArithmeticError;

/// Failures surfaced by the cryptographic engines.
///
/// Decryption failures deliberately carry no detail about which check failed
/// beyond what the variant itself says.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid input: {0}")]
    InputValidation(String),

    #[error("invalid PKCS#7 padding (wrong key or corrupted ciphertext)")]
    Padding,

    #[error("invalid padding")]
    InvalidPadding,

    #[error("decryption failed: {0}")]
    DecryptionFailure(String),

    #[error("key generation failed after {attempts} attempts")]
    KeyGenerationFailure { attempts: usize },

    #[error("message too long: {actual} bytes exceeds maximum of {max}")]
    MessageTooLong { max: usize, actual: usize },

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

impl From<base64::DecodeError> for CryptoError {
    fn from(e: base64::DecodeError) -> Self {
        CryptoError::Encoding(format!("base64: {}", e))
    }
}

impl From<hex::FromHexError> for CryptoError {
    fn from(e: hex::FromHexError) -> Self {
        CryptoError::Encoding(format!("hex: {}", e))
    }
}

impl From<std::string::FromUtf8Error> for CryptoError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        CryptoError::DecryptionFailure(format!("plaintext is not valid UTF-8: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CryptoError::MessageTooLong { max: 117, actual: 200 };
        assert_eq!(err.to_string(), "message too long: 200 bytes exceeds maximum of 117");

        assert_eq!(
            CryptoError::Padding.to_string(),
            "invalid PKCS#7 padding (wrong key or corrupted ciphertext)"
        );

        let err = CryptoError::KeyGenerationFailure { attempts: 16 };
        assert_eq!(err.to_string(), "key generation failed after 16 attempts");

        let err: CryptoError = ArithmeticError::DivisionByZero.into();
        assert_eq!(err.to_string(), ArithmeticError::DivisionByZero.to_string());
    }

    #[test]
    fn test_conversions() {
        use base64::Engine;

        let err: CryptoError = base64::engine::general_purpose::STANDARD
            .decode("not base64!")
            .unwrap_err()
            .into();
        assert!(matches!(err, CryptoError::Encoding(_)));

        let err: CryptoError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, CryptoError::Encoding(_)));

        let err: CryptoError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(matches!(err, CryptoError::DecryptionFailure(_)));
    }
}
