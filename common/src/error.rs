//! エラー型定義

use thiserror::Error;

/// 認証切れと判定するリモートエラーメッセージの部分文字列
pub const AUTH_EXPIRED_MARKER: &str = "Requested entity was not found";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("No images provided")]
    NoImages,

    #[error("No response received from Gemini")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No image data found in the response")]
    NoImageInResponse,

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// リモートのエラーメッセージがAPIキーの失効を示すか判定
///
/// Gemini側は失効・無効なキーに対して固有のエラーコードを返さないため、
/// メッセージ中の固定文字列で判定する。
pub fn is_auth_expired(message: &str) -> bool {
    message.contains(AUTH_EXPIRED_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_images() {
        let display = format!("{}", Error::NoImages);
        assert_eq!(display, "No images provided");
    }

    #[test]
    fn test_error_display_parse() {
        let error = Error::Parse("unexpected token".to_string());
        assert_eq!(format!("{}", error), "Parse error: unexpected token");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_from_base64() {
        use base64::Engine;
        let decode_error = base64::engine::general_purpose::STANDARD
            .decode("!!!")
            .unwrap_err();
        let error: Error = decode_error.into();
        assert!(matches!(error, Error::Base64(_)));
    }

    #[test]
    fn test_is_auth_expired_exact_marker() {
        assert!(is_auth_expired("Requested entity was not found"));
        assert!(is_auth_expired(
            "{\"error\":{\"code\":404,\"message\":\"Requested entity was not found.\"}}"
        ));
    }

    #[test]
    fn test_is_auth_expired_other_messages() {
        assert!(!is_auth_expired("API key not valid. Please pass a valid API key."));
        assert!(!is_auth_expired("requested entity was not found"));
        assert!(!is_auth_expired("Requested entity was"));
        assert!(!is_auth_expired(""));
    }
}
