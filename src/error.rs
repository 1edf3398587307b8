use optical_caliper_common::Rejected;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaliperError {
    #[error(transparent)]
    Common(#[from] optical_caliper_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`caliper config --set-api-key YOUR_KEY` で設定するか GEMINI_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("APIキーの選択に失敗: {0}")]
    CredentialSelection(String),

    #[error("{0}")]
    Operation(String),
}

impl From<Rejected> for CaliperError {
    fn from(rejected: Rejected) -> Self {
        match rejected {
            Rejected::NoImages => CaliperError::Common(optical_caliper_common::Error::NoImages),
            busy @ Rejected::Busy(_) => CaliperError::Operation(busy.to_string()),
        }
    }
}

impl CaliperError {
    /// セッションに記録するユーザー向けメッセージ
    ///
    /// API呼び出しエラーはリモートの文言をそのまま返す（認証切れ判定に使うため）
    pub fn user_message(&self) -> String {
        match self {
            CaliperError::ApiCall(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CaliperError>;
