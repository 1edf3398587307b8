//! アップロード画像
//!
//! プレビュー用Data URLとAPI送信用Base64は同じバイト列から導出する。
//! フィールドは非公開にして、`from_bytes` / `from_data_url` 以外で
//! 片方だけ書き換えられないようにしている。

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// アップロードを受け付けるMIMEタイプ
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/heic",
    "image/heif",
];

/// ファイル選択ダイアログのaccept属性
pub const ACCEPT_ATTRIBUTE: &str = "image/png, image/jpeg, image/jpg, image/heic, image/heif";

/// 1ファイルあたりの推奨上限（警告のみ、拒否はしない）
pub const RECOMMENDED_MAX_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    file_name: String,
    mime_type: String,
    base64_data: String,
    preview_url: String,
    byte_len: usize,
}

impl UploadedImage {
    /// バイト列から生成
    pub fn from_bytes(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        let mime_type = mime_type.into();
        let base64_data = BASE64.encode(bytes);
        let preview_url = format!("data:{};base64,{}", mime_type, base64_data);
        Self {
            file_name: file_name.into(),
            mime_type,
            base64_data,
            preview_url,
            byte_len: bytes.len(),
        }
    }

    /// FileReader.readAsDataURL() の結果から生成
    ///
    /// ペイロードがBase64として不正な場合はエラー（壊れたエントリを作らない）
    pub fn from_data_url(file_name: impl Into<String>, data_url: &str) -> Result<Self> {
        if !data_url.starts_with("data:") {
            return Err(Error::InvalidDataUrl("missing data: prefix".into()));
        }
        let payload = extract_base64_from_data_url(data_url)
            .ok_or_else(|| Error::InvalidDataUrl("missing base64 payload".into()))?;
        let mime_type = extract_mime_type_from_data_url(data_url);
        let bytes = BASE64.decode(payload.as_bytes())?;
        Ok(Self::from_bytes(file_name, mime_type, &bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// API送信用（プレフィックスなし）
    pub fn base64_data(&self) -> &str {
        &self.base64_data
    }

    /// 表示用Data URL
    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// ブラウザでプレビューできないHEIC/HEIFか
    pub fn is_heic(&self) -> bool {
        is_heic(&self.mime_type)
    }

    pub fn exceeds_recommended_size(&self) -> bool {
        self.byte_len > RECOMMENDED_MAX_BYTES
    }
}

pub fn is_heic(mime_type: &str) -> bool {
    mime_type == "image/heic" || mime_type == "image/heif"
}

/// 拡張子からMIMEタイプを判定（対応外はNone）
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出
///
/// 抽出失敗時は"image/jpeg"をデフォルトとして返す
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .split(':')
        .nth(1)
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("image/jpeg")
}
