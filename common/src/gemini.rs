//! Gemini generateContent API のリクエスト/レスポンス型
//!
//! CLI(reqwest)とWeb(fetch)の両方が同じ型でリクエストを組み立て、
//! 同じ関数でレスポンスを解釈する。送信処理そのものは各クレート側。

use crate::error::{Error, Result};
use crate::image::UploadedImage;
use crate::parser::parse_analysis_response;
use crate::prompts::{build_analysis_prompt, build_blueprint_prompt};
use crate::schema::analysis_response_schema;
use crate::types::{AnalysisResult, BlueprintImage};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_BLUEPRINT_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_THINKING_BUDGET: u32 = 16384;
pub const DEFAULT_ASPECT_RATIO: &str = "4:3";
pub const DEFAULT_IMAGE_SIZE: &str = "2K";

/// モデル名と生成パラメータ
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub analysis_model: String,
    pub blueprint_model: String,
    pub thinking_budget: u32,
    pub aspect_ratio: String,
    pub image_size: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            analysis_model: DEFAULT_ANALYSIS_MODEL.into(),
            blueprint_model: DEFAULT_BLUEPRINT_MODEL.into(),
            thinking_budget: DEFAULT_THINKING_BUDGET,
            aspect_ratio: DEFAULT_ASPECT_RATIO.into(),
            image_size: DEFAULT_IMAGE_SIZE.into(),
        }
    }
}

/// generateContent のエンドポイントURL（キーは含まない）
pub fn endpoint_for_model(api_base: &str, model: &str) -> String {
    let trimmed = model.trim();
    let model_path = if trimmed.starts_with("models/") {
        trimmed.to_string()
    } else {
        format!("models/{}", trimmed)
    };
    format!("{}/{}:generateContent", api_base.trim_end_matches('/'), model_path)
}

// =============================================
// リクエスト
// =============================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// テキストまたはインライン画像のパート
///
/// リクエストとレスポンスで共用する。`thought` は思考過程のパートで、
/// 本文テキストの連結からは除外する。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "inline_data")]
    pub inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Default::default()
        }
    }

    fn is_thought(&self) -> bool {
        self.thought.unwrap_or(false)
    }
}

impl From<&UploadedImage> for Part {
    fn from(image: &UploadedImage) -> Self {
        Part::inline(image.mime_type(), image.base64_data())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, alias = "mime_type")]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_search: Option<GoogleSearch>,
}

impl Tool {
    pub fn google_search() -> Self {
        Self {
            google_search: Some(GoogleSearch {}),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
    pub image_size: String,
}

/// 画像パート（アップロード順）の後ろにテキストパートを1つ付けたContent
fn user_content(images: &[UploadedImage], prompt: String) -> Content {
    let mut parts: Vec<Part> = images.iter().map(Part::from).collect();
    parts.push(Part::text(prompt));
    Content {
        role: Some("user".to_string()),
        parts,
    }
}

/// 寸法解析リクエストを構築
///
/// 画像が空なら通信前に `Error::NoImages`
pub fn build_analysis_request(
    images: &[UploadedImage],
    settings: &ModelSettings,
) -> Result<GenerateContentRequest> {
    if images.is_empty() {
        return Err(Error::NoImages);
    }

    Ok(GenerateContentRequest {
        contents: vec![user_content(images, build_analysis_prompt())],
        tools: vec![Tool::google_search()],
        generation_config: GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(analysis_response_schema()),
            thinking_config: Some(ThinkingConfig {
                thinking_budget: settings.thinking_budget,
            }),
            ..Default::default()
        },
    })
}

/// 図面生成リクエストを構築
///
/// `prior` があれば表と同じ寸法値を図面ラベルに固定する
pub fn build_blueprint_request(
    images: &[UploadedImage],
    prior: Option<&AnalysisResult>,
    settings: &ModelSettings,
) -> Result<GenerateContentRequest> {
    if images.is_empty() {
        return Err(Error::NoImages);
    }

    Ok(GenerateContentRequest {
        contents: vec![user_content(images, build_blueprint_prompt(prior))],
        tools: vec![Tool::google_search()],
        generation_config: GenerationConfig {
            response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
            image_config: Some(ImageConfig {
                aspect_ratio: settings.aspect_ratio.clone(),
                image_size: settings.image_size.clone(),
            }),
            ..Default::default()
        },
    })
}

// =============================================
// レスポンス
// =============================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// 先頭候補の本文テキスト（思考パートを除いて連結）
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter(|p| !p.is_thought())
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }
}

/// 寸法解析レスポンスを解釈
pub fn interpret_analysis_response(response: &GenerateContentResponse) -> Result<AnalysisResult> {
    let text = response.text().ok_or(Error::EmptyResponse)?;
    parse_analysis_response(&text)
}

/// レスポンス中の最初のインライン画像を取り出す
pub fn extract_inline_image(response: &GenerateContentResponse) -> Result<BlueprintImage> {
    response
        .parts()
        .filter_map(|p| p.inline_data.as_ref())
        .find(|inline| !inline.data.is_empty())
        .map(|inline| BlueprintImage {
            mime_type: if inline.mime_type.is_empty() {
                "image/png".to_string()
            } else {
                inline.mime_type.clone()
            },
            data: inline.data.clone(),
        })
        .ok_or(Error::NoImageInResponse)
}

/// APIエラーレスポンス
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// HTTPエラー時のユーザー向けメッセージ
///
/// Geminiのエラー本文に `error.message` があればそれをそのまま返す
/// （認証切れ判定がこの文字列に依存するため加工しない）。
pub fn api_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
        _ => format!("HTTP {}: {}", status, body.trim()),
    }
}
