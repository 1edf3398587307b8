//! APIレスポンスパーサー
//!
//! responseMimeType=application/json を指定していても、
//! モデルによっては ```json ブロックで包んで返すことがあるため
//! JSON部分を抽出してから AnalysisResult としてパースする。

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use optical_caliper_common::extract_json;
///
/// let response = "result: {\"identifiedName\": \"ruler\"}";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + "```json".len();
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSON object not found".into()))
}

/// 寸法解析レスポンスをパース
///
/// 空文字列は `Error::EmptyResponse`、形が合わなければ `Error::Parse`
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    if response.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }

    let json_str = extract_json(response)?;
    serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("AnalysisResult JSON parse error: {}", e)))
}
