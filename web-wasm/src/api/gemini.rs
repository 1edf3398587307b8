//! Gemini API連携（fetch版）
//!
//! リクエスト構築とレスポンス解釈は共通ライブラリを使い、
//! ここではブラウザのfetchで送受信するだけ。
//! エラーは画面表示用の文字列で返す（認証切れ判定がこの文字列に依存する）。

use optical_caliper_common::gemini::DEFAULT_API_BASE;
use optical_caliper_common::{
    api_error_message, build_analysis_request, build_blueprint_request, endpoint_for_model,
    extract_inline_image, interpret_analysis_response, AnalysisResult, BlueprintImage, Error,
    GenerateContentRequest, GenerateContentResponse, ModelSettings, UploadedImage,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// キー付きのリクエストURL
pub fn request_url(api_key: &str, model: &str) -> String {
    format!("{}?key={}", endpoint_for_model(DEFAULT_API_BASE, model), api_key.trim())
}

/// HTTPステータスと本文からレスポンスを解釈
pub fn decode_response(status: u16, ok: bool, body: &str) -> Result<GenerateContentResponse, String> {
    if !ok {
        return Err(api_error_message(status, body));
    }
    serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()).to_string())
}

fn js_error(value: JsValue) -> String {
    match value.dyn_into::<js_sys::Error>() {
        Ok(err) => String::from(err.message()),
        Err(value) => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
    }
}

/// Gemini API呼び出し（共通処理）
async fn generate_content(
    api_key: &str,
    model: &str,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse, String> {
    let body = serde_json::to_string(request).map_err(|e| e.to_string())?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&request_url(api_key, model), &opts).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    gloo::console::debug!(format!("Gemini {} -> HTTP {}", model, resp.status()));
    decode_response(resp.status(), resp.ok(), &text)
}

/// 寸法解析
pub async fn analyze(
    api_key: &str,
    images: &[UploadedImage],
    settings: &ModelSettings,
) -> Result<AnalysisResult, String> {
    let request = build_analysis_request(images, settings).map_err(|e| e.to_string())?;
    let response = generate_content(api_key, &settings.analysis_model, &request).await?;
    interpret_analysis_response(&response).map_err(|e| e.to_string())
}

/// 図面生成
///
/// 解析済みなら同じ寸法値をラベルに使わせる
pub async fn generate_blueprint(
    api_key: &str,
    images: &[UploadedImage],
    prior: Option<&AnalysisResult>,
    settings: &ModelSettings,
) -> Result<BlueprintImage, String> {
    let request = build_blueprint_request(images, prior, settings).map_err(|e| e.to_string())?;
    let response = generate_content(api_key, &settings.blueprint_model, &request).await?;
    extract_inline_image(&response).map_err(|e| e.to_string())
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_js_error_uses_message() {
        let err = js_sys::Error::new("network down");
        assert_eq!(js_error(err.into()), "network down");
    }

    #[wasm_bindgen_test]
    fn wasm_js_error_plain_string() {
        assert_eq!(js_error(JsValue::from_str("boom")), "boom");
    }
}
