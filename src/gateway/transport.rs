use crate::error::{CaliperError, Result};
use async_trait::async_trait;
use optical_caliper_common::{
    api_error_message, endpoint_for_model, Error, GenerateContentRequest,
    GenerateContentResponse,
};
use tracing::debug;

/// generateContent を1回送信する経路
///
/// テストでは記録用のモックに差し替える
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// APIキーの再選択後に呼ばれる
    fn update_credential(&mut self, _api_key: &str) {}
}

/// reqwestによるHTTP送信
///
/// タイムアウトは設定しない（応答まで待つ）
pub struct HttpTransport {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = endpoint_for_model(&self.api_base, model);
        debug!(%url, "generateContent送信");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| CaliperError::ApiCall(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CaliperError::ApiCall(e.to_string()))?;

        if !status.is_success() {
            return Err(CaliperError::ApiCall(api_error_message(status.as_u16(), &body)));
        }

        debug!(bytes = body.len(), "generateContent応答");
        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("generateContent response: {}", e)).into())
    }

    fn update_credential(&mut self, api_key: &str) {
        self.api_key = api_key.to_string();
    }
}
