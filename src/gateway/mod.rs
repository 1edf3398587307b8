//! Gemini API ゲートウェイ
//!
//! リクエスト構築は共通ライブラリ、送信は `Transport` に任せる。
//! 画像が空の場合はリクエストを作る段階で失敗するので通信は発生しない。

mod transport;

pub use transport::{HttpTransport, Transport};

use crate::error::Result;
use optical_caliper_common::{
    build_analysis_request, build_blueprint_request, extract_inline_image,
    interpret_analysis_response, AnalysisResult, BlueprintImage, ModelSettings, UploadedImage,
};
use tracing::{debug, info};

pub struct Gateway<T: Transport = HttpTransport> {
    transport: T,
    settings: ModelSettings,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, settings: ModelSettings) -> Self {
        Self { transport, settings }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// 寸法解析
    ///
    /// 目視計測と公式値検索を1回のリクエストで行い、構造化JSONを返す
    pub async fn analyze(&self, images: &[UploadedImage]) -> Result<AnalysisResult> {
        let request = build_analysis_request(images, &self.settings)?;
        let model = &self.settings.analysis_model;
        info!(images = images.len(), %model, "寸法解析を開始");
        debug!(
            payload_bytes = images.iter().map(|i| i.base64_data().len()).sum::<usize>(),
            "画像ペイロード"
        );

        let response = self.transport.generate_content(model, &request).await?;
        let result = interpret_analysis_response(&response)?;

        info!(
            name = %result.identified_name,
            dimensions = result.dimensions.len(),
            "寸法解析が完了"
        );
        Ok(result)
    }

    /// 図面生成
    ///
    /// `prior` があれば表示中の寸法値を図面ラベルに固定する
    pub async fn generate_blueprint(
        &self,
        images: &[UploadedImage],
        prior: Option<&AnalysisResult>,
    ) -> Result<BlueprintImage> {
        let request = build_blueprint_request(images, prior, &self.settings)?;
        let model = &self.settings.blueprint_model;
        info!(
            images = images.len(),
            %model,
            with_prior = prior.is_some(),
            "図面生成を開始"
        );

        let response = self.transport.generate_content(model, &request).await?;
        let image = extract_inline_image(&response)?;

        info!(mime = %image.mime_type, "図面生成が完了");
        Ok(image)
    }
}
