//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - AnalysisResult: 寸法解析の出力（Geminiのレスポンススキーマと同形）
//! - BlueprintImage: 図面生成の出力（インライン画像）

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// 1つの寸法の比較行（目視計測値 vs 公式値）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDimension {
    /// 寸法名（Length, Width, Height など）
    pub label: String,

    /// 定規の目盛りから読み取った値
    pub visual_value: f64,

    /// Web検索で見つかった公式値
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_value: Option<f64>,

    pub unit: String,

    /// High/Medium/Low
    pub visual_confidence: String,

    /// 公式値の出典ドメイン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_source: Option<String>,
}

impl ComparisonDimension {
    /// 図面ラベルに使う値（公式値があれば優先）
    pub fn preferred_value(&self) -> f64 {
        self.official_value.unwrap_or(self.visual_value)
    }
}

/// 目盛り読み取りの根拠
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulerReading {
    pub dimension_label: String,
    pub start_tick: String,
    pub end_tick: String,
    pub calculation_note: String,
}

/// CAD特徴量の出典
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CadSource {
    #[serde(rename = "Official Specs")]
    OfficialSpecs,
    #[serde(rename = "Visual Measurement")]
    VisualMeasurement,
}

impl CadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CadSource::OfficialSpecs => "Official Specs",
            CadSource::VisualMeasurement => "Visual Measurement",
        }
    }
}

impl std::fmt::Display for CadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadFeature {
    pub feature: String,
    pub specification: String,
    pub source: CadSource,
}

/// 寸法解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 特定したブランド・型番
    pub identified_name: String,

    /// 市販品かどうか（公式値検索の対象か）
    pub is_standard_product: bool,

    pub dimensions: Vec<ComparisonDimension>,

    pub ruler_readings: Vec<RulerReading>,

    pub cad_data: Vec<CadFeature>,

    pub analysis_summary: String,
}

impl AnalysisResult {
    /// ラベル文字列で目盛り読み取りを引く
    ///
    /// dimensionsとrulerReadingsはラベル文字列でしか対応付けられていない。
    /// 片方にしかないラベルはNoneを返し、そのまま表示側で許容する。
    pub fn reading_for(&self, label: &str) -> Option<&RulerReading> {
        self.ruler_readings
            .iter()
            .find(|r| r.dimension_label == label)
    }
}

/// 生成された図面画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintImage {
    pub mime_type: String,
    /// Base64エンコード済みの画像データ
    pub data: String,
}

impl BlueprintImage {
    /// バイト列から生成
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: BASE64.encode(bytes),
        }
    }

    /// `data:<mime>;base64,<payload>` 形式のData URL
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// 画像バイト列にデコード
    pub fn decode(&self) -> crate::Result<Vec<u8>> {
        Ok(BASE64.decode(self.data.as_bytes())?)
    }

    /// MIMEタイプに対応する拡張子
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}
