//! 結果表示用のビューモデル
//!
//! CLIの端末表示・Excel出力・Web UIが同じ判定を使うよう、
//! 表示状態と比較行をここで組み立てる。

use crate::session::Session;
use crate::types::{AnalysisResult, BlueprintImage, ComparisonDimension, RulerReading};

/// 目視値と公式値の差がこれを超えたら「Differs」表示
pub const DISCREPANCY_TOLERANCE: f64 = 0.5;

/// 公式値がない場合の表示
pub const NOT_FOUND_LABEL: &str = "Not found";

/// 出典がない場合の表示
pub const NO_SOURCE_LABEL: &str = "-";

pub const ANALYSIS_LOADING_MESSAGE: &str = "Analyzing & Searching...";
pub const ANALYSIS_EMPTY_MESSAGE: &str = "No measurements generated yet.";
pub const BLUEPRINT_LOADING_MESSAGE: &str = "Drafting blueprint...";
pub const BLUEPRINT_EMPTY_MESSAGE: &str = "No blueprint generated yet.";
pub const NO_CAD_FEATURES_MESSAGE: &str = "No specific feature details extracted.";

/// 目視値と公式値が許容差を超えて食い違っているか
///
/// 公式値がなければ常にfalse
pub fn has_discrepancy(dim: &ComparisonDimension) -> bool {
    match dim.official_value {
        Some(official) => (dim.visual_value - official).abs() > DISCREPANCY_TOLERANCE,
        None => false,
    }
}

/// 数値の最短表記（5.0 → "5", 10.5 → "10.5"）
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

/// 表示エリアの状態（互いに排他）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Empty,
    Populated(T),
}

impl<T> ViewState<T> {
    fn derive(loading: bool, value: Option<T>) -> Self {
        match (loading, value) {
            (true, _) => ViewState::Loading,
            (false, Some(v)) => ViewState::Populated(v),
            (false, None) => ViewState::Empty,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

impl<'a> ViewState<&'a AnalysisResult> {
    /// 寸法解析エリアの状態
    pub fn analysis(session: &'a Session) -> Self {
        Self::derive(session.is_analyzing(), session.analysis())
    }
}

impl<'a> ViewState<&'a BlueprintImage> {
    /// 図面エリアの状態
    pub fn blueprint(session: &'a Session) -> Self {
        Self::derive(session.is_drawing(), session.blueprint())
    }
}

/// 比較表の1行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionRow<'a> {
    pub dimension: &'a ComparisonDimension,
    /// 同じラベルの目盛り読み取り（なければNone）
    pub reading: Option<&'a RulerReading>,
    pub discrepancy: bool,
}

impl<'a> DimensionRow<'a> {
    /// 解析結果の寸法順に比較行を作る
    pub fn collect(result: &'a AnalysisResult) -> Vec<DimensionRow<'a>> {
        result
            .dimensions
            .iter()
            .map(|dimension| DimensionRow {
                dimension,
                reading: result.reading_for(&dimension.label),
                discrepancy: has_discrepancy(dimension),
            })
            .collect()
    }

    /// 目視値（単位付き）
    pub fn visual_text(&self) -> String {
        format!(
            "{} {}",
            format_value(self.dimension.visual_value),
            self.dimension.unit
        )
    }

    /// 公式値（単位付き）、なければ "Not found"
    pub fn official_text(&self) -> String {
        match self.dimension.official_value {
            Some(v) => format!("{} {}", format_value(v), self.dimension.unit),
            None => NOT_FOUND_LABEL.to_string(),
        }
    }

    pub fn source_text(&self) -> &'a str {
        self.dimension
            .official_source
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_SOURCE_LABEL)
    }
}
