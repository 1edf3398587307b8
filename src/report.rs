//! 解析結果の端末表示

use optical_caliper_common::presentation::{
    ANALYSIS_EMPTY_MESSAGE, ANALYSIS_LOADING_MESSAGE, NO_CAD_FEATURES_MESSAGE,
};
use optical_caliper_common::{AnalysisResult, CadSource, DimensionRow, ViewState};
use std::fmt::Write;

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// 解析エリアの表示（読み込み中/未実行/結果）
pub fn render_view(view: ViewState<&AnalysisResult>) -> String {
    match view {
        ViewState::Loading => format!("⏳ {}\n", ANALYSIS_LOADING_MESSAGE),
        ViewState::Empty => format!("{}\n", ANALYSIS_EMPTY_MESSAGE),
        ViewState::Populated(result) => render_analysis(result),
    }
}

/// 解析結果を表形式の文字列にする
pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = String::new();

    // 製品カード
    let _ = writeln!(out, "🔎 Identified Object");
    let badge = if result.is_standard_product {
        "  [Standard Product]"
    } else {
        ""
    };
    let _ = writeln!(out, "   {}{}", result.identified_name, badge);
    if !result.analysis_summary.is_empty() {
        let _ = writeln!(out, "   {}", result.analysis_summary);
    }
    out.push('\n');

    // 比較表
    let rows = DimensionRow::collect(result);
    let _ = writeln!(out, "📏 Dimensions Comparison");
    let _ = writeln!(
        out,
        "   {} {} {} {}",
        pad("Dimension", 14),
        pad("Visual Measure", 18),
        pad("Official Spec", 16),
        "Source"
    );
    for row in &rows {
        let visual = if row.discrepancy {
            format!("{} ⚠ Differs", row.visual_text())
        } else {
            row.visual_text()
        };
        let _ = writeln!(
            out,
            "   {} {} {} {}",
            pad(&row.dimension.label, 14),
            pad(&visual, 18),
            pad(&row.official_text(), 16),
            row.source_text()
        );
    }

    // 目盛りの読み取り根拠
    if !result.ruler_readings.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "📐 Visual Calculation Logic");
        for reading in &result.ruler_readings {
            let _ = writeln!(
                out,
                "   {}: Start: {} → End: {} ({})",
                reading.dimension_label,
                reading.start_tick,
                reading.end_tick,
                reading.calculation_note
            );
        }
    }

    // CAD特徴量
    out.push('\n');
    let _ = writeln!(out, "🧊 CAD Feature Specs");
    if result.cad_data.is_empty() {
        let _ = writeln!(out, "   {}", NO_CAD_FEATURES_MESSAGE);
    }
    for item in &result.cad_data {
        let marker = if item.source == CadSource::OfficialSpecs {
            " 🌐"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "   {} {}{}",
            pad(&item.feature, 24),
            item.specification,
            marker
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use optical_caliper_common::{CadFeature, ComparisonDimension, RulerReading};

    fn sample() -> AnalysisResult {
        AnalysisResult {
            identified_name: "Anker PowerCore 10000".into(),
            is_standard_product: true,
            dimensions: vec![
                ComparisonDimension {
                    label: "Length".into(),
                    visual_value: 9.2,
                    official_value: Some(10.0),
                    unit: "cm".into(),
                    visual_confidence: "High".into(),
                    official_source: Some("anker.com".into()),
                },
                ComparisonDimension {
                    label: "Depth".into(),
                    visual_value: 2.2,
                    official_value: None,
                    unit: "cm".into(),
                    visual_confidence: "Low".into(),
                    official_source: None,
                },
            ],
            ruler_readings: vec![RulerReading {
                dimension_label: "Length".into(),
                start_tick: "0".into(),
                end_tick: "9 + 2 minor".into(),
                calculation_note: "9 + 0.2 = 9.2".into(),
            }],
            cad_data: vec![CadFeature {
                feature: "Overall length".into(),
                specification: "100 mm".into(),
                source: CadSource::OfficialSpecs,
            }],
            analysis_summary: "Visual length is shorter than the official size.".into(),
        }
    }

    #[test]
    fn test_render_analysis_sections() {
        let text = render_analysis(&sample());
        assert!(text.contains("Anker PowerCore 10000  [Standard Product]"));
        assert!(text.contains("9.2 cm ⚠ Differs"));
        assert!(text.contains("10 cm"));
        assert!(text.contains("Not found"));
        assert!(text.contains("anker.com"));
        assert!(text.contains("Start: 0 → End: 9 + 2 minor (9 + 0.2 = 9.2)"));
        assert!(text.contains("Overall length"));
    }

    #[test]
    fn test_render_analysis_without_cad() {
        let mut result = sample();
        result.cad_data.clear();
        result.ruler_readings.clear();
        let text = render_analysis(&result);
        assert!(text.contains(NO_CAD_FEATURES_MESSAGE));
        assert!(!text.contains("Visual Calculation Logic"));
    }

    #[test]
    fn test_render_view_states() {
        assert!(render_view(ViewState::Loading).contains(ANALYSIS_LOADING_MESSAGE));
        assert!(render_view(ViewState::Empty).contains(ANALYSIS_EMPTY_MESSAGE));
        let result = sample();
        assert!(render_view(ViewState::Populated(&result)).contains("Dimensions Comparison"));
    }
}
