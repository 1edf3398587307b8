//! Excel生成（共通ライブラリ）
//!
//! 寸法解析結果を3シートのブックにする:
//! - Summary: 特定した製品名と比較サマリー
//! - Dimensions: 目視値/公式値の比較表と目盛り読み取り
//! - CAD Features: CAD用の特徴量リスト

use crate::presentation::{DimensionRow, NOT_FOUND_LABEL, NO_CAD_FEATURES_MESSAGE, NO_SOURCE_LABEL};
use crate::types::AnalysisResult;
use rust_xlsxwriter::*;

const DIMENSION_HEADERS: &[(&str, f64)] = &[
    ("Dimension", 14.0),
    ("Visual Measure", 15.0),
    ("Official Spec", 15.0),
    ("Unit", 8.0),
    ("Source", 22.0),
    ("Confidence", 12.0),
    ("Differs", 9.0),
    ("Start Tick", 16.0),
    ("End Tick", 16.0),
    ("Calculation", 36.0),
];

const CAD_HEADERS: &[(&str, f64)] = &[
    ("Feature", 28.0),
    ("Specification", 28.0),
    ("Source", 20.0),
];

struct Formats {
    header: Format,
    text: Format,
    number: Format,
    flagged: Format,
    muted: Format,
}

impl Formats {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_font_size(10.0)
            .set_font_color(Color::RGB(0x555555))
            .set_background_color(Color::RGB(0xF5F5F5))
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Hair)
            .set_border_color(Color::RGB(0xAAAAAA));

        let text = Format::new()
            .set_font_size(11.0)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Hair)
            .set_border_color(Color::RGB(0xCCCCCC));

        let number = text.clone().set_num_format("0.0##");

        let flagged = text
            .clone()
            .set_bold()
            .set_font_color(Color::RGB(0xE36C09));

        let muted = text.clone().set_italic().set_font_color(Color::RGB(0x999999));

        Self {
            header,
            text,
            number,
            flagged,
            muted,
        }
    }
}

fn xlsx_err(context: &str) -> impl Fn(XlsxError) -> String + '_ {
    move |e| format!("{}: {}", context, e)
}

fn write_headers(
    worksheet: &mut Worksheet,
    headers: &[(&str, f64)],
    format: &Format,
) -> Result<(), String> {
    for (col, (title, width)) in headers.iter().enumerate() {
        let col = col as u16;
        worksheet
            .write_string_with_format(0, col, *title, format)
            .map_err(xlsx_err("ヘッダー書き込みエラー"))?;
        worksheet
            .set_column_width(col, *width)
            .map_err(xlsx_err("列幅設定エラー"))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(xlsx_err("ウィンドウ枠固定エラー"))?;
    Ok(())
}

fn write_summary_sheet(
    worksheet: &mut Worksheet,
    result: &AnalysisResult,
    formats: &Formats,
) -> Result<(), String> {
    worksheet
        .set_name("Summary")
        .map_err(xlsx_err("シート名設定エラー"))?;
    worksheet
        .set_column_width(0, 20.0)
        .map_err(xlsx_err("列幅設定エラー"))?;
    worksheet
        .set_column_width(1, 70.0)
        .map_err(xlsx_err("列幅設定エラー"))?;

    let standard = if result.is_standard_product { "Yes" } else { "No" };
    let rows = [
        ("Identified Object", result.identified_name.as_str()),
        ("Standard Product", standard),
        ("Analysis Summary", result.analysis_summary.as_str()),
    ];

    for (row, (label, value)) in rows.iter().enumerate() {
        let row = row as u32;
        worksheet
            .write_string_with_format(row, 0, *label, &formats.header)
            .map_err(xlsx_err("ラベル書き込みエラー"))?;
        worksheet
            .write_string_with_format(row, 1, *value, &formats.text)
            .map_err(xlsx_err("値書き込みエラー"))?;
    }
    Ok(())
}

fn write_dimension_sheet(
    worksheet: &mut Worksheet,
    result: &AnalysisResult,
    formats: &Formats,
) -> Result<(), String> {
    worksheet
        .set_name("Dimensions")
        .map_err(xlsx_err("シート名設定エラー"))?;
    write_headers(worksheet, DIMENSION_HEADERS, &formats.header)?;

    for (i, row) in DimensionRow::collect(result).iter().enumerate() {
        let r = (i + 1) as u32;
        let dim = row.dimension;
        let visual_format = if row.discrepancy {
            &formats.flagged
        } else {
            &formats.number
        };

        worksheet
            .write_string_with_format(r, 0, &dim.label, &formats.text)
            .map_err(xlsx_err("寸法書き込みエラー"))?;
        worksheet
            .write_number_with_format(r, 1, dim.visual_value, visual_format)
            .map_err(xlsx_err("寸法書き込みエラー"))?;
        match dim.official_value {
            Some(v) => worksheet.write_number_with_format(r, 2, v, &formats.number),
            None => worksheet.write_string_with_format(r, 2, NOT_FOUND_LABEL, &formats.muted),
        }
        .map_err(xlsx_err("寸法書き込みエラー"))?;
        worksheet
            .write_string_with_format(r, 3, &dim.unit, &formats.text)
            .map_err(xlsx_err("寸法書き込みエラー"))?;

        let source = row.source_text();
        let source_format = if source == NO_SOURCE_LABEL {
            &formats.muted
        } else {
            &formats.text
        };
        worksheet
            .write_string_with_format(r, 4, source, source_format)
            .map_err(xlsx_err("寸法書き込みエラー"))?;
        worksheet
            .write_string_with_format(r, 5, &dim.visual_confidence, &formats.text)
            .map_err(xlsx_err("寸法書き込みエラー"))?;
        let differs = if row.discrepancy { "Yes" } else { "" };
        worksheet
            .write_string_with_format(r, 6, differs, &formats.flagged)
            .map_err(xlsx_err("寸法書き込みエラー"))?;

        // ラベルが一致しない寸法は目盛り欄を空欄のままにする
        if let Some(reading) = row.reading {
            let cells = [
                (7u16, reading.start_tick.as_str()),
                (8, reading.end_tick.as_str()),
                (9, reading.calculation_note.as_str()),
            ];
            for (col, value) in cells {
                worksheet
                    .write_string_with_format(r, col, value, &formats.text)
                    .map_err(xlsx_err("目盛り書き込みエラー"))?;
            }
        }
    }
    Ok(())
}

fn write_cad_sheet(
    worksheet: &mut Worksheet,
    result: &AnalysisResult,
    formats: &Formats,
) -> Result<(), String> {
    worksheet
        .set_name("CAD Features")
        .map_err(xlsx_err("シート名設定エラー"))?;
    write_headers(worksheet, CAD_HEADERS, &formats.header)?;

    if result.cad_data.is_empty() {
        worksheet
            .write_string_with_format(1, 0, NO_CAD_FEATURES_MESSAGE, &formats.muted)
            .map_err(xlsx_err("CAD書き込みエラー"))?;
        return Ok(());
    }

    for (i, item) in result.cad_data.iter().enumerate() {
        let r = (i + 1) as u32;
        let cells = [
            item.feature.as_str(),
            item.specification.as_str(),
            item.source.as_str(),
        ];
        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string_with_format(r, col as u16, *value, &formats.text)
                .map_err(xlsx_err("CAD書き込みエラー"))?;
        }
    }
    Ok(())
}

/// Excelをバッファに生成
///
/// # Arguments
/// * `result` - 寸法解析結果
pub fn generate_excel_buffer(result: &AnalysisResult) -> Result<Vec<u8>, String> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    write_summary_sheet(workbook.add_worksheet(), result, &formats)?;
    write_dimension_sheet(workbook.add_worksheet(), result, &formats)?;
    write_cad_sheet(workbook.add_worksheet(), result, &formats)?;

    workbook
        .save_to_buffer()
        .map_err(xlsx_err("Excel保存エラー"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CadFeature, CadSource, ComparisonDimension, RulerReading};

    fn result(cad_data: Vec<CadFeature>) -> AnalysisResult {
        AnalysisResult {
            identified_name: "Anker PowerCore".to_string(),
            is_standard_product: true,
            dimensions: vec![
                ComparisonDimension {
                    label: "Length".to_string(),
                    visual_value: 9.2,
                    official_value: Some(10.0),
                    unit: "cm".to_string(),
                    visual_confidence: "High".to_string(),
                    official_source: Some("anker.com".to_string()),
                },
                ComparisonDimension {
                    label: "Depth".to_string(),
                    visual_value: 2.2,
                    official_value: None,
                    unit: "cm".to_string(),
                    visual_confidence: "Low".to_string(),
                    official_source: None,
                },
            ],
            ruler_readings: vec![RulerReading {
                dimension_label: "Length".to_string(),
                start_tick: "0".to_string(),
                end_tick: "9 + 2 minor".to_string(),
                calculation_note: "9 + 0.2 = 9.2".to_string(),
            }],
            cad_data,
            analysis_summary: "Casing is shorter than the listed size.".to_string(),
        }
    }

    #[test]
    fn test_generate_excel_buffer_is_xlsx() {
        let cad = vec![CadFeature {
            feature: "Corner radius".to_string(),
            specification: "R4".to_string(),
            source: CadSource::VisualMeasurement,
        }];
        let buffer = generate_excel_buffer(&result(cad)).expect("Excel生成失敗");
        // xlsxはZIPコンテナ
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_excel_buffer_without_cad() {
        let buffer = generate_excel_buffer(&result(vec![])).expect("Excel生成失敗");
        assert!(!buffer.is_empty());
    }
}
