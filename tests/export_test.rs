//! 解析結果JSON/図面/Excel出力の統合テスト

use optical_caliper::export::{self, excel};
use optical_caliper_common::{
    AnalysisResult, BlueprintImage, CadFeature, CadSource, ComparisonDimension, RulerReading,
};
use tempfile::tempdir;

fn create_test_result() -> AnalysisResult {
    AnalysisResult {
        identified_name: "Anker PowerCore 10000".to_string(),
        is_standard_product: true,
        dimensions: vec![
            ComparisonDimension {
                label: "Length".to_string(),
                visual_value: 9.2,
                official_value: Some(9.2),
                unit: "cm".to_string(),
                visual_confidence: "High".to_string(),
                official_source: Some("anker.com".to_string()),
            },
            ComparisonDimension {
                label: "Width".to_string(),
                visual_value: 6.1,
                official_value: None,
                unit: "cm".to_string(),
                visual_confidence: "Medium".to_string(),
                official_source: None,
            },
        ],
        ruler_readings: vec![RulerReading {
            dimension_label: "Length".to_string(),
            start_tick: "0 cm".to_string(),
            end_tick: "9 cm + 2 minor".to_string(),
            calculation_note: "9 + 0.2 = 9.2 cm".to_string(),
        }],
        cad_data: vec![CadFeature {
            feature: "Corner radius".to_string(),
            specification: "R4".to_string(),
            source: CadSource::VisualMeasurement,
        }],
        analysis_summary: "Visual measurement of casing matched official specs.".to_string(),
    }
}

#[test]
fn test_analysis_json_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(export::RESULT_FILE_NAME);
    let result = create_test_result();

    export::save_analysis(&result, &path).expect("JSON保存失敗");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"identifiedName\""));
    assert!(content.contains("\"officialSource\": \"anker.com\""));

    let loaded = export::load_analysis(&path).expect("JSON読み込み失敗");
    assert_eq!(loaded, result);
}

#[test]
fn test_load_analysis_rejects_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"identifiedName": "only name"}"#).unwrap();

    assert!(export::load_analysis(&path).is_err());
}

#[test]
fn test_excel_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join(export::EXCEL_FILE_NAME);

    let result = excel::generate_excel(&create_test_result(), &output_path);
    assert!(result.is_ok(), "Excel生成に失敗: {:?}", result.err());
    assert!(output_path.exists(), "Excelファイルが作成されていない");

    let bytes = std::fs::read(&output_path).expect("ファイル読み込み失敗");
    assert!(bytes.starts_with(b"PK"), "xlsx(ZIP)形式ではない");
}

#[test]
fn test_blueprint_saved_to_default_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
    let image = BlueprintImage::from_bytes("image/png", &bytes);

    let path = export::output_path_for(dir.path(), export::BLUEPRINT_FILE_NAME);
    export::save_blueprint(&image, &path).expect("図面保存失敗");

    assert_eq!(path.file_name().unwrap(), "gemini_blueprint.png");
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}
