//! 寸法解析のレスポンススキーマ
//!
//! Gemini の `responseSchema`（OpenAPIサブセット）として送信する。
//! フィールド構成は `types::AnalysisResult` と一致させること。

use serde_json::{json, Value};

/// CadFeature.source に許可される値
pub const CAD_SOURCE_VALUES: &[&str] = &["Official Specs", "Visual Measurement"];

pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "identifiedName": {
                "type": "STRING",
                "description": "The identified brand and model name of the object."
            },
            "isStandardProduct": {
                "type": "BOOLEAN",
                "description": "True if the object is a known commercial product."
            },
            "dimensions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING", "description": "Dimension name (Length, Width, Height)" },
                        "visualValue": { "type": "NUMBER", "description": "The value calculated strictly by reading the ruler ticks." },
                        "officialValue": { "type": "NUMBER", "description": "The value found in official specs online (if available)." },
                        "unit": { "type": "STRING", "description": "Unit (cm/mm)" },
                        "visualConfidence": { "type": "STRING", "description": "High/Medium/Low based on image clarity" },
                        "officialSource": { "type": "STRING", "description": "The domain/website where the official spec was found." }
                    },
                    "required": ["label", "visualValue", "unit", "visualConfidence"]
                }
            },
            "rulerReadings": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "dimensionLabel": { "type": "STRING" },
                        "startTick": { "type": "STRING" },
                        "endTick": { "type": "STRING" },
                        "calculationNote": { "type": "STRING" }
                    },
                    "required": ["dimensionLabel", "startTick", "endTick", "calculationNote"]
                }
            },
            "cadData": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "feature": { "type": "STRING" },
                        "specification": { "type": "STRING" },
                        "source": { "type": "STRING", "enum": CAD_SOURCE_VALUES }
                    },
                    "required": ["feature", "specification", "source"]
                }
            },
            "analysisSummary": {
                "type": "STRING",
                "description": "Brief comparison of visual findings vs official specs."
            }
        },
        "required": [
            "identifiedName",
            "isStandardProduct",
            "dimensions",
            "rulerReadings",
            "cadData",
            "analysisSummary"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(value: &Value) -> Vec<&str> {
        value["required"]
            .as_array()
            .expect("required配列がない")
            .iter()
            .filter_map(Value::as_str)
            .collect()
    }

    #[test]
    fn test_top_level_required_fields() {
        let schema = analysis_response_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(
            required(&schema),
            vec![
                "identifiedName",
                "isStandardProduct",
                "dimensions",
                "rulerReadings",
                "cadData",
                "analysisSummary"
            ]
        );
    }

    #[test]
    fn test_dimension_optional_fields_not_required() {
        let schema = analysis_response_schema();
        let items = &schema["properties"]["dimensions"]["items"];
        let req = required(items);
        assert!(req.contains(&"visualValue"));
        assert!(!req.contains(&"officialValue"));
        assert!(!req.contains(&"officialSource"));
        assert_eq!(items["properties"]["visualValue"]["type"], "NUMBER");
    }

    #[test]
    fn test_cad_source_enum() {
        let schema = analysis_response_schema();
        let source = &schema["properties"]["cadData"]["items"]["properties"]["source"];
        assert_eq!(source["enum"], json!(["Official Specs", "Visual Measurement"]));
    }
}
