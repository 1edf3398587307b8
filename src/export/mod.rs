pub mod excel;

use crate::error::{CaliperError, Result};
use optical_caliper_common::{AnalysisResult, BlueprintImage};
use std::path::{Path, PathBuf};

/// 図面のデフォルトファイル名
pub const BLUEPRINT_FILE_NAME: &str = "gemini_blueprint.png";

/// 解析結果JSONのデフォルトファイル名
pub const RESULT_FILE_NAME: &str = "result.json";

/// Excelのデフォルトファイル名
pub const EXCEL_FILE_NAME: &str = "dimensions.xlsx";

/// 出力先がディレクトリ（または拡張子なし）ならデフォルト名を付ける
pub fn output_path_for(output: &Path, default_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_name)
    } else {
        output.to_path_buf()
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn save_analysis(result: &AnalysisResult, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_analysis(path: &Path) -> Result<AnalysisResult> {
    if !path.exists() {
        return Err(CaliperError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 図面画像をデコードして保存
pub fn save_blueprint(image: &BlueprintImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let bytes = image.decode()?;
    std::fs::write(path, bytes)?;
    Ok(())
}
