//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す

use crate::error::{CaliperError, Result};
use optical_caliper_common::export::excel_core::generate_excel_buffer;
use optical_caliper_common::AnalysisResult;
use std::path::Path;

pub fn generate_excel(result: &AnalysisResult, output_path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(result).map_err(CaliperError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
