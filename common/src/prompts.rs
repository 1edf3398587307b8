//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有されるプロンプト生成ロジック:
//! - build_analysis_prompt: 寸法解析（目盛り読み取り＋公式値検索）
//! - build_blueprint_prompt: 4面図の図面生成
//! - format_dimension_constraints: 解析結果から図面ラベル用の寸法リストを作る

use crate::presentation::format_value;
use crate::types::AnalysisResult;

/// 寸法解析プロンプト
///
/// 2つのタスクを同時に課す:
/// 1. 定規の目盛りだけから寸法を出す（既知の実寸を使わない）
/// 2. 市販品なら公式寸法を検索し、目視値と並べて記録する
pub fn build_analysis_prompt() -> String {
    r#"You are a Dual-Mode Metrology Engine. Every request requires two separate tasks, performed side by side.

TASK 1: VISUAL MEASUREMENT (mandatory)
- Do NOT use any prior knowledge of the object's "real" size.
- Locate the RULER in the image.
- Count the ticks from the start tick to the end tick.
- Express each value as the last whole major mark plus the counted minor ticks (e.g. "9 cm + 2 minor ticks = 9.2 cm"). Never guess a free-form decimal.
- Write the result to 'visualValue' and record 'startTick' and 'endTick' in 'rulerReadings', with the arithmetic in 'calculationNote'.

EDGE DETECTION RULES (avoid the "bezel error"):
1. OUTERMOST SILHOUETTE ONLY: measure the absolute physical extremities of the object.
   - Never stop at the edge of a screen, display panel, button or decorative insert.
   - Example: a power bank with a purple casing and a black screen is measured at the PURPLE CASING, not where the black screen begins.
   - Contrast changes inside the object are NOT object edges. The edge is where the object meets the background table or mat.
2. ALIGNMENT CHECK:
   - Start tick: aligned with the casing tip, not an internal feature.
   - End tick: aligned with the casing tail, not an internal feature.
3. MULTI-IMAGE SYNTHESIS:
   - With several images, read the ticks from the most top-down (orthogonal) view.
   - Use close-up shots of the ends for extra precision when provided.

TASK 2: SPECIFICATION SEARCH (standard products only)
- Identify the object (brand, model).
- Search Google for its official published dimensions.
- If found, fill 'officialValue' and 'officialSource' (the website domain).
- If not found (custom or unbranded object), leave 'officialValue' empty.

COMPARISON:
- Output BOTH values whenever both exist.
- Never overwrite the visual measurement with the official value; the difference must stay visible.
- In 'analysisSummary', state explicitly whether the visual edges and the official size disagree (e.g. "Visual measurement of casing matched official specs, ignoring the screen bezel")."#
        .to_string()
}

/// 解析結果から図面ラベル用の寸法リストを作る
///
/// 各寸法について公式値があれば公式値、なければ目視値を使い
/// `"<label>: <value><unit>"` 形式で連結する。寸法が1つもなければNone。
pub fn format_dimension_constraints(analysis: &AnalysisResult) -> Option<String> {
    if analysis.dimensions.is_empty() {
        return None;
    }

    let list = analysis
        .dimensions
        .iter()
        .map(|dim| {
            format!(
                "{}: {}{}",
                dim.label,
                format_value(dim.preferred_value()),
                dim.unit
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    Some(list)
}

/// 図面生成プロンプト
///
/// `prior` がある場合は表に表示した数値と図面のラベルが一致するよう、
/// 寸法リストを固定値として埋め込む。ない場合は画像から導出させる。
pub fn build_blueprint_prompt(prior: Option<&AnalysisResult>) -> String {
    let dimension_rules = match prior.and_then(format_dimension_constraints) {
        Some(list) => format!(
            r#"DIMENSIONS (hard constraint):
Label the drawing with EXACTLY these values: {list}
Do NOT re-measure the object from the images and do NOT replace these numbers with any other source. They must match the comparison table already shown to the user."#
        ),
        None => r#"DIMENSIONS:
1. Identify the object.
2. Search for its OFFICIAL dimensions if it is a standard product.
3. Use those OFFICIAL dimensions for the labels in the drawing; otherwise derive them from the ruler in the images."#
            .to_string(),
    };

    format!(
        r#"Create a high-quality technical blueprint and engineering schematic of the object in the images, on a dark blue grid background.

{dimension_rules}

LAYOUT (four panels):
- Top-left: front cross-section.
- Top-right: side view.
- Bottom-left: top view.
- Bottom-right: isometric 3D view.

STYLE: clean white lines, distinct dimension arrows, engineering font."#
    )
}
