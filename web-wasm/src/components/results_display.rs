//! 寸法解析結果の表示

use crate::components::progress_bar::ProgressBar;
use leptos::prelude::*;
use optical_caliper_common::presentation::{
    ANALYSIS_EMPTY_MESSAGE, ANALYSIS_LOADING_MESSAGE, NO_CAD_FEATURES_MESSAGE,
};
use optical_caliper_common::{AnalysisResult, CadSource, DimensionRow, Session, ViewState};

/// 解析エリア（読み込み中/未実行/結果のどれか1つだけ）
#[component]
pub fn ResultsDisplay(session: RwSignal<Session>) -> impl IntoView {
    move || {
        session.with(|s| match ViewState::analysis(s) {
            ViewState::Loading => view! { <ProgressBar message=ANALYSIS_LOADING_MESSAGE /> }.into_any(),
            ViewState::Empty => view! {
                <div class="results-empty text-muted">{ANALYSIS_EMPTY_MESSAGE}</div>
            }
            .into_any(),
            ViewState::Populated(result) => view! { <AnalysisView result=result.clone() /> }.into_any(),
        })
    }
}

#[component]
fn AnalysisView(result: AnalysisResult) -> impl IntoView {
    let rows: Vec<_> = DimensionRow::collect(&result)
        .into_iter()
        .map(|row| {
            let reading = row.reading.map(|r| {
                format!("{} → {} ({})", r.start_tick, r.end_tick, r.calculation_note)
            });
            view! {
                <tr class:discrepancy=row.discrepancy>
                    <td>{row.dimension.label.clone()}</td>
                    <td>
                        {row.visual_text()}
                        <span class="confidence">{row.dimension.visual_confidence.clone()}</span>
                        {row.discrepancy.then(|| view! { <span class="badge badge-warning">"Differs"</span> })}
                        {reading.map(|text| view! { <div class="reading-note text-muted">{text}</div> })}
                    </td>
                    <td>{row.official_text()}</td>
                    <td>{row.source_text().to_string()}</td>
                </tr>
            }
        })
        .collect();

    let readings: Vec<_> = result
        .ruler_readings
        .iter()
        .map(|r| {
            view! {
                <li>
                    <strong>{r.dimension_label.clone()}": "</strong>
                    {format!("Start: {} → End: {}", r.start_tick, r.end_tick)}
                    <span class="text-muted">{format!(" ({})", r.calculation_note)}</span>
                </li>
            }
        })
        .collect();
    let has_readings = !readings.is_empty();

    let cad_rows: Vec<_> = result
        .cad_data
        .iter()
        .map(|item| {
            let official = item.source == CadSource::OfficialSpecs;
            view! {
                <tr>
                    <td>{item.feature.clone()}</td>
                    <td>{item.specification.clone()}</td>
                    <td class:official=official>
                        {official.then_some("🌐 ")}
                        {item.source.as_str()}
                    </td>
                </tr>
            }
        })
        .collect();
    let has_cad = !cad_rows.is_empty();

    view! {
        <div class="results-display">
            <div class="identity-card">
                <h3>"Identified Object"</h3>
                <p class="identified-name">
                    {result.identified_name.clone()}
                    {result.is_standard_product.then(|| view! {
                        <span class="badge badge-info">"Standard Product"</span>
                    })}
                </p>
                <p class="text-muted">{result.analysis_summary.clone()}</p>
            </div>

            <h3>"Dimensions Comparison"</h3>
            <table class="dimension-table">
                <thead>
                    <tr>
                        <th>"Dimension"</th>
                        <th>"Visual Measure"</th>
                        <th>"Official Spec"</th>
                        <th>"Source"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>

            {has_readings.then(|| view! {
                <h3>"Visual Calculation Logic"</h3>
                <ul class="reading-list">{readings}</ul>
            })}

            <h3>"CAD Feature Specs"</h3>
            {if has_cad {
                view! {
                    <table class="cad-table">
                        <thead>
                            <tr>
                                <th>"Feature"</th>
                                <th>"Specification"</th>
                                <th>"Source"</th>
                            </tr>
                        </thead>
                        <tbody>{cad_rows}</tbody>
                    </table>
                }
                .into_any()
            } else {
                view! { <p class="text-muted">{NO_CAD_FEATURES_MESSAGE}</p> }.into_any()
            }}
        </div>
    }
}
