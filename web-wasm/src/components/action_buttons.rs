//! 操作ボタンコンポーネント
//!
//! 画像がない間と、どちらかの操作が実行中の間は両方とも押せない

use leptos::prelude::*;
use optical_caliper_common::InFlight;

#[component]
pub fn ActionButtons<FA, FB>(
    can_trigger: Signal<bool>,
    in_flight: Signal<InFlight>,
    on_analyze: FA,
    on_blueprint: FB,
) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone + Send + Sync,
    FB: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="export-buttons">
            <button
                class="btn btn-primary"
                disabled=move || !can_trigger.get()
                on:click={
                    let on_analyze = on_analyze.clone();
                    move |_| on_analyze(())
                }
            >
                {move || {
                    if in_flight.get() == InFlight::Analyzing {
                        "Measuring..."
                    } else {
                        "Generate Dimensions"
                    }
                }}
            </button>

            <button
                class="btn btn-secondary"
                disabled=move || !can_trigger.get()
                on:click={
                    let on_blueprint = on_blueprint.clone();
                    move |_| on_blueprint(())
                }
            >
                {move || {
                    if in_flight.get() == InFlight::DrawingBlueprint {
                        "Drawing..."
                    } else {
                        "Generate Diagram"
                    }
                }}
            </button>
        </div>
    }
}
