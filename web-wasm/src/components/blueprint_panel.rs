//! 図面エリア

use crate::components::progress_bar::ProgressBar;
use leptos::prelude::*;
use optical_caliper_common::presentation::{BLUEPRINT_EMPTY_MESSAGE, BLUEPRINT_LOADING_MESSAGE};
use optical_caliper_common::{Session, ViewState};

/// ダウンロード時のファイル名
pub const BLUEPRINT_FILE_NAME: &str = "gemini_blueprint.png";

#[component]
pub fn BlueprintPanel(session: RwSignal<Session>) -> impl IntoView {
    move || {
        session.with(|s| match ViewState::blueprint(s) {
            ViewState::Loading => view! { <ProgressBar message=BLUEPRINT_LOADING_MESSAGE /> }.into_any(),
            ViewState::Empty => view! {
                <div class="blueprint-empty text-muted">{BLUEPRINT_EMPTY_MESSAGE}</div>
            }
            .into_any(),
            ViewState::Populated(image) => {
                let data_uri = image.to_data_uri();
                view! {
                    <div class="blueprint-panel">
                        <img class="blueprint-image" src=data_uri.clone() alt="Generated blueprint" />
                        <a class="btn btn-secondary" href=data_uri download=BLUEPRINT_FILE_NAME>
                            "Download"
                        </a>
                    </div>
                }
                .into_any()
            }
        })
    }
}
