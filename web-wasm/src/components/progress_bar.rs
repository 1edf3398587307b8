//! 実行中インジケーター

use leptos::prelude::*;

/// 完了率のわからない処理用の不定プログレスバー
#[component]
pub fn ProgressBar(message: &'static str) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar indeterminate">
                <div class="progress-fill" />
            </div>
            <p class="progress-text">{message}</p>
        </div>
    }
}
