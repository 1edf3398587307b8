//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"AI Optical Caliper"</h1>
            <p class="text-muted">"定規と一緒に撮った写真から寸法表と4面図を生成"</p>
        </header>
    }
}
