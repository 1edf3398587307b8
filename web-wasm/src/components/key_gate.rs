//! APIキー選択ゲート
//!
//! キーが未選択（または失効）の間は操作画面の代わりに表示する

use leptos::prelude::*;

#[component]
pub fn KeyGate<FS>(
    api_key: RwSignal<String>,
    /// 直前の失敗理由（失効時に表示）
    error: Signal<Option<String>>,
    on_submit: FS,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="settings-panel key-gate">
            <h2>"Gemini APIキーを選択"</h2>
            <p class="text-muted">
                "寸法解析と図面生成には有料プロジェクトのAPIキーが必要です。"
            </p>

            <Show when=move || error.get().is_some()>
                <p class="api-key-status error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <div class="form-group">
                <label for="api-key">"Gemini API Key"</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="API Keyを入力..."
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        api_key.set(event_target_value(&ev));
                    }
                />
                <a
                    href="https://aistudio.google.com/app/apikey"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "APIキーを取得 →"
                </a>
                <a
                    href="https://ai.google.dev/gemini-api/docs/billing"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "課金の設定について"
                </a>
            </div>

            <button
                class="btn btn-primary"
                disabled=move || api_key.with(|k| k.trim().is_empty())
                on:click={
                    let on_submit = on_submit.clone();
                    move |_| on_submit(())
                }
            >
                "Select API Key"
            </button>
        </div>
    }
}
