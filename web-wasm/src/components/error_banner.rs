//! エラーバナー

use leptos::prelude::*;

#[component]
pub fn ErrorBanner<FD>(error: Signal<Option<String>>, on_dismiss: FD) -> impl IntoView
where
    FD: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <Show when=move || error.with(|e| e.is_some())>
            <div class="error-banner" role="alert">
                <span>{move || error.get().unwrap_or_default()}</span>
                <button
                    class="btn btn-small btn-tertiary"
                    title="Dismiss"
                    on:click={
                        let on_dismiss = on_dismiss.clone();
                        move |_| on_dismiss(())
                    }
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}
