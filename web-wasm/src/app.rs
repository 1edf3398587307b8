//! メインアプリケーションコンポーネント
//!
//! 状態はすべて `Session` に集約し、`RwSignal` 1つで画面に配る。
//! 非同期処理の完了時は `Ticket` を返して結果を反映させる
//! （画像リストが途中で変わっていれば結果は捨てられる）。

use crate::api::gemini;
use crate::components::{
    action_buttons::ActionButtons, blueprint_panel::BlueprintPanel, error_banner::ErrorBanner,
    header::Header, image_grid::ImageGrid, key_gate::KeyGate, results_display::ResultsDisplay,
    upload_area::UploadArea,
};
use leptos::prelude::*;
use optical_caliper_common::{ErrorDisposition, ModelSettings, Operation, Session, UploadedImage};
use wasm_bindgen_futures::spawn_local;

/// 操作を開始し、完了したらセッションへ反映する
///
/// 拒否された場合（画像なし・実行中）は何もしない
fn start_operation(
    op: Operation,
    session: RwSignal<Session>,
    api_key: RwSignal<String>,
    settings: StoredValue<ModelSettings>,
) {
    let ticket = match session.try_update(|s| s.begin(op)) {
        Some(Ok(ticket)) => ticket,
        Some(Err(rejected)) => {
            gloo::console::debug!(rejected.to_string());
            return;
        }
        None => return,
    };

    let images = session.with_untracked(|s| s.images().to_vec());
    let prior = session.with_untracked(|s| s.analysis().cloned());
    let key = api_key.get_untracked();
    let settings = settings.get_value();

    spawn_local(async move {
        let finished = match op {
            Operation::Analyze => {
                let outcome = gemini::analyze(&key, &images, &settings).await;
                session.try_update(|s| (s.is_current(&ticket), s.finish_analysis(ticket, outcome)))
            }
            Operation::Blueprint => {
                let outcome =
                    gemini::generate_blueprint(&key, &images, prior.as_ref(), &settings).await;
                session.try_update(|s| (s.is_current(&ticket), s.finish_blueprint(ticket, outcome)))
            }
        };
        let Some((current, disposition)) = finished else {
            return;
        };

        if !current {
            gloo::console::warn!(format!(
                "{:?} result discarded: the image list changed while it was running",
                op
            ));
        }

        // 失効したキーは捨ててゲートで選び直してもらう
        if let Some(ErrorDisposition::Reauthenticate) = disposition {
            gloo::console::warn!("API key rejected; returning to key selection");
            api_key.set(String::new());
        }
    });
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(Session::new(false));
    let api_key = RwSignal::new(String::new());
    let settings = StoredValue::new(ModelSettings::default());

    let credential_selected = Signal::derive(move || session.with(|s| s.credential_selected()));
    let error = Signal::derive(move || session.with(|s| s.error().map(str::to_string)));
    let images = Signal::derive(move || {
        session.with(|s| {
            s.image_entries()
                .map(|(id, image)| (id, image.clone()))
                .collect::<Vec<_>>()
        })
    });
    let has_images = Signal::derive(move || session.with(|s| !s.images().is_empty()));
    let can_trigger = Signal::derive(move || session.with(|s| s.can_trigger()));
    let in_flight = Signal::derive(move || session.with(|s| s.in_flight()));

    // キー選択（初回・失効後の再選択）
    let on_submit_key = move |_: ()| {
        let success = api_key.with_untracked(|k| !k.trim().is_empty());
        session.update(|s| s.credential_reselected(success));
    };

    let on_images_added = move |added: Vec<UploadedImage>| {
        session.update(|s| s.add_images(added));
    };

    let on_remove = move |id: u64| {
        session.update(|s| {
            s.remove_image_by_id(id);
        });
    };

    // 読めなかったファイルはエラーバナーに出す
    let on_read_error = move |message: String| {
        session.update(|s| {
            s.fail(message);
        });
    };

    let on_clear = move |_: ()| {
        session.update(|s| s.clear_all());
    };

    let on_dismiss = move |_: ()| {
        session.update(|s| s.dismiss_error());
    };

    let on_analyze = move |_: ()| start_operation(Operation::Analyze, session, api_key, settings);
    let on_blueprint = move |_: ()| start_operation(Operation::Blueprint, session, api_key, settings);

    view! {
        <div class="container">
            <Header />

            <Show
                when=move || credential_selected.get()
                fallback=move || view! { <KeyGate api_key=api_key error=error on_submit=on_submit_key /> }
            >
                <ErrorBanner error=error on_dismiss=on_dismiss />

                <UploadArea on_images_added=on_images_added on_error=on_read_error />

                <Show
                    when=move || has_images.get()
                    fallback=|| view! { <p class="text-muted">"まだ写真がありません"</p> }
                >
                    <ImageGrid images=images on_remove=on_remove on_clear=on_clear />
                </Show>

                <ActionButtons
                    can_trigger=can_trigger
                    in_flight=in_flight
                    on_analyze=on_analyze
                    on_blueprint=on_blueprint
                />

                <section class="results-section">
                    <h2>"Dimensions"</h2>
                    <ResultsDisplay session=session />
                </section>

                <section class="results-section">
                    <h2>"Blueprint"</h2>
                    <BlueprintPanel session=session />
                </section>
            </Show>
        </div>
    }
}
