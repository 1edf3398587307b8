//! アップロード済み画像の一覧

use leptos::prelude::*;
use optical_caliper_common::UploadedImage;

#[component]
pub fn ImageGrid<FR, FC>(
    /// (画像ID, 画像) の並び
    images: Signal<Vec<(u64, UploadedImage)>>,
    on_remove: FR,
    on_clear: FC,
) -> impl IntoView
where
    FR: Fn(u64) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="image-grid-header">
            <span>{move || format!("{}枚の写真", images.with(|i| i.len()))}</span>
            <button
                class="btn btn-small btn-tertiary"
                on:click={
                    let on_clear = on_clear.clone();
                    move |_| on_clear(())
                }
            >
                "Clear all"
            </button>
        </div>
        <div class="photo-gallery">
            <For
                each=move || images.get()
                key=|(id, _)| *id
                children=move |(id, image)| {
                    let on_remove = on_remove.clone();
                    view! {
                        <ImageCard image=image on_remove=move || on_remove(id) />
                    }
                }
            />
        </div>
    }
}

#[component]
fn ImageCard<FR>(image: UploadedImage, on_remove: FR) -> impl IntoView
where
    FR: Fn() + 'static + Clone + Send + Sync,
{
    // HEICはブラウザでプレビューできないのでファイル名だけ出す
    let preview = if image.is_heic() {
        view! { <div class="photo-placeholder">"HEIC"</div> }.into_any()
    } else {
        view! { <img src=image.preview_url().to_string() alt=image.file_name().to_string() /> }
            .into_any()
    };

    view! {
        <div class="photo-card">
            {preview}
            <div class="photo-info">
                <h4>{image.file_name().to_string()}</h4>
                <button
                    class="btn btn-small btn-secondary"
                    title="Remove"
                    on:click=move |_| on_remove()
                >
                    "×"
                </button>
            </div>
        </div>
    }
}
