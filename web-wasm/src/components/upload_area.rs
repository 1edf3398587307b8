//! アップロードエリアコンポーネント
//!
//! 複数ファイルは並行して読み込み、すべて読み終えてから選択順のまま一括で追加する

use futures::future::join_all;
use leptos::prelude::*;
use optical_caliper_common::image::{mime_type_for_extension, ACCEPT_ATTRIBUTE};
use optical_caliper_common::UploadedImage;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{DragEvent, File, FileList, HtmlInputElement};

#[component]
pub fn UploadArea<F, FE>(on_images_added: F, on_error: FE) -> impl IntoView
where
    F: Fn(Vec<UploadedImage>) + 'static + Clone + Send + Sync,
    FE: Fn(String) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let handle_files = {
        let on_images_added = on_images_added.clone();
        let on_error = on_error.clone();
        move |files: FileList| {
            let files: Vec<File> = (0..files.length()).filter_map(|i| files.get(i)).collect();
            if files.is_empty() {
                return;
            }
            let on_images_added = on_images_added.clone();
            let on_error = on_error.clone();
            spawn_local(async move {
                let outcomes = join_all(files.into_iter().map(read_file)).await;
                let (images, failed) = split_reads(outcomes);
                if !images.is_empty() {
                    on_images_added(images);
                }
                if let Some(message) = read_failure_message(&failed) {
                    on_error(message);
                }
            });
        }
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                handle_files(files);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = {
        let handle_files = handle_files.clone();
        move |_| {
            if let Err(err) = open_file_dialog(handle_files.clone()) {
                gloo::console::error!("file dialog failed", err);
            }
        }
    };

    view! {
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <div class="upload-icon">"📏"</div>
            <p>"定規と一緒に撮った写真をドラッグ&ドロップ または クリックして選択"</p>
            <p class="text-muted">"対応形式: PNG, JPEG, HEIC（複数枚可・1枚10MBまで推奨）"</p>
        </div>
    }
}

/// ファイル選択ダイアログを開く
fn open_file_dialog<H>(handle_files: H) -> Result<(), JsValue>
where
    H: Fn(FileList) + 'static,
{
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("file");
    input.set_accept(ACCEPT_ATTRIBUTE);
    input.set_multiple(true);

    let input_clone = input.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if let Some(files) = input_clone.files() {
            handle_files(files);
        }
    }) as Box<dyn FnMut(_)>);

    input.set_onchange(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    input.click();
    Ok(())
}

/// ブラウザがMIMEタイプを付けないHEICは拡張子から補う
fn resolve_mime_type(file_name: &str, reported: &str) -> String {
    if !reported.is_empty() {
        return reported.to_string();
    }
    file_name
        .rsplit_once('.')
        .and_then(|(_, ext)| mime_type_for_extension(ext))
        .unwrap_or("image/jpeg")
        .to_string()
}

/// 読み込み結果を成功分（選択順）と失敗したファイル名に分ける
fn split_reads(outcomes: Vec<Result<UploadedImage, String>>) -> (Vec<UploadedImage>, Vec<String>) {
    let mut images = Vec::new();
    let mut failed = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(image) => images.push(image),
            Err(file_name) => failed.push(file_name),
        }
    }
    (images, failed)
}

/// 読めなかったファイルのエラーバナー用メッセージ（なければNone）
fn read_failure_message(failed: &[String]) -> Option<String> {
    if failed.is_empty() {
        None
    } else {
        Some(format!("{} could not be read", failed.join(", ")))
    }
}

/// 1ファイルを読み込む（失敗時はファイル名を返す）
async fn read_file(file: File) -> Result<UploadedImage, String> {
    let file_name = file.name();
    let buffer = match JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => buffer,
        Err(err) => {
            gloo::console::warn!(format!("{} could not be read", file_name), err);
            return Err(file_name);
        }
    };
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let image = UploadedImage::from_bytes(
        file_name.clone(),
        resolve_mime_type(&file_name, &file.type_()),
        &bytes,
    );
    if image.exceeds_recommended_size() {
        gloo::console::warn!(format!("{} is larger than 10MB", file_name));
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_failure_becomes_banner_message() {
        let outcomes = vec![
            Ok(UploadedImage::from_bytes("a.png", "image/png", b"a")),
            Err("broken.jpg".to_string()),
            Ok(UploadedImage::from_bytes("b.png", "image/png", b"b")),
        ];
        let (images, failed) = split_reads(outcomes);

        let names: Vec<_> = images.iter().map(|i| i.file_name()).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
        assert_eq!(
            read_failure_message(&failed).as_deref(),
            Some("broken.jpg could not be read")
        );
    }

    #[test]
    fn test_no_message_when_all_reads_succeed() {
        assert_eq!(read_failure_message(&[]), None);
    }

    #[test]
    fn test_resolve_mime_type_prefers_reported() {
        assert_eq!(resolve_mime_type("a.heic", "image/png"), "image/png");
    }

    #[test]
    fn test_resolve_mime_type_from_extension() {
        assert_eq!(resolve_mime_type("IMG_0001.HEIC", ""), "image/heic");
        assert_eq!(resolve_mime_type("ruler.png", ""), "image/png");
        assert_eq!(resolve_mime_type("noext", ""), "image/jpeg");
    }
}
