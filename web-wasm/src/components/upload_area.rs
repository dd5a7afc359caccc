//! アップロードエリアコンポーネント
//!
//! 画像選択・フォルダ選択・ドラッグ&ドロップの3経路。
//! どの経路でも `image/` で始まるファイルだけを1バッチとして解析に回す。

use image_analysis_common::RecordStore;
use leptos::html;
use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};

use crate::app::start_batch;

fn is_image_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

fn image_files(list: &FileList) -> Vec<File> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter(|f| is_image_type(&f.type_()))
        .collect()
}

fn dropped_image_files(ev: &DragEvent) -> Vec<File> {
    let Some(items) = ev.data_transfer().map(|dt| dt.items()) else {
        return Vec::new();
    };

    (0..items.length())
        .filter_map(|i| items.get(i))
        .filter(|item| item.kind() == "file" && is_image_type(&item.type_()))
        .filter_map(|item| item.get_as_file().ok().flatten())
        .collect()
}

#[component]
pub fn UploadArea(store: RwSignal<RecordStore>, pending_batches: RwSignal<u32>) -> impl IntoView {
    let (drag_active, set_drag_active) = signal(false);
    let file_input: NodeRef<html::Input> = NodeRef::new();
    let folder_input: NodeRef<html::Input> = NodeRef::new();

    // フォルダ選択（相対パス付き）を有効にする
    Effect::new(move |_| {
        if let Some(input) = folder_input.get() {
            let _ = input.set_attribute("webkitdirectory", "");
            let _ = input.set_attribute("directory", "");
        }
    });

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(list) = input.files() {
            start_batch(image_files(&list), store, pending_batches);
        }
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_drag_active.set(false);
        start_batch(dropped_image_files(&ev), store, pending_batches);
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(true);
    };

    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag_active.set(false);
    };

    let open_files = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let open_folder = move |_| {
        if let Some(input) = folder_input.get() {
            input.click();
        }
    };

    view! {
        <div
            class=move || if drag_active.get() { "upload-area dragover" } else { "upload-area" }
            on:dragenter=on_drag_over
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
        >
            <input
                node_ref=file_input
                type="file"
                accept="image/*"
                multiple=true
                class="hidden"
                on:change=on_change
            />
            <input
                node_ref=folder_input
                type="file"
                accept="image/*"
                multiple=true
                class="hidden"
                on:change=on_change
            />
            <div class="upload-icon">"🖼"</div>
            <div class="upload-buttons">
                <button class="btn btn-primary" on:click=open_files>"Select Images"</button>
                <button class="btn btn-secondary" on:click=open_folder>"Select Folder"</button>
            </div>
            <p class="text-muted">"or drag and drop your images/folders here"</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_type() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/jpeg"));
        assert!(!is_image_type("text/plain"));
        assert!(!is_image_type(""));
    }
}
