//! エクスポートボタンコンポーネント

use gloo::console;
use image_analysis_common::{build_store_csv, RecordStore};
use leptos::prelude::*;

use crate::export::csv_download::download_csv;

/// 全レコードのCSVダウンロード
#[component]
pub fn ExportButtons(store: RwSignal<RecordStore>) -> impl IntoView {
    let is_empty = move || store.with(|s| s.is_empty());

    let on_download_all = move |_| {
        let csv = store.with(build_store_csv);
        if let Err(e) = download_csv(&csv) {
            console::error!(format!("CSVダウンロード失敗: {:?}", e));
        }
    };

    view! {
        <div class="export-buttons">
            <button
                class="btn btn-primary"
                disabled=is_empty
                on:click=on_download_all
            >
                "Download All CSV"
            </button>
        </div>
    }
}
