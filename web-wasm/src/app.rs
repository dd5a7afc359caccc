//! メインアプリケーションコンポーネント

use gloo::console;
use gloo::file::futures::read_as_data_url;
use image_analysis_common::{AnalysisResult, RecordStore, UploadedFile};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use web_sys::{File, Url};

use crate::api::analyze::analyze_image;
use crate::batch::run_batch;
use crate::components::{
    export_buttons::ExportButtons,
    header::Header,
    loading_overlay::LoadingOverlay,
    result_tables::ResultTables,
    upload_area::UploadArea,
};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 解析済みレコード（追加・削除のみ）
    let store = RwSignal::new(RecordStore::new());
    // 未完了バッチ数（0より大きい間オーバーレイを表示）
    let pending_batches = RwSignal::new(0u32);

    view! {
        <div class="container">
            <Header />
            <UploadArea store=store pending_batches=pending_batches />
            <ResultTables store=store />
            <ExportButtons store=store />
            <LoadingOverlay pending_batches=pending_batches />
        </div>
    }
}

/// 1バッチ分のファイルを並行に解析
///
/// 各ファイルは成功した時点でストアに追加される。失敗したファイルはログのみ。
pub fn start_batch(files: Vec<File>, store: RwSignal<RecordStore>, pending_batches: RwSignal<u32>) {
    if files.is_empty() {
        return;
    }

    spawn_local(async move {
        let summary = run_batch(files, &pending_batches, analyze_file, |result| match result {
            Ok((uploaded, analysis)) => store.update(|s| {
                s.append(&uploaded, Some(analysis));
            }),
            Err(e) => console::error!(e),
        })
        .await;

        console::log!(format!(
            "バッチ完了: 成功 {} / 失敗 {}",
            summary.succeeded, summary.failed
        ));
    });
}

async fn analyze_file(file: File) -> Result<(UploadedFile, AnalysisResult), String> {
    let uploaded = read_uploaded(&file)
        .await
        .map_err(|e| format!("{}: 読み込み失敗 {}", file.name(), e))?;

    match analyze_image(&uploaded.data_url).await {
        Ok(result) => Ok((uploaded, result)),
        Err(e) => {
            let _ = Url::revoke_object_url(&uploaded.preview);
            Err(format!("{}: 解析失敗 {}", uploaded.file_name, e))
        }
    }
}

/// File から送信用の UploadedFile を作る
async fn read_uploaded(file: &File) -> Result<UploadedFile, String> {
    let blob = gloo::file::Blob::from(web_sys::Blob::from(file.clone()));
    let data_url = read_as_data_url(&blob).await.map_err(|e| e.to_string())?;
    let preview = Url::create_object_url_with_blob(file)
        .map_err(|e| format!("{:?}", e))?;

    Ok(UploadedFile {
        file_name: file.name(),
        relative_path: relative_path(file),
        preview,
        data_url,
    })
}

/// フォルダ選択時の相対パス（`webkitRelativePath`）
fn relative_path(file: &File) -> Option<String> {
    js_sys::Reflect::get(file, &JsValue::from_str("webkitRelativePath"))
        .ok()
        .and_then(|v| v.as_string())
        .filter(|p| !p.is_empty())
}
