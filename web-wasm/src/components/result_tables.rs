//! 解析結果テーブル（フォルダごとに1表）

use gloo::console;
use image_analysis_common::{build_csv, category_label, ImageRecord, RecordId, RecordStore};
use leptos::prelude::*;

use crate::export::csv_download::download_csv;

#[component]
pub fn ResultTables(store: RwSignal<RecordStore>) -> impl IntoView {
    let group_keys = move || {
        store.with(|s| s.groups().into_iter().map(|g| g.key).collect::<Vec<_>>())
    };

    view! {
        <div class="result-tables">
            <For
                each=group_keys
                key=|folder_key| folder_key.clone()
                children=move |folder_key| {
                    view! { <GroupTable folder_key=folder_key store=store /> }
                }
            />
        </div>
    }
}

#[component]
fn GroupTable(folder_key: String, store: RwSignal<RecordStore>) -> impl IntoView {
    let records = {
        let folder_key = folder_key.clone();
        move || {
            store.with(|s| s.group(&folder_key).map(|g| g.records).unwrap_or_default())
        }
    };

    let on_download = {
        let folder_key = folder_key.clone();
        move |_| {
            let csv = store.with(|s| {
                s.group(&folder_key)
                    .map(|g| build_csv(&g.records))
                    .unwrap_or_default()
            });
            if let Err(e) = download_csv(&csv) {
                console::error!(format!("CSVダウンロード失敗: {:?}", e));
            }
        }
    };

    view! {
        <section class="group">
            <div class="group-header">
                <h3>{folder_key.clone()}</h3>
                <button class="btn btn-small btn-secondary" title="Download CSV" on:click=on_download>
                    "Download CSV"
                </button>
            </div>
            <table class="result-table">
                <thead>
                    <tr>
                        <th>"Image"</th>
                        <th>"Title & Description"</th>
                        <th>"Keywords"</th>
                        <th>"Category"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=records
                        key=|record| record.id
                        children=move |record| view! { <RecordRow record=record store=store /> }
                    />
                </tbody>
            </table>
        </section>
    }
}

#[component]
fn RecordRow(record: ImageRecord, store: RwSignal<RecordStore>) -> impl IntoView {
    let id: RecordId = record.id;
    let analysis = record.analysis.clone().unwrap_or_default();
    let keywords: Vec<String> = analysis.keyword_list().map(str::to_string).collect();

    let on_remove = move |_| remove_record(store, id);

    view! {
        <tr>
            <td>
                <img class="preview" src=record.preview.clone() alt=record.file_name.clone() />
                <div class="file-name">{record.file_name.clone()}</div>
            </td>
            <td>
                <div class="title">{analysis.title.clone()}</div>
                <div class="description">{analysis.description.clone()}</div>
            </td>
            <td>
                <div class="keywords">
                    {keywords
                        .into_iter()
                        .map(|k| view! { <span class="keyword-chip">{k}</span> })
                        .collect_view()}
                </div>
            </td>
            <td>{category_label(analysis.category_id)}</td>
            <td>
                <button class="btn btn-small btn-danger" title="Remove image" on:click=on_remove>
                    "✕"
                </button>
            </td>
        </tr>
    }
}

/// レコードを削除し、プレビュー用の Object URL を解放
fn remove_record(store: RwSignal<RecordStore>, id: RecordId) {
    let mut removed = None;
    store.update(|s| removed = s.remove(id).ok());

    if let Some(record) = removed {
        let _ = web_sys::Url::revoke_object_url(&record.preview);
    }
}
