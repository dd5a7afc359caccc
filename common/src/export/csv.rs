//! CSV出力（共通ライブラリ）
//!
//! レコードを `Filename,Title,Description,Keywords,Category` 形式のCSV文字列にする。
//! ファイルへの書き込み・ダウンロードは呼び出し側（CLI/WASM）が行う。

use crate::record::{ImageRecord, RecordStore};

/// ヘッダー行
pub const CSV_HEADERS: [&str; 5] = ["Filename", "Title", "Description", "Keywords", "Category"];

/// セルをエスケープ
///
/// 全セルを `"` で囲み、内部の `"` は `""` にする
pub fn escape_field(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn csv_row<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| escape_field(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

fn record_cells(record: &ImageRecord) -> [String; 5] {
    match &record.analysis {
        Some(a) => [
            record.file_name.clone(),
            a.title.clone(),
            a.description.clone(),
            a.keywords.clone(),
            a.category_id.map(|id| id.to_string()).unwrap_or_default(),
        ],
        None => [
            record.file_name.clone(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ],
    }
}

/// レコード列からCSVを生成（ヘッダー付き、行区切りは `\n`）
pub fn build_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a ImageRecord>,
{
    let mut rows = vec![csv_row(&CSV_HEADERS[..])];
    rows.extend(records.into_iter().map(|r| csv_row(&record_cells(r)[..])));
    rows.join("\n")
}

/// 全レコードのCSV（グループ順 → グループ内の追加順）
pub fn build_store_csv(store: &RecordStore) -> String {
    let groups = store.groups();
    build_csv(groups.iter().flat_map(|g| g.records.iter()))
}

/// 出力ファイル名（例: `image-analysis-2026-10-19.csv`）
pub fn csv_file_name(iso_date: &str) -> String {
    format!("image-analysis-{}.csv", iso_date)
}
