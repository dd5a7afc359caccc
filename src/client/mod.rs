//! 一括解析クライアント
//!
//! 画像ごとに1リクエストを同時に発行し、成功したものから順に
//! RecordStore に追加する。失敗した画像はログに出して読み飛ばす。

mod endpoint;

pub use endpoint::{AnalyzeEndpoint, HttpEndpoint, DEFAULT_ENDPOINT};

use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use image_analysis_common::{category_label, FolderGroup, RecordStore, UploadedFile};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

/// 一括解析の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// 全画像を並行に解析し、完了順にストアへ追加する
///
/// すべてのリクエストが終わるまで戻らない。
pub async fn run_batch(
    endpoint: &dyn AnalyzeEndpoint,
    files: Vec<UploadedFile>,
    store: &mut RecordStore,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    if files.is_empty() {
        return summary;
    }

    let mut pending: FuturesUnordered<_> = files
        .into_iter()
        .map(|file| async move {
            let result = endpoint.analyze(&file.data_url).await;
            (file, result)
        })
        .collect();

    while let Some((file, result)) = pending.next().await {
        match result {
            Ok(analysis) => {
                info!(file = %file.file_name, "解析完了");
                store.append(&file, Some(analysis));
                summary.succeeded += 1;
            }
            Err(e) => {
                warn!(file = %file.file_name, error = %e, "解析失敗");
                summary.failed += 1;
            }
        }
    }

    summary
}

/// 解析中スピナー
pub fn spinner() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message("Analyzing images...");
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// スピナーを表示しながら一括解析
pub async fn run_batch_with_progress(
    endpoint: &dyn AnalyzeEndpoint,
    files: Vec<UploadedFile>,
    store: &mut RecordStore,
) -> BatchSummary {
    let bar = spinner();
    let summary = run_batch(endpoint, files, store).await;
    bar.finish_and_clear();
    summary
}

/// フォルダグループ1つを表形式の文字列にする
pub fn format_group(group: &FolderGroup) -> String {
    let mut out = format!("== {} ({}) ==\n", group.key, group.records.len());

    for record in &group.records {
        out.push_str(&format!("- {}\n", record.file_name));
        let Some(analysis) = &record.analysis else {
            continue;
        };
        out.push_str(&format!("    Title:       {}\n", analysis.title));
        out.push_str(&format!("    Description: {}\n", analysis.description));
        out.push_str(&format!("    Keywords:    {}\n", analysis.keyword_list().collect::<Vec<_>>().join(", ")));
        out.push_str(&format!("    Category:    {}\n", category_label(analysis.category_id)));
    }

    out
}

/// 全グループを標準出力へ
pub fn print_groups(store: &RecordStore) {
    for group in store.groups() {
        println!("{}", format_group(&group));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_analysis_common::AnalysisResult;

    fn uploaded(name: &str, relative_path: Option<&str>) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            relative_path: relative_path.map(str::to_string),
            preview: name.to_string(),
            data_url: "data:image/png;base64,AAAA".to_string(),
        }
    }

    #[test]
    fn test_format_group() {
        let mut store = RecordStore::new();
        store.append(
            &uploaded("x.jpg", Some("Trip/x.jpg")),
            Some(AnalysisResult {
                title: "Red Fox".to_string(),
                description: "A fox in snow".to_string(),
                keywords: "fox, snow ,winter".to_string(),
                category_id: Some(1),
            }),
        );

        let text = format_group(&store.groups()[0]);
        assert!(text.starts_with("== Trip (1) =="));
        assert!(text.contains("Title:       Red Fox"));
        assert!(text.contains("Keywords:    fox, snow, winter"));
        assert!(text.contains("Category:    1 (Animals)"));
    }

    #[test]
    fn test_format_group_without_analysis() {
        let mut store = RecordStore::new();
        store.append(&uploaded("y.jpg", None), None);
        let text = format_group(&store.groups()[0]);
        assert!(text.contains("- y.jpg"));
        assert!(!text.contains("Title:"));
    }
}
