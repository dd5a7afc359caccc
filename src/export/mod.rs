//! CSVファイル出力

use crate::error::Result;
use image_analysis_common::{build_store_csv, csv_file_name, RecordStore};
use std::path::{Path, PathBuf};

/// 本日の日付（UTC, `YYYY-MM-DD`）
pub fn today_iso() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// 出力先の既定値（ダウンロードフォルダ、なければカレント）
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// 出力パスを決定（ディレクトリ指定ならファイル名を付与）
fn output_path(output: &Path, iso_date: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(csv_file_name(iso_date))
    } else {
        output.to_path_buf()
    }
}

/// 全レコードをCSVに書き出す
///
/// # Returns
/// 書き出したファイルのパス
pub fn write_store_csv(store: &RecordStore, output: &Path) -> Result<PathBuf> {
    let path = output_path(output, &today_iso());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, build_store_csv(store))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "2024-05-01");
        assert_eq!(path, dir.path().join("image-analysis-2024-05-01.csv"));
    }

    #[test]
    fn test_output_path_for_file() {
        let path = output_path(Path::new("out/result.csv"), "2024-05-01");
        assert_eq!(path, PathBuf::from("out/result.csv"));
    }

    #[test]
    fn test_today_iso_format() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
    }
}
