//! 画像ファイルの収集
//!
//! ファイル指定はそのまま（相対パスなし → Ungrouped）、フォルダ指定は
//! 再帰的に走査して `<フォルダ名>/<サブパス>` の相対パスを保持する。
//! 画像かどうかは拡張子ではなく内容で判定する。

use crate::error::{AppError, Result};
use image_analysis_common::{encode_data_url, UploadedFile};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// 収集候補（読み込み前）
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    relative_path: Option<String>,
}

/// 指定パス群から画像を集めて Data URL 化する
///
/// # Arguments
/// * `paths` - ファイルまたはフォルダのパス
///
/// # Returns
/// 指定順（フォルダ内はパス順）の画像一覧。画像でないファイルは含まない。
pub fn collect_images(paths: &[PathBuf]) -> Result<Vec<UploadedFile>> {
    let mut candidates = Vec::new();

    for path in paths {
        if path.is_dir() {
            candidates.extend(walk_folder(path));
        } else if path.is_file() {
            candidates.push(Candidate {
                path: path.clone(),
                relative_path: None,
            });
        } else {
            return Err(AppError::FolderNotFound(path.display().to_string()));
        }
    }

    let files = candidates
        .par_iter()
        .filter_map(load_image)
        .collect();

    Ok(files)
}

/// フォルダを再帰走査
fn walk_folder(folder: &Path) -> Vec<Candidate> {
    let root_name = folder
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| folder.display().to_string());

    WalkDir::new(folder)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let sub = entry.path().strip_prefix(folder).ok()?;
            let sub: Vec<String> = sub
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect();
            Some(Candidate {
                path: entry.path().to_path_buf(),
                relative_path: Some(format!("{}/{}", root_name, sub.join("/"))),
            })
        })
        .collect()
}

/// 1ファイル読み込み（画像でなければ None）
fn load_image(candidate: &Candidate) -> Option<UploadedFile> {
    let bytes = match std::fs::read(&candidate.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %candidate.path.display(), error = %e, "読み込み失敗");
            return None;
        }
    };

    let mime = sniff_mime_type(&bytes)?;
    debug!(path = %candidate.path.display(), mime, "画像を検出");

    let file_name = candidate
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Some(UploadedFile {
        file_name,
        relative_path: candidate.relative_path.clone(),
        preview: candidate.path.display().to_string(),
        data_url: encode_data_url(mime, &bytes),
    })
}

/// 内容から画像のMIMEタイプを判定
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}
