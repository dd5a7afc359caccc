use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use image_analysis_common::ErrorBody;
use thiserror::Error;

/// 入力エラー時にクライアントへ返すメッセージ
pub const MISSING_IMAGE_MESSAGE: &str = "Image URL is required";

/// 解析失敗時にクライアントへ返すメッセージ（詳細はログのみ）
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze image";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("画像URLが指定されていません")]
    MissingImageUrl,

    #[error("API呼び出しエラー: {0}")]
    Upstream(String),

    #[error("APIから応答がありません")]
    EmptyResponse,

    #[error(transparent)]
    Parse(#[from] image_analysis_common::Error),

    #[error("解析エンドポイントエラー ({status}): {message}")]
    Endpoint { status: u16, message: String },

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),
}

impl AppError {
    /// HTTPステータス（入力エラーは400、それ以外は500）
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingImageUrl => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// クライアントへ返すメッセージ
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MissingImageUrl => MISSING_IMAGE_MESSAGE,
            _ => ANALYSIS_FAILED_MESSAGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.public_message()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
