use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use image_analysis_common::{describe_payload, parse_labelled_response, AnalysisResult, AnalyzeRequest};
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::error::{AppError, Result};

/// `POST /api/analyze`
///
/// 本文が JSON でない、または `imageUrl` が空の場合は 400。
/// それ以外の失敗（外部API・応答解析）はすべて 500 で、詳細はログのみに出す。
pub async fn analyze(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "不正なリクエスト本文");
            return Err(AppError::MissingImageUrl);
        }
    };

    let Some(image_url) = request.image_url() else {
        warn!("imageUrl なし");
        return Err(AppError::MissingImageUrl);
    };

    info!(payload = %describe_payload(image_url), "解析リクエスト受信");

    let start = Instant::now();
    let raw = state.model.complete(image_url).await.map_err(|e| {
        error!(error = %e, "外部API呼び出し失敗");
        e
    })?;
    info!(latency_ms = start.elapsed().as_millis() as u64, "外部API応答");

    let result = parse_labelled_response(&raw).map_err(|e| {
        error!(error = %e, "応答の解析に失敗");
        debug!(raw = %raw, "解析できなかった応答");
        AppError::from(e)
    })?;

    Ok(Json(result))
}
