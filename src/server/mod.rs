//! 解析エンドポイント（HTTPサーバ）
//!
//! `POST /api/analyze` を提供する。静的ディレクトリが指定された場合は
//! それ以外のパスをブラウザクライアントの配信に使う。

mod handler;

pub use handler::analyze;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::upstream::{OpenRouterModel, VisionModel};

/// ハンドラ間で共有する状態
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn VisionModel>,
}

impl AppState {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }
}

/// ルータを構築
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/api/analyze", post(handler::analyze))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
}

/// サーバ起動（終了まで戻らない）
pub async fn serve(config: &Config, static_dir: Option<PathBuf>) -> Result<()> {
    if config.api_key.is_none() {
        warn!("OPENROUTER_API_KEY が未設定です。解析リクエストは失敗します");
    }

    let model = OpenRouterModel::from_config(config);
    info!(provider = model.name(), base_url = %config.base_url, "解析モデル");

    let state = AppState::new(Arc::new(model));
    if let Some(dir) = &static_dir {
        info!(dir = %dir.display(), "静的ファイル配信");
    }
    let app = router(state, static_dir);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "サーバ起動");

    axum::serve(listener, app).await?;
    Ok(())
}
