use async_trait::async_trait;
use image_analysis_common::{AnalysisResult, AnalyzeRequest, ErrorBody};
use reqwest::Client;

use crate::error::{AppError, Result};

/// 解析エンドポイントの既定URL
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

/// 画像1件を解析するエンドポイント
#[async_trait]
pub trait AnalyzeEndpoint: Send + Sync {
    async fn analyze(&self, image_url: &str) -> Result<AnalysisResult>;
}

/// HTTP経由で `POST /api/analyze` を呼ぶ
pub struct HttpEndpoint {
    client: Client,
    url: String,
}

impl HttpEndpoint {
    /// # Arguments
    /// * `base_url` - サーバのURL（例: `http://127.0.0.1:3000`）
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}/api/analyze", base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AnalyzeEndpoint for HttpEndpoint {
    async fn analyze(&self, image_url: &str) -> Result<AnalysisResult> {
        let response = self
            .client
            .post(&self.url)
            .json(&AnalyzeRequest::new(image_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(AppError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<AnalysisResult>().await?)
    }
}
