//! 外部AIサービス（画像→ラベル付きテキスト）

mod openrouter;

pub use openrouter::OpenRouterModel;

use crate::error::Result;
use async_trait::async_trait;

/// 画像を受け取り、ラベル付きテキスト（`title="..." description="..." ...`）を返すモデル
#[async_trait]
pub trait VisionModel: Send + Sync {
    fn name(&self) -> &str;

    /// 画像URL（Data URL可）を1件解析し、生の応答テキストを返す
    async fn complete(&self, image_url: &str) -> Result<String>;
}
