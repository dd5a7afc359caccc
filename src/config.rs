use std::net::SocketAddr;

use crate::error::{AppError, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// 実行時設定（環境変数のみ、設定ファイルなし）
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter APIキー
    pub api_key: Option<String>,
    /// OpenAI互換APIのベースURL
    pub base_url: String,
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            bind_address: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 環境変数から読み込み（未設定はデフォルト値）
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み込み（テスト用に環境変数を差し替え可能）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_key: lookup("OPENROUTER_API_KEY").filter(|k| !k.trim().is_empty()),
            base_url: lookup("OPENROUTER_BASE_URL")
                .filter(|u| !u.trim().is_empty())
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            bind_address: lookup("IMAGE_ANALYZER_BIND").unwrap_or(defaults.bind_address),
            port: lookup("IMAGE_ANALYZER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("{}:{} ({})", self.bind_address, self.port, e)))
    }

    /// 表示用（APIキーは伏せる）
    pub fn redacted_api_key(&self) -> &'static str {
        if self.api_key.is_some() {
            "設定済み"
        } else {
            "未設定"
        }
    }
}
