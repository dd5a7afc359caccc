use tracing_subscriber::{fmt, EnvFilter};

/// ログ初期化
///
/// `RUST_LOG` があればそれを優先し、なければ `level` を使う
pub fn init(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
