use anyhow::Context;
use clap::Parser;
use image_analysis_common::{RecordStore, CATEGORIES};
use image_analysis_hub::{cli, client, config, export, logging, scanner, server};
use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    logging::init(level);

    match cli.command {
        Commands::Serve { bind, port, static_dir } => {
            if let Some(bind) = bind {
                config.bind_address = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }

            println!("🖼  image-analyzer - 解析サーバ");
            println!("  http://{}:{}/api/analyze\n", config.bind_address, config.port);

            server::serve(&config, static_dir)
                .await
                .context("サーバが異常終了しました")?;
        }

        Commands::Analyze { paths, endpoint, output, no_csv } => {
            println!("🖼  image-analyzer - 一括解析\n");

            // 1. 画像収集
            println!("[1/3] 画像を読み込み中...");
            let files = scanner::collect_images(&paths)?;
            println!("✔ {}枚の画像を検出\n", files.len());

            if files.is_empty() {
                println!("解析する画像がありません");
                return Ok(());
            }

            // 2. 解析（全件同時）
            println!("[2/3] AI解析中... ({})", endpoint);
            let endpoint = client::HttpEndpoint::new(&endpoint);
            let mut store = RecordStore::new();
            let summary = client::run_batch_with_progress(&endpoint, files, &mut store).await;
            println!(
                "✔ 解析完了: 成功 {}件 / 失敗 {}件\n",
                summary.succeeded, summary.failed
            );

            client::print_groups(&store);

            // 3. CSV出力
            if no_csv || store.is_empty() {
                return Ok(());
            }
            println!("[3/3] CSVを保存中...");
            let output_dir = output.unwrap_or_else(export::default_output_dir);
            let path = export::write_store_csv(&store, &output_dir)?;
            println!("✔ CSV出力: {}", path.display());
        }

        Commands::Categories => {
            for category in CATEGORIES {
                println!("{:>3}  {}", category.id, category.name);
            }
        }

        Commands::Config { show } => {
            if show {
                println!("設定:");
                println!("  APIキー: {}", config.redacted_api_key());
                println!("  ベースURL: {}", config.base_url);
                println!("  バインド: {}:{}", config.bind_address, config.port);
                println!("  ログレベル: {}", config.log_level);
            } else {
                println!("--show で現在の設定を表示します");
            }
        }
    }

    Ok(())
}
