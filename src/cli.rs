use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::client::DEFAULT_ENDPOINT;

#[derive(Parser)]
#[command(name = "image-analyzer")]
#[command(about = "画像AI解析サーバ・一括解析クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 解析エンドポイント（POST /api/analyze）を起動
    Serve {
        /// バインドアドレス（省略時は IMAGE_ANALYZER_BIND）
        #[arg(long)]
        bind: Option<String>,

        /// ポート（省略時は IMAGE_ANALYZER_PORT）
        #[arg(short, long)]
        port: Option<u16>,

        /// 同一オリジンで配信する静的ファイル（ブラウザクライアントのビルド成果物）
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// 画像・フォルダを一括解析して表とCSVを出力
    Analyze {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// 解析エンドポイントのURL
        #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// CSV出力先（ファイルまたはディレクトリ、省略時はダウンロードフォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSVを出力しない
        #[arg(long)]
        no_csv: bool,
    },

    /// カテゴリ一覧を表示
    Categories,

    /// 設定を表示
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["image-analyzer", "analyze", "a.jpg", "photos", "--no-csv"]);
        match cli.command {
            Commands::Analyze { paths, endpoint, output, no_csv } => {
                assert_eq!(paths, vec![PathBuf::from("a.jpg"), PathBuf::from("photos")]);
                assert_eq!(endpoint, DEFAULT_ENDPOINT);
                assert!(output.is_none());
                assert!(no_csv);
            }
            _ => panic!("analyze としてパースされるべき"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["image-analyzer", "serve", "--bind", "0.0.0.0", "-p", "8080"]);
        match cli.command {
            Commands::Serve { bind, port, static_dir } => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert!(static_dir.is_none());
            }
            _ => panic!("serve としてパースされるべき"),
        }
    }
}
