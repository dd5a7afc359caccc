//! プロンプト生成モジュール
//!
//! サーバが外部モデルに送る固定プロンプト:
//! - MODEL / TEMPERATURE / MAX_TOKENS: 固定のモデル指定とサンプリング設定
//! - USER_PROMPT: タイトル・説明・キーワード・カテゴリの生成指示
//! - build_system_prompt: カテゴリマスタと出力形式を含むシステムメッセージ
//!
//! キーワード数（121語）や 70/30 の比率はモデルへの指示にすぎず、
//! サーバ側では検証しない。

use crate::category::taxonomy_json;

/// 使用モデル（固定）
pub const MODEL: &str = "gpt-4o-mini";

/// サンプリング温度（固定）
pub const TEMPERATURE: f32 = 0.8;

/// 最大出力トークン数（固定）
pub const MAX_TOKENS: u32 = 4000;

/// 画像と一緒に送るユーザープロンプト
pub const USER_PROMPT: &str = "Generate title based on main image context with Descriptive title format: \
Action or Event Subject, Location, Content Type, Environment, Viewpoint, Concept for SEO Impact \
+ description format: explain the story in detail in 150 character \
The title must be strictly 100 - 150 characters long and Do not exceed 150 characters \
Generate 121 keywords using single words or compound words (e.g., Coffee,Coffee table, High school, Well-being, Long-term, Living room). \
Do not create combined words without proper spaces (e.g., livingroom or wrong-room). \
Include keywords that cover diverse topics like home, lifestyle, technology, health, and nature. \
Ensure 70% are SEO-friendly and 30% are common words. Split the output into two groups clearly \
use concept 'saleorasciishirtfront thumbnail' as 30% reference. \
+ Analyze category based on '1.Adobe-Category' dataset";

/// 出力形式の指定（パーサーの文法と対応）
pub const OUTPUT_CONVENTION: &str =
    r#"title="title" description="description" keys=[,,] categoryId="id""#;

/// システムメッセージを生成
///
/// カテゴリマスタ、言語・ブランド除外ルール、出力形式を含む
pub fn build_system_prompt() -> String {
    format!(
        "Always refer to the following '1.Adobe-Category' dataset: {} \
Generate only english contain only correctly spelled words with SEO exclude any brand names, trademarks, \
copyrighted terms, genericized trademark, or specific commercial products. \
Output is plain text {}",
        taxonomy_json(),
        OUTPUT_CONVENTION
    )
}
