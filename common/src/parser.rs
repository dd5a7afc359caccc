//! APIレスポンスパーサー
//!
//! モデルが返すラベル付きテキストから4つのフィールドを抽出する。
//!
//! ```text
//! title="..." description="..." keys=[a,b,c] categoryId="5"
//! ```
//!
//! - ラベルは大文字小文字を区別し、英数字・`_` の直後には現れない
//! - `=` の前後の空白は許容、フィールドの順序は問わない（最初の出現を採用）
//! - 引用値の中では `\"` が `"`、`\\` が `\` になる。最初のエスケープされていない `"` で値が閉じる
//! - `keys=[...]` は最初の `]` までの空でない本文（改行を含んでよい）
//! - `categoryId` の値は数字のみ（引用符は任意）
//!
//! どれか1つでも欠けていればエラー。部分的な結果は返さない。

use crate::error::{Error, Result};
use crate::types::AnalysisResult;
use regex::Regex;

lazy_static::lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r#"(?:^|[^A-Za-z0-9_])title\s*=\s*""#).unwrap();
    static ref DESCRIPTION_RE: Regex = Regex::new(r#"(?:^|[^A-Za-z0-9_])description\s*=\s*""#).unwrap();
    static ref KEYS_RE: Regex = Regex::new(r"(?s)(?:^|[^A-Za-z0-9_])keys\s*=\s*\[(.+?)\]").unwrap();
    static ref CATEGORY_RE: Regex = Regex::new(r#"(?:^|[^A-Za-z0-9_])categoryId\s*=\s*"?(\d+)"?"#).unwrap();
}

/// ラベル付きレスポンスをパース
///
/// # Arguments
/// * `response` - モデルの出力テキスト
///
/// # Returns
/// * `Ok(AnalysisResult)` - 4フィールドすべて抽出できた場合（値はトリム済み、キーワードは正規化済み）
/// * `Err(Error::MissingField)` - いずれかのフィールドが見つからない、または空
/// * `Err(Error::Parse)` - categoryId が数値として扱えない
///
/// # Examples
/// ```
/// use image_analysis_common::parse_labelled_response;
///
/// let text = r#"title="Red fox" description="A fox in snow" keys=[fox, snow] categoryId="1""#;
/// let result = parse_labelled_response(text).unwrap();
/// assert_eq!(result.keywords, "fox,snow");
/// assert_eq!(result.category_id, Some(1));
/// ```
pub fn parse_labelled_response(response: &str) -> Result<AnalysisResult> {
    let title = quoted_field(response, &TITLE_RE, "title")?;
    let description = quoted_field(response, &DESCRIPTION_RE, "description")?;

    let raw_keys = KEYS_RE
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::MissingField("keys".into()))?;

    let category_digits = CATEGORY_RE
        .captures(response)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::MissingField("categoryId".into()))?;
    let category_id: u32 = category_digits
        .parse()
        .map_err(|e| Error::Parse(format!("categoryId {}: {}", category_digits, e)))?;

    Ok(AnalysisResult {
        title,
        description,
        keywords: normalize_keywords(raw_keys),
        category_id: Some(category_id),
    })
}

/// キーワード文字列を正規化
///
/// カンマで分割 → `"` を削除 → 前後の空白を除去 → 空要素を除外 → カンマで連結。
/// 順序と重複はそのまま保持する。
pub fn normalize_keywords(raw: &str) -> String {
    raw.split(',')
        .map(|k| k.replace('"', "").trim().to_string())
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

fn quoted_field(response: &str, label: &Regex, name: &str) -> Result<String> {
    let start = label
        .find(response)
        .map(|m| m.end())
        .ok_or_else(|| Error::MissingField(name.into()))?;

    let value = read_quoted(&response[start..])
        .ok_or_else(|| Error::MissingField(name.into()))?;

    let value = value.trim();
    if value.is_empty() {
        return Err(Error::MissingField(name.into()));
    }
    Ok(value.to_string())
}

/// 開き引用符の直後から閉じ引用符までを読む（閉じていなければ None）
fn read_quoted(rest: &str) -> Option<String> {
    let mut value = String::new();
    let mut chars = rest.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => return Some(value),
            '\\' => match chars.next()? {
                next @ ('"' | '\\') => value.push(next),
                other => {
                    value.push('\\');
                    value.push(other);
                }
            },
            _ => value.push(c),
        }
    }

    None
}
