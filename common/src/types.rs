//! 解析結果の型定義
//!
//! サーバ・ネイティブクライアント・Web(WASM)で共有される型:
//! - AnalyzeRequest: `POST /api/analyze` のリクエストボディ
//! - AnalysisResult: 1枚の画像に対する解析結果（成功時のレスポンス）
//! - ErrorBody: 失敗時の共通エラーエンベロープ

use serde::{Deserialize, Serialize};

/// `POST /api/analyze` のリクエストボディ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// data URI またはリモートURL
    #[serde(default)]
    pub image_url: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: Some(image_url.into()),
        }
    }

    /// 空文字は未指定として扱う
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// AI解析結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub title: String,

    pub description: String,

    /// カンマ区切りのキーワード（正規化済み）
    pub keywords: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
}

impl AnalysisResult {
    /// キーワードを順序どおりに列挙
    pub fn keyword_list(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_result_serialize() {
        let result = AnalysisResult {
            title: "Sunset over mountain ridge, scenic view".to_string(),
            description: "...".to_string(),
            keywords: "sunset,mountain,sky".to_string(),
            category_id: Some(5),
        };

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"title\":\"Sunset over mountain ridge, scenic view\""));
        assert!(json.contains("\"keywords\":\"sunset,mountain,sky\""));
        assert!(json.contains("\"categoryId\":5"));
    }

    #[test]
    fn test_analysis_result_deserialize_without_category() {
        let json = r#"{"title": "t", "description": "d", "keywords": "a,b"}"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.title, "t");
        assert_eq!(result.category_id, None);
    }

    #[test]
    fn test_keyword_list() {
        let result = AnalysisResult {
            keywords: "sunset, mountain,,sky".to_string(),
            ..Default::default()
        };
        let list: Vec<&str> = result.keyword_list().collect();
        assert_eq!(list, vec!["sunset", "mountain", "sky"]);
    }

    #[test]
    fn test_analyze_request_camel_case() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"imageUrl": "data:image/png;base64,AAAA"}"#).unwrap();
        assert_eq!(request.image_url(), Some("data:image/png;base64,AAAA"));

        let json = serde_json::to_string(&AnalyzeRequest::new("https://example.com/a.jpg")).unwrap();
        assert_eq!(json, r#"{"imageUrl":"https://example.com/a.jpg"}"#);
    }

    #[test]
    fn test_analyze_request_empty_is_missing() {
        let empty: AnalyzeRequest = serde_json::from_str(r#"{"imageUrl": ""}"#).unwrap();
        assert_eq!(empty.image_url(), None);

        let absent: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.image_url(), None);
    }

    #[test]
    fn test_error_body_serialize() {
        let json = serde_json::to_string(&ErrorBody::new("Image URL is required")).unwrap();
        assert_eq!(json, r#"{"error":"Image URL is required"}"#);
    }
}
