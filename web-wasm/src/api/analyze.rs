//! 解析エンドポイント呼び出し（同一オリジンの `/api/analyze`）

use image_analysis_common::{AnalysisResult, AnalyzeRequest, ErrorBody};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

const ANALYZE_PATH: &str = "/api/analyze";

/// リクエスト本文（`{"imageUrl": ...}`）
fn request_body(image_url: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string(&AnalyzeRequest::new(image_url))
}

/// 画像1枚を解析
///
/// # Arguments
/// * `image_url` - Data URL または公開URL
///
/// # Returns
/// 失敗時はサーバの `error` メッセージ（取れなければHTTPステータス）
pub async fn analyze_image(image_url: &str) -> Result<AnalysisResult, String> {
    call_analyze(image_url).await.map_err(|e| {
        e.as_string().unwrap_or_else(|| format!("{:?}", e))
    })
}

async fn call_analyze(image_url: &str) -> Result<AnalysisResult, JsValue> {
    let body = request_body(image_url).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(ANALYZE_PATH, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let json = JsFuture::from(resp.json()?).await;

    if !resp.ok() {
        let message = json
            .ok()
            .and_then(|v| serde_wasm_bindgen::from_value::<ErrorBody>(v).ok())
            .map(|b| b.error)
            .unwrap_or_else(|| format!("HTTP {}", resp.status()));
        return Err(JsValue::from_str(&message));
    }

    let result: AnalysisResult = serde_wasm_bindgen::from_value(json?)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let body = request_body("data:image/png;base64,AAAA").expect("シリアライズ失敗");
        assert_eq!(body, r#"{"imageUrl":"data:image/png;base64,AAAA"}"#);
    }
}
