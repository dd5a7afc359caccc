//! Data URL ユーティリティ
//!
//! 画像バイト列をJSONに埋め込める `data:<mime>;base64,...` 形式に変換する。

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// バイト列から Data URL を生成
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Data URL から MIMEタイプを抽出
///
/// # Returns
/// `data:` で始まらない場合は None
pub fn extract_mime_type(data_url: &str) -> Option<&str> {
    let rest = data_url.strip_prefix("data:")?;
    let end = rest.find(|c| c == ';' || c == ',')?;
    Some(&rest[..end])
}

/// ログ出力用のペイロード種別（ペイロード本体は出さない）
///
/// `data:image/png` / `data:unknown` / `remote`
pub fn describe_payload(image_url: &str) -> String {
    if image_url.starts_with("data:") {
        match extract_mime_type(image_url) {
            Some(mime) if !mime.is_empty() => format!("data:{}", mime),
            _ => "data:unknown".to_string(),
        }
    } else {
        "remote".to_string()
    }
}
