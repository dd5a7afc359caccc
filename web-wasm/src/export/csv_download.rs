//! CSVダウンロード（Blob + アンカーのクリック）

use image_analysis_common::csv_file_name;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// 本日の日付（`YYYY-MM-DD`、UTC）
pub fn today_iso() -> String {
    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    date_part(&iso).to_string()
}

fn date_part(iso: &str) -> &str {
    iso.split('T').next().unwrap_or_default()
}

/// CSV文字列をファイルとしてダウンロードさせる
pub fn download_csv(csv: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(csv));
    let props = BlobPropertyBag::new();
    props.set_type("text/csv;charset=utf-8;");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &props)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document がありません"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&csv_file_name(&today_iso()));
    anchor.click();

    Url::revoke_object_url(&url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_part() {
        assert_eq!(date_part("2024-05-01T12:34:56.000Z"), "2024-05-01");
        assert_eq!(date_part(""), "");
    }
}
