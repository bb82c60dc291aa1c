//! 傭船契約書の解析API呼び出し
//!
//! PDFを `/api/cp/parse` に送信し、レスポンスの抽出結果を返す。

use ledger_autofill_common::{ExtractedFields, ParseResponse, PARSE_ENDPOINT};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

const PDF_MIME: &str = "application/pdf";

/// PDF以外は送信しない
pub fn ensure_pdf(file: &File) -> Result<(), JsValue> {
    if file.type_() != PDF_MIME {
        return Err(JsValue::from_str("Only PDF charterparties are supported."));
    }
    Ok(())
}

/// 抽出サービスを呼び出す
pub async fn parse_charterparty(
    file: &File,
    deep_blue_ref: Option<&str>,
) -> Result<ExtractedFields, JsValue> {
    ensure_pdf(file)?;

    let form_data = FormData::new()?;
    form_data.append_with_blob("file", file)?;
    if let Some(reference) = deep_blue_ref.map(str::trim).filter(|r| !r.is_empty()) {
        form_data.append_with_str("DeepBlueRef", reference)?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form_data.as_ref());

    let request = Request::new_with_str_and_init(PARSE_ENDPOINT, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    // エラー時もJSON本文にメッセージが入る
    let json = JsFuture::from(resp.json()?).await?;
    let value: serde_json::Value = serde_wasm_bindgen::from_value(json)?;
    let response: ParseResponse = serde_json::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("CP parse failed: {}", e)))?;

    response
        .into_fields()
        .map_err(|e| JsValue::from_str(&format!("CP parse failed: {}", e)))
}
