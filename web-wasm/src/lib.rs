//! Ledger Autofill (WASM)
//!
//! Add Entry モーダルに傭船契約書の抽出結果を自動入力する。
//!
//! JSから呼び出す関数:
//! - `applyCpFields(formId, fields)`: 抽出結果をフォームに反映
//! - `parseCharterparty(formId, file, deepBlueRef)`: PDFを解析して反映

mod api;
mod dom;

use dom::{DomForm, DomRenderer};
use ledger_autofill_common::{fields_from_value, AutofillEngine, AutofillReport, ExtractedFields};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

/// 解析中表示の要素ID
const STATUS_ID: &str = "cpUploadStatus";

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}

pub(crate) fn log_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document がありません"))
}

/// フォームがまだ表示されているか
///
/// モーダルを閉じるとフォームは非表示になるか中身が差し替えられる。
fn form_is_open(form: &Element) -> bool {
    if !form.is_connected() {
        return false;
    }
    match form.dyn_ref::<HtmlElement>() {
        Some(html) => html.offset_width() > 0 || html.offset_height() > 0,
        None => true,
    }
}

fn apply_to_form(form: &Element, fields: &ExtractedFields) -> AutofillReport {
    let engine = AutofillEngine::default();
    let mut dom_form = DomForm::new(form.clone());
    let mut renderer = DomRenderer::new(form.clone());
    engine.apply(fields, &mut dom_form, &mut renderer)
}

/// 抽出結果をフォームに反映する
///
/// フォームが見つからない場合は何もせず空の結果を返す。
#[wasm_bindgen(js_name = applyCpFields)]
pub fn apply_cp_fields(form_id: &str, fields: JsValue) -> Result<JsValue, JsValue> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(fields).unwrap_or_default();
    let extracted = fields_from_value(&value);

    let report = match document()?.get_element_by_id(form_id) {
        Some(form) => apply_to_form(&form, &extracted),
        None => {
            log_warn(&format!("フォームが見つかりません: {}", form_id));
            AutofillReport::default()
        }
    };

    Ok(serde_wasm_bindgen::to_value(&report)?)
}

/// 傭船契約書PDFを解析してフォームに反映する
///
/// 解析中にモーダルが閉じられた場合は反映しない。
#[wasm_bindgen(js_name = parseCharterparty)]
pub async fn parse_charterparty(
    form_id: String,
    file: web_sys::File,
    deep_blue_ref: Option<String>,
) -> Result<JsValue, JsValue> {
    let document = document()?;
    let status = document.get_element_by_id(STATUS_ID);
    if let Some(status) = &status {
        show_processing(&document, status)?;
    }

    let result = api::cp_parse::parse_charterparty(&file, deep_blue_ref.as_deref()).await;

    if let Some(status) = &status {
        clear_processing(status)?;
    }
    let extracted = result?;

    let report = match document.get_element_by_id(&form_id) {
        Some(form) if form_is_open(&form) => apply_to_form(&form, &extracted),
        _ => {
            log_warn("フォームが閉じられたため自動入力を中止しました");
            AutofillReport::default()
        }
    };

    Ok(serde_wasm_bindgen::to_value(&report)?)
}

fn show_processing(document: &Document, status: &Element) -> Result<(), JsValue> {
    if status.class_list().contains("hidden") {
        return Ok(());
    }
    status.class_list().add_1("loading")?;
    if status.query_selector(".cp-processing")?.is_some() {
        return Ok(());
    }

    let processing = document.create_element("div")?;
    processing.set_class_name("cp-processing");

    let spinner = document.create_element("span")?;
    spinner.set_class_name("spinner");
    let label = document.create_element("span")?;
    label.set_text_content(Some("Processing charterparty…"));

    processing.append_child(&spinner)?;
    processing.append_child(&label)?;
    status.append_child(&processing)?;
    Ok(())
}

fn clear_processing(status: &Element) -> Result<(), JsValue> {
    if let Some(p) = status.query_selector(".cp-processing")? {
        p.remove();
    }
    status.class_list().remove_1("loading")?;
    Ok(())
}
