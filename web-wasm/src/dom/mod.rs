//! DOM上の入力フォームへのアダプタ
//!
//! - DomForm: FormFieldSet の実装（`[name="..."]` で入力欄を探す）
//! - DomRenderer: AutofillRenderer の実装（入力欄を囲む div に表示を追加）

mod form;
mod render;

pub use form::DomForm;
pub use render::DomRenderer;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// 入力欄の要素
pub(crate) enum Control {
    Input(HtmlInputElement),
    Select(HtmlSelectElement),
    TextArea(HtmlTextAreaElement),
}

impl Control {
    pub(crate) fn element(&self) -> &Element {
        match self {
            Control::Input(e) => e.as_ref(),
            Control::Select(e) => e.as_ref(),
            Control::TextArea(e) => e.as_ref(),
        }
    }
}

/// 名前で入力欄を探す
pub(crate) fn find_control(root: &Element, name: &str) -> Option<Control> {
    let selector = format!(r#"[name="{}"]"#, name.replace('\\', "\\\\").replace('"', "\\\""));
    let element = root.query_selector(&selector).ok().flatten()?;

    let element = match element.dyn_into::<HtmlInputElement>() {
        Ok(input) => return Some(Control::Input(input)),
        Err(element) => element,
    };
    let element = match element.dyn_into::<HtmlSelectElement>() {
        Ok(select) => return Some(Control::Select(select)),
        Err(element) => element,
    };
    element.dyn_into::<HtmlTextAreaElement>().ok().map(Control::TextArea)
}
