use super::{find_control, Control};
use ledger_autofill_common::{FieldKind, FormFieldSet};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlOptionElement};

/// DOMフォーム
pub struct DomForm {
    root: Element,
}

impl DomForm {
    pub fn new(root: Element) -> Self {
        Self { root }
    }
}

impl FormFieldSet for DomForm {
    fn kind_of(&self, name: &str) -> Option<FieldKind> {
        match find_control(&self.root, name)? {
            Control::Select(_) => Some(FieldKind::Choice),
            Control::TextArea(_) => Some(FieldKind::Textarea),
            Control::Input(input) => match input.type_().as_str() {
                "date" => Some(FieldKind::Date),
                "number" => Some(FieldKind::Number),
                // 値を書き込めない入力欄
                "checkbox" | "radio" | "file" => None,
                _ => Some(FieldKind::Text),
            },
        }
    }

    fn value_of(&self, name: &str) -> Option<String> {
        let value = match find_control(&self.root, name)? {
            Control::Input(e) => e.value(),
            Control::Select(e) => e.value(),
            Control::TextArea(e) => e.value(),
        };
        Some(value)
    }

    fn options_of(&self, name: &str) -> Vec<String> {
        let Some(Control::Select(select)) = find_control(&self.root, name) else {
            return Vec::new();
        };

        let options = select.options();
        (0..options.length())
            .filter_map(|i| options.item(i))
            .filter_map(|e| e.dyn_into::<HtmlOptionElement>().ok())
            .map(|o| o.value())
            .collect()
    }

    fn is_disabled(&self, name: &str) -> bool {
        match find_control(&self.root, name) {
            Some(Control::Input(e)) => e.disabled(),
            Some(Control::Select(e)) => e.disabled(),
            Some(Control::TextArea(e)) => e.disabled(),
            None => false,
        }
    }

    fn set_value(&mut self, name: &str, value: &str) {
        match find_control(&self.root, name) {
            Some(Control::Input(e)) => e.set_value(value),
            Some(Control::Select(e)) => e.set_value(value),
            Some(Control::TextArea(e)) => e.set_value(value),
            None => {}
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fixture() -> DomForm {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("document がありません");
        let root = document.create_element("form").expect("form の作成に失敗");
        root.set_inner_html(
            r#"<div><input type="text" name="CaseID" disabled></div>
            <div><input type="text" name="VesselName" value="MV Atlantic"></div>
            <div><input type="date" name="CPDate"></div>
            <div><input type="number" name="DemurrageRate"></div>
            <div><input type="checkbox" name="IsClosed"></div>
            <div><textarea name="ClaimNotes"></textarea></div>
            <div><select name="ClaimStatus">
                <option value=""></option><option value="Open">Open</option><option value="Closed">Closed</option>
            </select></div>"#,
        );
        DomForm::new(root)
    }

    #[wasm_bindgen_test]
    fn wasm_kind_of_controls() {
        let form = fixture();

        assert_eq!(form.kind_of("CPDate"), Some(FieldKind::Date));
        assert_eq!(form.kind_of("ClaimStatus"), Some(FieldKind::Choice));
        assert_eq!(form.kind_of("ClaimNotes"), Some(FieldKind::Textarea));
        assert_eq!(form.kind_of("DemurrageRate"), Some(FieldKind::Number));
        assert_eq!(form.kind_of("VesselName"), Some(FieldKind::Text));
        assert_eq!(form.kind_of("IsClosed"), None);
        assert_eq!(form.kind_of("Missing"), None);
    }

    #[wasm_bindgen_test]
    fn wasm_values_and_options() {
        let mut form = fixture();

        assert_eq!(form.value_of("VesselName").as_deref(), Some("MV Atlantic"));
        assert_eq!(form.options_of("ClaimStatus"), vec!["", "Open", "Closed"]);
        assert!(form.options_of("VesselName").is_empty());

        form.set_value("ClaimStatus", "Closed");
        form.set_value("ClaimNotes", "late NOR");
        assert_eq!(form.value_of("ClaimStatus").as_deref(), Some("Closed"));
        assert_eq!(form.value_of("ClaimNotes").as_deref(), Some("late NOR"));
    }

    #[wasm_bindgen_test]
    fn wasm_disabled_control() {
        let form = fixture();

        assert!(form.is_disabled("CaseID"));
        assert!(!form.is_disabled("VesselName"));
        assert!(!form.is_disabled("Missing"));
    }
}
