use super::find_control;
use ledger_autofill_common::{AutofillRenderer, ConfidenceAnnotation};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

const AUTOFILLED_CLASS: &str = "autofilled";
const INDICATOR_CLASS: &str = "confidence-indicator";
const NOTE_CLASS: &str = "cp-extracted-note";

/// DOM表示
pub struct DomRenderer {
    root: Element,
}

impl DomRenderer {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// 入力欄を囲む div
    fn wrapper(&self, field: &str) -> Option<Element> {
        let control = find_control(&self.root, field)?;
        control.element().closest("div").ok().flatten()
    }

    fn document(&self) -> Option<Document> {
        self.root.owner_document()
    }

    fn add_indicator(&self, field: &str, annotation: ConfidenceAnnotation) -> Result<(), JsValue> {
        let (Some(wrapper), Some(document)) = (self.wrapper(field), self.document()) else {
            return Ok(());
        };
        if wrapper.query_selector(&format!(".{}", INDICATOR_CLASS))?.is_some() {
            return Ok(());
        }

        if let Some(html) = wrapper.dyn_ref::<HtmlElement>() {
            html.style().set_property("position", "relative")?;
        }

        let indicator = document.create_element("span")?;
        indicator.set_class_name(INDICATOR_CLASS);

        let dot = document.create_element("span")?;
        dot.set_class_name(&format!("dot {}", annotation.colour()));

        let label = document.create_element("span")?;
        label.set_text_content(Some(&annotation.label()));

        indicator.append_child(&dot)?;
        indicator.append_child(&label)?;
        wrapper.append_child(&indicator)?;
        Ok(())
    }

    fn add_note(&self, field: &str, raw: &str) -> Result<(), JsValue> {
        let (Some(wrapper), Some(document)) = (self.wrapper(field), self.document()) else {
            return Ok(());
        };
        if wrapper.query_selector(&format!(".{}", NOTE_CLASS))?.is_some() {
            return Ok(());
        }

        let note = document.create_element("div")?;
        note.set_class_name(&format!("{} amber", NOTE_CLASS));
        note.set_text_content(Some(&format!("Extracted: “{}” (not in list)", raw)));
        wrapper.append_child(&note)?;
        Ok(())
    }
}

impl AutofillRenderer for DomRenderer {
    fn mark_autofilled(&mut self, field: &str) {
        if let Some(control) = find_control(&self.root, field) {
            if let Err(e) = control.element().class_list().add_1(AUTOFILLED_CLASS) {
                crate::log_warn(&format!("autofilled 表示に失敗: {} {:?}", field, e));
            }
        }
    }

    fn show_confidence(&mut self, field: &str, annotation: ConfidenceAnnotation) {
        if let Err(e) = self.add_indicator(field, annotation) {
            crate::log_warn(&format!("信頼度表示に失敗: {} {:?}", field, e));
        }
    }

    fn show_unmatched(&mut self, field: &str, raw: &str) {
        if let Err(e) = self.add_note(field, raw) {
            crate::log_warn(&format!("注記の表示に失敗: {} {:?}", field, e));
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fixture() -> Element {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("document がありません");
        let root = document.create_element("form").expect("form の作成に失敗");
        root.set_inner_html(
            r#"<div id="cpFormGroup"><label>CP Form</label>
                <select name="CPForm"><option value=""></option><option value="GENCON 1994">GENCON 1994</option></select>
            </div>
            <div id="vesselGroup"><input type="text" name="VesselName"></div>"#,
        );
        root
    }

    fn count(root: &Element, class: &str) -> u32 {
        root.get_elements_by_class_name(class).length()
    }

    #[wasm_bindgen_test]
    fn wasm_confidence_indicator_added_once() {
        let root = fixture();
        let mut renderer = DomRenderer::new(root.clone());
        let first = ConfidenceAnnotation::from_confidence(Some(0.9)).unwrap();
        let second = ConfidenceAnnotation::from_confidence(Some(0.3)).unwrap();

        renderer.show_confidence("VesselName", first);
        renderer.show_confidence("VesselName", second);

        assert_eq!(count(&root, INDICATOR_CLASS), 1);
        let indicator = root
            .query_selector(&format!(".{}", INDICATOR_CLASS))
            .unwrap()
            .unwrap();
        assert_eq!(indicator.text_content().as_deref(), Some("90%"));
        assert!(indicator.query_selector(".dot.green").unwrap().is_some());
    }

    #[wasm_bindgen_test]
    fn wasm_unmatched_note_added_once() {
        let root = fixture();
        let mut renderer = DomRenderer::new(root.clone());

        renderer.show_unmatched("CPForm", "SHELLVOY 6");
        renderer.show_unmatched("CPForm", "SHELLVOY 6");

        assert_eq!(count(&root, NOTE_CLASS), 1);
        let note = root.query_selector(".cp-extracted-note.amber").unwrap().unwrap();
        assert_eq!(
            note.text_content().as_deref(),
            Some("Extracted: “SHELLVOY 6” (not in list)")
        );
        // 対象フィールドの div に入る
        let group = root.query_selector("#cpFormGroup").unwrap().unwrap();
        assert_eq!(count(&group, NOTE_CLASS), 1);
    }

    #[wasm_bindgen_test]
    fn wasm_mark_autofilled_on_control() {
        let root = fixture();
        let mut renderer = DomRenderer::new(root.clone());

        renderer.mark_autofilled("VesselName");
        renderer.mark_autofilled("Unknown");

        let input = root.query_selector(r#"[name="VesselName"]"#).unwrap().unwrap();
        assert!(input.class_list().contains(AUTOFILLED_CLASS));
        assert_eq!(count(&root, AUTOFILLED_CLASS), 1);
    }
}
