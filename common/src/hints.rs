//! 自動入力の表示ヒント
//!
//! エンジンは表示の判断だけを行い、描画は [`AutofillRenderer`] に委ねる。
//! 同じフィールドへの2回目の表示要求は無視すること（表示の重複禁止）。

use crate::confidence::ConfidenceAnnotation;
use serde::Serialize;
use std::collections::BTreeMap;

/// 表示側の実装
pub trait AutofillRenderer {
    /// 自動入力済みとして表示
    fn mark_autofilled(&mut self, field: &str);

    /// 信頼度表示を追加（既にあれば何もしない）
    fn show_confidence(&mut self, field: &str, annotation: ConfidenceAnnotation);

    /// 選択肢に無かった抽出値の注記を追加（既にあれば何もしない）
    fn show_unmatched(&mut self, field: &str, raw: &str);
}

/// 1フィールド分の表示ヒント
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldHints {
    pub autofilled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceAnnotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmatched: Option<String>,
}

impl FieldHints {
    /// 注記の表示文言
    pub fn unmatched_note(&self) -> Option<String> {
        self.unmatched
            .as_ref()
            .map(|raw| format!("Extracted: “{}” (not in list)", raw))
    }
}

/// メモリ上に表示ヒントを集める実装
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderHints {
    pub fields: BTreeMap<String, FieldHints>,
}

impl RenderHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldHints> {
        self.fields.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl AutofillRenderer for RenderHints {
    fn mark_autofilled(&mut self, field: &str) {
        self.fields.entry(field.to_string()).or_default().autofilled = true;
    }

    fn show_confidence(&mut self, field: &str, annotation: ConfidenceAnnotation) {
        let hints = self.fields.entry(field.to_string()).or_default();
        if hints.confidence.is_none() {
            hints.confidence = Some(annotation);
        }
    }

    fn show_unmatched(&mut self, field: &str, raw: &str) {
        let hints = self.fields.entry(field.to_string()).or_default();
        if hints.unmatched.is_none() {
            hints.unmatched = Some(raw.to_string());
        }
    }
}
