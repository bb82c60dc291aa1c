//! 入力フォームのモデル
//!
//! 自動入力エンジンはフォームを [`FormFieldSet`] 経由でのみ読み書きする。
//! ブラウザ側はDOMで、CLI側は [`LedgerForm`] で実装する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 保存前に必須のフィールド
pub const REQUIRED_FIELD: &str = "DeepBlueRef";

/// 入力欄の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Number,
    Date,
    Choice,
}

impl FieldKind {
    /// 列メタデータの FieldType から変換
    ///
    /// boolean（チェックボックス）など値を書き込めない種類は None。
    pub fn from_metadata(field_type: &str) -> Option<Self> {
        match field_type.trim().to_lowercase().as_str() {
            "" | "text" | "string" => Some(FieldKind::Text),
            "textarea" | "notes" => Some(FieldKind::Textarea),
            "number" | "money" => Some(FieldKind::Number),
            "date" => Some(FieldKind::Date),
            "choice" | "select" => Some(FieldKind::Choice),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Textarea => write!(f, "textarea"),
            FieldKind::Number => write!(f, "number"),
            FieldKind::Date => write!(f, "date"),
            FieldKind::Choice => write!(f, "choice"),
        }
    }
}

/// 自動入力の書き込み先
pub trait FormFieldSet {
    /// フィールドの種類（存在しなければ None）
    fn kind_of(&self, name: &str) -> Option<FieldKind>;

    /// 現在の値
    fn value_of(&self, name: &str) -> Option<String>;

    /// 選択式フィールドの選択肢
    fn options_of(&self, name: &str) -> Vec<String>;

    /// 無効化された入力欄か（自動入力しない）
    fn is_disabled(&self, name: &str) -> bool;

    fn set_value(&mut self, name: &str, value: &str);
}

/// フォームの1入力欄
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    pub options: Vec<String>,
    pub disabled: bool,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn with_options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// メモリ上の台帳入力フォーム
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerForm {
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl LedgerForm {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let form: Self = serde_json::from_str(json)?;
        Ok(form)
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// 値の取得（存在しないフィールドは空文字列）
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|f| f.value.as_str()).unwrap_or("")
    }

    /// 保存用ペイロードを作成する
    ///
    /// 無効化されたフィールドは含めない。値は前後の空白を除き、空なら null。
    ///
    /// # Returns
    /// * `Err(Error::MissingRequiredField)` - DeepBlueRef が空
    pub fn to_payload(&self) -> Result<Map<String, Value>> {
        if self.value(REQUIRED_FIELD).trim().is_empty() {
            return Err(Error::MissingRequiredField(REQUIRED_FIELD.into()));
        }

        let payload = self
            .fields
            .iter()
            .filter(|f| !f.disabled)
            .map(|f| {
                let trimmed = f.value.trim();
                let value = if trimmed.is_empty() {
                    Value::Null
                } else {
                    Value::String(trimmed.to_string())
                };
                (f.name.clone(), value)
            })
            .collect();

        Ok(payload)
    }
}

impl FormFieldSet for LedgerForm {
    fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.field(name).map(|f| f.kind)
    }

    fn value_of(&self, name: &str) -> Option<String> {
        self.field(name).map(|f| f.value.clone())
    }

    fn options_of(&self, name: &str) -> Vec<String> {
        self.field(name).map(|f| f.options.clone()).unwrap_or_default()
    }

    fn is_disabled(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.disabled)
    }

    fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.field_mut(name) {
            field.value = value.to_string();
        }
    }
}
