//! 抽出結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ExtractedField: 抽出サービスが返す1フィールド分の値と信頼度
//! - ExtractedFields: ソースフィールド名 → ExtractedField

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 抽出サービスが返す1フィールド分のデータ
///
/// 値は文字列以外（数値・真偽値）で届くことがあるため、
/// 文字列表現に揃えて保持する。null やオブジェクトは「値なし」。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedField {
    #[serde(deserialize_with = "lenient_text")]
    pub value: Option<String>,

    #[serde(deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
}

impl ExtractedField {
    pub fn new(value: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            value: Some(value.into()),
            confidence,
        }
    }

    /// 空白以外の値を持つ場合のみ返す
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// ソースフィールド名 → 抽出値
pub type ExtractedFields = BTreeMap<String, ExtractedField>;

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// JSON値を文字列に変換（スカラー以外はNone）
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string_value() {
        let field: ExtractedField =
            serde_json::from_str(r#"{"value": "MV Ocean Star", "confidence": 0.93}"#).unwrap();
        assert_eq!(field.value.as_deref(), Some("MV Ocean Star"));
        assert_eq!(field.confidence, Some(0.93));
    }

    #[test]
    fn test_deserialize_numeric_value() {
        let field: ExtractedField =
            serde_json::from_str(r#"{"value": 12500, "confidence": 0.7}"#).unwrap();
        assert_eq!(field.value.as_deref(), Some("12500"));
    }

    #[test]
    fn test_deserialize_null_confidence() {
        let field: ExtractedField =
            serde_json::from_str(r#"{"value": "GENCON", "confidence": null}"#).unwrap();
        assert_eq!(field.confidence, None);
    }

    #[test]
    fn test_deserialize_missing_keys() {
        let field: ExtractedField = serde_json::from_str("{}").unwrap();
        assert_eq!(field, ExtractedField::default());
    }

    #[test]
    fn test_deserialize_object_value_is_absent() {
        let field: ExtractedField =
            serde_json::from_str(r#"{"value": {"nested": true}, "confidence": "high"}"#).unwrap();
        assert_eq!(field.value, None);
        assert_eq!(field.confidence, None);
    }

    #[test]
    fn test_text_ignores_blank() {
        assert_eq!(ExtractedField::new("   ", Some(0.9)).text(), None);
        assert_eq!(ExtractedField::new("Vitol", None).text(), Some("Vitol"));
    }
}
