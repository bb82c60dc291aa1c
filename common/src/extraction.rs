//! 抽出サービスのレスポンスパーサー
//!
//! `POST /api/cp/parse` のレスポンスを解釈する。
//!
//! ```json
//! {
//!   "success": true,
//!   "fields": { "VesselName": { "value": "MV Ocean Star", "confidence": 0.93 } },
//!   "meta": { "deepBlueRef": "DB-1", "modelId": "cp-model", "fileName": "cp.pdf" }
//! }
//! ```
//!
//! `fields` の各エントリは信頼できない入力として扱い、
//! 形式が不正なものは警告を出して読み飛ばす。

use crate::error::{Error, Result};
use crate::types::{ExtractedField, ExtractedFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 抽出サービスのエンドポイント
pub const PARSE_ENDPOINT: &str = "/api/cp/parse";

/// 解析失敗時の既定メッセージ
const DEFAULT_FAILURE: &str = "Parse failed";

/// レスポンスのメタ情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseMeta {
    pub deep_blue_ref: Option<String>,
    pub model_id: Option<String>,
    pub file_name: Option<String>,
}

/// レスポンス全体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParseResponse {
    pub success: bool,
    pub fields: Option<Value>,
    pub meta: Option<ParseMeta>,
    pub error: Option<String>,
}

impl ParseResponse {
    /// 成功レスポンスの抽出結果を取り出す
    ///
    /// # Returns
    /// * `Ok(ExtractedFields)` - 抽出結果（不正なエントリは除外）
    /// * `Err(Error::Parse)` - `success` が false（サーバーのメッセージ付き）
    pub fn into_fields(self) -> Result<ExtractedFields> {
        if !self.success {
            return Err(Error::Parse(
                self.error.unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
            ));
        }
        Ok(self.fields.as_ref().map(fields_from_value).unwrap_or_default())
    }
}

/// `fields` オブジェクトから抽出結果を作る
///
/// オブジェクト以外は空として扱う。
pub fn fields_from_value(value: &Value) -> ExtractedFields {
    let Some(map) = value.as_object() else {
        tracing::warn!("抽出結果がオブジェクトではありません");
        return ExtractedFields::new();
    };

    map.iter()
        .filter_map(|(name, entry)| {
            if !entry.is_object() {
                tracing::warn!(field = %name, "不正な抽出エントリを無視");
                return None;
            }
            match serde_json::from_value::<ExtractedField>(entry.clone()) {
                Ok(field) => Some((name.clone(), field)),
                Err(e) => {
                    tracing::warn!(field = %name, error = %e, "不正な抽出エントリを無視");
                    None
                }
            }
        })
        .collect()
}

/// JSON文字列から抽出結果を読み込む
///
/// レスポンス全体（`success` を含む）と `fields` 相当のオブジェクトの両方を受け付ける。
pub fn parse_extraction(json: &str) -> Result<ExtractedFields> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::Parse(format!("抽出結果 JSONパースエラー: {}", e)))?;

    if value.get("success").is_some() {
        let response: ParseResponse = serde_json::from_value(value)
            .map_err(|e| Error::Parse(format!("レスポンス形式エラー: {}", e)))?;
        return response.into_fields();
    }

    Ok(fields_from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // parse_extraction テスト
    // =============================================

    #[test]
    fn test_parse_envelope() {
        let json = r#"{
            "success": true,
            "fields": {
                "VesselName": {"value": "MV Ocean Star", "confidence": 0.93},
                "CPDate": {"value": "29TH APRIL 2025", "confidence": null}
            },
            "meta": {"deepBlueRef": null, "modelId": "cp-v2", "fileName": "cp.pdf"}
        }"#;

        let fields = parse_extraction(json).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["VesselName"].confidence, Some(0.93));
        assert_eq!(fields["CPDate"].confidence, None);
    }

    #[test]
    fn test_parse_bare_fields() {
        let json = r#"{"CPForm": {"value": "GENCON", "confidence": 0.8}}"#;
        let fields = parse_extraction(json).unwrap();
        assert_eq!(fields["CPForm"].value.as_deref(), Some("GENCON"));
    }

    #[test]
    fn test_parse_failure_message() {
        let json = r#"{"success": false, "error": "No document data extracted"}"#;
        let err = parse_extraction(json).unwrap_err();
        assert!(matches!(err, Error::Parse(ref m) if m == "No document data extracted"));
    }

    #[test]
    fn test_parse_failure_default_message() {
        let err = parse_extraction(r#"{"success": false}"#).unwrap_err();
        assert!(err.to_string().contains("Parse failed"));
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let json = r#"{
            "VesselName": "just a string",
            "OwnerName": null,
            "BrokerName": {"value": "Clarksons", "confidence": 0.66}
        }"#;
        let fields = parse_extraction(json).unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("BrokerName"));
    }

    #[test]
    fn test_success_without_fields() {
        let fields = parse_extraction(r#"{"success": true}"#).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_extraction("{ not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
