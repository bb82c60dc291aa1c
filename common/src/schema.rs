//! 台帳の入力項目定義
//!
//! 「Add Entry」フォームのグループ構成・システム項目・入力種別の推定。

use crate::form::{FieldKind, FormField, LedgerForm};
use std::collections::HashMap;

/// 列名 → 選択肢
pub type ChoiceLists = HashMap<String, Vec<String>>;

/// フォームのグループ構成
pub const FIELD_GROUPS: &[(&str, &[&str])] = &[
    (
        "Case Info",
        &[
            "CaseID",
            "DeepBlueRef",
            "ClientName",
            "VesselName",
            "VoyageNumber",
            "VoyageEndDate",
            "CharterersName",
            "BrokersName",
            "OwnersName",
            "CPDate",
            "CPType",
            "CPForm",
        ],
    ),
    (
        "Claim Info",
        &[
            "ClaimType",
            "ClaimDays",
            "ClaimFiledAmount",
            "AgreedAmount",
            "ClaimStatus",
            "CalculationType",
            "ClaimFiled",
            "AgreedDate",
            "InvoiceNumber",
        ],
    ),
    (
        "Admin & Notes",
        &[
            "CalculatorNotes",
            "ClaimNotes",
            "InstructionReceived",
            "ContactName",
            "CreatedAt",
        ],
    ),
];

/// システム管理項目（入力不可）
pub const SYSTEM_FIELDS: &[&str] = &["CaseID", "CreatedAt"];

pub fn is_system_field(name: &str) -> bool {
    SYSTEM_FIELDS.contains(&name)
}

/// 列名から入力種別を推定する
///
/// - "date" を含む → 日付
/// - "amount" / "rate" を含む → 数値
/// - "notes" を含む → 複数行テキスト
/// - それ以外 → テキスト
pub fn infer_field_kind(name: &str) -> FieldKind {
    let lower = name.to_lowercase();
    if lower.contains("date") {
        FieldKind::Date
    } else if lower.contains("amount") || lower.contains("rate") {
        FieldKind::Number
    } else if lower.contains("notes") {
        FieldKind::Textarea
    } else {
        FieldKind::Text
    }
}

/// 空の入力フォームを作成する
///
/// 選択肢が登録されている列は選択式になり、先頭に空の選択肢が入る。
pub fn build_entry_form(choices: &ChoiceLists) -> LedgerForm {
    let fields = FIELD_GROUPS
        .iter()
        .flat_map(|(_, columns)| columns.iter())
        .map(|&column| build_field(column, choices))
        .collect();

    LedgerForm::new(fields)
}

fn build_field(column: &str, choices: &ChoiceLists) -> FormField {
    let field = match choices.get(column) {
        Some(options) => FormField::new(column, FieldKind::Choice)
            .with_options(std::iter::once(String::new()).chain(options.iter().cloned())),
        None => FormField::new(column, infer_field_kind(column)),
    };

    if is_system_field(column) {
        field.disabled()
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormFieldSet;

    #[test]
    fn test_infer_field_kind() {
        assert_eq!(infer_field_kind("CPDate"), FieldKind::Date);
        assert_eq!(infer_field_kind("VoyageEndDate"), FieldKind::Date);
        assert_eq!(infer_field_kind("DemurrageRate"), FieldKind::Number);
        assert_eq!(infer_field_kind("ClaimFiledAmount"), FieldKind::Number);
        assert_eq!(infer_field_kind("ClaimNotes"), FieldKind::Textarea);
        assert_eq!(infer_field_kind("VesselName"), FieldKind::Text);
    }

    #[test]
    fn test_build_entry_form() {
        let form = build_entry_form(&ChoiceLists::new());
        assert_eq!(form.fields.len(), 26);
        assert!(form.field("CaseID").unwrap().disabled);
        assert!(form.field("CreatedAt").unwrap().disabled);
        assert!(!form.field("DeepBlueRef").unwrap().disabled);
        assert_eq!(form.kind_of("CPDate"), Some(FieldKind::Date));
    }

    #[test]
    fn test_build_entry_form_with_choices() {
        let mut choices = ChoiceLists::new();
        choices.insert("ClaimStatus".into(), vec!["Open".into(), "Closed".into()]);

        let form = build_entry_form(&choices);
        assert_eq!(form.kind_of("ClaimStatus"), Some(FieldKind::Choice));
        assert_eq!(form.options_of("ClaimStatus"), vec!["", "Open", "Closed"]);
    }
}
