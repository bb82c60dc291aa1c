//! 自動入力の一連の処理
//!
//! フォーム読み込み → エンジン適用 → 保存用ペイロード作成。
//! CLIの `apply` / `parse` から共通で使う。

use crate::config::Config;
use crate::error::{AutofillError, Result};
use ledger_autofill_common::{
    build_entry_form, AutofillEngine, AutofillReport, ChoiceLists, ExtractedFields, FieldMapping,
    LedgerForm, RenderHints,
};
use serde_json::{Map, Value};
use std::path::Path;

/// 自動入力の結果一式
#[derive(Debug, Clone)]
pub struct AutofillOutcome {
    pub form: LedgerForm,
    pub report: AutofillReport,
    pub hints: RenderHints,
}

impl AutofillOutcome {
    /// 保存用ペイロード（DeepBlueRef 未入力ならエラー）
    pub fn payload(&self) -> Result<Map<String, Value>> {
        Ok(self.form.to_payload()?)
    }
}

/// フィールド対応表を作る
///
/// 組み込みの対応表 → 設定ファイルの上書き → 指定ファイルの上書きの順に適用する。
pub fn load_mapping(config: &Config, mapping_path: Option<&Path>) -> Result<FieldMapping> {
    let mut mapping = config.field_mapping();
    if let Some(path) = mapping_path {
        if !path.exists() {
            return Err(AutofillError::FileNotFound(path.display().to_string()));
        }
        mapping.merge(&FieldMapping::from_file(path)?);
    }
    Ok(mapping)
}

/// 選択肢ファイルを読み込む（`{"列名": ["選択肢", ...]}`）
pub fn load_choices(path: Option<&Path>) -> Result<ChoiceLists> {
    let Some(path) = path else {
        return Ok(ChoiceLists::new());
    };
    if !path.exists() {
        return Err(AutofillError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let choices: ChoiceLists = serde_json::from_str(&content)?;
    Ok(choices)
}

/// フォームを読み込む（指定なしは空の入力フォーム）
pub fn load_form(form_path: Option<&Path>, choices: &ChoiceLists) -> Result<LedgerForm> {
    match form_path {
        Some(path) => {
            if !path.exists() {
                return Err(AutofillError::FileNotFound(path.display().to_string()));
            }
            let content = std::fs::read_to_string(path)?;
            Ok(LedgerForm::from_json(&content)?)
        }
        None => Ok(build_entry_form(choices)),
    }
}

/// 抽出結果ファイルを読み込む
pub fn load_extraction(path: &Path) -> Result<ExtractedFields> {
    if !path.exists() {
        return Err(AutofillError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(ledger_autofill_common::parse_extraction(&content)?)
}

/// 抽出結果をフォームに反映する
pub fn autofill(engine: &AutofillEngine, fields: &ExtractedFields, form: LedgerForm) -> AutofillOutcome {
    let mut form = form;
    let mut hints = RenderHints::new();
    let report = engine.apply(fields, &mut form, &mut hints);

    AutofillOutcome { form, report, hints }
}

/// 参照番号が未入力なら設定する（抽出結果で上書きはしない）
pub fn set_reference(form: &mut LedgerForm, reference: Option<&str>) {
    use ledger_autofill_common::FormFieldSet;
    use ledger_autofill_common::form::REQUIRED_FIELD;

    let Some(reference) = reference.map(str::trim).filter(|r| !r.is_empty()) else {
        return;
    };
    if form.value(REQUIRED_FIELD).trim().is_empty() {
        form.set_value(REQUIRED_FIELD, reference);
    }
}
