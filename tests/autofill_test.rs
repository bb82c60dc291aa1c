//! 自動入力の結合テスト
//!
//! 抽出結果ファイル → 空の入力フォーム → 保存用ペイロードまでを検証

use ledger_autofill::config::Config;
use ledger_autofill::workflow;
use ledger_autofill_common::{AutofillEngine, ConfidenceTier, FieldOutcome};
use serde_json::Value;
use tempfile::tempdir;

const EXTRACTION: &str = r#"{
    "success": true,
    "fields": {
        "VesselName": {"value": "MV Ocean Star", "confidence": 0.97},
        "ChartererName": {"value": "Trafigura Maritime", "confidence": 0.72},
        "OwnerName": {"value": "Frontline Ltd", "confidence": 0.41},
        "BrokerName": {"value": "", "confidence": 0.9},
        "CPDate": {"value": "29TH APRIL 2025", "confidence": 0.88},
        "DemurrageRate": {"value": 18500, "confidence": null},
        "CPForm": {"value": "SHELLVOY 6", "confidence": 0.9},
        "LoadPort": {"value": "Rotterdam", "confidence": 0.99}
    },
    "meta": {"deepBlueRef": "DB-2025-041", "modelId": "cp-v2", "fileName": "cp.pdf"}
}"#;

const CHOICES: &str = r#"{
    "CPForm": ["ASBATANKVOY", "BPVOY4", "GENCON 1994"],
    "ClaimStatus": ["Open", "Closed"]
}"#;

fn write_inputs() -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
    let dir = tempdir().expect("Failed to create temp dir");
    let extraction = dir.path().join("extraction.json");
    let choices = dir.path().join("choices.json");
    std::fs::write(&extraction, EXTRACTION).unwrap();
    std::fs::write(&choices, CHOICES).unwrap();
    (dir, extraction, choices)
}

#[test]
fn test_autofill_blank_entry_form() {
    let (_dir, extraction, choices) = write_inputs();

    let fields = workflow::load_extraction(&extraction).unwrap();
    let choices = workflow::load_choices(Some(&choices)).unwrap();
    let form = workflow::load_form(None, &choices).unwrap();

    let outcome = workflow::autofill(&AutofillEngine::default(), &fields, form);

    assert_eq!(outcome.form.value("VesselName"), "MV Ocean Star");
    assert_eq!(outcome.form.value("CharterersName"), "Trafigura Maritime");
    assert_eq!(outcome.form.value("OwnersName"), "Frontline Ltd");
    assert_eq!(outcome.form.value("BrokersName"), "");
    assert_eq!(outcome.form.value("CPDate"), "2025-04-29");
    assert_eq!(outcome.form.value("CPForm"), "");
    assert_eq!(outcome.report.applied_count(), 4);

    assert_eq!(outcome.report.outcome_of("LoadPort"), Some(&FieldOutcome::SkippedUnmapped));
    assert_eq!(outcome.report.outcome_of("BrokerName"), Some(&FieldOutcome::SkippedEmpty));
    // 入力フォームに DemurrageRate 欄は無い
    assert_eq!(
        outcome.report.outcome_of("DemurrageRate"),
        Some(&FieldOutcome::SkippedMissingField)
    );

    let owners = outcome.hints.get("OwnersName").unwrap();
    assert_eq!(owners.confidence.unwrap().tier, ConfidenceTier::Low);

    let cp_form = outcome.hints.get("CPForm").unwrap();
    assert_eq!(cp_form.unmatched.as_deref(), Some("SHELLVOY 6"));
    assert_eq!(cp_form.confidence.unwrap().label(), "90%");

    let vessel = outcome.hints.get("VesselName").unwrap();
    assert!(vessel.autofilled);
    assert_eq!(vessel.confidence.unwrap().tier, ConfidenceTier::High);
}

#[test]
fn test_payload_requires_reference() {
    let (_dir, extraction, _) = write_inputs();

    let fields = workflow::load_extraction(&extraction).unwrap();
    let form = workflow::load_form(None, &Default::default()).unwrap();
    let outcome = workflow::autofill(&AutofillEngine::default(), &fields, form);

    assert!(outcome.payload().is_err());
}

#[test]
fn test_payload_with_reference() {
    let (_dir, extraction, _) = write_inputs();

    let fields = workflow::load_extraction(&extraction).unwrap();
    let mut form = workflow::load_form(None, &Default::default()).unwrap();
    workflow::set_reference(&mut form, Some("DB-2025-041"));
    let outcome = workflow::autofill(&AutofillEngine::default(), &fields, form);

    let payload = outcome.payload().unwrap();
    assert_eq!(payload["DeepBlueRef"], Value::String("DB-2025-041".into()));
    assert_eq!(payload["CPDate"], Value::String("2025-04-29".into()));
    assert_eq!(payload["ClaimNotes"], Value::Null);
    assert!(!payload.contains_key("CaseID"));
    assert!(!payload.contains_key("CreatedAt"));
}

#[test]
fn test_existing_form_values_kept() {
    let (dir, extraction, _) = write_inputs();
    let form_path = dir.path().join("form.json");
    std::fs::write(
        &form_path,
        r#"{"fields": [
            {"name": "DeepBlueRef", "value": "DB-7"},
            {"name": "VesselName", "value": "MV Atlantic"},
            {"name": "CPDate", "kind": "date", "value": "2025-01-01"},
            {"name": "CPForm", "kind": "choice", "options": ["", "SHELLVOY 6", "GENCON 1994"]}
        ]}"#,
    )
    .unwrap();

    let fields = workflow::load_extraction(&extraction).unwrap();
    let form = workflow::load_form(Some(&form_path), &Default::default()).unwrap();
    let outcome = workflow::autofill(&AutofillEngine::default(), &fields, form);

    assert_eq!(outcome.form.value("VesselName"), "MV Atlantic");
    assert_eq!(outcome.form.value("CPDate"), "2025-01-01");
    assert_eq!(outcome.form.value("CPForm"), "SHELLVOY 6");
    assert_eq!(
        outcome.report.outcome_of("ChartererName"),
        Some(&FieldOutcome::SkippedMissingField)
    );

    // 参照番号は既存値を優先
    let mut form = outcome.form.clone();
    workflow::set_reference(&mut form, Some("DB-OTHER"));
    assert_eq!(form.value("DeepBlueRef"), "DB-7");
}

#[test]
fn test_custom_mapping_file() {
    let (dir, extraction, _) = write_inputs();
    let mapping_path = dir.path().join("mapping.json");
    std::fs::write(&mapping_path, r#"{"LoadPort": "LoadPort"}"#).unwrap();
    let form_path = dir.path().join("form.json");
    std::fs::write(&form_path, r#"{"fields": [{"name": "LoadPort"}, {"name": "VesselName"}]}"#).unwrap();

    let mapping = workflow::load_mapping(&Config::default(), Some(&mapping_path)).unwrap();
    let fields = workflow::load_extraction(&extraction).unwrap();
    let form = workflow::load_form(Some(&form_path), &Default::default()).unwrap();
    let outcome = workflow::autofill(&AutofillEngine::new(mapping), &fields, form);

    // 組み込みの対応も残る
    assert_eq!(outcome.form.value("LoadPort"), "Rotterdam");
    assert_eq!(outcome.form.value("VesselName"), "MV Ocean Star");
}

#[test]
fn test_mapping_to_system_field_ignored() {
    let (dir, extraction, _) = write_inputs();
    let mapping_path = dir.path().join("mapping.json");
    std::fs::write(&mapping_path, r#"{"LoadPort": "CaseID", "OwnerName": "CreatedAt"}"#).unwrap();

    let mapping = workflow::load_mapping(&Config::default(), Some(&mapping_path)).unwrap();
    let fields = workflow::load_extraction(&extraction).unwrap();
    let form = workflow::load_form(None, &Default::default()).unwrap();
    let outcome = workflow::autofill(&AutofillEngine::new(mapping), &fields, form);

    assert_eq!(outcome.form.value("CaseID"), "");
    assert_eq!(outcome.form.value("CreatedAt"), "");
    assert_eq!(outcome.report.outcome_of("LoadPort"), Some(&FieldOutcome::SkippedDisabled));
    assert_eq!(outcome.report.outcome_of("OwnerName"), Some(&FieldOutcome::SkippedDisabled));
    assert!(outcome.hints.get("CaseID").is_none());
}
