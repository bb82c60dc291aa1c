//! 抽出結果の自動入力エンジン
//!
//! ## 処理フロー（フィールドごと）
//! 1. 対応表で台帳フィールド名に変換（対応なしはスキップ）
//! 2. 入力欄が無い・無効化されている・抽出値が空ならスキップ
//! 3. 入力欄に値があればスキップ（ユーザー入力を上書きしない）
//! 4. 入力欄の種類ごとに変換して書き込み
//!    - 日付: 正規化できなければスキップ
//!    - 選択式: あいまい照合。一致なしは値を入れず注記を表示
//!    - その他: そのまま書き込み
//! 5. 自動入力済み表示と信頼度表示
//!
//! どの段階でも失敗はそのフィールドのスキップとして扱い、エラーにはしない。

use crate::confidence::ConfidenceAnnotation;
use crate::date::normalize_date;
use crate::form::{FieldKind, FormFieldSet};
use crate::hints::AutofillRenderer;
use crate::mapping::FieldMapping;
use crate::matcher::match_option;
use crate::types::{ExtractedField, ExtractedFields};
use serde::Serialize;

/// フィールドごとの処理結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum FieldOutcome {
    /// 値を書き込んだ
    Applied { value: String },
    /// 対応表に無いフィールド
    SkippedUnmapped,
    /// 対応先の入力欄がフォームに無い
    SkippedMissingField,
    /// 対応先の入力欄が無効化されている（システム項目）
    SkippedDisabled,
    /// 抽出値が空
    SkippedEmpty,
    /// 入力欄に既に値がある
    SkippedUserEdited,
    /// 日付として解釈できない
    SkippedUnparseable { raw: String },
    /// 選択肢に一致しない（注記と信頼度は表示する）
    SkippedUnmatched { raw: String },
}

impl FieldOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FieldOutcome::Applied { .. })
    }

    /// 表示ヒントが付いたか（書き込み済み・選択肢不一致）
    pub fn is_annotated(&self) -> bool {
        matches!(
            self,
            FieldOutcome::Applied { .. } | FieldOutcome::SkippedUnmatched { .. }
        )
    }
}

impl std::fmt::Display for FieldOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldOutcome::Applied { value } => write!(f, "入力: {}", value),
            FieldOutcome::SkippedUnmapped => write!(f, "スキップ（対応なし）"),
            FieldOutcome::SkippedMissingField => write!(f, "スキップ（入力欄なし）"),
            FieldOutcome::SkippedDisabled => write!(f, "スキップ（入力不可）"),
            FieldOutcome::SkippedEmpty => write!(f, "スキップ（値なし）"),
            FieldOutcome::SkippedUserEdited => write!(f, "スキップ（入力済み）"),
            FieldOutcome::SkippedUnparseable { raw } => write!(f, "スキップ（日付不明: {}）", raw),
            FieldOutcome::SkippedUnmatched { raw } => write!(f, "選択肢なし: {}", raw),
        }
    }
}

/// 1フィールド分の記録
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReport {
    /// 抽出サービス側のフィールド名
    pub source: String,
    /// 台帳側のフィールド名
    pub destination: Option<String>,
    #[serde(flatten)]
    pub outcome: FieldOutcome,
    pub confidence: Option<ConfidenceAnnotation>,
}

/// 自動入力の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AutofillReport {
    pub fields: Vec<FieldReport>,
}

impl AutofillReport {
    /// 書き込んだフィールド数
    pub fn applied_count(&self) -> usize {
        self.fields.iter().filter(|r| r.outcome.is_applied()).count()
    }

    pub fn outcome_of(&self, source: &str) -> Option<&FieldOutcome> {
        self.fields
            .iter()
            .find(|r| r.source == source)
            .map(|r| &r.outcome)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// 自動入力エンジン
#[derive(Debug, Clone, Default)]
pub struct AutofillEngine {
    mapping: FieldMapping,
}

impl AutofillEngine {
    pub fn new(mapping: FieldMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// 抽出結果をフォームに反映する
    ///
    /// # Arguments
    /// * `extracted` - 抽出サービスの結果
    /// * `form` - 書き込み先フォーム
    /// * `renderer` - 表示ヒントの出力先
    ///
    /// # Returns
    /// フィールドごとの処理結果（失敗はスキップとして記録）
    pub fn apply<F, R>(
        &self,
        extracted: &ExtractedFields,
        form: &mut F,
        renderer: &mut R,
    ) -> AutofillReport
    where
        F: FormFieldSet + ?Sized,
        R: AutofillRenderer + ?Sized,
    {
        let mut report = AutofillReport::default();

        for (source, field) in extracted {
            let destination = self.mapping.destination(source);
            let outcome = match destination {
                Some(dest) => self.apply_field(dest, field, form, renderer),
                None => FieldOutcome::SkippedUnmapped,
            };

            tracing::debug!(
                source = %source,
                destination = destination.unwrap_or("-"),
                outcome = %outcome,
                "autofill field"
            );

            let confidence = if outcome.is_annotated() {
                ConfidenceAnnotation::from_confidence(field.confidence)
            } else {
                None
            };

            report.fields.push(FieldReport {
                source: source.clone(),
                destination: destination.map(str::to_string),
                outcome,
                confidence,
            });
        }

        tracing::info!(
            total = report.fields.len(),
            applied = report.applied_count(),
            "autofill finished"
        );

        report
    }

    fn apply_field<F, R>(
        &self,
        dest: &str,
        field: &ExtractedField,
        form: &mut F,
        renderer: &mut R,
    ) -> FieldOutcome
    where
        F: FormFieldSet + ?Sized,
        R: AutofillRenderer + ?Sized,
    {
        let Some(kind) = form.kind_of(dest) else {
            return FieldOutcome::SkippedMissingField;
        };
        if form.is_disabled(dest) {
            return FieldOutcome::SkippedDisabled;
        }
        let Some(raw) = field.text() else {
            return FieldOutcome::SkippedEmpty;
        };

        // ユーザー入力（または前回の自動入力）を上書きしない
        let current = form.value_of(dest).unwrap_or_default();
        if !current.trim().is_empty() {
            return FieldOutcome::SkippedUserEdited;
        }

        let outcome = match kind {
            FieldKind::Date => match normalize_date(raw) {
                Some(date) => {
                    form.set_value(dest, &date);
                    FieldOutcome::Applied { value: date }
                }
                None => {
                    return FieldOutcome::SkippedUnparseable {
                        raw: raw.to_string(),
                    }
                }
            },
            FieldKind::Choice => {
                let options = form.options_of(dest);
                match match_option(raw, &options) {
                    Some(option) => {
                        let value = option.to_string();
                        form.set_value(dest, &value);
                        FieldOutcome::Applied { value }
                    }
                    None => {
                        renderer.show_unmatched(dest, raw);
                        FieldOutcome::SkippedUnmatched {
                            raw: raw.to_string(),
                        }
                    }
                }
            }
            FieldKind::Text | FieldKind::Textarea | FieldKind::Number => {
                form.set_value(dest, raw);
                FieldOutcome::Applied {
                    value: raw.to_string(),
                }
            }
        };

        renderer.mark_autofilled(dest);
        if let Some(annotation) = ConfidenceAnnotation::from_confidence(field.confidence) {
            renderer.show_confidence(dest, annotation);
        }

        outcome
    }
}
