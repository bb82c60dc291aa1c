//! Ledger Autofill Common Library
//!
//! CLIとWeb(WASM)で共有される自動入力ロジック
//!
//! - 日付の正規化 (`date`)
//! - 選択肢のあいまい照合 (`matcher`)
//! - 信頼度の区分 (`confidence`)
//! - 抽出結果の自動入力 (`autofill`)

pub mod types;
pub mod error;
pub mod date;
pub mod matcher;
pub mod confidence;
pub mod mapping;
pub mod form;
pub mod schema;
pub mod hints;
pub mod autofill;
pub mod extraction;

pub use types::{ExtractedField, ExtractedFields};
pub use error::{Error, Result};
pub use date::normalize_date;
pub use matcher::{match_option, best_match, OptionMatch, MATCH_THRESHOLD};
pub use confidence::{tier_of, ConfidenceAnnotation, ConfidenceTier};
pub use mapping::FieldMapping;
pub use form::{FieldKind, FormField, FormFieldSet, LedgerForm};
pub use schema::{build_entry_form, infer_field_kind, ChoiceLists};
pub use hints::{AutofillRenderer, FieldHints, RenderHints};
pub use autofill::{AutofillEngine, AutofillReport, FieldOutcome, FieldReport};
pub use extraction::{parse_extraction, fields_from_value, ParseMeta, ParseResponse, PARSE_ENDPOINT};
