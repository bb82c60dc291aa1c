//! ledger-autofill
//!
//! 傭船契約書（CP）の抽出結果を台帳の入力フォームに反映するCLIのライブラリ部分。
//! 自動入力ロジック本体は `ledger_autofill_common` にある。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod workflow;
