//! 抽出日付の正規化
//!
//! 抽出サービスの日付文字列を日付入力欄用の `YYYY-MM-DD` に揃える。
//!
//! - 序数サフィックス除去（`29TH` → `29`）
//! - 先頭の曜日を除去（`Tuesday, 29 April 2025` → `29 April 2025`）
//! - `.` 区切りを空白に置換（`29.04.2025` → `29 04 2025`）
//! - 既知フォーマットを日→月→年優先で順に試す
//!
//! タイムゾーン変換は行わない。日時文字列は記載された日付をそのまま採る。

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

/// 出力フォーマット
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// 4桁年として受け付ける最小の年
///
/// `%Y` は1〜4桁を受け付けるため、`29.04.25` が西暦29年になるのを防ぐ。
const MIN_YEAR: i32 = 1000;

/// 日付のみのフォーマット（上から順に試す）
///
/// 数値のみの形式は日先行を優先し、不可能な場合のみ月先行を試す。
/// 2桁年（`%y`）は4桁年の形式がすべて失敗した後に試す。
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y %m %d",
    "%Y/%m/%d",
    "%d %m %Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%b-%Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %m %y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%m/%d/%y",
    "%d %b %y",
    "%d %B %y",
];

/// 日時フォーマット（日付部分のみ採用）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%a, %d %b %Y %H:%M:%S GMT",
];

/// 日付文字列を `YYYY-MM-DD` に正規化する
///
/// # Arguments
/// * `raw` - 抽出された日付文字列
///
/// # Returns
/// * `Some(String)` - 正規化済み日付
/// * `None` - 空文字列またはパース不能（呼び出し側は入力欄を変更しない）
///
/// # Examples
/// ```
/// use ledger_autofill_common::normalize_date;
///
/// assert_eq!(normalize_date("29TH APRIL 2025").as_deref(), Some("2025-04-29"));
/// assert_eq!(normalize_date("not a date"), None);
/// ```
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_loose_date(raw).map(|d| d.format(OUTPUT_FORMAT).to_string())
}

/// 緩い形式の日付文字列を `NaiveDate` にパースする
pub fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        return None;
    }

    // 日時形式はクリーニング前に試す（`.` や序数除去で壊れるため）
    if let Some(date) = parse_datetime(raw.trim()) {
        return Some(date);
    }

    let cleaned = clean_date_text(raw);
    if cleaned.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
        .find(|date| date.year() >= MIN_YEAR)
}

/// 先頭の曜日・序数サフィックス・`.` 区切りを除去し、空白を1つに詰める
pub fn clean_date_text(raw: &str) -> String {
    lazy_static::lazy_static! {
        static ref ORDINAL_RE: Regex = Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").unwrap();
        static ref WEEKDAY_RE: Regex = Regex::new(
            r"(?i)^\s*(mon|tue|tues|wed|thu|thur|thurs|fri|sat|sun)(day|nesday|rsday|urday)?\b[.,]?\s*"
        )
        .unwrap();
    }

    let without_weekday = WEEKDAY_RE.replace(raw, "");
    let replaced = without_weekday.replace('.', " ");
    let stripped = ORDINAL_RE.replace_all(&replaced, "$1");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_datetime(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}
