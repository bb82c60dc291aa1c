//! 選択肢のあいまい照合
//!
//! 抽出値を選択式フィールドの許容値に当てはめる。
//! 比較は位置ごとの文字一致のみ（編集距離ではない）。挿入・入れ替えがあると
//! 以降の文字がすべてずれてスコアが大きく下がるが、既存の画面と同じ結果を
//! 返すためこの挙動を維持する。

/// 採用の閾値（この割合以上一致で採用）
pub const MATCH_THRESHOLD: f64 = 0.6;

/// 照合結果
#[derive(Debug, Clone, PartialEq)]
pub struct OptionMatch<'a> {
    /// 一致した選択肢（元の表記のまま）
    pub option: &'a str,
    /// 一致率 [0, 1]
    pub score: f64,
}

/// 比較用に小文字化し、空白をすべて除去する
fn comparable(text: &str) -> Vec<char> {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// 位置一致率を計算する
///
/// 短い方の長さまで同じ位置の文字を比較し、一致数を長い方の長さで割る。
pub fn positional_similarity(a: &str, b: &str) -> f64 {
    let a = comparable(a);
    let b = comparable(b);
    positional_ratio(&a, &b)
}

fn positional_ratio(a: &[char], b: &[char]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }

    let matches = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    matches as f64 / longest as f64
}

/// 最も一致率の高い選択肢を返す（閾値判定なし）
///
/// 同率の場合は先に現れた選択肢を残す。一致率0の選択肢は選ばれない。
pub fn best_match<'a, S: AsRef<str>>(value: &str, options: &'a [S]) -> Option<OptionMatch<'a>> {
    if value.is_empty() {
        return None;
    }

    let v = comparable(value);
    let mut best: Option<OptionMatch<'a>> = None;

    for opt in options {
        let opt = opt.as_ref();
        let score = positional_ratio(&v, &comparable(opt));
        let current = best.as_ref().map_or(0.0, |b| b.score);
        if score > current {
            best = Some(OptionMatch { option: opt, score });
        }
    }

    best
}

/// 抽出値に一致する選択肢を返す
///
/// # Arguments
/// * `value` - 抽出値
/// * `options` - 許容される選択肢
///
/// # Returns
/// * `Some(&str)` - 一致率が [`MATCH_THRESHOLD`] 以上の選択肢（`options` の要素）
/// * `None` - 空の値、空の選択肢、または閾値未満
pub fn match_option<'a, S: AsRef<str>>(value: &str, options: &'a [S]) -> Option<&'a str> {
    best_match(value, options)
        .filter(|m| m.score >= MATCH_THRESHOLD)
        .map(|m| m.option)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let options = ["MV Ocean Star"];
        assert_eq!(match_option("MV Ocean Star", &options), Some("MV Ocean Star"));
    }

    #[test]
    fn test_close_match_beats_unrelated() {
        let options = ["MV Ocean Star", "MV Atlantic"];
        assert_eq!(match_option("MV Ocean Strr", &options), Some("MV Ocean Star"));
    }

    #[test]
    fn test_below_threshold() {
        let options = ["MV Ocean Star"];
        assert_eq!(match_option("zzz", &options), None);
    }

    #[test]
    fn test_empty_inputs() {
        let options = ["Open", "Closed"];
        assert_eq!(match_option("", &options), None);
        let none: [&str; 0] = [];
        assert_eq!(match_option("Open", &none), None);
    }

    #[test]
    fn test_case_and_whitespace_ignored() {
        let options = vec!["GENCON 1994".to_string()];
        assert_eq!(match_option("gencon1994", &options), Some("GENCON 1994"));
    }

    #[test]
    fn test_punctuation_is_kept() {
        // 句読点は除去しないため位置がずれる
        assert!(positional_similarity("M.V. Star", "MV Star") < 0.6);
    }

    #[test]
    fn test_insertion_shifts_alignment() {
        // 先頭への1文字挿入で全位置がずれる
        assert_eq!(positional_similarity("xopen", "open"), 0.0);
    }

    #[test]
    fn test_ratio_uses_longer_length() {
        // "opn" vs "open": o,p 一致 → 2/4
        assert!((positional_similarity("Opn", "Open") - 0.5).abs() < 1e-9);
        assert!((positional_similarity("Open", "Opne") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_tie_keeps_first() {
        let options = ["Open A", "Open B"];
        let m = best_match("open", &options).unwrap();
        assert_eq!(m.option, "Open A");
    }

    #[test]
    fn test_blank_option_never_selected() {
        let options = ["", "Closed"];
        assert_eq!(best_match("zz", &options), None);
    }

    #[test]
    fn test_result_is_member_of_options() {
        let options = ["Open", "Closed", "On Hold", "Settled"];
        for value in ["opn", "closd", "on hol", "settle", "xyz", "Open"] {
            if let Some(found) = match_option(value, &options) {
                assert!(options.contains(&found));
            }
        }
    }
}
