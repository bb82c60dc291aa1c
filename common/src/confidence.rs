//! 信頼度の区分と表示
//!
//! 信頼度が無い（null）フィールドには何も表示しない。これは `Low` とは別扱い。

use serde::{Deserialize, Serialize};

/// 高信頼度の下限 (0.85)
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.85;

/// 中信頼度の下限 (0.60)
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.60;

/// 信頼度の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceTier::High
        } else if confidence >= MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    /// 表示色（CSSクラス名と共通）
    pub fn colour(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "green",
            ConfidenceTier::Medium => "orange",
            ConfidenceTier::Low => "red",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceTier::High => write!(f, "high"),
            ConfidenceTier::Medium => write!(f, "medium"),
            ConfidenceTier::Low => write!(f, "low"),
        }
    }
}

/// 信頼度から区分を求める（信頼度なしは None）
pub fn tier_of(confidence: Option<f64>) -> Option<ConfidenceTier> {
    confidence.map(ConfidenceTier::from_score)
}

/// フィールド横に表示する信頼度表示
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAnnotation {
    pub tier: ConfidenceTier,
    /// 四捨五入したパーセント値
    pub percent: i64,
}

impl ConfidenceAnnotation {
    pub fn from_confidence(confidence: Option<f64>) -> Option<Self> {
        let score = confidence?;
        Some(Self {
            tier: ConfidenceTier::from_score(score),
            percent: (score * 100.0).round() as i64,
        })
    }

    /// 表示ラベル（例: `92%`）
    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }

    pub fn colour(&self) -> &'static str {
        self.tier.colour()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_breakpoints() {
        assert_eq!(tier_of(Some(1.0)), Some(ConfidenceTier::High));
        assert_eq!(tier_of(Some(0.85)), Some(ConfidenceTier::High));
        assert_eq!(tier_of(Some(0.8499)), Some(ConfidenceTier::Medium));
        assert_eq!(tier_of(Some(0.60)), Some(ConfidenceTier::Medium));
        assert_eq!(tier_of(Some(0.5999)), Some(ConfidenceTier::Low));
        assert_eq!(tier_of(Some(0.0)), Some(ConfidenceTier::Low));
    }

    #[test]
    fn test_absent_confidence() {
        assert_eq!(tier_of(None), None);
        assert_eq!(ConfidenceAnnotation::from_confidence(None), None);
    }

    #[test]
    fn test_tier_over_range() {
        for i in 0..=100 {
            let c = i as f64 / 100.0;
            let tier = ConfidenceTier::from_score(c);
            let expected = if c >= 0.85 {
                ConfidenceTier::High
            } else if c >= 0.60 {
                ConfidenceTier::Medium
            } else {
                ConfidenceTier::Low
            };
            assert_eq!(tier, expected, "confidence {}", c);
        }
    }

    #[test]
    fn test_colours() {
        assert_eq!(ConfidenceTier::High.colour(), "green");
        assert_eq!(ConfidenceTier::Medium.colour(), "orange");
        assert_eq!(ConfidenceTier::Low.colour(), "red");
    }

    #[test]
    fn test_label_rounding() {
        let a = ConfidenceAnnotation::from_confidence(Some(0.926)).unwrap();
        assert_eq!(a.label(), "93%");
        assert_eq!(a.tier, ConfidenceTier::High);

        let b = ConfidenceAnnotation::from_confidence(Some(0.64)).unwrap();
        assert_eq!(b.percent, 64);
        assert_eq!(b.colour(), "orange");
    }

    #[test]
    fn test_display() {
        assert_eq!(ConfidenceTier::Medium.to_string(), "medium");
    }
}
