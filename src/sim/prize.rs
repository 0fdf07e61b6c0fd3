//! Prize values and their wheel labels
//!
//! Labels are what the wheel sectors carry: `"$5"`, `"PayPal"`, `"Bomb"`.
//! A prize serializes as its label.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::OBSTACLE_LABEL;

/// What a dart can land on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Prize {
    /// Cash reward (always positive)
    Cash { amount: u32 },
    /// Collectible item, checked against the session's required set
    Item(String),
    /// The "Bomb" sector
    Obstacle,
    /// Unparseable label; a configuration defect, never a playable outcome
    Unknown,
}

impl Prize {
    /// Parse a sector label
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if let Some(digits) = label.strip_prefix('$') {
            // Plain digits only, so the label prints back unchanged
            let canonical = !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
                && !digits.starts_with('0');
            if !canonical {
                return Prize::Unknown;
            }
            return match digits.parse::<u32>() {
                Ok(amount) => Prize::Cash { amount },
                Err(_) => Prize::Unknown,
            };
        }
        if label == OBSTACLE_LABEL {
            return Prize::Obstacle;
        }
        if label.is_empty() || label == "Unknown" {
            return Prize::Unknown;
        }
        Prize::Item(label.to_string())
    }

    /// Wheel label for this prize
    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Prize::Unknown)
    }
}

impl fmt::Display for Prize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prize::Cash { amount } => write!(f, "${}", amount),
            Prize::Item(name) => f.write_str(name),
            Prize::Obstacle => f.write_str(OBSTACLE_LABEL),
            Prize::Unknown => f.write_str("Unknown"),
        }
    }
}

impl From<&str> for Prize {
    fn from(label: &str) -> Self {
        Prize::parse(label)
    }
}

impl From<String> for Prize {
    fn from(label: String) -> Self {
        Prize::parse(&label)
    }
}

impl From<Prize> for String {
    fn from(prize: Prize) -> Self {
        prize.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cash() {
        assert_eq!(Prize::parse("$5"), Prize::Cash { amount: 5 });
        assert_eq!(Prize::parse("$10"), Prize::Cash { amount: 10 });
        assert_eq!(Prize::parse(" $1 "), Prize::Cash { amount: 1 });
    }

    #[test]
    fn test_parse_bad_cash_is_unknown() {
        assert_eq!(Prize::parse("$0"), Prize::Unknown);
        assert_eq!(Prize::parse("$"), Prize::Unknown);
        assert_eq!(Prize::parse("$x"), Prize::Unknown);
        assert_eq!(Prize::parse("$-3"), Prize::Unknown);
        assert_eq!(Prize::parse("$+5"), Prize::Unknown);
        assert_eq!(Prize::parse("$05"), Prize::Unknown);
        assert_eq!(Prize::parse("$99999999999"), Prize::Unknown);
    }

    #[test]
    fn test_parse_other_kinds() {
        assert_eq!(Prize::parse("Bomb"), Prize::Obstacle);
        assert_eq!(Prize::parse("PayPal"), Prize::Item("PayPal".into()));
        assert_eq!(Prize::parse(""), Prize::Unknown);
        assert_eq!(Prize::parse("Unknown"), Prize::Unknown);
    }

    #[test]
    fn test_label_matches_wheel_text() {
        assert_eq!(Prize::Cash { amount: 5 }.label(), "$5");
        assert_eq!(Prize::Obstacle.label(), "Bomb");
        assert_eq!(Prize::Item("Amazon".into()).label(), "Amazon");
    }

    #[test]
    fn test_serializes_as_label() {
        let prizes = vec![Prize::Cash { amount: 5 }, Prize::Item("PayPal".into()), Prize::Obstacle];
        let json = serde_json::to_string(&prizes).unwrap();
        assert_eq!(json, r#"["$5","PayPal","Bomb"]"#);

        let back: Vec<Prize> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prizes);
    }
}
