//! Game configuration
//!
//! Data-driven round setup: throw budget, required items, the wheel's sector
//! table and timing. Loaded from JSON; every field falls back to its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::{Prize, SessionRules, Wheel, WheelLayout};

/// Round configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Darts per round
    pub throw_budget: u32,
    /// Items that complete the collection, in slot order
    pub required_items: Vec<String>,
    /// Wheel sector table
    pub layout: WheelLayout,

    // === Timing ===
    /// Wheel spin speed (negative = clockwise)
    pub rotation_deg_per_sec: f32,
    /// Dart flight time
    pub dart_flight_secs: f32,
    /// Delay between completing the collection and Frenzy
    pub frenzy_delay_secs: f32,
    /// Idle time before the tutorial hand shows
    pub hint_delay_secs: f32,

    // === Aim ===
    /// World-space direction the dart flies toward
    pub pointer_deg: f32,
    /// Random aim spread either side of the pointer (0 = perfect aim)
    pub aim_spread_deg: f32,
    /// Seed for the aim RNG
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            throw_budget: THROW_BUDGET,
            required_items: REQUIRED_ITEMS.iter().map(|s| s.to_string()).collect(),
            layout: WheelLayout::default(),

            rotation_deg_per_sec: ROTATION_DEG_PER_SEC,
            dart_flight_secs: DART_FLIGHT_SECS,
            frenzy_delay_secs: FRENZY_DELAY_SECS,
            hint_delay_secs: HINT_DELAY_SECS,

            pointer_deg: POINTER_DEG,
            aim_spread_deg: 10.0,
            seed: 0x5eed,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {} throws, {} sectors, items [{}]",
            config.throw_budget,
            config.layout.sectors.len(),
            config.required_items.join(", ")
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the configuration describes a playable round
    pub fn validate(&self) -> Result<(), GameError> {
        if self.throw_budget == 0 {
            return Err(GameError::InvalidConfig("throw budget must be at least 1".into()));
        }
        if self.required_items.is_empty() {
            return Err(GameError::InvalidConfig("no required items".into()));
        }
        for (i, name) in self.required_items.iter().enumerate() {
            if !matches!(Prize::parse(name), Prize::Item(_)) {
                return Err(GameError::InvalidConfig(format!(
                    "\"{}\" cannot be a collectible item",
                    name
                )));
            }
            if self.required_items[..i].contains(name) {
                return Err(GameError::InvalidConfig(format!(
                    "required item \"{}\" listed twice",
                    name
                )));
            }
        }

        self.layout.validate()?;

        let on_wheel = self.layout.item_names();
        for name in &self.required_items {
            if !on_wheel.contains(&name.as_str()) {
                return Err(GameError::InvalidConfig(format!(
                    "required item \"{}\" has no wheel sector",
                    name
                )));
            }
        }
        for name in on_wheel {
            if !self.required_items.iter().any(|r| r == name) {
                return Err(GameError::InvalidConfig(format!(
                    "wheel item \"{}\" is not a required item",
                    name
                )));
            }
        }

        let timings = [
            ("dart_flight_secs", self.dart_flight_secs),
            ("frenzy_delay_secs", self.frenzy_delay_secs),
            ("hint_delay_secs", self.hint_delay_secs),
        ];
        for (field, value) in timings {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidConfig(format!(
                    "{} must be a non-negative number (got {})",
                    field, value
                )));
            }
        }
        if !self.rotation_deg_per_sec.is_finite() || !self.pointer_deg.is_finite() {
            return Err(GameError::InvalidConfig("wheel angles must be finite".into()));
        }
        if !(0.0..180.0).contains(&self.aim_spread_deg) {
            return Err(GameError::InvalidConfig(format!(
                "aim_spread_deg must be in [0, 180) (got {})",
                self.aim_spread_deg
            )));
        }
        Ok(())
    }

    /// Session rules derived from this configuration
    pub fn session_rules(&self) -> SessionRules {
        SessionRules {
            throw_budget: self.throw_budget,
            required_items: self.required_items.clone(),
            frenzy_delay_secs: self.frenzy_delay_secs,
            hint_delay_secs: self.hint_delay_secs,
        }
    }

    /// Stopped wheel built from this configuration
    pub fn build_wheel(&self) -> Wheel {
        Wheel::new(self.layout.clone()).with_speed(self.rotation_deg_per_sec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Sector;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session_rules(), SessionRules::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "throw_budget": 5, "seed": 42 }"#).unwrap();
        assert_eq!(config.throw_budget, 5);
        assert_eq!(config.seed, 42);
        assert_eq!(config.layout, WheelLayout::default());
        assert_eq!(config.required_items, ["PayPal", "Amazon", "PiggyBank"]);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"PiggyBank\""));
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_custom_layout_from_json() {
        let json = r#"{
            "required_items": ["Gem"],
            "layout": { "sectors": [
                { "start": 0, "end": 90, "prize": "Gem" },
                { "start": 90, "end": 0, "prize": "$2" }
            ] }
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.layout.prize_for_angle(45.0), Prize::Item("Gem".into()));
        assert_eq!(config.layout.prize_for_angle(-45.0), Prize::Cash { amount: 2 });
    }

    #[test]
    fn test_out_of_range_layout_from_json() {
        let json = r#"{
            "required_items": ["Gem"],
            "layout": { "sectors": [
                { "start": 350, "end": 370, "prize": "Gem" },
                { "start": 10, "end": 350, "prize": "$2" }
            ] }
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.layout.prize_for_angle(5.0), Prize::Item("Gem".into()));

        let mut round = crate::Round::new(config, Vec::new()).unwrap();
        let token = round.throw_dart().unwrap();
        round
            .resolve_hit(token, crate::degrees_to_point(100.0, 5.0))
            .unwrap();
        assert!(!round.is_unplayable());
        assert_eq!(round.session().collected_items(), ["Gem"]);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = GameConfig::from_json("{ throw_budget: ").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.throw_budget = 0;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let mut config = GameConfig::default();
        config.required_items.push("PayPal".into());
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.required_items = vec!["$5".into()];
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.frenzy_delay_secs = -1.0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.aim_spread_deg = 180.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_items_must_match_wheel() {
        // Required item missing from the wheel
        let mut config = GameConfig::default();
        config.required_items.push("Walmart".into());
        assert!(config.validate().is_err());

        // Wheel item outside the required set
        let mut config = GameConfig::default();
        config.required_items.pop();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_broken_layout_rejected() {
        let mut config = GameConfig::default();
        config.layout = WheelLayout::new(vec![
            Sector::new(0.0, 100.0, "PayPal"),
            Sector::new(100.0, 200.0, "Amazon"),
            Sector::new(200.0, 300.0, "PiggyBank"),
        ]);
        assert!(matches!(config.validate(), Err(GameError::InvalidLayout(_))));
    }
}
