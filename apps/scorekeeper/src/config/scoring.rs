//! Scoring policy: point values, multipliers and special-card rules.
//!
//! A game refers to its policy by preset id only, so presets can be swapped
//! or extended without touching the engine.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Preset id stored on games created with the default rules.
pub const STANDARD_PRESET_ID: &str = "standard";

/// One special-card type the operator can count during a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialRule {
    pub id: String,
    pub icon: String,
    pub label: String,
    /// Fixed value per occurrence. `None` means the card's value is variable
    /// and gets folded into the manual bonus by the operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl SpecialRule {
    fn new(id: &str, icon: &str, label: &str, points: Option<u32>) -> Self {
        Self {
            id: id.to_string(),
            icon: icon.to_string(),
            label: label.to_string(),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub points_per_successful_trick: u32,
    pub failed_bid_penalty_per_trick: u32,
    pub zero_bid_multiplier: u32,
    pub zero_bid_fail_multiplier: u32,
    pub allow_harry_adjustment: bool,
    /// Ordered; export columns follow this order.
    #[serde(default)]
    pub specials: Vec<SpecialRule>,
}

impl ScoringConfig {
    /// The standard Skull King table.
    pub fn standard() -> Self {
        Self {
            points_per_successful_trick: 20,
            failed_bid_penalty_per_trick: 10,
            zero_bid_multiplier: 10,
            zero_bid_fail_multiplier: 10,
            allow_harry_adjustment: true,
            specials: vec![
                SpecialRule::new("skullKing", "💀👑", "Skull King", None),
                SpecialRule::new("second", "🦜", "Second", None),
                SpecialRule::new("pirates", "🏴‍☠️", "Pirate", None),
                SpecialRule::new("mermaids", "🧜‍♀️", "Mermaid", None),
                SpecialRule::new("coins", "🪙", "Coin", Some(10)),
                SpecialRule::new("beasts", "🦑", "Beast", None),
                SpecialRule::new("rascalGamble", "🎰", "Rascal Gamble", None),
                SpecialRule::new("punishment", "🚩", "Punishment", None),
            ],
        }
    }

    /// Parse a policy from JSON, rejecting duplicate special ids.
    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let config: ScoringConfig = serde_json::from_str(raw).map_err(|e| {
            DomainError::validation(
                ValidationKind::Other("ScoringConfig".into()),
                format!("invalid scoring config: {e}"),
            )
        })?;

        let mut seen = HashSet::new();
        for rule in &config.specials {
            if !seen.insert(rule.id.as_str()) {
                return Err(DomainError::validation(
                    ValidationKind::Other("ScoringConfig".into()),
                    format!("duplicate special rule id '{}'", rule.id),
                ));
            }
        }
        Ok(config)
    }

    pub fn rule(&self, id: &str) -> Option<&SpecialRule> {
        self.specials.iter().find(|r| r.id == id)
    }

    pub fn special_ids(&self) -> impl Iterator<Item = &str> {
        self.specials.iter().map(|r| r.id.as_str())
    }
}

static PRESETS: Lazy<BTreeMap<&'static str, ScoringConfig>> = Lazy::new(|| {
    let mut presets = BTreeMap::new();
    presets.insert(STANDARD_PRESET_ID, ScoringConfig::standard());
    presets
});

/// Look up a built-in preset by id.
pub fn preset(id: &str) -> Option<&'static ScoringConfig> {
    PRESETS.get(id)
}

/// Like [`preset`], but absence is a validation error.
pub fn require_preset(id: &str) -> Result<&'static ScoringConfig, DomainError> {
    preset(id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::UnknownScoringPreset,
            format!("unknown scoring preset '{id}'"),
        )
    })
}
