//! Session configuration.
//!
//! The host framework hands every app a flat key/value session config. It is
//! modelled here by the [`ConfigSource`] trait, implemented for a
//! `serde_json` object. [`Settings`] mirrors the host's settings file: a map
//! of defaults inherited by each named session config unless overridden.
//!
//! ## Keys
//!
//! | Key | Default | Meaning |
//! |-----|---------|---------|
//! | `name` | required | config identifier |
//! | `display_name` | `name` | label shown to the experimenter |
//! | `num_buyers` | required | buyers per group |
//! | `num_sellers` | required | sellers per group |
//! | `num_demo_participants` | group size | participants in the session |
//! | `lb`, `ub` | 0, 10 | evaluation bounds |
//! | `points_decimal_places` | 2 | currency precision |
//! | `earning_if_none` | 0 | no-trade payoff |
//! | `enforce_reservation` | true | reject loss-making bids |
//! | `real_world_currency_per_point` | 1.00 | payment conversion |
//! | `participation_fee` | 0.00 | paid regardless of outcome |
//!
//! ## Example
//!
//! ```
//! use volauction::session::Settings;
//!
//! let settings = Settings::default();
//! let config = settings.session("vol_3_4").unwrap();
//!
//! assert_eq!(config.group_size(), 7);
//! assert_eq!(config.num_groups(), 1);
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::engine::payoff::PayoffRule;
use crate::error::ConfigError;
use crate::market::MarketRules;
use crate::types::currency::{Currency, DEFAULT_DECIMAL_PLACES, MAX_DECIMAL_PLACES};

/// Read access to the host's session configuration.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<&Value>;
}

impl ConfigSource for Map<String, Value> {
    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

/// Validated parameters of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    pub name: String,
    pub display_name: String,
    pub num_participants: u32,
    pub num_buyers: u32,
    pub num_sellers: u32,

    /// Lower bound of the evaluation draw
    pub lb: Currency,

    /// Upper bound of the evaluation draw
    pub ub: Currency,

    pub points_decimal_places: u32,
    pub earning_if_none: Currency,
    pub enforce_reservation: bool,
    pub real_world_currency_per_point: Decimal,
    pub participation_fee: Decimal,
}

impl SessionConfig {
    /// Read and validate a config from any [`ConfigSource`].
    pub fn from_source<S>(source: &S) -> Result<Self, ConfigError>
    where
        S: ConfigSource + ?Sized,
    {
        let name = read_string(source, "name")?.ok_or_else(|| missing("name"))?;
        let num_buyers = read_u32(source, "num_buyers")?.ok_or_else(|| missing("num_buyers"))?;
        let num_sellers = read_u32(source, "num_sellers")?.ok_or_else(|| missing("num_sellers"))?;

        let group_size = checked_group_size(num_buyers, num_sellers)?;
        let num_participants = match read_u32(source, "num_demo_participants")? {
            Some(n) => n,
            None => read_u32(source, "num_participants")?.unwrap_or(group_size),
        };

        let config = Self {
            display_name: read_string(source, "display_name")?.unwrap_or_else(|| name.clone()),
            name,
            num_participants,
            num_buyers,
            num_sellers,
            lb: read_currency(source, "lb")?.unwrap_or(Currency::ZERO),
            ub: read_currency(source, "ub")?.unwrap_or(Currency::from_int(10)),
            points_decimal_places: read_u32(source, "points_decimal_places")?
                .unwrap_or(DEFAULT_DECIMAL_PLACES),
            earning_if_none: read_currency(source, "earning_if_none")?.unwrap_or(Currency::ZERO),
            enforce_reservation: read_bool(source, "enforce_reservation")?.unwrap_or(true),
            real_world_currency_per_point: read_decimal(source, "real_world_currency_per_point")?
                .unwrap_or(Decimal::ONE),
            participation_fee: read_decimal(source, "participation_fee")?
                .unwrap_or(Decimal::ZERO),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the fatal startup conditions.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoParticipants`]
    /// - [`ConfigError::GroupSizeOverflow`]
    /// - [`ConfigError::TooManySellers`]: `num_sellers >= group_size`
    /// - [`ConfigError::ParticipantsNotDivisible`]
    /// - [`ConfigError::InvertedBounds`]
    /// - [`ConfigError::TooManyDecimalPlaces`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_participants == 0 {
            return Err(ConfigError::NoParticipants);
        }

        let group_size = checked_group_size(self.num_buyers, self.num_sellers)?;
        if self.num_sellers >= group_size {
            return Err(ConfigError::TooManySellers {
                num_sellers: self.num_sellers,
                group_size,
            });
        }

        if self.num_participants % group_size != 0 {
            return Err(ConfigError::ParticipantsNotDivisible {
                participants: self.num_participants,
                group_size,
            });
        }

        if self.lb > self.ub {
            return Err(ConfigError::InvertedBounds {
                lb: self.lb,
                ub: self.ub,
            });
        }

        if self.points_decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::TooManyDecimalPlaces(self.points_decimal_places));
        }

        Ok(())
    }

    /// Players per group: buyers plus sellers. Saturates for configs that
    /// [`validate`](Self::validate) rejects.
    #[inline]
    pub fn group_size(&self) -> u32 {
        self.num_buyers.saturating_add(self.num_sellers)
    }

    /// Number of groups the participants split into
    pub fn num_groups(&self) -> u32 {
        match self.group_size() {
            0 => 0,
            size => self.num_participants / size,
        }
    }

    /// Parameters every group of this session trades under
    pub fn market_rules(&self) -> MarketRules {
        MarketRules {
            payoff: PayoffRule::new(self.earning_if_none, self.points_decimal_places),
            enforce_reservation: self.enforce_reservation,
        }
    }

    /// Real-world money for a payoff: `participation_fee + payoff * rate`
    pub fn real_world_payment(&self, payoff: Currency) -> Option<Decimal> {
        payoff
            .checked_mul_decimal(self.real_world_currency_per_point)?
            .as_decimal()
            .checked_add(self.participation_fee)
    }
}

// ============================================================================
// Settings
// ============================================================================

/// The experiment's settings file: shared defaults plus named configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub session_config_defaults: Map<String, Value>,

    #[serde(default)]
    pub session_configs: Vec<Map<String, Value>>,
}

impl Default for Settings {
    /// The two stock configs: 2 buyers + 1 seller, and 3 buyers + 4 sellers
    fn default() -> Self {
        let defaults = json!({
            "real_world_currency_per_point": 1.00,
            "participation_fee": 0.00,
            "points_decimal_places": 2,
            "lb": 0,
            "ub": 10,
            "earning_if_none": 0,
        });
        let configs = json!([
            {
                "name": "volauction",
                "display_name": "Endogenous market formation",
                "num_demo_participants": 3,
                "num_buyers": 2,
                "num_sellers": 1,
            },
            {
                "name": "vol_3_4",
                "display_name": "Endogenous market formation, 3 buyers, 4 sellers",
                "num_demo_participants": 7,
                "num_buyers": 3,
                "num_sellers": 4,
            },
        ]);

        Self {
            session_config_defaults: as_object(defaults),
            session_configs: match configs {
                Value::Array(items) => items.into_iter().map(as_object).collect(),
                _ => Vec::new(),
            },
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Names of all configured sessions
    pub fn session_names(&self) -> Vec<&str> {
        self.session_configs
            .iter()
            .filter_map(|c| c.get("name").and_then(Value::as_str))
            .collect()
    }

    /// Defaults overlaid with the named config's own keys
    pub fn merged(&self, name: &str) -> Result<Map<String, Value>, ConfigError> {
        let entry = self
            .session_configs
            .iter()
            .find(|c| c.get("name").and_then(Value::as_str) == Some(name))
            .ok_or_else(|| ConfigError::UnknownSession(name.to_string()))?;

        let mut merged = self.session_config_defaults.clone();
        for (key, value) in entry {
            merged.insert(key.clone(), value.clone());
        }
        Ok(merged)
    }

    /// Build and validate the named session config
    pub fn session(&self, name: &str) -> Result<SessionConfig, ConfigError> {
        SessionConfig::from_source(&self.merged(name)?)
    }
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

// ============================================================================
// Key readers
// ============================================================================

fn checked_group_size(num_buyers: u32, num_sellers: u32) -> Result<u32, ConfigError> {
    num_buyers
        .checked_add(num_sellers)
        .ok_or(ConfigError::GroupSizeOverflow {
            num_buyers,
            num_sellers,
        })
}

fn missing(key: &str) -> ConfigError {
    ConfigError::MissingKey(key.to_string())
}

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn read_string<S: ConfigSource + ?Sized>(source: &S, key: &str) -> Result<Option<String>, ConfigError> {
    match source.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(key, format!("expected a string, got {other}"))),
    }
}

fn read_u32<S: ConfigSource + ?Sized>(source: &S, key: &str) -> Result<Option<u32>, ConfigError> {
    match source.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| invalid(key, format!("expected a non-negative integer, got {value}"))),
    }
}

fn read_bool<S: ConfigSource + ?Sized>(source: &S, key: &str) -> Result<Option<bool>, ConfigError> {
    match source.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(invalid(key, format!("expected a boolean, got {other}"))),
    }
}

/// Numbers and numeric strings are both accepted. Numbers go through their
/// textual form so `1.1` stays exactly `1.1`.
fn read_decimal<S: ConfigSource + ?Sized>(source: &S, key: &str) -> Result<Option<Decimal>, ConfigError> {
    let text = match source.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(invalid(key, format!("expected a number, got {other}"))),
    };

    Decimal::from_str(text.trim())
        .or_else(|_| Decimal::from_scientific(text.trim()))
        .map(Some)
        .map_err(|e| invalid(key, e.to_string()))
}

fn read_currency<S: ConfigSource + ?Sized>(source: &S, key: &str) -> Result<Option<Currency>, ConfigError> {
    Ok(read_decimal(source, key)?.map(Currency::new))
}

// ============================================================================
// Unit Tests
// ============================================================================
