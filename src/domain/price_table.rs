// src/domain/price_table.rs

use crate::domain::service::CleaningType;
use std::collections::BTreeMap;

/// A {min, max} surcharge. Only `min` feeds the quote today; `max` is kept
/// so the admin can maintain it and the public pages can show "from..to".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurchargeRange {
    pub min: f64,
    pub max: f64,
}

/// Current base rates and modifiers, admin-editable.
///
/// Base rates are keyed by cleaning type so a table loaded from storage can
/// be incomplete; the quote engine reports a missing key as an invalid
/// configuration instead of silently pricing at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    pub base_rates: BTreeMap<CleaningType, f64>,
    pub bathroom_surcharge: SurchargeRange,
    pub window_surcharge: SurchargeRange,
    pub heavy_dirt_modifier: f64,
}

impl Default for PriceTable {
    fn default() -> Self {
        let base_rates = BTreeMap::from([
            (CleaningType::Regular, 230.0),
            (CleaningType::Deep, 460.0),
            (CleaningType::PostRenovation, 690.0),
            (CleaningType::Eco, 300.0),
        ]);

        Self {
            base_rates,
            bathroom_surcharge: SurchargeRange {
                min: 2500.0,
                max: 4000.0,
            },
            window_surcharge: SurchargeRange {
                min: 2000.0,
                max: 5000.0,
            },
            heavy_dirt_modifier: 1.4,
        }
    }
}

impl PriceTable {
    pub fn base_rate(&self, cleaning_type: CleaningType) -> Option<f64> {
        self.base_rates.get(&cleaning_type).copied()
    }

    /// Checks an admin-submitted table before it is saved.
    /// Returns a human-readable reason for the first violation.
    pub fn validate(&self) -> Result<(), String> {
        for ct in CleaningType::ALL {
            match self.base_rate(ct) {
                Some(rate) if rate > 0.0 && rate.is_finite() => {}
                Some(_) => return Err(format!("base rate for '{}' must be positive", ct.as_str())),
                None => return Err(format!("missing base rate for '{}'", ct.as_str())),
            }
        }

        for (name, range) in [
            ("bathroom", self.bathroom_surcharge),
            ("window", self.window_surcharge),
        ] {
            if range.min < 0.0 || !range.min.is_finite() || !range.max.is_finite() {
                return Err(format!("{name} surcharge must be a non-negative number"));
            }
            if range.min > range.max {
                return Err(format!("{name} surcharge min must not exceed max"));
            }
        }

        if !(self.heavy_dirt_modifier > 1.0) || !self.heavy_dirt_modifier.is_finite() {
            return Err("heavy dirt modifier must be greater than 1".into());
        }

        Ok(())
    }
}
