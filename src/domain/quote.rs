// src/domain/quote.rs

use crate::domain::addons::addon_price;
use crate::domain::price_table::PriceTable;
use crate::domain::service::{DirtLevel, ServiceConfiguration};
use thiserror::Error;

/// Both bounds are rounded to this many tenge.
pub const ROUNDING_STEP: f64 = 500.0;

/// `price_max` is derived from the unrounded total times this factor.
pub const MAX_FACTOR: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub price_min: i64,
    pub price_max: i64,
}

#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Unrounded total for a configuration.
///
/// Order matters: the heavy-dirt multiplier is applied last, to the whole
/// accumulated total including bathrooms, windows and addons.
pub fn raw_total(config: &ServiceConfiguration, table: &PriceTable) -> Result<f64, QuoteError> {
    let base_rate = table.base_rate(config.cleaning_type).ok_or_else(|| {
        QuoteError::InvalidConfiguration(format!(
            "no base rate for cleaning type '{}'",
            config.cleaning_type.as_str()
        ))
    })?;

    let mut total = config.area * base_rate * config.property_type.multiplier();

    total += f64::from(config.bathroom_count) * table.bathroom_surcharge.min;

    if config.has_window_cleaning {
        total += table.window_surcharge.min;
    }

    // Ids outside the catalog are skipped.
    total += config
        .selected_addons
        .iter()
        .filter_map(|id| addon_price(id))
        .sum::<f64>();

    if config.dirt_level == DirtLevel::Heavy {
        total *= table.heavy_dirt_modifier;
    }

    Ok(total)
}

/// Maps a configuration to a price range. Pure: no I/O, no logging.
///
/// Area is not validated here; zero or negative areas produce a small or
/// negative quote and callers reject them before submission.
pub fn compute_quote(
    config: &ServiceConfiguration,
    table: &PriceTable,
) -> Result<Quote, QuoteError> {
    let total = raw_total(config, table)?;

    Ok(Quote {
        price_min: round_to_step(total),
        price_max: round_to_step(total * MAX_FACTOR),
    })
}

/// Round half up to the nearest `ROUNDING_STEP`.
pub fn round_to_step(value: f64) -> i64 {
    ((value / ROUNDING_STEP + 0.5).floor() * ROUNDING_STEP) as i64
}
