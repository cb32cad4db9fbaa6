// src/forms.rs
use crate::domain::addons::find_addon;
use crate::domain::service::BATHROOMS_MIN;
use crate::domain::{
    CleaningType, DirtLevel, PriceTable, PropertyType, QuoteError, ServiceConfiguration,
    SurchargeRange,
};
use crate::errors::ServerError;
use astra::Request;
use std::collections::BTreeMap;
use std::io::Read;

const MAX_FORM_BYTES: u64 = 64 * 1024;

/// Decoded `application/x-www-form-urlencoded` pairs. Keys may repeat
/// (`addons=fridge&addons=oven`).
#[derive(Debug, Default, Clone)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(bytes)
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn required(&self, key: &str) -> Result<&str, ServerError> {
        self.get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ServerError::BadRequest(format!("missing field '{key}'")))
    }

    pub fn parse_i64(&self, key: &str) -> Result<i64, ServerError> {
        let raw = self.required(key)?;
        raw.parse()
            .map_err(|_| ServerError::BadRequest(format!("field '{key}' must be a whole number")))
    }

    pub fn parse_f64(&self, key: &str) -> Result<f64, ServerError> {
        let raw = self.required(key)?.replace(',', ".");
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ServerError::BadRequest(format!("field '{key}' must be a number")))
    }

    /// HTML checkbox semantics: present and not "off"/"false"/"0".
    pub fn checked(&self, key: &str) -> bool {
        matches!(self.get(key), Some(v) if !matches!(v.trim(), "" | "off" | "false" | "0"))
    }
}

/// Read and decode a form body.
pub fn read_form(req: &mut Request) -> Result<FormData, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES + 1)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("failed to read body: {e}")))?;

    if body.len() as u64 > MAX_FORM_BYTES {
        return Err(ServerError::BadRequest("form too large".into()));
    }
    Ok(FormData::parse(&body))
}

/// Builds the calculator state from form fields.
///
/// An unknown cleaning type is an invalid configuration. Unknown property
/// types and dirt levels fall back to their defaults, addon ids outside the
/// catalog are dropped.
pub fn service_config_from_form(form: &FormData) -> Result<ServiceConfiguration, ServerError> {
    let cleaning_key = form.get("cleaning_type").unwrap_or_default();
    let cleaning_type = CleaningType::parse(cleaning_key).ok_or_else(|| {
        QuoteError::InvalidConfiguration(format!("unknown cleaning type '{cleaning_key}'"))
    })?;

    let bathroom_count = match form.get("bathrooms").map(str::trim) {
        None | Some("") => BATHROOMS_MIN,
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            ServerError::BadRequest("field 'bathrooms' must be a non-negative whole number".into())
        })?,
    };

    Ok(ServiceConfiguration {
        property_type: PropertyType::parse_or_default(
            form.get("property_type").unwrap_or_default(),
        ),
        cleaning_type,
        area: form.parse_f64("area")?,
        bathroom_count,
        has_window_cleaning: form.checked("windows"),
        selected_addons: form
            .get_all("addons")
            .into_iter()
            .filter(|id| find_addon(id).is_some())
            .map(str::to_string)
            .collect(),
        dirt_level: DirtLevel::parse_or_default(form.get("dirt_level").unwrap_or_default()),
    })
}

/// Reads the admin price editor. Field names match the stored keys.
pub fn price_table_from_form(form: &FormData) -> Result<PriceTable, ServerError> {
    let mut base_rates = BTreeMap::new();
    for ct in CleaningType::ALL {
        base_rates.insert(ct, form.parse_f64(&format!("base_rate.{}", ct.as_str()))?);
    }

    Ok(PriceTable {
        base_rates,
        bathroom_surcharge: SurchargeRange {
            min: form.parse_f64("bathroom.min")?,
            max: form.parse_f64("bathroom.max")?,
        },
        window_surcharge: SurchargeRange {
            min: form.parse_f64("window.min")?,
            max: form.parse_f64("window.max")?,
        },
        heavy_dirt_modifier: form.parse_f64("heavy_dirt_modifier")?,
    })
}
