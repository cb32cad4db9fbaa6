// src/db/prices.rs
use crate::db::connection::Database;
use crate::domain::{CleaningType, PriceTable, SurchargeRange};
use crate::errors::ServerError;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::info;

const KEY_BATHROOM_MIN: &str = "bathroom.min";
const KEY_BATHROOM_MAX: &str = "bathroom.max";
const KEY_WINDOW_MIN: &str = "window.min";
const KEY_WINDOW_MAX: &str = "window.max";
const KEY_HEAVY_DIRT: &str = "heavy_dirt_modifier";

fn base_rate_key(ct: CleaningType) -> String {
    format!("base_rate.{}", ct.as_str())
}

fn table_rows(table: &PriceTable) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = table
        .base_rates
        .iter()
        .map(|(ct, rate)| (base_rate_key(*ct), *rate))
        .collect();

    rows.push((KEY_BATHROOM_MIN.into(), table.bathroom_surcharge.min));
    rows.push((KEY_BATHROOM_MAX.into(), table.bathroom_surcharge.max));
    rows.push((KEY_WINDOW_MIN.into(), table.window_surcharge.min));
    rows.push((KEY_WINDOW_MAX.into(), table.window_surcharge.max));
    rows.push((KEY_HEAVY_DIRT.into(), table.heavy_dirt_modifier));
    rows
}

/// Insert the built-in defaults for keys that are not stored yet.
pub fn seed_defaults(conn: &Connection) -> Result<(), ServerError> {
    for (key, value) in table_rows(&PriceTable::default()) {
        conn.execute(
            "insert or ignore into price_settings (key, value) values (?, ?)",
            params![key, value],
        )
        .map_err(|e| ServerError::DbError(format!("seed price '{key}' failed: {e}")))?;
    }
    Ok(())
}

/// Load the stored price table.
///
/// A missing base rate stays missing so quoting that cleaning type fails
/// loudly. Missing surcharges and the modifier fall back to the defaults.
pub fn load_price_table(conn: &Connection) -> Result<PriceTable, ServerError> {
    let mut stmt = conn
        .prepare("select key, value from price_settings")
        .map_err(|e| ServerError::DbError(format!("prepare price load failed: {e}")))?;

    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))
        .map_err(|e| ServerError::DbError(format!("price load failed: {e}")))?;

    let mut values = HashMap::new();
    for r in rows {
        let (key, value) = r.map_err(|e| ServerError::DbError(e.to_string()))?;
        values.insert(key, value);
    }

    let defaults = PriceTable::default();
    let get = |key: &str, fallback: f64| values.get(key).copied().unwrap_or(fallback);

    let base_rates = CleaningType::ALL
        .iter()
        .filter_map(|ct| values.get(&base_rate_key(*ct)).map(|rate| (*ct, *rate)))
        .collect();

    Ok(PriceTable {
        base_rates,
        bathroom_surcharge: SurchargeRange {
            min: get(KEY_BATHROOM_MIN, defaults.bathroom_surcharge.min),
            max: get(KEY_BATHROOM_MAX, defaults.bathroom_surcharge.max),
        },
        window_surcharge: SurchargeRange {
            min: get(KEY_WINDOW_MIN, defaults.window_surcharge.min),
            max: get(KEY_WINDOW_MAX, defaults.window_surcharge.max),
        },
        heavy_dirt_modifier: get(KEY_HEAVY_DIRT, defaults.heavy_dirt_modifier),
    })
}

/// Validate and store a full price table in one transaction.
pub fn save_price_table(
    conn: &mut Connection,
    table: &PriceTable,
    now: i64,
) -> Result<(), ServerError> {
    table.validate().map_err(ServerError::BadRequest)?;

    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    for (key, value) in table_rows(table) {
        tx.execute(
            r#"
            insert into price_settings (key, value, updated_at) values (?1, ?2, ?3)
            on conflict(key) do update set value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, now],
        )
        .map_err(|e| ServerError::DbError(format!("save price '{key}' failed: {e}")))?;
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;
    Ok(())
}

/// Price table shared by all workers. Loaded on first use and reused until
/// an admin update invalidates it.
#[derive(Default)]
pub struct PriceTableCache {
    current: RwLock<Option<PriceTable>>,
}

impl PriceTableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, db: &Database) -> Result<PriceTable, ServerError> {
        if let Some(table) = self
            .current
            .read()
            .map_err(|_| ServerError::InternalError)?
            .as_ref()
        {
            return Ok(table.clone());
        }

        let table = db.with_conn(|conn| load_price_table(conn))?;
        *self
            .current
            .write()
            .map_err(|_| ServerError::InternalError)? = Some(table.clone());

        info!("price table loaded");
        Ok(table)
    }

    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.current.write() {
            *slot = None;
        }
    }
}
