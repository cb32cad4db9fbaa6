// src/db/requests.rs
use crate::domain::lead::{ContactChannel, RequestStatus};
use crate::domain::{Quote, ServiceConfiguration};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};
use time::OffsetDateTime;

/// A validated lead ready to be stored.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub name: String,
    pub phone: String,
    pub contact_channel: ContactChannel,
    pub district: Option<String>,
    pub district_surcharge: i64,
    pub comment: Option<String>,
    pub service: ServiceConfiguration,
    pub quote: Quote,
}

/// A stored request as shown in the back-office.
#[derive(Debug, Clone)]
pub struct RequestRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub contact_channel: String,
    pub district: Option<String>,
    pub district_surcharge: i64,
    pub comment: Option<String>,
    pub property_type: String,
    pub cleaning_type: String,
    pub area: f64,
    pub bathroom_count: i64,
    pub has_window_cleaning: bool,
    pub addons: Vec<String>,
    pub dirt_level: String,
    pub price_min: i64,
    pub price_max: i64,
    pub status: String,
    pub executor_id: Option<i64>,
    pub executor_name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

const SELECT_REQUESTS: &str = r#"
    select
      r.id, r.name, r.phone, r.contact_channel, r.district, r.district_surcharge, r.comment,
      r.property_type, r.cleaning_type, r.area, r.bathroom_count, r.has_window_cleaning,
      r.addons, r.dirt_level, r.price_min, r.price_max, r.status, r.executor_id,
      e.name, r.created_at, r.updated_at
    from requests r
    left join executors e on e.id = r.executor_id
"#;

fn row_to_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<RequestRow> {
    let addons_json: String = row.get(12)?;
    Ok(RequestRow {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        contact_channel: row.get(3)?,
        district: row.get(4)?,
        district_surcharge: row.get(5)?,
        comment: row.get(6)?,
        property_type: row.get(7)?,
        cleaning_type: row.get(8)?,
        area: row.get(9)?,
        bathroom_count: row.get(10)?,
        has_window_cleaning: row.get(11)?,
        addons: serde_json::from_str(&addons_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(12, rusqlite::types::Type::Text, Box::new(e))
        })?,
        dirt_level: row.get(13)?,
        price_min: row.get(14)?,
        price_max: row.get(15)?,
        status: row.get(16)?,
        executor_id: row.get(17)?,
        executor_name: row.get(18)?,
        created_at: row.get(19)?,
        updated_at: row.get(20)?,
    })
}

pub fn insert_request(conn: &Connection, req: &NewRequest, now: i64) -> Result<i64, ServerError> {
    let addons: Vec<&String> = req.service.selected_addons.iter().collect();
    let addons_json = serde_json::to_string(&addons)
        .map_err(|e| ServerError::DbError(format!("encode addons failed: {e}")))?;

    conn.execute(
        r#"
        insert into requests (
          name, phone, contact_channel, district, district_surcharge, comment,
          property_type, cleaning_type, area, bathroom_count, has_window_cleaning,
          addons, dirt_level, price_min, price_max, status, created_at, updated_at
        )
        values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?17)
        "#,
        params![
            req.name,
            req.phone,
            req.contact_channel.as_str(),
            req.district,
            req.district_surcharge,
            req.comment,
            req.service.property_type.as_str(),
            req.service.cleaning_type.as_str(),
            req.service.area,
            req.service.bathroom_count,
            req.service.has_window_cleaning,
            addons_json,
            req.service.dirt_level.as_str(),
            req.quote.price_min,
            req.quote.price_max,
            RequestStatus::New.as_str(),
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert request failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

/// Newest first.
pub fn list_requests(conn: &Connection, limit: i64) -> Result<Vec<RequestRow>, ServerError> {
    let sql = format!("{SELECT_REQUESTS} order by r.created_at desc, r.id desc limit ?");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit], row_to_request)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

#[cfg(test)]
pub fn get_request(conn: &Connection, id: i64) -> Result<Option<RequestRow>, ServerError> {
    let sql = format!("{SELECT_REQUESTS} where r.id = ?");
    conn.query_row(&sql, params![id], row_to_request)
        .optional()
        .map_err(|e| ServerError::DbError(format!("select request failed: {e}")))
}

pub fn update_status(
    conn: &Connection,
    id: i64,
    status: RequestStatus,
    now: i64,
) -> Result<(), ServerError> {
    let updated = conn
        .execute(
            "update requests set status = ?, updated_at = ? where id = ?",
            params![status.as_str(), now, id],
        )
        .map_err(|e| ServerError::DbError(format!("update request status failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

/// Manual assignment. `None` unassigns. No availability or status checks.
pub fn assign_executor(
    conn: &Connection,
    id: i64,
    executor_id: Option<i64>,
    now: i64,
) -> Result<(), ServerError> {
    if let Some(executor_id) = executor_id {
        let exists: Option<i64> = conn
            .query_row(
                "select id from executors where id = ?",
                params![executor_id],
                |r| r.get(0),
            )
            .optional()
            .map_err(|e| ServerError::DbError(format!("select executor failed: {e}")))?;
        if exists.is_none() {
            return Err(ServerError::BadRequest(format!(
                "executor {executor_id} does not exist"
            )));
        }
    }

    let updated = conn
        .execute(
            "update requests set executor_id = ?, updated_at = ? where id = ?",
            params![executor_id, now, id],
        )
        .map_err(|e| ServerError::DbError(format!("assign executor failed: {e}")))?;

    if updated == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

fn start_of_month(now: i64) -> i64 {
    let dt = OffsetDateTime::from_unix_timestamp(now).unwrap_or_else(|_| OffsetDateTime::now_utc());

    dt.replace_day(1)
        .unwrap_or(dt)
        .replace_time(time::Time::MIDNIGHT)
        .unix_timestamp()
}

/// Requests created in the current calendar month (UTC).
pub fn count_this_month(conn: &Connection, now: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from requests where created_at >= ?",
        params![start_of_month(now)],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count requests failed: {e}")))
}

pub fn count_by_status(conn: &Connection, status: RequestStatus) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from requests where status = ?",
        params![status.as_str()],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count requests failed: {e}")))
}
