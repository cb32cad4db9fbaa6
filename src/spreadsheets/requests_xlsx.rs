use crate::db::requests::RequestRow;
use crate::domain::DirtLevel;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use crate::templates::format_timestamp;
use rust_xlsxwriter::Workbook;

const HEADERS: [&str; 19] = [
    "ID",
    "Дата",
    "Имя",
    "Телефон",
    "Связь",
    "Район",
    "Выезд, ₸",
    "Объект",
    "Уборка",
    "Площадь, м²",
    "Санузлы",
    "Окна",
    "Доп. услуги",
    "Загрязнение",
    "Цена от",
    "Цена до",
    "Статус",
    "Исполнитель",
    "Обновлена",
];

fn xlsx_err(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Workbook bytes with one row per request.
pub fn build_requests_workbook(rows: &[RequestRow]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(xlsx_err("header"))?;
    }

    for (i, req) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_number(r, 0, req.id as f64)
            .map_err(xlsx_err("id"))?;
        worksheet
            .write_string(r, 1, format_timestamp(req.created_at))
            .map_err(xlsx_err("date"))?;
        worksheet
            .write_string(r, 2, &req.name)
            .map_err(xlsx_err("name"))?;
        worksheet
            .write_string(r, 3, &req.phone)
            .map_err(xlsx_err("phone"))?;
        worksheet
            .write_string(r, 4, &req.contact_channel)
            .map_err(xlsx_err("contact channel"))?;
        worksheet
            .write_string(r, 5, req.district.as_deref().unwrap_or(""))
            .map_err(xlsx_err("district"))?;
        worksheet
            .write_number(r, 6, req.district_surcharge as f64)
            .map_err(xlsx_err("district surcharge"))?;
        worksheet
            .write_string(r, 7, &req.property_type)
            .map_err(xlsx_err("property type"))?;
        worksheet
            .write_string(r, 8, &req.cleaning_type)
            .map_err(xlsx_err("cleaning type"))?;
        worksheet
            .write_number(r, 9, req.area)
            .map_err(xlsx_err("area"))?;
        worksheet
            .write_number(r, 10, req.bathroom_count as f64)
            .map_err(xlsx_err("bathrooms"))?;
        worksheet
            .write_string(r, 11, if req.has_window_cleaning { "да" } else { "нет" })
            .map_err(xlsx_err("windows"))?;
        worksheet
            .write_string(r, 12, req.addons.join(", "))
            .map_err(xlsx_err("addons"))?;
        worksheet
            .write_string(r, 13, DirtLevel::parse_or_default(&req.dirt_level).label())
            .map_err(xlsx_err("dirt level"))?;
        worksheet
            .write_number(r, 14, req.price_min as f64)
            .map_err(xlsx_err("price min"))?;
        worksheet
            .write_number(r, 15, req.price_max as f64)
            .map_err(xlsx_err("price max"))?;
        worksheet
            .write_string(r, 16, &req.status)
            .map_err(xlsx_err("status"))?;
        worksheet
            .write_string(r, 17, req.executor_name.as_deref().unwrap_or(""))
            .map_err(xlsx_err("executor"))?;
        worksheet
            .write_string(r, 18, format_timestamp(req.updated_at))
            .map_err(xlsx_err("updated"))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn export_requests_xlsx(rows: &[RequestRow], now: i64) -> ResultResp {
    let buffer = build_requests_workbook(rows)?;
    let date = chrono::DateTime::from_timestamp(now, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "export".to_string());

    xlsx_response(buffer, &format!("requests_{date}.xlsx"))
}
