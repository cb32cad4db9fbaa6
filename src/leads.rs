// src/leads.rs
//
// Lead submission: validate contact details, price the configuration,
// persist, then notify. Persistence is the durability boundary; the
// notification is best-effort and never rolls the lead back.

use crate::db::connection::Database;
use crate::db::districts::list_districts;
use crate::db::requests::{insert_request, NewRequest};
use crate::domain::districts::find_district;
use crate::domain::lead::{
    format_phone, normalize_phone, sanitize_text, ContactChannel, COMMENT_MAX_CHARS,
    NAME_MAX_CHARS,
};
use crate::domain::{compute_quote, PriceTable, Quote, QuoteError, ServiceConfiguration};
use crate::forms::{service_config_from_form, FormData};
use crate::notify::{LeadNotification, Notifier};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid phone number")]
    InvalidPhone,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error("submission failed: {0}")]
    SubmissionFailed(String),
}

/// Raw contact fields plus the calculator state, as posted by the site.
#[derive(Debug, Clone)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub contact_channel: ContactChannel,
    pub district: String,
    pub comment: String,
    pub service: ServiceConfiguration,
}

impl LeadForm {
    pub fn from_form(form: &FormData) -> Result<Self, SubmissionError> {
        let service = service_config_from_form(form).map_err(|e| match e {
            crate::errors::ServerError::BadRequest(msg) => SubmissionError::Validation(msg),
            other => SubmissionError::Validation(other.to_string()),
        })?;

        Ok(Self {
            name: form.get("name").unwrap_or_default().to_string(),
            phone: form.get("phone").unwrap_or_default().to_string(),
            contact_channel: ContactChannel::parse_or_default(
                form.get("contact_channel").unwrap_or_default(),
            ),
            district: form.get("district").unwrap_or_default().to_string(),
            comment: form.get("comment").unwrap_or_default().to_string(),
            service,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedLead {
    pub id: i64,
    pub quote: Quote,
    pub district_surcharge: i64,
}

pub struct LeadSubmissionService {
    notifier: Box<dyn Notifier>,
}

impl LeadSubmissionService {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Validates and sanitizes the form into a storable request.
    /// The district surcharge comes from the current districts table.
    fn prepare(
        form: LeadForm,
        table: &PriceTable,
        districts: &[crate::domain::districts::District],
    ) -> Result<NewRequest, SubmissionError> {
        let phone = normalize_phone(&form.phone).ok_or(SubmissionError::InvalidPhone)?;

        let name = sanitize_text(&form.name, NAME_MAX_CHARS);
        if name.is_empty() {
            return Err(SubmissionError::Validation("укажите имя".into()));
        }

        if !(form.service.area > 0.0) {
            return Err(SubmissionError::Validation(
                "площадь должна быть больше нуля".into(),
            ));
        }

        let quote = compute_quote(&form.service, table)?;

        let district_input = sanitize_text(&form.district, NAME_MAX_CHARS);
        let (district, district_surcharge) = match find_district(districts, &district_input) {
            Some(d) => (Some(d.name.clone()), d.surcharge),
            None if district_input.is_empty() => (None, 0),
            None => (Some(district_input), 0),
        };

        let comment =
            Some(sanitize_text(&form.comment, COMMENT_MAX_CHARS)).filter(|c| !c.is_empty());

        Ok(NewRequest {
            name,
            phone,
            contact_channel: form.contact_channel,
            district,
            district_surcharge,
            comment,
            service: form.service,
            quote,
        })
    }

    /// Phase one persists the lead (failure aborts), phase two notifies
    /// (failure is logged only).
    pub fn submit(
        &self,
        db: &Database,
        form: LeadForm,
        table: &PriceTable,
        now: i64,
    ) -> Result<SubmittedLead, SubmissionError> {
        let districts = db
            .with_conn(|conn| list_districts(conn))
            .map_err(|e| SubmissionError::SubmissionFailed(e.to_string()))?;

        let request = Self::prepare(form, table, &districts)?;

        let id = db
            .with_conn(|conn| insert_request(conn, &request, now))
            .map_err(|e| SubmissionError::SubmissionFailed(e.to_string()))?;

        info!(
            lead_id = id,
            cleaning_type = request.service.cleaning_type.as_str(),
            price_min = request.quote.price_min,
            "lead stored"
        );

        let notification = LeadNotification {
            lead_id: id,
            name: request.name.clone(),
            phone: format_phone(&request.phone),
            contact_channel: request.contact_channel.label().to_string(),
            district: request.district.clone(),
            district_surcharge: request.district_surcharge,
            service_summary: service_summary(&request.service),
            quote: request.quote,
            comment: request.comment.clone(),
        };

        if let Err(e) = self.notifier.notify_lead(&notification) {
            warn!(lead_id = id, error = %e, "lead notification failed");
        }

        Ok(SubmittedLead {
            id,
            quote: request.quote,
            district_surcharge: request.district_surcharge,
        })
    }
}

/// One-line description used in notifications and the admin table.
pub fn service_summary(service: &ServiceConfiguration) -> String {
    let mut parts = vec![
        service.cleaning_type.label().to_string(),
        service.property_type.label().to_string(),
        format!("{} м²", service.area),
        format!("санузлов: {}", service.bathroom_count),
    ];
    if service.has_window_cleaning {
        parts.push("окна".to_string());
    }
    for id in &service.selected_addons {
        if let Some(addon) = crate::domain::addons::find_addon(id) {
            parts.push(addon.label.to_string());
        }
    }
    if service.dirt_level == crate::domain::DirtLevel::Heavy {
        parts.push("сильное загрязнение".to_string());
    }
    parts.join(", ")
}
