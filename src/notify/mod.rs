mod telegram;

pub use telegram::TelegramNotifier;

use crate::domain::Quote;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("api error: {0}")]
    ApiError(String),
}

/// What the back-office needs to hear about a fresh lead.
#[derive(Debug, Clone)]
pub struct LeadNotification {
    pub lead_id: i64,
    pub name: String,
    pub phone: String,
    pub contact_channel: String,
    pub district: Option<String>,
    pub district_surcharge: i64,
    pub service_summary: String,
    pub quote: Quote,
    pub comment: Option<String>,
}

impl LeadNotification {
    /// Plain-text message body.
    pub fn render(&self) -> String {
        let mut text = format!(
            "Новая заявка #{}\n{}\nТелефон: {} ({})\n{}\nЦена: {} – {} ₸",
            self.lead_id,
            self.name,
            self.phone,
            self.contact_channel,
            self.service_summary,
            self.quote.price_min,
            self.quote.price_max,
        );
        if let Some(district) = &self.district {
            text.push_str(&format!("\nРайон: {district}"));
            if self.district_surcharge > 0 {
                text.push_str(&format!(" (+{} ₸ выезд)", self.district_surcharge));
            }
        }
        if let Some(comment) = &self.comment {
            text.push_str(&format!("\nКомментарий: {comment}"));
        }
        text
    }
}

/// Best-effort fan-out after a lead is stored.
pub trait Notifier: Send + Sync {
    fn notify_lead(&self, lead: &LeadNotification) -> Result<(), NotifyError>;
}

/// Used when no bot is configured.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_lead(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        info!(lead_id = lead.lead_id, "new lead (no telegram bot configured)");
        Ok(())
    }
}
