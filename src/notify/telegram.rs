// src/notify/telegram.rs

use super::{LeadNotification, Notifier, NotifyError};
use crate::config::TelegramConfig;
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

pub struct TelegramNotifier {
    api_base: String,
    bot_token: String,
    chat_id: String,
    client: Client,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    disable_web_page_preview: bool,
}

impl TelegramNotifier {
    pub fn new(cfg: &TelegramConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| NotifyError::RequestFailed(format!("build client: {e}")))?;

        Ok(Self {
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            bot_token: cfg.bot_token.trim().to_string(),
            chat_id: cfg.chat_id.trim().to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

impl Notifier for TelegramNotifier {
    fn notify_lead(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text: lead.render(),
            disable_web_page_preview: true,
        };

        let resp = self
            .client
            .post(self.endpoint())
            .json(&payload)
            .send()
            // reqwest errors include the URL, which carries the token
            .map_err(|e| NotifyError::RequestFailed(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(NotifyError::ApiError(format!("{status} - {body}")));
        }

        Ok(())
    }
}
