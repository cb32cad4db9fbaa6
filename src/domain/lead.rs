// src/domain/lead.rs

/// How the customer prefers to be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactChannel {
    Phone,
    Whatsapp,
    Telegram,
}

impl ContactChannel {
    pub const ALL: [ContactChannel; 3] = [
        ContactChannel::Phone,
        ContactChannel::Whatsapp,
        ContactChannel::Telegram,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactChannel::Phone => "phone",
            ContactChannel::Whatsapp => "whatsapp",
            ContactChannel::Telegram => "telegram",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactChannel::Phone => "Звонок",
            ContactChannel::Whatsapp => "WhatsApp",
            ContactChannel::Telegram => "Telegram",
        }
    }

    pub fn parse_or_default(key: &str) -> Self {
        match key.trim() {
            "whatsapp" => ContactChannel::Whatsapp,
            "telegram" => ContactChannel::Telegram,
            _ => ContactChannel::Phone,
        }
    }
}

/// Lifecycle of a request in the back-office.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    New,
    InProgress,
    Done,
    Cancelled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::New,
        RequestStatus::InProgress,
        RequestStatus::Done,
        RequestStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::New => "new",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Done => "done",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::New => "Новая",
            RequestStatus::InProgress => "В работе",
            RequestStatus::Done => "Выполнена",
            RequestStatus::Cancelled => "Отменена",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key.trim() {
            "new" => Some(RequestStatus::New),
            "in_progress" => Some(RequestStatus::InProgress),
            "done" => Some(RequestStatus::Done),
            "cancelled" => Some(RequestStatus::Cancelled),
            _ => None,
        }
    }
}

pub const NAME_MAX_CHARS: usize = 100;
pub const COMMENT_MAX_CHARS: usize = 1000;

/// Normalizes a Kazakhstani mobile number to 11 digits (`77XXXXXXXXX`).
///
/// Accepts `+7 777 123 45 67`, `8 (777) 123-45-67` and `7771234567`.
/// Returns `None` for anything that is not a `+7 7xx` mobile number.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 && digits.starts_with('7') {
        digits.insert(0, '7');
    }
    if digits.len() == 11 && digits.starts_with('8') {
        digits.replace_range(0..1, "7");
    }

    if digits.len() == 11 && digits.starts_with("77") {
        Some(digits)
    } else {
        None
    }
}

/// `77771234567` -> `+7 (777) 123-45-67`. Other input is returned unchanged.
pub fn format_phone(normalized: &str) -> String {
    if normalized.len() != 11 || !normalized.chars().all(|c| c.is_ascii_digit()) {
        return normalized.to_string();
    }
    format!(
        "+7 ({}) {}-{}-{}",
        &normalized[1..4],
        &normalized[4..7],
        &normalized[7..9],
        &normalized[9..11]
    )
}

/// Trims, strips angle brackets and caps the length in characters.
pub fn sanitize_text(raw: &str, max_chars: usize) -> String {
    raw.chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect::<String>()
        .trim()
        .chars()
        .take(max_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_phone_accepts_common_formats() {
        assert_eq!(
            normalize_phone("+7 777 123 45 67").as_deref(),
            Some("77771234567")
        );
        assert_eq!(
            normalize_phone("8 (701) 555-00-11").as_deref(),
            Some("77015550011")
        );
        assert_eq!(normalize_phone("7071234567").as_deref(), Some("77071234567"));
    }

    #[test]
    fn normalize_phone_rejects_non_mobile_and_wrong_length() {
        // Almaty landline
        assert_eq!(normalize_phone("+7 727 123 45 67"), None);
        assert_eq!(normalize_phone("12345"), None);
        assert_eq!(normalize_phone("+7 777 123 45 67 8"), None);
        assert_eq!(normalize_phone(""), None);
        // Russian mobile
        assert_eq!(normalize_phone("+7 912 123 45 67"), None);
    }

    #[test]
    fn format_phone_pretty_prints() {
        assert_eq!(format_phone("77771234567"), "+7 (777) 123-45-67");
        assert_eq!(format_phone("123"), "123");
    }

    #[test]
    fn sanitize_strips_angle_brackets_and_trims() {
        assert_eq!(
            sanitize_text("  <script>alert(1)</script> Айгуль ", 100),
            "scriptalert(1)/script Айгуль"
        );
        assert_eq!(sanitize_text("Алия", 2), "Ал");
        assert_eq!(sanitize_text("<>", 10), "");
    }

    #[test]
    fn status_round_trips_through_key() {
        for s in RequestStatus::ALL {
            assert_eq!(RequestStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(RequestStatus::parse("archived"), None);
    }

    #[test]
    fn contact_channel_defaults_to_phone() {
        assert_eq!(ContactChannel::parse_or_default("telegram"), ContactChannel::Telegram);
        assert_eq!(ContactChannel::parse_or_default("pigeon"), ContactChannel::Phone);
    }
}
