// src/domain/service.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of property being cleaned. Scales the area cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Office,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Office,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Office => "office",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "Квартира",
            PropertyType::House => "Дом",
            PropertyType::Office => "Офис",
        }
    }

    /// Fixed multipliers, not admin-editable.
    pub fn multiplier(self) -> f64 {
        match self {
            PropertyType::Apartment => 1.0,
            PropertyType::House => 1.2,
            PropertyType::Office => 0.9,
        }
    }

    /// Unknown keys are treated as an apartment rather than rejected.
    pub fn parse_or_default(key: &str) -> Self {
        match key.trim() {
            "house" => PropertyType::House,
            "office" => PropertyType::Office,
            _ => PropertyType::Apartment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningType {
    Regular,
    Deep,
    PostRenovation,
    Eco,
}

impl CleaningType {
    pub const ALL: [CleaningType; 4] = [
        CleaningType::Regular,
        CleaningType::Deep,
        CleaningType::PostRenovation,
        CleaningType::Eco,
    ];

    /// Storage / form key.
    pub fn as_str(self) -> &'static str {
        match self {
            CleaningType::Regular => "regular",
            CleaningType::Deep => "deep",
            CleaningType::PostRenovation => "post_renovation",
            CleaningType::Eco => "eco",
        }
    }

    /// URL slug for the service landing pages.
    pub fn slug(self) -> &'static str {
        match self {
            CleaningType::Regular => "regular",
            CleaningType::Deep => "deep",
            CleaningType::PostRenovation => "post-renovation",
            CleaningType::Eco => "eco",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CleaningType::Regular => "Поддерживающая уборка",
            CleaningType::Deep => "Генеральная уборка",
            CleaningType::PostRenovation => "Уборка после ремонта",
            CleaningType::Eco => "Эко-уборка",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CleaningType::Regular => {
                "Влажная уборка всех комнат, кухни и санузлов. Подходит для регулярного ухода."
            }
            CleaningType::Deep => {
                "Тщательная уборка всех поверхностей, включая труднодоступные места и технику."
            }
            CleaningType::PostRenovation => {
                "Удаление строительной пыли, следов краски, клея и затирки после ремонта."
            }
            CleaningType::Eco => {
                "Уборка гипоаллергенными средствами, безопасными для детей и животных."
            }
        }
    }

    /// Accepts both the storage key and the URL slug.
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim() {
            "regular" => Some(CleaningType::Regular),
            "deep" => Some(CleaningType::Deep),
            "post_renovation" | "post-renovation" => Some(CleaningType::PostRenovation),
            "eco" => Some(CleaningType::Eco),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirtLevel {
    Normal,
    Heavy,
}

impl DirtLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DirtLevel::Normal => "normal",
            DirtLevel::Heavy => "heavy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DirtLevel::Normal => "Обычное",
            DirtLevel::Heavy => "Сильное",
        }
    }

    pub fn parse_or_default(key: &str) -> Self {
        if key.trim() == "heavy" {
            DirtLevel::Heavy
        } else {
            DirtLevel::Normal
        }
    }
}

/// Choices collected by the calculator wizard.
///
/// `area` and `bathroom_count` are bounded by the UI ([20, 250] and [1, 5]),
/// the quote engine accepts any value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfiguration {
    pub property_type: PropertyType,
    pub cleaning_type: CleaningType,
    pub area: f64,
    pub bathroom_count: u32,
    pub has_window_cleaning: bool,
    pub selected_addons: BTreeSet<String>,
    pub dirt_level: DirtLevel,
}

impl Default for ServiceConfiguration {
    fn default() -> Self {
        Self {
            property_type: PropertyType::Apartment,
            cleaning_type: CleaningType::Regular,
            area: 50.0,
            bathroom_count: 1,
            has_window_cleaning: false,
            selected_addons: BTreeSet::new(),
            dirt_level: DirtLevel::Normal,
        }
    }
}

pub const AREA_MIN: f64 = 20.0;
pub const AREA_MAX: f64 = 250.0;
pub const BATHROOMS_MIN: u32 = 1;
pub const BATHROOMS_MAX: u32 = 5;
