// src/domain/addons.rs

/// A fixed-price optional extra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Addon {
    pub id: &'static str,
    pub label: &'static str,
    pub flat_price: f64,
}

/// Static catalog. Not admin-configurable.
pub const ADDONS: &[Addon] = &[
    Addon {
        id: "fridge",
        label: "Мойка холодильника внутри",
        flat_price: 3500.0,
    },
    Addon {
        id: "oven",
        label: "Мойка духовки",
        flat_price: 3000.0,
    },
    Addon {
        id: "sofa",
        label: "Химчистка дивана",
        flat_price: 12000.0,
    },
    Addon {
        id: "windows_full",
        label: "Мойка всех окон",
        flat_price: 8000.0,
    },
];

pub fn find_addon(id: &str) -> Option<&'static Addon> {
    ADDONS.iter().find(|a| a.id == id)
}

/// Flat price for an addon id, `None` for ids outside the catalog.
pub fn addon_price(id: &str) -> Option<f64> {
    find_addon(id).map(|a| a.flat_price)
}
