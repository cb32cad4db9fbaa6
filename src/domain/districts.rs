// src/domain/districts.rs

/// A city district with a flat travel surcharge in tenge.
#[derive(Debug, Clone, PartialEq)]
pub struct District {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub surcharge: i64,
}

/// Seed values for the `districts` table.
/// (name, slug, surcharge)
pub const DEFAULT_DISTRICTS: &[(&str, &str, i64)] = &[
    ("Алмалинский", "almaly", 0),
    ("Бостандыкский", "bostandyk", 0),
    ("Медеуский", "medeu", 1000),
    ("Ауэзовский", "auezov", 500),
    ("Жетысуский", "zhetysu", 1000),
    ("Турксибский", "turksib", 1500),
    ("Алатауский", "alatau", 2000),
    ("Наурызбайский", "nauryzbay", 2000),
];

/// Finds a district by display name or slug, ignoring case and surrounding
/// whitespace.
pub fn find_district<'a>(districts: &'a [District], key: &str) -> Option<&'a District> {
    let key = key.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    districts
        .iter()
        .find(|d| d.name.to_lowercase() == key || d.slug == key)
}

/// Surcharge for a district, `None` when the name is unknown.
pub fn district_surcharge(districts: &[District], key: &str) -> Option<i64> {
    find_district(districts, key).map(|d| d.surcharge)
}

/// The static seed table as `District` values (ids are positional).
pub fn default_districts() -> Vec<District> {
    DEFAULT_DISTRICTS
        .iter()
        .enumerate()
        .map(|(i, (name, slug, surcharge))| District {
            id: i as i64 + 1,
            name: name.to_string(),
            slug: slug.to_string(),
            surcharge: *surcharge,
        })
        .collect()
}

/// Lowercase ASCII slug: letters, digits and single dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
