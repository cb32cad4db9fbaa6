pub mod addons;
pub mod districts;
pub mod lead;
pub mod price_table;
pub mod quote;
pub mod service;

pub use price_table::{PriceTable, SurchargeRange};
pub use quote::{compute_quote, Quote, QuoteError};
pub use service::{CleaningType, DirtLevel, PropertyType, ServiceConfiguration};
