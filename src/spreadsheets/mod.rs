pub mod requests_xlsx;

pub use requests_xlsx::export_requests_xlsx;
