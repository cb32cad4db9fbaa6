pub mod admin;
pub mod error;
pub mod home;
pub mod lead;
pub mod login;

pub use admin::{admin_page, AdminVm};
pub use error::error_page;
pub use home::{district_page, home_page, service_page, HomeVm};
pub use lead::{lead_error_page, lead_success_page};
pub use login::login_page;
