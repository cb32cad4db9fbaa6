pub mod credentials;
pub mod sessions;

pub use credentials::AdminCredentials;
pub use sessions::AdminSession;
