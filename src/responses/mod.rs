pub mod errors;
pub mod html;
pub mod redirect;
pub mod xlsx;

pub use errors::{html_error_response, ResultResp};

pub use html::{html_response, html_response_with_status, text_response};
pub use redirect::{redirect, redirect_with_cookie};
pub use xlsx::xlsx_response;
