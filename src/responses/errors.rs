use crate::errors::ServerError;
use crate::templates::pages::error_page;
use astra::{Body, Response, ResponseBuilder};
use tracing::{error, warn};

pub type ResultResp = Result<Response, ServerError>;

fn status_for(err: &ServerError) -> u16 {
    match err {
        ServerError::NotFound => 404,
        ServerError::BadRequest(_) => 400,
        ServerError::DbError(_) | ServerError::XlsxError(_) | ServerError::InternalError => 500,
    }
}

/// Convert a ServerError into a proper HTML error page.
/// Internal details are logged, not shown.
pub fn html_error_response(err: ServerError) -> Response {
    let status = status_for(&err);
    let message = match &err {
        ServerError::NotFound => "Страница не найдена".to_string(),
        ServerError::BadRequest(msg) => msg.clone(),
        _ => "Что-то пошло не так. Попробуйте ещё раз чуть позже.".to_string(),
    };

    if status >= 500 {
        error!(status, error = %err, "request failed");
    } else {
        warn!(status, error = %err, "request rejected");
    }

    let body = error_page(status, &message).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
