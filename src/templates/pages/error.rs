use crate::templates::site_layout;
use maud::{html, Markup};

pub fn error_page(status: u16, message: &str) -> Markup {
    let title = match status {
        400 => "Некорректный запрос",
        401 => "Требуется вход",
        404 => "Страница не найдена",
        _ => "Ошибка сервера",
    };

    site_layout(
        title,
        title,
        false,
        html! {
            section {
                h1 { (status) " · " (title) }
                p { (message) }
                a href="/" { "На главную" }
            }
        },
    )
}
