use crate::domain::Quote;
use crate::templates::format_price;
use maud::{html, Markup};

/// Partial swapped into `#quote-result`.
pub fn quote_result(quote: &Quote, district_surcharge: Option<i64>) -> Markup {
    html! {
        div class="quote" {
            p { "Примерная стоимость:" }
            h3 {
                (format_price(quote.price_min)) " – " (format_price(quote.price_max)) " ₸"
            }
            @if let Some(extra) = district_surcharge.filter(|s| *s > 0) {
                p { small { "+ " (format_price(extra)) " ₸ за выезд в район" } }
            }
            p { small { "Точную цену менеджер подтвердит после звонка." } }
        }
    }
}

pub fn quote_error(message: &str) -> Markup {
    html! {
        div class="quote quote-error" role="alert" {
            p { "Не удалось рассчитать стоимость: " (message) }
        }
    }
}
