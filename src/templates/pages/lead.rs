use crate::leads::SubmittedLead;
use crate::templates::components::quote_result;
use crate::templates::site_layout;
use maud::{html, Markup};

pub fn lead_success_page(lead: &SubmittedLead) -> Markup {
    site_layout(
        "Заявка принята",
        "Спасибо за заявку",
        false,
        html! {
            section {
                h1 { "Спасибо! Заявка №" (lead.id) " принята" }
                p { "Менеджер свяжется с вами в ближайшее время." }
                (quote_result(&lead.quote, Some(lead.district_surcharge)))
                a href="/" { "На главную" }
            }
        },
    )
}

/// Shown when a lead was rejected. The form data is not kept, so the
/// visitor goes back to the calculator.
pub fn lead_error_page(message: &str) -> Markup {
    site_layout(
        "Заявка не отправлена",
        "Ошибка при отправке заявки",
        false,
        html! {
            section role="alert" {
                h1 { "Не удалось отправить заявку" }
                p { (message) }
                a href="/#calculator" role="button" { "Попробовать снова" }
            }
        },
    )
}
