use maud::{html, Markup};

pub mod calculator;
pub mod quote;
pub mod reviews;

pub use calculator::{calculator_form, CalculatorPrefill};
pub use quote::{quote_error, quote_result};
pub use reviews::{review_form, review_list};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        article class="card" {
            header { h3 { (title) } }
            (body)
        }
    }
}
