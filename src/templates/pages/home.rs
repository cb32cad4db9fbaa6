use crate::db::reviews::Review;
use crate::domain::districts::District;
use crate::domain::{CleaningType, PriceTable, Quote};
use crate::templates::components::{
    calculator_form, review_form, review_list, CalculatorPrefill,
};
use crate::templates::{card, format_price, site_layout};
use maud::{html, Markup};

/// Everything a public page needs besides its heading.
pub struct HomeVm<'a> {
    pub prefill: CalculatorPrefill,
    pub prices: &'a PriceTable,
    pub districts: &'a [District],
    pub reviews: &'a [Review],
    pub initial_quote: Option<Quote>,
}

pub fn home_page(vm: &HomeVm<'_>) -> Markup {
    landing(
        "Уборка квартир и домов в Алматы",
        "Клининг в Алматы: рассчитайте стоимость уборки онлайн за минуту.",
        "Уборка квартир, домов и офисов в Алматы",
        "Посчитайте стоимость за минуту. Менеджер перезвонит и подтвердит время.",
        vm,
    )
}

pub fn service_page(cleaning_type: CleaningType, vm: &HomeVm<'_>) -> Markup {
    let title = format!("{} в Алматы", cleaning_type.label());
    landing(
        &title,
        cleaning_type.description(),
        &title,
        cleaning_type.description(),
        vm,
    )
}

pub fn district_page(district: &District, vm: &HomeVm<'_>) -> Markup {
    let title = format!("Уборка квартир: {}", district.name);
    let intro = if district.surcharge > 0 {
        format!(
            "Работаем по всему району. Выезд: +{} ₸ к стоимости уборки.",
            format_price(district.surcharge)
        )
    } else {
        "Работаем по всему району, выезд бесплатный.".to_string()
    };
    landing(&title, &intro, &title, &intro, vm)
}

fn landing(title: &str, description: &str, heading: &str, intro: &str, vm: &HomeVm<'_>) -> Markup {
    let content = html! {
        section class="hero" {
            h1 { (heading) }
            p { (intro) }
            a href="#calculator" role="button" { "Рассчитать стоимость" }
        }

        (calculator_form(&vm.prefill, vm.prices, vm.districts, vm.initial_quote))

        section id="services" {
            h2 { "Услуги" }
            div class="grid" {
                @for ct in CleaningType::ALL {
                    (card(ct.label(), html! {
                        p { (ct.description()) }
                        @if let Some(rate) = vm.prices.base_rate(ct) {
                            p { "от " (format_price(rate as i64)) " ₸ за м²" }
                        }
                        a href=(format!("/services/{}", ct.slug())) { "Подробнее" }
                    }))
                }
            }
        }

        section id="districts" {
            h2 { "Районы" }
            ul {
                @for d in vm.districts {
                    li {
                        a href=(format!("/districts/{}", d.slug)) { (d.name) }
                        @if d.surcharge > 0 {
                            " · выезд +" (format_price(d.surcharge)) " ₸"
                        } @else {
                            " · без доплаты"
                        }
                    }
                }
            }
        }

        (review_list(vm.reviews))
        (review_form())
    };

    site_layout(title, description, false, content)
}
