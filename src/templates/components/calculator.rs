use crate::domain::addons::ADDONS;
use crate::domain::districts::District;
use crate::domain::lead::ContactChannel;
use crate::domain::service::{AREA_MAX, AREA_MIN, BATHROOMS_MAX, BATHROOMS_MIN};
use crate::domain::{CleaningType, PriceTable, PropertyType, Quote, ServiceConfiguration};
use crate::templates::components::quote_result;
use crate::templates::format_price;
use maud::{html, Markup};

/// Initial calculator state, e.g. pre-selected on a landing page.
#[derive(Debug, Clone, Default)]
pub struct CalculatorPrefill {
    pub service: ServiceConfiguration,
    pub district: Option<String>,
}

/// Wizard form. Every change re-posts the state to `/quote`; the submit
/// button posts the same fields plus contact details to `/leads`.
pub fn calculator_form(
    prefill: &CalculatorPrefill,
    table: &PriceTable,
    districts: &[District],
    initial_quote: Option<Quote>,
) -> Markup {
    let service = &prefill.service;

    html! {
        section id="calculator" {
            h2 { "Рассчитайте стоимость уборки" }
            form id="calculator-form" method="post" action="/leads" {
                fieldset {
                    legend { "1. Тип объекта" }
                    @for pt in PropertyType::ALL {
                        label {
                            input type="radio" name="property_type" value=(pt.as_str())
                                checked[service.property_type == pt];
                            " " (pt.label())
                        }
                    }
                }

                fieldset {
                    legend { "2. Вид уборки" }
                    @for ct in CleaningType::ALL {
                        label {
                            input type="radio" name="cleaning_type" value=(ct.as_str())
                                checked[service.cleaning_type == ct];
                            " " (ct.label())
                            @if let Some(rate) = table.base_rate(ct) {
                                small { " · от " (format_price(rate as i64)) " ₸/м²" }
                            }
                        }
                    }
                }

                fieldset {
                    legend { "3. Площадь и санузлы" }
                    label for="area" { "Площадь, м²" }
                    input type="number" id="area" name="area" min=(AREA_MIN) max=(AREA_MAX) step="1"
                        value=(service.area) required;

                    label for="bathrooms" { "Количество санузлов" }
                    input type="number" id="bathrooms" name="bathrooms" min=(BATHROOMS_MIN)
                        max=(BATHROOMS_MAX) value=(service.bathroom_count) required;
                }

                fieldset {
                    legend { "4. Дополнительно" }
                    label {
                        input type="checkbox" name="windows" checked[service.has_window_cleaning];
                        " Мытьё окон (от " (format_price(table.window_surcharge.min as i64)) " ₸)"
                    }
                    @for addon in ADDONS {
                        label {
                            input type="checkbox" name="addons" value=(addon.id)
                                checked[service.selected_addons.contains(addon.id)];
                            " " (addon.label) " (+" (format_price(addon.flat_price as i64)) " ₸)"
                        }
                    }
                }

                fieldset {
                    legend { "5. Степень загрязнения" }
                    label {
                        input type="radio" name="dirt_level" value="normal"
                            checked[service.dirt_level == crate::domain::DirtLevel::Normal];
                        " Обычное"
                    }
                    label {
                        input type="radio" name="dirt_level" value="heavy"
                            checked[service.dirt_level == crate::domain::DirtLevel::Heavy];
                        " Сильное"
                    }
                }

                div
                    id="quote-result"
                    hx-post="/quote"
                    hx-trigger="change from:#calculator-form, keyup delay:400ms from:#area"
                    hx-include="#calculator-form"
                    hx-swap="innerHTML"
                {
                    @if let Some(q) = initial_quote {
                        (quote_result(&q, None))
                    }
                }

                fieldset {
                    legend { "6. Контакты" }
                    label for="name" { "Имя" }
                    input type="text" id="name" name="name" maxlength="100" autocomplete="name" required;

                    label for="phone" { "Телефон" }
                    input type="tel" id="phone" name="phone" placeholder="+7 (7__) ___-__-__"
                        autocomplete="tel" required;

                    label for="contact_channel" { "Как с вами связаться" }
                    select id="contact_channel" name="contact_channel" {
                        @for ch in ContactChannel::ALL {
                            option value=(ch.as_str()) { (ch.label()) }
                        }
                    }

                    label for="district" { "Район" }
                    select id="district" name="district" {
                        option value="" { "Не указан" }
                        @for d in districts {
                            option value=(d.name) selected[prefill.district.as_deref() == Some(d.slug.as_str())] {
                                (d.name)
                                @if d.surcharge > 0 { " (+" (format_price(d.surcharge)) " ₸ выезд)" }
                            }
                        }
                    }

                    label for="comment" { "Комментарий" }
                    textarea id="comment" name="comment" maxlength="1000" rows="3" {}
                }

                button type="submit" { "Оставить заявку" }
            }
        }
    }
}
