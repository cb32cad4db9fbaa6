use crate::db::executors::Executor;
use crate::db::requests::RequestRow;
use crate::db::reviews::Review;
use crate::domain::addons::find_addon;
use crate::domain::districts::District;
use crate::domain::lead::{format_phone, ContactChannel, RequestStatus};
use crate::domain::{CleaningType, DirtLevel, PriceTable, PropertyType};
use crate::templates::{format_price, format_timestamp, site_layout};
use maud::{html, Markup};

pub struct AdminVm {
    pub login: String,
    pub requests: Vec<RequestRow>,
    pub executors: Vec<Executor>,
    pub districts: Vec<District>,
    pub prices: PriceTable,
    pub reviews: Vec<Review>,
    pub month_count: i64,
    pub new_count: i64,
}

fn status_label(key: &str) -> &str {
    RequestStatus::parse(key).map(RequestStatus::label).unwrap_or(key)
}

fn cleaning_label(key: &str) -> &str {
    CleaningType::parse(key).map(CleaningType::label).unwrap_or(key)
}

/// Everything that moved the price besides area and cleaning type.
fn service_details(r: &RequestRow) -> String {
    let mut parts = vec![format!("санузлов: {}", r.bathroom_count)];
    if r.has_window_cleaning {
        parts.push("окна".to_string());
    }
    parts.extend(
        r.addons
            .iter()
            .map(|id| find_addon(id).map_or(id.as_str(), |a| a.label).to_string()),
    );
    parts.push(format!(
        "загрязнение: {}",
        DirtLevel::parse_or_default(&r.dirt_level).label()
    ));
    parts.join(", ")
}

fn requests_table(vm: &AdminVm) -> Markup {
    html! {
        section id="requests" {
            h2 { "Заявки" }
            @if vm.requests.is_empty() {
                p { "Заявок пока нет." }
            } @else {
                figure {
                    table class="striped" {
                        thead {
                            tr {
                                th { "№" }
                                th { "Создана" }
                                th { "Клиент" }
                                th { "Услуга" }
                                th { "Район" }
                                th { "Цена, ₸" }
                                th { "Статус" }
                                th { "Исполнитель" }
                            }
                        }
                        tbody {
                            @for r in &vm.requests {
                                tr {
                                    td { (r.id) }
                                    td {
                                        (format_timestamp(r.created_at))
                                        @if r.updated_at != r.created_at {
                                            br; small { "изм. " (format_timestamp(r.updated_at)) }
                                        }
                                    }
                                    td {
                                        (r.name) br;
                                        (format_phone(&r.phone)) br;
                                        small { (ContactChannel::parse_or_default(&r.contact_channel).label()) }
                                        @if let Some(c) = &r.comment {
                                            br; small { i { (c) } }
                                        }
                                    }
                                    td {
                                        (cleaning_label(&r.cleaning_type)) ", "
                                        (PropertyType::parse_or_default(&r.property_type).label()) ", "
                                        (r.area) " м²"
                                        br; small { (service_details(r)) }
                                    }
                                    td {
                                        (r.district.as_deref().unwrap_or("—"))
                                        @if r.district_surcharge > 0 {
                                            br; small { "+" (format_price(r.district_surcharge)) }
                                        }
                                    }
                                    td { (format_price(r.price_min)) "–" (format_price(r.price_max)) }
                                    td {
                                        form method="post" action=(format!("/admin/requests/{}/status", r.id)) {
                                            select name="status" aria-label="Статус" {
                                                @for s in RequestStatus::ALL {
                                                    option value=(s.as_str()) selected[s.as_str() == r.status] { (s.label()) }
                                                }
                                            }
                                            button type="submit" class="secondary" { "OK" }
                                        }
                                        small { (status_label(&r.status)) }
                                    }
                                    td {
                                        form method="post" action=(format!("/admin/requests/{}/assign", r.id)) {
                                            select name="executor_id" aria-label="Исполнитель" {
                                                option value="" selected[r.executor_id.is_none()] { "Не назначен" }
                                                @for e in &vm.executors {
                                                    option value=(e.id) selected[r.executor_id == Some(e.id)] {
                                                        (e.name)
                                                        @if !e.is_active { " (неактивен)" }
                                                    }
                                                }
                                            }
                                            button type="submit" class="secondary" { "OK" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn executors_section(executors: &[Executor]) -> Markup {
    html! {
        section id="executors" {
            h2 { "Исполнители" }
            table {
                tbody {
                    @for e in executors {
                        tr {
                            td { (e.name) br; small { "с " (format_timestamp(e.created_at)) } }
                            td { (format_phone(&e.phone)) }
                            td { @if e.is_active { "активен" } @else { "неактивен" } }
                            td {
                                form method="post" action=(format!("/admin/executors/{}/toggle", e.id)) {
                                    button type="submit" class="secondary outline" {
                                        @if e.is_active { "Отключить" } @else { "Включить" }
                                    }
                                }
                            }
                            td {
                                form method="post" action=(format!("/admin/executors/{}/delete", e.id)) {
                                    button type="submit" class="contrast outline" { "Удалить" }
                                }
                            }
                        }
                    }
                }
            }
            form method="post" action="/admin/executors" {
                fieldset role="group" {
                    input type="text" name="name" placeholder="Имя" required;
                    input type="tel" name="phone" placeholder="Телефон" required;
                    button type="submit" { "Добавить" }
                }
            }
        }
    }
}

fn districts_section(districts: &[District]) -> Markup {
    html! {
        section id="districts" {
            h2 { "Районы" }
            table {
                tbody {
                    @for d in districts {
                        tr {
                            td { (d.name) br; small { (d.slug) } }
                            td {
                                form method="post" action=(format!("/admin/districts/{}/surcharge", d.id)) {
                                    fieldset role="group" {
                                        input type="number" name="surcharge" min="0" step="100" value=(d.surcharge);
                                        button type="submit" class="secondary" { "Сохранить" }
                                    }
                                }
                            }
                            td {
                                form method="post" action=(format!("/admin/districts/{}/delete", d.id)) {
                                    button type="submit" class="contrast outline" { "Удалить" }
                                }
                            }
                        }
                    }
                }
            }
            form method="post" action="/admin/districts" {
                fieldset role="group" {
                    input type="text" name="name" placeholder="Название" required;
                    input type="text" name="slug" placeholder="slug" required;
                    input type="number" name="surcharge" min="0" step="100" value="0";
                    button type="submit" { "Добавить" }
                }
            }
        }
    }
}

fn prices_section(prices: &PriceTable) -> Markup {
    let number = |name: &str, value: f64, step: &str| {
        html! { input type="number" name=(name) id=(name) min="0" step=(step) value=(value) required; }
    };

    html! {
        section id="prices" {
            h2 { "Цены" }
            form method="post" action="/admin/prices" {
                div class="grid" {
                    @for ct in CleaningType::ALL {
                        label {
                            (ct.label()) ", ₸/м²"
                            (number(&format!("base_rate.{}", ct.as_str()), prices.base_rate(ct).unwrap_or(0.0), "1"))
                        }
                    }
                }
                div class="grid" {
                    label { "Санузел, от" (number("bathroom.min", prices.bathroom_surcharge.min, "100")) }
                    label { "Санузел, до" (number("bathroom.max", prices.bathroom_surcharge.max, "100")) }
                    label { "Окна, от" (number("window.min", prices.window_surcharge.min, "100")) }
                    label { "Окна, до" (number("window.max", prices.window_surcharge.max, "100")) }
                    label { "Коэф. загрязнения" (number("heavy_dirt_modifier", prices.heavy_dirt_modifier, "0.05")) }
                }
                button type="submit" { "Сохранить цены" }
            }
        }
    }
}

fn reviews_section(reviews: &[Review]) -> Markup {
    html! {
        section id="reviews" {
            h2 { "Отзывы" }
            table {
                tbody {
                    @for r in reviews {
                        tr {
                            td { (format_timestamp(r.created_at)) }
                            td { strong { (r.author) } " · " (r.rating) "/5" br; (r.body) }
                            td {
                                @if r.approved {
                                    "опубликован"
                                } @else {
                                    form method="post" action=(format!("/admin/reviews/{}/approve", r.id)) {
                                        button type="submit" class="secondary" { "Опубликовать" }
                                    }
                                }
                            }
                            td {
                                form method="post" action=(format!("/admin/reviews/{}/delete", r.id)) {
                                    button type="submit" class="contrast outline" { "Удалить" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn admin_page(vm: &AdminVm) -> Markup {
    let content = html! {
        h1 { "Панель управления" }
        p { small { "Вы вошли как " (vm.login) } }

        div class="grid" {
            article { header { "Заявок в этом месяце" } h2 { (vm.month_count) } }
            article { header { "Новых заявок" } h2 { (vm.new_count) } }
            article {
                header { "Выгрузка" }
                a href="/admin/requests/export" role="button" { "Скачать XLSX" }
            }
        }

        (requests_table(vm))
        (executors_section(&vm.executors))
        (districts_section(&vm.districts))
        (prices_section(&vm.prices))
        (reviews_section(&vm.reviews))
    };

    site_layout("Панель управления", "Заявки и настройки", true, content)
}
