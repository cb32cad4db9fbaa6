use maud::{html, Markup, DOCTYPE};

pub fn site_layout(title: &str, description: &str, is_admin: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description);
                title { (title) " · Чистый Алматы" }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
                script src="https://unpkg.com/htmx.org@1.9.12" defer {}
            }
            body {
                header class="container" {
                    nav {
                        ul {
                            li { a href="/" { strong { "Чистый Алматы" } } }
                        }
                        ul {
                            @if is_admin {
                                li { a href="/admin" { "Заявки" } }
                                li { a href="/admin/requests/export" { "Экспорт" } }
                                li {
                                    form action="/logout" method="post" style="margin: 0;" {
                                        button type="submit" class="secondary outline" { "Выйти" }
                                    }
                                }
                            } @else {
                                li { a href="/#calculator" { "Калькулятор" } }
                                li { a href="/#services" { "Услуги" } }
                                li { a href="/#districts" { "Районы" } }
                                li { a href="/#reviews" { "Отзывы" } }
                            }
                        }
                    }
                }
                main class="container" {
                    (content)
                }
                footer class="container" {
                    small { "Клининг в Алматы · оплата исполнителю после уборки" }
                }
            }
        }
    }
}
