use crate::templates::site_layout;
use maud::{html, Markup};

pub fn login_page(error: Option<&str>) -> Markup {
    site_layout(
        "Вход",
        "Вход в панель управления",
        false,
        html! {
            article style="max-width: 420px; margin: 2rem auto;" {
                h1 { "Панель управления" }
                @if let Some(err) = error {
                    p role="alert" { (err) }
                }
                form method="post" action="/login" {
                    label for="login" { "Логин" }
                    input type="text" id="login" name="login" autocomplete="username" required;
                    label for="password" { "Пароль" }
                    input type="password" id="password" name="password" autocomplete="current-password" required;
                    button type="submit" { "Войти" }
                }
            }
        },
    )
}
