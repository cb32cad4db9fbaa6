use crate::db::reviews::Review;
use maud::{html, Markup};

fn stars(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn review_list(reviews: &[Review]) -> Markup {
    html! {
        section id="reviews" {
            h2 { "Отзывы клиентов" }
            @if reviews.is_empty() {
                p { "Пока нет отзывов." }
            }
            div class="grid" {
                @for r in reviews {
                    article {
                        p { (r.body) }
                        footer {
                            strong { (r.author) } " " span aria-label=(format!("{} из 5", r.rating)) { (stars(r.rating)) }
                        }
                    }
                }
            }
        }
    }
}

pub fn review_form() -> Markup {
    html! {
        details {
            summary { "Оставить отзыв" }
            form method="post" action="/reviews" {
                label for="review-author" { "Имя" }
                input type="text" id="review-author" name="author" maxlength="100" required;
                label for="review-rating" { "Оценка" }
                select id="review-rating" name="rating" {
                    @for n in (1..=5).rev() {
                        option value=(n) selected[n == 5] { (n) }
                    }
                }
                label for="review-body" { "Отзыв" }
                textarea id="review-body" name="body" maxlength="1000" rows="3" required {}
                button type="submit" { "Отправить" }
            }
        }
    }
}
