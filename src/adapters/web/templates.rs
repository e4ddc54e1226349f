//! HTML templates using Askama.

use askama::Template;

use crate::domain::market::Quote;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub quotes: &'a [Quote],
    pub cash: f64,
    pub total_value: f64,
    pub running: bool,
    pub interval_secs: f64,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
