//! Askama Templates
//!
//! Template structs for rendering HTML pages.

use askama::Template;
use askama_web::WebTemplate;

/// Start page with both authorization links.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub web_url: String,
    pub app_url: String,
}

/// Error page.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
    pub detail: Option<String>,
}

/// Thank-you page shown once a pull has completed.
#[derive(Template, WebTemplate)]
#[template(path = "return.html")]
pub struct ReturnTemplate {
    pub retrieved: usize,
    pub failed: usize,
}
