use std::fmt::Write;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use models::Settings;

use crate::{state::SharedState, Result};

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Landing page with the running version and a link to the source repository.
pub fn render_home(settings: &Settings) -> Result<String> {
    let version = escape_html(&settings.version);
    let repo = escape_html(&settings.git_repo);

    let mut html = String::new();
    writeln!(html, "<head>")?;
    writeln!(html, "    <title>DolarBot API - v{}</title>", version)?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(
        html,
        "    <a href=\"{}\">DolarBot API</a> - v<b>{}</b>",
        repo, version
    )?;
    writeln!(html, "</body>")?;

    Ok(html)
}

/// GET /
/// Failures are logged and answered with a bare 500, no detail is exposed
pub async fn get_home(State(state): State<SharedState>) -> Response {
    match render_home(&state.settings) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render home page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
