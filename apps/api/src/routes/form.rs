use axum::response::Html;

const FORM_PAGE: &str = include_str!("../../static/index.html");

/// GET /
/// Serves the single-page form that drives the generate action.
pub async fn form_handler() -> Html<&'static str> {
    Html(FORM_PAGE)
}
