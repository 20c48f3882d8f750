//! Login form, success page and registration echo

use axum::{
    extract::State,
    response::{Html, Redirect},
};
use std::path::Path;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    error::{AppError, Result},
    extractors::JsonOrForm,
    handlers::dashboard::escape_html,
    models::{LoginForm, RegistrationForm},
    AppState,
};

pub const LOGIN_PAGE: &str = "index.html";
pub const SUCCESS_PAGE: &str = "success.html";

async fn read_page(dir: &Path, file: &str, label: &str) -> Result<Html<String>> {
    match tokio::fs::read_to_string(dir.join(file)).await {
        Ok(contents) => Ok(Html(contents)),
        Err(e) => {
            warn!("Failed to read {}: {}", dir.join(file).display(), e);
            Err(AppError::PageUnavailable(label.to_string()))
        }
    }
}

pub async fn handle_login_page(State(state): State<AppState>) -> Result<Html<String>> {
    info!("GET /login - Serving login page");
    read_page(&state.templates_dir, LOGIN_PAGE, "Login page").await
}

pub async fn handle_success_page(State(state): State<AppState>) -> Result<Html<String>> {
    info!("GET /success.html - Serving success page");
    read_page(&state.templates_dir, SUCCESS_PAGE, "Success page").await
}

pub async fn handle_login(JsonOrForm(form): JsonOrForm<LoginForm>) -> Result<Redirect> {
    info!("POST /login - email: {:?}", form.email);

    if form.validate().is_err() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    Ok(Redirect::to(&format!("/{}", SUCCESS_PAGE)))
}

pub async fn handle_register(
    JsonOrForm(form): JsonOrForm<RegistrationForm>,
) -> Result<Html<String>> {
    info!(
        "POST /register - name: {:?}, email: {:?}, birthdate: {:?}",
        form.name, form.email, form.birthdate
    );

    if form.validate().is_err() {
        return Err(AppError::BadRequest(
            "Please fill in all the fields!".to_string(),
        ));
    }

    let name = form.name.unwrap_or_default();
    Ok(Html(render_welcome(&name)))
}

pub fn render_welcome(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Registration complete</title>
</head>
<body>
    <h1>Welcome, {}!</h1>
    <p>Your registration was received.</p>
    <a href="/">Back to the dashboard</a>
</body>
</html>
"#,
        escape_html(name)
    )
}
