use axum::{
    routing::{get, post},
    Router,
};

use super::{
    dashboard::handle_root,
    echo::handle_api_test,
    pages::{handle_login, handle_login_page, handle_register, handle_success_page},
    status::{handle_api_database, handle_api_status},
};
use crate::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/api/status", get(handle_api_status))
        .route("/api/database", get(handle_api_database))
        .route("/api/test", post(handle_api_test))
        .route("/login", get(handle_login_page).post(handle_login))
        .route("/success.html", get(handle_success_page))
        .route("/register", post(handle_register))
}
