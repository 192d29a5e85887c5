//! Telegram mini app page

use crate::AppState;
use axum::{extract::State, response::Html};

const TEMPLATE: &str = include_str!("../../assets/mini_app.html");
const USER_ID_PLACEHOLDER: &str = "{{AUTHORIZED_USER_ID}}";

pub async fn page(State(state): State<AppState>) -> Html<String> {
    Html(render(state.workouts.authorized_user().id().get()))
}

/// Inject the authorized id into the page script
pub fn render(authorized_user_id: i64) -> String {
    TEMPLATE.replace(USER_ID_PLACEHOLDER, &authorized_user_id.to_string())
}
