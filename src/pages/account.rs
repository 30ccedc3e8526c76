use serde::Deserialize;
use tracing::info;

use super::{Outcome, PageError, PageResult, View};
use crate::api::AlbumApi;
use crate::session::{Page, SessionState};
use shutterbox_api_structs::{LoginPayload, SignUpPayload};

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn register(api: &dyn AlbumApi, form: RegisterForm) -> PageResult {
    let payload = SignUpPayload {
        username: form.username,
        email: form.email,
        password: form.password,
    };
    api.sign_up(&payload)
        .await
        .map_err(PageError::api("Registration failed"))?;
    info!("Registered {}", payload.email);

    Ok(View::new(Page::Login)
        .notice("Account created. Please log in.")
        .into())
}

pub async fn login(api: &dyn AlbumApi, session: &mut SessionState, form: LoginForm) -> PageResult {
    let payload = LoginPayload {
        email: form.email,
        password: form.password,
    };
    let user = api
        .login(&payload)
        .await
        .map_err(PageError::api("Invalid credentials"))?;
    info!(user_id = user.user_id, "Logged in");

    session.user = Some(user);
    Ok(Outcome::Redirect(Page::Albums))
}

pub fn logout(session: &mut SessionState) -> PageResult {
    session.logout();
    Ok(Outcome::Redirect(Page::Login))
}
