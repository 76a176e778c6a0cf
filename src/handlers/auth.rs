use axum::{
    extract::State,
    Json,
};
use sha2::{Digest, Sha256};
use crate::errors::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, User, VerifyRequest,
};
use crate::services::OutgoingMail;
use crate::state::AppState;

// bcrypt only reads the first 72 bytes, so it is fed a fixed-length digest.
fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password_digest(password), cost)
}

fn verify_password(password: &str, password_hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password_digest(password), password_hash)
}

pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(form): AppJson<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!("Registration for {}", form.email);

    let otp = state.otp.issue(&form.phone);

    let user = User {
        name: form.name,
        email: form.email,
        phone: form.phone,
        password_hash: hash_password(&form.password, state.bcrypt_cost)?,
        verified: false,
    };
    state.store.save_user(&user).await?;

    // The user stays on file unverified if the email cannot be sent.
    state
        .mailer
        .send(OutgoingMail::otp(&state.mail_from, &user.email, &otp))
        .await?;

    Ok(Json(MessageResponse::new("✅ OTP sent to your email")))
}

pub async fn handle_verify(
    State(state): State<AppState>,
    AppJson(form): AppJson<VerifyRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !state.otp.matches(&form.phone, &form.otp) {
        return Err(AppError::InvalidOtp);
    }

    let users = state.store.find_users_by_phone(&form.phone).await?;
    if users.is_empty() {
        return Err(AppError::PhoneNotRegistered(form.phone));
    }

    // Phone numbers are not unique, so every matching user is verified.
    // A user re-registered under another phone since the lookup is skipped.
    let mut verified = 0;
    for user in &users {
        if state.store.set_verified(&user.email, &form.phone).await? {
            verified += 1;
        }
    }
    if verified == 0 {
        return Err(AppError::PhoneNotRegistered(form.phone));
    }
    tracing::info!("Verified {} user(s) for phone {}", verified, form.phone);

    Ok(Json(MessageResponse::new("✅ Phone number verified")))
}

pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(form): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .store
        .get_user(&form.email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    if !verify_password(&form.password, &user.password_hash)? {
        return Err(AppError::IncorrectPassword);
    }
    if !user.verified {
        return Err(AppError::NotVerified);
    }

    tracing::info!("Login for {}", user.email);
    Ok(Json(LoginResponse {
        message: "✅ Login successful".to_string(),
        uid: user.email,
    }))
}
