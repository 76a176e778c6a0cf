//! Test doubles and an in-process harness driving the router.

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::routes::build_router;
use crate::services::mailer::testing::RecordingMailer;
use crate::services::memory_store::MemoryStore;
use crate::services::Mailer;
use crate::state::AppState;

pub const VOTING_SECS: i64 = 172_800;
pub const MAX_BODY_SIZE: usize = 4096;
const BCRYPT_TEST_COST: u32 = 4;

pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        *self.0.lock().unwrap() += delta;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        self.advance(Duration::seconds(seconds));
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub clock: Arc<MutableClock>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let mailer = Arc::new(RecordingMailer::default());
        Self::build(mailer.clone(), mailer)
    }

    /// Harness whose outgoing mail goes to `mailer` instead of the recorder.
    pub fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        Self::build(Arc::new(RecordingMailer::default()), mailer)
    }

    fn build(recorder: Arc<RecordingMailer>, mailer: Arc<dyn Mailer>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(MutableClock::new(start));
        let state = AppState::new(
            store.clone(),
            mailer,
            clock.clone(),
            VOTING_SECS,
            "vote@example.com",
            BCRYPT_TEST_COST,
        );
        let router = build_router(state.clone(), MAX_BODY_SIZE);
        Self { state, store, mailer: recorder, clock, router }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // Extractor rejections answer in plain text.
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let payload = body.to_string();
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, payload.len())
            .body(Body::from(payload))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn register(&self, name: &str, email: &str, phone: &str, password: &str) -> (StatusCode, Value) {
        self.post(
            "/api/register",
            json!({ "name": name, "email": email, "phone": phone, "password": password }),
        )
        .await
    }

    pub async fn verify(&self, phone: &str, otp: &str) -> (StatusCode, Value) {
        self.post("/api/verify", json!({ "phone": phone, "otp": otp })).await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post("/api/login", json!({ "email": email, "password": password })).await
    }

    pub async fn vote(&self, uid: &str, candidate_id: &str) -> (StatusCode, Value) {
        self.post("/api/vote", json!({ "uid": uid, "candidate_id": candidate_id })).await
    }

    /// Registers and verifies a user with password `secret`.
    pub async fn register_verified(&self, name: &str, email: &str, phone: &str) {
        let (status, _) = self.register(name, email, phone, "secret").await;
        assert_eq!(status, StatusCode::OK);
        let otp = self.otp_for(email);
        let (status, _) = self.verify(phone, &otp).await;
        assert_eq!(status, StatusCode::OK);
    }

    /// The code from the latest OTP email sent to `email`.
    pub fn otp_for(&self, email: &str) -> String {
        let sent = self.mailer.sent.lock().unwrap();
        let mail = sent.iter().rev().find(|mail| mail.to == email).unwrap();
        mail.text.rsplit(' ').next().unwrap().to_string()
    }
}
