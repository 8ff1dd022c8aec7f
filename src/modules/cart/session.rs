use std::collections::HashMap;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tokio::sync::RwLock;

use bookshop_http::error::AppError;

use super::models::CartLine;

pub const SESSION_HEADER: &str = "x-session-id";

const MAX_SESSION_ID_LEN: usize = 128;

/// Per-session cart storage.
///
/// Each call replaces or reads the whole line list; there is no partial
/// update, so concurrent writers to one session are last-write-wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Lines stored for `session`, empty when nothing is stored
    async fn get(&self, session: &str) -> Vec<CartLine>;

    async fn set(&self, session: &str, lines: Vec<CartLine>);

    async fn remove(&self, session: &str);
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    carts: RwLock<HashMap<String, Vec<CartLine>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions holding a non-empty cart
    pub async fn session_count(&self) -> usize {
        self.carts.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session: &str) -> Vec<CartLine> {
        self.carts
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_default()
    }

    async fn set(&self, session: &str, lines: Vec<CartLine>) {
        let mut carts = self.carts.write().await;
        if lines.is_empty() {
            carts.remove(session);
        } else {
            carts.insert(session.to_string(), lines);
        }
    }

    async fn remove(&self, session: &str) {
        self.carts.write().await.remove(session);
    }
}

/// Session key taken from the `x-session-id` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let valid = (1..=MAX_SESSION_ID_LEN).contains(&raw.len())
            && raw.bytes().all(|byte| byte.is_ascii_graphic());
        if !valid {
            return Err(AppError::bad_request(format!(
                "{} must be 1 to {} visible ASCII characters",
                SESSION_HEADER, MAX_SESSION_ID_LEN
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or_else(|| AppError::bad_request(format!("missing {} header", SESSION_HEADER)))?;
        let raw = value
            .to_str()
            .map_err(|_| AppError::bad_request(format!("{} is not ASCII", SESSION_HEADER)))?;
        Self::parse(raw)
    }
}
