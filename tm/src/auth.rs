//! User accounts
//!
//! A trivial credential lookup backed by the persistence gateway, not a
//! security system: passwords are stored as-is and compared for equality.
//! The core only needs the stable user id to namespace persisted state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::storage::{CURRENT_USER_KEY, Gateway, USERS_KEY};

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Errors from account operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(String),
}

fn load_users(gateway: &dyn Gateway) -> Result<Vec<User>, AuthError> {
    match gateway.get(USERS_KEY).map_err(|e| AuthError::Storage(e.to_string()))? {
        Some(raw) => serde_json::from_str(&raw).map_err(|e| AuthError::Storage(e.to_string())),
        None => Ok(Vec::new()),
    }
}

fn save_users(gateway: &mut dyn Gateway, users: &[User]) -> Result<(), AuthError> {
    let raw = serde_json::to_string(users).map_err(|e| AuthError::Storage(e.to_string()))?;
    gateway.set(USERS_KEY, &raw).map_err(|e| AuthError::Storage(e.to_string()))
}

fn set_current(gateway: &mut dyn Gateway, user: &User) -> Result<(), AuthError> {
    let raw = serde_json::to_string(user).map_err(|e| AuthError::Storage(e.to_string()))?;
    gateway
        .set(CURRENT_USER_KEY, &raw)
        .map_err(|e| AuthError::Storage(e.to_string()))
}

/// Register a new account and log it in.
///
/// Fails when the username is already taken; no state is written in that
/// case.
pub fn register(
    gateway: &mut dyn Gateway,
    username: &str,
    password: &str,
    email: &str,
    now: DateTime<Utc>,
) -> Result<User, AuthError> {
    let mut users = load_users(gateway)?;
    if users.iter().any(|u| u.username == username) {
        debug!(username, "register: username taken");
        return Err(AuthError::UsernameTaken);
    }

    let user = User {
        id: now.timestamp_millis() as u64,
        username: username.to_string(),
        password: password.to_string(),
        email: email.to_string(),
        created_at: now,
    };
    users.push(user.clone());
    save_users(gateway, &users)?;
    set_current(gateway, &user)?;
    info!(username, id = user.id, "Registered user");
    Ok(user)
}

/// Log in with an exact username/password match
pub fn login(gateway: &mut dyn Gateway, username: &str, password: &str) -> Result<User, AuthError> {
    let users = load_users(gateway)?;
    let user = users
        .into_iter()
        .find(|u| u.username == username && u.password == password)
        .ok_or(AuthError::InvalidCredentials)?;
    set_current(gateway, &user)?;
    info!(username, id = user.id, "Logged in");
    Ok(user)
}

/// Clear the current-user pointer
pub fn logout(gateway: &mut dyn Gateway) -> Result<(), AuthError> {
    gateway
        .remove(CURRENT_USER_KEY)
        .map_err(|e| AuthError::Storage(e.to_string()))?;
    info!("Logged out");
    Ok(())
}

/// The currently logged-in user, if any
pub fn current_user(gateway: &dyn Gateway) -> Result<Option<User>, AuthError> {
    match gateway
        .get(CURRENT_USER_KEY)
        .map_err(|e| AuthError::Storage(e.to_string()))?
    {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AuthError::Storage(e.to_string())),
        None => Ok(None),
    }
}
