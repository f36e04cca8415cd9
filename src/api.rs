//! API client for communicating with the Lockbox vault server
//!
//! Every endpoint replies HTTP 200, so the helpers here never branch on the
//! transport status. Endpoints that return the status/message envelope are
//! interpreted through [`StatusResponse::into_result`]; the two retrieval
//! endpoints return their payload directly on success and an envelope only
//! on failure, which the untagged reply enums below disambiguate.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Credentials, NewSecret, StatusResponse, VaultEntry};

/// Why an API call produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server processed the request and said no. Carries the message
    /// meant for the user.
    #[error("{0}")]
    Rejected(String),
    /// The request never produced a decodable reply.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    fn network(e: gloo_net::Error) -> Self {
        ApiError::Transport(format!("Network error: {}", e))
    }

    fn malformed(e: gloo_net::Error) -> Self {
        ApiError::Transport(format!("Failed to parse response: {}", e))
    }
}

/// Fallback user messages for envelopes that arrive without one.
const LOGIN_FALLBACK: &str = "Invalid credentials";
const SETUP_FALLBACK: &str = "Failed to setup account";
const CREATE_FALLBACK: &str = "Failed to create vault entry";
const LIST_FALLBACK: &str = "Failed to retrieve vault entries.";
const REVEAL_FALLBACK: &str = "Failed to retrieve vault entry.";
const DELETE_FALLBACK: &str = "Failed to delete vault entry.";

/// POST a JSON body and decode a JSON reply
async fn post_json<T, R>(url: &str, body: &T) -> Result<R, ApiError>
where
    T: Serialize,
    R: DeserializeOwned,
{
    let req = Request::post(url)
        .header("Content-Type", "application/json")
        .json(body)
        .map_err(|e| ApiError::Transport(format!("Failed to serialize request: {}", e)))?;

    let resp = req.send().await.map_err(ApiError::network)?;

    resp.json::<R>().await.map_err(ApiError::malformed)
}

/// GET and decode a JSON reply
async fn get_json<R: DeserializeOwned>(url: &str) -> Result<R, ApiError> {
    let resp = Request::get(url).send().await.map_err(ApiError::network)?;

    resp.json::<R>().await.map_err(ApiError::malformed)
}

/// Sign in. The session cookie the server sets on success is http-only, so
/// the caller only learns whether the credentials were accepted.
pub async fn login(base_url: &str, credentials: &Credentials) -> Result<StatusResponse, ApiError> {
    let url = format!("{}/login", base_url);
    let reply: StatusResponse = post_json(&url, credentials).await?;
    reply.into_result(LOGIN_FALLBACK)
}

/// Create the initial account. The server refuses once an account exists.
pub async fn setup(base_url: &str, credentials: &Credentials) -> Result<StatusResponse, ApiError> {
    let url = format!("{}/setup", base_url);
    let reply: StatusResponse = post_json(&url, credentials).await?;
    reply.into_result(SETUP_FALLBACK)
}

/// Invalidate the server-side session.
pub async fn logout(base_url: &str) -> Result<StatusResponse, ApiError> {
    let url = format!("{}/logout", base_url);
    let resp = Request::post(&url).send().await.map_err(ApiError::network)?;
    resp.json::<StatusResponse>().await.map_err(ApiError::malformed)
}

/// Store a new secret in the vault.
pub async fn create_entry(base_url: &str, secret: &NewSecret) -> Result<StatusResponse, ApiError> {
    let url = format!("{}/create/vault/entry", base_url);
    let reply: StatusResponse = post_json(&url, secret).await?;
    reply.into_result(CREATE_FALLBACK)
}

/// Reply of the list endpoint: an entry array on success, an envelope on
/// failure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntriesReply {
    Entries(Vec<VaultEntry>),
    Status(StatusResponse),
}

/// List the vault entries. Values are not included.
pub async fn fetch_entries(base_url: &str) -> Result<Vec<VaultEntry>, ApiError> {
    let url = format!("{}/retrieve/vault/entries", base_url);
    match get_json::<EntriesReply>(&url).await? {
        EntriesReply::Entries(entries) => Ok(entries),
        EntriesReply::Status(reply) => Err(reply.into_rejection(LIST_FALLBACK)),
    }
}

/// Reply of the single-entry endpoint: the raw secret value on success, an
/// envelope on failure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValueReply {
    Status(StatusResponse),
    Value(String),
}

/// Fetch the secret value of one entry by its object id.
pub async fn reveal_entry(base_url: &str, id: &str) -> Result<String, ApiError> {
    let url = format!("{}/retrieve/vault/entries/{}", base_url, id);
    match get_json::<ValueReply>(&url).await? {
        ValueReply::Value(value) => Ok(value),
        ValueReply::Status(reply) => Err(reply.into_rejection(REVEAL_FALLBACK)),
    }
}

/// Delete one entry by its object id.
pub async fn delete_entry(base_url: &str, id: &str) -> Result<StatusResponse, ApiError> {
    let url = format!("{}/delete/{}", base_url, id);
    let resp = Request::delete(&url).send().await.map_err(ApiError::network)?;
    let reply: StatusResponse = resp.json().await.map_err(ApiError::malformed)?;
    reply.into_result(DELETE_FALLBACK)
}
