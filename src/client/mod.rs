//! Cluster REST API client.
//!
//! Thin async wrapper over the storage cluster's REST endpoints: session
//! login, directory capacity aggregates, capacity-weighted file sampling,
//! and owner identity lookups. The report pipeline consumes the
//! [`SampleSource`] trait rather than the concrete client so tests can run
//! against an in-memory source.

use crate::error::ReportError;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

pub mod identity;

/// One capacity-weighted file sample: the file's id and full path.
#[derive(Debug, Clone, Deserialize)]
pub struct FileSample {
    pub id: String,
    pub name: String,
}

/// One identity associated with an owner auth id.
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub id_type: String,
    pub id_value: String,
}

/// Data calls the report pipeline needs from the cluster.
///
/// Each sample returned by `get_file_samples` represents an equal fraction
/// of the capacity under `path`; the upstream sampler does the weighting.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Total capacity in bytes consumed under `path`.
    async fn total_capacity(&self, path: &str) -> Result<u64, ReportError>;

    /// Draw `count` capacity-weighted samples under `path`.
    async fn get_file_samples(&self, path: &str, count: u64)
        -> Result<Vec<FileSample>, ReportError>;

    /// Raw owner auth id of a file.
    async fn get_file_owner(&self, file_id: &str) -> Result<String, ReportError>;

    /// All identities related to an owner auth id.
    async fn related_identities(&self, owner_id: &str) -> Result<Vec<Identity>, ReportError>;
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    bearer_token: String,
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    // The wire format carries the byte count as a decimal string.
    total_capacity: String,
}

#[derive(Debug, Deserialize)]
struct AttributesResponse {
    owner: String,
}

/// Authenticated HTTP client for one cluster.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl RestClient {
    /// Build a client for `https://<cluster>:<port>`. When
    /// `accept_invalid_certs` is set, TLS verification is skipped; clusters
    /// commonly run with self-signed certificates.
    pub fn new(cluster: &str, port: u16, accept_invalid_certs: bool) -> Result<Self, ReportError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self {
            http,
            base_url: format!("https://{}:{}", cluster, port),
            token: RwLock::new(None),
        })
    }

    /// Open a session and store the bearer token for subsequent calls.
    pub async fn login(&self, user: &str, password: &str) -> Result<(), ReportError> {
        let url = format!("{}/v1/session/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "username": user, "password": password }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ReportError::Unauthorized(format!(
                "login rejected for user {} ({})",
                user,
                response.status()
            )));
        }
        let body: LoginResponse = response.json().await?;
        *self.token.write() = Some(body.bearer_token);
        debug!(user, "session established");
        Ok(())
    }

    fn bearer(&self) -> Result<String, ReportError> {
        self.token
            .read()
            .clone()
            .ok_or_else(|| ReportError::Unauthorized("not logged in".to_string()))
    }

    async fn get_json<T>(&self, url: String) -> Result<T, ReportError>
    where
        T: serde::de::DeserializeOwned,
    {
        let token = self.bearer()?;
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            return Err(ReportError::RequestFailed(format!(
                "{} ({})",
                url,
                response.status()
            )));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SampleSource for RestClient {
    async fn total_capacity(&self, path: &str) -> Result<u64, ReportError> {
        let url = format!(
            "{}/v1/files/{}/aggregates/",
            self.base_url,
            encode_segment(path)
        );
        let body: AggregatesResponse = self.get_json(url).await?;
        body.total_capacity.parse().map_err(|_| {
            ReportError::RequestFailed(format!(
                "non-numeric total_capacity {:?}",
                body.total_capacity
            ))
        })
    }

    async fn get_file_samples(
        &self,
        path: &str,
        count: u64,
    ) -> Result<Vec<FileSample>, ReportError> {
        let url = format!(
            "{}/v1/files/{}/sample/?by-value=capacity&limit={}",
            self.base_url,
            encode_segment(path),
            count
        );
        debug!(path, count, "requesting file samples");
        self.get_json(url).await
    }

    async fn get_file_owner(&self, file_id: &str) -> Result<String, ReportError> {
        let url = format!(
            "{}/v1/files/{}/info/attributes",
            self.base_url,
            encode_segment(file_id)
        );
        let body: AttributesResponse = self.get_json(url).await?;
        Ok(body.owner)
    }

    async fn related_identities(&self, owner_id: &str) -> Result<Vec<Identity>, ReportError> {
        let url = format!(
            "{}/v1/auth/auth-ids/{}/related-identities/",
            self.base_url,
            encode_segment(owner_id)
        );
        self.get_json(url).await
    }
}

/// Percent-encode a file path or id for use as a single URL segment. The
/// cluster API embeds full paths in the URL, so `/` must be encoded too.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
