//! reqwest-backed transport (direct network access)

use crate::classify::ConnectivityFlag;
use crate::error::{ErrorBody, HttpError};
use crate::transport::Transport;
use crate::types::{HttpRequest, HttpResponse};
use async_trait::async_trait;
use log::{debug, warn};

/// Transport that performs real HTTP calls with reqwest
///
/// Also keeps the shared `ConnectivityFlag` current: a host name that cannot
/// be resolved marks the application offline, any response from a server
/// marks it online. A refused connection only means that server is down.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    connectivity: ConnectivityFlag,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new(), ConnectivityFlag::new())
    }

    /// Create a transport around an existing client and connectivity flag
    pub fn with_client(client: reqwest::Client, connectivity: ConnectivityFlag) -> Self {
        Self {
            client,
            connectivity,
        }
    }

    pub fn connectivity(&self) -> &ConnectivityFlag {
        &self.connectivity
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let HttpRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;

        let mut target = reqwest::Url::parse(&url)
            .map_err(|e| HttpError::invalid_request(method, &url, format!("invalid URL: {}", e)))?;
        if !query.is_empty() {
            target.query_pairs_mut().extend_pairs(query.iter());
        }

        debug!("HTTP {} {}", method, target);
        let mut builder = self.client.request(method.into(), target).headers(headers);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_connect() && is_name_resolution_failure(&e) {
                    self.connectivity.set_online(false);
                }
                warn!("HTTP {} {} failed: {}", method, url, e);
                return Err(HttpError::network(method, url, e.to_string()));
            }
        };
        self.connectivity.set_online(true);

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::network(method, &url, format!("failed to read body: {}", e)))?;

        if status.is_success() {
            Ok(HttpResponse::new(status.as_u16(), bytes.to_vec()))
        } else {
            debug!("HTTP {} {} -> {}", method, url, status);
            Err(HttpError::status(
                method,
                url,
                status.as_u16(),
                ErrorBody::from_bytes(&bytes),
            ))
        }
    }
}

/// Whether a connect error was caused by DNS resolution
fn is_name_resolution_failure(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(e) = current {
        if e.to_string().starts_with("dns error") {
            return true;
        }
        current = e.source();
    }
    false
}
