use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};

use super::error::{PlatformError, PlatformResult};

/// HTTP client for the platform REST API.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct PlatformClient {
    endpoint: String,
    project_id: String,
    api_key: String,
    client: Client,
}

/// Error body shape returned by the platform on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: String,
}

impl PlatformClient {
    /// * `endpoint` - API root including the version, e.g. "https://cloud.appwrite.io/v1"
    pub fn new(
        endpoint: &str,
        project_id: &str,
        api_key: &str,
        timeout: Duration,
    ) -> PlatformResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build an authenticated request for `path` (relative to the endpoint).
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.endpoint, path))
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }

    /// Send the request and decode a JSON success body.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> PlatformResult<T> {
        let bytes = self.send(req).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send the request, ignoring any success body (e.g. 204 on delete).
    pub(crate) async fn execute_empty(&self, req: RequestBuilder) -> PlatformResult<()> {
        self.send(req).await.map(|_| ())
    }

    async fn send(&self, req: RequestBuilder) -> PlatformResult<bytes::Bytes> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let (kind, message) = match serde_json::from_slice::<ErrorBody>(&bytes) {
                Ok(body) if !body.message.is_empty() => (body.kind, body.message),
                _ => (
                    String::new(),
                    format!(
                        "Platform returned {}: {}",
                        status,
                        String::from_utf8_lossy(&bytes)
                    ),
                ),
            };
            return Err(PlatformError::Api {
                status: status.as_u16(),
                kind,
                message,
            });
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_is_normalised() {
        let client = PlatformClient::new(
            "http://localhost/v1/",
            "proj",
            "key",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost/v1");
    }
}
