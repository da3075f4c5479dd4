// Path: crates/client/src/http.rs
use crate::api::{ChallengeResponse, DonationReceipt, ScavengerApi, StatisticsResponse};
use async_trait::async_trait;
use reqwest::{Client, Method};
use scavenger_types::{config::ScavengerConfig, error::ApiError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// reqwest-backed [`ScavengerApi`].
#[derive(Clone)]
pub struct HttpScavengerClient {
    pub base: String,
    client: Client,
}

fn ascii_snippet(bytes: &[u8]) -> String {
    let s = String::from_utf8_lossy(bytes);
    let s = s.trim();
    let s: String = s.chars().take(160).collect();
    s.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Pulls the server's `message` out of an error body, falling back to the
/// raw text.
fn error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(m) }) if !m.is_empty() => m,
        _ => ascii_snippet(body),
    }
}

impl HttpScavengerClient {
    pub fn new(config: &ScavengerConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn call(&self, method: Method, path: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}{}", self.base, path);
        let mut request = self.client.request(method.clone(), &url);
        if method == Method::POST {
            request = request.json(&json!({}));
        }
        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(
                target: "client",
                "HTTP {} from {} {}: body='{}'",
                status.as_u16(),
                method,
                path,
                ascii_snippet(&body)
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.call(Method::GET, path).await?;
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Decode(format!("{} ({}): {}", path, e, ascii_snippet(&body))))
    }

    async fn post_json(&self, path: &str) -> Result<Value, ApiError> {
        let body = self.call(Method::POST, path).await?;
        // Some write endpoints answer 2xx with an empty body.
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Decode(format!("{} ({}): {}", path, e, ascii_snippet(&body))))
    }
}

#[async_trait]
impl ScavengerApi for HttpScavengerClient {
    async fn challenge(&self) -> Result<ChallengeResponse, ApiError> {
        self.get_json("/challenge").await
    }

    async fn statistics(&self, address: &str) -> Result<StatisticsResponse, ApiError> {
        self.get_json(&format!("/statistics/{}", address)).await
    }

    async fn terms_message(&self) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct Terms {
            message: Option<String>,
        }
        let terms: Terms = self.get_json("/TandC").await?;
        terms
            .message
            .ok_or_else(|| ApiError::Decode("/TandC response has no message".into()))
    }

    async fn register(
        &self,
        address: &str,
        signature: &str,
        public_key_hex: &str,
    ) -> Result<Value, ApiError> {
        self.post_json(&format!(
            "/register/{}/{}/{}",
            address, signature, public_key_hex
        ))
        .await
    }

    async fn donate_to(
        &self,
        recipient: &str,
        donor: &str,
        signature: &str,
    ) -> Result<DonationReceipt, ApiError> {
        let raw = self
            .post_json(&format!("/donate_to/{}/{}/{}", recipient, donor, signature))
            .await?;
        Ok(DonationReceipt::from_value(raw))
    }
}

impl std::fmt::Debug for HttpScavengerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpScavengerClient")
            .field("base", &self.base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            error_message(br#"{"message":"Address already registered"}"#),
            "Address already registered"
        );
        assert_eq!(error_message(b"Too many requests\n"), "Too many requests");
        assert_eq!(error_message(br#"{"message":""}"#), r#"{"message":""}"#);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let cfg = ScavengerConfig {
            api_base: "http://127.0.0.1:8080/".into(),
            ..Default::default()
        };
        let client = HttpScavengerClient::new(&cfg).unwrap();
        assert_eq!(client.base, "http://127.0.0.1:8080");
    }
}
