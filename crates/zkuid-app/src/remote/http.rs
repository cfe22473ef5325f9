use super::RemoteIdentityClient;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use zkuid_types::{
    ProofArtifactRef, ProofRequest, RegistrationRequest, RegistrationResult, UserRecord,
    VerificationReceipt, VerificationType, ZkuidError, ZkuidResult,
};

use crate::config::AppConfig;

/// JSON-over-HTTP client for the identity service.
#[derive(Clone)]
pub struct HttpIdentityClient {
    client: Client,
    base_url: String,
}

impl HttpIdentityClient {
    pub fn new(base_url: &str, timeout: Duration) -> ZkuidResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ZkuidError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> ZkuidResult<Self> {
        Self::new(&config.api.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ZkuidResult<T>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("HTTP POST: {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ZkuidError::Network(format!("POST {} failed: {}", path, e)))?;

        decode(path, response).await
    }

    /// `{base}/{path}/{segment}` with `segment` percent-encoded as a single
    /// path segment, so it can never reach another endpoint.
    fn segment_url(&self, path: &str, segment: &str) -> ZkuidResult<Url> {
        if matches!(segment, "." | "..") {
            return Err(ZkuidError::Validation(format!("malformed UID: {}", segment)));
        }

        let mut url = Url::parse(&self.endpoint(path))
            .map_err(|e| ZkuidError::Config(format!("Invalid API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ZkuidError::Config(format!("API base URL cannot carry a path: {}", self.base_url)))?
            .push(segment);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, url: Url) -> ZkuidResult<T> {
        debug!("HTTP GET: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ZkuidError::Network(format!("GET {} failed: {}", path, e)))?;

        decode(path, response).await
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> ZkuidResult<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        warn!("{} returned {}: {}", path, status, message);
        return Err(status_error(status, message));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ZkuidError::Network(format!("Failed to read {} response: {}", path, e)))?;

    serde_json::from_str(&body).map_err(|e| ZkuidError::Server {
        status: status.as_u16(),
        message: format!("malformed {} response: {}", path, e),
    })
}

fn status_error(status: StatusCode, message: String) -> ZkuidError {
    match status {
        StatusCode::BAD_REQUEST
        | StatusCode::NOT_FOUND
        | StatusCode::CONFLICT
        | StatusCode::UNPROCESSABLE_ENTITY => ZkuidError::Validation(message),
        _ => ZkuidError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pulls a human-readable message out of a JSON error body, if there is one.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[async_trait]
impl RemoteIdentityClient for HttpIdentityClient {
    async fn register(&self, request: &RegistrationRequest) -> ZkuidResult<RegistrationResult> {
        self.post("register", request).await
    }

    async fn generate_proof(
        &self,
        uid: &str,
        verification_type: VerificationType,
    ) -> ZkuidResult<ProofArtifactRef> {
        self.post("generateProof", &ProofRequest::new(uid, verification_type))
            .await
    }

    async fn verify_proof(
        &self,
        uid: &str,
        verification_type: VerificationType,
    ) -> ZkuidResult<VerificationReceipt> {
        self.post("verify", &ProofRequest::new(uid, verification_type))
            .await
    }

    async fn get_user_data(&self, uid: &str) -> ZkuidResult<UserRecord> {
        let url = self.segment_url("user", uid)?;
        self.get("user", url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{
        Method::{GET, POST},
        MockServer,
    };

    const UID: &str = "0xa9b0000000000000000000000000000000000f73";

    fn client_for(server: &MockServer) -> HttpIdentityClient {
        HttpIdentityClient::new(&server.url("/api/"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpIdentityClient::new("http://localhost:5000/api//", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.endpoint("verify"), "http://localhost:5000/api/verify");
    }

    #[tokio::test]
    async fn test_register() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/register")
                    .json_body_partial(r#"{"name":"Ada","age":30}"#);
                then.status(200).json_body(serde_json::json!({
                    "uid": UID,
                    "contentAddress": "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
                }));
            })
            .await;

        let request = RegistrationRequest::new("Ada", "ada@x.com", 30, "UK");
        let result = client_for(&server).register(&request).await.unwrap();

        assert_eq!(result.uid.to_hex(), UID);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_and_verify_bodies() {
        let server = MockServer::start_async().await;
        let generate = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/generateProof")
                    .json_body(serde_json::json!({"uid": UID, "type": "age"}));
                then.status(200).json_body(serde_json::json!({"proofId": "p-1"}));
            })
            .await;
        let verify = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/verify")
                    .json_body(serde_json::json!({"uid": UID, "type": "age"}));
                then.status(200)
                    .json_body(serde_json::json!({"verified": true, "txHash": "0x9abc"}));
            })
            .await;

        let client = client_for(&server);
        let artifact = client.generate_proof(UID, VerificationType::Age).await.unwrap();
        let receipt = client.verify_proof(UID, VerificationType::Age).await.unwrap();

        assert_eq!(artifact.proof_id, "p-1");
        assert!(receipt.verified);
        assert_eq!(receipt.tx_hash.unwrap().as_str(), "0x9abc");
        generate.assert_async().await;
        verify.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_user_data() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(format!("/api/user/{}", UID));
                then.status(200).json_body(serde_json::json!({
                    "uid": UID,
                    "proofHistory": [{
                        "id": "1",
                        "date": "2025-11-08",
                        "verificationType": "age",
                        "verified": true,
                        "txHash": "0x9abc"
                    }]
                }));
            })
            .await;

        let record = client_for(&server).get_user_data(UID).await.unwrap();
        assert_eq!(record.proof_history.len(), 1);
        assert_eq!(record.proof_history[0].verification_type, VerificationType::Age);
    }

    #[tokio::test]
    async fn test_validation_error_carries_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/register");
                then.status(422).json_body(serde_json::json!({"message": "email already registered"}));
            })
            .await;

        let request = RegistrationRequest::new("Ada", "ada@x.com", 30, "UK");
        let err = client_for(&server).register(&request).await.unwrap_err();
        assert_eq!(err, ZkuidError::Validation("email already registered".into()));
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/verify");
                then.status(500).body("boom");
            })
            .await;

        let err = client_for(&server)
            .verify_proof(UID, VerificationType::Kyc)
            .await
            .unwrap_err();
        assert!(matches!(err, ZkuidError::Server { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/verify");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = client_for(&server)
            .verify_proof(UID, VerificationType::Age)
            .await
            .unwrap_err();
        assert!(matches!(err, ZkuidError::Server { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = HttpIdentityClient::new("http://127.0.0.1:9/api", Duration::from_millis(500)).unwrap();
        let err = client.get_user_data(UID).await.unwrap_err();
        assert!(matches!(err, ZkuidError::Network(_)));
    }

    #[test]
    fn test_uid_is_a_single_path_segment() {
        let client = HttpIdentityClient::new("http://localhost:5000/api", Duration::from_secs(1)).unwrap();
        let url = client.segment_url("user", "../register?x=1#y").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/user/..%2Fregister%3Fx=1%23y");
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[tokio::test]
    async fn test_uid_cannot_reach_other_endpoints() {
        let server = MockServer::start_async().await;
        let register = server
            .mock_async(|when, then| {
                when.path("/api/register");
                then.status(200).json_body(serde_json::json!({"uid": "HIJACKED"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/api/user/");
                then.status(404).json_body(serde_json::json!({"message": "user not found"}));
            })
            .await;

        let client = client_for(&server);
        let err = client.get_user_data("../register").await.unwrap_err();

        assert_eq!(err, ZkuidError::Validation("user not found".into()));
        assert_eq!(register.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_dot_segment_uid_rejected_locally() {
        let client = HttpIdentityClient::new("http://127.0.0.1:9/api", Duration::from_millis(500)).unwrap();
        for uid in [".", ".."] {
            assert!(matches!(
                client.get_user_data(uid).await,
                Err(ZkuidError::Validation(_))
            ));
        }
    }
}
