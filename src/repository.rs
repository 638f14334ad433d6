use std::sync::Arc;

use bytes::Bytes;
use reqwest::StatusCode;
use snafu::{ensure, ResultExt};
use url::Url;

use crate::client::{SimpleTransport, Transport, TransportResponse};
use crate::config::ServerConfig;
use crate::models::Repository;
use crate::{error, Result};

const REPOSITORY_API_ENDPOINT: &str = "service/rest/beta/repositories";

/// Manages repositories on a repository manager. The client holds no state of its
/// own beyond the transport; every call is a single request/response exchange.
#[derive(Clone, Debug)]
pub struct RepositoryClient {
    transport: Arc<dyn Transport>,
}

impl RepositoryClient {
    /// Create a client on top of an already configured transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a client talking to the server described by `config` over http
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let base: Url = config.url()?;
        let token = config.token()?;
        let transport = match config.timeout {
            Some(seconds) => SimpleTransport::with_timeout(
                base,
                token,
                std::time::Duration::from_secs(seconds),
            )?,
            None => SimpleTransport::new(base, token),
        };
        Ok(Self::new(Arc::new(transport)))
    }

    /// Create `repository` as a `format`/`repository_type` repository,
    /// e.g. `maven2`/`hosted`
    pub async fn create(
        &self,
        repository: &Repository,
        format: &str,
        repository_type: &str,
    ) -> Result<()> {
        let data = Self::encode(repository)?;
        debug!(target: "repository", "creating {}/{} repository '{}'", format, repository_type, repository.name);
        let response = self
            .transport
            .post(
                &format!("{REPOSITORY_API_ENDPOINT}/{format}/{repository_type}"),
                data,
            )
            .await?;
        trace!(target: "repository", "create: {:?}", response);
        ensure!(
            matches!(response.status, StatusCode::OK | StatusCode::CREATED),
            error::CreateRepositorySnafu {
                name: repository.name.as_str(),
                status: response.status,
                body: response.text(),
            }
        );
        Ok(())
    }

    /// Look up a repository by name. The server offers no lookup by name so the full
    /// list is fetched and searched; `Ok(None)` means the repository does not exist.
    pub async fn read(&self, name: &str) -> Result<Option<Repository>> {
        debug!(target: "repository", "reading repository '{}'", name);
        let response = self.transport.get(REPOSITORY_API_ENDPOINT, None).await?;
        trace!(target: "repository", "read: {:?}", response);
        ensure!(
            response.status == StatusCode::OK,
            error::ReadRepositorySnafu {
                name,
                status: response.status,
                body: response.text(),
            }
        );
        let repositories = Self::decode(&response)?;
        Ok(repositories.into_iter().find(|x| x.name == name))
    }

    /// Fetch every repository known to the server
    pub async fn list(&self) -> Result<Vec<Repository>> {
        debug!(target: "repository", "listing repositories");
        let response = self.transport.get(REPOSITORY_API_ENDPOINT, None).await?;
        trace!(target: "repository", "list: {:?}", response);
        ensure!(
            response.status == StatusCode::OK,
            error::ListRepositoriesSnafu {
                status: response.status,
                body: response.text(),
            }
        );
        Self::decode(&response)
    }

    /// Replace the configuration of the repository called `name`
    pub async fn update(
        &self,
        name: &str,
        repository: &Repository,
        format: &str,
        repository_type: &str,
    ) -> Result<()> {
        let data = Self::encode(repository)?;
        debug!(target: "repository", "updating {}/{} repository '{}'", format, repository_type, name);
        let response = self
            .transport
            .put(
                &format!("{REPOSITORY_API_ENDPOINT}/{format}/{repository_type}/{name}"),
                data,
            )
            .await?;
        trace!(target: "repository", "update: {:?}", response);
        ensure!(
            matches!(response.status, StatusCode::OK | StatusCode::NO_CONTENT),
            error::UpdateRepositorySnafu {
                name,
                status: response.status,
                body: response.text(),
            }
        );
        Ok(())
    }

    /// Delete the repository called `name` along with its content
    pub async fn delete(&self, name: &str) -> Result<()> {
        debug!(target: "repository", "deleting repository '{}'", name);
        let response = self
            .transport
            .delete(&format!("{REPOSITORY_API_ENDPOINT}/{name}"))
            .await?;
        trace!(target: "repository", "delete: {:?}", response);
        ensure!(
            matches!(response.status, StatusCode::OK | StatusCode::NO_CONTENT),
            error::DeleteRepositorySnafu {
                name,
                status: response.status,
                body: response.text(),
            }
        );
        Ok(())
    }

    fn encode(repository: &Repository) -> Result<Bytes> {
        let data = serde_json::to_vec(repository).context(error::SerializeSnafu)?;
        trace!(target: "repository", "REQUEST BODY: {}", String::from_utf8_lossy(&data));
        Ok(Bytes::from(data))
    }

    fn decode(response: &TransportResponse) -> Result<Vec<Repository>> {
        let repositories: Vec<Repository> =
            serde_json::from_slice(&response.body).context(error::DecodeSnafu)?;
        trace!(target: "repository", "decoded {} repositories", repositories.len());
        Ok(repositories)
    }
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::error::Error;
    use crate::models::{RepositoryBuilder, StorageBuilder, WritePolicy};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Recorded {
        method: &'static str,
        path: String,
        body: Option<serde_json::Value>,
    }

    /// Replays canned responses in order and records every request made
    #[derive(Debug, Default)]
    struct MockTransport {
        responses: Mutex<VecDeque<TransportResponse>>,
        requests: Mutex<Vec<Recorded>>,
    }

    impl MockTransport {
        fn replying(status: StatusCode, body: &str) -> Arc<Self> {
            let mock = Self::default();
            mock.responses
                .lock()
                .unwrap()
                .push_back(TransportResponse::new(status, body.to_string()));
            Arc::new(mock)
        }

        fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }

        fn record(
            &self,
            method: &'static str,
            path: &str,
            body: Option<Bytes>,
        ) -> Result<TransportResponse> {
            self.requests.lock().unwrap().push(Recorded {
                method,
                path: path.to_string(),
                body: body.map(|x| serde_json::from_slice(&x).unwrap()),
            });
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no response queued"))
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(
            &self,
            path: &str,
            _query: Option<&[(&str, &str)]>,
        ) -> Result<TransportResponse> {
            self.record("GET", path, None)
        }

        async fn post(&self, path: &str, body: Bytes) -> Result<TransportResponse> {
            self.record("POST", path, Some(body))
        }

        async fn put(&self, path: &str, body: Bytes) -> Result<TransportResponse> {
            self.record("PUT", path, Some(body))
        }

        async fn delete(&self, path: &str) -> Result<TransportResponse> {
            self.record("DELETE", path, None)
        }
    }

    fn releases() -> Repository {
        RepositoryBuilder::default()
            .name("releases")
            .format("maven2")
            .repository_type("hosted")
            .storage(
                StorageBuilder::default()
                    .blob_store_name("default")
                    .strict_content_type_validation(true)
                    .write_policy(WritePolicy::AllowOnce)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    const LISTING: &str = r#"[
        {"name": "maven-central", "format": "maven2", "type": "proxy", "online": true,
         "proxy": {"remoteUrl": "https://repo1.maven.org/maven2/", "contentMaxAge": -1, "metadataMaxAge": 1440}},
        {"name": "my-repo", "format": "raw", "type": "hosted", "online": true,
         "storage": {"blobStoreName": "default", "strictContentTypeValidation": false, "writePolicy": "ALLOW"}}
    ]"#;

    #[tokio::test]
    async fn test_create_posts_repository() {
        let transport = MockTransport::replying(StatusCode::CREATED, "");
        let client = RepositoryClient::new(transport.clone());
        client.create(&releases(), "maven2", "hosted").await.unwrap();
        assert_eq!(
            transport.requests(),
            vec![Recorded {
                method: "POST",
                path: "service/rest/beta/repositories/maven2/hosted".to_string(),
                body: Some(json!({
                    "format": "maven2",
                    "name": "releases",
                    "online": true,
                    "type": "hosted",
                    "storage": {
                        "blobStoreName": "default",
                        "strictContentTypeValidation": true,
                        "writePolicy": "allow_once"
                    }
                })),
            }]
        );
    }

    #[tokio::test]
    async fn test_create_accepts_ok() {
        let transport = MockTransport::replying(StatusCode::OK, "");
        let client = RepositoryClient::new(transport);
        assert!(client.create(&releases(), "maven2", "hosted").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_failure_carries_context() {
        let transport = MockTransport::replying(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        let client = RepositoryClient::new(transport);
        let err = client
            .create(&releases(), "maven2", "hosted")
            .await
            .unwrap_err();
        match &err {
            Error::CreateRepository { name, status, body } => {
                assert_eq!(name, "releases");
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("'releases'"));
        assert!(message.contains("500"));
    }

    #[tokio::test]
    async fn test_read_finds_repository() {
        let transport = MockTransport::replying(StatusCode::OK, LISTING);
        let client = RepositoryClient::new(transport.clone());
        let repository = client.read("my-repo").await.unwrap().unwrap();
        assert_eq!(repository.format, "raw");
        assert_eq!(
            repository.storage.unwrap().write_policy,
            Some(WritePolicy::Allow)
        );
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "service/rest/beta/repositories");
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let transport = MockTransport::replying(StatusCode::OK, LISTING);
        let client = RepositoryClient::new(transport);
        assert_eq!(client.read("snapshots").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_malformed_body() {
        let transport = MockTransport::replying(StatusCode::OK, "{\"name\": ");
        let client = RepositoryClient::new(transport);
        let err = client.read("my-repo").await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_read_wrong_shape() {
        let transport = MockTransport::replying(StatusCode::OK, r#"{"name": "my-repo"}"#);
        let client = RepositoryClient::new(transport);
        let err = client.read("my-repo").await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_read_unexpected_status() {
        let transport = MockTransport::replying(StatusCode::UNAUTHORIZED, "");
        let client = RepositoryClient::new(transport);
        let err = client.read("my-repo").await.unwrap_err();
        assert!(
            matches!(&err, Error::ReadRepository { name, status, .. } if name == "my-repo" && *status == StatusCode::UNAUTHORIZED),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn test_list_returns_everything() {
        let transport = MockTransport::replying(StatusCode::OK, LISTING);
        let client = RepositoryClient::new(transport);
        let names: Vec<_> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|x| x.name)
            .collect();
        assert_eq!(names, vec!["maven-central", "my-repo"]);
    }

    #[tokio::test]
    async fn test_update_puts_to_named_path() {
        let transport = MockTransport::replying(StatusCode::NO_CONTENT, "");
        let client = RepositoryClient::new(transport.clone());
        let mut repository = releases();
        repository.online = false;
        client
            .update("releases", &repository, "maven2", "hosted")
            .await
            .unwrap();
        let requests = transport.requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(
            requests[0].path,
            "service/rest/beta/repositories/maven2/hosted/releases"
        );
        assert_eq!(requests[0].body.as_ref().unwrap()["online"], json!(false));
    }

    #[tokio::test]
    async fn test_update_accepts_ok() {
        let transport = MockTransport::replying(StatusCode::OK, "");
        let client = RepositoryClient::new(transport);
        assert!(client
            .update("releases", &releases(), "maven2", "hosted")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let transport = MockTransport::replying(StatusCode::NOT_FOUND, "missing");
        let client = RepositoryClient::new(transport);
        let err = client
            .update("releases", &releases(), "maven2", "hosted")
            .await
            .unwrap_err();
        assert!(
            matches!(&err, Error::UpdateRepository { status, body, .. } if *status == StatusCode::NOT_FOUND && body == "missing"),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let transport = MockTransport::replying(StatusCode::OK, "");
        let client = RepositoryClient::new(transport.clone());
        client.delete("releases").await.unwrap();
        assert_eq!(
            transport.requests(),
            vec![Recorded {
                method: "DELETE",
                path: "service/rest/beta/repositories/releases".to_string(),
                body: None,
            }]
        );
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let transport = MockTransport::replying(StatusCode::NO_CONTENT, "");
        let client = RepositoryClient::new(transport);
        assert!(client.delete("releases").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_forbidden() {
        let transport = MockTransport::replying(StatusCode::FORBIDDEN, "");
        let client = RepositoryClient::new(transport);
        let err = client.delete("releases").await.unwrap_err();
        assert!(
            matches!(&err, Error::DeleteRepository { name, status, .. } if name == "releases" && *status == StatusCode::FORBIDDEN),
            "{err:?}"
        );
    }
}
