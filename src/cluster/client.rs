//! Kubernetes API client

use super::config::ClusterConfig;
use super::resources::{ReplicationController, Service};
use crate::error::{KuberError, Result};
use async_trait::async_trait;
use serde::Serialize;

/// Namespace every object is created in
pub const DEFAULT_NAMESPACE: &str = "default";

/// Operations `kuber` needs from a cluster
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Create a replication controller
    async fn create_replication_controller(
        &self,
        namespace: &str,
        controller: &ReplicationController,
    ) -> Result<()>;

    /// Create a service
    async fn create_service(&self, namespace: &str, service: &Service) -> Result<()>;
}

/// Cluster client speaking the Kubernetes REST API
pub struct HttpClusterClient {
    /// Cluster configuration
    config: ClusterConfig,
    /// HTTP client
    client: reqwest::Client,
}

impl HttpClusterClient {
    /// Create a new cluster client
    pub fn new(config: ClusterConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kuber/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    /// Collection URL for `resource` in `namespace`
    pub fn collection_url(&self, namespace: &str, resource: &str) -> String {
        format!(
            "{}/namespaces/{}/{}",
            self.config.api_base(),
            namespace,
            resource
        )
    }

    async fn post<T: Serialize + ?Sized>(&self, url: &str, object: &T) -> Result<()> {
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(object).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KuberError::Cluster(format!(
                "POST {} failed: {} {}",
                url,
                status,
                response.text().await.unwrap_or_default()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ClusterClient for HttpClusterClient {
    async fn create_replication_controller(
        &self,
        namespace: &str,
        controller: &ReplicationController,
    ) -> Result<()> {
        let url = self.collection_url(namespace, "replicationcontrollers");
        self.post(&url, controller).await
    }

    async fn create_service(&self, namespace: &str, service: &Service) -> Result<()> {
        let url = self.collection_url(namespace, "services");
        self.post(&url, service).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url() {
        let client = HttpClusterClient::new(ClusterConfig {
            server: "http://10.0.0.1:8080".to_string(),
            api_version: "v1".to_string(),
        })
        .unwrap();

        assert_eq!(
            client.collection_url(DEFAULT_NAMESPACE, "services"),
            "http://10.0.0.1:8080/api/v1/namespaces/default/services"
        );
    }
}
