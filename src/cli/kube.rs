//! `kuber` and `kuberconfig` commands

use crate::cluster::{self, ClusterClient, ClusterConfig, DeployReport, HttpClusterClient};
use crate::compose::ComposeConfig;
use crate::error::Result;
use std::path::Path;

/// Store `host` as the cluster address in `path` and print the path
pub fn project_kuber_config(path: &Path, host: &str) -> Result<()> {
    ClusterConfig::save(path, host)?;
    println!("{}", path.display());
    Ok(())
}

/// Deploy every service to the cluster configured in `config_path`
pub async fn project_kuber(
    config: &ComposeConfig,
    output_dir: &Path,
    config_path: &Path,
) -> Result<DeployReport> {
    let cluster_config = ClusterConfig::load(config_path)?;
    tracing::info!("Deploying to {}", cluster_config.api_base());

    let client = HttpClusterClient::new(cluster_config)?;
    deploy(config, output_dir, &client).await
}

/// Convert all services, write their manifests, then submit them.
///
/// Nothing is written or submitted unless every service converts.
pub async fn deploy<C>(config: &ComposeConfig, output_dir: &Path, client: &C) -> Result<DeployReport>
where
    C: ClusterClient + ?Sized,
{
    let resources = cluster::convert_project(config)?;

    let written = cluster::write_manifests(&resources, output_dir)?;
    tracing::debug!("Wrote {} manifests to {}", written.len(), output_dir.display());

    let report = cluster::submit(client, &resources).await;
    println!(
        "{} objects created, {} failed",
        report.created, report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ReplicationController, Service};
    use crate::compose::ComposeParser;
    use crate::error::KuberError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    #[derive(Default)]
    struct CountingClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ClusterClient for CountingClient {
        async fn create_replication_controller(
            &self,
            _namespace: &str,
            _controller: &ReplicationController,
        ) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn create_service(&self, _namespace: &str, _service: &Service) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn config(yaml: &str) -> ComposeConfig {
        ComposeParser::parse_str(yaml).unwrap()
    }

    #[tokio::test]
    async fn test_deploy() {
        let temp = tempdir().unwrap();
        let client = CountingClient::default();

        let report = deploy(
            &config("services:\n  web:\n    image: nginx\n    ports: [\"80\"]\n"),
            temp.path(),
            &client,
        )
        .await
        .unwrap();

        assert_eq!(report, DeployReport { created: 2, failed: 0 });
        assert!(temp.path().join("web-rc.json").exists());
        assert!(temp.path().join("web-svc.json").exists());
    }

    #[tokio::test]
    async fn test_bad_restart_policy_submits_nothing() {
        let temp = tempdir().unwrap();
        let client = CountingClient::default();
        let yaml = r#"
services:
  a:
    image: alpine
  b:
    image: busybox
    restart: unless-stopped
"#;

        let err = deploy(&config(yaml), temp.path(), &client).await.unwrap_err();

        assert!(matches!(err, KuberError::UnknownRestartPolicy { ref service, .. } if service == "b"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert!(!temp.path().join("a-rc.json").exists());
    }

    #[tokio::test]
    async fn test_bad_port_submits_nothing() {
        let temp = tempdir().unwrap();
        let client = CountingClient::default();

        let err = deploy(
            &config("services:\n  web:\n    image: nginx\n    ports: [\"http\"]\n"),
            temp.path(),
            &client,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, KuberError::InvalidPort { .. }));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_kuber_config_writes_host() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(".kuberconfig");

        project_kuber_config(&path, "10.1.2.3:8080").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "10.1.2.3:8080\n");
    }

    #[tokio::test]
    async fn test_kuber_without_config_fails() {
        let temp = tempdir().unwrap();
        let err = project_kuber(
            &config("services:\n  web:\n    image: nginx\n"),
            temp.path(),
            &temp.path().join(".kuberconfig"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, KuberError::ClusterConfigRead { .. }));
    }
}
