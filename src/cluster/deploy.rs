//! Manifest output and best-effort submission

use super::client::{ClusterClient, DEFAULT_NAMESPACE};
use super::convert::ClusterResources;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Outcome of submitting a set of converted services
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeployReport {
    /// Objects the cluster accepted
    pub created: usize,
    /// Objects the cluster rejected
    pub failed: usize,
}

/// Write `<name>-rc.json` and `<name>-svc.json` for each service into `output_dir`
pub fn write_manifests(resources: &[ClusterResources], output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(resources.len() * 2);
    for r in resources {
        let rc_path = output_dir.join(format!("{}-rc.json", r.name));
        std::fs::write(&rc_path, serde_json::to_string_pretty(&r.controller)?)?;

        let svc_path = output_dir.join(format!("{}-svc.json", r.name));
        std::fs::write(&svc_path, serde_json::to_string_pretty(&r.service)?)?;

        written.push(rc_path);
        written.push(svc_path);
    }

    Ok(written)
}

/// Submit each replication controller, then its service.
///
/// Failures are logged and counted; the remaining objects are still sent.
pub async fn submit<C>(client: &C, resources: &[ClusterResources]) -> DeployReport
where
    C: ClusterClient + ?Sized,
{
    let mut report = DeployReport::default();

    for r in resources {
        match client
            .create_replication_controller(DEFAULT_NAMESPACE, &r.controller)
            .await
        {
            Ok(()) => {
                tracing::info!("Created replication controller {}", r.controller.name());
                report.created += 1;
            }
            Err(e) => {
                tracing::error!("Failed to create replication controller {}: {}", r.name, e);
                report.failed += 1;
            }
        }

        match client.create_service(DEFAULT_NAMESPACE, &r.service).await {
            Ok(()) => {
                tracing::info!("Created service {}", r.service.name());
                report.created += 1;
            }
            Err(e) => {
                tracing::error!("Failed to create service {}: {}", r.name, e);
                report.failed += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::convert::convert_project;
    use crate::cluster::resources::{ReplicationController, Service};
    use crate::compose::ComposeParser;
    use crate::error::KuberError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Records every call and rejects replication controllers named in `reject`
    #[derive(Default)]
    struct RecordingClient {
        calls: Mutex<Vec<String>>,
        reject: Vec<String>,
    }

    #[async_trait]
    impl ClusterClient for RecordingClient {
        async fn create_replication_controller(
            &self,
            namespace: &str,
            controller: &ReplicationController,
        ) -> Result<()> {
            let name = controller.name().to_string();
            self.calls.lock().unwrap().push(format!("rc/{}/{}", namespace, name));
            if self.reject.contains(&name) {
                return Err(KuberError::Cluster("already exists".to_string()));
            }
            Ok(())
        }

        async fn create_service(&self, namespace: &str, service: &Service) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("svc/{}/{}", namespace, service.name()));
            Ok(())
        }
    }

    fn project() -> Vec<ClusterResources> {
        let config = ComposeParser::parse_str(
            r#"
services:
  web:
    image: nginx
    ports: ["80"]
  db:
    image: postgres
    restart: "no"
"#,
        )
        .unwrap();
        convert_project(&config).unwrap()
    }

    #[tokio::test]
    async fn test_submit_order() {
        let client = RecordingClient::default();
        let report = submit(&client, &project()).await;

        assert_eq!(report, DeployReport { created: 4, failed: 0 });
        assert_eq!(
            *client.calls.lock().unwrap(),
            vec!["rc/default/db", "svc/default/db", "rc/default/web", "svc/default/web"]
        );
    }

    #[tokio::test]
    async fn test_submit_continues_after_failure() {
        let client = RecordingClient {
            reject: vec!["db".to_string()],
            ..Default::default()
        };
        let report = submit(&client, &project()).await;

        assert_eq!(report, DeployReport { created: 3, failed: 1 });
        assert_eq!(client.calls.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_write_manifests() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("k8s");

        let written = write_manifests(&project(), &out).unwrap();
        assert_eq!(written.len(), 4);

        let rc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("web-rc.json")).unwrap()).unwrap();
        assert_eq!(rc["kind"], "ReplicationController");
        assert_eq!(rc["metadata"]["name"], "web");

        let svc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("db-svc.json")).unwrap()).unwrap();
        assert_eq!(svc["kind"], "Service");
    }
}
