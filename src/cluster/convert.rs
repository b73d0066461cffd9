//! Compose service to Kubernetes object conversion

use super::resources::{
    Container, ContainerPort, Labels, ObjectMeta, PodSpec, PodTemplateSpec,
    ReplicationController, ReplicationControllerSpec, RestartPolicy, Service, ServicePort,
    ServiceSpec,
};
use crate::compose::{ComposeConfig, PortConfig, ServiceConfig};
use crate::error::{KuberError, Result};

/// Label key linking a replication controller, its pods and its service
pub const SERVICE_LABEL: &str = "service";

/// The pair of objects generated for one compose service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterResources {
    /// Compose service name
    pub name: String,
    pub controller: ReplicationController,
    pub service: Service,
}

/// Labels and selector for the service called `name`
pub fn labels_for(name: &str) -> Labels {
    [(SERVICE_LABEL.to_string(), name.to_string())].into()
}

/// Map a compose restart policy onto a pod restart policy.
///
/// Matching is exact: `always` is accepted, `Always` is not.
pub fn restart_policy(service: &str, restart: Option<&str>) -> Result<RestartPolicy> {
    match restart.unwrap_or_default() {
        "" | "always" => Ok(RestartPolicy::Always),
        "no" => Ok(RestartPolicy::Never),
        "on-failure" => Ok(RestartPolicy::OnFailure),
        other => Err(KuberError::UnknownRestartPolicy {
            service: service.to_string(),
            policy: other.to_string(),
        }),
    }
}

/// Container port number of a compose port entry
pub fn port_number(service: &str, port: &PortConfig) -> Result<i32> {
    let invalid = || KuberError::InvalidPort {
        service: service.to_string(),
        port: port.to_string(),
    };

    match port {
        PortConfig::Number(n) => i32::try_from(*n).map_err(|_| invalid()),
        PortConfig::Short(s) => s.parse::<i32>().map_err(|_| invalid()),
        PortConfig::Long(long) => i32::try_from(long.target).map_err(|_| invalid()),
    }
}

/// Build the replication controller and service for one compose service
pub fn convert_service(name: &str, config: &ServiceConfig) -> Result<ClusterResources> {
    let ports = config
        .ports
        .iter()
        .flatten()
        .map(|p| port_number(name, p))
        .collect::<Result<Vec<i32>>>()?;

    let restart = restart_policy(name, config.restart.as_deref())?;

    if config.image.is_none() {
        tracing::warn!("Service {} has no image; the pod template will not have one", name);
    }

    let container = Container {
        name: name.to_string(),
        image: config.image.clone(),
        ports: ports
            .iter()
            .map(|&container_port| ContainerPort { container_port })
            .collect(),
    };

    let controller = ReplicationController::new(
        name,
        labels_for(name),
        ReplicationControllerSpec {
            replicas: 1,
            selector: labels_for(name),
            template: PodTemplateSpec {
                metadata: ObjectMeta {
                    name: None,
                    labels: labels_for(name),
                },
                spec: PodSpec {
                    containers: vec![container],
                    restart_policy: restart,
                },
            },
        },
    );

    let service = Service::new(
        name,
        labels_for(name),
        ServiceSpec {
            selector: labels_for(name),
            ports: ports.iter().map(|&port| ServicePort { port }).collect(),
        },
    );

    Ok(ClusterResources {
        name: name.to_string(),
        controller,
        service,
    })
}

/// Convert every service of a project, in name order.
///
/// Stops at the first service that cannot be converted, so callers never
/// see a partial result.
pub fn convert_project(config: &ComposeConfig) -> Result<Vec<ClusterResources>> {
    config
        .services
        .iter()
        .map(|(name, service)| convert_service(name, service))
        .collect()
}
