//! Kubernetes core/v1 objects created by `kuber`
//!
//! Only the fields the conversion fills are modelled. Field names follow the
//! Kubernetes JSON wire format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Core API version of every object here
pub const API_VERSION: &str = "v1";

/// Label set used for metadata and selectors
pub type Labels = BTreeMap<String, String>;

/// Object metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Object name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Object labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: Labels,
}

/// Pod restart policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartPolicy {
    Always,
    OnFailure,
    Never,
}

/// Container port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    pub container_port: i32,
}

/// Container in a pod template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
}

/// Pod specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    pub containers: Vec<Container>,
    pub restart_policy: RestartPolicy,
}

/// Pod template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateSpec {
    pub metadata: ObjectMeta,
    pub spec: PodSpec,
}

/// Replication controller specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationControllerSpec {
    /// Desired number of pods
    pub replicas: i32,
    /// Pods this controller owns
    pub selector: Labels,
    /// Template for new pods
    pub template: PodTemplateSpec,
}

/// Replication controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationController {
    pub kind: String,
    pub api_version: String,
    pub metadata: ObjectMeta,
    pub spec: ReplicationControllerSpec,
}

impl ReplicationController {
    /// Create a replication controller named `name`
    pub fn new(name: &str, labels: Labels, spec: ReplicationControllerSpec) -> Self {
        Self {
            kind: "ReplicationController".to_string(),
            api_version: API_VERSION.to_string(),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                labels,
            },
            spec,
        }
    }

    /// Name from the metadata
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}

/// Service port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePort {
    pub port: i32,
}

/// Service specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub selector: Labels,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ServicePort>,
}

/// Service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub kind: String,
    pub api_version: String,
    pub metadata: ObjectMeta,
    pub spec: ServiceSpec,
}

impl Service {
    /// Create a service named `name`
    pub fn new(name: &str, labels: Labels, spec: ServiceSpec) -> Self {
        Self {
            kind: "Service".to_string(),
            api_version: API_VERSION.to_string(),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                labels,
            },
            spec,
        }
    }

    /// Name from the metadata
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}
