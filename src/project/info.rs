//! Container listing returned by `ps`

use serde::{Deserialize, Serialize};

/// One container of the project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Service", default)]
    pub service: String,
    #[serde(rename = "Command", default)]
    pub command: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Ports", default)]
    pub ports: String,
}

impl ContainerInfo {
    /// Whether the container is running
    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

/// Containers of a project, as listed by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoSet(pub Vec<ContainerInfo>);

impl InfoSet {
    /// Parse `ps --format json` output: either one array or one object per line
    pub fn from_json(output: &str) -> serde_json::Result<Self> {
        let output = output.trim();
        if output.starts_with('[') {
            return serde_json::from_str(output).map(InfoSet);
        }

        output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<ContainerInfo>)
            .collect::<serde_json::Result<Vec<_>>>()
            .map(InfoSet)
    }

    /// Containers that are not running
    pub fn stopped(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|c| !c.is_running())
            .map(|c| c.name.clone())
            .collect()
    }

    /// Render as a table, or as bare ids when `quiet`
    pub fn render(&self, quiet: bool) -> String {
        if quiet {
            return self.0.iter().map(|c| format!("{}\n", c.id)).collect();
        }

        let mut out = format!("{:<30} {:<30} {:<12} {}\n", "Name", "Command", "State", "Ports");
        for c in &self.0 {
            out.push_str(&format!(
                "{:<30} {:<30} {:<12} {}\n",
                c.name,
                truncate(&c.command, 30),
                c.state,
                c.ports
            ));
        }
        out
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max - 3).collect();
        t.push_str("...");
        t
    }
}
