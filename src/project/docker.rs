//! Project backend driving the `docker compose` CLI

use super::context::ProjectContext;
use super::info::InfoSet;
use super::options::{Build, Create, Delete, Down, ImageType, Up};
use super::ComposeProject;
use crate::error::{KuberError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::process::Stdio;
use tokio::process::Command;

/// Default docker executable
pub const DEFAULT_DOCKER: &str = "docker";

/// Compose project managed through `docker compose`
#[derive(Debug, Clone)]
pub struct DockerCompose {
    /// Docker executable
    program: String,
    /// Project being managed
    context: ProjectContext,
}

impl DockerCompose {
    /// Create a backend for `context` using the default docker executable
    pub fn new(context: ProjectContext) -> Self {
        Self {
            program: DEFAULT_DOCKER.to_string(),
            context,
        }
    }

    /// Use a different docker executable
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    /// Full argument list for `subcommand`: project and file selection first
    pub fn args<I>(&self, subcommand: &str, extra: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = vec![
            "compose".to_string(),
            "--project-name".to_string(),
            self.context.project_name.clone(),
        ];
        for file in &self.context.files {
            args.push("--file".to_string());
            args.push(file.display().to_string());
        }
        args.push(subcommand.to_string());
        args.extend(extra);
        args
    }

    fn command(&self, args: &[String]) -> Command {
        tracing::debug!("{} {}", self.program, args.join(" "));

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.context.working_dir)
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, e: std::io::Error) -> KuberError {
        KuberError::Project(format!("Failed to run {}: {}", self.program, e))
    }

    /// Run with inherited stdio and return the exit code
    async fn status(&self, args: Vec<String>) -> Result<Option<i32>> {
        let status = self
            .command(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        Ok(status.code())
    }

    /// Run with inherited stdio, failing on a non-zero exit
    async fn exec(&self, args: Vec<String>) -> Result<()> {
        let subcommand = subcommand_of(&args);
        match self.status(args).await? {
            Some(0) => Ok(()),
            Some(code) => Err(KuberError::Project(format!(
                "docker compose {} exited with status {}",
                subcommand, code
            ))),
            None => Err(KuberError::Project(format!(
                "docker compose {} was terminated by a signal",
                subcommand
            ))),
        }
    }

    /// Run and capture stdout, failing on a non-zero exit
    async fn capture(&self, args: Vec<String>) -> Result<String> {
        let subcommand = subcommand_of(&args);
        let output = self
            .command(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(KuberError::Project(format!(
                "docker compose {} failed: {}",
                subcommand,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// The compose subcommand in an argument list built by `args`
fn subcommand_of(args: &[String]) -> String {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--project-name" || arg == "--file" {
            iter.next();
        } else {
            return arg.clone();
        }
    }
    String::new()
}

fn flag(enabled: bool, name: &str) -> Option<String> {
    enabled.then(|| name.to_string())
}

fn timeout_args(timeout: u32) -> Vec<String> {
    vec!["--timeout".to_string(), timeout.to_string()]
}

fn create_args(options: &Create) -> Vec<String> {
    [
        flag(options.no_recreate, "--no-recreate"),
        flag(options.force_recreate, "--force-recreate"),
        flag(options.no_build, "--no-build"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn down_args(options: &Down) -> Result<Vec<String>> {
    let images = options.remove_images.parse::<ImageType>()?;

    let mut args: Vec<String> = [
        flag(options.remove_volume, "--volumes"),
        flag(options.remove_orphans, "--remove-orphans"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if images != ImageType::None {
        args.push("--rmi".to_string());
        args.push(images.to_string());
    }
    Ok(args)
}

fn build_args(options: &Build) -> Vec<String> {
    [
        flag(options.no_cache, "--no-cache"),
        flag(options.force_remove, "--force-rm"),
        flag(options.pull, "--pull"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn scale_args(timeout: u32, scale: &BTreeMap<String, u32>) -> Vec<String> {
    let mut args = vec![
        "--detach".to_string(),
        "--no-deps".to_string(),
        "--no-recreate".to_string(),
    ];
    args.extend(timeout_args(timeout));
    for (service, count) in scale {
        args.push("--scale".to_string());
        args.push(format!("{}={}", service, count));
    }
    args.extend(scale.keys().cloned());
    args
}

fn with_services(mut args: Vec<String>, services: &[String]) -> Vec<String> {
    args.extend(services.iter().cloned());
    args
}

#[async_trait]
impl ComposeProject for DockerCompose {
    async fn ps(&self, services: &[String]) -> Result<InfoSet> {
        let args = with_services(
            vec!["--all".to_string(), "--format".to_string(), "json".to_string()],
            services,
        );
        let output = self.capture(self.args("ps", args)).await?;
        Ok(InfoSet::from_json(&output)?)
    }

    async fn port(
        &self,
        index: u32,
        protocol: &str,
        service: &str,
        private_port: &str,
    ) -> Result<String> {
        let args = vec![
            "--index".to_string(),
            index.to_string(),
            "--protocol".to_string(),
            protocol.to_string(),
            service.to_string(),
            private_port.to_string(),
        ];
        let output = self.capture(self.args("port", args)).await?;
        Ok(output.trim().to_string())
    }

    async fn stop(&self, timeout: u32, services: &[String]) -> Result<()> {
        let args = with_services(timeout_args(timeout), services);
        self.exec(self.args("stop", args)).await
    }

    async fn down(&self, options: &Down, services: &[String]) -> Result<()> {
        let args = with_services(down_args(options)?, services);
        self.exec(self.args("down", args)).await
    }

    async fn build(&self, options: &Build, services: &[String]) -> Result<()> {
        let args = with_services(build_args(options), services);
        self.exec(self.args("build", args)).await
    }

    async fn create(&self, options: &Create, services: &[String]) -> Result<()> {
        options.validate()?;
        let args = with_services(create_args(options), services);
        self.exec(self.args("create", args)).await
    }

    async fn up(&self, options: &Up, services: &[String]) -> Result<()> {
        options.create.validate()?;
        let mut args = vec!["--detach".to_string()];
        args.extend(create_args(&options.create));
        self.exec(self.args("up", with_services(args, services)))
            .await
    }

    async fn log(&self, follow: bool, services: &[String]) -> Result<()> {
        let args = with_services(flag(follow, "--follow").into_iter().collect(), services);
        self.exec(self.args("logs", args)).await
    }

    async fn run(&self, service: &str, command: &[String]) -> Result<i32> {
        let mut args = vec![service.to_string()];
        args.extend(command.iter().cloned());
        // A command killed by a signal has no exit code
        Ok(self.status(self.args("run", args)).await?.unwrap_or(1))
    }

    async fn start(&self, services: &[String]) -> Result<()> {
        self.exec(self.args("start", services.to_vec())).await
    }

    async fn restart(&self, timeout: u32, services: &[String]) -> Result<()> {
        let args = with_services(timeout_args(timeout), services);
        self.exec(self.args("restart", args)).await
    }

    async fn pull(&self, services: &[String]) -> Result<()> {
        self.exec(self.args("pull", services.to_vec())).await
    }

    async fn delete(&self, options: &Delete, services: &[String]) -> Result<()> {
        if let Some(confirm) = &options.before_delete {
            let stopped = self.ps(services).await?.stopped();
            if stopped.is_empty() {
                tracing::info!("No stopped containers");
                return Ok(());
            }
            if !confirm(&stopped) {
                return Ok(());
            }
        }

        let mut args = vec!["--force".to_string()];
        args.extend(flag(options.remove_volume, "--volumes"));
        self.exec(self.args("rm", with_services(args, services)))
            .await
    }

    async fn kill(&self, signal: &str, services: &[String]) -> Result<()> {
        let args = with_services(vec!["--signal".to_string(), signal.to_string()], services);
        self.exec(self.args("kill", args)).await
    }

    async fn pause(&self, services: &[String]) -> Result<()> {
        self.exec(self.args("pause", services.to_vec())).await
    }

    async fn unpause(&self, services: &[String]) -> Result<()> {
        self.exec(self.args("unpause", services.to_vec())).await
    }

    async fn scale(&self, timeout: u32, scale: &BTreeMap<String, u32>) -> Result<()> {
        self.exec(self.args("up", scale_args(timeout, scale))).await
    }
}
