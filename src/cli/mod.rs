//! Command dispatch
//!
//! Each subcommand turns its flags into project options and makes one call
//! on the project backend.

pub mod args;
pub mod foreground;
pub mod kube;
pub mod prompt;

pub use args::{Cli, Commands, GlobalOptions};

use crate::cluster::ClusterConfig;
use crate::error::{KuberError, Result};
use crate::project::{
    Build, ComposeProject, Create, Delete, DockerCompose, Down, ProjectContext, Up,
};
use args::RecreateArgs;
use std::collections::BTreeMap;
use std::path::Path;

/// Run the parsed command line from `working_dir`
pub async fn execute(cli: Cli, working_dir: &Path) -> Result<()> {
    let Cli { global, command } = cli;

    if let Commands::KuberConfig(args) = &command {
        return kube::project_kuber_config(&ClusterConfig::default_path()?, &args.host);
    }

    let context = ProjectContext::resolve(
        &global.files,
        global.project_name.as_deref(),
        working_dir,
    )
    .map_err(|e| KuberError::Compose(format!("Failed to read project: {}", e)))?;

    if let Commands::Kuber(args) = &command {
        let output = working_dir.join(&args.output);
        kube::project_kuber(&context.config, &output, &ClusterConfig::default_path()?).await?;
        return Ok(());
    }

    let project = DockerCompose::new(context);
    dispatch(&project, command, foreground::shutdown_signal()).await
}

/// Run one lifecycle command against `project`.
///
/// `shutdown` ends an attached `up`.
pub async fn dispatch<P, S>(project: &P, command: Commands, shutdown: S) -> Result<()>
where
    P: ComposeProject + ?Sized,
    S: std::future::Future<Output = ()>,
{
    match command {
        Commands::Ps(args) => {
            let info = project.ps(&args.services).await?;
            print!("{}", info.render(args.quiet));
        }

        Commands::Port(args) => {
            let port = project
                .port(args.index, &args.protocol, &args.service, &args.private_port)
                .await?;
            println!("{}", port);
        }

        Commands::Stop(args) => project.stop(args.timeout, &args.services).await?,

        Commands::Down(args) => {
            let options = Down {
                remove_volume: args.volumes,
                remove_images: args.rmi,
                remove_orphans: args.remove_orphans,
            };
            project.down(&options, &args.services).await?;
        }

        Commands::Build(args) => {
            let options = Build {
                no_cache: args.no_cache,
                force_remove: args.force_rm,
                pull: args.pull,
            };
            project.build(&options, &args.services).await?;
        }

        Commands::Create(args) => {
            project
                .create(&create_options(&args.recreate), &args.services)
                .await?
        }

        Commands::Up(args) => {
            let options = Up {
                create: create_options(&args.recreate),
            };
            project.up(&options, &args.services).await?;

            if !args.detach {
                foreground::run_attached(project, args.timeout, &args.services, shutdown).await?;
            }
        }

        Commands::Run(args) => {
            let code = project.run(&args.service, &args.command).await?;
            if code != 0 {
                return Err(KuberError::Exit {
                    message: String::new(),
                    code,
                });
            }
        }

        Commands::Start(args) => project.start(&args.services).await?,

        Commands::Restart(args) => project.restart(args.timeout, &args.services).await?,

        Commands::Logs(args) => project.log(args.follow, &args.services).await?,

        Commands::Pull(args) => {
            if let Err(e) = project.pull(&args.services).await {
                if !args.ignore_pull_failures {
                    return Err(e);
                }
                tracing::warn!("Ignoring pull failure: {}", e);
            }
        }

        Commands::Rm(args) => {
            let options = Delete {
                remove_volume: args.volumes,
                before_delete: (!args.force).then(prompt::terminal_confirmation),
            };
            project.delete(&options, &args.services).await?;
        }

        Commands::Kill(args) => project.kill(&args.signal, &args.services).await?,

        Commands::Pause(args) => project.pause(&args.services).await?,

        Commands::Unpause(args) => project.unpause(&args.services).await?,

        Commands::Scale(args) => {
            let scale = parse_scale(&args.scales)?;
            project.scale(args.timeout, &scale).await?;
        }

        Commands::Kuber(_) | Commands::KuberConfig(_) => {
            return Err(KuberError::Project(
                "cluster commands are not project operations".to_string(),
            ));
        }
    }

    Ok(())
}

fn create_options(args: &RecreateArgs) -> Create {
    Create {
        no_recreate: args.no_recreate,
        force_recreate: args.force_recreate,
        no_build: args.no_build,
    }
}

/// Parse `SERVICE=NUM` arguments
pub fn parse_scale(args: &[String]) -> Result<BTreeMap<String, u32>> {
    let mut scale = BTreeMap::new();

    for arg in args {
        let (name, count) = arg
            .split_once('=')
            .ok_or_else(|| KuberError::InvalidScale(arg.clone()))?;

        let count = count
            .parse::<u32>()
            .map_err(|e| KuberError::InvalidScale(format!("{}: {}", arg, e)))?;

        scale.insert(name.to_string(), count);
    }

    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::testing::{LogBehavior, RecordingProject};
    use clap::Parser;

    fn command(args: &[&str]) -> Commands {
        let mut argv = vec!["kuber"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    async fn run(project: &RecordingProject, args: &[&str]) -> Result<()> {
        dispatch(project, command(args), std::future::pending()).await
    }

    #[test]
    fn test_parse_scale() {
        let scale = parse_scale(&["web=3".to_string(), "db=0".to_string()]).unwrap();
        assert_eq!(scale.get("web"), Some(&3));
        assert_eq!(scale.get("db"), Some(&0));

        for bad in ["web", "web=", "web=three", "web=-1", "web=1.5"] {
            let err = parse_scale(&[bad.to_string()]).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{} must be rejected", bad);
        }
    }

    #[tokio::test]
    async fn test_bad_scale_makes_no_call() {
        let project = RecordingProject::default();

        let err = run(&project, &["scale", "web=2", "db"]).await.unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(project.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scale() {
        let project = RecordingProject::default();
        run(&project, &["scale", "-t", "5", "web=2"]).await.unwrap();
        assert_eq!(project.calls(), vec!["scale 5 {\"web\": 2}".to_string()]);
    }

    #[tokio::test]
    async fn test_flags_become_options() {
        let project = RecordingProject::default();

        run(&project, &["down", "-v", "--rmi", "all", "web"]).await.unwrap();
        run(&project, &["build", "--no-cache", "--pull"]).await.unwrap();
        run(&project, &["create", "--force-recreate"]).await.unwrap();
        run(&project, &["stop", "-t", "3"]).await.unwrap();
        run(&project, &["kill", "-s", "SIGTERM", "db"]).await.unwrap();

        let calls = project.calls();
        assert!(calls[0].starts_with("down Down { remove_volume: true, remove_images: \"all\", remove_orphans: false }"));
        assert!(calls[1].starts_with("build Build { no_cache: true, force_remove: false, pull: true }"));
        assert!(calls[2].contains("force_recreate: true"));
        assert_eq!(calls[3], "stop 3 []");
        assert_eq!(calls[4], "kill SIGTERM [\"db\"]");
    }

    #[tokio::test]
    async fn test_rmi_is_passed_through() {
        let project = RecordingProject::default();
        run(&project, &["down", "--rmi", "some"]).await.unwrap();
        assert!(project.calls()[0].contains("remove_images: \"some\""));
    }

    #[tokio::test]
    async fn test_backend_failure_exits_one() {
        let project = RecordingProject {
            fail: true,
            ..Default::default()
        };
        let err = run(&project, &["start"]).await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("backend failure"));
    }

    #[tokio::test]
    async fn test_pull_failures_can_be_ignored() {
        let project = RecordingProject {
            fail: true,
            ..Default::default()
        };
        assert!(run(&project, &["pull"]).await.is_err());
        assert!(run(&project, &["pull", "--ignore-pull-failures"]).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_exit_code() {
        let project = RecordingProject {
            run_exit: 3,
            ..Default::default()
        };
        let err = run(&project, &["run", "web", "false"]).await.unwrap_err();
        assert_eq!(err.exit_code(), 3);

        let project = RecordingProject::default();
        run(&project, &["run", "web", "true"]).await.unwrap();
    }

    #[tokio::test]
    async fn test_up_detached_does_not_log() {
        let project = RecordingProject::default();
        run(&project, &["up", "-d"]).await.unwrap();
        assert_eq!(project.calls().len(), 1);
        assert!(project.calls()[0].starts_with("up"));
    }

    #[tokio::test]
    async fn test_up_attached_stops_on_interrupt() {
        let project = RecordingProject {
            log: LogBehavior::Hang,
            ..Default::default()
        };

        dispatch(&project, command(&["up", "web"]), async {})
            .await
            .unwrap();

        let calls = project.calls();
        assert!(calls[0].starts_with("up"));
        assert_eq!(calls[1], "stop 10 [\"web\"]");
        assert_eq!(calls.len(), 2);
    }

    #[tokio::test]
    async fn test_forced_rm_skips_prompt() {
        let project = RecordingProject::default();
        run(&project, &["rm", "-f", "-v"]).await.unwrap();
        assert_eq!(project.calls(), vec!["delete true []".to_string()]);
    }
}
