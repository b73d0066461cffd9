//! Command-line definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Kuber - compose CLI with Kubernetes deployment
#[derive(Debug, Parser)]
#[command(name = "kuber")]
#[command(author = "Evoker Industries")]
#[command(version)]
#[command(about = "Run compose projects locally or deploy them to Kubernetes", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command; given before the subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Compose file(s) to load
    #[arg(short = 'f', long = "file", env = "COMPOSE_FILE", value_delimiter = ':')]
    pub files: Vec<PathBuf>,

    /// Project name (defaults to the compose `name` or the directory name)
    #[arg(short = 'p', long, env = "COMPOSE_PROJECT_NAME")]
    pub project_name: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List containers
    Ps(PsArgs),

    /// Deploy services to Kubernetes as replication controllers and services
    Kuber(KuberArgs),

    /// Store the Kubernetes API server address
    #[command(name = "kuberconfig")]
    KuberConfig(KuberConfigArgs),

    /// Print the public port for a port binding
    Port(PortArgs),

    /// Stop services
    Stop(TimeoutArgs),

    /// Stop and remove containers, networks, images, and volumes
    Down(DownArgs),

    /// Build or rebuild services
    Build(BuildArgs),

    /// Create all services but do not start them
    Create(CreateArgs),

    /// Create and start containers
    Up(UpArgs),

    /// Run a one-off command on a service
    Run(RunArgs),

    /// Start services
    Start(ServicesArgs),

    /// Restart services
    Restart(TimeoutArgs),

    /// View output from containers
    #[command(alias = "log")]
    Logs(LogsArgs),

    /// Pull service images
    Pull(PullArgs),

    /// Remove stopped service containers
    #[command(alias = "delete")]
    Rm(RmArgs),

    /// Force stop service containers
    Kill(KillArgs),

    /// Pause services
    Pause(ServicesArgs),

    /// Unpause services
    Unpause(ServicesArgs),

    /// Set number of containers for a service
    Scale(ScaleArgs),
}

/// Service names only
#[derive(Debug, Clone, Default, Args)]
pub struct ServicesArgs {
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PsArgs {
    /// Only display IDs
    #[arg(short, long)]
    pub quiet: bool,
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct KuberArgs {
    /// Directory the generated manifests are written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct KuberConfigArgs {
    /// Kubernetes API server address
    #[arg(long)]
    pub host: String,
}

#[derive(Debug, Clone, Args)]
pub struct PortArgs {
    /// Index of the container if there are multiple instances of a service
    #[arg(long, default_value_t = 1)]
    pub index: u32,
    /// tcp or udp
    #[arg(long, default_value = "tcp")]
    pub protocol: String,
    /// Service name
    pub service: String,
    /// Private port
    pub private_port: String,
}

/// Commands taking a shutdown timeout
#[derive(Debug, Clone, Args)]
pub struct TimeoutArgs {
    /// Shutdown timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    pub timeout: u32,
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DownArgs {
    /// Remove data volumes
    #[arg(short, long)]
    pub volumes: bool,
    /// Remove images, type may be one of: 'all' to remove all images, or
    /// 'local' to remove only images that don't have an custom name set by
    /// the `image` field
    #[arg(long, default_value = "")]
    pub rmi: String,
    /// Remove containers for services not defined in the compose file
    #[arg(long)]
    pub remove_orphans: bool,
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Do not use cache when building the image
    #[arg(long)]
    pub no_cache: bool,
    /// Always remove intermediate containers
    #[arg(long)]
    pub force_rm: bool,
    /// Always attempt to pull a newer version of the image
    #[arg(long)]
    pub pull: bool,
    /// Services (all when empty)
    pub services: Vec<String>,
}

/// Container recreation flags shared by `create` and `up`
#[derive(Debug, Clone, Default, Args)]
pub struct RecreateArgs {
    /// If containers already exist, don't recreate them
    #[arg(long)]
    pub no_recreate: bool,
    /// Recreate containers even if their configuration and image haven't changed
    #[arg(long)]
    pub force_recreate: bool,
    /// Don't build an image, even if it's missing
    #[arg(long)]
    pub no_build: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub recreate: RecreateArgs,
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct UpArgs {
    /// Do not block and log
    #[arg(short, long)]
    pub detach: bool,
    #[command(flatten)]
    pub recreate: RecreateArgs,
    /// Shutdown timeout in seconds used when interrupted
    #[arg(short, long, default_value_t = 10)]
    pub timeout: u32,
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Service name
    pub service: String,
    /// Command and arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct LogsArgs {
    /// Follow log output
    #[arg(short, long)]
    pub follow: bool,
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PullArgs {
    /// Pull what it can and ignores images with pull failures
    #[arg(long)]
    pub ignore_pull_failures: bool,
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RmArgs {
    /// Allow deletion of all services without confirmation
    #[arg(short, long)]
    pub force: bool,
    /// Remove volumes associated with containers
    #[arg(short = 'v')]
    pub volumes: bool,
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct KillArgs {
    /// SIGNAL to send to the container
    #[arg(short, long, default_value = "SIGKILL")]
    pub signal: String,
    /// Services (all when empty)
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ScaleArgs {
    /// Shutdown timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    pub timeout: u32,
    /// SERVICE=NUM pairs
    pub scales: Vec<String>,
}
