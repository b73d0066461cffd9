//! Attached `up`: stream logs until interrupted

use crate::error::Result;
use crate::project::ComposeProject;
use std::future::Future;

/// What ended the attached session
enum Finished {
    Interrupted,
    Logs(Result<()>),
}

/// Follow the project's logs until they end or `shutdown` resolves.
///
/// `shutdown` wins when both are ready. On shutdown the log stream is
/// dropped, then the services are stopped once with `timeout`. An interrupt
/// always ends in success; a failed stop is only logged.
pub async fn run_attached<P, S>(
    project: &P,
    timeout: u32,
    services: &[String],
    shutdown: S,
) -> Result<()>
where
    P: ComposeProject + ?Sized,
    S: Future<Output = ()>,
{
    let finished = tokio::select! {
        biased;
        _ = shutdown => Finished::Interrupted,
        res = project.log(true, services) => Finished::Logs(res),
    };

    match finished {
        Finished::Interrupted => {
            println!("\nGracefully stopping...");
            if let Err(e) = project.stop(timeout, services).await {
                tracing::error!("Failed to stop services: {}", e);
            }
            Ok(())
        }
        Finished::Logs(res) => res,
    }
}

/// Resolves on SIGINT or SIGTERM
pub async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for interrupts: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::warn!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::testing::{LogBehavior, RecordingProject};

    fn services() -> Vec<String> {
        vec!["web".to_string()]
    }

    #[tokio::test]
    async fn test_interrupt_stops_once() {
        let project = RecordingProject {
            log: LogBehavior::Hang,
            ..Default::default()
        };

        run_attached(&project, 7, &services(), async {}).await.unwrap();

        let stops: Vec<_> = project
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("stop"))
            .collect();
        assert_eq!(stops, vec!["stop 7 [\"web\"]".to_string()]);
    }

    #[tokio::test]
    async fn test_interrupt_succeeds_when_stop_fails() {
        let project = RecordingProject {
            log: LogBehavior::Hang,
            fail: true,
            ..Default::default()
        };

        run_attached(&project, 10, &services(), async {}).await.unwrap();

        assert_eq!(project.calls(), vec!["stop 10 [\"web\"]".to_string()]);
    }

    #[tokio::test]
    async fn test_interrupt_wins_over_finished_logs() {
        let project = RecordingProject::default();

        run_attached(&project, 10, &[], async {}).await.unwrap();

        assert_eq!(project.calls(), vec!["stop 10 []".to_string()]);
    }

    #[tokio::test]
    async fn test_logs_end_without_stop() {
        let project = RecordingProject::default();

        run_attached(&project, 10, &services(), std::future::pending())
            .await
            .unwrap();

        assert_eq!(project.calls(), vec!["log true [\"web\"]".to_string()]);
    }

    #[tokio::test]
    async fn test_log_error_is_returned() {
        let project = RecordingProject {
            log: LogBehavior::Fail,
            ..Default::default()
        };

        let err = run_attached(&project, 10, &services(), std::future::pending())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("log stream broke"));
        assert!(!project.calls().iter().any(|c| c.starts_with("stop")));
    }
}
