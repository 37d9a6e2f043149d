//! Task launch state machine.
//!
//! ```text
//! connect ─► RunTask ─► SUBMITTED ─┬─(no-wait)──────────────► done
//!                                  └─(poll)─► RUNNING ──────► done
//!                                          └► timeout/error/cancel ─► failed
//! ```
//!
//! A failed wait never stops the remote task; its identifier is carried in the error.
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use shoes_ecs_model::{AppConfig, DEFAULT_MAX_WAIT, TaskArn};

use crate::{
    ecs::{EcsApi, EcsConnector, EcsError, RunTaskInput, RunTaskOutput},
    error::LaunchError,
};

/// Tunables for [`TaskLauncher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Ceiling on the wait for the `RUNNING` state.
    pub max_wait: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

/// Launches one ECS task per call. Holds no per-launch state.
#[derive(Debug, Clone)]
pub struct TaskLauncher<C> {
    connector: C,
    options: LaunchOptions,
}

impl<C> TaskLauncher<C>
where
    C: EcsConnector,
{
    pub fn new(connector: C) -> Self {
        Self::with_options(connector, LaunchOptions::default())
    }

    pub fn with_options(connector: C, options: LaunchOptions) -> Self {
        Self { connector, options }
    }

    /// Run `command` as a new task and, unless `no_wait` is set, wait for it to be running.
    ///
    /// Cancelling `cancel` aborts the wait promptly with [`LaunchError::Canceled`];
    /// it has no effect before submission or on the remote task.
    #[instrument(
        level = "debug",
        skip_all,
        fields(cluster = %cfg.cluster(), task_definition = %cfg.task_definition())
    )]
    pub async fn launch(
        &self,
        cfg: &AppConfig,
        command: &str,
        cancel: &CancellationToken,
    ) -> Result<TaskArn, LaunchError> {
        let api = self
            .connector
            .connect(cfg.region())
            .await
            .map_err(|e| LaunchError::Configuration {
                region: cfg.region().to_string(),
                reason: e.to_string(),
            })?;

        debug!(command, "submitting run-task");
        let output = api
            .run_task(&RunTaskInput::new(cfg, command))
            .await
            .map_err(|e| LaunchError::Submit(e.to_string()))?;

        let task_arn = single_task(output)?;
        info!(task_arn = %task_arn, "task submitted");

        if cfg.no_wait().is_enabled() {
            debug!(task_arn = %task_arn, "no-wait set; skipping running-state wait");
            return Ok(task_arn);
        }

        self.wait_running(&api, cfg.cluster(), task_arn, cancel).await
    }

    async fn wait_running<A>(
        &self,
        api: &A,
        cluster: &str,
        task_arn: TaskArn,
        cancel: &CancellationToken,
    ) -> Result<TaskArn, LaunchError>
    where
        A: EcsApi,
    {
        let max_wait = self.options.max_wait;
        let poll = tokio::time::timeout(
            max_wait,
            api.wait_until_running(cluster, &task_arn, max_wait),
        );

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(task_arn = %task_arn, "wait canceled by caller; task left as is");
                return Err(LaunchError::Canceled {
                    task_arn: task_arn.clone(),
                });
            }
            res = poll => res,
        };

        match outcome {
            Ok(Ok(())) => {
                info!(task_arn = %task_arn, "task running");
                Ok(task_arn)
            }
            Ok(Err(EcsError::ExceededMaxWait(_))) | Err(_) => {
                warn!(task_arn = %task_arn, ?max_wait, "task not running before deadline");
                Err(LaunchError::Timeout {
                    task_arn,
                    waited: max_wait,
                })
            }
            Ok(Err(e)) => {
                warn!(task_arn = %task_arn, error = %e, "running-state wait failed");
                Err(LaunchError::Wait {
                    task_arn,
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// Exactly one task is requested; anything else is reported, not indexed blindly.
fn single_task(output: RunTaskOutput) -> Result<TaskArn, LaunchError> {
    let RunTaskOutput {
        mut tasks,
        failures,
    } = output;

    match tasks.len() {
        0 => Err(LaunchError::EmptyTaskList { failures }),
        1 => Ok(tasks.remove(0)),
        count => Err(LaunchError::UnexpectedTaskCount { count }),
    }
}

#[cfg(test)]
mod tests {
    use shoes_ecs_model::Flag;

    use super::*;
    use crate::mock::{Call, MockEcs, WaitBehavior};

    fn config(no_wait: Flag) -> AppConfig {
        AppConfig::new("runners", "runner-td:7", "subnet-1", "us-east-1", no_wait).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_returns_after_submit_without_polling() {
        let ecs = MockEcs::new().with_tasks(["task/abc"]);
        let launcher = TaskLauncher::new(ecs.clone());

        let started = tokio::time::Instant::now();
        let arn = launcher
            .launch(&config(Flag::enabled()), "echo hi", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(arn.as_str(), "task/abc");
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(ecs.wait_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn records_connect_run_and_wait_in_order() {
        let ecs = MockEcs::new().with_tasks(["task/abc"]);
        let launcher = TaskLauncher::new(ecs.clone());

        launcher
            .launch(&config(Flag::disabled()), "echo hi", &CancellationToken::new())
            .await
            .unwrap();

        let calls = ecs.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            Call::Connect {
                region: "us-east-1".into()
            }
        );
        match &calls[1] {
            Call::RunTask(input) => {
                assert_eq!(input.cluster, "runners");
                assert_eq!(input.task_definition, "runner-td:7");
                assert_eq!(input.command, vec!["bash", "-c", "echo hi"]);
            }
            other => panic!("expected RunTask, got {other:?}"),
        }
        assert_eq!(
            calls[2],
            Call::Wait {
                cluster: "runners".into(),
                task: TaskArn::new("task/abc")
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn waits_until_running_before_deadline() {
        let ecs = MockEcs::new()
            .with_tasks(["task/slow"])
            .with_wait(WaitBehavior::RunningAfter(Duration::from_secs(90)));
        let launcher = TaskLauncher::new(ecs.clone());

        let started = tokio::time::Instant::now();
        let arn = launcher
            .launch(&config(Flag::disabled()), "true", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(arn.as_str(), "task/slow");
        assert_elapsed(started, Duration::from_secs(90));
    }

    #[tokio::test(start_paused = true)]
    async fn never_running_times_out_after_five_minutes() {
        let ecs = MockEcs::new()
            .with_tasks(["task/stuck"])
            .with_wait(WaitBehavior::Never);
        let launcher = TaskLauncher::new(ecs);

        let started = tokio::time::Instant::now();
        let err = launcher
            .launch(&config(Flag::disabled()), "true", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(
            matches!(&err, LaunchError::Timeout { task_arn, waited }
                if task_arn.as_str() == "task/stuck" && *waited == Duration::from_secs(300)),
            "got {err:?}"
        );
        assert_elapsed(started, Duration::from_secs(300));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_max_wait_is_honored() {
        let ecs = MockEcs::new().with_wait(WaitBehavior::RunningAfter(Duration::from_secs(20)));
        let launcher = TaskLauncher::with_options(
            ecs,
            LaunchOptions {
                max_wait: Duration::from_secs(10),
            },
        );

        let err = launcher
            .launch(&config(Flag::disabled()), "true", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "timeout");
    }

    #[tokio::test(start_paused = true)]
    async fn poll_error_is_a_wait_failure() {
        let ecs = MockEcs::new().with_wait(WaitBehavior::Fail(
            "task STOPPED: EssentialContainerExited".into(),
        ));
        let launcher = TaskLauncher::new(ecs);

        let err = launcher
            .launch(&config(Flag::disabled()), "true", &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            LaunchError::Wait { task_arn, reason } => {
                assert_eq!(task_arn.as_str(), "task/mock-1");
                assert!(reason.contains("EssentialContainerExited"));
            }
            other => panic!("expected Wait, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_aborts_the_wait_promptly() {
        let ecs = MockEcs::new().with_wait(WaitBehavior::Never);
        let launcher = TaskLauncher::new(ecs);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            trigger.cancel();
        });

        let started = tokio::time::Instant::now();
        let err = launcher
            .launch(&config(Flag::disabled()), "true", &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::Canceled { .. }), "got {err:?}");
        assert_elapsed(started, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn submit_rejection_is_not_retried() {
        let ecs = MockEcs::new().with_run_error("AccessDeniedException: not authorized");
        let launcher = TaskLauncher::new(ecs.clone());

        let err = launcher
            .launch(&config(Flag::disabled()), "true", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(&err, LaunchError::Submit(msg) if msg.contains("AccessDenied")));
        let runs = ecs
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::RunTask(_)))
            .count();
        assert_eq!(runs, 1);
        assert_eq!(ecs.wait_calls(), 0);
    }

    #[tokio::test]
    async fn connect_failure_is_a_configuration_error() {
        let ecs = MockEcs::new().with_connect_error("malformed region");
        let launcher = TaskLauncher::new(ecs.clone());

        let err = launcher
            .launch(&config(Flag::disabled()), "true", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(
            matches!(&err, LaunchError::Configuration { region, .. } if region == "us-east-1"),
            "got {err:?}"
        );
        assert_eq!(ecs.calls().len(), 1);
    }

    #[tokio::test]
    async fn empty_task_list_is_reported_with_failures() {
        let ecs = MockEcs::new().with_run_output(RunTaskOutput {
            tasks: Vec::new(),
            failures: vec!["RESOURCE:FARGATE".into()],
        });
        let launcher = TaskLauncher::new(ecs.clone());

        let err = launcher
            .launch(&config(Flag::disabled()), "true", &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            LaunchError::EmptyTaskList { failures } => {
                assert_eq!(failures, vec!["RESOURCE:FARGATE".to_string()])
            }
            other => panic!("expected EmptyTaskList, got {other:?}"),
        }
        assert_eq!(ecs.wait_calls(), 0);
    }

    #[tokio::test]
    async fn multiple_tasks_are_rejected() {
        let ecs = MockEcs::new().with_tasks(["task/a", "task/b"]);
        let launcher = TaskLauncher::new(ecs);

        let err = launcher
            .launch(&config(Flag::enabled()), "true", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::UnexpectedTaskCount { count: 2 }));
    }

    fn assert_elapsed(started: tokio::time::Instant, expected: Duration) {
        let elapsed = started.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(10),
            "expected ~{expected:?}, got {elapsed:?}"
        );
    }
}
