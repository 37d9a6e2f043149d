//! In-memory ECS used by tests across the workspace.
//!
//! A single [`MockEcs`] acts as both connector and client; clones share state,
//! so a test can keep a handle and inspect the recorded calls afterwards.
use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;

use shoes_ecs_model::TaskArn;

use crate::ecs::{EcsApi, EcsConnector, EcsError, RunTaskInput, RunTaskOutput};

/// How the mock answers `wait_until_running`.
#[derive(Debug, Clone)]
pub enum WaitBehavior {
    /// The task is running by the first poll.
    Running,
    /// The task becomes running after the given delay (or the wait gives up first).
    RunningAfter(Duration),
    /// The task never leaves `PENDING`.
    Never,
    /// Polling fails with the given reason (task stopped, describe error, ...).
    Fail(String),
}

/// One recorded remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect { region: String },
    RunTask(RunTaskInput),
    Wait { cluster: String, task: TaskArn },
}

#[derive(Debug)]
struct State {
    connect_error: Option<String>,
    run_result: Result<RunTaskOutput, String>,
    wait: WaitBehavior,
    calls: Vec<Call>,
}

#[derive(Debug, Clone)]
pub struct MockEcs {
    state: Arc<Mutex<State>>,
}

impl Default for MockEcs {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEcs {
    /// A mock that starts `task/mock-1` and reports it running immediately.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                connect_error: None,
                run_result: Ok(RunTaskOutput {
                    tasks: vec![TaskArn::new("task/mock-1")],
                    failures: Vec::new(),
                }),
                wait: WaitBehavior::Running,
                calls: Vec::new(),
            })),
        }
    }

    pub fn with_tasks<I, S>(self, arns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock().run_result = Ok(RunTaskOutput {
            tasks: arns.into_iter().map(|a| TaskArn::new(a)).collect(),
            failures: Vec::new(),
        });
        self
    }

    pub fn with_run_output(self, output: RunTaskOutput) -> Self {
        self.lock().run_result = Ok(output);
        self
    }

    pub fn with_run_error(self, reason: impl Into<String>) -> Self {
        self.lock().run_result = Err(reason.into());
        self
    }

    pub fn with_connect_error(self, reason: impl Into<String>) -> Self {
        self.lock().connect_error = Some(reason.into());
        self
    }

    pub fn with_wait(self, wait: WaitBehavior) -> Self {
        self.lock().wait = wait;
        self
    }

    /// All calls recorded so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of recorded `wait_until_running` calls.
    pub fn wait_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Wait { .. }))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EcsConnector for MockEcs {
    type Api = MockEcs;

    async fn connect(&self, region: &str) -> Result<Self::Api, EcsError> {
        let mut state = self.lock();
        state.calls.push(Call::Connect {
            region: region.to_string(),
        });
        match &state.connect_error {
            Some(reason) => Err(EcsError::Connect(reason.clone())),
            None => Ok(self.clone()),
        }
    }
}

#[async_trait]
impl EcsApi for MockEcs {
    async fn run_task(&self, input: &RunTaskInput) -> Result<RunTaskOutput, EcsError> {
        let mut state = self.lock();
        state.calls.push(Call::RunTask(input.clone()));
        state.run_result.clone().map_err(EcsError::Request)
    }

    async fn wait_until_running(
        &self,
        cluster: &str,
        task: &TaskArn,
        max_wait: Duration,
    ) -> Result<(), EcsError> {
        let wait = {
            let mut state = self.lock();
            state.calls.push(Call::Wait {
                cluster: cluster.to_string(),
                task: task.clone(),
            });
            state.wait.clone()
        };

        match wait {
            WaitBehavior::Running => Ok(()),
            WaitBehavior::RunningAfter(delay) if delay <= max_wait => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            WaitBehavior::RunningAfter(_) | WaitBehavior::Never => {
                tokio::time::sleep(max_wait).await;
                Err(EcsError::ExceededMaxWait(max_wait))
            }
            WaitBehavior::Fail(reason) => Err(EcsError::WaitFailed(reason)),
        }
    }
}
