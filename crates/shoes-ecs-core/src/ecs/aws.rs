use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_ecs::{
    Client,
    client::Waiters,
    error::DisplayErrorContext,
    types::{
        AssignPublicIp, AwsVpcConfiguration, ContainerOverride, Failure, LaunchType,
        NetworkConfiguration, TaskOverride,
    },
};
use aws_smithy_runtime_api::client::waiters::error::WaiterError;
use tracing::{debug, trace};

use shoes_ecs_model::TaskArn;

use crate::ecs::{EcsApi, EcsConnector, EcsError, RunTaskInput, RunTaskOutput};

/// Connector using the default AWS credential chain.
///
/// Credentials are resolved eagerly in [`EcsConnector::connect`], so a broken
/// credential setup fails there instead of on the first request.
#[derive(Debug, Clone, Default)]
pub struct AwsConnector {
    credentials: Option<SharedCredentialsProvider>,
}

impl AwsConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `provider` instead of the default credential chain.
    pub fn with_credentials(provider: impl ProvideCredentials + 'static) -> Self {
        Self {
            credentials: Some(SharedCredentialsProvider::new(provider)),
        }
    }
}

#[async_trait]
impl EcsConnector for AwsConnector {
    type Api = AwsEcsClient;

    async fn connect(&self, region: &str) -> Result<Self::Api, EcsError> {
        validate_region(region)?;

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
        if let Some(provider) = &self.credentials {
            loader = loader.credentials_provider(provider.clone());
        }
        let sdk_config = loader.load().await;

        let provider = sdk_config
            .credentials_provider()
            .ok_or_else(|| EcsError::Connect("no AWS credentials provider configured".into()))?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| EcsError::Connect(DisplayErrorContext(&e).to_string()))?;

        debug!(region, "ECS client ready");
        Ok(AwsEcsClient {
            client: Client::new(&sdk_config),
        })
    }
}

/// [`EcsApi`] backed by `aws-sdk-ecs`.
#[derive(Debug, Clone)]
pub struct AwsEcsClient {
    client: Client,
}

impl AwsEcsClient {
    /// Wrap an already configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EcsApi for AwsEcsClient {
    async fn run_task(&self, input: &RunTaskInput) -> Result<RunTaskOutput, EcsError> {
        let vpc = AwsVpcConfiguration::builder()
            .subnets(&input.subnet_id)
            .assign_public_ip(if input.assign_public_ip {
                AssignPublicIp::Enabled
            } else {
                AssignPublicIp::Disabled
            })
            .build()
            .map_err(|e| EcsError::Request(e.to_string()))?;

        let container = ContainerOverride::builder()
            .name(input.container_name)
            .set_command(Some(input.command.clone()))
            .build();

        trace!(cluster = %input.cluster, "sending RunTask");
        let out = self
            .client
            .run_task()
            .cluster(&input.cluster)
            .task_definition(&input.task_definition)
            .launch_type(LaunchType::Fargate)
            .count(1)
            .network_configuration(
                NetworkConfiguration::builder()
                    .awsvpc_configuration(vpc)
                    .build(),
            )
            .overrides(
                TaskOverride::builder()
                    .container_overrides(container)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| EcsError::Request(DisplayErrorContext(&e).to_string()))?;

        Ok(RunTaskOutput {
            tasks: out
                .tasks()
                .iter()
                .filter_map(|t| t.task_arn())
                .map(TaskArn::from)
                .collect(),
            failures: out.failures().iter().map(describe_failure).collect(),
        })
    }

    async fn wait_until_running(
        &self,
        cluster: &str,
        task: &TaskArn,
        max_wait: Duration,
    ) -> Result<(), EcsError> {
        self.client
            .wait_until_tasks_running()
            .cluster(cluster)
            .tasks(task.as_str())
            .wait(max_wait)
            .await
            .map(|_| ())
            .map_err(|e| match e {
                WaiterError::ExceededMaxWait(_) => EcsError::ExceededMaxWait(max_wait),
                other => EcsError::WaitFailed(DisplayErrorContext(&other).to_string()),
            })
    }
}

fn describe_failure(f: &Failure) -> String {
    let mut out = f.reason().unwrap_or("unknown").to_string();
    if let Some(detail) = f.detail() {
        out.push_str(": ");
        out.push_str(detail);
    }
    if let Some(arn) = f.arn() {
        out.push_str(&format!(" ({arn})"));
    }
    out
}

/// Region names look like `us-east-1`.
fn validate_region(region: &str) -> Result<(), EcsError> {
    let valid = !region.is_empty()
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !region.starts_with('-')
        && !region.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(EcsError::Connect(format!("malformed region '{region}'")))
    }
}

#[cfg(test)]
mod tests {
    use aws_credential_types::{
        Credentials,
        provider::{error::CredentialsError, future},
    };
    use aws_sdk_ecs::config::Config;
    use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
    use aws_smithy_runtime_api::http::{Request, Response, StatusCode};
    use aws_smithy_types::body::SdkBody;
    use serde_json::Value;
    use shoes_ecs_model::{AppConfig, Flag};

    use super::*;

    #[derive(Debug)]
    struct NoCredentials;

    impl ProvideCredentials for NoCredentials {
        fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
        where
            Self: 'a,
        {
            future::ProvideCredentials::ready(Err(CredentialsError::not_loaded(
                "no credentials in environment",
            )))
        }
    }

    fn static_credentials() -> Credentials {
        Credentials::new("AKIDTEST", "secret", None, None, "test")
    }

    /// Client answering every call with the given JSON bodies, in order.
    fn replay(bodies: &[&str]) -> (AwsEcsClient, StaticReplayClient) {
        let events = bodies
            .iter()
            .map(|body| {
                ReplayEvent::new(
                    Request::new(SdkBody::empty()),
                    Response::new(
                        StatusCode::try_from(200u16).unwrap(),
                        SdkBody::from(body.to_string()),
                    ),
                )
            })
            .collect();
        let http = StaticReplayClient::new(events);

        let conf = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(static_credentials())
            .http_client(http.clone())
            .build();

        (AwsEcsClient::from_client(Client::from_conf(conf)), http)
    }

    fn sent_bodies(http: &StaticReplayClient) -> Vec<Value> {
        http.actual_requests()
            .map(|req| {
                let bytes = req.body().bytes().expect("in-memory body");
                serde_json::from_slice(bytes).expect("json body")
            })
            .collect()
    }

    #[tokio::test]
    async fn connect_fails_when_credentials_do_not_resolve() {
        let err = AwsConnector::with_credentials(NoCredentials)
            .connect("us-east-1")
            .await
            .unwrap_err();

        match err {
            EcsError::Connect(msg) => assert!(msg.contains("no credentials in environment"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connect_succeeds_with_resolvable_credentials() {
        let connector = AwsConnector::with_credentials(static_credentials());
        assert!(connector.connect("us-east-1").await.is_ok());
    }

    #[tokio::test]
    async fn connect_rejects_malformed_region_before_loading() {
        let err = AwsConnector::with_credentials(NoCredentials)
            .connect("US EAST")
            .await
            .unwrap_err();
        match err {
            EcsError::Connect(msg) => assert!(msg.contains("malformed region"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn run_task_sends_fargate_request_with_runner_override() {
        let (client, http) = replay(&[r#"{
            "tasks": [{"taskArn": "arn:aws:ecs:us-east-1:1:task/runners/abc"}],
            "failures": [{"reason": "RESOURCE:ENI", "arn": "arn:x"}]
        }"#]);
        let cfg = AppConfig::new("runners", "runner:3", "subnet-1", "us-east-1", Flag::disabled())
            .unwrap();

        let out = client
            .run_task(&RunTaskInput::new(&cfg, "echo hi;ls"))
            .await
            .unwrap();

        assert_eq!(out.tasks, vec![TaskArn::new("arn:aws:ecs:us-east-1:1:task/runners/abc")]);
        assert_eq!(out.failures, vec!["RESOURCE:ENI (arn:x)".to_string()]);

        let bodies = sent_bodies(&http);
        assert_eq!(bodies.len(), 1);
        let body = &bodies[0];
        assert_eq!(body["cluster"], "runners");
        assert_eq!(body["taskDefinition"], "runner:3");
        assert_eq!(body["launchType"], "FARGATE");
        assert_eq!(body["count"], 1);

        let vpc = &body["networkConfiguration"]["awsvpcConfiguration"];
        assert_eq!(vpc["subnets"], serde_json::json!(["subnet-1"]));
        assert_eq!(vpc["assignPublicIp"], "ENABLED");

        let container = &body["overrides"]["containerOverrides"][0];
        assert_eq!(container["name"], "runner");
        assert_eq!(container["command"], serde_json::json!(["bash", "-c", "echo hi;ls"]));
    }

    #[tokio::test]
    async fn wait_returns_once_task_is_running() {
        let (client, http) = replay(&[r#"{
            "tasks": [{"taskArn": "task/1", "lastStatus": "RUNNING"}],
            "failures": []
        }"#]);

        client
            .wait_until_running("runners", &TaskArn::new("task/1"), Duration::from_secs(300))
            .await
            .unwrap();

        let bodies = sent_bodies(&http);
        assert_eq!(bodies[0]["cluster"], "runners");
        assert_eq!(bodies[0]["tasks"], serde_json::json!(["task/1"]));
    }

    #[tokio::test]
    async fn stopped_task_is_a_wait_failure() {
        let (client, _http) = replay(&[r#"{
            "tasks": [{"taskArn": "task/1", "lastStatus": "STOPPED"}],
            "failures": []
        }"#]);

        let err = client
            .wait_until_running("runners", &TaskArn::new("task/1"), Duration::from_secs(300))
            .await
            .unwrap_err();

        assert!(matches!(err, EcsError::WaitFailed(_)), "{err:?}");
    }

    #[test]
    fn accepts_real_region_names() {
        for r in ["us-east-1", "ap-northeast-1", "eu-central-2", "us-gov-west-1"] {
            assert!(validate_region(r).is_ok(), "{r}");
        }
    }

    #[test]
    fn rejects_malformed_regions() {
        for r in ["", " us-east-1", "US-EAST-1", "us_east_1", "-us", "us-"] {
            let err = validate_region(r).unwrap_err();
            assert!(matches!(err, EcsError::Connect(_)), "{r:?}");
        }
    }

    #[test]
    fn failure_description_includes_detail_and_arn() {
        let f = Failure::builder()
            .reason("RESOURCE:ENI")
            .detail("no free addresses")
            .arn("arn:aws:ecs:us-east-1:1:container-instance/x")
            .build();
        assert_eq!(
            describe_failure(&f),
            "RESOURCE:ENI: no free addresses (arn:aws:ecs:us-east-1:1:container-instance/x)"
        );

        let bare = Failure::builder().build();
        assert_eq!(describe_failure(&bare), "unknown");
    }
}
