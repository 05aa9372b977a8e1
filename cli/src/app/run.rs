//! Command runners for `ecs deploy` and `ecs status`

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use crate::app::options::{DeployOptions, StatusOptions};
use crate::console::{config_help, Reporter};
use crate::deploy::poller::{self, PollOutcome};
use crate::deploy::submitter::{self, SubmitOutcome};
use crate::errors::CliError;
use crate::http::client::HttpClient;
use crate::http::deployments::DeploymentApi;
use crate::models::deployment::{validate_service_name, DeploymentRequest, DeploymentStatus};
use crate::storage::layout::StorageLayout;
use crate::storage::settings::Settings;

/// How a command ended, once its messages have been reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Succeeded,
    Failed,
}

impl Completion {
    /// Process exit code of the completion
    pub fn exit_code(&self) -> i32 {
        match self {
            Completion::Succeeded => 0,
            Completion::Failed => 1,
        }
    }
}

impl From<PollOutcome> for Completion {
    fn from(outcome: PollOutcome) -> Self {
        match outcome {
            PollOutcome::Succeeded => Completion::Succeeded,
            PollOutcome::Failed => Completion::Failed,
        }
    }
}

/// Build the API client from the environment and the selected profile.
/// Fails before any request is made when the configuration is unusable.
pub async fn connect(layout: &StorageLayout, profile: Option<&str>) -> Result<HttpClient, CliError> {
    let settings = Settings::load(layout, profile).await?;
    let client = HttpClient::new(&settings)?;
    info!("Using API at {}", client.base_url());
    Ok(client)
}

/// Render an error with the causes its message does not already include
pub fn describe(error: &CliError) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = std::error::Error::source(cause);
    }
    message
}

/// Report an error that ended a command
pub fn report_error(reporter: &dyn Reporter, error: &CliError) {
    match error {
        CliError::ProfileFileMissing(path) => reporter.info(&config_help(path)),
        CliError::ProfileNotFound {
            name,
            path,
            available,
        } => {
            reporter.failure(&format!("Profile '{}' not found in {}", name, path.display()));
            reporter.warning(&format!("Available profiles: {}", available.join(", ")));
        }
        CliError::SubmissionRejected { status, message } => {
            let summary = format!("Deployment failed with status {}", status.as_u16());
            reporter.failure(&format!("[ERROR] {}", message));
            if *message != summary {
                reporter.failure(&summary);
            }
        }
        other => reporter.failure(&describe(other)),
    }
}

/// Report how a command ended and return the process exit code.
///
/// Failures are shown once, through the reporter; the log only gets them
/// at debug level.
pub fn finish(reporter: &dyn Reporter, result: Result<Completion, CliError>) -> i32 {
    match result {
        Ok(completion) => completion.exit_code(),
        Err(e) => {
            debug!("Command failed: {:?}", e);
            report_error(reporter, &e);
            1
        }
    }
}

/// Submit a deployment and, once started, poll it to completion
pub async fn run_deploy<A, S, F>(
    api: &A,
    reporter: &dyn Reporter,
    options: DeployOptions,
    sleep_fn: S,
) -> Result<Completion, CliError>
where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let request = DeploymentRequest::new(options.service_name)?
        .with_image(options.image)
        .with_force(options.force)
        .with_secret_arns(options.secret_arns);

    match submitter::submit(api, reporter, &request).await? {
        SubmitOutcome::Started => {
            info!("Deployment of '{}' started", request.service_name());
            let outcome =
                poller::poll(api, reporter, request.service_name(), &options.poller, sleep_fn)
                    .await?;
            Ok(outcome.into())
        }
        SubmitOutcome::Settled(DeploymentStatus::Failed) => Ok(Completion::Failed),
        SubmitOutcome::Settled(_) => Ok(Completion::Succeeded),
    }
}

/// Poll the deployment status of a service to completion
pub async fn run_status<A, S, F>(
    api: &A,
    reporter: &dyn Reporter,
    options: StatusOptions,
    sleep_fn: S,
) -> Result<Completion, CliError>
where
    A: DeploymentApi + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let service_name = validate_service_name(&options.service_name)?;

    let outcome = poller::poll(api, reporter, &service_name, &options.poller, sleep_fn).await?;
    Ok(outcome.into())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use http::StatusCode;
    use tracing_subscriber::EnvFilter;

    use super::*;
    use crate::logs::LogLevel;
    use crate::console::{BufferedReporter, MessageKind};
    use crate::http::client::ApiResponse;
    use crate::testing::ScriptedApi;

    fn no_sleep(_: Duration) -> std::future::Ready<()> {
        std::future::ready(())
    }

    #[test]
    fn test_report_unknown_profile() {
        let reporter = BufferedReporter::new();
        let error = CliError::ProfileNotFound {
            name: "staging".to_string(),
            path: "/home/dev/.skaylink/profile.toml".into(),
            available: vec!["dev".to_string(), "prod".to_string()],
        };

        report_error(&reporter, &error);

        assert_eq!(
            reporter.of_kind(MessageKind::Failure),
            vec!["Profile 'staging' not found in /home/dev/.skaylink/profile.toml".to_string()]
        );
        assert_eq!(
            reporter.of_kind(MessageKind::Warning),
            vec!["Available profiles: dev, prod".to_string()]
        );
    }

    #[test]
    fn test_report_rejection_shows_api_message() {
        let reporter = BufferedReporter::new();
        let error = CliError::SubmissionRejected {
            status: StatusCode::BAD_REQUEST,
            message: "quota exceeded".to_string(),
        };

        report_error(&reporter, &error);

        let failures = reporter.of_kind(MessageKind::Failure);
        assert_eq!(failures[0], "[ERROR] quota exceeded");
        assert!(failures[1].contains("400"));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failure_is_not_logged_at_default_level() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(LogLevel::default().to_filter_string()))
            .with_writer(move || writer.clone())
            .finish();
        let reporter = BufferedReporter::new();

        let code = tracing::subscriber::with_default(subscriber, || {
            finish(
                &reporter,
                Err(CliError::ConfigError("API_BASE_URL is not set".to_string())),
            )
        });

        assert_eq!(code, 1);
        assert!(logs.0.lock().unwrap().is_empty());
        assert_eq!(
            reporter.of_kind(MessageKind::Failure),
            vec!["Configuration error: API_BASE_URL is not set".to_string()]
        );
    }

    #[test]
    fn test_finish_maps_completion_to_exit_code() {
        let reporter = BufferedReporter::new();
        assert_eq!(finish(&reporter, Ok(Completion::Succeeded)), 0);
        assert_eq!(finish(&reporter, Ok(Completion::Failed)), 1);
        assert!(reporter.messages().is_empty());
    }

    #[test]
    fn test_report_rejection_without_body_message_once() {
        let reporter = BufferedReporter::new();
        let error = CliError::SubmissionRejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Deployment failed with status 500".to_string(),
        };

        report_error(&reporter, &error);

        assert_eq!(
            reporter.of_kind(MessageKind::Failure),
            vec!["[ERROR] Deployment failed with status 500".to_string()]
        );
    }

    #[test]
    fn test_report_missing_profile_file_shows_help() {
        colored::control::set_override(false);
        let reporter = BufferedReporter::new();
        let error = CliError::ProfileFileMissing("/home/dev/.skaylink/profile.toml".into());

        report_error(&reporter, &error);

        let info = reporter.of_kind(MessageKind::Info);
        assert_eq!(info.len(), 1);
        assert!(info[0].contains("/home/dev/.skaylink/profile.toml"));
        assert!(info[0].contains("[profiles.dev]"));
        assert!(reporter.of_kind(MessageKind::Failure).is_empty());
    }

    #[derive(Debug, thiserror::Error)]
    #[error("tcp connect error")]
    struct ConnectError(#[source] RefusedError);

    #[derive(Debug, thiserror::Error)]
    #[error("Connection refused")]
    struct RefusedError;

    #[test]
    fn test_report_includes_error_causes() {
        let reporter = BufferedReporter::new();
        let error = CliError::IoError(std::io::Error::other(ConnectError(RefusedError)));

        report_error(&reporter, &error);

        assert_eq!(
            reporter.of_kind(MessageKind::Failure),
            vec!["IO error: tcp connect error: Connection refused".to_string()]
        );
    }

    #[test]
    fn test_describe_does_not_repeat_included_source() {
        let source = toml::from_str::<toml::Value>("name = ").unwrap_err();
        let error = CliError::ProfileFileInvalid {
            path: "/tmp/profile.toml".into(),
            source,
        };
        assert_eq!(describe(&error), error.to_string());
    }

    #[tokio::test]
    async fn test_status_rejects_dot_segments() {
        let api = ScriptedApi::default();
        let reporter = BufferedReporter::new();

        for name in [".", ".."] {
            let result = run_status(&api, &reporter, StatusOptions::new(name), no_sleep).await;
            assert!(matches!(result, Err(CliError::ValidationError(_))), "{name:?}");
        }
        assert!(api.status_calls().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_rejects_dot_segments() {
        let api = ScriptedApi::default();
        let reporter = BufferedReporter::new();

        let result = run_deploy(&api, &reporter, DeployOptions::new(".."), no_sleep).await;

        assert!(matches!(result, Err(CliError::ValidationError(_))));
        assert!(api.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_connect_with_missing_profile_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(dir.path());

        let result = connect(&layout, Some("dev")).await;
        assert!(matches!(result, Err(CliError::ProfileFileMissing(_))));
    }

    #[tokio::test]
    async fn test_connect_with_profile() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("profile.toml"),
            "[profiles.dev]\nAPI_BASE_URL = \"https://dev-api.example.com\"\nAPI_VERSION = \"v2\"\n",
        )
        .unwrap();
        let layout = StorageLayout::new(dir.path());

        let client = connect(&layout, Some("dev")).await.unwrap();
        assert_eq!(client.base_url().as_str(), "https://dev-api.example.com/v2");
    }

    #[tokio::test]
    async fn test_deploy_chains_into_status_for_same_service() {
        let api = ScriptedApi::with_statuses(vec![ApiResponse::new(
            StatusCode::OK,
            r#"{"status": "SUCCESSFUL"}"#,
        )])
        .on_submit(Ok(ApiResponse::new(StatusCode::CREATED, r#"{"status":"PENDING"}"#)));
        let reporter = BufferedReporter::new();

        let completion = run_deploy(&api, &reporter, DeployOptions::new("web"), no_sleep)
            .await
            .unwrap();

        assert_eq!(completion, Completion::Succeeded);
        assert_eq!(api.submitted().len(), 1);
        assert_eq!(api.submitted()[0].service_name(), "web");
        assert_eq!(api.status_calls(), vec!["web".to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_deploy_never_polls() {
        let api = ScriptedApi::default().on_submit(Ok(ApiResponse::new(
            StatusCode::BAD_REQUEST,
            r#"{"errors":"quota exceeded"}"#,
        )));
        let reporter = BufferedReporter::new();

        let err = run_deploy(&api, &reporter, DeployOptions::new("api"), no_sleep)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("quota exceeded"));
        assert!(api.status_calls().is_empty());
    }

    #[tokio::test]
    async fn test_settled_failed_deploy_fails_without_polling() {
        let api = ScriptedApi::default()
            .on_submit(Ok(ApiResponse::new(StatusCode::CREATED, r#"{"status":"FAILED"}"#)));
        let reporter = BufferedReporter::new();

        let completion = run_deploy(&api, &reporter, DeployOptions::new("web"), no_sleep)
            .await
            .unwrap();

        assert_eq!(completion, Completion::Failed);
        assert_eq!(completion.exit_code(), 1);
        assert!(api.status_calls().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_validates_before_submitting() {
        let api = ScriptedApi::default();
        let reporter = BufferedReporter::new();

        let result = run_deploy(&api, &reporter, DeployOptions::new(""), no_sleep).await;

        assert!(matches!(result, Err(CliError::ValidationError(_))));
        assert!(api.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_status_failure_maps_to_failed_completion() {
        let api = ScriptedApi::with_statuses(vec![ApiResponse::new(
            StatusCode::EXPECTATION_FAILED,
            "",
        )]);
        let reporter = BufferedReporter::new();

        let completion = run_status(&api, &reporter, StatusOptions::new("web"), no_sleep)
            .await
            .unwrap();

        assert_eq!(completion, Completion::Failed);
        assert_eq!(reporter.of_kind(MessageKind::Failure).len(), 1);
    }

    #[tokio::test]
    async fn test_status_uses_configured_delay() {
        let api = ScriptedApi::with_statuses(vec![
            ApiResponse::new(StatusCode::ACCEPTED, ""),
            ApiResponse::new(StatusCode::OK, ""),
        ]);
        let reporter = BufferedReporter::new();
        let options = StatusOptions::new("web").with_delay(Duration::from_secs(12));

        let completion = run_status(&api, &reporter, options, |d| {
            assert_eq!(d, Duration::from_secs(12));
            std::future::ready(())
        })
        .await
        .unwrap();

        assert_eq!(completion, Completion::Succeeded);
    }
}
