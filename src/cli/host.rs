//! The `host` command: Chrome native messaging host.
//!
//! Chrome launches the host, writes one framed request to its stdin, and
//! reads one framed response from its stdout. The only recognized action
//! is `run_update`, which runs `extup update` as a subprocess under a
//! wall-clock timeout and relays its result. Once a request frame has
//! been read the host always answers, folding any failure into an error
//! response; with no request frame it exits silently.

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::constants::{RUN_UPDATE_ACTION, UPDATE_COMPLETE_MESSAGE, UPDATE_TIMEOUT};
use crate::core::UpdaterError;
use crate::messaging::{self, HostRequest, HostResponse};

/// Run as a Chrome native messaging host.
#[derive(Args)]
pub struct HostCommand {}

impl HostCommand {
    pub async fn execute(self, config_path: Option<&Path>) -> Result<()> {
        serve(tokio::io::stdin(), tokio::io::stdout(), config_path).await
    }
}

/// Handle one request/response exchange over the given streams.
///
/// Generic over the streams so tests can drive it with in-memory buffers.
async fn serve<R, W>(mut reader: R, mut writer: W, config_path: Option<&Path>) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let request = match messaging::read_message(&mut reader).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            debug!("no request frame on stdin, exiting");
            return Ok(());
        }
        Err(err) => {
            // A frame was consumed but could not be decoded; answer rather
            // than die silently
            warn!("failed to decode request: {err:#}");
            let response = HostResponse::error(format!("{err:#}"));
            return messaging::write_message(&mut writer, &response).await;
        }
    };

    let response = dispatch(&request, config_path).await;
    messaging::write_message(&mut writer, &response).await
}

/// Map a request to its response, catching every failure.
async fn dispatch(request: &HostRequest, config_path: Option<&Path>) -> HostResponse {
    match request.normalized_action().as_str() {
        RUN_UPDATE_ACTION => run_update(config_path)
            .await
            .unwrap_or_else(|err| HostResponse::error(format!("{err:#}"))),
        other => HostResponse::error(
            UpdaterError::UnknownAction {
                action: other.to_string(),
            }
            .to_string(),
        ),
    }
}

/// Run `extup update` as a subprocess and relay its outcome.
///
/// Spawns exactly one child per request, captures its output, and
/// enforces [`UPDATE_TIMEOUT`]; on expiry the child is killed and the
/// request is answered with a timeout error.
async fn run_update(config_path: Option<&Path>) -> Result<HostResponse> {
    let exe = std::env::current_exe().context("Failed to locate the extup executable")?;

    let mut command = Command::new(&exe);
    command.arg("update");
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("spawning updater subprocess: {}", exe.display());
    let child = command
        .spawn()
        .context("Failed to spawn the updater subprocess")?;

    // kill_on_drop reaps the child when the timed-out future is dropped
    let output = match timeout(UPDATE_TIMEOUT, child.wait_with_output()).await {
        Ok(result) => result.context("Failed to collect updater output")?,
        Err(_) => {
            warn!("updater exceeded its {}s budget", UPDATE_TIMEOUT.as_secs());
            return Ok(HostResponse::error(
                UpdaterError::Timeout {
                    seconds: UPDATE_TIMEOUT.as_secs(),
                }
                .to_string(),
            ));
        }
    };

    Ok(response_from_output(&output))
}

/// Map the updater subprocess's exit status and captured streams to a
/// response.
///
/// Success reports the child's stdout (or a fixed completion line when it
/// printed nothing); failure prefers stderr, then stdout, then the bare
/// exit code.
fn response_from_output(output: &std::process::Output) -> HostResponse {
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if output.status.success() {
        let message = if stdout.is_empty() {
            UPDATE_COMPLETE_MESSAGE.to_string()
        } else {
            stdout
        };
        HostResponse::ok(message)
    } else {
        let message = if !stderr.is_empty() {
            stderr
        } else if !stdout.is_empty() {
            stdout
        } else {
            format!("exit code {}", output.status.code().unwrap_or(-1))
        };
        HostResponse::error(message)
    }
}
