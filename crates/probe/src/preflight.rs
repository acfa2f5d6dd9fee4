//! Optional wait-for-server poll
//!
//! The web server is an external collaborator; by default a probe assumes
//! it is already up and a refused connection propagates as a navigation
//! failure. Callers that want to tolerate a server still starting can poll
//! the target URL first.

use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{ProbeError, ProbeResult};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll the URL until it answers with a success status or the timeout
/// elapses. Always makes at least one attempt.
pub async fn wait_for_server(url: &str, timeout: Duration) -> ProbeResult<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;

    let start = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;

        match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            Ok(resp) => {
                warn!("Preflight returned {}", resp.status());
            }
            Err(e) => {
                if attempts == 1 {
                    info!("Waiting for server at {}...", url);
                }
                // Connection refused is expected while the server starts
                if !e.is_connect() {
                    warn!("Preflight error: {}", e);
                }
            }
        }

        if start.elapsed() >= timeout {
            return Err(ProbeError::ServerUnavailable(attempts));
        }

        sleep(POLL_INTERVAL).await;
    }
}
