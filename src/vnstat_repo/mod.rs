// Traffic reports via the vnstat CLI. vnstat owns the history database; this
// repo only captures report text, one invocation per granularity.

use std::time::Duration;

use tokio::process::Command;

use crate::config::VnstatConfig;
use crate::models::Granularity;

/// Interface names that may appear on a vnstat command line (Linux caps
/// interface names at 15 bytes). Checked before any invocation; everything
/// else is a configuration error, not a runtime fallback.
pub fn interface_name_is_valid(name: &str) -> bool {
    let re = regex::Regex::new(r"^[A-Za-z0-9._-]{1,15}$").expect("regex is valid");
    re.is_match(name)
}

#[derive(Debug, thiserror::Error)]
pub enum VnstatError {
    #[error("invalid interface name {0:?}: must match [A-Za-z0-9._-]{{1,15}}")]
    InvalidInterface(String),
}

#[derive(Debug)]
pub struct VnstatRepo {
    binary: String,
    interface: String,
    timeout: Duration,
}

impl VnstatRepo {
    pub fn new(config: &VnstatConfig) -> Result<Self, VnstatError> {
        if !interface_name_is_valid(&config.interface) {
            return Err(VnstatError::InvalidInterface(config.interface.clone()));
        }
        Ok(Self {
            binary: config.binary.clone(),
            interface: config.interface.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Runs `<binary> -i <interface> <flag>` and returns captured stdout.
    /// Arguments are passed as a vector, never through a shell. Missing
    /// binary, non-zero exit, and timeout all degrade to an empty string so
    /// one dead granularity leaves the rest of the dashboard rendering.
    pub async fn fetch(&self, granularity: Granularity) -> String {
        let result = tokio::time::timeout(
            self.timeout,
            Command::new(&self.binary)
                .args(["-i", &self.interface, granularity.flag()])
                .kill_on_drop(true)
                .output(),
        )
        .await;

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::warn!(
                    granularity = granularity.label(),
                    error = %e,
                    "vnstat invocation failed"
                );
                return String::new();
            }
            Err(_) => {
                tracing::warn!(
                    granularity = granularity.label(),
                    timeout_secs = self.timeout.as_secs(),
                    "vnstat invocation timed out"
                );
                return String::new();
            }
        };

        if !output.status.success() {
            tracing::warn!(
                granularity = granularity.label(),
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "vnstat exited with failure"
            );
            return String::new();
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
