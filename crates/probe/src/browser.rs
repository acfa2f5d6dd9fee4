//! Browser driver: runs generated Playwright scripts under `node`
//!
//! The Rust side owns only the node child process; the browser itself is
//! opened and closed inside the generated script, so the instance is
//! released on every exit path including mid-probe failures.

use std::collections::HashMap;
use std::process::{Command, Stdio};

use serde::Deserialize;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{ProbeError, ProbeResult};
use crate::script::{build_script, ProbeStep};

/// Browser engine to launch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Engine {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Chromium => "chromium",
            Engine::Firefox => "firefox",
            Engine::Webkit => "webkit",
        }
    }
}

/// Configuration for a browser probe
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub engine: Engine,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            engine: Engine::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

/// Value deposited by a query or evaluate step
#[derive(Debug, Clone, Deserialize)]
pub struct StepValue {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Results of a completed probe, keyed by step key
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    values: HashMap<String, StepValue>,
}

impl ProbeOutcome {
    /// Element count recorded by a query step
    pub fn count(&self, key: &str) -> ProbeResult<u64> {
        self.get(key)?
            .count
            .ok_or_else(|| ProbeError::MissingResult(key.to_string()))
    }

    /// Attribute value recorded by a query step (None when no element matched)
    pub fn string(&self, key: &str) -> ProbeResult<Option<String>> {
        Ok(self.get(key)?.value.as_str().map(String::from))
    }

    /// Boolean recorded by an evaluate step
    pub fn boolean(&self, key: &str) -> ProbeResult<bool> {
        self.get(key)?
            .value
            .as_bool()
            .ok_or_else(|| ProbeError::MissingResult(key.to_string()))
    }

    fn get(&self, key: &str) -> ProbeResult<&StepValue> {
        self.values
            .get(key)
            .ok_or_else(|| ProbeError::MissingResult(key.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ScriptOutput {
    ok: bool,
    #[serde(default)]
    results: HashMap<String, StepValue>,
}

#[derive(Debug, Deserialize)]
struct ScriptFailure {
    ok: bool,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Handle for running probes against a browser engine
pub struct BrowserProbe {
    config: ProbeConfig,
}

impl BrowserProbe {
    /// Create a probe handle, verifying Playwright is available
    pub fn new(config: ProbeConfig) -> ProbeResult<Self> {
        Self::check_playwright_installed()?;
        Ok(Self { config })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> ProbeResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(ProbeError::PlaywrightNotFound),
        }
    }

    /// Run a linear step sequence and collect the recorded values
    pub async fn run(&self, steps: &[ProbeStep]) -> ProbeResult<ProbeOutcome> {
        // Screenshot parents must exist before Playwright writes the file
        for step in steps {
            if let ProbeStep::Screenshot { path } = step {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
            }
        }

        let script = build_script(&self.config, steps);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("probe.js");
        std::fs::write(&script_path, &script)?;

        debug!("Running probe script: {}", script_path.display());

        // Runs in the invocation cwd so `require('playwright')` resolves
        // against the project's node_modules and relative screenshot paths
        // land where the caller expects them
        let output = TokioCommand::new("node")
            .arg(&script_path)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_probe_output(&stdout)
    }
}

/// Parse the JSON result line printed by a successful script run
fn parse_probe_output(stdout: &str) -> ProbeResult<ProbeOutcome> {
    for line in stdout.lines().rev() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Ok(parsed) = serde_json::from_str::<ScriptOutput>(line) {
            if parsed.ok {
                return Ok(ProbeOutcome {
                    values: parsed.results,
                });
            }
        }
    }
    Err(ProbeError::OutputParse(truncate(stdout, 200)))
}

/// Map the script's JSON error object to a typed error by failing phase
fn classify_failure(stderr: &str) -> ProbeError {
    for line in stderr.lines().rev() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Ok(failure) = serde_json::from_str::<ScriptFailure>(line) {
            if failure.ok {
                continue;
            }
            let message = failure.error.unwrap_or_else(|| "unknown error".to_string());
            return match failure.phase.as_deref() {
                Some("goto") => ProbeError::Navigation(message),
                Some("evaluate") => ProbeError::Evaluation(message),
                _ => ProbeError::Script(message),
            };
        }
    }
    ProbeError::Script(truncate(stderr, 200))
}

fn truncate(s: &str, max: usize) -> String {
    let s = s.trim();
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_output_extracts_values() {
        let stdout = concat!(
            "some playwright noise\n",
            r#"{"ok":true,"results":{"favicon":{"count":1,"value":"/favicon.svg"},"gtag":{"value":true}}}"#,
            "\n",
        );
        let outcome = parse_probe_output(stdout).unwrap();
        assert_eq!(outcome.count("favicon").unwrap(), 1);
        assert_eq!(
            outcome.string("favicon").unwrap().as_deref(),
            Some("/favicon.svg")
        );
        assert!(outcome.boolean("gtag").unwrap());
    }

    #[test]
    fn parse_output_null_attribute_is_none() {
        let stdout = r#"{"ok":true,"results":{"favicon":{"count":0,"value":null}}}"#;
        let outcome = parse_probe_output(stdout).unwrap();
        assert_eq!(outcome.count("favicon").unwrap(), 0);
        assert_eq!(outcome.string("favicon").unwrap(), None);
    }

    #[test]
    fn parse_output_rejects_garbage() {
        let err = parse_probe_output("not json at all").unwrap_err();
        assert!(matches!(err, ProbeError::OutputParse(_)));
    }

    #[test]
    fn missing_key_is_an_error() {
        let stdout = r#"{"ok":true,"results":{}}"#;
        let outcome = parse_probe_output(stdout).unwrap();
        assert!(matches!(
            outcome.count("favicon").unwrap_err(),
            ProbeError::MissingResult(_)
        ));
    }

    #[test]
    fn goto_failure_classified_as_navigation() {
        let stderr = r#"{"ok":false,"phase":"goto","error":"net::ERR_CONNECTION_REFUSED"}"#;
        assert!(matches!(
            classify_failure(stderr),
            ProbeError::Navigation(msg) if msg.contains("CONNECTION_REFUSED")
        ));
    }

    #[test]
    fn evaluate_failure_classified_as_evaluation() {
        let stderr = r#"{"ok":false,"phase":"evaluate","error":"Execution context was destroyed"}"#;
        assert!(matches!(
            classify_failure(stderr),
            ProbeError::Evaluation(_)
        ));
    }

    #[test]
    fn unparseable_stderr_is_script_error() {
        assert!(matches!(
            classify_failure("node: command crashed"),
            ProbeError::Script(_)
        ));
    }

    #[test]
    fn engine_names() {
        assert_eq!(Engine::Chromium.as_str(), "chromium");
        assert_eq!(Engine::Firefox.as_str(), "firefox");
        assert_eq!(Engine::Webkit.as_str(), "webkit");
        assert_eq!(Engine::default(), Engine::Chromium);
    }
}
