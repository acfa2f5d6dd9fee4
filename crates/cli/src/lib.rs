//! Shared plumbing for the verification binaries
//!
//! Both binaries run with zero required arguments; the defaults reproduce
//! the deployed-page checks verbatim. Flags exist to point the probe at a
//! different URL, engine, or viewport.

use clap::Args;

use sitecheck_probe::checks::DEFAULT_TARGET_URL;
use sitecheck_probe::{Engine, ProbeConfig};

/// Flags common to every probe binary
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Target page URL
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    pub url: String,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    pub browser: String,

    /// Run in headless mode
    #[arg(long, default_value = "true")]
    pub headless: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    pub viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    pub viewport_height: u32,

    /// Poll the URL for up to this many seconds before probing
    #[arg(long)]
    pub wait_secs: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProbeArgs {
    pub fn probe_config(&self) -> ProbeConfig {
        let engine = match self.browser.as_str() {
            "firefox" => Engine::Firefox,
            "webkit" => Engine::Webkit,
            _ => Engine::Chromium,
        };

        ProbeConfig {
            engine,
            headless: self.headless,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
        }
    }
}

/// Initialize logging; check results go to stdout via `println!`, tracing
/// carries diagnostics only
pub fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        probe: ProbeArgs,
    }

    #[test]
    fn defaults_reproduce_deployed_check() {
        let cli = TestCli::parse_from(["test"]);
        assert_eq!(cli.probe.url, "http://localhost:4321/perfect-pace/");
        assert!(cli.probe.headless);
        assert_eq!(cli.probe.wait_secs, None);

        let config = cli.probe.probe_config();
        assert_eq!(config.engine, Engine::Chromium);
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.viewport_height, 720);
    }

    #[test]
    fn browser_flag_selects_engine() {
        let cli = TestCli::parse_from(["test", "--browser", "firefox"]);
        assert_eq!(cli.probe.probe_config().engine, Engine::Firefox);

        // Unknown engine names fall back to chromium
        let cli = TestCli::parse_from(["test", "--browser", "netscape"]);
        assert_eq!(cli.probe.probe_config().engine, Engine::Chromium);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        TestCli::command().debug_assert();
    }
}
