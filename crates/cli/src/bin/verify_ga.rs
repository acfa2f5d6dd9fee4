//! Verify the Google Analytics snippet on the target page
//!
//! Two independent checks, each printing its own SUCCESS/FAILURE line: the
//! gtag loader script tag with the expected measurement ID, and a
//! page-context check that `window.gtag` is callable. FAILURE lines are
//! informational; the process still exits 0 unless the probe itself fails.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use sitecheck_cli::{init_tracing, ProbeArgs};
use sitecheck_probe::checks::DEFAULT_TRACKING_ID;
use sitecheck_probe::preflight::wait_for_server;
use sitecheck_probe::{AnalyticsCheck, BrowserProbe};

#[derive(Parser, Debug)]
#[command(name = "verify-ga")]
#[command(author, version, about = "Check the target page loads Google Analytics")]
struct Args {
    #[command(flatten)]
    probe: ProbeArgs,

    /// Measurement ID expected in the gtag loader URL
    #[arg(long, env = "SITECHECK_GA_ID", default_value = DEFAULT_TRACKING_ID)]
    tracking_id: String,

    /// Screenshot output path, overwritten each run
    #[arg(long, default_value = "verification/ga_verification.png")]
    screenshot: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.probe.verbose);

    if let Some(secs) = args.probe.wait_secs {
        wait_for_server(&args.probe.url, Duration::from_secs(secs)).await?;
    }

    let probe = BrowserProbe::new(args.probe.probe_config())?;
    let check = AnalyticsCheck {
        target_url: args.probe.url.clone(),
        tracking_id: args.tracking_id,
        screenshot_path: args.screenshot,
    };

    let report = check.run(&probe).await?;
    for line in report.lines() {
        println!("{}", line);
    }

    Ok(())
}
