//! Verify the target page declares an SVG favicon link
//!
//! Prints two lines: whether the link element exists and the href of the
//! first match. A missing favicon is a soft result and still exits 0; only
//! navigation or driver failures exit non-zero.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use sitecheck_cli::{init_tracing, ProbeArgs};
use sitecheck_probe::preflight::wait_for_server;
use sitecheck_probe::{BrowserProbe, FaviconCheck};

#[derive(Parser, Debug)]
#[command(name = "verify-favicon")]
#[command(author, version, about = "Check the target page declares an SVG favicon")]
struct Args {
    #[command(flatten)]
    probe: ProbeArgs,

    /// Screenshot output path, overwritten each run
    #[arg(long, default_value = "verification/verification.png")]
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
    let check = FaviconCheck {
        target_url: args.probe.url.clone(),
        screenshot_path: args.screenshot,
    };

    let report = check.run(&probe).await?;
    for line in report.lines() {
        println!("{}", line);
    }

    Ok(())
}
