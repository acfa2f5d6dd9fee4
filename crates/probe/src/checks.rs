//! The two shipped page checks: favicon markup and the analytics snippet
//!
//! Each check assembles a linear step sequence for [`BrowserProbe`] and
//! turns the recorded values into a report whose printed lines are the only
//! user-visible output. Missing markup is a soft result (a negative line),
//! never an error; only navigation/evaluation failures propagate.

use std::path::PathBuf;

use crate::browser::BrowserProbe;
use crate::error::ProbeResult;
use crate::script::ProbeStep;

/// Page under test, served by an external web server
pub const DEFAULT_TARGET_URL: &str = "http://localhost:4321/perfect-pace/";

/// SVG favicon declaration expected in the page head
pub const FAVICON_SELECTOR: &str = r#"link[rel="icon"][type="image/svg+xml"]"#;

/// Placeholder measurement ID used when no real one is supplied
pub const DEFAULT_TRACKING_ID: &str = "G-XXXXXXXXXX";

/// Page-context check that the analytics entry point is callable
pub const GTAG_EXPRESSION: &str = "typeof window.gtag === 'function'";

/// The gtag loader URL for a measurement ID
pub fn ga_loader_url(tracking_id: &str) -> String {
    format!("https://www.googletagmanager.com/gtag/js?id={}", tracking_id)
}

/// Selector matching a script tag whose src is exactly the loader URL
pub fn ga_script_selector(tracking_id: &str) -> String {
    format!(r#"script[src="{}"]"#, ga_loader_url(tracking_id))
}

/// Verifies the SVG favicon link element on the target page
#[derive(Debug, Clone)]
pub struct FaviconCheck {
    pub target_url: String,
    pub screenshot_path: PathBuf,
}

impl Default for FaviconCheck {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            screenshot_path: PathBuf::from("verification/verification.png"),
        }
    }
}

impl FaviconCheck {
    /// Step sequence: navigate, query the link tag, screenshot
    pub fn steps(&self) -> Vec<ProbeStep> {
        vec![
            ProbeStep::Goto {
                url: self.target_url.clone(),
            },
            ProbeStep::QueryAttribute {
                selector: FAVICON_SELECTOR.to_string(),
                attribute: "href".to_string(),
                key: "favicon".to_string(),
            },
            ProbeStep::Screenshot {
                path: self.screenshot_path.clone(),
            },
        ]
    }

    pub async fn run(&self, probe: &BrowserProbe) -> ProbeResult<FaviconReport> {
        let outcome = probe.run(&self.steps()).await?;
        Ok(FaviconReport {
            found: outcome.count("favicon")? > 0,
            href: outcome.string("favicon")?,
        })
    }
}

/// Outcome of a favicon check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaviconReport {
    pub found: bool,
    pub href: Option<String>,
}

impl FaviconReport {
    /// The two printed lines: presence, then the href of the first match
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Favicon found: {}", self.found),
            format!("Favicon href: {}", self.href.as_deref().unwrap_or("None")),
        ]
    }
}

/// Verifies the Google Analytics loader tag and the `gtag` global
#[derive(Debug, Clone)]
pub struct AnalyticsCheck {
    pub target_url: String,
    pub tracking_id: String,
    pub screenshot_path: PathBuf,
}

impl Default for AnalyticsCheck {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            tracking_id: DEFAULT_TRACKING_ID.to_string(),
            screenshot_path: PathBuf::from("verification/ga_verification.png"),
        }
    }
}

impl AnalyticsCheck {
    /// Step sequence: navigate, query the script tag, evaluate the global,
    /// screenshot. The two inspection steps are independent; a missing
    /// script tag does not skip the gtag evaluation.
    pub fn steps(&self) -> Vec<ProbeStep> {
        vec![
            ProbeStep::Goto {
                url: self.target_url.clone(),
            },
            ProbeStep::QueryAttribute {
                selector: ga_script_selector(&self.tracking_id),
                attribute: "src".to_string(),
                key: "ga_script".to_string(),
            },
            ProbeStep::EvaluateBool {
                expression: GTAG_EXPRESSION.to_string(),
                key: "gtag".to_string(),
            },
            ProbeStep::Screenshot {
                path: self.screenshot_path.clone(),
            },
        ]
    }

    pub async fn run(&self, probe: &BrowserProbe) -> ProbeResult<AnalyticsReport> {
        let outcome = probe.run(&self.steps()).await?;
        Ok(AnalyticsReport {
            script_tag_found: outcome.count("ga_script")? > 0,
            gtag_defined: outcome.boolean("gtag")?,
        })
    }
}

/// Outcome of an analytics check; the two fields report independently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub script_tag_found: bool,
    pub gtag_defined: bool,
}

impl AnalyticsReport {
    pub fn lines(&self) -> Vec<String> {
        let script_line = if self.script_tag_found {
            "SUCCESS: Google Analytics script found."
        } else {
            "FAILURE: Google Analytics script NOT found."
        };
        let gtag_line = if self.gtag_defined {
            "SUCCESS: window.gtag is defined."
        } else {
            "FAILURE: window.gtag is NOT defined."
        };
        vec![script_line.to_string(), gtag_line.to_string()]
    }
}
