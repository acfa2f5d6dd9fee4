//! Sitecheck page probe
//!
//! Drives a headless browser (via Playwright) against an already-running
//! web server and verifies that the served page carries expected markup.
//!
//! A probe is a linear step sequence with no branching:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 BrowserProbe (Rust)                 │
//! ├─────────────────────────────────────────────────────┤
//! │  run(steps) -> ProbeOutcome                         │
//! │    ├── Goto { url }                                 │
//! │    ├── QueryAttribute { selector, attribute, key }  │
//! │    ├── EvaluateBool { expression, key }             │
//! │    └── Screenshot { path }                          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The steps are compiled into a Playwright script which is executed under
//! `node`; the script prints a single JSON result line and always closes
//! the browser before exiting. The two shipped checks ([`FaviconCheck`]
//! and [`AnalyticsCheck`]) are thin step assemblies over this driver.

pub mod browser;
pub mod checks;
pub mod error;
pub mod preflight;
pub mod script;

pub use browser::{BrowserProbe, Engine, ProbeConfig, ProbeOutcome};
pub use checks::{AnalyticsCheck, AnalyticsReport, FaviconCheck, FaviconReport};
pub use error::{ProbeError, ProbeResult};
pub use script::ProbeStep;
