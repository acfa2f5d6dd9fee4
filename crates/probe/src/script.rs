//! Playwright script generation
//!
//! A probe is compiled into a standalone Playwright script executed under
//! `node`. Query and evaluate steps deposit their values in a `results`
//! object keyed by step key; the script prints one JSON line on success and
//! a JSON error object (with the failing phase) on stderr otherwise. The
//! browser is closed in a `finally` block on every exit path.

use std::path::PathBuf;

use crate::browser::ProbeConfig;

/// A single step in a linear probe sequence
#[derive(Debug, Clone)]
pub enum ProbeStep {
    /// Navigate to an absolute URL
    Goto { url: String },

    /// Count elements matching a selector and fetch an attribute of the
    /// first match (null when nothing matches)
    QueryAttribute {
        selector: String,
        attribute: String,
        key: String,
    },

    /// Evaluate a boolean expression in page context
    EvaluateBool { expression: String, key: String },

    /// Write a screenshot of the current page
    Screenshot { path: PathBuf },
}

impl ProbeStep {
    /// Short name for logging
    pub fn name(&self) -> String {
        match self {
            ProbeStep::Goto { url } => format!("goto:{}", url),
            ProbeStep::QueryAttribute { key, .. } => format!("query:{}", key),
            ProbeStep::EvaluateBool { key, .. } => format!("evaluate:{}", key),
            ProbeStep::Screenshot { path } => format!("screenshot:{}", path.display()),
        }
    }

    /// The phase string recorded before this step runs, used to classify
    /// failures reported by the script's catch block
    pub(crate) fn phase(&self) -> &'static str {
        match self {
            ProbeStep::Goto { .. } => "goto",
            ProbeStep::QueryAttribute { .. } => "query",
            ProbeStep::EvaluateBool { .. } => "evaluate",
            ProbeStep::Screenshot { .. } => "screenshot",
        }
    }
}

/// Escape a string for embedding in a single-quoted JS literal
pub(crate) fn js_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the full Playwright script for a step sequence
pub fn build_script(config: &ProbeConfig, steps: &[ProbeStep]) -> String {
    let mut script = String::new();

    script.push_str(&format!(
        r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {engine}.launch({{ headless: {headless} }});
  const results = {{}};
  let phase = 'launch';
  try {{
    const context = await browser.newContext({{
      viewport: {{ width: {width}, height: {height} }}
    }});
    const page = await context.newPage();
"#,
        engine = config.engine.as_str(),
        headless = config.headless,
        width = config.viewport_width,
        height = config.viewport_height,
    ));

    for (i, step) in steps.iter().enumerate() {
        script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step.name()));
        script.push_str(&format!("    phase = '{}';\n", step.phase()));
        script.push_str(&step_to_js(step));
    }

    script.push_str(
        r#"
    console.log(JSON.stringify({ ok: true, results }));
  } catch (error) {
    console.error(JSON.stringify({ ok: false, phase, error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
    );

    script
}

fn step_to_js(step: &ProbeStep) -> String {
    match step {
        ProbeStep::Goto { url } => {
            format!("    await page.goto('{}');\n", js_escape(url))
        }
        ProbeStep::QueryAttribute {
            selector,
            attribute,
            key,
        } => {
            format!(
                r#"    {{
      const loc = page.locator('{selector}');
      const count = await loc.count();
      results['{key}'] = {{
        count,
        value: count > 0 ? await loc.first().getAttribute('{attribute}') : null
      }};
    }}
"#,
                selector = js_escape(selector),
                attribute = js_escape(attribute),
                key = js_escape(key),
            )
        }
        ProbeStep::EvaluateBool { expression, key } => {
            format!(
                "    results['{}'] = {{ value: await page.evaluate('{}') }};\n",
                js_escape(key),
                js_escape(expression),
            )
        }
        ProbeStep::Screenshot { path } => {
            format!(
                "    await page.screenshot({{ path: '{}' }});\n",
                js_escape(&path.to_string_lossy()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::ProbeConfig;

    fn steps() -> Vec<ProbeStep> {
        vec![
            ProbeStep::Goto {
                url: "http://localhost:4321/perfect-pace/".to_string(),
            },
            ProbeStep::QueryAttribute {
                selector: r#"link[rel="icon"][type="image/svg+xml"]"#.to_string(),
                attribute: "href".to_string(),
                key: "favicon".to_string(),
            },
            ProbeStep::Screenshot {
                path: "verification/verification.png".into(),
            },
        ]
    }

    #[test]
    fn script_has_header_and_cleanup() {
        let script = build_script(&ProbeConfig::default(), &steps());
        assert!(script.contains("chromium.launch({ headless: true })"));
        assert!(script.contains("viewport: { width: 1280, height: 720 }"));
        // Cleanup runs on every exit path
        assert!(script.contains("} finally {"));
        assert!(script.contains("await browser.close();"));
    }

    #[test]
    fn script_navigates_before_screenshot() {
        let script = build_script(&ProbeConfig::default(), &steps());
        let goto = script.find("await page.goto").unwrap();
        let shot = script.find("await page.screenshot").unwrap();
        assert!(goto < shot);
    }

    #[test]
    fn query_step_records_count_and_attribute() {
        let script = build_script(&ProbeConfig::default(), &steps());
        assert!(script.contains(r#"page.locator('link[rel="icon"][type="image/svg+xml"]')"#));
        assert!(script.contains("await loc.count()"));
        assert!(script.contains("getAttribute('href')"));
        assert!(script.contains("results['favicon']"));
    }

    #[test]
    fn evaluate_step_escapes_inner_quotes() {
        let step = ProbeStep::EvaluateBool {
            expression: "typeof window.gtag === 'function'".to_string(),
            key: "gtag".to_string(),
        };
        let script = build_script(&ProbeConfig::default(), &[step]);
        assert!(script.contains(r"page.evaluate('typeof window.gtag === \'function\'')"));
    }

    #[test]
    fn js_escape_handles_backslash_and_newline() {
        assert_eq!(js_escape(r"a\b"), r"a\\b");
        assert_eq!(js_escape("a'b"), r"a\'b");
        assert_eq!(js_escape("a\nb"), r"a\nb");
    }

    #[test]
    fn phases_track_failure_classification() {
        let script = build_script(&ProbeConfig::default(), &steps());
        assert!(script.contains("phase = 'goto';"));
        assert!(script.contains("phase = 'query';"));
        assert!(script.contains("phase = 'screenshot';"));
    }
}
