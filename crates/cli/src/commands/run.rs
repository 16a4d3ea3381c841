//! The `run` command: replay user actions against a page fixture.
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!     {"action": "type", "selector": "#search-input", "text": "red"},
//!     {"action": "click", "selector": ".quantity-btn.decrease"},
//!     {"action": "submit", "selector": "#checkout"},
//!     {"action": "toast", "message": "Saved!", "kind": "success"},
//!     {"action": "advance", "ms": 3000}
//! ]
//! ```
//!
//! The controller is installed at the document root and the page is loaded
//! before the first step.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shopfront_core::PageViewModel;
use shopfront_page::{Page, PageConfig, PageFixture, PendingTimer, Window, controller};

use super::{CliError, read_file};

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Click { selector: String },
    Type { selector: String, text: String },
    Clear { selector: String },
    KeyUp { selector: String, key: String },
    Submit { selector: String },
    Toast {
        message: String,
        #[serde(default)]
        kind: Option<String>,
    },
    Advance { ms: u64 },
    Flush,
}

/// Final state of the page after the script.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub html: String,
    pub window: Window,
    pub now_ms: u64,
    pub pending_timers: Vec<PendingTimer>,
    pub model: PageViewModel,
}

/// Run the command and print the report as pretty JSON.
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, or a step fails.
#[allow(clippy::print_stdout)]
pub fn run(page: &Path, script: Option<&Path>, config: PageConfig) -> Result<(), CliError> {
    let fixture = PageFixture::from_json(&read_file(page)?)?;
    let steps = match script {
        Some(path) => parse_script(&read_file(path)?)?,
        None => Vec::new(),
    };

    let report = execute(&fixture, &steps, config)?;
    let json = serde_json::to_string_pretty(&report).map_err(CliError::Output)?;
    println!("{json}");
    Ok(())
}

/// # Errors
///
/// Returns `CliError::Script` if the JSON is not an array of steps.
pub fn parse_script(json: &str) -> Result<Vec<Step>, CliError> {
    serde_json::from_str(json).map_err(CliError::Script)
}

/// Build the page, attach the behaviors, and replay `steps`.
///
/// # Errors
///
/// Returns the first error raised by the page.
pub fn execute(fixture: &PageFixture, steps: &[Step], config: PageConfig) -> Result<RunReport, CliError> {
    let mut page = Page::from_fixture(fixture)?;
    let root = page.document().root();
    let handle = controller::install(&mut page, root, config)?;
    page.load()?;

    for (index, step) in steps.iter().enumerate() {
        tracing::debug!(index, ?step, "Running step");
        apply_step(&mut page, &handle, step)?;
    }

    Ok(RunReport {
        html: page.html(),
        window: page.window().clone(),
        now_ms: page.now_ms(),
        pending_timers: page.pending_timers(),
        model: handle.model(),
    })
}

fn apply_step(page: &mut Page, handle: &controller::ControllerHandle, step: &Step) -> Result<(), CliError> {
    match step {
        Step::Click { selector } => {
            page.click_selector(selector)?;
        }
        Step::Type { selector, text } => {
            let node = page.select_one(selector)?;
            page.type_text(node, text)?;
        }
        Step::Clear { selector } => {
            let node = page.select_one(selector)?;
            page.clear(node)?;
        }
        Step::KeyUp { selector, key } => {
            let node = page.select_one(selector)?;
            page.key_up(node, key)?;
        }
        Step::Submit { selector } => {
            page.submit_selector(selector)?;
        }
        Step::Toast { message, kind } => {
            handle.show_toast(page, message, kind.as_deref())?;
        }
        Step::Advance { ms } => {
            page.advance_time(*ms)?;
        }
        Step::Flush => {
            page.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_page::PageError;

    use super::*;

    const LISTING: &str = r#"{
        "url": "https://shop.test/products",
        "body": [
            {"tag": "input", "id": "search-input"},
            {"tag": "div", "class": "product-card", "id": "shirt", "children": [{"tag": "h3", "text": "Red Shirt"}]},
            {"tag": "div", "class": "product-card", "id": "jeans", "children": [{"tag": "h3", "text": "Blue Jeans"}]},
            {"tag": "div", "class": "cart-line", "children": [
                {"tag": "button", "class": "quantity-btn decrease", "attrs": {"type": "button"}},
                {"tag": "input", "class": "quantity-input", "id": "qty", "value": "2"}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_script() {
        let steps = parse_script(
            r##"[
                {"action": "type", "selector": "#search-input", "text": "red"},
                {"action": "key_up", "selector": "#search-input", "key": "Enter"},
                {"action": "toast", "message": "Saved!"},
                {"action": "advance", "ms": 3000},
                {"action": "flush"}
            ]"##,
        )
        .unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(
            steps[2],
            Step::Toast {
                message: "Saved!".to_string(),
                kind: None
            }
        );
        assert!(matches!(
            parse_script(r#"[{"action": "hover"}]"#),
            Err(CliError::Script(_))
        ));
    }

    #[test]
    fn test_execute_listing() {
        let fixture = PageFixture::from_json(LISTING).unwrap();
        let steps = parse_script(
            r##"[
                {"action": "type", "selector": "#search-input", "text": "red"},
                {"action": "click", "selector": ".decrease"},
                {"action": "toast", "message": "Saved!"}
            ]"##,
        )
        .unwrap();

        let report = execute(&fixture, &steps, PageConfig::default()).unwrap();
        assert!(report.html.contains("id=\"jeans\" style=\"display: none\""));
        assert!(report.html.contains("value=\"1\""));
        assert!(report.html.contains("bg-green-500"));
        assert_eq!(report.pending_timers.len(), 1);
        assert_eq!(report.model.search_term().as_str(), "red");
    }

    #[test]
    fn test_execute_advances_time() {
        let fixture = PageFixture::from_json(LISTING).unwrap();
        let steps = parse_script(
            r#"[{"action": "toast", "message": "Saved!", "kind": "error"}, {"action": "advance", "ms": 3000}]"#,
        )
        .unwrap();

        let report = execute(&fixture, &steps, PageConfig::default()).unwrap();
        assert!(!report.html.contains("bg-red-500"));
        assert_eq!(report.now_ms, 3000);
        assert!(report.pending_timers.is_empty());
    }

    #[test]
    fn test_execute_reports_missing_selector() {
        let fixture = PageFixture::from_json(LISTING).unwrap();
        let steps = vec![Step::Click {
            selector: "#nope".to_string(),
        }];
        assert!(matches!(
            execute(&fixture, &steps, PageConfig::default()),
            Err(CliError::Page(PageError::SelectorNotFound(_)))
        ));
    }
}
