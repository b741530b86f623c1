//! In-page element probes and bounded waits.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::trace;

use crate::error::StepError;
use crate::session::WallSession;

pub(crate) const BLANK_URL: &str = "about:blank";

const PROBE_BODY: &str = r#"
    const root = args.scope === null ? document : document.querySelector(args.scope);
    if (!root) return { present: false };
    const el = root.querySelector(args.selector);
    if (!el) return { present: false };
    const rect = el.getBoundingClientRect();
    const style = window.getComputedStyle(el);
    const visible = rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none';
    const enabled = !el.disabled && !el.readOnly && el.getAttribute('aria-disabled') !== 'true';
    const x = rect.left + rect.width / 2;
    const y = rect.top + rect.height / 2;
    const top = document.elementFromPoint(x, y);
    const hit = !!top && (top === el || el.contains(top));
    return { present: true, visible, enabled, hit, x, y };
"#;

const CLEAR_BODY: &str = r#"
    const el = document.querySelector(args.selector);
    if (!el) return null;
    el.focus();
    const proto = Object.getPrototypeOf(el);
    const desc = proto && Object.getOwnPropertyDescriptor(proto, 'value');
    if (desc && desc.set) { desc.set.call(el, ''); } else { el.value = ''; }
    el.dispatchEvent(new Event('input', { bubbles: true }));
    return el.value === '';
"#;

/// Snapshot of one element as seen from inside the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementState {
    pub present: bool,
    pub visible: bool,
    pub enabled: bool,
    /// The element (or a descendant) is topmost at its own center.
    pub hit: bool,
    /// Center in viewport coordinates.
    pub x: f64,
    pub y: f64,
}

impl ElementState {
    pub fn is_interactable(&self) -> bool {
        self.present && self.visible && self.enabled
    }

    pub fn is_clickable(&self) -> bool {
        self.is_interactable() && self.hit
    }
}

/// What a wait is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Condition {
    Present,
    Interactable,
    Clickable,
}

impl Condition {
    fn holds(self, state: &ElementState) -> bool {
        match self {
            Condition::Present => state.present,
            Condition::Interactable => state.is_interactable(),
            Condition::Clickable => state.is_clickable(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Present => write!(f, "present"),
            Condition::Interactable => write!(f, "interactable"),
            Condition::Clickable => write!(f, "clickable"),
        }
    }
}

/// Wrap `body` in a named function invoked with `args`.
pub(crate) fn script(name: &str, body: &str, args: Value) -> String {
    format!("(function {}(args) {{{}}})({})", name, body, args)
}

/// Probe `selector`, optionally only inside the first match of `scope`.
pub(crate) async fn probe(
    session: &dyn WallSession,
    selector: &str,
    scope: Option<&str>,
) -> Result<ElementState, StepError> {
    let source = script(
        "mediawallProbe",
        PROBE_BODY,
        json!({ "scope": scope, "selector": selector }),
    );
    let value = session.evaluate(&source).await?;
    serde_json::from_value(value)
        .map_err(|e| StepError::Script(format!("probe of '{}' returned {}", selector, e)))
}

/// Poll until `selector` satisfies `condition` or `timeout` elapses.
///
/// Script errors while polling are treated as "not yet": the page may be
/// between documents. A dead driver ends the wait immediately.
pub(crate) async fn wait_for(
    session: &dyn WallSession,
    selector: &str,
    scope: Option<&str>,
    condition: Condition,
    timeout: Duration,
    poll: Duration,
) -> Result<ElementState, StepError> {
    let start = Instant::now();

    loop {
        match probe(session, selector, scope).await {
            Ok(state) if condition.holds(&state) => return Ok(state),
            Ok(_) => {}
            Err(StepError::Script(e)) => trace!(selector, error = %e, "Probe failed, polling again"),
            Err(e) => return Err(e),
        }

        if start.elapsed() >= timeout {
            return Err(StepError::Timeout(format!(
                "'{}' not {} after {:?}",
                selector, condition, timeout
            )));
        }

        tokio::time::sleep(poll).await;
    }
}

/// Clear an input through its value setter. `Ok(false)` means the page
/// kept the text.
pub(crate) async fn clear_value(
    session: &dyn WallSession,
    selector: &str,
) -> Result<bool, StepError> {
    let source = script("mediawallClear", CLEAR_BODY, json!({ "selector": selector }));
    match session.evaluate(&source).await? {
        Value::Null => Err(StepError::ElementNotFound(selector.to_string())),
        value => Ok(value.as_bool().unwrap_or(false)),
    }
}
