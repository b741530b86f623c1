//! In-memory sessions and launcher used by the engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use mediawall_config::SearchAppConfig;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::driver::{ElementState, BLANK_URL};
use crate::error::{StepError, WallError};
use crate::session::{LaunchSpec, SessionLauncher, WallSession};

/// Something a fake session was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    Navigate(String),
    Redirect(String),
    Click(f64, f64),
    Insert(String),
    Key(String),
    KeyCombo(String),
    Clear(String),
    Mute,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FakeMedia {
    pub muted: bool,
    pub volume: f64,
}

/// Scriptable page state shared between a fake session and the test.
#[derive(Debug, Clone)]
pub(crate) struct FakePage {
    pub url: String,
    pub alive: bool,
    pub launch_muted: bool,
    /// Probe answers keyed by selector, or `"scope >> selector"` for scoped probes.
    pub elements: HashMap<String, ElementState>,
    pub clear_supported: bool,
    pub refused_urls: HashSet<String>,
    /// Navigating here kills the browser.
    pub crash_on: Option<String>,
    pub redirect_fails: bool,
    /// Element the app re-renders away on the next click.
    pub detach_on_click: Option<String>,
    pub media: Vec<FakeMedia>,
    pub observers_installed: usize,
    pub actions: Vec<Action>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            url: BLANK_URL.to_string(),
            alive: true,
            launch_muted: false,
            elements: HashMap::new(),
            clear_supported: true,
            refused_urls: HashSet::new(),
            crash_on: None,
            redirect_fails: false,
            detach_on_click: None,
            media: Vec::new(),
            observers_installed: 0,
            actions: Vec::new(),
        }
    }
}

pub(crate) fn clickable(x: f64, y: f64) -> ElementState {
    ElementState {
        present: true,
        visible: true,
        enabled: true,
        hit: true,
        x,
        y,
    }
}

pub(crate) fn scoped(scope: &str, selector: &str) -> String {
    format!("{} >> {}", scope, selector)
}

impl FakePage {
    /// A streaming app with a ready search input and one clickable result.
    pub fn streaming_app(app: &SearchAppConfig) -> Self {
        Self::default()
            .with_element(&app.search_input_selector, clickable(100.0, 20.0))
            .with_element(&app.result_selector, clickable(200.0, 120.0))
    }

    pub fn with_element(mut self, key: &str, state: ElementState) -> Self {
        self.elements.insert(key.to_string(), state);
        self
    }

    pub fn into_session(self, slot: usize) -> (FakeSession, Arc<Mutex<FakePage>>) {
        let page = Arc::new(Mutex::new(self));
        (
            FakeSession {
                slot,
                page: page.clone(),
            },
            page,
        )
    }

    /// Insert a media element the way a page script would.
    pub fn add_media(&mut self) {
        let observed = self.observers_installed > 0;
        self.media.push(FakeMedia {
            muted: observed,
            volume: if observed { 0.0 } else { 1.0 },
        });
    }

    pub fn navigations(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Navigate(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clicks(&self) -> Vec<(f64, f64)> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Click(x, y) => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn was_muted(&self) -> bool {
        self.actions.contains(&Action::Mute)
    }

    fn run_script(&mut self, source: &str) -> Result<Value, StepError> {
        let (name, args) = parse_script(source)
            .ok_or_else(|| StepError::Script(format!("unrecognised script: {}", source)))?;
        let arg = |key: &str| args[key].as_str().map(str::to_string);

        match name.as_str() {
            "mediawallProbe" => {
                let selector = arg("selector").unwrap_or_default();
                let key = match arg("scope") {
                    Some(scope) => scoped(&scope, &selector),
                    None => selector,
                };
                let state = self.elements.get(&key).copied().unwrap_or_default();
                Ok(serde_json::to_value(state).unwrap_or(Value::Null))
            }
            "mediawallClear" => {
                let selector = arg("selector").unwrap_or_default();
                if !self.elements.get(&selector).is_some_and(|e| e.present) {
                    return Ok(Value::Null);
                }
                self.actions.push(Action::Clear(selector));
                Ok(json!(self.clear_supported))
            }
            "mediawallMute" => {
                self.actions.push(Action::Mute);
                for media in &mut self.media {
                    media.muted = true;
                    media.volume = 0.0;
                }
                if self.observers_installed == 0 {
                    self.observers_installed = 1;
                }
                Ok(json!(self.media.len()))
            }
            "mediawallRedirect" => {
                if self.redirect_fails {
                    return Err(StepError::Script("redirect blocked".to_string()));
                }
                let url = arg("url").unwrap_or_default();
                self.actions.push(Action::Redirect(url.clone()));
                self.url = url;
                Ok(json!(true))
            }
            other => Err(StepError::Script(format!("unknown function {}", other))),
        }
    }
}

/// Split `(function name(args) {...})({json})` into its name and arguments.
fn parse_script(source: &str) -> Option<(String, Value)> {
    let rest = source.strip_prefix("(function ")?;
    let name = rest.split('(').next()?.to_string();
    let (_, args) = source.rsplit_once("})(")?;
    let args = serde_json::from_str(args.strip_suffix(')')?).ok()?;
    Some((name, args))
}

pub(crate) struct FakeSession {
    slot: usize,
    page: Arc<Mutex<FakePage>>,
}

impl FakeSession {
    fn live(&self) -> Result<parking_lot::MutexGuard<'_, FakePage>, StepError> {
        let page = self.page.lock();
        if page.alive {
            Ok(page)
        } else {
            Err(StepError::DriverDead(format!("slot {} closed", self.slot)))
        }
    }
}

#[async_trait]
impl WallSession for FakeSession {
    fn slot(&self) -> usize {
        self.slot
    }

    async fn current_url(&self) -> Result<String, StepError> {
        Ok(self.live()?.url.clone())
    }

    async fn navigate(&self, url: &str) -> Result<(), StepError> {
        let mut page = self.live()?;
        page.actions.push(Action::Navigate(url.to_string()));
        if page.crash_on.as_deref() == Some(url) {
            page.alive = false;
            return Err(StepError::DriverDead("browser crashed".to_string()));
        }
        if page.refused_urls.contains(url) {
            return Err(StepError::Navigation(format!("net::ERR_BLOCKED_BY_CLIENT at {}", url)));
        }
        page.url = url.to_string();
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value, StepError> {
        self.live()?.run_script(script)
    }

    async fn click_at(&self, x: f64, y: f64) -> Result<(), StepError> {
        let mut page = self.live()?;
        page.actions.push(Action::Click(x, y));
        if let Some(selector) = page.detach_on_click.take() {
            page.elements.remove(&selector);
        }
        Ok(())
    }

    async fn insert_text(&self, text: &str) -> Result<(), StepError> {
        self.live()?.actions.push(Action::Insert(text.to_string()));
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), StepError> {
        self.live()?.actions.push(Action::Key(key.to_string()));
        Ok(())
    }

    async fn press_key_combo(&self, combo: &str) -> Result<(), StepError> {
        self.live()?.actions.push(Action::KeyCombo(combo.to_string()));
        Ok(())
    }

    async fn shutdown(&mut self) -> Result<(), StepError> {
        let mut page = self.page.lock();
        page.actions.push(Action::Shutdown);
        page.alive = false;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct LauncherState {
    pub launched: Vec<LaunchSpec>,
    pub pages: Vec<Arc<Mutex<FakePage>>>,
    /// Zero-based launch call that fails.
    pub fail_on_launch: Option<usize>,
}

/// Launcher that hands out [`FakeSession`]s cloned from a template page.
#[derive(Clone)]
pub(crate) struct FakeLauncher {
    template: FakePage,
    pub state: Arc<Mutex<LauncherState>>,
}

impl FakeLauncher {
    pub fn new(template: FakePage) -> Self {
        Self {
            template,
            state: Arc::new(Mutex::new(LauncherState::default())),
        }
    }

    pub fn fail_on_launch(&self, call: usize) {
        self.state.lock().fail_on_launch = Some(call);
    }

    pub fn launch_count(&self) -> usize {
        self.state.lock().launched.len()
    }

    /// Page of the most recent session launched for `slot`.
    pub fn page(&self, slot: usize) -> Arc<Mutex<FakePage>> {
        let state = self.state.lock();
        let index = state
            .launched
            .iter()
            .rposition(|spec| spec.slot == slot)
            .unwrap_or_else(|| panic!("slot {} was never launched", slot));
        state.pages[index].clone()
    }

    /// Number of launched sessions that are still open.
    pub fn live_sessions(&self) -> usize {
        self.state
            .lock()
            .pages
            .iter()
            .filter(|p| p.lock().alive)
            .count()
    }
}

#[async_trait]
impl SessionLauncher for FakeLauncher {
    async fn launch(&self, spec: LaunchSpec) -> Result<Box<dyn WallSession>, WallError> {
        let mut state = self.state.lock();
        if state.fail_on_launch == Some(state.launched.len()) {
            state.launched.push(spec.clone());
            state.pages.push(Arc::new(Mutex::new(FakePage {
                alive: false,
                ..FakePage::default()
            })));
            return Err(WallError::LaunchFailed {
                slot: spec.slot,
                reason: "port already in use".to_string(),
            });
        }

        let mut page = self.template.clone();
        page.url = spec.start_url.clone();
        page.launch_muted = spec.muted;
        let (session, page) = page.into_session(spec.slot);

        state.launched.push(spec);
        state.pages.push(page);
        Ok(Box::new(session))
    }
}
