//! Chrome process launcher for wall windows.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use mediawall_config::{BrowserConfig, TimingConfig};
use mediawall_core::{LaunchSpec, SessionLauncher, WallError, WallSession};
use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::cdp::{browser_version, BrowserVersion, CdpClient, CdpError, PageInfo, PageSession};
use crate::profile::ProfileCloner;
use crate::session::{ChromeSession, SlotProfile};

/// Hides `navigator.webdriver` from page scripts.
const WEBDRIVER_MASK: &str =
    "Object.defineProperty(Navigator.prototype, 'webdriver', { get: () => undefined, configurable: true });";

/// Errors while bringing up one window.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Chrome not found. Install Google Chrome or set browser.chrome_path.")]
    ChromeNotFound,

    #[error("DevTools port {0} is already in use")]
    PortInUse(u16),

    #[error("Failed to start Chrome: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Failed to prepare profile {path}: {source}")]
    Profile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Chrome did not open DevTools on port {port} within {waited:?}")]
    NotReady { port: u16, waited: Duration },

    #[error("No page target on port {0}")]
    NoPageTarget(u16),

    #[error(transparent)]
    Cdp(#[from] CdpError),
}

/// Launches one Chrome process per wall slot.
pub struct ChromeLauncher {
    config: BrowserConfig,
    launch_timeout: Duration,
    poll_interval: Duration,
}

impl ChromeLauncher {
    pub fn new(config: BrowserConfig, timing: &TimingConfig) -> Self {
        Self {
            config,
            launch_timeout: timing.launch_timeout(),
            poll_interval: timing.poll_interval(),
        }
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    fn chrome_path(&self) -> Result<PathBuf, LaunchError> {
        self.config
            .chrome_path
            .clone()
            .or_else(Self::find_chrome)
            .ok_or(LaunchError::ChromeNotFound)
    }

    /// DevTools HTTP endpoint of a slot.
    pub fn endpoint(&self, slot: usize) -> String {
        format!("http://127.0.0.1:{}", self.config.debug_port(slot))
    }

    /// Command-line switches for one window.
    pub fn launch_args(&self, spec: &LaunchSpec, profile_dir: &Path) -> Vec<String> {
        let bounds = spec.bounds;
        let mut args = vec![
            format!("--remote-debugging-port={}", self.config.debug_port(spec.slot)),
            format!("--user-data-dir={}", profile_dir.display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-blink-features=AutomationControlled".to_string(),
            "--disable-infobars".to_string(),
            "--disable-notifications".to_string(),
            "--disable-extensions".to_string(),
            "--disable-default-apps".to_string(),
            "--hide-scrollbars".to_string(),
            "--autoplay-policy=no-user-gesture-required".to_string(),
            format!("--window-position={},{}", bounds.x, bounds.y),
            format!("--window-size={},{}", bounds.width, bounds.height),
        ];

        if spec.muted {
            args.push("--mute-audio".to_string());
        }
        if self.config.headless {
            args.push("--headless=new".to_string());
        }
        args.extend(self.config.extra_args.iter().cloned());
        args.push(format!("--app={}", spec.start_url));
        args
    }

    /// Pick (and fill) the user-data directory for `slot`.
    async fn prepare_profile(&self, slot: usize) -> Result<SlotProfile, LaunchError> {
        let Some(source) = self.config.source_profile_dir() else {
            let dir = self.config.profile_root_dir().join(format!("slot-{}", slot));
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|source| LaunchError::Profile {
                    path: dir.clone(),
                    source,
                })?;
            return Ok(SlotProfile {
                dir,
                temporary: false,
            });
        };

        let dir = std::env::temp_dir().join(format!(
            "mediawall-{}-slot-{}",
            std::process::id(),
            slot
        ));
        let dest = dir.clone();
        let from = source.clone();
        let copied = tokio::task::spawn_blocking(move || {
            if dest.exists() {
                std::fs::remove_dir_all(&dest)?;
            }
            ProfileCloner::prepare(&from, &dest)
        })
        .await
        .map_err(std::io::Error::other)
        .and_then(|result| result)
        .map_err(|source| LaunchError::Profile {
            path: dir.clone(),
            source,
        })?;

        if copied == 0 {
            warn!(
                slot,
                "Nothing copied from {}, is it a Chrome user-data directory?",
                source.display()
            );
        }
        debug!(slot, copied, "Prepared temporary profile at {}", dir.display());
        Ok(SlotProfile {
            dir,
            temporary: true,
        })
    }

    fn spawn(&self, chrome: &Path, args: &[String]) -> Result<Child, LaunchError> {
        Command::new(chrome)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(LaunchError::Spawn)
    }

    /// Launch Chrome for `spec` and attach to its app window.
    pub async fn launch_session(&self, spec: &LaunchSpec) -> Result<ChromeSession, LaunchError> {
        let chrome = self.chrome_path()?;
        let port = self.config.debug_port(spec.slot);
        let endpoint = self.endpoint(spec.slot);

        // A leftover browser on this port would answer for us.
        if browser_version(&endpoint).await.is_ok() {
            return Err(LaunchError::PortInUse(port));
        }

        let profile = self.prepare_profile(spec.slot).await?;
        let args = self.launch_args(spec, &profile.dir);

        let mut child = match self.spawn(&chrome, &args) {
            Ok(child) => child,
            Err(e) => {
                profile.cleanup().await;
                return Err(e);
            }
        };
        info!(
            slot = spec.slot,
            pid = ?child.id(),
            port,
            "Chrome launched at {}",
            spec.start_url
        );

        match self.attach(spec, &endpoint, port).await {
            Ok((client, page)) => Ok(ChromeSession::new(spec.slot, client, page, child, profile)),
            Err(e) => {
                let _ = child.kill().await;
                profile.cleanup().await;
                Err(e)
            }
        }
    }

    async fn attach(
        &self,
        spec: &LaunchSpec,
        endpoint: &str,
        port: u16,
    ) -> Result<(CdpClient, PageSession), LaunchError> {
        wait_for_devtools(endpoint, self.launch_timeout, self.poll_interval)
            .await
            .ok_or(LaunchError::NotReady {
                port,
                waited: self.launch_timeout,
            })?;

        let client = CdpClient::connect(endpoint).await?;
        let target = self.wait_for_page(&client, port).await?;
        let page = client.attach_page(&target.id).await?;

        page.add_init_script(WEBDRIVER_MASK).await?;

        // Window managers may ignore the launch geometry.
        if let Err(e) = client.set_window_bounds(&target.id, spec.bounds.into()).await {
            warn!(slot = spec.slot, "Could not place window: {}", e);
        }

        Ok((client, page))
    }

    async fn wait_for_page(&self, client: &CdpClient, port: u16) -> Result<PageInfo, LaunchError> {
        let start = Instant::now();
        loop {
            if let Some(page) = client.list_pages().await?.into_iter().next() {
                return Ok(page);
            }
            if start.elapsed() >= self.launch_timeout {
                return Err(LaunchError::NoPageTarget(port));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    async fn launch(&self, spec: LaunchSpec) -> Result<Box<dyn WallSession>, WallError> {
        match self.launch_session(&spec).await {
            Ok(session) => Ok(Box::new(session)),
            Err(e) => Err(WallError::LaunchFailed {
                slot: spec.slot,
                reason: e.to_string(),
            }),
        }
    }
}

/// Poll `/json/version` until Chrome answers or `timeout` elapses.
pub(crate) async fn wait_for_devtools(
    endpoint: &str,
    timeout: Duration,
    poll: Duration,
) -> Option<BrowserVersion> {
    let start = Instant::now();
    loop {
        match browser_version(endpoint).await {
            Ok(version) => {
                debug!("DevTools ready at {}: {}", endpoint, version.browser);
                return Some(version);
            }
            Err(e) => debug!("DevTools not ready at {}: {}", endpoint, e),
        }
        if start.elapsed() >= timeout {
            return None;
        }
        tokio::time::sleep(poll).await;
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
