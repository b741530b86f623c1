//! Integration tests against a real Chrome.
//!
//! These tests require Chrome to be installed on the system.
//! Run with: cargo test -p mediawall-browser-chrome --test chrome_integration -- --ignored

use mediawall_browser_chrome::ChromeLauncher;
use mediawall_config::{BrowserConfig, TimingConfig};
use mediawall_core::{AudioPolicy, LaunchSpec, Rect, SessionLauncher, WallSession};

fn test_launcher(dir: &std::path::Path) -> ChromeLauncher {
    let config = BrowserConfig {
        base_debug_port: 9333, // Use different port to avoid conflicts
        profile_root: Some(dir.display().to_string()),
        headless: true, // Use headless for CI
        ..BrowserConfig::default()
    };
    ChromeLauncher::new(config, &TimingConfig::default())
}

fn test_spec(slot: usize) -> LaunchSpec {
    LaunchSpec {
        slot,
        bounds: Rect {
            x: 0,
            y: 0,
            width: 800,
            height: 600,
        },
        start_url: "data:text/html,<title>wall</title><input id=q>".to_string(),
        muted: slot != 0,
    }
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_chrome_detection() {
    let chrome_path = ChromeLauncher::find_chrome();
    assert!(chrome_path.is_some(), "Chrome should be installed on the system");
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_launch_probe_and_shutdown() {
    let dir = tempfile::TempDir::new().unwrap();
    let launcher = test_launcher(dir.path());

    let mut session = match launcher.launch(test_spec(0)).await {
        Ok(session) => session,
        Err(e) => panic!("launch failed: {}", e),
    };

    let url = session.current_url().await.unwrap();
    assert!(url.starts_with("data:text/html"), "{}", url);

    let webdriver = session.evaluate("navigator.webdriver === true").await.unwrap();
    assert_eq!(webdriver, serde_json::json!(false));

    session.navigate("about:blank").await.unwrap();
    session.shutdown().await.unwrap();
    assert!(session.current_url().await.is_err());
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_mute_policy_in_real_page() {
    let dir = tempfile::TempDir::new().unwrap();
    let launcher = test_launcher(dir.path());
    let mut session = match launcher.launch(test_spec(1)).await {
        Ok(session) => session,
        Err(e) => panic!("launch failed: {}", e),
    };

    session
        .evaluate("document.body.appendChild(document.createElement('video')); true")
        .await
        .unwrap();
    let muted = AudioPolicy::mute_all_media(session.as_ref()).await.unwrap();
    assert_eq!(muted, 1);

    session
        .evaluate("document.body.appendChild(document.createElement('audio')); true")
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    let all_muted = session
        .evaluate("[...document.querySelectorAll('audio,video')].every(m => m.muted && m.volume === 0)")
        .await
        .unwrap();
    assert_eq!(all_muted, serde_json::json!(true));

    session.shutdown().await.unwrap();
}
