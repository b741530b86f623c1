use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: Some(serde_json::json!({"url": "https://example.com"})),
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Page.navigate"));
    assert!(json.contains("example.com"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_request_with_session() {
    let req = CdpRequest {
        id: 7,
        method: "Runtime.evaluate".to_string(),
        params: None,
        session_id: Some("ABC".to_string()),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["sessionId"], "ABC");
    assert!(json.get("params").is_none());
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"frameId": "abc"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
}

#[test]
fn test_cdp_error_response_deserialize() {
    let json = r#"{"id": 3, "error": {"code": -32001, "message": "Session with given id not found."}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    let error = resp.error.unwrap();
    assert_eq!(error.code, -32001);
    assert!(error.data.is_none());
}

#[test]
fn test_page_info_deserialize() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "Google",
        "url": "https://www.google.com/",
        "webSocketDebuggerUrl": "ws://127.0.0.1:9310/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "page123");
    assert!(info.is_page());
}

#[test]
fn test_service_worker_is_not_a_page() {
    let json = r#"{"id": "sw1", "type": "service_worker", "url": "https://app.plex.tv/sw.js"}"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert!(!info.is_page());
    assert!(info.title.is_empty());
}

#[test]
fn test_browser_version_deserialize() {
    let json = r#"{
        "Browser": "Chrome/131.0.6778.85",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "V8-Version": "13.1.201.13",
        "WebKit-Version": "537.36",
        "webSocketDebuggerUrl": "ws://127.0.0.1:9310/devtools/browser/abc"
    }"#;
    let version: BrowserVersion = serde_json::from_str(json).unwrap();
    assert_eq!(version.browser, "Chrome/131.0.6778.85");
    assert!(version.web_socket_debugger_url.ends_with("/browser/abc"));
}

#[test]
fn test_mouse_button_serialize() {
    let json = serde_json::to_string(&MouseButton::Left).unwrap();
    assert_eq!(json, "\"left\"");
}

#[test]
fn test_key_event_type_serialize() {
    let json = serde_json::to_string(&KeyEventType::RawKeyDown).unwrap();
    assert_eq!(json, "\"rawKeyDown\"");
}

#[test]
fn test_window_bounds_from_rect() {
    let rect = Rect {
        x: -15,
        y: 538,
        width: 977,
        height: 550,
    };
    let json = serde_json::to_value(WindowBounds::from(rect)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"left": -15, "top": 538, "width": 977, "height": 550})
    );
}

#[test]
fn test_window_bounds_normal_state() {
    let json = serde_json::to_value(WindowBounds::normal()).unwrap();
    assert_eq!(json, serde_json::json!({"windowState": "normal"}));
}
