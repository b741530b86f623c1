//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpRequest, CdpResponse, PageInfo, WindowBounds};
use super::session::PageSession;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
type PendingMap = Arc<Mutex<HashMap<u64, PendingRequest>>>;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pending request waiting for response.
pub(crate) struct PendingRequest {
    pub tx: oneshot::Sender<Result<Value, CdpError>>,
}

/// Request/response plumbing shared by the client and its page sessions.
#[derive(Clone)]
pub(crate) struct Channel {
    ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
    pending: PendingMap,
    request_id: Arc<AtomicU64>,
    closed: Arc<AtomicBool>,
}

impl Channel {
    /// Send a command and wait for its response.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(CdpError::SessionClosed);
        }

        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, PendingRequest { tx });

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(REQUEST_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Fetch `/json/version` from a DevTools HTTP endpoint.
pub async fn browser_version(endpoint: &str) -> Result<BrowserVersion, CdpError> {
    let url = format!("{}/json/version", endpoint.trim_end_matches('/'));
    reqwest::get(&url)
        .await
        .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
        .json()
        .await
        .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))
}

/// Fetch the target list from `/json/list`.
pub async fn list_targets(endpoint: &str) -> Result<Vec<PageInfo>, CdpError> {
    let url = format!("{}/json/list", endpoint.trim_end_matches('/'));
    let targets: Vec<PageInfo> = reqwest::get(&url).await?.json().await?;
    Ok(targets)
}

/// CDP client bound to one Chrome process.
pub struct CdpClient {
    /// HTTP endpoint for target discovery.
    http_endpoint: String,
    /// Browser WebSocket URL.
    browser_ws_url: String,
    channel: Channel,
    /// Background task handle.
    _recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given endpoint (e.g. `http://127.0.0.1:9310`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();

        let version = browser_version(&http_endpoint).await?;
        debug!("Connected to browser: {}", version.browser);

        let browser_ws_url = version.web_socket_debugger_url;

        let (ws_stream, _) = tokio_tungstenite::connect_async(browser_ws_url.as_str())
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let channel = Channel {
            ws_tx: Arc::new(tokio::sync::Mutex::new(ws_sink)),
            pending: Arc::new(Mutex::new(HashMap::new())),
            request_id: Arc::new(AtomicU64::new(1)),
            closed: Arc::new(AtomicBool::new(false)),
        };

        let recv_task = {
            let pending = channel.pending.clone();
            let closed = channel.closed.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, &pending).await;
                close_pending(&pending, &closed);
            })
        };

        debug!("CDP client connected to {}", browser_ws_url);

        Ok(Self {
            http_endpoint,
            browser_ws_url,
            channel,
            _recv_task: recv_task,
        })
    }

    /// WebSocket receive loop. Returns when the socket closes.
    async fn receive_loop(mut ws_source: WsSource, pending: &PendingMap) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => Self::dispatch(resp, pending),
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    debug!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    }

    fn dispatch(resp: CdpResponse, pending: &PendingMap) {
        let Some(id) = resp.id else {
            if let Some(method) = &resp.method {
                trace!("CDP event: {}", method);
            }
            return;
        };

        let Some(req) = pending.lock().remove(&id) else {
            return;
        };
        let result = match resp.error {
            Some(error) => Err(CdpError::Protocol {
                code: error.code,
                message: error.message,
            }),
            None => Ok(resp.result.unwrap_or(Value::Null)),
        };
        let _ = req.tx.send(result);
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.channel.call(method, params, None).await
    }

    /// Get browser WebSocket URL.
    pub fn browser_ws_url(&self) -> &str {
        &self.browser_ws_url
    }

    /// The websocket has closed.
    pub fn is_closed(&self) -> bool {
        self.channel.is_closed()
    }

    /// List page targets.
    pub async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        Ok(list_targets(&self.http_endpoint)
            .await?
            .into_iter()
            .filter(PageInfo::is_page)
            .collect())
    }

    /// Attach to an existing page.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(target_id.to_string(), session_id, self.channel.clone());
        session.enable_domains().await?;

        Ok(session)
    }

    /// Move and resize the OS window hosting `target_id`.
    pub async fn set_window_bounds(
        &self,
        target_id: &str,
        bounds: WindowBounds,
    ) -> Result<(), CdpError> {
        let result = self
            .call(
                "Browser.getWindowForTarget",
                Some(json!({"targetId": target_id})),
            )
            .await?;
        let window_id = result["windowId"]
            .as_i64()
            .ok_or_else(|| CdpError::InvalidResponse("Missing windowId".to_string()))?;

        // Bounds are ignored while the window is maximized.
        self.call(
            "Browser.setWindowBounds",
            Some(json!({"windowId": window_id, "bounds": WindowBounds::normal()})),
        )
        .await?;
        self.call(
            "Browser.setWindowBounds",
            Some(json!({"windowId": window_id, "bounds": bounds})),
        )
        .await?;

        debug!("Window {} bounds set to {:?}", window_id, bounds);
        Ok(())
    }

    /// Ask the browser to exit.
    pub async fn close_browser(&self) -> Result<(), CdpError> {
        match self.call("Browser.close", None).await {
            // The socket may close before the reply arrives.
            Ok(_) | Err(CdpError::SessionClosed) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self._recv_task.abort();
    }
}

/// Mark the channel closed and fail everything still waiting.
fn close_pending(pending: &PendingMap, closed: &AtomicBool) {
    closed.store(true, Ordering::SeqCst);
    let drained: Vec<_> = pending.lock().drain().collect();
    if !drained.is_empty() {
        debug!("Failing {} pending CDP requests", drained.len());
    }
    for (_, req) in drained {
        let _ = req.tx.send(Err(CdpError::SessionClosed));
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
