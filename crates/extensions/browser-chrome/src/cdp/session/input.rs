//! Input (mouse and keyboard) operations for CDP page session.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEventType, MouseButton, MouseEventType};

use super::core::PageSession;

impl PageSession {
    /// Click at coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        for event in [MouseEventType::MousePressed, MouseEventType::MouseReleased] {
            self.call(
                "Input.dispatchMouseEvent",
                Some(json!({
                    "type": event,
                    "x": x,
                    "y": y,
                    "button": MouseButton::Left,
                    "clickCount": 1,
                })),
            )
            .await?;
        }

        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Insert text at the focused element.
    pub async fn type_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        debug!("Typed {} characters", text.len());
        Ok(())
    }

    /// Press a key.
    pub async fn press_key(&self, key: &str) -> Result<(), CdpError> {
        self.dispatch_key(key, 0, None).await
    }

    /// Press key combination (e.g., "Control+a").
    pub async fn press_key_combo(&self, combo: &str) -> Result<(), CdpError> {
        let parts: Vec<&str> = combo.split('+').collect();
        let (key, modifier_names) = match parts.split_last() {
            Some((key, rest)) => (*key, rest),
            None => return Ok(()),
        };
        let modifiers = Self::get_modifiers(modifier_names);
        let command = Self::editing_command(modifiers, key);

        self.dispatch_key(key, modifiers, command).await
    }

    async fn dispatch_key(
        &self,
        key: &str,
        modifiers: i32,
        command: Option<&str>,
    ) -> Result<(), CdpError> {
        let code = Self::key_code(key);

        let mut down = json!({
            "type": KeyEventType::RawKeyDown,
            "key": key,
            "modifiers": modifiers,
        });
        if let Some(code) = code {
            down["windowsVirtualKeyCode"] = json!(code);
        }
        if let Some(command) = command {
            down["commands"] = json!([command]);
        }
        self.call("Input.dispatchKeyEvent", Some(down)).await?;

        let mut up = json!({
            "type": KeyEventType::KeyUp,
            "key": key,
            "modifiers": modifiers,
        });
        if let Some(code) = code {
            up["windowsVirtualKeyCode"] = json!(code);
        }
        self.call("Input.dispatchKeyEvent", Some(up)).await?;

        Ok(())
    }

    /// Get modifier flags from modifier names.
    pub(super) fn get_modifiers(modifiers: &[&str]) -> i32 {
        let mut flags = 0;
        for m in modifiers {
            match m.to_lowercase().as_str() {
                "alt" => flags |= 1,
                "control" | "ctrl" => flags |= 2,
                "meta" | "command" | "cmd" => flags |= 4,
                "shift" => flags |= 8,
                _ => {}
            }
        }
        flags
    }

    /// Virtual key code Chrome needs to run a key's default action.
    pub(super) fn key_code(key: &str) -> Option<i64> {
        let code = match key {
            "Backspace" => 8,
            "Tab" => 9,
            "Enter" => 13,
            "Escape" => 27,
            "Delete" => 46,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase() as i64,
                    _ => return None,
                }
            }
        };
        Some(code)
    }

    /// Editor command for shortcuts synthetic events do not trigger on
    /// their own.
    pub(super) fn editing_command(modifiers: i32, key: &str) -> Option<&'static str> {
        let primary = modifiers & (2 | 4) != 0;
        match key.to_ascii_lowercase().as_str() {
            "a" if primary => Some("selectAll"),
            _ => None,
        }
    }
}
