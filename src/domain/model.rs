use crate::utils::error::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 一次請求的結果：成功時是伺服器回傳的原始 JSON
pub type Outcome = std::result::Result<serde_json::Value, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Result,
    History,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Result => "Result:",
            Label::History => "History:",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 顯示區目前的內容，每次呼叫整個覆寫
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DisplayState {
    #[default]
    Empty,
    Result {
        label: Label,
        payload: serde_json::Value,
    },
    Error {
        message: String,
    },
}

impl DisplayState {
    pub fn is_empty(&self) -> bool {
        matches!(self, DisplayState::Empty)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DisplayState::Error { .. })
    }

    /// 純文字呈現：`Result: {...}`、`History: [...]` 或 `Error: ...`
    pub fn text(&self) -> String {
        match self {
            DisplayState::Empty => String::new(),
            DisplayState::Result { label, payload } => {
                format!("{} {}", label, render_json(payload))
            }
            DisplayState::Error { message } => format!("Error: {}", message),
        }
    }
}

/// Compact JSON, keys in the order the server sent them.
pub fn render_json(payload: &serde_json::Value) -> String {
    payload.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_text() {
        assert_eq!(Label::Result.to_string(), "Result:");
        assert_eq!(Label::History.as_str(), "History:");
    }

    #[test]
    fn test_display_state_text() {
        assert_eq!(DisplayState::Empty.text(), "");

        let state = DisplayState::Result {
            label: Label::Result,
            payload: json!({"value": 42}),
        };
        assert_eq!(state.text(), r#"Result: {"value":42}"#);

        let state = DisplayState::Result {
            label: Label::History,
            payload: json!([{"id": 1}]),
        };
        assert_eq!(state.text(), r#"History: [{"id":1}]"#);

        let state = DisplayState::Error {
            message: "Server error".to_string(),
        };
        assert!(state.is_error());
        assert_eq!(state.text(), "Error: Server error");
    }

    #[test]
    fn test_render_json_keeps_key_order() {
        let payload: serde_json::Value =
            serde_json::from_str(r#"{"output":[2,6],"input":"abbcc"}"#).unwrap();
        assert_eq!(render_json(&payload), r#"{"output":[2,6],"input":"abbcc"}"#);
    }
}
