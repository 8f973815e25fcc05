use crate::core::Renderer;
use crate::domain::model::{render_json, DisplayState, Label};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 記憶體中的顯示區，clone 之後共用同一份狀態
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    state: Arc<Mutex<DisplayState>>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DisplayState {
        lock(&self.state).clone()
    }

    pub fn text(&self) -> String {
        lock(&self.state).text()
    }
}

impl Renderer for MemoryRenderer {
    fn show_result(&self, label: Label, payload: &serde_json::Value) {
        *lock(&self.state) = DisplayState::Result {
            label,
            payload: payload.clone(),
        };
    }

    fn show_error(&self, message: &str) {
        *lock(&self.state) = DisplayState::Error {
            message: message.to_string(),
        };
    }

    fn clear(&self) {
        *lock(&self.state) = DisplayState::Empty;
    }
}

/// 產生跟網頁結果區塊相同的 HTML 片段
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    fragment: Arc<Mutex<String>>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> String {
        lock(&self.fragment).clone()
    }
}

impl Renderer for HtmlRenderer {
    fn show_result(&self, label: Label, payload: &serde_json::Value) {
        let body = escape_html(&render_json(payload));
        let html = match label {
            Label::Result => format!("<strong>{}</strong> {}", label, body),
            Label::History => format!("<strong>{}</strong><br>{}", label, body),
        };
        *lock(&self.fragment) = html;
    }

    fn show_error(&self, message: &str) {
        *lock(&self.fragment) = format!(
            "<span style=\"color:red;\">Error: {}</span>",
            escape_html(message)
        );
    }

    fn clear(&self) {
        lock(&self.fragment).clear();
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(feature = "cli")]
pub use terminal::TerminalRenderer;

#[cfg(feature = "cli")]
mod terminal {
    use super::{lock, MemoryRenderer};
    use crate::core::Renderer;
    use crate::domain::model::{render_json, DisplayState, Label};
    use crossterm::cursor::MoveTo;
    use crossterm::style::Stylize;
    use crossterm::terminal::{Clear, ClearType};
    use std::io::Write;
    use std::sync::Mutex;

    /// 終端機輸出：標籤粗體、錯誤紅色
    pub struct TerminalRenderer<W: Write + Send> {
        out: Mutex<W>,
        mirror: MemoryRenderer,
    }

    impl TerminalRenderer<std::io::Stdout> {
        pub fn stdout() -> Self {
            Self::new(std::io::stdout())
        }
    }

    impl<W: Write + Send> TerminalRenderer<W> {
        pub fn new(out: W) -> Self {
            Self {
                out: Mutex::new(out),
                mirror: MemoryRenderer::new(),
            }
        }

        pub fn state(&self) -> DisplayState {
            self.mirror.state()
        }

        pub fn into_inner(self) -> W {
            self.out
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        fn write_line(&self, line: impl std::fmt::Display) {
            let mut out = lock(&self.out);
            if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
                tracing::warn!("Failed to write to terminal: {}", e);
            }
        }
    }

    impl<W: Write + Send> Renderer for TerminalRenderer<W> {
        fn show_result(&self, label: Label, payload: &serde_json::Value) {
            self.mirror.show_result(label, payload);
            self.write_line(format!("{} {}", label.as_str().bold(), render_json(payload)));
        }

        fn show_error(&self, message: &str) {
            self.mirror.show_error(message);
            self.write_line(format!("Error: {}", message).red());
        }

        fn clear(&self) {
            self.mirror.clear();
            let mut guard = lock(&self.out);
            let out: &mut W = &mut guard;
            if let Err(e) = crossterm::execute!(out, Clear(ClearType::All), MoveTo(0, 0)) {
                tracing::warn!("Failed to clear terminal: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_renderer_overwrites() {
        let renderer = MemoryRenderer::new();
        assert!(renderer.state().is_empty());

        renderer.show_result(Label::Result, &json!({"value": 42}));
        assert_eq!(renderer.text(), r#"Result: {"value":42}"#);

        renderer.show_error("Server error");
        assert_eq!(renderer.text(), "Error: Server error");

        renderer.show_result(Label::History, &json!([]));
        assert_eq!(renderer.text(), "History: []");

        renderer.clear();
        assert!(renderer.state().is_empty());
        assert_eq!(renderer.text(), "");
    }

    #[test]
    fn test_memory_renderer_clones_share_state() {
        let renderer = MemoryRenderer::new();
        let observer = renderer.clone();

        renderer.show_error("boom");
        assert!(observer.state().is_error());
    }

    #[test]
    fn test_html_renderer_markup() {
        let renderer = HtmlRenderer::new();

        renderer.show_result(Label::Result, &json!([2, 6]));
        assert_eq!(renderer.html(), "<strong>Result:</strong> [2,6]");

        renderer.show_result(Label::History, &json!([{"id": 1}]));
        assert_eq!(
            renderer.html(),
            "<strong>History:</strong><br>[{&quot;id&quot;:1}]"
        );

        renderer.show_error("Server error");
        assert_eq!(
            renderer.html(),
            "<span style=\"color:red;\">Error: Server error</span>"
        );

        renderer.clear();
        assert_eq!(renderer.html(), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"x" & 'y'</b>"#),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_terminal_renderer_writes_lines() {
        let renderer = TerminalRenderer::new(Vec::new());

        renderer.show_result(Label::Result, &json!({"value": 42}));
        renderer.show_error("Server error");
        assert!(renderer.state().is_error());

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("Result:"));
        assert!(output.contains(r#"{"value":42}"#));
        assert!(output.contains("Error: Server error"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_terminal_renderer_clear_empties_state() {
        let renderer = TerminalRenderer::new(Vec::new());
        renderer.show_result(Label::History, &json!([]));
        renderer.clear();
        assert!(renderer.state().is_empty());
    }
}
