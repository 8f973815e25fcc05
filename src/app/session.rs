use crate::core::client::ConversionClient;
use crate::core::{MeasurementService, Outcome, Renderer};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinSet};

pub const HELP_TEXT: &str = "\
Commands:
  convert <text>   convert a measurement string (text may be empty)
  history          show the conversion history
  clear            clear the result area
  help             show this help
  quit             wait for pending requests and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Convert(String),
    History,
    Clear,
    Help,
    Quit,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

/// `convert` 之後的內容原樣送出，只去掉分隔用的第一個空白
pub fn parse_command(line: &str) -> std::result::Result<Command, UnknownCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, Some(rest)),
        None => (trimmed, None),
    };

    if word == "convert" {
        return Ok(Command::Convert(rest.unwrap_or("").to_string()));
    }

    // 其他指令不帶參數，結尾多餘的空白可以忽略
    if rest.is_some_and(|r| !r.trim().is_empty()) {
        return Err(UnknownCommand(trimmed.trim_end().to_string()));
    }

    match word {
        "" => Ok(Command::Blank),
        "history" => Ok(Command::History),
        "clear" => Ok(Command::Clear),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(UnknownCommand(trimmed.trim_end().to_string())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub commands: usize,
    pub requests: usize,
    pub failed_requests: usize,
}

impl SessionSummary {
    fn record(&mut self, finished: std::result::Result<Outcome, JoinError>) {
        match finished {
            Ok(Ok(_)) => {}
            Ok(Err(_)) => self.failed_requests += 1,
            Err(e) => {
                tracing::error!("Request task aborted: {}", e);
                self.failed_requests += 1;
            }
        }
    }
}

/// 逐行讀取指令。請求在背景執行，不等前一個完成；已完成的請求每讀一行就回收，
/// 結束前會等剩下的請求寫完顯示區
pub async fn run_session<S, R, B>(
    client: Arc<ConversionClient<S, R>>,
    input: B,
) -> Result<SessionSummary>
where
    S: MeasurementService + 'static,
    R: Renderer + 'static,
    B: AsyncBufRead + Unpin,
{
    let mut summary = SessionSummary::default();
    let mut pending: JoinSet<Outcome> = JoinSet::new();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        while let Some(finished) = pending.try_join_next() {
            summary.record(finished);
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(UnknownCommand(text)) => {
                tracing::debug!("Unknown command: {}", text);
                eprintln!("Unknown command: {} (type `help`)", text);
                continue;
            }
        };

        match command {
            Command::Blank => continue,
            Command::Convert(text) => {
                let client = Arc::clone(&client);
                pending.spawn(async move { client.convert(&text).await });
                summary.requests += 1;
            }
            Command::History => {
                let client = Arc::clone(&client);
                pending.spawn(async move { client.show_history().await });
                summary.requests += 1;
            }
            Command::Clear => client.clear_result(),
            Command::Help => println!("{}", HELP_TEXT),
            Command::Quit => {
                summary.commands += 1;
                break;
            }
        }
        summary.commands += 1;
    }

    while let Some(finished) = pending.join_next().await {
        summary.record(finished);
    }

    tracing::info!(
        "Session finished: {} commands, {} requests ({} failed)",
        summary.commands,
        summary.requests,
        summary.failed_requests
    );
    Ok(summary)
}
