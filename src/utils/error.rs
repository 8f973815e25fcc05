use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// 連線失敗、DNS 錯誤、連線被拒等
    #[error("{0}")]
    TransportError(#[from] reqwest::Error),

    /// 伺服器有回應但狀態碼不在 2xx，不區分狀態碼
    #[error("Server error")]
    ServerError { status: reqwest::StatusCode },

    /// 回應內容不是合法 JSON
    #[error("{0}")]
    ParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Server,
    Parse,
    Config,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::TransportError(_) => ErrorKind::Transport,
            ClientError::ServerError { .. } => ErrorKind::Server,
            ClientError::ParseError(_) => ErrorKind::Parse,
            // IoError 只會來自讀取設定檔
            ClientError::IoError(_)
            | ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. } => ErrorKind::Config,
        }
    }

    /// 顯示用訊息，包含整條 source 鏈（例如 reqwest 底下的 connection refused）
    pub fn full_message(&self) -> String {
        error_chain(self)
    }
}

/// 把 error 與所有 source 用 `: ` 串起來，略過跟上一層相同的訊息
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut previous = message.clone();
    let mut source = err.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if text != previous && !text.is_empty() {
            message.push_str(": ");
            message.push_str(&text);
        }
        previous = text;
        source = cause.source();
    }

    message
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_hides_status_code() {
        let err = ClientError::ServerError {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(err.to_string(), "Server error");
        assert_eq!(err.kind(), ErrorKind::Server);

        let err = ClientError::ServerError {
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "Server error");
    }

    #[test]
    fn test_parse_error_keeps_message() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let expected = source.to_string();
        let err = ClientError::from(source);

        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_config_errors_share_kind() {
        let err = ClientError::InvalidConfigValueError {
            field: "service_base_url".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("service_base_url"));

        let err = ClientError::ConfigError {
            message: "TOML parsing error".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = ClientError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "measure.toml not found",
        ));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[derive(Error, Debug)]
    #[error("tcp connect error")]
    struct ConnectFailure(#[source] std::io::Error);

    #[derive(Error, Debug)]
    #[error("error sending request")]
    struct SendFailure(#[source] ConnectFailure);

    #[test]
    fn test_error_chain_includes_every_cause() {
        let err = SendFailure(ConnectFailure(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        )));

        assert_eq!(
            error_chain(&err),
            "error sending request: tcp connect error: Connection refused"
        );
    }

    #[test]
    fn test_full_message_skips_repeated_wrapper_text() {
        let source = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let expected = source.to_string();
        let err = ClientError::from(source);

        // thiserror 的 #[from] 讓 source 就是同一個 serde_json 錯誤，不該重複
        assert_eq!(err.full_message(), expected);

        let err = ClientError::ServerError {
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        assert_eq!(err.full_message(), "Server error");
    }
}
