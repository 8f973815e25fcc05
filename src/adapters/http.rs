use crate::core::{ConfigProvider, MeasurementService};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const CONVERT_ENDPOINT: &str = "convert-measurements";
pub const HISTORY_ENDPOINT: &str = "history";

/// 透過 HTTP GET 呼叫量測轉換服務
#[derive(Debug, Clone)]
pub struct HttpMeasurementService {
    client: Client,
    base_url: Url,
}

impl HttpMeasurementService {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url = normalize_base_url(config.service_base_url())?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/convert-measurements?input=<encoded>`，空白編碼成 `%20`
    pub fn convert_url(&self, input: &str) -> Result<Url> {
        let mut url = self.endpoint(CONVERT_ENDPOINT)?;
        url.query_pairs_mut().append_pair("input", input);

        // form 編碼會把空白寫成 '+'，原本的 '+' 已經是 %2B，所以這裡換掉不會混淆
        let query = url.query().map(|q| q.replace('+', "%20"));
        url.set_query(query.as_deref());

        Ok(url)
    }

    pub fn history_url(&self) -> Result<Url> {
        self.endpoint(HISTORY_ENDPOINT)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::ConfigError {
                message: format!("Cannot build endpoint '{}': {}", path, e),
            })
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value> {
        tracing::debug!("📡 GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(ClientError::ServerError { status });
        }

        let body = response.text().await?;
        let payload = serde_json::from_str(&body)?;
        Ok(payload)
    }
}

#[async_trait]
impl MeasurementService for HttpMeasurementService {
    async fn convert_measurements(&self, input: &str) -> Result<serde_json::Value> {
        let url = self.convert_url(input)?;
        self.get_json(url).await
    }

    async fn history(&self) -> Result<serde_json::Value> {
        let url = self.history_url()?;
        self.get_json(url).await
    }
}

/// 確保 base URL 以 '/' 結尾，讓 `join` 保留路徑前綴
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| ClientError::InvalidConfigValueError {
        field: "service_base_url".to_string(),
        value: raw.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
