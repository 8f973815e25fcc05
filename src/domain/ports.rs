use crate::domain::model::Label;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 顯示區。實作需自行處理內部可變性，因為多個請求可能同時寫入
pub trait Renderer: Send + Sync {
    fn show_result(&self, label: Label, payload: &serde_json::Value);
    fn show_error(&self, message: &str);
    fn clear(&self);
}

pub trait ConfigProvider: Send + Sync {
    fn service_base_url(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
}

/// 遠端量測轉換服務
#[async_trait]
pub trait MeasurementService: Send + Sync {
    async fn convert_measurements(&self, input: &str) -> Result<serde_json::Value>;
    async fn history(&self) -> Result<serde_json::Value>;
}
