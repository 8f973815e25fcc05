use crate::core::{Label, MeasurementService, Outcome, Renderer};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// 發出轉換 / 歷史查詢並把結果寫到顯示區。
///
/// 重疊的請求不做任何排序：哪個請求最後完成，顯示區就是它的內容。
/// 需要確定順序的呼叫端必須自己等前一個請求結束。
pub struct ConversionClient<S: MeasurementService, R: Renderer> {
    service: S,
    renderer: R,
}

impl<S: MeasurementService, R: Renderer> ConversionClient<S, R> {
    pub fn new(service: S, renderer: R) -> Self {
        Self { service, renderer }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub async fn convert(&self, input: &str) -> Outcome {
        tracing::debug!("🔄 Converting input ({} chars)", input.chars().count());
        let outcome = self.service.convert_measurements(input).await;
        self.resolve(Label::Result, &outcome);
        outcome
    }

    pub async fn show_history(&self) -> Outcome {
        tracing::debug!("📜 Fetching history");
        let outcome = self.service.history().await;
        self.resolve(Label::History, &outcome);
        outcome
    }

    pub fn clear_result(&self) {
        self.renderer.clear();
    }

    /// 每個請求只會寫一次顯示區，錯誤不往外拋
    fn resolve(&self, label: Label, outcome: &Outcome) {
        match outcome {
            Ok(payload) => self.renderer.show_result(label, payload),
            Err(e) => {
                let message = e.full_message();
                tracing::warn!("❌ {:?} request failed: {} ({:?})", label, message, e.kind());
                self.renderer.show_error(&message);
            }
        }
    }
}

impl<S, R> ConversionClient<S, R>
where
    S: MeasurementService + 'static,
    R: Renderer + 'static,
{
    /// Fire-and-forget convert. The handle is only needed to wait for the render.
    pub fn spawn_convert(self: &Arc<Self>, input: impl Into<String>) -> JoinHandle<Outcome> {
        let client = Arc::clone(self);
        let input = input.into();
        tokio::spawn(async move { client.convert(&input).await })
    }

    pub fn spawn_show_history(self: &Arc<Self>) -> JoinHandle<Outcome> {
        let client = Arc::clone(self);
        tokio::spawn(async move { client.show_history().await })
    }
}
