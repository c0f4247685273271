use std::sync::Arc;

use crate::shared::config::PresentationConfig;
use crate::shared::data::order_dataset::OrderDataset;

/// Shared handler state: the dataset loaded at start-up, read-only afterwards
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<OrderDataset>,
    pub presentation: Arc<PresentationConfig>,
}

impl AppState {
    pub fn new(dataset: OrderDataset, presentation: PresentationConfig) -> Self {
        Self {
            dataset: Arc::new(dataset),
            presentation: Arc::new(presentation),
        }
    }
}
