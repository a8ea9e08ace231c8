pub mod ping;
pub mod vpsload;

use crate::services::system::{MetricsCollector, Thresholds};
use crate::utils::theme::Theme;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Data {
    pub collector: Arc<MetricsCollector>,
    pub theme: Arc<Theme>,
    pub thresholds: Thresholds,
}
