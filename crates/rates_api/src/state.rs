use std::sync::Arc;

use formatting::CurrencyFormatter;
use models::Settings;

pub type SharedState = Arc<AppState>;

/// Process-wide configuration, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub formatter: CurrencyFormatter,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let formatter = CurrencyFormatter::new(settings.tax_percent);
        Self {
            settings,
            formatter,
        }
    }

    pub fn shared(settings: Settings) -> SharedState {
        Arc::new(Self::new(settings))
    }
}
