//! riskdesk core - analysis payload model and view shaping.
//!
//! This crate holds everything the dashboard does with an analysis result
//! once it has been received:
//!
//! - **Types**: the payload returned by the stress-testing service
//! - **Charts**: exposure mappings as sorted percentage series
//! - **Severity**: highlighting rule for stress-scenario losses
//! - **Formatting**: currency, duration, liquidity and percentage display
//! - **View model**: the summary cards, charts, alerts and scenario cards
//!   a dashboard renders
//!
//! # Example
//!
//! ```rust
//! use riskdesk_core::{classify, to_chart_series, Severity, ValueMap};
//!
//! let by_asset_class: ValueMap = [("Equity", 0.6), ("Bond", 0.4)].into_iter().collect();
//! let series = to_chart_series(&by_asset_class);
//! assert_eq!(series[0].name, "Equity");
//!
//! assert_eq!(classify(-0.15), Severity::Normal);
//! assert_eq!(classify(-0.2), Severity::Severe);
//! ```

pub mod chart;
pub mod format;
pub mod severity;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use types::{
    AnalysisResponse, ExposureReport, Portfolio, PortfolioPosition, SimulationResult,
    StressScenario, ValueMap,
};

pub use chart::{to_chart_series, ChartPoint};
pub use severity::{classify, Severity, SEVERE_LOSS_THRESHOLD};
pub use view::{Dashboard, ExposureChart, ScenarioCard, SummaryCard};

/// Error types for riskdesk-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Misaligned results: {scenarios} scenarios but {results} simulation results")]
    MisalignedResults { scenarios: usize, results: usize },
}

/// Result type for riskdesk-core operations.
pub type Result<T> = std::result::Result<T, Error>;
