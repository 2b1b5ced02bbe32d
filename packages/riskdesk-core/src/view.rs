//! Dashboard view model.
//!
//! Turns an [`AnalysisResponse`] into the display-ready pieces a results
//! page is composed of. Built fresh for every render; holds no state.

use serde::Serialize;

use crate::chart::{to_chart_series, ChartPoint};
use crate::format::{
    format_currency, format_driver, format_duration, format_liquidity, format_loss,
    format_loss_badge,
};
use crate::severity::{classify, Severity};
use crate::types::{AnalysisResponse, SimulationResult, ValueMap};

/// A headline figure.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext: Option<&'static str>,
}

/// A titled exposure bar chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExposureChart {
    pub title: &'static str,
    pub series: Vec<ChartPoint>,
}

/// A non-zero shock factor shown on a scenario card.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Driver {
    pub name: String,
    pub magnitude: f64,
    pub display: String,
}

/// One stress scenario outcome.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScenarioCard {
    pub name: String,
    pub description: String,
    pub severity: Severity,
    /// e.g. "15.00% Loss"
    pub loss_badge: String,
    /// e.g. "-$150,000"
    pub projected_impact: String,
    pub drivers: Vec<Driver>,
}

impl ScenarioCard {
    pub fn from_result(result: &SimulationResult) -> Self {
        Self {
            name: result.scenario_name.clone(),
            description: result.scenario_description.clone(),
            severity: classify(result.percentage_loss),
            loss_badge: format_loss_badge(result.percentage_loss),
            projected_impact: format_loss(result.total_pnl),
            drivers: primary_drivers(&result.shock_details),
        }
    }
}

/// Shock factors that actually moved, in the order the service listed them.
///
/// Zero-magnitude factors did not drive the outcome and are dropped.
pub fn primary_drivers(shock_details: &ValueMap) -> Vec<Driver> {
    shock_details
        .iter()
        .filter(|(_, magnitude)| *magnitude != 0.0)
        .map(|(name, magnitude)| Driver {
            name: name.to_string(),
            magnitude,
            display: format!("{}: {}", name, format_driver(magnitude)),
        })
        .collect()
}

/// Everything the results page shows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub risk_explanation: String,
    pub summary_cards: Vec<SummaryCard>,
    pub exposure_charts: Vec<ExposureChart>,
    /// `None` when the service raised no alerts, so nothing is rendered.
    pub concentration_alerts: Option<Vec<String>>,
    pub scenario_cards: Vec<ScenarioCard>,
}

impl Dashboard {
    pub fn from_response(response: &AnalysisResponse) -> Self {
        let report = &response.exposure_report;

        let summary_cards = vec![
            SummaryCard {
                title: "Total Value",
                value: format_currency(response.portfolio_summary.total_value),
                subtext: None,
            },
            SummaryCard {
                title: "Avg Duration",
                value: format_duration(report.weighted_average_duration),
                subtext: Some("Interest Rate Sensitivity"),
            },
            SummaryCard {
                title: "Liquidity Score",
                value: format_liquidity(report.liquidity_profile),
                subtext: Some("0 (Illiquid) - 100 (Liquid)"),
            },
        ];

        let exposure_charts = vec![
            ExposureChart {
                title: "Exposure by Asset Class",
                series: to_chart_series(&report.by_asset_class),
            },
            ExposureChart {
                title: "Exposure by Sector",
                series: to_chart_series(&report.by_sector),
            },
            ExposureChart {
                title: "Exposure by Rating",
                series: to_chart_series(&report.by_rating),
            },
        ];

        let concentration_alerts = if report.concentration_alerts.is_empty() {
            None
        } else {
            Some(report.concentration_alerts.clone())
        };

        let scenario_cards = response
            .scenario_outcomes()
            .map(|(_, result)| ScenarioCard::from_result(result))
            .collect();

        Self {
            risk_explanation: response.risk_explanation.clone(),
            summary_cards,
            exposure_charts,
            concentration_alerts,
            scenario_cards,
        }
    }

    /// Number of scenario cards rendered with severe emphasis.
    pub fn severe_count(&self) -> usize {
        self.scenario_cards
            .iter()
            .filter(|card| card.severity.is_severe())
            .count()
    }
}
