//! Analysis payload types returned by the stress-testing service.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Insertion-ordered mapping from a category or factor name to a number.
///
/// JSON objects decode in document order, so consumers that care about
/// iteration order (chart tie-breaking, driver lists) see the order the
/// server wrote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    entries: Vec<(String, f64)>,
}

impl ValueMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one if the name was present.
    ///
    /// A repeated name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        let name = name.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((name, value));
        None
    }

    /// Look up a value by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl Serialize for ValueMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct ValueMapVisitor;

impl<'de> Visitor<'de> for ValueMapVisitor {
    type Value = ValueMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of names to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<ValueMap, A::Error> {
        let mut map = ValueMap::new();
        while let Some((name, value)) = access.next_entry::<String, f64>()? {
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ValueMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ValueMapVisitor)
    }
}

fn default_rating() -> String {
    "NR".to_string()
}

/// One holding in the submitted portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioPosition {
    /// Asset class (Equity, Debt, Cash, Derivative)
    pub asset_class: String,
    /// Ticker or other unique identifier
    pub ticker: String,
    /// Security name
    pub name: String,
    /// Units held
    pub quantity: f64,
    /// Price per unit
    pub market_price: f64,
    /// Market value as reported by the service
    pub market_value: f64,
    /// Industry sector
    pub sector: String,
    /// Duration in years (zero for non-debt holdings)
    #[serde(default)]
    pub duration: f64,
    /// Credit rating, "NR" when not rated
    #[serde(default = "default_rating")]
    pub rating: String,
    /// Liquidity score, 0 (illiquid) to 100 (liquid)
    pub liquidity_score: f64,
}

/// The portfolio as parsed by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Portfolio {
    #[serde(default)]
    pub positions: Vec<PortfolioPosition>,
    /// Authoritative total; not reconciled against the positions.
    pub total_value: f64,
    pub as_of_date: String,
}

impl Portfolio {
    /// Get the number of positions.
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }
}

/// Exposure breakdown and portfolio-level risk figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExposureReport {
    /// Fraction of value per asset class
    #[serde(default)]
    pub by_asset_class: ValueMap,
    /// Fraction of value per sector
    #[serde(default)]
    pub by_sector: ValueMap,
    /// Fraction of value per credit rating
    #[serde(default)]
    pub by_rating: ValueMap,
    pub weighted_average_duration: f64,
    /// Weighted liquidity score, 0-100
    pub liquidity_profile: f64,
    #[serde(default)]
    pub concentration_alerts: Vec<String>,
}

/// A named set of market shocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressScenario {
    pub name: String,
    pub description: String,
    /// Fractional equity move, e.g. -0.20
    #[serde(default)]
    pub equity_shock: f64,
    /// Rate move in basis points
    #[serde(default)]
    pub rate_shock: f64,
    /// Spread move in basis points
    #[serde(default)]
    pub credit_spread_shock: f64,
    #[serde(default)]
    pub liquidity_shock: f64,
}

/// Outcome of applying one scenario to the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationResult {
    pub scenario_name: String,
    pub scenario_description: String,
    /// Signed P&L, negative for losses
    pub total_pnl: f64,
    /// Signed fraction of portfolio value, negative for losses
    pub percentage_loss: f64,
    /// P&L per position identifier
    #[serde(default)]
    pub position_impacts: ValueMap,
    /// Magnitude per shock factor ("drivers")
    #[serde(default)]
    pub shock_details: ValueMap,
}

/// Full analysis payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    pub portfolio_summary: Portfolio,
    pub exposure_report: ExposureReport,
    pub selected_scenarios: Vec<StressScenario>,
    /// One result per selected scenario, same order
    pub simulation_results: Vec<SimulationResult>,
    pub risk_explanation: String,
}

impl AnalysisResponse {
    /// Decode a response body and check that results line up with scenarios.
    pub fn from_json_slice(body: &[u8]) -> Result<Self> {
        let response: Self = serde_json::from_slice(body)?;
        response.check_alignment()?;
        Ok(response)
    }

    /// Verify there is exactly one result per selected scenario.
    pub fn check_alignment(&self) -> Result<()> {
        let scenarios = self.selected_scenarios.len();
        let results = self.simulation_results.len();
        if scenarios != results {
            return Err(Error::MisalignedResults { scenarios, results });
        }
        Ok(())
    }

    /// Pair each scenario with the result it produced, by position.
    pub fn scenario_outcomes(&self) -> impl Iterator<Item = (&StressScenario, &SimulationResult)> {
        self.selected_scenarios
            .iter()
            .zip(self.simulation_results.iter())
    }
}
