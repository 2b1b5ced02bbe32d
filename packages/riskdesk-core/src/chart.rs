//! Exposure mappings shaped for bar charts.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::ValueMap;

/// One bar: a category and its share of the portfolio in percent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub percentage: f64,
}

/// Scale each fraction to a percentage and order the bars largest first.
///
/// Values are not rounded here. Equal percentages keep the mapping's
/// order, and NaN values sink to the end.
pub fn to_chart_series(values: &ValueMap) -> Vec<ChartPoint> {
    let mut series: Vec<ChartPoint> = values
        .iter()
        .map(|(name, fraction)| ChartPoint {
            name: name.to_string(),
            percentage: fraction * 100.0,
        })
        .collect();

    // sort_by is stable
    series.sort_by(|a, b| descending(a.percentage, b.percentage));
    series
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn names(series: &[ChartPoint]) -> Vec<&str> {
        series.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_scales_and_sorts_descending() {
        let map: ValueMap = [("Bond", 0.4), ("Equity", 0.6)].into_iter().collect();
        let series = to_chart_series(&map);

        assert_eq!(names(&series), vec!["Equity", "Bond"]);
        assert_relative_eq!(series[0].percentage, 60.0);
        assert_relative_eq!(series[1].percentage, 40.0);
    }

    #[test]
    fn test_each_percentage_is_fraction_times_hundred() {
        let map: ValueMap = [("A", 0.123456), ("B", 0.000001), ("C", 1.7), ("D", -0.05)]
            .into_iter()
            .collect();
        let series = to_chart_series(&map);

        assert_eq!(series.len(), map.len());
        for point in &series {
            let fraction = map.get(&point.name).unwrap();
            assert_eq!(point.percentage, fraction * 100.0);
        }
        for pair in series.windows(2) {
            assert!(pair[0].percentage >= pair[1].percentage);
        }
    }

    #[test]
    fn test_values_need_not_sum_to_one() {
        let map: ValueMap = [("Technology", 0.9), ("Financials", 0.8)].into_iter().collect();
        let series = to_chart_series(&map);
        let total: f64 = series.iter().map(|p| p.percentage).sum();
        assert_relative_eq!(total, 170.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let map: ValueMap = [("AA", 0.2), ("AAA", 0.5), ("BBB", 0.2), ("A", 0.2)]
            .into_iter()
            .collect();
        let first = to_chart_series(&map);
        let second = to_chart_series(&map);

        assert_eq!(names(&first), vec!["AAA", "AA", "BBB", "A"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_mapping_gives_empty_series() {
        assert!(to_chart_series(&ValueMap::new()).is_empty());
    }

    #[test]
    fn test_input_is_untouched() {
        let map: ValueMap = [("Cash", 0.1), ("Equity", 0.9)].into_iter().collect();
        let before = map.clone();
        let _ = to_chart_series(&map);
        assert_eq!(map, before);
    }

    #[test]
    fn test_nan_sinks_to_end() {
        let map: ValueMap = [("Unknown", f64::NAN), ("Equity", 0.3), ("Debt", 0.7)]
            .into_iter()
            .collect();
        let series = to_chart_series(&map);
        assert_eq!(names(&series), vec!["Debt", "Equity", "Unknown"]);
        assert!(series[2].percentage.is_nan());
    }
}
