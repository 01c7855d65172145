//! Chart data selection: remote payload or embedded samples.
//!
//! The loader has exactly two branches - the network payload and a fixed
//! fixture - chosen at a single decision point so the fallback never
//! leaks into render code. The sample fixture covers the line, bar, pie
//! and area charts only; scatter and polar have no offline data.

use crate::api::error::ApiError;
use crate::api::types::{ChartDataset, ScatterDataset, VisualizationData};

/// The datasets the charts overlay renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    /// Average annual cost by age group.
    pub line: ChartDataset,
    /// Average cost by insurance type.
    pub bar: ChartDataset,
    /// Chronic condition distribution.
    pub pie: ChartDataset,
    /// Average cost by city type.
    pub area: ChartDataset,
    /// Cost against doctor-visit frequency (remote only).
    pub scatter: Option<ScatterDataset>,
    /// Cost by gender/smoker combination (remote only).
    pub polar: Option<ChartDataset>,
}

impl ChartSet {
    /// Builds the set from a validated backend payload.
    #[must_use]
    pub fn from_remote(data: VisualizationData) -> Self {
        Self {
            line: data.line_chart,
            bar: data.bar_chart,
            pie: data.pie_chart,
            area: data.area_chart,
            scatter: Some(data.scatter_chart),
            polar: Some(data.polar_chart),
        }
    }

    /// Returns the fixed fallback datasets.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            line: ChartDataset::new(
                &["<20", "20-30", "30-40", "40-50", "50-60", "60-70", "70-80", "80+"],
                &[5000.0, 6000.0, 7500.0, 9000.0, 11000.0, 13000.0, 15000.0, 17000.0],
            ),
            bar: ChartDataset::new(&["Private", "Government", "None"], &[5500.0, 8000.0, 18000.0]),
            pie: ChartDataset::new(
                &["Diabetes", "Hypertension", "Heart Disease", "Asthma", "No Conditions"],
                &[500.0, 600.0, 300.0, 400.0, 3200.0],
            ),
            area: ChartDataset::new(&["Rural", "Semi-Urban", "Urban"], &[9500.0, 8500.0, 7500.0]),
            scatter: None,
            polar: None,
        }
    }
}

/// Which branch supplied the chart data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    Remote,
    Sample,
}

impl ChartSource {
    /// Returns the label shown in the overlay title.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Remote => "live data",
            Self::Sample => "sample data",
        }
    }
}

/// The single decision point of the two-branch data source: a payload
/// that failed to arrive, or arrived malformed (mismatched parallel
/// sequences), selects the sample fixture.
#[must_use]
pub fn select_charts(result: Result<VisualizationData, ApiError>) -> (ChartSet, ChartSource) {
    match result {
        Ok(data) if data.is_valid() => (ChartSet::from_remote(data), ChartSource::Remote),
        Ok(_) | Err(_) => (ChartSet::sample(), ChartSource::Sample),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> VisualizationData {
        VisualizationData {
            line_chart: ChartDataset::new(&["<20", "20-30"], &[5000.0, 6000.0]),
            bar_chart: ChartDataset::new(&["Private"], &[5500.0]),
            pie_chart: ChartDataset::new(&["Diabetes"], &[500.0]),
            area_chart: ChartDataset::new(&["Rural"], &[9500.0]),
            scatter_chart: ScatterDataset {
                labels: vec![],
                x_data: vec![1.0, 2.0],
                y_data: vec![8000.0, 8600.0],
                sizes: None,
            },
            polar_chart: ChartDataset::new(&["Male Smokers"], &[15000.0]),
        }
    }

    #[test]
    fn valid_payload_selects_remote_source() {
        let (set, source) = select_charts(Ok(valid_payload()));
        assert_eq!(source, ChartSource::Remote);
        assert!(set.scatter.is_some());
        assert!(set.polar.is_some());
        assert_eq!(set.line.labels[0], "<20");
    }

    #[test]
    fn fetch_failure_selects_sample_source() {
        let (set, source) = select_charts(Err(ApiError::Api("boom".to_string())));
        assert_eq!(source, ChartSource::Sample);
        assert_eq!(set, ChartSet::sample());
    }

    #[test]
    fn mismatched_lengths_select_sample_source() {
        let mut payload = valid_payload();
        payload.bar_chart = ChartDataset::new(&["Private", "Government"], &[5500.0]);

        let (set, source) = select_charts(Ok(payload));
        assert_eq!(source, ChartSource::Sample);
        assert!(set.scatter.is_none());
    }

    #[test]
    fn sample_set_covers_only_the_four_offline_charts() {
        let set = ChartSet::sample();
        assert!(set.line.is_valid());
        assert!(set.bar.is_valid());
        assert!(set.pie.is_valid());
        assert!(set.area.is_valid());
        assert!(set.scatter.is_none());
        assert!(set.polar.is_none());
        assert_eq!(set.line.labels.len(), 8);
    }
}
