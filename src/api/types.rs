//! Wire types for the prediction backend.
//!
//! Field names and encodings mirror the backend contract exactly: the
//! boolean health flags travel as 0/1 integers, smoker status as
//! "Yes"/"No", and the per-model estimate mapping keeps the order the
//! backend listed the models in (it is display order, not sorted - this
//! relies on `serde_json`'s `preserve_order` feature).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A prediction request: one flat record of demographic, behavioral and
/// medical fields. Constructed fresh on every submission from the
/// sanitized form values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub age: u32,
    pub gender: String,
    pub bmi: f64,
    /// "Yes" or "No".
    pub smoker: String,
    pub diabetes: u8,
    pub hypertension: u8,
    pub heart_disease: u8,
    pub asthma: u8,
    pub physical_activity_level: String,
    pub daily_steps: u32,
    pub sleep_hours: f64,
    pub stress_level: u32,
    pub doctor_visits_per_year: u32,
    pub hospital_admissions: u32,
    pub medication_count: u32,
    pub insurance_type: String,
    pub insurance_coverage_pct: u32,
    pub city_type: String,
    pub previous_year_cost: f64,
    /// Attached only when a user session exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Response from `POST /predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,
    #[serde(default)]
    pub prediction_inr: f64,
    /// Model name -> estimate, in the order the backend listed them.
    #[serde(default)]
    pub individual_predictions: Map<String, Value>,
    #[serde(default)]
    pub cost_explanation: Option<CostExplanation>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PredictionResponse {
    /// Per-model estimates in response order, skipping non-numeric values.
    #[must_use]
    pub fn model_estimates(&self) -> Vec<(String, f64)> {
        self.individual_predictions
            .iter()
            .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)))
            .collect()
    }
}

/// Explanation block attached to a successful prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct CostExplanation {
    pub summary: String,
    /// Ordered `(factor, impact category, formatted contribution)` triples.
    #[serde(default)]
    pub detailed_factors: Vec<(String, String, String)>,
    pub total_cost_inr: String,
    pub insurance_coverage: InsuranceCoverage,
}

/// Insurance coverage breakdown. Amounts arrive pre-formatted by the
/// backend and are displayed verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct InsuranceCoverage {
    pub covered_amount: String,
    pub out_of_pocket: String,
}

/// Input style of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    /// Free text typed by the user.
    Text,
    /// One of the fixed option buttons.
    Option,
}

impl ChatKind {
    /// Returns the wire value for the `type` field of `POST /chat`.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Option => "option",
        }
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
}

/// Response from `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One labeled series for a category chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartDataset {
    /// Builds a dataset from parallel slices (used for embedded fixtures).
    #[must_use]
    pub fn new(labels: &[&str], data: &[f64]) -> Self {
        Self {
            labels: labels.iter().map(|s| (*s).to_string()).collect(),
            data: data.to_vec(),
        }
    }

    /// A dataset is renderable only when its parallel sequences agree in
    /// length and are non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.labels.is_empty() && self.labels.len() == self.data.len()
    }
}

/// Parallel x/y series for the scatter chart, with optional point sizes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScatterDataset {
    #[serde(default)]
    pub labels: Vec<String>,
    pub x_data: Vec<f64>,
    pub y_data: Vec<f64>,
    #[serde(default)]
    pub sizes: Option<Vec<f64>>,
}

impl ScatterDataset {
    /// Checks the x/y (and sizes, when present) parallelism invariant.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.x_data.is_empty()
            && self.x_data.len() == self.y_data.len()
            && self
                .sizes
                .as_ref()
                .is_none_or(|sizes| sizes.len() == self.x_data.len())
    }
}

/// Payload of `GET /visualizations`: six named datasets.
#[derive(Debug, Clone, Deserialize)]
pub struct VisualizationData {
    pub line_chart: ChartDataset,
    pub bar_chart: ChartDataset,
    pub pie_chart: ChartDataset,
    pub area_chart: ChartDataset,
    pub scatter_chart: ScatterDataset,
    pub polar_chart: ChartDataset,
}

impl VisualizationData {
    /// Validates every contained dataset. A payload that fails here is
    /// treated the same as a failed fetch.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.line_chart.is_valid()
            && self.bar_chart.is_valid()
            && self.pie_chart.is_valid()
            && self.area_chart.is_valid()
            && self.scatter_chart.is_valid()
            && self.polar_chart.is_valid()
    }
}
