//! Backend API client and wire types.

pub mod client;
pub mod error;
pub mod types;

pub use client::{
    BackendApi, HttpBackend, run_chat, run_prediction, run_statistics, run_visualizations,
};
pub use error::ApiError;
pub use types::{
    ChartDataset, ChatKind, ChatResponse, CostExplanation, InsuranceCoverage, PredictionRequest,
    PredictionResponse, ScatterDataset, VisualizationData,
};
