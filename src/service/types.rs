use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct HelloRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloResponse {
    pub greeting: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub label: String,
    pub score: f64,
}
