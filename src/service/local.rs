use super::{HelloRequest, HelloResponse, PredictRequest, PredictResponse, Service};
use crate::{Error, Result};
use async_trait::async_trait;

/// Deterministic in-process backend. Stands in for an external
/// prediction service behind the same trait.
#[derive(Debug, Default)]
pub struct LocalService;

impl LocalService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Service for LocalService {
    async fn hello(&self, request: HelloRequest) -> Result<HelloResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(Error::service("empty name"));
        }
        Ok(HelloResponse {
            greeting: format!("Hello, {name}!"),
        })
    }

    async fn predict(&self, request: PredictRequest) -> Result<PredictResponse> {
        // Argmax over the feature vector; ties resolve to the first maximum.
        let (index, score) = request
            .features
            .iter()
            .copied()
            .enumerate()
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
            .ok_or_else(|| Error::service("empty feature vector"))?;

        Ok(PredictResponse {
            label: format!("class-{index}"),
            score,
        })
    }
}
