use async_trait::async_trait;
use predict_server::{
    service::{HelloRequest, HelloResponse, PredictRequest, PredictResponse, Service},
    Error, Result,
};
use std::sync::{Arc, Mutex};

/// Mock prediction backend for testing. Records every request and
/// can be programmed to fail either operation.
#[derive(Debug, Default)]
pub struct MockService {
    pub hello_error: Option<String>,
    pub predict_error: Option<String>,
    pub hello_requests: Arc<Mutex<Vec<HelloRequest>>>,
    pub predict_requests: Arc<Mutex<Vec<PredictRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hello_error(mut self, error: impl Into<String>) -> Self {
        self.hello_error = Some(error.into());
        self
    }

    pub fn with_predict_error(mut self, error: impl Into<String>) -> Self {
        self.predict_error = Some(error.into());
        self
    }
}

#[async_trait]
impl Service for MockService {
    async fn hello(&self, request: HelloRequest) -> Result<HelloResponse> {
        let name = request.name.clone();
        self.hello_requests.lock().unwrap().push(request);

        if let Some(ref error) = self.hello_error {
            return Err(Error::service(error.clone()));
        }

        Ok(HelloResponse {
            greeting: format!("mock greeting for {name}"),
        })
    }

    async fn predict(&self, request: PredictRequest) -> Result<PredictResponse> {
        self.predict_requests.lock().unwrap().push(request);

        if let Some(ref error) = self.predict_error {
            return Err(Error::service(error.clone()));
        }

        Ok(PredictResponse {
            label: "mock-class".to_string(),
            score: 0.5,
        })
    }
}
