mod local;
mod types;

pub use local::LocalService;
pub use types::*;

use crate::Result;
use async_trait::async_trait;

/// The prediction backend the handlers delegate to.
///
/// Implementations own the domain logic entirely; the server only
/// shuttles requests in and wraps results or errors into the
/// response envelope.
#[async_trait]
pub trait Service: Send + Sync {
    async fn hello(&self, request: HelloRequest) -> Result<HelloResponse>;
    async fn predict(&self, request: PredictRequest) -> Result<PredictResponse>;
}
