use super::types::Envelope;
use crate::service::{HelloRequest, HelloResponse, PredictRequest, PredictResponse, Service};
use axum::{
    body::Bytes,
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::BytesRejection,
        Query, State,
    },
};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{error, info};

/// Size cap for the uploaded image itself.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Request-body limit for the upload route: the field cap plus
/// headroom for multipart boundaries and part headers, so an
/// exactly-at-cap image is not rejected for its framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Form field carrying the uploaded image bytes.
const UPLOAD_FIELD: &str = "image";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn Service>,
    pub upload_dir: PathBuf,
}

pub async fn hello(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Envelope<HelloResponse> {
    // First occurrence of `name` wins when the parameter repeats.
    let Some(name) = params
        .into_iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value)
    else {
        return Envelope::error("error getting request data");
    };

    match state.service.hello(HelloRequest { name }).await {
        Ok(response) => Envelope::ok(response),
        Err(e) => Envelope::error(e.to_string()),
    }
}

pub async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Envelope<PredictResponse> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!("Error reading predict body: {}", rejection.body_text());
            return Envelope::error(rejection.body_text());
        }
    };
    if body.is_empty() {
        return Envelope::error("Empty body");
    }

    let request: PredictRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return Envelope::error(e.to_string()),
    };

    match state.service.predict(request).await {
        Ok(response) => Envelope::ok(response),
        Err(e) => Envelope::error(e.to_string()),
    }
}

/// Accepts a multipart form with an `image` field and writes its bytes
/// to a uniquely named `upload-*.jpg` file in the upload directory.
/// Any failure along the parse/read/write chain aborts immediately
/// with an error envelope; a file only persists after a complete write.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Envelope<String> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            error!("Error parsing multipart form: {}", rejection.body_text());
            return Envelope::error(rejection.body_text());
        }
    };

    let data = match read_image_field(&mut multipart).await {
        Ok(data) => data,
        Err(e) => {
            error!("Error retrieving the uploaded file: {}", e);
            return Envelope::error(e);
        }
    };

    let dir = state.upload_dir.clone();
    let written = tokio::task::spawn_blocking(move || write_temp_file(&dir, &data)).await;
    match written {
        Ok(Ok(filename)) => {
            info!("Stored upload as {}", filename);
            Envelope::ok(filename)
        }
        Ok(Err(e)) => {
            error!("Error writing uploaded file: {}", e);
            Envelope::error(e.to_string())
        }
        Err(e) => {
            error!("Upload write task failed: {}", e);
            Envelope::error(e.to_string())
        }
    }
}

/// Walks the form for the `image` field and reads it fully into
/// memory. Read failures include the body-size cap being exceeded.
async fn read_image_field(multipart: &mut Multipart) -> Result<Bytes, String> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(format!("no `{UPLOAD_FIELD}` field in multipart form")),
            Err(e) => return Err(error_text(e)),
        };
        if field.name() == Some(UPLOAD_FIELD) {
            let data = field.bytes().await.map_err(error_text)?;
            if data.len() > MAX_UPLOAD_BYTES {
                return Err(format!(
                    "`{UPLOAD_FIELD}` field exceeds {MAX_UPLOAD_BYTES} byte limit"
                ));
            }
            return Ok(data);
        }
    }
}

fn error_text(e: MultipartError) -> String {
    e.body_text()
}

/// Creates a fresh `upload-*.jpg` temp file in `dir`, writes `data`,
/// and persists it. Unique temp names make concurrent uploads safe
/// without coordination. Returns the file's base name.
fn write_temp_file(dir: &Path, data: &[u8]) -> io::Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(".jpg")
        .tempfile_in(dir)?;
    file.write_all(data)?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default())
}
