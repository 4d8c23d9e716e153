/// Mastering API route
use crate::error::{Result, ServerError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use lathe_mastering::{MasteringChain, MasteringParams};
use serde::Deserialize;

/// Per-request overrides of the configured mastering defaults
#[derive(Debug, Deserialize)]
pub struct MasterQuery {
    pub target_lufs: Option<f64>,
    pub highpass_hz: Option<f64>,
    pub limiter_threshold: Option<f32>,
    pub true_peak_db: Option<f64>,
}

impl MasterQuery {
    fn apply_to(&self, defaults: MasteringParams) -> MasteringParams {
        MasteringParams {
            target_loudness_lufs: self.target_lufs.unwrap_or(defaults.target_loudness_lufs),
            highpass_cutoff_hz: self.highpass_hz.unwrap_or(defaults.highpass_cutoff_hz),
            limiter_threshold: self
                .limiter_threshold
                .unwrap_or(defaults.limiter_threshold),
            true_peak_target_db: self.true_peak_db.unwrap_or(defaults.true_peak_target_db),
        }
    }
}

/// POST /api/master - Master an uploaded WAV recording
///
/// Expects a multipart/form-data body with a `file` field holding the WAV
/// bytes. Responds with the mastered audio as a 16-bit PCM WAV attachment.
pub async fn master(
    State(app_state): State<AppState>,
    Query(query): Query<MasterQuery>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<Response> {
    let wav_bytes = extract_upload(&headers, body).await?;
    let params = query.apply_to(app_state.defaults);

    tracing::info!(
        upload_bytes = wav_bytes.len(),
        target_lufs = params.target_loudness_lufs,
        "mastering upload"
    );

    // The chain is pure CPU work; keep it off the async workers.
    let mastered_wav = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let raw = lathe_codec::decode_wav(&wav_bytes)?;
        let mastered = MasteringChain::new(params).master(raw)?;
        Ok(lathe_codec::encode_wav_pcm16(&mastered)?)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("mastering task failed: {}", e)))??;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/wav".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"mastered.wav\"".to_string(),
            ),
        ],
        mastered_wav,
    )
        .into_response())
}

/// Pull the `file` field out of a multipart/form-data body
async fn extract_upload(
    headers: &axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<Vec<u8>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .ok_or_else(|| ServerError::BadRequest("Missing boundary".to_string()))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Failed to read file: {}", e)))?
                    .to_vec(),
            );
        }
    }

    file_data.ok_or_else(|| ServerError::BadRequest("Missing file".to_string()))
}
