//! Optional API-key authentication for the public read endpoints.
//!
//! The endpoints are open: a request without an `x-api-key` header proceeds
//! unauthenticated. Presenting a key commits the caller to full validation
//! against the stored key records, including the paired `x-api-secret`.

use axum::http::HeaderMap;

use crate::error::{ApiError, Result};
use crate::store::{ApiKeyRecord, JsonStore};

// == Authorize ==
/// Validates the `x-api-key`/`x-api-secret` pair when present.
///
/// A successful check stamps `last_used` on the key record and rewrites the
/// key file. Store failures during validation are reported as authorization
/// failures rather than internal errors, so a broken key file cannot be
/// probed apart from a bad credential.
pub fn authorize(headers: &HeaderMap, keys: &JsonStore) -> Result<()> {
    let api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    let Some(api_key) = api_key else {
        return Ok(());
    };

    let secret = headers
        .get("x-api-secret")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    let Some(secret) = secret else {
        return Err(ApiError::Unauthorized(
            "Missing API Key or Secret".to_string(),
        ));
    };

    if !keys.exists() {
        return Err(ApiError::Unauthorized("No API keys configured".to_string()));
    }

    let validation_failure =
        || ApiError::Unauthorized("Internal Server Error during validation".to_string());

    let mut records: Vec<ApiKeyRecord> = keys.load().map_err(|_| validation_failure())?;

    let Some(record) = records
        .iter_mut()
        .find(|k| k.key == api_key && k.is_active())
    else {
        return Err(ApiError::Unauthorized(
            "Invalid or inactive API Key".to_string(),
        ));
    };

    if record.secret != secret {
        return Err(ApiError::Unauthorized("Invalid API Secret".to_string()));
    }

    record.last_used = Some(chrono::Utc::now().to_rfc3339());
    keys.save(&records).map_err(|_| validation_failure())?;

    Ok(())
}
