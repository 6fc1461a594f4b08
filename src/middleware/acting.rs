//! Acting staff member extractor for point-of-care writes.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::AppState;

/// Header naming the staff member performing a point-of-care operation.
pub const ACTING_STAFF_HEADER: &str = "X-Acting-Staff";

/// Staff member on whose behalf a write is performed.
///
/// Taken from the `X-Acting-Staff` header, or from the configured default
/// identity when the header is absent:
/// ```ignore
/// async fn handler(ActingStaff(staff_id): ActingStaff) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingStaff(pub Uuid);

/// Pick the acting staff id from the header value or the configured fallback.
pub fn resolve(header: Option<&str>, fallback: Option<Uuid>) -> Result<Uuid, AppError> {
    match header.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value.parse().map_err(|_| {
            AppError::Validation(format!("{ACTING_STAFF_HEADER} must be a staff member id"))
        }),
        None => fallback.ok_or(AppError::Unauthorized),
    }
}

impl FromRequestParts<AppState> for ActingStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACTING_STAFF_HEADER)
            .map(|v| v.to_str().map_err(|_| AppError::Unauthorized))
            .transpose()?;

        resolve(header, state.config.default_acting_staff_id).map(ActingStaff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_wins_over_fallback() {
        let from_header = Uuid::now_v7();
        let fallback = Uuid::now_v7();
        let resolved = resolve(Some(&from_header.to_string()), Some(fallback)).unwrap();
        assert_eq!(resolved, from_header);
    }

    #[test]
    fn fallback_used_without_header() {
        let fallback = Uuid::now_v7();
        assert_eq!(resolve(None, Some(fallback)).unwrap(), fallback);
        assert_eq!(resolve(Some("  "), Some(fallback)).unwrap(), fallback);
    }

    #[test]
    fn missing_identity_is_unauthorized() {
        assert!(matches!(resolve(None, None), Err(AppError::Unauthorized)));
    }

    #[test]
    fn malformed_header_is_rejected() {
        assert!(matches!(
            resolve(Some("nurse-7"), None),
            Err(AppError::Validation(_))
        ));
    }
}
