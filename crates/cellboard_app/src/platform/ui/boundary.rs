//! Error isolation and suspension for render functions.

use cellboard_core::AsyncState;
use cellboard_logging::board_warn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("computation failed: {0}")]
    Computation(String),
    #[error("failed to serialize value: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders `render`, substituting `fallback` if it fails.
pub fn error_boundary<W>(
    section: &str,
    render: impl FnOnce() -> Result<W, RenderError>,
    fallback: impl FnOnce() -> W,
) -> W {
    match render() {
        Ok(widget) => widget,
        Err(err) => {
            board_warn!("Render of {} failed: {}", section, err);
            fallback()
        }
    }
}

/// Shows `loading` while `state` is pending and `ready` once it resolved. A
/// crashed computation is reported as an error for the enclosing boundary.
pub fn suspense<'a, T, W>(
    state: &'a AsyncState<T>,
    loading: impl FnOnce() -> W,
    ready: impl FnOnce(&'a T) -> Result<W, RenderError>,
) -> Result<W, RenderError> {
    match state {
        AsyncState::Pending => Ok(loading()),
        AsyncState::Ready(value) => ready(value),
        AsyncState::Errored(message) => Err(RenderError::Computation(message.clone())),
    }
}
