//! `GET /health`: answers as long as the process serves requests

use axum::Json;
use serde::Serialize;

/// Liveness payload; the backend is never contacted here
#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    /// Crate version of the running binary
    pub version: &'static str,
}

pub async fn health_check() -> Json<Liveness> {
    Json(Liveness {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reports_crate_version() {
        let Json(liveness) = health_check().await;
        assert_eq!(liveness.status, "healthy");
        assert_eq!(liveness.version, env!("CARGO_PKG_VERSION"));
    }
}
