//! One export, end to end: resolve the logo, render, deliver.

use crate::asset::{resolve_logo_bytes, LogoSource};
use crate::delivery::{deliver, DeliveryRoute, Platform};
use crate::error::Result;
use crate::export::Exporter;
use crate::types::{ExportArtifact, ExportFormat, FormSnapshot};

/// What a finished export produced and how it left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub artifact: ExportArtifact,
    /// `None` when every delivery route failed.
    pub route: Option<DeliveryRoute>,
}

/// Run one export.
///
/// The logo chain only runs for formats that embed it, and a missing logo
/// never fails the export. Delivery problems are logged, not returned.
///
/// # Errors
/// Returns an error only if serialization fails.
pub async fn run_export<P: Platform + ?Sized>(
    format: ExportFormat,
    snapshot: &FormSnapshot,
    logo_sources: &[Box<dyn LogoSource + '_>],
    platform: &P,
    exporter: &Exporter,
) -> Result<ExportOutcome> {
    let logo = if format.uses_logo() {
        resolve_logo_bytes(logo_sources).await
    } else {
        None
    };

    let artifact = exporter.render(format, snapshot, logo.as_ref())?;
    let route = deliver(
        platform,
        &artifact,
        format.delivery_policy(),
        exporter.config().share_revoke_delay_ms,
    )
    .await;

    Ok(ExportOutcome { artifact, route })
}
