//! Output delivery.
//!
//! Each export format has a fixed [`DeliveryPolicy`]; a policy expands to an
//! ordered list of [`DeliveryRoute`]s that [`deliver`] walks until one
//! succeeds. The browser primitives the routes need sit behind
//! [`Platform`], implemented by [`web::BrowserPlatform`] on wasm32.
//!
//! Delivery never fails from the caller's point of view: route errors are
//! logged and the next route is tried.

#[cfg(target_arch = "wasm32")]
pub mod web;

use futures::future::LocalBoxFuture;

use crate::error::{Result, YardCheckError};
use crate::types::{DeliveryPolicy, ExportArtifact};

/// One way of getting an artifact to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryRoute {
    /// Native share sheet with the artifact attached as a file.
    NativeShare,
    /// Hidden anchor with `download`, object URL revoked immediately.
    Download,
    /// Anchor opening the object URL in a new browsing context; the URL is
    /// revoked after a delay because the new context reads it later.
    NewTab,
}

impl DeliveryPolicy {
    /// Routes in the order they are attempted.
    #[must_use]
    pub fn routes(self) -> &'static [DeliveryRoute] {
        match self {
            Self::DirectDownload => &[DeliveryRoute::Download],
            Self::ShareOrDownload => &[DeliveryRoute::NativeShare, DeliveryRoute::NewTab],
        }
    }
}

/// Attributes of the synthetic anchor clicked by the download routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRequest<'a> {
    pub href: &'a str,
    pub filename: &'a str,
    pub new_tab: bool,
}

/// Platform capabilities used by the delivery routes.
pub trait Platform {
    /// Start a native share of `artifact`, or `None` when the platform has
    /// no share capability.
    fn share<'a>(&'a self, artifact: &'a ExportArtifact)
        -> Option<LocalBoxFuture<'a, Result<()>>>;

    /// Create a transient URL referencing the artifact's bytes.
    fn create_object_url(&self, artifact: &ExportArtifact) -> Result<String>;

    /// Insert, click and remove a hidden anchor.
    fn click_anchor(&self, anchor: &AnchorRequest<'_>) -> Result<()>;

    /// Release a transient URL now.
    fn revoke_object_url(&self, url: &str);

    /// Release a transient URL after `delay_ms`.
    fn revoke_object_url_later(&self, url: &str, delay_ms: u32);
}

/// Deliver `artifact` following `policy`.
///
/// Returns the route that succeeded, or `None` once every route failed.
pub async fn deliver<P: Platform + ?Sized>(
    platform: &P,
    artifact: &ExportArtifact,
    policy: DeliveryPolicy,
    revoke_delay_ms: u32,
) -> Option<DeliveryRoute> {
    for &route in policy.routes() {
        match attempt(platform, artifact, route, revoke_delay_ms).await {
            Ok(()) => {
                log::debug!("{} delivered via {route:?}", artifact.filename);
                return Some(route);
            }
            Err(e) => log::debug!("{route:?} failed for {}: {e}", artifact.filename),
        }
    }
    log::warn!("every delivery route failed for {}", artifact.filename);
    None
}

async fn attempt<P: Platform + ?Sized>(
    platform: &P,
    artifact: &ExportArtifact,
    route: DeliveryRoute,
    revoke_delay_ms: u32,
) -> Result<()> {
    match route {
        DeliveryRoute::NativeShare => match platform.share(artifact) {
            Some(sharing) => sharing.await,
            None => Err(YardCheckError::Delivery("native share unavailable".into())),
        },
        DeliveryRoute::Download => {
            let url = platform.create_object_url(artifact)?;
            let clicked = platform.click_anchor(&AnchorRequest {
                href: &url,
                filename: &artifact.filename,
                new_tab: false,
            });
            platform.revoke_object_url(&url);
            clicked
        }
        DeliveryRoute::NewTab => {
            let url = platform.create_object_url(artifact)?;
            let clicked = platform.click_anchor(&AnchorRequest {
                href: &url,
                filename: &artifact.filename,
                new_tab: true,
            });
            if clicked.is_ok() {
                platform.revoke_object_url_later(&url, revoke_delay_ms);
            } else {
                platform.revoke_object_url(&url);
            }
            clicked
        }
    }
}
