//! Test fixtures: form snapshots, logo bytes and a recording delivery
//! platform.
//!
//! # Example
//!
//! ```rust
//! use fixtures::{SnapshotBuilder, RecordingPlatform, ShareBehavior};
//!
//! let snapshot = SnapshotBuilder::new()
//!     .date("2024-05-01")
//!     .row(1, "53021", "3/4", "Red Tagged", "leak", "34")
//!     .build();
//! let platform = RecordingPlatform::new(ShareBehavior::Unavailable);
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::cell::RefCell;

use futures::future::{FutureExt, LocalBoxFuture};
use yardcheck::delivery::{AnchorRequest, Platform};
use yardcheck::error::{Result, YardCheckError};
use yardcheck::{ExportArtifact, FormSnapshot, Metadata, Row};

// ============================================================================
// Logo bytes
// ============================================================================

/// 1x1 transparent PNG
pub const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// JPEG start-of-image marker followed by junk; enough for sniffing.
pub const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

// ============================================================================
// Snapshot Builder
// ============================================================================

/// Builder for form snapshots. Rows are placed by 1-based position.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    metadata: Metadata,
    rows: Vec<Row>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: &str) -> Self {
        self.metadata.date = date.to_string();
        self
    }

    pub fn time(mut self, time: &str) -> Self {
        self.metadata.time = time.to_string();
        self
    }

    pub fn truck(mut self, truck: &str) -> Self {
        self.metadata.truck = truck.to_string();
        self
    }

    pub fn trip(mut self, trip: &str) -> Self {
        self.metadata.trip = trip.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.metadata.location = location.to_string();
        self
    }

    /// Fill the row at 1-based `position`.
    pub fn row(
        mut self,
        position: usize,
        trailer: &str,
        fuel: &str,
        status: &str,
        issues: &str,
        temp: &str,
    ) -> Self {
        if self.rows.len() < position {
            self.rows.resize_with(position, Row::default);
        }
        self.rows[position - 1] = Row {
            trailer: trailer.to_string(),
            fuel: fuel.to_string(),
            status: status.to_string(),
            issues: issues.to_string(),
            temp: temp.to_string(),
        };
        self
    }

    pub fn build(self) -> FormSnapshot {
        FormSnapshot::new(self.metadata, self.rows)
    }
}

/// A snapshot touching every column, used by cross-format checks.
pub fn busy_snapshot() -> FormSnapshot {
    SnapshotBuilder::new()
        .date("2024-05-01")
        .time("06:30")
        .truck("T-12")
        .trip("884120")
        .location("Salisbury")
        .row(1, "53021", "F", "Loaded", "", "34")
        .row(2, "53022", "1/2", "Empty", "left over note", "")
        .row(3, "53023", "E", "Red Tagged", "Air leak & flat <LF>", "36")
        .row(7, "", "3/4", "", "", "")
        .row(25, "53099", "1/8", "Red Tagged", "", "40")
        .build()
}

// ============================================================================
// Recording Platform
// ============================================================================

/// How the fake native share behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareBehavior {
    Unavailable,
    Rejects,
    Succeeds,
}

/// One primitive invoked on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Share(String),
    CreateUrl(String),
    Click {
        href: String,
        filename: String,
        new_tab: bool,
    },
    Revoke(String),
    RevokeLater(String, u32),
}

/// [`Platform`] that records every call instead of touching a browser.
pub struct RecordingPlatform {
    share: ShareBehavior,
    fail_clicks: bool,
    fail_urls: bool,
    calls: RefCell<Vec<PlatformCall>>,
}

impl RecordingPlatform {
    pub fn new(share: ShareBehavior) -> Self {
        Self {
            share,
            fail_clicks: false,
            fail_urls: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every anchor click errors.
    pub fn failing_clicks(mut self) -> Self {
        self.fail_clicks = true;
        self
    }

    /// Object URL creation errors.
    pub fn failing_urls(mut self) -> Self {
        self.fail_urls = true;
        self
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Platform for RecordingPlatform {
    fn share<'a>(
        &'a self,
        artifact: &'a ExportArtifact,
    ) -> Option<LocalBoxFuture<'a, Result<()>>> {
        if self.share == ShareBehavior::Unavailable {
            return None;
        }
        self.record(PlatformCall::Share(artifact.filename.clone()));
        let outcome = match self.share {
            ShareBehavior::Succeeds => Ok(()),
            _ => Err(YardCheckError::Delivery("AbortError".into())),
        };
        Some(futures::future::ready(outcome).boxed_local())
    }

    fn create_object_url(&self, artifact: &ExportArtifact) -> Result<String> {
        if self.fail_urls {
            return Err(YardCheckError::Delivery("no URL support".into()));
        }
        let url = format!("blob:test/{}", artifact.filename);
        self.record(PlatformCall::CreateUrl(url.clone()));
        Ok(url)
    }

    fn click_anchor(&self, anchor: &AnchorRequest<'_>) -> Result<()> {
        self.record(PlatformCall::Click {
            href: anchor.href.to_string(),
            filename: anchor.filename.to_string(),
            new_tab: anchor.new_tab,
        });
        if self.fail_clicks {
            return Err(YardCheckError::Delivery("popup blocked".into()));
        }
        Ok(())
    }

    fn revoke_object_url(&self, url: &str) {
        self.record(PlatformCall::Revoke(url.to_string()));
    }

    fn revoke_object_url_later(&self, url: &str, delay_ms: u32) {
        self.record(PlatformCall::RevokeLater(url.to_string(), delay_ms));
    }
}
