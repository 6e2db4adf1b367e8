//! Status projection: the one business rule every serializer shares.
//!
//! The form has a single status select per row, but the printed report has
//! two columns for it. A red-tagged row shows its issues in the red-tag
//! column and leaves Loaded/Empty blank; any other status goes into
//! Loaded/Empty and leaves the red-tag column blank.

use crate::types::{Row, STATUS_RED_TAGGED};

/// The two display columns derived from a row's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusColumns<'a> {
    pub loaded_empty: &'a str,
    pub red_tagged: &'a str,
}

/// Project a row's status onto the Loaded/Empty and red-tag columns.
#[must_use]
pub fn project(row: &Row) -> StatusColumns<'_> {
    if row.status == STATUS_RED_TAGGED {
        StatusColumns {
            loaded_empty: "",
            red_tagged: &row.issues,
        }
    } else {
        StatusColumns {
            loaded_empty: &row.status,
            red_tagged: "",
        }
    }
}
