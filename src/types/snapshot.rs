use serde::{Deserialize, Serialize};

/// Number of trailer rows on the form.
pub const ROW_COUNT: usize = 25;

/// Fuel level codes offered by the form, empty first.
pub const FUEL_LEVELS: [&str; 10] = ["", "F", "7/8", "3/4", "5/8", "1/2", "3/8", "1/4", "1/8", "E"];

/// Status value that routes a row's issues into the red-tag column.
pub const STATUS_RED_TAGGED: &str = "Red Tagged";

/// Status options offered by the form, empty first.
pub const STATUS_OPTIONS: [&str; 4] = ["", "Loaded", "Empty", STATUS_RED_TAGGED];

/// Shift metadata captured above the trailer grid.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Metadata {
    pub date: String,
    pub time: String,
    pub truck: String,
    pub trip: String,
    pub location: String,
}

impl Metadata {
    /// `"<date> / <time>"` when both are set, whichever is set otherwise.
    #[must_use]
    pub fn date_time(&self) -> String {
        match (self.date.is_empty(), self.time.is_empty()) {
            (false, false) => format!("{} / {}", self.date, self.time),
            (false, true) => self.date.clone(),
            (true, false) => self.time.clone(),
            (true, true) => String::new(),
        }
    }

    fn trimmed(self) -> Self {
        Self {
            date: trim_owned(self.date),
            time: trim_owned(self.time),
            truck: trim_owned(self.truck),
            trip: trim_owned(self.trip),
            location: trim_owned(self.location),
        }
    }
}

/// One trailer line of the form.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Row {
    pub trailer: String,
    /// One of [`FUEL_LEVELS`]; other values pass through untouched.
    pub fuel: String,
    /// One of [`STATUS_OPTIONS`]; other values pass through untouched.
    pub status: String,
    /// Free text, only shown when `status` is [`STATUS_RED_TAGGED`].
    pub issues: String,
    /// Reefer temperature as typed.
    pub temp: String,
}

impl Row {
    /// True when every field is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trailer.is_empty()
            && self.fuel.is_empty()
            && self.status.is_empty()
            && self.issues.is_empty()
            && self.temp.is_empty()
    }

    fn trimmed(self) -> Self {
        Self {
            trailer: trim_owned(self.trailer),
            fuel: trim_owned(self.fuel),
            status: trim_owned(self.status),
            issues: trim_owned(self.issues),
            temp: trim_owned(self.temp),
        }
    }
}

/// Point-in-time capture of the whole form.
///
/// Always holds exactly [`ROW_COUNT`] rows with trimmed values, whether it
/// was built with [`FormSnapshot::new`] or deserialized.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "SnapshotInput")]
pub struct FormSnapshot {
    metadata: Metadata,
    rows: Vec<Row>,
}

/// Wire shape accepted from the UI before normalization.
#[derive(Deserialize, Default)]
#[serde(default)]
struct SnapshotInput {
    metadata: Metadata,
    rows: Vec<Row>,
}

impl From<SnapshotInput> for FormSnapshot {
    fn from(input: SnapshotInput) -> Self {
        Self::new(input.metadata, input.rows)
    }
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self::new(Metadata::default(), Vec::new())
    }
}

impl FormSnapshot {
    /// Build a snapshot, trimming every value and fitting the row list to
    /// [`ROW_COUNT`] (blank rows pad a short list, extra rows are dropped).
    #[must_use]
    pub fn new(metadata: Metadata, rows: Vec<Row>) -> Self {
        if rows.len() > ROW_COUNT {
            log::warn!(
                "snapshot has {} rows, keeping the first {ROW_COUNT}",
                rows.len()
            );
        }
        let mut rows: Vec<Row> = rows.into_iter().take(ROW_COUNT).map(Row::trimmed).collect();
        rows.resize_with(ROW_COUNT, Row::default);

        Self {
            metadata: metadata.trimmed(),
            rows,
        }
    }

    /// Decode a snapshot from its JSON form.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or has the wrong shape.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

fn trim_owned(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}
