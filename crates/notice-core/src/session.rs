//! Session — the application state behind one editing session.
//!
//! Owns the current record and the last status message. The notice is never
//! cached: [`Session::notice`] regenerates it from the record on every call,
//! so a sink always reads what the record says right now.

use crate::error::RecordError;
use crate::generator;
use crate::model::ProjectRecord;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{info, warn};

/// Suffix of exported notice files.
pub const EXPORT_SUFFIX: &str = "notice_incendie_accessibilite.txt";

static RE_FILE_NAME_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/\\]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Outcome of the last delivery, shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, message: message.into() }
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = match self.kind {
            StatusKind::Success => "Succès",
            StatusKind::Error => "Attention",
        };
        write!(f, "{} : {}", heading, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Session {
    record: ProjectRecord,
    status: Option<Status>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ProjectRecord) -> Self {
        Self { record, status: None }
    }

    pub fn record(&self) -> &ProjectRecord {
        &self.record
    }

    pub fn into_record(self) -> ProjectRecord {
        self.record
    }

    /// The notice for the record as it stands now.
    pub fn notice(&self) -> String {
        generator::generate(&self.record)
    }

    pub fn set_text(&mut self, path: &str, value: impl Into<String>) -> Result<(), RecordError> {
        self.record.set_text(path, value)
    }

    pub fn toggle(&mut self, path: &str, code: &str) -> Result<bool, RecordError> {
        self.record.toggle(path, code)
    }

    pub fn select(&mut self, path: &str, code: &str) -> Result<bool, RecordError> {
        self.record.select(path, code)
    }

    pub fn deselect(&mut self, path: &str, code: &str) -> Result<bool, RecordError> {
        self.record.deselect(path, code)
    }

    /// Back to the empty record; clears the status.
    pub fn reset(&mut self) {
        self.record = ProjectRecord::default();
        self.status = None;
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn dismiss_status(&mut self) {
        self.status = None;
    }

    /// Record the outcome of a delivery as the current status.
    ///
    /// Failures are logged and kept as a dismissible error status; the
    /// session stays fully editable either way.
    pub fn report<E: fmt::Display>(
        &mut self,
        outcome: Result<(), E>,
        success: &str,
        failure: &str,
    ) -> &Status {
        let status = match outcome {
            Ok(()) => {
                info!("{}", success);
                Status::success(success)
            }
            Err(err) => {
                warn!(error = %err, "{}", failure);
                Status::error(failure)
            }
        };
        self.status.insert(status)
    }

    /// File name for a downloaded notice, derived from the project name.
    ///
    /// `"Centre Culturel"` → `centre_culturel_notice_incendie_accessibilite.txt`
    pub fn export_file_name(&self) -> String {
        let name = self.record.general.project_name.trim();
        if name.is_empty() {
            return EXPORT_SUFFIX.to_string();
        }
        let stem = RE_FILE_NAME_SEPARATORS.replace_all(name, "_").to_lowercase();
        format!("{}_{}", stem, EXPORT_SUFFIX)
    }
}
