//! Intake errors and their status mapping

use guestbook_ipc::{IpcError, ServerToForm};
use guestbook_signature::EncodeError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Full name is required")]
    MissingFullName,

    #[error("Invalid visit date {value:?}: {reason}")]
    InvalidVisitDate { value: String, reason: String },

    #[error("Invalid signature: {0}")]
    Signature(#[from] EncodeError),

    #[error("Malformed request: {0}")]
    Malformed(#[from] IpcError),

    #[error("Blob storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("No free blob name for {0}")]
    BlobNameTaken(String),

    #[error("Unknown blob URL: {0}")]
    UnknownBlob(String),

    #[error("Guest not found: {0}")]
    NotFound(Uuid),
}

impl IntakeError {
    /// HTTP status a transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            IntakeError::MissingFullName
            | IntakeError::InvalidVisitDate { .. }
            | IntakeError::Signature(_)
            | IntakeError::Malformed(_) => 400,
            IntakeError::UnknownBlob(_) | IntakeError::NotFound(_) => 404,
            IntakeError::BlobNameTaken(_) => 409,
            IntakeError::Storage(_) => 500,
        }
    }

    /// Short machine-readable code for the form
    pub fn code(&self) -> &'static str {
        match self {
            IntakeError::MissingFullName => "missing_full_name",
            IntakeError::InvalidVisitDate { .. } => "invalid_visit_date",
            IntakeError::Signature(_) => "invalid_signature",
            IntakeError::Malformed(_) => "malformed_request",
            IntakeError::BlobNameTaken(_) => "name_taken",
            IntakeError::Storage(_) => "storage_failed",
            IntakeError::UnknownBlob(_) | IntakeError::NotFound(_) => "not_found",
        }
    }

    pub fn to_message(&self) -> ServerToForm {
        ServerToForm::Error {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}
