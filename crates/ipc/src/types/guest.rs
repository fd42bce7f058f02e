//! Guest submission and receipt types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix every signature data URI carries.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A photo attached to a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUpload {
    /// Original file name from the client
    pub file_name: String,
    /// MIME type reported by the client (e.g. `image/jpeg`)
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Form payload posted by the public guest form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSubmission {
    /// Required, must be non-empty after trimming
    pub full_name: String,
    /// Visit time: RFC 3339, or `datetime-local` text (`2026-10-14T09:30`) taken as UTC
    pub visit_date: String,
    /// Whether the visit date was filled in automatically
    pub is_auto_date: bool,
    pub institution: Option<String>,
    pub purpose: Option<String>,
    pub message: Option<String>,
    pub photo: Option<PhotoUpload>,
    /// Signature capture result as a PNG data URI
    pub signature_data: Option<String>,
}

/// Echo of a stored guest returned to the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestReceipt {
    pub id: Uuid,
    pub full_name: String,
    pub visit_date: DateTime<Utc>,
    pub has_signature: bool,
}
