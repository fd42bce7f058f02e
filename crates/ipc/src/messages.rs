//! Main IPC message enums for communication between the guest form and the server.

use serde::{Deserialize, Serialize};

use crate::types::{GuestReceipt, GuestSubmission};

/// Messages from the guest form to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum FormToServer {
    /// Submit a completed guest form
    SubmitGuest(GuestSubmission),
}

/// Messages from the server to the guest form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerToForm {
    /// Guest stored; `guest` echoes the assigned id and derived flags
    GuestSaved { message: String, guest: GuestReceipt },

    /// Error notification, shown to the visitor
    Error { code: String, message: String },
}
