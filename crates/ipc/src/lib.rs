//! IPC message protocol for the guest book
//!
//! Defines the pointer input events consumed by the signature canvas and the
//! submission messages exchanged between the public form and the server.

mod error;
mod input;
mod messages;
mod types;

pub use error::IpcError;
pub use input::*;
pub use messages::*;
pub use types::*;

/// Serialize a form message to JSON.
pub fn encode_form_message(msg: &FormToServer) -> Result<String, IpcError> {
    Ok(serde_json::to_string(msg)?)
}

/// Parse a form message from JSON.
pub fn decode_form_message(json: &str) -> Result<FormToServer, IpcError> {
    if json.trim().is_empty() {
        return Err(IpcError::EmptyMessage);
    }
    Ok(serde_json::from_str(json)?)
}

/// Serialize a server message to JSON.
pub fn encode_server_message(msg: &ServerToForm) -> Result<String, IpcError> {
    Ok(serde_json::to_string(msg)?)
}

/// Parse a server message from JSON.
pub fn decode_server_message(json: &str) -> Result<ServerToForm, IpcError> {
    if json.trim().is_empty() {
        return Err(IpcError::EmptyMessage);
    }
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_field_names() {
        let msg = FormToServer::SubmitGuest(GuestSubmission {
            full_name: "Ayu".to_string(),
            visit_date: "2026-10-14T09:00:00Z".to_string(),
            is_auto_date: true,
            signature_data: Some(format!("{PNG_DATA_URI_PREFIX}AAAA")),
            ..Default::default()
        });

        let json = encode_form_message(&msg).unwrap();
        assert!(json.contains(r#""type":"SubmitGuest""#));
        assert!(json.contains(r#""fullName":"Ayu""#));
        assert!(json.contains(r#""isAutoDate":true"#));
        assert!(json.contains(r#""signatureData":"data:image/png;base64,AAAA""#));

        let FormToServer::SubmitGuest(parsed) = decode_form_message(&json).unwrap();
        assert_eq!(parsed.full_name, "Ayu");
        assert!(parsed.photo.is_none());
    }

    #[test]
    fn test_empty_message_rejected() {
        assert!(matches!(
            decode_form_message("  "),
            Err(IpcError::EmptyMessage)
        ));
        assert!(matches!(
            decode_server_message("{not json"),
            Err(IpcError::Json(_))
        ));
    }

    #[test]
    fn test_server_error_message() {
        let msg = ServerToForm::Error {
            code: "missing_full_name".to_string(),
            message: "Full name is required".to_string(),
        };
        let json = encode_server_message(&msg).unwrap();
        match decode_server_message(&json).unwrap() {
            ServerToForm::Error { code, .. } => assert_eq!(code, "missing_full_name"),
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
