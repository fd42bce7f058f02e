//! Guest submission pipeline
//!
//! Validates the form, pushes the optional photo and signature to blob
//! storage and records the guest. Upload failures never fail a
//! submission; the guest is stored without that file.

use chrono::{DateTime, NaiveDateTime, Utc};
use guestbook_config::IntakeConfig;
use guestbook_ipc::{
    FormToServer, GuestReceipt, GuestSubmission, IpcError, PhotoUpload, ServerToForm,
    decode_form_message, encode_server_message,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::blob::{BlobStore, FsBlobStore};
use crate::decode::decode_signature;
use crate::store::{GuestRecord, GuestStore, MemoryGuestStore, NewGuest};
use crate::IntakeError;

/// Acknowledgement shown to the visitor after a successful submission
pub const GUEST_SAVED_MESSAGE: &str = "Guest saved";

/// Content type assumed for photos the client did not label
const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";

pub struct GuestIntake<B: BlobStore, S: GuestStore> {
    blobs: B,
    guests: S,
}

impl GuestIntake<FsBlobStore, MemoryGuestStore> {
    /// Filesystem blobs with an in-process record store
    pub fn from_config(config: &IntakeConfig) -> Self {
        Self::new(FsBlobStore::new(config), MemoryGuestStore::new())
    }

    /// Filesystem blobs configured from GUESTBOOK_BLOB_DIR and GUESTBOOK_BLOB_BASE_URL
    pub fn from_env() -> Self {
        Self::from_config(&IntakeConfig::from_env())
    }
}

impl<B: BlobStore, S: GuestStore> GuestIntake<B, S> {
    pub fn new(blobs: B, guests: S) -> Self {
        Self { blobs, guests }
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn guests(&self) -> &S {
        &self.guests
    }

    /// Store a guest submission
    pub async fn submit(&self, submission: GuestSubmission) -> Result<GuestReceipt, IntakeError> {
        let full_name = submission.full_name.trim();
        if full_name.is_empty() {
            return Err(IntakeError::MissingFullName);
        }
        let visit_date = parse_visit_date(&submission.visit_date)?;

        let timestamp = Utc::now().timestamp_millis();
        let photo_url = match &submission.photo {
            Some(photo) => self.upload_photo(photo, timestamp).await,
            None => None,
        };
        let signature_url = match submission.signature_data.as_deref().map(str::trim) {
            Some(data) if !data.is_empty() => self.upload_signature(data, timestamp).await,
            _ => None,
        };

        let record = self
            .guests
            .create(NewGuest {
                full_name: full_name.to_string(),
                visit_date,
                is_auto_date: submission.is_auto_date,
                institution: non_empty(submission.institution),
                purpose: non_empty(submission.purpose),
                message: non_empty(submission.message),
                photo_url,
                signature_url,
            })
            .await?;

        info!(
            "Guest {} recorded (photo: {}, signature: {})",
            record.id,
            record.photo_url.is_some(),
            record.has_signature()
        );
        Ok(GuestReceipt {
            id: record.id,
            full_name: record.full_name.clone(),
            visit_date: record.visit_date,
            has_signature: record.has_signature(),
        })
    }

    /// All guests, newest first
    pub async fn list(&self) -> Result<Vec<GuestRecord>, IntakeError> {
        self.guests.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<GuestRecord, IntakeError> {
        self.guests.get(id).await
    }

    /// Answer a JSON form message with a JSON server message
    pub async fn handle_message(&self, json: &str) -> Result<String, IpcError> {
        let reply = match decode_form_message(json) {
            Ok(FormToServer::SubmitGuest(submission)) => match self.submit(submission).await {
                Ok(guest) => ServerToForm::GuestSaved {
                    message: GUEST_SAVED_MESSAGE.to_string(),
                    guest,
                },
                Err(e) => {
                    warn!("Guest submission rejected: {e}");
                    e.to_message()
                }
            },
            Err(e) => IntakeError::Malformed(e).to_message(),
        };
        encode_server_message(&reply)
    }

    async fn upload_photo(&self, photo: &PhotoUpload, timestamp: i64) -> Option<String> {
        let filename = format!("guest_{}_{}", timestamp, photo.file_name);
        let content_type = if photo.content_type.trim().is_empty() {
            DEFAULT_PHOTO_CONTENT_TYPE
        } else {
            photo.content_type.as_str()
        };
        match self.blobs.put(&photo.bytes, &filename, content_type).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Photo upload failed, continuing without photo: {e}");
                None
            }
        }
    }

    async fn upload_signature(&self, data_uri: &str, timestamp: i64) -> Option<String> {
        let png = match decode_signature(data_uri) {
            Ok(png) => png,
            Err(e) => {
                warn!("Signature rejected, continuing without signature: {e}");
                return None;
            }
        };
        let filename = format!("signature_{timestamp}.png");
        match self.blobs.put(&png, &filename, "image/png").await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Signature upload failed, continuing without signature: {e}");
                None
            }
        }
    }
}

/// `datetime-local` layouts, without and with seconds
const LOCAL_DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse RFC 3339, or offset-less `datetime-local` text read as UTC
fn parse_visit_date(value: &str) -> Result<DateTime<Utc>, IntakeError> {
    let trimmed = value.trim();
    let rfc3339_err = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(date) => return Ok(date.with_timezone(&Utc)),
        Err(e) => e,
    };
    LOCAL_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| IntakeError::InvalidVisitDate {
            value: value.to_string(),
            reason: rfc3339_err.to_string(),
        })
}

fn non_empty(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use guestbook_config::SignatureConfig;
    use guestbook_ipc::{Point, encode_form_message};
    use guestbook_signature::{SignatureCanvas, decode_png};

    use super::*;
    use crate::blob::MemoryBlobStore;

    const VISIT: &str = "2026-10-14T09:30:00+07:00";

    type MemoryIntake = GuestIntake<MemoryBlobStore, MemoryGuestStore>;

    fn intake() -> MemoryIntake {
        GuestIntake::new(MemoryBlobStore::new(), MemoryGuestStore::new())
    }

    fn submission(name: &str) -> GuestSubmission {
        GuestSubmission {
            full_name: name.to_string(),
            visit_date: VISIT.to_string(),
            ..Default::default()
        }
    }

    fn signed_canvas() -> SignatureCanvas {
        let mut canvas = SignatureCanvas::new(SignatureConfig::default()).unwrap();
        canvas.pointer_down(Point::new(20.0, 20.0));
        canvas.pointer_move(Point::new(200.0, 200.0));
        canvas.pointer_move(Point::new(400.0, 60.0));
        canvas.pointer_up();
        canvas
    }

    struct FailingBlobStore;

    impl BlobStore for FailingBlobStore {
        async fn put(&self, _: &[u8], _: &str, _: &str) -> Result<String, IntakeError> {
            Err(IntakeError::Storage(std::io::Error::other("bucket unavailable")))
        }

        async fn delete(&self, url: &str) -> Result<(), IntakeError> {
            Err(IntakeError::UnknownBlob(url.to_string()))
        }
    }

    #[tokio::test]
    async fn test_missing_full_name() {
        let intake = intake();
        for name in ["", "   \t"] {
            let err = intake.submit(submission(name)).await.unwrap_err();
            assert!(matches!(err, IntakeError::MissingFullName));
            assert_eq!(err.status_code(), 400);
        }
        assert!(intake.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_visit_date() {
        let intake = intake();
        let mut form = submission("Ada");
        form.visit_date = "yesterday".to_string();

        let err = intake.submit(form).await.unwrap_err();
        assert!(matches!(err, IntakeError::InvalidVisitDate { .. }));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_datetime_local_visit_date() {
        let intake = intake();
        for (value, expected) in [
            ("2026-10-14T09:30", "2026-10-14T09:30:00+00:00"),
            ("2026-10-14T09:30:15", "2026-10-14T09:30:15+00:00"),
        ] {
            let mut form = submission("Ada");
            form.visit_date = value.to_string();

            let receipt = intake.submit(form).await.unwrap();
            assert_eq!(receipt.visit_date.to_rfc3339(), expected);
        }
        assert_eq!(intake.list().await.unwrap().len(), 2);
    }

    #[test]
    fn test_parse_visit_date_rejects_partial() {
        for value in ["2026-10-14", "2026-10-14T9", "14/10/2026 09:30", ""] {
            assert!(
                matches!(parse_visit_date(value), Err(IntakeError::InvalidVisitDate { .. })),
                "accepted {value:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_fields_trimmed() {
        let intake = intake();
        let mut form = submission("  Ada Lovelace  ");
        form.is_auto_date = true;
        form.institution = Some("  Analytical Society ".to_string());
        form.purpose = Some("   ".to_string());
        form.message = None;

        let receipt = intake.submit(form).await.unwrap();
        assert_eq!(receipt.full_name, "Ada Lovelace");
        assert!(!receipt.has_signature);
        assert_eq!(receipt.visit_date.to_rfc3339(), "2026-10-14T02:30:00+00:00");

        let record = intake.get(receipt.id).await.unwrap();
        assert_eq!(record.institution.as_deref(), Some("Analytical Society"));
        assert_eq!(record.purpose, None);
        assert!(record.is_auto_date);
        assert!(intake.blobs().is_empty().await);
    }

    #[tokio::test]
    async fn test_photo_and_signature_stored() {
        let intake = intake();
        let capture = signed_canvas().save().unwrap();
        let mut form = submission("Ada");
        form.photo = Some(PhotoUpload {
            file_name: "me.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8, 0xff],
        });
        form.signature_data = Some(capture.data_uri.clone());

        let receipt = intake.submit(form).await.unwrap();
        assert!(receipt.has_signature);

        let record = intake.get(receipt.id).await.unwrap();
        let photo_url = record.photo_url.unwrap();
        assert!(photo_url.starts_with("memory://blobs/guest_"));
        assert!(photo_url.ends_with("_me.jpg"));
        let photo = intake.blobs().get(&photo_url).await.unwrap();
        assert_eq!(photo.content_type, "image/jpeg");

        let signature_url = record.signature_url.unwrap();
        assert!(signature_url.starts_with("memory://blobs/signature_"));
        assert!(signature_url.ends_with(".png"));
        let signature = intake.blobs().get(&signature_url).await.unwrap();
        assert_eq!(signature.content_type, "image/png");
        assert_eq!(signature.bytes, decode_signature(&capture.data_uri).unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_guests_keep_their_own_signatures() {
        let intake = intake();
        let capture = signed_canvas().save().unwrap();
        let mut other = SignatureCanvas::new(SignatureConfig::default()).unwrap();
        other.pointer_down(Point::new(900.0, 700.0));
        other.pointer_move(Point::new(1500.0, 100.0));
        other.pointer_up();
        let other_capture = other.save().unwrap();

        let mut first = submission("Ada");
        first.signature_data = Some(capture.data_uri.clone());
        let mut second = submission("Grace");
        second.signature_data = Some(other_capture.data_uri.clone());
        let (a, b) = tokio::join!(intake.submit(first), intake.submit(second));

        let url_a = intake.get(a.unwrap().id).await.unwrap().signature_url.unwrap();
        let url_b = intake.get(b.unwrap().id).await.unwrap().signature_url.unwrap();
        assert_ne!(url_a, url_b);
        assert_eq!(
            intake.blobs().get(&url_a).await.unwrap().bytes,
            decode_signature(&capture.data_uri).unwrap()
        );
        assert_eq!(
            intake.blobs().get(&url_b).await.unwrap().bytes,
            decode_signature(&other_capture.data_uri).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unlabelled_photo_defaults_to_jpeg() {
        let intake = intake();
        let mut form = submission("Ada");
        form.photo = Some(PhotoUpload {
            file_name: "camera".to_string(),
            content_type: String::new(),
            bytes: vec![1, 2, 3],
        });

        let receipt = intake.submit(form).await.unwrap();
        let url = intake.get(receipt.id).await.unwrap().photo_url.unwrap();
        assert_eq!(intake.blobs().get(&url).await.unwrap().content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_invalid_signature_is_dropped() {
        let intake = intake();
        let mut form = submission("Ada");
        form.signature_data = Some("data:image/png;base64,bm90IGEgcG5n".to_string());

        let receipt = intake.submit(form).await.unwrap();
        assert!(!receipt.has_signature);
        assert!(intake.blobs().is_empty().await);
    }

    #[tokio::test]
    async fn test_upload_failure_still_records_guest() {
        let intake = GuestIntake::new(FailingBlobStore, MemoryGuestStore::new());
        let mut form = submission("Ada");
        form.photo = Some(PhotoUpload {
            file_name: "me.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![1],
        });
        form.signature_data = signed_canvas().save().map(|c| c.data_uri);

        let receipt = intake.submit(form).await.unwrap();
        assert!(!receipt.has_signature);

        let record = intake.get(receipt.id).await.unwrap();
        assert_eq!(record.photo_url, None);
        assert_eq!(record.signature_url, None);
    }

    #[test]
    fn test_from_env_uses_env_blob_dir() {
        let intake = GuestIntake::from_env();
        assert_eq!(
            intake.blobs().dir(),
            IntakeConfig::from_env().blob_dir.as_path()
        );
    }

    #[tokio::test]
    async fn test_signature_pixels_survive_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let intake = GuestIntake::from_config(&IntakeConfig {
            blob_dir: dir.path().to_path_buf(),
            blob_base_url: "/uploads".to_string(),
        });

        let canvas = signed_canvas();
        let mut form = submission("Ada");
        form.signature_data = canvas.save().map(|c| c.data_uri);

        let receipt = intake.submit(form).await.unwrap();
        let url = intake.get(receipt.id).await.unwrap().signature_url.unwrap();
        let name = url.strip_prefix("/uploads/").unwrap();

        let stored = tokio::fs::read(dir.path().join(name)).await.unwrap();
        let decoded = decode_png(&stored).unwrap();
        let surface = canvas.renderer().unwrap().surface();
        assert_eq!((decoded.width, decoded.height), (surface.width, surface.height));
        assert_eq!(decoded.rgba.as_slice(), surface.as_bytes());
    }

    #[tokio::test]
    async fn test_handle_message() {
        let intake = intake();

        let request = encode_form_message(&FormToServer::SubmitGuest(submission("Ada"))).unwrap();
        let reply = intake.handle_message(&request).await.unwrap();
        match guestbook_ipc::decode_server_message(&reply).unwrap() {
            ServerToForm::GuestSaved { message, guest } => {
                assert_eq!(message, GUEST_SAVED_MESSAGE);
                assert_eq!(guest.full_name, "Ada");
            }
            other => panic!("unexpected reply: {other:?}"),
        }

        let request = encode_form_message(&FormToServer::SubmitGuest(submission(" "))).unwrap();
        let reply = intake.handle_message(&request).await.unwrap();
        assert!(matches!(
            guestbook_ipc::decode_server_message(&reply).unwrap(),
            ServerToForm::Error { code, .. } if code == "missing_full_name"
        ));

        let reply = intake.handle_message("{not json").await.unwrap();
        assert!(matches!(
            guestbook_ipc::decode_server_message(&reply).unwrap(),
            ServerToForm::Error { code, .. } if code == "malformed_request"
        ));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let intake = intake();
        intake.submit(submission("first")).await.unwrap();
        intake.submit(submission("second")).await.unwrap();

        let names: Vec<String> = intake
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.full_name)
            .collect();
        assert_eq!(names, ["second", "first"]);
    }
}
