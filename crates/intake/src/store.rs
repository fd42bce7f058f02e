//! Guest record storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::IntakeError;

/// Validated guest fields ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewGuest {
    pub full_name: String,
    pub visit_date: DateTime<Utc>,
    pub is_auto_date: bool,
    pub institution: Option<String>,
    pub purpose: Option<String>,
    pub message: Option<String>,
    pub photo_url: Option<String>,
    pub signature_url: Option<String>,
}

/// A stored guest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub id: Uuid,
    pub full_name: String,
    pub visit_date: DateTime<Utc>,
    pub is_auto_date: bool,
    pub institution: Option<String>,
    pub purpose: Option<String>,
    pub message: Option<String>,
    pub photo_url: Option<String>,
    pub signature_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GuestRecord {
    fn from_new(guest: NewGuest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: guest.full_name,
            visit_date: guest.visit_date,
            is_auto_date: guest.is_auto_date,
            institution: guest.institution,
            purpose: guest.purpose,
            message: guest.message,
            photo_url: guest.photo_url,
            signature_url: guest.signature_url,
            created_at,
        }
    }

    pub fn has_signature(&self) -> bool {
        self.signature_url.is_some()
    }
}

/// Record store for guests
#[allow(async_fn_in_trait)]
pub trait GuestStore {
    async fn create(&self, guest: NewGuest) -> Result<GuestRecord, IntakeError>;

    /// All guests, newest first
    async fn list(&self) -> Result<Vec<GuestRecord>, IntakeError>;

    async fn get(&self, id: Uuid) -> Result<GuestRecord, IntakeError>;
}

/// In-process guest store in insertion order
#[derive(Debug, Default)]
pub struct MemoryGuestStore {
    records: RwLock<Vec<GuestRecord>>,
}

impl MemoryGuestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GuestStore for MemoryGuestStore {
    async fn create(&self, guest: NewGuest) -> Result<GuestRecord, IntakeError> {
        let record = GuestRecord::from_new(guest, Utc::now());
        debug!("Created guest {}", record.id);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<GuestRecord>, IntakeError> {
        let records = self.records.read().await;
        // Stable sort keeps later inserts first among equal timestamps
        let mut newest_first: Vec<GuestRecord> = records.iter().rev().cloned().collect();
        newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(newest_first)
    }

    async fn get(&self, id: Uuid) -> Result<GuestRecord, IntakeError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(IntakeError::NotFound(id))
    }
}
