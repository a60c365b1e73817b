//! Request-level availability: validate, fetch, normalize, compute.
//!
//! [`AvailabilityService`] is the thin wrapper a request handler calls. It
//! reads the vendor document and the day's bookings from a [`VendorStore`],
//! resolves schedule synonyms and broken booking records, converts the
//! caller's clock into the vendor's timezone, and hands canonical values to
//! [`compute_availability`].

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::booking::normalize_bookings;
use crate::config::ServiceConfig;
use crate::error::{Result, SlotError};
use crate::schedule::WeeklySchedule;
use crate::slots::{self, compute_availability, CandidateSlot};
use crate::store::VendorStore;
use crate::time::parse_date;

/// Keys under which a vendor document may carry its weekly hours.
const SCHEDULE_KEYS: [&str; 4] = ["schedule", "operatingHours", "workingHours", "businessHours"];

/// An availability query as received from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub vendor_id: String,
    /// Calendar date, `"YYYY-MM-DD"`.
    pub date: String,
    #[serde(default)]
    pub service_duration_minutes: Option<u32>,
}

impl AvailabilityRequest {
    pub fn new(vendor_id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            date: date.into(),
            service_duration_minutes: None,
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.service_duration_minutes = Some(minutes);
        self
    }
}

/// Computes availability for vendors held in a [`VendorStore`].
#[derive(Debug, Clone)]
pub struct AvailabilityService<S> {
    store: S,
    config: ServiceConfig,
}

impl<S: VendorStore> AvailabilityService<S> {
    pub fn new(store: S, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// The full slot grid for the requested vendor-day.
    ///
    /// # Errors
    /// - `InvalidArgument`: blank vendor id, malformed date, zero duration.
    /// - `NotFound`: no vendor document, or the document has no schedule.
    /// - `InvalidSchedule`: the stored schedule or timezone is malformed.
    /// - `Store`: the store itself failed.
    pub fn availability(
        &self,
        request: &AvailabilityRequest,
        now: DateTime<Utc>,
    ) -> Result<Vec<CandidateSlot>> {
        let vendor_id = request.vendor_id.trim();
        if vendor_id.is_empty() {
            return Err(SlotError::InvalidArgument("vendorId is required".to_string()));
        }
        let date = parse_date(&request.date)?;
        let duration = request
            .service_duration_minutes
            .unwrap_or(self.config.default_duration_minutes);

        let vendor = self
            .store
            .vendor_document(vendor_id)?
            .ok_or_else(|| SlotError::NotFound(format!("vendor '{}'", vendor_id)))?;
        let schedule_doc = schedule_document(&vendor)
            .ok_or_else(|| SlotError::NotFound(format!("schedule for vendor '{}'", vendor_id)))?;
        let schedule = WeeklySchedule::from_document(schedule_doc)?;
        let tz = self.vendor_timezone(&vendor)?;

        let booking_docs = self.store.booking_documents(vendor_id, date)?;
        let bookings = normalize_bookings(&booking_docs);

        tracing::debug!(
            vendor_id,
            %date,
            duration,
            records = booking_docs.len(),
            blocking = bookings.len(),
            "computing availability"
        );

        compute_availability(&schedule, &bookings, date, duration, local_now(now, tz))
    }

    /// The earliest available slot for the requested vendor-day, if any.
    pub fn first_available(
        &self,
        request: &AvailabilityRequest,
        now: DateTime<Utc>,
    ) -> Result<Option<CandidateSlot>> {
        let slots = self.availability(request, now)?;
        Ok(slots::first_available(&slots).cloned())
    }

    fn vendor_timezone(&self, vendor: &Value) -> Result<Tz> {
        let name = vendor
            .get("timezone")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(self.config.default_timezone.as_str());
        name.trim()
            .parse()
            .map_err(|_| SlotError::InvalidSchedule(format!("invalid timezone '{}'", name)))
    }
}

fn schedule_document(vendor: &Value) -> Option<&Value> {
    SCHEDULE_KEYS
        .iter()
        .filter_map(|key| vendor.get(*key))
        .find(|v| !v.is_null())
}

/// The vendor's wall-clock reading of `now`.
fn local_now(now: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    now.with_timezone(&tz).naive_local()
}
