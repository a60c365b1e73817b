//! WASM bindings for slot-engine.
//!
//! Exposes availability computation to the booking web application via
//! `wasm-bindgen`. Documents cross the boundary as JSON strings: the vendor
//! document exactly as stored, and the day's booking records as an array.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use slot_engine::{
    AvailabilityRequest, AvailabilityService, InMemoryStore, ServiceConfig, SlotError,
};
use wasm_bindgen::prelude::*;

/// Store key for the single vendor document passed in.
const VENDOR_KEY: &str = "vendor";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with offset) and naive datetimes, which are taken as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn to_js(err: SlotError) -> JsValue {
    JsValue::from_str(&err.public_message())
}

/// Build a one-vendor service from JSON documents.
fn service_for(
    vendor_json: &str,
    bookings_json: &str,
    date: &str,
) -> Result<AvailabilityService<InMemoryStore>, String> {
    let vendor: Value =
        serde_json::from_str(vendor_json).map_err(|e| format!("Invalid vendor JSON: {}", e))?;
    let bookings: Vec<Value> = if bookings_json.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(bookings_json)
            .map_err(|e| format!("Invalid bookings JSON: {}", e))?
    };

    let mut store = InMemoryStore::new();
    store.insert_vendor(VENDOR_KEY, vendor);
    // A malformed date is reported by the service itself.
    if let Ok(day) = slot_engine::time::parse_date(date) {
        store.insert_bookings(VENDOR_KEY, day, bookings);
    }
    Ok(AvailabilityService::new(store, ServiceConfig::default()))
}

fn slots_json(
    vendor_json: &str,
    bookings_json: &str,
    date: &str,
    duration_minutes: Option<u32>,
    now: &str,
    first_only: bool,
) -> Result<String, JsValue> {
    let service = service_for(vendor_json, bookings_json, date).map_err(|e| JsValue::from_str(&e))?;
    let now = parse_datetime(now).map_err(|e| JsValue::from_str(&e))?;

    let mut request = AvailabilityRequest::new(VENDOR_KEY, date);
    request.service_duration_minutes = duration_minutes;

    let json = if first_only {
        let slot = service.first_available(&request, now).map_err(to_js)?;
        serde_json::to_string(&slot)
    } else {
        let slots = service.availability(&request, now).map_err(to_js)?;
        serde_json::to_string(&slots)
    };
    json.map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the slot grid for one vendor-day.
///
/// Returns a JSON array of `{time, display, available}` objects.
///
/// # Arguments
/// - `vendor_json` -- The vendor document (`schedule`, optional `timezone`)
/// - `bookings_json` -- JSON array of the day's booking records (may be empty)
/// - `date` -- Calendar date, `"YYYY-MM-DD"`
/// - `duration_minutes` -- Service duration; defaults to 30
/// - `now` -- Current time, ISO 8601
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    vendor_json: &str,
    bookings_json: &str,
    date: &str,
    duration_minutes: Option<u32>,
    now: &str,
) -> Result<String, JsValue> {
    slots_json(vendor_json, bookings_json, date, duration_minutes, now, false)
}

/// Find the earliest available slot for one vendor-day.
///
/// Same arguments as [`compute_availability`]. Returns a JSON
/// `{time, display, available}` object, or `"null"` if nothing is free.
#[wasm_bindgen(js_name = "firstAvailable")]
pub fn first_available(
    vendor_json: &str,
    bookings_json: &str,
    date: &str,
    duration_minutes: Option<u32>,
    now: &str,
) -> Result<String, JsValue> {
    slots_json(vendor_json, bookings_json, date, duration_minutes, now, true)
}

/// Format an `"HH:MM"` time for display, e.g. `"14:30"` → `"2:30 PM"`.
#[wasm_bindgen(js_name = "displayTime")]
pub fn display_time(time: &str) -> Result<String, JsValue> {
    slot_engine::time::parse_clock(time)
        .map(slot_engine::time::display_time)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
