//! # slot-engine
//!
//! Appointment availability for salon vendors.
//!
//! Given a vendor's weekly operating hours and the bookings already on a
//! day, the engine lays a 30-minute grid of candidate start times over the
//! open hours and flags each one available or not for a requested service
//! duration. The computation is pure: the caller injects the current time,
//! and all store access goes through the [`store::VendorStore`] seam.
//!
//! ## Modules
//!
//! - [`slots`] — The slot grid calculator (`compute_availability`)
//! - [`schedule`] — Weekly hours and schedule-document normalization
//! - [`booking`] — Existing bookings, status filtering, record repair
//! - [`conflict`] — Half-open overlap between slots and bookings
//! - [`service`] — Request validation + fetch + compute (`AvailabilityService`)
//! - [`store`] — Document-store trait and an in-memory implementation
//! - [`config`] — Service defaults, loadable from the environment
//! - [`time`] — `"HH:MM"` / `"YYYY-MM-DD"` parsing and display formatting
//! - [`error`] — Error types

pub mod booking;
pub mod config;
pub mod conflict;
pub mod error;
pub mod schedule;
pub mod service;
pub mod slots;
pub mod store;
pub mod time;

pub use booking::{normalize_bookings, BookingRecord, BookingStatus, ExistingBooking};
pub use config::ServiceConfig;
pub use error::{ErrorKind, SlotError};
pub use schedule::{DaySchedule, WeeklySchedule};
pub use service::{AvailabilityRequest, AvailabilityService};
pub use slots::{compute_availability, first_available, CandidateSlot, SLOT_INTERVAL_MINUTES};
pub use store::{InMemoryStore, VendorStore};
