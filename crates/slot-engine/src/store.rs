//! The document-store seam: where vendor and booking records come from.
//!
//! Records are returned as raw JSON documents; normalization happens in
//! [`crate::schedule`] and [`crate::booking`], not in the store.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::Result;

/// Read access to vendor and booking documents.
///
/// Implementations should return only the requested vendor's bookings for
/// the requested date. Status filtering is done by the caller, so returning
/// cancelled or declined records is harmless.
pub trait VendorStore {
    /// The vendor document, or `None` if no such vendor exists.
    fn vendor_document(&self, vendor_id: &str) -> Result<Option<Value>>;

    /// All booking documents for `vendor_id` on `date`.
    fn booking_documents(&self, vendor_id: &str, date: NaiveDate) -> Result<Vec<Value>>;
}

impl<S: VendorStore + ?Sized> VendorStore for &S {
    fn vendor_document(&self, vendor_id: &str) -> Result<Option<Value>> {
        (**self).vendor_document(vendor_id)
    }

    fn booking_documents(&self, vendor_id: &str, date: NaiveDate) -> Result<Vec<Value>> {
        (**self).booking_documents(vendor_id, date)
    }
}

/// A `HashMap`-backed store for tests, the CLI, and the WASM bindings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    vendors: HashMap<String, Value>,
    bookings: HashMap<(String, NaiveDate), Vec<Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_vendor(&mut self, vendor_id: impl Into<String>, doc: Value) {
        self.vendors.insert(vendor_id.into(), doc);
    }

    /// Append booking documents for a vendor-day.
    pub fn insert_bookings(
        &mut self,
        vendor_id: impl Into<String>,
        date: NaiveDate,
        docs: impl IntoIterator<Item = Value>,
    ) {
        self.bookings
            .entry((vendor_id.into(), date))
            .or_default()
            .extend(docs);
    }
}

impl VendorStore for InMemoryStore {
    fn vendor_document(&self, vendor_id: &str) -> Result<Option<Value>> {
        Ok(self.vendors.get(vendor_id).cloned())
    }

    fn booking_documents(&self, vendor_id: &str, date: NaiveDate) -> Result<Vec<Value>> {
        Ok(self
            .bookings
            .get(&(vendor_id.to_string(), date))
            .cloned()
            .unwrap_or_default())
    }
}
