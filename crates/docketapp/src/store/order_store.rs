//! # Order Store
//!
//! Placed orders live in the `orders` blob as an array, oldest first. The
//! seed order ([`OrderRecord::seed`]) is never stored: it is prepended on
//! every listing and cannot be deleted.
//!
//! Order numbers are unique across the listing, seed included. Numbers are
//! compared as strings; records written with a bare numeric `orderNumber`
//! match their decimal text.

use super::backend::{StorageBackend, ORDERS_KEY};
use super::{read_json, read_json_lenient, write_json};
use crate::error::{DocketError, Result};
use crate::model::{OrderRecord, SEED_ORDER_NUMBER};
use serde_json::Value;
use std::rc::Rc;

/// `orderNumber` of a raw stored entry, as text.
fn raw_order_number(entry: &Value) -> Option<String> {
    match entry.get("orderNumber")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub struct OrderStore<B: StorageBackend> {
    backend: Rc<B>,
}

impl<B: StorageBackend> OrderStore<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self { backend }
    }

    /// Stored orders that parse, in storage order. Unreadable storage reads
    /// as no orders.
    pub fn persisted(&self) -> Vec<OrderRecord> {
        let raw: Vec<Value> = read_json_lenient(self.backend.as_ref(), ORDERS_KEY);
        raw.into_iter()
            .enumerate()
            .filter_map(|(position, entry)| match serde_json::from_value(entry) {
                Ok(order) => Some(order),
                Err(e) => {
                    log::warn!("skipping stored order #{}: {}", position + 1, e);
                    None
                }
            })
            .collect()
    }

    /// The seed order followed by every stored order.
    pub fn list(&self) -> Vec<OrderRecord> {
        std::iter::once(OrderRecord::seed())
            .chain(self.persisted())
            .collect()
    }

    /// First order with the given number.
    pub fn find(&self, order_number: &str) -> Option<OrderRecord> {
        if order_number == SEED_ORDER_NUMBER {
            return Some(OrderRecord::seed());
        }
        self.persisted()
            .into_iter()
            .find(|order| order.order_number == order_number)
    }

    /// Append a new order. Fails with [`DocketError::DuplicateOrder`] when the
    /// number is already listed.
    pub fn save(&self, order: &OrderRecord) -> Result<()> {
        let backend = self.backend.as_ref();
        let mut stored: Vec<Value> = read_json(backend, ORDERS_KEY)?.unwrap_or_default();

        let taken = order.order_number == SEED_ORDER_NUMBER
            || stored.iter().any(|entry| {
                raw_order_number(entry).as_deref() == Some(order.order_number.as_str())
            });
        if taken {
            return Err(DocketError::DuplicateOrder(order.order_number.clone()));
        }

        stored.push(serde_json::to_value(order)?);
        write_json(backend, ORDERS_KEY, &stored)?;
        log::debug!("saved order '{}'", order.order_number);
        Ok(())
    }

    /// Remove every stored order with the given number. Returns how many
    /// were removed; the seed number always removes nothing.
    pub fn delete(&self, order_number: &str) -> Result<usize> {
        if order_number == SEED_ORDER_NUMBER {
            log::debug!("refusing to delete the seed order");
            return Ok(0);
        }

        let backend = self.backend.as_ref();
        let Some(mut stored) = read_json::<_, Vec<Value>>(backend, ORDERS_KEY)? else {
            return Ok(0);
        };
        let before = stored.len();
        stored.retain(|entry| raw_order_number(entry).as_deref() != Some(order_number));
        let removed = before - stored.len();

        if removed > 0 {
            write_json(backend, ORDERS_KEY, &stored)?;
        }
        Ok(removed)
    }
}
