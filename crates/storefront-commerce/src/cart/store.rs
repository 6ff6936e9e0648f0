//! The cart store.
//!
//! One explicitly constructed [`CartStore`] owns the cart lines for a
//! client. It merges additions by product/variant, derives totals from
//! the current lines, and hands the line set to its [`CartStorage`] after
//! every mutation.

use rust_decimal::Decimal;

use crate::cart::{CartLine, CartStorage, MemoryStorage, NewCartLine, OrderSummary, PersistedCart};
use crate::ids::LineId;
use crate::money::{Currency, Money};

/// Shopping cart state with persistence hooks.
#[derive(Debug)]
pub struct CartStore<S: CartStorage = MemoryStorage> {
    items: Vec<CartLine>,
    is_open: bool,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Create an empty store without reading storage.
    pub fn new(storage: S) -> Self {
        Self {
            items: Vec::new(),
            is_open: false,
            storage,
        }
    }

    /// Create a store seeded from the persisted record.
    ///
    /// A missing record means an empty cart. An unreadable record is
    /// logged and also yields an empty cart. Lines with a zero quantity
    /// are dropped, and lines for the same product and variant are merged
    /// into the first of them.
    pub fn open(storage: S) -> Self {
        let items = match storage.load() {
            Ok(Some(record)) => {
                let total = record.items.len();
                let items: Vec<CartLine> =
                    record.items.into_iter().filter(|l| l.quantity > 0).collect();
                if items.len() < total {
                    tracing::warn!(
                        dropped = total - items.len(),
                        "dropped persisted cart lines with zero quantity"
                    );
                }
                let kept = items.len();
                let items = merge_duplicates(items);
                if items.len() < kept {
                    tracing::warn!(
                        merged = kept - items.len(),
                        "merged persisted cart lines for the same product and variant"
                    );
                }
                items
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted cart, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(lines = items.len(), "cart store opened");
        Self {
            items,
            is_open: false,
            storage,
        }
    }

    /// Add a line, merging with an existing line for the same product and
    /// variant.
    ///
    /// When a matching line exists its quantity grows by the candidate's
    /// quantity and its snapshot fields are kept. Returns the id of the
    /// line that now holds the item.
    pub fn add_item(&mut self, candidate: NewCartLine) -> LineId {
        let quantity = candidate.effective_quantity();
        let variant_id = candidate.variant.as_ref().map(|v| &v.id);

        let id = if let Some(existing) = self
            .items
            .iter_mut()
            .find(|l| l.matches(&candidate.product_id, variant_id))
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            tracing::debug!(line_id = %existing.id, quantity = existing.quantity, "cart line merged");
            existing.id.clone()
        } else {
            let line = candidate.into_line();
            tracing::debug!(line_id = %line.id, quantity = line.quantity, "cart line added");
            let id = line.id.clone();
            self.items.push(line);
            id
        };

        self.persist();
        id
    }

    /// Remove a line. Unknown ids are a no-op. Returns whether a line was
    /// removed.
    pub fn remove_item(&mut self, id: &LineId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|l| &l.id != id);
        let removed = self.items.len() < len_before;
        if removed {
            tracing::debug!(line_id = %id, "cart line removed");
        }
        self.persist();
        removed
    }

    /// Set a line's quantity.
    ///
    /// Every line carrying the id is updated. A quantity of zero or less
    /// removes the line. Unknown ids are a no-op. Returns whether a line
    /// changed.
    pub fn update_quantity(&mut self, id: &LineId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut updated = false;
        for line in self.items.iter_mut().filter(|l| &l.id == id) {
            line.quantity = quantity;
            updated = true;
        }
        if updated {
            tracing::debug!(line_id = %id, quantity, "cart line quantity updated");
        }
        self.persist();
        updated
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        tracing::debug!("cart cleared");
        self.persist();
    }

    /// Sum of unit price times quantity over all lines. Saturates at
    /// [`Decimal::MAX`] instead of overflowing.
    pub fn total_price(&self) -> Decimal {
        CartLine::sum_totals(&self.items)
    }

    /// Sum of quantities over all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Total price in display currency.
    pub fn total_money(&self, currency: Currency) -> Money {
        Money::from_decimal(self.total_price(), currency)
    }

    /// Summarize the cart, then clear it.
    pub fn complete_checkout(&mut self, currency: Currency) -> OrderSummary {
        let summary = self.summary(currency);
        tracing::info!(
            lines = summary.lines.len(),
            items = summary.item_count,
            total = %summary.total,
            "checkout completed"
        );
        self.clear_cart();
        summary
    }

    /// Summarize the cart without changing it.
    pub fn summary(&self, currency: Currency) -> OrderSummary {
        OrderSummary::from_lines(&self.items, currency)
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn get_item(&self, id: &LineId) -> Option<&CartLine> {
        self.items.iter().find(|l| &l.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart drawer is open. Never persisted.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_open(&mut self, is_open: bool) {
        self.is_open = is_open;
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Snapshot of the persisted part of the state.
    pub fn to_persisted(&self) -> PersistedCart {
        PersistedCart {
            items: self.items.clone(),
        }
    }

    // Saving is fire-and-forget: the in-memory state stays authoritative.
    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.to_persisted()) {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }
}

// Keeps the first line of each product/variant combination, summing
// quantities into it.
fn merge_duplicates(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged
            .iter_mut()
            .find(|l| l.matches(&line.product_id, line.variant_id()))
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => merged.push(line),
        }
    }
    merged
}

impl Default for CartStore<MemoryStorage> {
    fn default() -> Self {
        Self::new(MemoryStorage::new())
    }
}
