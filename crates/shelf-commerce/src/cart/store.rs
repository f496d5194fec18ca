//! The process-wide cart store.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use shelf_observability::StructuredLogger;

use crate::cart::CartEntry;
use crate::catalog::Product;
use crate::ids::ProductId;

/// Result of adding an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The entry was inserted.
    Added,
    /// An entry with this id was already present; nothing changed.
    AlreadyInCart,
    /// The entry had no usable id; nothing changed.
    Invalid,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

/// Set of cart entries keyed by product id.
///
/// One store is created per process and a clone of the handle is given
/// to every surface; all clones see the same set. There is no removal.
#[derive(Debug, Clone)]
pub struct CartStore {
    entries: Arc<RwLock<HashMap<ProductId, CartEntry>>>,
    logger: StructuredLogger,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(StructuredLogger::detached().with_surface("cart"))
    }
}

impl CartStore {
    /// Create an empty store that logs through `logger`.
    pub fn new(logger: StructuredLogger) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            logger,
        }
    }

    /// Whether an entry with this id was added.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Insert an entry unless its id is already present.
    ///
    /// The check and the insert happen under one write lock.
    pub fn add(&self, entry: CartEntry) -> AddOutcome {
        if entry.id.is_blank() {
            self.logger
                .warn_builder("cart entry rejected")
                .field("reason", "missing id")
                .emit();
            return AddOutcome::Invalid;
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(&entry.id) {
            drop(entries);
            self.logger
                .debug_builder("already in cart")
                .field("product_id", entry.id.to_string())
                .emit();
            return AddOutcome::AlreadyInCart;
        }

        let id = entry.id.clone();
        entries.insert(id.clone(), entry);
        let size = entries.len();
        drop(entries);

        self.logger
            .info_builder("added to cart")
            .field("product_id", id.to_string())
            .field_i64("cart_size", size as i64)
            .emit();
        AddOutcome::Added
    }

    /// Snapshot a product and add it.
    pub fn add_product(&self, product: &Product) -> AddOutcome {
        self.add(CartEntry::from_product(product))
    }

    /// Add every product not yet in the cart; returns how many were added.
    pub fn add_all<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> usize {
        products
            .into_iter()
            .filter(|product| self.add_product(product).is_added())
            .count()
    }

    /// True iff `products` is non-empty and every one is in the cart.
    pub fn contains_all(&self, products: &[Product]) -> bool {
        !products.is_empty() && products.iter().all(|p| self.contains(&p.id))
    }

    /// Entry for an id.
    pub fn get(&self, id: &ProductId) -> Option<CartEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// All entries, sorted by id.
    pub fn entries(&self) -> Vec<CartEntry> {
        let mut entries: Vec<CartEntry> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
