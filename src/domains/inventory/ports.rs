use super::product::{InventoryItem, NewProduct, ProductId, RackSlot};
use crate::common::DomainResult;
use async_trait::async_trait;

/// Persistence port for rack-slot inventory.
///
/// Implementations must make `add_product` a single atomic operation with
/// respect to slot uniqueness: of two concurrent inserts into one slot,
/// exactly one succeeds and the other returns `DomainError::DuplicateSlot`.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn rack_location_exists(&self, slot: &RackSlot) -> DomainResult<bool>;

    async fn add_product(&self, product: NewProduct) -> DomainResult<InventoryItem>;

    /// Unconditional overwrite of the quantity. Returns `false` when no
    /// product has `id`.
    async fn update_quantity(&self, id: ProductId, quantity: i64) -> DomainResult<bool>;

    async fn list_products(&self) -> DomainResult<Vec<InventoryItem>>;

    async fn get_product(&self, id: ProductId) -> DomainResult<Option<InventoryItem>>;

    async fn list_by_zone(&self, zone: &str) -> DomainResult<Vec<InventoryItem>>;

    async fn list_by_zone_rack(&self, zone: &str, rack: &str) -> DomainResult<Vec<InventoryItem>>;
}
