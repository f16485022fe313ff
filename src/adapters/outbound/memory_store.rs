use crate::common::{DomainError, DomainResult};
use crate::domains::grid::Cell;
use crate::domains::inventory::{InventoryItem, InventoryStore, NewProduct, ProductId, RackSlot};
use crate::domains::orders::{Order, OrderId, OrderStatus, OrderStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    orders: BTreeMap<OrderId, Order>,
    last_order_id: OrderId,
    products: BTreeMap<ProductId, InventoryItem>,
    last_product_id: ProductId,
    // unique index on (zone, rack, row_loc, col_loc)
    slots: HashMap<RackSlot, ProductId>,
}

/// In-process store for orders and inventory.
///
/// Every operation runs under one lock, so the slot check and the insert in
/// `add_product` are a single atomic step.
#[derive(Debug, Default)]
pub struct InMemoryWarehouseStore {
    tables: RwLock<Tables>,
}

impl InMemoryWarehouseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryWarehouseStore {
    async fn create_order(&self, pickup: Cell, delivery: Cell) -> DomainResult<OrderId> {
        let mut tables = self.tables.write().await;
        tables.last_order_id += 1;
        let id = tables.last_order_id;
        tables.orders.insert(id, Order::new(id, pickup, delivery, Utc::now()));
        Ok(id)
    }

    async fn list_orders(&self) -> DomainResult<Vec<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.values().rev().cloned().collect())
    }

    async fn get_order(&self, id: OrderId) -> DomainResult<Option<Order>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.get(&id).cloned())
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.orders.get_mut(&id) {
            Some(order) => {
                order.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl InventoryStore for InMemoryWarehouseStore {
    async fn rack_location_exists(&self, slot: &RackSlot) -> DomainResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.slots.contains_key(slot))
    }

    async fn add_product(&self, product: NewProduct) -> DomainResult<InventoryItem> {
        let mut tables = self.tables.write().await;
        if tables.slots.contains_key(&product.slot) {
            let slot = product.slot;
            return Err(DomainError::DuplicateSlot {
                zone: slot.zone,
                rack: slot.rack,
                row_loc: slot.row_loc,
                col_loc: slot.col_loc,
            });
        }
        tables.last_product_id += 1;
        let id = tables.last_product_id;
        tables.slots.insert(product.slot.clone(), id);
        let item = InventoryItem::from_new(id, product);
        tables.products.insert(id, item.clone());
        Ok(item)
    }

    async fn update_quantity(&self, id: ProductId, quantity: i64) -> DomainResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.products.get_mut(&id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_products(&self) -> DomainResult<Vec<InventoryItem>> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().cloned().collect())
    }

    async fn get_product(&self, id: ProductId) -> DomainResult<Option<InventoryItem>> {
        let tables = self.tables.read().await;
        Ok(tables.products.get(&id).cloned())
    }

    async fn list_by_zone(&self, zone: &str) -> DomainResult<Vec<InventoryItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|item| item.zone == zone)
            .cloned()
            .collect())
    }

    async fn list_by_zone_rack(&self, zone: &str, rack: &str) -> DomainResult<Vec<InventoryItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|item| item.zone == zone && item.rack == rack)
            .cloned()
            .collect())
    }
}
