use super::order::{Order, OrderId, OrderStatus};
use crate::common::DomainResult;
use crate::domains::grid::Cell;
use async_trait::async_trait;

/// Persistence port for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a `pending` order and return its freshly assigned, strictly increasing id.
    async fn create_order(&self, pickup: Cell, delivery: Cell) -> DomainResult<OrderId>;

    /// All orders, newest id first.
    async fn list_orders(&self) -> DomainResult<Vec<Order>>;

    async fn get_order(&self, id: OrderId) -> DomainResult<Option<Order>>;

    /// Unconditional overwrite. Returns `false` when no order has `id`;
    /// that case is a no-op, not an error.
    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<bool>;
}
