use super::requests::{
    AddProductRequest, CreateOrderRequest, ExecuteRequest, PlanRequest, UpdateQuantityRequest,
};
use crate::common::{ApplicationError, ApplicationResult, DomainError};
use crate::domains::agv::{AgvExecutor, AgvSnapshot, TraversalHandle};
use crate::domains::grid::{Cell, Grid};
use crate::domains::inventory::{InventoryItem, InventoryStore, NewProduct, ProductId, RackSlot};
use crate::domains::logger::DynLogger;
use crate::domains::orders::{Order, OrderId, OrderStore};
use crate::domains::path_planning::{Path, PathPlanner};
use std::sync::Arc;

/// Result of dispatching an order: the route being driven and its traversal.
#[derive(Debug)]
pub struct Dispatch {
    pub order_id: OrderId,
    pub path: Path,
    pub traversal: TraversalHandle,
}

/// Application entry point for the warehouse. Validates raw requests before
/// they reach the planner, the executor or the stores.
pub struct WarehouseService {
    planner: PathPlanner,
    executor: AgvExecutor,
    orders: Arc<dyn OrderStore>,
    inventory: Arc<dyn InventoryStore>,
    logger: DynLogger,
}

fn pair(raw: &Option<Vec<i64>>) -> Option<(i64, i64)> {
    match raw.as_deref() {
        Some([r, c]) => Some((*r, *c)),
        _ => None,
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl WarehouseService {
    pub fn new(
        planner: PathPlanner,
        executor: AgvExecutor,
        orders: Arc<dyn OrderStore>,
        inventory: Arc<dyn InventoryStore>,
        logger: DynLogger,
    ) -> Self {
        Self {
            planner,
            executor,
            orders,
            inventory,
            logger,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.planner.grid()
    }

    pub fn agv_status(&self) -> AgvSnapshot {
        self.executor.snapshot()
    }

    pub fn plan_route(&self, request: PlanRequest) -> ApplicationResult<Path> {
        let (Some(start), Some(goal)) = (pair(&request.start), pair(&request.goal)) else {
            return Err(ApplicationError::Validation("start and goal required".to_string()));
        };
        let start = self.grid().cell_at(start.0, start.1)?;
        let goal = self.grid().cell_at(goal.0, goal.1)?;
        Ok(self.planner.plan(start, goal))
    }

    pub async fn create_order(&self, request: CreateOrderRequest) -> ApplicationResult<OrderId> {
        let (pickup, delivery) = self.order_cells(&request)?;
        let order_id = self.orders.create_order(pickup, delivery).await?;
        self.logger
            .info(&format!("Order {} created: {} -> {}", order_id, pickup, delivery));
        Ok(order_id)
    }

    pub async fn list_orders(&self) -> ApplicationResult<Vec<Order>> {
        Ok(self.orders.list_orders().await?)
    }

    /// Launch a traversal of a caller-supplied path. Returns as soon as the
    /// traversal has started.
    pub fn execute(&self, request: ExecuteRequest) -> ApplicationResult<TraversalHandle> {
        let raw = request.path.unwrap_or_default();
        if raw.is_empty() {
            return Err(ApplicationError::Validation("path required".to_string()));
        }

        let mut cells = Vec::with_capacity(raw.len());
        for entry in &raw {
            let [r, c] = entry.as_slice() else {
                return Err(ApplicationError::Validation(
                    "path entries must be [row, col] pairs".to_string(),
                ));
            };
            cells.push(self.grid().cell_at(*r, *c)?);
        }

        let path = Path::new(cells);
        if !path.is_valid_on(self.grid()) {
            return Err(ApplicationError::Validation(
                "path must be a connected route over free cells".to_string(),
            ));
        }

        Ok(self.executor.execute(path, request.order_id)?)
    }

    /// Plan AGV -> pickup -> delivery, record the order and start driving it.
    /// The order is completed when the AGV reaches the delivery cell.
    ///
    /// The AGV is claimed before the order is stored, so a dispatch that
    /// loses the vehicle to another request leaves no order behind.
    pub async fn dispatch_order(&self, request: CreateOrderRequest) -> ApplicationResult<Dispatch> {
        let (pickup, delivery) = self.order_cells(&request)?;
        if self.executor.is_busy() {
            return Err(DomainError::AgvBusy.into());
        }

        let here = self.executor.snapshot().position();
        let to_pickup = self.reachable(here, pickup)?;
        let to_delivery = self.reachable(pickup, delivery)?;
        let path = to_pickup.join(to_delivery);

        let reservation = self.executor.reserve(path.clone())?;
        // On error the reservation drops and the AGV is idle again.
        let order_id = self.orders.create_order(pickup, delivery).await?;
        let traversal = reservation.launch(Some(order_id));

        self.logger.info(&format!(
            "Order {} dispatched: {} -> {} -> {} ({} steps)",
            order_id,
            here,
            pickup,
            delivery,
            path.cost()
        ));

        Ok(Dispatch {
            order_id,
            path,
            traversal,
        })
    }

    pub async fn list_inventory(&self) -> ApplicationResult<Vec<InventoryItem>> {
        Ok(self.inventory.list_products().await?)
    }

    pub async fn get_product(&self, id: ProductId) -> ApplicationResult<Option<InventoryItem>> {
        Ok(self.inventory.get_product(id).await?)
    }

    pub async fn products_in_zone(&self, zone: &str) -> ApplicationResult<Vec<InventoryItem>> {
        Ok(self.inventory.list_by_zone(zone).await?)
    }

    pub async fn products_in_rack(&self, zone: &str, rack: &str) -> ApplicationResult<Vec<InventoryItem>> {
        Ok(self.inventory.list_by_zone_rack(zone, rack).await?)
    }

    pub async fn add_product(&self, request: AddProductRequest) -> ApplicationResult<InventoryItem> {
        let (Some(name), Some(quantity), Some(zone), Some(rack), Some(row_loc), Some(col_loc)) = (
            required(request.product_name),
            request.quantity,
            required(request.zone),
            required(request.rack),
            request.row_loc,
            request.col_loc,
        ) else {
            return Err(ApplicationError::Validation("All fields are required".to_string()));
        };
        if quantity < 0 {
            return Err(ApplicationError::Validation(
                "quantity must not be negative".to_string(),
            ));
        }

        let product = NewProduct::new(name, quantity, RackSlot::new(zone, rack, row_loc, col_loc));
        match self.inventory.add_product(product).await {
            Ok(item) => {
                self.logger.info(&format!(
                    "Stored {} x{} at {}",
                    item.product_name,
                    item.quantity,
                    item.slot()
                ));
                Ok(item)
            }
            Err(e @ DomainError::DuplicateSlot { .. }) => {
                self.logger.warn(&e.to_string());
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite a product's quantity. Returns `false` when the id is unknown,
    /// which is not an error.
    pub async fn update_quantity(
        &self,
        id: ProductId,
        request: UpdateQuantityRequest,
    ) -> ApplicationResult<bool> {
        let Some(quantity) = request.quantity else {
            return Err(ApplicationError::Validation("quantity required".to_string()));
        };
        if quantity < 0 {
            return Err(ApplicationError::Validation(
                "quantity must not be negative".to_string(),
            ));
        }

        let updated = self.inventory.update_quantity(id, quantity).await?;
        if !updated {
            self.logger
                .warn(&format!("Product {} not found; quantity unchanged", id));
        }
        Ok(updated)
    }

    fn order_cells(&self, request: &CreateOrderRequest) -> ApplicationResult<(Cell, Cell)> {
        let (Some(pickup), Some(delivery)) = (pair(&request.pickup), pair(&request.delivery)) else {
            return Err(ApplicationError::Validation(
                "pickup and delivery required".to_string(),
            ));
        };
        let pickup = self.grid().cell_at(pickup.0, pickup.1)?;
        let delivery = self.grid().cell_at(delivery.0, delivery.1)?;
        Ok((pickup, delivery))
    }

    fn reachable(&self, from: Cell, to: Cell) -> ApplicationResult<Path> {
        let path = self.planner.plan(from, to);
        if path.is_empty() {
            return Err(ApplicationError::Unreachable {
                from_r: from.row,
                from_c: from.col,
                to_r: to.row,
                to_c: to.col,
            });
        }
        Ok(path)
    }
}
