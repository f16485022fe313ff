use crate::common::{DomainError, DomainResult};
use crate::config::PostgresConfig;
use crate::domains::grid::Cell;
use crate::domains::inventory::{InventoryItem, InventoryStore, NewProduct, ProductId, RackSlot};
use crate::domains::orders::{Order, OrderId, OrderStatus, OrderStore};
use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use std::fmt::Display;
use tokio_postgres::{NoTls, Row};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id BIGSERIAL PRIMARY KEY,
        pickup_r BIGINT NOT NULL,
        pickup_c BIGINT NOT NULL,
        delivery_r BIGINT NOT NULL,
        delivery_c BIGINT NOT NULL,
        status TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE TABLE IF NOT EXISTS inventory (
        id BIGSERIAL PRIMARY KEY,
        product_name TEXT NOT NULL,
        quantity BIGINT NOT NULL,
        zone TEXT NOT NULL,
        rack TEXT NOT NULL,
        row_loc BIGINT NOT NULL,
        col_loc BIGINT NOT NULL,
        CONSTRAINT inventory_slot_unique UNIQUE (zone, rack, row_loc, col_loc)
    );

    CREATE INDEX IF NOT EXISTS idx_inventory_zone_rack
    ON inventory(zone, rack);
"#;

const ORDER_COLUMNS: &str = "id, pickup_r, pickup_c, delivery_r, delivery_c, status, created_at";
const INVENTORY_COLUMNS: &str = "id, product_name, quantity, zone, rack, row_loc, col_loc";

/// PostgreSQL-backed order and inventory store.
///
/// Slot uniqueness is the `inventory_slot_unique` constraint; inserts use
/// `ON CONFLICT DO NOTHING` so a lost race is reported as a duplicate slot
/// rather than a driver error.
pub struct PostgresWarehouseStore {
    pool: Pool,
}

fn infra<E: Display>(context: &'static str) -> impl FnOnce(E) -> DomainError {
    move |e| DomainError::InfrastructureError(format!("{}: {}", context, e))
}

fn to_usize(value: i64, column: &str) -> DomainResult<usize> {
    usize::try_from(value).map_err(|_| {
        DomainError::InfrastructureError(format!("negative value {} in column {}", value, column))
    })
}

fn order_from_row(row: &Row) -> DomainResult<Order> {
    let status: String = row.get("status");
    Ok(Order {
        id: row.get("id"),
        pickup_r: to_usize(row.get("pickup_r"), "pickup_r")?,
        pickup_c: to_usize(row.get("pickup_c"), "pickup_c")?,
        delivery_r: to_usize(row.get("delivery_r"), "delivery_r")?,
        delivery_c: to_usize(row.get("delivery_c"), "delivery_c")?,
        status: status.parse::<OrderStatus>()?,
        created_at: row.get("created_at"),
    })
}

fn item_from_row(row: &Row) -> InventoryItem {
    InventoryItem {
        id: row.get("id"),
        product_name: row.get("product_name"),
        quantity: row.get("quantity"),
        zone: row.get("zone"),
        rack: row.get("rack"),
        row_loc: row.get("row_loc"),
        col_loc: row.get("col_loc"),
    }
}

impl PostgresWarehouseStore {
    pub async fn new(config: PostgresConfig) -> DomainResult<Self> {
        let mut pg_config = Config::new();
        pg_config.host = Some(config.host);
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database);
        pg_config.user = Some(config.username);
        pg_config.password = Some(config.password);
        pg_config.pool = Some(PoolConfig::new(config.max_connections as usize));

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(infra("Failed to create PostgreSQL pool"))?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and make sure the schema exists.
    pub async fn from_pool(pool: Pool) -> DomainResult<Self> {
        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn client(&self) -> DomainResult<deadpool_postgres::Client> {
        self.pool
            .get()
            .await
            .map_err(infra("Failed to get database connection"))
    }

    async fn initialize_schema(&self) -> DomainResult<()> {
        let client = self.client().await?;
        client
            .batch_execute(SCHEMA)
            .await
            .map_err(infra("Failed to initialize database schema"))?;
        tracing::info!("PostgreSQL schema ready");
        Ok(())
    }

    async fn query_items(
        &self,
        filter: &str,
        params: &[&(dyn tokio_postgres::types::ToSql + Sync)],
    ) -> DomainResult<Vec<InventoryItem>> {
        let client = self.client().await?;
        let query = format!("SELECT {} FROM inventory {} ORDER BY id", INVENTORY_COLUMNS, filter);
        let rows = client
            .query(query.as_str(), params)
            .await
            .map_err(infra("Failed to query inventory"))?;
        Ok(rows.iter().map(item_from_row).collect())
    }
}

#[async_trait]
impl OrderStore for PostgresWarehouseStore {
    async fn create_order(&self, pickup: Cell, delivery: Cell) -> DomainResult<OrderId> {
        let client = self.client().await?;
        let row = client
            .query_one(
                "INSERT INTO orders (pickup_r, pickup_c, delivery_r, delivery_c, status)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING id",
                &[
                    &(pickup.row as i64),
                    &(pickup.col as i64),
                    &(delivery.row as i64),
                    &(delivery.col as i64),
                    &OrderStatus::Pending.as_str(),
                ],
            )
            .await
            .map_err(infra("Failed to create order"))?;
        Ok(row.get(0))
    }

    async fn list_orders(&self) -> DomainResult<Vec<Order>> {
        let client = self.client().await?;
        let query = format!("SELECT {} FROM orders ORDER BY id DESC", ORDER_COLUMNS);
        let rows = client
            .query(query.as_str(), &[])
            .await
            .map_err(infra("Failed to list orders"))?;
        rows.iter().map(order_from_row).collect()
    }

    async fn get_order(&self, id: OrderId) -> DomainResult<Option<Order>> {
        let client = self.client().await?;
        let query = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);
        let row = client
            .query_opt(query.as_str(), &[&id])
            .await
            .map_err(infra("Failed to load order"))?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> DomainResult<bool> {
        let client = self.client().await?;
        let updated = client
            .execute(
                "UPDATE orders SET status = $1 WHERE id = $2",
                &[&status.as_str(), &id],
            )
            .await
            .map_err(infra("Failed to update order status"))?;
        Ok(updated > 0)
    }
}

#[async_trait]
impl InventoryStore for PostgresWarehouseStore {
    async fn rack_location_exists(&self, slot: &RackSlot) -> DomainResult<bool> {
        let client = self.client().await?;
        let row = client
            .query_opt(
                "SELECT id FROM inventory
                 WHERE zone = $1 AND rack = $2 AND row_loc = $3 AND col_loc = $4",
                &[&slot.zone, &slot.rack, &slot.row_loc, &slot.col_loc],
            )
            .await
            .map_err(infra("Failed to look up rack slot"))?;
        Ok(row.is_some())
    }

    async fn add_product(&self, product: NewProduct) -> DomainResult<InventoryItem> {
        let client = self.client().await?;
        let row = client
            .query_opt(
                "INSERT INTO inventory (product_name, quantity, zone, rack, row_loc, col_loc)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 ON CONFLICT ON CONSTRAINT inventory_slot_unique DO NOTHING
                 RETURNING id",
                &[
                    &product.product_name,
                    &product.quantity,
                    &product.slot.zone,
                    &product.slot.rack,
                    &product.slot.row_loc,
                    &product.slot.col_loc,
                ],
            )
            .await
            .map_err(infra("Failed to insert product"))?;

        match row {
            Some(row) => Ok(InventoryItem::from_new(row.get(0), product)),
            None => {
                let slot = product.slot;
                Err(DomainError::DuplicateSlot {
                    zone: slot.zone,
                    rack: slot.rack,
                    row_loc: slot.row_loc,
                    col_loc: slot.col_loc,
                })
            }
        }
    }

    async fn update_quantity(&self, id: ProductId, quantity: i64) -> DomainResult<bool> {
        let client = self.client().await?;
        let updated = client
            .execute(
                "UPDATE inventory SET quantity = $1 WHERE id = $2",
                &[&quantity, &id],
            )
            .await
            .map_err(infra("Failed to update quantity"))?;
        Ok(updated > 0)
    }

    async fn list_products(&self) -> DomainResult<Vec<InventoryItem>> {
        self.query_items("", &[]).await
    }

    async fn get_product(&self, id: ProductId) -> DomainResult<Option<InventoryItem>> {
        let mut items = self.query_items("WHERE id = $1", &[&id]).await?;
        Ok(items.pop())
    }

    async fn list_by_zone(&self, zone: &str) -> DomainResult<Vec<InventoryItem>> {
        self.query_items("WHERE zone = $1", &[&zone]).await
    }

    async fn list_by_zone_rack(&self, zone: &str, rack: &str) -> DomainResult<Vec<InventoryItem>> {
        self.query_items("WHERE zone = $1 AND rack = $2", &[&zone, &rack])
            .await
    }
}
