use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use warehouse_agv::adapters::outbound::{
    init_combined_logger, init_tracing_logger, init_tracing_subscriber, InMemoryWarehouseStore, PostgresWarehouseStore,
};
use warehouse_agv::application::{CreateOrderRequest, WarehouseService};
use warehouse_agv::config::StorageBackend;
use warehouse_agv::domains::agv::{Agv, AgvExecutor, AgvStatus};
use warehouse_agv::domains::inventory::InventoryStore;
use warehouse_agv::domains::orders::OrderStore;
use warehouse_agv::domains::path_planning::PathPlanner;
use warehouse_agv::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing_subscriber("info")?;

    info!("Starting warehouse AGV simulator");

    let config_path = std::env::var("AGV_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = match Config::from_file(&config_path).await {
        Ok(config) => {
            info!("Configuration loaded from {}", config_path);
            config
        }
        Err(e) => {
            warn!("Could not load {} ({}); using defaults", config_path, e);
            Config::default()
        }
    };

    let logger = match &config.logging.file {
        Some(path) if !path.is_empty() => init_combined_logger(path, config.log_level()),
        _ => init_tracing_logger(),
    };

    let grid = Arc::new(config.build_grid()?);
    let start = config.agv_start(&grid)?;
    info!("Grid {}x{}, AGV {} at {}", grid.rows(), grid.cols(), config.agv.id, start);

    let (orders, inventory): (Arc<dyn OrderStore>, Arc<dyn InventoryStore>) =
        match config.storage.backend {
            StorageBackend::Memory => {
                let store = Arc::new(InMemoryWarehouseStore::new());
                (store.clone() as Arc<dyn OrderStore>, store as Arc<dyn InventoryStore>)
            }
            StorageBackend::Postgres => {
                info!("PostgreSQL host: {}", config.storage.postgres.host);
                let store = Arc::new(PostgresWarehouseStore::new(config.storage.postgres.clone()).await?);
                (store.clone() as Arc<dyn OrderStore>, store as Arc<dyn InventoryStore>)
            }
        };

    let executor = AgvExecutor::new(Agv::new(config.agv.id.clone(), start), orders.clone(), logger.clone())
        .with_step_delay(config.step_delay());
    let service = WarehouseService::new(
        PathPlanner::new(grid.clone()),
        executor,
        orders,
        inventory,
        logger,
    );

    // Demo: pickup and delivery stations of the configured layout
    match grid.stations() {
        Some((pickup, delivery)) => {
            let request = CreateOrderRequest {
                pickup: Some(vec![pickup.row as i64, pickup.col as i64]),
                delivery: Some(vec![delivery.row as i64, delivery.col as i64]),
            };
            match service.dispatch_order(request).await {
                Ok(dispatch) => {
                    info!("Order {} dispatched over {} cells", dispatch.order_id, dispatch.path.len());
                    while service.agv_status().status == AgvStatus::Moving {
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                    dispatch.traversal.wait().await?;
                    for order in service.list_orders().await? {
                        info!(
                            "Order {}: {} -> {} [{}]",
                            order.id,
                            order.pickup(),
                            order.delivery(),
                            order.status
                        );
                    }
                }
                Err(e) => error!("Demo dispatch failed: {}", e),
            }
        }
        None => warn!("Grid has no pickup/delivery stations; skipping demo dispatch"),
    }

    info!("Simulator ready; press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;
    info!("Shutting down warehouse AGV simulator");

    Ok(())
}
