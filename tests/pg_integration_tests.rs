#![cfg(feature = "pg_integration")]

use std::sync::Arc;
use std::time::Duration;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;
use warehouse_agv::adapters::outbound::PostgresWarehouseStore;
use warehouse_agv::common::DomainError;
use warehouse_agv::config::PostgresConfig;
use warehouse_agv::domains::grid::Cell;
use warehouse_agv::domains::inventory::{InventoryStore, NewProduct, RackSlot};
use warehouse_agv::domains::orders::{OrderStatus, OrderStore};

async fn connect(port: u16) -> Result<PostgresWarehouseStore, Box<dyn std::error::Error>> {
    let config = PostgresConfig {
        host: "127.0.0.1".to_string(),
        port,
        database: "postgres".to_string(),
        username: "postgres".to_string(),
        password: "postgres".to_string(),
        max_connections: 8,
    };

    // Wait for Postgres to accept connections (simple retry loop)
    let mut last_error = None;
    for _ in 0..10 {
        match PostgresWarehouseStore::new(config.clone()).await {
            Ok(store) => return Ok(store),
            Err(e) => {
                last_error = Some(e);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }
    Err(format!("Postgres did not become ready: {:?}", last_error).into())
}

#[tokio::test]
async fn test_postgres_orders_and_inventory() -> Result<(), Box<dyn std::error::Error>> {
    let node = Postgres::default().start().await?;
    let port = node.get_host_port_ipv4(5432).await?;
    let store = Arc::new(connect(port).await?);

    // Orders
    let first = store.create_order(Cell::new(7, 0), Cell::new(7, 8)).await?;
    let second = store.create_order(Cell::new(0, 0), Cell::new(3, 3)).await?;
    assert!(second > first);

    let orders = store.list_orders().await?;
    assert_eq!(orders.iter().map(|o| o.id).collect::<Vec<_>>(), vec![second, first]);
    assert_eq!(orders[1].pickup(), Cell::new(7, 0));
    assert_eq!(orders[1].status, OrderStatus::Pending);

    assert!(store.update_order_status(first, OrderStatus::Completed).await?);
    assert!(store.get_order(first).await?.map(|o| o.is_completed()).unwrap_or(false));
    assert!(!store.update_order_status(9999, OrderStatus::Completed).await?);

    // Inventory
    let slot = RackSlot::new("Z1", "R1", 0, 0);
    let item = store.add_product(NewProduct::new("widgetA", 10, slot.clone())).await?;
    assert!(store.rack_location_exists(&slot).await?);

    let dup = store.add_product(NewProduct::new("widgetB", 5, slot.clone())).await;
    match dup {
        Err(e @ DomainError::DuplicateSlot { .. }) => {
            assert_eq!(e.to_string(), "Rack Z1-R1 at (0,0) is already occupied")
        }
        other => panic!("expected duplicate slot, got {:?}", other),
    }

    store
        .add_product(NewProduct::new("widgetB", 5, RackSlot::new("Z1", "R2", 0, 0)))
        .await?;
    store
        .add_product(NewProduct::new("gear", 1, RackSlot::new("Z2", "R1", 0, 0)))
        .await?;

    assert_eq!(store.list_products().await?.len(), 3);
    assert_eq!(store.list_by_zone("Z1").await?.len(), 2);
    assert_eq!(store.list_by_zone_rack("Z1", "R2").await?.len(), 1);

    assert!(store.update_quantity(item.id, 0).await?);
    assert_eq!(store.get_product(item.id).await?.map(|i| i.quantity), Some(0));
    assert!(!store.update_quantity(9999, 1).await?);

    // Concurrent inserts into one slot: exactly one wins.
    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .add_product(NewProduct::new(format!("race-{}", i), 1, RackSlot::new("Z3", "R3", 1, 1)))
                    .await
            })
        })
        .collect();
    let mut winners = 0;
    for task in tasks {
        if task.await?.is_ok() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    Ok(())
}
