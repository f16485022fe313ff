use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};
use warehouse_agv::adapters::outbound::InMemoryWarehouseStore;
use warehouse_agv::common::DomainError;
use warehouse_agv::domains::inventory::{InventoryStore, NewProduct, RackSlot};

fn product(name: &str, quantity: i64, zone: &str, rack: &str, row: i64, col: i64) -> NewProduct {
    NewProduct::new(name, quantity, RackSlot::new(zone, rack, row, col))
}

#[tokio::test]
async fn test_duplicate_slot_rejected_with_message() {
    let store = InMemoryWarehouseStore::new();

    let first = assert_ok!(store.add_product(product("widgetA", 10, "Z1", "R1", 0, 0)).await);
    assert_eq!(first.product_name, "widgetA");

    let err = assert_err!(store.add_product(product("widgetB", 5, "Z1", "R1", 0, 0)).await);
    assert!(matches!(err, DomainError::DuplicateSlot { .. }));
    assert_eq!(err.to_string(), "Rack Z1-R1 at (0,0) is already occupied");

    assert_ok!(store.add_product(product("widgetB", 5, "Z1", "R1", 0, 1)).await);

    let all = store.list_products().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|item| item.product_name != "widgetB" || item.col_loc == 1));
}

#[tokio::test]
async fn test_same_coordinates_in_other_rack_or_zone_are_free() {
    let store = InMemoryWarehouseStore::new();
    assert_ok!(store.add_product(product("a", 1, "Z1", "R1", 2, 3)).await);
    assert_ok!(store.add_product(product("b", 1, "Z1", "R2", 2, 3)).await);
    assert_ok!(store.add_product(product("c", 1, "Z2", "R1", 2, 3)).await);
    assert_eq!(store.list_products().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_concurrent_inserts_into_one_slot_admit_exactly_one() {
    let store = Arc::new(InMemoryWarehouseStore::new());

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .add_product(product(&format!("item-{}", i), i, "Z9", "R9", 4, 4))
                    .await
            })
        })
        .collect();

    let mut ok = 0;
    let mut duplicates = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => ok += 1,
            Err(DomainError::DuplicateSlot { .. }) => duplicates += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(duplicates, 15);
    assert_eq!(store.list_by_zone_rack("Z9", "R9").await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_across_threads() {
    let store = Arc::new(InMemoryWarehouseStore::new());

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            // Two writers per slot.
            let col = i / 2;
            tokio::spawn(async move { store.add_product(product("dup", 1, "Z", "R", 0, col)).await })
        })
        .collect();

    let mut ok = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            ok += 1;
        }
    }
    assert_eq!(ok, 16);
}

#[tokio::test]
async fn test_filters_and_lookup() {
    let store = InMemoryWarehouseStore::new();
    let a = store.add_product(product("bolts", 100, "A", "1", 0, 0)).await.unwrap();
    store.add_product(product("nuts", 50, "A", "2", 0, 0)).await.unwrap();
    store.add_product(product("gears", 7, "B", "1", 1, 1)).await.unwrap();

    let zone_a = store.list_by_zone("A").await.unwrap();
    assert_eq!(zone_a.len(), 2);
    assert!(zone_a.iter().all(|item| item.zone == "A"));

    let rack = store.list_by_zone_rack("A", "2").await.unwrap();
    assert_eq!(rack.len(), 1);
    assert_eq!(rack[0].product_name, "nuts");

    assert!(store.list_by_zone("C").await.unwrap().is_empty());

    let found = store.get_product(a.id).await.unwrap().unwrap();
    assert_eq!(found, a);
    assert!(store.get_product(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_quantity_overwrites_or_reports_missing() {
    let store = InMemoryWarehouseStore::new();
    let item = store.add_product(product("bolts", 100, "A", "1", 0, 0)).await.unwrap();

    assert!(store.update_quantity(item.id, 42).await.unwrap());
    assert_eq!(store.get_product(item.id).await.unwrap().unwrap().quantity, 42);

    assert!(store.update_quantity(item.id, 0).await.unwrap());
    assert_eq!(store.get_product(item.id).await.unwrap().unwrap().quantity, 0);

    assert!(!store.update_quantity(12345, 7).await.unwrap());
    assert_eq!(store.list_products().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_slot_stays_occupied_after_quantity_drops_to_zero() {
    let store = InMemoryWarehouseStore::new();
    let item = store.add_product(product("bolts", 3, "A", "1", 0, 0)).await.unwrap();
    store.update_quantity(item.id, 0).await.unwrap();

    assert!(store.rack_location_exists(&item.slot()).await.unwrap());
    assert_err!(store.add_product(product("nuts", 1, "A", "1", 0, 0)).await);
}
