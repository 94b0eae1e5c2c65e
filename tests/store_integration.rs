//! End-to-end scenarios across the store and the screen controllers

use renovation_inventory::store::{NewHouse, NewKey, NewWarehouseItem};
use renovation_inventory::{AppState, Category, Config, HouseDeletePolicy};

fn state() -> AppState {
    let config = Config::default();
    init_tracing(&config.log_level);
    AppState::new(config)
}

/// Initialize tracing once for whichever test runs first
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}

#[test]
fn lamp_scenario_from_an_empty_store() {
    let state = state();

    state.warehouse_store.add(NewWarehouseItem {
        name: "Lamp".to_string(),
        category: Category::Lighting,
        quantity: 10,
        photo: None,
    });

    let items = state.warehouse_store.list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 1);
    assert_eq!(items[0].name, "Lamp");
    assert_eq!(items[0].category, Category::Lighting);
    assert_eq!(items[0].quantity, 10);
}

#[test]
fn villa_key_scenario_with_dangling_reference() {
    let state = state();

    let villa = state.house_store.add(NewHouse {
        name: "Villa A".to_string(),
        progress: 0,
        address: "1 Main St".to_string(),
        photo: None,
    });
    state.key_store.add(NewKey {
        house_id: villa.id,
        key_number: "K-01".to_string(),
        photo: None,
    });

    let keys_view = state.keys_view();
    let rows = keys_view.rows();
    assert_eq!(rows[0].key.key_number, "K-01");
    assert_eq!(rows[0].house_name.as_deref(), Some("Villa A"));

    // Default policy detaches: the key survives, the name stops resolving
    assert!(state.house_store.delete(villa.id).unwrap());
    let rows = keys_view.rows();
    assert_eq!(rows[0].key.house_id, villa.id);
    assert_eq!(rows[0].house_name, None);
}

#[test]
fn empty_address_is_blocked_with_a_message() {
    let state = state();
    let mut houses = state.houses_view();

    houses.draft.name = "Villa A".to_string();
    let err = houses.submit_new().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please fill in both name and address fields."
    );
    assert!(state.house_store.list().is_empty());
}

#[test]
fn allocation_flow_across_screens() {
    let state = state();

    let lamp = state.warehouse_store.add(NewWarehouseItem {
        name: "Lamp".to_string(),
        category: Category::Lighting,
        quantity: 10,
        photo: None,
    });
    let villa = state.house_store.add(NewHouse {
        name: "Villa A".to_string(),
        progress: 30,
        address: "1 Main St".to_string(),
        photo: None,
    });

    let mut allocation = state.allocation_view();
    allocation.select(villa.id);
    allocation.begin_allocate(lamp.id);
    allocation.allocate_draft.quantity = "3".to_string();
    assert!(allocation.submit_allocate());
    allocation.begin_allocate(lamp.id);
    allocation.allocate_draft.quantity = "2".to_string();
    assert!(allocation.submit_allocate());

    // One additive row, visible to any other reader of the store
    let rows = state.house_store.get(villa.id).unwrap().allocated_items;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 5);

    let detail = allocation.detail().unwrap();
    assert_eq!(detail.name, "Villa A");
    assert_eq!(detail.rows[0].item_name, "Lamp");
    assert_eq!(detail.rows[0].quantity, 5);
}

#[test]
fn deletions_never_touch_other_collections() {
    let state = state();

    let lamp = state.warehouse_store.add(NewWarehouseItem {
        name: "Lamp".to_string(),
        category: Category::Lighting,
        quantity: 10,
        photo: None,
    });
    let villa = state.house_store.add(NewHouse {
        name: "Villa A".to_string(),
        progress: 0,
        address: "1 Main St".to_string(),
        photo: None,
    });
    state.key_store.add(NewKey {
        house_id: villa.id,
        key_number: "K-01".to_string(),
        photo: None,
    });

    assert!(state.warehouse_store.delete(lamp.id));
    assert_eq!(state.house_store.list().len(), 1);
    assert_eq!(state.key_store.list().len(), 1);
}

#[test]
fn deny_policy_is_wired_through_configuration() {
    let config = Config {
        house_delete_policy: HouseDeletePolicy::Deny,
        ..Config::default()
    };
    let state = AppState::new(config);

    let villa = state.house_store.add(NewHouse {
        name: "Villa A".to_string(),
        progress: 0,
        address: "1 Main St".to_string(),
        photo: None,
    });
    state.key_store.add(NewKey {
        house_id: villa.id,
        key_number: "K-01".to_string(),
        photo: None,
    });

    let mut houses = state.houses_view();
    houses.request_delete(villa.id);
    assert!(houses.confirm_delete().is_err());
    assert_eq!(state.house_store.list().len(), 1);
}

#[test]
fn every_view_observes_store_mutations() {
    let state = state();
    let mut allocation = state.allocation_view();
    assert!(!allocation.take_changes());

    let mut warehouse = state.warehouse_view();
    warehouse.draft.name = "Rug".to_string();
    warehouse.draft.category = Category::Textiles;
    warehouse.draft.quantity = "4".to_string();
    assert!(warehouse.submit_new());

    assert!(allocation.take_changes());

    let stats = state.dashboard_view().stats();
    assert_eq!(stats.total_stock_items, 4);
    assert_eq!(stats.stock_categories, 1);
}

#[test]
fn ids_stay_unique_across_interleaved_mutations() {
    let state = state();

    for n in 0..3 {
        state.warehouse_store.add(NewWarehouseItem {
            name: format!("Item {n}"),
            category: Category::Decor,
            quantity: 1,
            photo: None,
        });
    }
    state.warehouse_store.delete(2);
    let fresh = state.warehouse_store.add(NewWarehouseItem {
        name: "Late item".to_string(),
        category: Category::Decor,
        quantity: 1,
        photo: None,
    });

    let mut ids: Vec<_> = state.warehouse_store.list().iter().map(|i| i.id).collect();
    let len_before = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), len_before);
    assert_eq!(fresh.id, 4);
}
