use std::fs;
use std::sync::Arc;

use staybot_core::directive::{DirectiveDispatcher, DispatchResult, BOOKING_CONFIRMATION};
use staybot_core::domain::booking::BookingStatus;
use staybot_db::{
    connect_with_settings, migrations, BookingRepository, FileCatalog, SqlBookingRepository,
};
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"id": 1, "name": "Pool Villa", "location": "Ubud", "rating": 4.8,
     "price_per_night": 100, "image_url": "/img/1.jpg", "amenities": ["pool"], "guests": 2},
    {"id": 2, "name": "Garden Bungalow", "location": "Canggu", "rating": 4.1,
     "price_per_night": 80, "image_url": "/img/2.jpg", "amenities": [], "guests": 2},
    {"id": 3, "name": "Family House", "location": "Sanur", "rating": 4.5,
     "price_per_night": 50, "image_url": "/img/3.jpg", "amenities": ["kitchen"], "guests": 4}
]"#;

struct Harness {
    _dir: TempDir,
    dispatcher: DirectiveDispatcher,
    bookings: Arc<SqlBookingRepository>,
}

async fn harness() -> Harness {
    let dir = TempDir::new().expect("tempdir");
    let catalog_path = dir.path().join("houses.json");
    fs::write(&catalog_path, CATALOG).expect("write catalog");

    let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
    migrations::run_pending(&pool).await.expect("migrations");

    let bookings = Arc::new(SqlBookingRepository::new(pool));
    let dispatcher =
        DirectiveDispatcher::new(Arc::new(FileCatalog::new(catalog_path)), bookings.clone());

    Harness { _dir: dir, dispatcher, bookings }
}

#[tokio::test]
async fn house_list_directive_ranks_file_catalog() {
    let harness = harness().await;

    let result = harness
        .dispatcher
        .scan_and_dispatch("Let me check.\n<HOUSE_LIST_DATA>{\"guests\": 2}</HOUSE_LIST_DATA>")
        .await;

    let DispatchResult::Options(options) = result else {
        panic!("expected options, got {result:?}");
    };
    let names = options.iter().map(|option| option.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Garden Bungalow", "Pool Villa", "Family House"]);
}

#[tokio::test]
async fn booking_directive_writes_one_pending_row() {
    let harness = harness().await;
    let reply = r#"Thanks Jane!
<BOOKING_DATA>{"resort_name": "Pool Villa", "check_in": "2026-12-07", "check_out": "",
"guests": 2, "total_price": 0, "customer_name": "Jane Doe", "phone_number": "+1234567890"}</BOOKING_DATA>"#;

    let result = harness.dispatcher.scan_and_dispatch(reply).await;

    assert_eq!(result, DispatchResult::Message(BOOKING_CONFIRMATION.to_string()));
    let stored = harness.bookings.list_all().await.expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, BookingStatus::Pending);
    assert_eq!(stored[0].customer_name, "Jane Doe");
}

#[tokio::test]
async fn invalid_booking_leaves_table_empty() {
    let harness = harness().await;
    let reply = r#"<BOOKING_DATA>{"resort_name": "Pool Villa", "check_in": "07/12/2026",
"guests": 2, "customer_name": "Jane Doe", "phone_number": "+1234567890"}</BOOKING_DATA>"#;

    let result = harness.dispatcher.scan_and_dispatch(reply).await;

    assert!(matches!(result, DispatchResult::Error(ref error) if error.is_client_error()));
    assert_eq!(harness.bookings.count().await.expect("count"), 0);
}
