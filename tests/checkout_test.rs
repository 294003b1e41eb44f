//! Checkout flow against mocked stores, for the failures real actors never produce.

use savor_safari::checkout::{CheckoutError, PurchaseOrchestrator};
use savor_safari::clients::{ListingClient, PurchaseClient};
use savor_safari::framework::mock::{create_mock_client, expect_action, expect_get, MockClient};
use savor_safari::framework::FrameworkError;
use savor_safari::listing_actor::{ListingAction, ListingActionResult, ListingError};
use savor_safari::model::{
    Listing, ListingCreate, ListingId, ListingMetadata, Purchase, PurchaseId, PurchaseRequest,
};

const PASTA: ListingId = ListingId(1);

fn pasta(available: u32, purchase_count: u32) -> Listing {
    let mut listing = Listing::new(
        PASTA,
        ListingCreate {
            name: "Pasta".into(),
            available_quantity: available,
            owner: "chef@example.com".into(),
            price: 12.5,
            metadata: ListingMetadata::default(),
        },
    );
    listing.purchase_count = purchase_count;
    listing
}

fn request(quantity: i64) -> PurchaseRequest {
    PurchaseRequest {
        food_id: Some(PASTA),
        email: "a@b.com".into(),
        quantity: Some(quantity),
        ..Default::default()
    }
}

fn orchestrator(
    listings: &MockClient<Listing>,
    purchases: &MockClient<Purchase>,
) -> PurchaseOrchestrator {
    PurchaseOrchestrator::new(
        ListingClient::new(listings.client()),
        PurchaseClient::new(purchases.client()),
    )
}

#[tokio::test]
async fn test_invalid_quantity_touches_no_store() {
    let listings = MockClient::<Listing>::new();
    let purchases = MockClient::<Purchase>::new();
    let orchestrator = orchestrator(&listings, &purchases);

    for quantity in [0, -1] {
        let result = orchestrator.purchase("a@b.com", request(quantity)).await;
        assert!(matches!(result, Err(CheckoutError::Validation(_))));
    }

    assert_eq!(listings.received(), 0);
    assert_eq!(purchases.received(), 0);
}

#[tokio::test]
async fn test_identity_mismatch_is_forbidden() {
    let listings = MockClient::<Listing>::new();
    let purchases = MockClient::<Purchase>::new();
    let orchestrator = orchestrator(&listings, &purchases);

    let result = orchestrator.purchase("mallory@b.com", request(1)).await;
    assert!(matches!(result, Err(CheckoutError::Forbidden(_))));
    assert_eq!(listings.received(), 0);
}

#[tokio::test]
async fn test_success_stores_submitted_fields() {
    let mut listings = MockClient::<Listing>::new();
    let mut purchases = MockClient::<Purchase>::new();
    listings.expect_get(PASTA).return_ok(Some(pasta(5, 2)));
    listings
        .expect_action(PASTA)
        .return_ok(ListingActionResult::Sell(pasta(2, 3)));
    purchases.expect_create().return_ok(PurchaseId(1));

    let purchase = orchestrator(&listings, &purchases)
        .purchase("a@b.com", request(3))
        .await
        .unwrap();

    assert_eq!(purchase.id, PurchaseId(1));
    assert_eq!(purchase.listing_id, PASTA);
    assert_eq!(purchase.food_name, "Pasta");
    assert_eq!(purchase.quantity, 3);
    assert_eq!(purchase.price, 12.5);
    listings.verify();
    purchases.verify();
}

#[tokio::test]
async fn test_insufficient_inventory_writes_no_purchase() {
    let mut listings = MockClient::<Listing>::new();
    let purchases = MockClient::<Purchase>::new();
    listings.expect_get(PASTA).return_ok(Some(pasta(2, 3)));
    listings
        .expect_action(PASTA)
        .return_err(FrameworkError::EntityError(Box::new(
            ListingError::InsufficientInventory {
                requested: 10,
                available: 2,
            },
        )));

    let result = orchestrator(&listings, &purchases)
        .purchase("a@b.com", request(10))
        .await;

    assert_eq!(
        result,
        Err(CheckoutError::InsufficientInventory {
            requested: 10,
            available: 2
        })
    );
    assert_eq!(purchases.received(), 0);
    listings.verify();
}

#[tokio::test]
async fn test_insert_failure_restocks_sold_quantity() {
    let (client, mut listing_requests) = create_mock_client::<Listing>(10);
    let mut purchases = MockClient::<Purchase>::new();
    purchases.expect_create().return_err(FrameworkError::ActorClosed);
    let orchestrator = PurchaseOrchestrator::new(
        ListingClient::new(client),
        PurchaseClient::new(purchases.client()),
    );

    let task = tokio::spawn(async move { orchestrator.purchase("a@b.com", request(3)).await });

    let (id, responder) = expect_get(&mut listing_requests)
        .await
        .expect("Expected Get request");
    assert_eq!(id, PASTA);
    responder.send(Ok(Some(pasta(5, 2)))).unwrap();

    let (id, action, responder) = expect_action(&mut listing_requests)
        .await
        .expect("Expected Sell request");
    assert_eq!(id, PASTA);
    assert_eq!(action, ListingAction::Sell { quantity: 3 });
    responder
        .send(Ok(ListingActionResult::Sell(pasta(2, 3))))
        .unwrap();

    let (id, action, responder) = expect_action(&mut listing_requests)
        .await
        .expect("Expected Restock request");
    assert_eq!(id, PASTA);
    assert_eq!(action, ListingAction::Restock { quantity: 3 });
    responder
        .send(Ok(ListingActionResult::Restock(pasta(5, 2))))
        .unwrap();

    assert!(matches!(task.await.unwrap(), Err(CheckoutError::Storage(_))));
    purchases.verify();
}

#[tokio::test]
async fn test_failed_compensation_is_partial_failure() {
    let mut listings = MockClient::<Listing>::new();
    let mut purchases = MockClient::<Purchase>::new();
    listings.expect_get(PASTA).return_ok(Some(pasta(5, 2)));
    listings
        .expect_action(PASTA)
        .return_ok(ListingActionResult::Sell(pasta(2, 3)));
    purchases.expect_create().return_err(FrameworkError::ActorClosed);
    listings
        .expect_action(PASTA)
        .return_err(FrameworkError::ActorClosed);

    let result = orchestrator(&listings, &purchases)
        .purchase("a@b.com", request(3))
        .await;

    match result {
        Err(CheckoutError::PartialFailure {
            listing, quantity, ..
        }) => {
            assert_eq!(listing, PASTA);
            assert_eq!(quantity, 3);
        }
        other => panic!("Expected PartialFailure, got {other:?}"),
    }
    listings.verify();
    purchases.verify();
}

#[tokio::test]
async fn test_name_lookup() {
    let mut listings = MockClient::<Listing>::new();
    let purchases = MockClient::<Purchase>::new();
    let by_name = PurchaseRequest {
        food_id: None,
        food_name: Some("Pasta".into()),
        ..request(1)
    };

    listings.expect_find().return_ok(vec![]);
    listings.expect_find().return_ok(vec![pasta(1, 0), pasta(1, 0)]);
    let orchestrator = orchestrator(&listings, &purchases);

    let missing = orchestrator.purchase("a@b.com", by_name.clone()).await;
    assert!(matches!(missing, Err(CheckoutError::ListingNotFound(_))));

    let ambiguous = orchestrator.purchase("a@b.com", by_name).await;
    assert!(matches!(ambiguous, Err(CheckoutError::Validation(_))));

    assert_eq!(purchases.received(), 0);
    listings.verify();
}
