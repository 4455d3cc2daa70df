//! End-to-end dine-in flow against a running Saltbee backend.
//!
//! ```bash
//! SALTBEE_API_URL=http://localhost:8080 cargo run --example dine_in_flow
//! ```
//!
//! Simulates a customer scanning the table code, filling a cart from the
//! menu, confirming checkout, and asking for the bill.

use anyhow::Result;
use saltbee_client::{
    CartContainer, Checkout, ClientConfig, ClientStore, HttpClient, KeyValueStore, OrderHistory,
    OrderingApi, PaymentSelection, ScanCoordinator, SessionContainer,
};
use saltbee_client::scan::NoopScanner;
use shared::order::{CartItem, PaymentMethod};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let api: Arc<dyn OrderingApi> = Arc::new(HttpClient::new(&config)?);
    let store: Arc<dyn KeyValueStore> = Arc::new(ClientStore::open_in_memory()?);

    let mut session = SessionContainer::new(api.clone(), store.clone());
    let mut cart = CartContainer::new(store.clone());
    let mut history = OrderHistory::new(store.clone());

    // Pretend the camera decoded the code printed on table 12
    let mut scan = ScanCoordinator::new(Box::new(NoopScanner), store.clone());
    let outcome = scan
        .handle_decode("SALTBEE-TABLE-12", &mut session, None)
        .await;
    println!("scan: {outcome:?}");

    // Pick the first two dishes off the menu
    let menu = api.menu_items().await?;
    for item in menu.iter().take(2) {
        cart.add_item(CartItem::from(item));
    }
    println!(
        "cart: {} item(s), total {}",
        cart.total_items(),
        cart.total_price()
    );

    let checkout = Checkout::new(api.clone());
    let confirmed = checkout
        .confirm(
            &mut cart,
            &mut session,
            &mut history,
            PaymentSelection::pay_later(PaymentMethod::Cash),
        )
        .await?;
    println!("checkout: {confirmed:?}");

    if let Some(order) = session.current_order() {
        println!(
            "server order {} is {}",
            order.order_id,
            order.status.label()
        );
    }

    session.request_bill().await?;
    println!("bill requested for table {:?}", session.table_number());

    Ok(())
}
