use tracing::{error, info, warn, Instrument};

use cart_aggregator::app_system::{setup_tracing, AppConfig, CartSystem};
use cart_aggregator::clients::QuantityEdit;
use cart_aggregator::domain::{CheckoutRequest, Customer, ProductCreate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    setup_tracing(&config.log_filter);

    info!("Starting order entry demo");
    let system = CartSystem::new(&config);

    let span = tracing::info_span!("catalog_seed");
    let product_ids = async {
        let mut ids = Vec::new();
        for (name, price) in [("Espresso", 2.5), ("Cappuccino", 3.5), ("Croissant", 2.0)] {
            ids.push(
                system
                    .catalog_client
                    .create_product(ProductCreate::new(name, price))
                    .await?,
            );
        }
        Ok::<_, cart_aggregator::catalog::CatalogError>(ids)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("order_entry");
    async {
        let entry = &system.order_entry_client;
        for id in [&product_ids[0], &product_ids[1], &product_ids[0], &product_ids[2]] {
            let snapshot = entry.select_product(id.clone()).await?;
            info!(total = snapshot.total, items = snapshot.items.len(), "Product selected");
        }

        let snapshot = entry.edit_price(product_ids[1].clone(), 3.0).await?;
        info!(total = snapshot.total, "Price edited");

        match entry.edit_quantity(product_ids[2].clone(), 0).await? {
            QuantityEdit::RemovalScheduled(pending) => {
                let snapshot = pending.wait().await?;
                info!(total = snapshot.total, "Row removed");
            }
            QuantityEdit::Applied(snapshot) => warn!(total = snapshot.total, "Expected a removal"),
        }
        Ok::<_, cart_aggregator::error::OrderEntryError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("checkout");
    let customer = Customer::new("Alice", "alice@example.com", "555-0100");
    match system
        .checkout_client
        .confirm(CheckoutRequest::cash(customer, 20.0))
        .instrument(span)
        .await
    {
        Ok(receipt) => info!(receipt = %serde_json::to_string(&receipt)?, "Order confirmed"),
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
