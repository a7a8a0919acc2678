//! Scripted walkthrough of the quoting flow against the in-memory backend.
//!
//! Run with `RUST_LOG=debug` to watch the session-level tracing as each step
//! executes.

use tracing::info;
use tracing_subscriber::EnvFilter;

use quoteflow_core::paging::{DraftPatch, SortDirection, SortKey};
use quoteflow_session::{
    CartSession, InMemoryBackend, PrintOutcome, SearchSession, SessionConfig,
};

fn dollars(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, (cents % 100).abs())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SessionConfig {
        // no keystrokes to debounce in a scripted run
        search_debounce_ms: 1,
        ..Default::default()
    };

    // ---- search ------------------------------------------------------------
    let mut search = SearchSession::new(InMemoryBackend::with_fixture_catalog(), config.clone())?;

    let ticket = search.request_search("genwatt");
    search.run_search(ticket).await;
    info!(
        rows = search.table().len(),
        pages = search.table().total_pages(),
        "search results"
    );

    search
        .table_mut()
        .apply_sort(SortKey::UnitPrice, SortDirection::Desc);
    for row in search.table().visible_rows() {
        info!(
            name = row.name.as_deref().unwrap_or("-"),
            code = row.product_code.as_deref().unwrap_or("-"),
            price = %dollars(row.unit_price_cents.unwrap_or(0)),
            "row"
        );
    }

    // the user typed a quantity of 2 into the top row but never saved it
    let top_row_id = search.table().rows()[0].id.clone();
    let drafts = vec![DraftPatch {
        id: top_row_id.clone(),
        quantity: Some(2),
        ..Default::default()
    }];
    let mut payload = search
        .add_to_cart_payload(&top_row_id, &drafts)
        .expect("row came from the table");
    payload.opportunity_id = Some("006-demo".to_string());

    // ---- cart --------------------------------------------------------------
    let mut backend = InMemoryBackend::with_fixture_catalog();
    backend.add_opportunity("006-demo", InMemoryBackend::sample_addresses());
    let mut cart = CartSession::new(backend, config)?;

    let totals = cart.add_item(payload).await?;
    info!(
        lines = totals.line_count,
        quantity = totals.total_quantity,
        subtotal = %dollars(totals.subtotal_cents),
        "item added"
    );

    cart.set_discount_input("10");
    cart.set_terms("Net 30. Prices valid for 14 days.")?;

    let totals = cart.totals();
    info!(
        subtotal = %dollars(totals.subtotal_cents),
        tax = %dollars(totals.tax_cents),
        shipping = %dollars(totals.shipping_cents),
        grand = %dollars(totals.grand_total_cents),
        "cart totals"
    );

    let created = cart.create_quote("006-demo").await?;
    info!(quote = %created.quote_number, "quote created");

    match cart.generate_quote_document().await {
        PrintOutcome::Document { url } => info!(%url, "document ready"),
        PrintOutcome::BasicPrint { payload, .. } => {
            info!(items = payload.items.len(), "basic print fallback")
        }
        PrintOutcome::NothingToPrint => info!("nothing to print"),
    }

    let n = cart.submit_for_approval();
    info!(title = %n.title, message = %n.message, "submit");

    Ok(())
}
