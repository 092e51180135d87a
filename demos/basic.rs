//! Basic example demonstrating the Pipedrive client.
//!
//! Run with:
//! ```
//! PIPEDRIVE_API_TOKEN=your-token cargo run --example basic
//! ```

use pipeview::{
    get_pipelines, get_stages, summary, Deal, DealListQuery, DealSummary, Get, List, Person,
    PersonListQuery, PipedriveClient, Search,
};

#[tokio::main]
async fn main() -> pipeview::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Pipedrive client...");
    let client = PipedriveClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of deals
    println!("\n--- Listing Deals (first page) ---");
    let deals_page = Deal::list_page(&client, &DealListQuery::default(), 0, 10).await?;
    println!(
        "Found {} deals (more available: {})",
        deals_page.len(),
        deals_page.more
    );

    for deal in &deals_page {
        println!(
            "  - {} ({} {}, {})",
            deal.title,
            deal.value,
            deal.currency_or_default(),
            deal.status
        );
    }

    // Get a specific deal (using the first one from the list)
    if let Some(first_deal) = deals_page.items.first() {
        println!("\n--- Getting Deal Details ---");
        let deal = Deal::get(&client, first_deal.id).await?;
        println!("Deal: {}", deal.title);
        println!("  ID: {}", deal.id);
        println!("  Stage: {}", deal.stage_name.as_deref().unwrap_or("unknown"));
        println!("  Person: {}", deal.person_name.as_deref().unwrap_or("none"));

        // List the activities attached to this deal
        println!("\n--- Deal Activities ---");
        let activities = deal.activities(&client).await?;
        println!("Found {} activities", activities.len());

        for activity in activities.iter().take(5) {
            println!(
                "  - {} (done: {})",
                activity.subject.as_deref().unwrap_or("(no subject)"),
                activity.done
            );
        }
    }

    // Fetch the whole collection, tolerating partial failure
    println!("\n--- Collecting All Deals ---");
    let collected = Deal::collect_all(&client, &DealListQuery::default()).await;
    println!(
        "Collected {} deals in {} requests ({} errors tolerated)",
        collected.len(),
        collected.requests,
        collected.errors
    );

    // Aggregate them the way the dashboard does
    let summary = DealSummary::from_deals(&collected.items);
    println!(
        "Status breakdown: {} open, {} won, {} lost",
        summary.open, summary.won, summary.lost
    );
    for (currency, total) in &summary.value_by_currency {
        println!("Total value ({currency}): {total:.2}");
    }
    for deal in summary::recent(&collected.items, 3) {
        println!("Recent: {}", deal.title);
    }

    // Search for deals by term
    println!("\n--- Searching Deals ---");
    let hits = Deal::search(&client, "contract").await?;
    println!("Found {} deals matching 'contract'", hits.len());

    // List persons
    println!("\n--- Listing Persons ---");
    let persons_page = Person::list_page(&client, &PersonListQuery::default(), 0, 10).await?;
    for person in &persons_page {
        println!(
            "  - {} <{}>",
            person.name,
            person.primary_email().unwrap_or("no email")
        );
    }

    // Account configuration: pipelines and their stages
    println!("\n--- Pipelines ---");
    let pipelines = get_pipelines(&client).await?;
    for pipeline in &pipelines {
        let stages = get_stages(&client, Some(pipeline.id)).await?;
        println!("  {} ({} stages)", pipeline.name, stages.len());
    }

    println!("\nDone!");
    Ok(())
}
