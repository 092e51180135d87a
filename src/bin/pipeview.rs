//! Pipedrive dashboard CLI binary.
//!
//! A command-line interface for browsing a Pipedrive account.

use clap::Parser;
use pipeview::cli::{Cli, Command, Entity, SearchEntity, StatusArg};
use pipeview::explorer::{self, Endpoint};
use pipeview::output::{render_dashboard, PrettyPrint};
use pipeview::{
    get_pipelines, get_stages, summary, Activity, ActivityListQuery, Collected, Deal,
    DealListQuery, DealStatusFilter, DealSummary, Get, List, Organization,
    OrganizationListQuery, Page, Person, PersonListQuery, PipedriveClient, Search,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let client = match PipedriveClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set PIPEDRIVE_API_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &PipedriveClient, cli: Cli) -> pipeview::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::List {
            entity,
            start,
            limit,
            status,
            sort,
            done,
            activity_type,
            pipeline,
        } => {
            let args = ListArgs {
                start: start.unwrap_or(0),
                limit: limit.unwrap_or(20),
                status,
                sort,
                done,
                activity_type,
                pipeline,
            };
            handle_list(client, entity, args, cli.json).await
        }
        Command::ListAll {
            entity,
            status,
            sort,
        } => handle_list_all(client, entity, status, sort, cli.json).await,
        Command::Search { term, entity } => handle_search(client, &term, entity, cli.json).await,
        Command::Explore { endpoint, id } => handle_explore(client, endpoint, id).await,
        Command::Dashboard => handle_dashboard(client, cli.json).await,
        Command::Serve { addr } => pipeview::server::serve(client.clone(), addr).await,
    }
}

struct ListArgs {
    start: u32,
    limit: u32,
    status: Option<StatusArg>,
    sort: Option<String>,
    done: Option<bool>,
    activity_type: Option<String>,
    pipeline: Option<u64>,
}

async fn handle_get(
    client: &PipedriveClient,
    entity: Entity,
    id: u64,
    json: bool,
) -> pipeview::Result<()> {
    match entity {
        Entity::Deal => {
            let deal = Deal::get(client, id).await?;
            output_single(&deal, json)?;
        }
        Entity::Person => {
            let person = Person::get(client, id).await?;
            output_single(&person, json)?;
        }
        Entity::Organization => {
            let org = Organization::get(client, id).await?;
            output_single(&org, json)?;
        }
        Entity::Activity => {
            let activity = Activity::get(client, id).await?;
            output_single(&activity, json)?;
        }
        Entity::Pipeline | Entity::Stage => {
            eprintln!("Error: Pipelines and stages can only be listed");
            eprintln!("Hint: Use 'pipeview list pipelines' or 'pipeview list stages'");
            return Err(pipeview::PipedriveError::InvalidRequest(
                "get not supported for this entity".to_string(),
            ));
        }
    }
    Ok(())
}

async fn handle_list(
    client: &PipedriveClient,
    entity: Entity,
    args: ListArgs,
    json: bool,
) -> pipeview::Result<()> {
    match entity {
        Entity::Deal => {
            let query = deal_query(args.status, args.sort);
            let page = Deal::list_page(client, &query, args.start, args.limit).await?;
            output_page(&page, json, |r| DealRow::from(r))?;
        }
        Entity::Person => {
            let query = PersonListQuery { sort: args.sort };
            let page = Person::list_page(client, &query, args.start, args.limit).await?;
            output_page(&page, json, |r| PersonRow::from(r))?;
        }
        Entity::Organization => {
            let query = OrganizationListQuery { sort: args.sort };
            let page = Organization::list_page(client, &query, args.start, args.limit).await?;
            output_page(&page, json, |r| OrganizationRow::from(r))?;
        }
        Entity::Activity => {
            let query = ActivityListQuery {
                done: args.done.map(u8::from),
                activity_type: args.activity_type,
            };
            let page = Activity::list_page(client, &query, args.start, args.limit).await?;
            output_page(&page, json, |r| ActivityRow::from(r))?;
        }
        Entity::Pipeline => {
            let pipelines = get_pipelines(client).await?;
            output_list(&pipelines, json, |r| PipelineRow::from(r))?;
        }
        Entity::Stage => {
            let stages = get_stages(client, args.pipeline).await?;
            output_list(&stages, json, |r| StageRow::from(r))?;
        }
    }
    Ok(())
}

async fn handle_list_all(
    client: &PipedriveClient,
    entity: Entity,
    status: Option<StatusArg>,
    sort: Option<String>,
    json: bool,
) -> pipeview::Result<()> {
    match entity {
        Entity::Deal => {
            let query = deal_query(status, sort);
            let collected = Deal::collect_all(client, &query).await;
            output_collected(&collected, json, |r| DealRow::from(r))?;
        }
        Entity::Person => {
            let query = PersonListQuery { sort };
            let collected = Person::collect_all(client, &query).await;
            output_collected(&collected, json, |r| PersonRow::from(r))?;
        }
        Entity::Organization => {
            let query = OrganizationListQuery { sort };
            let collected = Organization::collect_all(client, &query).await;
            output_collected(&collected, json, |r| OrganizationRow::from(r))?;
        }
        Entity::Activity => {
            let collected = Activity::collect_all(client, &Default::default()).await;
            output_collected(&collected, json, |r| ActivityRow::from(r))?;
        }
        Entity::Pipeline | Entity::Stage => {
            eprintln!("Error: Pipelines and stages are not paginated");
            eprintln!("Hint: Use 'pipeview list pipelines' or 'pipeview list stages'");
            return Err(pipeview::PipedriveError::InvalidRequest(
                "list-all not supported for this entity".to_string(),
            ));
        }
    }
    Ok(())
}

async fn handle_search(
    client: &PipedriveClient,
    term: &str,
    entity: SearchEntity,
    json: bool,
) -> pipeview::Result<()> {
    match entity {
        SearchEntity::Deals => {
            let hits = Deal::search(client, term).await?;
            output_list(&hits, json, |r| DealRow::from(r))?;
        }
        SearchEntity::Persons => {
            let hits = Person::search(client, term).await?;
            output_list(&hits, json, |r| PersonRow::from(r))?;
        }
    }
    Ok(())
}

async fn handle_explore(
    client: &PipedriveClient,
    endpoint: Option<Endpoint>,
    id: Option<u64>,
) -> pipeview::Result<()> {
    let Some(endpoint) = endpoint else {
        print_catalog();
        return Ok(());
    };

    let value = explorer::explore(client, endpoint, id).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn print_catalog() {
    let mut current = None;
    for endpoint in Endpoint::ALL {
        let category = endpoint.category();
        if current != Some(category) {
            if current.is_some() {
                println!();
            }
            println!("{}", category.title());
            current = Some(category);
        }
        let id_marker = if endpoint.needs_id() { " (needs --id)" } else { "" };
        println!("  {:<20} {}{}", endpoint.key(), endpoint.description(), id_marker);
    }
}

async fn handle_dashboard(client: &PipedriveClient, json: bool) -> pipeview::Result<()> {
    let collected = Deal::collect_all(client, &DealListQuery::default()).await;
    let summary = DealSummary::from_deals(&collected.items);
    let recent = summary::recent(&collected.items, 5);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "summary": summary,
                "recent": recent,
                "requests": collected.requests,
                "errors": collected.errors,
            }))?
        );
    } else {
        println!("{}", render_dashboard(&summary, &recent));
        if collected.errors > 0 {
            println!(
                "\nWarning: partial data ({} failed requests)",
                collected.errors
            );
        }
    }
    Ok(())
}

fn deal_query(status: Option<StatusArg>, sort: Option<String>) -> DealListQuery {
    DealListQuery {
        status: Some(
            status
                .map(DealStatusFilter::from)
                .unwrap_or(DealStatusFilter::AllNotDeleted),
        ),
        sort,
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> pipeview::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> pipeview::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        if page.more {
            println!("\nOffset {} (more available)", page.start);
        } else {
            println!("\nOffset {} (end)", page.start);
        }
    }
    Ok(())
}

fn output_collected<T, R, F>(
    collected: &Collected<T>,
    json: bool,
    to_row: F,
) -> pipeview::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(collected)?);
    } else {
        let rows: Vec<R> = collected.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!(
            "\n{} records in {} requests ({} errors tolerated)",
            collected.len(),
            collected.requests,
            collected.errors
        );
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> pipeview::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct DealRow {
    id: u64,
    title: String,
    value: String,
    status: String,
    stage: String,
    person: String,
}

impl From<&Deal> for DealRow {
    fn from(d: &Deal) -> Self {
        Self {
            id: d.id,
            title: d.title.clone(),
            value: format!("{} {}", d.value, d.currency_or_default()),
            status: d.status.to_string(),
            stage: d.stage_name.clone().unwrap_or_default(),
            person: d.person_name.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct PersonRow {
    id: u64,
    name: String,
    email: String,
    #[tabled(rename = "organization")]
    org: String,
}

impl From<&Person> for PersonRow {
    fn from(p: &Person) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            email: p.primary_email().unwrap_or_default().to_string(),
            org: p.org_name.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct OrganizationRow {
    id: u64,
    name: String,
    people: String,
    #[tabled(rename = "open deals")]
    open_deals: String,
}

impl From<&Organization> for OrganizationRow {
    fn from(o: &Organization) -> Self {
        Self {
            id: o.id,
            name: o.name.clone(),
            people: o.people_count.map(|c| c.to_string()).unwrap_or_default(),
            open_deals: o
                .open_deals_count
                .map(|c| c.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ActivityRow {
    id: u64,
    subject: String,
    #[tabled(rename = "type")]
    kind: String,
    due: String,
    done: String,
}

impl From<&Activity> for ActivityRow {
    fn from(a: &Activity) -> Self {
        Self {
            id: a.id,
            subject: a.subject.clone().unwrap_or_default(),
            kind: a.activity_type.clone().unwrap_or_default(),
            due: a.due_date.map(|d| d.to_string()).unwrap_or_default(),
            done: if a.done { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Tabled)]
struct PipelineRow {
    id: u64,
    name: String,
    active: String,
}

impl From<&pipeview::Pipeline> for PipelineRow {
    fn from(p: &pipeview::Pipeline) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            active: if p.active { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Tabled)]
struct StageRow {
    id: u64,
    name: String,
    #[tabled(rename = "pipeline")]
    pipeline_id: String,
}

impl From<&pipeview::Stage> for StageRow {
    fn from(s: &pipeview::Stage) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            pipeline_id: s.pipeline_id.map(|i| i.to_string()).unwrap_or_default(),
        }
    }
}
