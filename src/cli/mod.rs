//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the pipeview binary.

use std::net::SocketAddr;

use clap::{Parser, Subcommand, ValueEnum};

use crate::explorer::Endpoint;
use crate::models::DealStatusFilter;

/// Pipedrive dashboard command-line interface.
#[derive(Parser, Debug)]
#[command(name = "pipeview", about = "Pipedrive dashboard CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The numeric entity ID.
        id: u64,
    },

    /// List entities (one page) with optional filtering.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Offset of the first item.
        #[arg(long)]
        start: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        limit: Option<u32>,

        /// Deal status filter.
        #[arg(long)]
        status: Option<StatusArg>,

        /// Sort order (e.g., "add_time DESC").
        #[arg(long)]
        sort: Option<String>,

        /// Filter activities by completion.
        #[arg(long)]
        done: Option<bool>,

        /// Filter activities by type key (e.g., "call").
        #[arg(long = "type")]
        activity_type: Option<String>,

        /// Pipeline ID (restricts stage listing to one pipeline).
        #[arg(long)]
        pipeline: Option<u64>,
    },

    /// Fetch a whole collection, tolerating partial failure.
    ListAll {
        /// The type of entity to fetch.
        entity: Entity,

        /// Deal status filter.
        #[arg(long)]
        status: Option<StatusArg>,

        /// Sort order.
        #[arg(long)]
        sort: Option<String>,
    },

    /// Search deals or persons by term.
    Search {
        /// The term to look for.
        term: String,

        /// Which collection to search.
        #[arg(long, default_value = "deals")]
        entity: SearchEntity,
    },

    /// Browse the upstream endpoint catalog as raw JSON.
    Explore {
        /// Catalog endpoint; omit to print the catalog.
        endpoint: Option<Endpoint>,

        /// Entity ID, required by relation endpoints.
        #[arg(long)]
        id: Option<u64>,
    },

    /// Print an aggregate dashboard over all deals.
    Dashboard,

    /// Run the dashboard HTTP proxy.
    Serve {
        /// Listen address.
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A sales deal.
    #[value(alias = "deals")]
    Deal,
    /// A contact person.
    #[value(alias = "persons")]
    Person,
    /// A company.
    #[value(alias = "organizations", alias = "org")]
    Organization,
    /// A call, meeting, or task.
    #[value(alias = "activities")]
    Activity,
    /// A sales funnel.
    #[value(alias = "pipelines")]
    Pipeline,
    /// A funnel stage.
    #[value(alias = "stages")]
    Stage,
}

/// Collections that support term search.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEntity {
    Deals,
    Persons,
}

/// Deal status filter argument.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusArg {
    Open,
    Won,
    Lost,
    Deleted,
    AllNotDeleted,
}

impl From<StatusArg> for DealStatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => DealStatusFilter::Open,
            StatusArg::Won => DealStatusFilter::Won,
            StatusArg::Lost => DealStatusFilter::Lost,
            StatusArg::Deleted => DealStatusFilter::Deleted,
            StatusArg::AllNotDeleted => DealStatusFilter::AllNotDeleted,
        }
    }
}
