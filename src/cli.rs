use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::dashboard::DEFAULT_CHART_PERIOD;
use crate::validation::FieldKind;

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Search-as-you-type client for the storefront product catalog")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Storefront origin, e.g. https://shop.example.com
    #[arg(long, global = true, env = "STOREFRONT_BASE_URL")]
    pub base_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Initial search text
    pub query: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive product search (default)
    #[command(visible_alias = "s")]
    Search {
        /// Initial search text
        query: Option<String>,
    },

    /// Add to or update the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },

    /// Admin dashboard: sales chart, active sessions and exports
    Dashboard {
        #[command(subcommand)]
        action: DashboardCommand,
    },

    /// Print the link a sortable column header points to
    SortUrl {
        /// Column to sort by
        column: String,

        /// Current query string, with or without the leading '?'
        #[arg(long, default_value = "")]
        query: String,
    },

    /// Print the link that clears sorting
    ResetSort {
        /// Current query string, with or without the leading '?'
        #[arg(long, default_value = "")]
        query: String,

        /// Page path used when no parameters remain
        #[arg(long, default_value = "/")]
        path: String,
    },

    /// Check a form field value
    Validate {
        /// Field type
        #[arg(value_enum)]
        kind: FieldKind,

        /// Value to check
        value: String,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: u64,
    },

    /// Set the quantity of a cart line
    Update {
        /// Cart item ID
        item_id: u64,

        /// New quantity
        quantity: u32,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum DashboardCommand {
    /// Switch the sales chart to another period and print its data
    Chart {
        /// Period to show, e.g. daily, weekly, monthly
        period: String,

        /// Period the chart currently shows
        #[arg(long, default_value = DEFAULT_CHART_PERIOD)]
        current: String,
    },

    /// Print the active sessions table
    Sessions {
        /// Keep reloading the table every minute
        #[arg(long)]
        watch: bool,
    },

    /// End a user session
    Terminate {
        /// Session ID
        session_id: String,
    },

    /// Print the CSV export link for a page
    ExportUrl {
        /// Current page URL
        url: String,
    },
}

impl Cli {
    /// Search text for the interactive mode, whichever way it was given
    pub fn initial_query(&self) -> Option<&str> {
        match &self.command {
            Some(Command::Search { query }) => query.as_deref(),
            _ => self.query.as_deref(),
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
