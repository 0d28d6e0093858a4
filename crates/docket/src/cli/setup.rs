use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "docket",
    bin_name = "docket",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Fill document templates with business values and keep the orders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $DOCKET_DATA, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage document templates
    #[command(subcommand, display_order = 1, alias = "t")]
    Templates(TemplatesCommands),

    /// Place, view and export orders
    #[command(subcommand, display_order = 2, alias = "o")]
    Orders(OrdersCommands),

    /// Encode a local file as a data URL
    #[command(display_order = 3)]
    Upload {
        /// File to encode
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplatesCommands {
    /// List templates and where each one comes from
    #[command(display_order = 1, alias = "ls")]
    List,

    /// Show the effective definition of a template
    #[command(display_order = 2)]
    Show {
        /// Template key (e.g. packingInstructions)
        key: String,
    },

    /// Replace a template with a JSON definition
    #[command(display_order = 3)]
    Save {
        /// Template key
        key: String,

        /// JSON file holding the definition
        file: PathBuf,
    },

    /// List the identifiers fields can be bound to
    #[command(display_order = 4)]
    Fields,
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommands {
    /// List orders, sample order first
    #[command(display_order = 1, alias = "ls")]
    List,

    /// Show the document of an order
    #[command(display_order = 2)]
    View {
        /// Order number
        number: String,
    },

    /// Place an order from a template
    #[command(display_order = 3)]
    Place {
        /// Template key
        key: String,

        /// Order number
        number: String,

        /// JSON file with the business values
        #[arg(long, value_name = "FILE")]
        values: Option<PathBuf>,
    },

    /// Delete an order
    #[command(display_order = 4, alias = "rm")]
    Delete {
        /// Order number
        number: String,
    },

    /// Write the render request of an order to a file
    #[command(display_order = 5)]
    Export {
        /// Order number
        number: String,

        /// Output directory
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}
