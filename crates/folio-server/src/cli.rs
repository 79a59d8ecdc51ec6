use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `folio` binary.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Folio - portfolio repository cache and API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Fetch from GitHub, merge with the cache, and print the result.
    Sync,
    /// Print the cached repositories without contacting GitHub.
    List,
    /// Update fields of one cached repository.
    Update(UpdateArgs),
    /// Set the image reference of one cached repository.
    Image(ImageArgs),
    /// Delete the cached document.
    Clear,
    /// Print the JSON Schema of the cached document.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides `server.bind`)
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    /// Repository id
    #[arg(long)]
    pub id: u64,

    /// Field assignment as `key=value`; values are read as JSON when they parse, text otherwise
    #[arg(long = "field", value_name = "KEY=VALUE", required = true)]
    pub fields: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ImageArgs {
    /// Repository id
    #[arg(long)]
    pub id: u64,

    /// New image reference
    pub image: String,
}
