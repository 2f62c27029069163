use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hubspot",
    about = "HubSpot CRM connector CLI",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Private-app access token; defaults to HUBSPOT_ACCESS_TOKEN
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Override the HubSpot API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search CRM records matching a query
    Search(SearchArgs),
    /// Create a CRM record
    Create(CreateArgs),
    /// Update the CRM record matched by a query
    Update(UpdateArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// CRM object type, e.g. contacts, companies, deals, tickets
    #[arg(long)]
    pub object: String,

    /// Query JSON, e.g. '{"where":{"left":"domain","op":"=","right":"example.com"}}'
    #[arg(long)]
    pub query: String,

    /// Properties to select
    #[arg(long, value_delimiter = ',', required = true)]
    pub fields: Vec<String>,

    /// Property to order results by
    #[arg(long)]
    pub order_by: Option<String>,

    /// Sort in descending order
    #[arg(long, requires = "order_by")]
    pub descending: bool,
}

#[derive(Args)]
pub struct CreateArgs {
    /// CRM object type, e.g. contacts, companies, deals, tickets
    #[arg(long)]
    pub object: String,

    /// Properties JSON object, e.g. '{"email":"jane@example.com"}'
    #[arg(long)]
    pub properties: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// CRM object type, e.g. contacts, companies, deals, tickets
    #[arg(long)]
    pub object: String,

    /// Query JSON selecting the record to update
    #[arg(long)]
    pub query: String,

    /// Properties JSON object with the new values
    #[arg(long)]
    pub properties: String,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
