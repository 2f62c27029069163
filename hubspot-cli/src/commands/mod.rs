mod create;
mod search;
mod update;

use crate::argparse::{Cli, Commands};
pub use create::handle_create_command;
use hubspot_connector::{config, HubspotApi, HubspotIntegration};
pub use search::handle_search_command;
use std::error::Error;
pub use update::handle_update_command;

pub async fn handle_command(cli: Cli) -> Result<(), Box<dyn Error>> {
    let api = match (cli.token, cli.base_url) {
        (Some(token), Some(base_url)) => HubspotApi::with_config(base_url, token)?,
        (Some(token), None) => HubspotApi::with_config(config::BASE_URL, token)?,
        (None, Some(base_url)) => {
            HubspotApi::with_config(base_url, config::access_token_from_env()?)?
        }
        (None, None) => HubspotApi::new()?,
    };
    let integration = HubspotIntegration::with_api(api);

    match cli.command {
        Commands::Search(args) => handle_search_command(args, &integration).await,
        Commands::Create(args) => handle_create_command(args, &integration).await,
        Commands::Update(args) => handle_update_command(args, &integration).await,
    }
}
