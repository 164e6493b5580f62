//! Command dispatch: bridges CLI args -> api client calls -> output formatting.

pub mod config_cmd;
pub mod content;
pub mod offers;
pub mod rate_codes;
pub mod search;

use staywire_api::HotelClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a client-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &HotelClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Search(args) => search::handle(client, args, global).await,
        Command::Offers(args) => offers::handle(client, args, global).await,
        Command::Offer(args) => offers::handle_detail(client, args, global).await,
        Command::Content(args) => content::handle(client, args, global).await,
        Command::RateCodes => rate_codes::handle(client, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
