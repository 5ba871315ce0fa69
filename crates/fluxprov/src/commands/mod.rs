//! Command dispatch: CLI args -> mapper operations -> output formatting.

pub mod config_cmd;
pub mod lookup;
pub mod resource;
pub mod schema;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

use resource::Operation;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Create(args) => {
            resource::handle(&args.resource_type, Operation::create(&args)?, global).await
        }
        Command::Read(args) => {
            resource::handle(&args.resource_type, Operation::read(&args)?, global).await
        }
        Command::Update(args) => {
            resource::handle(&args.resource_type, Operation::update(&args)?, global).await
        }
        Command::Delete(args) => {
            resource::handle(&args.resource_type, Operation::delete(&args)?, global).await
        }
        Command::Lookup(args) => lookup::handle(&args, global).await,
        Command::Ready => lookup::handle_ready(global).await,
        // Neither of these needs a connection
        Command::Schema(args) => schema::handle(&args, global),
        Command::Config(args) => config_cmd::handle(&args, global),
    }
}
