//! Data-source lookups and the `ready` shortcut.

use serde_json::Value;

use fluxprov_core::data::{BucketDataSource, OrganizationDataSource, ReadyDataSource};
use fluxprov_core::{Connection, DataSource, catalog, decode_attrs, provider};

use crate::cli::{GlobalOpts, LookupArgs};
use crate::commands::resource::unknown_type;
use crate::commands::util::read_json;
use crate::error::CliError;
use crate::output;

fn query(args: &LookupArgs) -> Result<Value, CliError> {
    match &args.query_file {
        Some(path) => read_json(path),
        None => serde_json::from_str(&args.query).map_err(|e| CliError::Validation {
            field: "--query".into(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

pub async fn handle(args: &LookupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let type_name = provider::qualify(&args.data_source);
    let catalog = catalog();
    let Some(schema) = catalog.data_source(&type_name) else {
        return Err(unknown_type("data source", type_name, &catalog.data_sources));
    };
    let query = query(args)?;

    let config = crate::config::provider_config(global)?;
    let conn = Connection::connect(&config).await?;

    let state = match schema.type_name {
        "influxdb-v2_bucket" => run(BucketDataSource, query, &conn).await?,
        "influxdb-v2_organization" => run(OrganizationDataSource, query, &conn).await?,
        "influxdb-v2_ready" => run(ReadyDataSource, query, &conn).await?,
        _ => return Err(unknown_type("data source", type_name, &catalog.data_sources)),
    };

    let out = output::render(&global.output, &state)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// `fluxprov ready`: the ready data source with no arguments.
pub async fn handle_ready(global: &GlobalOpts) -> Result<(), CliError> {
    let config = crate::config::provider_config(global)?;
    let conn = Connection::connect(&config).await?;
    let state = run(ReadyDataSource, Value::Object(Default::default()), &conn).await?;

    let out = output::render(&global.output, &state)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn run<D: DataSource>(source: D, query: Value, conn: &Connection) -> Result<Value, CliError> {
    let query: D::Query = decode_attrs(source.schema().type_name, query)?;
    let state = source.read(conn, &query).await?;
    Ok(serde_json::to_value(state)?)
}
