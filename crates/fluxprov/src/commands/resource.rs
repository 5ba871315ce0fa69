//! Create / read / update / delete handlers.

use serde_json::Value;
use tracing::{debug, warn};

use fluxprov_core::resources::{
    AuthorizationResource, BucketResource, DbrpMappingResource, LegacyAuthorizationResource,
    OrganizationResource, ScraperResource,
};
use fluxprov_core::{
    Connection, CoreError, Instance, Resource, ResourceSchema, catalog, decode_attrs, provider,
};

use crate::cli::{CreateArgs, GlobalOpts, StateArgs, UpdateArgs};
use crate::commands::util::{StateDoc, read_json, read_state};
use crate::error::CliError;
use crate::output;

/// One lifecycle operation with its decoded inputs.
#[derive(Debug)]
pub enum Operation {
    Create { attrs: Value },
    Read { id: String, attrs: Value },
    Update { id: String, prior: Value, desired: Value },
    Delete { id: String, attrs: Value },
}

impl Operation {
    pub fn create(args: &CreateArgs) -> Result<Self, CliError> {
        Ok(Self::Create {
            attrs: read_json(&args.attrs)?,
        })
    }

    pub fn read(args: &StateArgs) -> Result<Self, CliError> {
        let (id, attrs) = read_state(&args.state)?;
        Ok(Self::Read { id, attrs })
    }

    pub fn update(args: &UpdateArgs) -> Result<Self, CliError> {
        let (id, prior) = read_state(&args.state)?;
        let desired = read_json(&args.attrs)?;
        Ok(Self::Update { id, prior, desired })
    }

    pub fn delete(args: &StateArgs) -> Result<Self, CliError> {
        let (id, attrs) = read_state(&args.state)?;
        Ok(Self::Delete { id, attrs })
    }
}

pub(crate) fn unknown_type(
    kind: &'static str,
    type_name: String,
    known: &[&'static ResourceSchema],
) -> CliError {
    CliError::UnknownType {
        kind,
        type_name,
        available: known
            .iter()
            .map(|s| s.type_name)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Resolve the type, connect, run the operation, print the new state.
///
/// A failed operation still prints the state when the instance holds an id,
/// e.g. a create whose follow-up refresh failed.
pub async fn handle(resource_type: &str, op: Operation, global: &GlobalOpts) -> Result<(), CliError> {
    let type_name = provider::qualify(resource_type);
    let catalog = catalog();
    let Some(schema) = catalog.resource(&type_name) else {
        return Err(unknown_type("resource", type_name, &catalog.resources));
    };

    let config = crate::config::provider_config(global)?;
    let conn = Connection::connect(&config).await?;
    debug!(type_name = schema.type_name, ?op, "running operation");

    let outcome = match schema.type_name {
        "influxdb-v2_authorization" => run(AuthorizationResource, op, &conn).await?,
        "influxdb-v2_bucket" => run(BucketResource, op, &conn).await?,
        "influxdb-v2_dbrp_mapping" => run(DbrpMappingResource, op, &conn).await?,
        "influxdb-v2_legacy_authorization" => run(LegacyAuthorizationResource, op, &conn).await?,
        "influxdb-v2_organization" => run(OrganizationResource, op, &conn).await?,
        "influxdb-v2_scraper" => run(ScraperResource, op, &conn).await?,
        _ => return Err(unknown_type("resource", type_name, &catalog.resources)),
    };

    if let Err(err) = outcome.result {
        if let Some(id) = &outcome.state.id {
            warn!(type_name = schema.type_name, %id, "operation failed, printing last known state");
            let out = output::render(&global.output, &outcome.state)?;
            output::print_output(&out, global.quiet);
        }
        return Err(err.into());
    }

    let out = output::render(&global.output, &outcome.state)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// What to do with an instance once it is built.
enum Action<A> {
    Create,
    Read,
    Update(A),
    Delete,
}

/// The instance's state after an operation, and whether it succeeded.
struct Outcome {
    state: StateDoc<Value>,
    result: Result<(), CoreError>,
}

async fn run<R: Resource>(resource: R, op: Operation, conn: &Connection) -> Result<Outcome, CliError> {
    let type_name = resource.schema().type_name;

    let (mut instance, action) = match op {
        Operation::Create { attrs } => (
            Instance::new(resource, decode_attrs(type_name, attrs)?),
            Action::Create,
        ),
        Operation::Read { id, attrs } => (
            Instance::existing(resource, id, decode_attrs(type_name, attrs)?),
            Action::Read,
        ),
        Operation::Update { id, prior, desired } => (
            Instance::existing(resource, id, decode_attrs(type_name, prior)?),
            Action::Update(decode_attrs(type_name, desired)?),
        ),
        Operation::Delete { id, attrs } => (
            Instance::existing(resource, id, decode_attrs(type_name, attrs)?),
            Action::Delete,
        ),
    };

    let result = match action {
        Action::Create => instance.create(conn).await,
        Action::Read => instance.read(conn).await.map(|_| ()),
        Action::Update(desired) => instance.update(conn, desired).await,
        Action::Delete => instance.delete(conn).await,
    };

    let (id, attrs) = instance.into_parts();
    Ok(Outcome {
        state: StateDoc {
            id,
            attrs: serde_json::to_value(attrs)?,
        },
        result,
    })
}
