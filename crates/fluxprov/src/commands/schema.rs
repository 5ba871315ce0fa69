//! Attribute tables. Needs no connection.

use serde::Serialize;

use fluxprov_core::{ResourceSchema, SchemaKind, catalog, provider};

use crate::cli::{GlobalOpts, SchemaArgs};
use crate::commands::resource::unknown_type;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Entry {
    kind: SchemaKind,
    #[serde(flatten)]
    schema: &'static ResourceSchema,
}

pub fn handle(args: &SchemaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let catalog = catalog();

    let entries: Vec<Entry> = match &args.type_name {
        None => std::iter::once(Entry {
            kind: SchemaKind::Provider,
            schema: catalog.provider,
        })
        .chain(catalog.resources.iter().map(|&schema| Entry {
            kind: SchemaKind::Resource,
            schema,
        }))
        .chain(catalog.data_sources.iter().map(|&schema| Entry {
            kind: SchemaKind::DataSource,
            schema,
        }))
        .collect(),
        Some(name) => {
            let type_name = provider::qualify(name);
            // The bucket and organization names exist as both kinds.
            let found: Vec<Entry> = catalog
                .resource(&type_name)
                .map(|schema| Entry {
                    kind: SchemaKind::Resource,
                    schema,
                })
                .into_iter()
                .chain(catalog.data_source(&type_name).map(|schema| Entry {
                    kind: SchemaKind::DataSource,
                    schema,
                }))
                .collect();
            if found.is_empty() {
                let known: Vec<_> = catalog
                    .resources
                    .iter()
                    .chain(&catalog.data_sources)
                    .copied()
                    .collect();
                return Err(unknown_type("resource or data source", type_name, &known));
            }
            found
        }
    };

    let out = output::render(&global.output, &entries)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
