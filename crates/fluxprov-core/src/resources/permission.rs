// Permission attributes shared by token and legacy authorizations.

use fluxprov_api::types::{Permission, PermissionResource};
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PermissionAction {
    Read,
    Write,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionResourceAttrs {
    /// Resource kind (`buckets`, `orgs`, `telegrafs`, ...).
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionAttrs {
    pub action: PermissionAction,
    pub resource: PermissionResourceAttrs,
}

impl From<&PermissionAttrs> for Permission {
    fn from(p: &PermissionAttrs) -> Self {
        Permission {
            action: p.action.to_string(),
            resource: PermissionResource {
                resource_type: p.resource.resource_type.clone(),
                id: p.resource.id.clone(),
                name: p.resource.name.clone(),
                org_id: p.resource.org_id.clone(),
                org: p.resource.org.clone(),
            },
        }
    }
}

pub(crate) fn to_wire(permissions: &[PermissionAttrs]) -> Vec<Permission> {
    permissions.iter().map(Permission::from).collect()
}

/// Project the server's permission list onto the declared shape.
///
/// The server fills in names (`org`, `name`) the declaration usually
/// leaves out. When every server permission matches a declared one on the
/// identifying fields (action, type, id, org id) and the counts agree, the
/// declaration is kept as-is; otherwise the server's list is reported so
/// the difference shows up as drift.
pub(crate) fn project(declared: &[PermissionAttrs], remote: &[Permission]) -> Vec<PermissionAttrs> {
    let remote_attrs: Vec<PermissionAttrs> = remote.iter().filter_map(from_wire).collect();

    let mut unmatched: Vec<&PermissionAttrs> = declared.iter().collect();
    let all_matched = remote_attrs.len() == declared.len()
        && remote_attrs.iter().all(|server| {
            match unmatched.iter().position(|d| same_target(d, server)) {
                Some(idx) => {
                    unmatched.swap_remove(idx);
                    true
                }
                None => false,
            }
        });

    if all_matched {
        declared.to_vec()
    } else {
        remote_attrs
    }
}

fn from_wire(p: &Permission) -> Option<PermissionAttrs> {
    Some(PermissionAttrs {
        action: p.action.parse().ok()?,
        resource: PermissionResourceAttrs {
            resource_type: p.resource.resource_type.clone(),
            id: p.resource.id.clone(),
            org_id: p.resource.org_id.clone(),
            org: p.resource.org.clone(),
            name: p.resource.name.clone(),
        },
    })
}

fn same_target(declared: &PermissionAttrs, server: &PermissionAttrs) -> bool {
    let optional_matches = |d: Option<&str>, s: Option<&str>| d.is_none() || d == s;

    declared.action == server.action
        && declared.resource.resource_type == server.resource.resource_type
        && optional_matches(declared.resource.id.as_deref(), server.resource.id.as_deref())
        && optional_matches(
            declared.resource.org_id.as_deref(),
            server.resource.org_id.as_deref(),
        )
}
