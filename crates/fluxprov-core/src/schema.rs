// Static attribute tables for every resource and data source type.
//
// The tables drive force-new detection in the lifecycle driver and are
// printed verbatim by the CLI `schema` command.

use serde::Serialize;
use serde_json::Value;

/// Value kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttributeKind {
    String,
    Int,
    Bool,
    /// Ordered list of nested objects.
    List,
    /// Unordered collection; element order never counts as a change.
    Set,
    Map,
}

/// Who supplies an attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Presence {
    Required,
    Optional,
    /// Set by the server only.
    Computed,
    /// May be declared; filled in by the server otherwise.
    OptionalComputed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub presence: Presence,
    pub force_new: bool,
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    pub description: &'static str,
}

impl Attribute {
    const fn new(name: &'static str, kind: AttributeKind, presence: Presence) -> Self {
        Self {
            name,
            kind,
            presence,
            force_new: false,
            sensitive: false,
            default: None,
            description: "",
        }
    }

    pub const fn required(name: &'static str, kind: AttributeKind) -> Self {
        Self::new(name, kind, Presence::Required)
    }

    pub const fn optional(name: &'static str, kind: AttributeKind) -> Self {
        Self::new(name, kind, Presence::Optional)
    }

    pub const fn computed(name: &'static str, kind: AttributeKind) -> Self {
        Self::new(name, kind, Presence::Computed)
    }

    pub const fn optional_computed(name: &'static str, kind: AttributeKind) -> Self {
        Self::new(name, kind, Presence::OptionalComputed)
    }

    #[must_use]
    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    #[must_use]
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    #[must_use]
    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// Attribute table of one resource or data-source type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub description: &'static str,
    pub attributes: &'static [Attribute],
}

impl ResourceSchema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Names of force-new attributes whose desired value differs from the
    /// prior one.
    ///
    /// Both sides are the serialized attribute objects. Missing and `null`
    /// compare equal; sets compare without regard to order. An
    /// optional+computed attribute left undeclared in `desired` keeps
    /// whatever the server chose and is not a change.
    pub fn force_new_changes(&self, prior: &Value, desired: &Value) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|attr| attr.force_new && attr.presence != Presence::Computed)
            .filter(|attr| {
                let before = normalize(attr.kind, prior.get(attr.name));
                let after = normalize(attr.kind, desired.get(attr.name));
                if attr.presence == Presence::OptionalComputed && after.is_null() {
                    return false;
                }
                before != after
            })
            .map(|attr| attr.name)
            .collect()
    }

    /// Copy server-supplied values the caller left out of `desired` from
    /// `prior`, so an update does not forget computed state.
    pub fn carry_computed(&self, prior: &Value, desired: &mut Value) {
        let (Some(prior), Some(desired)) = (prior.as_object(), desired.as_object_mut()) else {
            return;
        };
        for attr in self
            .attributes
            .iter()
            .filter(|a| matches!(a.presence, Presence::Computed | Presence::OptionalComputed))
        {
            if desired.get(attr.name).is_none_or(Value::is_null) {
                if let Some(value) = prior.get(attr.name) {
                    desired.insert(attr.name.to_owned(), value.clone());
                }
            }
        }
    }
}

fn normalize(kind: AttributeKind, value: Option<&Value>) -> Value {
    match (kind, value) {
        (_, None) => Value::Null,
        (AttributeKind::Set, Some(Value::Array(items))) => {
            let mut items = items.clone();
            items.sort_by_cached_key(Value::to_string);
            Value::Array(items)
        }
        (_, Some(value)) => value.clone(),
    }
}
