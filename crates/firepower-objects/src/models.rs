//! Object API models shared by the service and its callers.
//!
//! Field names follow the management center's camelCase JSON. Optional fields
//! are `Option` and are left out of encoded bodies when absent, so a value
//! that was never set cannot be confused with an explicit zero value.

use crate::kind::ObjectKind;
use chrono::{DateTime, Utc};
use firepower_core::query::QueryParams;
use serde::{Deserialize, Serialize};

/// Self and parent links attached to envelopes and items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Links {
    /// URL of the resource itself.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// URL of the parent collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Server-reported pagination counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paging {
    /// Offset of the first item in this page.
    #[serde(default)]
    pub offset: u64,
    /// Page size requested.
    #[serde(default)]
    pub limit: u64,
    /// Total matching records on the server.
    #[serde(default)]
    pub count: u64,
    /// Number of pages at the current limit.
    #[serde(default)]
    pub pages: u64,
    /// Link to the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Vec<String>>,
    /// Link to the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Vec<String>>,
}

/// Paged listing envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Object {
    /// Link to this page.
    #[serde(default)]
    pub links: Links,
    /// Items on this page; the server omits the key for empty results.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Paging counters.
    #[serde(default)]
    pub paging: Paging,
}

impl Object {
    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Find an item on this page by ID.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id.as_deref() == Some(id))
    }
}

impl IntoIterator for Object {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A single managed object, such as a host.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object name.
    pub name: String,
    /// Address, network, range or FQDN; absent in compact listings.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Object type (e.g. `Host`).
    #[serde(rename = "type")]
    pub object_type: String,
    /// Whether the object may be overridden per device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridable: Option<bool>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Self/parent links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Ownership and modification metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Item {
    /// Build a minimal item of the given kind.
    #[must_use]
    pub fn new(kind: ObjectKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            object_type: kind.type_name().to_string(),
            ..Self::default()
        }
    }

    /// Build a minimal host item.
    #[must_use]
    pub fn host(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(ObjectKind::Hosts, name, value)
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the overridable flag.
    #[must_use]
    pub const fn with_overridable(mut self, overridable: bool) -> Self {
        self.overridable = Some(overridable);
        self
    }

    /// Whether the server marked this item read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.read_only.as_ref())
            .is_some_and(|read_only| read_only.state)
    }
}

/// Ownership and modification metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Last modification time, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// User who last modified the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_user: Option<LastUser>,
    /// Owning domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    /// Read-only flag and reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<ReadOnly>,
    /// IP version hint (`V_4`, `V_6`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_type: Option<String>,
    /// Parent type hint (e.g. `NetworkAddress`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,
}

impl Metadata {
    /// Last modification time as a UTC timestamp.
    #[must_use]
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// User reference in [`Metadata`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastUser {
    /// Login name.
    pub name: String,
}

/// Domain reference in [`Metadata`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Domain {
    /// Domain name (e.g. `Global`).
    pub name: String,
    /// Domain UUID.
    pub id: String,
    /// Always `Domain`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<String>,
}

/// Read-only marker in [`Metadata`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadOnly {
    /// Whether the object is read-only.
    pub state: bool,
    /// Why it is read-only (e.g. `SYSTEM`, `DOMAIN`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Partial create/update payload. Absent fields are left out of the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectRequest {
    /// Object ID; required by the server on updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Object type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    /// Object value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Overridable flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridable: Option<bool>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ObjectRequest {
    /// Create an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the object ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the type from an [`ObjectKind`].
    #[must_use]
    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.object_type = Some(kind.type_name().to_string());
        self
    }

    /// Set the value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the overridable flag.
    #[must_use]
    pub const fn with_overridable(mut self, overridable: bool) -> Self {
        self.overridable = Some(overridable);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<&Item> for ObjectRequest {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            name: Some(item.name.clone()),
            object_type: Some(item.object_type.clone()),
            value: (!item.value.is_empty()).then(|| item.value.clone()),
            overridable: item.overridable,
            description: item.description.clone(),
        }
    }
}

/// Query options for object reads.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ObjectListOptions {
    /// Return full items instead of id/name/type stubs. Always sent.
    pub expanded: bool,
    /// Index of the first item to return.
    pub offset: Option<u32>,
    /// Maximum items per page.
    pub limit: Option<u32>,
    /// Server-side filter expression (e.g. `nameOrValue:web`).
    pub filter: Option<String>,
}

impl ObjectListOptions {
    /// Options with only the `expanded` flag set.
    #[must_use]
    pub fn new(expanded: bool) -> Self {
        Self {
            expanded,
            ..Self::default()
        }
    }

    /// Set the page offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the filter expression.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Query pairs in wire order: `expanded`, then any set paging/filter keys.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        self.to_params().into_pairs()
    }

    /// Rendered query string, e.g. `expanded=true&limit=25`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_params().to_query_string()
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("expanded", self.expanded);
        params.push_opt("offset", self.offset);
        params.push_opt("limit", self.limit);
        params.push_opt("filter", self.filter.as_deref());
        params
    }
}
