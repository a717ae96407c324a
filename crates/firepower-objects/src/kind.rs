//! Object categories exposed under `object/` by the management center.

use firepower_core::path::encode_segment;
use firepower_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Object categories and their collection paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Single IP address
    Hosts,
    /// CIDR network
    Networks,
    /// IP address range
    Ranges,
    /// Fully qualified domain name
    Fqdns,
    /// Group of network objects
    NetworkGroups,
    /// Read-only union of hosts, networks and ranges
    NetworkAddresses,
    /// Protocol and port pair
    ProtocolPortObjects,
    /// URL object
    Urls,
}

impl ObjectKind {
    /// Path segment below `object/`.
    #[must_use]
    pub const fn path_segment(&self) -> &'static str {
        match self {
            Self::Hosts => "hosts",
            Self::Networks => "networks",
            Self::Ranges => "ranges",
            Self::Fqdns => "fqdns",
            Self::NetworkGroups => "networkgroups",
            Self::NetworkAddresses => "networkaddresses",
            Self::ProtocolPortObjects => "protocolportobjects",
            Self::Urls => "urls",
        }
    }

    /// Value of the `type` field on items of this kind.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Hosts => "Host",
            Self::Networks => "Network",
            Self::Ranges => "Range",
            Self::Fqdns => "FQDN",
            Self::NetworkGroups => "NetworkGroup",
            Self::NetworkAddresses => "NetworkAddress",
            Self::ProtocolPortObjects => "ProtocolPortObject",
            Self::Urls => "Url",
        }
    }

    /// Relative collection path, e.g. `object/hosts`.
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!("object/{}", self.path_segment())
    }

    /// Relative path of a single item, e.g. `object/hosts/{id}`.
    ///
    /// The ID is escaped into a single segment, so reserved characters in it
    /// never leave the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestBuild`] when the ID is `.` or `..`.
    pub fn item_path(&self, id: &str) -> Result<String> {
        Ok(format!("object/{}/{}", self.path_segment(), encode_segment(id)?))
    }

    /// Whether the management center accepts writes for this kind.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        !matches!(self, Self::NetworkAddresses)
    }

    /// Returns all known kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Hosts,
            Self::Networks,
            Self::Ranges,
            Self::Fqdns,
            Self::NetworkGroups,
            Self::NetworkAddresses,
            Self::ProtocolPortObjects,
            Self::Urls,
        ]
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for ObjectKind {
    type Err = Error;

    /// Accepts either the path segment (`hosts`) or the type name (`Host`),
    /// case-insensitively.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| {
                kind.path_segment().eq_ignore_ascii_case(s) || kind.type_name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| Error::RequestBuild(format!("Unknown object kind: {s}")))
    }
}
