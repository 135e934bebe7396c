//! Device inventory records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One device entry from the inventory, as handed to backup hooks.
///
/// Inventories carry a pair of well-known columns plus free-form extras
/// (addresses, credentials aliases, site tags, ...); the extras are
/// preserved verbatim in `fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Device hostname or address.
    pub host: String,
    /// Network OS name used to select the connection profile.
    #[serde(default)]
    pub os_name: String,
    /// Any additional inventory columns.
    #[serde(default, flatten)]
    pub fields: BTreeMap<String, String>,
}

impl DeviceRecord {
    /// Creates a record with the two fixed columns.
    pub fn new(host: impl Into<String>, os_name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            os_name: os_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds an extra inventory column.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Field lookup spanning the fixed columns and the extras.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "host" => Some(&self.host),
            "os_name" => Some(&self.os_name),
            _ => self.fields.get(name).map(String::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup_covers_fixed_and_extra_columns() {
        let rec = DeviceRecord::new("switch1", "junos").with_field("site", "fra1");

        assert_eq!(rec.field("host"), Some("switch1"));
        assert_eq!(rec.field("os_name"), Some("junos"));
        assert_eq!(rec.field("site"), Some("fra1"));
        assert_eq!(rec.field("rack"), None);
    }
}
