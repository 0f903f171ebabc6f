use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Group that holds every included host
pub const ALL_GROUP: &str = "all";

/// Reserved key carrying per-host variables
pub const META_KEY: &str = "_meta";

/// Ansible dynamic inventory: groups keyed by name plus `_meta.hostvars`
///
/// The `all` group lives in `groups` alongside the derived ones, so a derived
/// group that happens to be named `all` shares its host list.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDocument {
    pub groups: BTreeMap<String, InventoryGroup>,
    pub meta: InventoryMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryGroup {
    pub hosts: Vec<String>,
    pub vars: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryMeta {
    pub hostvars: BTreeMap<String, HostVars>,
}

/// Facts published for a single host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostVars {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ansible_ssh_host: Option<String>,
    pub hw_power_status: String,
}

impl InventoryDocument {
    pub fn new() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(ALL_GROUP.to_string(), InventoryGroup::default());
        Self {
            groups,
            meta: InventoryMeta::default(),
        }
    }

    /// Get the group, inserting an empty one on first access
    pub fn group_mut(&mut self, name: &str) -> &mut InventoryGroup {
        self.groups.entry(name.to_string()).or_default()
    }

    pub fn group(&self, name: &str) -> Option<&InventoryGroup> {
        self.groups.get(name)
    }

    /// Hosts of the `all` group
    pub fn all_hosts(&self) -> &[String] {
        self.groups
            .get(ALL_GROUP)
            .map(|group| group.hosts.as_slice())
            .unwrap_or_default()
    }

    pub fn hostvars(&self, hostname: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(hostname)
    }

    /// Sort every group's host list ascending
    pub fn sort_hosts(&mut self) {
        for group in self.groups.values_mut() {
            group.hosts.sort();
        }
    }
}

impl Default for InventoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for InventoryDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Keys are emitted in sorted order with `_meta` slotted in place.
        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        let mut meta_written = false;
        for (name, group) in &self.groups {
            if !meta_written && name.as_str() > META_KEY {
                map.serialize_entry(META_KEY, &self.meta)?;
                meta_written = true;
            }
            map.serialize_entry(name, group)?;
        }
        if !meta_written {
            map.serialize_entry(META_KEY, &self.meta)?;
        }
        map.end()
    }
}
