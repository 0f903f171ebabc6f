use crate::inventory::error::{InventoryError, Result};
use crate::inventory::grouping::{group_name, is_eligible};
use crate::types::{HostVars, InventoryDocument, MachineRecord, ALL_GROUP, META_KEY};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Group-name listing: every derived group mapped to an empty object
pub type GroupListing = BTreeMap<String, serde_json::Map<String, serde_json::Value>>;

/// Builds the inventory views from the cached machine list
#[derive(Debug, Clone)]
pub struct InventoryBuilder {
    machines: Vec<MachineRecord>,
}

impl InventoryBuilder {
    pub fn new(machines: Vec<MachineRecord>) -> Self {
        Self { machines }
    }

    /// Parse a serialized machine list as returned by MAAS
    pub fn from_artifact(artifact: &str) -> Result<Self> {
        let machines: Vec<MachineRecord> =
            serde_json::from_str(artifact).map_err(|e| InventoryError::MalformedArtifact {
                reason: e.to_string(),
            })?;
        debug!("Parsed {} machine records", machines.len());
        Ok(Self::new(machines))
    }

    pub fn machines(&self) -> &[MachineRecord] {
        &self.machines
    }

    /// Machines whose hostname takes part in grouping, in input order
    pub fn eligible(&self) -> impl Iterator<Item = &MachineRecord> {
        self.machines.iter().filter(|m| is_eligible(&m.hostname))
    }

    pub fn group_names(&self) -> GroupListing {
        let mut groups = GroupListing::new();
        for machine in self.eligible() {
            groups
                .entry(group_name(&machine.hostname).to_string())
                .or_default();
        }
        groups
    }

    /// Full grouped inventory with `_meta.hostvars`.
    ///
    /// Duplicate hostnames are kept in every host list they land in; their
    /// hostvars reflect the last record seen.
    pub fn inventory(&self) -> InventoryDocument {
        let mut document = InventoryDocument::new();

        for machine in self.eligible() {
            let hostname = &machine.hostname;
            let group = group_name(hostname);

            if group == META_KEY {
                warn!(
                    "Host {} maps onto the reserved {} key, listing it under {} only",
                    hostname, META_KEY, ALL_GROUP
                );
            } else {
                document.group_mut(group).hosts.push(hostname.clone());
            }
            document.group_mut(ALL_GROUP).hosts.push(hostname.clone());
            document
                .meta
                .hostvars
                .insert(hostname.clone(), host_vars(machine));
        }

        document.sort_hosts();
        debug!(
            "Built inventory with {} groups and {} hosts",
            document.groups.len(),
            document.meta.hostvars.len()
        );
        document
    }

    /// First eligible machine whose hostname contains `fragment`
    pub fn host_record(&self, fragment: &str) -> Option<&MachineRecord> {
        self.eligible().find(|m| m.hostname.contains(fragment))
    }

    /// Reduced facts for the first eligible machine matching `fragment`
    pub fn host_facts(&self, fragment: &str) -> Option<HostVars> {
        self.host_record(fragment).map(host_vars)
    }
}

/// Check that a raw artifact is well-formed JSON, handing it back unchanged
pub fn raw_view(artifact: &str) -> Result<&str> {
    serde_json::from_str::<serde_json::Value>(artifact).map_err(|e| {
        InventoryError::MalformedArtifact {
            reason: e.to_string(),
        }
    })?;
    Ok(artifact)
}

fn host_vars(machine: &MachineRecord) -> HostVars {
    let address = machine.management_address().map(str::to_string);
    if address.is_none() {
        warn!("Host {} reports no IP address", machine.hostname);
    }
    HostVars {
        ansible_ssh_host: address,
        hw_power_status: machine.power_state.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PowerState;
    use proptest::prelude::*;

    fn machine(hostname: &str, ip: &str, power_state: PowerState) -> MachineRecord {
        MachineRecord {
            hostname: hostname.to_string(),
            ip_addresses: vec![ip.to_string()],
            power_state,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_group_listing_skips_hyphenated_hosts() {
        let builder = InventoryBuilder::new(vec![
            machine("web01", "10.0.0.1", PowerState::On),
            machine("db-primary", "10.0.0.9", PowerState::On),
            machine("cache", "10.0.0.3", PowerState::Off),
        ]);

        let groups: Vec<_> = builder.group_names().into_keys().collect();
        assert_eq!(groups, vec!["cache".to_string(), "web".to_string()]);
    }

    #[test]
    fn test_duplicate_hosts_pass_through() {
        let builder = InventoryBuilder::new(vec![
            machine("web01", "10.0.0.1", PowerState::On),
            machine("web01", "10.0.0.7", PowerState::Off),
        ]);

        let document = builder.inventory();
        assert_eq!(document.group("web").unwrap().hosts, vec!["web01", "web01"]);
        assert_eq!(document.all_hosts(), ["web01", "web01"]);

        let vars = document.hostvars("web01").unwrap();
        assert_eq!(vars.ansible_ssh_host.as_deref(), Some("10.0.0.7"));
        assert_eq!(vars.hw_power_status, "POWERED OFF");
    }

    #[test]
    fn test_host_named_like_all_shares_all_group() {
        let builder = InventoryBuilder::new(vec![machine("all1", "10.0.0.1", PowerState::On)]);

        let document = builder.inventory();
        assert_eq!(document.all_hosts(), ["all1", "all1"]);
    }

    #[test]
    fn test_reserved_meta_group_is_not_created() {
        let builder = InventoryBuilder::new(vec![machine("_meta1", "10.0.0.1", PowerState::On)]);

        let document = builder.inventory();
        assert!(document.group(META_KEY).is_none());
        assert_eq!(document.all_hosts(), ["_meta1"]);
        assert!(document.hostvars("_meta1").is_some());
    }

    #[test]
    fn test_host_without_address() {
        let mut bare = machine("web09", "unused", PowerState::Unknown);
        bare.ip_addresses.clear();
        let builder = InventoryBuilder::new(vec![bare]);

        let facts = builder.host_facts("web09").unwrap();
        assert_eq!(facts.ansible_ssh_host, None);
        assert_eq!(facts.hw_power_status, "UNKNOWN");
    }

    #[test]
    fn test_lookup_ignores_hyphenated_hosts() {
        let builder = InventoryBuilder::new(vec![
            machine("web-01", "10.0.0.1", PowerState::On),
            machine("web01", "10.0.0.2", PowerState::Error),
        ]);

        let record = builder.host_record("web").unwrap();
        assert_eq!(record.hostname, "web01");
        assert_eq!(builder.host_facts("web").unwrap().hw_power_status, "ERROR");
    }

    #[test]
    fn test_raw_view_rejects_garbage() {
        assert_eq!(raw_view("[]").unwrap(), "[]");
        assert!(matches!(
            raw_view("[{"),
            Err(InventoryError::MalformedArtifact { .. })
        ));
    }

    #[test]
    fn test_from_artifact_rejects_non_list() {
        let result = InventoryBuilder::from_artifact(r#"{"hostname": "web01"}"#);
        assert!(matches!(result, Err(InventoryError::MalformedArtifact { .. })));
    }

    fn hostnames() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-c]{1,3}(-?)[0-9]{0,2}", 0..24)
    }

    proptest! {
        #[test]
        fn prop_groups_partition_eligible_hosts(names in hostnames()) {
            let builder = InventoryBuilder::new(
                names.iter().map(|n| machine(n, "10.0.0.1", PowerState::On)).collect(),
            );
            let document = builder.inventory();

            let mut grouped: Vec<String> = document
                .groups
                .iter()
                .filter(|(name, _)| name.as_str() != ALL_GROUP)
                .flat_map(|(_, group)| group.hosts.clone())
                .collect();
            grouped.sort();

            let mut eligible: Vec<String> =
                names.iter().filter(|n| !n.contains('-')).cloned().collect();
            eligible.sort();

            prop_assert_eq!(&grouped, &eligible);
            prop_assert_eq!(document.all_hosts(), eligible.as_slice());

            for group in document.groups.values() {
                prop_assert!(group.hosts.windows(2).all(|pair| pair[0] <= pair[1]));
                prop_assert!(group.hosts.iter().all(|h| !h.contains('-')));
            }
            for host in document.all_hosts() {
                prop_assert!(document.hostvars(host).is_some());
            }
            prop_assert!(document.meta.hostvars.keys().all(|h| !h.contains('-')));
        }
    }
}
