use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One managed machine as reported by the MAAS `nodes/` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineRecord {
    pub hostname: String,
    #[serde(default)]
    pub ip_addresses: Vec<String>,
    pub power_state: PowerState,
    /// Every other field the API returned, kept verbatim for the full-record view
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MachineRecord {
    /// Management address: the first IP address MAAS reports for the machine
    pub fn management_address(&self) -> Option<&str> {
        self.ip_addresses.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
    Unknown,
    Error,
}

impl PowerState {
    /// Descriptive label published as `hw_power_status`
    pub fn label(self) -> &'static str {
        match self {
            PowerState::On => "POWERED ON",
            PowerState::Off => "POWERED OFF",
            PowerState::Unknown => "UNKNOWN",
            PowerState::Error => "ERROR",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
