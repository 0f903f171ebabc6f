use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Ansible dynamic inventory backed by MAAS
#[derive(Debug, Parser)]
#[command(name = "maasinv")]
#[command(about = "MAAS dynamic inventory for Ansible")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(group(
    ArgGroup::new("mode")
        .args(["list", "host", "groups", "raw", "raw_host", "node"])
        .multiple(false)
))]
pub struct MaasInvCli {
    /// Print the full grouped inventory
    #[arg(long)]
    pub list: bool,

    /// Print the facts of the first host whose name contains HOSTNAME
    #[arg(long, value_name = "HOSTNAME")]
    pub host: Option<String>,

    /// Print the generated group names
    #[arg(long)]
    pub groups: bool,

    /// Print the raw machine list from MAAS
    #[arg(long)]
    pub raw: bool,

    /// Query MAAS for machines matching HOSTNAME, bypassing the cache
    #[arg(long = "raw-host", value_name = "HOSTNAME")]
    pub raw_host: Option<String>,

    /// Print the full record of the first host whose name contains HOSTNAME
    #[arg(long, value_name = "HOSTNAME")]
    pub node: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Discard the cached machine list before running
    #[arg(long)]
    pub refresh: bool,

    /// Enable verbose logging on stderr (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// The single output mode serviced by one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    Host(String),
    Groups,
    Raw,
    RawHost(String),
    Node(String),
}

impl MaasInvCli {
    /// Selected mode, `None` when no mode flag was given
    pub fn mode(&self) -> Option<Mode> {
        if self.list {
            Some(Mode::List)
        } else if let Some(host) = &self.host {
            Some(Mode::Host(host.clone()))
        } else if self.groups {
            Some(Mode::Groups)
        } else if self.raw {
            Some(Mode::Raw)
        } else if let Some(host) = &self.raw_host {
            Some(Mode::RawHost(host.clone()))
        } else {
            self.node.clone().map(Mode::Node)
        }
    }
}
