use crate::error::Error;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type Shared = Arc<Config>;

pub const DEFAULT_PORT: u16 = 53;
pub const DEFAULT_TTL: u32 = 60;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub dns_udp_bind_addr: SocketAddr,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    pub hosts_file: PathBuf,
}

/// Settings given on the command line. Each one that is set replaces the config file's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind: Option<IpAddr>,
    pub port: Option<u16>,
    pub ttl: Option<u32>,
    pub hosts_file: Option<PathBuf>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT)
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

impl Config {
    /// A config serving `hosts_file` on `0.0.0.0:53` with a 60 second TTL.
    pub fn new(hosts_file: impl Into<PathBuf>) -> Self {
        Config {
            dns_udp_bind_addr: default_bind_addr(),
            ttl: DEFAULT_TTL,
            hosts_file: hosts_file.into(),
        }
    }

    /// Load a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the file can't be opened and [`Error::InvalidJSON`] if it isn't
    /// a valid config.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }

    /// Build the runtime config from an optional JSON config file and command line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingHostsFile`] when there is no config file and no hosts file
    /// override, or the [`Config::try_from_file`] error.
    pub fn load(config_file: Option<&Path>, overrides: Overrides) -> Result<Self, Error> {
        let mut config = match (config_file, &overrides.hosts_file) {
            (Some(p), _) => Self::try_from_file(p)?,
            (None, Some(hosts_file)) => Self::new(hosts_file),
            (None, None) => return Err(Error::MissingHostsFile),
        };
        config.apply(overrides);
        Ok(config)
    }

    fn apply(&mut self, overrides: Overrides) {
        if let Some(ip) = overrides.bind {
            self.dns_udp_bind_addr.set_ip(ip);
        }
        if let Some(port) = overrides.port {
            self.dns_udp_bind_addr.set_port(port);
        }
        if let Some(ttl) = overrides.ttl {
            self.ttl = ttl;
        }
        if let Some(hosts_file) = overrides.hosts_file {
            self.hosts_file = hosts_file;
        }
    }
}
