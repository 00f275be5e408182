//! Static hostname to IPv4 address storage.
//!
//! A [`HostTable`] is loaded from a `hostname=ip` file (see [`file`]) and never changes once
//! built. Serving code reads it through a [`Shared`] handle, so a reload publishes a whole new
//! table with one atomic pointer swap and in-flight lookups keep the snapshot they started with.

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

pub mod file;

pub use file::reload;

/// `Shared` is the handle the [DNS server][crate::dns] resolves against. Readers take a
/// snapshot with [`ArcSwap::load`]; [`reload`] replaces the table with [`ArcSwap::store`].
pub type Shared = Arc<ArcSwap<HostTable>>;

/// An immutable map from hostname to IPv4 address.
///
/// Keys are matched literally: no case folding, no trailing dot normalization, no wildcards.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct HostTable {
    addrs: HashMap<String, Ipv4Addr>,
}

impl HostTable {
    /// Get the address mapped to exactly `hostname`, if any.
    #[must_use]
    pub fn get(&self, hostname: &str) -> Option<Ipv4Addr> {
        self.addrs.get(hostname).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    /// Wrap the table in a [`Shared`] handle.
    #[must_use]
    pub fn into_shared(self) -> Shared {
        Arc::new(ArcSwap::from_pointee(self))
    }
}

impl FromIterator<(String, Ipv4Addr)> for HostTable {
    fn from_iter<I: IntoIterator<Item = (String, Ipv4Addr)>>(iter: I) -> Self {
        Self {
            addrs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_literal() {
        let table: HostTable = [("Example.com".to_string(), Ipv4Addr::new(192, 0, 2, 10))]
            .into_iter()
            .collect();
        assert_eq!(Some(Ipv4Addr::new(192, 0, 2, 10)), table.get("Example.com"));
        assert_eq!(None, table.get("example.com"));
        assert_eq!(None, table.get("Example.com."));
        assert_eq!(None, table.get("www.Example.com"));
        assert_eq!(1, table.len());
        assert!(!table.is_empty());
    }

    #[test]
    fn test_shared_snapshot_survives_store() {
        let shared = HostTable::default().into_shared();
        let before = shared.load_full();
        shared.store(Arc::new(
            [("a.test".to_string(), Ipv4Addr::LOCALHOST)]
                .into_iter()
                .collect(),
        ));
        assert!(before.is_empty());
        assert_eq!(Some(Ipv4Addr::LOCALHOST), shared.load().get("a.test"));
    }
}
