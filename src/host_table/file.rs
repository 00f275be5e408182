//! Loading a [`HostTable`] from a `hostname=ip` mapping file.
//!
//! One mapping per line, e.g.:
//!
//! ```text
//! # lab hosts
//! example.com=192.0.2.10
//! printer.lan = 10.0.0.20
//! ```
//!
//! Whitespace around either side is ignored. Blank lines, `#` comments and lines without an
//! `=`, a hostname or an address are skipped. If a hostname appears twice the later line wins.
use crate::error::Error;
use crate::host_table::{HostTable, Shared};
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

impl HostTable {
    /// Parse the contents of a mapping file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMapping`] for the first line whose address isn't a dotted
    /// IPv4 address.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut entries = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('=');
            let (Some(hostname), Some(value)) = (fields.next(), fields.next()) else {
                continue;
            };
            let (hostname, value) = (hostname.trim(), value.trim());
            if hostname.is_empty() || value.is_empty() {
                continue;
            }
            let addr: Ipv4Addr = value.parse().map_err(|_| Error::InvalidMapping {
                line: idx + 1,
                hostname: hostname.to_string(),
                value: value.to_string(),
            })?;
            entries.push((hostname.to_string(), addr));
        }
        Ok(entries.into_iter().collect())
    }

    /// Load a [`HostTable`] from the mapping file at the given path, or return an Error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HostsFileNotFound`] if nothing exists at the path.
    ///
    /// Returns [`Error::IO`] if the file can't be read as UTF-8 text.
    ///
    /// Returns [`Error::InvalidMapping`] if a line maps to an invalid address.
    pub async fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let p = p.as_ref();
        let text = match fs::read_to_string(p).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::HostsFileNotFound(p.to_path_buf()))
            }
            Err(err) => return Err(Error::IO(err)),
        };
        Self::parse(&text)
    }
}

/// Reload the mapping file at `p` and publish it through `table`, returning the number of
/// entries now being served.
///
/// # Errors
///
/// Returns the [`HostTable::try_from_file`] error. The previously published table stays in
/// place.
pub async fn reload(table: &Shared, p: impl AsRef<Path>) -> Result<usize, Error> {
    let fresh = HostTable::try_from_file(p).await?;
    let len = fresh.len();
    table.store(Arc::new(fresh));
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let table = HostTable::parse(
            "# comment\n\
             example.com=192.0.2.10\n\
             \n\
             \x20 spaced.example.com \t=  10.0.0.1 \r\n\
             no-separator\n\
             =10.0.0.2\n\
             empty-value=\n\
             extra=10.0.0.3=ignored\n\
             example.com=192.0.2.11\n",
        )
        .unwrap();
        assert_eq!(3, table.len());
        assert_eq!(Some(Ipv4Addr::new(192, 0, 2, 11)), table.get("example.com"));
        assert_eq!(
            Some(Ipv4Addr::new(10, 0, 0, 1)),
            table.get("spaced.example.com")
        );
        assert_eq!(Some(Ipv4Addr::new(10, 0, 0, 3)), table.get("extra"));
        assert_eq!(None, table.get("no-separator"));
        assert_eq!(None, table.get(""));
    }

    #[test]
    fn test_parse_invalid_address() {
        let err = HostTable::parse("ok.test=1.2.3.4\nbad.test=1.2.3.400\n").unwrap_err();
        match err {
            Error::InvalidMapping {
                line,
                hostname,
                value,
            } => {
                assert_eq!(2, line);
                assert_eq!("bad.test", hostname);
                assert_eq!("1.2.3.400", value);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            HostTable::parse("v6.test=::1"),
            Err(Error::InvalidMapping { line: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_try_from_file() {
        let file = temp_file::with_contents(b"example.com=192.0.2.10\n");
        let table = HostTable::try_from_file(file.path()).await.unwrap();
        assert_eq!(Some(Ipv4Addr::new(192, 0, 2, 10)), table.get("example.com"));
    }

    #[tokio::test]
    async fn test_try_from_missing_file() {
        let dir = std::env::temp_dir().join("hostmap-dns-no-such-dir");
        let missing = dir.join("hosts.txt");
        match HostTable::try_from_file(&missing).await {
            Err(Error::HostsFileNotFound(p)) => assert_eq!(missing, p),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reload() {
        let shared = HostTable::parse("old.test=10.0.0.1").unwrap().into_shared();

        let bad = temp_file::with_contents(b"new.test=not-an-ip\n");
        assert!(reload(&shared, bad.path()).await.is_err());
        assert_eq!(Some(Ipv4Addr::new(10, 0, 0, 1)), shared.load().get("old.test"));

        let good = temp_file::with_contents(b"new.test=10.0.0.2\nother.test=10.0.0.3\n");
        assert_eq!(2, reload(&shared, good.path()).await.unwrap());
        let snapshot = shared.load();
        assert_eq!(None, snapshot.get("old.test"));
        assert_eq!(Some(Ipv4Addr::new(10, 0, 0, 2)), snapshot.get("new.test"));
    }
}
