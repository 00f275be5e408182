use crate::config::Shared;
use crate::dns::resolver::Resolver;
use crate::error::Error;
use crate::host_table;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{error, info, warn};

/// > Messages carried by UDP are restricted to 512 bytes (not counting the IP
/// > or UDP headers).
///
/// <https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1>
pub const MAX_DATAGRAM_LEN: usize = 512;

/// A bound UDP socket answering each datagram with a [`Resolver`].
pub struct Server {
    socket: UdpSocket,
    resolver: Resolver,
}

/// Bind the configured UDP address and build a [`Server`] answering from `table`.
///
/// # Errors
///
/// Returns an error if the socket can't be bound.
pub async fn new(config: Shared, table: host_table::Shared) -> anyhow::Result<Server> {
    let socket = UdpSocket::bind(config.dns_udp_bind_addr).await?;
    let resolver = Resolver::new(table, config.ttl);
    Ok(Server { socket, resolver })
}

impl Server {
    /// The address the socket is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the socket can't report its address.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.socket.local_addr()?)
    }

    /// Serve requests until the task is dropped. Failures are scoped to the request that
    /// caused them.
    pub async fn block_until_done(self) {
        let mut buf = [0_u8; MAX_DATAGRAM_LEN];
        loop {
            let (len, peer) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(err) => {
                    error!("error receiving DNS request: {err}");
                    continue;
                }
            };
            self.respond(&buf[..len], peer).await;
        }
    }

    async fn respond(&self, request: &[u8], peer: SocketAddr) {
        info!(%peer, len = request.len(), "request");
        let response = match self.resolver.handle_datagram(request) {
            Ok(response) => response,
            Err(err) => {
                warn!(%peer, "dropping request: {err}");
                return;
            }
        };
        if let Err(err) = self.socket.send_to(&response, peer).await {
            error!(%peer, "error sending DNS response: {err}");
        }
    }
}
