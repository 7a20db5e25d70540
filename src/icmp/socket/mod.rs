use super::{IpFamily, Ttl};
use std::{io, net::IpAddr, time::Duration};

pub use raw_socket::RawSocket;

mod raw_socket;

pub trait IcmpSocket: Send {
    fn send_to(&self, buf: &[u8], addr: &socket2::SockAddr) -> io::Result<usize>;
    fn set_read_timeout(&self, timeout: Duration) -> io::Result<()>;
    /// Reads one ICMP message, without any IP header, into `buf`.
    fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, IpAddr, Option<Ttl>)>;
}

/// Acquires a fresh socket for one probe. The socket is closed when dropped.
pub trait SocketOpener {
    type Socket: IcmpSocket;

    fn open(&self, family: IpFamily) -> io::Result<Self::Socket>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RawSocketOpener;

impl SocketOpener for RawSocketOpener {
    type Socket = RawSocket;

    fn open(&self, family: IpFamily) -> io::Result<RawSocket> {
        RawSocket::new(family)
    }
}
