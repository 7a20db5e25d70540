use super::IcmpSocket;
use crate::icmp::{IpFamily, Ttl};
use pnet_packet::ipv4::Ipv4Packet;
use socket2::Type;
use std::{io, net::IpAddr, time::Duration};

const MIN_READ_TIMEOUT: Duration = Duration::from_micros(1);

/// A raw ICMP (protocol 1) or ICMPv6 (protocol 58) socket. Needs root or CAP_NET_RAW.
pub struct RawSocket {
    socket: socket2::Socket,
    family: IpFamily,
}

impl RawSocket {
    pub fn new(family: IpFamily) -> Result<Self, io::Error> {
        tracing::trace!("creating RawSocket for {family}");
        let socket = socket2::Socket::new(family.domain(), Type::RAW, Some(family.protocol()))?;
        Ok(RawSocket { socket, family })
    }
}

impl IcmpSocket for RawSocket {
    fn send_to(&self, buf: &[u8], addr: &socket2::SockAddr) -> io::Result<usize> {
        self.socket.send_to(buf, addr)
    }

    fn set_read_timeout(&self, timeout: Duration) -> io::Result<()> {
        // SO_RCVTIMEO has microsecond resolution and a zero timeval blocks forever.
        self.socket.set_read_timeout(Some(timeout.max(MIN_READ_TIMEOUT)))
    }

    fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, IpAddr, Option<Ttl>)> {
        // Socket2 gives a safety guaranty which allows us to do an unsafe cast from `&mut [u8]`
        // to `&mut [std::mem::MaybeUninit<u8>]`: the socket only ever writes initialized bytes.
        // https://docs.rs/socket2/0.4.7/socket2/struct.Socket.html#method.recv
        let (n, socket_addr) = self.socket.recv_from(unsafe {
            &mut *(std::ptr::addr_of_mut!(*buf) as *mut [std::mem::MaybeUninit<u8>])
        })?;
        let source = socket_addr
            .as_socket()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "source is not an IP address"))?
            .ip();

        match self.family {
            // An ICMPv6 raw socket delivers the bare ICMP message.
            IpFamily::V6 => Ok((n, source, None)),
            // On an IPv4 raw socket we get the whole IP packet.
            IpFamily::V4 => {
                let ipv4_packet = Ipv4Packet::new(&buf[..n])
                    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "truncated IPv4 packet"))?;
                let header_len = usize::from(ipv4_packet.get_header_length()) * 4;
                let ttl = Ttl::from(ipv4_packet.get_ttl());
                if header_len > n {
                    return Err(io::Error::new(io::ErrorKind::InvalidData, "invalid IPv4 header length"));
                }
                // Return only the ICMP content
                buf.copy_within(header_len..n, 0);
                Ok((n - header_len, source, Some(ttl)))
            }
        }
    }
}
