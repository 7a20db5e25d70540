use pnet_packet::icmp::IcmpTypes;
use pnet_packet::icmpv6::Icmpv6Types;
use socket2::{Domain, Protocol};
use std::fmt;
use std::net::IpAddr;

pub use checksum::checksum;
pub use echo::{build_echo_request, parse_reply, EchoReply, ICMP_HEADER_SIZE, TIMESTAMP_SIZE};
pub use sequence_number::SequenceNumber;
pub use socket::{IcmpSocket, RawSocket, RawSocketOpener, SocketOpener};
pub use ttl::Ttl;

mod checksum;
mod echo;
mod sequence_number;
pub(crate) mod socket;
mod ttl;

/// IP protocol number of ICMPv4.
pub const PROTOCOL_ICMP: i32 = 1;
/// IP protocol number of ICMPv6.
pub const PROTOCOL_ICMPV6: i32 = 58;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IpFamily {
    V4,
    V6,
}

impl IpFamily {
    pub fn of(addr: &IpAddr) -> IpFamily {
        match addr {
            IpAddr::V4(_) => IpFamily::V4,
            IpAddr::V6(_) => IpFamily::V6,
        }
    }

    pub fn echo_request_type(self) -> u8 {
        match self {
            IpFamily::V4 => IcmpTypes::EchoRequest.0,
            IpFamily::V6 => Icmpv6Types::EchoRequest.0,
        }
    }

    pub fn echo_reply_type(self) -> u8 {
        match self {
            IpFamily::V4 => IcmpTypes::EchoReply.0,
            IpFamily::V6 => Icmpv6Types::EchoReply.0,
        }
    }

    pub(crate) fn domain(self) -> Domain {
        match self {
            IpFamily::V4 => Domain::IPV4,
            IpFamily::V6 => Domain::IPV6,
        }
    }

    pub(crate) fn protocol(self) -> Protocol {
        match self {
            IpFamily::V4 => Protocol::ICMPV4,
            IpFamily::V6 => Protocol::ICMPV6,
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpFamily::V4 => write!(f, "IPv4"),
            IpFamily::V6 => write!(f, "IPv6"),
        }
    }
}
