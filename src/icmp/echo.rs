use super::{checksum, IpFamily, SequenceNumber};
use crate::PingError;
use pnet_packet::icmp::echo_reply::EchoReplyPacket;
use pnet_packet::icmp::echo_request::{EchoRequestPacket, MutableEchoRequestPacket};
use pnet_packet::icmp::{IcmpCode, IcmpType};
use pnet_packet::Packet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Type, code, checksum, identifier and sequence number.
pub const ICMP_HEADER_SIZE: usize = 8;
/// Leading payload bytes carrying the send time in nanoseconds since the Unix epoch.
pub const TIMESTAMP_SIZE: usize = 8;

/// Builds an Echo Request for `family`.
///
/// Echo messages share one layout in ICMPv4 and ICMPv6, so the ICMPv4 echo
/// packet view is used for both and only the type code differs. The checksum
/// is computed here for IPv4 only. For IPv6 it covers a pseudo-header with the
/// source address, which the kernel fills in when the raw socket sends.
pub fn build_echo_request(
    sequence_number: SequenceNumber,
    identifier: u16,
    payload_size: usize,
    family: IpFamily,
) -> Result<Vec<u8>, PingError> {
    let payload = new_payload(payload_size, SystemTime::now());

    let buf = vec![0u8; EchoRequestPacket::minimum_packet_size() + payload.len()];
    let mut package = MutableEchoRequestPacket::owned(buf)
        .ok_or_else(|| PingError::Encoding("could not create ICMP echo request package".to_owned()))?;
    package.set_icmp_type(IcmpType::new(family.echo_request_type()));
    package.set_icmp_code(IcmpCode::new(0));
    package.set_identifier(identifier);
    package.set_sequence_number(sequence_number.into());
    package.set_payload(&payload);

    package.set_checksum(0_u16);
    if family == IpFamily::V4 {
        let checksum = checksum(package.packet());
        package.set_checksum(checksum);
    }
    Ok(package.packet().to_vec())
}

fn new_payload(payload_size: usize, now: SystemTime) -> Vec<u8> {
    let mut payload: Vec<u8> = (0..payload_size).map(|i| (i % 256) as u8).collect();
    if payload_size >= TIMESTAMP_SIZE {
        let nanos = now.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos());
        let nanos = u64::try_from(nanos).unwrap_or(u64::MAX);
        payload[..TIMESTAMP_SIZE].copy_from_slice(&nanos.to_be_bytes());
    }
    payload
}

/// An inbound ICMP echo message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EchoReply {
    pub icmp_type: u8,
    pub code: u8,
    pub identifier: u16,
    pub sequence_number: SequenceNumber,
    pub payload: Vec<u8>,
}

impl EchoReply {
    /// Send time embedded by the requester, if the payload is long enough to hold one.
    pub fn send_timestamp(&self) -> Option<SystemTime> {
        let bytes: [u8; TIMESTAMP_SIZE] = self.payload.get(..TIMESTAMP_SIZE)?.try_into().ok()?;
        UNIX_EPOCH.checked_add(Duration::from_nanos(u64::from_be_bytes(bytes)))
    }

    /// Size of the whole ICMP message.
    pub fn size(&self) -> usize {
        ICMP_HEADER_SIZE + self.payload.len()
    }
}

/// Parses an ICMP message (without IP header) received on a `family` socket.
///
/// Only echo messages are recognized. Anything else, such as Destination
/// Unreachable, is a `PingError::Parse` for the caller to discard.
pub fn parse_reply(bytes: &[u8], family: IpFamily) -> Result<EchoReply, PingError> {
    let package = EchoReplyPacket::new(bytes).ok_or_else(|| {
        PingError::Parse(format!("truncated ICMP message of {} bytes", bytes.len()))
    })?;
    let icmp_type = package.get_icmp_type().0;
    if icmp_type != family.echo_reply_type() && icmp_type != family.echo_request_type() {
        return Err(PingError::Parse(format!("unexpected ICMP type {icmp_type} for {family}")));
    }
    Ok(EchoReply {
        icmp_type,
        code: package.get_icmp_code().0,
        identifier: package.get_identifier(),
        sequence_number: package.get_sequence_number().into(),
        payload: package.payload().to_vec(),
    })
}
