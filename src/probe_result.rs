use crate::icmp::{SequenceNumber, Ttl};
use crate::PingError;
use std::net::IpAddr;
use std::time::{Duration, SystemTime};

/// What came back for a received probe.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeReplyData {
    /// Size of the ICMP reply message.
    pub package_size: usize,
    pub ip_addr: IpAddr,
    /// Only known for IPv4.
    pub ttl: Option<Ttl>,
    pub rtt: Duration,
    /// Send time the request carried in its payload, echoed back by the peer.
    pub send_timestamp: Option<SystemTime>,
}

/// Outcome of one probe.
///
/// A timeout is `reply == None` with no error. `error` is set only when the
/// probe could not be carried out (socket or encoding failure).
#[derive(Debug)]
pub struct ProbeResult {
    pub sequence_number: SequenceNumber,
    pub reply: Option<ProbeReplyData>,
    pub error: Option<PingError>,
}

impl ProbeResult {
    pub(crate) fn received(sequence_number: SequenceNumber, reply: ProbeReplyData) -> Self {
        ProbeResult { sequence_number, reply: Some(reply), error: None }
    }

    pub(crate) fn timed_out(sequence_number: SequenceNumber) -> Self {
        ProbeResult { sequence_number, reply: None, error: None }
    }

    pub(crate) fn failed(sequence_number: SequenceNumber, error: PingError) -> Self {
        ProbeResult { sequence_number, reply: None, error: Some(error) }
    }

    pub fn is_received(&self) -> bool {
        self.reply.is_some()
    }

    pub fn is_timeout(&self) -> bool {
        self.reply.is_none() && self.error.is_none()
    }

    pub fn rtt(&self) -> Option<Duration> {
        self.reply.as_ref().map(|reply| reply.rtt)
    }
}
