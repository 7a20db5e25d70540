use crate::icmp::{build_echo_request, IcmpSocket, RawSocketOpener, SequenceNumber, SocketOpener};
use crate::ping_stats::ProbeRecords;
use crate::reply_wait::{ReplyWait, WaitState};
use crate::{resolve, PingConfig, PingResult, PingStats, ProbeReplyData, ProbeResult, Target};
use std::io;
use std::net::SocketAddr;
use std::time::Instant;

/// Large enough for any IPv4 datagram including its header.
const RECV_BUFFER_SIZE: usize = 65_535;

/// One ping run against one resolved target.
pub struct Session<O = RawSocketOpener> {
    config: PingConfig,
    target: Target,
    identifier: u16,
    opener: O,
    records: ProbeRecords,
}

impl Session<RawSocketOpener> {
    /// Validates `config`, resolves `host` and picks a random identifier.
    pub fn new(host: &str, config: PingConfig) -> PingResult<Self> {
        // Fail on a bad config before any DNS traffic.
        config.validate()?;
        let target = resolve(host)?;
        Self::with_opener(target, config, rand::random(), RawSocketOpener)
    }
}

impl<O> Session<O>
where
    O: SocketOpener,
{
    pub fn with_opener(target: Target, config: PingConfig, identifier: u16, opener: O) -> PingResult<Self> {
        config.validate()?;
        tracing::debug!("session for {} ({}) with identifier {identifier:#06x}", target.host, target.addr);
        Ok(Session { config, target, identifier, opener, records: ProbeRecords::default() })
    }

    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn config(&self) -> &PingConfig {
        &self.config
    }

    /// Sends one echo request and waits up to the configured timeout for its reply.
    pub fn send_probe(&mut self, sequence_number: SequenceNumber) -> ProbeResult {
        self.records.record_sent();
        match self.probe(sequence_number) {
            Ok(Some(reply)) => {
                tracing::trace!("reply {sequence_number} from {} after {:?}", reply.ip_addr, reply.rtt);
                self.records.record_received(reply.rtt);
                ProbeResult::received(sequence_number, reply)
            }
            Ok(None) => {
                tracing::debug!("no reply for {sequence_number} within {:?}", self.config.timeout);
                ProbeResult::timed_out(sequence_number)
            }
            Err(e) => {
                tracing::warn!("probe {sequence_number} failed: {e}");
                ProbeResult::failed(sequence_number, e)
            }
        }
    }

    /// Snapshot of the counters so far.
    pub fn statistics(&self) -> PingStats {
        self.records.stats()
    }

    fn probe(&self, sequence_number: SequenceNumber) -> PingResult<Option<ProbeReplyData>> {
        let family = self.target.family;
        // Closed on every return path when dropped.
        let socket = self.opener.open(family)?;
        let request = build_echo_request(sequence_number, self.identifier, self.config.payload_size, family)?;
        let addr: socket2::SockAddr = SocketAddr::new(self.target.addr, 0).into();

        let sent_at = Instant::now();
        socket.send_to(&request, &addr)?;
        tracing::trace!("echo request {sequence_number} sent to {}", self.target.addr);

        let mut wait = ReplyWait::arm(family, self.identifier, sequence_number, sent_at, self.config.timeout)?;
        let mut buf = vec![0u8; RECV_BUFFER_SIZE];
        while let Some(remaining) = wait.remaining(Instant::now()) {
            socket.set_read_timeout(remaining)?;
            let (n, ip_addr, ttl) = match socket.recv_from(&mut buf) {
                Ok(received) => received,
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => continue,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    tracing::trace!("discarding malformed datagram: {e}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let received_at = Instant::now();
            if let WaitState::Matched { rtt, reply } = wait.on_datagram(&buf[..n], received_at) {
                return Ok(Some(ProbeReplyData {
                    package_size: reply.size(),
                    ip_addr,
                    ttl,
                    rtt: *rtt,
                    send_timestamp: reply.send_timestamp(),
                }));
            }
        }
        Ok(None)
    }
}
