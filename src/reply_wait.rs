use crate::icmp::{parse_reply, EchoReply, IpFamily, SequenceNumber};
use crate::{PingError, PingResult};
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum WaitState {
    Waiting,
    Matched { rtt: Duration, reply: EchoReply },
    Expired,
}

/// Waits for the echo reply to one outstanding request.
///
/// The deadline is fixed when the wait is armed. Datagrams that do not match
/// are discarded without moving it.
pub(crate) struct ReplyWait {
    family: IpFamily,
    identifier: u16,
    sequence_number: SequenceNumber,
    sent_at: Instant,
    deadline: Instant,
    state: WaitState,
}

impl ReplyWait {
    pub(crate) fn arm(
        family: IpFamily,
        identifier: u16,
        sequence_number: SequenceNumber,
        sent_at: Instant,
        timeout: Duration,
    ) -> PingResult<Self> {
        let deadline = Instant::now()
            .checked_add(timeout)
            .ok_or_else(|| PingError::Encoding(format!("timeout {timeout:?} is out of range")))?;
        Ok(ReplyWait { family, identifier, sequence_number, sent_at, deadline, state: WaitState::Waiting })
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &WaitState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn into_state(self) -> WaitState {
        self.state
    }

    /// Time left to wait as of `now`, or `None` once the wait is over.
    pub(crate) fn remaining(&mut self, now: Instant) -> Option<Duration> {
        if self.state != WaitState::Waiting {
            return None;
        }
        let remaining = self.deadline.saturating_duration_since(now);
        if remaining.is_zero() {
            self.state = WaitState::Expired;
            return None;
        }
        Some(remaining)
    }

    pub(crate) fn on_datagram(&mut self, bytes: &[u8], received_at: Instant) -> &WaitState {
        if self.state != WaitState::Waiting {
            return &self.state;
        }
        if received_at > self.deadline {
            self.state = WaitState::Expired;
            return &self.state;
        }
        match parse_reply(bytes, self.family) {
            Err(e) => tracing::trace!("discarding datagram: {e}"),
            Ok(reply) if reply.icmp_type != self.family.echo_reply_type() => {
                tracing::trace!("discarding ICMP type {}", reply.icmp_type);
            }
            Ok(reply) if reply.identifier != self.identifier => {
                tracing::trace!("discarding reply with foreign identifier {:#06x}", reply.identifier);
            }
            Ok(reply) if reply.sequence_number != self.sequence_number => {
                tracing::trace!(
                    "discarding reply with sequence number {} while waiting for {}",
                    reply.sequence_number,
                    self.sequence_number
                );
            }
            Ok(reply) => {
                let rtt = received_at.saturating_duration_since(self.sent_at);
                self.state = WaitState::Matched { rtt, reply };
            }
        }
        &self.state
    }
}
