use crate::icmp::{SequenceNumber, SocketOpener};
use crate::{PingStats, ProbeResult, Session, StopCondition};

/// Probes `session` until the configured count is reached or `stop` is set.
///
/// `stop` is checked before each probe and awaited during the interval between
/// probes. A probe already in flight runs until its reply or timeout.
pub fn run<O, F>(session: &mut Session<O>, stop: &StopCondition, mut on_result: F) -> PingStats
where
    O: SocketOpener,
    F: FnMut(&ProbeResult),
{
    let count = session.config().count;
    let interval = session.config().interval;
    let mut sequence_number = SequenceNumber::start_value();
    let mut issued: u64 = 0;

    loop {
        if count.map_or(false, |count| issued >= count) || stop.get_should_stop() {
            break;
        }
        let result = session.send_probe(sequence_number);
        issued += 1;
        on_result(&result);
        sequence_number = sequence_number.next();

        let more_to_send = count.map_or(true, |count| issued < count);
        if more_to_send && stop.wait_timeout(interval) {
            tracing::debug!("stopped after {issued} probes");
            break;
        }
    }
    session.statistics()
}
