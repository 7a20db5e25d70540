use std::time::Duration;

/// Running counters of one session. Only the probing task mutates them.
#[derive(Clone, Debug, Default)]
pub(crate) struct ProbeRecords {
    sent: u64,
    rtts: Vec<Duration>,
}

impl ProbeRecords {
    pub(crate) fn record_sent(&mut self) {
        self.sent += 1;
    }

    pub(crate) fn record_received(&mut self, rtt: Duration) {
        self.rtts.push(rtt);
    }

    pub(crate) fn stats(&self) -> PingStats {
        PingStats::from_records(self.sent, &self.rtts)
    }
}

/// Summary of a session. Durations are zero when nothing was received.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PingStats {
    pub sent: u64,
    pub received: u64,
    pub lost: u64,
    /// Percentage in `0.0..=100.0`, zero when nothing was sent.
    pub loss: f64,
    pub min: Duration,
    pub avg: Duration,
    pub max: Duration,
}

impl PingStats {
    fn from_records(sent: u64, rtts: &[Duration]) -> Self {
        let received = rtts.len() as u64;
        let lost = sent.saturating_sub(received);
        let loss = if sent == 0 { 0.0 } else { lost as f64 / sent as f64 * 100.0 };
        let mut stats = PingStats { sent, received, lost, loss, ..PingStats::default() };

        let (Some(&min), Some(&max)) = (rtts.iter().min(), rtts.iter().max()) else {
            return stats;
        };
        let total: Duration = rtts.iter().sum();
        let avg_nanos = total.as_nanos() / u128::from(received);
        stats.min = min;
        stats.max = max;
        stats.avg = Duration::from_nanos(u64::try_from(avg_nanos).unwrap_or(u64::MAX));
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn records(sent: u64, rtts: &[Duration]) -> ProbeRecords {
        let mut records = ProbeRecords::default();
        for _ in 0..sent {
            records.record_sent();
        }
        for rtt in rtts {
            records.record_received(*rtt);
        }
        records
    }

    #[test]
    fn empty_session() {
        let stats = ProbeRecords::default().stats();
        assert_eq!(PingStats::default(), stats);
        assert_eq!(0.0, stats.loss);
    }

    #[test]
    fn nothing_received() {
        let stats = records(3, &[]).stats();
        assert_eq!(3, stats.sent);
        assert_eq!(0, stats.received);
        assert_eq!(3, stats.lost);
        assert_eq!(100.0, stats.loss);
        assert_eq!(Duration::ZERO, stats.min);
        assert_eq!(Duration::ZERO, stats.avg);
        assert_eq!(Duration::ZERO, stats.max);
    }

    #[test]
    fn min_avg_max_over_received() {
        let stats = records(4, &[ms(30), ms(10), ms(20)]).stats();
        assert_eq!(ms(10), stats.min);
        assert_eq!(ms(20), stats.avg);
        assert_eq!(ms(30), stats.max);
        assert_eq!(1, stats.lost);
        assert_eq!(25.0, stats.loss);
    }

    #[test]
    fn loss_for_every_k_of_n() {
        let n = 8_u64;
        for k in 0..=n {
            let rtts = vec![ms(1); usize::try_from(k).unwrap()];
            let stats = records(n, &rtts).stats();
            assert_eq!(n, stats.sent);
            assert_eq!(k, stats.received);
            assert_eq!(n - k, stats.lost);
            assert!((stats.loss - 100.0 * (n - k) as f64 / n as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn average_of_uneven_durations() {
        let stats = records(2, &[Duration::from_nanos(1), Duration::from_nanos(2)]).stats();
        assert_eq!(Duration::from_nanos(1), stats.avg);
    }
}
