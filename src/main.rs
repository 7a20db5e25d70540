use pulse::{
    payload_size_from_signed, GenericError, PingConfig, PingError, PingStats, ProbeResult, Session, StopCondition,
};
use std::io::ErrorKind;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(argh::FromArgs)]
/// pulse - send ICMP ECHO_REQUEST packets to a host (needs root or CAP_NET_RAW)
struct Args {
    #[argh(option, short = 'c', default = "pulse::DEFAULT_COUNT as i64")]
    /// number of pings to send (-1 = infinite)
    count: i64,

    #[argh(switch, short = 't')]
    /// infinite ping mode (same as -c -1)
    infinite: bool,

    #[argh(option, short = 'i', default = "1.0")]
    /// interval between pings in seconds
    interval: f64,

    #[argh(option, default = "3.0")]
    /// per-packet timeout in seconds
    timeout: f64,

    #[argh(option, short = 's', default = "pulse::DEFAULT_PAYLOAD_SIZE as i64")]
    /// payload size in bytes
    size: i64,

    #[argh(switch, short = 'v')]
    /// verbose: show packet timestamps
    verbose: bool,

    #[argh(positional)]
    /// host name or IP address
    host: String,
}

fn seconds(value: f64, what: &str) -> Result<Duration, PingError> {
    Duration::try_from_secs_f64(value).map_err(|e| PingError::Encoding(format!("invalid {what} {value}: {e}")))
}

fn config_from_args(args: &Args) -> Result<PingConfig, PingError> {
    Ok(PingConfig {
        count: u64::try_from(args.count).ok().filter(|_| !args.infinite),
        interval: seconds(args.interval, "interval")?,
        timeout: seconds(args.timeout, "timeout")?,
        payload_size: payload_size_from_signed(args.size)?,
        verbose: args.verbose,
    })
}

fn fmt_rtt(rtt: Duration) -> String {
    format!("{:.3} ms", rtt.as_secs_f64() * 1000.0)
}

fn timestamp_prefix() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("[{}.{:06}] ", now.as_secs(), now.subsec_micros())
}

fn print_result(result: &ProbeResult, verbose: bool) {
    let prefix = if verbose { timestamp_prefix() } else { String::new() };
    let sequence_number = result.sequence_number;
    if let Some(error) = &result.error {
        let hint = match error {
            PingError::Socket(e) if e.kind() == ErrorKind::PermissionDenied => " (try running as root)",
            _ => "",
        };
        eprintln!("{prefix}pulse: icmp_seq={sequence_number} failed: {error}{hint}");
    } else if let Some(reply) = &result.reply {
        let ttl = reply.ttl.map(|ttl| format!(" ttl={ttl}")).unwrap_or_default();
        println!(
            "{prefix}{} bytes from {}: icmp_seq={sequence_number}{ttl} time={}",
            reply.package_size,
            reply.ip_addr,
            fmt_rtt(reply.rtt)
        );
    } else {
        println!("{prefix}Request timeout for icmp_seq={sequence_number}");
    }
}

fn print_stats(host: &str, stats: &PingStats) {
    println!();
    println!("--- {host} ping statistics ---");
    println!(
        "{} packets transmitted, {} received, {:.1}% packet loss",
        stats.sent, stats.received, stats.loss
    );
    if stats.received > 0 {
        println!("rtt min/avg/max = {} / {} / {}", fmt_rtt(stats.min), fmt_rtt(stats.avg), fmt_rtt(stats.max));
    }
}

fn main() -> Result<(), GenericError> {
    let args: Args = argh::from_env();

    let level = if args.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let session = config_from_args(&args).and_then(|config| Session::new(&args.host, config));
    let mut session = match session {
        Ok(session) => session,
        Err(e) => {
            eprintln!("pulse: {e}");
            std::process::exit(1);
        }
    };

    let stop = StopCondition::new();
    let stopper = stop.clone();
    ctrlc::set_handler(move || stopper.set_should_stop())?;

    let target = session.target().clone();
    println!(
        "PULSE {} ({}): {} data bytes, {} bytes per packet",
        target.host,
        target.addr,
        session.config().payload_size,
        session.config().payload_size + pulse::icmp::ICMP_HEADER_SIZE
    );

    let verbose = args.verbose;
    let stats = pulse::run(&mut session, &stop, |result| print_result(result, verbose));
    print_stats(&target.host, &stats);

    Ok(())
}
