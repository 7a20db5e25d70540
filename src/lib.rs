//! ICMP echo (ping) over raw sockets, for IPv4 and IPv6.
//!
//! Resolve a host once, then send probes through a [`Session`]. Each probe
//! opens its own raw socket, sends one echo request and waits for the matching
//! reply until the configured timeout. Raw sockets need root or `CAP_NET_RAW`.
//!
//! ```no_run
//! use pulse::{PingConfig, SequenceNumber, Session};
//!
//! let mut session = Session::new("localhost", PingConfig::default()).unwrap();
//! let result = session.send_probe(SequenceNumber::start_value());
//! println!("{:?}", result.rtt());
//! println!("{:?}", session.statistics());
//! ```
#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub use icmp::{
    build_echo_request, checksum, parse_reply, EchoReply, IcmpSocket, IpFamily, RawSocket, RawSocketOpener,
    SequenceNumber, SocketOpener, Ttl,
};
pub use ping_config::*;
pub use ping_error::{GenericError, PingError, PingResult};
pub use ping_runner::run;
pub use ping_stats::PingStats;
pub use probe_result::{ProbeReplyData, ProbeResult};
pub use resolve::{resolve, Target};
pub use session::Session;
pub use stop_condition::StopCondition;

pub mod icmp;
mod ping_config;
mod ping_error;
mod ping_runner;
mod ping_stats;
mod probe_result;
mod reply_wait;
mod resolve;
mod session;
mod stop_condition;
