use std::str::FromStr;
use std::time::{Duration, Instant};

use netcheck_common::network::outcome::{Protocol, Verdict};
use netcheck_common::network::target::Target;
use netcheck_core::network::udp::{BACKSTOP_SLACK, PROBE_PAYLOAD};
use netcheck_core::network::{Prober, UdpProber};

use crate::utils;

#[tokio::test]
async fn udp_echo_listener_is_open() {
    let socket = utils::bind_udp(19998).await;
    let target = utils::target(socket.local_addr().unwrap());
    let echo = utils::spawn_udp_echo(socket);

    let start = Instant::now();
    let outcome = UdpProber.probe(&target, Duration::from_secs(2)).await;

    assert_eq!(outcome.verdict, Verdict::Open);
    assert_eq!(outcome.protocol, Protocol::Udp);
    assert!(start.elapsed() < Duration::from_secs(2));
    echo.abort();
}

#[tokio::test]
async fn udp_unassigned_port_is_closed_within_backstop() {
    let target = Target::from_str("127.0.0.1:1").unwrap();
    let probe_timeout = Duration::from_secs(1);

    let start = Instant::now();
    let outcome = UdpProber.probe(&target, probe_timeout).await;

    assert_eq!(outcome.verdict, Verdict::Closed);
    assert!(start.elapsed() <= probe_timeout + BACKSTOP_SLACK);
}

#[tokio::test]
async fn udp_silent_listener_is_closed_even_though_it_received() {
    let socket = utils::bind_udp(0).await;
    let target = utils::target(socket.local_addr().unwrap());
    let (sink, mut received) = utils::spawn_udp_sink(socket);

    let outcome = UdpProber.probe(&target, Duration::from_secs(1)).await;

    let payload = received.try_recv().expect("the listener never saw the datagram");
    assert_eq!(payload, PROBE_PAYLOAD);
    assert_eq!(outcome.verdict, Verdict::Closed);
    sink.abort();
}
