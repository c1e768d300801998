use std::str::FromStr;
use std::time::{Duration, Instant};

use netcheck_common::network::outcome::{Protocol, Verdict};
use netcheck_common::network::target::Target;
use netcheck_core::network::{Prober, TcpProber};

use crate::utils;

#[tokio::test]
async fn tcp_discard_port_without_listener_is_closed() {
    let target = Target::from_str("127.0.0.1:9").unwrap();
    let probe_timeout = Duration::from_secs(2);
    let start = Instant::now();

    let outcome = TcpProber.probe(&target, probe_timeout).await;

    assert_eq!(outcome.verdict, Verdict::Closed);
    assert_eq!(outcome.protocol, Protocol::Tcp);
    assert!(outcome.cause.is_some());
    assert!(start.elapsed() < probe_timeout + Duration::from_millis(500));
}

#[tokio::test]
async fn tcp_listener_is_open() {
    let listener = utils::bind_tcp(19999).await;
    let target = utils::target(listener.local_addr().unwrap());

    let outcome = TcpProber.probe(&target, Duration::from_secs(2)).await;

    assert_eq!(outcome.verdict, Verdict::Open);
    assert!(outcome.cause.is_none());
}

#[tokio::test]
async fn tcp_probe_does_not_hold_connections() {
    let listener = utils::bind_tcp(0).await;
    let target = utils::target(listener.local_addr().unwrap());

    for _ in 0..3 {
        let outcome = TcpProber.probe(&target, Duration::from_secs(2)).await;
        assert_eq!(outcome.verdict, Verdict::Open);
    }

    // Every queued connection was already closed by the prober.
    for _ in 0..3 {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1];
        let n = tokio::io::AsyncReadExt::read(&mut stream, &mut buf).await.unwrap();
        assert_eq!(n, 0);
    }
}
