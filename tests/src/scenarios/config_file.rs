use std::io::Write;
use std::time::Duration;

use netcheck_common::config::ProbeConfig;
use netcheck_common::error::ProbeError;
use netcheck_common::network::outcome::{Protocol, Verdict};
use netcheck_core::runner::{Runner, Summary};

use crate::utils;

fn write_config(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn run_from_file_reports_every_target_in_order() {
    let listener = utils::bind_tcp(0).await;
    let tcp_open = listener.local_addr().unwrap();
    let tcp_closed = {
        let spare = utils::bind_tcp(0).await;
        spare.local_addr().unwrap()
    };
    let socket = utils::bind_udp(0).await;
    let udp_open = socket.local_addr().unwrap();
    let echo = utils::spawn_udp_echo(socket);

    let file = write_config(&format!(
        "tcp:\n  - \"{tcp_open}\"\n  - \"{tcp_closed}\"\nudp:\n  - \"{udp_open}\"\ntimeout_seconds: 2\n"
    ));
    let config = ProbeConfig::from_file(file.path()).unwrap();
    config.validate().unwrap();

    let mut streamed = Vec::new();
    let outcomes = Runner::default()
        .run(&config, |o| streamed.push((o.protocol, o.verdict)))
        .await
        .unwrap();

    let expected = vec![
        (Protocol::Tcp, Verdict::Open),
        (Protocol::Tcp, Verdict::Closed),
        (Protocol::Udp, Verdict::Open),
    ];
    assert_eq!(streamed, expected);
    assert_eq!(outcomes[0].target.to_string(), tcp_open.to_string());
    assert_eq!(Summary::from(outcomes.as_slice()), Summary { open: 2, closed: 1 });
    echo.abort();
}

#[tokio::test]
async fn malformed_entry_is_reported_closed_in_place() {
    let listener = utils::bind_tcp(0).await;
    let open = listener.local_addr().unwrap();
    let file = write_config(&format!(
        "tcp:\n  - \"127.0.0.1:9\"\n  - \"bad-target\"\n  - \"{open}\"\ntimeout_seconds: 1\n"
    ));

    let config = ProbeConfig::from_file(file.path()).unwrap();
    config.validate().unwrap();
    let outcomes = Runner::default().run(&config, |_| {}).await.unwrap();

    let lines: Vec<(String, Verdict)> = outcomes.iter().map(|o| (o.target.to_string(), o.verdict)).collect();
    assert_eq!(
        lines,
        vec![
            ("127.0.0.1:9".to_string(), Verdict::Closed),
            ("bad-target".to_string(), Verdict::Closed),
            (open.to_string(), Verdict::Open),
        ]
    );
    assert!(matches!(outcomes[1].cause, Some(ProbeError::Resolution(_))));
}

#[tokio::test]
async fn run_twice_gives_same_verdicts() {
    let listener = utils::bind_tcp(0).await;
    let addr = listener.local_addr().unwrap();
    let file = write_config(&format!("tcp: [\"{addr}\", \"127.0.0.1:9\"]\ntimeout_seconds: 1\n"));
    let config = ProbeConfig::from_file(file.path()).unwrap();

    let runner = Runner::default().with_jobs(2);
    let first = runner.run(&config, |_| {}).await.unwrap();
    let second = runner.run(&config, |_| {}).await.unwrap();

    let verdicts = |o: &[netcheck_common::network::outcome::ProbeOutcome]| {
        o.iter().map(|x| x.verdict).collect::<Vec<_>>()
    };
    assert_eq!(verdicts(&first), verdicts(&second));
    assert_eq!(verdicts(&first), vec![Verdict::Open, Verdict::Closed]);
}

#[tokio::test]
async fn zero_timeout_is_rejected_before_probing() {
    let file = write_config("tcp: [\"127.0.0.1:9\"]\ntimeout_seconds: 0\n");
    let config = ProbeConfig::from_file(file.path()).unwrap();

    assert!(config.validate().is_err());
    assert!(Runner::default().run(&config, |_| {}).await.is_err());

    let fixed = config.with_timeout_seconds(1);
    assert_eq!(fixed.timeout().unwrap(), Duration::from_secs(1));
}
