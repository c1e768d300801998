use std::time::Duration;

use crate::terminal::colors;
use colored::*;
use netcheck_common::network::outcome::{ProbeOutcome, Verdict};

/// One result line: `host:port PROTO VERDICT (cause) 12ms`.
pub fn outcome_line(outcome: &ProbeOutcome) -> String {
    let verdict: ColoredString = match outcome.verdict {
        Verdict::Open => outcome.verdict.to_string().color(colors::OPEN).bold(),
        Verdict::Closed => outcome.verdict.to_string().color(colors::CLOSED).bold(),
    };

    let mut line: String = format!(
        "{} {} {}",
        outcome.target.to_string().color(colors::PRIMARY),
        outcome.protocol.to_string().color(colors::TEXT_DEFAULT),
        verdict
    );

    if let Some(cause) = &outcome.cause {
        line.push_str(&format!(" {}", format!("({cause})").color(colors::CAUSE)));
    }

    line.push_str(&format!(" {}", elapsed(outcome.elapsed).dimmed()));
    line
}

pub fn elapsed(duration: Duration) -> String {
    if duration < Duration::from_secs(1) {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcheck_common::error::ProbeError;
    use netcheck_common::network::outcome::Protocol;
    use netcheck_common::network::target::Target;
    use std::str::FromStr;

    #[test]
    fn test_outcome_line_plain_text() {
        colored::control::set_override(false);
        let target = Target::from_str("127.0.0.1:9").unwrap();

        let open = ProbeOutcome::open(target.clone(), Protocol::Tcp, Duration::from_millis(3));
        assert_eq!(outcome_line(&open), "127.0.0.1:9 TCP OPEN 3ms");

        let closed = ProbeOutcome::closed(target, Protocol::Udp, ProbeError::Refused, Duration::from_millis(1500));
        assert_eq!(outcome_line(&closed), "127.0.0.1:9 UDP CLOSED (connection refused) 1.50s");
    }

    #[test]
    fn test_verdicts_use_distinct_palette_entries() {
        assert_ne!(colors::OPEN, colors::CLOSED);
        assert_ne!(colors::CAUSE, colors::CLOSED);
    }

    #[test]
    fn test_elapsed_units() {
        assert_eq!(elapsed(Duration::from_millis(999)), "999ms");
        assert_eq!(elapsed(Duration::from_secs(3)), "3.00s");
    }
}
