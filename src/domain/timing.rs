//! Durations and operation deadlines

use std::time::{Duration, Instant};

use crate::domain::DomainError;

/// Parse a duration such as `500ms`, `5s`, `2m`, `1h`, `1m30s` or `1.5s`.
///
/// A bare `0` means zero. Units: `ms`, `s`, `m`, `h`.
pub fn parse_duration(input: &str) -> Result<Duration, DomainError> {
    let invalid = |message: &str| DomainError::InvalidDuration {
        input: input.to_string(),
        message: message.to_string(),
    };

    let text = input.trim();
    if text.is_empty() {
        return Err(invalid("empty"));
    }
    if text == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total_millis = 0f64;
    let mut rest = text;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid("expected a number"));
        }
        let value: f64 = rest[..number_len]
            .parse()
            .map_err(|_| invalid("malformed number"))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let millis_per_unit = match &rest[..unit_len] {
            "ms" => 1.0,
            "s" => 1_000.0,
            "m" => 60_000.0,
            "h" => 3_600_000.0,
            "" => return Err(invalid("missing unit (ms, s, m, h)")),
            _ => return Err(invalid("unknown unit (ms, s, m, h)")),
        };
        rest = &rest[unit_len..];

        total_millis += value * millis_per_unit;
    }

    Duration::try_from_secs_f64(total_millis / 1_000.0).map_err(|_| invalid("out of range"))
}

/// Point in time after which an operation is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// `None` for a zero timeout, which means "no deadline".
    pub fn from_timeout(timeout: Duration) -> Option<Self> {
        (!timeout.is_zero()).then(|| Self::after(timeout))
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn is_expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Duration::ZERO)]
    #[case("5s", Duration::from_secs(5))]
    #[case("500ms", Duration::from_millis(500))]
    #[case("2m", Duration::from_secs(120))]
    #[case("1h", Duration::from_secs(3600))]
    #[case("1m30s", Duration::from_secs(90))]
    #[case("1.5s", Duration::from_millis(1500))]
    #[case(" 10s ", Duration::from_secs(10))]
    fn given_valid_input_when_parsing_then_returns_duration(
        #[case] input: &str,
        #[case] expected: Duration,
    ) {
        assert_eq!(parse_duration(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("5")]
    #[case("s")]
    #[case("5d")]
    #[case("1..2s")]
    #[case("-1s")]
    fn given_invalid_input_when_parsing_then_fails(#[case] input: &str) {
        assert!(matches!(
            parse_duration(input),
            Err(DomainError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn given_zero_timeout_when_building_deadline_then_none() {
        assert!(Deadline::from_timeout(Duration::ZERO).is_none());
    }

    #[test]
    fn given_zero_budget_when_checking_then_expired() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.is_expired());
    }

    #[test]
    fn given_long_budget_when_checking_then_not_expired() {
        let deadline = Deadline::from_timeout(Duration::from_secs(3600)).unwrap();
        assert!(!deadline.is_expired());
        assert_eq!(deadline.budget(), Duration::from_secs(3600));
    }
}
