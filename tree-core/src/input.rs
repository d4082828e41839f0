//! Turning the user's comma-separated text into insertion values.

use crate::error::InputError;
use rand::Rng;
use std::ops::RangeInclusive;

/// Parses a comma-separated list of integers, keeping their order.
///
/// Tokens are trimmed; empty and non-integer tokens are dropped. Blank input
/// and input without a single integer are reported as different errors so
/// the caller can tell "nothing typed" from "nothing usable typed".
///
/// ### Returns
/// - `Ok(values)` with at least one value.
/// - `Err(InputError::Blank)` if `text` holds only whitespace and commas.
/// - `Err(InputError::NoIntegers)` listing the tokens that were dropped.
pub fn parse_values(text: &str) -> Result<Vec<i64>, InputError> {
    let tokens: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(InputError::Blank);
    }

    let (values, rejected): (Vec<_>, Vec<_>) = tokens
        .iter()
        .map(|t| t.parse::<i64>().map_err(|_| *t))
        .partition(Result::is_ok);

    let values: Vec<i64> = values.into_iter().filter_map(Result::ok).collect();
    let rejected: Vec<String> = rejected
        .into_iter()
        .filter_map(Result::err)
        .map(str::to_owned)
        .collect();

    if values.is_empty() {
        return Err(InputError::NoIntegers { rejected });
    }
    if !rejected.is_empty() {
        log::debug!("dropped non-integer tokens: {rejected:?}");
    }
    Ok(values)
}

/// Formats values the way [`parse_values`] reads them.
pub fn format_values(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Draws `count` values uniformly from `range` for a quick demo input.
///
/// Repeats are possible; the builder treats them as no-ops.
pub fn random_values(count: usize, range: RangeInclusive<i64>, rng: &mut impl Rng) -> Vec<i64> {
    (0..count)
        .map(|_| rng.random_range(range.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn parses_and_trims() {
        assert_eq!(parse_values("50, 30,70 ,  20"), Ok(vec![50, 30, 70, 20]));
        assert_eq!(parse_values("-4,+9"), Ok(vec![-4, 9]));
    }

    #[test]
    fn drops_garbage_tokens() {
        assert_eq!(parse_values("1, x, 2.5, 3,,"), Ok(vec![1, 3]));
    }

    #[test]
    fn blank_and_unusable_input_are_distinct() {
        assert_eq!(parse_values(""), Err(InputError::Blank));
        assert_eq!(parse_values("  , ,"), Err(InputError::Blank));
        assert_eq!(
            parse_values("abc, ,,"),
            Err(InputError::NoIntegers {
                rejected: vec!["abc".to_owned()]
            })
        );
    }

    #[test]
    fn formatted_values_parse_back() {
        let values = vec![8, -3, 12];
        assert_eq!(format_values(&values), "8, -3, 12");
        assert_eq!(parse_values(&format_values(&values)), Ok(values));
    }

    #[test]
    fn random_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = random_values(50, 1..=99, &mut rng);

        assert_eq!(values.len(), 50);
        assert!(values.iter().all(|v| (1..=99).contains(v)));
    }
}
