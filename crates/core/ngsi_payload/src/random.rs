use crate::StepTable;
use rand::distr::Alphanumeric;
use rand::Rng;
use regex::Captures;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;
use tracing::warn;

/// Longer `random=<N>` tokens are left unchanged.
pub const MAX_RANDOM_LEN: usize = 65536;

static RANDOM_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"random=(\d+)").expect("valid random token pattern"));

/// Replace every `random=<N>` token of the `labels` values by `N` alphanumeric characters.
///
/// The text around the token, quotes included, is kept unchanged.
pub fn substitute_random(labels: &[&str], table: StepTable) -> StepTable {
    substitute_random_with(&mut rand::rng(), labels, table)
}

pub fn substitute_random_with<R: Rng + ?Sized>(
    rng: &mut R,
    labels: &[&str],
    table: StepTable,
) -> StepTable {
    table.map_values(|parameter, value| {
        if !labels.contains(&parameter) || !RANDOM_TOKEN.is_match(&value) {
            return value;
        }
        let substituted = RANDOM_TOKEN
            .replace_all(&value, |captures: &Captures| {
                match captures[1].parse::<usize>() {
                    Ok(len) if len <= MAX_RANDOM_LEN => random_string(&mut *rng, len),
                    _ => {
                        warn!(
                            "Keeping {:?} of {parameter:?}: at most {MAX_RANDOM_LEN} random characters",
                            &captures[0]
                        );
                        captures[0].to_string()
                    }
                }
            })
            .into_owned();
        debug!("Random value for {parameter:?}: {substituted:?}");
        substituted
    })
}

pub fn random_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    const LABELS: &[&str] = &["entities_id", "attributes_value"];

    #[test]
    fn only_labelled_fields_are_substituted() {
        let table = StepTable::new()
            .with("entities_id", "random=7")
            .with("entities_type", "random=7");

        let table = substitute_random(LABELS, table);

        let id = table.get("entities_id").unwrap();
        assert_eq!(id.len(), 7);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(table.get("entities_type"), Some("random=7"));
    }

    #[test]
    fn quotes_and_surrounding_text_are_kept() {
        let table = StepTable::new().with("attributes_value", "\"room_random=4_x\"");

        let table = substitute_random(LABELS, table);

        let value = table.get("attributes_value").unwrap();
        assert_eq!(value.len(), "\"room__x\"".len() + 4);
        assert!(value.starts_with("\"room_"));
        assert!(value.ends_with("_x\""));
    }

    #[test]
    fn the_same_seed_gives_the_same_values() {
        let table = StepTable::new().with("entities_id", "random=12");

        let first = substitute_random_with(&mut StdRng::seed_from_u64(42), LABELS, table.clone());
        let second = substitute_random_with(&mut StdRng::seed_from_u64(42), LABELS, table);

        assert_eq!(first, second);
    }

    #[test]
    fn zero_length_removes_the_token() {
        let table = StepTable::new().with("entities_id", "Room_random=0");
        let table = substitute_random(LABELS, table);
        assert_eq!(table.get("entities_id"), Some("Room_"));
    }

    #[test_case("Room_random=99999999999999999999999"; "overflowing length")]
    #[test_case("Room_random=65537"; "too long")]
    fn oversized_tokens_are_kept(value: &str) {
        let table = StepTable::new().with("entities_id", value);
        let table = substitute_random(LABELS, table);
        assert_eq!(table.get("entities_id"), Some(value));
    }

    #[test]
    fn the_longest_token_is_substituted() {
        let table = StepTable::new().with("entities_id", format!("random={MAX_RANDOM_LEN}"));
        let table = substitute_random(LABELS, table);
        assert_eq!(table.get("entities_id").map(str::len), Some(MAX_RANDOM_LEN));
    }

    proptest! {
        #[test]
        fn substituted_length_matches_the_requested_length(
            len in 0usize..64,
            prefix in "[a-z\"]{0,5}",
            suffix in "[a-z\"]{0,5}",
        ) {
            let value = format!("{prefix}random={len}{suffix}");
            let table = StepTable::new().with("entities_id", value);

            let table = substitute_random(LABELS, table);
            let substituted = table.get("entities_id").unwrap();

            prop_assert_eq!(substituted.len(), prefix.len() + len + suffix.len());
            prop_assert!(substituted.starts_with(&prefix));
            prop_assert!(substituted.ends_with(&suffix));
        }
    }
}
