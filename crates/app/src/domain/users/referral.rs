//! Referral codes

use rand::Rng;

const NAME_PREFIX_CHARS: usize = 3;
const RANDOM_CHARS: usize = 5;
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// First three characters of `name` uppercased, followed by five random
/// base-36 characters.
pub(crate) fn generate_referral_code<R: Rng + ?Sized>(name: &str, rng: &mut R) -> String {
    let mut code: String = name
        .chars()
        .take(NAME_PREFIX_CHARS)
        .flat_map(char::to_uppercase)
        .collect();

    for _ in 0..RANDOM_CHARS {
        code.push(char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]));
    }

    code
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn code_starts_with_uppercased_name_prefix() {
        let mut rng = StdRng::seed_from_u64(7);

        let code = generate_referral_code("jane doe", &mut rng);

        assert!(code.starts_with("JAN"), "unexpected code {code}");
        assert_eq!(code.chars().count(), 8);
        assert!(
            code.chars()
                .skip(3)
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()),
            "random part should be base-36 uppercase: {code}"
        );
    }

    #[test]
    fn short_names_use_what_they_have() {
        let mut rng = StdRng::seed_from_u64(7);

        let code = generate_referral_code("al", &mut rng);

        assert!(code.starts_with("AL"));
        assert_eq!(code.chars().count(), 7);
    }

    #[test]
    fn same_seed_gives_same_code() {
        let first = generate_referral_code("Sam", &mut StdRng::seed_from_u64(42));
        let second = generate_referral_code("Sam", &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }
}
