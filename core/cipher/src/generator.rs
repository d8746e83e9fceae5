//! Service password generation.
//!
//! Generated passwords are a randomly capitalized copy of the service name
//! wrapped between two 5-symbol random payloads, giving a fixed length of
//! `service name length + 10`.

use rand::Rng;

use crate::alphabet::{ALPHABET, ALPHABET_LEN};

/// Length of each random payload fragment.
pub const PAYLOAD_LEN: usize = 5;

/// Number of capitalization rounds applied to the service-name segment.
const CAPITALIZE_ROUNDS: usize = 3;

/// Generate a password for a service.
///
/// The result is `payload + capitalized(service_name) + payload`, where
/// each payload is 5 symbols drawn uniformly from the alphabet. Lowercasing
/// the middle segment recovers the lowercased service name.
pub fn generate(service_name: &str) -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}{}{}",
        payload(&mut rng),
        scatter_capitalize(service_name, &mut rng),
        payload(&mut rng)
    )
}

/// Draw 5 symbols independently and uniformly, with repetition.
fn payload<R: Rng>(rng: &mut R) -> String {
    (0..PAYLOAD_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET_LEN)])
        .collect()
}

/// Lowercase a string, then uppercase the character at a random index in
/// `[0, round(len / 2)]` for each of three rounds.
///
/// Rounds may pick the same index, so fewer than three characters can end
/// up capitalized, and the upper bound concentrates capitals in the first
/// half of the string. Both effects are intended.
fn scatter_capitalize<R: Rng>(s: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = s.to_lowercase().chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    // Midpoint with ties rounded to even, which also keeps the index in
    // bounds for one-character strings.
    let half = chars.len() / 2;
    let upper = if chars.len() % 2 == 0 {
        half
    } else {
        half + (half & 1)
    };
    for _ in 0..CAPITALIZE_ROUNDS {
        let idx = rng.gen_range(0..=upper);
        chars[idx] = chars[idx].to_ascii_uppercase();
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length() {
        let service = "linkedin";
        let pwd = generate(service);
        assert_eq!(pwd.len(), service.len() + 2 * PAYLOAD_LEN);
    }

    #[test]
    fn test_generate_embeds_service_name() {
        let service = "LinkedIn";
        let pwd = generate(service);
        let middle = &pwd[PAYLOAD_LEN..PAYLOAD_LEN + service.len()];
        assert_eq!(middle.to_lowercase(), service.to_lowercase());
    }

    #[test]
    fn test_generate_empty_service_name() {
        assert_eq!(generate("").len(), 2 * PAYLOAD_LEN);
    }

    #[test]
    fn test_payload_symbols_from_alphabet() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let p = payload(&mut rng);
            assert_eq!(p.len(), PAYLOAD_LEN);
            assert!(p.chars().all(|c| ALPHABET.contains(&c)));
        }
    }

    #[test]
    fn test_scatter_capitalize_preserves_letters() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let sample = scatter_capitalize("linkedin", &mut rng);
            assert_eq!(sample.to_lowercase(), "linkedin");
            assert_ne!(sample, "linkedin");
        }
    }

    #[test]
    fn test_scatter_capitalize_stays_in_first_half() {
        let mut rng = rand::thread_rng();
        // upper bound for an 8-char name is index 4
        for _ in 0..50 {
            let sample = scatter_capitalize("facebook", &mut rng);
            assert!(sample[5..].chars().all(|c| c.is_lowercase()));
        }
    }

    #[test]
    fn test_scatter_capitalize_single_char() {
        let mut rng = rand::thread_rng();
        assert_eq!(scatter_capitalize("x", &mut rng), "X");
    }
}
