use tokio_util::sync::CancellationToken;

use super::DIFFICULTY_PREFIX;
use super::hash::sha256_hex;

/// How many candidates are tried between cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// A proof is valid when sha256("{previous_proof}{candidate}") starts with
/// the difficulty prefix.
pub fn verify(previous_proof: u64, candidate: u64) -> bool {
    let guess = format!("{previous_proof}{candidate}");
    sha256_hex(guess.as_bytes()).starts_with(DIFFICULTY_PREFIX)
}

/// Smallest non-negative proof valid against `previous_proof`.
///
/// Unbounded: the search only ends when a match is found.
pub fn solve(previous_proof: u64) -> u64 {
    let mut candidate = 0u64;
    while !verify(previous_proof, candidate) {
        candidate += 1;
    }
    candidate
}

/// Same search as [`solve`], returning `None` once `cancel` fires.
pub fn solve_cancellable(previous_proof: u64, cancel: &CancellationToken) -> Option<u64> {
    let mut candidate = 0u64;
    loop {
        if candidate % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            return None;
        }
        if verify(previous_proof, candidate) {
            return Some(candidate);
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{solve, solve_cancellable, verify};
    use crate::blockchain::hash::sha256_hex;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn solve_returns_first_valid_proof() {
        let proof = solve(100);
        assert!(verify(100, proof));
        assert!((0..proof).all(|p| !verify(100, p)));
    }

    #[test]
    fn known_proof_after_genesis() {
        assert_eq!(solve(100), 35293);
    }

    #[test]
    fn verify_matches_digest_prefix() {
        let proof = solve(35293);
        for candidate in [proof, proof + 1, 0, 7] {
            let digest = sha256_hex(format!("35293{candidate}").as_bytes());
            assert_eq!(verify(35293, candidate), digest.starts_with("0000"));
        }
    }

    #[test]
    fn cancellable_agrees_with_solve() {
        let token = CancellationToken::new();
        assert_eq!(solve_cancellable(100, &token), Some(solve(100)));
    }

    #[test]
    fn cancelled_search_gives_up() {
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(solve_cancellable(100, &token), None);
    }
}
