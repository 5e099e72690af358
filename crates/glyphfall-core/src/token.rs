//! Display tokens and the cyclic pool that feeds the animation layers.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

/// Errors from token pool operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// `next()` was called on a pool holding zero tokens.
    #[error("token pool is empty")]
    Empty,
}

/// One animated text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Identifier, unique within a single pool (caller contract).
    pub id: u32,
    /// Display text; expected non-empty.
    pub text: String,
}

impl Token {
    /// Create a token.
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// An ordered, cyclically consumed, shuffleable collection of tokens.
///
/// The pool owns its tokens exclusively. Consuming with [`TokenPool::next`]
/// never removes or mutates a token, it only advances the cursor, which wraps
/// modulo the pool size.
#[derive(Debug, Clone)]
pub struct TokenPool {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenPool {
    /// Create a pool from a token list, preserving order, cursor at zero.
    ///
    /// The input is copied; mutating the source afterwards cannot affect the
    /// pool. An empty input is accepted — the failure surfaces on `next()`.
    pub fn new(tokens: &[Token]) -> Self {
        Self {
            tokens: tokens.to_vec(),
            cursor: 0,
        }
    }

    /// Create a pool capped at `max_tokens` entries and shuffle it once.
    ///
    /// Input beyond the cap is dropped.
    pub fn shuffled<R: Rng + ?Sized>(tokens: &[Token], max_tokens: usize, rng: &mut R) -> Self {
        let take = tokens.len().min(max_tokens);
        let mut pool = Self::new(&tokens[..take]);
        pool.shuffle(rng);
        pool
    }

    /// Return the token under the cursor and advance one step, wrapping at
    /// the end of the pool.
    pub fn next(&mut self) -> Result<&Token, PoolError> {
        if self.tokens.is_empty() {
            return Err(PoolError::Empty);
        }
        let idx = self.cursor;
        self.cursor = (self.cursor + 1) % self.tokens.len();
        Ok(&self.tokens[idx])
    }

    /// Permute the pool in place (unbiased Fisher-Yates).
    ///
    /// The cursor stays where it is: reshuffling mid-cycle may skip or repeat
    /// a token relative to the pre-shuffle order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tokens.shuffle(rng);
    }

    /// Number of tokens in the pool.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the pool holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn abc() -> Vec<Token> {
        vec![
            Token::new(1, "a"),
            Token::new(2, "b"),
            Token::new(3, "c"),
        ]
    }

    #[test]
    fn test_next_cycles_in_order() {
        let mut pool = TokenPool::new(&abc());
        assert_eq!(pool.next().map(|t| t.text.clone()), Ok("a".to_string()));
        assert_eq!(pool.next().map(|t| t.text.clone()), Ok("b".to_string()));
        assert_eq!(pool.next().map(|t| t.text.clone()), Ok("c".to_string()));
        // Fourth call wraps back to the first token.
        assert_eq!(pool.next().map(|t| t.text.clone()), Ok("a".to_string()));
    }

    #[test]
    fn test_next_on_empty_pool_errors() {
        let mut pool = TokenPool::new(&[]);
        assert_eq!(pool.next().map(|t| t.id), Err(PoolError::Empty));
        // Still empty on retry, never a panic.
        assert_eq!(pool.next().map(|t| t.id), Err(PoolError::Empty));
    }

    #[test]
    fn test_shuffle_preserves_multiset() {
        let tokens: Vec<Token> = (0..16).map(|i| Token::new(i, format!("t{i}"))).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = TokenPool::new(&tokens);
        pool.shuffle(&mut rng);

        let mut seen: Vec<u32> = Vec::new();
        for _ in 0..pool.len() {
            seen.push(pool.next().map(|t| t.id).unwrap());
        }
        seen.sort_unstable();
        assert_eq!(seen, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_keeps_cursor() {
        let mut rng = StdRng::seed_from_u64(11);
        let tokens: Vec<Token> = (0..8).map(|i| Token::new(i, format!("t{i}"))).collect();
        let mut pool = TokenPool::new(&tokens);
        pool.next().unwrap();
        pool.next().unwrap();
        pool.shuffle(&mut rng);
        // The pool still serves only members of the original set.
        for _ in 0..pool.len() {
            let id = pool.next().map(|t| t.id).unwrap();
            assert!(id < 8);
        }
    }

    #[test]
    fn test_shuffled_factory_enforces_cap() {
        let tokens: Vec<Token> = (0..10).map(|i| Token::new(i, format!("t{i}"))).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = TokenPool::shuffled(&tokens, 4, &mut rng);
        assert_eq!(pool.len(), 4);
        for _ in 0..4 {
            assert!(pool.next().map(|t| t.id).unwrap() < 10);
        }
    }

    #[test]
    fn test_shuffled_factory_with_zero_cap_is_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = TokenPool::shuffled(&abc(), 0, &mut rng);
        assert!(pool.is_empty());
        assert_eq!(pool.next().map(|t| t.id), Err(PoolError::Empty));
    }

    #[test]
    fn test_pool_copies_input() {
        let mut source = abc();
        let mut pool = TokenPool::new(&source);
        source[0].text = "mutated".to_string();
        assert_eq!(pool.next().map(|t| t.text.clone()), Ok("a".to_string()));
    }
}
