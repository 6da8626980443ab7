//! Random provider - plays a uniformly random legal card.
//!
//! Baseline implementation of [`AiPlayer`](super::AiPlayer): thread-safe
//! via `Mutex<StdRng>`, deterministic under an optional seed, and never
//! panics.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::trait_def::{AiError, AiPlayer};
use crate::domain::player_view::SeatView;
use crate::domain::Card;

pub struct RandomPlayer {
    /// Trait methods take `&self`, the RNG needs `&mut`.
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl AiPlayer for RandomPlayer {
    fn name(&self) -> &'static str {
        "RandomPlayer"
    }

    async fn choose_play(&self, view: &SeatView) -> Result<Card, AiError> {
        let legal = view.legal_plays();
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AiError::Internal("RNG lock poisoned".into()))?;
        legal
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("no legal plays available".into()))
    }
}
