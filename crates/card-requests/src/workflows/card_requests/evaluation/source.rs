use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

pub const SCORE_RANGE: RangeInclusive<u16> = 1..=999;

/// Supplies the creditworthiness score used when a request is scored.
pub trait ScoreSource: Send + Sync {
    fn draw(&self) -> u16;
}

impl<T: ScoreSource + ?Sized> ScoreSource for Box<T> {
    fn draw(&self) -> u16 {
        (**self).draw()
    }
}

/// Uniform draw over [`SCORE_RANGE`]; not reproducible.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomScoreSource;

impl ScoreSource for RandomScoreSource {
    fn draw(&self) -> u16 {
        rand::thread_rng().gen_range(SCORE_RANGE)
    }
}

/// Always returns the same score.
#[derive(Debug, Clone, Copy)]
pub struct FixedScoreSource(pub u16);

impl ScoreSource for FixedScoreSource {
    fn draw(&self) -> u16 {
        self.0
    }
}

/// Cycles through a fixed list of scores.
#[derive(Debug)]
pub struct SequenceScoreSource {
    scores: Vec<u16>,
    cursor: AtomicUsize,
}

impl SequenceScoreSource {
    pub fn new(scores: Vec<u16>) -> Self {
        Self {
            scores,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl ScoreSource for SequenceScoreSource {
    fn draw(&self) -> u16 {
        if self.scores.is_empty() {
            return 0;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.scores.len();
        self.scores[index]
    }
}
