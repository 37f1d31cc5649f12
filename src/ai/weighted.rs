use rand::Rng;

use crate::movegen::CandidateMove;
use crate::types::Position;

/// Monotonic weight curve `t^exponent` over normalized rank `t` in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseCurve {
    exponent: f32,
}

impl ResponseCurve {
    pub fn new(exponent: f32) -> Self {
        Self {
            exponent: exponent.max(0.0),
        }
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        t.clamp(0.0, 1.0).powf(self.exponent)
    }
}

/// Sorts moves by ascending preference: non-corner before corner, then
/// non-edge before edge, then fewer flips before more. The sort is stable, so
/// equal moves keep board scan order.
pub fn order_by_priority(moves: &mut [CandidateMove]) {
    moves.sort_by_key(|m| (m.position.is_corner(), m.position.is_edge(), m.total_flips));
}

/// Weight of each rank in a list of `n` ordered moves.
pub fn rank_weights(n: usize, curve: ResponseCurve) -> Vec<f32> {
    (0..n)
        .map(|i| curve.evaluate((i as f32 + 1.0) / (n as f32 + 1.0)))
        .collect()
}

/// Roulette selection: draws in `[0, sum)` and walks the list subtracting
/// each weight until the draw drops below zero.
pub fn roulette<R: Rng + ?Sized>(weights: &[f32], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 {
        return Some(weights.len() - 1);
    }

    let mut draw = rng.gen_range(0.0..total);
    for (i, w) in weights.iter().enumerate() {
        draw -= w.max(0.0);
        if draw < 0.0 {
            return Some(i);
        }
    }

    // Float rounding can leave a tiny remainder after the last weight.
    Some(weights.len() - 1)
}

/// Picks a move from `legal_moves` using the priority order and `curve`.
pub fn select<R: Rng + ?Sized>(
    legal_moves: &[CandidateMove],
    curve: ResponseCurve,
    rng: &mut R,
) -> Option<Position> {
    let mut ordered = legal_moves.to_vec();
    order_by_priority(&mut ordered);
    let weights = rank_weights(ordered.len(), curve);
    roulette(&weights, rng).map(|i| ordered[i].position)
}
