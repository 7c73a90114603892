//! Tile animation collaborator
//!
//! The board commits every state change immediately and then hands the
//! visual transition to a [`TileAnimator`]. The returned future completes
//! when the transition is finished; the simulator waits on it before any
//! step that depends on the tile's new position.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use match3_core::{BoardError, Tile};

use crate::types::Cell;

/// Completion signal of a tile transition
pub type AnimationFuture = Pin<Box<dyn Future<Output = Result<(), BoardError>> + Send + 'static>>;

/// Drives the visual side of tile moves and swaps
pub trait TileAnimator: Send + Sync {
    /// Animate `tile` travelling from `from` to `to`
    fn animate_move(&self, tile: Tile, from: Cell, to: Cell) -> AnimationFuture;

    /// Animate `a` (at `a_from`) and `b` (at `b_from`) trading places
    fn animate_swap(&self, a: Tile, a_from: Cell, b: Tile, b_from: Cell) -> AnimationFuture;
}

/// Completes every transition immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantAnimator;

impl TileAnimator for InstantAnimator {
    fn animate_move(&self, _tile: Tile, _from: Cell, _to: Cell) -> AnimationFuture {
        Box::pin(std::future::ready(Ok(())))
    }

    fn animate_swap(&self, _a: Tile, _a_from: Cell, _b: Tile, _b_from: Cell) -> AnimationFuture {
        Box::pin(std::future::ready(Ok(())))
    }
}

/// Sleeps for a fixed time per row or column travelled
#[derive(Debug, Clone, Copy)]
pub struct DelayAnimator {
    per_cell: Duration,
}

impl DelayAnimator {
    pub fn new(per_cell: Duration) -> Self {
        Self { per_cell }
    }

    /// Time to travel from `from` to `to`, saturating at `Duration::MAX`
    fn travel_time(&self, from: Cell, to: Cell) -> Duration {
        let distance = from.x.abs_diff(to.x) as u32 + from.y.abs_diff(to.y) as u32;
        self.per_cell.checked_mul(distance).unwrap_or(Duration::MAX)
    }
}

impl TileAnimator for DelayAnimator {
    fn animate_move(&self, _tile: Tile, from: Cell, to: Cell) -> AnimationFuture {
        let delay = self.travel_time(from, to);
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(())
        })
    }

    fn animate_swap(&self, _a: Tile, a_from: Cell, _b: Tile, b_from: Cell) -> AnimationFuture {
        let delay = self.travel_time(a_from, b_from);
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match3_core::types::TileId;

    #[tokio::test]
    async fn test_instant_animator_completes() {
        let tile = Tile::new(TileId(1), 0);
        InstantAnimator
            .animate_move(tile, Cell::new(0, 3), Cell::new(0, 0))
            .await
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_animator_scales_with_distance() {
        let animator = DelayAnimator::new(Duration::from_millis(100));
        let tile = Tile::new(TileId(1), 0);
        let start = tokio::time::Instant::now();
        animator
            .animate_move(tile, Cell::new(2, 5), Cell::new(2, 2))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[test]
    fn test_travel_time_saturates() {
        let animator = DelayAnimator::new(Duration::from_millis(u64::MAX));
        let time = animator.travel_time(Cell::new(0, 0), Cell::new(3, 4));
        assert_eq!(time, Duration::MAX);

        let animator = DelayAnimator::new(Duration::from_millis(10));
        assert_eq!(
            animator.travel_time(Cell::new(0, 0), Cell::new(3, 4)),
            Duration::from_millis(70)
        );
    }
}
