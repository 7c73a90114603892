//! Board simulator - swaps and cascades over animated tiles
//!
//! Wraps a [`BoardModel`] and sequences its synchronous steps around tile
//! animations:
//!
//! 1. **Swap**: exchange two tiles and wait for the swap animation
//! 2. **Check**: look for matches anywhere on the board
//! 3. **Cascade** (match found): remove, refill, drop, repeat until stable
//! 4. **Revert** (no match): swap the tiles back and wait again
//!
//! Only one swap or cascade runs per board at a time. A call made while one
//! is in flight returns a signal for the running sequence instead of starting
//! another one.
//!
//! The model lock is never held across an await; every await point is a
//! tile animation.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinSet;

use match3_core::{BoardError, BoardModel, BoardSnapshot, MatchSet, Move, Tile};

use crate::animator::{DelayAnimator, InstantAnimator, TileAnimator};
use crate::config::SimConfig;
use crate::types::Cell;

/// Result of a swap or settle sequence
pub type SwapResult = Result<SwapOutcome, BoardError>;

/// Totals for one cascade run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Cycles that removed, spawned or moved at least one tile
    pub cycles: usize,
    pub removed: usize,
    pub spawned: usize,
    pub moved: usize,
}

/// How a sequence ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The board cascaded until stable
    Cascaded(CascadeReport),
    /// The swap made no match and was undone
    Reverted,
}

/// Completion signal of a swap or settle sequence.
///
/// Every signal handed out for the same sequence resolves with the same
/// result. Await it directly or call [`SwapSignal::wait`].
#[derive(Debug, Clone)]
pub struct SwapSignal {
    rx: watch::Receiver<Option<SwapResult>>,
}

impl SwapSignal {
    fn resolved(result: SwapResult) -> Self {
        let (_tx, rx) = watch::channel(Some(result));
        Self { rx }
    }

    /// Check if the sequence has finished
    pub fn is_done(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the sequence to finish
    pub async fn wait(mut self) -> SwapResult {
        let result = match self.rx.wait_for(|r| r.is_some()).await {
            Ok(current) => (*current).clone(),
            Err(_) => None,
        };
        result.unwrap_or(Err(BoardError::Aborted))
    }
}

impl IntoFuture for SwapSignal {
    type Output = SwapResult;
    type IntoFuture = Pin<Box<dyn Future<Output = SwapResult> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}

struct Shared {
    model: Mutex<BoardModel>,
    animator: Arc<dyn TileAnimator>,
    /// In-flight sequence, if any
    active: Mutex<Option<watch::Receiver<Option<SwapResult>>>>,
    config: SimConfig,
}

impl Shared {
    fn model(&self) -> MutexGuard<'_, BoardModel> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn active(&self) -> MutexGuard<'_, Option<watch::Receiver<Option<SwapResult>>>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        if self.config.trace {
            eprintln!("[Board] {}", args);
        }
    }

    fn validate_swap(&self, a: &Tile, b: &Tile) -> Result<(Cell, Cell), BoardError> {
        if a.id == b.id {
            return Err(BoardError::SameTile(a.id));
        }
        let model = self.model();
        let at_a = model.position_of(a).ok_or(BoardError::TileNotFound(a.id))?;
        let at_b = model.position_of(b).ok_or(BoardError::TileNotFound(b.id))?;
        if self.config.require_adjacent && !at_a.is_adjacent(at_b) {
            return Err(BoardError::NotAdjacent { a: at_a, b: at_b });
        }
        Ok((at_a, at_b))
    }

    async fn swap_and_animate(&self, a: Tile, at_a: Cell, b: Tile, at_b: Cell) -> Result<(), BoardError> {
        self.model().swap_cells(at_a, at_b)?;
        self.animator.animate_swap(a, at_a, b, at_b).await
    }

    async fn run_swap(self: Arc<Self>, a: Tile, b: Tile) -> SwapResult {
        let (at_a, at_b) = self.validate_swap(&a, &b)?;
        self.trace(format_args!("swap {} {} <-> {} {}", a.id, at_a, b.id, at_b));
        self.swap_and_animate(a, at_a, b, at_b).await?;

        let matched = !self.model().get_matches().is_empty();
        if !matched {
            self.trace(format_args!("no match, reverting"));
            // a now sits at at_b and b at at_a
            self.swap_and_animate(a, at_b, b, at_a).await?;
            return Ok(SwapOutcome::Reverted);
        }

        let report = self.cascade().await?;
        Ok(SwapOutcome::Cascaded(report))
    }

    /// Remove, fill and drop until a cycle changes nothing.
    ///
    /// Matches are recomputed from the current board at the top of every
    /// cycle, so chains created by falling or spawned tiles are resolved too.
    async fn cascade(&self) -> Result<CascadeReport, BoardError> {
        let mut report = CascadeReport::default();
        loop {
            let (removed, spawned, moves) = {
                let mut model = self.model();
                let matches: MatchSet = model.get_matches();
                model.remove_all(&matches);
                let spawned = model.spawn_top_row();
                (matches.len(), spawned, model.plan_gravity())
            };
            let moved = self.gravity(moves).await?;

            if removed == 0 && spawned == 0 && moved == 0 {
                break;
            }
            report.cycles += 1;
            report.removed += removed;
            report.spawned += spawned;
            report.moved += moved;
            self.trace(format_args!(
                "cycle {} removed={} spawned={} moved={}",
                report.cycles, removed, spawned, moved
            ));

            if let Some(limit) = self.config.max_cascade_cycles {
                if report.cycles > limit {
                    return Err(BoardError::CascadeLimit(limit));
                }
            }
        }
        Ok(report)
    }

    /// Commit `moves` in order, then wait for every animation.
    async fn gravity(&self, moves: Vec<Move>) -> Result<usize, BoardError> {
        if moves.is_empty() {
            return Ok(0);
        }

        let mut pending = JoinSet::new();
        {
            let mut model = self.model();
            for mv in &moves {
                let tile = model.apply_move(*mv)?;
                pending.spawn(self.animator.animate_move(tile, mv.from, mv.to));
            }
        }

        while let Some(joined) = pending.join_next().await {
            joined.map_err(|e| BoardError::AnimationFailed(e.to_string()))??;
        }
        Ok(moves.len())
    }
}

/// Handle to a simulated board.
///
/// Cloning the handle shares the same board. Sequences run as tokio tasks,
/// so [`Board::swap_tiles`] and [`Board::settle`] must be called from within
/// a tokio runtime.
#[derive(Clone)]
pub struct Board {
    shared: Arc<Shared>,
}

impl Board {
    /// Create an empty board from `config`
    pub fn new(config: SimConfig) -> Result<Self, BoardError> {
        let model = BoardModel::new(config.width, config.height, config.palette_size, config.seed)?;
        let animator: Arc<dyn TileAnimator> = if config.move_ms == 0 {
            Arc::new(InstantAnimator)
        } else {
            Arc::new(DelayAnimator::new(config.move_delay()))
        };
        Ok(Self::from_parts(model, animator, config))
    }

    /// Assemble a board from an existing model and animator.
    ///
    /// Dimensions come from `model`; the size fields of `config` are ignored.
    pub fn from_parts(model: BoardModel, animator: Arc<dyn TileAnimator>, config: SimConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                model: Mutex::new(model),
                animator,
                active: Mutex::new(None),
                config,
            }),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.shared.config
    }

    pub fn width(&self) -> u16 {
        self.shared.model().width()
    }

    pub fn height(&self) -> u16 {
        self.shared.model().height()
    }

    /// Check if a swap or cascade is in flight
    pub fn is_busy(&self) -> bool {
        self.shared.active().is_some()
    }

    /// Fill every row but the spawn row with a match-free layout
    pub fn randomize(&self) -> Result<(), BoardError> {
        if self.is_busy() {
            return Err(BoardError::Busy);
        }
        let limit = self.shared.config.max_draws_per_cell;
        self.shared.model().randomize_with_limit(limit)?;
        self.shared.trace(format_args!("randomized\n{}", self));
        Ok(())
    }

    /// Every tile in a run of three or more
    pub fn get_matches(&self) -> MatchSet {
        self.shared.model().get_matches()
    }

    pub fn get_horizontal_matches(&self, tile: &Tile) -> Vec<Tile> {
        self.shared.model().get_horizontal_matches(tile)
    }

    pub fn get_vertical_matches(&self, tile: &Tile) -> Vec<Tile> {
        self.shared.model().get_vertical_matches(tile)
    }

    pub fn tile_at(&self, cell: Cell) -> Option<Tile> {
        self.shared.model().get(cell)
    }

    pub fn position_of(&self, tile: &Tile) -> Option<Cell> {
        self.shared.model().position_of(tile)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.shared.model().snapshot()
    }

    /// Call `hook` once for every tile spawned in the top row.
    ///
    /// The hook runs while the board is locked and must not call back into
    /// the board.
    pub fn set_on_tile_added(&self, hook: impl FnMut(Cell, Tile) + Send + 'static) {
        self.shared.model().set_on_tile_added(Box::new(hook));
    }

    /// Run `f` against the model directly (setup and inspection)
    pub fn with_model<R>(&self, f: impl FnOnce(&mut BoardModel) -> R) -> R {
        f(&mut self.shared.model())
    }

    /// Swap two tiles and resolve the consequences.
    ///
    /// Cascades if the swap creates a match, otherwise swaps back. While a
    /// sequence is in flight this returns that sequence's signal and ignores
    /// the arguments.
    pub fn swap_tiles(&self, a: Tile, b: Tile) -> SwapSignal {
        self.start(move |shared| shared.run_swap(a, b))
    }

    /// Run the cascade loop on the current board until it is stable.
    ///
    /// Completes the spawn row after [`Board::randomize`] and resolves any
    /// matches already present.
    pub fn settle(&self) -> SwapSignal {
        self.start(|shared| async move { shared.cascade().await.map(SwapOutcome::Cascaded) })
    }

    fn start<F, Fut>(&self, op: F) -> SwapSignal
    where
        F: FnOnce(Arc<Shared>) -> Fut,
        Fut: Future<Output = SwapResult> + Send + 'static,
    {
        let mut active = self.shared.active();
        if let Some(rx) = active.as_ref() {
            self.shared.trace(format_args!("sequence in flight, sharing its result"));
            return SwapSignal { rx: rx.clone() };
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return SwapSignal::resolved(Err(BoardError::Aborted));
        };

        let (tx, rx) = watch::channel(None);
        *active = Some(rx.clone());
        drop(active);

        // Moved into the supervisor so dropping it unpolled still releases the slot
        let release = ActiveRelease {
            shared: self.shared.clone(),
        };
        let sequence = runtime.spawn(op(self.shared.clone()));
        runtime.spawn(async move {
            let result = match sequence.await {
                Ok(result) => result,
                Err(e) if e.is_panic() => Err(BoardError::AnimationFailed(e.to_string())),
                Err(_) => Err(BoardError::Aborted),
            };
            let shared = release.shared.clone();
            drop(release);
            if let Err(e) = &result {
                shared.trace(format_args!("sequence failed: {}", e));
            }
            let _ = tx.send(Some(result));
        });

        SwapSignal { rx }
    }
}

/// Clears the in-flight slot when dropped, whether the sequence finished,
/// panicked or was cancelled.
struct ActiveRelease {
    shared: Arc<Shared>,
}

impl Drop for ActiveRelease {
    fn drop(&mut self) {
        self.shared.active().take();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.shared.model(), f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("model", &*self.shared.model())
            .field("busy", &self.is_busy())
            .finish()
    }
}
