#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure ranking system that orders mines by the strength of their cascade peak.

use std::cmp::Ordering;

use log::debug;
use minefield_core::{AdjacencyView, ExplosionTimeline, MineId, MinePeak, MineSnapshot, MineView};
use minefield_system_chain_reaction::{peak_interval, ChainReaction, SimulationError};
use rayon::prelude::*;

/// Strategy used to replay the cascade of every mine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Execution {
    /// Replays cascades one after another with a single scratch buffer.
    #[default]
    Sequential,
    /// Replays cascades on the rayon thread pool with one scratch buffer per worker.
    Parallel,
}

/// Configuration parameters required to construct the ranking system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    execution: Execution,
}

impl Config {
    /// Creates a new configuration using the provided execution strategy.
    #[must_use]
    pub const fn new(execution: Execution) -> Self {
        Self { execution }
    }

    /// Execution strategy applied when evaluating mines.
    #[must_use]
    pub const fn execution(&self) -> Execution {
        self.execution
    }
}

/// Errors reported while evaluating mines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RankingError {
    /// A cascade could not be simulated.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// A cascade produced no explosions, so no peak exists.
    #[error("cascade triggered by mine {id} recorded no explosions")]
    EmptyTimeline {
        /// Identifier of the trigger mine.
        id: MineId,
    },
}

/// Mines ordered from strongest to weakest peak.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranking {
    ordered: Vec<MinePeak>,
    winner_count: usize,
}

impl Ranking {
    /// Every evaluated mine in rank order.
    #[must_use]
    pub fn ordered(&self) -> &[MinePeak] {
        &self.ordered
    }

    /// Leading mines tied for the highest peak explosion count.
    #[must_use]
    pub fn winners(&self) -> &[MinePeak] {
        &self.ordered[..self.winner_count]
    }

    /// Mine ranked first, if any mine was evaluated.
    #[must_use]
    pub fn leader(&self) -> Option<&MinePeak> {
        self.ordered.first()
    }

    /// Number of ranked mines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Reports whether no mine was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Ranking system that replays every cascade and orders the resulting peaks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ranker {
    config: Config,
}

impl Ranker {
    /// Creates a new ranking system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration the system was created with.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Computes the peak interval of every mine's own cascade.
    ///
    /// Peaks are returned in the mine view's arena order regardless of the
    /// execution strategy.
    pub fn evaluate(
        &self,
        mines: &MineView,
        adjacency: &AdjacencyView<'_>,
    ) -> Result<Vec<MinePeak>, RankingError> {
        match self.config().execution() {
            Execution::Sequential => {
                let mut system = ChainReaction::new();
                let mut timeline = ExplosionTimeline::new();
                mines
                    .iter()
                    .map(|snapshot| evaluate_mine(&mut system, &mut timeline, adjacency, snapshot))
                    .collect()
            }
            Execution::Parallel => mines
                .as_slice()
                .par_iter()
                .map_init(
                    || (ChainReaction::new(), ExplosionTimeline::new()),
                    |(system, timeline), snapshot| {
                        evaluate_mine(system, timeline, adjacency, snapshot)
                    },
                )
                .collect(),
        }
    }

    /// Evaluates every mine and orders the peaks into a ranking.
    pub fn rank(
        &self,
        mines: &MineView,
        adjacency: &AdjacencyView<'_>,
    ) -> Result<Ranking, RankingError> {
        let peaks = self.evaluate(mines, adjacency)?;
        let ranking = order(peaks);

        if let Some(leader) = ranking.leader() {
            debug!(
                "ranked {} mines; {} tied for the lead with {} explosions at time {}",
                ranking.len(),
                ranking.winners().len(),
                leader.peak.explosions(),
                leader.peak.time()
            );
        }

        Ok(ranking)
    }
}

fn evaluate_mine(
    system: &mut ChainReaction,
    timeline: &mut ExplosionTimeline,
    adjacency: &AdjacencyView<'_>,
    snapshot: &MineSnapshot,
) -> Result<MinePeak, RankingError> {
    system.simulate(adjacency, snapshot.index, timeline)?;
    let peak = peak_interval(timeline).ok_or(RankingError::EmptyTimeline { id: snapshot.id })?;

    Ok(MinePeak {
        id: snapshot.id,
        index: snapshot.index,
        position: snapshot.position,
        peak,
    })
}

/// Orders two peaks: more explosions first, then smaller X, then smaller Y.
///
/// Coordinates compare numerically, so `-0.0` and `0.0` tie and fall through
/// to the next key. NaN falls back to [`f32::total_cmp`], which keeps the
/// order total for any two mines at distinct coordinates.
#[must_use]
pub fn compare(a: &MinePeak, b: &MinePeak) -> Ordering {
    b.peak
        .explosions()
        .cmp(&a.peak.explosions())
        .then_with(|| ascending(a.position.x(), b.position.x()))
        .then_with(|| ascending(a.position.y(), b.position.y()))
}

fn ascending(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Sorts peaks into rank order and marks the leading tie group as winners.
#[must_use]
pub fn order(mut peaks: Vec<MinePeak>) -> Ranking {
    peaks.sort_by(compare);

    let winner_count = match peaks.first() {
        Some(leader) => {
            let best = leader.peak.explosions();
            peaks
                .iter()
                .take_while(|candidate| candidate.peak.explosions() == best)
                .count()
        }
        None => 0,
    };

    Ranking {
        ordered: peaks,
        winner_count,
    }
}
