#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that replays chain reactions over an immutable adjacency view.

mod peak;

pub use peak::peak_interval;

use log::trace;
use minefield_core::{AdjacencyView, ExplosionTimeline, MineIndex};

/// Errors reported when a cascade cannot be simulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// The trigger mine is not part of the adjacency view.
    #[error("trigger mine index {start} is outside a field of {mine_count} mines")]
    UnknownStart {
        /// Arena position of the requested trigger mine.
        start: usize,
        /// Number of mines covered by the adjacency view.
        mine_count: usize,
    },
}

/// Chain-reaction system that reuses scratch buffers across cascades.
///
/// The exploded flags belong to the system rather than the field, so the
/// adjacency view stays read-only and independent systems may replay
/// cascades over the same field concurrently.
#[derive(Debug, Default)]
pub struct ChainReaction {
    exploded: Vec<bool>,
    frontier: Vec<MineIndex>,
    next_frontier: Vec<MineIndex>,
}

impl ChainReaction {
    /// Creates a new chain-reaction system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Triggers `start` and records how many mines ignite at each time step.
    ///
    /// The output timeline is cleared before populating it. Time step zero
    /// holds the trigger mine itself; step `n + 1` holds every mine reached
    /// by a mine that ignited in step `n` and had not ignited before. A mine
    /// queued more than once for the same step is counted once.
    pub fn simulate(
        &mut self,
        adjacency: &AdjacencyView<'_>,
        start: MineIndex,
        out: &mut ExplosionTimeline,
    ) -> Result<(), SimulationError> {
        out.clear();

        if !adjacency.contains(start) {
            return Err(SimulationError::UnknownStart {
                start: start.get(),
                mine_count: adjacency.len(),
            });
        }

        self.exploded.clear();
        self.exploded.resize(adjacency.len(), false);
        self.frontier.clear();
        self.frontier.push(start);

        let mut time: u32 = 0;
        while !self.frontier.is_empty() {
            self.next_frontier.clear();
            let mut explosions: u32 = 0;

            for &mine in &self.frontier {
                let Some(exploded) = self.exploded.get_mut(mine.get()) else {
                    continue;
                };
                if *exploded {
                    continue;
                }

                *exploded = true;
                explosions += 1;

                for &neighbor in adjacency.neighbors(mine) {
                    if !self.exploded.get(neighbor.get()).copied().unwrap_or(true) {
                        self.next_frontier.push(neighbor);
                    }
                }
            }

            out.record(time, explosions);
            std::mem::swap(&mut self.frontier, &mut self.next_frontier);
            time = time.saturating_add(1);
        }

        trace!(
            "cascade from index {} ignited {} mines over {} steps",
            start.get(),
            out.total_explosions(),
            out.len()
        );

        Ok(())
    }

    /// Number of mines ignited by the most recent cascade.
    #[must_use]
    pub fn ignited_count(&self) -> usize {
        self.exploded.iter().filter(|&&exploded| exploded).count()
    }
}

/// Replays a single cascade with fresh scratch state.
///
/// Convenience wrapper around [`ChainReaction::simulate`] for callers that do
/// not replay many cascades in a row.
pub fn simulate(
    adjacency: &AdjacencyView<'_>,
    start: MineIndex,
) -> Result<ExplosionTimeline, SimulationError> {
    let mut system = ChainReaction::new();
    let mut timeline = ExplosionTimeline::new();
    system.simulate(adjacency, start, &mut timeline)?;
    Ok(timeline)
}
