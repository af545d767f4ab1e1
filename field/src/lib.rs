#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative minefield state.
//!
//! The field owns every accepted mine in an arena addressed by
//! [`MineIndex`] and precomputes the directional neighbor lists while mines
//! are inserted. Once loaded the field never changes shape; systems read it
//! through the [`query`] module.

use log::{debug, trace};
use minefield_core::{MineCandidate, MineId, MineIndex, MineRecord, Position, ValidationError};

/// Represents the authoritative collection of mines and their adjacency.
#[derive(Clone, Debug, Default)]
pub struct Field {
    mines: Vec<Mine>,
    neighbors: Vec<Vec<MineIndex>>,
}

impl Field {
    /// Creates an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a field from input records, assigning identifiers from one.
    ///
    /// The first record that fails validation aborts the load.
    pub fn from_records<I>(records: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = MineRecord>,
    {
        let mut field = Self::new();
        for (id, record) in (1..).map(MineId::new).zip(records) {
            let _ = field.add_mine(record.with_id(id))?;
        }

        debug!(
            "loaded field with {} mines and {} adjacency links",
            field.mines.len(),
            query::link_count(&field)
        );
        Ok(field)
    }

    /// Validates and inserts a mine, extending the neighbor lists.
    ///
    /// Every existing mine is checked before anything is mutated, so a
    /// rejected candidate leaves the field untouched. On success the
    /// candidate lists each existing mine within its own power, and each
    /// existing mine whose power covers the candidate lists the candidate.
    pub fn add_mine(&mut self, candidate: MineCandidate) -> Result<MineIndex, ValidationError> {
        self.validate(&candidate)?;

        let index = MineIndex::new(self.mines.len());
        let mut reached = Vec::new();

        for (existing_index, existing) in self.mines.iter().enumerate() {
            let distance = candidate.position.distance(existing.position);

            if distance <= candidate.power {
                reached.push(MineIndex::new(existing_index));
            }

            if distance <= existing.power {
                if let Some(list) = self.neighbors.get_mut(existing_index) {
                    list.push(index);
                }
            }
        }

        trace!(
            "mine {} accepted at index {} reaching {} existing mines",
            candidate.id,
            index.get(),
            reached.len()
        );

        self.mines.push(Mine {
            id: candidate.id,
            position: candidate.position,
            power: candidate.power,
        });
        self.neighbors.push(reached);

        Ok(index)
    }

    fn validate(&self, candidate: &MineCandidate) -> Result<(), ValidationError> {
        // NaN fails this comparison and is rejected alongside negative values.
        if !(candidate.power >= 0.0) {
            return Err(ValidationError::NegativePower {
                id: candidate.id,
                power: candidate.power,
            });
        }

        for existing in &self.mines {
            if existing.id == candidate.id {
                return Err(ValidationError::DuplicateId { id: candidate.id });
            }

            if existing.position.coincides_with(candidate.position) {
                return Err(ValidationError::DuplicateCoordinates {
                    id: candidate.id,
                    existing: existing.id,
                    x: candidate.position.x(),
                    y: candidate.position.y(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct Mine {
    id: MineId,
    position: Position,
    power: f32,
}

/// Query functions that provide read-only access to the field.
pub mod query {
    use super::Field;
    use minefield_core::{AdjacencyView, MineId, MineIndex, MineSnapshot, MineView};

    /// Number of mines stored in the field.
    #[must_use]
    pub fn mine_count(field: &Field) -> usize {
        field.mines.len()
    }

    /// Captures the stored mine addressed by the handle, if any.
    #[must_use]
    pub fn mine(field: &Field, index: MineIndex) -> Option<MineSnapshot> {
        field.mines.get(index.get()).map(|mine| MineSnapshot {
            id: mine.id,
            index,
            position: mine.position,
            power: mine.power,
        })
    }

    /// Resolves the arena handle of the mine carrying the identifier.
    #[must_use]
    pub fn index_of(field: &Field, id: MineId) -> Option<MineIndex> {
        field
            .mines
            .iter()
            .position(|mine| mine.id == id)
            .map(MineIndex::new)
    }

    /// Captures a read-only view of every mine in arena order.
    #[must_use]
    pub fn mine_view(field: &Field) -> MineView {
        let snapshots = field
            .mines
            .iter()
            .enumerate()
            .map(|(index, mine)| MineSnapshot {
                id: mine.id,
                index: MineIndex::new(index),
                position: mine.position,
                power: mine.power,
            })
            .collect();
        MineView::from_snapshots(snapshots)
    }

    /// Exposes a read-only view of the neighbor lists.
    #[must_use]
    pub fn adjacency_view(field: &Field) -> AdjacencyView<'_> {
        AdjacencyView::new(&field.neighbors)
    }

    /// Mines reached by the explosion of the addressed mine.
    #[must_use]
    pub fn neighbors(field: &Field, index: MineIndex) -> &[MineIndex] {
        adjacency_view(field).neighbors(index)
    }

    /// Total number of directional adjacency links.
    #[must_use]
    pub fn link_count(field: &Field) -> usize {
        field.neighbors.iter().map(Vec::len).sum()
    }
}
