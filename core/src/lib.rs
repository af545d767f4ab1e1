#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the minefield chain-reaction engine.
//!
//! This crate defines the value types that connect the adapters, the
//! authoritative field and the pure systems. The field crate validates
//! [`MineCandidate`] values and stores them in an arena addressed by
//! [`MineIndex`]. Systems never touch the field directly: they consume the
//! read-only [`MineView`] and [`AdjacencyView`] snapshots and respond with
//! [`ExplosionTimeline`], [`Interval`] and [`MinePeak`] values.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Unique identifier assigned to a mine.
///
/// Identifiers handed out by the input adapter start at one and follow the
/// order in which records were read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MineId(u32);

impl MineId {
    /// Creates a new mine identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable arena handle of a mine stored in the field.
///
/// Handles equal the mine's insertion position and never change once the
/// mine has been accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MineIndex(usize);

impl MineIndex {
    /// Creates a new handle wrapping the provided arena position.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Retrieves the arena position referenced by the handle.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

/// Location of a mine on the two-dimensional field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position from its coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Computes the straight-line distance between two positions.
    ///
    /// The squared differences are accumulated in double precision so the
    /// rounded single-precision result stays symmetric and exact for small
    /// integral offsets.
    #[must_use]
    pub fn distance(self, other: Position) -> f32 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt() as f32
    }

    /// Reports whether both coordinates match exactly.
    #[must_use]
    pub fn coincides_with(self, other: Position) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Single input record describing a mine before an identifier is assigned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MineRecord {
    /// Horizontal coordinate of the mine.
    pub x: f32,
    /// Vertical coordinate of the mine.
    pub y: f32,
    /// Explosive radius of the mine.
    pub power: f32,
}

impl MineRecord {
    /// Creates a new record from raw coordinates and power.
    #[must_use]
    pub const fn new(x: f32, y: f32, power: f32) -> Self {
        Self { x, y, power }
    }

    /// Attaches an identifier, producing a candidate for field insertion.
    #[must_use]
    pub const fn with_id(self, id: MineId) -> MineCandidate {
        MineCandidate {
            id,
            position: Position::new(self.x, self.y),
            power: self.power,
        }
    }
}

/// Mine submitted to the field for validation and insertion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MineCandidate {
    /// Identifier requested for the mine.
    pub id: MineId,
    /// Location of the mine.
    pub position: Position,
    /// Explosive radius of the mine.
    pub power: f32,
}

/// Reasons a mine may be rejected by the field.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// The explosive power was negative or not a number.
    #[error("cannot add mine {id} with negative explosive power {power}")]
    NegativePower {
        /// Identifier of the rejected mine.
        id: MineId,
        /// Power supplied for the rejected mine.
        power: f32,
    },
    /// Another mine already uses the requested identifier.
    #[error("cannot add two mines with the same id {id}")]
    DuplicateId {
        /// Identifier shared by both mines.
        id: MineId,
    },
    /// Another mine already occupies the exact same coordinates.
    #[error("cannot add mine {id} at X={x}, Y={y}: mine {existing} already occupies those coordinates")]
    DuplicateCoordinates {
        /// Identifier of the rejected mine.
        id: MineId,
        /// Identifier of the mine already stored at the coordinates.
        existing: MineId,
        /// Shared horizontal coordinate.
        x: f32,
        /// Shared vertical coordinate.
        y: f32,
    },
}

/// Immutable representation of a stored mine used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MineSnapshot {
    /// Identifier assigned to the mine.
    pub id: MineId,
    /// Arena handle of the mine.
    pub index: MineIndex,
    /// Location of the mine.
    pub position: Position,
    /// Explosive radius of the mine.
    pub power: f32,
}

/// Read-only snapshot describing all mines within the field.
#[derive(Clone, Debug, Default)]
pub struct MineView {
    snapshots: Vec<MineSnapshot>,
}

impl MineView {
    /// Creates a new mine view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<MineSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.index);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &MineSnapshot> {
        self.snapshots.iter()
    }

    /// Captured snapshots in arena order.
    #[must_use]
    pub fn as_slice(&self) -> &[MineSnapshot] {
        &self.snapshots
    }

    /// Number of mines captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no mines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<MineSnapshot> {
        self.snapshots
    }
}

/// Read-only view into the per-mine neighbor lists.
///
/// Entry `i` lists every mine that mine `i` reaches with its explosion, in
/// ascending arena order. Reachability is directional: a powerful mine may
/// reach a weak one without being reached back.
#[derive(Clone, Copy, Debug)]
pub struct AdjacencyView<'a> {
    neighbors: &'a [Vec<MineIndex>],
}

impl<'a> AdjacencyView<'a> {
    /// Captures a new adjacency view backed by the provided neighbor lists.
    #[must_use]
    pub fn new(neighbors: &'a [Vec<MineIndex>]) -> Self {
        Self { neighbors }
    }

    /// Number of mines covered by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Reports whether the view covers no mines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Reports whether the handle addresses a mine covered by the view.
    #[must_use]
    pub fn contains(&self, mine: MineIndex) -> bool {
        mine.get() < self.neighbors.len()
    }

    /// Mines reached by the provided mine's explosion.
    ///
    /// Unknown handles yield an empty slice.
    #[must_use]
    pub fn neighbors(&self, mine: MineIndex) -> &'a [MineIndex] {
        self.neighbors
            .get(mine.get())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reports whether `from` reaches `to` with its explosion.
    #[must_use]
    pub fn reaches(&self, from: MineIndex, to: MineIndex) -> bool {
        self.neighbors(from).binary_search(&to).is_ok()
    }
}

/// Time step of a cascade paired with the number of mines that ignited in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    time: u32,
    explosions: u32,
}

impl Interval {
    /// Creates a new interval descriptor.
    #[must_use]
    pub const fn new(time: u32, explosions: u32) -> Self {
        Self { time, explosions }
    }

    /// Time step, where zero is the step in which the trigger mine explodes.
    #[must_use]
    pub const fn time(&self) -> u32 {
        self.time
    }

    /// Number of mines that newly exploded during the step.
    #[must_use]
    pub const fn explosions(&self) -> u32 {
        self.explosions
    }

    /// Reports whether `self` is a stronger peak than `other`.
    ///
    /// More explosions win; equal counts prefer the earlier time step.
    #[must_use]
    pub const fn precedes(&self, other: &Self) -> bool {
        if self.explosions != other.explosions {
            return self.explosions > other.explosions;
        }

        self.time < other.time
    }
}

/// Explosion counts recorded per time step of a single cascade.
///
/// Only steps with at least one explosion are stored. Iteration visits the
/// steps in ascending time order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExplosionTimeline {
    counts: BTreeMap<u32, u32>,
}

impl ExplosionTimeline {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every recorded step.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Records the explosion count for a time step.
    ///
    /// Zero counts are ignored so the timeline only describes steps in which
    /// something ignited.
    pub fn record(&mut self, time: u32, explosions: u32) {
        if explosions == 0 {
            return;
        }

        let _ = self.counts.insert(time, explosions);
    }

    /// Explosion count recorded for the provided step, if any.
    #[must_use]
    pub fn explosions_at(&self, time: u32) -> Option<u32> {
        self.counts.get(&time).copied()
    }

    /// Iterator over the recorded steps in ascending time order.
    pub fn iter(&self) -> impl Iterator<Item = Interval> + '_ {
        self.counts
            .iter()
            .map(|(&time, &explosions)| Interval::new(time, explosions))
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Reports whether no step has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of mines that exploded across the whole cascade.
    #[must_use]
    pub fn total_explosions(&self) -> u64 {
        self.counts.values().map(|&count| u64::from(count)).sum()
    }
}

impl FromIterator<(u32, u32)> for ExplosionTimeline {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let mut timeline = Self::new();
        for (time, explosions) in iter {
            timeline.record(time, explosions);
        }
        timeline
    }
}

/// Peak interval computed for a mine's own cascade.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinePeak {
    /// Identifier of the trigger mine.
    pub id: MineId,
    /// Arena handle of the trigger mine.
    pub index: MineIndex,
    /// Location of the trigger mine.
    pub position: Position,
    /// Step of the cascade with the most explosions.
    pub peak: Interval,
}

#[cfg(test)]
mod tests {
    use super::{
        AdjacencyView, ExplosionTimeline, Interval, MineId, MineIndex, MineRecord, Position,
        ValidationError,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    fn almost_equal(a: f32, b: f32) -> bool {
        (a - b).abs() <= f32::EPSILON
    }

    #[test]
    fn distance_matches_known_triangles() {
        let cases = [
            ((1.0, 1.0), (2.0, 2.0), 2.0_f64.sqrt() as f32),
            ((0.0, 0.0), (3.0, 4.0), 5.0),
            ((2.0, 2.0), (6.0, 6.0), 32.0_f64.sqrt() as f32),
            ((2.0, 2.0), (-2.0, -2.0), 32.0_f64.sqrt() as f32),
            ((-6.0, -6.0), (-2.0, -2.0), 32.0_f64.sqrt() as f32),
        ];

        for ((ax, ay), (bx, by), expected) in cases {
            let a = Position::new(ax, ay);
            let b = Position::new(bx, by);
            let distance = a.distance(b);
            assert!(
                almost_equal(distance, expected),
                "distance from {a:?} to {b:?} was {distance}, expected {expected}"
            );
        }
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let points = [
            Position::new(0.25, -7.5),
            Position::new(1e6, 3.0),
            Position::new(-0.1, 0.3),
            Position::new(12.0, 12.0),
        ];

        for a in points {
            assert_eq!(a.distance(a), 0.0);
            for b in points {
                assert_eq!(a.distance(b), b.distance(a));
            }
        }
    }

    #[test]
    fn record_with_id_produces_candidate() {
        let candidate = MineRecord::new(1.5, -2.0, 3.0).with_id(MineId::new(7));
        assert_eq!(candidate.id, MineId::new(7));
        assert_eq!(candidate.position, Position::new(1.5, -2.0));
        assert_eq!(candidate.power, 3.0);
    }

    #[test]
    fn interval_precedence_prefers_count_then_earlier_time() {
        let strong = Interval::new(3, 5);
        let weak = Interval::new(0, 4);
        let early = Interval::new(1, 5);

        assert!(strong.precedes(&weak));
        assert!(!weak.precedes(&strong));
        assert!(early.precedes(&strong));
        assert!(!strong.precedes(&early));
        assert!(!strong.precedes(&strong));
    }

    #[test]
    fn timeline_ignores_empty_steps() {
        let mut timeline = ExplosionTimeline::new();
        timeline.record(0, 1);
        timeline.record(1, 0);
        timeline.record(2, 4);

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.explosions_at(1), None);
        assert_eq!(timeline.explosions_at(2), Some(4));
        assert_eq!(timeline.total_explosions(), 5);
        assert_eq!(
            timeline.iter().collect::<Vec<_>>(),
            vec![Interval::new(0, 1), Interval::new(2, 4)]
        );

        timeline.clear();
        assert!(timeline.is_empty());
    }

    #[test]
    fn adjacency_view_handles_unknown_mines() {
        let lists = vec![vec![MineIndex::new(1)], Vec::new()];
        let view = AdjacencyView::new(&lists);

        assert_eq!(view.len(), 2);
        assert!(view.reaches(MineIndex::new(0), MineIndex::new(1)));
        assert!(!view.reaches(MineIndex::new(1), MineIndex::new(0)));
        assert!(!view.contains(MineIndex::new(2)));
        assert!(view.neighbors(MineIndex::new(9)).is_empty());
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&MineId::new(42));
        assert_round_trip(&MineIndex::new(3));
        assert_round_trip(&Interval::new(1, 8));
    }

    #[test]
    fn validation_error_round_trips_through_bincode() {
        assert_round_trip(&ValidationError::DuplicateCoordinates {
            id: MineId::new(3),
            existing: MineId::new(1),
            x: 2.0,
            y: 2.0,
        });
    }

    #[test]
    fn validation_errors_describe_the_offending_mine() {
        let error = ValidationError::NegativePower {
            id: MineId::new(2),
            power: -2.0,
        };
        assert_eq!(
            error.to_string(),
            "cannot add mine 2 with negative explosive power -2"
        );

        let error = ValidationError::DuplicateId { id: MineId::new(4) };
        assert_eq!(error.to_string(), "cannot add two mines with the same id 4");
    }
}
