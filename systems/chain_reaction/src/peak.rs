use minefield_core::{ExplosionTimeline, Interval};

/// Selects the step of a cascade with the most explosions.
///
/// The timeline is scanned once in ascending time order and a later step only
/// replaces the current best when it strictly precedes it, so ties resolve to
/// the earliest step. Returns `None` for an empty timeline.
#[must_use]
pub fn peak_interval(timeline: &ExplosionTimeline) -> Option<Interval> {
    let mut best: Option<Interval> = None;

    for current in timeline.iter() {
        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }

    best
}
