use minefield_core::{Interval, MineId, MineRecord};
use minefield_field::{query, Field};
use minefield_system_chain_reaction::{peak_interval, simulate, ChainReaction};

fn reference_field() -> Field {
    Field::from_records([
        MineRecord::new(1.0, 1.0, 1.5),
        MineRecord::new(1.0, 2.0, 1.5),
        MineRecord::new(1.0, 3.0, 1.5),
        MineRecord::new(2.0, 1.0, 1.5),
        MineRecord::new(2.0, 2.0, 1.5),
        MineRecord::new(2.0, 3.0, 1.5),
        MineRecord::new(3.0, 1.0, 5.0),
        MineRecord::new(3.0, 2.0, 0.9),
        MineRecord::new(3.0, 3.0, 1.1),
    ])
    .expect("reference field is valid")
}

fn peak_for(field: &Field, id: u32) -> Interval {
    let index = query::index_of(field, MineId::new(id)).expect("mine exists");
    let timeline = simulate(&query::adjacency_view(field), index).expect("valid start");
    peak_interval(&timeline).expect("trigger always explodes")
}

#[test]
fn reference_field_peaks_match_expectations() {
    let field = reference_field();
    let expected = [
        (1, Interval::new(2, 5)),
        (2, Interval::new(1, 5)),
        (3, Interval::new(2, 5)),
        (4, Interval::new(1, 5)),
        (5, Interval::new(1, 8)),
        (6, Interval::new(1, 5)),
        (7, Interval::new(1, 8)),
        (8, Interval::new(0, 1)),
        (9, Interval::new(2, 3)),
    ];

    for (id, interval) in expected {
        assert_eq!(peak_for(&field, id), interval, "peak mismatch for mine {id}");
    }
}

#[test]
fn centre_mine_ignites_every_other_mine_in_one_step() {
    let field = reference_field();
    let index = query::index_of(&field, MineId::new(5)).expect("mine exists");
    let timeline = simulate(&query::adjacency_view(&field), index).expect("valid start");

    let steps: Vec<(u32, u32)> = timeline
        .iter()
        .map(|interval| (interval.time(), interval.explosions()))
        .collect();
    assert_eq!(steps, vec![(0, 1), (1, 8)]);
    assert_eq!(timeline.total_explosions(), 9);
}

#[test]
fn reused_system_matches_fresh_simulations() {
    let field = reference_field();
    let adjacency = query::adjacency_view(&field);
    let mut system = ChainReaction::new();
    let mut timeline = Default::default();

    // Replay in reverse so every run starts from a dirty scratch buffer.
    let mines = query::mine_view(&field);
    for snapshot in mines.as_slice().iter().rev() {
        system
            .simulate(&adjacency, snapshot.index, &mut timeline)
            .expect("valid start");
        let fresh = simulate(&adjacency, snapshot.index).expect("valid start");
        assert_eq!(timeline, fresh, "reused scratch diverged for mine {}", snapshot.id);
    }
}

#[test]
fn every_cascade_starts_with_the_trigger_alone() {
    let field = reference_field();
    let adjacency = query::adjacency_view(&field);

    for snapshot in query::mine_view(&field).iter() {
        let timeline = simulate(&adjacency, snapshot.index).expect("valid start");
        assert_eq!(timeline.explosions_at(0), Some(1));
        assert!(timeline.total_explosions() <= query::mine_count(&field) as u64);
    }
}
