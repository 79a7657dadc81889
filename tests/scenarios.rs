use double_elimination::{BracketError, BracketSettings, MatchState, Tournament};

type Step = (&'static [(u32, u32)], u32);

fn active_pairs(t: &Tournament<u32>) -> Vec<(u32, u32)> {
  t.active_matches()
    .iter()
    .map(|node| match node.participants(t.slots()) {
      [Some(left), Some(right)] => (left, right),
      other => panic!("{} is active with {other:?}", node.label()),
    })
    .collect()
}

/// Check the playable pairings before each step, then decide the first of them.
fn play(n: u32, steps: &[Step]) -> Tournament<u32> {
  let mut t = Tournament::new((1..=n).collect()).unwrap();
  for (index, (expected, winner)) in steps.iter().enumerate() {
    assert_eq!(t.winners(), None, "step {index}");
    assert_eq!(active_pairs(&t), expected.to_vec(), "step {index}");
    let match_id = t.active_matches()[0].id();
    t.resolve(match_id, winner).unwrap();
  }
  assert!(t.active_matches().is_empty());
  t
}

#[test]
fn two_competitors() {
  let t = play(2, &[(&[(1, 2)], 1), (&[(1, 2)], 2), (&[(2, 1)], 1)]);
  assert_eq!(t.winners(), Some(vec![1]));
  assert_eq!(t.match_count(), 3);
}

#[test]
fn two_competitors_undefeated_champion() {
  let mut t = Tournament::new(vec![1u32, 2]).unwrap();
  t.add_win(&2).unwrap();
  // Only the finals remain.
  assert_eq!(t.winners(), None);
  assert_eq!(active_pairs(&t), vec![(2, 1)]);
  t.add_win(&2).unwrap();
  assert_eq!(t.winners(), Some(vec![2]));
}

#[test]
fn three_competitors() {
  let t = play(
    3,
    &[
      (&[(2, 3)], 2),
      (&[(1, 2)], 1),
      (&[(3, 2)], 2),
      (&[(1, 2)], 1),
    ],
  );
  assert_eq!(t.winners(), Some(vec![1]));
  let reset = t.reset_match().unwrap();
  assert_eq!(t.state(reset), Ok(MatchState::Decided));
}

#[test]
fn four_competitors_undefeated_champion_skips_reset() {
  let mut t = Tournament::new(vec![1u32, 2, 3, 4]).unwrap();
  assert_eq!(active_pairs(&t), vec![(1, 4), (2, 3)]);
  assert_eq!(t.match_count(), 7);

  for winner in [1, 2, 1, 3, 2] {
    let match_id = t.active_matches()[0].id();
    t.resolve(match_id, &winner).unwrap();
  }
  assert_eq!(active_pairs(&t), vec![(1, 2)]);

  let finals = t.finals();
  t.resolve(finals, &1).unwrap();

  let reset = t.reset_match().unwrap();
  assert_eq!(t.get(reset).unwrap().winner(t.slots()), Some(1));
  assert_eq!(t.winners(), Some(vec![1]));
  assert_eq!(t.decisions().len(), 6);
}

#[test]
fn four_competitors_upset_in_finals() {
  let mut t = play(
    4,
    &[
      (&[(1, 4), (2, 3)], 1),
      (&[(2, 3)], 2),
      (&[(1, 2), (3, 4)], 1),
      (&[(3, 4)], 3),
      (&[(2, 3)], 2),
      (&[(1, 2)], 2),
    ],
  );
  let reset = t.reset_match().unwrap();
  assert_eq!(t.state(reset), Ok(MatchState::Ready));
  assert_eq!(active_pairs(&t), vec![(2, 1)]);
  assert_eq!(t.winners(), None);

  assert_eq!(
    t.resolve(reset, &3),
    Err(BracketError::UnknownCompetitor { match_id: reset })
  );
  t.resolve(reset, &1).unwrap();
  assert_eq!(t.winners(), Some(vec![1]));
}

#[test]
fn five_competitors_lowest_seed_runs_the_table() {
  let t = play(
    5,
    &[
      (&[(4, 5), (2, 3)], 5),
      (&[(1, 5), (2, 3)], 5),
      (&[(2, 3)], 3),
      (&[(5, 3), (2, 1)], 5),
      (&[(2, 1)], 2),
      (&[(4, 2)], 4),
      (&[(3, 4)], 4),
      (&[(5, 4)], 5),
    ],
  );
  assert_eq!(t.winners(), Some(vec![5]));
}

#[test]
fn six_competitors_right_side_always_wins() {
  let t = play(
    6,
    &[
      (&[(3, 6), (4, 5)], 6),
      (&[(4, 5), (2, 6)], 5),
      (&[(1, 5), (2, 6)], 5),
      (&[(2, 6), (4, 1)], 6),
      (&[(5, 6), (4, 1), (3, 2)], 6),
      (&[(4, 1), (3, 2)], 1),
      (&[(3, 2)], 2),
      (&[(1, 2)], 2),
      (&[(5, 2)], 2),
      (&[(6, 2)], 2),
      (&[(2, 6)], 6),
    ],
  );
  assert_eq!(t.winners(), Some(vec![6]));
}

#[test]
fn eight_competitors_top_seeds_hold() {
  let t = play(
    8,
    &[
      (&[(1, 8), (2, 7), (3, 6), (4, 5)], 1),
      (&[(2, 7), (3, 6), (4, 5)], 2),
      (&[(3, 6), (4, 5)], 3),
      (&[(4, 5), (2, 3), (6, 7)], 4),
      (&[(1, 4), (2, 3), (5, 8), (6, 7)], 1),
      (&[(2, 3), (5, 8), (6, 7)], 2),
      (&[(1, 2), (5, 8), (6, 7)], 1),
      (&[(5, 8), (6, 7)], 5),
      (&[(6, 7), (3, 5)], 6),
      (&[(4, 6), (3, 5)], 4),
      (&[(3, 5)], 3),
      (&[(4, 3)], 3),
      (&[(2, 3)], 2),
      (&[(1, 2)], 1),
    ],
  );
  assert_eq!(t.winners(), Some(vec![1]));
  let labels = t.list_matches().iter().map(|m| m.label()).collect::<Vec<_>>();
  assert_eq!(
    labels,
    vec![
      "W1", "W1", "W1", "W1", "W2", "W2", "W3", "L1", "L1", "L2", "L2", "L3", "L4", "GF1", "GF2"
    ]
  );
}

#[test]
fn construction_needs_two_competitors() {
  assert_eq!(
    Tournament::<u32>::new(vec![]).unwrap_err(),
    BracketError::InvalidConfiguration { count: 0 }
  );
  assert_eq!(
    Tournament::new(vec![7u32]).unwrap_err(),
    BracketError::InvalidConfiguration { count: 1 }
  );
}

#[test]
fn finals_only_without_reset() {
  let settings = BracketSettings { bracket_reset: false };
  let mut t = Tournament::with_settings(vec![1u32, 2, 3, 4], &settings).unwrap();
  assert_eq!(t.match_count(), 6);
  for winner in [1, 2, 1, 3, 2, 2] {
    assert_eq!(t.winners(), None);
    let match_id = t.active_matches()[0].id();
    t.resolve(match_id, &winner).unwrap();
  }
  assert_eq!(t.winners(), Some(vec![2]));
}
