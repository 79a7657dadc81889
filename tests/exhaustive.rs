//! Every sequence of left/right outcomes for small fields.

use std::collections::HashMap;

use double_elimination::{MatchState, Tournament};

fn losses(t: &Tournament<u32>) -> HashMap<u32, usize> {
  let mut counts = HashMap::new();
  for decision in t.decisions() {
    let node = t.get(decision.match_id).unwrap();
    let loser = node.loser(t.slots()).unwrap();
    *counts.entry(loser).or_insert(0) += 1;
  }
  counts
}

fn wins(t: &Tournament<u32>, competitor: u32) -> usize {
  t.decisions().iter().filter(|d| d.winner == competitor).count()
}

fn check_active_set(t: &Tournament<u32>) {
  let slots = t.slots();
  let expected = t
    .list_matches()
    .iter()
    .filter(|m| slots.is_bound(m.left_slot()) && slots.is_bound(m.right_slot()))
    .filter(|m| !slots.is_bound(m.winner_slot()))
    .map(|m| m.id())
    .collect::<Vec<_>>();
  let active = t.active_matches().iter().map(|m| m.id()).collect::<Vec<_>>();
  assert_eq!(active, expected);
}

fn check_finished(t: &Tournament<u32>, n: u32) {
  let champion = t.winners().unwrap()[0];
  let losses = losses(t);
  assert!(losses.get(&champion).copied().unwrap_or(0) <= 1);
  assert!(wins(t, champion) > 0);
  for competitor in (1..=n).filter(|c| *c != champion) {
    assert_eq!(losses.get(&competitor).copied(), Some(2), "n = {n}, competitor {competitor}");
  }
  for m in t.list_matches() {
    assert_eq!(t.state(m.id()), Ok(MatchState::Decided), "{}", m.label());
  }
  // One decision per match, except a reset that settled itself.
  let played = t.decisions().len();
  let count = t.match_count();
  assert!(played == count || played + 1 == count);
}

/// Depth first over both outcomes of the first playable match.
fn explore(t: Tournament<u32>, n: u32, depth: usize, finished: &mut usize) {
  check_active_set(&t);
  let next = t.active_matches().first().map(|m| m.id());
  let Some(match_id) = next else {
    check_finished(&t, n);
    *finished += 1;
    return;
  };
  assert_eq!(t.winners(), None);
  assert!(depth < t.match_count(), "n = {n} did not terminate");

  let [left, right] = t.participants(match_id).unwrap();
  for winner in [left.unwrap(), right.unwrap()] {
    let mut branch = t.clone();
    branch.resolve(match_id, &winner).unwrap();
    explore(branch, n, depth + 1, finished);
  }
}

#[test]
fn all_outcomes_for_small_fields() {
  for n in 2..=7u32 {
    let mut finished = 0;
    explore(Tournament::new((1..=n).collect()).unwrap(), n, 0, &mut finished);
    let n = n as usize;
    // Between 2n - 2 and 2n - 1 binary choices per path.
    assert!(finished >= 1 << (2 * n - 2), "n = {n}");
    assert!(finished <= 1 << (2 * n - 1), "n = {n}");
  }
}
