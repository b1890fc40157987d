//! MCTS integration tests on Knight's Isolation and payoff trees.

use proptest::prelude::*;

use anytime_mcts::core::{GameRng, PlayerId};
use anytime_mcts::games::isolation::{Cell, Direction, Isolation, Move};
use anytime_mcts::games::payoff::PayoffTree;
use anytime_mcts::mcts::{MCTSConfig, MCTSSearch, MCTSTree, NodeId, SelectionPolicy, UCB1};
use anytime_mcts::rules::GameState;

fn cell(col: u8, row: u8) -> Cell {
    Cell::new(col, row).unwrap()
}

/// Play `plies` random legal moves from the empty board.
fn random_position(seed: u64, plies: usize) -> Isolation {
    let mut rng = GameRng::new(seed);
    let mut state = Isolation::new();
    for _ in 0..plies {
        let actions = state.legal_actions();
        let Some(action) = rng.choose(&actions) else {
            break;
        };
        state = state.apply(action);
    }
    state
}

/// Both knights placed near the centre with a few jumps played.
fn midgame() -> Isolation {
    [
        Move::Place(cell(5, 4)),
        Move::Place(cell(4, 4)),
        Move::Jump(Direction::NNE),
        Move::Jump(Direction::SSW),
        Move::Jump(Direction::WSW),
        Move::Jump(Direction::ENE),
    ]
    .iter()
    .fold(Isolation::new(), |state, mv| state.apply(mv))
}

/// Check visit bookkeeping for every node below the root.
fn assert_visit_invariant<S: GameState>(tree: &MCTSTree<S>) {
    for (id, node) in tree.iter() {
        if id == tree.root() || node.is_terminal {
            continue;
        }
        let below: u32 = tree.children(id).map(|c| tree.get(c).visits).sum();
        assert_eq!(node.visits, 1 + below, "node {}", id);
    }
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_search_returns_legal_isolation_move() {
    let state = Isolation::new()
        .apply(&Move::Place(cell(5, 4)))
        .apply(&Move::Place(cell(4, 4)));

    let mut search = MCTSSearch::new(state.clone(), MCTSConfig::default(), GameRng::new(3));
    let action = search.search(300).unwrap();

    assert!(state.legal_actions().contains(&action));
    assert!(!search.tree().root_node().children.is_empty());
    assert_eq!(search.tree().root_node().visits, 300);
}

#[test]
fn test_search_with_single_iteration() {
    let state = midgame();

    let mut search = MCTSSearch::new(state.clone(), MCTSConfig::default(), GameRng::new(1));
    let action = search.search(1).unwrap();

    assert_eq!(action, state.legal_actions()[0]);
    assert_eq!(search.tree().len(), 2);
}

#[test]
fn test_visit_invariant_on_isolation() {
    let mut search = MCTSSearch::new(midgame(), MCTSConfig::default(), GameRng::new(9));
    search.search(500).unwrap();

    assert_eq!(search.tree().root_node().visits, 500);
    assert_visit_invariant(search.tree());
}

#[test]
fn test_root_children_cover_all_actions_eventually() {
    let state = midgame();
    let legal = state.legal_actions();

    let mut search = MCTSSearch::new(state, MCTSConfig::default(), GameRng::new(4));
    search.search(legal.len() as u32).unwrap();

    let expanded: Vec<Move> = search.action_visits().into_iter().map(|(a, _)| a).collect();
    assert_eq!(expanded, legal);
    assert!(search.tree().is_fully_expanded(search.tree().root()));
}

#[test]
fn test_prefers_move_that_avoids_trap() {
    // First player at (0,0) may go to (2,1) or (1,2). Every jump out of
    // (1,2) is blocked, so that move loses on the next turn.
    let blocked = [cell(2, 0), cell(3, 1), cell(0, 4), cell(3, 3), cell(2, 4)];
    let state = Isolation::new()
        .with_blocked(blocked)
        .apply(&Move::Place(cell(0, 0)))
        .apply(&Move::Place(cell(10, 8)));
    assert_eq!(
        state.legal_actions(),
        vec![Move::Jump(Direction::ESE), Move::Jump(Direction::SSE)]
    );

    let mut search = MCTSSearch::new(state, MCTSConfig::default(), GameRng::new(8));
    search.search(2000).unwrap();

    let visits = search.action_visits();
    assert_eq!(visits[0].0, Move::Jump(Direction::ESE));
    assert!(visits[0].1 > 10 * visits[1].1, "visits: {:?}", visits);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_search_deterministic_with_seed() {
    let state = midgame();
    let config = MCTSConfig::default().with_seed(12345);

    let mut first = MCTSSearch::new(state.clone(), config.clone(), GameRng::new(config.seed));
    let mut second = MCTSSearch::new(state, config.clone(), GameRng::new(config.seed));

    assert_eq!(first.search(400).unwrap(), second.search(400).unwrap());
    assert_eq!(first.action_visits(), second.action_visits());
}

// =============================================================================
// Payoff Tree Tests
// =============================================================================

#[test]
fn test_payoff_tree_optimum_over_seeds() {
    let (f, s) = (PlayerId::FIRST, PlayerId::SECOND);
    let game = PayoffTree::new(3, 2, vec![f, s, f, f, f, f, s, s, f]);
    let optimum = game.minimax_action().unwrap();

    let hits = (0..20)
        .filter(|&seed| {
            let mut search = MCTSSearch::new(game.clone(), MCTSConfig::default(), GameRng::new(seed));
            search.search(2000).unwrap() == optimum
        })
        .count();

    assert!(hits >= 14, "optimum found for only {} of 20 seeds", hits);
}

#[test]
fn test_payoff_tree_terminal_children_are_not_expanded() {
    let game = PayoffTree::uniform(2, 1);
    let mut search = MCTSSearch::new(game, MCTSConfig::default(), GameRng::new(0));
    search.search(50).unwrap();

    let stats = search.tree().stats();
    assert_eq!(stats.node_count, 3);
    assert_eq!(stats.terminal_count, 2);
    // Every rollout starts on a leaf, including the two that expanded them.
    assert_eq!(search.stats().terminal_hits, 50);
    assert_eq!(search.tree().get(NodeId::new(1)).children.len(), 0);
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_search_move_is_legal(seed in 0u64..500, plies in 2usize..20, iterations in 1u32..60) {
        let state = random_position(seed, plies);
        prop_assume!(!state.is_terminal());

        let mut search = MCTSSearch::new(state.clone(), MCTSConfig::default(), GameRng::new(seed));
        let action = search.search(iterations).unwrap();

        prop_assert!(state.legal_actions().contains(&action));
        prop_assert_eq!(search.tree().root_node().visits, iterations);
    }

    #[test]
    fn prop_ucb1_increases_with_reward(
        parent in 2u32..10_000,
        visits in 1u32..1_000,
        mean in -1.0f64..1.0,
        bump in 0.0f64..1.0,
    ) {
        prop_assume!(visits <= parent);
        let config = MCTSConfig::default();
        let n = f64::from(visits);

        let low = UCB1.score(parent, visits, mean * n, &config);
        let high = UCB1.score(parent, visits, (mean + bump) * n, &config);
        prop_assert!(high >= low);
    }

    #[test]
    fn prop_ucb1_decreases_with_visits(
        parent in 2u32..10_000,
        visits in 1u32..1_000,
        mean in -1.0f64..1.0,
    ) {
        prop_assume!(visits < parent);
        let config = MCTSConfig::default();

        // Same mean, one more visit.
        let fewer = UCB1.score(parent, visits, mean * f64::from(visits), &config);
        let more = UCB1.score(parent, visits + 1, mean * f64::from(visits + 1), &config);
        prop_assert!(more < fewer);
    }
}
