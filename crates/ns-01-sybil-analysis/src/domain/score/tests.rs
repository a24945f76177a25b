//! Tests for threat score aggregation

use super::*;
use crate::domain::RouterHash;

fn make_hash(byte: u8) -> RouterHash {
    let mut id = [0u8; 32];
    id[0] = byte;
    RouterHash::new(id)
}

// =============================================================================
// TEST GROUP 1: Accumulation
// =============================================================================

#[test]
fn test_empty_board_has_no_entries() {
    let board = ScoreBoard::new();
    assert!(board.is_empty());
    assert!(board.ranked_descending().is_empty());
    assert_eq!(board.total(&make_hash(1)), None);
}

#[test]
fn test_total_is_sum_of_deltas() {
    let mut board = ScoreBoard::new();
    let node = make_hash(1);

    board.add_points(node, 5.0, "Same IP with 1 other");
    board.add_points(node, 4.0, "Same IPv4 /24 with 1 other");
    board.add_points(node, 0.5, "Lookup fail rate 43%");

    assert_eq!(board.total(&node), Some(9.5));
    assert_eq!(board.reasons(&node).len(), 3);
}

#[test]
fn test_signed_contribution_reduces_total() {
    let mut board = ScoreBoard::new();
    let node = make_hash(1);

    board.add_points(node, 5.0, "Same IP with 1 other");
    board.add_points(node, -100.0, "Our family");

    assert_eq!(board.total(&node), Some(-95.0));
}

#[test]
fn test_unbounded_reasons() {
    let mut board = ScoreBoard::new();
    let node = make_hash(1);

    for i in 0..1000 {
        board.add_points(node, 0.25, format!("reason {i}"));
    }

    assert_eq!(board.reasons(&node).len(), 1000);
    assert_eq!(board.total(&node), Some(250.0));
}

// =============================================================================
// TEST GROUP 2: Ranking
// =============================================================================

#[test]
fn test_ranked_descending_by_total() {
    let mut board = ScoreBoard::new();
    board.add_points(make_hash(1), 3.0, "a");
    board.add_points(make_hash(2), 30.0, "b");
    board.add_points(make_hash(3), 12.0, "c");

    let ranked: Vec<_> = board.ranked_descending().iter().map(|e| e.hash).collect();
    assert_eq!(ranked, vec![make_hash(2), make_hash(3), make_hash(1)]);
}

#[test]
fn test_ties_broken_by_hash() {
    let mut board = ScoreBoard::new();
    board.add_points(make_hash(9), 10.0, "x");
    board.add_points(make_hash(4), 10.0, "x");
    board.add_points(make_hash(7), 10.0, "x");

    let ranked: Vec<_> = board.ranked_descending().iter().map(|e| e.hash).collect();
    assert_eq!(ranked, vec![make_hash(4), make_hash(7), make_hash(9)]);
}

#[test]
fn test_reasons_sorted_by_points_then_text() {
    let mut board = ScoreBoard::new();
    let node = make_hash(1);
    board.add_points(node, 2.0, "b");
    board.add_points(node, 10.0, "z");
    board.add_points(node, 2.0, "a");

    let entry = &board.ranked_descending()[0];
    let texts: Vec<_> = entry.reasons.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["z", "a", "b"]);
}

// =============================================================================
// TEST GROUP 3: Merge
// =============================================================================

#[test]
fn test_merge_is_order_independent() {
    let deltas = [
        (make_hash(1), 5.0, "ip"),
        (make_hash(2), 4.0, "subnet"),
        (make_hash(1), 0.1, "lookup"),
        (make_hash(2), 0.2, "new"),
        (make_hash(1), 0.3, "version"),
    ];

    let mut forward = ScoreBoard::new();
    let mut left = ScoreBoard::new();
    let mut right = ScoreBoard::new();
    for (i, (h, p, r)) in deltas.iter().enumerate() {
        forward.add_points(*h, *p, *r);
        if i % 2 == 0 {
            left.add_points(*h, *p, *r);
        } else {
            right.add_points(*h, *p, *r);
        }
    }

    let mut merged_lr = left.clone();
    merged_lr.merge(right.clone());
    let mut merged_rl = right;
    merged_rl.merge(left);

    assert_eq!(forward.ranked_descending(), merged_lr.ranked_descending());
    assert_eq!(merged_lr.ranked_descending(), merged_rl.ranked_descending());
}
