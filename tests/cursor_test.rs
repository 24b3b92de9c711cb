//! Pre-order cursor behaviour, including edits made while a walk is in progress

use rstest::rstest;

use livetree::fixtures::{self, Fixture};
use livetree::util::testing;
use livetree::{BinaryTree, Frontier, LinkedStack, Node, PreOrderCursor, TreeError};

/// Reference recursive pre-order, independent of the cursor.
fn recursive_pre_order(node: Option<Node<i64>>, out: &mut Vec<i64>) {
    if let Some(node) = node {
        out.push(node.data());
        recursive_pre_order(node.left_child(), out);
        recursive_pre_order(node.right_child(), out);
    }
}

fn drain<S: Frontier<Node<i64>>>(cursor: &mut PreOrderCursor<i64, S>) -> Vec<i64> {
    let mut out = Vec::new();
    while cursor.has_next() {
        out.push(cursor.try_next().unwrap());
    }
    out
}

// ============================================================
// Full traversals
// ============================================================

#[rstest]
#[case(Fixture::Single, vec![42])]
#[case(Fixture::LeftChain, vec![1, 2, 3])]
#[case(Fixture::RightChain, vec![1, 2, 3])]
#[case(Fixture::Complete, vec![1, 2, 4, 5, 3, 6, 7])]
#[case(Fixture::Sample, vec![5, 2, 1, 4, 8, -2, 6])]
fn given_fixture_when_walking_then_matches_recursive_pre_order(
    #[case] fixture: Fixture,
    #[case] expected: Vec<i64>,
) {
    // Arrange
    testing::init_test_setup();
    let tree = fixture.build();
    let mut reference = Vec::new();
    recursive_pre_order(tree.root(), &mut reference);

    // Act
    let walked = drain(&mut tree.cursor());

    // Assert
    assert_eq!(walked, expected);
    assert_eq!(walked, reference);
    assert_eq!(walked, tree.pre_order());
}

#[test]
fn given_empty_tree_when_creating_cursor_then_exhausted() {
    let tree: BinaryTree<i64> = BinaryTree::empty();
    let mut cursor = tree.cursor();

    assert!(!cursor.has_next());
    assert_eq!(cursor.try_next(), Err(TreeError::Exhausted));
    assert_eq!(cursor.next(), None);
}

#[test]
fn given_exhausted_cursor_when_calling_next_repeatedly_then_fails_every_time() {
    // Arrange
    let tree = fixtures::single();
    let mut cursor = tree.cursor();
    assert_eq!(cursor.try_next(), Ok(42));

    // Act / Assert
    for _ in 0..3 {
        assert_eq!(cursor.try_next(), Err(TreeError::Exhausted));
        assert!(matches!(cursor.next_node(), Err(TreeError::Exhausted)));
        assert!(!cursor.has_next());
    }
}

// ============================================================
// Mutation during iteration
// ============================================================

#[test]
fn given_children_attached_to_unvisited_node_when_walking_then_discovered() {
    // Arrange: 1(2,3)
    let three = Node::new(3);
    let two = Node::new(2);
    let tree = BinaryTree::new(Node::with_children(1, Some(two.clone()), Some(three.clone())));
    let mut cursor = tree.cursor();
    assert_eq!(cursor.try_next(), Ok(1));
    assert_eq!(cursor.try_next(), Ok(2));

    // Act: grow the pending node 3
    three.set_left_child(Some(Node::new(4))).unwrap();
    three.set_right_child(Some(Node::new(5))).unwrap();

    // Assert
    assert_eq!(cursor.try_next(), Ok(3));

    // Act: edit the already visited node 2
    two.set_left_child(Some(Node::new(99))).unwrap();

    // Assert
    assert_eq!(drain(&mut cursor), vec![4, 5]);
    assert_eq!(cursor.try_next(), Err(TreeError::Exhausted));
}

#[test]
fn given_sample_when_growing_node_six_mid_walk_then_new_children_follow() {
    // Arrange
    let tree = fixtures::sample();
    let mut cursor = tree.cursor();
    let first_four: Vec<i64> = cursor.by_ref().take(4).collect();
    assert_eq!(first_four, vec![5, 2, 1, 4]);

    // Act
    let six = tree.root().unwrap().right_child().unwrap();
    six.set_left_child(Some(Node::new(100))).unwrap();
    six.set_right_child(Some(Node::new(-50))).unwrap();

    // Assert
    assert_eq!(drain(&mut cursor), vec![8, -2, 6, 100, -50]);
    assert!(!cursor.has_next());
}

#[test]
fn given_pending_node_payload_changed_when_walking_then_new_payload_produced() {
    let tree = fixtures::complete();
    let mut cursor = tree.cursor();
    assert_eq!(cursor.try_next(), Ok(1));

    let three = tree.root().unwrap().right_child().unwrap();
    three.set_data(30);

    assert_eq!(drain(&mut cursor), vec![2, 4, 5, 30, 6, 7]);
}

#[test]
fn given_pending_node_replaced_when_walking_then_old_handle_still_walked() {
    // The frontier already holds node 3; replacing the slot does not reach
    // into the cursor, it only changes what the root owns from now on.
    let tree = fixtures::complete();
    let mut cursor = tree.cursor();
    assert_eq!(cursor.try_next(), Ok(1));

    let root = tree.root().unwrap();
    let replaced = root.set_right_child(Some(Node::new(9))).unwrap().unwrap();

    assert!(replaced.is_root());
    assert_eq!(drain(&mut cursor), vec![2, 4, 5, 3, 6, 7]);
    assert_eq!(tree.pre_order(), vec![1, 2, 4, 5, 9]);
}

#[test]
fn given_visited_subtree_grown_when_walking_then_no_effect() {
    let tree = fixtures::left_chain();
    let mut cursor = tree.cursor();
    assert_eq!(cursor.try_next(), Ok(1));
    assert_eq!(cursor.try_next(), Ok(2));

    // node 1 is visited; its free right slot is outside the walk now
    tree.root().unwrap().set_right_child(Some(Node::new(7))).unwrap();

    assert_eq!(drain(&mut cursor), vec![3]);
}

#[test]
fn given_peek_node_when_growing_then_walk_continues_into_new_children() {
    let tree = fixtures::single();
    let mut cursor = tree.cursor();

    let pending = cursor.peek_node().unwrap();
    pending.set_left_child(Some(Node::new(1))).unwrap();

    assert_eq!(drain(&mut cursor), vec![42, 1]);
}

#[test]
fn given_two_cursors_when_unvisited_node_mutated_then_each_continues_independently() {
    // Arrange: 1(2,3)
    let three = Node::new(3);
    let tree = BinaryTree::new(Node::with_children(1, Some(Node::new(2)), Some(three.clone())));
    let mut ahead = tree.cursor();
    let mut behind = tree.cursor();
    assert_eq!(ahead.try_next(), Ok(1));
    assert_eq!(ahead.try_next(), Ok(2));
    assert_eq!(behind.try_next(), Ok(1));

    // Act
    three.set_left_child(Some(Node::new(4))).unwrap();

    // Assert
    assert_eq!(drain(&mut ahead), vec![3, 4]);
    assert_eq!(drain(&mut behind), vec![2, 3, 4]);
}

#[test]
fn given_cursor_when_tree_dropped_then_walk_completes() {
    let tree = fixtures::sample();
    let mut cursor = tree.cursor();
    assert_eq!(cursor.try_next(), Ok(5));

    drop(tree);

    assert_eq!(drain(&mut cursor), vec![2, 1, 4, 8, -2, 6]);
}

/// Takes two steps over 1(2,3), grows node 3, then finishes the walk.
fn walk_growing_three<S: Frontier<Node<i64>>>(
    tree: &BinaryTree<i64>,
    mut cursor: PreOrderCursor<i64, S>,
) -> Vec<i64> {
    let mut out = vec![cursor.try_next().unwrap(), cursor.try_next().unwrap()];
    let three = tree.root().unwrap().right_child().unwrap();
    three.set_left_child(Some(Node::new(4))).unwrap();
    out.extend(drain(&mut cursor));
    out
}

#[test]
fn given_linked_stack_frontier_when_mutating_mid_walk_then_same_as_vec() {
    let build = || BinaryTree::new(Node::with_children(1, Some(Node::new(2)), Some(Node::new(3))));

    let vec_tree = build();
    let from_vec = walk_growing_three(&vec_tree, vec_tree.cursor());

    let linked_tree = build();
    let from_linked = walk_growing_three(&linked_tree, linked_tree.cursor_with(LinkedStack::new()));

    assert_eq!(from_vec, from_linked);
    assert_eq!(from_vec, vec![1, 2, 3, 4]);
}

#[test]
fn given_cursor_when_peeking_then_position_unchanged() {
    let tree = fixtures::complete();
    let mut cursor = tree.cursor();
    cursor.try_next().unwrap();

    assert_eq!(cursor.peek(), Ok(2));
    assert_eq!(cursor.peek(), Ok(2));
    assert_eq!(cursor.try_next(), Ok(2));
}
