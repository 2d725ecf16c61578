//! Threaded view of a flat comment list.
//!
//! The backend returns every comment of a container in one flat list, each
//! optionally pointing at its parent. [`build_thread`] groups them into a
//! forest in a single pass over the input:
//!
//! 1. index every comment position by id (a later duplicate id wins),
//! 2. walk the input in order, appending each position to its parent's child
//!    list, or to the roots when it has no parent,
//! 3. materialize owned [`CommentNode`]s from the index lists.
//!
//! Replies keep the order of the flat input. A comment whose parent is not in
//! the input is dropped from the view entirely; it is not promoted to the top
//! level. Comments that only reach themselves through their parent chain
//! (`parent == id`, or longer cycles) are unreachable from any root and are
//! dropped as well.

use std::collections::HashMap;

use serde::Serialize;

use super::Id;
use super::comment::Comment;

/// A comment together with its replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    /// This node plus all nested replies.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.replies.iter());
        }
        total
    }
}

// The derived drop glue recurses once per nesting level; flatten instead.
impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub roots: Vec<CommentNode>,
    /// Length of the flat input, including comments the view dropped.
    pub total_count: usize,
}

impl CommentThread {
    /// Number of comments reachable in the forest.
    pub fn visible_count(&self) -> usize {
        self.roots.iter().map(CommentNode::count).sum()
    }
}

/// Group a flat comment list into reply trees.
pub fn build_thread(flat: &[Comment]) -> CommentThread {
    let mut index: HashMap<&Id, usize> = HashMap::with_capacity(flat.len());
    for (pos, comment) in flat.iter().enumerate() {
        index.insert(&comment.id, pos);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];
    let mut roots = Vec::new();
    for (pos, comment) in flat.iter().enumerate() {
        match comment.parent_id() {
            None => roots.push(pos),
            Some(parent) => {
                if let Some(&parent_pos) = index.get(parent) {
                    children[parent_pos].push(pos);
                }
            }
        }
    }

    let roots = materialize(flat, &roots, &mut children);
    let thread = CommentThread {
        roots,
        total_count: flat.len(),
    };

    let dropped = thread.total_count - thread.visible_count();
    if dropped > 0 {
        tracing::debug!(dropped, "comments with missing parents omitted from thread");
    }
    thread
}

/// Build owned nodes bottom-up without recursion. Together with the `Drop`
/// impl above, deep reply chains never overflow the stack.
fn materialize(flat: &[Comment], roots: &[usize], children: &mut [Vec<usize>]) -> Vec<CommentNode> {
    // Pre-order over everything reachable from a root. Each position sits in
    // at most one child list, so no position is visited twice.
    let mut order = Vec::new();
    let mut visited = vec![false; flat.len()];
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(pos) = stack.pop() {
        if std::mem::replace(&mut visited[pos], true) {
            continue;
        }
        order.push(pos);
        stack.extend(children[pos].iter().rev().copied());
    }

    // Children always come after their parent in pre-order, so walking it
    // backwards finishes every child before its parent needs it.
    let mut built: Vec<Option<CommentNode>> = vec![None; flat.len()];
    for &pos in order.iter().rev() {
        let replies = std::mem::take(&mut children[pos])
            .into_iter()
            .filter_map(|child| built[child].take())
            .collect();
        built[pos] = Some(CommentNode {
            comment: flat[pos].clone(),
            replies,
        });
    }

    roots.iter().filter_map(|&pos| built[pos].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        serde_json::from_value(json!({
            "id": id,
            "text": format!("comment {id}"),
            "parentCommentId": parent,
        }))
        .unwrap()
    }

    /// Compact shape of a forest: `id[child, child]`.
    fn shape(nodes: &[CommentNode]) -> String {
        nodes
            .iter()
            .map(|n| {
                if n.replies.is_empty() {
                    n.comment.id.to_string()
                } else {
                    format!("{}[{}]", n.comment.id, shape(&n.replies))
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn empty_input_gives_empty_thread() {
        let thread = build_thread(&[]);
        assert!(thread.roots.is_empty());
        assert_eq!(thread.total_count, 0);
        assert_eq!(thread.visible_count(), 0);
    }

    #[test]
    fn nested_chain() {
        let flat = vec![comment(1, None), comment(2, Some(1)), comment(3, Some(2))];
        let thread = build_thread(&flat);

        assert_eq!(shape(&thread.roots), "1[2[3]]");
        assert_eq!(thread.total_count, 3);
        assert_eq!(thread.visible_count(), 3);
    }

    #[test]
    fn orphan_is_dropped_but_counted() {
        let flat = vec![comment(1, Some(99))];
        let thread = build_thread(&flat);

        assert!(thread.roots.is_empty());
        assert_eq!(thread.total_count, 1);
        assert_eq!(thread.visible_count(), 0);
    }

    #[test]
    fn orphan_subtree_is_dropped_with_its_replies() {
        let flat = vec![
            comment(1, None),
            comment(2, Some(50)),
            comment(3, Some(2)),
            comment(4, Some(1)),
        ];
        let thread = build_thread(&flat);
        assert_eq!(shape(&thread.roots), "1[4]");
        assert_eq!(thread.total_count, 4);
    }

    #[rstest]
    #[case::parent_first(
        vec![comment(1, None), comment(2, Some(1)), comment(3, Some(1))],
        "1[2,3]"
    )]
    #[case::reply_before_parent(
        vec![comment(2, Some(1)), comment(1, None), comment(3, Some(1))],
        "1[2,3]"
    )]
    #[case::grandchild_before_child(
        vec![comment(3, Some(2)), comment(1, None), comment(2, Some(1))],
        "1[2[3]]"
    )]
    #[case::roots_in_input_order(
        vec![comment(5, None), comment(2, None), comment(9, None)],
        "5,2,9"
    )]
    #[case::interleaved_threads(
        vec![
            comment(1, None),
            comment(2, None),
            comment(3, Some(2)),
            comment(4, Some(1)),
            comment(5, Some(2)),
        ],
        "1[4],2[3,5]"
    )]
    fn replies_follow_flat_input_order(#[case] flat: Vec<Comment>, #[case] expected: &str) {
        assert_eq!(shape(&build_thread(&flat).roots), expected);
    }

    #[test]
    fn every_reachable_comment_sits_under_its_parent() {
        let flat = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, Some(1)),
            comment(4, Some(3)),
            comment(5, None),
            comment(6, Some(5)),
        ];
        let thread = build_thread(&flat);

        fn check(node: &CommentNode) {
            for reply in &node.replies {
                assert_eq!(reply.comment.parent_id(), Some(&node.comment.id));
                check(reply);
            }
        }
        for root in &thread.roots {
            assert_eq!(root.comment.parent_id(), None);
            check(root);
        }
        assert_eq!(thread.visible_count(), flat.len());
    }

    #[test]
    fn self_reference_is_dropped_without_looping() {
        let flat = vec![comment(1, None), comment(2, Some(2))];
        let thread = build_thread(&flat);
        assert_eq!(shape(&thread.roots), "1");
        assert_eq!(thread.total_count, 2);
    }

    #[test]
    fn two_comment_cycle_is_dropped() {
        let flat = vec![comment(1, Some(2)), comment(2, Some(1)), comment(3, None)];
        let thread = build_thread(&flat);
        assert_eq!(shape(&thread.roots), "3");
    }

    #[test]
    fn duplicate_ids_do_not_crash_and_last_wins_for_replies() {
        let flat = vec![
            comment(1, None),
            comment(1, None),
            comment(2, Some(1)),
        ];
        let thread = build_thread(&flat);

        // Both copies stay roots; the reply attaches to the later copy.
        assert_eq!(shape(&thread.roots), "1,1[2]");
        assert_eq!(thread.visible_count(), 3);
    }

    #[test]
    fn blank_parent_reference_is_top_level() {
        let flat: Vec<Comment> = serde_json::from_value(json!([
            {"id": 1, "parentCommentId": 0},
            {"id": 2, "parentCommentId": ""},
        ]))
        .unwrap();
        assert_eq!(shape(&build_thread(&flat).roots), "1,2");
    }

    #[test]
    fn string_ids_are_supported() {
        let flat: Vec<Comment> = serde_json::from_value(json!([
            {"id": "a"},
            {"id": "b", "parentCommentId": "a"},
        ]))
        .unwrap();
        assert_eq!(shape(&build_thread(&flat).roots), "a[b]");
    }

    #[test]
    fn building_twice_gives_equal_threads() {
        let flat = vec![
            comment(1, None),
            comment(3, Some(2)),
            comment(2, Some(1)),
            comment(4, Some(42)),
        ];
        assert_eq!(build_thread(&flat), build_thread(&flat));
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let depth = 50_000;
        let flat: Vec<Comment> = (1..=depth)
            .map(|id| comment(id, if id == 1 { None } else { Some(id - 1) }))
            .collect();

        let thread = build_thread(&flat);
        assert_eq!(thread.roots.len(), 1);
        assert_eq!(thread.visible_count(), depth as usize);
        drop(thread);
    }

    #[test]
    fn deep_chain_builds_and_drops_on_a_small_stack() {
        let depth = 200_000;
        let flat: Vec<Comment> = (1..=depth)
            .map(|id| comment(id, if id == 1 { None } else { Some(id - 1) }))
            .collect();

        let visible = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(move || build_thread(&flat).visible_count())
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(visible, depth as usize);
    }

    #[test]
    fn node_serializes_flattened_with_replies() {
        let thread = build_thread(&[comment(1, None), comment(2, Some(1))]);
        let value = serde_json::to_value(&thread).unwrap();

        assert_eq!(value["totalCount"], 2);
        assert_eq!(value["roots"][0]["id"], 1);
        assert_eq!(value["roots"][0]["replies"][0]["id"], 2);
        assert_eq!(value["roots"][0]["replies"][0]["parentCommentId"], 1);
    }
}
