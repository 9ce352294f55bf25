//! Tree algorithms: traversal orders, measurements, lowest common ancestor.

use std::collections::VecDeque;

use poly_core::NodeId;

use crate::tree::TreeGraph;

/// Pre-order traversal: node, then each child subtree in order.
pub fn preorder(tree: &TreeGraph, start: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        out.push(node);
        for child in tree.children(node).into_iter().rev() {
            stack.push(child);
        }
    }
    out
}

/// Post-order traversal: each child subtree in order, then the node.
pub fn postorder(tree: &TreeGraph, start: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![(start, false)];
    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            out.push(node);
            continue;
        }
        stack.push((node, true));
        for child in tree.children(node).into_iter().rev() {
            stack.push((child, false));
        }
    }
    out
}

/// In-order traversal generalized to n-ary trees: first child subtree, the
/// node, then the remaining child subtrees.
pub fn inorder(tree: &TreeGraph, start: NodeId) -> Vec<NodeId> {
    enum Step {
        Enter(NodeId),
        Emit(NodeId),
    }
    let mut out = Vec::new();
    let mut stack = vec![Step::Enter(start)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Emit(node) => out.push(node),
            Step::Enter(node) => {
                let children = tree.children(node);
                for child in children.iter().skip(1).rev() {
                    stack.push(Step::Enter(*child));
                }
                stack.push(Step::Emit(node));
                if let Some(first) = children.first() {
                    stack.push(Step::Enter(*first));
                }
            }
        }
    }
    out
}

/// Level-order traversal: breadth first, siblings in order.
pub fn level_order(tree: &TreeGraph, start: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        out.push(node);
        for child in tree.children(node) {
            queue.push_back(child);
        }
    }
    out
}

/// Depth of `node`: edges on the path from the root.
pub fn depth(tree: &TreeGraph, node: NodeId) -> usize {
    tree.level(node)
}

/// Height of the subtree at `node`: edges on the longest downward path. A
/// leaf has height 0.
pub fn height(tree: &TreeGraph, node: NodeId) -> usize {
    let mut best = 0;
    let mut stack = vec![(node, 0usize)];
    while let Some((current, level)) = stack.pop() {
        best = best.max(level);
        for child in tree.children(current) {
            stack.push((child, level + 1));
        }
    }
    best
}

/// Diameter: the longest path (in edges) between any two nodes. Computed per
/// node as the sum of its two tallest child subtrees.
pub fn diameter(tree: &TreeGraph) -> usize {
    let Some(root) = tree.root() else {
        return 0;
    };
    let mut best = 0;
    for node in preorder(tree, root) {
        let mut child_heights: Vec<usize> = tree
            .children(node)
            .into_iter()
            .map(|child| height(tree, child) + 1)
            .collect();
        child_heights.sort_unstable_by(|a, b| b.cmp(a));
        let through = child_heights.iter().take(2).sum();
        best = best.max(through);
    }
    best
}

/// Lowest common ancestor by root-path intersection. `None` when the nodes
/// are in different trees or missing.
pub fn lowest_common_ancestor(tree: &TreeGraph, a: NodeId, b: NodeId) -> Option<NodeId> {
    if tree.graph().node(a).is_none() || tree.graph().node(b).is_none() {
        return None;
    }
    let mut path_a = vec![a];
    path_a.extend(tree.ancestors(a));
    let mut path_b = vec![b];
    path_b.extend(tree.ancestors(b));
    path_a.reverse();
    path_b.reverse();
    let mut common = None;
    for (x, y) in path_a.iter().zip(path_b.iter()) {
        if x == y {
            common = Some(*x);
        } else {
            break;
        }
    }
    common
}
