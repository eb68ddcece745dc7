/*!
# Component Analysis

Connected-component algorithms over the [`NavGraph`] interface:

- **Connected components** for undirected graphs, via breadth-first flood
  fill.
- **Strongly connected components** for directed graphs, via Kosaraju's two
  passes (the reversed pass reuses [`NavGraph::predecessors`]).

On an undirected graph both functions return the same partition (up to
ordering). Every node appears in exactly one component; on a grid, obstacle
cells come out as singleton components since they have no edges.
*/

use std::collections::VecDeque;

use crate::core::types::{NavGraph, NodeId};

/// Computes the connected components of an undirected graph.
///
/// Returns a vector of components, each a vector of node ids. The order of
/// components and of nodes within a component follows discovery order.
///
/// # Example
///
/// ```rust
/// use pathina::core::components::connected_components;
/// use pathina::core::types::Graph;
///
/// let g = Graph::from_edges(4, &[(0, 1, 1.0), (2, 3, 1.0)]).unwrap();
/// let components = connected_components(&g);
/// assert_eq!(components, vec![vec![0, 1], vec![2, 3]]);
/// ```
pub fn connected_components<G: NavGraph>(graph: &G) -> Vec<Vec<NodeId>> {
    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut components = Vec::new();
    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            component.push(node);
            for (neighbor, _) in graph.neighbors(node) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
        components.push(component);
    }
    components
}

/// Computes the strongly connected components of a directed graph using
/// Kosaraju's algorithm.
///
/// Returns a vector of components; the ordering of components and of nodes
/// within a component is unspecified. Applied to an undirected graph this
/// agrees with [`connected_components`] up to ordering.
pub fn strongly_connected_components<G: NavGraph>(graph: &G) -> Vec<Vec<NodeId>> {
    let n = graph.node_count();
    let forward: Vec<Vec<NodeId>> = (0..n)
        .map(|node| graph.neighbors(node).into_iter().map(|(to, _)| to).collect())
        .collect();
    let backward: Vec<Vec<NodeId>> = (0..n)
        .map(|node| {
            graph
                .predecessors(node)
                .into_iter()
                .map(|(from, _)| from)
                .collect()
        })
        .collect();

    // First pass: record nodes in order of DFS completion.
    let mut visited = vec![false; n];
    let mut finish_order = Vec::with_capacity(n);
    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];
        while let Some((node, cursor)) = stack.last_mut() {
            if let Some(&next) = forward[*node].get(*cursor) {
                *cursor += 1;
                if !visited[next] {
                    visited[next] = true;
                    stack.push((next, 0));
                }
            } else {
                finish_order.push(*node);
                stack.pop();
            }
        }
    }

    // Second pass: flood the reversed graph in reverse finish order.
    let mut assigned = vec![false; n];
    let mut components = Vec::new();
    for &root in finish_order.iter().rev() {
        if assigned[root] {
            continue;
        }
        assigned[root] = true;
        let mut component = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            component.push(node);
            for &source in &backward[node] {
                if !assigned[source] {
                    assigned[source] = true;
                    stack.push(source);
                }
            }
        }
        components.push(component);
    }
    components
}
