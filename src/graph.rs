//! Dependency graph over frame identifiers
//!
//! Records which frames' outputs were used to compute which other frames and
//! answers the reachability query behind cache invalidation: given a changed
//! set, which frames are transitively downstream of it.
//!
//! Edges are never removed. Frame adjacency is structural and outlives any one
//! cached value; invalidation only ever touches cache contents.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};

/// Directed dependency relation over node identifiers
///
/// Edges point `depends_on -> node`, so downstream propagation (the direction
/// invalidation travels) is the outgoing direction.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
        }
    }

    /// Record that `node` depends on `depends_on`
    ///
    /// Idempotent: adding the same edge twice has no additional effect. Nodes
    /// are created on first mention.
    pub fn add_dependency(&mut self, node: &str, depends_on: &str) {
        let node_idx = self.intern(node);
        let dep_idx = self.intern(depends_on);

        if self.graph.find_edge(dep_idx, node_idx).is_none() {
            self.graph.add_edge(dep_idx, node_idx, ());
        }
    }

    /// Get all nodes that `node` depends on (empty set if absent)
    pub fn get_dependencies(&self, node: &str) -> HashSet<String> {
        self.neighbors(node, Direction::Incoming)
    }

    /// Get all nodes that depend on `node` (empty set if absent)
    pub fn get_dependents(&self, node: &str) -> HashSet<String> {
        self.neighbors(node, Direction::Outgoing)
    }

    /// Compute the downstream closure of a changed set
    ///
    /// Breadth-first traversal over dependents starting from every changed
    /// node; each node is visited at most once. The result always contains
    /// `changed` itself.
    pub fn get_affected_nodes(&self, changed: &HashSet<String>) -> HashSet<String> {
        let mut affected: HashSet<String> = changed.clone();
        let mut queue: VecDeque<String> = changed.iter().cloned().collect();

        while let Some(node) = queue.pop_front() {
            for dependent in self.get_dependents(&node) {
                if affected.insert(dependent.clone()) {
                    queue.push_back(dependent);
                }
            }
        }

        affected
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Render the graph in DOT format, edges drawn dependency -> dependent
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph DependencyGraph {\n");
        for edge in self.graph.raw_edges() {
            let from = &self.graph[edge.source()];
            let to = &self.graph[edge.target()];
            dot.push_str(&format!("  \"{}\" -> \"{}\";\n", from, to));
        }
        dot.push_str("}\n");
        dot
    }

    fn intern(&mut self, node: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(node) {
            idx
        } else {
            let idx = self.graph.add_node(node.to_string());
            self.indices.insert(node.to_string(), idx);
            idx
        }
    }

    fn neighbors(&self, node: &str, direction: Direction) -> HashSet<String> {
        let Some(&idx) = self.indices.get(node) else {
            return HashSet::new();
        };

        self.graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].clone())
            .collect()
    }
}
