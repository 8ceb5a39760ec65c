use tracing::debug;

use crate::puzzle::{ContinentSpec, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct ContinentNode {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub position: Position,
    pub filler: bool,
    pub locked: bool,
    pub completed: bool,
}

/// The continents in map order, with their lock/complete status.
///
/// Only the first node starts unlocked. Completing node `k` unlocks node
/// `k + 1` and nothing else: unlocking knows nothing about how many
/// fragments the session holds.
#[derive(Debug, Clone)]
pub struct ContinentGraph {
    nodes: Vec<ContinentNode>,
}

impl ContinentGraph {
    pub fn from_specs(specs: &[ContinentSpec]) -> Self {
        let nodes = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| ContinentNode {
                id: spec.id.clone(),
                name: spec.name.clone(),
                icon: spec.icon.clone(),
                position: spec.position,
                filler: spec.filler,
                locked: i != 0,
                completed: false,
            })
            .collect();
        ContinentGraph { nodes }
    }

    pub fn nodes(&self) -> &[ContinentNode] {
        &self.nodes
    }

    pub fn get(&self, id: &str) -> Option<&ContinentNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.get(id).is_some_and(|n| !n.locked)
    }

    /// Marks `solved_id` completed and unlocks its successor, if any.
    /// Returns the id of the node that was unlocked.
    pub fn unlock_next(&mut self, solved_id: &str) -> Option<&str> {
        let index = self.nodes.iter().position(|n| n.id == solved_id)?;
        self.nodes[index].completed = true;

        let next = self.nodes.get_mut(index + 1)?;
        next.locked = false;
        debug!(solved = solved_id, unlocked = %next.id, "continent unlocked");
        Some(next.id.as_str())
    }

    pub fn reset(&mut self) {
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.locked = i != 0;
            node.completed = false;
        }
    }

    pub fn completed(&self) -> impl Iterator<Item = &ContinentNode> {
        self.nodes.iter().filter(|n| n.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Catalog;
    use pretty_assertions::assert_eq;

    fn graph() -> ContinentGraph {
        ContinentGraph::from_specs(Catalog::builtin().unwrap().continents())
    }

    fn status(graph: &ContinentGraph) -> Vec<(bool, bool)> {
        graph.nodes().iter().map(|n| (n.locked, n.completed)).collect()
    }

    #[test]
    fn only_first_starts_unlocked() {
        let graph = graph();
        assert_eq!(
            status(&graph),
            [(false, false), (true, false), (true, false), (true, false)]
        );
    }

    #[test]
    fn solving_unlocks_only_the_successor() {
        let mut graph = graph();
        assert_eq!(graph.unlock_next("europe"), Some("asia"));
        assert_eq!(
            status(&graph),
            [(false, true), (false, false), (true, false), (true, false)]
        );

        assert_eq!(graph.unlock_next("asia"), Some("africa"));
        assert_eq!(
            status(&graph),
            [(false, true), (false, true), (false, false), (true, false)]
        );
    }

    #[test]
    fn solving_last_only_completes_it() {
        let mut graph = graph();
        let before = status(&graph);
        assert_eq!(graph.unlock_next("america"), None);
        let after = status(&graph);
        assert_eq!(after[3], (true, true));
        assert_eq!(&after[..3], &before[..3]);
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let mut graph = graph();
        let before = status(&graph);
        assert_eq!(graph.unlock_next("atlantis"), None);
        assert_eq!(status(&graph), before);
    }

    #[test]
    fn reset_restores_initial_configuration() {
        let mut graph = graph();
        graph.unlock_next("europe");
        graph.unlock_next("asia");
        graph.unlock_next("africa");
        assert_eq!(graph.completed().count(), 3);

        graph.reset();
        assert_eq!(status(&graph), status(&self::graph()));
        assert!(graph.is_unlocked("europe"));
        assert!(!graph.is_unlocked("asia"));
    }
}
