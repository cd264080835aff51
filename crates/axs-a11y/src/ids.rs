//! Cell identifier allocation

use axs_dom::{DomTree, NodeId};

/// Mints collision-free `id` attributes for table cells
///
/// Each generator carries its own counter, so independent engine instances
/// never contend on shared state.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    counter: u64,
}

impl IdGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: 0,
        }
    }

    /// Return the node's identifier, minting and writing one if absent.
    ///
    /// Idempotent: a node that already carries a non-empty `id` keeps it.
    pub fn ensure_id(&mut self, tree: &mut DomTree, node: NodeId) -> String {
        if let Some(existing) = tree.attr(node, "id") {
            // An empty id is unusable as a headers reference; replace it.
            if !existing.is_empty() {
                return existing.to_string();
            }
        }

        let id = self.mint(tree);
        tree.set_attr(node, "id", &id);
        id
    }

    /// Next free identifier, skipping any already taken in the document
    fn mint(&mut self, tree: &DomTree) -> String {
        loop {
            self.counter += 1;
            let candidate = format!("{}{}", self.prefix, self.counter);
            if tree.element_with_id(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("axsh")
    }
}
