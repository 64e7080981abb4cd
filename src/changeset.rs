
//! The unit-of-work accumulation consumed by the compiler.

use gramr_core::model::{EdgeChange, NodeChange};

/// All changes accumulated by one unit of work, partitioned into the six
/// change categories.
///
/// A `ChangeSet` owns its descriptors; the compiler borrows them. It is not
/// thread-safe — a single change set must not be compiled concurrently,
/// though independent change sets may be.
#[derive(Debug, Default)]
pub struct ChangeSet {
    created_nodes: Vec<NodeChange>,
    updated_nodes: Vec<NodeChange>,
    deleted_nodes: Vec<NodeChange>,
    created_relationships: Vec<EdgeChange>,
    updated_relationships: Vec<EdgeChange>,
    deleted_relationships: Vec<EdgeChange>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_node(&mut self, node: NodeChange) {
        self.created_nodes.push(node);
    }

    pub fn update_node(&mut self, node: NodeChange) {
        self.updated_nodes.push(node);
    }

    pub fn delete_node(&mut self, node: NodeChange) {
        self.deleted_nodes.push(node);
    }

    pub fn create_relationship(&mut self, edge: EdgeChange) {
        self.created_relationships.push(edge);
    }

    pub fn update_relationship(&mut self, edge: EdgeChange) {
        self.updated_relationships.push(edge);
    }

    pub fn delete_relationship(&mut self, edge: EdgeChange) {
        self.deleted_relationships.push(edge);
    }

    pub fn created_nodes(&self) -> &[NodeChange] {
        &self.created_nodes
    }

    pub fn updated_nodes(&self) -> &[NodeChange] {
        &self.updated_nodes
    }

    pub fn deleted_nodes(&self) -> &[NodeChange] {
        &self.deleted_nodes
    }

    pub fn created_relationships(&self) -> &[EdgeChange] {
        &self.created_relationships
    }

    pub fn updated_relationships(&self) -> &[EdgeChange] {
        &self.updated_relationships
    }

    pub fn deleted_relationships(&self) -> &[EdgeChange] {
        &self.deleted_relationships
    }

    pub fn is_empty(&self) -> bool {
        self.created_nodes.is_empty()
            && self.updated_nodes.is_empty()
            && self.deleted_nodes.is_empty()
            && self.created_relationships.is_empty()
            && self.updated_relationships.is_empty()
            && self.deleted_relationships.is_empty()
    }
}
