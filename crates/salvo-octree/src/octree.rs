//! Arena-backed octree broad phase.
//!
//! The tree is built fresh every tick: insert every live body, ask for
//! contacts, drop the tree. Nodes live in a `Vec` and refer to each other by
//! [`NodeId`], so parent links never own anything.
//!
//! Recursion depth in every operation is bounded by `OctreeConfig::max_depth`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use salvo_core::aabb::Aabb;
use salvo_core::math::Vec3;
use salvo_core::types::BodyId;

use crate::config::OctreeConfig;
use crate::node::{octant_offset, BodyBounds, Bounded, NodeId, OctreeNode};

const ROOT: NodeId = NodeId(0);

/// A colliding unordered pair, normalized so that `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub a: BodyId,
    pub b: BodyId,
}

impl Contact {
    pub fn new(x: BodyId, y: BodyId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }
}

/// Receives each unique contact exactly once.
pub trait CollisionReporter {
    fn report(&mut self, contact: Contact);
}

impl CollisionReporter for Vec<Contact> {
    fn report(&mut self, contact: Contact) {
        self.push(contact);
    }
}

#[derive(Debug, Clone)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    config: OctreeConfig,
    len: usize,
}

impl Octree {
    /// Root node covering `origin ± half_extents`, default tuning.
    pub fn new(origin: Vec3, half_extents: Vec3) -> Self {
        Self::with_config(origin, half_extents, OctreeConfig::default())
    }

    pub fn with_config(origin: Vec3, half_extents: Vec3, config: OctreeConfig) -> Self {
        Self {
            nodes: vec![OctreeNode::new(Aabb::new(origin, half_extents), 0)],
            config,
            len: 0,
        }
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn node(&self, id: NodeId) -> &OctreeNode {
        &self.nodes[id.index()]
    }

    /// All nodes in creation order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &OctreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Number of bodies stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest node level; a lone root is depth 0.
    pub fn depth(&self) -> u8 {
        self.nodes.iter().map(OctreeNode::depth).max().unwrap_or(0)
    }

    /// Node volumes, for an external renderer.
    pub fn bounding_boxes(&self) -> Vec<Aabb> {
        self.nodes.iter().map(|n| *n.bbox()).collect()
    }

    /// Insert a body. Returns false, leaving the tree unchanged, when no node
    /// admits it.
    pub fn insert<B: Bounded + ?Sized>(&mut self, body: &B) -> bool {
        let bounds = body.body_bounds();
        let added = self.insert_at(ROOT, bounds);
        if added {
            self.len += 1;
        } else {
            trace!(body = ?bounds.id, center = ?bounds.center, "body rejected by octree root");
        }
        added
    }

    fn insert_at(&mut self, node: NodeId, body: BodyBounds) -> bool {
        if let Some(children) = self.nodes[node.index()].children {
            for child in children {
                if self.insert_at(child, body) {
                    return true;
                }
            }
        }

        let placement = self.config.placement;
        let n = &mut self.nodes[node.index()];
        if !placement.admits(n.bbox(), &body) {
            return false;
        }
        n.bodies.push(body);

        if n.bodies.len() >= self.config.capacity
            && n.is_leaf()
            && n.depth() < self.config.max_depth
        {
            self.subdivide(node);
            self.redistribute(node);
        }
        true
    }

    /// Split `node` into eight children of half its size.
    ///
    /// # Panics
    /// If `node` already has children.
    pub fn subdivide(&mut self, node: NodeId) {
        let parent = &self.nodes[node.index()];
        assert!(parent.is_leaf(), "octree node {node:?} subdivided twice");
        let center = parent.bbox().center();
        let half = parent.bbox().half_extents() * 0.5;
        let depth = parent.depth().saturating_add(1);

        let mut ids = [ROOT; 8];
        for (octant, slot) in ids.iter_mut().enumerate() {
            let bbox = Aabb::new(center + octant_offset(octant, half), half);
            let mut child = OctreeNode::new(bbox, depth);
            child.set_parent(node);
            *slot = NodeId(self.nodes.len() as u32);
            self.nodes.push(child);
        }
        self.nodes[node.index()].children = Some(ids);

        debug!(node = node.index(), depth, "octree node subdivided");
    }

    /// Push this node's bodies down into the first child that admits each.
    /// Bodies no child admits stay where they are.
    pub fn redistribute(&mut self, node: NodeId) {
        let Some(children) = self.nodes[node.index()].children else {
            return;
        };
        let placement = self.config.placement;
        let pending = std::mem::take(&mut self.nodes[node.index()].bodies);
        let mut residual = Vec::new();

        for body in pending {
            let moved = children.iter().any(|&child| {
                placement.admits(self.nodes[child.index()].bbox(), &body)
                    && self.insert_at(child, body)
            });
            if !moved {
                residual.push(body);
            }
        }

        if !residual.is_empty() {
            trace!(node = node.index(), count = residual.len(), "bodies kept at parent");
        }
        self.nodes[node.index()].bodies = residual;
    }

    /// Remove a body by id. Returns false if it is not in the tree.
    pub fn remove(&mut self, id: BodyId) -> bool {
        let removed = self.remove_at(ROOT, id);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn remove_at(&mut self, node: NodeId, id: BodyId) -> bool {
        let n = &mut self.nodes[node.index()];
        if let Some(pos) = n.bodies.iter().position(|b| b.id == id) {
            n.bodies.remove(pos);
            return true;
        }
        let children = n.children;
        match children {
            Some(children) => children.into_iter().any(|child| self.remove_at(child, id)),
            None => false,
        }
    }

    /// Node currently holding the body, if any.
    pub fn locate(&self, id: BodyId) -> Option<NodeId> {
        self.locate_from(ROOT, id)
    }

    fn locate_from(&self, node: NodeId, id: BodyId) -> Option<NodeId> {
        let n = self.node(node);
        if n.bodies.iter().any(|b| b.id == id) {
            return Some(node);
        }
        n.children?
            .into_iter()
            .find_map(|child| self.locate_from(child, id))
    }

    /// Every overlapping ordered pair of bodies stored at the same node.
    ///
    /// Each unordered pair appears twice, as `(a, b)` and `(b, a)`. Bodies in
    /// different nodes are never tested against each other. Use
    /// [`Octree::contacts`] for the de-duplicated set.
    pub fn collision_pairs(&self) -> Vec<(BodyId, BodyId)> {
        let mut pairs = Vec::new();
        self.collect_pairs(ROOT, &mut pairs);
        pairs
    }

    fn collect_pairs(&self, node: NodeId, out: &mut Vec<(BodyId, BodyId)>) {
        let n = self.node(node);
        if let Some(children) = n.children {
            for child in children {
                self.collect_pairs(child, out);
            }
        }
        if n.bodies.len() < 2 {
            return;
        }
        for (i, first) in n.bodies.iter().enumerate() {
            let first_box = first.aabb();
            for (j, second) in n.bodies.iter().enumerate() {
                if i != j && first_box.overlaps(&second.aabb()) {
                    out.push((first.id, second.id));
                }
            }
        }
    }

    /// Unique colliding pairs, sorted.
    pub fn contacts(&self) -> Vec<Contact> {
        let unique: BTreeSet<Contact> = self
            .collision_pairs()
            .into_iter()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| Contact::new(a, b))
            .collect();
        unique.into_iter().collect()
    }

    /// Feed each unique contact to `reporter` once. Returns the contact count.
    pub fn report_collisions<R: CollisionReporter + ?Sized>(&self, reporter: &mut R) -> usize {
        let contacts = self.contacts();
        for contact in &contacts {
            debug!(a = ?contact.a, b = ?contact.b, "contact");
            reporter.report(*contact);
        }
        contacts.len()
    }
}
