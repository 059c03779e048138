//! Octree nodes and the body records they hold.

use salvo_core::aabb::Aabb;
use salvo_core::math::Vec3;
use salvo_core::types::{BodyId, MovingBody};

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What the tree keeps of a body: its id and box at insertion time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyBounds {
    pub id: BodyId,
    pub center: Vec3,
    /// Full size, not half extents.
    pub size: Vec3,
}

impl BodyBounds {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_size(self.center, self.size)
    }
}

/// Anything the tree can index.
pub trait Bounded {
    fn body_id(&self) -> BodyId;
    fn center(&self) -> Vec3;
    /// Full size of the body's box.
    fn size(&self) -> Vec3;

    fn body_bounds(&self) -> BodyBounds {
        BodyBounds {
            id: self.body_id(),
            center: self.center(),
            size: self.size(),
        }
    }
}

impl Bounded for BodyBounds {
    fn body_id(&self) -> BodyId {
        self.id
    }
    fn center(&self) -> Vec3 {
        self.center
    }
    fn size(&self) -> Vec3 {
        self.size
    }
}

impl Bounded for MovingBody {
    fn body_id(&self) -> BodyId {
        self.id
    }
    fn center(&self) -> Vec3 {
        self.position
    }
    fn size(&self) -> Vec3 {
        self.extents
    }
}

/// A single cell of the tree.
///
/// A node has either no children or exactly eight. Internal nodes may still
/// hold residual bodies that no child admitted.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    bbox: Aabb,
    parent: Option<NodeId>,
    pub(crate) children: Option<[NodeId; 8]>,
    pub(crate) bodies: Vec<BodyBounds>,
    depth: u8,
}

impl OctreeNode {
    pub(crate) fn new(bbox: Aabb, depth: u8) -> Self {
        Self {
            bbox,
            parent: None,
            children: None,
            bodies: Vec::new(),
            depth,
        }
    }

    pub fn bbox(&self) -> &Aabb {
        &self.bbox
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Link this node to its parent. A node is linked exactly once; a second
    /// call means the tree was subdivided twice or is otherwise corrupt.
    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        assert!(
            self.parent.is_none(),
            "octree node already has a parent ({:?}), refusing {:?}",
            self.parent,
            parent
        );
        self.parent = Some(parent);
    }

    pub fn children(&self) -> Option<&[NodeId; 8]> {
        self.children.as_ref()
    }

    pub fn bodies(&self) -> &[BodyBounds] {
        &self.bodies
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Center offset signs for octant `index`: bit 2 is X, bit 1 is Y, bit 0 is Z.
/// A set bit means the positive side of the parent center.
pub(crate) fn octant_offset(index: usize, half: Vec3) -> Vec3 {
    let sign = |bit: usize| if index & bit != 0 { 1.0 } else { -1.0 };
    Vec3::new(half.x * sign(4), half.y * sign(2), half.z * sign(1))
}
