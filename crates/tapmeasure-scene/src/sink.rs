//! Scene graph contract and an in-memory implementation.

use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use tapmeasure_math::Point3;

use crate::error::{Result, SceneError};
use crate::Renderable;

/// External scene graph that owns placed anchors.
pub trait SceneSink {
    /// Handle to an inserted anchor.
    type Anchor: Copy;

    /// Insert a new world anchor at `position` into the root collection.
    fn add_anchor(&mut self, position: Point3) -> Result<Self::Anchor>;

    /// Attach `renderable` as a child of `anchor`.
    fn add_child(&mut self, anchor: Self::Anchor, renderable: Renderable) -> Result<()>;
}

impl<S: SceneSink + ?Sized> SceneSink for &mut S {
    type Anchor = S::Anchor;

    fn add_anchor(&mut self, position: Point3) -> Result<Self::Anchor> {
        (**self).add_anchor(position)
    }

    fn add_child(&mut self, anchor: Self::Anchor, renderable: Renderable) -> Result<()> {
        (**self).add_child(anchor, renderable)
    }
}

new_key_type! {
    /// Key of an anchor in a [`SceneGraph`].
    pub struct AnchorId;
}

/// An anchor and the renderables it owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorNode {
    /// World position of the anchor.
    pub position: Point3,
    /// Child renderables in attachment order.
    pub children: Vec<Renderable>,
}

impl AnchorNode {
    /// First text child, if any.
    pub fn label(&self) -> Option<&str> {
        self.children.iter().find_map(Renderable::text)
    }

    /// Whether a marker sphere is attached.
    pub fn has_marker(&self) -> bool {
        self.children.iter().any(Renderable::is_marker)
    }
}

/// In-memory scene graph. Anchors are never evicted.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<AnchorId, AnchorNode>,
    order: Vec<AnchorId>,
}

impl SceneGraph {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of anchors placed so far.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no anchor has been placed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up an anchor.
    pub fn get(&self, id: AnchorId) -> Option<&AnchorNode> {
        self.nodes.get(id)
    }

    /// Anchors in insertion order.
    pub fn anchors(&self) -> impl Iterator<Item = &AnchorNode> + '_ {
        self.order.iter().filter_map(|id| self.nodes.get(*id))
    }
}

impl SceneSink for SceneGraph {
    type Anchor = AnchorId;

    fn add_anchor(&mut self, position: Point3) -> Result<AnchorId> {
        let id = self.nodes.insert(AnchorNode {
            position,
            children: Vec::new(),
        });
        self.order.push(id);
        Ok(id)
    }

    fn add_child(&mut self, anchor: AnchorId, renderable: Renderable) -> Result<()> {
        let node = self.nodes.get_mut(anchor).ok_or(SceneError::UnknownAnchor)?;
        node.children.push(renderable);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material, Shape};
    use tapmeasure_math::Vec3;

    fn marker() -> Renderable {
        Renderable {
            shape: Shape::Sphere { radius: 0.01 },
            material: Material::glossy(Color::WHITE),
            scale: Vec3::new(1.0, 1.0, 1.0),
            local_position: Vec3::zeros(),
        }
    }

    #[test]
    fn test_add_anchor_and_child() {
        let mut scene = SceneGraph::new();
        let id = scene.add_anchor(Point3::new(0.0, 0.0, -1.0)).unwrap();
        scene.add_child(id, marker()).unwrap();
        assert_eq!(scene.len(), 1);
        let node = scene.get(id).unwrap();
        assert!(node.has_marker());
        assert!(node.label().is_none());
    }

    #[test]
    fn test_anchors_keep_insertion_order() {
        let mut scene = SceneGraph::new();
        for z in [1.0, 2.0, 3.0] {
            scene.add_anchor(Point3::new(0.0, 0.0, -z)).unwrap();
        }
        let zs: Vec<f64> = scene.anchors().map(|a| a.position.z).collect();
        assert_eq!(zs, vec![-1.0, -2.0, -3.0]);
    }

    #[test]
    fn test_unknown_anchor() {
        let mut other = SceneGraph::new();
        let foreign = other.add_anchor(Point3::origin()).unwrap();
        let mut scene = SceneGraph::new();
        assert_eq!(
            scene.add_child(foreign, marker()),
            Err(SceneError::UnknownAnchor)
        );
    }
}
