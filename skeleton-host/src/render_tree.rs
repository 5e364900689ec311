// SkeletonView Host - Render Tree
//
// Mounted views keyed by id. Mounting a view makes it appear, unmounting
// makes it disappear, and each frame ticks every view and paints them in id
// order onto one screen surface.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use skeleton_render::{AnimationFrame, Compositor, DirtyRegion, Surface, View};

use crate::error::{SchedulerError, SchedulerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type BoxedView = Box<dyn View + Send>;

struct MountedNode {
    view: BoxedView,
    /// Screen position of the view's top-left corner
    origin: (usize, usize),
    /// Repaint on the next frame regardless of tick result
    needs_paint: bool,
}

pub struct RenderTree {
    nodes: BTreeMap<NodeId, MountedNode>,
    compositor: Compositor,
    sequence: u64,
}

impl RenderTree {
    pub fn new(compositor: Compositor) -> Self {
        Self {
            nodes: BTreeMap::new(),
            compositor,
            sequence: 0,
        }
    }

    /// Mount `view` at `origin` and make it appear.
    ///
    /// A view already mounted under `id` disappears and is returned.
    pub fn mount(
        &mut self,
        id: NodeId,
        mut view: BoxedView,
        origin: (usize, usize),
        now: Instant,
    ) -> Option<BoxedView> {
        view.on_appear(now);
        log::debug!("Mounted view {} at {:?}", id, origin);
        let replaced = self.nodes.insert(
            id,
            MountedNode {
                view,
                origin,
                needs_paint: true,
            },
        );
        replaced.map(|mut node| {
            node.view.on_disappear();
            node.view
        })
    }

    /// Make the view disappear and hand it back.
    pub fn unmount(&mut self, id: NodeId) -> Option<BoxedView> {
        let mut node = self.nodes.remove(&id)?;
        node.view.on_disappear();
        log::debug!("Unmounted view {}", id);
        Some(node.view)
    }

    /// Re-evaluate the redaction condition of a mounted view.
    ///
    /// Returns whether the view changed.
    pub fn set_redacted(&mut self, id: NodeId, when: bool, now: Instant) -> SchedulerResult<bool> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(SchedulerError::UnknownNode(id))?;
        let changed = node.view.set_redacted(when, now);
        node.needs_paint |= changed;
        Ok(changed)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Unmount every view.
    pub fn clear(&mut self) {
        for (_, mut node) in std::mem::take(&mut self.nodes) {
            node.view.on_disappear();
        }
    }

    /// Tick every view, then paint and composite the screen.
    pub fn frame_at(&mut self, now: Instant) -> AnimationFrame {
        let mut dirty_regions = Vec::new();
        let mut painted = Vec::with_capacity(self.nodes.len());

        for node in self.nodes.values_mut() {
            let ticked = node.view.tick(now);
            let surface = node.view.render();
            if ticked || node.needs_paint {
                dirty_regions.push(DirtyRegion::new(
                    node.origin.0,
                    node.origin.1,
                    surface.width(),
                    surface.height(),
                ));
                node.needs_paint = false;
            }
            painted.push((node.origin, surface));
        }

        let width = painted
            .iter()
            .map(|((x, _), s)| x + s.width())
            .max()
            .unwrap_or(0);
        let height = painted
            .iter()
            .map(|((_, y), s)| y + s.height())
            .max()
            .unwrap_or(0);
        let mut screen = Surface::new(width, height);
        for ((x, y), surface) in &painted {
            screen.blit(surface, *x, *y);
        }

        let frame = AnimationFrame::new(self.compositor.compose(&screen), dirty_regions, self.sequence);
        self.sequence += 1;
        frame
    }
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new(Compositor::default())
    }
}

impl Drop for RenderTree {
    fn drop(&mut self) {
        self.clear();
    }
}
