//! Scene graph: a tree of nodes stored in a hecs arena.
//!
//! Each node is a hecs entity carrying `NodeKind`, `Transform` and
//! `Hierarchy`; gameplay entities also carry a `Body`. The arena owns every
//! node. Parents list their children in insertion order, and a freshly
//! created node is handed out as a `Detached` token that must be attached
//! or discarded.

use std::collections::HashSet;

use glam::{Affine2, Vec2};
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use skyfall_core::category::Category;
use skyfall_core::enums::TextureId;
use skyfall_core::state::Drawable;
use skyfall_core::types::{IntRect, Rect, Transform};

use crate::command::{Command, CommandQueue, DispatchScratch};
use crate::error::SceneError;
use crate::nodes::aircraft::HudText;
use crate::nodes::{Aircraft, Body, NodeKind, ParticleNode, Pickup, Projectile, TextNode};
use crate::resources::ResourceLookup;

/// Stable handle to a scene node. Stale handles are detected by generation.
pub type NodeId = Entity;

/// Parent link and ordered children of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A node that is not part of the tree yet.
#[must_use = "a detached node must be attached or discarded"]
#[derive(Debug, PartialEq, Eq)]
pub struct Detached(NodeId);

impl Detached {
    pub fn id(&self) -> NodeId {
        self.0
    }
}

/// Mutable state threaded through a tree update.
pub struct UpdateContext<'a> {
    pub commands: &'a mut CommandQueue,
    pub rng: &'a mut ChaCha8Rng,
}

/// Unordered set of colliding node pairs.
#[derive(Debug, Default)]
pub struct CollisionPairs {
    pairs: HashSet<(NodeId, NodeId)>,
}

impl CollisionPairs {
    fn insert(&mut self, a: NodeId, b: NodeId) {
        let pair = if a.to_bits() <= b.to_bits() { (a, b) } else { (b, a) };
        self.pairs.insert(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.pairs.contains(&(a, b)) || self.pairs.contains(&(b, a))
    }

    /// Pairs in a reproducible order.
    pub fn into_sorted(self) -> Vec<(NodeId, NodeId)> {
        let mut pairs: Vec<_> = self.pairs.into_iter().collect();
        pairs.sort_unstable_by_key(|(a, b)| (a.to_bits(), b.to_bits()));
        pairs
    }
}

pub struct SceneGraph {
    world: World,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut world = World::new();
        let root = world.spawn((
            NodeKind::Group(Category::NONE),
            Transform::default(),
            Hierarchy::default(),
        ));
        Self { world, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.world.contains(id)
    }

    // --- Construction and ownership ---

    pub fn create(&mut self, kind: NodeKind, transform: Transform) -> Detached {
        Detached(self.world.spawn((kind, transform, Hierarchy::default())))
    }

    pub fn create_entity(&mut self, kind: NodeKind, transform: Transform, body: Body) -> Detached {
        Detached(self.world.spawn((kind, transform, Hierarchy::default(), body)))
    }

    /// Append `child` to `parent`'s children. Panics if `parent` does not exist.
    pub fn attach_child(&mut self, parent: NodeId, child: Detached) -> NodeId {
        let id = child.0;
        {
            let mut hierarchy = self
                .world
                .get::<&mut Hierarchy>(parent)
                .unwrap_or_else(|_| panic!("attach to unknown node {parent:?}"));
            hierarchy.children.push(id);
        }
        if let Ok(mut hierarchy) = self.world.get::<&mut Hierarchy>(id) {
            debug_assert!(hierarchy.parent.is_none(), "detached node already had a parent");
            hierarchy.parent = Some(parent);
        }
        id
    }

    /// Attach a node whose transform holds a world position, converting it
    /// into `parent`'s local space.
    pub fn attach_child_at_world(&mut self, parent: NodeId, child: Detached) -> NodeId {
        let inverse = self.world_transform(parent).inverse();
        if let Ok(mut transform) = self.world.get::<&mut Transform>(child.0) {
            transform.position = inverse.transform_point2(transform.position);
        }
        self.attach_child(parent, child)
    }

    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> Result<Detached, SceneError> {
        {
            let mut hierarchy = self
                .world
                .get::<&mut Hierarchy>(parent)
                .map_err(|_| SceneError::UnknownNode(parent))?;
            let index = hierarchy
                .children
                .iter()
                .position(|&c| c == child)
                .ok_or(SceneError::NotAChild { parent, child })?;
            hierarchy.children.remove(index);
        }
        if let Ok(mut hierarchy) = self.world.get::<&mut Hierarchy>(child) {
            hierarchy.parent = None;
        }
        Ok(Detached(child))
    }

    /// Destroy a detached node together with its subtree.
    pub fn discard(&mut self, node: Detached) {
        self.despawn_subtree(node.0);
    }

    fn despawn_subtree(&mut self, id: NodeId) {
        for child in self.children(id) {
            self.despawn_subtree(child);
        }
        let _ = self.world.despawn(id);
    }

    // --- Structure queries ---

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.world.get::<&Hierarchy>(id).ok().and_then(|h| h.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.world
            .get::<&Hierarchy>(id)
            .map(|h| h.children.clone())
            .unwrap_or_default()
    }

    // --- Component access ---

    pub fn kind(&self, id: NodeId) -> Option<hecs::Ref<'_, NodeKind>> {
        self.world.get::<&NodeKind>(id).ok()
    }

    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        self.world.get::<&Transform>(id).ok().map(|t| *t)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<hecs::RefMut<'_, Transform>> {
        self.world.get::<&mut Transform>(id).ok()
    }

    pub fn body(&self, id: NodeId) -> Option<Body> {
        self.world.get::<&Body>(id).ok().map(|b| *b)
    }

    pub fn body_mut(&mut self, id: NodeId) -> Option<hecs::RefMut<'_, Body>> {
        self.world.get::<&mut Body>(id).ok()
    }

    pub fn is_aircraft(&self, id: NodeId) -> bool {
        self.kind(id).is_some_and(|kind| matches!(*kind, NodeKind::Aircraft(_)))
    }

    pub fn aircraft(&self, id: NodeId) -> Option<Aircraft> {
        match &*self.kind(id)? {
            NodeKind::Aircraft(aircraft) => Some(aircraft.clone()),
            _ => None,
        }
    }

    pub fn aircraft_mut(&mut self, id: NodeId) -> Option<(&mut Aircraft, &mut Body)> {
        match self.world.query_one_mut::<(&mut NodeKind, &mut Body)>(id) {
            Ok((NodeKind::Aircraft(aircraft), body)) => Some((aircraft, body)),
            _ => None,
        }
    }

    pub fn projectile(&self, id: NodeId) -> Option<Projectile> {
        match &*self.kind(id)? {
            NodeKind::Projectile(projectile) => Some(*projectile),
            _ => None,
        }
    }

    pub fn projectile_mut(&mut self, id: NodeId) -> Option<(&mut Projectile, &mut Body)> {
        match self.world.query_one_mut::<(&mut NodeKind, &mut Body)>(id) {
            Ok((NodeKind::Projectile(projectile), body)) => Some((projectile, body)),
            _ => None,
        }
    }

    pub fn pickup(&self, id: NodeId) -> Option<Pickup> {
        match &*self.kind(id)? {
            NodeKind::Pickup(pickup) => Some(*pickup),
            _ => None,
        }
    }

    pub fn particles_mut(&mut self, id: NodeId) -> Option<&mut ParticleNode> {
        match self.world.query_one_mut::<&mut NodeKind>(id) {
            Ok(NodeKind::Particles(particles)) => Some(particles),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<TextNode> {
        match &*self.kind(id)? {
            NodeKind::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut TextNode> {
        match self.world.query_one_mut::<&mut NodeKind>(id) {
            Ok(NodeKind::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// All nodes in the subtree under `id` (inclusive) matching `category`.
    pub fn find_all(&self, id: NodeId, category: Category) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_matching(id, category, &mut found);
        found
    }

    fn collect_matching(&self, id: NodeId, category: Category, found: &mut Vec<NodeId>) {
        if category.matches(self.category(id)) {
            found.push(id);
        }
        if let Ok(hierarchy) = self.world.get::<&Hierarchy>(id) {
            for &child in &hierarchy.children {
                self.collect_matching(child, category, found);
            }
        }
    }

    // --- Capabilities ---

    pub fn category(&self, id: NodeId) -> Category {
        self.kind(id).map_or(Category::NONE, |kind| kind.category())
    }

    pub fn is_destroyed(&self, id: NodeId) -> bool {
        self.body(id).is_some_and(|body| body.is_destroyed())
    }

    pub fn is_marked_for_removal(&self, id: NodeId) -> bool {
        let body = self.body(id);
        self.kind(id)
            .is_some_and(|kind| kind.is_marked_for_removal(body.as_ref()))
    }

    /// Destroy an entity without leaving a wreck to animate.
    pub fn remove_entity(&mut self, id: NodeId) {
        if let Some((aircraft, body)) = self.aircraft_mut(id) {
            aircraft.remove(body);
        } else if let Some(mut body) = self.body_mut(id) {
            body.destroy();
        }
    }

    // --- Transforms ---

    /// Product of local transforms from the root down to `id`.
    pub fn world_transform(&self, id: NodeId) -> Affine2 {
        let mut transform = Affine2::IDENTITY;
        let mut current = Some(id);
        while let Some(node) = current {
            if let Ok(local) = self.world.get::<&Transform>(node) {
                transform = local.matrix() * transform;
            }
            current = self.parent(node);
        }
        transform
    }

    pub fn world_position(&self, id: NodeId) -> Vec2 {
        self.world_transform(id).translation
    }

    /// World-space collision bounds; empty for nodes that never collide.
    pub fn bounding_rect(&self, id: NodeId) -> Rect {
        let Some(local) = self.kind(id).and_then(|kind| kind.local_bounds()) else {
            return Rect::default();
        };
        local.transformed(&self.world_transform(id))
    }

    // --- Traversals ---

    /// Update every node, parents before children.
    pub fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_>) {
        self.update_node(self.root, dt, ctx);
    }

    fn update_node(&mut self, id: NodeId, dt: f32, ctx: &mut UpdateContext<'_>) {
        self.update_current(id, dt, ctx);
        for child in self.children(id) {
            self.update_node(child, dt, ctx);
        }
    }

    fn update_current(&mut self, id: NodeId, dt: f32, ctx: &mut UpdateContext<'_>) {
        let world_position = self.world_position(id);
        let mut hud = None;

        let Ok((kind, transform, body)) = self
            .world
            .query_one_mut::<(&mut NodeKind, &mut Transform, Option<&mut Body>)>(id)
        else {
            return;
        };
        match (kind, body) {
            (NodeKind::Aircraft(aircraft), Some(body)) => {
                aircraft.update(body, transform, world_position, dt, ctx);
                hud = Some(aircraft.hud(body, transform.rotation));
            }
            (NodeKind::Projectile(projectile), Some(body)) => projectile.update(body, transform, dt),
            (NodeKind::Pickup(_), Some(body)) => transform.translate(body.displacement(dt)),
            (NodeKind::Particles(particles), _) => particles.update(dt),
            (NodeKind::Emitter(emitter), _) => emitter.update(world_position, dt, ctx.commands),
            _ => {}
        }

        if let Some(hud) = hud {
            self.apply_hud(hud);
        }
    }

    fn apply_hud(&mut self, hud: HudText) {
        for (label, text) in [hud.health, hud.missiles].into_iter().flatten() {
            if let Some(node) = self.text_mut(label) {
                node.set_text(text);
            }
            if let Some(mut transform) = self.transform_mut(label) {
                transform.rotation = hud.rotation;
            }
        }
    }

    /// Deliver `command` to `id` and its subtree, parent first.
    pub fn on_command(&mut self, id: NodeId, command: &Command, scratch: &mut DispatchScratch) {
        if command.category.matches(self.category(id)) {
            command.action.apply(self, id, scratch);
        }
        // Children are read after the action so freshly spawned nodes also see the command.
        for child in self.children(id) {
            self.on_command(child, command, scratch);
        }
    }

    /// Every unordered pair of live, overlapping nodes in the tree.
    pub fn collision_pairs(&self) -> CollisionPairs {
        let mut pairs = CollisionPairs::default();
        self.check_scene_collision(self.root, self.root, &mut pairs);
        pairs
    }

    /// Test the subtree under `this` against every node under `scene`.
    pub fn check_scene_collision(&self, this: NodeId, scene: NodeId, pairs: &mut CollisionPairs) {
        self.check_node_collision(this, scene, pairs);
        if let Ok(hierarchy) = self.world.get::<&Hierarchy>(scene) {
            for &child in &hierarchy.children {
                self.check_scene_collision(this, child, pairs);
            }
        }
    }

    /// Test `this` and its descendants against the single node `node`.
    pub fn check_node_collision(&self, this: NodeId, node: NodeId, pairs: &mut CollisionPairs) {
        if this != node && self.collides(this, node) {
            trace!(?this, ?node, "collision");
            pairs.insert(this, node);
        }
        if let Ok(hierarchy) = self.world.get::<&Hierarchy>(this) {
            for &child in &hierarchy.children {
                self.check_node_collision(child, node, pairs);
            }
        }
    }

    fn collides(&self, a: NodeId, b: NodeId) -> bool {
        if self.is_destroyed(a) || self.is_destroyed(b) {
            return false;
        }
        let first = self.bounding_rect(a);
        if first.width <= 0.0 || first.height <= 0.0 {
            return false;
        }
        first.intersects(&self.bounding_rect(b))
    }

    /// Prune every node marked for removal, subtree included. Returns the
    /// number of pruned nodes (subtree roots only).
    pub fn remove_wrecks(&mut self) -> usize {
        let removed = self.remove_wrecks_under(self.root);
        if removed > 0 {
            debug!(removed, "wrecks pruned");
        }
        removed
    }

    fn remove_wrecks_under(&mut self, id: NodeId) -> usize {
        let children = self.children(id);
        let (wrecks, survivors): (Vec<_>, Vec<_>) = children
            .into_iter()
            .partition(|&child| self.is_marked_for_removal(child));

        let mut removed = wrecks.len();
        if !wrecks.is_empty() {
            if let Ok(mut hierarchy) = self.world.get::<&mut Hierarchy>(id) {
                hierarchy.children = survivors.clone();
            }
            for wreck in wrecks {
                self.despawn_subtree(wreck);
            }
        }
        for child in survivors {
            removed += self.remove_wrecks_under(child);
        }
        removed
    }

    // --- Drawing ---

    /// Append drawables for the whole tree in painter's order.
    pub fn draw(&self, resources: &dyn ResourceLookup, out: &mut Vec<Drawable>) -> Result<(), SceneError> {
        self.draw_node(self.root, Affine2::IDENTITY, resources, out)
    }

    fn draw_node(
        &self,
        id: NodeId,
        parent: Affine2,
        resources: &dyn ResourceLookup,
        out: &mut Vec<Drawable>,
    ) -> Result<(), SceneError> {
        let local = self.transform(id).ok_or(SceneError::UnknownNode(id))?;
        let transform = parent * local.matrix();
        self.draw_current(id, transform, resources, out)?;
        for child in self.children(id) {
            self.draw_node(child, transform, resources, out)?;
        }
        Ok(())
    }

    fn draw_current(
        &self,
        id: NodeId,
        transform: Affine2,
        resources: &dyn ResourceLookup,
        out: &mut Vec<Drawable>,
    ) -> Result<(), SceneError> {
        let kind = self.kind(id).ok_or(SceneError::UnknownNode(id))?;
        let destroyed = self.is_destroyed(id);

        let sprite = |texture: TextureId, texture_rect: IntRect, origin: Vec2| -> Result<Drawable, SceneError> {
            Ok(Drawable::Sprite {
                texture: resources.texture(texture).ok_or(SceneError::MissingTexture(texture))?,
                texture_rect,
                origin,
                transform,
            })
        };
        let centered = |texture: TextureId, texture_rect: IntRect| {
            sprite(texture, texture_rect, texture_rect.size() / 2.0)
        };

        match &*kind {
            NodeKind::Sprite(node) => out.push(sprite(node.texture, node.texture_rect, node.origin)?),
            NodeKind::Text(node) if !node.text.is_empty() => out.push(Drawable::Text {
                font: resources.font(node.font).ok_or(SceneError::MissingFont(node.font))?,
                text: node.text.clone(),
                character_size: node.character_size,
                transform,
            }),
            NodeKind::Aircraft(aircraft) => {
                if !destroyed {
                    out.push(centered(aircraft.kind().data().texture, aircraft.texture_rect())?);
                } else if aircraft.shows_explosion() {
                    out.push(centered(TextureId::Explosion, aircraft.explosion().texture_rect())?);
                }
            }
            NodeKind::Projectile(projectile) => {
                let data = projectile.kind().data();
                out.push(centered(data.texture, data.texture_rect)?);
            }
            NodeKind::Pickup(pickup) => {
                let data = pickup.kind().data();
                out.push(centered(data.texture, data.texture_rect)?);
            }
            NodeKind::Particles(particles) if !particles.is_empty() => {
                out.push(Drawable::Particles {
                    texture: resources
                        .texture(TextureId::Particle)
                        .ok_or(SceneError::MissingTexture(TextureId::Particle))?,
                    quads: particles.quads(),
                });
            }
            _ => {}
        }
        Ok(())
    }
}
