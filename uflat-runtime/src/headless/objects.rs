// Class registry and object table for the headless engine.

use std::collections::{BTreeMap, HashMap};

use glam::{Quat, Vec3};
use uflat_ffi::{ClassHandle, ObjectHandle};

use crate::classes::NativeClass;
use crate::engine::{
    AttachmentRule, AttachmentTransformRules, DetachmentRule, Mobility, RadialFalloff, TeleportMode, ViewTargetBlend,
};
use crate::ue_math::{Color, Transform};

/// Class handles live in their own address range so they never alias objects.
const CLASS_HANDLE_BASE: usize = 1 << 24;

// ---------------------------------------------------------------------------
// Classes
// ---------------------------------------------------------------------------

pub(crate) struct ClassEntry {
    pub name: String,
    pub parent: Option<usize>,
    /// Nearest native ancestor (itself for native classes).
    pub native: NativeClass,
}

pub(crate) struct ClassRegistry {
    entries: Vec<ClassEntry>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        let mut entries: Vec<ClassEntry> = Vec::with_capacity(NativeClass::ALL.len());
        for &native in NativeClass::ALL {
            let parent = native
                .parent()
                .and_then(|p| NativeClass::ALL.iter().position(|c| *c == p));
            entries.push(ClassEntry { name: native.name().to_string(), parent, native });
        }
        ClassRegistry { entries }
    }

    pub fn handle(index: usize) -> ClassHandle {
        ClassHandle::from_addr(CLASS_HANDLE_BASE + index)
    }

    pub fn index(&self, handle: ClassHandle) -> Option<usize> {
        handle
            .to_addr()
            .checked_sub(CLASS_HANDLE_BASE)
            .filter(|i| *i < self.entries.len())
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn native_index(&self, native: NativeClass) -> usize {
        // Native classes are seeded first, in `NativeClass::ALL` order.
        NativeClass::ALL.iter().position(|c| *c == native).unwrap_or(0)
    }

    pub fn entry(&self, index: usize) -> &ClassEntry {
        &self.entries[index]
    }

    pub fn register(&mut self, name: &str, parent: usize) -> usize {
        if let Some(existing) = self.find(name) {
            return existing;
        }
        let native = self.entries[parent].native;
        self.entries.push(ClassEntry { name: name.to_string(), parent: Some(parent), native });
        self.entries.len() - 1
    }

    pub fn is_child_of(&self, class: usize, base: usize) -> bool {
        let mut current = Some(class);
        while let Some(index) = current {
            if index == base {
                return true;
            }
            current = self.entries[index].parent;
        }
        false
    }

    pub fn is_native_child_of(&self, class: usize, base: NativeClass) -> bool {
        self.is_child_of(class, self.native_index(base))
    }
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

/// A force or impulse applied to a primitive component, kept for inspection.
#[derive(Clone, Debug, PartialEq)]
pub enum PhysicsRecord {
    Force { force: Vec3, bone: Option<String>, accel_change: bool },
    RadialForce { origin: Vec3, radius: f32, strength: f32, falloff: RadialFalloff, accel_change: bool },
    RadialImpulse { origin: Vec3, radius: f32, strength: f32, falloff: RadialFalloff, velocity_change: bool },
}

#[derive(Default)]
pub(crate) struct ActorData {
    pub root: ObjectHandle,
    pub components: Vec<ObjectHandle>,
    pub tags: Vec<String>,
    pub hidden: bool,
    pub input_component: ObjectHandle,
    /// Controllers only.
    pub pawn: ObjectHandle,
    pub view_target: ObjectHandle,
    pub view_blend: Option<ViewTargetBlend>,
}

pub(crate) struct ComponentData {
    pub owner: ObjectHandle,
    pub tags: Vec<String>,
    pub attach_parent: ObjectHandle,
    pub children: Vec<ObjectHandle>,
    pub socket: Option<String>,
    pub relative: Transform,
    pub mobility: Mobility,
    pub registered: bool,
    pub shape_color: Color,
    pub box_extent: Vec3,
    pub last_teleport: Option<TeleportMode>,
    pub physics: Vec<PhysicsRecord>,
}

impl ComponentData {
    fn new(owner: ObjectHandle) -> Self {
        ComponentData {
            owner,
            tags: Vec::new(),
            attach_parent: ObjectHandle::null(),
            children: Vec::new(),
            socket: None,
            relative: Transform::IDENTITY,
            mobility: Mobility::Movable,
            registered: false,
            shape_color: Color::new(255, 0, 0, 255),
            box_extent: Vec3::splat(32.0),
            last_teleport: None,
            physics: Vec::new(),
        }
    }
}

pub(crate) enum ObjectData {
    Actor(ActorData),
    Component(ComponentData),
    Asset { path: String },
    ClassObject { class: usize, path: String },
}

pub(crate) struct ObjectRecord {
    pub class: usize,
    pub name: String,
    pub pending_kill: bool,
    pub data: ObjectData,
}

/// Classes, objects and world settings.
pub(crate) struct ObjectWorld {
    pub classes: ClassRegistry,
    objects: BTreeMap<usize, ObjectRecord>,
    next_id: usize,
    name_counters: HashMap<usize, usize>,
    pub simulate_physics: bool,
    pub gravity_z: f32,
    pub origin: Vec3,
    pub paused: bool,
}

impl ObjectWorld {
    pub fn new() -> Self {
        ObjectWorld {
            classes: ClassRegistry::new(),
            objects: BTreeMap::new(),
            next_id: 1,
            name_counters: HashMap::new(),
            simulate_physics: true,
            gravity_z: -980.0,
            origin: Vec3::ZERO,
            paused: false,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    fn insert(&mut self, class: usize, name: Option<String>, data: ObjectData) -> ObjectHandle {
        let id = self.next_id;
        self.next_id += 1;
        let name = name.unwrap_or_else(|| {
            let counter = self.name_counters.entry(class).or_insert(0);
            let name = format!("{}_{}", self.classes.entry(class).name, counter);
            *counter += 1;
            name
        });
        self.objects.insert(id, ObjectRecord { class, name, pending_kill: false, data });
        ObjectHandle::from_addr(id)
    }

    pub fn record(&self, obj: ObjectHandle) -> Option<&ObjectRecord> {
        self.objects.get(&obj.to_addr())
    }

    pub fn record_mut(&mut self, obj: ObjectHandle) -> Option<&mut ObjectRecord> {
        self.objects.get_mut(&obj.to_addr())
    }

    /// Live (valid, not pending) objects in creation order.
    pub fn live(&self) -> impl Iterator<Item = (ObjectHandle, &ObjectRecord)> {
        self.objects
            .iter()
            .filter(|(_, r)| !r.pending_kill)
            .map(|(id, r)| (ObjectHandle::from_addr(*id), r))
    }

    pub fn actor(&self, obj: ObjectHandle) -> Option<&ActorData> {
        match &self.record(obj)?.data {
            ObjectData::Actor(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn actor_mut(&mut self, obj: ObjectHandle) -> Option<&mut ActorData> {
        match &mut self.record_mut(obj)?.data {
            ObjectData::Actor(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn component(&self, obj: ObjectHandle) -> Option<&ComponentData> {
        match &self.record(obj)?.data {
            ObjectData::Component(component) => Some(component),
            _ => None,
        }
    }

    pub fn component_mut(&mut self, obj: ObjectHandle) -> Option<&mut ComponentData> {
        match &mut self.record_mut(obj)?.data {
            ObjectData::Component(component) => Some(component),
            _ => None,
        }
    }

    pub fn is_a(&self, obj: ObjectHandle, native: NativeClass) -> bool {
        self.record(obj)
            .is_some_and(|r| self.classes.is_native_child_of(r.class, native))
    }

    // -- assets ---------------------------------------------------------------

    pub fn add_asset(&mut self, native: NativeClass, path: &str) -> ObjectHandle {
        let class = self.classes.native_index(native);
        self.insert(class, Some(leaf_name(path).to_string()), ObjectData::Asset { path: path.to_string() })
    }

    /// Register a blueprint's generated class and the class object standing
    /// for it at `class_path`.
    pub fn add_generated_class(&mut self, class_path: &str, parent: NativeClass) -> ObjectHandle {
        let name = class_path.rsplit('.').next().unwrap_or(class_path);
        let parent = self.classes.native_index(parent);
        let class = self.classes.register(name, parent);
        let meta = self.classes.native_index(NativeClass::Class);
        self.insert(
            meta,
            Some(name.to_string()),
            ObjectData::ClassObject { class, path: class_path.to_string() },
        )
    }

    pub fn find_by_path(&self, class: usize, path: &str) -> ObjectHandle {
        self.live()
            .find(|(_, r)| {
                let matches_path = match &r.data {
                    ObjectData::Asset { path: p } | ObjectData::ClassObject { path: p, .. } => p == path,
                    _ => false,
                };
                matches_path && self.classes.is_child_of(r.class, class)
            })
            .map_or(ObjectHandle::null(), |(h, _)| h)
    }

    // -- actors and components ------------------------------------------------

    pub fn spawn_actor(&mut self, class: usize) -> ObjectHandle {
        if !self.classes.is_native_child_of(class, NativeClass::Actor) {
            return ObjectHandle::null();
        }
        self.insert(class, None, ObjectData::Actor(ActorData::default()))
    }

    pub fn new_component(&mut self, owner: ObjectHandle, class: usize) -> ObjectHandle {
        if !self.classes.is_native_child_of(class, NativeClass::ActorComponent) || self.actor(owner).is_none() {
            return ObjectHandle::null();
        }
        let component = self.insert(class, None, ObjectData::Component(ComponentData::new(owner)));
        if let Some(actor) = self.actor_mut(owner) {
            actor.components.push(component);
        }
        component
    }

    /// Mark an actor and everything it owns for destruction.
    pub fn destroy_actor(&mut self, actor: ObjectHandle) -> bool {
        let Some(data) = self.actor(actor) else {
            return false;
        };
        let owned = data.components.clone();
        for component in owned {
            if let Some(record) = self.record_mut(component) {
                record.pending_kill = true;
            }
        }
        if let Some(record) = self.record_mut(actor) {
            record.pending_kill = true;
        }
        true
    }

    pub fn destroy_component(&mut self, component: ObjectHandle, promote_children: bool) {
        let Some(data) = self.component(component) else {
            return;
        };
        let owner = data.owner;
        let parent = data.attach_parent;
        let children = data.children.clone();
        for child in children {
            if promote_children && !parent.is_null() {
                self.attach(child, parent, AttachmentTransformRules::KEEP_WORLD, None);
            } else {
                self.detach(child, DetachmentRule::KeepWorld);
            }
        }
        self.detach(component, DetachmentRule::KeepRelative);
        if let Some(actor) = self.actor_mut(owner) {
            if actor.root == component {
                actor.root = ObjectHandle::null();
            }
            if actor.input_component == component {
                actor.input_component = ObjectHandle::null();
            }
        }
        if let Some(record) = self.record_mut(component) {
            record.pending_kill = true;
        }
    }

    pub fn set_root(&mut self, actor: ObjectHandle, component: ObjectHandle) -> bool {
        let owned = self.component(component).is_some_and(|c| c.owner == actor)
            && self.is_a(component, NativeClass::SceneComponent);
        match self.actor_mut(actor) {
            Some(data) if owned => {
                data.root = component;
                true
            }
            _ => false,
        }
    }

    // -- attachment -----------------------------------------------------------

    pub fn world_transform(&self, component: ObjectHandle) -> Transform {
        let Some(data) = self.component(component) else {
            return Transform::IDENTITY;
        };
        let mut world = data.relative;
        let mut parent = data.attach_parent;
        while let Some(p) = self.component(parent) {
            world = world.compose(&p.relative);
            parent = p.attach_parent;
        }
        world
    }

    pub fn set_world_transform(&mut self, component: ObjectHandle, world: Transform) {
        let parent = self.component(component).map_or(ObjectHandle::null(), |c| c.attach_parent);
        let relative = if parent.is_null() {
            world
        } else {
            world.relative_to(&self.world_transform(parent))
        };
        if let Some(data) = self.component_mut(component) {
            data.relative = relative;
        }
    }

    /// Is `ancestor` on the attachment chain above `component`?
    pub fn is_attached_to(&self, component: ObjectHandle, ancestor: ObjectHandle) -> bool {
        let mut current = self.component(component).map(|c| c.attach_parent);
        while let Some(parent) = current.filter(|p| !p.is_null()) {
            if parent == ancestor {
                return true;
            }
            current = self.component(parent).map(|c| c.attach_parent);
        }
        false
    }

    pub fn attach(
        &mut self,
        child: ObjectHandle,
        parent: ObjectHandle,
        rules: AttachmentTransformRules,
        socket: Option<&str>,
    ) -> bool {
        let is_scene = |h| self.is_a(h, NativeClass::SceneComponent);
        if child == parent || !is_scene(child) || !is_scene(parent) || self.is_attached_to(parent, child) {
            return false;
        }

        let world = self.world_transform(child);
        self.unlink(child);
        let parent_world = self.world_transform(parent);
        let keep_world = world.relative_to(&parent_world);
        let Some(data) = self.component_mut(child) else {
            return false;
        };
        let relative = data.relative;
        data.relative = Transform {
            translation: pick(rules.location, relative.translation, keep_world.translation, Vec3::ZERO),
            rotation: pick(rules.rotation, relative.rotation, keep_world.rotation, Quat::IDENTITY),
            scale: pick(rules.scale, relative.scale, keep_world.scale, Vec3::ONE),
        };
        data.attach_parent = parent;
        data.socket = socket.map(str::to_string);
        if let Some(p) = self.component_mut(parent) {
            p.children.push(child);
        }
        true
    }

    pub fn detach(&mut self, child: ObjectHandle, rule: DetachmentRule) {
        let world = self.world_transform(child);
        if !self.unlink(child) {
            return;
        }
        if let (DetachmentRule::KeepWorld, Some(data)) = (rule, self.component_mut(child)) {
            data.relative = world;
        }
    }

    /// Remove `child` from its parent's child list. Returns whether it had one.
    fn unlink(&mut self, child: ObjectHandle) -> bool {
        let Some(data) = self.component_mut(child) else {
            return false;
        };
        let parent = std::mem::take(&mut data.attach_parent);
        data.socket = None;
        if parent.is_null() {
            return false;
        }
        if let Some(p) = self.component_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        true
    }

    // -- garbage collection ---------------------------------------------------

    /// Remove every pending-kill object. Returns the removed handles.
    pub fn collect_garbage(&mut self) -> Vec<ObjectHandle> {
        let doomed: Vec<ObjectHandle> = self
            .objects
            .iter()
            .filter(|(_, r)| r.pending_kill)
            .map(|(id, _)| ObjectHandle::from_addr(*id))
            .collect();
        for &obj in &doomed {
            let children = self.component(obj).map(|c| c.children.clone()).unwrap_or_default();
            for child in children {
                self.detach(child, DetachmentRule::KeepWorld);
            }
            self.unlink(obj);
        }
        for &obj in &doomed {
            self.objects.remove(&obj.to_addr());
        }
        for record in self.objects.values_mut() {
            if let ObjectData::Actor(actor) = &mut record.data {
                actor.components.retain(|c| !doomed.contains(c));
                for slot in [&mut actor.root, &mut actor.input_component, &mut actor.pawn, &mut actor.view_target] {
                    if doomed.contains(slot) {
                        *slot = ObjectHandle::null();
                    }
                }
            }
        }
        doomed
    }
}

fn pick<T>(rule: AttachmentRule, relative: T, world: T, snapped: T) -> T {
    match rule {
        AttachmentRule::KeepRelative => relative,
        AttachmentRule::KeepWorld => world,
        AttachmentRule::SnapToTarget => snapped,
    }
}

/// Last path segment, without any `.Object` suffix.
fn leaf_name(path: &str) -> &str {
    let leaf = path.rsplit('/').next().unwrap_or(path);
    leaf.split('.').next().unwrap_or(leaf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_actor() -> (ObjectWorld, ObjectHandle) {
        let mut world = ObjectWorld::new();
        let class = world.classes.native_index(NativeClass::Actor);
        let actor = world.spawn_actor(class);
        (world, actor)
    }

    fn assert_near(actual: Vec3, expected: Vec3) {
        assert!(actual.abs_diff_eq(expected, 1e-4), "expected {expected:?}, got {actual:?}");
    }

    fn scene(world: &mut ObjectWorld, owner: ObjectHandle) -> ObjectHandle {
        let class = world.classes.native_index(NativeClass::SceneComponent);
        world.new_component(owner, class)
    }

    #[test]
    fn native_hierarchy_is_seeded() {
        let registry = ClassRegistry::new();
        let pawn = registry.find("Pawn").unwrap();
        let character = registry.find("Character").unwrap();
        assert!(registry.is_child_of(character, pawn));
        assert!(!registry.is_child_of(pawn, character));
        assert_eq!(registry.index(ClassRegistry::handle(pawn)), Some(pawn));
        assert_eq!(registry.index(ClassHandle::from_addr(3)), None);
    }

    #[test]
    fn default_names_count_per_class() {
        let (mut world, first) = world_with_actor();
        let second = world.spawn_actor(world.classes.native_index(NativeClass::Actor));
        assert_eq!(world.record(first).unwrap().name, "Actor_0");
        assert_eq!(world.record(second).unwrap().name, "Actor_1");
    }

    #[test]
    fn components_are_not_spawnable() {
        let mut world = ObjectWorld::new();
        let class = world.classes.native_index(NativeClass::BoxComponent);
        assert!(world.spawn_actor(class).is_null());
    }

    #[test]
    fn keep_relative_then_keep_world() {
        let (mut world, actor) = world_with_actor();
        let parent = scene(&mut world, actor);
        let child = scene(&mut world, actor);
        world.component_mut(parent).unwrap().relative = Transform::from_translation(Vec3::new(100.0, 0.0, 0.0));
        world.component_mut(child).unwrap().relative = Transform::from_translation(Vec3::new(0.0, 5.0, 0.0));

        assert!(world.attach(child, parent, AttachmentTransformRules::KEEP_RELATIVE, None));
        assert_near(world.world_transform(child).translation, Vec3::new(100.0, 5.0, 0.0));

        world.detach(child, DetachmentRule::KeepWorld);
        assert_near(world.component(child).unwrap().relative.translation, Vec3::new(100.0, 5.0, 0.0));

        assert!(world.attach(child, parent, AttachmentTransformRules::KEEP_WORLD, None));
        assert_near(world.component(child).unwrap().relative.translation, Vec3::new(0.0, 5.0, 0.0));

        assert!(world.attach(child, parent, AttachmentTransformRules::SNAP_TO_TARGET_INCLUDING_SCALE, None));
        assert_near(world.world_transform(child).translation, Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn cycles_are_refused() {
        let (mut world, actor) = world_with_actor();
        let a = scene(&mut world, actor);
        let b = scene(&mut world, actor);
        assert!(world.attach(b, a, AttachmentTransformRules::KEEP_RELATIVE, None));
        assert!(!world.attach(a, b, AttachmentTransformRules::KEEP_RELATIVE, None));
        assert!(!world.attach(a, a, AttachmentTransformRules::KEEP_RELATIVE, None));
    }

    #[test]
    fn garbage_collection_clears_references() {
        let (mut world, actor) = world_with_actor();
        let root = scene(&mut world, actor);
        let child = scene(&mut world, actor);
        assert!(world.set_root(actor, root));
        world.attach(child, root, AttachmentTransformRules::KEEP_RELATIVE, None);

        world.destroy_component(root, false);
        assert!(world.actor(actor).unwrap().root.is_null());
        assert!(world.component(child).unwrap().attach_parent.is_null());

        let removed = world.collect_garbage();
        assert_eq!(removed, vec![root]);
        assert_eq!(world.actor(actor).unwrap().components, vec![child]);
    }
}
