// Narrowing lookups: linear scans over live objects. The first match in the
// engine's iteration order wins.

use uflat_ffi::{Kind, ObjectHandle};

use crate::dispatch::{resolve, Family};
use crate::engine::Engine;
use crate::error::{FlatError, FlatResult};

/// Secondary filter applied after the kind test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter<'a> {
    /// Kind alone.
    Any,
    /// Object name equality, ignoring ASCII case.
    Name(&'a str),
    /// Tag membership, ignoring ASCII case.
    Tag(&'a str),
}

impl<'a> Filter<'a> {
    /// Null name means "no filter".
    pub fn by_name(name: Option<&'a str>) -> Self {
        name.map_or(Filter::Any, Filter::Name)
    }
}

/// First live actor of `kind` (or a subtype) matching `filter`.
pub fn find_actor(engine: &dyn Engine, kind: Kind, filter: Filter<'_>) -> FlatResult<ObjectHandle> {
    let class = resolve(engine, kind, Family::Spawnable)?;
    engine
        .actors_of_class(class)
        .into_iter()
        .find(|&actor| match filter {
            Filter::Any => true,
            Filter::Name(name) => engine.object_name(actor).eq_ignore_ascii_case(name),
            Filter::Tag(tag) => engine.actor_has_tag(actor, tag),
        })
        .ok_or_else(|| not_found("actor", kind, filter))
}

/// First component of `actor` of `kind` (or a subtype) matching `filter`,
/// in the actor's component order.
pub fn find_component(
    engine: &dyn Engine,
    actor: ObjectHandle,
    kind: Kind,
    filter: Filter<'_>,
) -> FlatResult<ObjectHandle> {
    let actor = crate::object_ref::checked(engine, actor)?;
    let class = resolve(engine, kind, Family::Component)?;
    engine
        .components(actor)
        .into_iter()
        .find(|&component| {
            !component.is_null()
                && engine.is_a(component, class)
                && match filter {
                    Filter::Any => true,
                    Filter::Name(name) => engine.object_name(component).eq_ignore_ascii_case(name),
                    Filter::Tag(tag) => engine.component_has_tag(component, tag),
                }
        })
        .ok_or_else(|| not_found("component", kind, filter))
}

/// The actor's root component if it is-a `kind`.
pub fn root_component_of_kind(engine: &dyn Engine, actor: ObjectHandle, kind: Kind) -> FlatResult<ObjectHandle> {
    let actor = crate::object_ref::checked(engine, actor)?;
    let class = resolve(engine, kind, Family::Attachable)?;
    let root = engine.root_component(actor);
    if !root.is_null() && engine.is_a(root, class) {
        Ok(root)
    } else {
        Err(FlatError::NotFound(format!("root {}", kind.name())))
    }
}

/// Walk up the attachment chain from `component` to the first parent whose
/// owner is-a `kind` actor.
pub fn attached_actor_of_kind(engine: &dyn Engine, component: ObjectHandle, kind: Kind) -> FlatResult<ObjectHandle> {
    let class = resolve(engine, kind, Family::Spawnable)?;
    let mut current = engine.attach_parent(component);
    while !current.is_null() {
        let owner = engine.component_owner(current);
        if !owner.is_null() && engine.is_a(owner, class) {
            return Ok(owner);
        }
        current = engine.attach_parent(current);
    }
    Err(FlatError::NotFound(format!("attached {}", kind.name())))
}

fn not_found(what: &str, kind: Kind, filter: Filter<'_>) -> FlatError {
    match filter {
        Filter::Any => FlatError::NotFound(format!("{what} of kind {}", kind.name())),
        Filter::Name(name) => FlatError::NotFound(format!("{what} {} named {name}", kind.name())),
        Filter::Tag(tag) => FlatError::NotFound(format!("{what} {} tagged {tag}", kind.name())),
    }
}
