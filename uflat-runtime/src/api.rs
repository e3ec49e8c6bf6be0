// Engine binding. The engine is bound to the game thread that will make every
// boundary call; other threads see no engine and get default results.

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::Engine;
use crate::error::{FlatError, FlatResult};

thread_local! {
    static ENGINE: RefCell<Option<Rc<dyn Engine>>> = const { RefCell::new(None) };
}

/// Bind `engine` to the calling thread, replacing any previous binding.
pub fn install_engine(engine: Rc<dyn Engine>) {
    ENGINE.with(|slot| *slot.borrow_mut() = Some(engine));
}

/// Unbind the calling thread's engine, returning it.
pub fn uninstall_engine() -> Option<Rc<dyn Engine>> {
    ENGINE.with(|slot| slot.borrow_mut().take())
}

#[inline]
pub fn is_engine_installed() -> bool {
    ENGINE.with(|slot| slot.borrow().is_some())
}

/// The engine bound to this thread.
///
/// Returns a cloned `Rc` so no borrow of the slot is held while the engine
/// runs; callbacks fired from inside the engine can look it up again.
pub fn engine() -> FlatResult<Rc<dyn Engine>> {
    ENGINE.with(|slot| slot.borrow().clone()).ok_or(FlatError::NoEngine)
}

/// Run `f` against the bound engine, or return `default` when none is bound.
pub fn with_engine<R>(default: R, f: impl FnOnce(&dyn Engine) -> R) -> R {
    match engine() {
        Ok(engine) => f(&*engine),
        Err(_) => default,
    }
}
