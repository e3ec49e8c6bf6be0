// Input components: action and axis bindings per component, priority and
// input blocking.

use std::collections::HashMap;

use uflat_ffi::ObjectHandle;

use crate::engine::{ActionBinding, AxisBinding, AxisDelegate, InputTrigger, NativeDelegate};

struct StoredAction {
    id: u64,
    action: String,
    event: InputTrigger,
    execute_when_paused: bool,
    delegate: Option<NativeDelegate>,
}

struct StoredAxis {
    id: u64,
    axis: String,
    execute_when_paused: bool,
    delegate: Option<AxisDelegate>,
}

#[derive(Default)]
pub(crate) struct InputState {
    actions: Vec<StoredAction>,
    axes: Vec<StoredAxis>,
    pub priority: i32,
    pub block_input: bool,
}

impl InputState {
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn has_bindings(&self) -> bool {
        !self.actions.is_empty() || !self.axes.is_empty()
    }
}

#[derive(Default)]
pub(crate) struct InputRegistry {
    components: HashMap<ObjectHandle, InputState>,
    next_id: u64,
}

impl InputRegistry {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn state(&self, input: ObjectHandle) -> Option<&InputState> {
        self.components.get(&input)
    }

    pub fn state_mut(&mut self, input: ObjectHandle) -> &mut InputState {
        self.components.entry(input).or_default()
    }

    pub fn add_action(&mut self, input: ObjectHandle, binding: ActionBinding) {
        let id = self.next_id();
        self.state_mut(input).actions.push(StoredAction {
            id,
            action: binding.action,
            event: binding.event,
            execute_when_paused: binding.execute_when_paused,
            delegate: Some(binding.delegate),
        });
    }

    pub fn add_axis(&mut self, input: ObjectHandle, binding: AxisBinding) {
        let id = self.next_id();
        self.state_mut(input).axes.push(StoredAxis {
            id,
            axis: binding.axis,
            execute_when_paused: binding.execute_when_paused,
            delegate: Some(binding.delegate),
        });
    }

    pub fn remove_action(&mut self, input: ObjectHandle, action: &str, event: InputTrigger) {
        if let Some(state) = self.components.get_mut(&input) {
            state.actions.retain(|b| !(b.action == action && b.event == event));
        }
    }

    pub fn clear_actions(&mut self, input: ObjectHandle) {
        if let Some(state) = self.components.get_mut(&input) {
            state.actions.clear();
        }
    }

    pub fn forget(&mut self, input: ObjectHandle) {
        self.components.remove(&input);
    }

    /// Components in dispatch order: descending priority, then `order`
    /// (creation order). Stops after the first component that blocks input.
    fn stack(&self, live: &[ObjectHandle]) -> Vec<ObjectHandle> {
        let mut stack: Vec<(usize, ObjectHandle, &InputState)> = live
            .iter()
            .enumerate()
            .filter_map(|(order, h)| self.components.get(h).map(|s| (order, *h, s)))
            .collect();
        stack.sort_by(|a, b| b.2.priority.cmp(&a.2.priority).then(a.0.cmp(&b.0)));
        let mut out = Vec::with_capacity(stack.len());
        for (_, handle, state) in stack {
            out.push(handle);
            if state.block_input {
                break;
            }
        }
        out
    }

    /// Ids of the action bindings an event reaches. Within one component,
    /// only the most recent binding for (action, event) fires.
    pub fn action_targets(&self, live: &[ObjectHandle], action: &str, event: InputTrigger, paused: bool) -> Vec<(ObjectHandle, u64)> {
        self.stack(live)
            .into_iter()
            .filter_map(|input| {
                self.components[&input]
                    .actions
                    .iter()
                    .rev()
                    .find(|b| b.action == action && b.event == event)
                    .filter(|b| !paused || b.execute_when_paused)
                    .map(|b| (input, b.id))
            })
            .collect()
    }

    pub fn axis_targets(&self, live: &[ObjectHandle], axis: &str, paused: bool) -> Vec<(ObjectHandle, u64)> {
        self.stack(live)
            .into_iter()
            .filter_map(|input| {
                self.components[&input]
                    .axes
                    .iter()
                    .rev()
                    .find(|b| b.axis == axis)
                    .filter(|b| !paused || b.execute_when_paused)
                    .map(|b| (input, b.id))
            })
            .collect()
    }

    pub fn take_action(&mut self, input: ObjectHandle, id: u64) -> Option<NativeDelegate> {
        let state = self.components.get_mut(&input)?;
        state.actions.iter_mut().find(|b| b.id == id)?.delegate.take()
    }

    pub fn restore_action(&mut self, input: ObjectHandle, id: u64, delegate: NativeDelegate) {
        if let Some(binding) = self
            .components
            .get_mut(&input)
            .and_then(|s| s.actions.iter_mut().find(|b| b.id == id))
        {
            binding.delegate.get_or_insert(delegate);
        }
    }

    pub fn take_axis(&mut self, input: ObjectHandle, id: u64) -> Option<AxisDelegate> {
        let state = self.components.get_mut(&input)?;
        state.axes.iter_mut().find(|b| b.id == id)?.delegate.take()
    }

    pub fn restore_axis(&mut self, input: ObjectHandle, id: u64, delegate: AxisDelegate) {
        if let Some(binding) = self
            .components
            .get_mut(&input)
            .and_then(|s| s.axes.iter_mut().find(|b| b.id == id))
        {
            binding.delegate.get_or_insert(delegate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(name: &str, event: InputTrigger, paused: bool) -> ActionBinding {
        ActionBinding {
            action: name.to_string(),
            event,
            execute_when_paused: paused,
            delegate: Box::new(|| {}),
        }
    }

    fn h(addr: usize) -> ObjectHandle {
        ObjectHandle::from_addr(addr)
    }

    #[test]
    fn last_registration_wins_per_key() {
        let mut registry = InputRegistry::default();
        registry.add_action(h(1), action("Fire", InputTrigger::Pressed, false));
        registry.add_action(h(1), action("Fire", InputTrigger::Pressed, false));
        registry.add_action(h(1), action("Fire", InputTrigger::Released, false));
        assert_eq!(registry.state(h(1)).unwrap().action_count(), 3);

        let targets = registry.action_targets(&[h(1)], "Fire", InputTrigger::Pressed, false);
        assert_eq!(targets, vec![(h(1), 2)]);
    }

    #[test]
    fn priority_orders_and_block_stops() {
        let mut registry = InputRegistry::default();
        for addr in [1, 2, 3] {
            registry.add_action(h(addr), action("Use", InputTrigger::Pressed, false));
        }
        registry.state_mut(h(3)).priority = 10;
        let live = [h(1), h(2), h(3)];
        let order: Vec<_> = registry
            .action_targets(&live, "Use", InputTrigger::Pressed, false)
            .into_iter()
            .map(|(input, _)| input)
            .collect();
        assert_eq!(order, vec![h(3), h(1), h(2)]);

        registry.state_mut(h(1)).block_input = true;
        let blocked = registry.action_targets(&live, "Use", InputTrigger::Pressed, false);
        assert_eq!(blocked.len(), 2);
    }

    #[test]
    fn paused_filters_bindings() {
        let mut registry = InputRegistry::default();
        registry.add_action(h(1), action("Menu", InputTrigger::Pressed, true));
        registry.add_action(h(2), action("Menu", InputTrigger::Pressed, false));
        let targets = registry.action_targets(&[h(1), h(2)], "Menu", InputTrigger::Pressed, true);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].0, h(1));
    }

    #[test]
    fn remove_and_clear() {
        let mut registry = InputRegistry::default();
        registry.add_action(h(1), action("A", InputTrigger::Pressed, false));
        registry.add_action(h(1), action("A", InputTrigger::Released, false));
        registry.remove_action(h(1), "A", InputTrigger::Pressed);
        assert_eq!(registry.state(h(1)).unwrap().action_count(), 1);
        registry.clear_actions(h(1));
        assert!(!registry.state(h(1)).unwrap().has_bindings());
    }
}
