//! Action binding layer
//!
//! Maps physical inputs (keys and mouse buttons) to logical application
//! actions, so gameplay code asks "is Jump down" instead of naming keys.
//! Supports runtime rebinding; the action type is supplied by the
//! application.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Action { Jump, Fire }
//!
//! let mut mapper = InputMapper::new();
//! mapper.bind(Key::Space, Action::Jump);
//! mapper.bind(MouseButton::Left, Action::Fire);
//!
//! if mapper.action_pressed(Action::Jump, &input) {
//!     player.jump();
//! }
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::input::key::{Key, MouseButton};
use crate::input::state::Input;

/// A physical input that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A keyboard key
    Key(Key),
    /// A mouse button
    Mouse(MouseButton),
}

impl From<Key> for Binding {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for Binding {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

impl Binding {
    fn is_down(self, input: &Input) -> bool {
        match self {
            Self::Key(key) => input.is_key_down(key),
            Self::Mouse(button) => input.is_mouse_button_down(button),
        }
    }

    fn was_pressed(self, input: &Input) -> bool {
        match self {
            Self::Key(key) => input.was_key_pressed(key),
            Self::Mouse(button) => input.was_mouse_button_pressed(button),
        }
    }

    fn was_released(self, input: &Input) -> bool {
        match self {
            Self::Key(key) => input.was_key_released(key),
            Self::Mouse(button) => input.was_mouse_button_released(button),
        }
    }
}

/// Maps physical inputs to logical actions.
///
/// Keeps a reverse table so UIs can display the bindings of an action.
/// Most actions carry one or two bindings, hence the inline capacity.
#[derive(Debug, Clone)]
pub struct InputMapper<A> {
    /// Binding to action
    bindings: FxHashMap<Binding, A>,
    /// Reverse lookup: action to bindings
    action_bindings: FxHashMap<A, SmallVec<[Binding; 2]>>,
}

impl<A: Copy + Eq + Hash> InputMapper<A> {
    /// Create an empty mapper.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: FxHashMap::default(),
            action_bindings: FxHashMap::default(),
        }
    }

    /// Bind a key or mouse button to an action.
    ///
    /// If the binding was previously mapped, the old mapping is replaced.
    pub fn bind(&mut self, binding: impl Into<Binding>, action: A) {
        let binding = binding.into();

        // Remove the old mapping for this binding
        if let Some(old_action) = self.bindings.get(&binding)
            && let Some(bindings) = self.action_bindings.get_mut(old_action)
        {
            bindings.retain(|b| *b != binding);
        }

        self.bindings.insert(binding, action);
        self.action_bindings.entry(action).or_default().push(binding);
    }

    /// Remove a binding.
    pub fn unbind(&mut self, binding: impl Into<Binding>) {
        let binding = binding.into();
        if let Some(action) = self.bindings.remove(&binding)
            && let Some(bindings) = self.action_bindings.get_mut(&action)
        {
            bindings.retain(|b| *b != binding);
        }
    }

    /// Remove all bindings for an action.
    pub fn unbind_action(&mut self, action: A) {
        if let Some(bindings) = self.action_bindings.remove(&action) {
            for binding in bindings {
                self.bindings.remove(&binding);
            }
        }
    }

    /// Get the action a binding maps to.
    #[must_use]
    pub fn action_for(&self, binding: impl Into<Binding>) -> Option<A> {
        self.bindings.get(&binding.into()).copied()
    }

    /// Get all bindings mapped to an action.
    #[must_use]
    pub fn bindings_for(&self, action: A) -> &[Binding] {
        self.action_bindings
            .get(&action)
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }

    /// Check if a binding is mapped to any action.
    #[must_use]
    pub fn is_bound(&self, binding: impl Into<Binding>) -> bool {
        self.bindings.contains_key(&binding.into())
    }

    /// Total number of bindings.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Remove all bindings.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.action_bindings.clear();
    }

    /// Iterate over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (Binding, A)> + '_ {
        self.bindings.iter().map(|(&b, &a)| (b, a))
    }

    // -------------------------------------------------------------------------
    // State-coupled queries
    // -------------------------------------------------------------------------

    /// Check if any binding of the action is currently down.
    #[must_use]
    pub fn action_down(&self, action: A, input: &Input) -> bool {
        self.bindings_for(action).iter().any(|b| b.is_down(input))
    }

    /// Check if any binding of the action went down during the last frame.
    #[must_use]
    pub fn action_pressed(&self, action: A, input: &Input) -> bool {
        self.bindings_for(action).iter().any(|b| b.was_pressed(input))
    }

    /// Check if any binding of the action went up during the last frame.
    #[must_use]
    pub fn action_released(&self, action: A, input: &Input) -> bool {
        self.bindings_for(action).iter().any(|b| b.was_released(input))
    }
}

impl<A: Copy + Eq + Hash> Default for InputMapper<A> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
