//! Controlled and uncontrolled state.
//!
//! Each concern of a table (sort, filter, pagination, selection) is either
//! owned by the caller, who is told about changes and pushes the new value
//! back, or owned by the table itself. The choice is made once, when the
//! table is built.

use std::fmt;

/// Change notification for a controlled value.
pub type Callback<S> = Box<dyn FnMut(S) + Send>;

/// Who owns a piece of table state.
pub enum Control<S> {
    /// The caller owns the value; changes are only reported.
    Controlled { value: S, on_change: Callback<S> },
    /// The table owns the value.
    Uncontrolled(S),
}

impl<S: Clone> Control<S> {
    pub fn controlled(value: S, on_change: impl FnMut(S) + Send + 'static) -> Self {
        Control::Controlled {
            value,
            on_change: Box::new(on_change),
        }
    }

    pub fn uncontrolled(initial: S) -> Self {
        Control::Uncontrolled(initial)
    }

    /// The current value.
    pub fn get(&self) -> &S {
        match self {
            Control::Controlled { value, .. } => value,
            Control::Uncontrolled(value) => value,
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, Control::Controlled { .. })
    }

    /// Replace the current value directly.
    ///
    /// This is how a controlling caller hands the table its new state.
    pub fn set(&mut self, next: S) {
        match self {
            Control::Controlled { value, .. } => *value = next,
            Control::Uncontrolled(value) => *value = next,
        }
    }

    /// Route a change produced by a table event.
    ///
    /// Controlled values report `next` to the caller and stay as they are;
    /// uncontrolled values take `next`. Returns `true` if the held value
    /// changed.
    pub fn dispatch(&mut self, next: S) -> bool {
        match self {
            Control::Controlled { on_change, .. } => {
                on_change(next);
                false
            }
            Control::Uncontrolled(value) => {
                *value = next;
                true
            }
        }
    }
}

impl<S: Default + Clone> Default for Control<S> {
    fn default() -> Self {
        Control::Uncontrolled(S::default())
    }
}

impl<S: fmt::Debug> fmt::Debug for Control<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Controlled { value, .. } => {
                f.debug_struct("Controlled").field("value", value).finish_non_exhaustive()
            }
            Control::Uncontrolled(value) => f.debug_tuple("Uncontrolled").field(value).finish(),
        }
    }
}
