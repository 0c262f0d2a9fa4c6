use std::cell::RefCell;
use std::rc::Rc;

use crate::catalog::options::SelectOption;

/// The only surface a parent view gets over a child input control. The
/// view calls the named operations and never reaches into control
/// internals.
pub trait ControlHandle {
    fn focus(&mut self);
    fn clear(&mut self);
}

impl<T: ControlHandle> ControlHandle for Rc<RefCell<T>> {
    fn focus(&mut self) {
        self.borrow_mut().focus();
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }
}

/// The free-text search input. Holds its controlled value and a focus
/// flag the owning view can drive through [`ControlHandle`].
#[derive(Debug, Default)]
pub struct SearchInput {
    value: String,
    focused: bool,
}

impl SearchInput {
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }
}

impl ControlHandle for SearchInput {
    fn focus(&mut self) {
        self.focused = true;
    }

    fn clear(&mut self) {
        self.value.clear();
    }
}

/// Global listeners a dropdown needs while its menu is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobalListener {
    PointerDown,
    Scroll,
    Resize,
}

impl GlobalListener {
    pub const ALL: [GlobalListener; 3] = [
        GlobalListener::PointerDown,
        GlobalListener::Scroll,
        GlobalListener::Resize,
    ];
}

/// Attachment point for window-level listeners. The select control
/// acquires listeners on open and must release every one of them on any
/// path back to closed.
pub trait ListenerRegistry {
    fn attach(&mut self, listener: GlobalListener);
    fn detach(&mut self, listener: GlobalListener);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

/// Inputs the select control reacts to. Pointer-downs are already
/// classified by whether they landed inside the control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectEvent {
    TriggerClick,
    KeyDown(Key),
    InsidePointerDown,
    OutsidePointerDown,
    Scroll,
    Resize,
    OptionClick(usize),
}

/// A single-select dropdown with two display states, closed and open.
/// While open it holds the global dismissal listeners; every transition
/// back to closed, and unmount, releases them.
pub struct SelectControl<R: ListenerRegistry> {
    options: Vec<SelectOption>,
    value: String,
    disabled: bool,
    open: bool,
    registry: R,
}

impl<R: ListenerRegistry> SelectControl<R> {
    pub fn new(options: Vec<SelectOption>, registry: R) -> Self {
        Self {
            options,
            value: String::new(),
            disabled: false,
            open: false,
            registry,
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == self.value)
            .map(|o| o.label.as_str())
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Feeds one event through the state machine. Returns the newly
    /// selected value when an option was chosen.
    pub fn handle(&mut self, event: SelectEvent) -> Option<String> {
        match event {
            SelectEvent::TriggerClick => {
                if !self.disabled {
                    self.toggle();
                }
            }
            SelectEvent::KeyDown(Key::Enter) | SelectEvent::KeyDown(Key::Space) => {
                if !self.disabled {
                    self.toggle();
                }
            }
            SelectEvent::KeyDown(Key::Escape) => self.close(),
            SelectEvent::KeyDown(Key::Other) => {}
            SelectEvent::InsidePointerDown => {}
            SelectEvent::OutsidePointerDown | SelectEvent::Scroll | SelectEvent::Resize => {
                self.close();
            }
            SelectEvent::OptionClick(index) => {
                if !self.open {
                    return None;
                }
                let Some(option) = self.options.get(index) else {
                    return None;
                };
                if option.disabled {
                    return None;
                }
                self.value = option.value.clone();
                self.close();
                return Some(self.value.clone());
            }
        }
        None
    }

    /// Tears the control down: closed, with no listeners left behind.
    pub fn unmount(&mut self) {
        self.close();
    }

    fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        for listener in GlobalListener::ALL {
            self.registry.attach(listener);
        }
    }

    // Single exit point; all dismissal paths funnel through here so the
    // listener release cannot be skipped.
    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        for listener in GlobalListener::ALL {
            self.registry.detach(listener);
        }
    }
}

impl<R: ListenerRegistry> Drop for SelectControl<R> {
    fn drop(&mut self) {
        self.close();
    }
}
