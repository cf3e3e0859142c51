//! Keyboard tracking for the character controller
//!
//! Raw key events arrive through an [`InputSource`] and land in an
//! [`InputTracker`] (key code -> pressed). Once per frame the controller takes
//! a [`ControlState`] snapshot through the [`InputBindings`] and never looks at
//! the tracker again until the next frame.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Control actions understood by the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Strafe left (A by default)
    MoveLeft,
    /// Strafe right (D by default)
    MoveRight,
    /// Turn left (Left arrow by default)
    TurnLeft,
    /// Turn right (Right arrow by default)
    TurnRight,
    /// Tilt the view up (Up arrow by default)
    LookUp,
    /// Tilt the view down (Down arrow by default)
    LookDown,
}

/// Which controls are held during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub look_up: bool,
    pub look_down: bool,
}

impl ControlState {
    /// Snapshot with a single action held
    pub fn with(action: InputAction) -> Self {
        let mut state = Self::default();
        state.set(action, true);
        state
    }

    /// Check if an action is held
    pub fn is_held(&self, action: InputAction) -> bool {
        match action {
            InputAction::MoveForward => self.forward,
            InputAction::MoveBackward => self.backward,
            InputAction::MoveLeft => self.left,
            InputAction::MoveRight => self.right,
            InputAction::TurnLeft => self.turn_left,
            InputAction::TurnRight => self.turn_right,
            InputAction::LookUp => self.look_up,
            InputAction::LookDown => self.look_down,
        }
    }

    fn set(&mut self, action: InputAction, held: bool) {
        let slot = match action {
            InputAction::MoveForward => &mut self.forward,
            InputAction::MoveBackward => &mut self.backward,
            InputAction::MoveLeft => &mut self.left,
            InputAction::MoveRight => &mut self.right,
            InputAction::TurnLeft => &mut self.turn_left,
            InputAction::TurnRight => &mut self.turn_right,
            InputAction::LookUp => &mut self.look_up,
            InputAction::LookDown => &mut self.look_down,
        };
        *slot = held;
    }
}

/// Maps physical keys to control actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<KeyCode, InputAction>,
    /// Reverse lookup: action to all keys
    reverse: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();

        // WASD walks and strafes
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrows steer the view
        bindings.bind(KeyCode::ArrowLeft, InputAction::TurnLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::TurnRight);
        bindings.bind(KeyCode::ArrowUp, InputAction::LookUp);
        bindings.bind(KeyCode::ArrowDown, InputAction::LookDown);

        bindings
    }
}

impl InputBindings {
    /// Bindings with no keys mapped
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Bind a key to an action, replacing whatever the key did before
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind(key);
        self.bindings.insert(key, action);
        self.reverse.entry(action).or_default().push(key);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.reverse.get_mut(&action) {
                keys.retain(|k| *k != key);
            }
        }
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to an action
    pub fn keys_for(&self, action: InputAction) -> &[KeyCode] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Pressed/released state per key code
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    pressed: HashMap<KeyCode, bool>,
}

/// Input tracker shared between the input source and its readers
pub type SharedInput = Rc<RefCell<InputTracker>>;

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker ready to be shared with an [`InputSource`]
    pub fn shared() -> SharedInput {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn key_down(&mut self, code: KeyCode) {
        self.pressed.insert(code, true);
    }

    pub fn key_up(&mut self, code: KeyCode) {
        self.pressed.insert(code, false);
    }

    /// Whether `code` is held. Keys never seen count as released.
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.pressed.get(&code).copied().unwrap_or(false)
    }

    /// Release every key (e.g. after the window loses focus)
    pub fn release_all(&mut self) {
        self.pressed.values_mut().for_each(|held| *held = false);
    }

    /// Resolve held keys into control actions
    pub fn controls(&self, bindings: &InputBindings) -> ControlState {
        let mut state = ControlState::default();
        for (code, held) in &self.pressed {
            if !*held {
                continue;
            }
            if let Some(action) = bindings.get_key_action(*code) {
                state.set(action, true);
            }
        }
        state
    }
}

/// Identifier of one registered key listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyEventKind {
    Down,
    Up,
}

#[derive(Debug)]
struct Listener {
    id: ListenerId,
    kind: KeyEventKind,
    tracker: Weak<RefCell<InputTracker>>,
}

#[derive(Debug, Default)]
struct ListenerTable {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl ListenerTable {
    fn add(&mut self, kind: KeyEventKind, tracker: &SharedInput) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            tracker: Rc::downgrade(tracker),
        });
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }
}

/// The window's keyboard event stream.
///
/// Cloning yields another handle to the same listener table.
#[derive(Debug, Clone, Default)]
pub struct InputSource {
    table: Rc<RefCell<ListenerTable>>,
}

impl InputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register key-down and key-up listeners feeding `tracker`.
    ///
    /// Both listeners stay registered until the returned guard is dropped.
    #[must_use = "dropping the subscription unregisters the listeners"]
    pub fn subscribe(&self, tracker: &SharedInput) -> InputSubscription {
        let mut table = self.table.borrow_mut();
        let down = table.add(KeyEventKind::Down, tracker);
        let up = table.add(KeyEventKind::Up, tracker);
        InputSubscription {
            table: Rc::downgrade(&self.table),
            down,
            up,
        }
    }

    /// Remove a single listener. Unknown ids are ignored.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.table.borrow_mut().remove(id)
    }

    /// Number of registered listeners (two per subscription)
    pub fn listener_count(&self) -> usize {
        self.table.borrow().listeners.len()
    }

    pub fn key_down(&self, code: KeyCode) {
        self.dispatch(KeyEventKind::Down, code);
    }

    pub fn key_up(&self, code: KeyCode) {
        self.dispatch(KeyEventKind::Up, code);
    }

    /// Forward a winit keyboard event
    pub fn handle_keyboard(&self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            match element_state {
                ElementState::Pressed => self.key_down(key_code),
                ElementState::Released => self.key_up(key_code),
            }
        }
    }

    fn dispatch(&self, kind: KeyEventKind, code: KeyCode) {
        let table = self.table.borrow();
        for listener in table.listeners.iter().filter(|l| l.kind == kind) {
            let Some(tracker) = listener.tracker.upgrade() else {
                continue;
            };
            let mut tracker = tracker.borrow_mut();
            match kind {
                KeyEventKind::Down => tracker.key_down(code),
                KeyEventKind::Up => tracker.key_up(code),
            }
        }
    }
}

/// Guard for a pair of key listeners; dropping it unregisters both.
#[derive(Debug)]
pub struct InputSubscription {
    table: Weak<RefCell<ListenerTable>>,
    down: ListenerId,
    up: ListenerId,
}

impl InputSubscription {
    /// Ids of the key-down and key-up listeners
    pub fn listener_ids(&self) -> (ListenerId, ListenerId) {
        (self.down, self.up)
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        // The source may already be gone at shutdown
        if let Some(table) = self.table.upgrade() {
            let mut table = table.borrow_mut();
            table.remove(self.down);
            table.remove(self.up);
        }
    }
}
