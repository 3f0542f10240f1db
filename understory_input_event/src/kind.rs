// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-kind discriminator and kind sets.
//!
//! [`EventKind`] is the closed enumeration exchanged at the boundary between an
//! event source and a receiver chain. [`EventKinds`] is a set of kinds, used by
//! receivers to declare which notifications they actually handle.

use bitflags::bitflags;

/// The kind of an input notification.
///
/// Kinds split into two groups:
///
/// - **Boolean-result** kinds (pointer, keyboard, scroll, drag-and-drop): each
///   receiver reports whether it handled the event and the chain OR-combines
///   the answers.
/// - **Void-result** kinds ([`Enter`](Self::Enter), [`Exit`](Self::Exit),
///   [`WindowGainFocus`](Self::WindowGainFocus),
///   [`WindowLostFocus`](Self::WindowLostFocus)): pure notifications that cascade
///   through every receiver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// A pointer was pressed over the target.
    PointerDown,
    /// A pointer was released.
    PointerUp,
    /// A pointer moved with no button held.
    PointerMoved,
    /// A pointer moved with a button held.
    PointerDragged,
    /// A drag gesture ended.
    DragRelease,
    /// Another surface was dropped onto the target.
    DragAndDrop,
    /// A wheel or trackpad scroll.
    Scroll,
    /// The pointer entered the target.
    Enter,
    /// The pointer left the target.
    Exit,
    /// The window owning the target gained focus.
    WindowGainFocus,
    /// The window owning the target lost focus.
    WindowLostFocus,
    /// A key was pressed.
    KeyDown,
    /// A key was released.
    KeyUp,
    /// A character was typed.
    KeyTyped,
}

impl EventKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::PointerDown,
        Self::PointerUp,
        Self::PointerMoved,
        Self::PointerDragged,
        Self::DragRelease,
        Self::DragAndDrop,
        Self::Scroll,
        Self::Enter,
        Self::Exit,
        Self::WindowGainFocus,
        Self::WindowLostFocus,
        Self::KeyDown,
        Self::KeyUp,
        Self::KeyTyped,
    ];

    /// Whether receivers report a "handled" result for this kind.
    pub const fn is_boolean(self) -> bool {
        !matches!(
            self,
            Self::Enter | Self::Exit | Self::WindowGainFocus | Self::WindowLostFocus
        )
    }

    /// Whether this kind carries a pointer position.
    pub const fn is_positional(self) -> bool {
        !matches!(
            self,
            Self::WindowGainFocus
                | Self::WindowLostFocus
                | Self::KeyDown
                | Self::KeyUp
                | Self::KeyTyped
        )
    }

    /// The single-kind set for this kind.
    pub const fn as_set(self) -> EventKinds {
        match self {
            Self::PointerDown => EventKinds::POINTER_DOWN,
            Self::PointerUp => EventKinds::POINTER_UP,
            Self::PointerMoved => EventKinds::POINTER_MOVED,
            Self::PointerDragged => EventKinds::POINTER_DRAGGED,
            Self::DragRelease => EventKinds::DRAG_RELEASE,
            Self::DragAndDrop => EventKinds::DRAG_AND_DROP,
            Self::Scroll => EventKinds::SCROLL,
            Self::Enter => EventKinds::ENTER,
            Self::Exit => EventKinds::EXIT,
            Self::WindowGainFocus => EventKinds::WINDOW_GAIN_FOCUS,
            Self::WindowLostFocus => EventKinds::WINDOW_LOST_FOCUS,
            Self::KeyDown => EventKinds::KEY_DOWN,
            Self::KeyUp => EventKinds::KEY_UP,
            Self::KeyTyped => EventKinds::KEY_TYPED,
        }
    }
}

bitflags! {
    /// A set of [`EventKind`]s.
    ///
    /// Receivers return one of these from their `interests` method; a chain
    /// skips receivers whose set does not contain the kind being dispatched.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct EventKinds: u16 {
        /// [`EventKind::PointerDown`].
        const POINTER_DOWN = 1 << 0;
        /// [`EventKind::PointerUp`].
        const POINTER_UP = 1 << 1;
        /// [`EventKind::PointerMoved`].
        const POINTER_MOVED = 1 << 2;
        /// [`EventKind::PointerDragged`].
        const POINTER_DRAGGED = 1 << 3;
        /// [`EventKind::DragRelease`].
        const DRAG_RELEASE = 1 << 4;
        /// [`EventKind::DragAndDrop`].
        const DRAG_AND_DROP = 1 << 5;
        /// [`EventKind::Scroll`].
        const SCROLL = 1 << 6;
        /// [`EventKind::Enter`].
        const ENTER = 1 << 7;
        /// [`EventKind::Exit`].
        const EXIT = 1 << 8;
        /// [`EventKind::WindowGainFocus`].
        const WINDOW_GAIN_FOCUS = 1 << 9;
        /// [`EventKind::WindowLostFocus`].
        const WINDOW_LOST_FOCUS = 1 << 10;
        /// [`EventKind::KeyDown`].
        const KEY_DOWN = 1 << 11;
        /// [`EventKind::KeyUp`].
        const KEY_UP = 1 << 12;
        /// [`EventKind::KeyTyped`].
        const KEY_TYPED = 1 << 13;

        /// Every pointer kind, including crossing and drag-and-drop.
        const POINTER = Self::POINTER_DOWN.bits()
            | Self::POINTER_UP.bits()
            | Self::POINTER_MOVED.bits()
            | Self::POINTER_DRAGGED.bits()
            | Self::DRAG_RELEASE.bits()
            | Self::DRAG_AND_DROP.bits()
            | Self::SCROLL.bits()
            | Self::ENTER.bits()
            | Self::EXIT.bits();
        /// Every keyboard kind.
        const KEYBOARD = Self::KEY_DOWN.bits() | Self::KEY_UP.bits() | Self::KEY_TYPED.bits();
        /// Both window focus kinds.
        const FOCUS = Self::WINDOW_GAIN_FOCUS.bits() | Self::WINDOW_LOST_FOCUS.bits();
    }
}

impl EventKinds {
    /// Whether `kind` is a member of this set.
    pub const fn has(self, kind: EventKind) -> bool {
        self.contains(kind.as_set())
    }
}

impl From<EventKind> for EventKinds {
    fn from(kind: EventKind) -> Self {
        kind.as_set()
    }
}

impl FromIterator<EventKind> for EventKinds {
    fn from_iter<T: IntoIterator<Item = EventKind>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, kind| acc | kind.as_set())
    }
}
