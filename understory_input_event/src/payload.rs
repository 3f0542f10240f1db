// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind payload records.
//!
//! Each record carries the target surface plus only the fields relevant to its
//! kind. Records are plain values: an event source builds them, receivers read
//! them, and nobody mutates them in between. The `with_*` builders return a new
//! value rather than editing in place.
//!
//! Positions are in the toolkit's coordinate convention; converting from device
//! coordinates is the event source's job.

use bitflags::bitflags;
use kurbo::{Point, Vec2};

/// Pointer identifier.
///
/// Mouse input conventionally uses pointer `0`; touch input assigns one id per
/// active contact.
pub type PointerId = u32;

/// Pointer button identifier. `0` is the primary button.
pub type Button = u8;

/// A platform-independent key code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

bitflags! {
    /// Keyboard modifiers held while an event occurred.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 1 << 0;
        /// Either control key.
        const CTRL = 1 << 1;
        /// Either alt/option key.
        const ALT = 1 << 2;
        /// Command on macOS, the Windows key elsewhere.
        const META = 1 << 3;
    }
}

/// Payload for pointer down/up/moved/dragged and drag-release notifications.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent<S> {
    /// Surface the event is addressed to.
    pub target: S,
    /// Pointer position.
    pub position: Point,
    /// Which pointer produced the event.
    pub pointer: PointerId,
    /// Which button changed state (or is held, for drags).
    pub button: Button,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// For up events: the surface that received the paired down event.
    ///
    /// Lets receivers match a release to its press when the pointer has moved
    /// onto a different surface in between.
    pub pressed_on: Option<S>,
}

impl<S> PointerEvent<S> {
    /// Create a pointer payload with no modifiers and no paired press.
    pub fn new(target: S, position: Point, pointer: PointerId, button: Button) -> Self {
        Self {
            target,
            position,
            pointer,
            button,
            modifiers: Modifiers::empty(),
            pressed_on: None,
        }
    }

    /// Return a copy carrying `modifiers`.
    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    /// Return a copy recording the surface of the paired down event.
    #[must_use]
    pub fn with_pressed_on(self, pressed_on: S) -> Self {
        Self {
            pressed_on: Some(pressed_on),
            ..self
        }
    }
}

impl<S: PartialEq> PointerEvent<S> {
    /// Whether the release happened on the same surface as its press.
    ///
    /// Returns `false` when no paired press is known.
    pub fn released_on_press_target(&self) -> bool {
        self.pressed_on.as_ref() == Some(&self.target)
    }
}

/// Payload for drag-and-drop notifications.
#[derive(Clone, Debug, PartialEq)]
pub struct DropEvent<S> {
    /// Surface receiving the drop.
    pub target: S,
    /// Drop position.
    pub position: Point,
    /// Surface being dragged.
    pub dragged: S,
}

impl<S> DropEvent<S> {
    /// Create a drop payload.
    pub fn new(target: S, position: Point, dragged: S) -> Self {
        Self {
            target,
            position,
            dragged,
        }
    }
}

/// Payload for wheel and trackpad scroll notifications.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollEvent<S> {
    /// Surface under the pointer.
    pub target: S,
    /// Pointer position when the scroll occurred.
    pub position: Point,
    /// Scroll amount along each axis.
    pub delta: Vec2,
}

impl<S> ScrollEvent<S> {
    /// Create a scroll payload.
    pub fn new(target: S, position: Point, delta: Vec2) -> Self {
        Self {
            target,
            position,
            delta,
        }
    }
}

/// Payload for key down/up notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent<S> {
    /// Surface holding keyboard focus.
    pub target: S,
    /// Key that changed state.
    pub key: KeyCode,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
}

impl<S> KeyEvent<S> {
    /// Create a key payload with no modifiers.
    pub fn new(target: S, key: KeyCode) -> Self {
        Self {
            target,
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Return a copy carrying `modifiers`.
    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }
}

/// Payload for key-typed notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedEvent<S> {
    /// Surface holding keyboard focus.
    pub target: S,
    /// The character produced.
    pub character: char,
}

impl<S> TypedEvent<S> {
    /// Create a typed-character payload.
    pub fn new(target: S, character: char) -> Self {
        Self { target, character }
    }
}

/// Payload for pointer enter/exit notifications.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossingEvent<S> {
    /// Surface being entered or left.
    pub target: S,
    /// Pointer position at the crossing.
    pub position: Point,
    /// Which pointer crossed.
    pub pointer: PointerId,
}

impl<S> CrossingEvent<S> {
    /// Create a crossing payload.
    pub fn new(target: S, position: Point, pointer: PointerId) -> Self {
        Self {
            target,
            position,
            pointer,
        }
    }
}

/// Payload for window gain/lost focus notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusEvent<S> {
    /// Surface whose window changed focus.
    pub target: S,
}

impl<S> FocusEvent<S> {
    /// Create a focus payload.
    pub fn new(target: S) -> Self {
        Self { target }
    }
}
