// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press/release matching for button activation.
//!
//! [`PressTracker`] remembers which surface each pointer went down on, so that
//! the matching up event can be paired with its press even when the pointer
//! was released over a different surface.
//!
//! ## Rules
//!
//! 1. **Same surface, same button**: the release completes the press
//!    ([`Activation::Pressed`]).
//! 2. **Different surface or different button**: the press ends without
//!    completing ([`Activation::Ended`]).
//! 3. **No active press** for the pointer: [`Activation::Unpaired`].
//!
//! Each pointer id is tracked independently. A second down on a pointer that
//! is already pressed replaces the earlier press.
//!
//! ```
//! use kurbo::Point;
//! use understory_input_event::PointerEvent;
//! use understory_receiver::activation::{Activation, PressTracker};
//!
//! let mut tracker = PressTracker::new();
//! tracker.on_down(&PointerEvent::new(7_u32, Point::new(1.0, 1.0), 0, 0));
//!
//! let release = tracker.on_up(&PointerEvent::new(7, Point::new(2.0, 2.0), 0, 0));
//! assert_eq!(release.activation, Activation::Pressed(7));
//! assert_eq!(release.event.pressed_on, Some(7));
//! ```

use alloc::collections::BTreeMap;

use kurbo::Point;
use understory_input_event::{Button, PointerEvent, PointerId};

/// An active press.
#[derive(Clone, Debug, PartialEq)]
pub struct Press<S> {
    /// Surface the pointer went down on.
    pub target: S,
    /// Button that was pressed.
    pub button: Button,
    /// Pointer position at press time.
    pub position: Point,
}

/// How a release relates to its press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation<S> {
    /// The press completed on this surface.
    Pressed(S),
    /// The press on this surface ended without completing.
    Ended(S),
    /// No press was active for the pointer.
    Unpaired,
}

impl<S: Copy> Activation<S> {
    /// The surface the press began on, if there was one.
    pub fn pressed_on(&self) -> Option<S> {
        match self {
            Self::Pressed(s) | Self::Ended(s) => Some(*s),
            Self::Unpaired => None,
        }
    }
}

/// Result of [`PressTracker::on_up`].
#[derive(Clone, Debug, PartialEq)]
pub struct Release<S> {
    /// The up event, with [`PointerEvent::pressed_on`] filled in when a press
    /// was active.
    pub event: PointerEvent<S>,
    /// How the release relates to its press.
    pub activation: Activation<S>,
}

/// Tracks active presses per pointer.
#[derive(Clone, Debug)]
pub struct PressTracker<S> {
    presses: BTreeMap<PointerId, Press<S>>,
}

impl<S: Copy + Eq> Default for PressTracker<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy + Eq> PressTracker<S> {
    /// Create a tracker with no active presses.
    pub fn new() -> Self {
        Self {
            presses: BTreeMap::new(),
        }
    }

    /// Record a pointer-down.
    ///
    /// Returns the press it replaced, if the pointer was already down.
    pub fn on_down(&mut self, event: &PointerEvent<S>) -> Option<Press<S>> {
        let press = Press {
            target: event.target,
            button: event.button,
            position: event.position,
        };
        let stale = self.presses.insert(event.pointer, press);
        if stale.is_some() {
            log::debug!("pointer {} pressed again before release", event.pointer);
        }
        stale
    }

    /// Match a pointer-up against its press and end the press.
    pub fn on_up(&mut self, event: &PointerEvent<S>) -> Release<S> {
        let Some(press) = self.presses.remove(&event.pointer) else {
            return Release {
                event: event.clone(),
                activation: Activation::Unpaired,
            };
        };
        let activation = if press.target == event.target && press.button == event.button {
            Activation::Pressed(press.target)
        } else {
            Activation::Ended(press.target)
        };
        Release {
            event: event.clone().with_pressed_on(press.target),
            activation,
        }
    }

    /// Forget the press for `pointer`. Returns `true` if one was active.
    pub fn cancel(&mut self, pointer: PointerId) -> bool {
        self.presses.remove(&pointer).is_some()
    }

    /// Forget every press that began on `surface`. Returns how many there were.
    pub fn cancel_on(&mut self, surface: S) -> usize {
        let before = self.presses.len();
        self.presses.retain(|_, p| p.target != surface);
        before - self.presses.len()
    }

    /// The active press for `pointer`.
    pub fn press(&self, pointer: PointerId) -> Option<&Press<S>> {
        self.presses.get(&pointer)
    }

    /// Whether any pointer is currently pressed on `surface`.
    pub fn is_pressed_on(&self, surface: S) -> bool {
        self.presses.values().any(|p| p.target == surface)
    }

    /// Forget every active press.
    pub fn clear(&mut self) {
        self.presses.clear();
    }
}
