// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button activation chain: press began, press ended, pressed.
//!
//! Same shape as the [input chain](crate::input), with three void
//! notifications and no "handled" result. Every receiver runs, most recently
//! attached first, and the first fault aborts the rest.
//!
//! Activation notifications are usually derived from pointer events by a
//! [`PressTracker`](crate::activation::PressTracker) rather than fed directly.

use alloc::boxed::Box;

use crate::chain::Chain;
use crate::fault::InputFault;

/// The kind of a button activation notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    /// A press completed: down then up on the same surface.
    Pressed,
    /// A press began on the surface.
    PressBegan,
    /// A press that began on the surface ended, wherever the pointer was
    /// released.
    PressEnded,
}

/// An observer of button activation on one surface.
pub trait ButtonReceiver<S> {
    /// A press completed on the surface.
    fn pressed(&mut self, _surface: S) -> Result<(), InputFault> {
        Ok(())
    }

    /// A press began on the surface.
    fn press_began(&mut self, _surface: S) -> Result<(), InputFault> {
        Ok(())
    }

    /// A press that began on the surface ended.
    fn press_ended(&mut self, _surface: S) -> Result<(), InputFault> {
        Ok(())
    }
}

/// Trait-object form of a [`ButtonReceiver`], as stored in a [`ButtonChain`].
pub type DynButtonReceiver<S> = dyn ButtonReceiver<S>;

/// A chain of [`ButtonReceiver`]s bound to one surface.
pub type ButtonChain<S> = Chain<S, DynButtonReceiver<S>>;

impl<S: Copy + Eq> Chain<S, DynButtonReceiver<S>> {
    /// Append `receiver` at the tail.
    pub fn attach_button(&mut self, receiver: impl ButtonReceiver<S> + 'static) {
        self.attach_receiver(Box::new(receiver));
    }

    /// Builder form of [`attach_button`](Self::attach_button).
    #[must_use]
    pub fn with_button(mut self, receiver: impl ButtonReceiver<S> + 'static) -> Self {
        self.attach_button(receiver);
        self
    }

    /// Cascade a press-completed notification.
    pub fn try_pressed(&mut self) -> Result<(), InputFault> {
        self.cascade(ButtonKind::Pressed, |r, s| r.pressed(s))
    }

    /// Cascade a press-began notification.
    pub fn try_press_began(&mut self) -> Result<(), InputFault> {
        self.cascade(ButtonKind::PressBegan, |r, s| r.press_began(s))
    }

    /// Cascade a press-ended notification.
    pub fn try_press_ended(&mut self) -> Result<(), InputFault> {
        self.cascade(ButtonKind::PressEnded, |r, s| r.press_ended(s))
    }

    /// Cascade the notification named by `kind`.
    pub fn dispatch_button(&mut self, kind: ButtonKind) -> Result<(), InputFault> {
        match kind {
            ButtonKind::Pressed => self.try_pressed(),
            ButtonKind::PressBegan => self.try_press_began(),
            ButtonKind::PressEnded => self.try_press_ended(),
        }
    }
}
