// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface registry: routes events to the chains attached to each surface.
//!
//! ## Overview
//!
//! [`Surfaces`] owns one [`SurfaceChains`] per registered surface: an input
//! receiver chain and a button activation chain, both bound to that surface.
//! It plays the window-manager role in front of the chains:
//!
//! - [`Surfaces::route`] delivers an event to exactly one chain root, the
//!   input chain of the event's target. Pointer down/up events also drive a
//!   [`PressTracker`], which fills [`PointerEvent::pressed_on`] on up events
//!   and fires the button chains.
//! - [`Surfaces::fan_out`] delivers one event to several candidate surfaces,
//!   retargeting the payload for each, and ORs the results.
//!
//! Events addressed to unregistered surfaces are reported as not handled.
//!
//! ## Activation order
//!
//! For a pointer-down on surface `s`: `s`'s input chain runs, the press is
//! recorded, then `s`'s button chain gets `press_began`.
//!
//! For a pointer-up: the input chain of the release target runs with
//! `pressed_on` filled in, then the button chain of the *pressed* surface gets
//! `press_ended`, followed by `pressed` if the release completed the press.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use understory_input_event::{InputEvent, PointerEvent};

use crate::activation::{Activation, PressTracker};
use crate::button::{ButtonChain, ButtonReceiver, DynButtonReceiver};
use crate::chain::Node;
use crate::fault::InputFault;
use crate::input::{DynInputReceiver, InputReceiver, ReceiverChain};

/// The chains attached to one surface.
///
/// Both chains stay bound to the surface they were created for. They can be
/// read and extended, but not rebound, while the surface is registered.
pub struct SurfaceChains<S> {
    input: ReceiverChain<S>,
    buttons: ButtonChain<S>,
}

impl<S: fmt::Debug> fmt::Debug for SurfaceChains<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceChains")
            .field("input", &self.input)
            .field("buttons", &self.buttons)
            .finish()
    }
}

impl<S: Copy + Eq> SurfaceChains<S> {
    /// Empty chains bound to `surface`.
    pub fn new(surface: S) -> Self {
        Self {
            input: ReceiverChain::bound_to(surface),
            buttons: ButtonChain::bound_to(surface),
        }
    }

    /// Pointer, keyboard, focus and drag-and-drop receivers.
    pub fn input(&self) -> &ReceiverChain<S> {
        &self.input
    }

    /// Button activation receivers.
    pub fn buttons(&self) -> &ButtonChain<S> {
        &self.buttons
    }

    /// Append an input receiver at the tail of the input chain.
    pub fn attach_input(&mut self, receiver: impl InputReceiver<S> + 'static) {
        self.input.attach_input(receiver);
    }

    /// Append a button receiver at the tail of the button chain.
    pub fn attach_button(&mut self, receiver: impl ButtonReceiver<S> + 'static) {
        self.buttons.attach_button(receiver);
    }

    /// Detach every input receiver, tail first.
    pub fn clear_input(&mut self) -> Vec<Node<S, DynInputReceiver<S>>> {
        self.input.clear()
    }

    /// Detach every button receiver, tail first.
    pub fn clear_buttons(&mut self) -> Vec<Node<S, DynButtonReceiver<S>>> {
        self.buttons.clear()
    }

    /// Split into the two chains.
    pub fn into_parts(self) -> (ReceiverChain<S>, ButtonChain<S>) {
        (self.input, self.buttons)
    }

    fn unbind(&mut self) {
        self.input.unbind();
        self.buttons.unbind();
    }
}

/// Registry of surfaces and their chains.
pub struct Surfaces<S> {
    chains: HashMap<S, SurfaceChains<S>>,
    presses: PressTracker<S>,
}

impl<S: fmt::Debug> fmt::Debug for Surfaces<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surfaces")
            .field("surfaces", &self.chains.len())
            .field("presses", &self.presses)
            .finish()
    }
}

impl<S: Copy + Eq + Hash> Default for Surfaces<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy + Eq + Hash> Surfaces<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            chains: HashMap::new(),
            presses: PressTracker::new(),
        }
    }

    /// Register `surface`, returning its chains.
    ///
    /// Registering an already known surface returns its existing chains.
    pub fn register(&mut self, surface: S) -> &mut SurfaceChains<S> {
        self.chains.entry(surface).or_insert_with(|| {
            log::debug!("registering surface");
            SurfaceChains::new(surface)
        })
    }

    /// Remove `surface` and return its chains, unbound.
    ///
    /// Any press still active on the surface is forgotten.
    pub fn remove(&mut self, surface: S) -> Option<SurfaceChains<S>> {
        let mut chains = self.chains.remove(&surface)?;
        chains.unbind();
        let cancelled = self.presses.cancel_on(surface);
        log::debug!("removed surface, cancelling {cancelled} active presses");
        Some(chains)
    }

    /// Whether `surface` is registered.
    pub fn contains(&self, surface: S) -> bool {
        self.chains.contains_key(&surface)
    }

    /// Number of registered surfaces.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Whether no surface is registered.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// The chains of `surface`, if registered.
    pub fn chains(&self, surface: S) -> Option<&SurfaceChains<S>> {
        self.chains.get(&surface)
    }

    /// The chains of `surface`, if registered.
    ///
    /// The chains remain bound to `surface`; only their receivers can change.
    pub fn chains_mut(&mut self, surface: S) -> Option<&mut SurfaceChains<S>> {
        self.chains.get_mut(&surface)
    }

    /// The press tracker driving button activation.
    pub fn presses(&self) -> &PressTracker<S> {
        &self.presses
    }

    /// Attach an input receiver to `surface`, registering it if needed.
    pub fn attach_input(&mut self, surface: S, receiver: impl InputReceiver<S> + 'static) {
        self.register(surface).attach_input(receiver);
    }

    /// Attach a button receiver to `surface`, registering it if needed.
    pub fn attach_button(&mut self, surface: S, receiver: impl ButtonReceiver<S> + 'static) {
        self.register(surface).attach_button(receiver);
    }

    /// Route `event` to its target surface.
    ///
    /// Returns whether any receiver handled it. Faults from any chain involved
    /// abort the routing and are returned as is.
    pub fn route(&mut self, event: &InputEvent<S>) -> Result<bool, InputFault> {
        match event {
            InputEvent::PointerDown(e) => self.route_down(e),
            InputEvent::PointerUp(e) => self.route_up(e),
            _ => self.dispatch_input(event),
        }
    }

    /// Deliver `event` to each of `candidates` in order, retargeted to each.
    ///
    /// Every candidate runs; the result is the OR of all of them. The first
    /// fault aborts the remaining candidates. Fan-out does not drive button
    /// activation.
    pub fn fan_out(&mut self, candidates: &[S], event: &InputEvent<S>) -> Result<bool, InputFault> {
        let mut handled = false;
        for &candidate in candidates {
            let retargeted = event.clone().with_target(candidate);
            handled |= self.dispatch_input(&retargeted)?;
        }
        Ok(handled)
    }

    fn dispatch_input(&mut self, event: &InputEvent<S>) -> Result<bool, InputFault> {
        let Some(chains) = self.chains.get_mut(event.target()) else {
            log::warn!("{:?} addressed to an unregistered surface", event.kind());
            return Ok(false);
        };
        chains.input.dispatch(event)
    }

    fn route_down(&mut self, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        let Some(chains) = self.chains.get_mut(&event.target) else {
            log::warn!("PointerDown addressed to an unregistered surface");
            return Ok(false);
        };
        let handled = chains.input.try_pointer_down(event)?;
        self.presses.on_down(event);
        chains.buttons.try_press_began()?;
        Ok(handled)
    }

    fn route_up(&mut self, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        let release = self.presses.on_up(event);
        let handled = match self.chains.get_mut(&event.target) {
            Some(chains) => chains.input.try_pointer_up(&release.event)?,
            None => {
                log::warn!("PointerUp addressed to an unregistered surface");
                false
            }
        };
        let (pressed_on, completed) = match release.activation {
            Activation::Pressed(s) => (s, true),
            Activation::Ended(s) => (s, false),
            Activation::Unpaired => return Ok(handled),
        };
        if let Some(chains) = self.chains.get_mut(&pressed_on) {
            chains.buttons.try_press_ended()?;
            if completed {
                chains.buttons.try_pressed()?;
            }
        }
        Ok(handled)
    }
}
