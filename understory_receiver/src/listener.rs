// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closure-based receivers.
//!
//! [`Listener`] and [`ButtonListener`] are receivers assembled from optional
//! callback slots. Unset slots fall back to the no-op default, and a
//! [`Listener`]'s [`interests`](InputReceiver::interests) is exactly the set of
//! kinds with a slot, so the chain never calls it for anything else.
//!
//! ```
//! use kurbo::Point;
//! use understory_input_event::{EventKinds, PointerEvent};
//! use understory_receiver::input::{InputReceiver, ReceiverChain};
//! use understory_receiver::listener::Listener;
//!
//! let listener = Listener::new().on_pointer_down(|_surface, ev: &PointerEvent<u32>| {
//!     Ok(ev.button == 0)
//! });
//! assert_eq!(listener.interests(), EventKinds::POINTER_DOWN);
//!
//! let mut chain = ReceiverChain::bound_to(1_u32).with_input(listener);
//! assert_eq!(chain.try_pointer_down(&PointerEvent::new(1, Point::ZERO, 0, 0)), Ok(true));
//! assert_eq!(chain.try_pointer_down(&PointerEvent::new(1, Point::ZERO, 0, 1)), Ok(false));
//! ```

use alloc::boxed::Box;
use core::fmt;

use understory_input_event::{
    CrossingEvent, DropEvent, EventKinds, FocusEvent, KeyEvent, PointerEvent, ScrollEvent,
    TypedEvent,
};

use crate::button::ButtonReceiver;
use crate::fault::InputFault;
use crate::input::InputReceiver;

type Slot<S, E, T> = Option<Box<dyn FnMut(S, &E) -> Result<T, InputFault>>>;

fn call<S, E, T: Default>(slot: &mut Slot<S, E, T>, surface: S, event: &E) -> Result<T, InputFault> {
    match slot {
        Some(f) => f(surface, event),
        None => Ok(T::default()),
    }
}

/// An [`InputReceiver`] built from optional callbacks.
pub struct Listener<S> {
    pointer_down: Slot<S, PointerEvent<S>, bool>,
    pointer_up: Slot<S, PointerEvent<S>, bool>,
    pointer_moved: Slot<S, PointerEvent<S>, bool>,
    pointer_dragged: Slot<S, PointerEvent<S>, bool>,
    drag_release: Slot<S, PointerEvent<S>, bool>,
    scroll: Slot<S, ScrollEvent<S>, bool>,
    enter: Slot<S, CrossingEvent<S>, ()>,
    exit: Slot<S, CrossingEvent<S>, ()>,
    drag_and_drop: Slot<S, DropEvent<S>, bool>,
    key_down: Slot<S, KeyEvent<S>, bool>,
    key_up: Slot<S, KeyEvent<S>, bool>,
    key_typed: Slot<S, TypedEvent<S>, bool>,
    gain_focus: Slot<S, FocusEvent<S>, ()>,
    lost_focus: Slot<S, FocusEvent<S>, ()>,
    interests: EventKinds,
}

impl<S> fmt::Debug for Listener<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("interests", &self.interests)
            .finish_non_exhaustive()
    }
}

impl<S> Default for Listener<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Listener<S> {
    /// Create a listener with every slot empty.
    pub fn new() -> Self {
        Self {
            pointer_down: None,
            pointer_up: None,
            pointer_moved: None,
            pointer_dragged: None,
            drag_release: None,
            scroll: None,
            enter: None,
            exit: None,
            drag_and_drop: None,
            key_down: None,
            key_up: None,
            key_typed: None,
            gain_focus: None,
            lost_focus: None,
            interests: EventKinds::empty(),
        }
    }

    /// Handle pointer-down.
    #[must_use]
    pub fn on_pointer_down(
        mut self,
        f: impl FnMut(S, &PointerEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.pointer_down = Some(Box::new(f));
        self.interests |= EventKinds::POINTER_DOWN;
        self
    }

    /// Handle pointer-up.
    #[must_use]
    pub fn on_pointer_up(
        mut self,
        f: impl FnMut(S, &PointerEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.pointer_up = Some(Box::new(f));
        self.interests |= EventKinds::POINTER_UP;
        self
    }

    /// Handle pointer-moved.
    #[must_use]
    pub fn on_pointer_moved(
        mut self,
        f: impl FnMut(S, &PointerEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.pointer_moved = Some(Box::new(f));
        self.interests |= EventKinds::POINTER_MOVED;
        self
    }

    /// Handle pointer-dragged.
    #[must_use]
    pub fn on_pointer_dragged(
        mut self,
        f: impl FnMut(S, &PointerEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.pointer_dragged = Some(Box::new(f));
        self.interests |= EventKinds::POINTER_DRAGGED;
        self
    }

    /// Handle drag-release.
    #[must_use]
    pub fn on_drag_release(
        mut self,
        f: impl FnMut(S, &PointerEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.drag_release = Some(Box::new(f));
        self.interests |= EventKinds::DRAG_RELEASE;
        self
    }

    /// Handle scroll.
    #[must_use]
    pub fn on_scroll(
        mut self,
        f: impl FnMut(S, &ScrollEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.scroll = Some(Box::new(f));
        self.interests |= EventKinds::SCROLL;
        self
    }

    /// Handle pointer-enter.
    #[must_use]
    pub fn on_enter(
        mut self,
        f: impl FnMut(S, &CrossingEvent<S>) -> Result<(), InputFault> + 'static,
    ) -> Self {
        self.enter = Some(Box::new(f));
        self.interests |= EventKinds::ENTER;
        self
    }

    /// Handle pointer-exit.
    #[must_use]
    pub fn on_exit(
        mut self,
        f: impl FnMut(S, &CrossingEvent<S>) -> Result<(), InputFault> + 'static,
    ) -> Self {
        self.exit = Some(Box::new(f));
        self.interests |= EventKinds::EXIT;
        self
    }

    /// Handle drag-and-drop.
    #[must_use]
    pub fn on_drag_and_drop(
        mut self,
        f: impl FnMut(S, &DropEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.drag_and_drop = Some(Box::new(f));
        self.interests |= EventKinds::DRAG_AND_DROP;
        self
    }

    /// Handle key-down.
    #[must_use]
    pub fn on_key_down(
        mut self,
        f: impl FnMut(S, &KeyEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.key_down = Some(Box::new(f));
        self.interests |= EventKinds::KEY_DOWN;
        self
    }

    /// Handle key-up.
    #[must_use]
    pub fn on_key_up(
        mut self,
        f: impl FnMut(S, &KeyEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.key_up = Some(Box::new(f));
        self.interests |= EventKinds::KEY_UP;
        self
    }

    /// Handle key-typed.
    #[must_use]
    pub fn on_key_typed(
        mut self,
        f: impl FnMut(S, &TypedEvent<S>) -> Result<bool, InputFault> + 'static,
    ) -> Self {
        self.key_typed = Some(Box::new(f));
        self.interests |= EventKinds::KEY_TYPED;
        self
    }

    /// Handle window gain-focus.
    #[must_use]
    pub fn on_gain_focus(
        mut self,
        f: impl FnMut(S, &FocusEvent<S>) -> Result<(), InputFault> + 'static,
    ) -> Self {
        self.gain_focus = Some(Box::new(f));
        self.interests |= EventKinds::WINDOW_GAIN_FOCUS;
        self
    }

    /// Handle window lost-focus.
    #[must_use]
    pub fn on_lost_focus(
        mut self,
        f: impl FnMut(S, &FocusEvent<S>) -> Result<(), InputFault> + 'static,
    ) -> Self {
        self.lost_focus = Some(Box::new(f));
        self.interests |= EventKinds::WINDOW_LOST_FOCUS;
        self
    }
}

impl<S> InputReceiver<S> for Listener<S> {
    fn interests(&self) -> EventKinds {
        self.interests
    }

    fn pointer_down(&mut self, surface: S, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.pointer_down, surface, event)
    }

    fn pointer_up(&mut self, surface: S, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.pointer_up, surface, event)
    }

    fn pointer_moved(&mut self, surface: S, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.pointer_moved, surface, event)
    }

    fn pointer_dragged(&mut self, surface: S, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.pointer_dragged, surface, event)
    }

    fn drag_release(&mut self, surface: S, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.drag_release, surface, event)
    }

    fn scroll(&mut self, surface: S, event: &ScrollEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.scroll, surface, event)
    }

    fn enter(&mut self, surface: S, event: &CrossingEvent<S>) -> Result<(), InputFault> {
        call(&mut self.enter, surface, event)
    }

    fn exit(&mut self, surface: S, event: &CrossingEvent<S>) -> Result<(), InputFault> {
        call(&mut self.exit, surface, event)
    }

    fn drag_and_drop(&mut self, surface: S, event: &DropEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.drag_and_drop, surface, event)
    }

    fn key_down(&mut self, surface: S, event: &KeyEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.key_down, surface, event)
    }

    fn key_up(&mut self, surface: S, event: &KeyEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.key_up, surface, event)
    }

    fn key_typed(&mut self, surface: S, event: &TypedEvent<S>) -> Result<bool, InputFault> {
        call(&mut self.key_typed, surface, event)
    }

    fn gain_focus(&mut self, surface: S, event: &FocusEvent<S>) -> Result<(), InputFault> {
        call(&mut self.gain_focus, surface, event)
    }

    fn lost_focus(&mut self, surface: S, event: &FocusEvent<S>) -> Result<(), InputFault> {
        call(&mut self.lost_focus, surface, event)
    }
}

type ButtonSlot<S> = Option<Box<dyn FnMut(S) -> Result<(), InputFault>>>;

/// A [`ButtonReceiver`] built from optional callbacks.
pub struct ButtonListener<S> {
    pressed: ButtonSlot<S>,
    press_began: ButtonSlot<S>,
    press_ended: ButtonSlot<S>,
}

impl<S> fmt::Debug for ButtonListener<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonListener")
            .field("pressed", &self.pressed.is_some())
            .field("press_began", &self.press_began.is_some())
            .field("press_ended", &self.press_ended.is_some())
            .finish()
    }
}

impl<S> Default for ButtonListener<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ButtonListener<S> {
    /// Create a listener with every slot empty.
    pub fn new() -> Self {
        Self {
            pressed: None,
            press_began: None,
            press_ended: None,
        }
    }

    /// Handle a completed press.
    #[must_use]
    pub fn on_pressed(mut self, f: impl FnMut(S) -> Result<(), InputFault> + 'static) -> Self {
        self.pressed = Some(Box::new(f));
        self
    }

    /// Handle the start of a press.
    #[must_use]
    pub fn on_press_began(mut self, f: impl FnMut(S) -> Result<(), InputFault> + 'static) -> Self {
        self.press_began = Some(Box::new(f));
        self
    }

    /// Handle the end of a press.
    #[must_use]
    pub fn on_press_ended(mut self, f: impl FnMut(S) -> Result<(), InputFault> + 'static) -> Self {
        self.press_ended = Some(Box::new(f));
        self
    }
}

impl<S> ButtonReceiver<S> for ButtonListener<S> {
    fn pressed(&mut self, surface: S) -> Result<(), InputFault> {
        self.pressed.as_mut().map_or(Ok(()), |f| f(surface))
    }

    fn press_began(&mut self, surface: S) -> Result<(), InputFault> {
        self.press_began.as_mut().map_or(Ok(()), |f| f(surface))
    }

    fn press_ended(&mut self, surface: S) -> Result<(), InputFault> {
        self.press_ended.as_mut().map_or(Ok(()), |f| f(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonChain;
    use crate::input::ReceiverChain;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Point;
    use understory_input_event::{EventKind, KeyCode};

    #[test]
    fn interests_track_set_slots() {
        let l: Listener<u32> = Listener::new();
        assert!(l.interests().is_empty());

        let l = Listener::<u32>::new()
            .on_key_down(|_, _| Ok(true))
            .on_enter(|_, _| Ok(()))
            .on_lost_focus(|_, _| Ok(()));
        assert_eq!(
            l.interests(),
            EventKinds::KEY_DOWN | EventKinds::ENTER | EventKinds::WINDOW_LOST_FOCUS
        );
    }

    #[test]
    fn empty_slots_answer_with_the_default() {
        let mut l = Listener::<u32>::new().on_key_down(|_, _| Ok(true));
        let key = KeyEvent::new(1, KeyCode(1));
        assert_eq!(l.key_down(1, &key), Ok(true));
        assert_eq!(l.key_up(1, &key), Ok(false));
        assert_eq!(l.exit(1, &CrossingEvent::new(1, Point::ZERO, 0)), Ok(()));
    }

    #[test]
    fn listeners_compose_in_a_chain() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let a = {
            let hits = hits.clone();
            Listener::new().on_scroll(move |s: u32, _: &ScrollEvent<u32>| {
                hits.borrow_mut().push(("a", s));
                Ok(false)
            })
        };
        let b = {
            let hits = hits.clone();
            Listener::new().on_scroll(move |s: u32, _: &ScrollEvent<u32>| {
                hits.borrow_mut().push(("b", s));
                Ok(true)
            })
        };
        let mut chain = ReceiverChain::bound_to(5).with_input(a).with_input(b);
        let ev = ScrollEvent::new(5, Point::ZERO, kurbo::Vec2::new(0.0, 2.0));
        assert_eq!(chain.try_scroll(&ev), Ok(true));
        assert_eq!(*hits.borrow(), vec![("b", 5), ("a", 5)]);
    }

    #[test]
    fn slot_faults_propagate() {
        let mut chain = ReceiverChain::bound_to(1_u32).with_input(
            Listener::new().on_key_typed(|_, ev: &TypedEvent<u32>| {
                Err(InputFault::rejected(
                    EventKind::KeyTyped,
                    alloc::format!("cannot type {:?}", ev.character),
                ))
            }),
        );
        let err = chain.try_key_typed(&TypedEvent::new(1, 'q')).unwrap_err();
        assert_eq!(err.notification(), EventKind::KeyTyped);
    }

    #[test]
    fn button_listener_counts_presses() {
        let presses = Rc::new(Cell::new(0_u32));
        let counter = presses.clone();
        let mut chain = ButtonChain::bound_to(1_u32).with_button(
            ButtonListener::new().on_pressed(move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            }),
        );
        chain.try_pressed().unwrap();
        chain.try_press_began().unwrap();
        chain.try_pressed().unwrap();
        assert_eq!(presses.get(), 2);
    }
}
