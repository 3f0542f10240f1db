// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input receiver chain: pointer, keyboard, focus and drag-and-drop.
//!
//! ## Receivers
//!
//! Implement [`InputReceiver`] and override only the notifications you care
//! about. Every method defaults to a no-op that reports "not handled".
//! [`InputReceiver::interests`] declares which kinds a receiver handles; the
//! chain skips receivers outside that set and counts them as "not handled"
//! without calling them.
//!
//! ## Dispatch
//!
//! [`ReceiverChain`] exposes one `try_*` entry point per notification kind:
//!
//! - Boolean kinds (pointer, keyboard, scroll, drag-and-drop) return the OR of
//!   every receiver's answer. All receivers run, even after one claimed the
//!   event.
//! - Void kinds (enter, exit, window focus) cascade through every receiver.
//! - Receivers run most recently attached first; the first attached receiver
//!   runs last.
//! - A fault aborts the dispatch; receivers that have not run yet are skipped.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_input_event::PointerEvent;
//! use understory_receiver::fault::InputFault;
//! use understory_receiver::input::{InputReceiver, ReceiverChain};
//!
//! struct Base;
//! impl InputReceiver<u32> for Base {}
//!
//! struct Overlay;
//! impl InputReceiver<u32> for Overlay {
//!     fn pointer_down(&mut self, _surface: u32, _event: &PointerEvent<u32>) -> Result<bool, InputFault> {
//!         Ok(true)
//!     }
//! }
//!
//! let mut chain = ReceiverChain::bound_to(1_u32);
//! chain.attach_input(Base);
//! chain.attach_input(Overlay);
//!
//! let down = PointerEvent::new(1, Point::new(5.0, 5.0), 0, 0);
//! assert_eq!(chain.try_pointer_down(&down), Ok(true));
//! ```

use alloc::boxed::Box;

use understory_input_event::{
    CrossingEvent, DropEvent, EventKind, EventKinds, FocusEvent, InputEvent, KeyEvent,
    PointerEvent, ScrollEvent, TypedEvent,
};

use crate::chain::Chain;
use crate::fault::InputFault;

/// An observer of input notifications on one surface.
///
/// Every handler receives the surface the receiver is bound to and the event
/// payload.
pub trait InputReceiver<S> {
    /// The notification kinds this receiver handles.
    ///
    /// Defaults to every kind.
    fn interests(&self) -> EventKinds {
        EventKinds::all()
    }

    /// A pointer was pressed.
    fn pointer_down(&mut self, _surface: S, _event: &PointerEvent<S>) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// A pointer was released.
    fn pointer_up(&mut self, _surface: S, _event: &PointerEvent<S>) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// A pointer moved with no button held.
    fn pointer_moved(&mut self, _surface: S, _event: &PointerEvent<S>) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// A pointer moved with a button held.
    fn pointer_dragged(
        &mut self,
        _surface: S,
        _event: &PointerEvent<S>,
    ) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// A drag gesture ended.
    fn drag_release(&mut self, _surface: S, _event: &PointerEvent<S>) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// A wheel or trackpad scroll.
    fn scroll(&mut self, _surface: S, _event: &ScrollEvent<S>) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// The pointer entered the surface.
    fn enter(&mut self, _surface: S, _event: &CrossingEvent<S>) -> Result<(), InputFault> {
        Ok(())
    }

    /// The pointer left the surface.
    fn exit(&mut self, _surface: S, _event: &CrossingEvent<S>) -> Result<(), InputFault> {
        Ok(())
    }

    /// Another surface was dropped onto this one.
    fn drag_and_drop(&mut self, _surface: S, _event: &DropEvent<S>) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// A key was pressed.
    fn key_down(&mut self, _surface: S, _event: &KeyEvent<S>) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// A key was released.
    fn key_up(&mut self, _surface: S, _event: &KeyEvent<S>) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// A character was typed.
    fn key_typed(&mut self, _surface: S, _event: &TypedEvent<S>) -> Result<bool, InputFault> {
        Ok(false)
    }

    /// The surface's window gained focus.
    fn gain_focus(&mut self, _surface: S, _event: &FocusEvent<S>) -> Result<(), InputFault> {
        Ok(())
    }

    /// The surface's window lost focus.
    fn lost_focus(&mut self, _surface: S, _event: &FocusEvent<S>) -> Result<(), InputFault> {
        Ok(())
    }
}

/// Trait-object form of an [`InputReceiver`], as stored in a [`ReceiverChain`].
pub type DynInputReceiver<S> = dyn InputReceiver<S>;

/// A chain of [`InputReceiver`]s bound to one surface.
pub type ReceiverChain<S> = Chain<S, DynInputReceiver<S>>;

impl<S: Copy + Eq> Chain<S, DynInputReceiver<S>> {
    /// Append `receiver` at the tail.
    pub fn attach_input(&mut self, receiver: impl InputReceiver<S> + 'static) {
        self.attach_receiver(Box::new(receiver));
    }

    /// Builder form of [`attach_input`](Self::attach_input).
    #[must_use]
    pub fn with_input(mut self, receiver: impl InputReceiver<S> + 'static) -> Self {
        self.attach_input(receiver);
        self
    }

    /// Dispatch a pointer-down notification.
    pub fn try_pointer_down(&mut self, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::PointerDown, |r, s| r.pointer_down(s, event))
    }

    /// Dispatch a pointer-up notification.
    pub fn try_pointer_up(&mut self, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::PointerUp, |r, s| r.pointer_up(s, event))
    }

    /// Dispatch a pointer-moved notification.
    pub fn try_pointer_moved(&mut self, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::PointerMoved, |r, s| r.pointer_moved(s, event))
    }

    /// Dispatch a pointer-dragged notification.
    pub fn try_pointer_dragged(&mut self, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::PointerDragged, |r, s| {
            r.pointer_dragged(s, event)
        })
    }

    /// Dispatch a drag-release notification.
    pub fn try_drag_release(&mut self, event: &PointerEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::DragRelease, |r, s| r.drag_release(s, event))
    }

    /// Dispatch a scroll notification.
    pub fn try_scroll(&mut self, event: &ScrollEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::Scroll, |r, s| r.scroll(s, event))
    }

    /// Dispatch a pointer-enter notification.
    pub fn try_enter(&mut self, event: &CrossingEvent<S>) -> Result<(), InputFault> {
        self.cascade_interested(EventKind::Enter, |r, s| r.enter(s, event))
    }

    /// Dispatch a pointer-exit notification.
    pub fn try_exit(&mut self, event: &CrossingEvent<S>) -> Result<(), InputFault> {
        self.cascade_interested(EventKind::Exit, |r, s| r.exit(s, event))
    }

    /// Dispatch a drag-and-drop notification.
    pub fn try_drag_and_drop(&mut self, event: &DropEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::DragAndDrop, |r, s| r.drag_and_drop(s, event))
    }

    /// Dispatch a key-down notification.
    pub fn try_key_down(&mut self, event: &KeyEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::KeyDown, |r, s| r.key_down(s, event))
    }

    /// Dispatch a key-up notification.
    pub fn try_key_up(&mut self, event: &KeyEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::KeyUp, |r, s| r.key_up(s, event))
    }

    /// Dispatch a key-typed notification.
    pub fn try_key_typed(&mut self, event: &TypedEvent<S>) -> Result<bool, InputFault> {
        self.fold_interested(EventKind::KeyTyped, |r, s| r.key_typed(s, event))
    }

    /// Dispatch a window gain-focus notification.
    pub fn try_gain_focus(&mut self, event: &FocusEvent<S>) -> Result<(), InputFault> {
        self.cascade_interested(EventKind::WindowGainFocus, |r, s| r.gain_focus(s, event))
    }

    /// Dispatch a window lost-focus notification.
    pub fn try_lost_focus(&mut self, event: &FocusEvent<S>) -> Result<(), InputFault> {
        self.cascade_interested(EventKind::WindowLostFocus, |r, s| r.lost_focus(s, event))
    }

    /// Dispatch any event through the matching `try_*` entry point.
    ///
    /// Void kinds report `false`.
    pub fn dispatch(&mut self, event: &InputEvent<S>) -> Result<bool, InputFault> {
        match event {
            InputEvent::PointerDown(e) => self.try_pointer_down(e),
            InputEvent::PointerUp(e) => self.try_pointer_up(e),
            InputEvent::PointerMoved(e) => self.try_pointer_moved(e),
            InputEvent::PointerDragged(e) => self.try_pointer_dragged(e),
            InputEvent::DragRelease(e) => self.try_drag_release(e),
            InputEvent::DragAndDrop(e) => self.try_drag_and_drop(e),
            InputEvent::Scroll(e) => self.try_scroll(e),
            InputEvent::Enter(e) => self.try_enter(e).map(|()| false),
            InputEvent::Exit(e) => self.try_exit(e).map(|()| false),
            InputEvent::WindowGainFocus(e) => self.try_gain_focus(e).map(|()| false),
            InputEvent::WindowLostFocus(e) => self.try_lost_focus(e).map(|()| false),
            InputEvent::KeyDown(e) => self.try_key_down(e),
            InputEvent::KeyUp(e) => self.try_key_up(e),
            InputEvent::KeyTyped(e) => self.try_key_typed(e),
        }
    }

    fn fold_interested(
        &mut self,
        kind: EventKind,
        mut f: impl FnMut(&mut DynInputReceiver<S>, S) -> Result<bool, InputFault>,
    ) -> Result<bool, InputFault> {
        self.fold_handled(kind, |r, s| {
            if r.interests().has(kind) {
                f(r, s)
            } else {
                Ok(false)
            }
        })
    }

    fn cascade_interested(
        &mut self,
        kind: EventKind,
        mut f: impl FnMut(&mut DynInputReceiver<S>, S) -> Result<(), InputFault>,
    ) -> Result<(), InputFault> {
        self.cascade(kind, |r, s| {
            if r.interests().has(kind) {
                f(r, s)
            } else {
                Ok(())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::{Point, Vec2};
    use understory_input_event::KeyCode;

    type Log = Rc<RefCell<Vec<(&'static str, EventKind)>>>;

    /// Records every call and answers boolean kinds with a fixed value.
    struct Recorder {
        name: &'static str,
        answer: bool,
        log: Log,
    }

    impl Recorder {
        fn new(name: &'static str, answer: bool, log: &Log) -> Self {
            Self {
                name,
                answer,
                log: log.clone(),
            }
        }

        fn hit(&self, kind: EventKind) -> Result<bool, InputFault> {
            self.log.borrow_mut().push((self.name, kind));
            Ok(self.answer)
        }
    }

    impl InputReceiver<u32> for Recorder {
        fn pointer_down(&mut self, _: u32, _: &PointerEvent<u32>) -> Result<bool, InputFault> {
            self.hit(EventKind::PointerDown)
        }
        fn pointer_up(&mut self, _: u32, _: &PointerEvent<u32>) -> Result<bool, InputFault> {
            self.hit(EventKind::PointerUp)
        }
        fn scroll(&mut self, _: u32, _: &ScrollEvent<u32>) -> Result<bool, InputFault> {
            self.hit(EventKind::Scroll)
        }
        fn enter(&mut self, _: u32, _: &CrossingEvent<u32>) -> Result<(), InputFault> {
            self.hit(EventKind::Enter).map(|_| ())
        }
        fn key_down(&mut self, _: u32, _: &KeyEvent<u32>) -> Result<bool, InputFault> {
            self.hit(EventKind::KeyDown)
        }
        fn gain_focus(&mut self, _: u32, _: &FocusEvent<u32>) -> Result<(), InputFault> {
            self.hit(EventKind::WindowGainFocus).map(|_| ())
        }
    }

    struct Faulty;
    impl InputReceiver<u32> for Faulty {
        fn key_down(&mut self, _: u32, ev: &KeyEvent<u32>) -> Result<bool, InputFault> {
            Err(InputFault::rejected(
                EventKind::KeyDown,
                alloc::format!("unexpected key {:?}", ev.key),
            ))
        }
    }

    fn down() -> PointerEvent<u32> {
        PointerEvent::new(1, Point::new(5.0, 5.0), 0, 0)
    }

    fn names(log: &Log) -> Vec<&'static str> {
        log.borrow().iter().map(|(n, _)| *n).collect()
    }

    #[test]
    fn default_receiver_reports_not_handled() {
        struct Nothing;
        impl InputReceiver<u32> for Nothing {}

        let mut chain = ReceiverChain::bound_to(1).with_input(Nothing);
        assert_eq!(chain.try_pointer_down(&down()), Ok(false));
        assert_eq!(chain.try_key_typed(&TypedEvent::new(1, 'a')), Ok(false));
        assert_eq!(
            chain.try_drag_and_drop(&DropEvent::new(1, Point::ZERO, 2)),
            Ok(false)
        );
        assert_eq!(chain.try_exit(&CrossingEvent::new(1, Point::ZERO, 0)), Ok(()));
    }

    #[test]
    fn tail_claim_marks_dispatch_handled() {
        // Chain [A, B]: A keeps the default, B claims pointer-down.
        struct A;
        impl InputReceiver<u32> for A {}
        struct B;
        impl InputReceiver<u32> for B {
            fn pointer_down(&mut self, _: u32, _: &PointerEvent<u32>) -> Result<bool, InputFault> {
                Ok(true)
            }
        }

        let mut chain = ReceiverChain::bound_to(1);
        chain.attach_input(A);
        chain.attach_input(B);
        assert_eq!(chain.try_pointer_down(&down()), Ok(true));
    }

    #[test]
    fn boolean_result_is_or_of_every_receiver() {
        for mask in 0_u8..16 {
            let log = Log::default();
            let mut chain = ReceiverChain::bound_to(1);
            for (i, name) in ["a", "b", "c", "d"].into_iter().enumerate() {
                chain.attach_input(Recorder::new(name, mask & (1 << i) != 0, &log));
            }
            let handled = chain.try_pointer_up(&down()).unwrap();
            assert_eq!(handled, mask != 0, "mask {mask}");
            assert_eq!(log.borrow().len(), 4, "no short-circuit for mask {mask}");
        }
    }

    #[test]
    fn void_cascade_runs_each_receiver_once_tail_first() {
        let log = Log::default();
        let mut chain = ReceiverChain::bound_to(1);
        chain.attach_input(Recorder::new("a", true, &log));
        chain.attach_input(Recorder::new("b", true, &log));
        chain.attach_input(Recorder::new("c", true, &log));

        chain
            .try_enter(&CrossingEvent::new(1, Point::new(2.0, 2.0), 0))
            .unwrap();
        assert_eq!(names(&log), vec!["c", "b", "a"]);
    }

    #[test]
    fn detaching_the_tail_drops_the_first_to_run() {
        let log = Log::default();
        let mut chain = ReceiverChain::bound_to(1);
        for name in ["a", "b", "c"] {
            chain.attach_input(Recorder::new(name, false, &log));
        }
        let scroll = ScrollEvent::new(1, Point::ZERO, Vec2::new(0.0, 1.0));

        chain.try_scroll(&scroll).unwrap();
        assert_eq!(names(&log), vec!["c", "b", "a"]);

        // The tail is the last receiver attached.
        log.borrow_mut().clear();
        assert!(chain.detach_tail().is_some());
        chain.try_scroll(&scroll).unwrap();
        assert_eq!(names(&log), vec!["b", "a"]);
    }

    #[test]
    fn fault_skips_receivers_closer_to_the_head() {
        let log = Log::default();
        let mut chain = ReceiverChain::bound_to(1);
        chain.attach_input(Recorder::new("head", true, &log));
        chain.attach_input(Faulty);
        chain.attach_input(Recorder::new("tail", true, &log));

        let res = chain.try_key_down(&KeyEvent::new(1, KeyCode(27)));
        let err = res.unwrap_err();
        assert_eq!(err.notification(), EventKind::KeyDown);
        // The tail ran before the fault; the head never did.
        assert_eq!(names(&log), vec!["tail"]);
    }

    #[test]
    fn fault_at_tail_stops_everything() {
        let log = Log::default();
        let mut chain = ReceiverChain::bound_to(1);
        chain.attach_input(Recorder::new("a", false, &log));
        chain.attach_input(Recorder::new("b", false, &log));
        chain.attach_input(Faulty);

        assert!(chain.try_key_down(&KeyEvent::new(1, KeyCode(1))).is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn uninterested_receivers_are_skipped() {
        struct KeysOnly {
            log: Log,
        }
        impl InputReceiver<u32> for KeysOnly {
            fn interests(&self) -> EventKinds {
                EventKinds::KEYBOARD
            }
            fn pointer_down(&mut self, _: u32, _: &PointerEvent<u32>) -> Result<bool, InputFault> {
                self.log.borrow_mut().push(("keys", EventKind::PointerDown));
                Ok(true)
            }
            fn key_down(&mut self, _: u32, _: &KeyEvent<u32>) -> Result<bool, InputFault> {
                self.log.borrow_mut().push(("keys", EventKind::KeyDown));
                Ok(true)
            }
        }

        let log = Log::default();
        let mut chain = ReceiverChain::bound_to(1).with_input(KeysOnly { log: log.clone() });
        assert_eq!(chain.try_pointer_down(&down()), Ok(false));
        assert_eq!(chain.try_key_down(&KeyEvent::new(1, KeyCode(4))), Ok(true));
        assert_eq!(*log.borrow(), vec![("keys", EventKind::KeyDown)]);
    }

    #[test]
    fn dispatch_routes_by_kind() {
        let log = Log::default();
        let mut chain = ReceiverChain::bound_to(1).with_input(Recorder::new("r", true, &log));

        assert_eq!(chain.dispatch(&InputEvent::PointerDown(down())), Ok(true));
        assert_eq!(
            chain.dispatch(&InputEvent::WindowGainFocus(FocusEvent::new(1))),
            Ok(false)
        );
        assert_eq!(
            chain.dispatch(&InputEvent::KeyDown(KeyEvent::new(1, KeyCode(3)))),
            Ok(true)
        );
        let kinds: Vec<EventKind> = log.borrow().iter().map(|(_, k)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::PointerDown,
                EventKind::WindowGainFocus,
                EventKind::KeyDown
            ]
        );
    }

    fn record<E: 'static>(
        log: &Rc<RefCell<Vec<EventKind>>>,
        kind: EventKind,
    ) -> impl FnMut(u32, &E) -> Result<bool, InputFault> + 'static {
        let log = log.clone();
        move |_, _| {
            log.borrow_mut().push(kind);
            Ok(true)
        }
    }

    fn record_void<E: 'static>(
        log: &Rc<RefCell<Vec<EventKind>>>,
        kind: EventKind,
    ) -> impl FnMut(u32, &E) -> Result<(), InputFault> + 'static {
        let log = log.clone();
        move |_, _| {
            log.borrow_mut().push(kind);
            Ok(())
        }
    }

    #[test]
    fn dispatch_reaches_the_matching_slot_for_every_kind() {
        use crate::listener::Listener;

        let log = Rc::new(RefCell::new(Vec::new()));
        let listener = Listener::new()
            .on_pointer_down(record(&log, EventKind::PointerDown))
            .on_pointer_up(record(&log, EventKind::PointerUp))
            .on_pointer_moved(record(&log, EventKind::PointerMoved))
            .on_pointer_dragged(record(&log, EventKind::PointerDragged))
            .on_drag_release(record(&log, EventKind::DragRelease))
            .on_drag_and_drop(record(&log, EventKind::DragAndDrop))
            .on_scroll(record(&log, EventKind::Scroll))
            .on_enter(record_void(&log, EventKind::Enter))
            .on_exit(record_void(&log, EventKind::Exit))
            .on_gain_focus(record_void(&log, EventKind::WindowGainFocus))
            .on_lost_focus(record_void(&log, EventKind::WindowLostFocus))
            .on_key_down(record(&log, EventKind::KeyDown))
            .on_key_up(record(&log, EventKind::KeyUp))
            .on_key_typed(record(&log, EventKind::KeyTyped));
        assert_eq!(listener.interests(), EventKinds::all());
        let mut chain = ReceiverChain::bound_to(1).with_input(listener);

        let at = Point::new(1.0, 2.0);
        let events = [
            InputEvent::PointerDown(PointerEvent::new(1, at, 0, 0)),
            InputEvent::PointerUp(PointerEvent::new(1, at, 0, 0)),
            InputEvent::PointerMoved(PointerEvent::new(1, at, 0, 0)),
            InputEvent::PointerDragged(PointerEvent::new(1, at, 0, 0)),
            InputEvent::DragRelease(PointerEvent::new(1, at, 0, 0)),
            InputEvent::DragAndDrop(DropEvent::new(1, at, 2)),
            InputEvent::Scroll(ScrollEvent::new(1, at, Vec2::new(0.0, 1.0))),
            InputEvent::Enter(CrossingEvent::new(1, at, 0)),
            InputEvent::Exit(CrossingEvent::new(1, at, 0)),
            InputEvent::WindowGainFocus(FocusEvent::new(1)),
            InputEvent::WindowLostFocus(FocusEvent::new(1)),
            InputEvent::KeyDown(KeyEvent::new(1, KeyCode(1))),
            InputEvent::KeyUp(KeyEvent::new(1, KeyCode(1))),
            InputEvent::KeyTyped(TypedEvent::new(1, 'x')),
        ];
        for event in &events {
            let kind = event.kind();
            log.borrow_mut().clear();
            assert_eq!(chain.dispatch(event), Ok(kind.is_boolean()), "{kind:?}");
            assert_eq!(*log.borrow(), vec![kind], "{kind:?}");
        }
        let kinds: Vec<EventKind> = events.iter().map(InputEvent::kind).collect();
        assert_eq!(kinds, EventKind::ALL.to_vec());
    }

    #[test]
    fn handlers_see_bound_surface() {
        struct SeeSurface(Rc<RefCell<Vec<u32>>>);
        impl InputReceiver<u32> for SeeSurface {
            fn gain_focus(&mut self, surface: u32, _: &FocusEvent<u32>) -> Result<(), InputFault> {
                self.0.borrow_mut().push(surface);
                Ok(())
            }
        }
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut chain = ReceiverChain::bound_to(42).with_input(SeeSurface(seen.clone()));
        chain.try_gain_focus(&FocusEvent::new(42)).unwrap();
        assert_eq!(*seen.borrow(), vec![42]);
    }

    #[test]
    fn cleared_chain_handles_nothing() {
        let log = Log::default();
        let mut chain = ReceiverChain::bound_to(1);
        chain.attach_input(Recorder::new("a", true, &log));
        chain.attach_input(Recorder::new("b", true, &log));
        let released = chain.clear();
        assert_eq!(released.len(), 2);
        assert!(released.iter().all(|n| n.surface().is_none()));
        assert_eq!(chain.try_pointer_down(&down()), Ok(false));
        assert!(log.borrow().is_empty());
    }
}
