// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of input events.

use kurbo::Point;

use crate::kind::EventKind;
use crate::payload::{
    CrossingEvent, DropEvent, FocusEvent, KeyEvent, PointerEvent, ScrollEvent, TypedEvent,
};

/// One input occurrence, discriminated by [`EventKind`].
///
/// Several kinds share a payload shape; the variant carries the kind.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent<S> {
    /// See [`EventKind::PointerDown`].
    PointerDown(PointerEvent<S>),
    /// See [`EventKind::PointerUp`].
    PointerUp(PointerEvent<S>),
    /// See [`EventKind::PointerMoved`].
    PointerMoved(PointerEvent<S>),
    /// See [`EventKind::PointerDragged`].
    PointerDragged(PointerEvent<S>),
    /// See [`EventKind::DragRelease`].
    DragRelease(PointerEvent<S>),
    /// See [`EventKind::DragAndDrop`].
    DragAndDrop(DropEvent<S>),
    /// See [`EventKind::Scroll`].
    Scroll(ScrollEvent<S>),
    /// See [`EventKind::Enter`].
    Enter(CrossingEvent<S>),
    /// See [`EventKind::Exit`].
    Exit(CrossingEvent<S>),
    /// See [`EventKind::WindowGainFocus`].
    WindowGainFocus(FocusEvent<S>),
    /// See [`EventKind::WindowLostFocus`].
    WindowLostFocus(FocusEvent<S>),
    /// See [`EventKind::KeyDown`].
    KeyDown(KeyEvent<S>),
    /// See [`EventKind::KeyUp`].
    KeyUp(KeyEvent<S>),
    /// See [`EventKind::KeyTyped`].
    KeyTyped(TypedEvent<S>),
}

impl<S> InputEvent<S> {
    /// The discriminator for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown(_) => EventKind::PointerDown,
            Self::PointerUp(_) => EventKind::PointerUp,
            Self::PointerMoved(_) => EventKind::PointerMoved,
            Self::PointerDragged(_) => EventKind::PointerDragged,
            Self::DragRelease(_) => EventKind::DragRelease,
            Self::DragAndDrop(_) => EventKind::DragAndDrop,
            Self::Scroll(_) => EventKind::Scroll,
            Self::Enter(_) => EventKind::Enter,
            Self::Exit(_) => EventKind::Exit,
            Self::WindowGainFocus(_) => EventKind::WindowGainFocus,
            Self::WindowLostFocus(_) => EventKind::WindowLostFocus,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::KeyUp(_) => EventKind::KeyUp,
            Self::KeyTyped(_) => EventKind::KeyTyped,
        }
    }

    /// The surface this event is addressed to.
    pub fn target(&self) -> &S {
        match self {
            Self::PointerDown(e)
            | Self::PointerUp(e)
            | Self::PointerMoved(e)
            | Self::PointerDragged(e)
            | Self::DragRelease(e) => &e.target,
            Self::DragAndDrop(e) => &e.target,
            Self::Scroll(e) => &e.target,
            Self::Enter(e) | Self::Exit(e) => &e.target,
            Self::WindowGainFocus(e) | Self::WindowLostFocus(e) => &e.target,
            Self::KeyDown(e) | Self::KeyUp(e) => &e.target,
            Self::KeyTyped(e) => &e.target,
        }
    }

    /// The pointer position, for positional kinds.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown(e)
            | Self::PointerUp(e)
            | Self::PointerMoved(e)
            | Self::PointerDragged(e)
            | Self::DragRelease(e) => Some(e.position),
            Self::DragAndDrop(e) => Some(e.position),
            Self::Scroll(e) => Some(e.position),
            Self::Enter(e) | Self::Exit(e) => Some(e.position),
            Self::WindowGainFocus(_)
            | Self::WindowLostFocus(_)
            | Self::KeyDown(_)
            | Self::KeyUp(_)
            | Self::KeyTyped(_) => None,
        }
    }

    /// Return a copy with the position transformed by `f`.
    ///
    /// Non-positional events are returned unchanged.
    #[must_use]
    pub fn map_position(self, f: impl FnOnce(Point) -> Point) -> Self {
        match self {
            Self::PointerDown(e) => Self::PointerDown(PointerEvent {
                position: f(e.position),
                ..e
            }),
            Self::PointerUp(e) => Self::PointerUp(PointerEvent {
                position: f(e.position),
                ..e
            }),
            Self::PointerMoved(e) => Self::PointerMoved(PointerEvent {
                position: f(e.position),
                ..e
            }),
            Self::PointerDragged(e) => Self::PointerDragged(PointerEvent {
                position: f(e.position),
                ..e
            }),
            Self::DragRelease(e) => Self::DragRelease(PointerEvent {
                position: f(e.position),
                ..e
            }),
            Self::DragAndDrop(e) => Self::DragAndDrop(DropEvent {
                position: f(e.position),
                ..e
            }),
            Self::Scroll(e) => Self::Scroll(ScrollEvent {
                position: f(e.position),
                ..e
            }),
            Self::Enter(e) => Self::Enter(CrossingEvent {
                position: f(e.position),
                ..e
            }),
            Self::Exit(e) => Self::Exit(CrossingEvent {
                position: f(e.position),
                ..e
            }),
            other => other,
        }
    }

    /// Return a copy addressed to `target`.
    ///
    /// Window managers use this to fan one event out to several candidate
    /// surfaces. Secondary surface fields such as
    /// [`PointerEvent::pressed_on`] and [`DropEvent::dragged`] are preserved.
    #[must_use]
    pub fn with_target(self, target: S) -> Self {
        match self {
            Self::PointerDown(e) => Self::PointerDown(PointerEvent { target, ..e }),
            Self::PointerUp(e) => Self::PointerUp(PointerEvent { target, ..e }),
            Self::PointerMoved(e) => Self::PointerMoved(PointerEvent { target, ..e }),
            Self::PointerDragged(e) => Self::PointerDragged(PointerEvent { target, ..e }),
            Self::DragRelease(e) => Self::DragRelease(PointerEvent { target, ..e }),
            Self::DragAndDrop(e) => Self::DragAndDrop(DropEvent { target, ..e }),
            Self::Scroll(e) => Self::Scroll(ScrollEvent { target, ..e }),
            Self::Enter(e) => Self::Enter(CrossingEvent { target, ..e }),
            Self::Exit(e) => Self::Exit(CrossingEvent { target, ..e }),
            Self::WindowGainFocus(_) => Self::WindowGainFocus(FocusEvent { target }),
            Self::WindowLostFocus(_) => Self::WindowLostFocus(FocusEvent { target }),
            Self::KeyDown(e) => Self::KeyDown(KeyEvent { target, ..e }),
            Self::KeyUp(e) => Self::KeyUp(KeyEvent { target, ..e }),
            Self::KeyTyped(e) => Self::KeyTyped(TypedEvent { target, ..e }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::KeyCode;
    use kurbo::Vec2;

    #[test]
    fn kind_and_target_follow_variant() {
        let ev = InputEvent::Scroll(ScrollEvent::new(4_u32, Point::ZERO, Vec2::new(0.0, -3.0)));
        assert_eq!(ev.kind(), EventKind::Scroll);
        assert_eq!(*ev.target(), 4);

        let ev = InputEvent::DragAndDrop(DropEvent::new(1_u32, Point::ZERO, 2));
        assert_eq!(ev.kind(), EventKind::DragAndDrop);
        assert_eq!(*ev.target(), 1);
    }

    #[test]
    fn position_presence_matches_kind() {
        let events = [
            InputEvent::PointerDown(PointerEvent::new(1_u32, Point::new(1.0, 1.0), 0, 0)),
            InputEvent::Exit(CrossingEvent::new(1, Point::new(1.0, 1.0), 0)),
            InputEvent::KeyUp(KeyEvent::new(1, KeyCode(13))),
            InputEvent::WindowGainFocus(FocusEvent::new(1)),
            InputEvent::KeyTyped(TypedEvent::new(1, 'x')),
        ];
        for ev in &events {
            assert_eq!(
                ev.position().is_some(),
                ev.kind().is_positional(),
                "{:?}",
                ev.kind()
            );
        }
    }

    #[test]
    fn map_position_only_touches_positional_events() {
        let down = InputEvent::PointerDown(PointerEvent::new(1_u32, Point::new(2.0, 3.0), 0, 0));
        let moved = down.map_position(|p| Point::new(p.x, 10.0 - p.y));
        assert_eq!(moved.position(), Some(Point::new(2.0, 7.0)));

        let key = InputEvent::KeyDown(KeyEvent::new(1_u32, KeyCode(9)));
        assert_eq!(key.clone().map_position(|_| Point::ZERO), key);
    }

    #[test]
    fn with_target_preserves_paired_press() {
        let up = InputEvent::PointerUp(
            PointerEvent::new(1_u32, Point::ZERO, 0, 0).with_pressed_on(5),
        );
        let InputEvent::PointerUp(e) = up.with_target(9) else {
            panic!("variant changed");
        };
        assert_eq!(e.target, 9);
        assert_eq!(e.pressed_on, Some(5));
    }
}
