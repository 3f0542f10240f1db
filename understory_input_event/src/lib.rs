// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Input Event: payloads for receiver-chain dispatch.
//!
//! ## Overview
//!
//! This crate describes *what happened*: a closed set of input notifications
//! ([`InputEvent`]) keyed by an [`EventKind`] discriminator, each carrying only
//! the fields relevant to its kind. It has no behavior beyond construction and
//! field access. Payloads are produced by an event source and consumed by the
//! receiver chains in `understory_receiver`.
//!
//! Surfaces are generic (`S`): any small copyable handle identifying a widget or
//! window works, such as a slotmap key or an application-specific id.
//!
//! ## Coordinates
//!
//! Positions are [`kurbo::Point`]s already normalized to the toolkit's
//! coordinate convention. Normalizing device coordinates (for example flipping
//! the Y axis) happens before a payload is built, or via
//! [`InputEvent::map_position`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_input_event::{EventKind, InputEvent, PointerEvent};
//!
//! let down = InputEvent::PointerDown(PointerEvent::new(3_u32, Point::new(5.0, 5.0), 0, 0));
//! assert_eq!(down.kind(), EventKind::PointerDown);
//! assert!(down.kind().is_boolean());
//! assert_eq!(*down.target(), 3);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std`.

#![no_std]

pub mod event;
pub mod kind;
pub mod payload;

pub use event::InputEvent;
pub use kind::{EventKind, EventKinds};
pub use payload::{
    Button, CrossingEvent, DropEvent, FocusEvent, KeyCode, KeyEvent, Modifiers, PointerEvent,
    PointerId, ScrollEvent, TypedEvent,
};
