// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Receiver: deterministic, `no_std` receiver chains for UI input.
//!
//! ## Overview
//!
//! Every surface owns a chain of receivers. A delivered event visits every
//! receiver in the chain: most recently attached first, the first attached
//! last. Nothing stops propagation early.
//!
//! - Boolean notifications (pointer, keyboard, scroll, drag-and-drop) report
//!   "handled" as the OR of every receiver's answer.
//! - Void notifications (enter, exit, window focus) just cascade.
//! - A receiver that cannot process an event returns an [`InputFault`]. The
//!   fault aborts the dispatch and propagates to the caller; receivers that
//!   already ran keep their effects.
//!
//! Chains hold their receivers in an explicit ordered sequence
//! ([`Chain`](chain::Chain)). Iterating [`Chain::nodes`](chain::Chain::nodes)
//! walks head to tail (attach order); dispatch runs the reverse.
//!
//! ## Modules
//!
//! - [`input`]: the [`InputReceiver`] trait and [`ReceiverChain`].
//! - [`button`]: the [`ButtonReceiver`] trait and [`ButtonChain`] for press
//!   activation.
//! - [`listener`]: closure-slot receivers for callers that do not want a type
//!   per receiver.
//! - [`activation`]: [`PressTracker`] pairs pointer releases with their presses.
//! - [`surfaces`]: [`Surfaces`] registry routing events to per-surface chains.
//! - [`source`]: [`EventSource`] normalizes coordinates and catches faults.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_input_event::{InputEvent, PointerEvent};
//! use understory_receiver::listener::{ButtonListener, Listener};
//! use understory_receiver::source::EventSource;
//!
//! let mut source = EventSource::default();
//! let surfaces = source.surfaces_mut();
//! surfaces.attach_input(1_u32, Listener::new().on_pointer_down(|_, _| Ok(false)));
//! surfaces.attach_input(1, Listener::new().on_pointer_down(|_, _| Ok(true)));
//! surfaces.attach_button(1, ButtonListener::new().on_pressed(|surface| {
//!     assert_eq!(surface, 1);
//!     Ok(())
//! }));
//!
//! let at = Point::new(8.0, 8.0);
//! assert!(source.feed(InputEvent::PointerDown(PointerEvent::new(1, at, 0, 0))));
//! assert!(!source.feed(InputEvent::PointerUp(PointerEvent::new(1, at, 0, 0))));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! Diagnostics go through the [`log`] facade; install any logger to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod activation;
pub mod button;
pub mod chain;
pub mod fault;
pub mod input;
pub mod listener;
pub mod source;
pub mod surfaces;

pub use activation::{Activation, PressTracker};
pub use button::{ButtonChain, ButtonKind, ButtonReceiver};
pub use chain::{Chain, Node};
pub use fault::{InputFault, Notification};
pub use input::{InputReceiver, ReceiverChain};
pub use listener::{ButtonListener, Listener};
pub use source::{CoordinateConvention, EventSource, FaultPolicy, SourceConfig};
pub use surfaces::{SurfaceChains, Surfaces};
