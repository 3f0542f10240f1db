// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event source: normalizes raw events and catches faults.
//!
//! [`EventSource`] sits between the platform and a [`Surfaces`] registry. It:
//!
//! - maps event positions into the y-down convention the receivers expect
//!   ([`CoordinateConvention`]),
//! - routes the event (or fans it out) through the registry,
//! - catches any [`InputFault`], logs it and applies the [`FaultPolicy`].
//!
//! The value returned by [`EventSource::feed`] is advisory. A caller may still
//! forward the raw event elsewhere when nothing handled it.
//!
//! ```
//! use kurbo::Point;
//! use understory_input_event::{InputEvent, PointerEvent};
//! use understory_receiver::listener::Listener;
//! use understory_receiver::source::{CoordinateConvention, EventSource, SourceConfig};
//!
//! let config = SourceConfig::default()
//!     .with_convention(CoordinateConvention::FlipY { height: 100.0 });
//! let mut source = EventSource::new(config);
//! source.surfaces_mut().attach_input(
//!     1_u32,
//!     Listener::new().on_pointer_down(|_, e| Ok(e.position == Point::new(10.0, 90.0))),
//! );
//!
//! let raw = PointerEvent::new(1, Point::new(10.0, 10.0), 0, 0);
//! assert!(source.feed(InputEvent::PointerDown(raw)));
//! ```

use core::fmt;
use core::hash::Hash;

use kurbo::{Affine, Point};
use understory_input_event::InputEvent;

use crate::fault::InputFault;
use crate::surfaces::Surfaces;

/// How incoming positions relate to the y-down convention of receivers.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum CoordinateConvention {
    /// Positions are already y-down; passed through unchanged.
    #[default]
    YDown,
    /// Positions are y-up within a viewport of the given height.
    FlipY {
        /// Viewport height in the source's units.
        height: f64,
    },
}

impl CoordinateConvention {
    /// The transform from source coordinates to y-down coordinates.
    pub fn transform(&self) -> Affine {
        match *self {
            Self::YDown => Affine::IDENTITY,
            Self::FlipY { height } => Affine::translate((0.0, height)) * Affine::FLIP_Y,
        }
    }

    /// Map one point into y-down coordinates.
    pub fn apply(&self, point: Point) -> Point {
        match self {
            Self::YDown => point,
            Self::FlipY { .. } => self.transform() * point,
        }
    }
}

/// What an [`EventSource`] does after catching a fault.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Log the fault and keep accepting events.
    #[default]
    Continue,
    /// Log the fault and drop every later event until
    /// [`EventSource::resume`] is called.
    Halt,
}

/// Configuration for an [`EventSource`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SourceConfig {
    /// Coordinate convention of incoming events.
    pub convention: CoordinateConvention,
    /// Reaction to caught faults.
    pub fault_policy: FaultPolicy,
}

impl SourceConfig {
    /// Set the coordinate convention.
    #[must_use]
    pub fn with_convention(mut self, convention: CoordinateConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Set the fault policy.
    #[must_use]
    pub fn with_fault_policy(mut self, fault_policy: FaultPolicy) -> Self {
        self.fault_policy = fault_policy;
        self
    }
}

/// Feeds normalized events into a [`Surfaces`] registry.
pub struct EventSource<S> {
    surfaces: Surfaces<S>,
    config: SourceConfig,
    halted_on: Option<InputFault>,
    faults: usize,
}

impl<S: fmt::Debug> fmt::Debug for EventSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("surfaces", &self.surfaces)
            .field("config", &self.config)
            .field("halted_on", &self.halted_on)
            .field("faults", &self.faults)
            .finish()
    }
}

impl<S: Copy + Eq + Hash> Default for EventSource<S> {
    fn default() -> Self {
        Self::new(SourceConfig::default())
    }
}

impl<S: Copy + Eq + Hash> EventSource<S> {
    /// Create a source with an empty registry.
    pub fn new(config: SourceConfig) -> Self {
        Self::with_surfaces(Surfaces::new(), config)
    }

    /// Create a source over an existing registry.
    pub fn with_surfaces(surfaces: Surfaces<S>, config: SourceConfig) -> Self {
        Self {
            surfaces,
            config,
            halted_on: None,
            faults: 0,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Replace the configuration. Does not clear a halt.
    pub fn set_config(&mut self, config: SourceConfig) {
        self.config = config;
    }

    /// The surface registry.
    pub fn surfaces(&self) -> &Surfaces<S> {
        &self.surfaces
    }

    /// The surface registry, for registering surfaces and attaching receivers.
    pub fn surfaces_mut(&mut self) -> &mut Surfaces<S> {
        &mut self.surfaces
    }

    /// Give up the source and return its registry.
    pub fn into_surfaces(self) -> Surfaces<S> {
        self.surfaces
    }

    /// Normalize `event` and route it to its target surface.
    ///
    /// Returns whether any receiver handled it. A caught fault counts as not
    /// handled. While halted, events are dropped and `false` is returned.
    pub fn feed(&mut self, event: InputEvent<S>) -> bool {
        if self.is_halted() {
            log::trace!("dropping {:?}: source halted", event.kind());
            return false;
        }
        let event = self.normalize(event);
        let result = self.surfaces.route(&event);
        self.settle(result)
    }

    /// Normalize `event` and deliver it to each of `candidates`.
    ///
    /// Same fault handling as [`feed`](Self::feed).
    pub fn feed_to(&mut self, candidates: &[S], event: InputEvent<S>) -> bool {
        if self.is_halted() {
            log::trace!("dropping {:?}: source halted", event.kind());
            return false;
        }
        let event = self.normalize(event);
        let result = self.surfaces.fan_out(candidates, &event);
        self.settle(result)
    }

    /// Whether a fault halted the source.
    pub fn is_halted(&self) -> bool {
        self.halted_on.is_some()
    }

    /// The fault that halted the source, if any.
    pub fn halted_on(&self) -> Option<&InputFault> {
        self.halted_on.as_ref()
    }

    /// Accept events again after a halt. Returns the fault that caused it.
    pub fn resume(&mut self) -> Option<InputFault> {
        let fault = self.halted_on.take();
        if fault.is_some() {
            log::debug!("event source resumed");
        }
        fault
    }

    /// Number of faults caught so far.
    pub fn fault_count(&self) -> usize {
        self.faults
    }

    fn normalize(&self, event: InputEvent<S>) -> InputEvent<S> {
        let convention = self.config.convention;
        event.map_position(|p| convention.apply(p))
    }

    fn settle(&mut self, result: Result<bool, InputFault>) -> bool {
        match result {
            Ok(handled) => handled,
            Err(fault) => {
                self.faults += 1;
                log::error!("input fault: {fault}");
                if self.config.fault_policy == FaultPolicy::Halt {
                    log::warn!("event source halted");
                    self.halted_on = Some(fault);
                }
                false
            }
        }
    }
}
