// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input fault raised by receivers.
//!
//! A fault means "this event cannot be processed safely in the current state".
//! Chains never catch faults: the first one aborts the rest of the dispatch and
//! is returned to the caller, which decides whether to keep feeding events
//! (see [`EventSource`](crate::source::EventSource)).

use alloc::borrow::Cow;

use understory_input_event::EventKind;

use crate::button::ButtonKind;

/// Which notification was being dispatched when a fault occurred.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Notification {
    /// An input receiver notification.
    Input(EventKind),
    /// A button activation notification.
    Button(ButtonKind),
}

impl From<EventKind> for Notification {
    fn from(kind: EventKind) -> Self {
        Self::Input(kind)
    }
}

impl From<ButtonKind> for Notification {
    fn from(kind: ButtonKind) -> Self {
        Self::Button(kind)
    }
}

impl PartialEq<EventKind> for Notification {
    fn eq(&self, other: &EventKind) -> bool {
        *self == Self::Input(*other)
    }
}

impl PartialEq<ButtonKind> for Notification {
    fn eq(&self, other: &ButtonKind) -> bool {
        *self == Self::Button(*other)
    }
}

impl core::fmt::Display for Notification {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input(kind) => write!(f, "{kind:?}"),
            Self::Button(kind) => write!(f, "{kind:?}"),
        }
    }
}

/// Error raised by a receiver, or by a chain whose preconditions do not hold.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InputFault {
    /// A receiver refused to process the notification.
    #[error("{notification} rejected: {reason}")]
    Rejected {
        /// Notification being dispatched.
        notification: Notification,
        /// Human-readable explanation.
        reason: Cow<'static, str>,
    },
    /// The chain, or one of its nodes, has no owning surface.
    ///
    /// Dispatching through an unbound chain is a precondition violation.
    #[error("{notification} dispatched through a chain with no owning surface")]
    Unbound {
        /// Notification being dispatched.
        notification: Notification,
    },
}

impl InputFault {
    /// Build a [`Rejected`](Self::Rejected) fault.
    pub fn rejected(
        notification: impl Into<Notification>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Rejected {
            notification: notification.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`Unbound`](Self::Unbound) fault.
    pub fn unbound(notification: impl Into<Notification>) -> Self {
        Self::Unbound {
            notification: notification.into(),
        }
    }

    /// The notification that faulted.
    pub fn notification(&self) -> Notification {
        match self {
            Self::Rejected { notification, .. } | Self::Unbound { notification } => *notification,
        }
    }
}
