// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered chain storage shared by the input and button chains.
//!
//! ## Shape
//!
//! A [`Chain`] is an explicit ordered sequence of [`Node`]s owned by one
//! surface. Index `0` is the *head* (first attached); the last index is the
//! *tail* (most recently attached).
//!
//! ## Ordering
//!
//! Dispatch follows a recurse-then-self contract: conceptually the head hands
//! the event to its successor first and runs its own handler only after the
//! rest of the chain has returned. That gives two orders:
//!
//! - **Descent** order is head → tail, which is the order [`Chain::nodes`]
//!   yields.
//! - **Execution** order is tail → head: the most recently attached receiver
//!   runs first and the head runs last.
//!
//! The chain walks the sequence backwards instead of recursing, so long chains
//! do not grow the stack.
//!
//! ## Outcomes
//!
//! - [`Chain::fold_handled`] ORs every node's result. It never short-circuits:
//!   a node that runs after another node already claimed the event still runs,
//!   since its side effects matter.
//! - [`Chain::cascade`] runs every node for void notifications.
//! - Either aborts at the first [`InputFault`]; nodes that have not executed yet
//!   do not run.
//!
//! ## Reentrancy
//!
//! Dispatch borrows the chain mutably, so attaching or clearing from inside a
//! handler on the same chain is rejected at compile time.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::fault::{InputFault, Notification};

/// One receiver in a chain, with its surface binding.
pub struct Node<S, R: ?Sized> {
    receiver: Box<R>,
    surface: Option<S>,
}

impl<S: Copy, R: ?Sized> Node<S, R> {
    /// Wrap a receiver in a detached node.
    pub fn new(receiver: Box<R>) -> Self {
        Self {
            receiver,
            surface: None,
        }
    }

    /// The surface this node is bound to, or `None` while detached.
    pub fn surface(&self) -> Option<S> {
        self.surface
    }

    /// Whether the node is bound to a surface.
    pub fn is_bound(&self) -> bool {
        self.surface.is_some()
    }

    /// Shared access to the receiver.
    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    /// Exclusive access to the receiver.
    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    /// Unwrap the receiver, dropping any binding.
    pub fn into_receiver(self) -> Box<R> {
        self.receiver
    }

    fn rebind(&mut self, surface: Option<S>) {
        self.surface = surface;
    }
}

impl<S: fmt::Debug, R: ?Sized> fmt::Debug for Node<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

/// An ordered chain of receivers bound to one owning surface.
///
/// `R` is usually a trait object such as
/// [`dyn InputReceiver<S>`](crate::input::InputReceiver) or
/// [`dyn ButtonReceiver<S>`](crate::button::ButtonReceiver).
pub struct Chain<S, R: ?Sized> {
    owner: Option<S>,
    nodes: SmallVec<[Node<S, R>; 2]>,
}

impl<S: fmt::Debug, R: ?Sized> fmt::Debug for Chain<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("owner", &self.owner)
            .field("len", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl<S: Copy + Eq, R: ?Sized> Default for Chain<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy + Eq, R: ?Sized> Chain<S, R> {
    /// Create an empty chain with no owning surface.
    ///
    /// Dispatching through it fails with [`InputFault::Unbound`] until
    /// [`bind`](Self::bind) is called.
    pub fn new() -> Self {
        Self {
            owner: None,
            nodes: SmallVec::new(),
        }
    }

    /// Create an empty chain owned by `owner`.
    pub fn bound_to(owner: S) -> Self {
        Self {
            owner: Some(owner),
            nodes: SmallVec::new(),
        }
    }

    /// The owning surface, if any.
    pub fn owner(&self) -> Option<S> {
        self.owner
    }

    /// Number of attached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node is attached.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in descent order (head → tail, i.e. attach order).
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node<S, R>> + ExactSizeIterator {
        self.nodes.iter()
    }

    /// Bind the chain and every attached node to `owner`.
    pub fn bind(&mut self, owner: S) {
        log::debug!("binding chain of {} receivers", self.nodes.len());
        self.owner = Some(owner);
        self.rebind_all();
    }

    /// Unbind the chain and every attached node, keeping the nodes attached.
    pub fn unbind(&mut self) {
        self.owner = None;
        self.rebind_all();
    }

    /// Append `node` at the tail and bind the whole chain to the owner.
    ///
    /// Any binding the node carried from a previous chain is dropped first.
    pub fn attach(&mut self, node: Node<S, R>) {
        self.nodes.push(node);
        self.rebind_all();
        log::debug!("attached receiver at position {}", self.nodes.len() - 1);
    }

    /// Append a receiver at the tail.
    pub fn attach_receiver(&mut self, receiver: Box<R>) {
        self.attach(Node::new(receiver));
    }

    /// Remove and unbind the tail node.
    pub fn detach_tail(&mut self) -> Option<Node<S, R>> {
        let mut node = self.nodes.pop()?;
        node.rebind(None);
        Some(node)
    }

    /// Unbind and remove every node, tail first.
    ///
    /// Returns the released nodes in release order (tail → head). Clearing an
    /// empty chain is a no-op. The chain keeps its owner.
    pub fn clear(&mut self) -> Vec<Node<S, R>> {
        let mut released = Vec::with_capacity(self.nodes.len());
        while let Some(node) = self.detach_tail() {
            released.push(node);
        }
        if !released.is_empty() {
            log::debug!("cleared chain of {} receivers", released.len());
        }
        released
    }

    /// Run `f` on every node tail → head and OR the results.
    ///
    /// Every node runs even after one returned `true`. The first fault aborts
    /// the walk.
    pub fn fold_handled(
        &mut self,
        notification: impl Into<Notification>,
        mut f: impl FnMut(&mut R, S) -> Result<bool, InputFault>,
    ) -> Result<bool, InputFault> {
        let notification = notification.into();
        self.check_bound(notification)?;
        log::trace!("{notification} folding over {} receivers", self.nodes.len());
        let mut handled = false;
        for node in self.nodes.iter_mut().rev() {
            let surface = node.surface.ok_or(InputFault::unbound(notification))?;
            let own = f(&mut *node.receiver, surface)?;
            handled |= own;
        }
        Ok(handled)
    }

    /// Run `f` on every node tail → head.
    ///
    /// The first fault aborts the walk.
    pub fn cascade(
        &mut self,
        notification: impl Into<Notification>,
        mut f: impl FnMut(&mut R, S) -> Result<(), InputFault>,
    ) -> Result<(), InputFault> {
        let notification = notification.into();
        self.check_bound(notification)?;
        log::trace!("{notification} cascading over {} receivers", self.nodes.len());
        for node in self.nodes.iter_mut().rev() {
            let surface = node.surface.ok_or(InputFault::unbound(notification))?;
            f(&mut *node.receiver, surface)?;
        }
        Ok(())
    }

    fn check_bound(&self, notification: Notification) -> Result<(), InputFault> {
        if self.owner.is_none() {
            return Err(InputFault::unbound(notification));
        }
        Ok(())
    }

    fn rebind_all(&mut self) {
        let owner = self.owner;
        for node in &mut self.nodes {
            node.rebind(owner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use understory_input_event::EventKind;

    trait Probe {
        fn id(&self) -> u32;
        fn answer(&self) -> bool {
            false
        }
    }

    struct Fixed(u32, bool);
    impl Probe for Fixed {
        fn id(&self) -> u32 {
            self.0
        }
        fn answer(&self) -> bool {
            self.1
        }
    }

    fn chain_of(answers: &[bool]) -> Chain<u32, dyn Probe> {
        let mut chain: Chain<u32, dyn Probe> = Chain::bound_to(100);
        for (i, &a) in answers.iter().enumerate() {
            chain.attach_receiver(Box::new(Fixed(i as u32, a)));
        }
        chain
    }

    #[test]
    fn attach_appends_and_binds() {
        let chain = chain_of(&[false, false, false]);
        let ids: Vec<u32> = chain.nodes().map(|n| n.receiver().id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(chain.nodes().all(|n| n.surface() == Some(100)));
    }

    #[test]
    fn execution_order_is_tail_to_head() {
        let mut chain = chain_of(&[false, false, false]);
        let mut seen = Vec::new();
        chain
            .cascade(EventKind::Enter, |r, _| {
                seen.push(r.id());
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![2, 1, 0]);
    }

    #[test]
    fn fold_is_or_of_all_without_short_circuit() {
        // Every subset of a three-node chain.
        for mask in 0_u8..8 {
            let answers = [mask & 1 != 0, mask & 2 != 0, mask & 4 != 0];
            let mut chain = chain_of(&answers);
            let mut calls = 0;
            let handled = chain
                .fold_handled(EventKind::PointerDown, |r, _| {
                    calls += 1;
                    Ok(r.answer())
                })
                .unwrap();
            assert_eq!(handled, answers.iter().any(|&a| a), "mask {mask}");
            assert_eq!(calls, 3, "mask {mask}");
        }
    }

    #[test]
    fn fault_aborts_nodes_not_yet_executed() {
        let mut chain = chain_of(&[false, false, false, false]);
        let mut seen = Vec::new();
        let res = chain.fold_handled(EventKind::KeyDown, |r, _| {
            seen.push(r.id());
            if r.id() == 2 {
                Err(InputFault::rejected(EventKind::KeyDown, "bad state"))
            } else {
                Ok(true)
            }
        });
        assert_eq!(
            res,
            Err(InputFault::rejected(EventKind::KeyDown, "bad state"))
        );
        // Tail (3) already ran; the head side (1, 0) never did.
        assert_eq!(seen, vec![3, 2]);
    }

    #[test]
    fn clear_releases_tail_first_and_unbinds() {
        let mut chain = chain_of(&[false, true, false]);
        let released = chain.clear();
        assert!(chain.is_empty());
        assert_eq!(chain.owner(), Some(100));
        let ids: Vec<u32> = released.iter().map(|n| n.receiver().id()).collect();
        assert_eq!(ids, vec![2, 1, 0]);
        assert!(released.iter().all(|n| !n.is_bound()));

        // Clearing an empty chain is harmless.
        assert!(chain.clear().is_empty());
    }

    #[test]
    fn reattaching_a_released_node_rebinds_to_the_new_owner() {
        let mut first = chain_of(&[false]);
        let mut node = first.clear().pop().unwrap();
        assert_eq!(node.surface(), None);
        assert_eq!(node.receiver_mut().id(), 0);

        let mut second: Chain<u32, dyn Probe> = Chain::bound_to(200);
        second.attach(node);
        assert_eq!(second.nodes().next().unwrap().surface(), Some(200));
    }

    #[test]
    fn unbound_chain_faults() {
        let mut chain: Chain<u32, dyn Probe> = Chain::new();
        chain.attach_receiver(Box::new(Fixed(0, true)));
        assert!(!chain.nodes().next().unwrap().is_bound());
        let res = chain.fold_handled(EventKind::Scroll, |r, _| Ok(r.answer()));
        assert_eq!(res, Err(InputFault::unbound(EventKind::Scroll)));

        chain.bind(7);
        assert_eq!(chain.nodes().next().unwrap().surface(), Some(7));
        assert_eq!(
            chain.fold_handled(EventKind::Scroll, |r, _| Ok(r.answer())),
            Ok(true)
        );

        chain.unbind();
        assert_eq!(chain.len(), 1);
        assert!(chain.cascade(EventKind::Exit, |_, _| Ok(())).is_err());
    }

    #[test]
    fn handlers_receive_the_owning_surface() {
        let mut chain = chain_of(&[false, false]);
        let mut surfaces = Vec::new();
        chain
            .cascade(EventKind::WindowGainFocus, |_, s| {
                surfaces.push(s);
                Ok(())
            })
            .unwrap();
        assert_eq!(surfaces, vec![100, 100]);
    }
}
