#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Keeps at most one panel of a list expanded.
//!
//! The parent list owns a broadcast epoch. A panel that wants to open asks
//! the parent to broadcast "close all", and remembers the epoch the broadcast
//! produced. Any later broadcast, from a sibling opening or from the parent
//! itself, moves the epoch on and every panel holding an older epoch renders
//! collapsed. Panels never write the signal themselves.

use std::sync::atomic::{AtomicU64, Ordering};

/// The parent side of the exclusive accordion.
pub trait AccordionParent: Send + Sync {
    /// Closes every sibling and returns the epoch the caller now owns.
    fn request_close_all(&self) -> u64;

    /// Returns the current broadcast epoch.
    fn epoch(&self) -> u64;
}

/// Shared "close all" signal for one list of panels.
#[derive(Debug, Default)]
pub struct AccordionRegistry {
    /// Number of broadcasts so far.
    epoch: AtomicU64,
}

impl AccordionRegistry {
    /// Creates a registry with no panel open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses every panel without opening a new one.
    pub fn close_all(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Closing all panels (epoch {epoch})");
    }
}

impl AccordionParent for AccordionRegistry {
    fn request_close_all(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }
}

/// Proof that a panel opened at a given broadcast epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenLease {
    /// Epoch returned by the broadcast the panel requested.
    epoch: u64,
}

impl OpenLease {
    /// Records the epoch a panel opened at.
    pub fn new(epoch: u64) -> Self {
        Self { epoch }
    }

    /// Returns true if no broadcast happened since the panel opened.
    pub fn is_current(&self, parent: &dyn AccordionParent) -> bool {
        parent.epoch() == self.epoch
    }
}
