//! Test utilities and fixtures for Ripple development.
//!
//! Provides a [`RecordingObserver`] that logs every notification it
//! receives, plus ready-made state graphs in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use ripple_action::{Action, ActionKind};
use ripple_engine::{DispatchQueue, Observer};

/// One notification as seen by a [`RecordingObserver`].
#[derive(Clone, Debug)]
pub struct Notification {
    pub actions: Vec<Action>,
}

impl Notification {
    pub fn kinds(&self) -> Vec<ActionKind> {
        self.actions.iter().map(Action::kind).collect()
    }
}

/// Shared log of notifications.
pub type NotificationLog = Rc<RefCell<Vec<Notification>>>;

/// Observer that records every batch it is handed.
///
/// Register the observer with the manager, keep the [`handle`] to
/// inspect what arrived.
///
/// [`handle`]: RecordingObserver::handle
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    log: NotificationLog,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A second handle onto the same log.
    pub fn handle(&self) -> NotificationLog {
        Rc::clone(&self.log)
    }
}

impl Observer for RecordingObserver {
    fn notify(&mut self, actions: &[Action], _queue: &mut DispatchQueue) {
        self.log.borrow_mut().push(Notification {
            actions: actions.to_vec(),
        });
    }
}

/// Number of notifications in a log.
pub fn call_count(log: &NotificationLog) -> usize {
    log.borrow().len()
}

/// The most recent notification, if any.
pub fn last(log: &NotificationLog) -> Option<Notification> {
    log.borrow().last().cloned()
}
