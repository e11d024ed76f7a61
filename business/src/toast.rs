//! Transient notifications.
//!
//! One toast is visible at a time. Showing a new toast cancels the dismissal
//! timer of the previous one and starts a fresh timer for the new one.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::events::Subscribers;
use crate::locked;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown(Toast),
    Dismissed,
}

#[derive(Default)]
struct Slot {
    current: Option<Toast>,
    timer: Option<JoinHandle<()>>,
    shown: u64,
}

pub struct Toaster {
    duration: Duration,
    slot: Mutex<Slot>,
    events: Subscribers<ToastEvent>,
}

impl Toaster {
    pub fn new(duration: Duration) -> Arc<Self> {
        Arc::new(Self {
            duration,
            slot: Mutex::new(Slot::default()),
            events: Subscribers::default(),
        })
    }

    /// Receiver of every show/dismiss event from now on.
    pub fn subscribe(&self) -> flume::Receiver<ToastEvent> {
        self.events.subscribe()
    }

    pub fn current(&self) -> Option<Toast> {
        locked(&self.slot).current.clone()
    }

    pub fn success(self: &Arc<Self>, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(self: &Arc<Self>, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn info(self: &Arc<Self>, message: impl Into<String>) {
        self.show(ToastKind::Info, message);
    }

    pub fn show(self: &Arc<Self>, kind: ToastKind, message: impl Into<String>) {
        let toast = Toast {
            kind,
            message: message.into(),
        };

        let mut slot = locked(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.shown += 1;
        slot.current = Some(toast.clone());

        // Without a runtime the toast stays until replaced or dismissed.
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let toaster = Arc::downgrade(self);
            let shown = slot.shown;
            let duration = self.duration;
            slot.timer = Some(runtime.spawn(async move {
                tokio::time::sleep(duration).await;
                if let Some(toaster) = toaster.upgrade() {
                    toaster.expire(shown);
                }
            }));
        }
        drop(slot);

        self.events.publish(&ToastEvent::Shown(toast));
    }

    /// Hide the current toast now.
    pub fn dismiss(&self) {
        let mut slot = locked(&self.slot);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        if slot.current.take().is_some() {
            drop(slot);
            self.events.publish(&ToastEvent::Dismissed);
        }
    }

    fn expire(&self, shown: u64) {
        let mut slot = locked(&self.slot);
        if slot.shown != shown {
            return;
        }
        slot.timer = None;
        if slot.current.take().is_some() {
            drop(slot);
            self.events.publish(&ToastEvent::Dismissed);
        }
    }
}
