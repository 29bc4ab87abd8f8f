//! Transient notification queue.
//!
//! [`Scheduler`] is the synchronous state machine; [`Snackbar`] runs one on a
//! tokio task and hands out a cheap, cloneable handle to it.

mod policy;
mod queue;
mod scheduler;

use async_channel::{Receiver, Sender, TrySendError, unbounded};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use crate::types::{NotificationRequest, Severity};

pub use policy::{
    DEFAULT_HARD_TIMEOUT, DEFAULT_SETTLE_DELAY, DEFAULT_SOFT_TIMEOUT, TimingPolicy, is_closable,
};
pub use scheduler::{Phase, Scheduler, VisibleState};

#[derive(Debug)]
enum Command {
    Enqueue(NotificationRequest),
    Close,
    Barrier(oneshot::Sender<()>),
}

/// Handle to a running scheduler.
///
/// Every write is fire-and-forget: commands are applied in the order they were
/// sent, on the driver task, one at a time.
#[derive(Clone, Debug)]
pub struct Snackbar {
    commands: Sender<Command>,
    state: watch::Receiver<VisibleState>,
    phase: watch::Receiver<Phase>,
}

impl Snackbar {
    /// Start the driver task. Must be called from within a tokio runtime.
    ///
    /// The driver stops once [`Snackbar::shutdown`] is called or every handle
    /// is dropped; await the returned join handle to wait for it.
    pub fn spawn(policy: TimingPolicy) -> (Self, JoinHandle<()>) {
        let (tx, rx) = unbounded();
        let (state_tx, state_rx) = watch::channel(VisibleState::default());
        let (phase_tx, phase_rx) = watch::channel(Phase::Idle);
        let published = Published {
            state: state_tx,
            phase: phase_tx,
        };
        let driver = tokio::spawn(run_scheduler(Scheduler::new(policy), rx, published));
        (
            Self {
                commands: tx,
                state: state_rx,
                phase: phase_rx,
            },
            driver,
        )
    }

    pub fn enqueue(&self, request: NotificationRequest) {
        self.send(Command::Enqueue(request));
    }

    pub fn notify(&self, message: impl Into<String>, severity: impl Into<Severity>) {
        self.enqueue(NotificationRequest::new(message, severity));
    }

    /// Close the visible notification, if any.
    pub fn close(&self) {
        self.send(Command::Close);
    }

    /// Snapshot of the visible slot.
    pub fn visible(&self) -> VisibleState {
        self.state.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open
    }

    pub fn is_closable(&self) -> bool {
        self.state.borrow().is_closable()
    }

    /// Scheduler phase as of the last applied command or timer.
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Resolves once every command sent before this call has been applied.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Barrier(tx));
        // An error only means the driver is gone, which is just as final.
        let _ = rx.await;
    }

    /// Resolves once everything sent so far has been shown and dismissed,
    /// or the driver has stopped.
    pub async fn wait_idle(&self) {
        self.flush().await;
        let mut phase = self.phase.clone();
        let _ = phase.wait_for(|phase| *phase == Phase::Idle).await;
    }

    /// A receiver notified on every change of the visible slot.
    pub fn subscribe(&self) -> watch::Receiver<VisibleState> {
        self.state.clone()
    }

    /// Stop accepting commands. Commands already sent are still applied, then
    /// the driver cancels its timers and exits.
    pub fn shutdown(&self) -> bool {
        self.commands.close()
    }

    fn send(&self, command: Command) {
        match self.commands.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Closed(command) | TrySendError::Full(command)) => {
                warn!(?command, "snackbar driver stopped; command dropped");
            }
        }
    }
}

struct Published {
    state: watch::Sender<VisibleState>,
    phase: watch::Sender<Phase>,
}

async fn run_scheduler(
    mut scheduler: Scheduler,
    commands: Receiver<Command>,
    published: Published,
) {
    loop {
        let deadline = scheduler.next_deadline();
        tokio::select! {
            biased;
            command = commands.recv() => match command {
                Ok(Command::Enqueue(request)) => scheduler.enqueue(request, Instant::now()),
                Ok(Command::Close) => {
                    scheduler.close(Instant::now());
                }
                Ok(Command::Barrier(done)) => {
                    publish(&published, &scheduler);
                    let _ = done.send(());
                }
                Err(_) => break,
            },
            () = sleep_until_deadline(deadline) => {
                scheduler.advance(Instant::now());
            }
        }
        publish(&published, &scheduler);
    }

    let dropped = scheduler.teardown();
    publish(&published, &scheduler);
    debug!(dropped, "snackbar driver stopped");
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn publish(published: &Published, scheduler: &Scheduler) {
    published.state.send_if_modified(|current| {
        if current == scheduler.visible() {
            false
        } else {
            current.clone_from(scheduler.visible());
            true
        }
    });
    published.phase.send_if_modified(|current| {
        let phase = scheduler.phase();
        let changed = *current != phase;
        *current = phase;
        changed
    });
}
