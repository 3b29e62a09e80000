//! Store - single owner of the state tree
//!
//! Everything that touches the tree or the subscriber list goes through one
//! FIFO job queue. Whichever caller finds the queue idle drains it. A caller
//! on another thread arriving mid-drain blocks until its own job has run, so
//! `dispatch` has always reduced its action when it returns. That gives:
//! - dispatches reduced strictly in arrival order
//! - no reentrant reducer pass (a dispatch from a subscriber or effect is
//!   queued behind the current one)
//! - subscribers notified in registration order before the next job starts
//!
//! Subscribers must not block on a dispatch made from another thread.
//!
//! Effects are offered each action after its reducer pass. Their futures run
//! on tokio; each outcome travels back over an mpsc channel to a pump task
//! which enqueues it like any other dispatch.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{
    Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError, RwLock, RwLockReadGuard,
    RwLockWriteGuard, Weak,
};
use std::thread::{self, ThreadId};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, Notify};

use hearth_core::prelude::*;
use hearth_core::RingBuffer;

use crate::action::{Action, ActionKind};
use crate::config::Settings;
use crate::effects::{Effect, EffectFuture};
use crate::reducer;
use crate::selectors::Selector;
use crate::state::AppState;

/// One entry of the dispatch history
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub kind: ActionKind,
    pub at: DateTime<Local>,
    /// Whether the dispatch produced a new state tree
    pub changed: bool,
}

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Returns `false` once it wants to be dropped
type Subscriber = Box<dyn FnMut(&Arc<AppState>) -> bool + Send>;

/// Result of one effect run
struct EffectOutcome {
    effect: &'static str,
    action: Option<Action>,
}

enum Job {
    Dispatch(Action),
    Subscribe(SubscriptionId, Subscriber),
    Unsubscribe(SubscriptionId),
    Settle(EffectOutcome),
}

#[derive(Default)]
struct JobQueue {
    jobs: VecDeque<(u64, Job)>,
    drainer: Option<ThreadId>,
    next_seq: u64,
    /// Sequence number of the last job that finished running
    completed: u64,
}

impl JobQueue {
    fn is_idle(&self) -> bool {
        self.drainer.is_none() && self.jobs.is_empty()
    }
}

struct StoreInner {
    state: RwLock<Arc<AppState>>,
    queue: Mutex<JobQueue>,
    /// Signalled each time a job finishes
    ran: Condvar,
    /// Only touched by the draining caller
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    effects: RwLock<Vec<Arc<dyn Effect>>>,
    history: Mutex<RingBuffer<ActionRecord>>,
    outcome_tx: mpsc::UnboundedSender<EffectOutcome>,
    outcome_rx: Mutex<Option<mpsc::UnboundedReceiver<EffectOutcome>>>,
    runtime: OnceLock<Handle>,
    in_flight: AtomicUsize,
    idle: Notify,
    next_subscription: AtomicU64,
    settings: Settings,
}

/// Shared handle to the state container
///
/// Cloning is cheap; all clones drive the same store.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    pub fn new(settings: Settings) -> Self {
        Self::with_state(AppState::new(), settings)
    }

    /// Start from a prepared tree (restored session, tests)
    pub fn with_state(state: AppState, settings: Settings) -> Self {
        let settings = settings.validate();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(Arc::new(state)),
                queue: Mutex::new(JobQueue::default()),
                ran: Condvar::new(),
                subscribers: Mutex::new(Vec::new()),
                effects: RwLock::new(Vec::new()),
                history: Mutex::new(RingBuffer::new(settings.devtools.max_age)),
                outcome_tx,
                outcome_rx: Mutex::new(Some(outcome_rx)),
                runtime: OnceLock::new(),
                in_flight: AtomicUsize::new(0),
                idle: Notify::new(),
                next_subscription: AtomicU64::new(1),
                settings,
            }),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    /// Current state tree
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&read(&self.inner.state))
    }

    /// Reduce `action` into the tree, notify subscribers, then offer it to effects
    ///
    /// The action has been reduced when this returns, except when called from
    /// a subscriber or effect: then it runs right after the current job.
    pub fn dispatch(&self, action: Action) {
        self.submit(Job::Dispatch(action));
    }

    /// Dispatch an action given as `{"type": ..., "payload": ...}` JSON
    ///
    /// Malformed input or an unknown `type` leaves the state untouched.
    pub fn dispatch_json(&self, raw: &str) -> Result<()> {
        match Action::from_json(raw) {
            Ok(action) => {
                self.dispatch(action);
                Ok(())
            }
            Err(e) => {
                warn!("Ignoring malformed action: {}", e);
                Err(e)
            }
        }
    }

    /// Register a state listener
    ///
    /// `listener` is called with the current state, then after every dispatch.
    pub fn subscribe<F>(&self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<AppState>) + Send + 'static,
    {
        self.subscribe_inner(Box::new(move |state| {
            listener(state);
            true
        }))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.submit(Job::Unsubscribe(id));
    }

    /// Observe a selector
    ///
    /// Emits the current projection, then one value per dispatch whose
    /// projection differs from the previous emission (by pointer and value).
    pub fn select<T>(&self, selector: Selector<T>) -> Selection<T>
    where
        T: PartialEq + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut last: Option<Arc<T>> = None;

        let id = self.subscribe_inner(Box::new(move |state| {
            if tx.is_closed() {
                return false;
            }
            let next = selector.select(state);
            let unchanged = last
                .as_ref()
                .is_some_and(|prev| Arc::ptr_eq(prev, &next) || **prev == *next);
            if !unchanged {
                if tx.send(Arc::clone(&next)).is_err() {
                    return false;
                }
                last = Some(next);
            }
            true
        }));

        Selection {
            rx,
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Register effects; the first call starts the outcome pump
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe_effects<I>(&self, effects: I) -> Result<()>
    where
        I: IntoIterator<Item = Arc<dyn Effect>>,
    {
        let current = Handle::try_current().map_err(|e| Error::no_runtime(e.to_string()))?;
        let runtime = self.inner.runtime.get_or_init(|| current).clone();

        if let Some(rx) = lock(&self.inner.outcome_rx).take() {
            runtime.spawn(pump(Arc::downgrade(&self.inner), rx));
        }

        let mut registered = write(&self.inner.effects);
        for effect in effects {
            debug!("Registered effect '{}'", effect.name());
            registered.push(effect);
        }
        Ok(())
    }

    /// Dispatch history, oldest first (empty when devtools are disabled)
    pub fn history(&self) -> Vec<ActionRecord> {
        lock(&self.inner.history).iter().cloned().collect()
    }

    /// Forget recorded history
    pub fn clear_history(&self) {
        lock(&self.inner.history).clear();
    }

    /// Effect runs whose outcome has not been reduced yet
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Wait until every spawned effect has settled, its outcome was reduced,
    /// and the job queue is empty
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.in_flight() == 0 && lock(&self.inner.queue).is_idle() {
                return;
            }
            notified.await;
        }
    }

    fn subscribe_inner(&self, subscriber: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::SeqCst));
        self.submit(Job::Subscribe(id, subscriber));
        id
    }

    // ─────────────────────────────────────────────────────────
    // Job queue
    // ─────────────────────────────────────────────────────────

    /// Queue `job` and return once it has run
    fn submit(&self, job: Job) {
        self.enqueue(job, true);
    }

    /// Queue `job`; drain if nobody is, otherwise wait for it when `wait` is
    /// set and the drain belongs to another thread
    fn enqueue(&self, job: Job, wait: bool) {
        let me = thread::current().id();
        let mut queue = lock(&self.inner.queue);
        queue.next_seq += 1;
        let seq = queue.next_seq;
        queue.jobs.push_back((seq, job));

        loop {
            if queue.completed >= seq {
                return;
            }
            let drainer = queue.drainer;
            match drainer {
                None => {
                    queue.drainer = Some(me);
                    drop(queue);
                    self.drain();
                    return;
                }
                Some(owner) if owner == me || !wait => return,
                Some(_) => {
                    queue = self
                        .inner
                        .ran
                        .wait(queue)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
    }

    fn drain(&self) {
        let _guard = DrainGuard(&self.inner);
        loop {
            let (seq, job) = {
                let mut queue = lock(&self.inner.queue);
                match queue.jobs.pop_front() {
                    Some(next) => next,
                    None => {
                        queue.drainer = None;
                        break;
                    }
                }
            };
            self.run(job);
            lock(&self.inner.queue).completed = seq;
            self.inner.ran.notify_all();
        }
        self.inner.ran.notify_all();
        self.inner.idle.notify_waiters();
    }

    fn run(&self, job: Job) {
        match job {
            Job::Dispatch(action) => self.reduce(action),
            Job::Subscribe(id, mut subscriber) => {
                let state = self.state();
                if subscriber(&state) {
                    lock(&self.inner.subscribers).push((id, subscriber));
                }
            }
            Job::Unsubscribe(id) => {
                lock(&self.inner.subscribers).retain(|(sub, _)| *sub != id);
            }
            Job::Settle(outcome) => {
                trace!("Effect '{}' settled", outcome.effect);
                if let Some(action) = outcome.action {
                    self.reduce(action);
                }
                self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
            }
        }
    }

    fn reduce(&self, action: Action) {
        let kind = action.kind();
        let (next, changed) = {
            let mut state = write(&self.inner.state);
            let next = reducer::reduce(&state, &action);
            let changed = !Arc::ptr_eq(&*state, &next);
            *state = Arc::clone(&next);
            (next, changed)
        };
        debug!(action = %kind, changed, "Dispatched");

        if self.inner.settings.devtools.enabled {
            lock(&self.inner.history).push(ActionRecord {
                kind,
                at: Local::now(),
                changed,
            });
        }

        lock(&self.inner.subscribers).retain_mut(|(_, subscriber)| subscriber(&next));

        self.run_effects(&action);
    }

    // ─────────────────────────────────────────────────────────
    // Effects
    // ─────────────────────────────────────────────────────────

    fn run_effects(&self, action: &Action) {
        let effects: Vec<Arc<dyn Effect>> = read(&self.inner.effects).clone();
        for effect in effects {
            if let Some(future) = effect.react(action) {
                self.spawn_effect(effect.name(), action, future);
            }
        }
    }

    /// Run `future` with the configured timeout; a timeout or a dead task
    /// still yields the intent's failure action.
    fn spawn_effect(&self, name: &'static str, trigger: &Action, future: EffectFuture) {
        let Some(runtime) = self.inner.runtime.get() else {
            warn!("Effect '{}' has no runtime, dropping {}", name, trigger.kind());
            return;
        };

        self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
        let tx = self.inner.outcome_tx.clone();
        let trigger = trigger.clone();
        let timeout = Duration::from_millis(self.inner.settings.effects.timeout_ms);
        let task = runtime.spawn(tokio::time::timeout(timeout, future));

        runtime.spawn(async move {
            let action = match task.await {
                Ok(Ok(outcome)) => Some(outcome),
                Ok(Err(_elapsed)) => {
                    warn!(
                        "Effect '{}' did not settle {} within {}ms",
                        name,
                        trigger.kind(),
                        timeout.as_millis()
                    );
                    trigger.failure(ServiceError::timeout(format!(
                        "{} did not complete within {}ms",
                        trigger.kind(),
                        timeout.as_millis()
                    )))
                }
                Err(e) => {
                    error!("Effect '{}' aborted while handling {}: {}", name, trigger.kind(), e);
                    trigger.failure(ServiceError::aborted(format!(
                        "{} was interrupted",
                        trigger.kind()
                    )))
                }
            };
            // The receiver only goes away with the store itself
            let _ = tx.send(EffectOutcome {
                effect: name,
                action,
            });
        });
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

/// Feed effect outcomes back into the store until it is dropped
async fn pump(store: Weak<StoreInner>, mut rx: mpsc::UnboundedReceiver<EffectOutcome>) {
    while let Some(outcome) = rx.recv().await {
        let Some(inner) = store.upgrade() else {
            break;
        };
        Store { inner }.enqueue(Job::Settle(outcome), false);
    }
    debug!("Effect outcome pump stopped");
}

/// Gives up the drain if a subscriber or reducer panics mid-drain; a waiting
/// caller then takes over the remaining jobs
struct DrainGuard<'a>(&'a StoreInner);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            lock(&self.0.queue).drainer = None;
            self.0.ran.notify_all();
            self.0.idle.notify_waiters();
        }
    }
}

/// Stream of selector values produced by [`Store::select`]
pub struct Selection<T> {
    rx: mpsc::UnboundedReceiver<Arc<T>>,
    id: SubscriptionId,
    store: Weak<StoreInner>,
}

impl<T> Selection<T> {
    /// Wait for the next distinct value
    pub async fn next(&mut self) -> Option<Arc<T>> {
        self.rx.recv().await
    }

    /// Next buffered value, if any
    pub fn try_next(&mut self) -> Option<Arc<T>> {
        self.rx.try_recv().ok()
    }

    /// Drain buffered values and return the newest
    pub fn current(&mut self) -> Option<Arc<T>> {
        let mut current = None;
        while let Ok(value) = self.rx.try_recv() {
            current = Some(value);
        }
        current
    }
}

impl<T> Drop for Selection<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            Store { inner }.enqueue(Job::Unsubscribe(self.id), false);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
