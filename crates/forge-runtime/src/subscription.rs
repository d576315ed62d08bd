#![forbid(unsafe_code)]

//! Subscriptions: continuous message producers with managed lifecycles.
//!
//! A model declares what it wants to listen to by returning subscriptions
//! from `Model::subscriptions()`. After every update the runtime reconciles
//! that set (by [`SubId`]) against the producers currently running: new ones
//! are started on background threads, dropped ones are stopped and joined.
//! This is what gives the animation tick a deterministic teardown — when the
//! model stops declaring it, the producer thread is signalled and joined
//! before the runtime continues.

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Unique identifier for a subscription, used for reconcile-by-identity.
pub type SubId = u64;

/// A producer of messages from some continuous source.
///
/// `run` is called on a dedicated thread and should loop until the stop
/// signal fires or the channel disconnects.
pub trait Subscription<M: Send + 'static>: Send {
    /// Stable identity; two subscriptions with the same ID are the same.
    fn id(&self) -> SubId;

    /// Produce messages until stopped.
    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal);
}

/// Cooperative stop signal for subscription threads.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        (
            Self {
                inner: inner.clone(),
            },
            StopTrigger { inner },
        )
    }

    /// Whether the stop has been requested.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap()
    }

    /// Block until stopped or the timeout elapses.
    ///
    /// Returns `true` if stopped. Loops on the condvar to absorb spurious
    /// wakeups.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap();
        let start = Instant::now();
        loop {
            if *stopped {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            let (guard, _) = cvar.wait_timeout(stopped, duration - elapsed).unwrap();
            stopped = guard;
        }
    }
}

/// Runtime-side handle that fires the matching [`StopSignal`].
pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap() = true;
        cvar.notify_all();
    }
}

struct RunningSubscription {
    id: SubId,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningSubscription {
    fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RunningSubscription {
    fn drop(&mut self) {
        // Signal but do not join; joining in drop could block teardown.
        self.trigger.stop();
    }
}

/// Owns the lifecycle of all running subscriptions for one program.
pub(crate) struct SubscriptionManager<M: Send + 'static> {
    active: Vec<RunningSubscription>,
    sender: mpsc::Sender<M>,
}

impl<M: Send + 'static> SubscriptionManager<M> {
    pub(crate) fn new(sender: mpsc::Sender<M>) -> Self {
        Self {
            active: Vec::new(),
            sender,
        }
    }

    /// Reconcile the declared set against running producers.
    pub(crate) fn reconcile(&mut self, subscriptions: Vec<Box<dyn Subscription<M>>>) {
        let declared: HashSet<SubId> = subscriptions.iter().map(|s| s.id()).collect();

        let mut remaining = Vec::new();
        for running in self.active.drain(..) {
            if declared.contains(&running.id) {
                remaining.push(running);
            } else {
                tracing::debug!(sub_id = running.id, "stopping subscription");
                running.stop();
            }
        }
        self.active = remaining;

        let mut running_ids: HashSet<SubId> = self.active.iter().map(|r| r.id).collect();
        for sub in subscriptions {
            let id = sub.id();
            if !running_ids.insert(id) {
                continue;
            }
            tracing::debug!(sub_id = id, "starting subscription");
            let (signal, trigger) = StopSignal::new();
            let sender = self.sender.clone();
            let thread = thread::spawn(move || sub.run(sender, signal));
            self.active.push(RunningSubscription {
                id,
                trigger,
                thread: Some(thread),
            });
        }
    }

    pub(crate) fn stop_all(&mut self) {
        for running in self.active.drain(..) {
            running.stop();
        }
    }

    #[cfg(test)]
    pub(crate) fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl<M: Send + 'static> Drop for SubscriptionManager<M> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

/// A subscription that emits a message at a fixed interval.
///
/// This drives the backdrop animation: `Every::new(TICK, || Msg::Tick)`.
pub struct Every<M: Send + 'static> {
    id: SubId,
    interval: Duration,
    make_msg: Box<dyn Fn() -> M + Send + Sync>,
}

impl<M: Send + 'static> Every<M> {
    /// Interval subscription whose identity derives from the interval.
    pub fn new(interval: Duration, make_msg: impl Fn() -> M + Send + Sync + 'static) -> Self {
        let id = interval.as_nanos() as u64 ^ 0x5449_434B; // "TICK"
        Self::with_id(id, interval, make_msg)
    }

    /// Interval subscription with an explicit identity.
    pub fn with_id(
        id: SubId,
        interval: Duration,
        make_msg: impl Fn() -> M + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            interval,
            make_msg: Box::new(make_msg),
        }
    }
}

impl<M: Send + 'static> Subscription<M> for Every<M> {
    fn id(&self) -> SubId {
        self.id
    }

    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal) {
        loop {
            if stop.wait_timeout(self.interval) {
                return;
            }
            if sender.send((self.make_msg)()).is_err() {
                // Receiver gone; the program is shutting down.
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_signal_starts_unstopped() {
        let (signal, trigger) = StopSignal::new();
        assert!(!signal.is_stopped());
        trigger.stop();
        assert!(signal.is_stopped());
    }

    #[test]
    fn wait_timeout_returns_false_on_timeout() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.wait_timeout(Duration::from_millis(5)));
    }

    #[test]
    fn wait_timeout_returns_true_when_stopped_from_another_thread() {
        let (signal, trigger) = StopSignal::new();
        let waiter = thread::spawn(move || signal.wait_timeout(Duration::from_secs(5)));
        thread::sleep(Duration::from_millis(10));
        trigger.stop();
        assert!(waiter.join().unwrap());
    }

    #[test]
    fn every_emits_until_stopped() {
        let (tx, rx) = mpsc::channel::<u32>();
        let sub = Every::new(Duration::from_millis(5), || 7u32);
        let (signal, trigger) = StopSignal::new();
        let handle = thread::spawn(move || sub.run(tx, signal));

        let first = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(first, 7);

        trigger.stop();
        handle.join().unwrap();
    }

    #[test]
    fn every_same_interval_same_id() {
        let a = Every::new(Duration::from_millis(50), || 0u8);
        let b = Every::new(Duration::from_millis(50), || 1u8);
        let c = Every::new(Duration::from_millis(51), || 2u8);
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn reconcile_starts_and_stops_by_id() {
        let (tx, _rx) = mpsc::channel::<u8>();
        let mut mgr = SubscriptionManager::new(tx);

        mgr.reconcile(vec![Box::new(Every::with_id(
            1,
            Duration::from_millis(10),
            || 0u8,
        ))]);
        assert_eq!(mgr.active_count(), 1);

        // Same ID: no restart, still one.
        mgr.reconcile(vec![Box::new(Every::with_id(
            1,
            Duration::from_millis(10),
            || 0u8,
        ))]);
        assert_eq!(mgr.active_count(), 1);

        // Empty set stops everything.
        mgr.reconcile(vec![]);
        assert_eq!(mgr.active_count(), 0);
    }
}
