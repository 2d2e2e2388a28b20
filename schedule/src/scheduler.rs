use parking_lot::Mutex;

use crate::callback::Callback;
use crate::list::CallbackList;
use crate::phase::{Bucket, Phase};

/// Counters returned by a dispatch pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStats {
    /// Callbacks invoked during the pass.
    pub invoked: usize,
    /// Invoked callbacks that returned `Err` or panicked.
    pub faulted: usize,
}

/// A registration made while its phase was dispatching.
#[derive(Debug)]
struct DeferredRegistration {
    callback: Callback,
    priority: i32,
}

/// State of one phase.
#[derive(Debug, Default)]
struct PhaseState {
    buckets: [CallbackList; Bucket::COUNT],
    /// Bucket currently being iterated, `None` when idle.
    dispatching: Option<Bucket>,
    /// Registrations applied after the current pass, in arrival order.
    deferred: Vec<DeferredRegistration>,
}

impl PhaseState {
    fn bucket(&self, bucket: Bucket) -> &CallbackList {
        &self.buckets[bucket.index()]
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut CallbackList {
        &mut self.buckets[bucket.index()]
    }

    fn contains(&self, callback: &Callback) -> bool {
        self.buckets.iter().any(|b| b.position(callback).is_some())
    }

    /// Immediate insertion, de-duplicated across all buckets of the phase.
    fn insert(&mut self, callback: Callback, priority: i32) -> bool {
        if self.contains(&callback) {
            return false;
        }
        self.bucket_mut(Bucket::for_priority(priority))
            .insert(callback, priority)
    }

    fn deferred_position(&self, callback: &Callback) -> Option<usize> {
        self.deferred.iter().position(|d| d.callback.same(callback))
    }
}

/// Priority-bucketed callback dispatcher for the host lifecycle phases.
///
/// Every [`Phase`] has three buckets ([`Bucket::High`], [`Bucket::Default`],
/// [`Bucket::Low`]) chosen by the sign of the registration priority. A
/// dispatch pass runs the buckets in that order; within the non-zero buckets
/// callbacks run in ascending priority, ties in registration order.
///
/// Callbacks may register and unregister callbacks (themselves included) on
/// the phase that is currently dispatching:
///
/// - an unregistration soft-marks the entry, which is skipped for the rest of
///   the pass and compacted out afterwards;
/// - a registration is queued and applied after the pass, so the new callback
///   first runs on the next pass;
/// - re-registering a soft-marked callback clears the mark instead.
///
/// A callback is therefore invoked at most once per pass, and the state at the
/// end of a pass is what the next pass starts from.
///
/// Faults (an `Err` return or a panic) are logged and never stop the pass.
///
/// The internal lock is never held while a callback runs.
///
/// # Example
///
/// ```
/// use glaze_schedule::{Callback, CallbackScheduler, Phase};
///
/// let scheduler = CallbackScheduler::new();
/// let tick = Callback::new(|| println!("tick"));
///
/// scheduler.register_with_priority(Phase::Update, tick.clone(), -10);
/// scheduler.update();
/// scheduler.unregister(Phase::Update, &tick);
/// ```
#[derive(Debug, Default)]
pub struct CallbackScheduler {
    phases: [Mutex<PhaseState>; Phase::COUNT],
}

impl CallbackScheduler {
    /// Creates a scheduler with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    fn phase(&self, phase: Phase) -> &Mutex<PhaseState> {
        &self.phases[phase.index()]
    }

    /// Registers `callback` on `phase` with the default priority (0).
    pub fn register(&self, phase: Phase, callback: Callback) {
        self.register_with_priority(phase, callback, 0);
    }

    /// Registers `callback` on `phase` with `priority`.
    ///
    /// Registering a callback that is already registered on the phase is a
    /// no-op; its original priority is kept.
    pub fn register_with_priority(&self, phase: Phase, callback: Callback, priority: i32) {
        let mut state = self.phase(phase).lock();

        if state.dispatching.is_none() {
            if state.insert(callback, priority) {
                log::trace!("registered callback on {phase:?} with priority {priority}");
            }
            return;
        }

        for bucket in Bucket::ALL {
            let list = state.bucket_mut(bucket);
            if list.unmark_removed(&callback) {
                log::trace!("revived soft-removed callback on {phase:?}");
                return;
            }
            if list.contains_live(&callback) {
                return;
            }
        }

        if state.deferred_position(&callback).is_none() {
            state.deferred.push(DeferredRegistration { callback, priority });
        }
    }

    /// Unregisters `callback` from `phase`.
    ///
    /// Returns `true` if a registration (immediate, soft-marked or queued)
    /// was cancelled. Unregistering an unknown callback is a no-op.
    pub fn unregister(&self, phase: Phase, callback: &Callback) -> bool {
        let mut state = self.phase(phase).lock();

        if state.dispatching.is_none() {
            return Bucket::ALL
                .into_iter()
                .any(|bucket| state.bucket_mut(bucket).remove(callback));
        }

        if let Some(index) = state.deferred_position(callback) {
            state.deferred.remove(index);
            return true;
        }

        Bucket::ALL
            .into_iter()
            .any(|bucket| state.bucket_mut(bucket).mark_removed(callback))
    }

    /// Returns `true` if `callback` will run on the next pass of `phase`.
    pub fn is_registered(&self, phase: Phase, callback: &Callback) -> bool {
        let state = self.phase(phase).lock();
        state.buckets.iter().any(|b| b.contains_live(callback))
            || state.deferred_position(callback).is_some()
    }

    /// Number of live callbacks on `phase`, excluding queued registrations.
    pub fn len(&self, phase: Phase) -> usize {
        let state = self.phase(phase).lock();
        state.buckets.iter().map(CallbackList::live_len).sum()
    }

    /// Returns `true` if no phase has any callbacks.
    pub fn is_empty(&self) -> bool {
        Phase::ALL.into_iter().all(|phase| self.len(phase) == 0)
    }

    /// Returns `true` while `phase` is mid-dispatch.
    pub fn is_dispatching(&self, phase: Phase) -> bool {
        self.phase(phase).lock().dispatching.is_some()
    }

    /// Runs one dispatch pass of `phase`.
    ///
    /// A phase cannot be dispatched from one of its own callbacks; such a
    /// nested call is logged and returns empty stats.
    pub fn dispatch(&self, phase: Phase) -> DispatchStats {
        let mut stats = DispatchStats::default();
        let slot = self.phase(phase);

        {
            let state = slot.lock();
            if state.dispatching.is_some() {
                log::error!("{phase:?} dispatch requested while already dispatching; ignored");
                return stats;
            }
            debug_assert!(state.deferred.is_empty());
        }

        for bucket in Bucket::ALL {
            slot.lock().dispatching = Some(bucket);

            let mut index = 0;
            loop {
                // Lock only long enough to fetch the entry; the callback may
                // re-enter the scheduler.
                let next = {
                    let state = slot.lock();
                    state
                        .bucket(bucket)
                        .get(index)
                        .map(|entry| (!entry.removed).then(|| entry.callback.clone()))
                };
                let Some(next) = next else {
                    break;
                };
                index += 1;
                let Some(callback) = next else {
                    continue;
                };

                stats.invoked += 1;
                if let Err(fault) = callback.invoke() {
                    stats.faulted += 1;
                    log::error!(
                        "{phase:?} callback {} failed: {fault}",
                        callback.name().unwrap_or("<unnamed>")
                    );
                }
            }
        }

        let mut state = slot.lock();
        state.dispatching = None;
        for list in &mut state.buckets {
            if list.has_removed() {
                list.compact();
            }
        }
        let deferred = std::mem::take(&mut state.deferred);
        for registration in deferred {
            state.insert(registration.callback, registration.priority);
        }

        stats
    }

    /// Dispatches [`Phase::FixedUpdate`].
    pub fn fixed_update(&self) -> DispatchStats {
        self.dispatch(Phase::FixedUpdate)
    }

    /// Dispatches [`Phase::Update`].
    pub fn update(&self) -> DispatchStats {
        self.dispatch(Phase::Update)
    }

    /// Dispatches [`Phase::LateUpdate`].
    pub fn late_update(&self) -> DispatchStats {
        self.dispatch(Phase::LateUpdate)
    }

    /// Dispatches [`Phase::Shutdown`].
    pub fn shutdown(&self) -> DispatchStats {
        self.dispatch(Phase::Shutdown)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, Callback) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let cb = Callback::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, cb)
    }

    #[test]
    fn register_dedups_across_buckets() {
        let scheduler = CallbackScheduler::new();
        let (count, cb) = counter();
        scheduler.register_with_priority(Phase::Update, cb.clone(), -3);
        scheduler.register_with_priority(Phase::Update, cb.clone(), 4);
        scheduler.register(Phase::Update, cb.clone());
        assert_eq!(scheduler.len(Phase::Update), 1);

        scheduler.update();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn phases_are_independent() {
        let scheduler = CallbackScheduler::new();
        let (count, cb) = counter();
        scheduler.register(Phase::LateUpdate, cb.clone());

        scheduler.fixed_update();
        scheduler.update();
        scheduler.shutdown();
        assert_eq!(count.load(Ordering::SeqCst), 0);

        scheduler.late_update();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_registered(Phase::Update, &cb));
    }

    #[test]
    fn unregister_while_idle_splices() {
        let scheduler = CallbackScheduler::new();
        let (count, cb) = counter();
        scheduler.register_with_priority(Phase::Update, cb.clone(), 2);
        assert!(scheduler.unregister(Phase::Update, &cb));
        assert!(!scheduler.unregister(Phase::Update, &cb));
        assert!(scheduler.is_empty());

        scheduler.update();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stats_count_invocations() {
        let scheduler = CallbackScheduler::new();
        scheduler.register(Phase::Update, Callback::new(|| {}));
        scheduler.register(Phase::Update, Callback::fallible(|| Err("nope".into())));

        let stats = scheduler.update();
        assert_eq!(
            stats,
            DispatchStats {
                invoked: 2,
                faulted: 1
            }
        );
        assert!(!scheduler.is_dispatching(Phase::Update));
    }
}
