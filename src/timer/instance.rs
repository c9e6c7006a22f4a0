//! Live timer instance
//!
//! A `Timer` is a clonable handle to one timer's state. The state machine is
//! Idle → Running → (Completed | Idle), driven by caller operations and by a
//! tick task spawned on the tokio runtime for each run.
//!
//! # Scheduling
//!
//! `start()` spawns a single task that sleeps `increment`, applies a tick,
//! and sleeps again until the timer completes. Every run is tagged with a
//! generation number. Stopping bumps the generation and aborts the task
//! while holding the state lock, so a tick that has already woken up sees a
//! stale generation and leaves the state alone.
//!
//! # Callbacks
//!
//! Transitions queue their listener calls while the state lock is held and
//! deliver them, in order, after the lock is released. A listener may call
//! back into its own timer: stopping from `on_increment` or restarting from
//! `on_complete` takes effect before the tick task sleeps again. Calls
//! queued before a `stop()` from another thread are still delivered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::callbacks::{Callback, Notice, TimerCallbacks, dispatch};
use super::settings::{SettingValue, TimerOptions, TimerSettings};
use super::timing::{Phase, Timing, percent};
use super::TimerError;

/// Handle to a single interval timer.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct Timer {
    core: Arc<Mutex<TimerCore>>,
}

struct TimerCore {
    label: String,
    settings: TimerSettings,
    callbacks: TimerCallbacks,
    elapsed: Duration,
    running: bool,
    /// Tick task of the current run, present iff `running`
    pending: Option<JoinHandle<()>>,
    generation: u64,
    destroyed: bool,
    /// Listener calls waiting for the lock to be released
    outbox: Vec<Notice>,
}

fn lock(core: &Mutex<TimerCore>) -> MutexGuard<'_, TimerCore> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drop the guard, then deliver whatever the transitions queued.
fn release(mut core: MutexGuard<'_, TimerCore>) {
    let notices = std::mem::take(&mut core.outbox);
    drop(core);
    dispatch(notices);
}

impl Timer {
    /// Create a timer from `defaults` overridden by `options`.
    ///
    /// Starts immediately when the merged settings have `autostart` set.
    pub fn new(
        label: impl Into<String>,
        defaults: &TimerSettings,
        options: TimerOptions,
    ) -> Result<Self, TimerError> {
        let mut settings = defaults.clone();
        settings.apply(&options)?;
        settings.validate()?;

        let autostart = settings.autostart;
        let timer = Self {
            core: Arc::new(Mutex::new(TimerCore {
                label: label.into(),
                settings,
                callbacks: options.callbacks,
                elapsed: Duration::ZERO,
                running: false,
                pending: None,
                generation: 0,
                destroyed: false,
                outbox: Vec::new(),
            })),
        };

        if autostart {
            timer.start()?;
        }
        Ok(timer)
    }

    // ─── Operations ─────────────────────────────────────────────────────────

    /// Start counting from the current `elapsed`.
    ///
    /// Returns `Ok(false)` if the timer is already running or has already
    /// completed. A zero duration completes on the spot without ticking.
    pub fn start(&self) -> Result<bool, TimerError> {
        let mut core = lock(&self.core);
        core.ensure_live()?;

        if core.running {
            tracing::debug!(timer = %core.label, "start ignored: already running");
            return Ok(false);
        }

        let duration = core.settings.duration;
        if duration.is_zero() {
            core.running = true;
            tracing::info!(timer = %core.label, "timer started with zero duration");
            let timing = core.timing();
            core.notify(|c| &c.on_start, timing);
            core.complete();
            release(core);
            return Ok(true);
        }

        if core.elapsed >= duration {
            tracing::debug!(timer = %core.label, "start ignored: already completed");
            return Ok(false);
        }

        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;

        core.running = true;
        core.generation += 1;
        let generation = core.generation;
        let first_tick = Instant::now() + core.settings.increment;

        tracing::info!(
            timer = %core.label,
            elapsed_ms = core.elapsed.as_millis() as u64,
            duration_ms = duration.as_millis() as u64,
            "timer started"
        );
        let timing = core.timing();
        core.notify(|c| &c.on_start, timing);

        let task = run_ticks(Arc::downgrade(&self.core), generation, first_tick);
        core.pending = Some(runtime.spawn(task));
        release(core);
        Ok(true)
    }

    /// Cancel the pending tick.
    ///
    /// Returns `Ok(false)` if the timer was not running.
    pub fn stop(&self) -> Result<bool, TimerError> {
        let mut core = lock(&self.core);
        core.ensure_live()?;
        let stopped = core.stop();
        release(core);
        Ok(stopped)
    }

    /// Stop if running and rewind `elapsed` to zero.
    pub fn reset(&self) -> Result<bool, TimerError> {
        let mut core = lock(&self.core);
        core.ensure_live()?;
        core.reset();
        release(core);
        Ok(true)
    }

    /// Merge new option values into the live settings.
    ///
    /// `elapsed` and the running state are untouched. A new increment takes
    /// effect from the next scheduled tick.
    pub fn update(&self, options: TimerOptions) -> Result<(), TimerError> {
        let mut core = lock(&self.core);
        core.ensure_live()?;
        core.settings.apply(&options)?;
        core.callbacks.merge(options.callbacks);
        tracing::debug!(timer = %core.label, settings = ?core.settings, "timer updated");
        Ok(())
    }

    /// Reset, then discard the timer. Every later call on any clone of this
    /// handle returns [`TimerError::Destroyed`].
    pub fn destroy(&self) -> Result<(), TimerError> {
        let mut core = lock(&self.core);
        core.ensure_live()?;
        core.reset();
        core.destroyed = true;
        core.callbacks = TimerCallbacks::default();
        tracing::info!(timer = %core.label, "timer destroyed");
        release(core);
        Ok(())
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    pub fn settings(&self) -> Result<TimerSettings, TimerError> {
        let core = lock(&self.core);
        core.ensure_live()?;
        Ok(core.settings.clone())
    }

    pub fn setting(&self, name: &str) -> Result<SettingValue, TimerError> {
        let core = lock(&self.core);
        core.ensure_live()?;
        core.settings.get(name)
    }

    /// Completion ratio in `[0, 1]`, rounded to three decimals.
    pub fn percent(&self) -> Result<f64, TimerError> {
        let core = lock(&self.core);
        core.ensure_live()?;
        Ok(percent(core.elapsed, core.settings.duration))
    }

    pub fn timing(&self) -> Result<Timing, TimerError> {
        let core = lock(&self.core);
        core.ensure_live()?;
        Ok(core.timing())
    }

    pub fn phase(&self) -> Result<Phase, TimerError> {
        let core = lock(&self.core);
        core.ensure_live()?;
        Ok(Phase::of(core.elapsed, core.settings.duration, core.running))
    }

    pub fn is_running(&self) -> bool {
        lock(&self.core).running
    }

    pub fn is_destroyed(&self) -> bool {
        lock(&self.core).destroyed
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = lock(&self.core);
        f.debug_struct("Timer")
            .field("label", &core.label)
            .field("settings", &core.settings)
            .field("elapsed", &core.elapsed)
            .field("running", &core.running)
            .field("destroyed", &core.destroyed)
            .finish()
    }
}

impl TimerCore {
    fn ensure_live(&self) -> Result<(), TimerError> {
        if self.destroyed {
            return Err(TimerError::Destroyed);
        }
        Ok(())
    }

    fn timing(&self) -> Timing {
        Timing::new(
            self.elapsed,
            self.settings.increment,
            self.settings.duration,
            self.running,
        )
    }

    /// Snapshot for the final tick and completion: a run that has reached
    /// `duration` already reports `Completed`.
    fn settled_timing(&self) -> Timing {
        let running = self.running && self.elapsed < self.settings.duration;
        Timing::new(
            self.elapsed,
            self.settings.increment,
            self.settings.duration,
            running,
        )
    }

    /// Queue the listener in `slot`, if any, for delivery after unlock.
    fn notify(&mut self, slot: fn(&TimerCallbacks) -> &Option<Callback>, timing: Timing) {
        if let Some(callback) = slot(&self.callbacks) {
            self.outbox.push((Arc::clone(callback), timing));
        }
    }

    /// Invalidate the current run and abort its task.
    fn cancel_pending(&mut self) {
        self.generation += 1;
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    fn stop(&mut self) -> bool {
        if !self.running {
            tracing::debug!(timer = %self.label, "stop ignored: not running");
            return false;
        }
        self.cancel_pending();
        self.running = false;
        tracing::info!(
            timer = %self.label,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "timer stopped"
        );
        let timing = self.timing();
        self.notify(|c| &c.on_stop, timing);
        true
    }

    fn complete(&mut self) {
        tracing::info!(
            timer = %self.label,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "timer completed"
        );
        let timing = self.settled_timing();
        self.notify(|c| &c.on_complete, timing);
        self.stop();
    }

    fn reset(&mut self) {
        self.stop();
        self.elapsed = Duration::ZERO;
        tracing::info!(timer = %self.label, "timer reset");
        let timing = self.timing();
        self.notify(|c| &c.on_reset, timing);
    }

    /// Apply one tick. Returns `true` if another tick should be scheduled.
    fn tick(&mut self) -> bool {
        self.elapsed += self.settings.increment;
        tracing::debug!(
            timer = %self.label,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "tick"
        );
        let timing = self.settled_timing();
        self.notify(|c| &c.on_increment, timing);

        if self.elapsed >= self.settings.duration {
            // Runs on the tick task itself; release the handle instead of
            // aborting it.
            self.pending = None;
            self.complete();
            return false;
        }
        true
    }
}

/// Tick loop for one run of a timer.
///
/// Exits when the run is superseded (generation changed), the timer
/// completes, or every handle to the timer has been dropped.
async fn run_ticks(core: Weak<Mutex<TimerCore>>, generation: u64, first_tick: Instant) {
    let mut deadline = first_tick;
    loop {
        tokio::time::sleep_until(deadline).await;

        let Some(shared) = core.upgrade() else {
            return;
        };
        let mut state = lock(&shared);
        if state.generation != generation || !state.running {
            return;
        }
        let more = state.tick();
        deadline = Instant::now() + state.settings.increment;
        release(state);

        // A listener may have stopped or restarted the timer; the generation
        // check after the next sleep catches that.
        if !more {
            return;
        }
    }
}
