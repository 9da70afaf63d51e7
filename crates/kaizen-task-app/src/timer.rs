/*
[INPUT]:  Timer start/stop intents and a 1-second wall-clock tick schedule
[OUTPUT]: Countdown state transitions and a single finished event per run
[POS]:    Timer engine - at most one countdown bound to one task
[UPDATE]: When changing tick cadence or cancellation guarantees
*/

use kaizen_task_client::TaskId;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};
use tokio_util::sync::CancellationToken;

const TICK: Duration = Duration::from_secs(1);

/// Countdown state. The tagged variants enforce "at most one active
/// timer" by construction; there is no collection of timers anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No timer bound to any task
    Idle,
    /// Ticking once per second against a bound task
    Running {
        task_id: TaskId,
        initial_seconds: u32,
        remaining_seconds: u32,
    },
    /// Terminal until dismissed; still displayed to the user
    Finished {
        task_id: TaskId,
        initial_seconds: u32,
    },
}

impl TimerState {
    /// Fresh countdown for a task with a known duration estimate
    pub fn running(task_id: TaskId, duration_minutes: u32) -> Self {
        let initial_seconds = duration_minutes.saturating_mul(60);
        TimerState::Running {
            task_id,
            initial_seconds,
            remaining_seconds: initial_seconds,
        }
    }

    /// The task this timer is bound to, if any
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            TimerState::Idle => None,
            TimerState::Running { task_id, .. } | TimerState::Finished { task_id, .. } => {
                Some(*task_id)
            }
        }
    }

    pub fn initial_seconds(&self) -> u32 {
        match self {
            TimerState::Idle => 0,
            TimerState::Running {
                initial_seconds, ..
            }
            | TimerState::Finished {
                initial_seconds, ..
            } => *initial_seconds,
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        match self {
            TimerState::Idle => 0,
            TimerState::Running {
                remaining_seconds, ..
            } => *remaining_seconds,
            TimerState::Finished { .. } => 0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TimerState::Finished { .. })
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the bound task id exactly on the Running -> Finished
    /// transition; every other call returns None. Idle and Finished
    /// states never mutate.
    pub fn tick(&mut self) -> Option<TaskId> {
        let TimerState::Running {
            task_id,
            initial_seconds,
            remaining_seconds,
        } = *self
        else {
            return None;
        };

        let remaining_seconds = remaining_seconds.saturating_sub(1);
        if remaining_seconds == 0 {
            *self = TimerState::Finished {
                task_id,
                initial_seconds,
            };
            return Some(task_id);
        }

        *self = TimerState::Running {
            task_id,
            initial_seconds,
            remaining_seconds,
        };
        None
    }
}

/// Emitted once per countdown, on the Running -> Finished transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Finished { task_id: TaskId },
}

#[derive(Debug)]
struct TickSchedule {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs a single countdown bound to one task at a time.
///
/// Starting a new timer fully cancels the previous tick schedule before
/// the new one begins; cancellation is checked under the state lock, so
/// no tick can mutate state after its schedule was cancelled.
#[derive(Debug)]
pub struct TimerEngine {
    state: Arc<Mutex<TimerState>>,
    events: mpsc::UnboundedSender<TimerEvent>,
    schedule: Option<TickSchedule>,
}

impl TimerEngine {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (
            Self {
                state: Arc::new(Mutex::new(TimerState::Idle)),
                events,
                schedule: None,
            },
            receiver,
        )
    }

    /// Snapshot of the current countdown
    pub fn state(&self) -> TimerState {
        *lock(&self.state)
    }

    /// Begin a countdown for a task. Any prior countdown, running or
    /// finished, same task or not, is discarded first.
    pub fn start(&mut self, task_id: TaskId, duration_minutes: u32) {
        self.cancel_schedule();
        *lock(&self.state) = TimerState::running(task_id, duration_minutes);
        tracing::debug!(task_id, duration_minutes, "timer started");

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let state = Arc::clone(&self.state);
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let finished = {
                            let mut state = lock(&state);
                            // Re-check under the lock: a cancelled
                            // schedule must never mutate state
                            if token.is_cancelled() {
                                break;
                            }
                            state.tick()
                        };
                        if let Some(task_id) = finished {
                            let _ = events.send(TimerEvent::Finished { task_id });
                            break;
                        }
                    }
                }
            }
        });

        self.schedule = Some(TickSchedule { cancel, handle });
    }

    /// Cancel the schedule and reset to Idle, from Running or Finished
    pub fn stop(&mut self) {
        self.cancel_schedule();
        *lock(&self.state) = TimerState::Idle;
        tracing::debug!("timer stopped");
    }

    fn cancel_schedule(&mut self) {
        if let Some(schedule) = self.schedule.take() {
            schedule.cancel.cancel();
            schedule.handle.abort();
        }
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.cancel_schedule();
    }
}

/// Mutex poisoning cannot corrupt a TimerState; recover the inner value
fn lock(state: &Mutex<TimerState>) -> std::sync::MutexGuard<'_, TimerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_countdown_by_ticks() {
        let mut state = TimerState::running(5, 2);
        assert_eq!(state.initial_seconds(), 120);
        assert_eq!(state.remaining_seconds(), 120);

        let mut finished_events = 0;
        for _ in 0..120 {
            if state.tick().is_some() {
                finished_events += 1;
            }
        }

        assert_eq!(finished_events, 1);
        assert_eq!(state.remaining_seconds(), 0);
        assert!(state.is_finished());
        assert!(!state.is_active());

        // No further mutation after the terminal transition
        let terminal = state;
        assert_eq!(state.tick(), None);
        assert_eq!(state, terminal);
    }

    #[test]
    fn test_one_minute_boundary() {
        let mut state = TimerState::running(5, 1);
        for _ in 0..59 {
            assert_eq!(state.tick(), None);
        }
        assert_eq!(state.remaining_seconds(), 1);
        assert!(!state.is_finished());

        assert_eq!(state.tick(), Some(5));
        assert_eq!(state.remaining_seconds(), 0);
        assert!(state.is_finished());
    }

    #[test]
    fn test_remaining_never_exceeds_initial() {
        let mut state = TimerState::running(1, 3);
        while !state.is_finished() {
            assert!(state.remaining_seconds() <= state.initial_seconds());
            state.tick();
        }
    }

    #[test]
    fn test_huge_duration_saturates() {
        let state = TimerState::running(9, u32::MAX);
        assert_eq!(state.initial_seconds(), u32::MAX);
        assert_eq!(state.remaining_seconds(), u32::MAX);
        assert!(state.is_active());
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = TimerState::Idle;
        assert_eq!(state.tick(), None);
        assert_eq!(state, TimerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_runs_to_finished() {
        let (mut engine, mut events) = TimerEngine::new();
        engine.start(7, 1);

        assert!(engine.state().is_active());
        assert_eq!(engine.state().remaining_seconds(), 60);

        let event = events.recv().await.expect("finished event");
        assert_eq!(event, TimerEvent::Finished { task_id: 7 });
        assert!(engine.state().is_finished());
        assert_eq!(engine.state().task_id(), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_returns_to_idle_from_any_state() {
        let (mut engine, mut events) = TimerEngine::new();

        // Stop while running
        engine.start(1, 1);
        engine.stop();
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.state().task_id(), None);

        // Stop after finished
        engine.start(2, 1);
        let _ = events.recv().await.expect("finished event");
        assert!(engine.state().is_finished());
        engine.stop();
        assert_eq!(engine.state(), TimerState::Idle);

        // Stop while already idle
        engine.stop();
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_timer_discards_previous_schedule() {
        let (mut engine, mut events) = TimerEngine::new();

        engine.start(1, 1);
        engine.start(2, 1);

        // Only the replacement countdown is live
        assert_eq!(engine.state().task_id(), Some(2));
        assert_eq!(engine.state().remaining_seconds(), 60);

        let event = events.recv().await.expect("finished event");
        assert_eq!(event, TimerEvent::Finished { task_id: 2 });

        // Exactly one schedule ever fired; the discarded timer sent nothing
        tokio::task::yield_now().await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restarting_same_task_resets_countdown() {
        let (mut engine, _events) = TimerEngine::new();

        engine.start(3, 2);
        time::advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert!(engine.state().remaining_seconds() < 120);

        engine.start(3, 2);
        assert_eq!(engine.state().remaining_seconds(), 120);
    }
}
