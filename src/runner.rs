//! Frame and countdown scheduling
//!
//! A race is driven by two periodic tasks on one thread: the physics task runs
//! once per rendered frame and the countdown fires once per second. Both are
//! armed by `start` and cancelled as soon as the session leaves Running, on
//! reset, and on teardown.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::sim::{RaceState, SessionError, SessionPhase, tick};

/// Countdown period
pub const COUNTDOWN_INTERVAL: Duration = Duration::from_secs(1);

/// Monotonic time source
pub trait Clock {
    /// Time since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Fixed-interval task schedule
#[derive(Debug, Clone, Copy)]
struct Periodic {
    interval: Duration,
    next_due: Duration,
}

impl Periodic {
    fn starting_at(now: Duration, interval: Duration) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Number of periods that came due by `now`, advancing the schedule past them
    fn take_due(&mut self, now: Duration) -> u32 {
        let mut fired = 0;
        while now >= self.next_due {
            fired += 1;
            self.next_due += self.interval;
        }
        fired
    }
}

/// Owns a race and the tasks that drive it
pub struct RaceLoop<C: Clock> {
    clock: C,
    state: RaceState,
    /// Physics task armed
    frame_task: bool,
    countdown_task: Option<Periodic>,
    /// Clock reading when the current session started
    session_origin: Duration,
}

impl<C: Clock> RaceLoop<C> {
    pub fn new(state: RaceState, clock: C) -> Self {
        Self {
            clock,
            state,
            frame_task: false,
            countdown_task: None,
            session_origin: Duration::ZERO,
        }
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RaceState {
        &mut self.state
    }

    pub fn add_participant(&mut self, name: &str) -> Result<(), SessionError> {
        self.state.add_participant(name)
    }

    /// Start a session and arm both tasks
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.state.start()?;
        let now = self.clock.now();
        self.session_origin = now;
        self.frame_task = true;
        self.countdown_task = Some(Periodic::starting_at(now, COUNTDOWN_INTERVAL));
        log::debug!("Frame and countdown tasks armed at {:?}", now);
        Ok(())
    }

    /// Seconds since the current session started
    pub fn elapsed(&self) -> f32 {
        self.clock.now().saturating_sub(self.session_origin).as_secs_f32()
    }

    /// Run one rendered frame: at most one physics step, plus any countdown
    /// seconds that came due. Returns the phase afterwards.
    pub fn pump(&mut self) -> SessionPhase {
        if !self.is_scheduled() {
            return self.state.phase;
        }

        let now = self.clock.now();
        if self.frame_task {
            let elapsed = now.saturating_sub(self.session_origin).as_secs_f32();
            tick(&mut self.state, elapsed);
        }
        if let Some(countdown) = self.countdown_task.as_mut() {
            for _ in 0..countdown.take_due(now) {
                self.state.countdown();
            }
        }

        if !self.state.is_running() {
            self.cancel();
        }
        self.state.phase
    }

    /// Back to Idle; also cancels anything still scheduled
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.state.reset()?;
        self.cancel();
        Ok(())
    }

    /// Drop both tasks without touching the race state
    pub fn cancel(&mut self) {
        if self.is_scheduled() {
            log::debug!("Frame and countdown tasks cancelled");
        }
        self.frame_task = false;
        self.countdown_task = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.frame_task || self.countdown_task.is_some()
    }
}

impl<C: Clock> Drop for RaceLoop<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn race(clock: &ManualClock) -> RaceLoop<ManualClock> {
        let mut race = RaceLoop::new(RaceState::new(5), clock.clone());
        race.add_participant("Ada").unwrap();
        race.add_participant("Grace").unwrap();
        race
    }

    #[test]
    fn test_nothing_runs_before_start() {
        let clock = ManualClock::new();
        let mut race = race(&clock);
        clock.advance(Duration::from_secs(5));
        assert_eq!(race.pump(), SessionPhase::Idle);
        assert!(!race.is_scheduled());
        assert_eq!(race.state().frames, 0);
    }

    #[test]
    fn test_failed_start_schedules_nothing() {
        let clock = ManualClock::new();
        let mut race = RaceLoop::new(RaceState::new(5), clock.clone());
        race.add_participant("solo").unwrap();
        assert!(race.start().is_err());
        assert!(!race.is_scheduled());
    }

    #[test]
    fn test_one_physics_step_per_pump() {
        let clock = ManualClock::new();
        let mut race = race(&clock);
        race.start().unwrap();

        // A long stall still yields a single fixed step
        clock.advance(Duration::from_millis(500));
        race.pump();
        assert_eq!(race.state().frames, 1);
        race.pump();
        assert_eq!(race.state().frames, 2);
    }

    #[test]
    fn test_countdown_fires_per_second() {
        let clock = ManualClock::new();
        let mut race = race(&clock);
        race.start().unwrap();
        for p in race.state_mut().participants.iter_mut() {
            p.start_delay = 1000.0;
        }

        clock.advance(Duration::from_millis(500));
        race.pump();
        assert_eq!(race.state().time_left, ROUND_SECONDS);

        clock.advance(Duration::from_millis(500));
        race.pump();
        assert_eq!(race.state().time_left, ROUND_SECONDS - 1);

        clock.advance(Duration::from_millis(2500));
        race.pump();
        assert_eq!(race.state().time_left, ROUND_SECONDS - 3);
    }

    #[test]
    fn test_timeout_cancels_tasks() {
        let clock = ManualClock::new();
        let mut race = race(&clock);
        race.start().unwrap();
        for p in race.state_mut().participants.iter_mut() {
            p.start_delay = 1000.0;
        }

        let mut phase = SessionPhase::Running;
        for _ in 0..(ROUND_SECONDS as usize * 60 + 120) {
            clock.advance(FRAME);
            phase = race.pump();
            if phase != SessionPhase::Running {
                break;
            }
        }

        assert_eq!(phase, SessionPhase::Finished);
        assert_eq!(race.state().time_left, 0);
        assert!(race.state().winner.is_none());
        assert!(!race.is_scheduled());

        let frames = race.state().frames;
        clock.advance(Duration::from_secs(1));
        race.pump();
        assert_eq!(race.state().frames, frames);
    }

    #[test]
    fn test_start_delay_measured_from_session_start() {
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(100));
        let mut race = race(&clock);
        race.start().unwrap();
        for p in race.state_mut().participants.iter_mut() {
            p.start_delay = 0.5;
        }

        clock.advance(Duration::from_millis(200));
        race.pump();
        assert!(race.state().participants.iter().all(|p| p.pos.y == 0.0));
        assert!((race.elapsed() - 0.2).abs() < 1e-3);

        clock.advance(Duration::from_millis(400));
        race.pump();
        assert!(race.state().participants.iter().all(|p| p.pos.y > 0.0));
    }

    #[test]
    fn test_race_plays_out_to_a_finish() {
        let clock = ManualClock::new();
        let mut race = race(&clock);
        race.start().unwrap();

        while race.is_scheduled() {
            clock.advance(FRAME);
            race.pump();
        }

        let state = race.state();
        assert_eq!(state.phase, SessionPhase::Finished);
        if let Some(winner) = &state.winner {
            assert!(state.registry.list().contains(winner));
        } else {
            assert_eq!(state.time_left, 0);
        }
        assert!(race.start().is_err());
    }

    #[test]
    fn test_reset_clears_and_cancels() {
        let clock = ManualClock::new();
        let mut race = race(&clock);
        race.start().unwrap();
        assert!(race.reset().is_err());

        race.cancel();
        assert!(!race.is_scheduled());
        race.state_mut().countdown();
        // Still Running in state terms until the timer or a winner ends it
        assert_eq!(race.state().phase, SessionPhase::Running);

        for _ in 0..ROUND_SECONDS {
            race.state_mut().countdown();
        }
        race.reset().unwrap();
        assert_eq!(race.state().phase, SessionPhase::Idle);
        assert!(race.state().registry.is_empty());
        assert!(race.state().participants.is_empty());
        assert!(!race.is_scheduled());
    }
}
