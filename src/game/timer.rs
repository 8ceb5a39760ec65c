//! Wall-clock scheduling for the game loop.
//!
//! Nothing here touches game state. `Countdown` reports how many intervals
//! have elapsed and `Delay` reports when a one-shot deadline has passed; the
//! state machine applies the effects. Both are anchored lazily on the first
//! poll after being armed, so time spent disarmed is never counted.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountdownState {
    Idle,
    Armed,
    Running { next: Instant },
}

#[derive(Debug, Clone)]
pub struct Countdown {
    interval: Duration,
    state: CountdownState,
}

impl Countdown {
    pub fn new(interval: Duration) -> Self {
        Countdown {
            interval: interval.max(Duration::from_millis(1)),
            state: CountdownState::Idle,
        }
    }

    /// No-op if already running.
    pub fn arm(&mut self) {
        if self.state == CountdownState::Idle {
            self.state = CountdownState::Armed;
        }
    }

    pub fn disarm(&mut self) {
        self.state = CountdownState::Idle;
    }

    /// Number of whole intervals elapsed since the last poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        match self.state {
            CountdownState::Idle => 0,
            CountdownState::Armed => {
                self.state = CountdownState::Running {
                    next: now + self.interval,
                };
                0
            }
            CountdownState::Running { mut next } => {
                let mut ticks = 0;
                while next <= now {
                    ticks += 1;
                    next += self.interval;
                }
                self.state = CountdownState::Running { next };
                ticks
            }
        }
    }

    /// Time until the next tick, if running and anchored.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        match self.state {
            CountdownState::Running { next } => Some(next.saturating_duration_since(now)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Delay {
    duration: Duration,
    due: Option<Instant>,
}

impl Delay {
    pub fn new(duration: Duration) -> Self {
        Delay {
            duration,
            due: None,
        }
    }

    /// True once `duration` has passed since the first call.
    pub fn elapsed(&mut self, now: Instant) -> bool {
        let due = *self.due.get_or_insert(now + self.duration);
        now >= due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn idle_countdown_never_ticks() {
        let mut countdown = Countdown::new(SECOND);
        let start = Instant::now();
        assert_eq!(countdown.poll(start), 0);
        assert_eq!(countdown.poll(start + SECOND * 10), 0);
        assert_eq!(countdown.until_next(start), None);
    }

    #[test]
    fn first_tick_is_one_interval_after_anchor() {
        let mut countdown = Countdown::new(SECOND);
        let start = Instant::now();
        countdown.arm();
        assert_eq!(countdown.poll(start), 0);
        assert_eq!(countdown.poll(start + Duration::from_millis(999)), 0);
        assert_eq!(countdown.poll(start + SECOND), 1);
        assert_eq!(countdown.poll(start + SECOND), 0);
        assert_eq!(countdown.poll(start + SECOND * 4), 3);
    }

    #[test]
    fn disarmed_time_is_not_accumulated() {
        let mut countdown = Countdown::new(SECOND);
        let start = Instant::now();
        countdown.arm();
        countdown.poll(start);
        assert_eq!(countdown.poll(start + SECOND * 2), 2);

        countdown.disarm();
        assert_eq!(countdown.poll(start + SECOND * 60), 0);

        countdown.arm();
        assert_eq!(countdown.poll(start + SECOND * 60), 0);
        assert_eq!(countdown.poll(start + SECOND * 61), 1);
    }

    #[test]
    fn rearming_while_running_keeps_phase() {
        let mut countdown = Countdown::new(SECOND);
        let start = Instant::now();
        countdown.arm();
        countdown.poll(start);
        countdown.arm();
        assert_eq!(
            countdown.until_next(start + Duration::from_millis(400)),
            Some(Duration::from_millis(600))
        );
    }

    #[test]
    fn delay_fires_after_duration() {
        let mut delay = Delay::new(Duration::from_millis(1500));
        let start = Instant::now();
        assert!(!delay.elapsed(start));
        assert!(!delay.elapsed(start + SECOND));
        assert!(delay.elapsed(start + Duration::from_millis(1500)));
    }

    #[test]
    fn zero_delay_fires_on_first_poll() {
        let mut delay = Delay::new(Duration::ZERO);
        assert!(delay.elapsed(Instant::now()));
    }
}
