//! Fixed-period physics clock driven by host frame time.
//!
//! The host (a GUI event loop, a headless driver, a test) calls
//! [`Looper::poll`] once per display frame with the current time in
//! seconds. The clock runs on its own period: a poll reports every whole
//! period elapsed since the last reported tick, so the tick rate is
//! `1 / interval` whatever the frame rate is. The clock advances by whole
//! periods, so fractional remainders carry over to the next poll.
//!
//! After a long stall (a suspended window, a debugger break) at most
//! [`MAX_TICKS_PER_POLL`] ticks are reported and the rest of the backlog is
//! dropped.

/// Upper bound on ticks reported by one [`Looper::poll`].
pub const MAX_TICKS_PER_POLL: u32 = 8;

#[derive(Clone, Debug)]
pub struct Looper {
    interval: f64,
    last_tick_time: Option<f64>,
    last_tick_dt: f64,
    active: bool,
}

impl Looper {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            last_tick_time: None,
            last_tick_dt: 0.0,
            active: false,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts the clock; the first tick is due one interval after `now`.
    pub fn start(&mut self, now: f64) {
        self.active = true;
        self.last_tick_time = Some(now);
    }

    /// Stops the clock. No tick is reported until the next [`Looper::start`].
    pub fn stop(&mut self) {
        self.active = false;
        self.last_tick_time = None;
    }

    /// Returns how many physics ticks are due at `now` and advances the clock
    /// past them.
    ///
    /// The count is `floor((now - last) / interval)`, capped at
    /// [`MAX_TICKS_PER_POLL`]. When the cap is hit the clock jumps to `now`.
    pub fn poll(&mut self, now: f64) -> u32 {
        if !self.active {
            return 0;
        }
        let last = *self.last_tick_time.get_or_insert(now);
        let elapsed = now - last;
        let due = (elapsed / self.interval).floor();
        if due.is_nan() || due < 1.0 {
            return 0;
        }

        let ticks = if due > f64::from(MAX_TICKS_PER_POLL) {
            self.last_tick_time = Some(now);
            MAX_TICKS_PER_POLL
        } else {
            let ticks = due as u32;
            self.last_tick_time = Some(last + f64::from(ticks) * self.interval);
            ticks
        };
        self.last_tick_dt = elapsed / f64::from(ticks);
        ticks
    }

    /// Host time per tick over the last poll that reported ticks, for display.
    pub fn last_tick_dt(&self) -> f64 {
        self.last_tick_dt
    }
}
