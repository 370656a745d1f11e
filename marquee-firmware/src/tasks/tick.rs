//! Display tick task
//!
//! Advances the scheduler by one animation frame per period. The clock row
//! shows time since boot, since the board has no wall clock.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use marquee_core::{ClockReading, ClockSource, TickStatus};

use crate::SharedScheduler;

/// Time since the tick task started
struct UptimeClock {
    start: Instant,
}

impl ClockSource for UptimeClock {
    fn now(&self) -> ClockReading {
        ClockReading::from_seconds(self.start.elapsed().as_secs())
    }
}

/// Tick task - one scheduler frame per `tick_ms`
#[embassy_executor::task]
pub async fn display_tick_task(scheduler: &'static SharedScheduler, tick_ms: u32) {
    info!("Display tick task started ({}ms)", tick_ms);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(tick_ms)));
    let clock = UptimeClock {
        start: Instant::now(),
    };

    loop {
        ticker.next().await;

        let status = scheduler.lock().await.tick(&clock);

        if status != TickStatus::Empty {
            trace!("Display tick: {}", status);
        }
    }
}
