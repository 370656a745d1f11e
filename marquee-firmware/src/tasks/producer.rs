//! Status producer task
//!
//! Feeds the display the way an application would: a connecting notice,
//! the device address once the network is up, then a periodic uptime
//! readout. The network is simulated with fixed delays.

use core::fmt::Write;

use defmt::*;
use embassy_time::{Instant, Timer};
use heapless::String;

use marquee_core::messages::WIFI_CONNECTING;
use marquee_core::record::PAYLOAD_MAX_LEN;
use marquee_core::{PayloadSource, Style};

use crate::SharedScheduler;

/// Simulated time to obtain an address
const CONNECT_DELAY_SECS: u64 = 5;

/// Address shown once "connected"
const DEVICE_IP: &str = "192.168.7.11";

/// Period between uptime records
const UPTIME_PERIOD_SECS: u64 = 30;

/// Scroll code for a record that stays put
const SCROLL_FROZEN: u8 = 4;

/// Scroll code that runs the full still, left, right, clear sequence
const SCROLL_FULL: u8 = 3;

/// Producer task - pushes status records into the display queue
#[embassy_executor::task]
pub async fn producer_task(scheduler: &'static SharedScheduler) {
    info!("Producer task started");

    Timer::after_secs(1).await;
    let pushed = scheduler.lock().await.enqueue_display(
        Style::FullWide.code(),
        SCROLL_FROZEN,
        false,
        [
            PayloadSource::Literal(WIFI_CONNECTING),
            PayloadSource::Literal("..."),
            PayloadSource::Literal(""),
        ],
    );
    if let Err(e) = pushed {
        debug!("Connecting notice not queued: {}", e);
    }

    Timer::after_secs(CONNECT_DELAY_SECS).await;

    // New address replaces anything still waiting
    let pushed = scheduler.lock().await.enqueue_display(
        Style::DeviceIp.code(),
        SCROLL_FULL,
        true,
        [
            PayloadSource::Literal(""),
            PayloadSource::Literal(DEVICE_IP),
            PayloadSource::Literal(""),
        ],
    );
    match pushed {
        Ok(()) => info!("Device address queued: {}", DEVICE_IP),
        Err(e) => debug!("Device address not queued: {}", e),
    }

    let start = Instant::now();
    loop {
        Timer::after_secs(UPTIME_PERIOD_SECS).await;

        let mut minutes: String<PAYLOAD_MAX_LEN> = String::new();
        let _ = core::write!(minutes, "{} min", start.elapsed().as_secs() / 60);

        let pushed = scheduler.lock().await.enqueue_display(
            Style::Default.code(),
            SCROLL_FROZEN,
            false,
            [
                PayloadSource::Literal("Uptime"),
                PayloadSource::text(&minutes),
                PayloadSource::Absent,
            ],
        );
        if let Err(e) = pushed {
            debug!("Uptime record not queued: {}", e);
        }
    }
}
