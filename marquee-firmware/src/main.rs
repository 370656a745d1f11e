//! Marquee - Queued OLED Display Firmware
//!
//! Main firmware binary for RP2040 boards with an SSD1306 OLED on I2C0
//! (SDA = GPIO4, SCL = GPIO5).
//!
//! Start-up runs the optional self-test pattern, then hands the panel to
//! the display scheduler. From then on two tasks share it: the tick task
//! advances one animation frame per period, and the producer task feeds
//! status records into the queue.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use marquee_core::config::{parse_config, SchedulerConfig};
use marquee_core::DisplayScheduler;
use marquee_display::{self_test, Ssd1306};

mod tasks;

/// Embedded default configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// I2C bus frequency for the panel
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Blocking I2C bus the panel sits on
pub type DisplayBus = I2c<'static, I2C0, i2c::Blocking>;

/// Scheduler driving the board's panel
pub type Scheduler = DisplayScheduler<Ssd1306<DisplayBus>>;

/// Scheduler shared between the tick and producer tasks
pub type SharedScheduler = Mutex<CriticalSectionRawMutex, Scheduler>;

// Must live forever for task references
static SCHEDULER: StaticCell<SharedScheduler> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Marquee firmware v{} starting...", marquee_core::VERSION);

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Setup I2C0 for the OLED
    let i2c_config = {
        let mut cfg = i2c::Config::default();
        cfg.frequency = I2C_FREQUENCY_HZ;
        cfg
    };
    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut oled = Ssd1306::new(bus);
    let panel_ok = match oled.init() {
        Ok(()) => true,
        Err(e) => {
            warn!("OLED not responding ({}), display disabled", e);
            false
        }
    };

    if panel_ok {
        if let Err(e) = self_test::run(
            &mut oled,
            &mut Delay,
            config.self_test,
            config.post_test_delay_ms,
        ) {
            warn!("Self-test aborted: {}", e);
        }
    }

    // An absent panel runs the scheduler disabled, so producers keep working
    let enabled = config.enabled && panel_ok;
    let mut scheduler = DisplayScheduler::with_layout(oled, enabled, config.layout);

    match scheduler.begin(&config.startup) {
        Ok(()) => info!("Display scheduler started"),
        Err(e) => warn!("Display scheduler not started: {}", e),
    }

    let scheduler = SCHEDULER.init(Mutex::new(scheduler));

    spawner
        .spawn(tasks::display_tick_task(scheduler, config.tick_ms))
        .unwrap();
    spawner.spawn(tasks::producer_task(scheduler)).unwrap();

    info!("All tasks spawned");
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> SchedulerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config loaded: enabled={}, tick={}ms, self_test={}",
                config.enabled, config.tick_ms, config.self_test
            );
            config
        }
        Err(e) => {
            warn!("display.toml rejected ({}), using defaults", e);
            SchedulerConfig::default()
        }
    }
}
