//! SM16188 demo firmware
//!
//! Drives a chain of SM16188 32x16 LED tiles from an RP2040 over two GPIO
//! data lines and cycles through demo scenes. Panel size, bit timing and
//! scene settings come from `display.toml`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use sm16188_core::config::framebuffer_len;
use sm16188_driver::{DataLines, SharedDisplay, Sm16188};
use sm16188_hal_rp2040::{EmbassyClock, FlexLine};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::config::{parse_config, FirmwareConfig};

mod config;
mod fonts;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// Largest supported panel, in tiles
const MAX_COLUMNS: u8 = 4;
const MAX_ROWS: u8 = 2;

/// Framebuffer sized for the largest panel; smaller grids use a prefix
const FRAMEBUFFER_CAPACITY: usize = framebuffer_len(MAX_COLUMNS, MAX_ROWS);

/// The panel as wired on this board
pub type Display =
    Sm16188<'static, FlexLine<'static>, FlexLine<'static>, EmbassyClock, FRAMEBUFFER_CAPACITY>;

/// Display shared by the refresh and scene tasks
pub static DISPLAY: SharedDisplay<Display> = SharedDisplay::new();

// Configuration must live forever for task references
static CONFIG: StaticCell<FirmwareConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("SM16188 firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static FirmwareConfig = CONFIG.init(load_config());
    info!(
        "Panel {}x{} tiles, {} us bit cell",
        config.display.grid.columns,
        config.display.grid.rows,
        config.timing.cell_us
    );

    // Data lines are board-specific (GPIO2: even bytes, GPIO3: odd bytes)
    let lines = DataLines::new(FlexLine::new(p.PIN_2), FlexLine::new(p.PIN_3));

    let mut display = match Display::new(config.display, lines, EmbassyClock::new(), config.timing)
    {
        Ok(display) => display,
        Err(e) => {
            error!("Display init failed: {:?}", e);
            defmt::panic!("cannot drive panel");
        }
    };

    match fonts::system_5x7() {
        Ok(font) => display.select_font(font),
        Err(e) => warn!("Built-in font rejected: {:?}", e),
    }

    info!("Frame time {} us", display.frame_micros());
    DISPLAY.install(display);

    // Spawn tasks
    spawner
        .spawn(tasks::refresh_task(config.refresh_interval_ms))
        .unwrap();
    spawner.spawn(tasks::scene_task(&config.scene)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration
///
/// build.rs has already validated display.toml, so a failure here means
/// the no_std parser and the build-time check disagree. Fall back to the
/// defaults rather than leaving the panel dark.
fn load_config() -> FirmwareConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            FirmwareConfig::default()
        }
    }
}
