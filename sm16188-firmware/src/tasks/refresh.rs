//! Refresh task
//!
//! Clocks the framebuffer out to the panel at a fixed rate. The SM16188
//! latches what it receives, so the rate only bounds how quickly drawing
//! becomes visible.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use crate::DISPLAY;

/// Frames between refresh statistics
const STATS_INTERVAL: u32 = 500;

/// Refresh task - sends the framebuffer every `interval_ms`
#[embassy_executor::task]
pub async fn refresh_task(interval_ms: u32) {
    info!("Refresh task started ({} ms)", interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(interval_ms)));
    let mut frames: u32 = 0;
    let mut busy_us: u64 = 0;

    loop {
        ticker.next().await;

        let start = Instant::now();
        if DISPLAY.with(|display| display.refresh()).is_none() {
            warn!("Refresh skipped, display not available");
            continue;
        }
        busy_us += start.elapsed().as_micros();
        frames += 1;

        if frames == STATS_INTERVAL {
            debug!("{} frames, {} us average", frames, busy_us / u64::from(frames));
            frames = 0;
            busy_us = 0;
        }
    }
}
