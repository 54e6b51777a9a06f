//! Demo scene task
//!
//! Cycles through scenes that exercise the drawing API: a scrolling
//! marquee, the panel test patterns, native primitives, a brightness ramp
//! and embedded-graphics text.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use sm16188_core::graphics::{GraphicsMode, TestPattern};

use crate::config::SceneConfig;
use crate::DISPLAY;

/// Marquee scroll step
const SCROLL_STEP_MS: u64 = 40;

/// Primitive animation step
const SHAPE_STEP_MS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
enum Scene {
    Marquee,
    Patterns,
    Shapes,
    Brightness,
    Graphics,
}

impl Scene {
    fn next(self) -> Self {
        match self {
            Scene::Marquee => Scene::Patterns,
            Scene::Patterns => Scene::Shapes,
            Scene::Shapes => Scene::Brightness,
            Scene::Brightness => Scene::Graphics,
            Scene::Graphics => Scene::Marquee,
        }
    }
}

/// Scene task - runs each scene for `config.interval_ms`
#[embassy_executor::task]
pub async fn scene_task(config: &'static SceneConfig) {
    info!("Scene task started");

    let interval = Duration::from_millis(u64::from(config.interval_ms));
    let mut scene = Scene::Marquee;

    loop {
        debug!("Scene: {}", scene);
        match scene {
            Scene::Marquee => marquee(config.marquee.as_bytes(), interval).await,
            Scene::Patterns => patterns(interval).await,
            Scene::Shapes => shapes(interval).await,
            Scene::Brightness => brightness_ramp(interval).await,
            Scene::Graphics => graphics(interval).await,
        }
        scene = scene.next();
    }
}

/// Scroll `text` in from the right edge until it leaves on the left
async fn marquee(text: &[u8], interval: Duration) {
    let Some((width, height, text_width, font_height)) = DISPLAY.with(|display| {
        let canvas = display.canvas();
        let (text_width, font_height) = display
            .font()
            .map_or((0, 0), |font| (font.text_width(text), i32::from(font.height())));
        (canvas.width(), canvas.height(), text_width, font_height)
    }) else {
        return;
    };

    let top = (height - font_height) / 2;
    let end = Instant::now() + interval;
    let mut ticker = Ticker::every(Duration::from_millis(SCROLL_STEP_MS));
    let mut left = width;

    while Instant::now() < end {
        DISPLAY.with(|display| {
            display.clear(true);
            display.draw_marquee(text, left, top);
        });

        left -= 1;
        if left < -text_width {
            left = width;
        }
        ticker.next().await;
    }
}

async fn patterns(interval: Duration) {
    let step = interval / TestPattern::ALL.len() as u32;
    for pattern in TestPattern::ALL {
        DISPLAY.with(|display| display.draw_test_pattern(pattern));
        Timer::after(step).await;
    }
}

/// Growing circle, a filled box, the border and a toggled sweep line
async fn shapes(interval: Duration) {
    let Some((width, height)) =
        DISPLAY.with(|display| (display.canvas().width(), display.canvas().height()))
    else {
        return;
    };

    let end = Instant::now() + interval;
    let mut ticker = Ticker::every(Duration::from_millis(SHAPE_STEP_MS));
    let max_radius = height / 2 - 1;
    let mut radius = 0;
    let mut sweep = 0;

    while Instant::now() < end {
        DISPLAY.with(|display| {
            display.clear(true);
            display.draw_box(0, 0, width - 1, height - 1, GraphicsMode::Normal);
            display.draw_circle(width / 4, height / 2, radius, GraphicsMode::Normal);
            display.draw_filled_box(
                width / 2,
                height / 2 - radius / 2,
                width / 2 + radius,
                height / 2 + radius / 2,
                GraphicsMode::Or,
            );
            display.draw_line(sweep, 0, width - 1 - sweep, height - 1, GraphicsMode::Toggle);
        });

        radius = if radius >= max_radius { 0 } else { radius + 1 };
        sweep = (sweep + 1) % width;
        ticker.next().await;
    }
}

/// Whole panel lit while the brightness walks down and back up
async fn brightness_ramp(interval: Duration) {
    let Some(restore) = DISPLAY.with(|display| {
        display.clear(false);
        display.brightness().get()
    }) else {
        return;
    };

    let step = interval / 32;
    for level in (0..16u8).rev().chain(0..16u8) {
        DISPLAY.with(|display| display.set_brightness(level));
        Timer::after(step).await;
    }

    DISPLAY.with(|display| display.set_brightness(restore));
}

/// Text through embedded-graphics instead of the panel font renderer
async fn graphics(interval: Duration) {
    let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);

    DISPLAY.with(|display| {
        let canvas = display.canvas_mut();
        canvas.clear(true);
        let _ = Text::with_baseline("e-g", Point::new(1, 1), style, Baseline::Top).draw(canvas);
        let _ = Text::with_baseline("SM16188", Point::new(1, 8), style, Baseline::Top).draw(canvas);
    });

    Timer::after(interval).await;
}
