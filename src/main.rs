use anyhow::Context;
use clap::Parser;

use pixel_blit::cli::Cli;
use pixel_blit::logging::init_logging;
use pixel_blit::{KeyCode, PixelBuffer, Presenter};

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const SCROLL_SPEED: f32 = 60.0;
const CURSOR_SIZE: u32 = 6;

/// Frame rate counter, reported once per interval
struct FpsCounter {
    frame_count: u32,
    elapsed: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_count: 0,
            elapsed: 0.0,
        }
    }

    fn update(&mut self, delta: f32) {
        self.frame_count += 1;
        self.elapsed += delta;

        if self.elapsed >= FPS_UPDATE_INTERVAL {
            log::info!("FPS: {:.1}", self.frame_count as f32 / self.elapsed);
            self.frame_count = 0;
            self.elapsed = 0.0;
        }
    }
}

/// XOR texture scrolled by `offset`, with a marker square under the cursor
fn draw_frame(buffer: &mut PixelBuffer, offset: u32, cursor: (i32, i32), pressed: bool) {
    let (width, height) = buffer.dimensions();
    let channels = buffer.channels();

    for y in 0..height {
        for x in 0..width {
            let v = (x.wrapping_add(offset) ^ y) as u8;
            let color = [v, v.wrapping_mul(3), 255 - v, 255];
            buffer.set_pixel(x, y, &color[..channels]);
        }
    }

    let marker = if pressed { [255, 64, 64, 255] } else { [255, 255, 255, 255] };
    let (cx, cy) = cursor;
    for dy in 0..CURSOR_SIZE as i32 {
        for dx in 0..CURSOR_SIZE as i32 {
            let (px, py) = (cx + dx, cy + dy);
            if px >= 0 && py >= 0 {
                buffer.set_pixel(px as u32, py as u32, &marker[..channels]);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    let config = cli.presenter_config()?;
    let mut presenter = Presenter::from_config(config).context("failed to open presenter")?;

    if let Some(icon) = &cli.icon {
        presenter
            .set_icon(icon, cli.icon_relative)
            .context("failed to set window icon")?;
    }

    log::info!("pixel-blit - Esc or close the window to quit");

    let mut fps = FpsCounter::new();
    let mut scroll = 0.0f32;

    while presenter.is_open() && !presenter.key(KeyCode::Esc) {
        if cli.frames.is_some_and(|limit| presenter.frame_count() >= limit) {
            break;
        }

        let speed = if presenter.key(KeyCode::Space) { 4.0 } else { 1.0 };
        scroll += presenter.delta_time() * SCROLL_SPEED * speed;

        let cursor = (presenter.mouse_x(), presenter.mouse_y());
        let pressed = presenter.mouse_left();
        draw_frame(presenter.buffer_mut(), scroll as u32, cursor, pressed);

        presenter.present()?;
        fps.update(presenter.delta_time());
    }

    log::info!("exiting after {} frames", presenter.frame_count());
    Ok(())
}
