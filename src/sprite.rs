//! Inline terminal rendering of sprite images

use std::io::{self, Cursor, IsTerminal, Write};

use base64::{engine::general_purpose, Engine as _};
use crossterm::QueueableCommand;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use image::{imageops::FilterType, DynamicImage, ImageFormat, Rgba, RgbaImage};

const KITTY_CHUNK_SIZE: usize = 4096;
const ALPHA_THRESHOLD: u8 = 128;
const FALLBACK_COLUMNS: u16 = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteMode {
    Kitty { columns: u16 },
    HalfBlock { columns: u16 },
    Disabled,
}

impl SpriteMode {
    /// Pick a renderer for the current stdout.
    pub fn detect() -> Self {
        if !io::stdout().is_terminal() {
            return SpriteMode::Disabled;
        }
        let terminal_cols = crossterm::terminal::size()
            .map(|(cols, _)| cols)
            .unwrap_or(FALLBACK_COLUMNS);
        let columns = (terminal_cols / 2).max(1);
        let kitty = std::env::var_os("KITTY_WINDOW_ID").is_some()
            || std::env::var("TERM").is_ok_and(|term| term.contains("kitty"));
        if kitty {
            SpriteMode::Kitty { columns }
        } else {
            SpriteMode::HalfBlock { columns }
        }
    }

    pub fn render(&self, out: &mut dyn Write, bytes: &[u8]) -> Result<(), String> {
        match *self {
            SpriteMode::Disabled => Ok(()),
            SpriteMode::Kitty { columns } => {
                let image = decode_sprite(bytes)?;
                let png = encode_png(&image)?;
                let (width, height) = image.dimensions();
                let sequence = kitty_sequence(&png, width, height, columns)?;
                writeln!(out, "{sequence}").map_err(|err| err.to_string())
            }
            SpriteMode::HalfBlock { columns } => {
                let image = decode_sprite(bytes)?;
                write_half_blocks(out, &image, columns).map_err(|err| err.to_string())
            }
        }
    }
}

/// Decode and crop to the opaque region so small sprites are not mostly padding.
pub fn decode_sprite(bytes: &[u8]) -> Result<RgbaImage, String> {
    let image = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    Ok(crop_transparent(image.to_rgba8()))
}

fn crop_transparent(image: RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] < ALPHA_THRESHOLD {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    match bounds {
        Some((x0, y0, x1, y1)) if (x1 - x0 + 1, y1 - y0 + 1) != (width, height) => {
            image::imageops::crop_imm(&image, x0, y0, x1 - x0 + 1, y1 - y0 + 1)
                .to_image()
        }
        _ => image,
    }
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|err| err.to_string())?;
    Ok(buf)
}

/// Kitty graphics protocol transmission of a PNG, split into protocol chunks.
pub fn kitty_sequence(png: &[u8], width: u32, height: u32, cols: u16) -> Result<String, String> {
    let payload = general_purpose::STANDARD.encode(png);
    let payload = payload.as_bytes();
    let total_chunks = payload.len().div_ceil(KITTY_CHUNK_SIZE);
    let mut sequences = String::new();

    for (index, chunk) in payload.chunks(KITTY_CHUNK_SIZE).enumerate() {
        let more = u8::from(index + 1 < total_chunks);
        let chunk_str = std::str::from_utf8(chunk).map_err(|err| err.to_string())?;
        if index == 0 {
            let mut params = format!("f=100,s={width},v={height},a=T,t=d");
            if cols > 0 {
                params.push_str(&format!(",c={cols}"));
            }
            params.push_str(&format!(",m={more}"));
            sequences.push_str(&format!("\x1b_G{params};{chunk_str}\x1b\\"));
        } else {
            sequences.push_str(&format!("\x1b_Gm={more};{chunk_str}\x1b\\"));
        }
    }
    Ok(sequences)
}

/// Two pixel rows per terminal row: the upper half block takes the top pixel
/// as foreground and the bottom pixel as background.
pub fn write_half_blocks(out: &mut dyn Write, image: &RgbaImage, columns: u16) -> io::Result<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Ok(());
    }
    let target_width = width.min(u32::from(columns)).max(1);
    let target_height =
        ((height as f32 * target_width as f32 / width as f32).round() as u32).max(1);
    let scaled = if (target_width, target_height) == (width, height) {
        image.clone()
    } else {
        image::imageops::resize(image, target_width, target_height, FilterType::Nearest)
    };

    for y in (0..target_height).step_by(2) {
        for x in 0..target_width {
            let top = *scaled.get_pixel(x, y);
            let bottom = if y + 1 < target_height {
                *scaled.get_pixel(x, y + 1)
            } else {
                Rgba([0, 0, 0, 0])
            };
            write_cell(out, top, bottom)?;
        }
        out.queue(ResetColor)?.queue(Print('\n'))?;
    }
    out.flush()
}

fn write_cell(out: &mut dyn Write, top: Rgba<u8>, bottom: Rgba<u8>) -> io::Result<()> {
    let top_visible = top[3] >= ALPHA_THRESHOLD;
    let bottom_visible = bottom[3] >= ALPHA_THRESHOLD;
    match (top_visible, bottom_visible) {
        (true, true) => out
            .queue(SetForegroundColor(rgb(top)))?
            .queue(SetBackgroundColor(rgb(bottom)))?
            .queue(Print('▀'))?,
        (true, false) => out
            .queue(ResetColor)?
            .queue(SetForegroundColor(rgb(top)))?
            .queue(Print('▀'))?,
        (false, true) => out
            .queue(ResetColor)?
            .queue(SetForegroundColor(rgb(bottom)))?
            .queue(Print('▄'))?,
        (false, false) => out.queue(ResetColor)?.queue(Print(' '))?,
    };
    Ok(())
}

fn rgb(pixel: Rgba<u8>) -> Color {
    Color::Rgb {
        r: pixel[0],
        g: pixel[1],
        b: pixel[2],
    }
}
