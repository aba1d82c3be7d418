//! Turns an intensity field into colored dots on an RGB frame

use crate::field::{IntensityField, NORMAL_CEILING};
use crate::geometry::GridGeometry;
use image::{Rgb, RgbImage};

/// Frame buffer handed to the host, exactly width x height
pub type FrameImage = RgbImage;

/// Largest intensity that still grows a dot
///
/// Matches the white-hot tier, so the hottest core dots draw up to 1.6x.
const RADIUS_CEILING: f32 = 2.0;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// One dot to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotCommand {
    pub x: i32,
    pub y: i32,
    pub color: Rgb<u8>,
    pub radius: u32,
}

/// Color of a dot at `intensity`
///
/// Up to 1.0 the base color is scaled; above it the color blends toward
/// white, fully white at 2.0.
pub fn dot_color(base: Rgb<u8>, intensity: f32) -> Rgb<u8> {
    let channel = |c: u8| -> u8 {
        let c = c as f32;
        let value = if intensity > NORMAL_CEILING {
            let w = (intensity - NORMAL_CEILING).min(1.0);
            c * (1.0 - w) + 255.0 * w
        } else {
            c * intensity
        };
        value.clamp(0.0, 255.0) as u8
    };
    Rgb([channel(base[0]), channel(base[1]), channel(base[2])])
}

/// Draw radius of a dot at `intensity`, never below 1 pixel
pub fn dot_radius(base_radius: u32, intensity: f32) -> u32 {
    let scale = 0.8 + 0.4 * intensity.clamp(0.0, RADIUS_CEILING);
    ((base_radius as f32 * scale) as u32).max(1)
}

/// Linear blend between two colors, `t` in 0.0 - 1.0
pub fn mix_colors(from: Rgb<u8>, to: Rgb<u8>, t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| -> u8 {
        (a as f32 * (1.0 - t) + b as f32 * t).clamp(0.0, 255.0) as u8
    };
    Rgb([
        channel(from[0], to[0]),
        channel(from[1], to[1]),
        channel(from[2], to[2]),
    ])
}

/// Dots for every lit cell inside the disc
pub fn render(field: &IntensityField, geometry: &GridGeometry, base: Rgb<u8>) -> Vec<DotCommand> {
    geometry
        .valid_cells()
        .filter_map(|(col, row, _)| {
            let intensity = field.get(col, row);
            if intensity <= 0.0 {
                return None;
            }
            let (x, y) = geometry.to_pixel(col, row);
            Some(DotCommand {
                x,
                y,
                color: dot_color(base, intensity),
                radius: dot_radius(geometry.dot_radius(), intensity),
            })
        })
        .collect()
}

/// Fill a circle of `radius` around (`cx`, `cy`), clipped to the frame
pub fn draw_dot(frame: &mut FrameImage, cx: i32, cy: i32, color: Rgb<u8>, radius: u32) {
    let r = radius as i32;
    let (width, height) = (frame.width() as i32, frame.height() as i32);

    for dy in -r..=r {
        let y = cy + dy;
        if y < 0 || y >= height {
            continue;
        }
        for dx in -r..=r {
            let x = cx + dx;
            if x < 0 || x >= width || dx * dx + dy * dy > r * r {
                continue;
            }
            frame.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Clear `frame` to black and draw every dot
pub fn rasterize(commands: &[DotCommand], frame: &mut FrameImage) {
    frame.pixels_mut().for_each(|p| *p = BLACK);
    for dot in commands {
        draw_dot(frame, dot.x, dot.y, dot.color, dot.radius);
    }
}
