use rayon::prelude::*;

use crate::grid::{Cell, Grid};

// Activator palette, low to high b
const SUBSTRATE_DARK: [u8; 4] = [12, 14, 30, 255];
const ACTIVATOR_LOW: [u8; 4] = [40, 70, 140, 255];
const ACTIVATOR_MID: [u8; 4] = [80, 190, 170, 255];
const ACTIVATOR_HIGH: [u8; 4] = [245, 240, 200, 255];

#[inline]
fn lerp_color(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t).round() as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t).round() as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t).round() as u8,
        255,
    ]
}

#[inline]
fn channel(v: f32) -> u8 {
    (255.0 * v.clamp(0.0, 1.0)).round() as u8
}

/// Texture upload layout: substrate in red, activator in blue, green zero,
/// opaque alpha. One RGBA8 texel per cell, row-major.
pub fn render_texture(grid: &Grid<Cell>) -> Vec<u8> {
    let cols = grid.cols;
    let mut rgba = vec![0u8; grid.rows * cols * 4];

    rgba.par_chunks_mut(cols * 4)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, c) in grid.row(row).iter().enumerate() {
                out[col * 4..col * 4 + 4].copy_from_slice(&[channel(c.a), 0, channel(c.b), 255]);
            }
        });

    rgba
}

/// Render the activator through a color ramp.
pub fn render_activator(grid: &Grid<Cell>) -> Vec<u8> {
    let cols = grid.cols;
    let mut rgba = vec![0u8; grid.rows * cols * 4];

    rgba.par_chunks_mut(cols * 4)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, c) in grid.row(row).iter().enumerate() {
                let b = c.b;
                let color = if b < 0.1 {
                    lerp_color(SUBSTRATE_DARK, ACTIVATOR_LOW, b / 0.1)
                } else if b < 0.3 {
                    lerp_color(ACTIVATOR_LOW, ACTIVATOR_MID, (b - 0.1) / 0.2)
                } else {
                    lerp_color(ACTIVATOR_MID, ACTIVATOR_HIGH, (b - 0.3) / 0.7)
                };
                out[col * 4..col * 4 + 4].copy_from_slice(&color);
            }
        });

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_maps_a_to_red_and_b_to_blue() {
        let mut g = Grid::filled(2, 3, Cell::SUBSTRATE);
        g.set(1, 2, Cell::new(0.5, 0.25));
        let px = render_texture(&g);
        assert_eq!(px.len(), 2 * 3 * 4);
        assert_eq!(&px[0..4], &[255, 0, 0, 255]);
        let i = (1 * 3 + 2) * 4;
        // round(127.5) = 128, round(63.75) = 64
        assert_eq!(&px[i..i + 4], &[128, 0, 64, 255]);
    }

    #[test]
    fn palette_endpoints() {
        let mut g = Grid::filled(1, 2, Cell::SUBSTRATE);
        g.set(0, 1, Cell::new(0.0, 1.0));
        let px = render_activator(&g);
        assert_eq!(&px[0..4], &SUBSTRATE_DARK);
        assert_eq!(&px[4..8], &ACTIVATOR_HIGH);
    }
}
