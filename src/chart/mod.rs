//! Loss-curve rendering. The training loop pushes one point per epoch and
//! periodically re-renders the whole series to a PNG on disk.

use image::{Rgb, RgbImage};
use std::path::Path;

use crate::error::Result;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 500;
const MARGIN: u32 = 50;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const SERIES: Rgb<u8> = Rgb([215, 60, 60]);

/// An accumulating 2-D series rendered as a polyline over plain axes.
/// The y axis starts at zero, which suits non-negative loss values.
#[derive(Debug, Default)]
pub struct LossChart {
    points: Vec<(f64, f64)>,
}

impl LossChart {
    pub fn new() -> LossChart {
        LossChart { points: Vec::new() }
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Renders the series to a PNG file. The format is taken from the
    /// path's extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

        let left = MARGIN as f64;
        let right = (WIDTH - MARGIN) as f64;
        let top = MARGIN as f64;
        let bottom = (HEIGHT - MARGIN) as f64;

        draw_line(&mut img, (left, top), (left, bottom), AXIS);
        draw_line(&mut img, (left, bottom), (right, bottom), AXIS);

        if self.points.len() >= 2 {
            let x_min = self.points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
            let x_max = self
                .points
                .iter()
                .map(|p| p.0)
                .fold(f64::NEG_INFINITY, f64::max);
            let y_max = self
                .points
                .iter()
                .map(|p| p.1)
                .fold(f64::NEG_INFINITY, f64::max);
            let x_span = (x_max - x_min).max(f64::EPSILON);
            let y_span = y_max.max(f64::EPSILON);

            let project = |(x, y): (f64, f64)| {
                (
                    left + (x - x_min) / x_span * (right - left),
                    bottom - y / y_span * (bottom - top),
                )
            };

            for pair in self.points.windows(2) {
                draw_line(&mut img, project(pair[0]), project(pair[1]), SERIES);
            }
        }

        img.save(path)?;
        Ok(())
    }
}

fn draw_line(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let x = (from.0 + dx * t).round();
        let y = (from.1 + dy * t).round();
        if x >= 0.0 && y >= 0.0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}
