//! Waveform graph — the visual path.
//!
//! The plot is a pure function of the tone, width and amplitude. It is not
//! a sampled audio signal: each horizontal step advances the two phases by
//! `π / freq * 10`, which gives a readable picture of the beat between the
//! row and column tones rather than a time-accurate trace.

pub mod canvas;
pub mod surface;

use std::f64::consts::PI;

use serde::Serialize;

use crate::error::DtmfError;
use crate::tone::{self, ToneDefinition};

pub use canvas::{Canvas2d, SvgCanvas, draw_plot};
pub use surface::{Surface, SvgSurface, draw_graph};

/// Horizontal extent of the plot in pixels.
pub const WIDTH: u32 = 1260;
/// Height of the drawing surface.
pub const HEIGHT: u32 = 400;
/// Vertical position of the zero line.
pub const BASELINE: i32 = 180;
pub const AMPLITUDE: f64 = 80.0;

/// Spacing and length of the baseline tick marks.
const TICK_SPACING: usize = 10;
const TICK_LENGTH: i32 = 5;

/// Phase step scale per pixel.
const PHASE_SCALE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Everything needed to draw one digit's graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphPlot {
    /// Flat reference marks along the baseline, drawn first.
    pub ticks: Vec<Segment>,
    /// Pen origin followed by one point per pixel column, `0..=width`.
    pub points: Vec<Point>,
}

impl GraphPlot {
    /// Consecutive waveform points joined as line segments.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points
            .windows(2)
            .map(|w| Segment { from: w[0], to: w[1] })
    }
}

/// Baseline tick marks for a plot `width` pixels wide.
pub fn baseline_ticks(width: u32) -> Vec<Segment> {
    (0..width as i32)
        .step_by(TICK_SPACING)
        .map(|i| Segment {
            from: Point { x: i + TICK_LENGTH, y: BASELINE },
            to: Point { x: i, y: BASELINE },
        })
        .collect()
}

/// Waveform points for `tone`, starting from the pen origin `(0, BASELINE)`.
pub fn waveform_points(tone: ToneDefinition, width: u32, amplitude: f64) -> Vec<Point> {
    let step_high = PI / tone.high * PHASE_SCALE;
    let step_low = PI / tone.low * PHASE_SCALE;
    let mut phase_high = 0.0_f64;
    let mut phase_low = 0.0_f64;

    let mut points = Vec::with_capacity(width as usize + 2);
    points.push(Point { x: 0, y: BASELINE });
    for t in 0..=width as i32 {
        let y = (BASELINE as f64 - amplitude * (phase_high.sin() + phase_low.sin())).floor();
        points.push(Point { x: t, y: y as i32 });
        phase_high += step_high;
        phase_low += step_low;
    }
    points
}

pub fn plot(tone: ToneDefinition, width: u32, amplitude: f64) -> GraphPlot {
    GraphPlot {
        ticks: baseline_ticks(width),
        points: waveform_points(tone, width, amplitude),
    }
}

/// The standard-size plot for a digit.
pub fn plot_digit(digit: u8) -> Result<GraphPlot, DtmfError> {
    Ok(plot(tone::lookup(digit)?, WIDTH, AMPLITUDE))
}

/// Heading shown above a digit's graph.
pub fn title(digit: u8) -> String {
    format!("DTMF {digit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_count_and_origin() {
        let p = plot_digit(0).unwrap();
        assert_eq!(p.points.len(), WIDTH as usize + 2);
        assert_eq!(p.points[0], Point { x: 0, y: BASELINE });
        assert_eq!(p.points[1], Point { x: 0, y: BASELINE });
        assert_eq!(p.points.last().unwrap().x, WIDTH as i32);
        assert_eq!(p.segments().count(), WIDTH as usize + 1);
    }

    #[test]
    fn ticks_cover_width() {
        let ticks = baseline_ticks(WIDTH);
        assert_eq!(ticks.len(), 126);
        assert_eq!(ticks[0].from, Point { x: 5, y: 180 });
        assert_eq!(ticks[0].to, Point { x: 0, y: 180 });
        assert_eq!(ticks[125].to.x, 1250);
        assert!(ticks.iter().all(|s| s.from.y == BASELINE && s.to.y == BASELINE));
    }

    #[test]
    fn known_values_for_zero() {
        let p = plot_digit(0).unwrap();
        // t = 1: 180 - 80 * (sin(π/1336*10) + sin(π/941*10)) ≈ 175.45
        assert_eq!(p.points[2], Point { x: 1, y: 175 });
    }

    #[test]
    fn reproducible_from_formula() {
        for digit in [0u8, 5, 9] {
            let tone = tone::lookup(digit).unwrap();
            let points = plot_digit(digit).unwrap().points;

            let mut expected = vec![(0, 180)];
            let (mut a1, mut a2) = (0.0_f64, 0.0_f64);
            for t in 0..=1260 {
                let y = (180.0 - 80.0 * (a1.sin() + a2.sin())).floor() as i32;
                expected.push((t, y));
                a1 += (PI / tone.high) * 10.0;
                a2 += (PI / tone.low) * 10.0;
            }

            let actual: Vec<(i32, i32)> = points.iter().map(|p| (p.x, p.y)).collect();
            assert_eq!(actual, expected, "digit {digit}");
        }
    }

    #[test]
    fn stays_within_amplitude_band() {
        for digit in 0..10u8 {
            let p = plot_digit(digit).unwrap();
            for pt in &p.points {
                assert!(
                    pt.y >= BASELINE - 2 * AMPLITUDE as i32 - 1 && pt.y <= BASELINE + 2 * AMPLITUDE as i32,
                    "digit {digit}: {pt:?}"
                );
            }
        }
    }

    #[test]
    fn digits_draw_differently() {
        assert_ne!(plot_digit(1).unwrap().points, plot_digit(2).unwrap().points);
    }

    #[test]
    fn out_of_range_digit() {
        assert!(plot_digit(10).is_err());
    }

    #[test]
    fn titles() {
        assert_eq!(title(7), "DTMF 7");
    }
}
