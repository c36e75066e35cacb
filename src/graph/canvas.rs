//! 2D drawing surface and the SVG renderer.

use std::fmt::Write;

use super::GraphPlot;

/// Canvas-style path drawing: move/line to build a path, stroke to paint it.
pub trait Canvas2d {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
}

/// Draw `plot` onto `canvas`: baseline ticks first, then the waveform.
pub fn draw_plot<C: Canvas2d + ?Sized>(plot: &GraphPlot, canvas: &mut C) {
    for tick in &plot.ticks {
        canvas.move_to(tick.from.x as f64, tick.from.y as f64);
        canvas.line_to(tick.to.x as f64, tick.to.y as f64);
    }
    canvas.stroke();

    for seg in plot.segments() {
        canvas.move_to(seg.from.x as f64, seg.from.y as f64);
        canvas.line_to(seg.to.x as f64, seg.to.y as f64);
    }
    canvas.stroke();
}

/// Height of the heading band above the graph.
const HEADER_HEIGHT: u32 = 48;

/// Collects stroked paths and serializes them as an SVG document.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    pending: String,
    paths: Vec<String>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        SvgCanvas {
            width,
            height,
            pending: String::new(),
            paths: Vec::new(),
        }
    }

    /// Path data of every stroke so far.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Finish into a standalone SVG document with `title` as its heading.
    pub fn finish(mut self, title: &str) -> String {
        self.stroke();
        let total_height = self.height + HEADER_HEIGHT;
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{total_height}" viewBox="0 0 {w} {total_height}">"#,
            w = self.width,
        );
        let _ = writeln!(svg, "  <title>{}</title>", escape(title));
        let _ = writeln!(
            svg,
            r#"  <text x="8" y="34" font-family="Montserrat,sans-serif" font-weight="200" font-size="28">{}</text>"#,
            escape(title)
        );
        let _ = writeln!(
            svg,
            r#"  <g transform="translate(0,{HEADER_HEIGHT})" fill="none" stroke="black" stroke-width="1">"#
        );
        for d in &self.paths {
            let _ = writeln!(svg, r#"    <path d="{d}"/>"#);
        }
        svg.push_str("  </g>\n</svg>\n");
        svg
    }
}

impl Canvas2d for SvgCanvas {
    fn move_to(&mut self, x: f64, y: f64) {
        push_command(&mut self.pending, 'M', x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        push_command(&mut self.pending, 'L', x, y);
    }

    fn stroke(&mut self) {
        if !self.pending.is_empty() {
            self.paths.push(std::mem::take(&mut self.pending));
        }
    }
}

fn push_command(path: &mut String, cmd: char, x: f64, y: f64) {
    if !path.is_empty() {
        path.push(' ');
    }
    let _ = write!(path, "{cmd}{x} {y}");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Render `plot` as a complete SVG document.
pub fn render_svg(plot: &GraphPlot, title: &str, width: u32, height: u32) -> String {
    let mut canvas = SvgCanvas::new(width, height);
    draw_plot(plot, &mut canvas);
    canvas.finish(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{self, HEIGHT, WIDTH};

    #[derive(Debug, PartialEq)]
    enum Op {
        Move(f64, f64),
        Line(f64, f64),
        Stroke,
    }

    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
    }

    impl Canvas2d for RecordingCanvas {
        fn move_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Move(x, y));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Line(x, y));
        }
        fn stroke(&mut self) {
            self.ops.push(Op::Stroke);
        }
    }

    #[test]
    fn ticks_drawn_before_waveform() {
        let plot = graph::plot_digit(4).unwrap();
        let mut canvas = RecordingCanvas::default();
        draw_plot(&plot, &mut canvas);

        assert_eq!(canvas.ops[0], Op::Move(5.0, 180.0));
        assert_eq!(canvas.ops[1], Op::Line(0.0, 180.0));
        // 126 ticks, two ops each, then the first stroke
        assert_eq!(canvas.ops[252], Op::Stroke);
        // waveform starts at the pen origin
        assert_eq!(canvas.ops[253], Op::Move(0.0, 180.0));
        assert_eq!(canvas.ops.last(), Some(&Op::Stroke));
        assert_eq!(canvas.ops.len(), 252 + 1 + 2 * (WIDTH as usize + 1) + 1);
    }

    #[test]
    fn waveform_segments_are_connected() {
        let plot = graph::plot_digit(6).unwrap();
        let mut canvas = RecordingCanvas::default();
        draw_plot(&plot, &mut canvas);

        let wave = &canvas.ops[253..canvas.ops.len() - 1];
        for pair in wave.chunks(4).filter(|c| c.len() == 4) {
            // each segment begins where the previous one ended
            if let (Op::Line(x0, y0), Op::Move(x1, y1)) = (&pair[1], &pair[2]) {
                assert_eq!((x0, y0), (x1, y1));
            } else {
                panic!("unexpected op order: {pair:?}");
            }
        }
    }

    #[test]
    fn svg_document_shape() {
        let svg = render_svg(&graph::plot_digit(2).unwrap(), "DTMF 2", WIDTH, HEIGHT);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1260""#));
        assert!(svg.contains("<title>DTMF 2</title>"));
        assert_eq!(svg.matches("<path ").count(), 2);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn stroke_without_path_is_ignored() {
        let mut canvas = SvgCanvas::new(10, 10);
        canvas.stroke();
        canvas.move_to(1.0, 2.0);
        canvas.line_to(3.0, 4.0);
        canvas.stroke();
        canvas.stroke();
        assert_eq!(canvas.paths(), &["M1 2 L3 4".to_string()]);
    }

    #[test]
    fn title_is_escaped() {
        let svg = SvgCanvas::new(10, 10).finish("a<b & c");
        assert!(svg.contains("a&lt;b &amp; c"));
    }
}
