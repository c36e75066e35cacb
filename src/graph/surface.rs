//! Display surface — the document that holds at most one digit's graph.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DtmfError;

use super::canvas::render_svg;
use super::{GraphPlot, HEIGHT, WIDTH};

/// A document-like surface showing zero or one graph, keyed by digit.
pub trait Surface {
    /// Digit whose graph is currently shown.
    fn displayed(&self) -> Option<u8>;

    /// Replace the whole surface with `digit`'s graph.
    fn show(&mut self, digit: u8, title: &str, plot: &GraphPlot) -> Result<(), DtmfError>;

    /// Remove whatever is shown.
    fn clear(&mut self) -> Result<(), DtmfError>;
}

/// Show `digit`'s graph unless it is already on screen.
///
/// Returns `Ok(true)` when something was drawn.
pub fn draw_graph<S: Surface + ?Sized>(surface: &mut S, digit: u8) -> Result<bool, DtmfError> {
    if surface.displayed() == Some(digit) {
        debug!(digit, "graph already displayed");
        return Ok(false);
    }
    let plot = super::plot_digit(digit)?;
    surface.show(digit, &super::title(digit), &plot)?;
    Ok(true)
}

/// Keeps the shown graph as an SVG document, optionally mirrored to disk.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    current: Option<(u8, String)>,
    out_dir: Option<PathBuf>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the shown graph to `<dir>/dtmf-<digit>.svg`.
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        SvgSurface {
            current: None,
            out_dir: Some(dir.into()),
        }
    }

    /// The SVG document currently shown.
    pub fn svg(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, svg)| svg.as_str())
    }

    pub fn file_for(dir: &Path, digit: u8) -> PathBuf {
        dir.join(format!("dtmf-{digit}.svg"))
    }

    fn remove_mirror(&self) -> Result<(), DtmfError> {
        if let (Some(dir), Some((digit, _))) = (&self.out_dir, &self.current) {
            match std::fs::remove_file(Self::file_for(dir, *digit)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

impl Surface for SvgSurface {
    fn displayed(&self) -> Option<u8> {
        self.current.as_ref().map(|(digit, _)| *digit)
    }

    fn show(&mut self, digit: u8, title: &str, plot: &GraphPlot) -> Result<(), DtmfError> {
        let svg = render_svg(plot, title, WIDTH, HEIGHT);
        // The old mirror stays until the new one is on disk.
        if let Some(dir) = &self.out_dir {
            std::fs::create_dir_all(dir)?;
            let path = Self::file_for(dir, digit);
            std::fs::write(&path, &svg)?;
            debug!(digit, path = %path.display(), "graph written");
        }
        let replaced = match self.displayed() {
            Some(old) if old != digit => self.remove_mirror(),
            _ => Ok(()),
        };
        self.current = Some((digit, svg));
        replaced
    }

    fn clear(&mut self) -> Result<(), DtmfError> {
        self.remove_mirror()?;
        self.current = None;
        Ok(())
    }
}
