//! Residual diagnostics for the terminal model.
//!
//! ## Purpose
//!
//! This module prepares residual-versus-term diagnostics: one panel per
//! selected term holding the term's values, the model residuals and a LOWESS
//! trend line, laid out on a grid of at most three columns. Drawing is left to
//! a [`ResidualRenderer`]; [`CsvRenderer`] exports the panels for external
//! plotting tools.
//!
//! ## Design notes
//!
//! * **Trend**: LOWESS with a 2/3 span and 3 robustness iterations, computed
//!   with the `lowess` crate in `f64`. A panel without a usable trend keeps
//!   `trend = None`.
//! * **Layout**: `cols = min(n, 3)`, `rows = ceil(n / cols)`; panels fill the
//!   grid row by row.
//!
//! ## Invariants
//!
//! * Every panel's `values` and `residuals` have one entry per observation.
//! * Trend points are sorted by x.
//!
//! ## Non-goals
//!
//! * This module does not rasterise or display figures.

use std::io::Write;

use log::debug;
use lowess::prelude::{Batch, Lowess};
use num_traits::Float;

use crate::algorithms::design::DesignMatrix;
use crate::algorithms::regression::OlsFit;
use crate::math::monomial::Monomial;

// ============================================================================
// Layout
// ============================================================================

/// Grid arrangement of residual panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of panel rows.
    pub rows: usize,

    /// Number of panel columns.
    pub cols: usize,
}

impl GridLayout {
    /// Maximum number of panels per row.
    pub const MAX_COLUMNS: usize = 3;

    /// Layout for `n_panels` panels (`None` when there are none).
    pub fn for_panels(n_panels: usize) -> Option<Self> {
        if n_panels == 0 {
            return None;
        }
        let cols = n_panels.min(Self::MAX_COLUMNS);
        let rows = n_panels.div_ceil(cols);
        Some(Self { rows, cols })
    }

    /// `(row, col)` cell of the `index`-th panel.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Number of grid cells, including unused trailing ones.
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

// ============================================================================
// Panels
// ============================================================================

/// Residuals against one selected term.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualPanel<T> {
    /// Term on the x axis.
    pub term: Monomial,

    /// Term values (x axis).
    pub values: Vec<T>,

    /// Model residuals (y axis).
    pub residuals: Vec<T>,

    /// Smoothed `(x, residual)` trend, sorted by x.
    pub trend: Option<Vec<(T, T)>>,
}

/// Residual panels of a fitted model together with their grid layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualPlot<T> {
    /// Grid arrangement.
    pub layout: GridLayout,

    /// One panel per selected term, in canonical order.
    pub panels: Vec<ResidualPanel<T>>,
}

impl<T: Float> ResidualPlot<T> {
    /// Span of the LOWESS trend.
    const TREND_FRACTION: f64 = 2.0 / 3.0;

    /// Robustness iterations of the LOWESS trend.
    const TREND_ITERATIONS: usize = 3;

    /// Build the panels for a fit over `design`.
    pub fn from_fit(design: &DesignMatrix<T>, fit: &OlsFit<T>) -> Self {
        let residuals = fit.residuals.as_slice();

        let panels: Vec<ResidualPanel<T>> = design
            .terms()
            .iter()
            .filter_map(|term| {
                let values = design.column(term)?.to_vec();
                let trend = Self::trend(&values, residuals);
                Some(ResidualPanel {
                    term: term.clone(),
                    values,
                    residuals: residuals.to_vec(),
                    trend,
                })
            })
            .collect();

        let layout = GridLayout::for_panels(panels.len()).unwrap_or(GridLayout { rows: 0, cols: 0 });

        Self { layout, panels }
    }

    /// LOWESS trend of `residuals` against `values`.
    fn trend(values: &[T], residuals: &[T]) -> Option<Vec<(T, T)>> {
        let x: Vec<f64> = values.iter().map(|v| v.to_f64()).collect::<Option<_>>()?;
        let y: Vec<f64> = residuals.iter().map(|v| v.to_f64()).collect::<Option<_>>()?;

        let model = Lowess::<f64>::new()
            .fraction(Self::TREND_FRACTION)
            .iterations(Self::TREND_ITERATIONS)
            .adapter(Batch)
            .build()
            .map_err(|e| debug!("LOWESS trend unavailable: {e}"))
            .ok()?;

        let smoothed = model
            .fit(&x, &y)
            .map_err(|e| debug!("LOWESS trend unavailable: {e}"))
            .ok()?;

        smoothed
            .x
            .iter()
            .zip(smoothed.y.iter())
            .map(|(&xs, &ys)| Some((T::from(xs)?, T::from(ys)?)))
            .collect()
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Draws residual panels (the plotting collaborator).
pub trait ResidualRenderer<T> {
    /// Rendering failure.
    type Error;

    /// Render every panel of `plot`.
    fn render(&mut self, plot: &ResidualPlot<T>) -> Result<(), Self::Error>;
}

/// Writes residual panels as long-format CSV.
///
/// Columns: `term,row,col,kind,x,y` where `kind` is `point` for observations
/// and `trend` for the smoothed line.
#[derive(Debug)]
pub struct CsvRenderer<W> {
    writer: W,
}

impl<W: Write> CsvRenderer<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<T: Float, W: Write> ResidualRenderer<T> for CsvRenderer<W> {
    type Error = std::io::Error;

    fn render(&mut self, plot: &ResidualPlot<T>) -> Result<(), Self::Error> {
        writeln!(self.writer, "term,row,col,kind,x,y")?;

        for (i, panel) in plot.panels.iter().enumerate() {
            let (row, col) = plot.layout.position(i);
            let term = panel.term.canonical();

            for (&x, &r) in panel.values.iter().zip(&panel.residuals) {
                writeln!(
                    self.writer,
                    "{term},{row},{col},point,{},{}",
                    x.to_f64().unwrap_or(f64::NAN),
                    r.to_f64().unwrap_or(f64::NAN)
                )?;
            }

            for &(x, y) in panel.trend.iter().flatten() {
                writeln!(
                    self.writer,
                    "{term},{row},{col},trend,{},{}",
                    x.to_f64().unwrap_or(f64::NAN),
                    y.to_f64().unwrap_or(f64::NAN)
                )?;
            }
        }

        self.writer.flush()
    }
}
