//! Plot sinks for labeled 2-D series
//!
//! The numeric code never talks to a plotting backend directly. Drivers hand
//! `(x, y)` series to a [`SeriesSink`] and call [`SeriesSink::render`] once all
//! series are in; rendering clears the buffered series.
//!
//! Three sinks are provided:
//! - [`PlotlySink`] writes an interactive HTML page (or opens a browser)
//! - [`GnuplotSink`] pipes inline data to a `gnuplot --persist` process
//! - [`MemorySink`] records what would have been drawn, for headless tests
//!
//! A backend that cannot be started is not an error: the sink logs a warning
//! and turns every later call into a no-op.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use num_complex::Complex;
use num_traits::Float;
use plotly::common::Mode;
use plotly::layout::{Axis, AxisType};
use plotly::{Layout, Plot, Scatter};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Y-axis scale of a rendered plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotScale {
    Linear,
    SemilogY,
}

/// A named series of (x, y) points
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(name: &str, points: &[(f64, f64)]) -> Self {
        Series {
            name: name.to_string(),
            points: points.to_vec(),
        }
    }

    fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.0).collect()
    }

    fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.1).collect()
    }
}

/// Destination for labeled 2-D series
pub trait SeriesSink {
    /// Buffer a series for the next render. Returns false if the sink is disabled.
    fn add_series(&mut self, name: &str, points: &[(f64, f64)]) -> bool;

    /// Draw every buffered series and clear the buffer
    ///
    /// Returns `Ok(false)` when nothing was drawn (empty buffer or disabled sink).
    fn render(&mut self) -> Result<bool>;
}

/// Where a [`PlotlySink`] sends the finished plot
#[derive(Debug, Clone, PartialEq)]
pub enum PlotlyOutput {
    Html(PathBuf),
    Browser,
}

/// Plotly-backed sink
pub struct PlotlySink {
    scale: PlotScale,
    title: String,
    x_label: String,
    y_label: String,
    output: PlotlyOutput,
    series: Vec<Series>,
}

impl PlotlySink {
    /// # Arguments
    /// * `scale` - Linear or logarithmic y-axis
    /// * `title` - Plot title
    /// * `output` - HTML file path or the default browser
    pub fn new(scale: PlotScale, title: &str, output: PlotlyOutput) -> Self {
        PlotlySink {
            scale,
            title: title.to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            output,
            series: Vec::new(),
        }
    }

    pub fn with_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    fn build_plot(&self) -> Plot {
        let mut plot = Plot::new();
        for series in &self.series {
            let trace = Scatter::new(series.xs(), series.ys())
                .mode(Mode::LinesMarkers)
                .name(series.name.as_str());
            plot.add_trace(trace);
        }

        let y_axis = match self.scale {
            PlotScale::Linear => Axis::new().title(self.y_label.as_str()),
            PlotScale::SemilogY => Axis::new().title(self.y_label.as_str()).type_(AxisType::Log),
        };
        let layout = Layout::new()
            .title(self.title.as_str())
            .x_axis(Axis::new().title(self.x_label.as_str()))
            .y_axis(y_axis)
            .auto_size(true);
        plot.set_layout(layout);
        plot
    }
}

impl SeriesSink for PlotlySink {
    fn add_series(&mut self, name: &str, points: &[(f64, f64)]) -> bool {
        self.series.push(Series::new(name, points));
        true
    }

    fn render(&mut self) -> Result<bool> {
        if self.series.is_empty() {
            return Ok(false);
        }
        let plot = self.build_plot();
        self.series.clear();

        match &self.output {
            PlotlyOutput::Html(path) => {
                std::fs::write(path, plot.to_html())?;
                info!("Plot written to {}", path.display());
            }
            PlotlyOutput::Browser => plot.show(),
        }
        Ok(true)
    }
}

/// gnuplot preamble for a given y-axis scale
fn gnuplot_preamble(scale: PlotScale) -> &'static str {
    match scale {
        PlotScale::Linear => "set datafile separator ','\nset grid\n",
        PlotScale::SemilogY => {
            "set datafile separator ','\nset format y \"10^{%L}\"\nset logscale y\nset grid\n"
        }
    }
}

/// Full gnuplot script drawing `series` as inline `'-'` data blocks
pub fn gnuplot_script(scale: PlotScale, series: &[Series]) -> String {
    let mut script = String::from(gnuplot_preamble(scale));
    let plots: Vec<String> = series
        .iter()
        .map(|s| format!("'-' with lines title \"{}\"", s.name.replace('"', "'")))
        .collect();
    script.push_str("plot ");
    script.push_str(&plots.join(", "));
    script.push('\n');

    for s in series {
        for (x, y) in &s.points {
            let _ = writeln!(script, "{},{}", x, y);
        }
        script.push_str("e\n");
    }
    script
}

/// Sink that streams series to a gnuplot process over its stdin
pub struct GnuplotSink {
    scale: PlotScale,
    child: Option<Child>,
    series: Vec<Series>,
}

impl GnuplotSink {
    pub fn new(scale: PlotScale) -> Self {
        Self::with_program("gnuplot", scale)
    }

    /// Start `program --persist`; failure leaves the sink disabled
    pub fn with_program(program: &str, scale: PlotScale) -> Self {
        let child = Command::new(program)
            .arg("--persist")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn();

        let child = match child {
            Ok(child) => Some(child),
            Err(err) => {
                warn!("Failed to run {}: {}. Plotting disabled", program, err);
                None
            }
        };

        GnuplotSink {
            scale,
            child,
            series: Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.child.is_some()
    }

    fn disable(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl SeriesSink for GnuplotSink {
    fn add_series(&mut self, name: &str, points: &[(f64, f64)]) -> bool {
        if !self.is_available() {
            return false;
        }
        self.series.push(Series::new(name, points));
        true
    }

    fn render(&mut self) -> Result<bool> {
        if self.series.is_empty() {
            return Ok(false);
        }
        let script = gnuplot_script(self.scale, &self.series);
        self.series.clear();

        let written = match self.child.as_mut().and_then(|child| child.stdin.as_mut()) {
            Some(stdin) => stdin.write_all(script.as_bytes()).and_then(|_| stdin.flush()),
            None => return Ok(false),
        };
        if let Err(err) = written {
            warn!("Writing to gnuplot failed: {}. Plotting disabled", err);
            self.disable();
            return Ok(false);
        }
        debug!("Sent {} bytes to gnuplot", script.len());
        Ok(true)
    }
}

impl Drop for GnuplotSink {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            // Closing stdin lets gnuplot exit; --persist keeps the window open
            drop(child.stdin.take());
            if let Err(err) = child.wait() {
                warn!("gnuplot did not exit cleanly: {}", err);
            }
        }
    }
}

/// Sink that keeps every rendered batch in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pending: Vec<Series>,
    rendered: Vec<Vec<Series>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Series] {
        &self.pending
    }

    /// One entry per successful `render` call
    pub fn rendered(&self) -> &[Vec<Series>] {
        &self.rendered
    }
}

impl SeriesSink for MemorySink {
    fn add_series(&mut self, name: &str, points: &[(f64, f64)]) -> bool {
        self.pending.push(Series::new(name, points));
        true
    }

    fn render(&mut self) -> Result<bool> {
        if self.pending.is_empty() {
            return Ok(false);
        }
        self.rendered.push(std::mem::take(&mut self.pending));
        Ok(true)
    }
}

/// Plot a constellation diagram from a slice of complex symbols
///
/// This function creates an interactive plot showing the I/Q constellation
/// with equal-sized axes.
///
/// # Arguments
/// * `symbols` - Slice of complex symbols to plot
/// * `title` - Title for the plot
pub fn constellation_plot<T: Float>(symbols: &[Complex<T>], title: &str) -> Plot {
    let i_vals: Vec<f64> = symbols.iter().map(|s| s.re.to_f64().unwrap_or(f64::NAN)).collect();
    let q_vals: Vec<f64> = symbols.iter().map(|s| s.im.to_f64().unwrap_or(f64::NAN)).collect();

    let trace = Scatter::new(i_vals, q_vals)
        .mode(Mode::Markers)
        .name("Constellation");

    let mut plot = Plot::new();
    plot.add_trace(trace);

    // Axis reference lines at 0
    let x_axis_line = Scatter::new(vec![-1.5, 1.5], vec![0.0, 0.0])
        .mode(Mode::Lines)
        .name("I-axis")
        .show_legend(false);
    let y_axis_line = Scatter::new(vec![0.0, 0.0], vec![-1.5, 1.5])
        .mode(Mode::Lines)
        .name("Q-axis")
        .show_legend(false);
    plot.add_trace(x_axis_line);
    plot.add_trace(y_axis_line);

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("In-Phase (I)"))
        .y_axis(
            Axis::new()
                .title("Quadrature (Q)")
                .scale_anchor("x")
                .constrain(plotly::layout::AxisConstrain::Domain),
        )
        .auto_size(true);
    plot.set_layout(layout);
    plot
}

/// Show a constellation diagram in the browser
pub fn plot_constellation<T: Float>(symbols: &[Complex<T>], title: &str) {
    constellation_plot(symbols, title).show();
}
