//! Figure to script compilation.
//!
//! Emission runs in fixed phases: preamble, axes creation, series, legends,
//! figure-level axis configuration and the save/show postamble. All
//! configuration errors are caught by [`Figure::validate`] before any text is
//! produced.

use log::{debug, warn};

use crate::script::backend::ScriptWriter;
use crate::script::element::TickSet;
use crate::script::error::{ScriptError, ScriptResult};
use crate::script::figure::Figure;
use crate::script::layout::{Layout, Position};
use crate::script::literal::{is_unsafe_text, py_bool, py_num, py_str};
use crate::script::naming::figure_name;
use crate::script::series::{Series, SeriesRender};

const TITLE_FONT_SIZE: u32 = 16;

impl Figure {
    /// Check the layout and every series, returning the resolved layout.
    pub fn validate(&self) -> ScriptResult<Layout> {
        let layout = Layout::new(self.subplots, self.twin.is_some())?;
        for series in self.all_series() {
            series.validate()?;
            if series.color().is_some_and(|c| c.is_palette()) && !self.style.styling {
                return Err(ScriptError::series(
                    "palette colors need styling to be enabled",
                ));
            }
        }
        for series in &self.series {
            layout.resolve(series.position())?;
        }
        Ok(layout)
    }

    /// Compile the figure into a complete script.
    pub fn compile(&self) -> ScriptResult<String> {
        let layout = self.validate()?;
        self.warn_unsafe_text();
        debug!(
            "Compiling figure: {} series, {} twin series, layout {:?}",
            self.series.len(),
            self.twin.as_ref().map_or(0, |t| t.series.len()),
            layout
        );

        let mut compiler = Compiler::new(self, layout);
        compiler.preamble();
        compiler.create_axes();
        compiler.draw_series()?;
        compiler.legends()?;
        compiler.configure_axes();
        compiler.postamble();
        Ok(compiler.finish())
    }

    /// Sanitized name of the saved figure.
    pub fn output_path(&self) -> String {
        figure_name(self.output_name.as_deref())
    }

    fn warn_unsafe_text(&self) {
        let texts = [
            self.title.as_deref(),
            self.x_axis.label.as_deref(),
            self.y_axis.label.as_deref(),
            self.twin.as_ref().and_then(|t| t.y_axis.label.as_deref()),
            self.output_name.as_deref(),
        ];
        let labels = self.all_series().map(|s| s.label());
        for text in texts.into_iter().chain(labels).flatten() {
            if is_unsafe_text(text) {
                warn!(
                    "Text {:?} contains a quote or line break and will break the script",
                    text
                );
            }
        }
    }
}

struct Compiler<'a> {
    figure: &'a Figure,
    layout: Layout,
    out: ScriptWriter,
}

impl<'a> Compiler<'a> {
    fn new(figure: &'a Figure, layout: Layout) -> Self {
        Compiler {
            figure,
            layout,
            out: ScriptWriter::new(),
        }
    }

    fn finish(self) -> String {
        debug!("Script has {} lines", self.out.lines().len());
        self.out.render()
    }

    fn preamble(&mut self) {
        let out = &mut self.out;
        out.line("import warnings");
        out.line("warnings.simplefilter('ignore')");
        out.line("try:");
        out.indented("from pylab import *");
        out.line("except TypeError as e:");
        out.indented("print(str(e))");
        out.indented("print('Falling back to Agg backend')");
        out.indented("import matplotlib");
        out.indented("matplotlib.use('Agg')");
        out.indented("from pylab import *");
        out.line("import itertools");

        let style = self.figure.style;
        if style.styling {
            out.line("import seaborn as sns");
            out.line(format!("sns.set(style={})", py_str(&style.token())));
            out.line("sns.set_context('paper')");
            out.line("palette = itertools.cycle(sns.color_palette())");
        }
        out.line("lines = []");
    }

    fn create_axes(&mut self) {
        match self.layout {
            Layout::Single => self.out.line("fig, ax = subplots()"),
            Layout::Twin => {
                self.out.line("fig, ax = subplots()");
                self.out.line("ax2 = ax.twinx()");
            }
            Layout::Grid(spec) => self.out.line(spec.creation()),
        }
        if let Some((width, height)) = self.figure.size {
            self.out.line(format!(
                "fig.set_size_inches({}, {}, forward=True)",
                py_num(width),
                py_num(height)
            ));
        }
    }

    fn draw_series(&mut self) -> ScriptResult<()> {
        let figure = self.figure;
        let mut configured: Vec<Position> = Vec::new();

        for series in &figure.series {
            let handle = self.layout.resolve(series.position())?;
            if let Some(binding) = handle.binding() {
                self.out.line(binding);
                let position = series.position();
                if !configured.contains(&position) {
                    configured.push(position);
                    self.configure_cell(position);
                }
            }
            series.render(&handle, &mut self.out)?;
        }

        if let Some(twin) = &figure.twin {
            let handle = self.layout.resolve_twin()?;
            for series in &twin.series {
                series.render(&handle, &mut self.out)?;
            }
        }
        Ok(())
    }

    /// Title, ticks and limits of the subplot currently bound to `ax`.
    fn configure_cell(&mut self, position: Position) {
        let figure = self.figure;
        let occupants: Vec<&Series> = figure
            .series
            .iter()
            .filter(|s| s.position() == position)
            .collect();
        if let [only] = occupants.as_slice()
            && let Some(label) = only.label().filter(|l| !l.is_empty())
        {
            self.out.line(format!("ax.set_title({})", py_str(label)));
        }
        self.tick_params("ax");
        self.limits("ax");
    }

    fn legends(&mut self) -> ScriptResult<()> {
        let figure = self.figure;
        if !figure.has_labels() {
            return Ok(());
        }
        let kwargs = figure.legend.kwargs();

        match self.layout {
            Layout::Single => self.out.line(format!("lgd = ax.legend({})", kwargs)),
            Layout::Twin => {
                self.out.line("labels = [l.get_label() for l in lines]");
                self.out
                    .line(format!("lgd = ax2.legend(lines, labels, {})", kwargs));
            }
            Layout::Grid(spec) => {
                let mut cells: Vec<Position> = Vec::new();
                for series in &figure.series {
                    if !cells.contains(&series.position()) {
                        cells.push(series.position());
                    }
                }
                for position in cells {
                    let labelled = figure
                        .series
                        .iter()
                        .any(|s| s.position() == position && s.has_label());
                    if labelled {
                        self.out
                            .line(format!("lgd = {}.legend({})", spec.cell(position)?, kwargs));
                    }
                }
            }
        }
        Ok(())
    }

    fn configure_axes(&mut self) {
        let figure = self.figure;
        let grid = self.layout.is_grid();

        if let Some(title) = figure.title.as_deref().filter(|t| !t.is_empty()) {
            let call = if grid { "fig.suptitle" } else { "ax.set_title" };
            self.out.line(format!(
                "{}({}, fontsize={})",
                call,
                py_str(title),
                TITLE_FONT_SIZE
            ));
        }

        let x_label = figure.x_axis.label_text();
        let y_label = figure.y_axis.label_text();
        if grid {
            if let Some(label) = x_label {
                self.out.line(format!(
                    "fig.text(0.5, 0.04, {}, fontsize={}, ha='center', va='center')",
                    py_str(label),
                    TITLE_FONT_SIZE
                ));
            }
            if let Some(label) = y_label {
                self.out.line(format!(
                    "fig.text(0.04, 0.5, {}, fontsize={}, ha='center', va='center', rotation='vertical')",
                    py_str(label),
                    TITLE_FONT_SIZE
                ));
            }
            return;
        }

        if let Some(label) = x_label {
            self.out.line(format!(
                "ax.set_xlabel({}, fontsize={})",
                py_str(label),
                TITLE_FONT_SIZE
            ));
        }
        if let Some(label) = y_label {
            self.out.line(format!(
                "ax.set_ylabel({}, fontsize={})",
                py_str(label),
                TITLE_FONT_SIZE
            ));
        }
        let twin_label = figure.twin.as_ref().and_then(|t| t.y_axis.label_text());
        if let Some(label) = twin_label {
            self.out.line(format!(
                "ax2.set_ylabel({}, fontsize={})",
                py_str(label),
                TITLE_FONT_SIZE
            ));
        }

        self.tick_params("ax");
        if figure.twin.is_some() {
            self.tick_params("ax2");
        }
        self.limits("ax");
        if let Some(limits) = figure.twin.as_ref().and_then(|t| t.y_axis.limits_literal()) {
            self.out.line(format!("ax2.set_ylim({})", limits));
        }
    }

    fn tick_params(&mut self, ax: &str) {
        let size = self
            .figure
            .tick_label_size
            .map(|s| format!(", labelsize={}", py_num(s)))
            .unwrap_or_default();
        for ticks in [TickSet::Major, TickSet::Minor] {
            self.out.line(format!(
                "{}.tick_params(axis='both', which='{}'{})",
                ax,
                ticks.name(),
                size
            ));
        }
    }

    fn limits(&mut self, ax: &str) {
        if let Some(limits) = self.figure.x_axis.limits_literal() {
            self.out.line(format!("{}.set_xlim({})", ax, limits));
        }
        if let Some(limits) = self.figure.y_axis.limits_literal() {
            self.out.line(format!("{}.set_ylim({})", ax, limits));
        }
    }

    fn postamble(&mut self) {
        let figure = self.figure;
        let mut save = format!(
            "fig.savefig({}, format='pdf'",
            py_str(&figure.output_path())
        );
        if figure.has_labels() {
            save.push_str(", bbox_extra_artists=(lgd,)");
            if figure.tight {
                save.push_str(", bbox_inches='tight'");
            }
        }
        save.push(')');
        self.out.line(save);

        if figure.show {
            self.out
                .line(format!("show(block={})", py_bool(figure.block)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::figure::TwinAxis;
    use crate::script::layout::SubplotSpec;
    use crate::script::series::{BarSeries, ErrorBandSeries, LineSeries, MatrixSeries};
    use crate::script::style::{Color, StyleConfig};

    fn lines(script: &str) -> Vec<&str> {
        script.lines().collect()
    }

    fn count(script: &str, needle: &str) -> usize {
        script.lines().filter(|l| l.contains(needle)).count()
    }

    #[test]
    fn test_empty_figure_skeleton() {
        let script = Figure::new().compile().unwrap();
        assert!(script.contains("from pylab import *"));
        assert!(script.contains("fig, ax = subplots()\n"));
        assert!(script.contains("fig.savefig('plot.pdf', format='pdf')\n"));
        assert!(script.ends_with("show(block=True)\n"));
        assert_eq!(count(&script, ".plot("), 0);
        assert_eq!(count(&script, "legend("), 0);
        assert_eq!(count(&script, "set_title"), 0);
    }

    #[test]
    fn test_preamble_styling() {
        let script = Figure::new().compile().unwrap();
        let l = lines(&script);
        assert_eq!(l[0], "import warnings");
        assert_eq!(l[1], "warnings.simplefilter('ignore')");
        assert!(l.contains(&"    matplotlib.use('Agg')"));
        assert!(l.contains(&"sns.set(style='darkgrid')"));
        assert!(l.contains(&"palette = itertools.cycle(sns.color_palette())"));
        assert!(l.contains(&"lines = []"));

        let plain = Figure::new()
            .style(StyleConfig {
                styling: false,
                ..Default::default()
            })
            .compile()
            .unwrap();
        assert!(!plain.contains("seaborn"));
        assert!(plain.contains("import itertools\nlines = []\n"));
    }

    #[test]
    fn test_end_to_end_ordering() {
        let fig = Figure::new()
            .title("T")
            .add(LineSeries::new([0, 1, 2], [0, 1, 4]).label("sq"));
        let script = fig.compile().unwrap();

        let find = |needle: &str| script.find(needle).unwrap();
        let import = find("from pylab import *");
        let axes = find("fig, ax = subplots()");
        let draw = find("lines += ax.plot([0, 1, 2], [0, 1, 4], label='sq')");
        let legend = find("lgd = ax.legend(fontsize=14, loc=0)");
        let title = find("ax.set_title('T', fontsize=16)");
        let save = find("fig.savefig('plot.pdf', format='pdf', bbox_extra_artists=(lgd,))");
        assert!(import < axes && axes < draw && draw < legend);
        assert!(legend < title && title < save);
    }

    #[test]
    fn test_idempotent() {
        let fig = Figure::demo().subplots(SubplotSpec::new(1, 1));
        assert_eq!(fig.compile().unwrap(), fig.compile().unwrap());
        let twin = Figure::twin_plot([0, 1], vec![1.0, 2.0], vec![3.0, 4.0], Default::default(), Default::default());
        assert_eq!(twin.compile().unwrap(), twin.compile().unwrap());
    }

    #[test]
    fn test_legend_counts() {
        let unlabelled = Figure::new().add(LineSeries::values([1, 2]));
        assert_eq!(count(&unlabelled.compile().unwrap(), "legend("), 0);

        let labelled = Figure::new()
            .add(LineSeries::values([1, 2]).label("a"))
            .add(LineSeries::values([3, 4]).label("b"));
        assert_eq!(count(&labelled.compile().unwrap(), "legend("), 1);

        let twin = Figure::new()
            .add(LineSeries::values([1, 2]).label("left"))
            .twin(TwinAxis::new().add(LineSeries::values([3, 4]).label("right")));
        let script = twin.compile().unwrap();
        assert_eq!(count(&script, "legend("), 1);
        assert!(script.contains(
            "labels = [l.get_label() for l in lines]\nlgd = ax2.legend(lines, labels, fontsize=14, loc=0)\n"
        ));
    }

    #[test]
    fn test_grid_legends_per_labelled_cell() {
        let fig = Figure::new()
            .subplots(SubplotSpec::new(2, 2))
            .add(LineSeries::values([1]).at(1, 1).label("b"))
            .add(LineSeries::values([1]).at(0, 0))
            .add(LineSeries::values([1]).at(0, 1).label("a"));
        let script = fig.compile().unwrap();
        let legends: Vec<&str> = script.lines().filter(|l| l.contains("legend(")).collect();
        assert_eq!(
            legends,
            [
                "lgd = axs[1, 1].legend(fontsize=14, loc=0)",
                "lgd = axs[0, 1].legend(fontsize=14, loc=0)",
            ]
        );
    }

    #[test]
    fn test_band_label_alone_gets_a_legend() {
        let fig = Figure::new()
            .add(ErrorBandSeries::new([0, 1], [1, 2], [0.1, 0.1]).error_label("spread"));
        let script = fig.compile().unwrap();
        assert!(script.contains(
            "lines.append(ax.fill_between(x, y-e, y+e, alpha=0.1, label='spread'))\nlgd = ax.legend(fontsize=14, loc=0)\n"
        ));
        assert!(script.contains("fig.savefig('plot.pdf', format='pdf', bbox_extra_artists=(lgd,))"));

        let grid = Figure::new()
            .subplots(SubplotSpec::new(1, 2))
            .add(LineSeries::values([1]))
            .add(ErrorBandSeries::along([1, 2], [0.1, 0.1]).at(0, 1).error_label("spread"));
        let script = grid.compile().unwrap();
        let legends: Vec<&str> = script.lines().filter(|l| l.contains("legend(")).collect();
        assert_eq!(legends, ["lgd = axs[1].legend(fontsize=14, loc=0)"]);
    }

    #[test]
    fn test_two_by_one_grid() {
        let fig = Figure::new()
            .subplots(SubplotSpec::new(2, 1).share_x(true))
            .title("Grid")
            .xlabel("time")
            .ylim(0.0, 1.0)
            .add(LineSeries::values([1, 2]).label("top"))
            .add(LineSeries::values([3, 4]).at(1, 0));
        let script = fig.compile().unwrap();
        let l = lines(&script);

        assert!(l.contains(&"fig, axs = subplots(2, 1, sharex=True, sharey=False)"));
        assert!(l.contains(&"ax = axs[0]"));
        assert!(l.contains(&"ax = axs[1]"));
        assert!(!script.contains("axs[0, "));
        assert!(!script.contains("axs[1, "));
        assert_eq!(count(&script, "ax.set_title('top')"), 1);
        assert_eq!(count(&script, "ax.set_ylim([0, 1])"), 2);
        assert!(l.contains(&"fig.suptitle('Grid', fontsize=16)"));
        assert!(l.contains(&"fig.text(0.5, 0.04, 'time', fontsize=16, ha='center', va='center')"));
        assert!(!script.contains("set_xlabel"));
    }

    #[test]
    fn test_cell_title_needs_single_occupant() {
        let fig = Figure::new()
            .subplots(SubplotSpec::new(1, 2))
            .add(LineSeries::values([1]).label("a"))
            .add(LineSeries::values([2]).label("b"));
        let script = fig.compile().unwrap();
        assert_eq!(count(&script, "set_title"), 0);
        assert_eq!(count(&script, "ax = axs[0]"), 2);
        assert_eq!(count(&script, "ax.tick_params(axis='both', which='major')"), 1);
    }

    #[test]
    fn test_grid_with_twin_fails_before_output() {
        let fig = Figure::new()
            .subplots(SubplotSpec::new(2, 1))
            .twin(TwinAxis::new().add(LineSeries::values([1])));
        assert!(matches!(
            fig.compile(),
            Err(ScriptError::UnsupportedLayoutCombination)
        ));
    }

    #[test]
    fn test_invalid_configurations() {
        let outside = Figure::new()
            .subplots(SubplotSpec::new(2, 1))
            .add(LineSeries::values([1]).at(2, 0));
        assert!(matches!(
            outside.compile(),
            Err(ScriptError::InvalidGridAddress { row: 2, .. })
        ));

        let empty = Figure::new().add(LineSeries::default());
        assert!(matches!(
            empty.compile(),
            Err(ScriptError::InvalidSeriesConfiguration(_))
        ));

        let palette = Figure::new()
            .style(StyleConfig {
                styling: false,
                ..Default::default()
            })
            .add(BarSeries::new([1]).color(Color::Palette));
        assert!(palette.validate().is_err());
    }

    #[test]
    fn test_twin_axis_configuration() {
        let fig = Figure::new()
            .ylabel("left")
            .ylim(0.0, 10.0)
            .add(LineSeries::values([1, 2]))
            .twin(
                TwinAxis::new()
                    .ylabel("right")
                    .ylim(-1.0, 1.0)
                    .add(BarSeries::new([0.5, -0.5])),
            );
        let script = fig.compile().unwrap();
        let l = lines(&script);
        let twinx = l.iter().position(|x| *x == "ax2 = ax.twinx()").unwrap();
        let bar = l.iter().position(|x| x.starts_with("lines.append(ax2.bar(")).unwrap();
        assert!(twinx < bar);
        assert!(l.contains(&"ax.set_ylabel('left', fontsize=16)"));
        assert!(l.contains(&"ax2.set_ylabel('right', fontsize=16)"));
        assert!(l.contains(&"ax.set_ylim([0, 10])"));
        assert!(l.contains(&"ax2.set_ylim([-1, 1])"));
        assert!(l.contains(&"ax2.tick_params(axis='both', which='minor')"));
        assert_eq!(count(&script, "legend("), 0);
    }

    #[test]
    fn test_postamble_options() {
        let fig = Figure::new()
            .output("run:1")
            .tight(true)
            .show(true, false)
            .size(8.0, 4.5)
            .tick_label_size(12.0)
            .add(ErrorBandSeries::along([1, 2], [0.1, 0.2]).label("mean"));
        let script = fig.compile().unwrap();
        assert!(script.contains("fig.set_size_inches(8, 4.5, forward=True)\n"));
        assert!(script.contains("ax.tick_params(axis='both', which='major', labelsize=12)\n"));
        assert!(script.contains(
            "fig.savefig('run-1.pdf', format='pdf', bbox_extra_artists=(lgd,), bbox_inches='tight')\nshow(block=False)\n"
        ));

        let quiet = Figure::new().tight(true).show(false, false).compile().unwrap();
        assert!(quiet.ends_with("fig.savefig('plot.pdf', format='pdf')\n"));
    }

    #[test]
    fn test_matrix_figures() {
        let script = Figure::hinton(vec![vec![1.0, 0.5]]).compile().unwrap();
        assert!(script.contains("sns.set(style='dark')"));
        assert!(script.contains("x = array([[1, 0.5]])\nfrom mpltools import special\nsca(ax)\nspecial.hinton(x)\n"));

        let fig = Figure::new()
            .subplots(SubplotSpec::new(1, 2))
            .add(MatrixSeries::new(vec![vec![1.0]]).at(0, 1).label("m"));
        let script = fig.compile().unwrap();
        assert!(script.contains("ax = axs[1]\nax.set_title('m')\n"));
        assert!(script.contains("lgd = axs[1].legend(fontsize=14, loc=0)"));
    }

    #[test]
    fn test_unsafe_label_is_kept_verbatim() {
        let fig = Figure::new().title("it's");
        let script = fig.compile().unwrap();
        assert!(script.contains("ax.set_title('it's', fontsize=16)"));
    }
}
