//! Python script writer.

/// Line-oriented buffer for a generated Python script.
#[derive(Debug, Default)]
pub struct ScriptWriter {
    /// Statements accumulated during compilation
    lines: Vec<String>,
}

impl ScriptWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        ScriptWriter { lines: Vec::new() }
    }

    /// Append one statement.
    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append a statement inside an indented block.
    pub fn indented(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("    {}", line.as_ref()));
    }

    /// Statements written so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the final script, one statement per line.
    pub fn render(self) -> String {
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let mut w = ScriptWriter::new();
        assert!(w.is_empty());
        w.line("try:");
        w.indented("from pylab import *");
        w.line("show(block=True)");
        assert_eq!(w.lines().len(), 3);
        assert_eq!(
            w.render(),
            "try:\n    from pylab import *\nshow(block=True)\n"
        );
    }

    #[test]
    fn test_empty_render() {
        assert_eq!(ScriptWriter::new().render(), "");
    }
}
