//! File-name sanitization for the script and the saved figure.

/// Default stem for script files.
pub const SCRIPT_STEM: &str = "script";
/// Default stem for saved figures.
pub const FIGURE_STEM: &str = "plot";
/// Script file extension.
pub const SCRIPT_EXT: &str = ".py";
/// Figure file extension; the save call always writes this format.
pub const FIGURE_EXT: &str = ".pdf";

/// Sanitize `name`, defaulting to `script` + `ext` when empty.
pub fn sanitize(name: &str, ext: &str) -> String {
    sanitize_or(name, SCRIPT_STEM, ext)
}

/// Sanitize `name` with a caller-chosen default stem.
///
/// Appends `ext` when missing and replaces every `:` with `-` so that
/// timestamp-derived names stay path-safe.
pub fn sanitize_or(name: &str, default_stem: &str, ext: &str) -> String {
    let name = if name.is_empty() {
        format!("{}{}", default_stem, ext)
    } else if name.ends_with(ext) {
        name.to_string()
    } else {
        format!("{}{}", name, ext)
    };
    name.replace(':', "-")
}

/// Sanitized script file name.
pub fn script_name(name: Option<&str>) -> String {
    sanitize_or(name.unwrap_or_default(), SCRIPT_STEM, SCRIPT_EXT)
}

/// Sanitized figure file name.
pub fn figure_name(name: Option<&str>) -> String {
    sanitize_or(name.unwrap_or_default(), FIGURE_STEM, FIGURE_EXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("plot", ".pdf"), "plot.pdf");
        assert_eq!(sanitize("a:b.py", ".py"), "a-b.py");
        assert_eq!(sanitize("", ".py"), "script.py");
        assert_eq!(sanitize("/tmp/run.py", ".py"), "/tmp/run.py");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(script_name(None), "script.py");
        assert_eq!(figure_name(None), "plot.pdf");
        assert_eq!(figure_name(Some("out")), "out.pdf");
        assert_eq!(
            figure_name(Some("run-2025-02-05T14:30:00Z")),
            "run-2025-02-05T14-30-00Z.pdf"
        );
    }
}
