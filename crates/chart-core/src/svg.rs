// File: crates/chart-core/src/svg.rs
// Summary: Minimal SVG document writer (escaping, number formatting, element nesting).

use std::fmt::Write;

/// Escape the five XML special characters for text content and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Coordinate formatting: two decimals, trailing zeros trimmed, no "-0".
pub fn num(v: f64) -> String {
    if !v.is_finite() { return "0".to_string(); }
    let mut s = format!("{v:.2}");
    if s.contains('.') {
        while s.ends_with('0') { s.pop(); }
        if s.ends_with('.') { s.pop(); }
    }
    if s == "-0" { s = "0".to_string(); }
    s
}

/// Indented element writer over an owned buffer.
pub struct SvgWriter {
    out: String,
    depth: usize,
}

impl SvgWriter {
    /// Start a document with the root `<svg>` element open.
    pub fn document(width: f64, height: f64) -> Result<Self, std::fmt::Error> {
        let mut w = Self { out: String::with_capacity(8 * 1024), depth: 0 };
        writeln!(w.out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        w.open(
            "svg",
            &[
                ("xmlns", "http://www.w3.org/2000/svg".to_string()),
                ("width", num(width)),
                ("height", num(height)),
                ("viewBox", format!("0 0 {} {}", num(width), num(height))),
                ("preserveAspectRatio", "xMidYMid meet".to_string()),
                ("font-family", "sans-serif".to_string()),
            ],
        )?;
        Ok(w)
    }

    fn indent(&mut self) -> std::fmt::Result {
        for _ in 0..self.depth { self.out.push_str("  "); }
        Ok(())
    }

    fn attrs(&mut self, attrs: &[(&str, String)]) -> std::fmt::Result {
        for (k, v) in attrs {
            write!(self.out, r#" {}="{}""#, k, escape(v))?;
        }
        Ok(())
    }

    /// Open a container element; pair with `close`.
    pub fn open(&mut self, tag: &str, attrs: &[(&str, String)]) -> std::fmt::Result {
        self.indent()?;
        write!(self.out, "<{tag}")?;
        self.attrs(attrs)?;
        writeln!(self.out, ">")?;
        self.depth += 1;
        Ok(())
    }

    pub fn close(&mut self, tag: &str) -> std::fmt::Result {
        self.depth = self.depth.saturating_sub(1);
        self.indent()?;
        writeln!(self.out, "</{tag}>")
    }

    /// Self-closing element.
    pub fn leaf(&mut self, tag: &str, attrs: &[(&str, String)]) -> std::fmt::Result {
        self.indent()?;
        write!(self.out, "<{tag}")?;
        self.attrs(attrs)?;
        writeln!(self.out, "/>")
    }

    /// Element with escaped text content.
    pub fn text(&mut self, tag: &str, attrs: &[(&str, String)], content: &str) -> std::fmt::Result {
        self.indent()?;
        write!(self.out, "<{tag}")?;
        self.attrs(attrs)?;
        writeln!(self.out, ">{}</{tag}>", escape(content))
    }

    /// Close the root element and return the document.
    pub fn finish(mut self) -> Result<String, std::fmt::Error> {
        while self.depth > 1 {
            self.close("g")?;
        }
        self.close("svg")?;
        Ok(self.out)
    }
}
