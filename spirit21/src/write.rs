//!
//! # Xml Writer Module
//!

// Standard Lib Imports
use std::io::Write;
use std::ops::{AddAssign, SubAssign};
use std::path::Path;

// Local imports
use crate::data::SpiritResult;
use crate::xml::{Element, Node};

/// Write element tree `top` as an XML document to file `fname`.
pub fn save(top: &Element, fname: impl AsRef<Path>) -> SpiritResult<()> {
    let f = std::fs::File::create(fname)?;
    XmlWriter::new(f).write_doc(top)
}
/// Write element tree `top` as an XML document [String].
pub fn to_string(top: &Element) -> SpiritResult<String> {
    let mut buf = Vec::new();
    XmlWriter::new(&mut buf).write_doc(top)?;
    let rv = std::str::from_utf8(buf.as_slice()).unwrap().to_string();
    Ok(rv)
}

/// # Xml Writing Helper
pub struct XmlWriter<'wr> {
    /// Write Destination
    dest: Box<dyn Write + 'wr>,
    /// Indentation Helper
    indent: Indent,
}
impl<'wr> XmlWriter<'wr> {
    /// Create a new [XmlWriter] to destination `dest`.
    /// Destination is boxed internally.
    fn new(dest: impl Write + 'wr) -> Self {
        Self {
            dest: Box::new(dest),
            indent: Indent::new("  "), // Always uses two spaces. Potentially make this an option.
        }
    }
    /// Write the XML declaration and the root element.
    fn write_doc(&mut self, top: &Element) -> SpiritResult<()> {
        self.write_line(format_args_f!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"))?;
        self.write_element(top)
    }
    /// Write element `e` at the current indentation level.
    /// Childless elements self-close, and text-only elements are collapsed
    /// onto a single line. Both keep re-emission stable under re-parsing.
    fn write_element(&mut self, e: &Element) -> SpiritResult<()> {
        let name = &e.name;
        let attrs = format_attrs(&e.attrs);
        if e.children.is_empty() {
            self.write_line(format_args_f!("<{name}{attrs}/>"))?;
            return Ok(());
        }
        if e.children.iter().all(|n| matches!(n, Node::Text(_))) {
            let text: String = e
                .children
                .iter()
                .map(|n| match n {
                    Node::Text(t) => escape_text(t),
                    Node::Element(_) => String::new(),
                })
                .collect();
            self.write_line(format_args_f!("<{name}{attrs}>{text}</{name}>"))?;
            return Ok(());
        }
        self.write_line(format_args_f!("<{name}{attrs}>"))?;
        self.indent += 1;
        for node in e.children.iter() {
            match node {
                Node::Element(child) => self.write_element(child)?,
                Node::Text(t) => {
                    let t = escape_text(t);
                    self.write_line(format_args_f!("{t}"))?;
                }
            }
        }
        self.indent -= 1;
        self.write_line(format_args_f!("</{name}>"))?;
        Ok(())
    }
    /// Helper function writing a single line at the current indentation level.
    fn write_line(&mut self, args: std::fmt::Arguments) -> std::io::Result<()> {
        writeln!(self.dest, "{}{}", self.indent.state, args)
    }
}

/// Format an attribute list, each entry preceded by a single space.
fn format_attrs(attrs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in attrs.iter() {
        let value = escape_attr(value);
        out.push_str(&format_f!(" {key}=\"{value}\""));
    }
    out
}
/// Escape the markup-significant characters in text content.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
/// Escape attribute values. Values are always double-quoted, so the quote
/// character joins the markup-significant set here.
pub fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Indentation Helper
struct Indent {
    unit: String,
    level: usize,
    state: String,
}
impl Indent {
    /// Create a new [Indent], initially at level 0
    fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            level: 0,
            state: String::new(),
        }
    }
}
impl AddAssign<usize> for Indent {
    fn add_assign(&mut self, rhs: usize) {
        self.level += rhs;
        self.state = self.unit.repeat(self.level);
    }
}
impl SubAssign<usize> for Indent {
    fn sub_assign(&mut self, rhs: usize) {
        if rhs > self.level {
            panic!("Indentation cannot go below 0");
        }
        self.level -= rhs;
        self.state = self.unit.repeat(self.level);
    }
}
