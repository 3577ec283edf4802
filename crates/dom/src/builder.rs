//! Typed construction and rendering of markup fragments.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Display adapter that HTML-escapes a string slice at render time using the
/// library's `HtmlEscaper`, so `write!(out, "{}", Escape(s))` emits escaped text.
struct Escape<'a>(&'a str);

impl std::fmt::Display for Escape<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        html_escaper::HtmlEscaper(f).write_str(self.0)
    }
}

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// An owned markup fragment assembled field by field rather than through
/// string templating; text and attribute values are escaped at render time.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        String,
        Vec<String>,
        BTreeMap<String, String>,
        String,
        Vec<Element>,
    ) {
        (self.tag, self.classes, self.attrs, self.text, self.children)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let classes = self.classes.join(" ");
            let _ = write!(out, " class=\"{}\"", Escape(classes.as_str()));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, Escape(value.as_str()));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        let _ = write!(out, "{}", Escape(self.text.as_str()));
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
