//! DOM-like element tree produced by components.
//!
//! Elements print as HTML through [`std::fmt::Display`] and serialize to
//! JSON through `serde`, text nodes becoming plain strings.

use std::{
    collections::BTreeMap,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use serde::Serialize;

/// Opaque handle to a mounted root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u64);

impl NodeHandle {
    pub(crate) fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    /// Reconciliation key among siblings, never printed as an attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<Node>,
    #[serde(skip)]
    pub handle: Option<NodeHandle>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            key: None,
            attrs: BTreeMap::new(),
            children: Vec::new(),
            handle: None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn with_key(mut self, key: impl ToString) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn extend_children(&mut self, children: impl IntoIterator<Item = Node>) {
        self.children.extend(children);
    }

    /// Direct element children, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this subtree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Depth-first search over this element and its descendants.
    pub fn find_all<'a, P>(&'a self, predicate: P) -> Vec<&'a Element>
    where
        P: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        find_into(self, &predicate, &mut found);
        found
    }

    /// Value of one declaration in the inline `style` attribute.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.attr("style")?
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .find(|(name, _)| name.trim() == property)
            .map(|(_, value)| value.trim())
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(el, out),
        }
    }
}

fn find_into<'a, P>(element: &'a Element, predicate: &P, found: &mut Vec<&'a Element>)
where
    P: Fn(&Element) -> bool,
{
    if predicate(element) {
        found.push(element);
    }
    for child in element.child_elements() {
        find_into(child, predicate, found);
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }
        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => element.fmt(f),
            Node::Text(text) => f.write_str(&escape(text)),
        }
    }
}

fn escape(raw: &str) -> String {
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

/// Formats a number the way a browser stringifies it: `NaN`, `Infinity`,
/// integral values without a fractional part, exponent form below `1e-6`
/// and from `1e21` up.
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        // also covers -0
        "0".to_string()
    } else if !(1e-6..1e21).contains(&value.abs()) {
        let formatted = format!("{value:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// `Math.round`: halves round towards positive infinity.
pub fn js_round(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_number() {
        assert_eq!(js_number(50.0), "50");
        assert_eq!(js_number(-0.0), "0");
        assert_eq!(js_number(0.25), "0.25");
        assert_eq!(js_number(f64::NAN), "NaN");
        assert_eq!(js_number(f64::INFINITY), "Infinity");
        assert_eq!(js_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_js_number_exponent_form() {
        assert_eq!(js_number(1e21), "1e+21");
        assert_eq!(js_number(-2.5e22), "-2.5e+22");
        assert_eq!(js_number(1e-7), "1e-7");
        assert_eq!(js_number(1.5e-7), "1.5e-7");
        assert_eq!(js_number(1e20), "100000000000000000000");
        assert_eq!(js_number(0.000001), "0.000001");
    }

    #[test]
    fn test_js_round() {
        assert_eq!(js_round(2.5), 3.0);
        assert_eq!(js_round(-2.5), -2.0);
        assert_eq!(js_round(33.4), 33.0);
        assert!(js_round(f64::NAN).is_nan());
        assert_eq!(js_round(0.49999999999999994), 0.0);
        assert_eq!(js_round(4503599627370497.0), 4503599627370497.0);
        assert_eq!(js_round(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_html_output_escapes() {
        let mut el = Element::new("div");
        el.set_attr("aria-label", "a \"quoted\" <label>");
        let el = el.child("1 < 2 & 3");
        assert_eq!(
            el.to_string(),
            "<div aria-label=\"a &quot;quoted&quot; &lt;label&gt;\">1 &lt; 2 &amp; 3</div>"
        );
    }

    #[test]
    fn test_json_output() {
        let el = Element::new("span").with_key(0).child("hi");
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["tag"], "span");
        assert_eq!(json["key"], "0");
        assert_eq!(json["children"][0], "hi");
    }

    #[test]
    fn test_find_all_and_style_value() {
        let mut inner = Element::new("div");
        inner.set_attr("style", "width: 50%; height: 100%");
        let outer = Element::new("div").child(inner).child("text");

        let found = outer.find_all(|el| el.attr("style").is_some());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].style_value("width"), Some("50%"));
        assert_eq!(found[0].style_value("color"), None);
        assert_eq!(outer.text(), "text");
    }

    #[test]
    fn test_node_handles_are_unique() {
        assert_ne!(NodeHandle::next(), NodeHandle::next());
    }
}
