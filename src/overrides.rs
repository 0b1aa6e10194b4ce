//! Per-slot overrides: replace a region's component, or augment it with
//! extra props and style declarations.

use std::{collections::BTreeMap, collections::HashMap, fmt, sync::Arc};

use crate::markup::{Element, Node, js_number};

/// Inline CSS declarations, property name to value.
pub type Style = BTreeMap<String, String>;

pub fn to_css(style: &Style) -> String {
    style
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parses inline CSS text such as `"color: red; width: 50%"`.
/// Declarations without a `:` are skipped.
pub fn parse_css(css: &str) -> Style {
    css.split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Style(Style),
}

impl PropValue {
    /// Attribute text, or `None` when the attribute should be left out.
    pub fn to_attr(&self) -> Option<String> {
        match self {
            PropValue::Null => None,
            PropValue::Bool(b) => Some(b.to_string()),
            PropValue::Number(n) => Some(js_number(*n)),
            PropValue::Text(s) => Some(s.clone()),
            PropValue::Style(style) => Some(to_css(style)),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<usize> for PropValue {
    fn from(value: usize) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<Style> for PropValue {
    fn from(value: Style) -> Self {
        PropValue::Style(value)
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropValue::Null, Into::into)
    }
}

/// Props handed to a component. Keys starting with `$` are styling inputs
/// and never become attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Spreads `other` over `self`; on conflicting keys `other` wins, except
    /// that two style values are merged declaration by declaration.
    pub fn merge(&mut self, other: &Props) {
        for (key, value) in &other.0 {
            match (self.0.get_mut(key), value) {
                (Some(PropValue::Style(base)), PropValue::Style(extra)) => {
                    base.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                _ => {
                    self.0.insert(key.clone(), value.clone());
                }
            }
        }
    }

    pub fn merged(mut self, other: &Props) -> Self {
        self.merge(other);
        self
    }
}

/// Anything that can render a slot.
pub trait Component: Send + Sync {
    fn render(&self, props: Props, children: Vec<Node>) -> Element;
}

impl<F> Component for F
where
    F: Fn(Props, Vec<Node>) -> Element + Send + Sync,
{
    fn render(&self, props: Props, children: Vec<Node>) -> Element {
        self(props, children)
    }
}

pub type SharedComponent = Arc<dyn Component>;

/// The six independently overridable regions of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Root,
    BarContainer,
    Bar,
    BarProgress,
    Label,
    InfiniteBar,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Root,
        Slot::BarContainer,
        Slot::Bar,
        Slot::BarProgress,
        Slot::Label,
        Slot::InfiniteBar,
    ];
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slot::Root => "Root",
            Slot::BarContainer => "BarContainer",
            Slot::Bar => "Bar",
            Slot::BarProgress => "BarProgress",
            Slot::Label => "Label",
            Slot::InfiniteBar => "InfiniteBar",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub enum Override {
    /// Replace the slot's component outright.
    Component(SharedComponent),
    /// Optionally replace the component, and spread extra props and style
    /// declarations over the slot's own.
    Custom {
        component: Option<SharedComponent>,
        props: Props,
        style: Style,
    },
}

impl Override {
    pub fn component(component: impl Component + 'static) -> Self {
        Override::Component(Arc::new(component))
    }

    pub fn props(props: Props) -> Self {
        Override::Custom {
            component: None,
            props,
            style: Style::new(),
        }
    }

    pub fn style<K, V>(declarations: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Override::Custom {
            component: None,
            props: Props::new(),
            style: declarations
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Pairs a replacement component with extra props.
    pub fn with_props(self, extra: Props) -> Self {
        match self {
            Override::Component(component) => Override::Custom {
                component: Some(component),
                props: extra,
                style: Style::new(),
            },
            Override::Custom {
                component,
                props,
                style,
            } => Override::Custom {
                component,
                props: props.merged(&extra),
                style,
            },
        }
    }
}

#[derive(Clone, Default)]
pub struct Overrides(HashMap<Slot, Override>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: Slot, over: Override) -> Self {
        self.0.insert(slot, over);
        self
    }

    pub fn get(&self, slot: Slot) -> Option<&Override> {
        self.0.get(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = Slot::ALL
            .iter()
            .filter(|slot| self.0.contains_key(slot))
            .collect::<Vec<_>>();
        f.debug_tuple("Overrides").field(&slots).finish()
    }
}

/// Picks the component for a slot and the extra props to spread over the
/// slot's base props.
pub fn resolve(over: Option<&Override>, default: &SharedComponent) -> (SharedComponent, Props) {
    match over {
        None => (Arc::clone(default), Props::new()),
        Some(Override::Component(component)) => (Arc::clone(component), Props::new()),
        Some(Override::Custom {
            component,
            props,
            style,
        }) => {
            let mut extra = props.clone();
            if !style.is_empty() {
                extra.merge(&Props::new().with("$style", style.clone()));
            }
            let component = component.clone().unwrap_or_else(|| Arc::clone(default));
            (component, extra)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: &'static str) -> SharedComponent {
        Arc::new(move |_props: Props, _children: Vec<Node>| Element::new(tag))
    }

    #[test]
    fn test_resolve_without_override_uses_default() {
        let default = tagged("div");
        let (component, extra) = resolve(None, &default);
        assert!(Arc::ptr_eq(&component, &default));
        assert!(extra.is_empty());
    }

    #[test]
    fn test_resolve_plain_replacement() {
        let default = tagged("div");
        let over = Override::Component(tagged("section"));
        let (component, extra) = resolve(Some(&over), &default);
        assert_eq!(component.render(Props::new(), vec![]).tag, "section");
        assert!(extra.is_empty());
    }

    #[test]
    fn test_resolve_component_with_props() {
        let default = tagged("div");
        let over = Override::Component(tagged("section"))
            .with_props(Props::new().with("data-testid", "bar"));
        let (component, extra) = resolve(Some(&over), &default);
        assert_eq!(component.render(Props::new(), vec![]).tag, "section");
        assert_eq!(extra.text("data-testid"), Some("bar"));
    }

    #[test]
    fn test_resolve_props_only_keeps_default_component() {
        let default = tagged("div");
        let over = Override::props(Props::new().with("title", "x"));
        let (component, extra) = resolve(Some(&over), &default);
        assert!(Arc::ptr_eq(&component, &default));
        assert_eq!(extra.text("title"), Some("x"));
    }

    #[test]
    fn test_resolve_style_becomes_transient_prop() {
        let default = tagged("div");
        let over = Override::style([("color", "red")]);
        let (_, extra) = resolve(Some(&over), &default);
        match extra.get("$style") {
            Some(PropValue::Style(style)) => assert_eq!(style["color"], "red"),
            other => panic!("unexpected $style: {other:?}"),
        }
    }

    #[test]
    fn test_merge_override_wins_and_styles_combine() {
        let mut base = Props::new()
            .with("$value", 10.0)
            .with("title", "base")
            .with("$style", Style::from([("width".into(), "1px".into())]));
        let extra = Props::new()
            .with("title", "override")
            .with("$style", Style::from([("color".into(), "red".into())]));
        base.merge(&extra);

        assert_eq!(base.number("$value"), Some(10.0));
        assert_eq!(base.text("title"), Some("override"));
        match base.get("$style") {
            Some(PropValue::Style(style)) => assert_eq!(style.len(), 2),
            other => panic!("unexpected $style: {other:?}"),
        }
    }

    #[test]
    fn test_parse_css() {
        let style = parse_css(" color: red ;width:50%; ; bogus; background: url(a:b)");
        assert_eq!(style.len(), 3);
        assert_eq!(style["color"], "red");
        assert_eq!(style["width"], "50%");
        assert_eq!(style["background"], "url(a:b)");
        assert!(parse_css("").is_empty());
    }

    #[test]
    fn test_prop_value_to_attr() {
        assert_eq!(PropValue::Null.to_attr(), None);
        assert_eq!(PropValue::from(None::<f64>).to_attr(), None);
        assert_eq!(PropValue::from(true).to_attr().as_deref(), Some("true"));
        assert_eq!(PropValue::from(100.0).to_attr().as_deref(), Some("100"));
    }
}
