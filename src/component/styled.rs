use std::sync::Arc;

use crate::{
    component::Size,
    markup::{Element, Node, js_number},
    overrides::{Component, PropValue, Props, SharedComponent, Slot, Style, parse_css, to_css},
    theme::Theme,
};

/// Styling inputs read from the transient `$` props.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleInput {
    pub infinite: bool,
    pub size: Size,
    pub steps: usize,
    pub success_value: f64,
    pub value: f64,
    pub index: Option<usize>,
    pub is_left: bool,
}

impl StyleInput {
    pub fn from_props(props: &Props) -> Self {
        Self {
            infinite: props.bool("$infinite").unwrap_or(false),
            size: props
                .text("$size")
                .and_then(Size::parse)
                .unwrap_or_default(),
            steps: props.number("$steps").map_or(1, |n| n as usize),
            success_value: props.number("$successValue").unwrap_or(100.0),
            value: props.number("$value").unwrap_or(0.0),
            index: props.number("$index").map(|n| n as usize),
            is_left: props.bool("$isLeft").unwrap_or(false),
        }
    }
}

/// How much of one segment is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentFill {
    Full,
    /// The segment currently loading in a stepped bar.
    Active,
    Empty,
    /// Percentage of a single-step bar, unclamped.
    Partial(f64),
}

impl SegmentFill {
    /// Fraction in `0.0..=1.0` for renderers that cannot animate.
    pub fn fraction(&self) -> f64 {
        match self {
            SegmentFill::Full => 1.0,
            SegmentFill::Active => 0.5,
            SegmentFill::Empty => 0.0,
            SegmentFill::Partial(percent) if percent.is_nan() => 0.0,
            SegmentFill::Partial(percent) => (percent / 100.0).clamp(0.0, 1.0),
        }
    }
}

pub fn segment_fill(index: usize, steps: usize, value: f64, success_value: f64) -> SegmentFill {
    let percent = value * 100.0 / success_value;
    if steps <= 1 {
        return SegmentFill::Partial(percent);
    }

    // NaN and negatives saturate to 0
    let completed = (percent * steps as f64 / 100.0).floor() as usize;
    match index {
        i if i < completed => SegmentFill::Full,
        i if i == completed => SegmentFill::Active,
        _ => SegmentFill::Empty,
    }
}

type StyleFn = fn(&Theme, &StyleInput) -> Style;

/// A component that renders one tag with inline style computed from the
/// theme and the `$` props. Other props become attributes.
pub struct Styled {
    tag: &'static str,
    theme: Arc<Theme>,
    style: StyleFn,
}

impl Styled {
    pub fn new(tag: &'static str, theme: Arc<Theme>, style: StyleFn) -> Self {
        Self { tag, theme, style }
    }
}

impl Component for Styled {
    fn render(&self, props: Props, children: Vec<Node>) -> Element {
        let input = StyleInput::from_props(&props);
        let mut style = (self.style)(&self.theme, &input);
        let mut element = Element::new(self.tag);

        for (key, value) in props.iter() {
            if key.starts_with('$') || key == "style" {
                continue;
            }
            if let Some(attr) = value.to_attr() {
                element.set_attr(key, attr);
            }
        }

        // a plain `style` prop first, override declarations last
        for key in ["style", "$style"] {
            match props.get(key) {
                Some(PropValue::Style(extra)) => {
                    style.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Some(PropValue::Text(css)) => style.extend(parse_css(css)),
                _ => {}
            }
        }

        if !style.is_empty() {
            element.set_attr("style", to_css(&style));
        }
        element.extend_children(children);
        element
    }
}

/// Built-in component for a slot.
pub fn default_component(slot: Slot, theme: &Arc<Theme>) -> SharedComponent {
    let style: StyleFn = match slot {
        Slot::Root => root_style,
        Slot::BarContainer => bar_container_style,
        Slot::Bar => bar_style,
        Slot::BarProgress => bar_progress_style,
        Slot::Label => label_style,
        Slot::InfiniteBar => infinite_bar_style,
    };
    Arc::new(Styled::new("div", Arc::clone(theme), style))
}

fn declarations<const N: usize>(pairs: [(&str, String); N]) -> Style {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn bar_height(theme: &Theme, size: Size) -> String {
    match size {
        Size::Small => theme.sizing.bar_height_small.clone(),
        Size::Medium => theme.sizing.bar_height_medium.clone(),
        Size::Large => theme.sizing.bar_height_large.clone(),
    }
}

fn root_style(_theme: &Theme, _input: &StyleInput) -> Style {
    declarations([
        ("width", "100%".into()),
        ("display", "flex".into()),
        ("flex-direction", "column".into()),
    ])
}

fn bar_container_style(theme: &Theme, input: &StyleInput) -> Style {
    let mut style = declarations([
        ("display", "flex".into()),
        ("position", "relative".into()),
        ("gap", theme.sizing.segment_gap.clone()),
    ]);
    if input.infinite {
        style.insert("overflow".into(), "hidden".into());
        style.insert("height".into(), bar_height(theme, input.size));
        style.insert(
            "background-color".into(),
            theme.colors.progress_bar_track.clone(),
        );
    }
    style
}

fn bar_style(theme: &Theme, input: &StyleInput) -> Style {
    let height = bar_height(theme, input.size);
    declarations([
        ("flex-grow", "1".into()),
        ("position", "relative".into()),
        ("overflow", "hidden".into()),
        ("background-color", theme.colors.progress_bar_track.clone()),
        ("border-radius", height.clone()),
        ("height", height),
    ])
}

fn bar_progress_style(theme: &Theme, input: &StyleInput) -> Style {
    let fill = segment_fill(
        input.index.unwrap_or(0),
        input.steps,
        input.value,
        input.success_value,
    );
    let mut style = declarations([
        ("height", "100%".into()),
        ("background-color", theme.colors.progress_bar_fill.clone()),
        ("transition", "width 0.5s".into()),
    ]);
    let width = match fill {
        SegmentFill::Full | SegmentFill::Active => "100%".to_string(),
        SegmentFill::Empty => "0%".to_string(),
        SegmentFill::Partial(percent) => format!("{}%", js_number(percent)),
    };
    style.insert("width".into(), width);
    if fill == SegmentFill::Active {
        style.insert("animation-name".into(), "progress-bar-step-pulse".into());
        style.insert(
            "animation-duration".into(),
            theme.animation.step_pulse_duration.clone(),
        );
        style.insert("animation-iteration-count".into(), "infinite".into());
    }
    style
}

fn label_style(theme: &Theme, _input: &StyleInput) -> Style {
    declarations([
        ("color", theme.colors.label_text.clone()),
        ("font-size", theme.sizing.label_font_size.clone()),
        ("text-align", "center".into()),
        ("margin-top", theme.sizing.segment_gap.clone()),
    ])
}

fn infinite_bar_style(theme: &Theme, input: &StyleInput) -> Style {
    let height = bar_height(theme, input.size);
    let animation = if input.is_left {
        "progress-bar-infinite-left"
    } else {
        "progress-bar-infinite-right"
    };
    declarations([
        ("position", "absolute".into()),
        ("top", "0".into()),
        ("width", "40%".into()),
        ("background-color", theme.colors.progress_bar_fill.clone()),
        ("border-radius", height.clone()),
        ("height", height),
        ("animation-name", animation.into()),
        ("animation-duration", theme.animation.infinite_duration.clone()),
        ("animation-iteration-count", "infinite".into()),
        ("animation-timing-function", "ease-in-out".into()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Arc<Theme> {
        Arc::new(Theme::default())
    }

    #[test]
    fn test_segment_fill_single_step() {
        assert_eq!(segment_fill(0, 1, 50.0, 100.0), SegmentFill::Partial(50.0));
        assert_eq!(segment_fill(0, 1, 3.0, 4.0), SegmentFill::Partial(75.0));
    }

    #[test]
    fn test_segment_fill_stepped() {
        // 50% of 4 segments: two done, third loading
        let fills = (0..4)
            .map(|i| segment_fill(i, 4, 50.0, 100.0))
            .collect::<Vec<_>>();
        assert_eq!(
            fills,
            vec![
                SegmentFill::Full,
                SegmentFill::Full,
                SegmentFill::Active,
                SegmentFill::Empty
            ]
        );
    }

    #[test]
    fn test_segment_fill_degenerate_values() {
        assert_eq!(segment_fill(0, 3, 0.0, 0.0), SegmentFill::Active);
        assert_eq!(segment_fill(1, 3, -10.0, 100.0), SegmentFill::Empty);
        assert_eq!(SegmentFill::Partial(f64::NAN).fraction(), 0.0);
        assert_eq!(SegmentFill::Partial(250.0).fraction(), 1.0);
    }

    #[test]
    fn test_transient_props_are_not_attributes() {
        let bar = default_component(Slot::Bar, &theme());
        let el = bar.render(
            Props::new()
                .with("$size", "large")
                .with("title", "segment")
                .with("aria-hidden", None::<bool>),
            vec![],
        );
        assert_eq!(el.attr("title"), Some("segment"));
        assert_eq!(el.attr("$size"), None);
        assert_eq!(el.attr("aria-hidden"), None);
        assert_eq!(el.style_value("height"), Some("8px"));
    }

    #[test]
    fn test_style_override_wins() {
        let label = default_component(Slot::Label, &theme());
        let extra = Style::from([("color".to_string(), "hotpink".to_string())]);
        let el = label.render(Props::new().with("$style", extra), vec!["x".into()]);
        assert_eq!(el.style_value("color"), Some("hotpink"));
        assert_eq!(el.style_value("text-align"), Some("center"));
        assert_eq!(el.text(), "x");
    }

    #[test]
    fn test_text_style_merges_over_computed_style() {
        let root = default_component(Slot::Root, &theme());
        let el = root.render(
            Props::new().with("style", "color: red; width: 50%"),
            vec![],
        );
        assert_eq!(el.style_value("color"), Some("red"));
        assert_eq!(el.style_value("width"), Some("50%"));
        assert_eq!(el.style_value("display"), Some("flex"));
        assert_eq!(el.attr("style").map(|css| css.contains("color: red")), Some(true));
    }

    #[test]
    fn test_override_style_beats_plain_style() {
        let label = default_component(Slot::Label, &theme());
        let extra = Style::from([("color".to_string(), "hotpink".to_string())]);
        let el = label.render(
            Props::new()
                .with("style", "color: red; font-weight: bold")
                .with("$style", extra),
            vec![],
        );
        assert_eq!(el.style_value("color"), Some("hotpink"));
        assert_eq!(el.style_value("font-weight"), Some("bold"));
    }

    #[test]
    fn test_bar_progress_width() {
        let progress = default_component(Slot::BarProgress, &theme());
        let el = progress.render(
            Props::new()
                .with("$value", 33.0)
                .with("$successValue", 100.0)
                .with("$steps", 1usize)
                .with("$index", 0usize),
            vec![],
        );
        assert_eq!(el.style_value("width"), Some("33%"));
        assert_eq!(el.style_value("animation-name"), None);
    }

    #[test]
    fn test_infinite_bar_direction() {
        let infinite = default_component(Slot::InfiniteBar, &theme());
        let left = infinite.render(Props::new().with("$isLeft", true), vec![]);
        let right = infinite.render(Props::new(), vec![]);
        assert_eq!(
            left.style_value("animation-name"),
            Some("progress-bar-infinite-left")
        );
        assert_eq!(
            right.style_value("animation-name"),
            Some("progress-bar-infinite-right")
        );
    }
}
