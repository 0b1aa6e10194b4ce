use std::{collections::HashMap, fmt, sync::Arc};

use parking_lot::Mutex;

use crate::{
    component::default_component,
    markup::{Element, Node, NodeHandle, js_number, js_round},
    overrides::{Overrides, Props, PropValue, SharedComponent, Slot, resolve},
    theme::Theme,
};

const DATA_MARKER: &str = "progress-bar";
const ERROR_MESSAGE_DEPRECATED: &str =
    "progressbar_ui::ProgressBar The `error_message` prop is deprecated in WAI-ARIA v1.2.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "small" => Some(Size::Small),
            "medium" => Some(Size::Medium),
            "large" => Some(Size::Large),
            _ => None,
        }
    }
}

impl From<Size> for PropValue {
    fn from(size: Size) -> Self {
        PropValue::Text(size.as_str().to_string())
    }
}

pub type ProgressLabelFn = Arc<dyn Fn(f64, f64) -> String + Send + Sync>;

/// `"{percent}% Loaded"`, rounded and printed like a browser would.
pub fn default_progress_label(value: f64, success_value: f64) -> String {
    format!("{}% Loaded", js_number(js_round(value / success_value * 100.0)))
}

/// Shared handle to the root node of a mounted progress bar.
#[derive(Debug, Clone, Default)]
pub struct NodeRef(Arc<Mutex<Option<NodeHandle>>>);

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<NodeHandle> {
        *self.0.lock()
    }

    fn set(&self, handle: NodeHandle) {
        *self.0.lock() = Some(handle);
    }
}

#[derive(Clone)]
pub struct ProgressBarProps {
    /// Accessible name; defaults to the progress label.
    pub aria_label: Option<String>,
    pub value: f64,
    pub success_value: f64,
    pub steps: usize,
    pub size: Size,
    pub infinite: bool,
    pub show_label: bool,
    /// Deprecated, see WAI-ARIA v1.2.
    pub error_message: Option<String>,
    pub get_progress_label: ProgressLabelFn,
    pub overrides: Overrides,
    pub node_ref: Option<NodeRef>,
    /// Extra attributes for the root element.
    pub rest: Props,
}

impl Default for ProgressBarProps {
    fn default() -> Self {
        Self {
            aria_label: None,
            value: 0.0,
            success_value: 100.0,
            steps: 1,
            size: Size::default(),
            infinite: false,
            show_label: false,
            error_message: None,
            get_progress_label: Arc::new(default_progress_label),
            overrides: Overrides::default(),
            node_ref: None,
            rest: Props::default(),
        }
    }
}

impl fmt::Debug for ProgressBarProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBarProps")
            .field("aria_label", &self.aria_label)
            .field("value", &self.value)
            .field("success_value", &self.success_value)
            .field("steps", &self.steps)
            .field("size", &self.size)
            .field("infinite", &self.infinite)
            .field("show_label", &self.show_label)
            .field("error_message", &self.error_message)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl ProgressBarProps {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    pub fn success_value(mut self, success_value: f64) -> Self {
        self.success_value = success_value;
        self
    }

    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn infinite(mut self, infinite: bool) -> Self {
        self.infinite = infinite;
        self
    }

    pub fn show_label(mut self, show_label: bool) -> Self {
        self.show_label = show_label;
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn progress_label<F>(mut self, f: F) -> Self
    where
        F: Fn(f64, f64) -> String + Send + Sync + 'static,
    {
        self.get_progress_label = Arc::new(f);
        self
    }

    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn node_ref(mut self, node_ref: NodeRef) -> Self {
        self.node_ref = Some(node_ref);
        self
    }

    pub fn rest(mut self, rest: Props) -> Self {
        self.rest = rest;
        self
    }

    pub fn progress_label_text(&self) -> String {
        (self.get_progress_label)(self.value, self.success_value)
    }

    fn error_message_text(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|msg| !msg.is_empty())
    }

    fn shared_props(&self) -> Props {
        Props::new()
            .with("$infinite", self.infinite)
            .with("$size", self.size)
            .with("$steps", self.steps)
            .with("$successValue", self.success_value)
            .with("$value", self.value)
    }
}

/// Sink for development-time diagnostics.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, message: &str);
}

#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "progressbar_ui", "{message}");
    }
}

/// Renders [`ProgressBarProps`] into an element tree.
///
/// ```rust,ignore
/// let bar = ProgressBar::default();
/// let tree = bar.render(&ProgressBarProps::new(50.0).steps(4).show_label(true));
/// println!("{tree}");
/// ```
#[derive(Clone)]
pub struct ProgressBar {
    defaults: HashMap<Slot, SharedComponent>,
    diagnostics: Arc<dyn Diagnostics>,
    dev_mode: bool,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(Arc::new(Theme::default()))
    }
}

impl ProgressBar {
    pub fn new(theme: Arc<Theme>) -> Self {
        let defaults = Slot::ALL
            .into_iter()
            .map(|slot| (slot, default_component(slot, &theme)))
            .collect();
        Self {
            defaults,
            diagnostics: Arc::new(TracingDiagnostics),
            dev_mode: cfg!(debug_assertions),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Development mode enables deprecation warnings on mount.
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Mounts a progress bar: warns about deprecated props once, and keeps a
    /// root handle that stays the same for every later render.
    pub fn mount(&self, props: &ProgressBarProps) -> MountedProgressBar {
        if self.dev_mode && props.error_message_text().is_some() {
            self.diagnostics.warn(ERROR_MESSAGE_DEPRECATED);
        }

        MountedProgressBar {
            bar: self.clone(),
            handle: NodeHandle::next(),
        }
    }

    pub fn render(&self, props: &ProgressBarProps) -> Element {
        let resolve_slot = |slot: Slot| resolve(props.overrides.get(slot), &self.defaults[&slot]);
        let (root, root_props) = resolve_slot(Slot::Root);
        let (bar_container, bar_container_props) = resolve_slot(Slot::BarContainer);
        let (bar, bar_props) = resolve_slot(Slot::Bar);
        let (bar_progress, bar_progress_props) = resolve_slot(Slot::BarProgress);
        let (label, label_props) = resolve_slot(Slot::Label);
        let (infinite_bar, infinite_bar_props) = resolve_slot(Slot::InfiniteBar);

        let shared = props.shared_props();

        let body: Vec<Node> = if props.infinite {
            let size = Props::new().with("$size", props.size);
            let left = size.clone().with("$isLeft", true);
            vec![
                infinite_bar
                    .render(left.merged(&infinite_bar_props), vec![])
                    .into(),
                infinite_bar
                    .render(size.merged(&infinite_bar_props), vec![])
                    .into(),
            ]
        } else {
            (0..props.steps)
                .map(|i| {
                    let progress = bar_progress.render(
                        Props::new()
                            .with("$index", i)
                            .merged(&shared)
                            .merged(&bar_progress_props),
                        vec![],
                    );
                    bar.render(shared.clone().merged(&bar_props), vec![progress.into()])
                        .with_key(i)
                        .into()
                })
                .collect()
        };

        let mut children = vec![
            bar_container
                .render(shared.clone().merged(&bar_container_props), body)
                .into(),
        ];
        if props.show_label {
            let text = props.progress_label_text();
            children.push(
                label
                    .render(shared.clone().merged(&label_props), vec![text.into()])
                    .into(),
            );
        }

        let root_base = self
            .accessibility_props(props)
            .merged(&props.rest)
            .merged(&shared)
            .merged(&root_props);
        root.render(root_base, children)
    }

    fn accessibility_props(&self, props: &ProgressBarProps) -> Props {
        let aria_label = match props.aria_label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => props.progress_label_text(),
        };
        let (now, min, max) = if props.infinite {
            (None, None, None)
        } else {
            (Some(props.value), Some(0.0), Some(props.success_value))
        };
        let error_message = props.error_message_text();

        Props::new()
            .with("data-baseweb", DATA_MARKER)
            .with("role", "progressbar")
            .with("aria-label", aria_label)
            .with("aria-valuenow", now)
            .with("aria-valuemin", min)
            .with("aria-valuemax", max)
            .with("aria-invalid", error_message.map(|_| true))
            .with("aria-errormessage", error_message)
    }
}

/// A progress bar instance with a lifetime across renders.
pub struct MountedProgressBar {
    bar: ProgressBar,
    handle: NodeHandle,
}

impl MountedProgressBar {
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// Renders and publishes the root handle to `props.node_ref`.
    pub fn render(&self, props: &ProgressBarProps) -> Element {
        let mut root = self.bar.render(props);
        root.handle = Some(self.handle);
        if let Some(node_ref) = &props.node_ref {
            node_ref.set(self.handle);
        }
        root
    }
}
