//! Terminal preview of a progress bar.

use iocraft::prelude::*;

use crate::component::{ProgressBarProps, SegmentFill, Sweep, segment_fill};

const FILLED: char = '█';
const ACTIVE: char = '▒';
const TRACK: char = '░';

/// Cell strings for each segment, `width` columns in total including the
/// one-column gaps between segments.
pub fn segment_cells(value: f64, success_value: f64, steps: usize, width: usize) -> Vec<String> {
    if steps == 0 {
        return Vec::new();
    }
    let segment_width = (width.saturating_sub(steps - 1) / steps).max(1);

    (0..steps)
        .map(|i| match segment_fill(i, steps, value, success_value) {
            SegmentFill::Active => ACTIVE.to_string().repeat(segment_width),
            fill => {
                let filled = (fill.fraction() * segment_width as f64).round() as usize;
                let mut cells = FILLED.to_string().repeat(filled);
                cells.push_str(&TRACK.to_string().repeat(segment_width - filled));
                cells
            }
        })
        .collect()
}

#[derive(Props)]
pub struct TerminalProgressBarProps {
    pub value: f64,
    pub success_value: f64,
    pub steps: usize,
    pub infinite: bool,
    pub label: Option<String>,
    pub width: usize,
}

impl Default for TerminalProgressBarProps {
    fn default() -> Self {
        Self {
            value: 0.0,
            success_value: 100.0,
            steps: 1,
            infinite: false,
            label: None,
            width: 40,
        }
    }
}

impl From<&ProgressBarProps> for TerminalProgressBarProps {
    fn from(props: &ProgressBarProps) -> Self {
        Self {
            value: props.value,
            success_value: props.success_value,
            steps: props.steps,
            infinite: props.infinite,
            label: props.show_label.then(|| props.progress_label_text()),
            ..Default::default()
        }
    }
}

#[component]
pub fn TerminalProgressBar(props: &TerminalProgressBarProps) -> impl Into<AnyElement<'static>> {
    let bar = if props.infinite {
        element! {
            Sweep(width: props.width)
        }
        .into_any()
    } else {
        let cells =
            segment_cells(props.value, props.success_value, props.steps, props.width).join(" ");
        element! {
            Text(content: cells, color: Color::Blue)
        }
        .into_any()
    };

    let label = props.label.clone().map(|label| {
        element! {
            Text(content: label, color: Color::Grey)
        }
        .into_any()
    });

    element! {
        View(flex_direction: FlexDirection::Column) {
            #(bar)
            #(label)
        }
    }
}

#[derive(Props)]
pub struct LivePreviewProps {
    pub width: usize,
    pub label: Option<String>,
}

impl Default for LivePreviewProps {
    fn default() -> Self {
        Self {
            width: 40,
            label: None,
        }
    }
}

/// Animated infinite preview that runs until 'q' is pressed.
#[component]
pub fn LivePreview(mut hooks: Hooks, props: &LivePreviewProps) -> impl Into<AnyElement<'static>> {
    let mut system = hooks.use_context_mut::<SystemContext>();
    let mut should_exit = hooks.use_state(|| false);

    hooks.use_terminal_events(move |event| {
        if let TerminalEvent::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
            && let KeyCode::Char('q') = code
        {
            should_exit.set(true);
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let label = props.label.clone().map(|label| {
        element! {
            Text(content: label, color: Color::Grey)
        }
        .into_any()
    });

    element! {
        View(flex_direction: FlexDirection::Column) {
            Sweep(width: props.width)
            #(label)
            Text(content: "(Press 'Q' to exit)", color: Color::Grey)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_segment_cells() {
        assert_eq!(segment_cells(50.0, 100.0, 1, 10), vec!["█████░░░░░"]);
        assert_eq!(segment_cells(150.0, 100.0, 1, 4), vec!["████"]);
        assert_eq!(segment_cells(5.0, 0.0, 1, 4), vec!["████"]);
        assert_eq!(segment_cells(0.0, 0.0, 1, 4), vec!["░░░░"]);
    }

    #[test]
    fn test_stepped_cells() {
        assert_eq!(
            segment_cells(50.0, 100.0, 4, 11),
            vec!["██", "██", "▒▒", "░░"]
        );
        assert!(segment_cells(50.0, 100.0, 0, 11).is_empty());
        // narrower than the step count still draws one cell each
        assert_eq!(segment_cells(0.0, 100.0, 3, 2).len(), 3);
    }

    #[test]
    fn test_props_from_progress_bar_props() {
        let props = ProgressBarProps::new(25.0).steps(2).show_label(true);
        let terminal = TerminalProgressBarProps::from(&props);
        assert_eq!(terminal.steps, 2);
        assert_eq!(terminal.label.as_deref(), Some("25% Loaded"));

        let hidden = TerminalProgressBarProps::from(&ProgressBarProps::new(25.0));
        assert_eq!(hidden.label, None);
    }
}
