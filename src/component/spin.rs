use std::time::Duration;

use iocraft::prelude::*;

const FILLED: char = '█';
const TRACK: char = '░';

/// Two blocks sweeping across a track in opposite directions, the
/// terminal counterpart of the pair of infinite bars.
pub fn sweep_frame(width: usize, frame: usize) -> String {
    if width == 0 {
        return String::new();
    }
    // each block covers 40% of the track
    let block = (width * 2 / 5).max(1);
    let left = frame % width;
    let right = width - 1 - left;

    (0..width)
        .map(|i| {
            let in_left = i >= left && i < left + block;
            let in_right = i <= right && i + block > right;
            if in_left || in_right { FILLED } else { TRACK }
        })
        .collect()
}

#[derive(Props)]
pub struct SweepProps {
    pub interval: Duration,
    pub width: usize,
    pub color: Option<Color>,
}

impl Default for SweepProps {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(80),
            width: 40,
            color: Some(Color::Blue),
        }
    }
}

#[component]
pub fn Sweep(mut hooks: Hooks, props: &SweepProps) -> impl Into<AnyElement<'static>> {
    let mut frame = hooks.use_state(|| 0usize);
    let width = props.width;

    let mut timer = tokio::time::interval(props.interval);
    hooks.use_future(async move {
        loop {
            timer.tick().await;
            frame.set((frame.get() + 1) % width.max(1));
        }
    });

    element! {
        Text(content: sweep_frame(width, frame.get()), color: props.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_frame_width() {
        for frame in 0..25 {
            assert_eq!(sweep_frame(10, frame).chars().count(), 10);
        }
        assert_eq!(sweep_frame(0, 3), "");
    }

    #[test]
    fn test_sweep_props_default_color() {
        let props = SweepProps::default();
        assert_eq!(props.color, Some(Color::Blue));
        assert_eq!(props.width, 40);
    }

    #[test]
    fn test_sweep_blocks_start_at_both_ends() {
        assert_eq!(sweep_frame(10, 0), "████░░████");
        assert_eq!(sweep_frame(10, 3), "░░░████░░░");
    }
}
