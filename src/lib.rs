//! A progress bar component rendering determinate (stepped) and
//! indeterminate progress into a DOM-like element tree, with accessibility
//! attributes and per-slot overrides.

pub mod component;
pub mod markup;
pub mod overrides;
pub mod theme;

pub use component::{
    Diagnostics, MountedProgressBar, NodeRef, ProgressBar, ProgressBarProps, Size,
    TracingDiagnostics,
};
pub use markup::{Element, Node, NodeHandle};
pub use overrides::{Component, Override, Overrides, PropValue, Props, Slot, resolve};
pub use theme::Theme;
