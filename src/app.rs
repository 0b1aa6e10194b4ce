use std::sync::Arc;

use color_eyre::eyre::bail;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use iocraft::prelude::*;
use progressbar_ui::{
    Element as Markup, ProgressBar, ProgressBarProps, Size, Theme,
    component::{LivePreview, TerminalProgressBar, TerminalProgressBarProps},
};

const PREVIEW_WIDTH: usize = 40;
const FALSE_TRUE_SELECTION: [&str; 2] = ["False", "True"];
const SIZES: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Determinate = 0,
    Infinite = 1,
}

impl Mode {
    fn from_index(index: usize) -> color_eyre::Result<Self> {
        match index {
            0 => Ok(Mode::Determinate),
            1 => Ok(Mode::Infinite),
            _ => bail!("Invalid mode index: {index}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html = 0,
    Json = 1,
}

impl OutputFormat {
    fn from_index(index: usize) -> color_eyre::Result<Self> {
        match index {
            0 => Ok(OutputFormat::Html),
            1 => Ok(OutputFormat::Json),
            _ => bail!("Invalid output format index: {index}"),
        }
    }

    fn write(&self, tree: &Markup) -> color_eyre::Result<String> {
        Ok(match self {
            OutputFormat::Html => tree.to_string(),
            OutputFormat::Json => serde_json::to_string_pretty(tree)?,
        })
    }
}

#[derive(Default)]
pub struct App {
    theme: Option<Arc<Theme>>,
}

impl App {
    pub async fn run(&mut self) -> color_eyre::Result<()> {
        println!("progressbar-ui v{}", env!("CARGO_PKG_VERSION"));
        println!();

        self.load_theme()?;
        let props = prompt_props()?;

        let format = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Output format")
            .items(&["HTML", "JSON"])
            .default(0)
            .interact()?;
        let format = OutputFormat::from_index(format)?;

        let bar = ProgressBar::new(self.theme());
        let mounted = bar.mount(&props);
        let tree = mounted.render(&props);
        println!("{}", format.write(&tree)?);
        println!();

        let preview = TerminalProgressBarProps::from(&props);
        if props.infinite {
            element! {
                LivePreview(width: PREVIEW_WIDTH, label: preview.label)
            }
            .render_loop()
            .await?;
        } else {
            element! {
                TerminalProgressBar(
                    value: preview.value,
                    success_value: preview.success_value,
                    steps: preview.steps,
                    label: preview.label,
                    width: PREVIEW_WIDTH,
                )
            }
            .print();
        }

        Ok(())
    }

    fn theme(&self) -> Arc<Theme> {
        self.theme.clone().unwrap_or_default()
    }

    fn load_theme(&mut self) -> color_eyre::Result<()> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Theme JSON path (empty for default theme)")
            .allow_empty(true)
            .interact_text()?;
        let path = path.trim_matches(|c| c == '\"' || c == '\'').trim();
        if path.is_empty() {
            return Ok(());
        }

        println!("Loading theme from {path}...");
        self.theme = Some(Arc::new(Theme::load(path)?));
        Ok(())
    }
}

fn prompt_props() -> color_eyre::Result<ProgressBarProps> {
    let mode = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select mode")
        .items(&["Determinate", "Infinite"])
        .default(0)
        .interact()?;
    let mode = Mode::from_index(mode)?;

    let value: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Value")
        .default(50.0)
        .interact_text()?;
    let success_value: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Success value")
        .default(100.0)
        .interact_text()?;

    let mut props = ProgressBarProps::new(value)
        .success_value(success_value)
        .infinite(mode == Mode::Infinite);

    if mode == Mode::Determinate {
        props.steps = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Steps")
            .default(1usize)
            .interact_text()?;
    }

    let size = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Size")
        .items(&SIZES.map(|size| size.as_str()))
        .default(1)
        .interact()?;
    props.size = SIZES[size];

    let show_label = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Show label?")
        .items(&FALSE_TRUE_SELECTION)
        .default(1)
        .interact()?;
    props.show_label = show_label == 1;

    let aria_label: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Accessible label (empty for the progress label)")
        .allow_empty(true)
        .interact_text()?;
    if !aria_label.is_empty() {
        props.aria_label = Some(aria_label);
    }

    let error_message: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Error message (deprecated, empty for none)")
        .allow_empty(true)
        .interact_text()?;
    if !error_message.is_empty() {
        props.error_message = Some(error_message);
    }

    Ok(props)
}
