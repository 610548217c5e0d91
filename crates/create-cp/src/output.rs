//! Terminal output utilities

use console::style;
use create_cp_core::fetch::FetchProgress;
use create_cp_core::ColorTag;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BANNER: &str = "Create-cp -- The quickly build project tools";

/// Print the start-up banner
pub fn banner() {
    println!("\n{}\n", style(BANNER).cyan().bold());
}

/// Print a cancellation notice
pub fn cancelled(msg: &str) {
    println!("{} {}", style("✖").red(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print the closing instructions
pub fn next_steps(steps: &[String]) {
    println!("\n{}\n", style("Done. Now run:").blue());
    for step in steps {
        println!("{}", style(format!("  {}", step)).blue());
    }
    println!();
}

/// Render a catalog label in its tag colour
pub fn paint(label: &str, color: ColorTag) -> String {
    let styled = style(label);
    match color {
        ColorTag::Reset => return label.to_string(),
        ColorTag::Yellow => styled.yellow(),
        ColorTag::Blue => styled.blue(),
        ColorTag::Magenta => styled.magenta(),
        ColorTag::Green => styled.green(),
        ColorTag::Red => styled.red(),
        ColorTag::Cyan => styled.cyan(),
    }
    .to_string()
}

/// Spinner shown while the template downloads
pub struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        Self { pb }
    }

    /// Stop ticking and leave `symbol text` on screen
    fn persist(&self, symbol: String, text: &str) {
        if let Ok(style) = ProgressStyle::with_template("{prefix} {msg}") {
            self.pb.set_style(style);
        }
        self.pb.set_prefix(symbol);
        self.pb.finish_with_message(text.to_string());
    }
}

impl FetchProgress for SpinnerProgress {
    fn start(&self, message: &str) {
        self.pb.set_message(message.to_string());
        self.pb.enable_steady_tick(Duration::from_millis(100));
    }

    fn succeed(&self, message: &str) {
        self.persist(style("√").green().to_string(), message);
    }

    fn fail(&self, message: &str) {
        self.persist(style("×").red().to_string(), message);
    }
}
