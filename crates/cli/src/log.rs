use std::fmt;
use std::sync::OnceLock;

use crossterm::style::Stylize;

static VERBOSE_OUTPUT: OnceLock<()> = OnceLock::new();

pub fn enable_verbose_output() {
    let _ = VERBOSE_OUTPUT.set(());
}

pub fn is_verbose_output_enabled() -> bool {
    VERBOSE_OUTPUT.get().is_some()
}

static COLOR_OUTPUT: OnceLock<()> = OnceLock::new();

pub fn enable_color_output() {
    let _ = COLOR_OUTPUT.set(());
}

pub fn is_color_output_enabled() -> bool {
    COLOR_OUTPUT.get().is_some()
}

/// Print a cargo-style status line: a right-aligned colored label followed
/// by a message.
#[macro_export]
macro_rules! status {
    ($label:literal, $($arg:tt)*) => {{
        eprintln!("{} {}", $crate::log::Label($label), format_args!($($arg)*));
    }};
}

pub use status;

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        if $crate::log::is_verbose_output_enabled() {
            $crate::log::status!("Info", $($arg)*);
        }
    }};
}

pub use info;

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        eprintln!("{}: {}", $crate::log::ErrorLabel, format_args!($($arg)*));
    }};
}

pub use error;

pub struct Label(pub &'static str);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad before styling: the ANSI escapes would otherwise eat the width.
        let label = format!("{:>12}", self.0);
        if is_color_output_enabled() {
            write!(f, "{}", label.dark_green().bold())
        } else {
            write!(f, "{label}")
        }
    }
}

pub struct ErrorLabel;

impl fmt::Display for ErrorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = "error";
        if is_color_output_enabled() {
            write!(f, "{}", title.dark_red().bold())
        } else {
            write!(f, "{title}")
        }
    }
}
