// Colors for the TUI chrome
//
// The log body keeps the colors the build emitted; everything around it
// (header, status bar, log pane, toast) takes its colors from here.

use crate::jenkins::BuildResult;
use crate::logging::LogLevel;
use ratatui::style::Color;

/// Theme definition with all chrome colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub highlight: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,
    pub muted: Color,

    // Build results
    pub success: Color,
    pub failure: Color,
    pub unstable: Color,
    pub running: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            border: Color::Gray,
            highlight: Color::Yellow,

            title: Color::Cyan,
            status_bar: Color::Green,
            muted: Color::DarkGray,

            success: Color::Green,
            failure: Color::Red,
            unstable: Color::Yellow,
            running: Color::Cyan,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    /// Color for a finished build's result
    pub fn result_color(&self, result: BuildResult) -> Color {
        match result {
            BuildResult::Success => self.success,
            BuildResult::Failure => self.failure,
            BuildResult::Unstable => self.unstable,
            BuildResult::Aborted | BuildResult::Unknown => self.muted,
        }
    }

    pub fn log_level_color(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Error => self.log_error,
            LogLevel::Warn => self.log_warn,
            LogLevel::Info => self.log_info,
            LogLevel::Debug => self.log_debug,
            LogLevel::Trace => self.log_trace,
        }
    }
}
