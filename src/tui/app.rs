// TUI application state
//
// Owns everything the view needs between frames: the wrapped log body and
// its scroll position, the System Logs toggle, the error toast and the
// spinner frame. Synchronization state stays in `LogSync`; the view reads it
// directly when drawing.

use super::components::Toast;
use super::theme::Theme;
use super::viewport::{LogViewport, TextSurface, ViewportSync};
use crate::config::WrapConfig;
use crate::jenkins::FetchError;
use crate::logging::LogBuffer;
use crate::sync::{Frontend, LogSync, SyncEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

/// Lines moved per mouse wheel notch
const WHEEL_STEP: usize = 3;

/// Main application state for the TUI
pub struct App {
    /// Wrapped console output of the tracked build
    pub viewport: LogViewport,

    viewport_sync: ViewportSync,

    /// Whether the System Logs pane is shown
    pub show_logs: bool,

    /// Transient error notification
    pub toast: Option<Toast>,

    /// Log buffer for system logs display
    pub log_buffer: LogBuffer,

    pub theme: Theme,

    /// Frame counter for spinners
    animation_frame: usize,
}

impl App {
    pub fn new(wrap: WrapConfig, log_buffer: LogBuffer) -> Self {
        Self {
            viewport: LogViewport::new(wrap),
            viewport_sync: ViewportSync::new(),
            show_logs: false,
            toast: None,
            log_buffer,
            theme: Theme::default(),
            animation_frame: 0,
        }
    }

    /// Advance spinner and expire the toast (called on the redraw timer)
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Whether new output is being followed
    pub fn following(&self) -> bool {
        self.viewport.at_bottom()
    }

    /// Handle a key press; returns an event for the sync loop if any
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SyncEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let scroll = self.viewport.scroll_mut();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(SyncEvent::Quit);
            }
            KeyCode::Char('q') | KeyCode::Esc => return Some(SyncEvent::Quit),
            KeyCode::Up | KeyCode::Char('k') => scroll.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => scroll.scroll_down(),
            KeyCode::PageUp => scroll.page_up(),
            KeyCode::PageDown => scroll.page_down(),
            KeyCode::Home | KeyCode::Char('g') => scroll.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => scroll.scroll_to_bottom(),
            KeyCode::Char('l') => self.show_logs = !self.show_logs,
            _ => {}
        }
        None
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let scroll = self.viewport.scroll_mut();
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                for _ in 0..WHEEL_STEP {
                    scroll.scroll_up();
                }
            }
            MouseEventKind::ScrollDown => {
                for _ in 0..WHEEL_STEP {
                    scroll.scroll_down();
                }
            }
            _ => {}
        }
    }
}

impl Frontend for App {
    fn refresh(&mut self, sync: &LogSync) {
        self.viewport_sync
            .sync(&mut self.viewport, sync.tracker().buffer());
    }

    fn report(&mut self, error: &FetchError) {
        self.toast = Some(Toast::new(error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jenkins::{BuildResult, StatusSnapshot};
    use crate::sync::LogChunk;
    use crossterm::event::KeyEventState;
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_lines(n: usize) -> App {
        let mut app = App::new(WrapConfig::default(), LogBuffer::new());
        app.viewport.resize(80, 10);

        let mut sync = LogSync::new(Duration::from_secs(5));
        sync.reduce(SyncEvent::StatusReceived(StatusSnapshot {
            build: 1,
            display_name: String::new(),
            started_at: None,
            result: BuildResult::Unknown,
            in_progress: true,
            building: true,
            estimated_duration_ms: 0,
        }));
        let text: String = (0..n).map(|i| format!("{}\n", i)).collect();
        sync.reduce(SyncEvent::ChunkReceived {
            build: 1,
            chunk: LogChunk {
                start: 0,
                new_offset: text.len() as u64,
                text,
                more_data: true,
            },
        });
        app.refresh(&sync);
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(WrapConfig::default(), LogBuffer::new());
        assert_eq!(app.handle_key(press(KeyCode::Char('q'))), Some(SyncEvent::Quit));
        assert_eq!(app.handle_key(press(KeyCode::Esc)), Some(SyncEvent::Quit));
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(SyncEvent::Quit)
        );
        assert_eq!(app.handle_key(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut app = App::new(WrapConfig::default(), LogBuffer::new());
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(app.handle_key(release), None);
    }

    #[test]
    fn test_refresh_follows_and_scroll_keys_detach() {
        let mut app = app_with_lines(30);
        assert!(app.following());
        assert_eq!(app.viewport.scroll().offset(), 20);

        app.handle_key(press(KeyCode::Char('k')));
        assert!(!app.following());

        app.handle_key(press(KeyCode::Home));
        assert_eq!(app.viewport.scroll().offset(), 0);

        app.handle_key(press(KeyCode::Char('G')));
        assert!(app.following());
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut app = app_with_lines(30);
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.viewport.scroll().offset(), 17);
    }

    #[test]
    fn test_logs_toggle() {
        let mut app = App::new(WrapConfig::default(), LogBuffer::new());
        assert!(!app.show_logs);
        app.handle_key(press(KeyCode::Char('l')));
        assert!(app.show_logs);
        app.handle_key(press(KeyCode::Char('l')));
        assert!(!app.show_logs);
    }

    #[test]
    fn test_report_shows_toast() {
        let mut app = App::new(WrapConfig::default(), LogBuffer::new());
        app.report(&FetchError::Transport("connection refused".into()));
        assert!(app
            .toast
            .as_ref()
            .is_some_and(|t| t.message.contains("connection refused")));
    }
}
