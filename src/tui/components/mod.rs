// Components module - UI building blocks
//
// - Header: build number, result/spinner, start and elapsed time
// - Status bar: read offset, poll cadence, follow state, key hints
// - Logs panel: System Logs pane
// - Scrollbar and toast helpers

pub mod header;
pub mod logs_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod toast;

pub use toast::Toast;
