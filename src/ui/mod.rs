//! Rendering components for the docked chat widget.

pub mod composer;
pub mod history;
pub mod theme;
pub mod widget;

pub use composer::{Composer, ComposerResult};
pub use history::History;
pub use theme::Theme;
pub use widget::ChatDock;
