//! UI layer for the presenter: app shell, section views, theme and effects.

pub mod app;
pub mod effects;
pub mod sections;
pub mod theme;

pub use app::PresenterApp;
