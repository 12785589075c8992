//! UI module: theme, widgets, and the top-level render dispatch.

pub mod render;
pub mod theme;
pub mod widgets;
