//! UI components: skinned widgets and the panel that hosts them.

pub mod panel;
pub mod widgets;
