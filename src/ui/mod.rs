pub mod components;
pub mod data;
pub mod debounce;
pub mod tui;
