//! Colors
//!
//! A restrained palette: the transcript does the talking, the chrome stays
//! out of the way.

use ratatui::style::Color;

/// Accent for the status bar's provider/model segment
pub const ACCENT: Color = Color::Cyan;

/// Finalized and streaming user lines
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Turn-failure lines
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Borders, greeting, and other secondary text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);
