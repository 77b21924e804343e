//! Color palette for confetti particles.

use ratatui::style::Color;

/// The fixed confetti palette.
pub const PALETTE: [Color; 7] = [
    Color::Rgb(19, 30, 255),   // blue
    Color::Rgb(31, 183, 54),   // green
    Color::Rgb(250, 177, 192), // pink
    Color::Rgb(255, 230, 0),   // yellow
    Color::Rgb(94, 34, 151),   // purple
    Color::Rgb(255, 153, 0),   // orange
    Color::Rgb(248, 28, 77),   // red
];
