//! Confetti particle math (stateful).

use rand::Rng;
use ratatui::style::Color;
use saekjongi_core::{Shape, Viewport};

use crate::palette::PALETTE;

/// Spawn height above the viewport top, in virtual pixels.
pub const SPAWN_Y: f32 = -20.0;

/// Fall-rate range for new particles, in virtual pixels per frame.
const SPEED_RANGE: std::ops::Range<f32> = 2.2..2.8;

/// Particle width is this factor divided by its speed.
const WIDTH_FACTOR: f32 = 24.0;

/// Particle height is this factor divided by its speed.
const HEIGHT_FACTOR: f32 = 48.0;

/// State of a single confetti particle.
#[derive(Debug, Clone)]
pub struct Confetti {
    /// Width in virtual pixels.
    pub width: f32,
    /// Height in virtual pixels.
    pub height: f32,
    /// Fill color, drawn from [`PALETTE`].
    pub color: Color,
    /// Fall rate in virtual pixels per frame.
    pub speed: f32,
    /// Horizontal position in virtual pixels.
    pub x: f32,
    /// Vertical position in virtual pixels.
    pub y: f32,
    /// Tumble rotation in degrees.
    pub rotation: f32,
    /// Shape variant.
    pub shape: Shape,
}

/// Spawn one particle with randomized attributes above the viewport top.
///
/// Faster particles are drawn smaller: size is inversely proportional to
/// the sampled speed.
pub fn spawn<R: Rng>(rng: &mut R, viewport: Viewport) -> Confetti {
    let speed = rng.gen_range(SPEED_RANGE);
    Confetti {
        width: WIDTH_FACTOR / speed,
        height: HEIGHT_FACTOR / speed,
        color: PALETTE[rng.gen_range(0..PALETTE.len())],
        speed,
        x: rng.gen_range(0.0..viewport.width),
        y: SPAWN_Y,
        rotation: 0.0,
        shape: if rng.gen_range(0..2) == 0 {
            Shape::Circle
        } else {
            Shape::Rect
        },
    }
}

/// Advance a particle by `delta_frames` animation frames.
///
/// The vertical position increments by the particle speed, wrapping back
/// above the viewport once it meets the bottom edge. The horizontal
/// position drifts sinusoidally with the fall, wrapping to the left edge
/// once it passes the right one.
pub fn advance(confetti: &mut Confetti, delta_frames: f32, viewport: Viewport) {
    if confetti.y < viewport.height {
        confetti.y += confetti.speed * delta_frames;
    } else {
        confetti.y = SPAWN_Y;
    }

    let x = confetti.x + (confetti.y * (confetti.speed / 100.0)).sin() * delta_frames;
    confetti.x = if x > viewport.width { 0.0 } else { x };

    confetti.rotation = confetti.y * confetti.speed;
}

/// Horizontal scale factor of the tumble at the particle's current height.
pub fn x_scale(confetti: &Confetti) -> f32 {
    (confetti.y / 10.0).cos()
}
