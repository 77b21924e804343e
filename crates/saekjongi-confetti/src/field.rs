//! Confetti field state management.

use rand::Rng;
use ratatui::{
    Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use saekjongi_core::{AnimationSpeed, Viewport};

use crate::glyphs;
use crate::particle::{self, Confetti, SPAWN_Y};

/// Virtual pixel width of one terminal cell.
pub const CELL_WIDTH_PX: f32 = 8.0;

/// Virtual pixel height of one terminal cell.
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Nominal animation frame period (60 Hz), in milliseconds.
const FRAME_MS: f32 = 1000.0 / 60.0;

/// Entry stagger depth, in viewport heights. New populations start
/// spread out above the top edge so the shower builds up over time.
const STAGGER_VIEWPORTS: f32 = 3.0;

/// Confetti field state.
#[derive(Debug)]
pub struct ConfettiField {
    /// The particle population, mutated in place every frame.
    particles: Vec<Confetti>,
    /// Viewport covering the terminal area, in virtual pixels.
    viewport: Viewport,
    /// Population size when (re)initialized.
    amount: usize,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
    /// Last update time in milliseconds.
    last_update_ms: u64,
}

impl ConfettiField {
    /// Create an empty field that will hold `amount` particles.
    pub fn new(amount: usize) -> Self {
        Self {
            particles: Vec::new(),
            viewport: Viewport::new(0.0, 0.0),
            amount,
            last_width: 0,
            last_height: 0,
            last_update_ms: 0,
        }
    }

    /// The current particle population.
    pub fn particles(&self) -> &[Confetti] {
        &self.particles
    }

    /// Drop the population so the next render respawns it.
    pub fn reset(&mut self) {
        self.particles.clear();
    }

    /// Initialize or reinitialize the population for the given dimensions.
    fn init_particles<R: Rng>(&mut self, rng: &mut R, width: u16, height: u16) {
        self.viewport = Viewport::new(
            width as f32 * CELL_WIDTH_PX,
            height as f32 * CELL_HEIGHT_PX,
        );
        self.particles = (0..self.amount)
            .map(|_| {
                let mut confetti = particle::spawn(rng, self.viewport);
                // Stagger entry heights so the shower builds up instead of
                // arriving as one sheet.
                confetti.y = SPAWN_Y - rng.gen_range(0.0..self.viewport.height * STAGGER_VIEWPORTS);
                confetti
            })
            .collect();
        self.last_width = width;
        self.last_height = height;
    }

    /// Advance every particle to the given animation time.
    fn update(&mut self, elapsed_ms: u64, speed: AnimationSpeed) {
        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms);
        self.last_update_ms = elapsed_ms;

        let delta_frames = (delta_ms as f32 / FRAME_MS) * speed.fall_speed();
        for confetti in &mut self.particles {
            particle::advance(confetti, delta_frames, self.viewport);
        }
    }

    /// Render the field to the frame, advancing the animation first.
    ///
    /// `tint` is the backdrop color applied while the section is in view.
    pub fn render<R: Rng>(
        &mut self,
        frame: &mut Frame,
        rng: &mut R,
        elapsed_ms: u64,
        speed: AnimationSpeed,
        tint: Option<Color>,
    ) {
        let area = frame.area();
        let width = area.width;
        let height = area.height;
        if width == 0 || height == 0 {
            return;
        }

        // Reinitialize if dimensions changed or the population is empty
        let dimensions_changed = width != self.last_width || height != self.last_height;
        if dimensions_changed || self.particles.is_empty() {
            self.init_particles(rng, width, height);
        }

        self.update(elapsed_ms, speed);

        // Project particles onto the cell grid
        let mut cells: Vec<Option<(char, Color)>> = vec![None; width as usize * height as usize];
        for confetti in &self.particles {
            if confetti.y < 0.0 {
                continue;
            }
            let col = (confetti.x / CELL_WIDTH_PX) as usize;
            let row = (confetti.y / CELL_HEIGHT_PX) as usize;
            if col >= width as usize || row >= height as usize {
                continue;
            }
            let Some(glyph) = glyphs::cell_glyph(confetti.shape, particle::x_scale(confetti))
            else {
                continue;
            };
            cells[row * width as usize + col] = Some((glyph, confetti.color));
        }

        let lines: Vec<Line> = (0..height as usize)
            .map(|row| {
                let spans: Vec<Span> = (0..width as usize)
                    .map(|col| match cells[row * width as usize + col] {
                        Some((glyph, color)) => {
                            Span::styled(glyph.to_string(), Style::new().fg(color))
                        }
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let mut backdrop = Paragraph::new(lines);
        if let Some(color) = tint {
            backdrop = backdrop.style(Style::new().bg(color));
        }
        frame.render_widget(backdrop, area);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_init_population_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ConfettiField::new(50);
        field.init_particles(&mut rng, 80, 24);
        assert_eq!(field.particles().len(), 50);
    }

    #[test]
    fn test_init_projects_viewport_from_cells() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ConfettiField::new(10);
        field.init_particles(&mut rng, 80, 24);
        assert_eq!(field.viewport, Viewport::new(80.0 * CELL_WIDTH_PX, 24.0 * CELL_HEIGHT_PX));
    }

    #[test]
    fn test_init_staggers_entry_heights() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ConfettiField::new(100);
        field.init_particles(&mut rng, 80, 24);
        let floor = SPAWN_Y - field.viewport.height * STAGGER_VIEWPORTS;
        assert!(field.particles().iter().all(|c| c.y <= SPAWN_Y));
        assert!(field.particles().iter().all(|c| c.y >= floor));
        // With 100 samples over three viewport heights the entries cannot
        // all land in one band.
        let top_half = field
            .particles()
            .iter()
            .filter(|c| c.y > floor / 2.0)
            .count();
        assert!(top_half > 10 && top_half < 90);
    }

    #[test]
    fn test_update_advances_particles() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ConfettiField::new(20);
        field.init_particles(&mut rng, 80, 24);
        let before: Vec<f32> = field.particles().iter().map(|c| c.y).collect();

        field.update(1000, AnimationSpeed::Medium);
        let after: Vec<f32> = field.particles().iter().map(|c| c.y).collect();
        assert!(before.iter().zip(&after).all(|(b, a)| a > b));
    }

    #[test]
    fn test_update_is_delta_based() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut field = ConfettiField::new(5);
        field.init_particles(&mut rng, 80, 24);

        field.update(1000, AnimationSpeed::Medium);
        let at_first = field.particles()[0].y;
        // Same animation time again: no elapsed delta, no movement.
        field.update(1000, AnimationSpeed::Medium);
        assert_eq!(field.particles()[0].y, at_first);
    }

    #[test]
    fn test_reset_empties_population() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut field = ConfettiField::new(5);
        field.init_particles(&mut rng, 80, 24);
        field.reset();
        assert!(field.particles().is_empty());
    }
}
