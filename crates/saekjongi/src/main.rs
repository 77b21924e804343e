use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use saekjongi_confetti::ConfettiField;
use saekjongi_config::Config;
use saekjongi_core::AnimationSpeed;

mod clock;

use clock::AnimationClock;

/// Backdrop tint shown while the terminal has focus.
const FOCUS_TINT: Color = Color::Rgb(28, 28, 32);

/// Accent color for the help line.
const ACCENT: Color = Color::Cyan;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let terminal = ratatui::init();
    execute!(stdout(), EnableFocusChange)?;
    let result = App::new(config).run(terminal);
    let _ = execute!(stdout(), DisableFocusChange);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Whether the terminal currently has focus (the section is in view).
    in_view: bool,
    /// Most recent focus transition, for the status note.
    last_signal: Option<&'static str>,
    /// Current animation speed.
    speed: AnimationSpeed,
    /// Whether the focus-driven backdrop tint is enabled.
    backdrop: bool,
    /// The confetti population.
    field: ConfettiField,
    /// Animation time source, excluding paused stretches.
    clock: AnimationClock,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded configuration.
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            in_view: true,
            last_signal: None,
            speed: config.speed,
            backdrop: config.backdrop,
            field: ConfettiField::new(config.amount),
            clock: AnimationClock::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let elapsed_ms = self.clock.elapsed_ms();
        let tint = if self.backdrop && self.in_view {
            Some(FOCUS_TINT)
        } else {
            None
        };

        let mut rng = rand::thread_rng();
        self.field
            .render(frame, &mut rng, elapsed_ms, self.speed, tint);

        // Help line over the bottom row of the field
        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());

        let mut help = vec![
            "q".bold().fg(ACCENT),
            " quit  ".dark_gray(),
            "space".bold().fg(ACCENT),
            if self.clock.is_paused() {
                " resume  ".dark_gray()
            } else {
                " pause  ".dark_gray()
            },
            "s".bold().fg(ACCENT),
            format!(" speed: {}  ", self.speed.name()).dark_gray(),
            "r".bold().fg(ACCENT),
            " respawn".dark_gray(),
        ];
        if let Some(signal) = self.last_signal {
            help.push(format!("  ·  viewport {signal}").dark_gray());
        }
        frame.render_widget(Line::from(help).centered(), chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout for a smooth animation tick.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::FocusGained => self.on_viewport_enter(),
                Event::FocusLost => self.on_viewport_leave(),
                Event::Mouse(_) => {}
                // Dimension changes are picked up by the field on the next draw
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.clock.toggle(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('r')) => self.respawn(),
            _ => {}
        }
    }

    /// The section scrolled into view: tint the backdrop, note the signal.
    /// The animation itself keeps running either way.
    fn on_viewport_enter(&mut self) {
        self.in_view = true;
        self.last_signal = Some("enter");
    }

    /// The section left the view.
    fn on_viewport_leave(&mut self) {
        self.in_view = false;
        self.last_signal = Some("leave");
    }

    /// Cycle through animation speeds.
    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
    }

    /// Throw a fresh batch of confetti.
    fn respawn(&mut self) {
        self.field.reset();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
