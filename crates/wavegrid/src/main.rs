mod contact;
mod logging;
mod page;
mod relay;

use std::io::stdout;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
};
use log::{info, warn};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Position, Rect},
    style::{Color, Stylize},
    text::Line,
};
use wavegrid_config::Config;
use wavegrid_core::{AnimationSpeed, CellSize, Pointer, Viewport};
use wavegrid_field::{
    Marquee, MonotonicClock, TerminalSurface, TickSource, WaveController, color::to_color,
};

use crate::contact::{ContactForm, FormAction};
use crate::page::{HelpState, Page};
use crate::relay::{RelayClient, SubmissionStatus};

/// How long a toast stays on screen.
const TOAST_MS: f64 = 4000.0;

/// Upper bound on queued events handled before the next frame.
const MAX_EVENTS_PER_FRAME: usize = 64;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init(Config::log_path().as_deref());
    info!("starting wavegrid");
    let config = Config::load()?;

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(Into::into)
        .and_then(|()| {
            let size = terminal.size()?;
            App::new(config, size.width, size.height).run(terminal)
        });
    let _ = execute!(stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    result
}

/// Short-lived notification in the navigation bar.
#[derive(Debug)]
struct Toast {
    text: String,
    error: bool,
    until_ms: f64,
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    cell: CellSize,
    accent: Color,
    speed: AnimationSpeed,
    /// Paused by the user.
    paused: bool,
    /// Terminal has focus.
    focused: bool,
    clock: MonotonicClock,
    wave: WaveController<TerminalSurface>,
    marquee: Marquee,
    page: Page,
    form: ContactForm,
    relay: RelayClient,
    last_tick_ms: f64,
    /// Marquee strip area from the last render, for mouse hit tests.
    marquee_area: Rect,
    /// Column of the last drag event over the marquee.
    drag_col: Option<u16>,
    toast: Option<Toast>,
}

impl App {
    /// Construct a new instance of [`App`] for a `cols` x `rows` terminal.
    pub fn new(config: Config, cols: u16, rows: u16) -> Self {
        let cell = config.terminal;
        let accent = to_color(config.render.color);

        let mut wave = WaveController::new(
            Viewport::from_cells(cols, rows, cell),
            config.field,
            config.render,
            config.lifecycle,
        );
        wave.attach_surface(TerminalSurface::new(
            config.render.background,
            config.render.glow_blur,
            cell.width_px,
        ));
        wave.set_speed(config.speed);

        let page = Page::new(&config, accent);
        let marquee = Marquee::new(
            page.marquee_cells() as f32 * cell.width_px,
            config.marquee.speed,
        );

        Self {
            running: false,
            cell,
            accent,
            speed: config.speed,
            paused: false,
            focused: true,
            clock: MonotonicClock::new(),
            wave,
            marquee,
            page,
            form: ContactForm::new(),
            relay: RelayClient::new(&config.contact),
            last_tick_ms: 0.0,
            marquee_area: Rect::default(),
            drag_col: None,
            toast: None,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let frame_interval = Duration::from_millis(self.config.lifecycle.frame_interval_ms);
        self.running = true;
        self.sync_visibility();

        while self.running {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(frame_interval)?;
        }

        self.wave.dispose();
        self.save_speed();
        Ok(())
    }

    /// Advance timers and animations to the current time.
    fn tick(&mut self) {
        let now = self.clock.now_ms();
        self.wave.poll_timers(now);
        self.wave.on_frame(now);

        let delta = (now - self.last_tick_ms).max(0.0);
        self.last_tick_ms = now;
        if !self.paused {
            self.marquee.advance(delta * self.speed.time_multiplier());
        }

        self.poll_relay(now);
        if self.toast.as_ref().is_some_and(|t| now >= t.until_ms) {
            self.toast = None;
        }
    }

    /// Pick up the outcome of a finished submission.
    fn poll_relay(&mut self, now: f64) {
        match self.relay.status() {
            SubmissionStatus::Sent(_) => {
                self.show_toast("Your message was sent! We'll get back to you soon.", false, now);
                self.form.reset();
                self.form.close();
                self.relay.acknowledge();
            }
            SubmissionStatus::Failed(e) => {
                self.form.set_error(Some(format!("Failed to send message: {e}")));
                self.show_toast("Failed to send message. Please try again.", true, now);
                self.relay.acknowledge();
            }
            SubmissionStatus::Idle | SubmissionStatus::Sending => {}
        }
    }

    fn show_toast(&mut self, text: &str, error: bool, now: f64) {
        self.toast = Some(Toast {
            text: text.to_string(),
            error,
            until_ms: now + TOAST_MS,
        });
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if let Some(surface) = self.wave.surface() {
            frame.render_widget(surface, area);
        }

        let areas = page::layout(area, self.page.service_count());
        self.marquee_area = areas.marquee;
        let help = HelpState {
            speed: self.speed.label(),
            paused: self.paused,
        };
        self.page.render(
            frame,
            &areas,
            self.marquee.offset() / self.cell.width_px,
            help,
        );

        if let Some(toast) = &self.toast {
            let text = toast.text.as_str();
            let span = if toast.error {
                text.red()
            } else {
                text.fg(self.accent)
            };
            frame.render_widget(Line::from(span).right_aligned(), areas.nav);
        }

        if self.form.is_open() {
            let sending = self.relay.status() == SubmissionStatus::Sending;
            self.form.render(frame, area, self.accent, sending);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one frame interval so animations keep running.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            self.on_event(event::read()?);
            // Drain the queue so bursts of mouse moves cost one frame
            for _ in 0..MAX_EVENTS_PER_FRAME {
                if !event::poll(Duration::ZERO)? {
                    break;
                }
                self.on_event(event::read()?);
            }
        }
        Ok(())
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            Event::Resize(cols, rows) => {
                let now = self.clock.now_ms();
                self.on_resize(cols, rows, now);
            }
            Event::FocusGained => {
                self.focused = true;
                self.sync_visibility();
            }
            Event::FocusLost => {
                self.focused = false;
                self.sync_visibility();
            }
            _ => {}
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16, now: f64) {
        self.wave
            .on_resize(Viewport::from_cells(cols, rows, self.cell), now);
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }

        if self.form.is_open() {
            match self.form.handle_key(key) {
                FormAction::Close => self.form.close(),
                FormAction::Submit => self.submit_form(),
                FormAction::None => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Char('c') => self.form.open(),
            KeyCode::Char('s') => self.cycle_speed(),
            KeyCode::Char('p') => self.toggle_pause(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let pointer = Pointer::from_cell(mouse.column, mouse.row, self.cell);
        let over_marquee = self
            .marquee_area
            .contains(Position::new(mouse.column, mouse.row));

        match mouse.kind {
            MouseEventKind::Moved => {
                self.wave.on_pointer_move(pointer.x, pointer.y);
                self.marquee.set_hovered(over_marquee);
            }
            MouseEventKind::Down(MouseButton::Left) if over_marquee => {
                self.marquee.begin_drag();
                self.drag_col = Some(mouse.column);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.wave.on_pointer_move(pointer.x, pointer.y);
                if let Some(prev) = self.drag_col {
                    let dx = mouse.column as f32 - prev as f32;
                    self.marquee.drag_by(dx * self.cell.width_px);
                    self.drag_col = Some(mouse.column);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.marquee.end_drag();
                self.drag_col = None;
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        match self.form.validate() {
            Ok(submission) => {
                self.form.set_error(None);
                if !self.relay.submit(submission) {
                    warn!("submission ignored, previous one still sending");
                }
            }
            Err(e) => self.form.set_error(Some(e)),
        }
    }

    /// The lattice animates only while focused and not paused.
    fn sync_visibility(&mut self) {
        self.wave.set_visible(self.focused && !self.paused);
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.sync_visibility();
    }

    /// Cycle through animation speeds.
    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
        self.wave.set_speed(self.speed);
    }

    /// Persist the speed if it changed during the session.
    fn save_speed(&mut self) {
        if self.speed == self.config.speed {
            return;
        }
        self.config.speed = self.speed;
        if let Err(e) = self.config.save() {
            warn!("could not save config: {e}");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ratatui::{Terminal, backend::TestBackend};
    use wavegrid_field::LifecycleState;

    fn app() -> App {
        let mut app = App::new(Config::default(), 100, 40);
        app.running = true;
        app.sync_visibility();
        app
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_focus_controls_animation() {
        let mut app = app();
        assert_eq!(app.wave.state(), LifecycleState::Animating);

        app.on_event(Event::FocusLost);
        assert_eq!(app.wave.state(), LifecycleState::Hidden);
        assert!(!app.wave.is_frame_scheduled());

        app.on_event(Event::FocusGained);
        assert_eq!(app.wave.state(), LifecycleState::Animating);
    }

    #[test]
    fn test_pause_key_stops_frames() {
        let mut app = app();
        app.on_event(press(KeyCode::Char('p')));
        assert!(app.paused);
        assert_eq!(app.wave.state(), LifecycleState::Hidden);

        // Regaining focus does not override the pause.
        app.on_event(Event::FocusGained);
        assert_eq!(app.wave.state(), LifecycleState::Hidden);
    }

    #[test]
    fn test_contact_form_captures_keys() {
        let mut app = app();
        app.on_event(press(KeyCode::Char('c')));
        assert!(app.form.is_open());

        // 'q' is typed into the form instead of quitting.
        app.on_event(press(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.form.value(contact::Field::Name), "q");

        app.on_event(press(KeyCode::Esc));
        assert!(!app.form.is_open());
        app.on_event(press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_incomplete_form_shows_error() {
        let mut app = app();
        app.on_event(press(KeyCode::Char('c')));
        app.on_event(Event::Key(KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }));
        assert_eq!(app.relay.status(), SubmissionStatus::Idle);
        assert!(app.form.is_open());
    }

    #[test]
    fn test_speed_cycles() {
        let mut app = app();
        app.on_event(press(KeyCode::Char('s')));
        assert_eq!(app.speed, AnimationSpeed::Fast);
        assert_eq!(app.wave.speed(), AnimationSpeed::Fast);
    }

    #[test]
    fn test_mouse_moves_reach_the_lattice() {
        let mut app = app();
        app.on_event(mouse(MouseEventKind::Moved, 10, 5));
        app.tick();
        assert_eq!(app.wave.pointer(), Pointer::from_cell(10, 5, app.cell));
    }

    #[test]
    fn test_resize_is_debounced() {
        let mut app = app();
        for (i, w) in (80..90).enumerate() {
            app.on_resize(w, 30, 1000.0 + i as f64 * 10.0);
        }
        // Last resize at 1090, settles 150 ms later.
        assert!(!app.wave.poll_timers(1200.0));
        assert_eq!(app.wave.stats().rebuilds, 0);
        assert!(app.wave.poll_timers(1240.0));
        assert_eq!(app.wave.stats().rebuilds, 1);
        assert_eq!(
            app.wave.grid().viewport(),
            Viewport::from_cells(89, 30, app.cell)
        );
    }

    #[test]
    fn test_sent_submission_resets_form() {
        let mut app = app();
        app.on_event(press(KeyCode::Char('c')));
        app.on_event(press(KeyCode::Char('A')));
        app.relay.set_status(SubmissionStatus::Sent("Email sent".to_string()));

        app.poll_relay(500.0);
        assert!(!app.form.is_open());
        assert_eq!(app.form.value(contact::Field::Name), "");
        assert_eq!(app.relay.status(), SubmissionStatus::Idle);
        let toast = app.toast.as_ref().unwrap();
        assert!(!toast.error);
        assert_eq!(toast.until_ms, 500.0 + TOAST_MS);
    }

    #[test]
    fn test_failed_submission_shows_error() {
        let mut app = app();
        app.on_event(press(KeyCode::Char('c')));
        app.on_event(press(KeyCode::Char('A')));
        let reason = relay::RelayError::Rejected("Invalid access key".to_string());
        app.relay.set_status(SubmissionStatus::Failed(reason.to_string()));

        app.poll_relay(500.0);
        assert!(app.form.is_open());
        assert_eq!(app.form.value(contact::Field::Name), "A");
        assert_eq!(app.relay.status(), SubmissionStatus::Idle);
        assert!(app.toast.as_ref().unwrap().error);

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Invalid access key"));
    }

    #[test]
    fn test_marquee_hover_and_drag() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let row = app.marquee_area.y;

        app.on_event(mouse(MouseEventKind::Moved, 20, row));
        assert!(app.marquee.is_hovered());
        app.on_event(mouse(MouseEventKind::Moved, 20, 0));
        assert!(!app.marquee.is_hovered());

        app.on_event(mouse(MouseEventKind::Down(MouseButton::Left), 20, row));
        assert!(app.marquee.is_dragging());
        app.on_event(mouse(MouseEventKind::Drag(MouseButton::Left), 15, row));
        assert_eq!(app.marquee.offset(), -5.0 * app.cell.width_px);
        app.on_event(mouse(MouseEventKind::Up(MouseButton::Left), 15, row));
        assert!(!app.marquee.is_dragging());
    }

    #[test]
    fn test_render_draws_page() {
        let mut app = app();
        app.tick();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Trusted by"));
        assert!(text.contains("Penetration Testing"));
        assert!(text.contains("█"));
    }
}
