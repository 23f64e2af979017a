//! Page layout: navigation, hero banner, services, marquee and footer.

use chrono::Datelike;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use wavegrid_banner::{GLYPH_HEIGHT, banner_width, build_banner_art};
use wavegrid_config::{Config, ServiceEntry};

/// Screen areas of one rendered page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub nav: Rect,
    pub hero: Rect,
    pub tagline: Rect,
    pub services: Rect,
    pub marquee_label: Rect,
    pub marquee: Rect,
    pub footer: Rect,
    pub help: Rect,
}

/// Split `area` into the page sections.
pub fn layout(area: Rect, service_count: usize) -> PageLayout {
    let services_height = (service_count * 2).min(u16::MAX as usize) as u16;
    let chunks = Layout::vertical([
        Constraint::Length(1),                   // Navigation
        Constraint::Fill(1),                     // Top padding
        Constraint::Length(GLYPH_HEIGHT as u16), // Banner
        Constraint::Length(1),                   // Spacing
        Constraint::Length(1),                   // Tagline
        Constraint::Length(2),                   // Spacing
        Constraint::Length(services_height),     // Services
        Constraint::Fill(1),                     // Bottom padding
        Constraint::Length(1),                   // Marquee label
        Constraint::Length(1),                   // Marquee strip
        Constraint::Length(1),                   // Spacing
        Constraint::Length(1),                   // Footer
        Constraint::Length(1),                   // Help text
    ])
    .split(area);

    PageLayout {
        nav: chunks[0],
        hero: chunks[2],
        tagline: chunks[4],
        services: chunks[6],
        marquee_label: chunks[8],
        marquee: chunks[9],
        footer: chunks[11],
        help: chunks[12],
    }
}

/// Visible slice of a looping marquee strip.
///
/// `offset_cells` is the strip translation (zero or negative); the window
/// starts that many cells into `sequence` and wraps around it.
pub fn marquee_window(sequence: &str, offset_cells: f32, width: usize) -> String {
    let chars: Vec<char> = sequence.chars().collect();
    if chars.is_empty() {
        return " ".repeat(width);
    }
    let start = (-offset_cells).max(0.0).floor() as usize % chars.len();
    chars.iter().cycle().skip(start).take(width).collect()
}

/// Status shown in the help line.
#[derive(Debug, Clone, Copy)]
pub struct HelpState<'a> {
    pub speed: &'a str,
    pub paused: bool,
}

/// Static page content derived from the configuration.
#[derive(Debug, Clone)]
pub struct Page {
    brand: String,
    banner: Vec<String>,
    tagline: String,
    services: Vec<ServiceEntry>,
    /// One copy of the marquee items, including trailing spacing.
    marquee_sequence: String,
    contact_line: String,
    accent: Color,
    year: i32,
}

impl Page {
    pub fn new(config: &Config, accent: Color) -> Self {
        let spacing = " ".repeat(config.marquee.spacing as usize);
        let marquee_sequence = config
            .marquee
            .companies
            .iter()
            .map(|name| format!("{name}{spacing}"))
            .collect();

        Self {
            brand: config.page.brand.clone(),
            banner: build_banner_art(&config.page.brand),
            tagline: config.page.tagline.clone(),
            services: config.page.services.clone(),
            marquee_sequence,
            contact_line: format!("{}  ·  {}", config.contact.email, config.contact.phone),
            accent,
            year: chrono::Local::now().year(),
        }
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Width of one marquee sequence in cells.
    pub fn marquee_cells(&self) -> usize {
        self.marquee_sequence.chars().count()
    }

    pub fn footer_text(&self) -> String {
        format!(
            "© {} {}. All rights reserved. Protecting your digital future.",
            self.year, self.brand
        )
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        areas: &PageLayout,
        marquee_offset_cells: f32,
        help: HelpState<'_>,
    ) {
        let accent = self.accent;

        // Navigation
        let nav = Line::from(vec![
            Span::styled(format!(" {} ", self.brand), Style::new().fg(accent).bold()),
            "  Home  Services  About  ".dark_gray(),
            "Contact".fg(accent),
        ]);
        frame.render_widget(nav, areas.nav);

        // Hero banner, falling back to plain text on narrow terminals
        if banner_width(&self.brand) <= areas.hero.width as usize {
            let art: Vec<Line> = self
                .banner
                .iter()
                .map(|s| Line::from(s.as_str()).style(Style::new().fg(accent)))
                .collect();
            frame.render_widget(Paragraph::new(art).alignment(Alignment::Center), areas.hero);
        } else {
            let title = Line::from(self.brand.as_str()).bold().fg(accent).centered();
            let mid = Rect {
                y: areas.hero.y + areas.hero.height / 2,
                height: areas.hero.height.min(1),
                ..areas.hero
            };
            frame.render_widget(title, mid);
        }

        frame.render_widget(Line::from(self.tagline.as_str()).centered(), areas.tagline);

        // Services
        let services: Vec<Line> = self
            .services
            .iter()
            .flat_map(|s| {
                [
                    Line::from(vec!["▸ ".fg(accent), s.title.as_str().bold()]).centered(),
                    Line::from(s.description.as_str().dark_gray()).centered(),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(services), areas.services);

        // Marquee
        frame.render_widget(
            Line::from("Trusted by".dark_gray()).centered(),
            areas.marquee_label,
        );
        let strip = marquee_window(
            &self.marquee_sequence,
            marquee_offset_cells,
            areas.marquee.width as usize,
        );
        frame.render_widget(Line::from(strip.fg(accent)), areas.marquee);

        // Footer
        let footer = Line::from(vec![
            self.footer_text().dark_gray(),
            "  ".into(),
            self.contact_line.as_str().fg(accent),
        ])
        .centered();
        frame.render_widget(footer, areas.footer);

        let state = if help.paused { " paused" } else { "" };
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "c".bold().fg(accent),
            " contact  ".dark_gray(),
            "s".bold().fg(accent),
            format!(" speed: {}  ", help.speed).dark_gray(),
            "p".bold().fg(accent),
            format!(" pause{state}").dark_gray(),
        ])
        .centered();
        frame.render_widget(help, areas.help);
    }
}
