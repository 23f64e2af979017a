//! Contact form state, editing and rendering.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use crate::relay::ContactSubmission;

/// Maximum digits in a phone number: two area code digits plus nine.
const PHONE_DIGITS: usize = 11;

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Company,
    Phone,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Company,
        Field::Phone,
        Field::Subject,
        Field::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Company => "Company",
            Field::Phone => "Phone",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, Field::Company | Field::Phone)
    }

    fn index(self) -> usize {
        self as usize
    }

    fn next(self) -> Self {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    fn prev(self) -> Self {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// What the app should do after a key press in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Close,
}

/// Mask a phone number as `(DD) DDDDD-DDDD`, keeping at most 11 digits.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect();

    match digits.len() {
        0..=2 => digits,
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

/// Contact form overlay.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: [String; 6],
    focus: usize,
    open: bool,
    error: Option<String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focus(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Clear every field and return focus to the first one.
    pub fn reset(&mut self) {
        self.values = Default::default();
        self.focus = 0;
        self.error = None;
    }

    pub fn insert_char(&mut self, c: char) {
        let field = self.focus();
        let value = &mut self.values[field.index()];
        if field == Field::Phone {
            let mut raw = value.clone();
            raw.push(c);
            *value = format_phone(&raw);
        } else {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focus();
        let value = &mut self.values[field.index()];
        if field == Field::Phone {
            // Remove the last digit, not the last mask character.
            let mut digits: String = value.chars().filter(char::is_ascii_digit).collect();
            digits.pop();
            *value = format_phone(&digits);
        } else {
            value.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus().next().index();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus().prev().index();
    }

    /// Check required fields and build the submission.
    pub fn validate(&self) -> Result<ContactSubmission, String> {
        if let Some(missing) = Field::ALL
            .into_iter()
            .find(|f| f.is_required() && self.value(*f).trim().is_empty())
        {
            return Err(format!("{} is required", missing.label()));
        }

        let email = self.value(Field::Email).trim();
        let valid_email = email
            .split_once('@')
            .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
        if !valid_email {
            return Err("Email address looks invalid".to_string());
        }

        Ok(ContactSubmission {
            name: self.value(Field::Name).trim().to_string(),
            email: email.to_string(),
            company: self.value(Field::Company).trim().to_string(),
            phone: self.value(Field::Phone).to_string(),
            subject: self.value(Field::Subject).trim().to_string(),
            message: self.value(Field::Message).trim().to_string(),
        })
    }

    /// Apply a key press while the form is open.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => FormAction::Close,
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => FormAction::Submit,
            (_, KeyCode::Tab | KeyCode::Down) => {
                self.focus_next();
                FormAction::None
            }
            (_, KeyCode::BackTab | KeyCode::Up) => {
                self.focus_prev();
                FormAction::None
            }
            (_, KeyCode::Enter) => {
                if self.focus() == Field::Message {
                    FormAction::Submit
                } else {
                    self.focus_next();
                    FormAction::None
                }
            }
            (_, KeyCode::Backspace) => {
                self.backspace();
                FormAction::None
            }
            (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                FormAction::None
            }
            _ => FormAction::None,
        }
    }

    /// Draw the form centered over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, accent: Color, sending: bool) {
        let width = area.width.min(64);
        let height = area.height.min(Field::ALL.len() as u16 * 2 + 6);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        let title = if sending { " Sending... " } else { " Contact us " };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(accent))
            .title(Line::from(title).bold());
        let inner = block.inner(popup);
        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);

        let mut lines = Vec::with_capacity(Field::ALL.len() * 2 + 2);
        for field in Field::ALL {
            let focused = field == self.focus();
            let marker = if field.is_required() { "*" } else { " " };
            let label = format!("{}{marker}", field.label());
            let label = if focused {
                label.bold().fg(accent)
            } else {
                label.dark_gray()
            };
            lines.push(Line::from(label));

            let cursor = if focused && !sending { "▏" } else { "" };
            lines.push(Line::from(format!("  {}{cursor}", self.value(field))));
        }

        let [form_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).areas(inner);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), form_area);

        let status = match &self.error {
            Some(e) => Line::from(e.as_str().red()),
            None => Line::from(vec![
                "Tab".bold().fg(accent),
                " next  ".dark_gray(),
                "Ctrl-S".bold().fg(accent),
                " send  ".dark_gray(),
                "Esc".bold().fg(accent),
                " close".dark_gray(),
            ]),
        };
        frame.render_widget(Paragraph::new(status), status_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut ContactForm, s: &str) {
        for c in s.chars() {
            form.insert_char(c);
        }
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        type_str(&mut form, "Ana");
        form.focus_next();
        type_str(&mut form, "ana@example.com");
        form.focus_next();
        form.focus_next();
        type_str(&mut form, "11945390284");
        form.focus_next();
        type_str(&mut form, "Pentest quote");
        form.focus_next();
        type_str(&mut form, "Hello there");
        form
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("11"), "11");
        assert_eq!(format_phone("119"), "(11) 9");
        assert_eq!(format_phone("1194539"), "(11) 94539");
        assert_eq!(format_phone("11945390284"), "(11) 94539-0284");
        assert_eq!(format_phone("(11) 94539-0284999"), "(11) 94539-0284");
        assert_eq!(format_phone("ab1c1"), "11");
    }

    #[test]
    fn test_phone_field_is_masked() {
        let form = filled();
        assert_eq!(form.value(Field::Phone), "(11) 94539-0284");

        let mut form = form;
        form.focus = Field::Phone.index();
        form.backspace();
        assert_eq!(form.value(Field::Phone), "(11) 94539-028");
        type_str(&mut form, "x");
        assert_eq!(form.value(Field::Phone), "(11) 94539-028");
    }

    #[test]
    fn test_validate_builds_submission() {
        let submission = filled().validate().unwrap();
        assert_eq!(submission.name, "Ana");
        assert_eq!(submission.email, "ana@example.com");
        assert_eq!(submission.company, "");
        assert_eq!(submission.subject, "Pentest quote");
        assert_eq!(submission.message, "Hello there");
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let mut form = filled();
        form.focus = Field::Subject.index();
        for _ in 0..20 {
            form.backspace();
        }
        assert_eq!(form.validate().unwrap_err(), "Subject is required");

        let mut form = filled();
        form.focus = Field::Email.index();
        form.values[Field::Email.index()] = "not-an-email".to_string();
        assert!(form.validate().unwrap_err().contains("Email"));
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = ContactForm::new();
        assert_eq!(form.focus(), Field::Name);
        form.focus_prev();
        assert_eq!(form.focus(), Field::Message);
        form.focus_next();
        assert_eq!(form.focus(), Field::Name);
    }

    #[test]
    fn test_key_handling() {
        let mut form = ContactForm::new();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(form.handle_key(key(KeyCode::Char('A'))), FormAction::None);
        assert_eq!(form.value(Field::Name), "A");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::None);
        assert_eq!(form.focus(), Field::Email);
        assert_eq!(
            form.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            FormAction::Submit
        );
        assert_eq!(form.value(Field::Email), "");
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Close);
    }

    #[test]
    fn test_reset_clears_values() {
        let mut form = filled();
        form.set_error(Some("boom".to_string()));
        form.reset();
        assert!(Field::ALL.iter().all(|f| form.value(*f).is_empty()));
        assert_eq!(form.focus(), Field::Name);
    }
}
