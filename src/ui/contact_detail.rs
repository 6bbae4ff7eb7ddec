use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::{ApiError, ContactsApi};
use crate::models::Contact;
use crate::ui::components::popup::render_confirmation;

pub const MISSING_ID_MESSAGE: &str = "No contact ID provided";

pub enum DetailStatus {
    Loading,
    Loaded(Contact),
    Failed(String),
}

// Represents the state of the single contact screen
pub struct ContactDetailState {
    id: String,
    status: DetailStatus,
    error: Option<String>,
    show_delete_confirmation: bool,
}

impl ContactDetailState {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let status = if id.trim().is_empty() {
            DetailStatus::Failed(MISSING_ID_MESSAGE.to_string())
        } else {
            DetailStatus::Loading
        };

        Self {
            id,
            status,
            error: None,
            show_delete_confirmation: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    #[cfg(test)]
    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    pub fn contact(&self) -> Option<&Contact> {
        match &self.status {
            DetailStatus::Loaded(contact) => Some(contact),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Apply the result of fetching the contact.
    pub fn loaded(&mut self, result: Result<Contact, ApiError>) {
        match result {
            Ok(contact) => {
                self.status = DetailStatus::Loaded(contact);
                self.error = None;
            }
            Err(err) => self.status = DetailStatus::Failed(load_failure_message(&self.id, &err)),
        }
    }

    /// Apply the result of refetching after an edit; a failure keeps the shown contact.
    pub fn refreshed(&mut self, result: Result<Contact, ApiError>) {
        match result {
            Ok(contact) => self.loaded(Ok(contact)),
            Err(err) if self.contact().is_some() => {
                self.error = Some(format!("Failed to refresh contact: {err}"));
            }
            Err(err) => self.loaded(Err(err)),
        }
    }

    /// Inline error, the contact stays on screen.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }
}

fn load_failure_message(id: &str, err: &ApiError) -> String {
    if err.is_not_found() {
        format!("Contact {id} was not found")
    } else {
        format!("Failed to load contact: {err}")
    }
}

pub enum DetailAction {
    Back,
    Edit(String),
    Delete(String),
    Reload,
}

pub async fn fetch_contact(api: &dyn ContactsApi, id: &str) -> Result<Contact, ApiError> {
    api.get(id).await
}

pub fn render_contact_detail<B: Backend>(frame: &mut Frame<B>, state: &ContactDetailState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)].as_ref())
        .split(area);

    let body = match &state.status {
        DetailStatus::Loading => Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .block(Block::default().title("Contact").borders(Borders::ALL)),
        DetailStatus::Failed(message) => Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(Block::default().title("Contact").borders(Borders::ALL)),
        DetailStatus::Loaded(contact) => {
            let label = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
            let field = |name: &'static str, value: &str| {
                Spans::from(vec![
                    Span::styled(format!("{name}: "), label),
                    Span::raw(value.to_string()),
                ])
            };

            let mut lines = Vec::new();
            if let Some(error) = state.error() {
                lines.push(Spans::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::Red),
                )));
                lines.push(Spans::from(""));
            }
            lines.push(field("Email", &contact.email));
            lines.push(field("Phone", &contact.phone));
            lines.push(field("Address", &contact.address));
            lines.push(field("Title", &contact.title));
            lines.push(field("Status", contact.status.as_str()));
            lines.push(field(
                "Photo",
                contact.image_url.as_deref().unwrap_or("No Photo"),
            ));

            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(Span::styled(
                            contact.name.clone(),
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                        ))
                        .borders(Borders::ALL),
                )
        }
    };
    frame.render_widget(body, chunks[0]);

    let buttons_text = match &state.status {
        DetailStatus::Loaded(_) => "<E> Edit | <D> Delete | <Esc> Back",
        DetailStatus::Failed(_) if state.has_id() => "<R> Retry | <Esc> Back",
        _ => "<Esc> Back",
    };
    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[1]);

    if state.show_delete_confirmation {
        render_confirmation(frame, area, "Are you sure you want to delete this contact?");
    }
}

pub fn handle_input(state: &mut ContactDetailState, key: KeyCode) -> Option<DetailAction> {
    if state.show_delete_confirmation {
        match key {
            KeyCode::Char('y') => {
                state.toggle_delete_confirmation();
                return Some(DetailAction::Delete(state.id.clone()));
            }
            KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q') => {
                state.toggle_delete_confirmation();
            }
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Esc | KeyCode::Char('q') => Some(DetailAction::Back),
        KeyCode::Char('e') if state.contact().is_some() => Some(DetailAction::Edit(state.id.clone())),
        KeyCode::Char('d') if state.contact().is_some() => {
            state.toggle_delete_confirmation();
            None
        }
        KeyCode::Char('r') if state.has_id() && state.contact().is_none() => {
            state.status = DetailStatus::Loading;
            Some(DetailAction::Reload)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiAction;
    use crate::ui::test_utils::render_to_string;

    fn ada() -> Contact {
        Contact {
            id: "a".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            ..Contact::default()
        }
    }

    fn render(state: &ContactDetailState) -> String {
        render_to_string(80, 20, |f| {
            let area = f.size();
            render_contact_detail(f, state, area)
        })
    }

    #[test]
    fn blank_id_fails_without_fetch() {
        let state = ContactDetailState::new("  ");
        assert!(matches!(state.status(), DetailStatus::Failed(m) if m == MISSING_ID_MESSAGE));
        assert!(render(&state).contains(MISSING_ID_MESSAGE));
    }

    #[test]
    fn shows_loading_until_fetched() {
        let mut state = ContactDetailState::new("a");
        assert!(render(&state).contains("Loading..."));

        state.loaded(Ok(ada()));
        let screen = render(&state);
        assert!(screen.contains("Ada Lovelace"), "{screen}");
        assert!(screen.contains("Email: ada@example.com"), "{screen}");
        assert!(screen.contains("Photo: No Photo"), "{screen}");
    }

    #[test]
    fn fetch_failure_is_a_placeholder_not_a_crash() {
        let mut state = ContactDetailState::new("a");
        state.loaded(Err(ApiError::request(ApiAction::FetchContact, "boom", Some(500))));

        let screen = render(&state);
        assert!(screen.contains("Failed to load contact: Failed to fetch contact: boom"), "{screen}");
        assert!(matches!(handle_input(&mut state, KeyCode::Char('r')), Some(DetailAction::Reload)));
        assert!(matches!(state.status(), DetailStatus::Loading));
    }

    #[test]
    fn not_found_has_its_own_message() {
        let mut state = ContactDetailState::new("gone");
        state.loaded(Err(ApiError::request(ApiAction::FetchContact, "missing", Some(404))));
        assert!(matches!(state.status(), DetailStatus::Failed(m) if m == "Contact gone was not found"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = ContactDetailState::new("a");
        state.loaded(Ok(ada()));

        assert!(handle_input(&mut state, KeyCode::Char('d')).is_none());
        let screen = render_to_string(80, 24, |f| {
            let area = f.size();
            render_contact_detail(f, &state, area)
        });
        assert!(screen.contains("Are you sure you want to delete this contact?"), "{screen}");
        assert!(screen.contains("<Y> Yes  <N> No"), "{screen}");
        assert!(handle_input(&mut state, KeyCode::Char('e')).is_none());

        match handle_input(&mut state, KeyCode::Char('y')) {
            Some(DetailAction::Delete(id)) => assert_eq!(id, "a"),
            _ => panic!("expected Delete"),
        }
    }

    #[test]
    fn refresh_failure_keeps_contact_and_shows_error() {
        let mut state = ContactDetailState::new("a");
        state.loaded(Ok(ada()));
        state.refreshed(Err(ApiError::request(ApiAction::FetchContact, "timeout", None)));

        assert!(state.contact().is_some());
        assert_eq!(
            state.error(),
            Some("Failed to refresh contact: Failed to fetch contact: timeout")
        );
    }

    #[test]
    fn edit_only_when_loaded() {
        let mut state = ContactDetailState::new("a");
        assert!(handle_input(&mut state, KeyCode::Char('e')).is_none());
        state.loaded(Ok(ada()));
        assert!(matches!(handle_input(&mut state, KeyCode::Char('e')), Some(DetailAction::Edit(id)) if id == "a"));
    }
}
