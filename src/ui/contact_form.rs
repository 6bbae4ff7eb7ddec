use std::path::PathBuf;

use crossterm::event::KeyCode;
use tracing::{debug, warn};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::api::{self, ContactsApi};
use crate::models::{Contact, ImageFile};
use crate::validation::{validate_email, validate_image, validate_name, ValidationError};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load contact";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// new contact, untouched
    Pristine,
    /// existing contact fetched into the form
    Loaded,
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Address,
    Title,
    Status,
    Photo,
}

const FIELDS: [ContactField; 7] = [
    ContactField::Name,
    ContactField::Email,
    ContactField::Phone,
    ContactField::Address,
    ContactField::Title,
    ContactField::Status,
    ContactField::Photo,
];

impl ContactField {
    fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Phone => "Phone",
            ContactField::Address => "Address",
            ContactField::Title => "Title",
            ContactField::Status => "Status",
            ContactField::Photo => "Profile Photo",
        }
    }

    fn position(&self) -> usize {
        FIELDS.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// What the form hands back to the app when submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    /// `Some` for an update, `None` for a create
    pub id: Option<String>,
    pub contact: Contact,
    pub image: Option<ImageFile>,
}

pub enum ContactFormAction {
    Cancel,
    Submit(ContactSubmission),
    SelectImage(PathBuf),
}

pub struct ContactFormState {
    contact_id: Option<String>,
    values: Contact,
    photo_path: String,
    image: Option<ImageFile>,
    current_field: ContactField,
    editing: bool,
    phase: FormPhase,
    error: Option<String>,
    load_failed: bool,
}

impl ContactFormState {
    pub fn new() -> Self {
        Self {
            contact_id: None,
            values: Contact::default(),
            photo_path: String::new(),
            image: None,
            current_field: ContactField::Name,
            editing: false,
            phase: FormPhase::Pristine,
            error: None,
            load_failed: false,
        }
    }

    /// Form for editing, populated from a freshly fetched contact.
    pub fn from_existing(contact: Contact) -> Self {
        Self {
            contact_id: Some(contact.id.clone()),
            values: contact,
            phase: FormPhase::Loaded,
            ..Self::new()
        }
    }

    /// Form for editing whose contact could not be fetched.
    pub fn load_failed(id: impl Into<String>) -> Self {
        Self {
            contact_id: Some(id.into()),
            phase: FormPhase::Failed,
            error: Some(LOAD_FAILED_MESSAGE.to_string()),
            load_failed: true,
            ..Self::new()
        }
    }

    pub fn contact_id(&self) -> Option<&str> {
        self.contact_id.as_deref()
    }

    pub fn values(&self) -> &Contact {
        &self.values
    }

    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_editing_field(&self) -> bool {
        self.editing
    }

    pub fn current_field(&self) -> ContactField {
        self.current_field
    }

    pub fn next_field(&mut self) {
        let next = (self.current_field.position() + 1) % FIELDS.len();
        self.current_field = FIELDS[next];
    }

    pub fn previous_field(&mut self) {
        let previous = (self.current_field.position() + FIELDS.len() - 1) % FIELDS.len();
        self.current_field = FIELDS[previous];
    }

    #[cfg(test)]
    pub fn focus(&mut self, field: ContactField) {
        self.current_field = field;
    }

    fn text_field_mut(&mut self, field: ContactField) -> Option<&mut String> {
        match field {
            ContactField::Name => Some(&mut self.values.name),
            ContactField::Email => Some(&mut self.values.email),
            ContactField::Phone => Some(&mut self.values.phone),
            ContactField::Address => Some(&mut self.values.address),
            ContactField::Title => Some(&mut self.values.title),
            ContactField::Photo => Some(&mut self.photo_path),
            ContactField::Status => None,
        }
    }

    fn touch(&mut self) {
        self.phase = FormPhase::Editing;
        self.error = None;
    }

    #[cfg(test)]
    pub fn set_field(&mut self, field: ContactField, value: &str) {
        if let Some(target) = self.text_field_mut(field) {
            *target = value.to_string();
            self.touch();
        }
    }

    pub fn toggle_status(&mut self) {
        self.values.status = self.values.status.toggle();
        self.touch();
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let field = self.current_field;
        let Some(value) = self.text_field_mut(field) else {
            return;
        };
        match key {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return,
        }
        self.touch();
    }

    /// Apply the outcome of reading the file at the photo path.
    ///
    /// Anything that is not an image under 5MB is dropped, leaving no pending file.
    pub fn attach_image(&mut self, result: std::io::Result<ImageFile>) {
        let image = match result {
            Ok(image) => image,
            Err(err) => {
                warn!(path = %self.photo_path, error = %err, "could not read photo");
                self.reject_image();
                return;
            }
        };

        match validate_image(&image) {
            Ok(()) => {
                debug!(file = %image.file_name, size = image.len(), mime = %image.mime, "photo selected");
                self.image = Some(image);
            }
            Err(_) => {
                warn!(file = %image.file_name, size = image.len(), mime = %image.mime, "photo rejected");
                self.reject_image();
            }
        }
    }

    fn reject_image(&mut self) {
        self.image = None;
        self.photo_path.clear();
        self.error = Some(ValidationError::InvalidImage.to_string());
    }

    fn clear_image(&mut self) {
        self.image = None;
        self.photo_path.clear();
    }

    /// Validate and hand out the submission; invalid values never leave the form.
    pub fn submit(&mut self) -> Option<ContactSubmission> {
        if self.phase == FormPhase::Submitting {
            return None;
        }
        if self.load_failed {
            self.error = Some(LOAD_FAILED_MESSAGE.to_string());
            return None;
        }
        if let Err(err) = validate_name(&self.values.name).and_then(|_| validate_email(&self.values.email)) {
            debug!(error = %err, "submission blocked");
            self.error = Some(err.to_string());
            return None;
        }

        self.error = None;
        self.editing = false;
        self.phase = FormPhase::Submitting;
        Some(ContactSubmission {
            id: self.contact_id.clone(),
            contact: self.values.clone(),
            image: self.image.clone(),
        })
    }

    pub fn submission_succeeded(&mut self) {
        self.phase = FormPhase::Succeeded;
    }

    /// The values stay so the user can retry.
    pub fn submission_failed(&mut self, error: impl Into<String>) {
        self.phase = FormPhase::Failed;
        self.error = Some(error.into());
    }
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create or update the record, then upload the pending photo against the saved identifier.
pub async fn save_contact(
    api: &dyn ContactsApi,
    submission: &ContactSubmission,
) -> api::Result<Contact> {
    let saved = match &submission.id {
        Some(id) => api.update(id, &submission.contact).await?,
        None => api.create(&submission.contact).await?,
    };

    if let Some(image) = &submission.image {
        if saved.is_new() {
            warn!("saved contact has no identifier, photo not uploaded");
        } else {
            api.update_image(&saved.id, image).await?;
        }
    }

    Ok(saved)
}

pub fn render_contact_form<B: Backend>(frame: &mut Frame<B>, state: &ContactFormState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(9),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    frame.render_widget(Clear, area);

    let title_text = if state.contact_id().is_some() {
        "Edit Contact"
    } else {
        "New Contact"
    };
    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let message = match (state.error(), state.phase()) {
        (Some(error), _) => Spans::from(Span::styled(error, Style::default().fg(Color::Red))),
        (None, FormPhase::Submitting) => Spans::from("Saving..."),
        (None, _) => Spans::from(""),
    };
    let message = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, chunks[1]);

    render_form(frame, state, chunks[2]);

    let help_text = if state.is_editing_field() {
        "Enter - Save field | Esc - Stop editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save contact | Esc - Cancel"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn render_form<B: Backend>(frame: &mut Frame<B>, state: &ContactFormState, area: Rect) {
    let photo = match state.image() {
        Some(image) => format!("{} ({} bytes)", image.file_name, image.len()),
        None => state.photo_path.clone(),
    };

    let items: Vec<ListItem> = FIELDS
        .iter()
        .map(|field| {
            let value = match field {
                ContactField::Name => state.values().name.clone(),
                ContactField::Email => state.values().email.clone(),
                ContactField::Phone => state.values().phone.clone(),
                ContactField::Address => state.values().address.clone(),
                ContactField::Title => state.values().title.clone(),
                ContactField::Status => state.values().status.to_string(),
                ContactField::Photo if state.is_editing_field() && state.current_field() == ContactField::Photo => {
                    state.photo_path.clone()
                }
                ContactField::Photo => photo.clone(),
            };

            let focused = *field == state.current_field();
            let label_style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            let content = if focused && state.is_editing_field() {
                Spans::from(vec![
                    Span::styled(format!("{}: ", field.label()), label_style),
                    Span::styled(format!("{value}|"), Style::default().add_modifier(Modifier::BOLD)),
                ])
            } else {
                Spans::from(vec![
                    Span::styled(format!("{}: ", field.label()), label_style),
                    Span::raw(value),
                ])
            };

            ListItem::new(content)
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Contact Details"));

    frame.render_widget(form_list, area);
}

/// Leaving the photo field, by either key, picks up whatever path was typed.
fn finish_editing(state: &mut ContactFormState) -> Option<ContactFormAction> {
    state.editing = false;
    if state.current_field != ContactField::Photo {
        return None;
    }

    let path = state.photo_path.trim().to_string();
    if path.is_empty() {
        state.clear_image();
        None
    } else {
        Some(ContactFormAction::SelectImage(PathBuf::from(path)))
    }
}

pub fn handle_input(state: &mut ContactFormState, key: KeyCode) -> Option<ContactFormAction> {
    if state.phase == FormPhase::Submitting {
        return None;
    }

    match key {
        KeyCode::Esc | KeyCode::Enter if state.editing => return finish_editing(state),
        KeyCode::Esc => return Some(ContactFormAction::Cancel),
        KeyCode::Enter | KeyCode::Char(' ') if state.current_field == ContactField::Status => {
            state.toggle_status();
        }
        KeyCode::Enter => state.editing = true,
        KeyCode::Up | KeyCode::BackTab if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            return state.submit().map(ContactFormAction::Submit);
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}
