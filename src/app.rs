use std::sync::Arc;

use crossterm::event::KeyCode;
use tracing::{info, warn};
use tui::{backend::Backend, Frame};

use crate::api::ContactsApi;
use crate::models::{ImageFile, PaginatedResponse};
use crate::ui::{
    components::popup::centered_rect,
    contact_detail::{
        self, fetch_contact, render_contact_detail, ContactDetailState, DetailAction,
    },
    contact_form::{
        self, render_contact_form, save_contact, ContactFormAction, ContactFormState,
        ContactSubmission,
    },
    contacts::{self, load_contacts, render_contacts, ContactAction, ContactsState},
};

// Represents the current screen in the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppScreen {
    Contacts,
    ContactDetail,
    /// Form shown as a modal over the list, or in place of the detail screen
    ContactForm(FormOrigin),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOrigin {
    List,
    Detail(String),
}

/// Work that must happen before the next key is read, so the screen can show
/// its loading or saving state first.
#[derive(Debug, Clone, PartialEq)]
enum PendingLoad {
    ContactsPage(u32),
    Detail,
    Save(ContactSubmission, FormOrigin),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Top level state: the current page of contacts is owned here and nowhere else.
pub struct App {
    api: Arc<dyn ContactsApi>,
    page_size: u32,
    screen: AppScreen,
    contacts_state: ContactsState,
    detail_state: Option<ContactDetailState>,
    form_state: Option<ContactFormState>,
    error: Option<String>,
    load_state: LoadState,
    pending: Option<PendingLoad>,
}

impl App {
    pub fn new(api: Arc<dyn ContactsApi>, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            screen: AppScreen::Contacts,
            contacts_state: ContactsState::loading(),
            detail_state: None,
            form_state: None,
            error: None,
            load_state: LoadState::Idle,
            pending: Some(PendingLoad::ContactsPage(0)),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Runs the load queued by the last action, if any.
    pub async fn load_pending(&mut self) {
        match self.pending.take() {
            Some(PendingLoad::ContactsPage(page)) => self.fetch_contacts(page).await,
            Some(PendingLoad::Detail) => self.fetch_detail().await,
            Some(PendingLoad::Save(submission, origin)) => self.submit(submission, origin).await,
            None => {}
        }
    }

    pub async fn fetch_contacts(&mut self, page: u32) {
        self.error = None;
        self.load_state = LoadState::Loading;

        match load_contacts(self.api.as_ref(), page, self.page_size).await {
            Ok(data) if data.is_empty() && data.total_pages > 0 && page >= data.total_pages => {
                // page vanished under us, show the last one that still exists
                let last = data.total_pages - 1;
                info!(page, last, "requested page is out of range");
                match load_contacts(self.api.as_ref(), last, self.page_size).await {
                    Ok(data) => self.contacts_loaded(data, last),
                    Err(err) => self.contacts_failed(err.to_string()),
                }
            }
            Ok(data) => self.contacts_loaded(data, page),
            Err(err) => self.contacts_failed(err.to_string()),
        }
    }

    fn contacts_loaded(&mut self, data: PaginatedResponse, page: u32) {
        info!(page, count = data.content.len(), total = data.total_elements, "contacts loaded");
        self.contacts_state = ContactsState::new(data, page);
        self.load_state = LoadState::Loaded;
    }

    /// Prior data stays on screen under the banner.
    fn contacts_failed(&mut self, error: String) {
        self.error = Some(error);
        self.load_state = LoadState::Failed;
    }

    async fn fetch_detail(&mut self) {
        let Some(state) = self.detail_state.as_mut() else {
            return;
        };
        if !state.has_id() {
            return;
        }
        let result = fetch_contact(self.api.as_ref(), state.id()).await;
        state.loaded(result);
    }

    fn open_detail(&mut self, id: String) {
        let state = ContactDetailState::new(id);
        if state.has_id() {
            self.pending = Some(PendingLoad::Detail);
        }
        self.detail_state = Some(state);
        self.screen = AppScreen::ContactDetail;
    }

    fn back_to_list(&mut self) {
        self.detail_state = None;
        self.form_state = None;
        self.screen = AppScreen::Contacts;
        self.pending = Some(PendingLoad::ContactsPage(self.contacts_state.current_page()));
    }

    /// Dispatch a key to the current screen and act on what it asks for.
    /// Returns `true` when the user wants to quit.
    pub async fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.screen.clone() {
            AppScreen::Contacts => {
                if let Some(action) = contacts::handle_input(&mut self.contacts_state, key) {
                    return self.on_contacts_action(action).await;
                }
            }
            AppScreen::ContactDetail => {
                let action = self
                    .detail_state
                    .as_mut()
                    .and_then(|state| contact_detail::handle_input(state, key));
                if let Some(action) = action {
                    self.on_detail_action(action).await;
                }
            }
            AppScreen::ContactForm(origin) => {
                let action = self
                    .form_state
                    .as_mut()
                    .and_then(|state| contact_form::handle_input(state, key));
                if let Some(action) = action {
                    self.on_form_action(action, origin).await;
                }
            }
        }
        false
    }

    pub async fn on_contacts_action(&mut self, action: ContactAction) -> bool {
        match action {
            ContactAction::Quit => return true,
            ContactAction::NewContact => {
                self.form_state = Some(ContactFormState::new());
                self.screen = AppScreen::ContactForm(FormOrigin::List);
            }
            ContactAction::ViewContact(id) => self.open_detail(id),
            ContactAction::ChangePage(page) => self.fetch_contacts(page).await,
            ContactAction::Refresh => {
                let page = self.contacts_state.current_page();
                self.fetch_contacts(page).await;
            }
        }
        false
    }

    pub async fn on_detail_action(&mut self, action: DetailAction) {
        match action {
            DetailAction::Back => self.back_to_list(),
            DetailAction::Reload => self.pending = Some(PendingLoad::Detail),
            DetailAction::Edit(id) => {
                // always edit a freshly fetched record, never the displayed copy
                let form = match fetch_contact(self.api.as_ref(), &id).await {
                    Ok(contact) => ContactFormState::from_existing(contact),
                    Err(err) => {
                        warn!(%id, error = %err, "could not load contact for editing");
                        ContactFormState::load_failed(id.clone())
                    }
                };
                self.form_state = Some(form);
                self.screen = AppScreen::ContactForm(FormOrigin::Detail(id));
            }
            DetailAction::Delete(id) => match self.api.delete(&id).await {
                Ok(()) => {
                    info!(%id, "contact deleted");
                    self.back_to_list();
                }
                Err(err) => {
                    if let Some(state) = self.detail_state.as_mut() {
                        state.set_error(err.to_string());
                    }
                }
            },
        }
    }

    pub async fn on_form_action(&mut self, action: ContactFormAction, origin: FormOrigin) {
        match action {
            ContactFormAction::Cancel => self.close_form(origin),
            ContactFormAction::SelectImage(path) => {
                let result = ImageFile::from_path(&path).await;
                if let Some(form) = self.form_state.as_mut() {
                    form.attach_image(result);
                }
            }
            ContactFormAction::Submit(submission) => {
                self.pending = Some(PendingLoad::Save(submission, origin));
            }
        }
    }

    async fn submit(&mut self, submission: ContactSubmission, origin: FormOrigin) {
        match save_contact(self.api.as_ref(), &submission).await {
            Ok(saved) => {
                info!(id = %saved.id, "contact saved");
                if let Some(form) = self.form_state.as_mut() {
                    form.submission_succeeded();
                }
                match origin {
                    FormOrigin::List => {
                        self.close_form(FormOrigin::List);
                        let page = self.contacts_state.current_page();
                        self.fetch_contacts(page).await;
                    }
                    FormOrigin::Detail(id) => {
                        self.close_form(FormOrigin::Detail(id.clone()));
                        let result = fetch_contact(self.api.as_ref(), &id).await;
                        if let Some(state) = self.detail_state.as_mut() {
                            state.refreshed(result);
                        }
                    }
                }
            }
            Err(err) => {
                if let Some(form) = self.form_state.as_mut() {
                    form.submission_failed(err.to_string());
                }
            }
        }
    }

    fn close_form(&mut self, origin: FormOrigin) {
        self.form_state = None;
        self.screen = match origin {
            FormOrigin::List => AppScreen::Contacts,
            FormOrigin::Detail(_) => AppScreen::ContactDetail,
        };
    }

    pub fn render<B: Backend>(&mut self, frame: &mut Frame<B>) {
        let size = frame.size();
        let banner = match self.load_state {
            LoadState::Failed => self.error.as_deref(),
            _ => None,
        };
        match &self.screen {
            AppScreen::Contacts => {
                render_contacts(frame, &mut self.contacts_state, size, banner);
            }
            AppScreen::ContactDetail => {
                if let Some(state) = &self.detail_state {
                    render_contact_detail(frame, state, size);
                }
            }
            AppScreen::ContactForm(FormOrigin::List) => {
                render_contacts(frame, &mut self.contacts_state, size, banner);
                if let Some(state) = &self.form_state {
                    render_contact_form(frame, state, centered_rect(70, 80, size));
                }
            }
            AppScreen::ContactForm(FormOrigin::Detail(_)) => {
                if let Some(state) = &self.form_state {
                    render_contact_form(frame, state, size);
                }
            }
        }
    }
}

#[cfg(test)]
impl App {
    pub fn show_modal(&self) -> bool {
        self.screen == AppScreen::ContactForm(FormOrigin::List)
    }

    pub fn screen(&self) -> &AppScreen {
        &self.screen
    }

    pub fn contacts(&self) -> &ContactsState {
        &self.contacts_state
    }

    pub fn detail(&self) -> Option<&ContactDetailState> {
        self.detail_state.as_ref()
    }

    pub fn form(&self) -> Option<&ContactFormState> {
        self.form_state.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }
}
