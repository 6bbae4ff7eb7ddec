use std::sync::Mutex;

use async_trait::async_trait;

use super::{ApiAction, ApiError, ContactsApi, Result};
use crate::models::{Contact, ImageFile, PaginatedResponse};

/// Backend stand-in that keeps contacts sorted by name, like the real service.
#[derive(Default)]
pub struct InMemoryContactsApi {
    contacts: Mutex<Vec<Contact>>,
    next_id: Mutex<u32>,
    uploads: Mutex<Vec<(String, String)>>,
}

impl InMemoryContactsApi {
    pub fn with_contacts(names: &[&str]) -> Self {
        let api = Self::default();
        {
            let mut contacts = api.contacts.lock().unwrap();
            for name in names {
                let id = api.allocate_id();
                contacts.push(Contact {
                    id,
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                    ..Contact::default()
                });
            }
            contacts.sort_by(|a, b| a.name.cmp(&b.name));
        }
        api
    }

    /// `(contact id, file name)` of every image upload, in order.
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn ids(&self) -> Vec<String> {
        self.contacts.lock().unwrap().iter().map(|c| c.id.clone()).collect()
    }

    fn allocate_id(&self) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("id-{}", *next)
    }

    fn not_found(action: ApiAction, id: &str) -> ApiError {
        ApiError::request(action, format!("Contact not found: {id}"), Some(404))
    }
}

#[async_trait]
impl ContactsApi for InMemoryContactsApi {
    async fn list(&self, page: u32, size: u32) -> Result<PaginatedResponse> {
        let contacts = self.contacts.lock().unwrap();
        let size = size.max(1);
        let total = contacts.len() as u32;
        let content = contacts
            .iter()
            .skip((page * size) as usize)
            .take(size as usize)
            .cloned()
            .collect();
        Ok(PaginatedResponse {
            content,
            total_elements: u64::from(total),
            total_pages: total.div_ceil(size),
            size,
            number: page,
        })
    }

    async fn get(&self, id: &str) -> Result<Contact> {
        self.contacts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(ApiAction::FetchContact, id))
    }

    async fn create(&self, contact: &Contact) -> Result<Contact> {
        let mut saved = contact.clone();
        saved.id = self.allocate_id();
        let mut contacts = self.contacts.lock().unwrap();
        contacts.push(saved.clone());
        contacts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(saved)
    }

    async fn update(&self, id: &str, contact: &Contact) -> Result<Contact> {
        let mut contacts = self.contacts.lock().unwrap();
        let existing = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::not_found(ApiAction::UpdateContact, id))?;
        *existing = Contact {
            id: id.to_string(),
            ..contact.clone()
        };
        let saved = existing.clone();
        contacts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(saved)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        if contacts.len() == before {
            return Err(Self::not_found(ApiAction::DeleteContact, id));
        }
        Ok(())
    }

    async fn update_image(&self, id: &str, image: &ImageFile) -> Result<()> {
        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::not_found(ApiAction::UpdateImage, id))?;
        contact.image_url = Some(format!("/contacts/image/{}", image.file_name));
        self.uploads
            .lock()
            .unwrap()
            .push((id.to_string(), image.file_name.clone()));
        Ok(())
    }
}
