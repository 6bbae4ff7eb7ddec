use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "ContactStatus::inactive")]
    pub status: ContactStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Contact {
    /// A contact with no identifier has not been persisted by the backend yet.
    pub fn is_new(&self) -> bool {
        self.id.trim().is_empty()
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            title: String::new(),
            status: ContactStatus::Active,
            image_url: None,
        }
    }
}

/// Backend stores status as free text; anything other than "active" is inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactStatus {
    #[default]
    Active,
    Inactive,
}

impl ContactStatus {
    /// Decoded value when the backend omits the status.
    pub fn inactive() -> Self {
        ContactStatus::Inactive
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::Active => "active",
            ContactStatus::Inactive => "inactive",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            ContactStatus::Active => ContactStatus::Inactive,
            ContactStatus::Inactive => ContactStatus::Active,
        }
    }
}

impl From<&str> for ContactStatus {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("active") {
            ContactStatus::Active
        } else {
            ContactStatus::Inactive
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContactStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContactStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(ContactStatus::from).unwrap_or(ContactStatus::Inactive))
    }
}
