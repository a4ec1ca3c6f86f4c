use serde::{Deserialize, Serialize};

use innkeeper_core::{DomainError, DomainResult, Entity, GuestId};

/// A hotel guest.
///
/// Contact details are stored as entered; format checks belong to the input layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    id: GuestId,
    name: String,
    phone: String,
    email: String,
}

impl Guest {
    pub fn new(
        id: GuestId,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        ensure_name(&name)?;
        Ok(Self {
            id,
            name: name.trim().to_string(),
            phone: phone.into(),
            email: email.into(),
        })
    }

    pub fn id_typed(&self) -> &GuestId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        ensure_name(&name)?;
        self.name = name.trim().to_string();
        Ok(())
    }

    pub fn set_contact(&mut self, phone: impl Into<String>, email: impl Into<String>) {
        self.phone = phone.into();
        self.email = email.into();
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

impl Entity for Guest {
    type Id = GuestId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn ensure_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("guest name cannot be empty"));
    }
    Ok(())
}
