use innkeeper_core::{DomainError, GuestId};
use innkeeper_guests::Guest;
use innkeeper_infra::{RecordStore, SharedStore};

use crate::error::ServiceResult;

/// Guest registry.
#[derive(Clone)]
pub struct GuestDirectory {
    guests: SharedStore<GuestId, Guest>,
}

impl GuestDirectory {
    pub fn new(guests: SharedStore<GuestId, Guest>) -> Self {
        Self { guests }
    }

    pub fn all_guests(&self) -> ServiceResult<Vec<Guest>> {
        Ok(self.guests.find_all()?)
    }

    pub fn find_by_id(&self, id: &GuestId) -> ServiceResult<Option<Guest>> {
        Ok(self.guests.find_by_id(id)?)
    }

    pub fn guest_count(&self) -> ServiceResult<usize> {
        Ok(self.guests.count()?)
    }

    /// Register a new guest under a freshly generated `G-` identifier.
    pub fn add_guest(&self, name: &str, phone: &str, email: &str) -> ServiceResult<Guest> {
        let guest = Guest::new(GuestId::generate(), name, phone, email)?;
        let guest = self.guests.save(guest)?;
        tracing::info!("registered guest {} ({})", guest.id_typed(), guest.name());
        Ok(guest)
    }

    /// Register a guest whose identifier was assigned elsewhere.
    pub fn register_guest(&self, guest: Guest) -> ServiceResult<Guest> {
        if self.guests.exists_by_id(guest.id_typed())? {
            return Err(
                DomainError::conflict(format!("guest {} already exists", guest.id_typed())).into(),
            );
        }
        let guest = self.guests.save(guest)?;
        tracing::info!("registered guest {} ({})", guest.id_typed(), guest.name());
        Ok(guest)
    }

    pub fn update_guest(&self, guest: Guest) -> ServiceResult<Guest> {
        if !self.guests.exists_by_id(guest.id_typed())? {
            return Err(DomainError::not_found(format!("guest {}", guest.id_typed())).into());
        }
        Ok(self.guests.save(guest)?)
    }

    pub fn delete_guest(&self, id: &GuestId) -> ServiceResult<bool> {
        Ok(self.guests.delete(id)?)
    }

    pub fn search_by_name(&self, term: &str) -> ServiceResult<Vec<Guest>> {
        Ok(self.guests.find_matching(&|g: &Guest| g.name_contains(term))?)
    }

    pub fn find_by_email(&self, email: &str) -> ServiceResult<Option<Guest>> {
        Ok(self.guests.find_all()?.into_iter().find(|g| g.has_email(email)))
    }

    pub fn find_by_phone(&self, phone: &str) -> ServiceResult<Option<Guest>> {
        Ok(self.guests.find_all()?.into_iter().find(|g| g.phone() == phone))
    }

    /// Existing guest with this email, or a newly registered one.
    pub fn find_or_create_guest(&self, name: &str, phone: &str, email: &str) -> ServiceResult<Guest> {
        match self.find_by_email(email)? {
            Some(existing) => Ok(existing),
            None => self.add_guest(name, phone, email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[test]
    fn added_guest_gets_generated_id() {
        let fx = Fixture::new();
        let guest = fx.ctx.guests.add_guest("Grace Hopper", "555-0199", "grace@example.com").unwrap();
        assert!(guest.id_typed().is_generated_shape());
        assert!(guest.id_typed().as_str().starts_with("G-"));
        assert_eq!(fx.ctx.guests.guest_count().unwrap(), 2);
    }

    #[test]
    fn blank_name_is_rejected_without_saving() {
        let fx = Fixture::new();
        let err = fx.ctx.guests.add_guest("   ", "555", "x@example.com").unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Validation(_))));
        assert_eq!(fx.ctx.guests.guest_count().unwrap(), 1);
    }

    #[test]
    fn registering_existing_id_is_a_conflict() {
        let fx = Fixture::new();
        let dup = Guest::new(fx.guest.clone(), "Someone Else", "", "").unwrap();
        let err = fx.ctx.guests.register_guest(dup).unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Conflict(_))));

        let external = Guest::new("EXT-42".parse().unwrap(), "Walk In", "", "").unwrap();
        fx.ctx.guests.register_guest(external).unwrap();
        assert!(fx.ctx.guests.find_by_id(&"EXT-42".parse().unwrap()).unwrap().is_some());
    }

    #[test]
    fn update_requires_existing_guest() {
        let fx = Fixture::new();
        let mut guest = fx.ctx.guests.find_by_id(&fx.guest).unwrap().unwrap();
        guest.set_contact("555-0000", "ada@lovelace.example");
        fx.ctx.guests.update_guest(guest).unwrap();
        assert!(fx.ctx.guests.find_by_phone("555-0000").unwrap().is_some());

        let ghost = Guest::new("G-NOPE0000".parse().unwrap(), "Ghost", "", "").unwrap();
        let err = fx.ctx.guests.update_guest(ghost).unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::NotFound(_))));
    }

    #[test]
    fn lookups_ignore_case_where_humans_would() {
        let fx = Fixture::new();
        assert_eq!(fx.ctx.guests.search_by_name("LOVE").unwrap().len(), 1);
        assert!(fx.ctx.guests.find_by_email("ADA@EXAMPLE.COM").unwrap().is_some());
        assert!(fx.ctx.guests.find_by_phone("555-0100").unwrap().is_some());
        assert!(fx.ctx.guests.find_by_phone("555 0100").unwrap().is_none());
    }

    #[test]
    fn find_or_create_matches_on_email() {
        let fx = Fixture::new();
        let same = fx
            .ctx
            .guests
            .find_or_create_guest("A. Lovelace", "000", "ada@example.com")
            .unwrap();
        assert_eq!(same.id_typed(), &fx.guest);

        let fresh = fx
            .ctx
            .guests
            .find_or_create_guest("Charles Babbage", "555-0142", "charles@example.com")
            .unwrap();
        assert_ne!(fresh.id_typed(), &fx.guest);
        assert_eq!(fx.ctx.guests.guest_count().unwrap(), 2);
    }

    #[test]
    fn delete_reports_removal() {
        let fx = Fixture::new();
        assert!(fx.ctx.guests.delete_guest(&fx.guest).unwrap());
        assert!(!fx.ctx.guests.delete_guest(&fx.guest).unwrap());
    }
}
