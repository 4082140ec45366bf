use chrono::Utc;
use tracing::{debug, info, warn};

use fafali_shared::{
    Application, ApplicationDraft, Booking, BookingDraft, Masked, NotificationSettings, Session,
    User,
};
use fafali_store::{Areas, StorageArea, StorageConfig, StorageKeys};

use crate::forms::{ProfilePatch, Registration};
use crate::ids::IdGenerator;
use crate::session::SessionHolder;
use crate::{AccountError, AccountResult};

/// The account database: every user record, held in memory and written back
/// as one JSON array to the durable area after each mutation.
///
/// A mutation is applied to a copy of the collection and only replaces the
/// in-memory copy once the write has succeeded, so a failed write (quota,
/// I/O) leaves memory and storage agreeing.
pub struct AccountStore {
    areas: Areas,
    keys: StorageKeys,
    users: Vec<User>,
    ids: IdGenerator,
    session: SessionHolder,
}

impl AccountStore {
    /// Load the collection, or start empty if none is stored yet
    pub fn open(areas: Areas, keys: StorageKeys) -> AccountResult<Self> {
        let users = load_users(&areas, &keys.users)?;
        let ids = seed_ids(&users);
        let session = SessionHolder::new(areas.clone(), keys.session.clone());

        info!("Account store opened with {} users", users.len());
        Ok(Self {
            areas,
            keys,
            users,
            ids,
            session,
        })
    }

    pub fn from_config(config: &StorageConfig) -> AccountResult<Self> {
        let areas = Areas::open(config)?;
        Self::open(areas, config.keys.clone())
    }

    /// Re-read the collection, picking up writes made by anyone else
    pub fn reload(&mut self) -> AccountResult<()> {
        self.users = load_users(&self.areas, &self.keys.users)?;
        self.ids = seed_ids(&self.users);
        Ok(())
    }

    /// Write the in-memory collection to the durable area
    pub fn flush(&self) -> AccountResult<()> {
        self.persist(&self.users)
    }

    fn persist(&self, users: &[User]) -> AccountResult<()> {
        let raw = serde_json::to_string(users)?;
        self.areas.durable.set_item(&self.keys.users, &raw)?;
        debug!("Persisted {} users ({} bytes)", users.len(), raw.len());
        Ok(())
    }

    /// Apply `mutate` to a copy of the collection, persist it, then keep it
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut Vec<User>) -> AccountResult<T>,
    ) -> AccountResult<T> {
        let mut next = self.users.clone();
        let out = mutate(&mut next)?;
        self.persist(&next)?;
        self.users = next;
        Ok(out)
    }

    pub fn session(&self) -> &SessionHolder {
        &self.session
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// The full account behind the active session
    pub fn current_user(&self) -> Option<&User> {
        let session = self.session.current()?;
        self.find(&session.id)
    }

    pub fn register(&mut self, candidate: Registration) -> AccountResult<User> {
        if self.find_by_email(&candidate.email).is_some() {
            return Err(AccountError::DuplicateEmail(candidate.email));
        }

        let user = candidate.into_user(self.ids.next_id(), Utc::now());
        let stored = user.clone();
        self.commit(move |users| {
            users.push(user);
            Ok(())
        })?;

        info!("Registered user {}", stored.id);
        Ok(stored)
    }

    /// Check credentials and start a session, durable when `remember` is set
    pub fn authenticate(&self, email: &str, password: &str, remember: bool) -> AccountResult<Session> {
        let user = self
            .users
            .iter()
            .find(|u| u.email == email && u.password.expose() == password)
            .ok_or(AccountError::InvalidCredentials)?;

        if !user.is_active {
            warn!("Sign-in refused for deactivated user {}", user.id);
            return Err(AccountError::AccountDeactivated);
        }

        let session = Session::for_user(user);
        self.session.start(&session, remember)?;
        Ok(session)
    }

    pub fn update_profile(&mut self, id: &str, patch: ProfilePatch) -> AccountResult<User> {
        let updated = self.commit(|users| {
            let user = find_mut(users, id)?;
            patch.apply_to(user);
            user.touch();
            Ok(user.clone())
        })?;
        info!("Updated profile of user {}", id);

        // Keep the signed-in copy of name/email in step, in whichever area holds it.
        // The profile is already stored, so a failed session write is not an error.
        if let Some((kind, mut session)) = self.session.locate() {
            if session.id == id {
                patch.mirror_into(&mut session);
                if let Err(e) = self.session.write(kind, &session) {
                    warn!("Profile of user {} saved but session refresh failed: {}", id, e);
                }
            }
        }

        Ok(updated)
    }

    pub fn save_notification_settings(
        &mut self,
        id: &str,
        settings: NotificationSettings,
    ) -> AccountResult<User> {
        self.update_profile(id, ProfilePatch::notifications(settings))
    }

    pub fn append_application(&mut self, id: &str, draft: ApplicationDraft) -> AccountResult<Application> {
        let application = Application::new(self.ids.next_id(), draft);
        let created = self.commit(|users| {
            let user = find_mut(users, id)?;
            user.applications.push(application.clone());
            Ok(application)
        })?;

        info!("Application {} added for user {}", created.id, id);
        Ok(created)
    }

    pub fn append_booking(&mut self, id: &str, draft: BookingDraft) -> AccountResult<Booking> {
        let booking = Booking::new(self.ids.next_id(), draft);
        let created = self.commit(|users| {
            let user = find_mut(users, id)?;
            user.bookings.push(booking.clone());
            Ok(booking)
        })?;

        info!("Booking {} added for user {}", created.id, id);
        Ok(created)
    }

    pub fn change_password(&mut self, id: &str, current: &str, next: &str) -> AccountResult<()> {
        self.commit(|users| {
            let user = find_mut(users, id)?;
            if user.password.expose() != current {
                return Err(AccountError::PasswordMismatch);
            }
            user.password = Masked::from(next);
            user.touch();
            Ok(())
        })?;

        info!("Password changed for user {}", id);
        Ok(())
    }

    /// Remove the account and clear any session, whoever it belongs to
    pub fn delete_account(&mut self, id: &str) -> AccountResult<()> {
        self.commit(|users| {
            let index = users
                .iter()
                .position(|u| u.id == id)
                .ok_or_else(|| AccountError::NotFound(id.to_string()))?;
            users.remove(index);
            Ok(())
        })?;

        self.session.clear()?;
        info!("Deleted user {}", id);
        Ok(())
    }

    /// Never fails: an unknown account has no applications
    pub fn list_applications(&self, id: &str) -> &[Application] {
        self.find(id).map(|u| u.applications.as_slice()).unwrap_or(&[])
    }

    pub fn list_bookings(&self, id: &str) -> &[Booking] {
        self.find(id).map(|u| u.bookings.as_slice()).unwrap_or(&[])
    }
}

fn find_mut<'a>(users: &'a mut [User], id: &str) -> AccountResult<&'a mut User> {
    users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| AccountError::NotFound(id.to_string()))
}

fn load_users(areas: &Areas, key: &str) -> AccountResult<Vec<User>> {
    let Some(raw) = areas.durable.get_item(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<User>>(&raw) {
        Ok(users) => Ok(users),
        Err(e) => {
            warn!("Stored account collection under {} is malformed, starting empty: {}", key, e);
            Ok(Vec::new())
        }
    }
}

fn seed_ids(users: &[User]) -> IdGenerator {
    IdGenerator::seeded(users.iter().flat_map(|u| {
        std::iter::once(u.id.as_str())
            .chain(u.applications.iter().map(|a| a.id.as_str()))
            .chain(u.bookings.iter().map(|b| b.id.as_str()))
    }))
}
