// Persisted user preferences: notification toggles and the user profile

use crate::error::{StorageError, UnknownVariant};
use crate::storage::{KeyValueStorage, validate_key};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// A settings object stored as one JSON value under a fixed key
pub trait Preferences: Serialize + DeserializeOwned + Clone + PartialEq + Default {
    /// Storage key
    const KEY: &'static str;

    /// Repair a freshly parsed value
    fn normalized(self) -> Self {
        self
    }
}

/// Preferences with a local working copy and a last-saved copy
pub struct PreferenceStore<T: Preferences> {
    current: T,
    saved: T,
    storage: Arc<dyn KeyValueStorage>,
}

impl<T: Preferences> PreferenceStore<T> {
    /// Load from storage, using `T::default()` on any error
    pub fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let saved = Self::load_or_default(storage.as_ref());
        Self {
            current: saved.clone(),
            saved,
            storage,
        }
    }

    pub fn load(storage: &dyn KeyValueStorage) -> Result<T, StorageError> {
        validate_key(T::KEY)?;
        let raw = storage
            .get(T::KEY)?
            .ok_or_else(|| StorageError::NotFound { key: T::KEY.to_string() })?;

        let value: T = serde_json::from_str(&raw).map_err(|source| StorageError::Parse {
            key: T::KEY.to_string(),
            source,
        })?;
        Ok(value.normalized())
    }

    fn load_or_default(storage: &dyn KeyValueStorage) -> T {
        Self::load(storage).unwrap_or_else(|e| {
            debug!(key = T::KEY, error = %e, "Using default preferences");
            T::default()
        })
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    /// Change the working copy without persisting
    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.current);
    }

    /// True when the working copy differs from the last save
    pub fn is_dirty(&self) -> bool {
        self.current != self.saved
    }

    /// Persist the working copy
    pub fn save(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.current).map_err(|source| StorageError::Serialize {
            key: T::KEY.to_string(),
            source,
        })?;
        self.storage.set(T::KEY, &json)?;
        self.saved = self.current.clone();
        debug!(key = T::KEY, "Saved preferences");
        Ok(())
    }

    /// Drop unsaved edits by reloading what storage holds
    pub fn revert(&mut self) {
        self.saved = Self::load_or_default(self.storage.as_ref());
        self.current = self.saved.clone();
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Which transaction events send a notification
///
/// Stored objects may omit fields; missing ones take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub transaction_confirmation: bool,
    pub transaction_edited: bool,
    pub transaction_invoice: bool,
    pub transaction_cancelled: bool,
    pub transaction_refund: bool,
    pub payment_error: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            transaction_confirmation: true,
            transaction_edited: false,
            transaction_invoice: true,
            transaction_cancelled: true,
            transaction_refund: true,
            payment_error: false,
        }
    }
}

impl Preferences for NotificationSettings {
    const KEY: &'static str = "estatery-settings-notifications";
}

/// Individual notification toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    TransactionConfirmation,
    TransactionEdited,
    TransactionInvoice,
    TransactionCancelled,
    TransactionRefund,
    PaymentError,
}

impl Notification {
    pub const ALL: [Notification; 6] = [
        Notification::TransactionConfirmation,
        Notification::TransactionEdited,
        Notification::TransactionInvoice,
        Notification::TransactionCancelled,
        Notification::TransactionRefund,
        Notification::PaymentError,
    ];

    /// Name used on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            Notification::TransactionConfirmation => "confirmation",
            Notification::TransactionEdited => "edited",
            Notification::TransactionInvoice => "invoice",
            Notification::TransactionCancelled => "cancelled",
            Notification::TransactionRefund => "refund",
            Notification::PaymentError => "payment-error",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Notification::TransactionConfirmation => "Transaction confirmation",
            Notification::TransactionEdited => "Transaction edited",
            Notification::TransactionInvoice => "Transaction invoice",
            Notification::TransactionCancelled => "Transaction cancelled",
            Notification::TransactionRefund => "Transaction refund",
            Notification::PaymentError => "Payment error",
        }
    }
}

impl FromStr for Notification {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("notification", s))
    }
}

impl NotificationSettings {
    pub fn get(&self, which: Notification) -> bool {
        *self.slot(which)
    }

    pub fn set(&mut self, which: Notification, enabled: bool) {
        *self.slot_mut(which) = enabled;
    }

    fn slot(&self, which: Notification) -> &bool {
        match which {
            Notification::TransactionConfirmation => &self.transaction_confirmation,
            Notification::TransactionEdited => &self.transaction_edited,
            Notification::TransactionInvoice => &self.transaction_invoice,
            Notification::TransactionCancelled => &self.transaction_cancelled,
            Notification::TransactionRefund => &self.transaction_refund,
            Notification::PaymentError => &self.payment_error,
        }
    }

    fn slot_mut(&mut self, which: Notification) -> &mut bool {
        match which {
            Notification::TransactionConfirmation => &mut self.transaction_confirmation,
            Notification::TransactionEdited => &mut self.transaction_edited,
            Notification::TransactionInvoice => &mut self.transaction_invoice,
            Notification::TransactionCancelled => &mut self.transaction_cancelled,
            Notification::TransactionRefund => &mut self.transaction_refund,
            Notification::PaymentError => &mut self.payment_error,
        }
    }
}

// ============================================================================
// User profile
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Customer,
    #[default]
    Owner,
    Admin,
}

impl FromStr for UserType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(UserType::Customer),
            "owner" => Ok(UserType::Owner),
            "admin" => Ok(UserType::Admin),
            _ => Err(UnknownVariant::new("user type", s)),
        }
    }
}

const DEFAULT_USERNAME: &str = "sarah_lee";
const DEFAULT_EMAIL: &str = "sarah.lee@example.com";
const DEFAULT_PHONE: &str = "+1 (555) 123-4567";

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub user_type: UserType,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: None,
            username: DEFAULT_USERNAME.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            phone: DEFAULT_PHONE.to_string(),
            avatar: None,
            user_type: UserType::Owner,
        }
    }
}

impl Preferences for UserProfile {
    const KEY: &'static str = "estatery-user-profile";

    /// Empty text fields fall back to their defaults one by one
    fn normalized(mut self) -> Self {
        for (field, default) in [
            (&mut self.username, DEFAULT_USERNAME),
            (&mut self.email, DEFAULT_EMAIL),
            (&mut self.phone, DEFAULT_PHONE),
        ] {
            if field.is_empty() {
                *field = default.to_string();
            }
        }
        self
    }
}

/// Partial profile change; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<Option<String>>,
    pub user_type: Option<UserType>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, profile: &mut UserProfile) {
        if let Some(username) = self.username {
            profile.username = username;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(avatar) = self.avatar {
            profile.avatar = avatar;
        }
        if let Some(user_type) = self.user_type {
            profile.user_type = user_type;
        }
    }
}

impl PreferenceStore<UserProfile> {
    /// Merge `update` into the profile and persist immediately
    ///
    /// A failed write is logged; the in-memory profile keeps the change.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> &UserProfile {
        self.edit(|profile| update.apply(profile));
        if let Err(e) = self.save() {
            warn!(key = UserProfile::KEY, error = %e, "Failed to persist profile");
        }
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, UnavailableStorage};

    fn memory() -> Arc<dyn KeyValueStorage> {
        Arc::new(MemoryStorage::new())
    }

    #[test]
    fn test_notifications_default_when_missing() {
        let store = PreferenceStore::<NotificationSettings>::open(memory());
        assert_eq!(*store.get(), NotificationSettings::default());
        assert!(store.get().transaction_confirmation);
        assert!(!store.get().payment_error);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_notifications_merge_partial_object() {
        let storage = memory();
        storage
            .set(NotificationSettings::KEY, r#"{"paymentError":true,"transactionInvoice":false}"#)
            .unwrap();

        let store = PreferenceStore::<NotificationSettings>::open(storage);
        assert!(store.get().payment_error);
        assert!(!store.get().transaction_invoice);
        assert!(store.get().transaction_confirmation);
    }

    #[test]
    fn test_notifications_bad_json_falls_back() {
        let storage = memory();
        storage.set(NotificationSettings::KEY, "{not json").unwrap();
        let store = PreferenceStore::<NotificationSettings>::open(storage);
        assert_eq!(*store.get(), NotificationSettings::default());
    }

    #[test]
    fn test_edit_save_revert() {
        let storage = memory();
        let mut store = PreferenceStore::<NotificationSettings>::open(storage.clone());

        store.edit(|n| n.set(Notification::TransactionEdited, true));
        assert!(store.is_dirty());

        store.revert();
        assert!(!store.get().transaction_edited);
        assert!(!store.is_dirty());

        store.edit(|n| n.set(Notification::PaymentError, true));
        store.save().unwrap();
        assert!(!store.is_dirty());

        let reopened = PreferenceStore::<NotificationSettings>::open(storage);
        assert!(reopened.get().get(Notification::PaymentError));
    }

    #[test]
    fn test_save_to_unavailable_storage_fails_softly() {
        let mut store = PreferenceStore::<NotificationSettings>::open(Arc::new(UnavailableStorage));
        store.edit(|n| n.transaction_refund = false);
        assert!(matches!(store.save(), Err(StorageError::Unavailable)));
        assert!(store.is_dirty());
    }

    #[test]
    fn test_notification_names() {
        assert_eq!("payment-error".parse::<Notification>().unwrap(), Notification::PaymentError);
        assert_eq!("Invoice".parse::<Notification>().unwrap(), Notification::TransactionInvoice);
        assert!("sms".parse::<Notification>().is_err());
    }

    #[test]
    fn test_profile_empty_fields_take_defaults() {
        let storage = memory();
        storage
            .set(UserProfile::KEY, r#"{"id":4,"username":"","email":"ama@example.com","user_type":"admin"}"#)
            .unwrap();

        let store = PreferenceStore::<UserProfile>::open(storage);
        let profile = store.get();
        assert_eq!(profile.id, Some(4));
        assert_eq!(profile.username, "sarah_lee");
        assert_eq!(profile.email, "ama@example.com");
        assert_eq!(profile.phone, "+1 (555) 123-4567");
        assert_eq!(profile.user_type, UserType::Admin);
        assert_eq!(profile.avatar, None);
    }

    #[test]
    fn test_update_profile_persists() {
        let storage = memory();
        let mut store = PreferenceStore::<UserProfile>::open(storage.clone());

        let updated = store.update_profile(ProfileUpdate {
            phone: Some("+233 20 000 0000".to_string()),
            ..Default::default()
        });
        assert_eq!(updated.phone, "+233 20 000 0000");
        assert_eq!(updated.username, "sarah_lee");

        let reopened = PreferenceStore::<UserProfile>::open(storage);
        assert_eq!(reopened.get().phone, "+233 20 000 0000");
    }

    #[test]
    fn test_update_profile_without_storage_keeps_change() {
        let mut store = PreferenceStore::<UserProfile>::open(Arc::new(UnavailableStorage));
        let updated = store.update_profile(ProfileUpdate {
            username: Some("kofi".to_string()),
            ..Default::default()
        });
        assert_eq!(updated.username, "kofi");
    }
}
