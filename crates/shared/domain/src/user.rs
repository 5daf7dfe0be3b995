//! User domain entity and related types.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, FieldErrors};
use crate::validation::{check_email, check_name};

/// Current time at the precision users are stored with.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(field: &str, value: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| {
            DomainError::invalid_field(field, format!("'{}' is not an ISO-8601 timestamp", value))
        })
}

/// Validated user fields, ready to build an entity from.
struct CheckedFields {
    email: String,
    first_name: String,
    last_name: String,
}

fn check_fields(
    id: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> DomainResult<CheckedFields> {
    let mut errors = FieldErrors::new();
    let mut record = |field: &str, result: Result<String, String>| match result {
        Ok(value) => value,
        Err(message) => {
            errors.entry(field.to_string()).or_default().push(message);
            String::new()
        }
    };

    if id.trim().is_empty() {
        record("id", Err("User ID is required".to_string()));
    }
    let email = record("email", check_email(email));
    let first_name = record("firstName", check_name("First name", first_name));
    let last_name = record("lastName", check_name("Last name", last_name));

    if !errors.is_empty() {
        return Err(DomainError::InvalidUserData(errors));
    }

    Ok(CheckedFields {
        email,
        first_name,
        last_name,
    })
}

/// User domain entity.
///
/// Fields are private: a `User` is validated when built and every change
/// produces a new value, so an instance is never in an invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "UserData", try_from = "UserData")]
pub struct User {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_active: bool,
}

impl User {
    /// Create a new active user.
    ///
    /// # Errors
    /// Returns `InvalidUserData` listing every field that failed validation.
    pub fn new(
        id: impl Into<String>,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> DomainResult<Self> {
        let id = id.into();
        let fields = check_fields(&id, email, first_name, last_name)?;
        let now = now();

        Ok(Self {
            id,
            email: fields.email,
            first_name: fields.first_name,
            last_name: fields.last_name,
            created_at: now,
            updated_at: now,
            is_active: true,
        })
    }

    /// Rebuild a user from persisted data, applying the same validation as [`User::new`].
    pub fn reconstitute(
        id: impl Into<String>,
        email: &str,
        first_name: &str,
        last_name: &str,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        is_active: bool,
    ) -> DomainResult<Self> {
        let id = id.into();
        let fields = check_fields(&id, email, first_name, last_name)?;

        Ok(Self {
            id,
            email: fields.email,
            first_name: fields.first_name,
            last_name: fields.last_name,
            created_at: created_at.trunc_subsecs(3),
            updated_at: updated_at.trunc_subsecs(3),
            is_active,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// First and last name separated by a single space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Return a copy with new names.
    ///
    /// # Errors
    /// Returns `InvalidUserData` if either name fails validation.
    pub fn update_info(&self, first_name: &str, last_name: &str) -> DomainResult<Self> {
        let fields = check_fields(&self.id, &self.email, first_name, last_name)?;

        Ok(Self {
            first_name: fields.first_name,
            last_name: fields.last_name,
            updated_at: now(),
            ..self.clone()
        })
    }

    /// Return an inactive copy
    pub fn deactivate(&self) -> Self {
        Self {
            is_active: false,
            updated_at: now(),
            ..self.clone()
        }
    }

    /// Return an active copy
    pub fn activate(&self) -> Self {
        Self {
            is_active: true,
            updated_at: now(),
            ..self.clone()
        }
    }

    /// Encode into the transfer shape, timestamps as ISO-8601 strings.
    pub fn to_transfer_shape(&self) -> UserData {
        UserData {
            id: self.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            created_at: format_timestamp(&self.created_at),
            updated_at: format_timestamp(&self.updated_at),
            is_active: self.is_active,
        }
    }

    /// Decode a transfer shape produced by [`User::to_transfer_shape`] or by a remote store.
    pub fn from_transfer_shape(data: UserData) -> DomainResult<Self> {
        let created_at = parse_timestamp("createdAt", &data.created_at)?;
        let updated_at = parse_timestamp("updatedAt", &data.updated_at)?;

        Self::reconstitute(
            data.id,
            &data.email,
            &data.first_name,
            &data.last_name,
            created_at,
            updated_at,
            data.is_active,
        )
    }
}

/// Serialized form of a user as exchanged with a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
    pub updated_at: String,
    pub is_active: bool,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        user.to_transfer_shape()
    }
}

impl TryFrom<UserData> for User {
    type Error = DomainError;

    fn try_from(data: UserData) -> Result<Self, Self::Error> {
        User::from_transfer_shape(data)
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// User email address
    pub email: String,
    /// Given name (letters and spaces, at least 2 characters)
    pub first_name: String,
    /// Family name (letters and spaces, at least 2 characters)
    pub last_name: String,
}

impl CreateUser {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// User update data transfer object.
///
/// Omitted fields are left unchanged by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UpdateUser {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn sample() -> User {
        User::new("user-1", "jo.li@example.com", "Jo", "Li").unwrap()
    }

    #[test]
    fn new_user_is_active_with_full_name() {
        let user = sample();
        assert!(user.is_active());
        assert_eq!(user.full_name(), "Jo Li");
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn names_and_email_are_trimmed() {
        let user = User::new("user-1", " jo@example.com ", "  Ana Maria ", " Li ").unwrap();
        assert_eq!(user.email(), "jo@example.com");
        assert_eq!(user.full_name(), "Ana Maria Li");
    }

    #[test]
    fn invalid_fields_are_all_reported() {
        let err = User::new("user-1", "not-an-email", "J", "L1").unwrap_err();
        let DomainError::InvalidUserData(errors) = err else {
            panic!("expected InvalidUserData");
        };
        assert_eq!(
            errors.keys().cloned().collect::<Vec<_>>(),
            vec!["email", "firstName", "lastName"]
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = User::new("  ", "jo@example.com", "Jo", "Li").unwrap_err();
        assert_eq!(err.code(), "INVALID_USER_DATA");
    }

    #[test]
    fn update_info_returns_new_user() {
        let user = sample();
        let updated = user.update_info("Joanna", "Lim").unwrap();

        assert_eq!(updated.id(), user.id());
        assert_eq!(updated.email(), user.email());
        assert_eq!(updated.created_at(), user.created_at());
        assert_eq!(updated.full_name(), "Joanna Lim");
        assert!(updated.updated_at() >= user.updated_at());
        assert_eq!(user.full_name(), "Jo Li");
    }

    #[test]
    fn update_info_revalidates_names() {
        assert!(sample().update_info("J", "Lim").is_err());
    }

    #[test]
    fn deactivate_and_activate_flip_state() {
        let inactive = sample().deactivate();
        assert!(!inactive.is_active());

        let active = inactive.activate();
        assert!(active.is_active());
        assert_eq!(active.id(), "user-1");
    }

    #[test]
    fn transfer_shape_round_trip_preserves_fields() {
        let user = sample().deactivate();
        let data = user.to_transfer_shape();

        assert!(data.created_at.ends_with('Z'));
        assert_eq!(User::from_transfer_shape(data).unwrap(), user);
    }

    #[test]
    fn reconstitute_keeps_millisecond_precision() {
        let created =
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + Duration::nanoseconds(123_456_789);
        let user = User::reconstitute("u", "a@b.com", "Jo", "Li", created, created, true).unwrap();

        assert_eq!(user.to_transfer_shape().created_at, "2024-01-02T03:04:05.123Z");
        let back = User::from_transfer_shape(user.to_transfer_shape()).unwrap();
        assert_eq!(back.created_at(), user.created_at());
    }

    #[test]
    fn transfer_shape_rejects_bad_timestamps() {
        let mut data = sample().to_transfer_shape();
        data.updated_at = "yesterday".into();
        assert!(matches!(
            User::from_transfer_shape(data),
            Err(DomainError::InvalidUserData(_))
        ));
    }

    #[test]
    fn serde_uses_camel_case_transfer_shape() {
        let user = sample();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "Jo");
        assert_eq!(json["isActive"], true);

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn update_payload_emptiness() {
        assert!(UpdateUser::default().is_empty());
        let update = UpdateUser {
            last_name: Some("Lim".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
