//! User profiles keyed by user id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campushub_core::traits::{Draft, Entity, RequiredField};
use campushub_core::types::{DocumentId, FieldValue, UPDATED_AT, WriteFields};

/// A user's profile. Every field is optional because the document is
/// created lazily and filled in over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// The user id.
    pub id: DocumentId,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Branch.
    pub branch: Option<String>,
    /// Semester.
    pub semester: Option<String>,
    /// Short bio.
    pub bio: Option<String>,
    /// Avatar link.
    pub photo_url: Option<String>,
    /// City.
    pub city: Option<String>,
    /// College.
    pub college: Option<String>,
    /// Server creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Server update time.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Profile {
    const COLLECTION: &'static str = "profiles";

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

/// Editable part of a profile. Written with merge, so fields not listed
/// here (email, city, college, createdAt) survive an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    /// The user id.
    pub id: Option<DocumentId>,
    /// Display name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Branch.
    pub branch: String,
    /// Semester.
    pub semester: String,
    /// Short bio.
    pub bio: String,
    /// Avatar link; left untouched when blank.
    pub photo_url: String,
}

impl Draft for ProfileDraft {
    type Entity = Profile;

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn required_fields(&self) -> Vec<RequiredField<'_>> {
        Vec::new()
    }

    fn to_fields(&self) -> WriteFields {
        let mut fields = WriteFields::from([
            ("name".to_string(), FieldValue::trimmed(&self.name)),
            ("phone".to_string(), FieldValue::trimmed(&self.phone)),
            ("branch".to_string(), FieldValue::trimmed(&self.branch)),
            ("semester".to_string(), FieldValue::trimmed(&self.semester)),
            ("bio".to_string(), FieldValue::trimmed(&self.bio)),
            (UPDATED_AT.to_string(), FieldValue::ServerTimestamp),
        ]);
        if !self.photo_url.trim().is_empty() {
            fields.insert("photoUrl".to_string(), FieldValue::trimmed(&self.photo_url));
        }
        fields
    }

    fn from_entity(profile: &Profile) -> Self {
        Self {
            id: Some(profile.id.clone()),
            name: profile.name.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
            branch: profile.branch.clone().unwrap_or_default(),
            semester: profile.semester.clone().unwrap_or_default(),
            bio: profile.bio.clone().unwrap_or_default(),
            photo_url: profile.photo_url.clone().unwrap_or_default(),
        }
    }
}

/// Initial profile values captured at sign-up or first sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSeed {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// City.
    pub city: Option<String>,
    /// College.
    pub college: Option<String>,
}

impl ProfileSeed {
    /// Seed with just a name and email.
    pub fn basic(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Fields for the initial merge write, without timestamps.
    pub fn to_fields(&self) -> WriteFields {
        let mut fields = WriteFields::from([
            ("name".to_string(), FieldValue::trimmed(&self.name)),
            ("email".to_string(), FieldValue::trimmed(&self.email)),
        ]);
        for (key, value) in [("phone", &self.phone), ("city", &self.city), ("college", &self.college)] {
            if let Some(v) = value {
                fields.insert(key.to_string(), FieldValue::trimmed(v));
            }
        }
        fields
    }
}
