//! User profile and authentication services.
//!
//! User records are externally owned: the core reads and writes only the
//! two string-JSON sub-fields (checklist state, completed-content ids) plus
//! the ad-hoc credential fields the frontend relies on. Credential handling
//! reproduces the observed stored-as-given behavior; hardening it is out of
//! scope.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AuthError;
use crate::traits::UserSource;
use crate::types::{Collection, RawFields, RecordId};
use crate::{Error, Result, codec};

const CHECKLIST_STATE: &str = "checklistStateJSON";
const CHECKLIST_PROGRESS: &str = "checklistProgress";
const COMPLETED_CONTENT_IDS: &str = "CompletedContentIDs";
const EMAIL: &str = "Email";
const PASSWORD: &str = "Senha (Hash)";

/// Reads and writes the checklist sub-state stored on a user record.
#[derive(Clone)]
pub struct UserChecklistService {
    users: Arc<dyn UserSource>,
}

impl UserChecklistService {
    /// Create the service over the user record source.
    pub fn new(users: Arc<dyn UserSource>) -> Self {
        Self { users }
    }

    /// Current checklist state for a user; `{}` when unset or malformed.
    pub async fn checklist_state(&self, user_id: &RecordId) -> Result<Map<String, Value>> {
        let record = self.users.fetch(&Collection::USERS, user_id).await?;
        Ok(codec::decode_or_default(
            CHECKLIST_STATE,
            record.id.as_str(),
            record.field(CHECKLIST_STATE),
        ))
    }

    /// Persist checklist state and progress on the user record.
    pub async fn save_checklist(
        &self,
        user_id: &RecordId,
        state: &Value,
        progress: f64,
    ) -> Result<()> {
        let mut fields = RawFields::new();
        fields.insert(CHECKLIST_STATE, codec::encode(state)?);
        fields.insert(CHECKLIST_PROGRESS, progress);
        self.users.update(&Collection::USERS, user_id, fields).await
    }
}

/// Registration payload for a learner account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Accepted as a number or a numeric string.
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub region_city: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub renewable_energy_experience: Option<String>,
    #[serde(default)]
    pub accept_terms: Option<bool>,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Registration payload for an administrator account.
#[derive(Debug, Deserialize)]
pub struct NewAdmin {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Outcome of a successful learner login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutput {
    pub record_id: RecordId,
    /// The raw profile fields, passed through to the client.
    pub user: RawFields,
    pub completed_content_ids: Vec<String>,
}

/// Outcome of a successful administrator login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginOutput {
    pub record_id: RecordId,
    pub admin: RawFields,
}

/// Registration and login against the spreadsheet store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserSource>,
}

impl AuthService {
    /// Create the service over the user record source.
    pub fn new(users: Arc<dyn UserSource>) -> Self {
        Self { users }
    }

    /// Register a learner account. Duplicate emails are rejected.
    pub async fn register(&self, new_user: NewUser) -> Result<RecordId> {
        let name = require(new_user.name, "name")?;
        let email = require(new_user.email, "email")?;
        let password = require(new_user.password, "password")?;
        let age = require_age(new_user.age)?;
        let region_city = require(new_user.region_city, "regionCity")?;

        if self
            .users
            .find_first(&Collection::USERS, &[(EMAIL, &email)])
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateRegistration { email }.into());
        }

        let mut fields = RawFields::new();
        fields.insert("Nome Completo", name);
        fields.insert(EMAIL, email);
        fields.insert(PASSWORD, password);
        fields.insert("Idade", age);
        fields.insert("Região/Cidade", region_city);
        if let Some(profession) = new_user.profession {
            fields.insert("Profissão/Ocupação", profession);
        }
        if let Some(experience) = new_user.renewable_energy_experience {
            fields.insert("Experiência Energia Renovável", experience);
        }
        if let Some(accepted) = new_user.accept_terms {
            fields.insert("Aceita Termos", accepted);
        }
        fields.insert(COMPLETED_CONTENT_IDS, "[]");

        let id = self.users.create(&Collection::USERS, fields).await?;
        debug!(user = %id, "registered learner account");
        Ok(id)
    }

    /// Log a learner in, returning the raw profile plus decoded
    /// completed-content ids.
    pub async fn login(&self, credentials: Credentials) -> Result<LoginOutput> {
        let email = require(credentials.email, "email")?;
        let password = require(credentials.password, "password")?;

        let record = self
            .users
            .find_first(&Collection::USERS, &[(EMAIL, &email), (PASSWORD, &password)])
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let completed_content_ids = codec::decode_or_default(
            COMPLETED_CONTENT_IDS,
            record.id.as_str(),
            record.field(COMPLETED_CONTENT_IDS),
        );

        Ok(LoginOutput {
            record_id: record.id,
            user: record.fields,
            completed_content_ids,
        })
    }

    /// Register an administrator account. Duplicate emails are rejected.
    pub async fn register_admin(&self, new_admin: NewAdmin) -> Result<RecordId> {
        let name = require(new_admin.name, "name")?;
        let email = require(new_admin.email, "email")?;
        let password = require(new_admin.password, "password")?;

        if self
            .users
            .find_first(&Collection::ADMINS, &[(EMAIL, &email)])
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateRegistration { email }.into());
        }

        let mut fields = RawFields::new();
        fields.insert("Nome do Admin", name);
        fields.insert(EMAIL, email);
        fields.insert(PASSWORD, password);

        self.users.create(&Collection::ADMINS, fields).await
    }

    /// Log an administrator in.
    pub async fn login_admin(&self, credentials: Credentials) -> Result<AdminLoginOutput> {
        let email = require(credentials.email, "email")?;
        let password = require(credentials.password, "password")?;

        let record = self
            .users
            .find_first(&Collection::ADMINS, &[(EMAIL, &email), (PASSWORD, &password)])
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AdminLoginOutput {
            record_id: record.id,
            admin: record.fields,
        })
    }
}

fn require(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Validation(format!(
            "missing required field '{name}'"
        ))),
    }
}

/// Age arrives as a number or a numeric string depending on the frontend
/// form state; both coerce to an integer.
fn require_age(value: Option<Value>) -> Result<i64> {
    let invalid = || Error::Validation("missing required field 'age'".to_string());
    let value = value.ok_or_else(invalid)?;
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(invalid),
        Value::String(s) => s.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
