use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::users::repo::User;
use crate::validation::{self, FieldResult};

/// Validated payload for POST /user. Every field is required and non-empty;
/// the mail must look like an address.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub second_name: String,
    pub mail: String,
    pub password: String,
}

impl CreateUser {
    pub fn parse(payload: &Value) -> FieldResult<Self> {
        let obj = validation::payload_object(payload)?;
        Ok(Self {
            name: validation::required_string(obj, "name")?,
            second_name: validation::required_string(obj, "second_name")?,
            mail: validation::required_mail(obj, "mail")?,
            password: validation::required_string(obj, "password")?,
        })
    }
}

/// Validated payload for PATCH /user/{id}. Any subset of fields; present
/// fields obey the same rules as on create.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub second_name: Option<String>,
    pub mail: Option<String>,
    pub password: Option<String>,
}

impl UpdateUser {
    pub fn parse(payload: &Value) -> FieldResult<Self> {
        let obj = validation::payload_object(payload)?;
        Ok(Self {
            name: validation::optional_string(obj, "name")?,
            second_name: validation::optional_string(obj, "second_name")?,
            mail: validation::optional_mail(obj, "mail")?,
            password: validation::optional_string(obj, "password")?,
        })
    }
}

/// The serializable view of a user. The password hash stays out of every
/// response.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub name: String,
    pub second_name: String,
    pub mail: String,
    #[serde(with = "time::serde::rfc3339")]
    pub registration_time: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            second_name: user.second_name,
            mail: user.mail,
            registration_time: user.registration_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserId {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_accepts_a_complete_payload() {
        let payload = json!({
            "name": "user_1",
            "second_name": "second_name_1",
            "mail": "jon.79555@gmail.com",
            "password": "password_1"
        });
        let parsed = CreateUser::parse(&payload).unwrap();
        assert_eq!(parsed.name, "user_1");
        assert_eq!(parsed.mail, "jon.79555@gmail.com");
    }

    #[test]
    fn create_reports_the_first_missing_field() {
        let payload = json!({ "second_name": "b", "mail": "a@b.com", "password": "p" });
        let err = CreateUser::parse(&payload).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn create_rejects_a_malformed_mail() {
        let payload = json!({
            "name": "a",
            "second_name": "b",
            "mail": "not-an-address",
            "password": "p"
        });
        let err = CreateUser::parse(&payload).unwrap_err();
        assert_eq!(err.field, "mail");
    }

    #[test]
    fn update_allows_any_subset() {
        let parsed = UpdateUser::parse(&json!({ "name": "new_user_name" })).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("new_user_name"));
        assert!(parsed.mail.is_none());

        let parsed = UpdateUser::parse(&json!({})).unwrap();
        assert!(parsed.name.is_none() && parsed.password.is_none());
    }

    #[test]
    fn update_applies_create_rules_to_present_fields() {
        assert!(UpdateUser::parse(&json!({ "mail": "a@b" })).is_err());
        assert!(UpdateUser::parse(&json!({ "password": "" })).is_err());
    }

    #[test]
    fn public_user_never_serializes_the_hash() {
        let user = User {
            id: 1,
            name: "user_1".into(),
            second_name: "second_name_1".into(),
            mail: "a@b.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            registration_time: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
        };
        let value = serde_json::to_value(PublicUser::from(user)).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("mail"));
        assert!(!obj.contains_key("password"));
        assert!(!obj.contains_key("password_hash"));
        // RFC 3339, as the original API returned isoformat timestamps.
        assert!(value["registration_time"].as_str().unwrap().contains('T'));
    }
}
