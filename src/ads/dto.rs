use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::ads::repo::Ad;
use crate::validation::{self, FieldResult};

/// Validated payload for POST /ad.
#[derive(Debug)]
pub struct CreateAd {
    pub title: String,
    pub description: String,
    pub user_id: i64,
}

impl CreateAd {
    pub fn parse(payload: &Value) -> FieldResult<Self> {
        let obj = validation::payload_object(payload)?;
        Ok(Self {
            title: validation::required_string(obj, "title")?,
            description: validation::required_string(obj, "description")?,
            user_id: validation::required_id(obj, "user_id")?,
        })
    }
}

/// Validated payload for PATCH /ad/{id}. Title and description are
/// optional; user_id stays required on update as well.
#[derive(Debug)]
pub struct UpdateAd {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: i64,
}

impl UpdateAd {
    pub fn parse(payload: &Value) -> FieldResult<Self> {
        let obj = validation::payload_object(payload)?;
        Ok(Self {
            title: validation::optional_string(obj, "title")?,
            description: validation::optional_string(obj, "description")?,
            user_id: validation::required_id(obj, "user_id")?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AdDetails {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub user_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub registration_time: OffsetDateTime,
}

impl From<Ad> for AdDetails {
    fn from(ad: Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            user_id: ad.user_id,
            registration_time: ad.registration_time,
        }
    }
}

/// Response for POST /ad.
#[derive(Debug, Serialize)]
pub struct CreatedAd {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AdId {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_title_description_and_user_id() {
        let parsed = CreateAd::parse(&json!({
            "title": "title_1",
            "description": "description ad_1",
            "user_id": 1
        }))
        .unwrap();
        assert_eq!(parsed.title, "title_1");
        assert_eq!(parsed.user_id, 1);

        let err = CreateAd::parse(&json!({
            "title": "title_1",
            "description": "description ad_1"
        }))
        .unwrap_err();
        assert_eq!(err.field, "user_id");
    }

    #[test]
    fn create_coerces_string_user_ids() {
        let parsed = CreateAd::parse(&json!({
            "title": "t",
            "description": "d",
            "user_id": "1"
        }))
        .unwrap();
        assert_eq!(parsed.user_id, 1);
    }

    #[test]
    fn update_keeps_user_id_required() {
        let err = UpdateAd::parse(&json!({ "title": "new_title_1" })).unwrap_err();
        assert_eq!(err.field, "user_id");

        let parsed = UpdateAd::parse(&json!({ "title": "new_title_1", "user_id": 1 })).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("new_title_1"));
        assert!(parsed.description.is_none());
    }

    #[test]
    fn update_rejects_empty_strings() {
        assert!(UpdateAd::parse(&json!({ "title": "", "user_id": 1 })).is_err());
    }

    #[test]
    fn details_serialize_every_public_field() {
        let ad = Ad {
            id: 2,
            title: "title_1".into(),
            description: "description ad_1".into(),
            registration_time: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            user_id: 1,
        };
        let value = serde_json::to_value(AdDetails::from(ad)).unwrap();
        assert_eq!(value["id"], 2);
        assert_eq!(value["user_id"], 1);
        assert!(value["registration_time"].is_string());
    }
}
