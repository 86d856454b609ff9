use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::error::ApiError;

/// Claimed identity taken from the `user_id` and `password` request
/// headers. Extraction only checks that both headers are present and
/// well-formed; the password itself is verified later by
/// [`crate::auth::authorize`].
#[derive(Debug)]
pub struct Credentials {
    pub user_id: i64,
    pub password: String,
}

impl Credentials {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ApiError> {
        let user_id = headers
            .get("user_id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("user_id and password headers required".into()))?;
        let user_id = user_id
            .parse::<i64>()
            .map_err(|_| ApiError::Unauthorized("user_id header must be an integer".into()))?;
        let password = headers
            .get("password")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("user_id and password headers required".into()))?;
        Ok(Self {
            user_id,
            password: password.to_string(),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                value.parse().unwrap(),
            );
        }
        map
    }

    #[test]
    fn both_headers_present_parse_into_credentials() {
        let creds =
            Credentials::from_headers(&headers(&[("user_id", "1"), ("password", "password_1")]))
                .unwrap();
        assert_eq!(creds.user_id, 1);
        assert_eq!(creds.password, "password_1");
    }

    #[test]
    fn missing_headers_are_a_conflict_before_any_lookup() {
        let err = Credentials::from_headers(&headers(&[])).unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = Credentials::from_headers(&headers(&[("user_id", "1")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = Credentials::from_headers(&headers(&[("password", "p")])).unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn non_numeric_user_id_is_rejected() {
        let err = Credentials::from_headers(&headers(&[("user_id", "abc"), ("password", "p")]))
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }
}
