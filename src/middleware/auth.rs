use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::auth::{Claims, Role};
use crate::config;
use crate::error::ApiError;

/// Authenticated principal extracted from a validated JWT. The rest of the
/// application consumes this plain struct; nothing downstream knows or cares
/// which provider minted the token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub name: String,
    pub role: Role,
}

impl Principal {
    /// Gate for mutating endpoints: editors and admins only.
    pub fn require_editor(&self) -> Result<(), ApiError> {
        if self.role.can_edit() {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "Role '{}' may not modify content",
                self.role.as_str()
            )))
        }
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            role: claims.role,
        }
    }
}

/// JWT authentication middleware that validates tokens and injects the
/// resolved Principal into request extensions
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    // Extract JWT from Authorization header
    let token = extract_jwt_from_headers(&headers).map_err(|msg| {
        let api_error = ApiError::unauthorized(msg);
        (
            StatusCode::from_u16(api_error.status_code()).unwrap(),
            Json(api_error.to_json()),
        )
    })?;

    // Validate and decode JWT
    let claims = validate_jwt(&token).map_err(|msg| {
        let api_error = ApiError::unauthorized(msg);
        (
            StatusCode::from_u16(api_error.status_code()).unwrap(),
            Json(api_error.to_json()),
        )
    })?;

    // Convert claims to Principal and inject into request
    let principal = Principal::from(claims);
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Validate JWT token and extract claims
fn validate_jwt(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid JWT token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::generate_jwt;

    #[test]
    fn locally_signed_tokens_round_trip() {
        // Development config provides a non-empty fallback secret
        let claims = Claims::new(Uuid::new_v4(), "ana".to_string(), Role::Editor);
        let subject = claims.sub;
        let token = generate_jwt(claims).expect("signing");

        let decoded = validate_jwt(&token).expect("validation");
        assert_eq!(decoded.sub, subject);
        assert_eq!(decoded.role, Role::Editor);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(validate_jwt("not-a-jwt").is_err());
    }

    #[test]
    fn viewer_principal_cannot_edit() {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            name: "leo".to_string(),
            role: Role::Viewer,
        };
        let err = principal.require_editor().unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
