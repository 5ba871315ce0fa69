// Request bodies specific to the private legacy surface.
//
// Responses reuse `crate::types::Authorization`: the server returns the
// same shape on both surfaces, with `token` holding the 1.x username.

use serde::Serialize;

use crate::types::Permission;

/// `POST /private/legacy/authorizations` body.
#[derive(Debug, Clone, Serialize)]
pub struct LegacyAuthorizationPostRequest {
    #[serde(rename = "orgID")]
    pub org_id: String,
    #[serde(rename = "userID", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// The 1.x username.
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub permissions: Vec<Permission>,
}

/// `POST /private/legacy/authorizations/{id}/password` body.
#[derive(Serialize)]
pub(crate) struct PasswordRequest<'a> {
    pub password: &'a str,
}
