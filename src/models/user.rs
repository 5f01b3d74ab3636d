use serde::{Deserialize, Serialize};

use super::UserId;

/// Identifier and display name the client keeps after login/registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRequest {
    pub name: String,
    pub age: u32,
    pub favorite_genres: Vec<String>,
}

/// A rating and/or like the user gave a game
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InteractionRequest {
    pub user_id: UserId,
    pub game_id: u64,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub liked: Option<bool>,
}

// ============================================================================
// Remote API Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ApiLoginBody<'a> {
    pub nombre: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiRegistrationBody<'a> {
    pub nombre: &'a str,
    pub edad: u32,
    pub generos_favoritos: Vec<&'a str>,
}

impl<'a> From<&'a RegistrationRequest> for ApiRegistrationBody<'a> {
    fn from(request: &'a RegistrationRequest) -> Self {
        Self {
            nombre: request.name.trim(),
            edad: request.age,
            generos_favoritos: request
                .favorite_genres
                .iter()
                .map(|genre| genre.trim())
                .filter(|genre| !genre.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiInteractionBody {
    pub id_usuario: u64,
    pub id_juego: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calificacion: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like: Option<bool>,
}

impl From<&InteractionRequest> for ApiInteractionBody {
    fn from(request: &InteractionRequest) -> Self {
        Self {
            id_usuario: request.user_id.0,
            id_juego: request.game_id,
            // Zero means "not rated"
            calificacion: request.rating.filter(|r| *r > 0),
            like: request.liked,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: u64,
    pub nombre: String,
}

/// Envelope the remote API wraps user records in
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUserEnvelope {
    pub usuario: ApiUser,
}

impl From<ApiUser> for Session {
    fn from(user: ApiUser) -> Self {
        Session {
            user_id: UserId(user.id),
            name: user.nombre,
        }
    }
}
