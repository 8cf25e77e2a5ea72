//! Wire shapes of the account endpoints.
//!
//! Field names follow the service's camelCase JSON. Each response DTO converts
//! into the matching `fitlife_core::account` model.

use fitlife_core::account::{
    AccountIdentity, AuthenticatedSession, RegisteredAccount, UserPage, UserRecord,
};
use serde::{Deserialize, Serialize};

/// Identifier sent either as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Number(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub expires_in_mins: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResponse {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl From<LoginResponse> for AuthenticatedSession {
    fn from(dto: LoginResponse) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisteredUserDto {
    pub id: Option<WireId>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterResponse {
    pub message: Option<String>,
    pub user: Option<RegisteredUserDto>,
    pub token: Option<String>,
}

impl From<RegisterResponse> for RegisteredAccount {
    fn from(dto: RegisterResponse) -> Self {
        Self {
            message: dto.message,
            user: dto.user.map(|user| AccountIdentity {
                id: user.id.map(String::from),
                name: user.name,
                email: user.email,
            }),
            token: dto.token,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: WireId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, alias = "image")]
    pub avatar: Option<String>,
}

impl From<UserDto> for UserRecord {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id.into(),
            name: dto.name,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            role: dto.role,
            avatar: dto.avatar,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserDto>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: u32,
}

impl From<UsersResponse> for UserPage {
    fn from(dto: UsersResponse) -> Self {
        Self {
            users: dto.users.into_iter().map(UserRecord::from).collect(),
            total: dto.total,
            skip: dto.skip,
            limit: dto.limit,
        }
    }
}
