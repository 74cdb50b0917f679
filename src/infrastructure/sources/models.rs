//! Wire models for the upstream APIs.
//!
//! Every field is optional or defaulted: upstream data is loosely maintained
//! and a missing, `null` or mistyped field falls back to a placeholder
//! instead of rejecting the record.

use serde::Deserialize;
use serde_with::{DefaultOnError, serde_as};

/// ThronesAPI `title` is a string in practice but has been an array before.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TitleField {
    One(String),
    Many(Vec<String>),
}

/// A character as returned by `GET /api/v2/Characters` on ThronesAPI.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawThronesCharacter {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub title: Option<TitleField>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub family: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub image: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub born: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub died: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError<Vec<DefaultOnError>>")]
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A character as returned by `GET /api/characters` on An API of Ice and Fire.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawIceAndFireCharacter {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub born: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub died: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError<Vec<DefaultOnError>>")]
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnError<Vec<DefaultOnError>>")]
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnError<Vec<DefaultOnError>>")]
    #[serde(default)]
    pub allegiances: Vec<String>,
}
