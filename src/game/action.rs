//! Named actions accepted by the store.
//!
//! The serialized form is the classic `{"type": "ADDPIECE", "col": 3}` shape.
//! Any unrecognized `type` deserializes to [`Action::Unknown`] instead of
//! failing, so the store decides how strict to be.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Action {
    /// Begin a round.
    Start,
    /// Drop the current player's piece into a column.
    AddPiece {
        #[serde(rename = "col", deserialize_with = "column_index")]
        column: usize,
    },
    /// Hand the turn to the other player unless the last move was invalid.
    NextPlayer,
    /// Freeze the round as won.
    Win,
    /// Freeze the round as drawn.
    Draw,
    /// Replace the state with a fresh game.
    Clear,
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Parse an action from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Action type name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "START",
            Action::AddPiece { .. } => "ADDPIECE",
            Action::NextPlayer => "NEXTPLAYER",
            Action::Win => "WIN",
            Action::Draw => "DRAW",
            Action::Clear => "CLEAR",
            Action::Unknown => "UNKNOWN",
        }
    }
}

/// Columns arrive either as numbers or as numeric strings (DOM dataset values).
fn column_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(usize),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(column) => Ok(column),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
