//! Seed groups from config.toml
//!
//! Each `[[groups]]` table is created through the normal group-creation path
//! at start-up, so seeds are validated exactly like user input.

use crate::entities::NewMember;
use serde::Deserialize;

/// A group to create at start-up
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSeed {
    /// Name of the group
    pub name: String,
    /// Initial roster, in order
    #[serde(default)]
    pub members: Vec<NewMember>,
}
