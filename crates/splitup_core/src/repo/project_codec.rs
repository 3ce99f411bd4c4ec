//! Wire codec for the saved-projects slot.
//!
//! The slot holds one JSON array of `ProjectSnapshot` records. Image bytes
//! are standard base64 strings inside the array.

use crate::model::project::ProjectSnapshot;
use crate::repo::kv_store::RepoResult;

/// Encodes the full project list into one slot value.
pub fn encode_projects(projects: &[ProjectSnapshot]) -> RepoResult<Vec<u8>> {
    Ok(serde_json::to_vec(projects)?)
}

/// Decodes a slot value into the project list.
///
/// Every record is validated; one bad record fails the whole decode.
pub fn decode_projects(bytes: &[u8]) -> RepoResult<Vec<ProjectSnapshot>> {
    Ok(serde_json::from_slice(bytes)?)
}
