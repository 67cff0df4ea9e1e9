//! Cache key and tag construction.
//!
//! Every segment is introduced by a fixed label and separated by `:`, and the
//! numeric parts never contain `:`, so two different parameter sets can never
//! produce the same key (`page=1:limit=10` vs `page=11:limit=0`).

use crate::catalogue::GameId;
use crate::storage::Page;

/// Tag attached to every catalogue read. Any catalogue write invalidates it.
pub const CATALOGUE_TAG: &str = "catalogue";

/// Returns the cache key for a single game.
pub fn game_key(id: GameId) -> String {
    format!("catalogue:game:{}", id)
}

/// Returns the cache key for one page of the game list.
pub fn game_list_key(page: Page) -> String {
    format!("catalogue:list:page={}:limit={}", page.page(), page.limit())
}

/// Returns the key of the set that tracks which cache keys carry `tag`.
///
/// Used by backends that store tag membership next to the values (Redis).
pub fn tag_tracking_key(tag: &str) -> String {
    format!("tag:{}:_keys", tag)
}
