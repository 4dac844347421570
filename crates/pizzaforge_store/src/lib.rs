//! Local persistence for feeds, profiles, bookmarks, and known users.
//!
//! Each collection is one JSON document in a flat data directory, addressed
//! by a fixed key. Reads are tolerant: a missing or corrupt document loads
//! as an empty collection and is logged, never surfaced as an error. Writes
//! report real failures so callers can log them.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use pizzaforge_recipe::{FeedEntry, UserRecord};

/// Published feed, newest first.
pub const FEED_KEY: &str = "feed_v1";
/// Known user records.
pub const USERS_KEY: &str = "users_v1";

/// Bookmarked feed-entry ids for one user.
pub fn bookmarks_key(uid: &str) -> String {
    format!("bookmarks_v1_{uid}")
}

/// Recipes a user saved to their own profile.
pub fn recipes_key(uid: &str) -> String {
    format!("recipes_{uid}")
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// JSON-file key-value store rooted in a data directory.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    base_dir: PathBuf,
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore {
    /// Store rooted at `PIZZAFORGE_DATA_DIR`, or `pizzaforge_data/` under
    /// the working directory when unset.
    pub fn new() -> Self {
        let base_dir = std::env::var("PIZZAFORGE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("pizzaforge_data"));
        Self { base_dir }
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Document path for a key.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    /// Load a collection. Missing or unreadable documents come back empty.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let path = self.path_for(key);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("failed to read {}: {e}", path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("corrupt document {}, treating as empty: {e}", path.display());
                Vec::new()
            }
        }
    }

    /// Write a collection, creating the data directory on first use.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base_dir)?;
        let text = serde_json::to_string_pretty(items)?;
        std::fs::write(self.path_for(key), text)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Feed
    // -----------------------------------------------------------------------

    pub fn load_feed(&self) -> Vec<FeedEntry> {
        self.load(FEED_KEY)
    }

    /// Insert a freshly published entry at the head of the feed.
    pub fn prepend_feed(&self, entry: FeedEntry) -> Result<(), StoreError> {
        let mut feed = self.load_feed();
        feed.insert(0, entry);
        self.save(FEED_KEY, &feed)
    }

    /// Remove a feed entry by id. Returns whether anything was removed.
    pub fn delete_feed_entry(&self, id: u64) -> Result<bool, StoreError> {
        let mut feed = self.load_feed();
        let before = feed.len();
        feed.retain(|entry| entry.id != id);
        if feed.len() == before {
            return Ok(false);
        }
        self.save(FEED_KEY, &feed)?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub fn load_users(&self) -> Vec<UserRecord> {
        self.load(USERS_KEY)
    }

    /// Insert or replace a user record, keyed by uid.
    pub fn upsert_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut users = self.load_users();
        match users.iter_mut().find(|u| u.uid == user.uid) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.save(USERS_KEY, &users)
    }

    // -----------------------------------------------------------------------
    // Bookmarks
    // -----------------------------------------------------------------------

    pub fn load_bookmarks(&self, uid: &str) -> Vec<u64> {
        self.load(&bookmarks_key(uid))
    }

    /// Flip one entry's bookmarked state. Returns true when the entry is
    /// bookmarked after the call.
    pub fn toggle_bookmark(&self, uid: &str, id: u64) -> Result<bool, StoreError> {
        let key = bookmarks_key(uid);
        let mut ids: Vec<u64> = self.load(&key);
        let bookmarked = match ids.iter().position(|&b| b == id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(id);
                true
            }
        };
        self.save(&key, &ids)?;
        Ok(bookmarked)
    }

    // -----------------------------------------------------------------------
    // Profile recipes
    // -----------------------------------------------------------------------

    pub fn load_recipes(&self, uid: &str) -> Vec<FeedEntry> {
        self.load(&recipes_key(uid))
    }

    /// Insert a saved recipe at the head of a user's profile list.
    pub fn prepend_recipe(&self, uid: &str, entry: FeedEntry) -> Result<(), StoreError> {
        let key = recipes_key(uid);
        let mut recipes: Vec<FeedEntry> = self.load(&key);
        recipes.insert(0, entry);
        self.save(&key, &recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzaforge_recipe::{BaseSize, BaseType, Recipe};
    use tempfile::TempDir;

    fn setup() -> (TempDir, RecipeStore) {
        let dir = TempDir::new().unwrap();
        let store = RecipeStore::with_base_dir(dir.path());
        (dir, store)
    }

    fn entry(id: u64, uid: &str) -> FeedEntry {
        FeedEntry {
            id,
            recipe: Recipe {
                author: "Ada".to_owned(),
                uid: uid.to_owned(),
                base_type: BaseType::Medium,
                base_size: BaseSize::Cm33,
                cheese_amount: 250,
                toppings: Vec::new(),
                created_at: "2026-08-23T12:00:00Z".to_owned(),
            },
        }
    }

    #[test]
    fn missing_document_loads_empty() {
        let (_dir, store) = setup();
        assert!(store.load_feed().is_empty());
        assert!(store.load_bookmarks("u-1").is_empty());
    }

    #[test]
    fn corrupt_document_loads_empty() {
        let (dir, store) = setup();
        std::fs::write(dir.path().join("feed_v1.json"), "{not json").unwrap();
        assert!(store.load_feed().is_empty());
    }

    #[test]
    fn feed_prepend_keeps_newest_first() {
        let (_dir, store) = setup();
        store.prepend_feed(entry(1, "u-1")).unwrap();
        store.prepend_feed(entry(2, "u-1")).unwrap();
        let feed = store.load_feed();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].id, 2);
        assert_eq!(feed[1].id, 1);
    }

    #[test]
    fn delete_removes_only_matching_entry() {
        let (_dir, store) = setup();
        store.prepend_feed(entry(1, "u-1")).unwrap();
        store.prepend_feed(entry(2, "u-2")).unwrap();
        assert!(store.delete_feed_entry(1).unwrap());
        assert!(!store.delete_feed_entry(99).unwrap());
        let feed = store.load_feed();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, 2);
    }

    #[test]
    fn bookmark_toggle_flips_membership() {
        let (_dir, store) = setup();
        assert!(store.toggle_bookmark("u-1", 7).unwrap());
        assert_eq!(store.load_bookmarks("u-1"), vec![7]);
        assert!(!store.toggle_bookmark("u-1", 7).unwrap());
        assert!(store.load_bookmarks("u-1").is_empty());
        // Other users' bookmarks are untouched.
        assert!(store.load_bookmarks("u-2").is_empty());
    }

    #[test]
    fn upsert_replaces_by_uid() {
        let (_dir, store) = setup();
        store
            .upsert_user(&UserRecord {
                uid: "u-1".to_owned(),
                display_name: "Ada".to_owned(),
            })
            .unwrap();
        store
            .upsert_user(&UserRecord {
                uid: "u-1".to_owned(),
                display_name: "Ada L.".to_owned(),
            })
            .unwrap();
        let users = store.load_users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].display_name, "Ada L.");
    }

    #[test]
    fn profile_recipes_are_per_user() {
        let (_dir, store) = setup();
        store.prepend_recipe("u-1", entry(1, "u-1")).unwrap();
        store.prepend_recipe("u-2", entry(2, "u-2")).unwrap();
        assert_eq!(store.load_recipes("u-1").len(), 1);
        assert_eq!(store.load_recipes("u-2").len(), 1);
        assert_eq!(store.load_recipes("u-3").len(), 0);
    }

    #[test]
    fn documents_land_under_key_names() {
        let (dir, store) = setup();
        store.prepend_feed(entry(1, "u-1")).unwrap();
        assert!(dir.path().join("feed_v1.json").exists());
        assert_eq!(store.path_for(USERS_KEY), dir.path().join("users_v1.json"));
    }
}
