//! Identity for the running builder. Published recipes, profile saves, and
//! bookmarks all key off the session uid.

use bevy::prelude::*;
use pizzaforge_recipe::UserRecord;

use crate::Store;

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Session>()
            .add_systems(Startup, establish_session);
    }
}

#[derive(Resource)]
pub struct Session {
    pub uid: String,
    pub display_name: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            uid: "guest".to_owned(),
            display_name: "Guest".to_owned(),
        }
    }
}

/// Reads `PIZZAFORGE_USER` for a display name and records the user in the
/// store. Without the variable the session runs as the guest user.
fn establish_session(mut session: ResMut<Session>, store: Res<Store>) {
    if let Ok(name) = std::env::var("PIZZAFORGE_USER") {
        let name = name.trim();
        if !name.is_empty() {
            session.display_name = name.to_owned();
            session.uid = slugify(name);
        }
    }
    let record = UserRecord {
        uid: session.uid.clone(),
        display_name: session.display_name.clone(),
    };
    if let Err(err) = store.upsert_user(&record) {
        warn!("failed to record user {}: {err}", record.uid);
    }
    info!(
        "session for {} ({}), {} known users",
        session.display_name,
        session.uid,
        store.load_users().len()
    );
}

/// Stable uid for a display name: lowercase alphanumerics, with runs of
/// anything else collapsed to single dashes.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() { "guest".to_owned() } else { slug }
}
