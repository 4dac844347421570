//! Recipe collection overlay: one listing, parameterized by which
//! collection is shown. All three collections read the published feed;
//! Mine and Bookmarked are filters over it.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::picking::hover::{HoverMap, Hovered};
use bevy::prelude::*;
use pizzaforge_recipe::{FeedEntry, Recipe, epoch_millis, utc_timestamp};
use pizzaforge_store::RecipeStore;

use crate::recipe_io::ApplyRecipe;
use crate::session::Session;
use crate::theme::{
    ACCENT_BG, BUTTON_BG, FONT_MD, FONT_SM, FONT_TITLE, OVERLAY_BG, PANEL_BG, ROW_BG, SPACING_MD,
    SPACING_SM, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::{BuilderActions, BuilderRebuild, PointerBlocking, Store};

pub struct CollectionsPlugin;

impl Plugin for CollectionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollectionViewState>()
            .add_systems(Update, send_scroll_events)
            .add_systems(
                Update,
                (handle_entry_actions, handle_overlay_close).in_set(BuilderActions),
            )
            .add_systems(Update, rebuild_collection_view.in_set(BuilderRebuild))
            .add_observer(on_scroll);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecipeCollection {
    Feed,
    Mine,
    Bookmarked,
}

impl RecipeCollection {
    pub const ALL: [RecipeCollection; 3] = [
        RecipeCollection::Feed,
        RecipeCollection::Mine,
        RecipeCollection::Bookmarked,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecipeCollection::Feed => "Feed",
            RecipeCollection::Mine => "Mine",
            RecipeCollection::Bookmarked => "Bookmarked",
        }
    }
}

/// Which collection overlay is open, if any. Setting `needs_rebuild` makes
/// the next rebuild pass re-read the store and respawn the overlay.
#[derive(Resource, Default)]
pub struct CollectionViewState {
    pub active: Option<RecipeCollection>,
    pub needs_rebuild: bool,
}

#[derive(Component)]
struct CollectionOverlay;

#[derive(Component)]
struct CloseOverlayButton;

#[derive(Component, Clone, Copy)]
enum EntryAction {
    Load,
    ToggleBookmark,
    Republish,
    Delete,
}

#[derive(Component)]
struct EntryId(u64);

/// Entries of one collection, in feed order.
fn load_collection(
    store: &RecipeStore,
    session: &Session,
    collection: RecipeCollection,
) -> Vec<FeedEntry> {
    let feed = store.load_feed();
    match collection {
        RecipeCollection::Feed => feed,
        RecipeCollection::Mine => feed
            .into_iter()
            .filter(|entry| entry.recipe.uid == session.uid)
            .collect(),
        RecipeCollection::Bookmarked => {
            let bookmarks = store.load_bookmarks(&session.uid);
            feed.into_iter()
                .filter(|entry| bookmarks.contains(&entry.id))
                .collect()
        }
    }
}

fn find_feed_entry(store: &RecipeStore, id: u64) -> Option<FeedEntry> {
    store.load_feed().into_iter().find(|entry| entry.id == id)
}

fn rebuild_collection_view(
    mut commands: Commands,
    mut view: ResMut<CollectionViewState>,
    store: Res<Store>,
    session: Res<Session>,
    overlays: Query<Entity, With<CollectionOverlay>>,
) {
    if !view.needs_rebuild {
        return;
    }
    view.needs_rebuild = false;

    for overlay in &overlays {
        commands.entity(overlay).despawn();
    }
    let Some(collection) = view.active else {
        return;
    };

    let entries = load_collection(&store, &session, collection);
    let bookmarks = store.load_bookmarks(&session.uid);
    spawn_overlay(&mut commands, collection, &entries, &bookmarks, &session.uid);
}

fn spawn_overlay(
    commands: &mut Commands,
    collection: RecipeCollection,
    entries: &[FeedEntry],
    bookmarks: &[u64],
    session_uid: &str,
) {
    commands
        .spawn((
            Name::new("Collection Overlay"),
            CollectionOverlay,
            PointerBlocking,
            Node {
                position_type: PositionType::Absolute,
                left: px(0),
                right: px(0),
                top: px(0),
                bottom: px(0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(OVERLAY_BG),
            GlobalZIndex(200),
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        width: px(520),
                        max_height: percent(80),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(px(SPACING_MD)),
                        row_gap: px(SPACING_MD),
                        ..default()
                    },
                    BackgroundColor(PANEL_BG),
                ))
                .with_children(|dialog| {
                    dialog
                        .spawn(Node {
                            flex_direction: FlexDirection::Row,
                            justify_content: JustifyContent::SpaceBetween,
                            align_items: AlignItems::Center,
                            ..default()
                        })
                        .with_children(|header| {
                            header.spawn((
                                Text::new(format!("{} ({})", collection.label(), entries.len())),
                                TextFont {
                                    font_size: FONT_TITLE,
                                    ..default()
                                },
                                TextColor(TEXT_PRIMARY),
                            ));
                            header.spawn((
                                CloseOverlayButton,
                                Button,
                                Hovered::default(),
                                Node {
                                    padding: UiRect::axes(px(SPACING_MD), px(SPACING_SM)),
                                    ..default()
                                },
                                BackgroundColor(BUTTON_BG),
                                children![(
                                    Text::new("Close"),
                                    TextFont {
                                        font_size: FONT_SM,
                                        ..default()
                                    },
                                    TextColor(TEXT_PRIMARY),
                                )],
                            ));
                        });

                    dialog
                        .spawn((
                            Node {
                                flex_direction: FlexDirection::Column,
                                row_gap: px(SPACING_SM),
                                overflow: Overflow::scroll_y(),
                                ..default()
                            },
                            ScrollPosition::default(),
                        ))
                        .with_children(|list| {
                            if entries.is_empty() {
                                list.spawn((
                                    Text::new("Nothing here yet"),
                                    TextFont {
                                        font_size: FONT_MD,
                                        ..default()
                                    },
                                    TextColor(TEXT_SECONDARY),
                                ));
                            }
                            for entry in entries {
                                spawn_entry_row(
                                    list,
                                    entry,
                                    bookmarks.contains(&entry.id),
                                    entry.recipe.uid == session_uid,
                                );
                            }
                        });
                });
        });
}

fn spawn_entry_row(
    list: &mut ChildSpawnerCommands,
    entry: &FeedEntry,
    bookmarked: bool,
    own: bool,
) {
    let recipe = &entry.recipe;
    let headline = format!(
        "{} {} cm, {} toppings",
        recipe.base_type.label(),
        recipe.base_size.centimeters(),
        recipe.toppings.len()
    );
    let byline = format!("{}  |  {}", recipe.author, recipe.created_at);
    list.spawn((
        Node {
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(px(SPACING_SM)),
            row_gap: px(SPACING_SM),
            ..default()
        },
        BackgroundColor(ROW_BG),
    ))
    .with_children(|row| {
        row.spawn((
            Text::new(headline),
            TextFont {
                font_size: FONT_MD,
                ..default()
            },
            TextColor(TEXT_PRIMARY),
        ));
        row.spawn((
            Text::new(byline),
            TextFont {
                font_size: FONT_SM,
                ..default()
            },
            TextColor(TEXT_SECONDARY),
        ));
        row.spawn(Node {
            flex_direction: FlexDirection::Row,
            column_gap: px(SPACING_SM),
            ..default()
        })
        .with_children(|actions| {
            actions.spawn(entry_button(EntryAction::Load, entry.id, "Load", BUTTON_BG));
            let bookmark_label = if bookmarked { "Unbookmark" } else { "Bookmark" };
            actions.spawn(entry_button(
                EntryAction::ToggleBookmark,
                entry.id,
                bookmark_label,
                BUTTON_BG,
            ));
            actions.spawn(entry_button(
                EntryAction::Republish,
                entry.id,
                "Republish",
                BUTTON_BG,
            ));
            if own {
                actions.spawn(entry_button(EntryAction::Delete, entry.id, "Delete", ACCENT_BG));
            }
        });
    });
}

fn entry_button(action: EntryAction, id: u64, label: &str, background: Color) -> impl Bundle {
    (
        action,
        EntryId(id),
        Button,
        Hovered::default(),
        Node {
            padding: UiRect::axes(px(SPACING_MD), px(SPACING_SM)),
            ..default()
        },
        BackgroundColor(background),
        children![(
            Text::new(label),
            TextFont {
                font_size: FONT_SM,
                ..default()
            },
            TextColor(TEXT_PRIMARY),
        )],
    )
}

fn handle_entry_actions(
    mut commands: Commands,
    store: Res<Store>,
    session: Res<Session>,
    mut view: ResMut<CollectionViewState>,
    buttons: Query<(&Interaction, &EntryAction, &EntryId), Changed<Interaction>>,
) {
    for (interaction, action, id) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            EntryAction::Load => {
                let Some(entry) = find_feed_entry(&store, id.0) else {
                    warn!("feed entry {} has gone missing", id.0);
                    continue;
                };
                commands.trigger(ApplyRecipe(entry.recipe));
                view.active = None;
                view.needs_rebuild = true;
            }
            EntryAction::ToggleBookmark => {
                match store.toggle_bookmark(&session.uid, id.0) {
                    Ok(true) => info!("bookmarked entry {}", id.0),
                    Ok(false) => info!("removed bookmark for entry {}", id.0),
                    Err(err) => error!("failed to toggle bookmark: {err}"),
                }
                view.needs_rebuild = true;
            }
            EntryAction::Republish => {
                let Some(entry) = find_feed_entry(&store, id.0) else {
                    warn!("feed entry {} has gone missing", id.0);
                    continue;
                };
                let fresh = FeedEntry {
                    id: epoch_millis(),
                    recipe: Recipe {
                        created_at: utc_timestamp(),
                        ..entry.recipe
                    },
                };
                match store.prepend_feed(fresh) {
                    Ok(()) => info!("republished entry {}", id.0),
                    Err(err) => error!("failed to republish entry: {err}"),
                }
                view.needs_rebuild = true;
            }
            EntryAction::Delete => {
                // Only the author may remove a feed entry.
                let Some(entry) = find_feed_entry(&store, id.0) else {
                    continue;
                };
                if entry.recipe.uid != session.uid {
                    continue;
                }
                match store.delete_feed_entry(id.0) {
                    Ok(true) => info!("deleted feed entry {}", id.0),
                    Ok(false) => {}
                    Err(err) => error!("failed to delete feed entry: {err}"),
                }
                view.needs_rebuild = true;
            }
        }
    }
}

fn handle_overlay_close(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut view: ResMut<CollectionViewState>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<CloseOverlayButton>)>,
) {
    let close_clicked = buttons
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed);
    if view.active.is_some() && (close_clicked || keyboard.just_pressed(KeyCode::Escape)) {
        view.active = None;
        view.needs_rebuild = true;
    }
}

// ---------------------------------------------------------------------------
// Wheel scrolling for the overlay list
// ---------------------------------------------------------------------------

const SCROLL_LINE_HEIGHT: f32 = 21.0;

#[derive(EntityEvent, Debug)]
#[entity_event(propagate, auto_propagate)]
struct Scroll {
    entity: Entity,
    delta: Vec2,
}

fn send_scroll_events(
    mut mouse_wheel: MessageReader<MouseWheel>,
    hover_map: Res<HoverMap>,
    mut commands: Commands,
) {
    for event in mouse_wheel.read() {
        let mut delta = -Vec2::new(event.x, event.y);
        if event.unit == MouseScrollUnit::Line {
            delta *= SCROLL_LINE_HEIGHT;
        }
        for pointer_map in hover_map.values() {
            for entity in pointer_map.keys().copied() {
                commands.trigger(Scroll { entity, delta });
            }
        }
    }
}

fn on_scroll(
    mut scroll: On<Scroll>,
    mut query: Query<(&mut ScrollPosition, &Node, &ComputedNode)>,
) {
    let Ok((mut scroll_position, node, computed)) = query.get_mut(scroll.entity) else {
        return;
    };
    let max_offset = (computed.content_size() - computed.size()) * computed.inverse_scale_factor();

    if node.overflow.y == OverflowAxis::Scroll && scroll.delta.y != 0.0 {
        let at_limit = if scroll.delta.y > 0.0 {
            scroll_position.y >= max_offset.y
        } else {
            scroll_position.y <= 0.0
        };
        if !at_limit {
            scroll_position.y += scroll.delta.y;
            scroll.delta.y = 0.0;
        }
    }

    if scroll.delta == Vec2::ZERO {
        scroll.propagate(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzaforge_recipe::{BaseSize, BaseType};
    use tempfile::TempDir;

    fn entry(id: u64, uid: &str) -> FeedEntry {
        FeedEntry {
            id,
            recipe: Recipe {
                author: uid.to_owned(),
                uid: uid.to_owned(),
                base_type: BaseType::Medium,
                base_size: BaseSize::Cm33,
                cheese_amount: 250,
                toppings: Vec::new(),
                created_at: "2026-08-23T12:00:00Z".to_owned(),
            },
        }
    }

    fn session(uid: &str) -> Session {
        Session {
            uid: uid.to_owned(),
            display_name: uid.to_owned(),
        }
    }

    fn ids(entries: &[FeedEntry]) -> Vec<u64> {
        entries.iter().map(|entry| entry.id).collect()
    }

    #[test]
    fn feed_lists_everything_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = RecipeStore::with_base_dir(dir.path());
        store.prepend_feed(entry(1, "ada")).unwrap();
        store.prepend_feed(entry(2, "bob")).unwrap();
        store.prepend_feed(entry(3, "ada")).unwrap();

        let feed = load_collection(&store, &session("ada"), RecipeCollection::Feed);
        assert_eq!(ids(&feed), vec![3, 2, 1]);
    }

    #[test]
    fn mine_filters_the_feed_by_uid() {
        let dir = TempDir::new().unwrap();
        let store = RecipeStore::with_base_dir(dir.path());
        store.prepend_feed(entry(1, "ada")).unwrap();
        store.prepend_feed(entry(2, "bob")).unwrap();
        store.prepend_feed(entry(3, "ada")).unwrap();

        let mine = load_collection(&store, &session("ada"), RecipeCollection::Mine);
        assert_eq!(ids(&mine), vec![3, 1]);
        let theirs = load_collection(&store, &session("bob"), RecipeCollection::Mine);
        assert_eq!(ids(&theirs), vec![2]);
    }

    #[test]
    fn bookmarked_keeps_feed_order() {
        let dir = TempDir::new().unwrap();
        let store = RecipeStore::with_base_dir(dir.path());
        store.prepend_feed(entry(1, "ada")).unwrap();
        store.prepend_feed(entry(2, "bob")).unwrap();
        store.prepend_feed(entry(3, "ada")).unwrap();
        // Bookmark oldest first; the view still follows feed order.
        store.toggle_bookmark("ada", 1).unwrap();
        store.toggle_bookmark("ada", 3).unwrap();

        let bookmarked = load_collection(&store, &session("ada"), RecipeCollection::Bookmarked);
        assert_eq!(ids(&bookmarked), vec![3, 1]);
    }

    #[test]
    fn bookmarks_are_per_session_user() {
        let dir = TempDir::new().unwrap();
        let store = RecipeStore::with_base_dir(dir.path());
        store.prepend_feed(entry(1, "ada")).unwrap();
        store.toggle_bookmark("ada", 1).unwrap();

        let theirs = load_collection(&store, &session("bob"), RecipeCollection::Bookmarked);
        assert!(theirs.is_empty());
    }
}
