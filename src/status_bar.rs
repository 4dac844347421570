use bevy::prelude::*;
use pizzaforge_recipe::{BaseParams, Topping};

use crate::scene::CheeseLayer;
use crate::selection::{Selected, Selection};
use crate::session::Session;
use crate::theme::{FONT_SM, SPACING_MD, STATUS_BAR_BG, STATUS_BAR_HEIGHT, TEXT_SECONDARY};
use crate::{PointerBlocking, SnapToRings};

pub struct StatusBarPlugin;

impl Plugin for StatusBarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (update_status_left, update_status_center, update_status_right),
        );
    }
}

#[derive(Component)]
pub struct StatusBarLeft;

#[derive(Component)]
pub struct StatusBarCenter;

#[derive(Component)]
pub struct StatusBarRight;

pub fn status_bar() -> impl Bundle {
    (
        Name::new("Status Bar"),
        PointerBlocking,
        Node {
            width: percent(100),
            height: px(STATUS_BAR_HEIGHT),
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            padding: UiRect::horizontal(px(SPACING_MD)),
            column_gap: px(SPACING_MD),
            ..default()
        },
        BackgroundColor(STATUS_BAR_BG),
        children![
            (
                StatusBarLeft,
                Text::new("No selection"),
                TextFont {
                    font_size: FONT_SM,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ),
            (
                StatusBarCenter,
                Text::new(""),
                TextFont {
                    font_size: FONT_SM,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ),
            (
                StatusBarRight,
                Text::new(""),
                TextFont {
                    font_size: FONT_SM,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ),
        ],
    )
}

fn update_status_left(
    selection: Res<Selection>,
    selected: Query<(Option<&Name>, &Transform), With<Selected>>,
    mut text_query: Query<&mut Text, With<StatusBarLeft>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    match selection.entity {
        Some(entity) => {
            // Unconditional refresh keeps the position live while dragging.
            if let Ok((name, transform)) = selected.get(entity) {
                let name = name
                    .map(|n| n.as_str().to_string())
                    .unwrap_or_else(|| format!("{entity}"));
                let p = transform.translation;
                let new_text = format!("{name}  Pos: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
                if text.0 != new_text {
                    text.0 = new_text;
                }
            }
        }
        None => {
            if selection.is_changed() {
                text.0 = "No selection".to_string();
            }
        }
    }
}

fn update_status_center(
    params: Res<BaseParams>,
    toppings: Query<(), With<Topping>>,
    cheese: Query<&Children, With<CheeseLayer>>,
    mut text_query: Query<&mut Text, With<StatusBarCenter>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    let topping_count = toppings.iter().count();
    let blob_count = cheese.single().map(|children| children.len()).unwrap_or(0);

    let new_text = format!(
        "Toppings: {topping_count}  |  Cheese: {blob_count} blobs  |  Base: {} {} cm",
        params.base_type.label(),
        params.base_size.centimeters()
    );
    if text.0 != new_text {
        text.0 = new_text;
    }
}

fn update_status_right(
    snap: Res<SnapToRings>,
    session: Res<Session>,
    mut text_query: Query<&mut Text, With<StatusBarRight>>,
) {
    if !snap.is_changed() && !session.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    let snap_str = if snap.0 { "Snap: On" } else { "Snap: Off" };
    text.0 = format!("{snap_str}  |  {}", session.display_name);
}
