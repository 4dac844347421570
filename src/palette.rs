//! The builder side panel: ingredient palette, base parameter controls,
//! snap toggle, cheese stepper, and recipe action buttons.

use bevy::picking::hover::Hovered;
use bevy::prelude::*;
use pizzaforge_recipe::{
    Archetype, ArchetypeRegistry, BaseParams, BaseSize, BaseType, CHEESE_MAX, CHEESE_MIN,
    CHEESE_STEP,
};

use crate::collections::{CollectionViewState, RecipeCollection};
use crate::placement::PendingDrop;
use crate::recipe_io::{ClearToppings, PublishRecipe, SaveRecipeToProfile};
use crate::snapshot::TakeSnapshot;
use crate::status_bar::status_bar;
use crate::theme::{
    ACCENT_BG, ACTIVE_BG, BUTTON_BG, FONT_MD, FONT_SM, FONT_TITLE, PANEL_BG, PANEL_WIDTH, ROW_BG,
    SPACING_MD, SPACING_SM, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::{BuilderActions, PointerBlocking, SnapToRings};

pub struct PalettePlugin;

impl Plugin for PalettePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_panel)
            .add_systems(
                Update,
                (
                    handle_ingredient_press,
                    handle_base_type_buttons,
                    handle_base_size_buttons,
                    handle_cheese_steppers,
                    handle_snap_toggle,
                    handle_panel_actions,
                    handle_collection_buttons,
                )
                    .in_set(BuilderActions),
            )
            .add_systems(
                Update,
                (
                    hover_ingredient_rows,
                    sync_cheese_label,
                    sync_snap_toggle,
                    sync_base_buttons,
                ),
            );
    }
}

/// Palette row for one archetype. Pressing it arms the drop payload.
#[derive(Component)]
pub struct IngredientRow {
    pub archetype_id: String,
}

#[derive(Component)]
pub struct BaseTypeButton(pub BaseType);

#[derive(Component)]
pub struct BaseSizeButton(pub BaseSize);

#[derive(Component)]
pub struct SnapToggleButton;

#[derive(Component)]
pub struct SnapToggleLabel;

/// Signed cheese amount step.
#[derive(Component)]
pub struct CheeseStepButton(pub i32);

#[derive(Component)]
pub struct CheeseAmountLabel;

#[derive(Component)]
pub enum PanelAction {
    Snapshot,
    Publish,
    SaveToProfile,
    ClearToppings,
}

#[derive(Component)]
pub struct CollectionButton(pub RecipeCollection);

fn spawn_panel(mut commands: Commands, registry: Res<ArchetypeRegistry>, params: Res<BaseParams>) {
    commands
        .spawn((
            Name::new("UI Root"),
            Node {
                width: percent(100),
                height: percent(100),
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn(Node {
                flex_grow: 1.0,
                flex_direction: FlexDirection::Row,
                ..default()
            })
            .with_children(|content| {
                content
                    .spawn((
                        Name::new("Builder Panel"),
                        PointerBlocking,
                        Node {
                            width: px(PANEL_WIDTH),
                            height: percent(100),
                            flex_direction: FlexDirection::Column,
                            padding: UiRect::all(px(SPACING_MD)),
                            row_gap: px(SPACING_SM),
                            ..default()
                        },
                        BackgroundColor(PANEL_BG),
                    ))
                    .with_children(|panel| {
                        panel.spawn((
                            Text::new("PizzaForge"),
                            TextFont {
                                font_size: FONT_TITLE,
                                ..default()
                            },
                            TextColor(TEXT_PRIMARY),
                        ));

                        panel.spawn(section_label("Ingredients"));
                        for archetype in registry.iter() {
                            panel.spawn(ingredient_row(archetype));
                        }

                        panel.spawn(section_label("Base"));
                        panel
                            .spawn(Node {
                                flex_direction: FlexDirection::Row,
                                column_gap: px(SPACING_SM),
                                ..default()
                            })
                            .with_children(|row| {
                                for base_type in BaseType::ALL {
                                    row.spawn(row_button(
                                        BaseTypeButton(base_type),
                                        base_type.label(),
                                        BUTTON_BG,
                                    ));
                                }
                            });

                        panel.spawn(section_label("Size"));
                        panel
                            .spawn(Node {
                                flex_direction: FlexDirection::Row,
                                column_gap: px(SPACING_SM),
                                ..default()
                            })
                            .with_children(|row| {
                                for base_size in BaseSize::ALL {
                                    row.spawn(row_button(
                                        BaseSizeButton(base_size),
                                        format!("{} cm", base_size.centimeters()),
                                        BUTTON_BG,
                                    ));
                                }
                            });

                        panel.spawn(section_label("Placement"));
                        panel.spawn((
                            SnapToggleButton,
                            Button,
                            Hovered::default(),
                            Node {
                                padding: UiRect::axes(px(SPACING_MD), px(SPACING_SM)),
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                ..default()
                            },
                            BackgroundColor(ACTIVE_BG),
                            children![(
                                SnapToggleLabel,
                                Text::new("Snap to rings: On"),
                                TextFont {
                                    font_size: FONT_MD,
                                    ..default()
                                },
                                TextColor(TEXT_PRIMARY),
                            )],
                        ));

                        panel.spawn(section_label("Cheese"));
                        panel
                            .spawn(Node {
                                flex_direction: FlexDirection::Row,
                                column_gap: px(SPACING_SM),
                                align_items: AlignItems::Center,
                                ..default()
                            })
                            .with_children(|row| {
                                row.spawn(row_button(
                                    CheeseStepButton(-(CHEESE_STEP as i32)),
                                    "-",
                                    BUTTON_BG,
                                ));
                                row.spawn((
                                    CheeseAmountLabel,
                                    Text::new(format!("{} blobs", params.cheese_amount)),
                                    TextFont {
                                        font_size: FONT_MD,
                                        ..default()
                                    },
                                    TextColor(TEXT_PRIMARY),
                                ));
                                row.spawn(row_button(
                                    CheeseStepButton(CHEESE_STEP as i32),
                                    "+",
                                    BUTTON_BG,
                                ));
                            });

                        panel.spawn(section_label("Recipe"));
                        panel.spawn(panel_button(PanelAction::Snapshot, "Snapshot", BUTTON_BG));
                        panel.spawn(panel_button(PanelAction::Publish, "Publish to feed", ACCENT_BG));
                        panel.spawn(panel_button(
                            PanelAction::SaveToProfile,
                            "Save to profile",
                            ACCENT_BG,
                        ));
                        panel.spawn(panel_button(
                            PanelAction::ClearToppings,
                            "Remove toppings",
                            BUTTON_BG,
                        ));

                        panel.spawn(section_label("Collections"));
                        panel
                            .spawn(Node {
                                flex_direction: FlexDirection::Row,
                                column_gap: px(SPACING_SM),
                                ..default()
                            })
                            .with_children(|row| {
                                for collection in RecipeCollection::ALL {
                                    row.spawn(row_button(
                                        CollectionButton(collection),
                                        collection.label(),
                                        BUTTON_BG,
                                    ));
                                }
                            });
                    });
            });

            root.spawn(status_bar());
        });
}

fn section_label(text: &str) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: FONT_SM,
            ..default()
        },
        TextColor(TEXT_SECONDARY),
        Node {
            margin: UiRect::top(px(SPACING_MD)),
            ..default()
        },
    )
}

fn ingredient_row(archetype: &Archetype) -> impl Bundle {
    (
        IngredientRow {
            archetype_id: archetype.id.clone(),
        },
        Button,
        Hovered::default(),
        Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: px(SPACING_MD),
            padding: UiRect::all(px(SPACING_SM)),
            ..default()
        },
        BackgroundColor(ROW_BG),
        children![
            (
                Node {
                    width: px(14),
                    height: px(14),
                    ..default()
                },
                BackgroundColor(archetype.color()),
            ),
            (
                Text::new(archetype.name.clone()),
                TextFont {
                    font_size: FONT_MD,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
            ),
        ],
    )
}

/// Full-width button for the panel column.
fn panel_button(marker: impl Bundle, label: impl Into<String>, background: Color) -> impl Bundle {
    (
        marker,
        Button,
        Hovered::default(),
        Node {
            padding: UiRect::axes(px(SPACING_MD), px(SPACING_SM)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(background),
        children![(
            Text::new(label),
            TextFont {
                font_size: FONT_MD,
                ..default()
            },
            TextColor(TEXT_PRIMARY),
        )],
    )
}

/// Button that shares a row with siblings and splits the width evenly.
fn row_button(marker: impl Bundle, label: impl Into<String>, background: Color) -> impl Bundle {
    (
        marker,
        Button,
        Hovered::default(),
        Node {
            padding: UiRect::axes(px(SPACING_MD), px(SPACING_SM)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            flex_grow: 1.0,
            flex_basis: px(0),
            ..default()
        },
        BackgroundColor(background),
        children![(
            Text::new(label),
            TextFont {
                font_size: FONT_MD,
                ..default()
            },
            TextColor(TEXT_PRIMARY),
        )],
    )
}

fn handle_ingredient_press(
    registry: Res<ArchetypeRegistry>,
    mut pending: ResMut<PendingDrop>,
    rows: Query<(&Interaction, &IngredientRow), Changed<Interaction>>,
) {
    for (interaction, row) in &rows {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(archetype) = registry.get(&row.archetype_id) else {
            continue;
        };
        match serde_json::to_string(archetype) {
            Ok(payload) => pending.payload = Some(payload),
            Err(err) => warn!("failed to serialize drop payload: {err}"),
        }
    }
}

fn handle_base_type_buttons(
    mut params: ResMut<BaseParams>,
    buttons: Query<(&Interaction, &BaseTypeButton), Changed<Interaction>>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed && params.base_type != button.0 {
            params.base_type = button.0;
        }
    }
}

fn handle_base_size_buttons(
    mut params: ResMut<BaseParams>,
    buttons: Query<(&Interaction, &BaseSizeButton), Changed<Interaction>>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed && params.base_size != button.0 {
            params.base_size = button.0;
        }
    }
}

fn handle_cheese_steppers(
    mut params: ResMut<BaseParams>,
    buttons: Query<(&Interaction, &CheeseStepButton), Changed<Interaction>>,
) {
    for (interaction, step) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let next = (i64::from(params.cheese_amount) + i64::from(step.0))
            .clamp(i64::from(CHEESE_MIN), i64::from(CHEESE_MAX)) as u32;
        if params.cheese_amount != next {
            params.cheese_amount = next;
        }
    }
}

fn handle_snap_toggle(
    mut snap: ResMut<SnapToRings>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<SnapToggleButton>)>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            snap.0 = !snap.0;
        }
    }
}

fn handle_panel_actions(
    mut commands: Commands,
    buttons: Query<(&Interaction, &PanelAction), Changed<Interaction>>,
) {
    for (interaction, action) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            PanelAction::Snapshot => commands.trigger(TakeSnapshot),
            PanelAction::Publish => commands.trigger(PublishRecipe),
            PanelAction::SaveToProfile => commands.trigger(SaveRecipeToProfile),
            PanelAction::ClearToppings => commands.trigger(ClearToppings),
        }
    }
}

fn handle_collection_buttons(
    mut view: ResMut<CollectionViewState>,
    buttons: Query<(&Interaction, &CollectionButton), Changed<Interaction>>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        view.active = Some(button.0);
        view.needs_rebuild = true;
    }
}

fn hover_ingredient_rows(
    mut rows: Query<(&Hovered, &mut BackgroundColor), (Changed<Hovered>, With<IngredientRow>)>,
) {
    for (hovered, mut background) in &mut rows {
        background.0 = if hovered.get() { ACTIVE_BG } else { ROW_BG };
    }
}

fn sync_cheese_label(
    params: Res<BaseParams>,
    mut labels: Query<&mut Text, With<CheeseAmountLabel>>,
) {
    if !params.is_changed() {
        return;
    }
    for mut text in &mut labels {
        let new_text = format!("{} blobs", params.cheese_amount);
        if text.0 != new_text {
            text.0 = new_text;
        }
    }
}

fn sync_snap_toggle(
    snap: Res<SnapToRings>,
    mut labels: Query<&mut Text, With<SnapToggleLabel>>,
    mut buttons: Query<&mut BackgroundColor, With<SnapToggleButton>>,
) {
    if !snap.is_changed() {
        return;
    }
    let state = if snap.0 { "On" } else { "Off" };
    for mut text in &mut labels {
        text.0 = format!("Snap to rings: {state}");
    }
    let background = if snap.0 { ACTIVE_BG } else { BUTTON_BG };
    for mut bg in &mut buttons {
        bg.0 = background;
    }
}

fn sync_base_buttons(
    params: Res<BaseParams>,
    mut type_buttons: Query<(&BaseTypeButton, &mut BackgroundColor), Without<BaseSizeButton>>,
    mut size_buttons: Query<(&BaseSizeButton, &mut BackgroundColor), Without<BaseTypeButton>>,
) {
    if !params.is_changed() {
        return;
    }
    for (button, mut bg) in &mut type_buttons {
        bg.0 = if params.base_type == button.0 {
            ACTIVE_BG
        } else {
            BUTTON_BG
        };
    }
    for (button, mut bg) in &mut size_buttons {
        bg.0 = if params.base_size == button.0 {
            ACTIVE_BG
        } else {
            BUTTON_BG
        };
    }
}
