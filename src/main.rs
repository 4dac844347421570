use bevy::prelude::*;
use pizzaforge::BuilderPlugin;

fn main() -> AppExit {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(BuilderPlugin)
        .run()
}
