use bevy::prelude::*;
use constants::board::{AGENT_SIZE, OBSTACLE_SIZE, TILE_HEIGHT, TILE_SPAN};
use constants::render_settings::{
    AGENT_BLUE_COLOR, AGENT_BLUE_EMISSIVE, AGENT_SELECTED_EMISSIVE, AMBIENT_BRIGHTNESS,
    HIGHLIGHT_REMOVE, OBSTACLE_COLOR, POINT_LIGHT_INTENSITY,
};

/// Meshes and materials shared by every tile, obstacle and agent.
/// Tiles get their own material on top since each carries its own colour.
#[derive(Resource)]
pub struct SceneHandles {
    pub tile_mesh: Handle<Mesh>,
    pub obstacle_mesh: Handle<Mesh>,
    pub agent_mesh: Handle<Mesh>,
    pub obstacle: Handle<StandardMaterial>,
    pub obstacle_marked: Handle<StandardMaterial>,
    pub agent: Handle<StandardMaterial>,
    pub agent_selected: Handle<StandardMaterial>,
}

impl FromWorld for SceneHandles {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        let tile_mesh = meshes.add(Cuboid::new(TILE_SPAN, TILE_HEIGHT, TILE_SPAN));
        let obstacle_mesh = meshes.add(Cuboid::from_length(OBSTACLE_SIZE));
        let agent_mesh = meshes.add(Cuboid::from_length(AGENT_SIZE));

        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        let obstacle = materials.add(StandardMaterial {
            base_color: OBSTACLE_COLOR,
            perceptual_roughness: 0.9,
            ..default()
        });
        let obstacle_marked = materials.add(StandardMaterial {
            base_color: OBSTACLE_COLOR,
            emissive: HIGHLIGHT_REMOVE,
            perceptual_roughness: 0.9,
            ..default()
        });
        let agent = materials.add(StandardMaterial {
            base_color: AGENT_BLUE_COLOR,
            emissive: AGENT_BLUE_EMISSIVE,
            metallic: 0.3,
            perceptual_roughness: 0.4,
            ..default()
        });
        let agent_selected = materials.add(StandardMaterial {
            base_color: AGENT_BLUE_COLOR,
            emissive: AGENT_SELECTED_EMISSIVE,
            metallic: 0.3,
            perceptual_roughness: 0.4,
            ..default()
        });

        Self {
            tile_mesh,
            obstacle_mesh,
            agent_mesh,
            obstacle,
            obstacle_marked,
            agent,
            agent_selected,
        }
    }
}

pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.spawn((
        PointLight {
            intensity: POINT_LIGHT_INTENSITY,
            range: 100.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0),
    ));
}
