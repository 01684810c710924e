use std::collections::HashSet;

use bevy::prelude::*;
use constants::board::{AGENT_REST_HEIGHT, AGENT_SIZE};
use constants::render_settings::{AGENT_BOB_AMPLITUDE, AGENT_BOB_SPEED, AGENT_SPIN_SPEED};

use super::handles::SceneHandles;
use super::labels::ScreenAnchor;
use super::{AgentNameTag, AgentToken};
use crate::board::geometry::cell_to_world;
use crate::tools::interaction::BoardEditor;

/// Spawns and despawns agent cubes (with their name tags) to match the
/// registry, and highlights the agent open in the info dialog.
pub fn sync_agent_tokens(
    mut commands: Commands,
    editor: Res<BoardEditor>,
    handles: Res<SceneHandles>,
    mut tokens: Query<(Entity, &AgentToken, &mut MeshMaterial3d<StandardMaterial>)>,
    tags: Query<(Entity, &AgentNameTag)>,
) {
    if !editor.is_changed() {
        return;
    }

    let size = editor.config().size;
    let selected = editor.agent_info().map(|a| a.id.as_str());
    let mut present = HashSet::new();

    for (entity, token, mut material) in &mut tokens {
        if editor.agents().get(&token.id).is_none() {
            commands.entity(entity).despawn();
            continue;
        }
        present.insert(token.id.clone());

        let handle = if selected == Some(token.id.as_str()) {
            &handles.agent_selected
        } else {
            &handles.agent
        };
        if material.0 != *handle {
            material.0 = handle.clone();
        }
    }

    for (entity, tag) in &tags {
        if editor.agents().get(&tag.0).is_none() {
            commands.entity(entity).despawn();
        }
    }

    for agent in editor.agents().iter() {
        if present.contains(&agent.id) {
            continue;
        }
        let pos = cell_to_world(agent.cell(), size);
        let rest = Vec3::new(pos.x, AGENT_REST_HEIGHT, pos.y);

        commands.spawn((
            AgentToken {
                id: agent.id.clone(),
                rest,
            },
            Name::new(agent.id.clone()),
            Mesh3d(handles.agent_mesh.clone()),
            MeshMaterial3d(handles.agent.clone()),
            Transform::from_translation(rest),
        ));
        commands.spawn((
            AgentNameTag(agent.id.clone()),
            ScreenAnchor(rest + Vec3::Y * (AGENT_SIZE + 0.3)),
            Text::new(agent.kind.display_name()),
            TextFont {
                font_size: 13.0,
                ..default()
            },
            TextColor(Color::WHITE),
            BackgroundColor(Color::srgba(0.10, 0.11, 0.13, 0.75)),
            Node {
                position_type: PositionType::Absolute,
                padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
                ..default()
            },
        ));
    }
}

/// Idle bob and slow spin.
pub fn animate_agents(time: Res<Time>, mut tokens: Query<(&AgentToken, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (token, mut transform) in &mut tokens {
        let phase = token.rest.x + token.rest.z;
        transform.translation.y =
            token.rest.y + (t * AGENT_BOB_SPEED + phase).sin() * AGENT_BOB_AMPLITUDE;
        transform.rotate_y(AGENT_SPIN_SPEED * time.delta_secs());
    }
}
