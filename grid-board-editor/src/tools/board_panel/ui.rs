use bevy::prelude::*;
use constants::render_settings::COLOR_SWATCHES;

use super::state::*;
use crate::tools::interaction::BoardEditor;

pub const BUTTON_BG: Color = Color::srgb(0.22, 0.24, 0.28);
pub const BUTTON_HOVER: Color = Color::srgb(0.26, 0.28, 0.32);
pub const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
pub const BUTTON_ACTIVE: Color = Color::srgb(0.310, 0.275, 0.898);
pub const BUTTON_DANGER: Color = Color::srgb(0.28, 0.10, 0.10);
pub const BUTTON_INERT: Color = Color::srgb(0.16, 0.17, 0.19);
const SWATCH_BORDER: Color = Color::srgba(0.0, 0.0, 0.0, 0.25);
const SWATCH_BORDER_SELECTED: Color = Color::WHITE;

const CONTROLS_GUIDE: &[&str] = &[
    "Left click: add / remove obstacle",
    "Left drag: fill or clear an area",
    "Right drag: orbit camera",
    "Middle drag: pan",
    "Wheel: zoom",
    "Enter / Esc: confirm / cancel",
    "B: blue agent  L: labels  [ ]: size",
];

pub fn swatch_color(hex: &str) -> Color {
    Srgba::hex(hex).map(Color::from).unwrap_or(Color::WHITE)
}

/// Resting background of a panel button, given the editor state.
pub fn base_color(action: PanelAction, editor: &BoardEditor) -> Color {
    match action {
        PanelAction::ToggleBlueAgent if editor.placement().is_some() => BUTTON_ACTIVE,
        PanelAction::ToggleLabels if editor.config().show_labels => BUTTON_ACTIVE,
        PanelAction::RemoveAllAgents if editor.agents().is_empty() => BUTTON_INERT,
        PanelAction::RemoveAllAgents => BUTTON_DANGER,
        PanelAction::SetColor(_, hex) => swatch_color(hex),
        PanelAction::DialogPrimary if editor.agent_info().is_some() => BUTTON_DANGER,
        PanelAction::DialogPrimary => BUTTON_ACTIVE,
        _ => BUTTON_BG,
    }
}

fn is_selected_swatch(action: PanelAction, editor: &BoardEditor) -> bool {
    let PanelAction::SetColor(slot, hex) = action else {
        return false;
    };
    let current = match slot {
        ColorSlot::Primary => editor.config().color1,
        ColorSlot::Secondary => editor.config().color2,
    };
    Srgba::hex(hex).is_ok_and(|c| c.to_hex() == current.to_hex())
}

fn chevron(side: PanelSide, collapsed: bool) -> &'static str {
    match (side, collapsed) {
        (PanelSide::Settings, false) | (PanelSide::Agents, true) => "<",
        (PanelSide::Settings, true) | (PanelSide::Agents, false) => ">",
    }
}

fn spawn_button(
    parent: &mut ChildSpawnerCommands,
    action: PanelAction,
    label: &str,
    width: Val,
    extra: impl Bundle,
) {
    parent
        .spawn((
            action,
            Button,
            Name::new(format!("{action:?}")),
            BackgroundColor(BUTTON_BG),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                width,
                height: Val::Px(32.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                padding: UiRect::horizontal(Val::Px(8.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont { font_size: 15.0, ..default() },
                TextColor(Color::WHITE),
                extra,
            ));
        });
}

fn section_label(parent: &mut ChildSpawnerCommands, text: &str) {
    parent.spawn((
        Text::new(text),
        TextFont { font_size: 13.0, ..default() },
        TextColor(Color::srgb(0.65, 0.68, 0.74)),
    ));
}

fn spawn_panel(
    commands: &mut Commands,
    side: PanelSide,
    title: &str,
    state: &BoardPanelUiState,
    build_body: impl FnOnce(&mut ChildSpawnerCommands),
) {
    let collapsed = state.collapsed(side);
    let width = if collapsed { state.closed_width } else { state.open_width };
    let (left, right) = match side {
        PanelSide::Settings => (Val::Px(0.0), Val::Auto),
        PanelSide::Agents => (Val::Auto, Val::Px(0.0)),
    };

    commands
        .spawn((
            PanelRoot(side),
            Name::new(format!("{side:?}Panel")),
            // Lets the pointer-capture check see the panel under the cursor.
            Interaction::default(),
            BackgroundColor(Color::srgb(0.10, 0.11, 0.13)),
            Node {
                width: Val::Px(width),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                left,
                right,
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Name::new("Header"),
                    BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(if collapsed { 4.0 } else { 12.0 })),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::SpaceBetween,
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        PanelTitle(side),
                        Text::new(title),
                        TextFont { font_size: 18.0, ..default() },
                        TextColor(Color::WHITE),
                        Node {
                            display: if collapsed { Display::None } else { Display::Flex },
                            ..default()
                        },
                    ));
                    spawn_button(
                        header,
                        PanelAction::ToggleCollapse(side),
                        chevron(side, collapsed),
                        Val::Px(24.0),
                        CollapseLabel(side),
                    );
                });

            parent
                .spawn((
                    PanelBody(side),
                    Name::new("Body"),
                    BackgroundColor(Color::srgb(0.12, 0.13, 0.15)),
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                        row_gap: Val::Px(8.0),
                        display: if collapsed { Display::None } else { Display::Flex },
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(build_body);
        });
}

fn swatch_row(body: &mut ChildSpawnerCommands, slot: ColorSlot) {
    body.spawn(Node {
        display: Display::Flex,
        flex_wrap: FlexWrap::Wrap,
        column_gap: Val::Px(6.0),
        row_gap: Val::Px(6.0),
        ..default()
    })
    .with_children(|row| {
        for &hex in COLOR_SWATCHES {
            row.spawn((
                PanelAction::SetColor(slot, hex),
                Button,
                Name::new(format!("Swatch {hex}")),
                BackgroundColor(swatch_color(hex)),
                BorderColor(SWATCH_BORDER),
                Node {
                    width: Val::Px(24.0),
                    height: Val::Px(24.0),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
            ));
        }
    });
}

pub fn spawn_board_panels(
    mut commands: Commands,
    state: Res<BoardPanelUiState>,
    editor: Res<BoardEditor>,
) {
    let size = editor.config().size;

    spawn_panel(&mut commands, PanelSide::Settings, "Board", &state, |body| {
        section_label(body, "Board size");
        body.spawn(Node {
            display: Display::Flex,
            align_items: AlignItems::Center,
            column_gap: Val::Px(8.0),
            ..default()
        })
        .with_children(|row| {
            spawn_button(row, PanelAction::ResizeStep(-1), "-", Val::Px(32.0), ());
            row.spawn((
                SizeLabel,
                Text::new(format!("{size} x {size}")),
                TextFont { font_size: 16.0, ..default() },
                TextColor(Color::WHITE),
            ));
            spawn_button(row, PanelAction::ResizeStep(1), "+", Val::Px(32.0), ());
        });
        body.spawn((
            Text::new("Resizing clears all obstacles and agents."),
            TextFont { font_size: 12.0, ..default() },
            TextColor(Color::srgb(0.95, 0.65, 0.30)),
        ));

        spawn_button(
            body,
            PanelAction::ToggleLabels,
            "Labels: Off",
            Val::Percent(100.0),
            LabelsToggleLabel,
        );

        section_label(body, "Tile colour 1");
        swatch_row(body, ColorSlot::Primary);
        section_label(body, "Tile colour 2");
        swatch_row(body, ColorSlot::Secondary);

        section_label(body, "Controls");
        for line in CONTROLS_GUIDE {
            body.spawn((
                Text::new(*line),
                TextFont { font_size: 12.0, ..default() },
                TextColor(Color::srgb(0.80, 0.82, 0.86)),
            ));
        }
    });

    spawn_panel(&mut commands, PanelSide::Agents, "Agents", &state, |body| {
        body.spawn((
            AgentCountText,
            Text::new("Agents: 0"),
            TextFont { font_size: 16.0, ..default() },
            TextColor(Color::WHITE),
        ));
        spawn_button(
            body,
            PanelAction::ToggleBlueAgent,
            "Blue Agent",
            Val::Percent(100.0),
            BlueAgentLabel,
        );
        spawn_button(
            body,
            PanelAction::RemoveAllAgents,
            "Remove all",
            Val::Percent(100.0),
            (),
        );
    });

    commands
        .spawn((
            DialogRoot,
            Name::new("ConfirmDialog"),
            Interaction::default(),
            BackgroundColor(Color::srgba(0.10, 0.11, 0.13, 0.95)),
            BorderColor(Color::srgb(0.30, 0.32, 0.38)),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(32.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-150.0)),
                width: Val::Px(300.0),
                padding: UiRect::all(Val::Px(14.0)),
                row_gap: Val::Px(10.0),
                border: UiRect::all(Val::Px(1.0)),
                display: Display::None,
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .with_children(|dialog| {
            dialog.spawn((
                DialogTitle,
                Text::new(""),
                TextFont { font_size: 16.0, ..default() },
                TextColor(Color::WHITE),
            ));
            dialog.spawn((
                DialogBody,
                Text::new(""),
                TextFont { font_size: 14.0, ..default() },
                TextColor(Color::srgb(0.80, 0.82, 0.86)),
            ));
            dialog
                .spawn(Node {
                    display: Display::Flex,
                    justify_content: JustifyContent::FlexEnd,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(
                        row,
                        PanelAction::Cancel,
                        "Cancel",
                        Val::Auto,
                        DialogButtonLabel(DialogButton::Secondary),
                    );
                    spawn_button(
                        row,
                        PanelAction::DialogPrimary,
                        "Confirm",
                        Val::Auto,
                        DialogButtonLabel(DialogButton::Primary),
                    );
                });
        });
}

pub fn apply_collapse_state(
    state: Res<BoardPanelUiState>,
    mut nodes: ParamSet<(
        Query<(&PanelRoot, &mut Node)>,
        Query<(&PanelBody, &mut Node)>,
        Query<(&PanelTitle, &mut Node)>,
    )>,
    mut chevrons: Query<(&CollapseLabel, &mut Text)>,
) {
    if !state.is_changed() {
        return;
    }

    for (root, mut n) in &mut nodes.p0() {
        n.width = Val::Px(if state.collapsed(root.0) { state.closed_width } else { state.open_width });
    }
    for (body, mut n) in &mut nodes.p1() {
        n.display = if state.collapsed(body.0) { Display::None } else { Display::Flex };
    }
    for (title, mut n) in &mut nodes.p2() {
        n.display = if state.collapsed(title.0) { Display::None } else { Display::Flex };
    }
    for (label, mut t) in &mut chevrons {
        *t = Text::new(chevron(label.0, state.collapsed(label.0)));
    }
}

/// Mirrors editor state into panel labels, button colours and the dialog.
pub fn reflect_editor_state(
    editor: Res<BoardEditor>,
    mut texts: ParamSet<(
        Query<&mut Text, With<SizeLabel>>,
        Query<&mut Text, With<LabelsToggleLabel>>,
        Query<&mut Text, With<AgentCountText>>,
        Query<&mut Text, With<BlueAgentLabel>>,
        Query<&mut Text, With<DialogTitle>>,
        Query<&mut Text, With<DialogBody>>,
        Query<(&DialogButtonLabel, &mut Text)>,
    )>,
    mut buttons: Query<(&PanelAction, &Interaction, &mut BackgroundColor, &mut BorderColor)>,
    mut dialog: Query<&mut Node, With<DialogRoot>>,
) {
    if !editor.is_changed() {
        return;
    }

    let config = editor.config();
    if let Ok(mut t) = texts.p0().single_mut() {
        t.0 = format!("{0} x {0}", config.size);
    }
    if let Ok(mut t) = texts.p1().single_mut() {
        t.0 = format!("Labels: {}", if config.show_labels { "On" } else { "Off" });
    }
    if let Ok(mut t) = texts.p2().single_mut() {
        t.0 = format!("Agents: {}", editor.agents().len());
    }
    if let Ok(mut t) = texts.p3().single_mut() {
        t.0 = match editor.placement() {
            Some(_) => "Cancel placement".into(),
            None => "Blue Agent".into(),
        };
    }

    for (action, interaction, mut bg, mut border) in &mut buttons {
        if *interaction == Interaction::None {
            *bg = BackgroundColor(base_color(*action, &editor));
        }
        if matches!(action, PanelAction::SetColor(..)) {
            *border = BorderColor(if is_selected_swatch(*action, &editor) {
                SWATCH_BORDER_SELECTED
            } else {
                SWATCH_BORDER
            });
        }
    }

    let content = dialog_content(editor.pending());
    if let Ok(mut node) = dialog.single_mut() {
        node.display = if content.is_some() { Display::Flex } else { Display::None };
    }
    let Some(content) = content else {
        return;
    };
    if let Ok(mut t) = texts.p4().single_mut() {
        t.0 = content.title;
    }
    if let Ok(mut t) = texts.p5().single_mut() {
        t.0 = content.body;
    }
    for (label, mut t) in &mut texts.p6() {
        t.0 = match label.0 {
            DialogButton::Primary => content.primary.into(),
            DialogButton::Secondary => content.secondary.into(),
        };
    }
}
