use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::configuration::config::WindowConfig;
use crate::simulation::session::PlanarSession;
use crate::simulation::states::NVec2;
use crate::visualization::renderer::{render_frame, GizmoRenderer};

/// Start the interactive viewer and block until the window closes.
///
/// Input and drawing run every frame; the session advances in the fixed
/// schedule at `1/dt` Hz so trajectories do not depend on render rate.
pub fn run(session: PlanarSession, window: WindowConfig) {
    let dt = session.parameters.dt;

    App::new()
        .insert_resource(session)
        .insert_resource(Time::<Fixed>::from_seconds(dt))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window.title.clone(),
                resolution: (window.width, window.height).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, (setup_camera, log_startup))
        .add_systems(Update, (handle_mouse, draw_frame))
        .add_systems(FixedUpdate, advance_session)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..Default::default()
        },
        ..Default::default()
    });
}

fn log_startup(session: Res<PlanarSession>) {
    info!(
        "gravity well ready: attractor at {:?} screen units, step {:.4}s; left-click to spawn",
        (
            session.parameters.attractor_position.x,
            session.parameters.attractor_position.y
        ),
        session.parameters.dt,
    );
}

/// Feed mouse state to the session. The held button is reported every
/// frame; the session's latch turns that into one spawn per press.
fn handle_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut session: ResMut<PlanarSession>,
) {
    if buttons.pressed(MouseButton::Left) {
        let Ok(window) = windows.get_single() else {
            return;
        };
        let Ok((camera, camera_transform)) = cameras.get_single() else {
            return;
        };
        let Some(cursor) = window.cursor_position() else {
            return;
        };
        let Some(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor) else {
            return;
        };
        let cursor = NVec2::new(world_pos.x as f64, world_pos.y as f64);
        if let Some(handle) = session.handle_press(cursor) {
            debug!("spawned {handle:?} at ({:.0}, {:.0})", cursor.x, cursor.y);
        }
    }
    if buttons.just_released(MouseButton::Left) {
        session.handle_release();
    }
}

fn advance_session(mut session: ResMut<PlanarSession>) {
    let before = session.satellite_count();
    session.tick();
    let removed = before.saturating_sub(session.satellite_count());
    if removed > 0 {
        debug!("{removed} body(ies) fell into the attractor");
    }
}

fn draw_frame(session: Res<PlanarSession>, mut gizmos: Gizmos) {
    let mut renderer = GizmoRenderer {
        gizmos: &mut gizmos,
    };
    render_frame(&session, &mut renderer);
}
