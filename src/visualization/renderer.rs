//! Frame drawing over a pluggable 2D surface
//!
//! `Renderer` is the drawing capability the viewer hands the session each
//! frame: clear, circles, line strips, present. `GizmoRenderer` backs it
//! with Bevy's immediate-mode gizmos, where clear and present belong to
//! the render graph and are no-ops here

use bevy::color::Color;
use bevy::prelude::Gizmos;

use crate::simulation::session::Session;
use crate::simulation::states::NVec2;
use crate::simulation::world::PhysicsWorld;

/// Immediate-mode 2D drawing surface. Coordinates are screen units.
pub trait Renderer {
    fn clear(&mut self);

    fn draw_circle(&mut self, center: NVec2, radius: f64, color: Color);

    fn draw_line_strip<I>(&mut self, points: I, color: Color)
    where
        I: IntoIterator<Item = NVec2>;

    fn present(&mut self);
}

/// Draw one frame of the session: trails first, then the attractor, then
/// every body on top.
pub fn render_frame<W, R>(session: &Session<W>, renderer: &mut R)
where
    W: PhysicsWorld + Send + Sync + 'static,
    R: Renderer,
{
    renderer.clear();

    for sat in &session.satellites {
        // A strip needs at least a segment
        if sat.trail.len() >= 2 {
            renderer.draw_line_strip(sat.trail.points(), Color::WHITE);
        }
    }

    renderer.draw_circle(
        session.attractor_screen_position(),
        session.parameters.attractor_radius,
        Color::srgb(1.0, 0.9, 0.2),
    );

    for sat in &session.satellites {
        if let Some(position) = session.body_screen_position(sat.handle) {
            renderer.draw_circle(
                position,
                session.parameters.spawn_radius,
                Color::srgb(0.3, 0.5, 1.0),
            );
        }
    }

    renderer.present();
}

/// [`Renderer`] over Bevy gizmos.
pub struct GizmoRenderer<'a, 'w, 's> {
    pub gizmos: &'a mut Gizmos<'w, 's>,
}

fn to_vec2(p: NVec2) -> bevy::math::Vec2 {
    bevy::math::Vec2::new(p.x as f32, p.y as f32)
}

impl Renderer for GizmoRenderer<'_, '_, '_> {
    fn clear(&mut self) {
        // The camera's clear color wipes the frame before gizmos draw
    }

    fn draw_circle(&mut self, center: NVec2, radius: f64, color: Color) {
        self.gizmos.circle_2d(to_vec2(center), radius as f32, color);
    }

    fn draw_line_strip<I>(&mut self, points: I, color: Color)
    where
        I: IntoIterator<Item = NVec2>,
    {
        self.gizmos
            .linestrip_2d(points.into_iter().map(to_vec2), color);
    }

    fn present(&mut self) {
        // Presentation happens when the render graph flushes the frame
    }
}
