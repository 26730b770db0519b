//! Frame drawing
//!
//! Pure read of the session state against the platform surface, called once
//! per frame right after the simulation tick. No state mutation here.

use glam::Vec2;

use crate::platform::{Color, Sprite, Surface, TextAnchor};
use crate::sim::{GamePhase, SessionState, TargetStyle};

/// HUD text block origin (matches the original layout)
const HUD_ORIGIN: Vec2 = Vec2::new(60.0, 40.0);
const HUD_LINE_HEIGHT: f32 = 20.0;

/// Disc colors for the circle variant, cycled by spawn slot
const DISC_PALETTE: [Color; 5] = [
    Color::rgb(0x4e, 0x9a, 0xf1),
    Color::rgb(0xf1, 0x6a, 0x4e),
    Color::rgb(0x58, 0xc9, 0x7b),
    Color::rgb(0xe8, 0xc5, 0x47),
    Color::rgb(0xb0, 0x6a, 0xe0),
];

pub fn draw_frame(surface: &mut impl Surface, state: &SessionState) {
    surface.clear_region(Vec2::ZERO, state.bounds);

    for target in state.population.targets() {
        match state.mode.style {
            TargetStyle::Sprites => {
                surface.draw_sprite(Sprite::Alien, target.pos, target.radius);
            }
            TargetStyle::Discs => {
                let color = DISC_PALETTE[target.color_index as usize % DISC_PALETTE.len()];
                surface.draw_disc(target.pos, target.radius, color);
            }
        }
        surface.draw_text(&target.label, target.pos, Color::BLACK, TextAnchor::Center);
    }

    for explosion in state.population.explosions() {
        surface.draw_sprite(
            Sprite::ExplosionFrame {
                frame: explosion.frame,
                of: explosion.max_frame,
            },
            explosion.pos,
            explosion.radius,
        );
    }

    draw_hud(surface, state);
}

fn draw_hud(surface: &mut impl Surface, state: &SessionState) {
    let mut lines = vec![
        format!("Score: {}", state.score),
        format!("Record: {}", state.best),
    ];
    if state.mode.level_progression {
        lines.push(format!("Level: {}", state.level));
    }
    for (i, text) in lines.iter().enumerate() {
        let pos = HUD_ORIGIN + Vec2::new(0.0, i as f32 * HUD_LINE_HEIGHT);
        surface.draw_text(text, pos, Color::WHITE, TextAnchor::TopLeft);
    }

    if state.mode.pointer_readout {
        if let Some(p) = state.last_pointer {
            surface.draw_text(
                &format!("({}, {})", p.x as i32, p.y as i32),
                p + Vec2::new(12.0, -12.0),
                Color::WHITE,
                TextAnchor::TopLeft,
            );
        }
    }

    if state.phase == GamePhase::GameOver {
        surface.draw_text(
            &format!("Game Over - Score: {}", state.score),
            state.bounds / 2.0,
            Color::WHITE,
            TextAnchor::Center,
        );
    }
}
