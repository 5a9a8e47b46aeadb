//! Paints a [`Snapshot`] onto a [`Canvas`].
//!
//! The logical world is scaled uniformly to fit the canvas and centred;
//! whatever is left over is letterboxed.

use super::canvas::{Canvas, Rgb, draw_number};
use crate::game::GameState;
use crate::particles::{Particle, Tint};
use crate::pipes::Pipe;
use crate::sink::Snapshot;

const LETTERBOX: Rgb = Rgb(12, 12, 18);
const SKY_TOP: Rgb = Rgb(74, 144, 226);
const SKY_MID: Rgb = Rgb(135, 206, 235);
const SKY_BOT: Rgb = Rgb(212, 241, 244);
const SUN: Rgb = Rgb(255, 217, 61);
const SUN_CORE: Rgb = Rgb(255, 249, 230);
const CLOUD: Rgb = Rgb(255, 255, 255);
const CLOUD_SHADOW: Rgb = Rgb(150, 150, 150);
const GRASS: Rgb = Rgb(139, 195, 74);
const GRASS_LIGHT: Rgb = Rgb(156, 204, 101);
const DIRT: Rgb = Rgb(104, 159, 56);
const DIRT_DARK: Rgb = Rgb(85, 139, 47);
const PIPE_L: Rgb = Rgb(46, 125, 50);
const PIPE_M: Rgb = Rgb(76, 175, 80);
const PIPE_R: Rgb = Rgb(46, 125, 50);
const PIPE_HI: Rgb = Rgb(102, 187, 106);
const CAP_DARK: Rgb = Rgb(30, 90, 34);
const BIRD_Y: Rgb = Rgb(255, 217, 61);
const BIRD_HI: Rgb = Rgb(255, 230, 109);
const BIRD_WING: Rgb = Rgb(255, 152, 0);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(255, 99, 71);
const PANEL: Rgb = Rgb(210, 185, 110);
const PANEL_FACE: Rgb = Rgb(220, 195, 120);
const SHADOW: Rgb = Rgb(30, 30, 30);
const WHITE: Rgb = Rgb(255, 255, 255);

/// Height of a pipe cap in world units, and how far it overhangs each side.
const CAP_HEIGHT: f64 = 30.0;
const CAP_OVERHANG: f64 = 5.0;

/// UI elements the sink toggles in response to state changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay {
    pub show_score: bool,
    /// `(score, best)` once the match-over screen has been revealed.
    pub match_over: Option<(u32, u32)>,
}

/// Maps world coordinates to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub ox: f64,
    pub oy: f64,
}

impl Viewport {
    pub fn fit(canvas_w: usize, canvas_h: usize, world_w: f64, world_h: f64) -> Self {
        let scale = (canvas_w as f64 / world_w).min(canvas_h as f64 / world_h);
        Self {
            scale,
            ox: (canvas_w as f64 - world_w * scale) / 2.0,
            oy: (canvas_h as f64 - world_h * scale) / 2.0,
        }
    }

    pub fn x(&self, wx: f64) -> f64 {
        self.ox + wx * self.scale
    }

    pub fn y(&self, wy: f64) -> f64 {
        self.oy + wy * self.scale
    }

    pub fn len(&self, l: f64) -> f64 {
        l * self.scale
    }

    /// World-space rectangle as integer pixel bounds `(x, y, w, h)`.
    fn rect(&self, x: f64, y: f64, w: f64, h: f64) -> (i32, i32, i32, i32) {
        let x0 = self.x(x).round() as i32;
        let y0 = self.y(y).round() as i32;
        let x1 = self.x(x + w).round() as i32;
        let y1 = self.y(y + h).round() as i32;
        (x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }
}

pub fn draw_frame(canvas: &mut Canvas, snap: &Snapshot<'_>, overlay: &Overlay) {
    let config = snap.config;
    let vp = Viewport::fit(
        canvas.width(),
        canvas.height(),
        config.world_width,
        config.world_height,
    );

    canvas.fill(LETTERBOX);
    draw_sky(canvas, &vp, snap);
    draw_sun(canvas, &vp, snap);
    draw_clouds(canvas, &vp, snap);
    for pipe in snap.pipes {
        draw_pipe(canvas, &vp, snap, pipe);
    }
    draw_ground(canvas, &vp, snap);
    if snap.state != GameState::Ended {
        draw_bird(canvas, &vp, snap);
    }
    draw_particles(canvas, &vp, snap);
    draw_letterbox(canvas, &vp, snap);

    let cx = vp.x(config.world_width / 2.0) as i32;
    if overlay.show_score {
        draw_number(canvas, cx, vp.y(0.0) as i32 + 3, snap.score, WHITE);
    }
    if snap.state == GameState::NotStarted {
        draw_title(canvas, &vp, snap);
    }
    if let Some((score, best)) = overlay.match_over {
        draw_match_over(canvas, &vp, snap, score, best);
    }
}

/// Clear anything that spilled outside the world rectangle.
fn draw_letterbox(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>) {
    let (x, y, w, h) = vp.rect(0.0, 0.0, snap.config.world_width, snap.config.world_height);
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
    canvas.fill_rect(0, 0, x, ch, LETTERBOX);
    canvas.fill_rect(x + w, 0, cw - x - w, ch, LETTERBOX);
    canvas.fill_rect(0, 0, cw, y, LETTERBOX);
    canvas.fill_rect(0, y + h, cw, ch - y - h, LETTERBOX);
}

fn draw_sky(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>) {
    let (x, y, w, h) = vp.rect(0.0, 0.0, snap.config.world_width, snap.config.world_height);
    for dy in 0..h {
        let t = dy as f64 / h.max(1) as f64;
        let c = if t < 0.5 {
            Rgb::lerp(SKY_TOP, SKY_MID, (t * 2.0 * 256.0) as u16)
        } else {
            Rgb::lerp(SKY_MID, SKY_BOT, ((t - 0.5) * 2.0 * 256.0) as u16)
        };
        canvas.fill_rect(x, y + dy, w, 1, c);
    }
}

fn draw_sun(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>) {
    let (sx, sy) = (vp.x(snap.config.world_width - 80.0), vp.y(80.0));
    let r = vp.len(40.0);
    canvas.fill_ellipse(sx, sy, r * 1.8, r * 1.8, SUN, 0.15);
    canvas.fill_ellipse(sx, sy, r, r, SUN, 1.0);
    canvas.fill_ellipse(sx - r * 0.2, sy - r * 0.2, r * 0.5, r * 0.5, SUN_CORE, 0.6);
}

fn draw_clouds(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>) {
    for (color, alpha, dx, dy) in [(CLOUD_SHADOW, 0.15, 2.0, 3.0), (CLOUD, 0.8, 0.0, 0.0)] {
        for cloud in snap.clouds {
            let (x, y, w) = (cloud.x + dx, cloud.y + dy, cloud.width);
            for (ox, oy, r) in [(0.0, 0.0, 0.3), (0.3, -10.0, 0.35), (0.6, 0.0, 0.3)] {
                let rr = vp.len(w * r);
                canvas.fill_ellipse(vp.x(x + w * ox), vp.y(y + oy), rr, rr, color, alpha);
            }
        }
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

fn draw_pipe(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>, pipe: &Pipe) {
    let floor = snap.config.floor_y();
    let top_body = (pipe.top_height - CAP_HEIGHT).max(0.0);
    let bottom_body = pipe.bottom_y + CAP_HEIGHT;

    let bodies = [
        vp.rect(pipe.x, 0.0, pipe.width, top_body),
        vp.rect(pipe.x, bottom_body, pipe.width, (floor - bottom_body).max(0.0)),
    ];
    for (x, y, w, h) in bodies {
        for dx in 0..w {
            canvas.fill_rect(x + dx, y, 1, h, pipe_shade(dx, w));
        }
    }

    let cap_w = pipe.width + CAP_OVERHANG * 2.0;
    let caps = [
        vp.rect(pipe.x - CAP_OVERHANG, top_body, cap_w, pipe.top_height - top_body),
        vp.rect(pipe.x - CAP_OVERHANG, pipe.bottom_y, cap_w, CAP_HEIGHT),
    ];
    for (x, y, w, h) in caps {
        for dx in 0..w {
            canvas.fill_rect(x + dx, y, 1, h, pipe_shade(dx, w));
        }
        if h > 0 {
            canvas.fill_rect(x, y, w, 1, CAP_DARK);
            canvas.fill_rect(x, y + h - 1, w, 1, CAP_DARK);
        }
    }
}

fn draw_ground(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>) {
    let config = snap.config;
    let (x, y, w, h) = vp.rect(0.0, config.floor_y(), config.world_width, config.ground_height);
    for dy in 0..h {
        for dx in 0..w {
            let c = if dy < 2 {
                if (dx / 3) % 2 == 0 { GRASS } else { GRASS_LIGHT }
            } else if (dx + dy * 2) % 12 < 6 {
                DIRT
            } else {
                DIRT_DARK
            };
            canvas.set(x + dx, y + dy, c);
        }
    }
    // Grass blades every 8 world units, of varying height.
    let mut wx = 0.0;
    while wx < config.world_width {
        let blade = 8.0 + ((wx as u32 * 37) % 7) as f64;
        let (bx, by, bw, bh) = vp.rect(wx, config.floor_y(), 4.0, blade);
        canvas.fill_rect(bx, by, bw.max(1), bh, GRASS_LIGHT);
        wx += 8.0;
    }
}

fn draw_bird(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>) {
    let bird = snap.bird;
    let (wx, wy) = bird.center();
    let (cx, cy) = (vp.x(wx), vp.y(wy));
    let rx = vp.len(bird.width / 2.0);
    let ry = vp.len(bird.height / 2.0);
    // Nose up/down follows the rotation; ±1 at the clamp limits.
    let tilt = (bird.rotation / 60.0).clamp(-1.0, 1.0) * ry * 0.5;

    canvas.fill_ellipse(cx + 1.0, cy + 1.0, rx, ry, SHADOW, 0.2);
    canvas.fill_ellipse(cx, cy, rx, ry, BIRD_Y, 1.0);
    canvas.fill_ellipse(cx - rx * 0.2, cy - ry * 0.4, rx * 0.6, ry * 0.35, BIRD_HI, 0.8);

    let wing_y = cy + ry * 0.2 - bird.wing_angle.sin() * ry;
    canvas.fill_ellipse(cx - rx * 0.2, wing_y, rx * 0.6, ry * 0.45, BIRD_WING, 1.0);

    let (ex, ey) = (cx + rx * 0.5, cy - ry * 0.5 + tilt * 0.5);
    canvas.fill_ellipse(ex, ey, (ry * 0.5).max(0.6), (ry * 0.5).max(0.6), BIRD_EYE, 1.0);
    canvas.set((ex + ry * 0.15).round() as i32, ey.round() as i32, BIRD_PUPIL);

    let beak_len = vp.len(10.0).max(1.0);
    canvas.fill_ellipse(cx + rx + beak_len * 0.4, cy + tilt, beak_len * 0.6, (ry * 0.3).max(0.6), BIRD_BEAK, 1.0);
}

fn tint_color(tint: Tint) -> Rgb {
    match tint {
        Tint::Gold => Rgb(255, 215, 0),
        Tint::Green => Rgb(0, 255, 0),
        Tint::DarkRed => Rgb(139, 0, 0),
        Tint::Crimson => Rgb(220, 20, 60),
        Tint::Blood => Rgb(139, 0, 0),
        Tint::Yellow => Rgb(255, 217, 61),
        Tint::Cream => Rgb(255, 249, 230),
        Tint::Orange => Rgb(255, 152, 0),
    }
}

fn draw_particle(canvas: &mut Canvas, vp: &Viewport, p: &Particle, alpha: f64) {
    // Rotation stretches the footprint between the two axes.
    let (s, c) = (p.rotation.sin().abs(), p.rotation.cos().abs());
    let rx = vp.len((p.width * c + p.height * s) / 2.0);
    let ry = vp.len((p.width * s + p.height * c) / 2.0);
    canvas.fill_ellipse(vp.x(p.x), vp.y(p.y), rx, ry, tint_color(p.tint), alpha);
}

fn draw_particles(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>) {
    let particles = snap.particles;
    for p in &particles.splatters {
        draw_particle(canvas, vp, p, (p.life / 60.0).min(1.0));
    }
    for p in &particles.feathers {
        draw_particle(canvas, vp, p, (p.life / 80.0).min(1.0));
    }
    for p in &particles.sparks {
        draw_particle(canvas, vp, p, (p.life / 30.0).min(1.0));
    }
}

fn draw_title(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>) {
    let cx = vp.x(snap.config.world_width / 2.0) as i32;
    let cy = vp.y(snap.config.world_height / 4.0) as i32;
    let text = "FLAPPY";
    let char_w = vp.len(40.0).max(3.0) as i32;
    let char_h = vp.len(60.0).max(4.0) as i32;
    let total_w = text.len() as i32 * char_w;
    let sx = cx - total_w / 2;

    for i in 0..text.len() as i32 {
        let bx = sx + i * char_w;
        canvas.fill_rect(bx, cy, char_w - 1, char_h, BIRD_Y);
        canvas.fill_rect(bx, cy, char_w - 1, 1, BIRD_HI);
    }

    let sub_y = cy + char_h + 4;
    let msg = "SPACE TO FLAP";
    let msg_x = cx - msg.len() as i32 * 2;
    for (i, ch) in msg.chars().enumerate() {
        if ch != ' ' {
            canvas.fill_rect(msg_x + i as i32 * 4, sub_y, 3, 3, WHITE);
        }
    }

    if snap.best > 0 {
        draw_number(canvas, cx, sub_y + 6, snap.best, BIRD_Y);
    }
}

fn draw_match_over(canvas: &mut Canvas, vp: &Viewport, snap: &Snapshot<'_>, score: u32, best: u32) {
    canvas.darken();

    let cx = vp.x(snap.config.world_width / 2.0) as i32;
    let cy = vp.y(snap.config.world_height / 2.0) as i32;
    let panel_w = vp.len(240.0).max(30.0) as i32;
    let panel_h = vp.len(120.0).max(16.0) as i32;
    let px = cx - panel_w / 2;
    let py = cy - panel_h / 2;

    canvas.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
    canvas.fill_rect(px, py, panel_w, panel_h, PANEL);
    canvas.fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL_FACE);

    draw_number(canvas, cx, py + 4, score, WHITE);
    draw_number(canvas, cx, py + 12, best, BIRD_Y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;
    use crate::sink::NullSink;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_viewport_letterboxes_wide_canvas() {
        let vp = Viewport::fit(200, 60, 400.0, 600.0);
        assert!((vp.scale - 0.1).abs() < 1e-12);
        assert!((vp.ox - 80.0).abs() < 1e-12);
        assert_eq!(vp.oy, 0.0);
        assert!((vp.x(400.0) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_draw_frame_paints_inside_viewport_only() {
        let mut g = Game::new(
            GameConfig::default(),
            ChaCha8Rng::seed_from_u64(1),
            &mut NullSink,
        );
        g.start(&mut NullSink);
        let mut canvas = Canvas::new(200, 60);
        draw_frame(&mut canvas, &g.snapshot(), &Overlay::default());
        assert_eq!(canvas.get(0, 30), LETTERBOX);
        assert_eq!(canvas.get(199, 30), LETTERBOX);
        assert_ne!(canvas.get(100, 30), LETTERBOX);
    }

    #[test]
    fn test_match_over_panel_darkens_scene() {
        let g = Game::new(
            GameConfig::default(),
            ChaCha8Rng::seed_from_u64(1),
            &mut NullSink,
        );
        let mut plain = Canvas::new(80, 120);
        draw_frame(&mut plain, &g.snapshot(), &Overlay::default());
        let mut over = Canvas::new(80, 120);
        let overlay = Overlay {
            show_score: false,
            match_over: Some((3, 7)),
        };
        draw_frame(&mut over, &g.snapshot(), &overlay);
        assert_eq!(over.get(0, 0), plain.get(0, 0).dim());
    }
}
