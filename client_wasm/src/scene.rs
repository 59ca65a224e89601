//! Turns a match snapshot into flat shapes for the renderer
//!
//! Everything is in arena pixels with the origin top-left and y down.

use game_core::{ball_draw_size, srgb_to_linear, Config, MatchSnapshot, Settings, Side};
use glam::Vec2;

use crate::digits::{self, Align, DigitStyle};

const BACKGROUND: [u8; 3] = [30, 30, 30];
const PADDLE_CORNER_RADIUS: f32 = 5.0;
const CENTER_LINE_WIDTH: f32 = 2.0;
const DASH: f32 = 10.0;
const GAP: f32 = 10.0;
const CENTER_LINE_ALPHA: f32 = 100.0 / 255.0;
const SCORE_TOP: f32 = 40.0;
/// Horizontal distance from the centre line to each score
const SCORE_OFFSET: f32 = 110.0;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Ellipse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub shape: Shape,
    pub center: Vec2,
    pub size: Vec2,
    /// Linear RGBA
    pub color: [f32; 4],
}

impl Sprite {
    fn from_corner(shape: Shape, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Self {
        Self {
            shape,
            center: Vec2::new(x + w / 2.0, y + h / 2.0),
            size: Vec2::new(w, h),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub clear_color: [f32; 4],
    pub sprites: Vec<Sprite>,
}

impl Scene {
    pub fn of_shape(&self, shape: Shape) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(move |s| s.shape == shape)
    }
}

pub fn background() -> [f32; 4] {
    let [r, g, b] = BACKGROUND.map(srgb_to_linear);
    [r, g, b, 1.0]
}

pub fn build(snapshot: &MatchSnapshot, config: &Config, settings: &Settings) -> Scene {
    let mut sprites = Vec::new();

    center_line(config, &mut sprites);

    for (side, y) in [(Side::Left, snapshot.left_y), (Side::Right, snapshot.right_y)] {
        let rect = config.paddle_rect(side, y);
        rounded_rect(
            rect.x as f32,
            rect.y as f32,
            rect.w as f32,
            rect.h as f32,
            settings.paddle_color(side).rgba(),
            &mut sprites,
        );
    }

    let ball = ball_draw_size(snapshot, config);
    sprites.push(Sprite::from_corner(
        Shape::Ellipse,
        ball.x as f32,
        ball.y as f32,
        ball.w as f32,
        ball.h as f32,
        settings.ball_color.rgba(),
    ));

    scores(snapshot, config, &mut sprites);

    Scene {
        clear_color: background(),
        sprites,
    }
}

fn center_line(config: &Config, out: &mut Vec<Sprite>) {
    let x = config.arena_width as f32 / 2.0 - CENTER_LINE_WIDTH / 2.0;
    let height = config.arena_height as f32;
    let color = [1.0, 1.0, 1.0, CENTER_LINE_ALPHA];
    let mut y = 0.0;
    while y < height {
        let dash = DASH.min(height - y);
        out.push(Sprite::from_corner(
            Shape::Rect,
            x,
            y,
            CENTER_LINE_WIDTH,
            dash,
            color,
        ));
        y += DASH + GAP;
    }
}

/// Two overlapping bars with a disc at each corner
fn rounded_rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4], out: &mut Vec<Sprite>) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let r = PADDLE_CORNER_RADIUS.min(w / 2.0).min(h / 2.0);
    let d = 2.0 * r;
    if h > d {
        out.push(Sprite::from_corner(Shape::Rect, x, y + r, w, h - d, color));
    }
    if w > d {
        out.push(Sprite::from_corner(Shape::Rect, x + r, y, w - d, h, color));
    }
    let mut corners = vec![
        Vec2::new(x + r, y + r),
        Vec2::new(x + w - r, y + r),
        Vec2::new(x + r, y + h - r),
        Vec2::new(x + w - r, y + h - r),
    ];
    corners.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    corners.dedup();
    out.extend(corners.into_iter().map(|center| Sprite {
        shape: Shape::Ellipse,
        center,
        size: Vec2::splat(d),
        color,
    }));
}

fn scores(snapshot: &MatchSnapshot, config: &Config, out: &mut Vec<Sprite>) {
    let style = DigitStyle::default();
    let mid = config.arena_width as f32 / 2.0;
    let bars = digits::number_bars(
        snapshot.left_score,
        mid - SCORE_OFFSET,
        SCORE_TOP,
        Align::Right,
        &style,
    )
    .into_iter()
    .chain(digits::number_bars(
        snapshot.right_score,
        mid + SCORE_OFFSET,
        SCORE_TOP,
        Align::Left,
        &style,
    ));
    out.extend(bars.map(|b| Sprite::from_corner(Shape::Rect, b.x, b.y, b.w, b.h, WHITE)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Match, PaletteColor};

    fn scene_for(settings: Settings) -> (Scene, MatchSnapshot) {
        let game = Match::new(settings, 1);
        let snap = game.snapshot();
        (build(&snap, game.config(), &settings), snap)
    }

    #[test]
    fn test_background_is_dark_grey() {
        let [r, g, b, a] = background();
        assert!(r > 0.0 && r < 0.02);
        assert_eq!((r, a), (g, 1.0));
        assert_eq!(g, b);
    }

    #[test]
    fn test_center_line_is_dashed_and_translucent() {
        let (scene, _) = scene_for(Settings::default());
        let dashes: Vec<&Sprite> = scene
            .of_shape(Shape::Rect)
            .filter(|s| s.color[3] < 1.0)
            .collect();
        assert_eq!(dashes.len(), 30);
        assert!(dashes.iter().all(|s| s.center.x == 400.0));
        assert_eq!(dashes[1].center.y - dashes[0].center.y, 20.0);
    }

    #[test]
    fn test_paddles_use_settings_colours() {
        let settings = Settings {
            paddle1_color: PaletteColor::Red,
            paddle2_color: PaletteColor::Blue,
            ball_color: PaletteColor::Yellow,
            ..Settings::default()
        };
        let (scene, _) = scene_for(settings);
        let red = PaletteColor::Red.rgba();
        let left: Vec<&Sprite> = scene.sprites.iter().filter(|s| s.color == red).collect();
        // A 10 wide paddle is one bar capped by discs at both ends
        assert_eq!(left.iter().filter(|s| s.shape == Shape::Rect).count(), 1);
        assert_eq!(left.iter().filter(|s| s.shape == Shape::Ellipse).count(), 2);
        assert!(left.iter().all(|s| s.center.x == 25.0));
        let top = left
            .iter()
            .map(|s| s.center.y - s.size.y / 2.0)
            .fold(f32::MAX, f32::min);
        assert_eq!(top, 250.0);

        let yellow = PaletteColor::Yellow.rgba();
        let ball: Vec<&Sprite> = scene.sprites.iter().filter(|s| s.color == yellow).collect();
        assert_eq!(ball.len(), 1);
        assert_eq!(ball[0].shape, Shape::Ellipse);
        assert_eq!(ball[0].center, Vec2::new(400.0, 300.0));
        assert_eq!(ball[0].size, Vec2::splat(20.0));
    }

    #[test]
    fn test_scores_sit_either_side_of_centre() {
        let (scene, _) = scene_for(Settings::default());
        let digits: Vec<&Sprite> = scene
            .of_shape(Shape::Rect)
            .filter(|s| s.color == WHITE && s.center.y < SCORE_TOP + 50.0)
            .collect();
        // Two zeros, six segments each
        assert_eq!(digits.len(), 12);
        assert!(digits.iter().any(|s| s.center.x < 400.0 - SCORE_OFFSET));
        assert!(digits.iter().any(|s| s.center.x > 400.0 + SCORE_OFFSET));
    }
}
