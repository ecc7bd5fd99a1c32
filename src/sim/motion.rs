//! Discrete-to-continuous motion for characters
//!
//! Each character keeps an authoritative grid cell plus a render position
//! that glides toward it. The walk cycle (sprite frame selection) runs on
//! its own clock so a character can keep stepping its legs briefly after
//! it has already snapped into place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, GridPos};
use crate::settings::CharacterProfile;

/// Clock that drives frame cycling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cadence {
    /// `floor(elapsed_moving_secs * fps)`, counted from the start of the walk
    #[default]
    Elapsed,
    /// Counter bumped every `1000 / fps` ms while walking, kept between walks
    Ticks,
}

/// Sprite frame indices per facing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSequences {
    pub down: Vec<u32>,
    pub up: Vec<u32>,
    /// Shared by left and right; the other side is drawn mirrored
    pub side: Vec<u32>,
    /// Which way the side frames face as drawn in the sheet
    pub side_faces: Direction,
}

impl FrameSequences {
    /// 21-frame sheet: front, right-facing side, back
    pub fn player() -> Self {
        Self {
            down: (0..=6).collect(),
            up: (14..=20).collect(),
            side: (7..=13).collect(),
            side_faces: Direction::Right,
        }
    }

    /// 21-frame sheet with a sparse front cycle and left-facing side frames
    pub fn pursuer() -> Self {
        Self {
            down: vec![0, 1],
            up: (14..=20).collect(),
            side: vec![3, 4, 5, 6, 9, 10, 11, 12, 13],
            side_faces: Direction::Left,
        }
    }

    pub fn sequence(&self, facing: Direction) -> &[u32] {
        match facing {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left | Direction::Right => &self.side,
        }
    }

    /// True when the sprite must be flipped horizontally for `facing`
    pub fn is_mirrored(&self, facing: Direction) -> bool {
        facing.is_horizontal() && facing != self.side_faces
    }

    pub(crate) fn sanitize(&mut self) {
        for seq in [&mut self.down, &mut self.up, &mut self.side] {
            if seq.is_empty() {
                seq.push(0);
            }
        }
        if !self.side_faces.is_horizontal() {
            self.side_faces = Direction::Right;
        }
    }
}

/// A single glide between two cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementTween {
    /// Render position when the move was committed
    pub from: Vec2,
    pub to: GridPos,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub facing: Direction,
}

impl MovementTween {
    /// Normalized progress in `[0, 1]`
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Interpolated position; exactly `to` once finished
    pub fn sample(&self, now_ms: f64) -> Vec2 {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            self.to.as_vec2()
        } else {
            self.from.lerp(self.to.as_vec2(), t)
        }
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// Tween state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    Idle,
    Moving,
}

/// Frame to draw this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub index: u32,
    pub mirrored: bool,
}

/// Walk-cycle clock
#[derive(Debug, Clone, Default)]
struct Gait {
    /// Start of the current walk, `None` while standing
    moving_since: Option<f64>,
    moving_until: f64,
    ticks: u64,
    last_tick_ms: f64,
}

impl Gait {
    fn is_walking(&self, now_ms: f64) -> bool {
        self.moving_since.is_some() && now_ms < self.moving_until
    }

    fn extend(&mut self, now_ms: f64, moving_ms: f64) {
        if !self.is_walking(now_ms) {
            self.moving_since = Some(now_ms);
            self.last_tick_ms = now_ms;
        }
        self.moving_until = now_ms + moving_ms;
    }

    fn advance(&mut self, now_ms: f64, fps: f32) {
        if self.moving_since.is_none() {
            return;
        }
        let interval = 1000.0 / fps.max(1.0) as f64;
        let until = now_ms.min(self.moving_until);
        if until > self.last_tick_ms {
            let n = ((until - self.last_tick_ms) / interval).floor();
            self.ticks += n as u64;
            self.last_tick_ms += n * interval;
        }
        if now_ms >= self.moving_until {
            self.moving_since = None;
        }
    }

    /// Position within a sequence of `len` frames
    fn cycle_index(&self, now_ms: f64, fps: f32, cadence: Cadence, len: usize) -> usize {
        let Some(since) = self.moving_since.filter(|_| self.is_walking(now_ms)) else {
            return 0;
        };
        let step = match cadence {
            Cadence::Elapsed => ((now_ms - since).max(0.0) / 1000.0 * fps as f64).floor() as u64,
            Cadence::Ticks => self.ticks,
        };
        (step % len.max(1) as u64) as usize
    }
}

/// Per-character motion state, owned by the game state
#[derive(Debug, Clone)]
pub struct AnimationState {
    logical: GridPos,
    render: Vec2,
    facing: Direction,
    tween: Option<MovementTween>,
    gait: Gait,
}

impl AnimationState {
    /// Idle at `pos`, facing the camera
    pub fn new(pos: GridPos) -> Self {
        Self {
            logical: pos,
            render: pos.as_vec2(),
            facing: Direction::Down,
            tween: None,
            gait: Gait::default(),
        }
    }

    /// Drop any glide or walk in flight and stand at `pos`
    pub fn reset(&mut self, pos: GridPos) {
        *self = Self::new(pos);
    }

    pub fn logical(&self) -> GridPos {
        self.logical
    }

    pub fn render(&self) -> Vec2 {
        self.render
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn tween(&self) -> Option<&MovementTween> {
        self.tween.as_ref()
    }

    pub fn phase(&self) -> MotionPhase {
        if self.tween.is_some() {
            MotionPhase::Moving
        } else {
            MotionPhase::Idle
        }
    }

    pub fn is_walking(&self, now_ms: f64) -> bool {
        self.gait.is_walking(now_ms)
    }

    /// Render position at `now_ms` without mutating state
    pub fn render_at(&self, now_ms: f64) -> Vec2 {
        match &self.tween {
            Some(tween) => tween.sample(now_ms),
            None => self.render,
        }
    }

    /// Record a logical move to `to` and start animating it.
    ///
    /// A glide already in flight is replaced; the new one starts from where
    /// the old one currently is.
    pub fn commit(&mut self, to: GridPos, now_ms: f64, profile: &CharacterProfile) {
        let from = self.render_at(now_ms);
        if to != self.logical {
            self.facing = Direction::from_step(self.logical, to);
        }
        self.logical = to;

        if profile.tween_ms > 0.0 {
            self.tween = Some(MovementTween {
                from,
                to,
                start_ms: now_ms,
                duration_ms: profile.tween_ms,
                facing: self.facing,
            });
            self.render = from;
        } else {
            self.tween = None;
            self.render = to.as_vec2();
        }

        self.gait.extend(now_ms, profile.moving_ms());
    }

    /// Per-frame update of derived state
    pub fn update(&mut self, now_ms: f64, profile: &CharacterProfile) {
        if let Some(tween) = self.tween {
            if tween.is_finished(now_ms) {
                self.render = tween.to.as_vec2();
                self.tween = None;
            } else {
                self.render = tween.sample(now_ms);
            }
        } else {
            self.render = self.logical.as_vec2();
        }
        self.gait.advance(now_ms, profile.fps);
    }

    /// Sprite frame for the current facing and walk state
    pub fn frame(&self, now_ms: f64, profile: &CharacterProfile) -> SpriteFrame {
        let seq = profile.frames.sequence(self.facing);
        let i = self
            .gait
            .cycle_index(now_ms, profile.fps, profile.cadence, seq.len());
        SpriteFrame {
            index: seq.get(i).copied().unwrap_or(0),
            mirrored: profile.frames.is_mirrored(self.facing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pursuer() -> CharacterProfile {
        CharacterProfile::pursuer()
    }

    #[test]
    fn test_tween_endpoints_are_exact() {
        let tween = MovementTween {
            from: Vec2::new(1.3, 2.7),
            to: GridPos::new(2, 3),
            start_ms: 1000.0,
            duration_ms: 160.0,
            facing: Direction::Right,
        };
        assert_eq!(tween.sample(1000.0), Vec2::new(1.3, 2.7));
        assert_eq!(tween.sample(900.0), Vec2::new(1.3, 2.7));
        assert_eq!(tween.sample(1160.0), Vec2::new(2.0, 3.0));
        assert_eq!(tween.sample(5000.0), Vec2::new(2.0, 3.0));
        assert!((tween.progress(1080.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_tween_is_finished() {
        let tween = MovementTween {
            from: Vec2::ZERO,
            to: GridPos::new(1, 0),
            start_ms: 0.0,
            duration_ms: 0.0,
            facing: Direction::Right,
        };
        assert!(tween.is_finished(0.0));
        assert_eq!(tween.sample(0.0), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_glide_then_idle() {
        let profile = pursuer();
        let mut anim = AnimationState::new(GridPos::new(1, 1));
        anim.commit(GridPos::new(2, 1), 0.0, &profile);

        assert_eq!(anim.phase(), MotionPhase::Moving);
        assert_eq!(anim.facing(), Direction::Right);
        assert_eq!(anim.logical(), GridPos::new(2, 1));
        assert_eq!(anim.render(), Vec2::new(1.0, 1.0));

        anim.update(80.0, &profile);
        assert!((anim.render().x - 1.5).abs() < 1e-6);

        anim.update(160.0, &profile);
        assert_eq!(anim.phase(), MotionPhase::Idle);
        assert_eq!(anim.render(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_commit_mid_flight_rebases_on_render_position() {
        let profile = pursuer();
        let mut anim = AnimationState::new(GridPos::new(1, 1));
        anim.commit(GridPos::new(2, 1), 0.0, &profile);
        anim.commit(GridPos::new(3, 1), 80.0, &profile);

        let tween = anim.tween().copied().unwrap();
        assert!((tween.from.x - 1.5).abs() < 1e-6);
        assert_eq!(tween.to, GridPos::new(3, 1));
        assert_eq!(tween.start_ms, 80.0);
    }

    #[test]
    fn test_player_snaps() {
        let profile = CharacterProfile::player();
        let mut anim = AnimationState::new(GridPos::new(1, 1));
        anim.commit(GridPos::new(1, 2), 0.0, &profile);

        assert_eq!(anim.phase(), MotionPhase::Idle);
        assert_eq!(anim.render(), Vec2::new(1.0, 2.0));
        assert_eq!(anim.facing(), Direction::Down);
        assert!(anim.is_walking(100.0));
        assert!(!anim.is_walking(180.0));
    }

    #[test]
    fn test_elapsed_cadence_cycles_then_freezes() {
        let profile = CharacterProfile::player();
        let mut anim = AnimationState::new(GridPos::new(1, 1));
        assert_eq!(anim.frame(0.0, &profile).index, 0);

        anim.commit(GridPos::new(2, 1), 1000.0, &profile);
        // Side sequence starts at 7, one frame every 125 ms
        assert_eq!(anim.frame(1000.0, &profile).index, 7);
        assert_eq!(anim.frame(1130.0, &profile).index, 8);

        anim.update(1200.0, &profile);
        assert!(!anim.is_walking(1200.0));
        assert_eq!(anim.frame(1200.0, &profile).index, 7);
    }

    #[test]
    fn test_walk_continues_across_quick_steps() {
        let profile = CharacterProfile::player();
        let mut anim = AnimationState::new(GridPos::new(1, 1));
        anim.commit(GridPos::new(2, 1), 0.0, &profile);
        anim.commit(GridPos::new(3, 1), 150.0, &profile);
        // Still counting from the first step: 300 ms -> frame 2
        assert_eq!(anim.frame(300.0, &profile).index, 9);
    }

    #[test]
    fn test_tick_cadence_persists_between_walks() {
        let mut profile = pursuer();
        profile.cadence = Cadence::Ticks;
        let mut anim = AnimationState::new(GridPos::new(1, 1));

        anim.commit(GridPos::new(1, 2), 0.0, &profile);
        anim.update(100.0, &profile);
        assert_eq!(anim.frame(100.0, &profile).index, 0);
        anim.update(130.0, &profile);
        assert_eq!(anim.frame(130.0, &profile).index, 1);

        // Glide over: frozen on the standing pose
        anim.update(400.0, &profile);
        assert_eq!(anim.frame(400.0, &profile).index, 0);

        // Next walk resumes the counter (1 tick so far, 1 more at 525)
        anim.commit(GridPos::new(1, 3), 400.0, &profile);
        assert_eq!(anim.frame(400.0, &profile).index, 1);
        anim.update(525.0, &profile);
        assert_eq!(anim.frame(525.0, &profile).index, 0);
    }

    #[test]
    fn test_mirroring_follows_side_frame_facing() {
        let player = FrameSequences::player();
        assert!(player.is_mirrored(Direction::Left));
        assert!(!player.is_mirrored(Direction::Right));
        assert!(!player.is_mirrored(Direction::Up));

        let pursuer = FrameSequences::pursuer();
        assert!(pursuer.is_mirrored(Direction::Right));
        assert!(!pursuer.is_mirrored(Direction::Left));
        assert_eq!(pursuer.sequence(Direction::Right), pursuer.sequence(Direction::Left));
    }

    #[test]
    fn test_empty_sequence_draws_frame_zero() {
        let mut profile = CharacterProfile::player();
        profile.frames.down.clear();
        let anim = AnimationState::new(GridPos::new(1, 1));
        assert_eq!(anim.frame(0.0, &profile).index, 0);
    }

    #[test]
    fn test_reset_cancels_glide() {
        let profile = pursuer();
        let mut anim = AnimationState::new(GridPos::new(1, 1));
        anim.commit(GridPos::new(2, 1), 0.0, &profile);
        anim.reset(GridPos::new(5, 5));
        assert_eq!(anim.phase(), MotionPhase::Idle);
        assert_eq!(anim.render(), Vec2::new(5.0, 5.0));
        assert_eq!(anim.facing(), Direction::Down);
        assert!(!anim.is_walking(10.0));
    }
}
