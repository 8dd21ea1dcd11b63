use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec2;
use hecs::Entity;
use strum::{EnumCount, EnumIter, IntoStaticStr};

use super::{is_zero_approx, move_toward};
use crate::components::{Aabb, Body, Damage, Facing, Stats};
use crate::config::{PhysicsConfig, PlayerConfig};
use crate::engine::anim::AnimationPlayer;
use crate::engine::input::{Action, InputState};
use crate::engine::time::Countdown;
use crate::events::{GameEvent, Outbox, Sfx};
use crate::fsm::{Actor, StateMachine, Transition};
use crate::scene::Level;
use crate::systems::collision::{move_and_slide, probe_contacts};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// `(clip, length in seconds, looping)`.
const CLIPS: &[(&str, f32, bool)] = &[
    ("idle", 0.8, true),
    ("running", 0.6, true),
    ("jump", 0.3, false),
    ("fall", 0.4, true),
    ("landing", 0.2, false),
    ("wall_sliding", 0.4, true),
    ("attack_1", 0.35, false),
    ("attack_2", 0.35, false),
    ("attack_3", 0.45, false),
    ("hurt", 0.4, false),
    ("die", 0.8, false),
    ("sliding_start", 0.15, false),
    ("sliding_loop", 0.3, true),
    ("sliding_end", 0.2, false),
];

/// Wall probes reach this far past the body's side.
const WALL_PROBE_REACH: f32 = 4.0;
/// Attack reach in front of the body, and half height of the swing box.
const ATTACK_REACH: f32 = 14.0;
const ATTACK_HALF_HEIGHT: f32 = 10.0;

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Every mode the player can be in. Declaration order is canonical: the
/// machine starts in `Idle`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum PlayerState {
    Idle,
    Running,
    Jump,
    Fall,
    Landing,
    WallSliding,
    WallJump,
    Attack1,
    Attack2,
    Attack3,
    Hurt,
    Dying,
    SlidingStart,
    SlidingLoop,
    SlidingEnd,
}

impl PlayerState {
    /// States that only make sense with feet on the floor. Losing the floor in
    /// any of them drops straight into `Fall`.
    pub fn is_grounded(self) -> bool {
        matches!(
            self,
            Self::Idle | Self::Running | Self::Landing | Self::Attack1 | Self::Attack2 | Self::Attack3
        )
    }

    pub fn is_attack(self) -> bool {
        matches!(self, Self::Attack1 | Self::Attack2 | Self::Attack3)
    }

    fn clip(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Jump | Self::WallJump => "jump",
            Self::Fall => "fall",
            Self::Landing => "landing",
            Self::WallSliding => "wall_sliding",
            Self::Attack1 => "attack_1",
            Self::Attack2 => "attack_2",
            Self::Attack3 => "attack_3",
            Self::Hurt => "hurt",
            Self::Dying => "die",
            Self::SlidingStart => "sliding_start",
            Self::SlidingLoop => "sliding_loop",
            Self::SlidingEnd => "sliding_end",
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything [`Player::decide`] is allowed to look at.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub health: i32,
    pub damage_pending: bool,

    pub on_floor: bool,
    pub on_wall: bool,
    /// On a wall with both hand and foot probes touching it.
    pub can_wall_slide: bool,
    /// Something solid directly ahead at foot height.
    pub foot_blocked: bool,
    pub velocity: Vec2,
    /// Height lost since the current fall began.
    pub fall_distance: f32,

    pub direction: f32,
    pub attack_pressed: bool,
    pub combo_requested: bool,

    pub jump_request: f32,
    pub coyote: f32,
    pub slide_request: f32,

    pub energy: f32,
    pub animation_playing: bool,
    pub time_in_state: f32,
    pub just_entered: bool,

    pub landing_height: f32,
    pub sliding_duration: f32,
    pub sliding_energy: f32,
}

impl PlayerSnapshot {
    fn can_jump(&self) -> bool {
        self.on_floor || self.coyote > 0.0
    }

    fn is_still(&self) -> bool {
        is_zero_approx(self.direction) && is_zero_approx(self.velocity.x)
    }

    fn wants_slide(&self) -> bool {
        self.slide_request > 0.0 && self.energy >= self.sliding_energy && !self.foot_blocked
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Timed conditions the player reads as inputs.
#[derive(Debug, Clone)]
pub struct PlayerTimers {
    /// Jump pressed recently.
    pub jump_request: Countdown,
    /// Grace period after walking off a ledge.
    pub coyote: Countdown,
    pub invincible: Countdown,
    /// Attack presses inside this window chain into the next attack.
    pub combo_window: Countdown,
    /// Slide pressed recently.
    pub slide_request: Countdown,
}

impl PlayerTimers {
    fn new(config: &PlayerConfig) -> Self {
        Self {
            jump_request: Countdown::new(config.jump_buffer),
            coyote: Countdown::new(config.coyote_time),
            invincible: Countdown::new(config.invincible_time),
            combo_window: Countdown::new(config.combo_window),
            slide_request: Countdown::new(config.slide_buffer),
        }
    }

    fn advance(&mut self, dt: f32) {
        self.jump_request.advance(dt);
        self.coyote.advance(dt);
        self.invincible.advance(dt);
        self.combo_window.advance(dt);
        self.slide_request.advance(dt);
    }
}

pub struct Player {
    machine: StateMachine<PlayerState>,
    config: PlayerConfig,
    gravity: f32,
    level: Arc<Level>,

    body: Body,
    stats: Stats,
    animation: AnimationPlayer,
    timers: PlayerTimers,

    direction: f32,
    attack_pressed: bool,
    combo_requested: bool,
    pending_damage: Option<Damage>,
    fall_from_y: f32,
    /// Interactables whose area the player stands in, with their positions.
    interactables: Vec<(Entity, Vec2)>,
    /// Entities already struck by the current swing.
    swing_hits: Vec<Entity>,
    /// Sprite opacity; flickers while invincible.
    alpha: f32,
    died: bool,
    outbox: Outbox,
}

impl Player {
    /// Build a player standing at `spawn` with full stats. Call
    /// [`fsm::activate`](crate::fsm::activate) once it is placed in the world.
    pub fn new(config: &PlayerConfig, physics: &PhysicsConfig, level: Arc<Level>, spawn: Vec2) -> Self {
        let stats = Stats::new(config.max_health, config.max_energy, config.energy_regen);
        Self::with_stats(config, physics, level, spawn, stats)
    }

    /// Like [`new`](Self::new), carrying stats over from a previous scene.
    pub fn with_stats(
        config: &PlayerConfig,
        physics: &PhysicsConfig,
        level: Arc<Level>,
        spawn: Vec2,
        stats: Stats,
    ) -> Self {
        let mut body = Body::new(spawn, config.half_size);
        probe_contacts(&mut body, &level);

        Self {
            machine: StateMachine::new(),
            config: config.clone(),
            gravity: physics.gravity,
            level,
            body,
            stats,
            animation: AnimationPlayer::new(CLIPS),
            timers: PlayerTimers::new(config),
            direction: 0.0,
            attack_pressed: false,
            combo_requested: false,
            pending_damage: None,
            fall_from_y: spawn.y,
            interactables: Vec::new(),
            swing_hits: Vec::new(),
            alpha: 1.0,
            died: false,
            outbox: Outbox::default(),
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn state(&self) -> Option<PlayerState> {
        self.machine.state()
    }

    pub fn time_in_state(&self) -> f32 {
        self.machine.elapsed()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    pub fn timers(&self) -> &PlayerTimers {
        &self.timers
    }

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    pub fn pending_damage(&self) -> Option<&Damage> {
        self.pending_damage.as_ref()
    }

    pub fn combo_requested(&self) -> bool {
        self.combo_requested
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_dying(&self) -> bool {
        self.state() == Some(PlayerState::Dying)
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    pub fn outbox_mut(&mut self) -> &mut Outbox {
        &mut self.outbox
    }

    // -- host notifications -------------------------------------------------

    /// Feed this step's input. Presses arm the buffers that `decide` reads
    /// later in the same step.
    pub fn handle_input(&mut self, input: &InputState) {
        self.direction = input.axis();
        self.attack_pressed = input.just_pressed(Action::Attack);

        if input.just_pressed(Action::Jump) {
            self.timers.jump_request.start();
        }
        if input.just_released(Action::Jump) {
            self.timers.jump_request.stop();
            // Variable jump height: letting go early cuts the ascent.
            let cut = self.config.jump_velocity / 2.0;
            if self.body.velocity.y > cut {
                self.body.velocity.y = cut;
            }
        }
        if self.attack_pressed && !self.timers.combo_window.is_stopped() {
            self.combo_requested = true;
        }
        if input.just_pressed(Action::Slide) {
            self.timers.slide_request.start();
        }
        if input.just_pressed(Action::Interact) {
            if let Some(target) = self.nearest_interactable() {
                tracing::debug!(?target, "player interacts");
                self.outbox.push(GameEvent::Interacted { target });
            }
        }
    }

    /// Count down timed conditions, play animations forward and regenerate
    /// energy. Independent of the state machine; call before stepping it.
    pub fn advance_timers(&mut self, dt: f32) {
        self.timers.advance(dt);
        self.animation.advance(dt);
        self.stats.regenerate(dt);
    }

    /// Post a hit. Only one hit is buffered: a later one overwrites an
    /// unconsumed earlier one. Ignored while invincible or dying.
    pub fn receive_damage(&mut self, damage: Damage) -> bool {
        if self.is_dying() || self.stats.is_dead() || !self.timers.invincible.is_stopped() {
            tracing::trace!(?damage, "player ignores hit");
            return false;
        }
        self.pending_damage = Some(damage);
        true
    }

    pub fn register_interactable(&mut self, entity: Entity, position: Vec2) -> bool {
        if self.is_dying() || self.interactables.iter().any(|(e, _)| *e == entity) {
            return false;
        }
        self.interactables.push((entity, position));
        true
    }

    pub fn unregister_interactable(&mut self, entity: Entity) -> bool {
        let before = self.interactables.len();
        self.interactables.retain(|(e, _)| *e != entity);
        self.interactables.len() != before
    }

    /// The registered interactable closest to the player.
    pub fn nearest_interactable(&self) -> Option<Entity> {
        let here = self.body.position;
        self.interactables
            .iter()
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(here)
                    .total_cmp(&b.distance_squared(here))
            })
            .map(|(entity, _)| *entity)
    }

    /// Swing box while an attack state is active.
    pub fn attack_box(&self) -> Option<Aabb> {
        if !self.state().is_some_and(PlayerState::is_attack) {
            return None;
        }
        let offset = self.body.facing.sign() * (self.body.half_size.x + ATTACK_REACH);
        Some(Aabb::new(
            self.body.position + Vec2::new(offset, 0.0),
            Vec2::new(ATTACK_REACH, ATTACK_HALF_HEIGHT),
        ))
    }

    /// Mark `target` as struck by the current swing. Returns `false` if it
    /// was already hit, so each swing lands at most once per target.
    pub fn record_hit(&mut self, target: Entity) -> bool {
        if self.swing_hits.contains(&target) {
            return false;
        }
        self.swing_hits.push(target);
        true
    }

    pub fn attack_damage(&self) -> i32 {
        self.config.attack_damage
    }

    // -- sensing ------------------------------------------------------------

    fn probe_ahead(&self, height: f32) -> bool {
        let origin = self.body.position + Vec2::new(0.0, height);
        let dir = Vec2::new(self.body.facing.sign(), 0.0);
        self.level
            .raycast(origin, dir, self.body.half_size.x + WALL_PROBE_REACH)
            .is_some()
    }

    fn hand_touches_wall(&self) -> bool {
        self.probe_ahead(self.body.half_size.y * 0.5)
    }

    fn foot_touches_wall(&self) -> bool {
        self.probe_ahead(-self.body.half_size.y * 0.75)
    }

    fn can_wall_slide(&self) -> bool {
        self.body.on_wall && self.hand_touches_wall() && self.foot_touches_wall()
    }

    // -- movement -----------------------------------------------------------

    fn acceleration(&self) -> f32 {
        if self.body.on_floor {
            self.config.floor_acceleration
        } else {
            self.config.air_acceleration
        }
    }

    /// Steer toward the input direction under `gravity`.
    fn move_with(&mut self, gravity: f32, dt: f32) {
        let accel = self.acceleration();
        let target = self.direction * self.config.run_speed;
        self.body.velocity.x = move_toward(self.body.velocity.x, target, accel * dt);
        self.body.velocity.y -= gravity * dt;
        if let Some(facing) = Facing::from_x(self.direction) {
            self.body.facing = facing;
        }
        move_and_slide(&mut self.body, &self.level, dt);
    }

    /// Brake to a halt under `gravity`, ignoring input.
    fn stand(&mut self, gravity: f32, dt: f32) {
        let accel = self.acceleration();
        self.body.velocity.x = move_toward(self.body.velocity.x, 0.0, accel * dt);
        self.body.velocity.y -= gravity * dt;
        move_and_slide(&mut self.body, &self.level, dt);
    }

    fn slide(&mut self, dt: f32) {
        self.body.velocity.x = self.body.facing.sign() * self.config.sliding_speed;
        self.body.velocity.y -= self.gravity * dt;
        move_and_slide(&mut self.body, &self.level, dt);
    }

    fn face_away_from_wall(&mut self) {
        if let Some(facing) = Facing::from_x(self.body.wall_normal) {
            self.body.facing = facing;
        }
    }

    /// Decaying opacity oscillation over the invincibility window: fully
    /// transparent on the hit, settling back to opaque as the window closes.
    fn update_flicker(&mut self) {
        let window = &self.timers.invincible;
        self.alpha = if window.is_stopped() {
            1.0
        } else {
            let progress = window.progress();
            let wave = 0.5 * (1.0 + (progress * self.config.flicker_cycles * TAU).cos());
            1.0 - (1.0 - progress) * wave
        };
    }

    fn take_hit(&mut self) {
        let Some(damage) = self.pending_damage.take() else {
            return;
        };
        if self.stats.set_health(self.stats.health() - damage.amount) {
            self.outbox.push(GameEvent::HealthChanged {
                health: self.stats.health(),
                max_health: self.stats.max_health(),
            });
        }
        self.body.velocity = damage.direction_to(self.body.position) * self.config.knockback;
    }
}

// ---------------------------------------------------------------------------
// Transition graph
// ---------------------------------------------------------------------------

impl Actor for Player {
    type State = PlayerState;
    type Snapshot = PlayerSnapshot;

    fn machine(&self) -> &StateMachine<PlayerState> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut StateMachine<PlayerState> {
        &mut self.machine
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            health: self.stats.health(),
            damage_pending: self.pending_damage.is_some(),
            on_floor: self.body.on_floor,
            on_wall: self.body.on_wall,
            can_wall_slide: self.can_wall_slide(),
            foot_blocked: self.foot_touches_wall(),
            velocity: self.body.velocity,
            fall_distance: self.fall_from_y - self.body.position.y,
            direction: self.direction,
            attack_pressed: self.attack_pressed,
            combo_requested: self.combo_requested,
            jump_request: self.timers.jump_request.time_remaining(),
            coyote: self.timers.coyote.time_remaining(),
            slide_request: self.timers.slide_request.time_remaining(),
            energy: self.stats.energy(),
            animation_playing: self.animation.is_playing(),
            time_in_state: self.machine.elapsed(),
            just_entered: self.machine.just_entered(),
            landing_height: self.config.landing_height,
            sliding_duration: self.config.sliding_duration,
            sliding_energy: self.config.sliding_energy,
        }
    }

    fn decide(state: PlayerState, s: &PlayerSnapshot) -> Transition<PlayerState> {
        use PlayerState::*;
        use Transition::{Keep, To};

        // Priority checks, in this order, before any per-state branching.
        if s.health <= 0 {
            return if state == Dying { Keep } else { To(Dying) };
        }
        if state == Dying {
            return Keep;
        }
        // A hit landing mid-Hurt waits for the Hurt clip to end.
        if s.damage_pending && state != Hurt {
            return To(Hurt);
        }
        if s.can_jump() && s.jump_request > 0.0 {
            return To(Jump);
        }
        if state.is_grounded() && !s.on_floor {
            return To(Fall);
        }

        match state {
            Idle => {
                if s.attack_pressed {
                    To(Attack1)
                } else if s.wants_slide() {
                    To(SlidingStart)
                } else if !s.is_still() {
                    To(Running)
                } else {
                    Keep
                }
            }

            Running => {
                if s.attack_pressed {
                    To(Attack1)
                } else if s.wants_slide() {
                    To(SlidingStart)
                } else if s.is_still() {
                    To(Idle)
                } else {
                    Keep
                }
            }

            Jump => {
                if s.velocity.y <= 0.0 { To(Fall) } else { Keep }
            }

            Fall => {
                if s.on_floor {
                    if s.fall_distance >= s.landing_height { To(Landing) } else { To(Running) }
                } else if s.can_wall_slide {
                    To(WallSliding)
                } else {
                    Keep
                }
            }

            Landing => {
                if !s.is_still() {
                    To(Running)
                } else if !s.animation_playing {
                    To(Idle)
                } else {
                    Keep
                }
            }

            WallSliding => {
                if s.jump_request > 0.0 {
                    To(WallJump)
                } else if s.on_floor {
                    To(Idle)
                } else if !s.on_wall {
                    To(Fall)
                } else {
                    Keep
                }
            }

            // The launch tick still touches the wall it is leaving.
            WallJump => {
                if s.can_wall_slide && !s.just_entered {
                    To(WallSliding)
                } else if s.velocity.y <= 0.0 {
                    To(Fall)
                } else {
                    Keep
                }
            }

            Attack1 | Attack2 => {
                if s.animation_playing {
                    Keep
                } else if s.combo_requested {
                    To(if state == Attack1 { Attack2 } else { Attack3 })
                } else {
                    To(Idle)
                }
            }

            Attack3 | Hurt | SlidingEnd => {
                if s.animation_playing { Keep } else { To(Idle) }
            }

            Dying => Keep,

            SlidingStart => {
                if s.animation_playing { Keep } else { To(SlidingLoop) }
            }

            SlidingLoop => {
                if s.time_in_state > s.sliding_duration || s.on_wall {
                    To(SlidingEnd)
                } else {
                    Keep
                }
            }
        }
    }

    fn on_enter(&mut self, from: PlayerState, to: PlayerState) {
        use PlayerState::*;

        if !from.is_grounded() && to.is_grounded() {
            self.timers.coyote.stop();
        }
        self.animation.play(to.clip());

        match to {
            Idle | Running | Landing | WallSliding | SlidingLoop | SlidingEnd => {}

            Jump => {
                self.body.velocity.y = self.config.jump_velocity;
                self.timers.coyote.stop();
                self.timers.jump_request.stop();
                self.outbox.push(GameEvent::Sfx(Sfx::Jump));
            }

            Fall => {
                if from.is_grounded() {
                    self.timers.coyote.start();
                }
                self.fall_from_y = self.body.position.y;
            }

            WallJump => {
                let launch = self.config.wall_jump_velocity;
                self.body.velocity = Vec2::new(launch.x * self.body.wall_normal, launch.y);
                self.timers.jump_request.stop();
                self.outbox.push(GameEvent::Sfx(Sfx::Jump));
            }

            Attack1 | Attack2 | Attack3 => {
                self.combo_requested = false;
                self.swing_hits.clear();
                if to == Attack3 {
                    self.timers.combo_window.stop();
                } else {
                    self.timers.combo_window.start();
                }
                self.outbox.push(GameEvent::Sfx(Sfx::Attack));
            }

            Hurt => {
                self.take_hit();
                self.timers.invincible.start();
                self.outbox.push(GameEvent::Sfx(Sfx::Hurt));
                self.outbox.push(GameEvent::CameraShake {
                    strength: self.config.camera_shake,
                });
            }

            Dying => {
                self.timers.invincible.stop();
                self.timers.combo_window.stop();
                self.interactables.clear();
                tracing::info!(from = ?from, "player dying");
            }

            SlidingStart => {
                self.timers.slide_request.stop();
                let energy = self.stats.energy() - self.config.sliding_energy;
                if self.stats.set_energy(energy) {
                    self.outbox.push(GameEvent::EnergyChanged {
                        energy: self.stats.energy(),
                        max_energy: self.stats.max_energy(),
                    });
                }
            }
        }
    }

    fn tick(&mut self, state: PlayerState, dt: f32) {
        use PlayerState::*;

        self.update_flicker();
        let first_tick = self.machine.just_entered();

        match state {
            Idle | Running | Fall => self.move_with(self.gravity, dt),

            // Full launch speed on the first tick.
            Jump => self.move_with(if first_tick { 0.0 } else { self.gravity }, dt),

            Landing | Attack1 | Attack2 | Attack3 | Hurt | Dying | SlidingEnd => {
                self.stand(self.gravity, dt)
            }

            WallSliding => {
                self.move_with(self.gravity / 3.0, dt);
                self.face_away_from_wall();
            }

            WallJump => {
                if self.machine.elapsed() < self.config.wall_jump_lock {
                    self.face_away_from_wall();
                    self.stand(if first_tick { 0.0 } else { self.gravity }, dt);
                } else {
                    self.move_with(self.gravity, dt);
                }
            }

            SlidingStart | SlidingLoop => self.slide(dt),
        }

        if state == Dying && !self.died && !self.animation.is_playing() {
            self.died = true;
            tracing::info!("player died");
            self.outbox.push(GameEvent::Died);
        }
    }
}
