use std::sync::Arc;

use glam::Vec2;
use strum::{EnumCount, EnumIter, IntoStaticStr};

use super::move_toward;
use crate::components::{Aabb, Body, Damage, Facing, Stats};
use crate::config::{BoarConfig, PhysicsConfig};
use crate::engine::anim::AnimationPlayer;
use crate::engine::time::Countdown;
use crate::events::{GameEvent, Outbox, Sfx};
use crate::fsm::{Actor, StateMachine, Transition};
use crate::scene::Level;
use crate::systems::collision::{move_and_slide, probe_contacts};
use crate::systems::raycast::ray_aabb_intersection;

const CLIPS: &[(&str, f32, bool)] = &[
    ("idle", 1.0, true),
    ("walk", 0.8, true),
    ("run", 0.5, true),
    ("hit", 0.3, false),
    ("die", 0.6, false),
];

/// How far past its side a boar probes for walls and ledges.
const PROBE_REACH: f32 = 4.0;

/// Patrol/chase enemy. Canonical order starts in `Idle`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumCount, IntoStaticStr,
)]
pub enum BoarState {
    Idle,
    Walk,
    Run,
    Hurt,
    Dying,
}

impl BoarState {
    fn clip(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Hurt => "hit",
            Self::Dying => "die",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoarSnapshot {
    pub health: i32,
    pub damage_pending: bool,
    pub sees_target: bool,
    pub wall_ahead: bool,
    pub floor_ahead: bool,
    pub calm_down: f32,
    pub animation_playing: bool,
    pub time_in_state: f32,
    pub idle_patience: f32,
}

pub struct Boar {
    machine: StateMachine<BoarState>,
    config: BoarConfig,
    gravity: f32,
    level: Arc<Level>,

    body: Body,
    stats: Stats,
    animation: AnimationPlayer,
    calm_down: Countdown,

    pending_damage: Option<Damage>,
    /// Box of whatever the boar is hunting, refreshed by the host each step.
    target: Option<Aabb>,
    finished: bool,
    outbox: Outbox,
}

impl Boar {
    pub fn new(config: &BoarConfig, physics: &PhysicsConfig, level: Arc<Level>, spawn: Vec2) -> Self {
        let mut body = Body::new(spawn, config.half_size);
        body.facing = Facing::Left;
        probe_contacts(&mut body, &level);

        Self {
            machine: StateMachine::new(),
            config: config.clone(),
            gravity: physics.gravity,
            level,
            body,
            stats: Stats::new(config.max_health, 0.0, 0.0),
            animation: AnimationPlayer::new(CLIPS),
            calm_down: Countdown::new(config.calm_down),
            pending_damage: None,
            target: None,
            finished: false,
            outbox: Outbox::default(),
        }
    }

    pub fn state(&self) -> Option<BoarState> {
        self.machine.state()
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

    pub fn animation(&self) -> &AnimationPlayer {
        &self.animation
    }

    pub fn calm_down(&self) -> &Countdown {
        &self.calm_down
    }

    pub fn pending_damage(&self) -> Option<&Damage> {
        self.pending_damage.as_ref()
    }

    /// The death clip has played out; the host may despawn the boar.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn contact_damage(&self) -> i32 {
        self.config.contact_damage
    }

    /// Hurts whatever touches it, unless dying.
    pub fn hitbox(&self) -> Option<Aabb> {
        if self.state() == Some(BoarState::Dying) {
            None
        } else {
            Some(self.body.aabb())
        }
    }

    pub fn outbox_mut(&mut self) -> &mut Outbox {
        &mut self.outbox
    }

    pub fn set_target(&mut self, target: Option<Aabb>) {
        self.target = target;
    }

    pub fn advance_timers(&mut self, dt: f32) {
        self.calm_down.advance(dt);
        self.animation.advance(dt);
    }

    /// Last write wins; ignored once dying.
    pub fn receive_damage(&mut self, damage: Damage) -> bool {
        if self.state() == Some(BoarState::Dying) || self.stats.is_dead() {
            return false;
        }
        self.pending_damage = Some(damage);
        true
    }

    // -- sensing ------------------------------------------------------------

    fn forward(&self) -> Vec2 {
        Vec2::new(self.body.facing.sign(), 0.0)
    }

    fn wall_ahead(&self) -> bool {
        self.level
            .raycast(self.body.position, self.forward(), self.body.half_size.x + PROBE_REACH)
            .is_some()
    }

    fn floor_ahead(&self) -> bool {
        let origin = self.body.position + self.forward() * (self.body.half_size.x + PROBE_REACH);
        self.level
            .raycast(origin, Vec2::NEG_Y, self.body.half_size.y + PROBE_REACH)
            .is_some()
    }

    /// Forward line of sight: the target box is hit before any solid.
    fn sees_target(&self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let origin = self.body.position;
        let dir = self.forward();
        match ray_aabb_intersection(origin, dir, &target) {
            Some(t) if (0.0..=self.config.sight_range).contains(&t) => {
                self.level.raycast(origin, dir, t).is_none()
            }
            _ => false,
        }
    }

    fn turn_around(&mut self) {
        self.body.facing = self.body.facing.flipped();
    }

    fn move_at(&mut self, speed: f32, dt: f32) {
        let target = speed * self.body.facing.sign();
        self.body.velocity.x =
            move_toward(self.body.velocity.x, target, self.config.acceleration * dt);
        self.body.velocity.y -= self.gravity * dt;
        move_and_slide(&mut self.body, &self.level, dt);
    }
}

impl Actor for Boar {
    type State = BoarState;
    type Snapshot = BoarSnapshot;

    fn machine(&self) -> &StateMachine<BoarState> {
        &self.machine
    }

    fn machine_mut(&mut self) -> &mut StateMachine<BoarState> {
        &mut self.machine
    }

    fn snapshot(&self) -> BoarSnapshot {
        BoarSnapshot {
            health: self.stats.health(),
            damage_pending: self.pending_damage.is_some(),
            sees_target: self.sees_target(),
            wall_ahead: self.wall_ahead(),
            floor_ahead: self.floor_ahead(),
            calm_down: self.calm_down.time_remaining(),
            animation_playing: self.animation.is_playing(),
            time_in_state: self.machine.elapsed(),
            idle_patience: self.config.idle_patience,
        }
    }

    fn decide(state: BoarState, s: &BoarSnapshot) -> Transition<BoarState> {
        use BoarState::*;
        use Transition::{Keep, To};

        if s.health <= 0 {
            return if state == Dying { Keep } else { To(Dying) };
        }
        if state == Dying {
            return Keep;
        }
        if s.damage_pending && state != Hurt {
            return To(Hurt);
        }

        match state {
            Idle => {
                if s.sees_target {
                    To(Run)
                } else if s.time_in_state > s.idle_patience {
                    To(Walk)
                } else {
                    Keep
                }
            }
            Walk => {
                if s.sees_target {
                    To(Run)
                } else if s.wall_ahead || !s.floor_ahead {
                    To(Idle)
                } else {
                    Keep
                }
            }
            Run => {
                if !s.sees_target && s.calm_down <= 0.0 {
                    To(Walk)
                } else {
                    Keep
                }
            }
            Hurt => {
                if s.animation_playing { Keep } else { To(Run) }
            }
            Dying => Keep,
        }
    }

    fn on_enter(&mut self, _from: BoarState, to: BoarState) {
        self.animation.play(to.clip());

        match to {
            BoarState::Idle => {
                if self.wall_ahead() {
                    self.turn_around();
                }
            }
            BoarState::Walk => {
                if !self.floor_ahead() {
                    self.turn_around();
                }
            }
            BoarState::Run => {}
            BoarState::Hurt => {
                if let Some(damage) = self.pending_damage.take() {
                    if self.stats.set_health(self.stats.health() - damage.amount) {
                        self.outbox.push(GameEvent::HealthChanged {
                            health: self.stats.health(),
                            max_health: self.stats.max_health(),
                        });
                    }
                    let away = damage.direction_to(self.body.position);
                    self.body.velocity = away * self.config.knockback;
                    // Face whoever hit us.
                    if let Some(facing) = Facing::from_x(-away.x) {
                        self.body.facing = facing;
                    }
                }
                self.outbox.push(GameEvent::Sfx(Sfx::Hurt));
            }
            BoarState::Dying => {
                tracing::info!(position = ?self.body.position, "boar dying");
            }
        }
    }

    fn tick(&mut self, state: BoarState, dt: f32) {
        match state {
            BoarState::Idle | BoarState::Hurt | BoarState::Dying => self.move_at(0.0, dt),
            BoarState::Walk => self.move_at(self.config.max_speed / 3.0, dt),
            BoarState::Run => {
                if self.wall_ahead() || !self.floor_ahead() {
                    self.turn_around();
                }
                self.move_at(self.config.max_speed, dt);
                if self.sees_target() {
                    self.calm_down.start();
                }
            }
        }

        if state == BoarState::Dying && !self.finished && !self.animation.is_playing() {
            self.finished = true;
            self.outbox.push(GameEvent::Died);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BoarSnapshot {
        BoarSnapshot {
            health: 3,
            damage_pending: false,
            sees_target: false,
            wall_ahead: false,
            floor_ahead: true,
            calm_down: 0.0,
            animation_playing: true,
            time_in_state: 0.0,
            idle_patience: 2.0,
        }
    }

    fn decide(state: BoarState, s: &BoarSnapshot) -> Transition<BoarState> {
        <Boar as Actor>::decide(state, s)
    }

    #[test]
    fn idle_wanders_after_patience() {
        let bored = BoarSnapshot {
            time_in_state: 2.5,
            ..base()
        };
        assert_eq!(decide(BoarState::Idle, &base()), Transition::Keep);
        assert_eq!(decide(BoarState::Idle, &bored), Transition::To(BoarState::Walk));
    }

    #[test]
    fn walk_stops_at_walls_and_ledges() {
        let wall = BoarSnapshot {
            wall_ahead: true,
            ..base()
        };
        let ledge = BoarSnapshot {
            floor_ahead: false,
            ..base()
        };
        assert_eq!(decide(BoarState::Walk, &wall), Transition::To(BoarState::Idle));
        assert_eq!(decide(BoarState::Walk, &ledge), Transition::To(BoarState::Idle));
    }

    #[test]
    fn chase_lasts_until_calm() {
        let spotted = BoarSnapshot {
            sees_target: true,
            ..base()
        };
        assert_eq!(decide(BoarState::Walk, &spotted), Transition::To(BoarState::Run));

        let lost_recently = BoarSnapshot {
            calm_down: 1.0,
            ..base()
        };
        assert_eq!(decide(BoarState::Run, &lost_recently), Transition::Keep);
        assert_eq!(decide(BoarState::Run, &base()), Transition::To(BoarState::Walk));
    }

    #[test]
    fn hurt_recovers_into_chase() {
        let done = BoarSnapshot {
            animation_playing: false,
            damage_pending: true,
            ..base()
        };
        assert_eq!(decide(BoarState::Hurt, &done), Transition::To(BoarState::Run));
        assert_eq!(decide(BoarState::Run, &done), Transition::To(BoarState::Hurt));
    }

    #[test]
    fn sight_is_blocked_by_solids() {
        let level = Arc::new(Level::new(vec![Aabb::new(
            Vec2::new(-60.0, 12.0),
            Vec2::new(4.0, 40.0),
        )]));
        let mut boar = Boar::new(
            &BoarConfig::default(),
            &PhysicsConfig::default(),
            level,
            Vec2::new(0.0, 12.0),
        );
        let player = |x: f32| Some(Aabb::new(Vec2::new(x, 16.0), Vec2::new(10.0, 16.0)));

        boar.set_target(player(-40.0));
        assert!(boar.sees_target());

        boar.set_target(player(-100.0));
        assert!(!boar.sees_target());

        boar.set_target(player(40.0));
        assert!(!boar.sees_target(), "target behind the boar");
    }
}
