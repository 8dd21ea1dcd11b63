//! Outgoing notifications from actors to the rest of the game.
//!
//! Actors never reach for a global sound system or game manager. They push
//! [`GameEvent`]s into their own [`Outbox`]; the host drains every outbox once
//! per step into the [`EventLog`], tagging each event with its entity.

use hecs::Entity;

/// One-shot sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    Jump,
    Attack,
    Hurt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sfx(Sfx),
    HealthChanged { health: i32, max_health: i32 },
    EnergyChanged { energy: f32, max_energy: f32 },
    CameraShake { strength: f32 },
    /// The player interacted with this entity.
    Interacted { target: Entity },
    SaveRequested,
    SceneChangeRequested { scene: String, entry_point: String },
    /// Death animation finished.
    Died,
}

/// Per-actor queue of events produced during a step.
#[derive(Debug, Default, Clone)]
pub struct Outbox(Vec<GameEvent>);

impl Outbox {
    pub fn push(&mut self, event: GameEvent) {
        self.0.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.0.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.0.iter()
    }
}

/// An event attributed to the entity that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub entity: Entity,
    pub event: GameEvent,
}

/// Host-side sink for every event raised during a step.
#[derive(Debug, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entity: Entity, event: GameEvent) {
        tracing::trace!(?entity, ?event, "game event");
        self.records.push(EventRecord { entity, event });
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Hand all pending records to the caller.
    pub fn take(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }
}
