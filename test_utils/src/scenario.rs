//! Input builders and scripted runs for world-level tests.
use escape::input::MoveKeys;
use escape::{TickInput, World, WorldEvent};

/// Fixed step used by the scripted helpers.
pub const STEP_SECONDS: f32 = 0.1;

/// Input holding the given movement keys for one step.
#[must_use]
pub fn walking(movement: MoveKeys) -> TickInput {
    TickInput {
        movement,
        ..TickInput::idle(STEP_SECONDS)
    }
}

/// Input with a single action key held for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Interact with the closest pickup.
    Interact,
    /// Operate the light switch.
    Toggle,
    /// Restart the world.
    Restart,
}

/// Input holding `key` and nothing else.
#[must_use]
pub fn press(key: Key) -> TickInput {
    let mut input = TickInput::idle(STEP_SECONDS);
    match key {
        Key::Interact => input.interact = true,
        Key::Toggle => input.toggle = true,
        Key::Restart => input.restart = true,
    }
    input
}

/// Drives a [`World`] and collects every event it reports.
#[derive(Debug, Default)]
pub struct Script {
    /// World under test.
    pub world: World,
    /// Events in the order they were reported.
    pub events: Vec<WorldEvent>,
}

impl Script {
    /// Wraps an existing world.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            world,
            events: Vec::new(),
        }
    }

    /// Runs `input` for `ticks` steps.
    pub fn repeat(&mut self, ticks: usize, input: &TickInput) -> &mut Self {
        for _ in 0..ticks {
            let events = self.world.tick(input);
            self.events.extend(events);
        }
        self
    }

    /// Runs a single step.
    pub fn step(&mut self, input: &TickInput) -> &mut Self {
        self.repeat(1, input)
    }

    /// Walks from the starting spot to the table, within reach of the
    /// lantern and the switch.
    ///
    /// Assumes the built-in room at its default tuning.
    pub fn walk_to_table(&mut self) -> &mut Self {
        let forward = walking(MoveKeys {
            forward: true,
            ..MoveKeys::default()
        });
        self.repeat(8, &forward)
    }

    /// Counts the reported events equal to `event`.
    #[must_use]
    pub fn count(&self, event: WorldEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}
