//! The meadow: a toy world implementing the collaborator traits.
//!
//! Needs rise every tick, creatures walk one metre per tick towards their
//! destination, daylight follows a 24-tick cycle and the weather is rerolled
//! every 12 ticks.  Neighbour queries go through an R-tree rebuilt after
//! movement.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use mind_context::{Actuator, Environment, Sensors};
use mind_core::{AgentId, EmotionKind, MindError, MindResult, Position, SimRng, Tick, Weather};

// ── Constants ─────────────────────────────────────────────────────────────────

const DAY_TICKS:     u64 = 24;
const WEATHER_TICKS: u64 = 12;
const WALK_SPEED:    f32 = 1.0;
const FIELD_SIZE:    f32 = 120.0;

/// Need names paired with their per-tick growth.
const NEEDS: [(&str, f32); 7] = [
    ("hunger",    0.010),
    ("thirst",    0.014),
    ("fatigue",   0.008),
    ("social",    0.005),
    ("fun",       0.006),
    ("curiosity", 0.004),
    ("hygiene",   0.003),
];

const STAGES: [&str; 4] = ["Baby", "Child", "Adult", "Elder"];

// ── Creature ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Creature {
    pub id:          AgentId,
    pub position:    Position,
    pub destination: Option<Position>,
    pub needs:       [f32; NEEDS.len()],
    pub stage:       &'static str,
    pub goal:        Option<String>,
    pub emotion:     Option<(EmotionKind, f32)>,
    pub alive:       bool,
    /// `false` once despawned; the handle is then invalid.
    pub present:     bool,
}

impl Creature {
    fn need(&self, name: &str) -> Option<f32> {
        NEEDS.iter().position(|(n, _)| *n == name).map(|i| self.needs[i])
    }

    fn need_mut(&mut self, name: &str) -> Option<&mut f32> {
        NEEDS.iter().position(|(n, _)| *n == name).map(|i| &mut self.needs[i])
    }

    fn is_live(&self) -> bool {
        self.present && self.alive
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct Entry {
    point: [f32; 2],
    id:    AgentId,
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for Entry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// A write the decision core asked for, applied after the tick.
#[derive(Clone, Debug)]
pub enum Command {
    Goal(AgentId, String),
    MoveTo(AgentId, Position),
    Fill(AgentId, String, f32),
}

/// Buffered [`Actuator`]: collects writes while the meadow is borrowed for
/// reading.
#[derive(Default)]
pub struct Commands {
    queue: Vec<Command>,
}

impl Commands {
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl Actuator for Commands {
    fn force_goal(&mut self, agent: AgentId, goal: &str) -> MindResult<()> {
        self.queue.push(Command::Goal(agent, goal.to_owned()));
        Ok(())
    }

    fn set_destination(&mut self, agent: AgentId, destination: Position) -> MindResult<()> {
        self.queue.push(Command::MoveTo(agent, destination));
        Ok(())
    }

    fn fill_need(&mut self, agent: AgentId, need: &str, delta: f32) -> MindResult<()> {
        if !NEEDS.iter().any(|(n, _)| *n == need) {
            return Err(MindError::missing(agent, "need store"));
        }
        self.queue.push(Command::Fill(agent, need.to_owned(), delta));
        Ok(())
    }
}

// ── Meadow ────────────────────────────────────────────────────────────────────

pub struct Meadow {
    creatures: Vec<Creature>,
    index:     RTree<Entry>,
    weather:   Weather,
    sunlight:  f32,
    rng:       SimRng,
}

impl Meadow {
    /// `count` creatures scattered over the field; life stages cycle
    /// Baby, Child, Adult, Elder.
    pub fn new(count: u32, seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let mut spawn = rng.child(1);
        let creatures = (0..count)
            .map(|i| {
                let mut needs = [0.0; NEEDS.len()];
                for n in &mut needs {
                    *n = spawn.gen_range(0.0..0.5);
                }
                Creature {
                    id:          AgentId(i),
                    position:    Position::new(spawn.gen_range(0.0..FIELD_SIZE), spawn.gen_range(0.0..FIELD_SIZE)),
                    destination: None,
                    needs,
                    stage:       STAGES[i as usize % STAGES.len()],
                    goal:        None,
                    emotion:     None,
                    alive:       true,
                    present:     true,
                }
            })
            .collect();
        let mut meadow = Self {
            creatures,
            index: RTree::new(),
            weather: Weather::Clear,
            sunlight: 1.0,
            rng,
        };
        meadow.reindex();
        meadow
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    fn get(&self, agent: AgentId) -> Option<&Creature> {
        self.creatures.get(agent.index()).filter(|c| c.present)
    }

    fn get_mut(&mut self, agent: AgentId) -> Option<&mut Creature> {
        self.creatures.get_mut(agent.index()).filter(|c| c.present)
    }

    pub fn kill(&mut self, agent: AgentId) {
        if let Some(c) = self.get_mut(agent) {
            c.alive = false;
        }
    }

    pub fn despawn(&mut self, agent: AgentId) {
        if let Some(c) = self.get_mut(agent) {
            c.present = false;
        }
        self.reindex();
    }

    /// Advance the world to `now`: daylight, weather, needs, movement.
    pub fn step(&mut self, now: Tick) {
        let phase = (now.0 % DAY_TICKS) as f32 / DAY_TICKS as f32;
        self.sunlight = (0.5 - 0.5 * (phase * std::f32::consts::TAU).cos()).clamp(0.0, 1.0);

        if now.0 % WEATHER_TICKS == 0 {
            let roll: f32 = self.rng.random();
            self.weather = match roll {
                r if r < 0.55 => Weather::Clear,
                r if r < 0.75 => Weather::Cloudy,
                r if r < 0.90 => Weather::Rain,
                r if r < 0.97 => Weather::Snow,
                _ => Weather::Storm,
            };
        }

        let night = self.sunlight < 0.2;
        let storm = self.weather == Weather::Storm;
        for c in self.creatures.iter_mut().filter(|c| c.is_live()) {
            for (i, (name, growth)) in NEEDS.iter().enumerate() {
                let growth = if night && *name == "fatigue" { growth * 2.5 } else { *growth };
                c.needs[i] = (c.needs[i] + growth).min(1.0);
            }
            c.emotion = if storm && self.rng.gen_bool(0.2) {
                Some((EmotionKind::Afraid, 0.9))
            } else {
                None
            };
            if let Some(dest) = c.destination {
                let d = c.position.distance(dest);
                if d <= WALK_SPEED {
                    c.position = dest;
                    c.destination = None;
                } else {
                    c.position = c.position.lerp(dest, WALK_SPEED / d);
                }
            }
        }
        self.reindex();
    }

    /// Fold buffered writes into the meadow.  Writes for creatures that have
    /// gone are dropped.
    pub fn apply(&mut self, commands: &mut Commands) {
        for cmd in commands.queue.drain(..) {
            match cmd {
                Command::Goal(agent, goal) => {
                    if let Some(c) = self.creatures.get_mut(agent.index()).filter(|c| c.present) {
                        c.goal = Some(goal);
                    }
                }
                Command::MoveTo(agent, dest) => {
                    if let Some(c) = self.creatures.get_mut(agent.index()).filter(|c| c.present) {
                        c.destination = Some(Position::new(
                            dest.x.clamp(0.0, FIELD_SIZE),
                            dest.y.clamp(0.0, FIELD_SIZE),
                        ));
                    }
                }
                Command::Fill(agent, need, delta) => {
                    if let Some(v) = self
                        .creatures
                        .get_mut(agent.index())
                        .filter(|c| c.present)
                        .and_then(|c| c.need_mut(&need))
                    {
                        *v = (*v - delta).clamp(0.0, 1.0);
                    }
                }
            }
        }
    }

    fn reindex(&mut self) {
        let entries = self
            .creatures
            .iter()
            .filter(|c| c.present)
            .map(|c| Entry { point: [c.position.x, c.position.y], id: c.id })
            .collect();
        self.index = RTree::bulk_load(entries);
    }
}

impl Sensors for Meadow {
    fn is_valid(&self, agent: AgentId) -> bool {
        self.get(agent).is_some()
    }

    fn is_alive(&self, agent: AgentId) -> bool {
        self.get(agent).is_some_and(|c| c.alive)
    }

    fn position(&self, agent: AgentId) -> Option<Position> {
        self.get(agent).map(|c| c.position)
    }

    fn normalized_need(&self, agent: AgentId, need: &str) -> Option<f32> {
        self.get(agent)?.need(need)
    }

    fn dominant_emotion(&self, agent: AgentId) -> Option<(EmotionKind, f32)> {
        self.get(agent)?.emotion
    }

    fn relationship(&self, a: AgentId, b: AgentId) -> Option<f32> {
        // Same life stage get along; everyone else is neutral.
        Some(if self.get(a)?.stage == self.get(b)?.stage { 0.5 } else { 0.0 })
    }

    fn nearby_agents(&self, position: Position, radius: f32) -> Vec<AgentId> {
        self.index
            .locate_within_distance([position.x, position.y], radius * radius)
            .map(|e| e.id)
            .collect()
    }

    fn life_stage(&self, agent: AgentId) -> Option<String> {
        self.get(agent).map(|c| c.stage.to_owned())
    }
}

impl Environment for Meadow {
    fn sunlight_factor(&self) -> f32 {
        self.sunlight
    }

    fn weather(&self) -> Weather {
        self.weather
    }
}
