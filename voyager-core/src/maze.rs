//! Seeded maze generation and the maze mini-game run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::metadata::{GameMetadata, MazeStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub name: String,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeScenario {
    pub theme: String,
    pub description: String,
    pub checkpoints: Vec<Checkpoint>,
}

impl MazeScenario {
    /// Fallback used when no configured scenario fits the grid.
    #[must_use]
    pub fn emergency_hotfix() -> Self {
        let cp = |name: &str, x, y| Checkpoint {
            name: name.to_string(),
            x,
            y,
        };
        Self {
            theme: "Emergency Hotfix".into(),
            description: "Production is down! Trace logs and redeploy.".into(),
            checkpoints: vec![
                cp("Log Analysis", 1, 2),
                cp("Local Patch", 5, 1),
                cp("Prod Deploy", 6, 6),
            ],
        }
    }

    #[must_use]
    pub fn fits(&self, size: usize) -> bool {
        !self.checkpoints.is_empty() && self.checkpoints.iter().all(|c| c.x < size && c.y < size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeConfig {
    #[serde(default = "MazeConfig::default_grid_size")]
    pub grid_size: usize,
    #[serde(default = "MazeConfig::default_time_limit")]
    pub time_limit_seconds: u32,
    #[serde(default)]
    pub extra_passages: usize,
    #[serde(default)]
    pub scenarios: Vec<MazeScenario>,
}

impl MazeConfig {
    const fn default_grid_size() -> usize {
        7
    }

    const fn default_time_limit() -> u32 {
        60
    }

    /// Pick a scenario whose checkpoints fit the grid.
    pub fn pick_scenario<R: Rng + ?Sized>(&self, rng: &mut R) -> MazeScenario {
        let usable: Vec<&MazeScenario> = self
            .scenarios
            .iter()
            .filter(|s| s.fits(self.grid_size))
            .collect();
        if usable.is_empty() {
            return MazeScenario::emergency_hotfix();
        }
        usable[rng.gen_range(0..usable.len())].clone()
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            grid_size: Self::default_grid_size(),
            time_limit_seconds: Self::default_time_limit(),
            extra_passages: 0,
            scenarios: vec![MazeScenario::emergency_hotfix()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    const fn bit(self) -> u8 {
        match self {
            Self::Up => 0b0001,
            Self::Right => 0b0010,
            Self::Down => 0b0100,
            Self::Left => 0b1000,
        }
    }

    const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

/// Square grid of cells; each cell stores its open sides as a bit set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    size: usize,
    open: Vec<u8>,
}

impl Maze {
    /// Carve a perfect maze with a recursive backtracker from the top-left
    /// cell, then knock out `extra_passages` random interior walls so there is
    /// more than one route. Same seed, same maze.
    #[must_use]
    pub fn generate(size: usize, seed: u64, extra_passages: usize) -> Self {
        let size = size.max(2);
        let mut maze = Self {
            size,
            open: vec![0; size * size],
        };
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut visited = vec![false; size * size];
        let mut stack = vec![(0_usize, 0_usize)];
        visited[0] = true;

        while let Some(&(x, y)) = stack.last() {
            let choices: Vec<(Direction, usize, usize)> = Direction::ALL
                .into_iter()
                .filter_map(|dir| maze.step(x, y, dir).map(|(nx, ny)| (dir, nx, ny)))
                .filter(|&(_, nx, ny)| !visited[ny * size + nx])
                .collect();
            if choices.is_empty() {
                stack.pop();
                continue;
            }
            let (dir, nx, ny) = choices[rng.gen_range(0..choices.len())];
            maze.carve(x, y, dir);
            visited[ny * size + nx] = true;
            stack.push((nx, ny));
        }

        for _ in 0..extra_passages {
            let x = rng.gen_range(0..size - 1);
            let y = rng.gen_range(0..size - 1);
            let dir = if rng.gen_bool(0.5) {
                Direction::Right
            } else {
                Direction::Down
            };
            maze.carve(x, y, dir);
        }
        maze
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_open(&self, x: usize, y: usize, dir: Direction) -> bool {
        x < self.size && y < self.size && self.open[y * self.size + x] & dir.bit() != 0
    }

    /// Neighbouring cell in `dir`, ignoring walls.
    fn step(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        match dir {
            Direction::Up => y.checked_sub(1).map(|ny| (x, ny)),
            Direction::Down => (y + 1 < self.size).then_some((x, y + 1)),
            Direction::Left => x.checked_sub(1).map(|nx| (nx, y)),
            Direction::Right => (x + 1 < self.size).then_some((x + 1, y)),
        }
    }

    fn carve(&mut self, x: usize, y: usize, dir: Direction) {
        if let Some((nx, ny)) = self.step(x, y, dir) {
            self.open[y * self.size + x] |= dir.bit();
            self.open[ny * self.size + nx] |= dir.opposite().bit();
        }
    }

    /// Where a move in `dir` from `(x, y)` lands, if no wall blocks it.
    #[must_use]
    pub fn travel(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        if self.is_open(x, y, dir) {
            self.step(x, y, dir)
        } else {
            None
        }
    }

    /// Cells reachable from the origin.
    #[must_use]
    pub fn reachable_cells(&self) -> usize {
        let mut seen = vec![false; self.size * self.size];
        let mut queue = std::collections::VecDeque::from([(0_usize, 0_usize)]);
        seen[0] = true;
        let mut count = 0;
        while let Some((x, y)) = queue.pop_front() {
            count += 1;
            for dir in Direction::ALL {
                if let Some((nx, ny)) = self.travel(x, y, dir) {
                    let idx = ny * self.size + nx;
                    if !seen[idx] {
                        seen[idx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Playing,
    Won,
    TimedOut,
}

/// One attempt at the maze: player position, next checkpoint and clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeRun {
    maze: Maze,
    scenario: MazeScenario,
    player: (usize, usize),
    next_checkpoint: usize,
    time_limit: u32,
    seconds_left: u32,
    state: RunState,
}

impl MazeRun {
    #[must_use]
    pub fn new(config: &MazeConfig, scenario: MazeScenario, seed: u64) -> Self {
        let maze = Maze::generate(config.grid_size, seed, config.extra_passages);
        let scenario = if scenario.fits(maze.size()) {
            scenario
        } else {
            MazeScenario::emergency_hotfix()
        };
        Self {
            maze,
            scenario,
            player: (0, 0),
            next_checkpoint: 0,
            time_limit: config.time_limit_seconds,
            seconds_left: config.time_limit_seconds,
            state: RunState::Playing,
        }
    }

    #[must_use]
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    #[must_use]
    pub const fn scenario(&self) -> &MazeScenario {
        &self.scenario
    }

    #[must_use]
    pub const fn player(&self) -> (usize, usize) {
        self.player
    }

    #[must_use]
    pub const fn next_checkpoint(&self) -> usize {
        self.next_checkpoint
    }

    #[must_use]
    pub const fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Move the player; walls and finished runs make this a no-op.
    pub fn move_player(&mut self, dir: Direction) -> RunState {
        if self.state != RunState::Playing {
            return self.state;
        }
        let (x, y) = self.player;
        if let Some(next) = self.maze.travel(x, y, dir) {
            self.player = next;
            if let Some(target) = self.scenario.checkpoints.get(self.next_checkpoint) {
                if (target.x, target.y) == next {
                    self.next_checkpoint += 1;
                    if self.next_checkpoint == self.scenario.checkpoints.len() {
                        self.state = RunState::Won;
                    }
                }
            }
        }
        self.state
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> RunState {
        if self.state == RunState::Playing {
            self.seconds_left = self.seconds_left.saturating_sub(1);
            if self.seconds_left == 0 {
                self.state = RunState::TimedOut;
            }
        }
        self.state
    }

    /// Final result once the run is over.
    #[must_use]
    pub fn outcome(&self) -> Option<(bool, GameMetadata)> {
        if self.state == RunState::Playing {
            return None;
        }
        let success = self.state == RunState::Won;
        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Some((
            success,
            GameMetadata::Maze(MazeStats {
                scenario_theme: self.scenario.theme.clone(),
                total_checkpoints: count(self.scenario.checkpoints.len()),
                completed_checkpoints: count(self.next_checkpoint),
                time_remaining: self.seconds_left,
                time_taken: self.time_limit - self.seconds_left,
                grid_size: count(self.maze.size()),
                success,
            }),
        ))
    }
}
