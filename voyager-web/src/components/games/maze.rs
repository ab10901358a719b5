use std::rc::Rc;

use gloo_timers::callback::Interval;
use voyager_core::{Direction, MazeConfig, MazeRun, RunState};
use yew::prelude::*;

use super::{OnFinish, seeded_rng};

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: MazeConfig,
    pub seed: u64,
    pub on_finish: OnFinish,
}

pub enum MazeAction {
    Move(Direction),
    Tick,
}

/// Reducer wrapper so the countdown and key presses share one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeState(pub MazeRun);

impl Reducible for MazeState {
    type Action = MazeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if self.0.state() != RunState::Playing {
            return self;
        }
        let mut run = self.0.clone();
        match action {
            MazeAction::Move(dir) => run.move_player(dir),
            MazeAction::Tick => run.tick(),
        };
        Rc::new(Self(run))
    }
}

/// Map an arrow (or WASD) key to a direction.
#[must_use]
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        _ => None,
    }
}

#[function_component(MazeAirplane)]
pub fn maze_airplane(props: &Props) -> Html {
    let run = {
        let config = props.config.clone();
        let seed = props.seed;
        use_reducer(move || {
            let scenario = config.pick_scenario(&mut seeded_rng(seed));
            MazeState(MazeRun::new(&config, scenario, seed))
        })
    };
    let reported = use_mut_ref(|| false);

    {
        let dispatcher = run.dispatcher();
        use_effect_with((), move |()| {
            let ticker = Interval::new(1_000, move || dispatcher.dispatch(MazeAction::Tick));
            move || drop(ticker)
        });
    }
    {
        let on_finish = props.on_finish.clone();
        let run = run.clone();
        use_effect_with(run.0.state(), move |_| {
            if let Some(verdict) = run.0.outcome() {
                if !*reported.borrow() {
                    *reported.borrow_mut() = true;
                    on_finish.emit(verdict);
                }
            }
            || {}
        });
    }

    let on_keydown = {
        let dispatcher = run.dispatcher();
        Callback::from(move |e: KeyboardEvent| {
            if let Some(dir) = direction_for_key(&e.key()) {
                e.prevent_default();
                dispatcher.dispatch(MazeAction::Move(dir));
            }
        })
    };
    let step = |dir: Direction| {
        let dispatcher = run.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(MazeAction::Move(dir)))
    };

    let current = &run.0;
    let maze = current.maze();
    let size = maze.size();
    let scenario = current.scenario();
    let next = scenario.checkpoints.get(current.next_checkpoint());
    let cells = (0..size).flat_map(|y| (0..size).map(move |x| (x, y)));

    html! {
        <div class="w-full space-y-4" id="maze-airplane" tabindex="0" onkeydown={on_keydown}>
            <div class="flex justify-between text-sm">
                <span class="font-bold">{ scenario.theme.clone() }</span>
                <span id="maze-clock" class={classes!((current.seconds_left() <= 10).then_some("text-red-600"))}>
                    { format!("{}s", current.seconds_left()) }
                </span>
            </div>
            <p class="text-xs text-gray-500">{ scenario.description.clone() }</p>
            <div
                class="grid border-2 border-gray-800 mx-auto aspect-square max-w-xs"
                style={format!("grid-template-columns: repeat({size}, minmax(0, 1fr));")}
                role="grid"
                aria-label="Maze"
            >
                { for cells.map(|(x, y)| {
                    let walls = classes!(
                        "relative", "flex", "items-center", "justify-center", "text-xs", "border-gray-800",
                        (!maze.is_open(x, y, Direction::Up)).then_some("border-t-2"),
                        (!maze.is_open(x, y, Direction::Right)).then_some("border-r-2"),
                        (!maze.is_open(x, y, Direction::Down)).then_some("border-b-2"),
                        (!maze.is_open(x, y, Direction::Left)).then_some("border-l-2"),
                    );
                    let checkpoint = scenario.checkpoints.iter().position(|c| (c.x, c.y) == (x, y));
                    html! {
                        <div class={walls} role="gridcell">
                            if current.player() == (x, y) {
                                <span aria-label="You">{ "✈️" }</span>
                            } else if let Some(index) = checkpoint {
                                <span class={classes!("font-bold", (index < current.next_checkpoint()).then_some("opacity-30"))}>
                                    { (index + 1).to_string() }
                                </span>
                            }
                        </div>
                    }
                }) }
            </div>
            <p class="text-xs text-center" aria-live="polite">
                { match (current.state(), next) {
                    (RunState::Won, _) => "All checkpoints cleared!".to_string(),
                    (RunState::TimedOut, _) => "Out of time!".to_string(),
                    (RunState::Playing, Some(target)) => format!("Next stop: {}", target.name),
                    (RunState::Playing, None) => String::new(),
                } }
            </p>
            <div class="grid grid-cols-3 gap-2 max-w-[180px] mx-auto">
                <span></span>
                <button type="button" class="btn btn-sm" aria-label="Up" onclick={step(Direction::Up)}>{ "▲" }</button>
                <span></span>
                <button type="button" class="btn btn-sm" aria-label="Left" onclick={step(Direction::Left)}>{ "◀" }</button>
                <button type="button" class="btn btn-sm" aria-label="Down" onclick={step(Direction::Down)}>{ "▼" }</button>
                <button type="button" class="btn btn-sm" aria-label="Right" onclick={step(Direction::Right)}>{ "▶" }</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_wasd_keys_map_to_directions() {
        assert_eq!(direction_for_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(direction_for_key("d"), Some(Direction::Right));
        assert_eq!(direction_for_key("S"), Some(Direction::Down));
        assert_eq!(direction_for_key("Enter"), None);
    }

    #[test]
    fn finished_runs_ignore_further_actions() {
        let config = MazeConfig {
            time_limit_seconds: 1,
            ..MazeConfig::default()
        };
        let scenario = config.pick_scenario(&mut seeded_rng(3));
        let state = Rc::new(MazeState(MazeRun::new(&config, scenario, 3)));
        let state = state.reduce(MazeAction::Tick);
        assert_eq!(state.0.state(), RunState::TimedOut);
        let after = Rc::clone(&state).reduce(MazeAction::Move(Direction::Right));
        assert!(Rc::ptr_eq(&state, &after));
    }
}
