use std::rc::Rc;

use gloo_timers::callback::Interval;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use voyager_core::{TapConfig, TapScore};
use yew::prelude::*;

use super::{OnFinish, seeded_rng};

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: TapConfig,
    pub seed: u64,
    pub on_finish: OnFinish,
}

pub enum TapAction {
    Answer { claimed_sap: bool },
    Tick,
}

#[derive(Debug, Clone)]
pub struct TapState {
    config: Rc<TapConfig>,
    rng: ChaCha20Rng,
    term: String,
    score: TapScore,
    seconds_left: u32,
}

impl TapState {
    #[must_use]
    pub fn new(config: TapConfig, seed: u64) -> Self {
        let mut rng = seeded_rng(seed);
        let term = draw_term(&config, &mut rng);
        Self {
            seconds_left: config.timer_seconds,
            config: Rc::new(config),
            rng,
            term,
            score: TapScore::default(),
        }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub const fn score(&self) -> TapScore {
        self.score
    }

    #[must_use]
    pub const fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.seconds_left == 0
    }
}

fn draw_term(config: &TapConfig, rng: &mut ChaCha20Rng) -> String {
    let total = config.sap_terms.len() + config.dummy_terms.len();
    if total == 0 {
        return String::new();
    }
    let pick = rng.gen_range(0..total);
    config
        .sap_terms
        .iter()
        .chain(config.dummy_terms.iter())
        .nth(pick)
        .cloned()
        .unwrap_or_default()
}

impl Reducible for TapState {
    type Action = TapAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        if self.is_over() {
            return self;
        }
        let mut next = (*self).clone();
        match action {
            TapAction::Answer { claimed_sap } => {
                next.score = next.config.tap(next.score, &next.term, claimed_sap);
                next.term = draw_term(&next.config, &mut next.rng);
            }
            TapAction::Tick => next.seconds_left -= 1,
        }
        Rc::new(next)
    }
}

#[function_component(FastTap)]
pub fn fast_tap(props: &Props) -> Html {
    let state = {
        let config = props.config.clone();
        let seed = props.seed;
        use_reducer(move || TapState::new(config, seed))
    };
    let reported = use_mut_ref(|| false);

    {
        let dispatcher = state.dispatcher();
        use_effect_with((), move |()| {
            let ticker = Interval::new(1_000, move || dispatcher.dispatch(TapAction::Tick));
            move || drop(ticker)
        });
    }
    {
        let on_finish = props.on_finish.clone();
        let state = state.clone();
        use_effect_with(state.is_over(), move |over| {
            if *over && !*reported.borrow() {
                *reported.borrow_mut() = true;
                on_finish.emit(state.config.finish(state.score));
            }
            || {}
        });
    }

    let answer = |claimed_sap: bool| {
        let dispatcher = state.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(TapAction::Answer { claimed_sap }))
    };

    html! {
        <div class="w-full space-y-6 text-center" id="fast-tap">
            <div class="flex justify-between text-sm font-bold">
                <span id="tap-score">{ format!("Score {}", state.score().0) }</span>
                <span>{ format!("{}s", state.seconds_left()) }</span>
            </div>
            <div class="h-32 flex items-center justify-center text-3xl font-extrabold border-2 rounded-xl" aria-live="polite">
                { state.term().to_string() }
            </div>
            <div class="grid grid-cols-2 gap-4">
                <button type="button" class="py-4 bg-blue-600 text-white rounded-xl font-bold" disabled={state.is_over()} onclick={answer(true)}>
                    { "SAP" }
                </button>
                <button type="button" class="py-4 bg-gray-200 rounded-xl font-bold" disabled={state.is_over()} onclick={answer(false)}>
                    { "Not SAP" }
                </button>
            </div>
            <p class="text-xs text-gray-500">{ format!("Reach {} points to win", props.config.win_threshold) }</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TapConfig {
        TapConfig {
            timer_seconds: 2,
            points_correct: 10,
            points_wrong: 5,
            win_threshold: 80,
            sap_terms: vec!["ABAP".into()],
            dummy_terms: vec![],
        }
    }

    #[test]
    fn correct_answers_score_and_clock_runs_out() {
        let state = Rc::new(TapState::new(config(), 9));
        assert_eq!(state.term(), "ABAP");
        let state = state.reduce(TapAction::Answer { claimed_sap: true });
        assert_eq!(state.score(), TapScore(10));
        let state = state.reduce(TapAction::Tick).reduce(TapAction::Tick);
        assert!(state.is_over());
        let frozen = Rc::clone(&state).reduce(TapAction::Answer { claimed_sap: true });
        assert_eq!(frozen.score(), TapScore(10));
    }
}
