use std::rc::Rc;

use chrono::Local;
use voyager_core::{GameDescriptor, GameKind, GameMetadata, GameStatus, MiniGameConfig};
use yew::prelude::*;

use super::games::OnFinish;
use super::games::certification::Certification;
use super::games::erp_flow::ErpFlow;
use super::games::error_spot::DataDetective;
use super::games::fast_tap::FastTap;
use super::games::maze::MazeAirplane;
use super::games::module_match::ModuleMatch;
use super::games::quiz::FoundersQuiz;
use super::games::wheel::AstrologyWheel;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub game: GameDescriptor,
    pub status: GameStatus,
    pub seed: u64,
    pub minigames: Rc<MiniGameConfig>,
    pub on_finish: OnFinish,
    pub on_close: Callback<()>,
}

#[function_component(GameModal)]
pub fn game_modal(props: &Props) -> Html {
    // `None` while playing, then whether the attempt was won.
    let result = use_state(|| None::<bool>);
    let container_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        use_effect_with(props.game.id, move |_| {
            if let Some(el) = container_ref.cast::<web_sys::HtmlElement>() {
                let _ = el.focus();
            }
            || {}
        });
    }

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };
    let finish = {
        let result = result.clone();
        let on_finish = props.on_finish.clone();
        let title = props.game.title.clone();
        Callback::from(move |(won, metadata): (bool, GameMetadata)| {
            if result.is_some() {
                return;
            }
            result.set(Some(won));
            crate::a11y::set_status(&crate::a11y::result_announcement(&title, won));
            on_finish.emit((won, metadata));
        })
    };

    let title_id = format!("game-title-{}", props.game.id);
    let body = match *result {
        None => render_game(props, finish),
        Some(won) => render_result(won, props.status, on_close.clone()),
    };

    html! {
        <div class="modal-backdrop fixed inset-0 z-50 flex items-center justify-center p-4 bg-black/80" role="presentation">
            <div
                class="modal bg-white w-full max-w-lg rounded-2xl overflow-hidden shadow-2xl flex flex-col min-h-[500px]"
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                tabindex="-1"
                onkeydown={on_keydown}
                ref={container_ref}
            >
                <div class="modal__header p-4 border-b flex justify-between items-center bg-gray-50">
                    <div class="flex items-center gap-3">
                        <span class="text-2xl" aria-hidden="true">{ props.game.icon.clone() }</span>
                        <div>
                            <h2 id={title_id} class="font-bold text-gray-800">{ props.game.title.clone() }</h2>
                            <p class="text-xs text-gray-500 uppercase tracking-wider">{ format!("Mission #{}", props.game.id) }</p>
                        </div>
                    </div>
                    <button type="button" class="modal__close p-2 rounded-full" aria-label="Close dialog" onclick={on_close}>
                        { "✕" }
                    </button>
                </div>
                <div class="modal__body flex-1 p-6 flex flex-col items-center justify-center">
                    { body }
                </div>
            </div>
        </div>
    }
}

fn render_game(props: &Props, on_finish: OnFinish) -> Html {
    let games = &props.minigames;
    let seed = props.seed;
    match props.game.kind {
        GameKind::Quiz => html! { <FoundersQuiz config={games.quiz.clone()} {on_finish} /> },
        GameKind::Match => html! { <ModuleMatch config={games.module_match.clone()} {on_finish} /> },
        GameKind::Flow => html! { <ErpFlow config={games.flow.clone()} {seed} {on_finish} /> },
        GameKind::Wheel => html! { <AstrologyWheel config={games.wheel.clone()} {seed} {on_finish} /> },
        GameKind::Certification => {
            html! { <Certification config={games.certification.clone()} {on_finish} /> }
        }
        GameKind::Maze => html! { <MazeAirplane config={games.maze.clone()} {seed} {on_finish} /> },
        GameKind::Tap => html! { <FastTap config={games.tap.clone()} {seed} {on_finish} /> },
        GameKind::Error => {
            html! { <DataDetective config={games.error_spot.clone()} {seed} {on_finish} /> }
        }
        GameKind::Ar => html! {
            <p id="game-unavailable" class="text-gray-500 text-center">
                { "This mission has been retired and can no longer be played." }
            </p>
        },
    }
}

fn render_result(won: bool, previous: GameStatus, on_close: Callback<MouseEvent>) -> Html {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let kept_win = !won && previous.is_won();
    html! {
        <div class="text-center space-y-6 flex flex-col items-center" id="game-result">
            <div class={classes!("w-48", "h-48", "rounded-full", "border-8", "flex", "flex-col", "items-center", "justify-center", "passport-font", "animate-stamp", if won { "border-blue-600 text-blue-600" } else { "border-gray-400 text-gray-400" })}>
                <span class="text-4xl mb-2">{ if won { "WINNER" } else { "VISITOR" } }</span>
                <span class="text-sm font-bold tracking-widest">{ date }</span>
                <span class="text-xs mt-1">{ "SAP VOYAGER - AUTH" }</span>
            </div>
            <h2 class="text-2xl font-bold text-gray-800">{ if won { "Mission Accomplished!" } else { "Good Effort!" } }</h2>
            <p class="text-gray-500">
                { if won {
                    "You've earned the Winner's Stamp for your passport."
                } else if kept_win {
                    "Your Winner's Stamp from an earlier run is safe."
                } else {
                    "You've earned a Participation Stamp. Try again for the gold!"
                } }
            </p>
            <button type="button" class="mt-8 px-8 py-3 bg-gray-900 text-white rounded-xl font-bold shadow-lg" onclick={on_close}>
                { "Continue Journey" }
            </button>
        </div>
    }
}
