use voyager_core::QuizConfig;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::OnFinish;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: QuizConfig,
    pub on_finish: OnFinish,
}

#[function_component(FoundersQuiz)]
pub fn founders_quiz(props: &Props) -> Html {
    let answer = use_state(String::new);
    let show_hint = use_state(|| false);

    let on_input = {
        let answer = answer.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                answer.set(input.value());
            }
        })
    };
    let on_hint = {
        let show_hint = show_hint.clone();
        Callback::from(move |_| show_hint.set(!*show_hint))
    };
    let on_submit = {
        let answer = answer.clone();
        let config = props.config.clone();
        let on_finish = props.on_finish.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !answer.trim().is_empty() {
                on_finish.emit(config.score(&answer));
            }
        })
    };

    html! {
        <form class="w-full space-y-6 text-center" id="quiz-form" onsubmit={on_submit}>
            <p class="text-sm text-gray-500">{ props.config.subtitle.clone() }</p>
            <h3 class="text-xl font-bold text-gray-800">{ props.config.question.clone() }</h3>
            <input
                id="quiz-answer"
                type="text"
                inputmode="numeric"
                aria-label="Your answer"
                value={(*answer).clone()}
                oninput={on_input}
                class="w-full text-center text-2xl py-3 border-2 border-gray-200 rounded-xl"
            />
            if !props.config.hint_text.is_empty() {
                <button type="button" class="text-xs underline text-gray-500" onclick={on_hint}>
                    { if *show_hint { "Hide hint" } else { "Need a hint?" } }
                </button>
                if *show_hint {
                    <p id="quiz-hint" class="text-xs text-blue-600">{ props.config.hint_text.clone() }</p>
                }
            }
            <button type="submit" class="w-full py-4 bg-blue-600 text-white rounded-xl font-bold" disabled={answer.trim().is_empty()}>
                { "Submit answer" }
            </button>
        </form>
    }
}
