use voyager_core::FlowConfig;
use yew::prelude::*;

use super::{OnFinish, seeded_rng};

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: FlowConfig,
    pub seed: u64,
    pub on_finish: OnFinish,
}

#[function_component(ErpFlow)]
pub fn erp_flow(props: &Props) -> Html {
    let pool = {
        let config = props.config.clone();
        let seed = props.seed;
        use_memo((config, seed), |(config, seed)| {
            config.shuffled(&mut seeded_rng(*seed))
        })
    };
    let attempt = use_state(Vec::<String>::new);

    let on_pick = |step: String| {
        let attempt = attempt.clone();
        Callback::from(move |_| {
            if !attempt.contains(&step) {
                let mut next = (*attempt).clone();
                next.push(step.clone());
                attempt.set(next);
            }
        })
    };
    let on_reset = {
        let attempt = attempt.clone();
        Callback::from(move |_| attempt.set(Vec::new()))
    };
    let on_submit = {
        let attempt = attempt.clone();
        let config = props.config.clone();
        let on_finish = props.on_finish.clone();
        Callback::from(move |_| on_finish.emit(config.score(&attempt)))
    };
    let complete = attempt.len() == props.config.steps.len();

    html! {
        <div class="w-full space-y-6" id="erp-flow">
            <p class="text-sm text-gray-600 text-center">{ "Tap the steps in the order a sale becomes cash." }</p>
            <ol class="space-y-2 min-h-[120px] border-2 border-dashed border-gray-200 rounded-xl p-3" aria-label="Your sequence">
                { for attempt.iter().enumerate().map(|(i, step)| html! {
                    <li key={step.clone()} class="p-2 bg-blue-50 rounded text-sm font-semibold">{ format!("{}. {step}", i + 1) }</li>
                }) }
            </ol>
            <div class="grid grid-cols-2 gap-2">
                { for pool.iter().map(|step| {
                    let used = attempt.contains(step);
                    html! {
                        <button
                            key={step.clone()}
                            type="button"
                            class={classes!("p-3", "rounded-lg", "border-2", "text-sm", used.then_some("opacity-30"))}
                            disabled={used}
                            onclick={on_pick(step.clone())}
                        >
                            { step.clone() }
                        </button>
                    }
                }) }
            </div>
            <div class="flex gap-2">
                <button type="button" class="flex-1 py-3 border-2 rounded-xl" onclick={on_reset}>{ "Reset" }</button>
                <button id="flow-submit" type="button" class="flex-1 py-3 bg-blue-600 text-white rounded-xl font-bold" disabled={!complete} onclick={on_submit}>
                    { "Submit flow" }
                </button>
            </div>
        </div>
    }
}
