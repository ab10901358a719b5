use voyager_core::{WheelConfig, WheelOption, WheelQuestion};
use yew::prelude::*;

use super::{OnFinish, seeded_rng};

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: WheelConfig,
    pub seed: u64,
    pub on_finish: OnFinish,
}

#[function_component(AstrologyWheel)]
pub fn astrology_wheel(props: &Props) -> Html {
    let landed = use_state(|| None::<(WheelQuestion, WheelOption)>);

    let on_spin = {
        let landed = landed.clone();
        let config = props.config.clone();
        let seed = props.seed;
        Callback::from(move |_| {
            let mut rng = seeded_rng(seed);
            match config.spin(&mut rng) {
                Some((question, option)) => landed.set(Some((question.clone(), option.clone()))),
                None => log::warn!("wheel has no questions to spin"),
            }
        })
    };

    let body = match &*landed {
        None => html! {
            <>
                <div class="w-48 h-48 mx-auto rounded-full border-8 border-purple-400 flex items-center justify-center text-6xl" aria-hidden="true">{ "🔮" }</div>
                <button id="wheel-spin" type="button" class="w-full py-4 bg-purple-600 text-white rounded-xl font-bold" onclick={on_spin}>
                    { "Spin the wheel" }
                </button>
            </>
        },
        Some((question, option)) => {
            let on_accept = {
                let on_finish = props.on_finish.clone();
                let verdict = WheelConfig::score(question, option);
                Callback::from(move |_| on_finish.emit(verdict.clone()))
            };
            html! {
                <>
                    <p class="text-xs uppercase tracking-wider text-gray-500">{ question.title.clone() }</p>
                    <h3 id="wheel-result" class="text-2xl font-bold text-purple-700">{ option.label.clone() }</h3>
                    <p class="text-sm text-gray-600">{ option.description.clone() }</p>
                    <button type="button" class="w-full py-4 bg-purple-600 text-white rounded-xl font-bold" onclick={on_accept}>
                        { "Accept my reading" }
                    </button>
                </>
            }
        }
    };

    html! {
        <div class="w-full space-y-6 text-center" id="astrology-wheel">{ body }</div>
    }
}
