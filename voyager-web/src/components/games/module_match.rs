use std::collections::BTreeMap;

use voyager_core::MatchConfig;
use yew::prelude::*;

use super::OnFinish;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: MatchConfig,
    pub on_finish: OnFinish,
}

#[function_component(ModuleMatch)]
pub fn module_match(props: &Props) -> Html {
    let selected = use_state(|| None::<String>);
    // scenario module id -> chosen module id
    let matches = use_state(BTreeMap::<String, String>::new);
    let feedback = use_state(|| None::<&'static str>);

    let pick_module = |id: String| {
        let selected = selected.clone();
        Callback::from(move |_| selected.set(Some(id.clone())))
    };
    let assign = |scenario: String| {
        let selected = selected.clone();
        let matches = matches.clone();
        let feedback = feedback.clone();
        Callback::from(move |_| {
            let Some(module) = (*selected).clone() else {
                feedback.set(Some("Pick a module first, then tap a scenario."));
                return;
            };
            let mut next = (*matches).clone();
            next.insert(scenario.clone(), module);
            matches.set(next);
            selected.set(None);
            feedback.set(None);
        })
    };
    let on_submit = {
        let matches = matches.clone();
        let config = props.config.clone();
        let on_finish = props.on_finish.clone();
        Callback::from(move |_| {
            let pairings: Vec<(String, String)> = matches
                .iter()
                .map(|(scenario, chosen)| (scenario.clone(), chosen.clone()))
                .collect();
            on_finish.emit(config.score(&pairings));
        })
    };
    let complete = matches.len() >= props.config.modules.len();

    html! {
        <div class="w-full space-y-6" id="module-match">
            <div class="grid grid-cols-5 gap-2" role="listbox" aria-label="SAP modules">
                { for props.config.modules.iter().map(|module| {
                    let active = selected.as_deref() == Some(module.id.as_str());
                    html! {
                        <button
                            key={module.id.clone()}
                            type="button"
                            role="option"
                            aria-selected={active.to_string()}
                            title={module.name.clone()}
                            class={classes!("p-2", "text-xs", "font-bold", "rounded", "border-2", active.then_some("bg-blue-600 text-white border-blue-600"))}
                            onclick={pick_module(module.id.clone())}
                        >
                            { module.id.clone() }
                        </button>
                    }
                }) }
            </div>
            <div class="space-y-3">
                { for props.config.modules.iter().map(|module| {
                    let chosen = matches.get(&module.id).cloned();
                    html! {
                        <button
                            key={module.id.clone()}
                            type="button"
                            class={classes!("w-full", "p-3", "rounded-lg", "border-2", "flex", "justify-between", "items-center", chosen.is_some().then_some("bg-green-50 border-green-200"))}
                            onclick={assign(module.id.clone())}
                        >
                            <span class="text-sm text-gray-700 text-left">{ module.scenario.clone() }</span>
                            if let Some(chosen) = chosen {
                                <span class="text-xs font-bold text-green-600 bg-green-100 px-2 py-1 rounded">{ chosen }</span>
                            }
                        </button>
                    }
                }) }
            </div>
            if let Some(message) = *feedback {
                <p class="text-xs text-center text-orange-500 font-bold" role="alert">{ message }</p>
            }
            <button id="match-submit" type="button" class="w-full py-4 bg-blue-600 text-white rounded-xl font-bold" disabled={!complete} onclick={on_submit}>
                { "Check matches" }
            </button>
        </div>
    }
}
