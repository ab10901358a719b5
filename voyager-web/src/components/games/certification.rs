use std::collections::BTreeSet;

use voyager_core::{CertificationConfig, CertificationDomain};
use yew::prelude::*;

use super::OnFinish;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: CertificationConfig,
    pub on_finish: OnFinish,
}

#[function_component(Certification)]
pub fn certification(props: &Props) -> Html {
    let domain = use_state(|| None::<CertificationDomain>);
    let scratched = use_state(BTreeSet::<usize>::new);
    let chosen = use_state(|| None::<usize>);

    let Some(current) = (*domain).clone() else {
        return html! {
            <div class="w-full" id="certification-domains">
                <h3 class="text-xl font-bold text-center mb-6">{ "Choose your domain for certification" }</h3>
                <div class="grid grid-cols-2 gap-4">
                    { for props.config.domains.iter().map(|d| {
                        let pick = {
                            let domain = domain.clone();
                            let d = d.clone();
                            Callback::from(move |_| domain.set(Some(d.clone())))
                        };
                        html! {
                            <button key={d.name.clone()} type="button" class="p-4 bg-gray-100 rounded-xl shadow-md flex flex-col items-center gap-2" onclick={pick}>
                                <span class="text-3xl" aria-hidden="true">{ d.icon.clone() }</span>
                                <span class="font-semibold">{ d.name.clone() }</span>
                            </button>
                        }
                    }) }
                </div>
            </div>
        };
    };

    let scratch = |index: usize| {
        let scratched = scratched.clone();
        let chosen = chosen.clone();
        Callback::from(move |_| {
            let mut next = (*scratched).clone();
            next.insert(index);
            scratched.set(next);
            chosen.set(Some(index));
        })
    };
    let on_claim = {
        let config = props.config.clone();
        let on_finish = props.on_finish.clone();
        let name = current.name.clone();
        let voucher = chosen.and_then(|i| current.options.get(i).cloned());
        Callback::from(move |_| {
            let Some(voucher) = voucher.as_deref() else {
                return;
            };
            match config.claim(&name, voucher) {
                Some(verdict) => on_finish.emit(verdict),
                None => log::warn!("voucher {voucher} is not offered for {name}"),
            }
        })
    };
    let revealed = !scratched.is_empty();

    html! {
        <div class="w-full" id="certification-cards">
            <h3 class="text-xl font-bold text-center mb-2">
                { if revealed { "Confirm your choice" } else { "Scratch a card to reveal your voucher" } }
            </h3>
            <div class="grid grid-cols-2 gap-4">
                { for current.options.iter().enumerate().map(|(index, option)| {
                    let shown = scratched.contains(&index);
                    let selected = *chosen == Some(index);
                    html! {
                        <button
                            key={index.to_string()}
                            type="button"
                            aria-pressed={selected.to_string()}
                            class={classes!("h-28", "rounded-xl", "border-2", "p-3", "text-sm", "font-semibold", if shown { "bg-white" } else { "bg-gray-400 text-transparent" }, selected.then_some("ring-4 ring-blue-500"))}
                            onclick={scratch(index)}
                        >
                            { if shown { option.clone() } else { "Scratch me".to_string() } }
                        </button>
                    }
                }) }
            </div>
            <button id="certification-claim" type="button" class="w-full mt-6 py-4 bg-blue-600 text-white rounded-xl font-bold" disabled={chosen.is_none()} onclick={on_claim}>
                { "Claim offer" }
            </button>
        </div>
    }
}
