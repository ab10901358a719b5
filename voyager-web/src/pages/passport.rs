use voyager_core::GameId;
use yew::prelude::*;

use crate::components::celebration::Celebration;
use crate::components::stamp::{Stamp, StampEntry};

#[derive(Properties, Clone, PartialEq)]
pub struct PassportPageProps {
    pub display_name: AttrValue,
    pub passport_id: AttrValue,
    pub stamps: Vec<StampEntry>,
    #[prop_or_default]
    pub celebrating: bool,
    pub on_open_game: Callback<GameId>,
    pub on_logout: Callback<()>,
}

#[function_component(PassportPage)]
pub fn passport_page(props: &PassportPageProps) -> Html {
    let on_logout = {
        let cb = props.on_logout.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let won = props.stamps.iter().filter(|s| s.status.is_won()).count();
    // Spaced digits render as a barcode in the passport font.
    let barcode = props
        .passport_id
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ");

    html! {
        <div class="min-h-screen bg-[#00152f] p-6 flex justify-center">
            <div class="w-full max-w-md relative">
                <div class="bg-[#1e3a5f] rounded-xl shadow-2xl border-4 border-[#c5a059] flex flex-col items-center gap-6 p-8">
                    <div class="text-center">
                        <div class="text-[#c5a059] border-2 border-[#c5a059] p-2 inline-block mb-4 rounded">
                            <h2 class="text-lg font-bold tracking-[0.2em] uppercase">{ "Enterprise" }</h2>
                        </div>
                        <h1 class="text-4xl font-bold text-[#c5a059] tracking-widest uppercase">{ "Passport" }</h1>
                    </div>
                    <p class="text-[#c5a059] text-xs font-bold tracking-widest uppercase opacity-50">{ "SAP Voyager Program" }</p>
                    <div class="barcode-font text-4xl text-[#c5a059]">{ barcode }</div>
                    <button id="passport-logout" type="button" class="text-[#c5a059] text-xs underline opacity-50" onclick={on_logout}>
                        { "Reset Session" }
                    </button>
                </div>

                <div class="mt-8 bg-[#fdfaf1] rounded-lg shadow-xl border-2 border-gray-300 p-6">
                    <div class="passport-font space-y-1 text-sm text-blue-900 pb-4 border-b-2 border-gray-300 border-dashed mb-6">
                        <p><span class="opacity-50 text-[10px] block uppercase">{ "Given Name" }</span>{ props.display_name.to_uppercase() }</p>
                        <p><span class="opacity-50 text-[10px] block uppercase">{ "ID Code" }</span>{ props.passport_id.clone() }</p>
                        <p><span class="opacity-50 text-[10px] block uppercase">{ "Endorsements" }</span>{ format!("{won} / {}", props.stamps.len()) }</p>
                    </div>
                    <h3 class="text-center font-bold uppercase tracking-widest text-gray-500 text-xs mb-6">{ "Visas & Endorsements" }</h3>
                    <div class="grid grid-cols-2 gap-4" id="stamp-grid">
                        { for props.stamps.iter().map(|entry| {
                            let on_open = props.on_open_game.clone();
                            let id = entry.game.id;
                            html! {
                                <Stamp
                                    key={id.to_string()}
                                    entry={entry.clone()}
                                    on_click={Callback::from(move |()| on_open.emit(id))}
                                />
                            }
                        }) }
                    </div>
                </div>
            </div>
            if props.celebrating {
                <Celebration />
            }
        </div>
    }
}
