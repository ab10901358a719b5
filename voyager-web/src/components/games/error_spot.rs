use std::collections::BTreeSet;

use voyager_core::{CURRENCY_FIELD, ErrorSpotConfig, VENDOR_FIELD};
use yew::prelude::*;

use super::{OnFinish, seeded_rng};

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: ErrorSpotConfig,
    pub seed: u64,
    pub on_finish: OnFinish,
}

fn field_class(flagged: bool) -> Classes {
    classes!(
        "block",
        "w-full",
        "text-left",
        "p-1",
        "border",
        if flagged {
            "bg-red-100 border-red-500 text-red-700"
        } else {
            "bg-gray-50 border-gray-200"
        }
    )
}

#[function_component(DataDetective)]
pub fn data_detective(props: &Props) -> Html {
    let scenario = use_memo((props.config.clone(), props.seed), |(config, seed)| {
        config.pick(&mut seeded_rng(*seed)).cloned()
    });
    let flagged = use_state(BTreeSet::<String>::new);

    let Some(scenario) = (*scenario).clone() else {
        return html! {
            <p id="game-unavailable" class="text-gray-500 text-center">
                { "No purchase orders are waiting for review." }
            </p>
        };
    };
    let doc = &scenario.document;
    let total = scenario.errors.len();

    let toggle = |field: String| {
        let flagged = flagged.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*flagged).clone();
            if !next.remove(&field) {
                next.insert(field.clone());
            }
            flagged.set(next);
        })
    };
    let on_submit = {
        let flagged = flagged.clone();
        let on_finish = props.on_finish.clone();
        let scenario = scenario.clone();
        Callback::from(move |_| on_finish.emit(scenario.score(&flagged)))
    };
    let is_flagged = |field: &str| flagged.contains(field);

    html! {
        <div class="w-full space-y-6" id="error-spot">
            <p class="text-xs text-center text-gray-500 italic">
                { format!("Tap the {total} incorrect fields in this Purchase Order") }
            </p>
            <div class="bg-white border-2 border-gray-200 rounded-lg p-4 font-mono text-xs shadow-sm space-y-3">
                <div class="border-b pb-2 flex justify-between font-bold">
                    <span>{ format!("SAP PO: {}", doc.po_number) }</span>
                    <span class="text-blue-600">{ "INTERNAL DOC" }</span>
                </div>
                <div class="grid grid-cols-2 gap-4">
                    <div class="space-y-1">
                        <span class="block text-gray-400 uppercase">{ "Vendor" }</span>
                        <button type="button" aria-pressed={is_flagged(VENDOR_FIELD).to_string()} class={field_class(is_flagged(VENDOR_FIELD))} onclick={toggle(VENDOR_FIELD.to_string())}>
                            { doc.vendor.clone().unwrap_or_else(|| "[ EMPTY ]".to_string()) }
                        </button>
                    </div>
                    <div class="space-y-1">
                        <span class="block text-gray-400 uppercase">{ format!("Currency ({})", doc.currency_expected) }</span>
                        <button type="button" aria-pressed={is_flagged(CURRENCY_FIELD).to_string()} class={field_class(is_flagged(CURRENCY_FIELD))} onclick={toggle(CURRENCY_FIELD.to_string())}>
                            { doc.currency_shown.clone() }
                        </button>
                    </div>
                </div>
                <div class="space-y-1 mt-4">
                    <span class="block text-gray-400 uppercase border-b border-gray-100">{ "Item Details" }</span>
                    { for doc.items.iter().map(|line| {
                        let field = line.field_id().to_string();
                        let marked = is_flagged(&field);
                        html! {
                            <div key={line.id.clone()} class="flex justify-between items-center py-1 px-2">
                                <span>{ line.name.clone() }</span>
                                <button type="button" aria-pressed={marked.to_string()} class={field_class(marked)} onclick={toggle(field)}>
                                    { format!("QTY: {}", line.qty) }
                                </button>
                            </div>
                        }
                    }) }
                </div>
            </div>
            <p class="text-xs text-gray-400 font-bold uppercase" aria-live="polite">
                { format!("Fields flagged: {}/{total}", flagged.len()) }
            </p>
            <button id="error-spot-submit" type="button" class="w-full py-4 bg-gray-900 text-white rounded-xl font-bold" onclick={on_submit}>
                { "Finalize Audit" }
            </button>
        </div>
    }
}
