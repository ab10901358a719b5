use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct BadgePageProps {
    pub display_name: AttrValue,
    pub passport_id: AttrValue,
    #[prop_or_default]
    pub reward_link: Option<AttrValue>,
    pub on_logout: Callback<()>,
}

#[function_component(BadgePage)]
pub fn badge_page(props: &BadgePageProps) -> Html {
    let on_logout = {
        let cb = props.on_logout.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let headline = format!("Well Done {}!", props.display_name.to_uppercase());

    html! {
        <div class="min-h-screen flex items-center justify-center bg-[#00152f] p-6">
            <div class="relative aspect-[3/4] w-full max-w-sm flex flex-col justify-between items-center rounded-2xl border-4 border-[#c5a059] shadow-2xl overflow-hidden bg-[#1e3a5f] p-8">
                <button
                    id="badge-logout"
                    type="button"
                    class="absolute top-3 right-3 text-[#c5a059] text-xs underline"
                    onclick={on_logout}
                >
                    { "Start over" }
                </button>
                <div class="text-center mt-2">
                    <div class="text-[#c5a059] border-2 border-[#c5a059] px-3 py-1 inline-block rounded mb-3">
                        <h2 class="text-sm font-bold tracking-[0.25em] uppercase">{ "SAP experience zone" }</h2>
                    </div>
                    <h1 class="text-3xl font-extrabold text-[#c5a059] tracking-widest uppercase">{ "Congrats!!" }</h1>
                    <div class="h-1 bg-[#c5a059] w-full mt-3"></div>
                </div>
                <div class="w-28 h-28 border-4 border-[#c5a059] rounded-full flex items-center justify-center">
                    <span class="text-6xl">{ "🏅" }</span>
                </div>
                <p class="text-[#c5a059] text-2xl font-extrabold uppercase tracking-widest text-center">{ headline }</p>
                <p class="text-[#c5a059]/80 text-xs tracking-wider text-center">{ "You completed all activities" }</p>
                if let Some(link) = props.reward_link.clone() {
                    <a id="badge-reward" class="text-[#c5a059] underline text-sm" href={link} target="_blank" rel="noopener noreferrer">
                        { "Claim your certification voucher" }
                    </a>
                }
                <p class="text-[#c5a059] text-xs tracking-[0.4em] opacity-70">{ format!("ID {}", props.passport_id) }</p>
            </div>
        </div>
    }
}
