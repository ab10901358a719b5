use yew::prelude::*;

#[function_component(LoadingPage)]
pub fn loading_page() -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-[#00152f]" aria-busy="true" aria-live="polite">
            <div class="flex flex-col items-center gap-4 text-[#c5a059]">
                <span class="loading loading-spinner loading-lg" role="progressbar"></span>
                <p class="text-xs uppercase tracking-[0.3em]">{ "Checking your passport…" }</p>
            </div>
        </div>
    }
}
