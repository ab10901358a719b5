use yew::prelude::*;

#[function_component(Celebration)]
pub fn celebration() -> Html {
    html! {
        <div id="celebration" class="fixed inset-0 flex flex-col items-center justify-center z-[999] bg-black/70 backdrop-blur" role="status" aria-live="assertive">
            <div class="confetti" aria-hidden="true"></div>
            <h1 class="text-5xl font-extrabold text-yellow-400 drop-shadow-lg">{ "🎉 Congratulations! 🎉" }</h1>
            <p class="mt-4 text-white text-lg">{ "You completed all missions successfully!" }</p>
        </div>
    }
}
