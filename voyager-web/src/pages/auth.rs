use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Raw form values; validation happens in the login service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub name: String,
}

#[derive(Properties, Clone, PartialEq)]
pub struct AuthPageProps {
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub on_submit: Callback<LoginForm>,
}

#[function_component(AuthPage)]
pub fn auth_page(props: &AuthPageProps) -> Html {
    let email = use_state(String::new);
    let name = use_state(String::new);

    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                email.set(input.value());
            }
        })
    };
    let on_name = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                name.set(input.value());
            }
        })
    };
    let on_submit = {
        let email = email.clone();
        let name = name.clone();
        let on_submit = props.on_submit.clone();
        let busy = props.busy;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !busy {
                on_submit.emit(LoginForm {
                    email: (*email).clone(),
                    name: (*name).clone(),
                });
            }
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-[#00152f] p-6">
            <div class="relative w-full max-w-sm rounded-2xl border-4 border-[#c5a059] shadow-2xl bg-[#1e3a5f] p-8 flex flex-col items-center gap-6">
                <div class="text-center">
                    <div class="text-[#c5a059] border-2 border-[#c5a059] px-3 py-1 inline-block rounded mb-3">
                        <h2 class="text-sm font-bold tracking-[0.25em] uppercase">{ "Enterprise" }</h2>
                    </div>
                    <h1 class="text-4xl font-bold text-[#c5a059] tracking-widest uppercase">{ "Passport" }</h1>
                </div>
                <div class="w-28 h-28 border-4 border-[#c5a059] rounded-full flex items-center justify-center">
                    <span class="text-6xl">{ "🌍" }</span>
                </div>
                <form id="login-form" class="w-full space-y-4" onsubmit={on_submit} novalidate=true>
                    <label class="sr-only" for="login-name">{ "Name" }</label>
                    <input
                        id="login-name"
                        type="text"
                        autocomplete="name"
                        placeholder="Enter Name"
                        value={(*name).clone()}
                        oninput={on_name}
                        disabled={props.busy}
                        class="w-full text-center text-xl py-3 bg-transparent text-[#c5a059] border-2 border-[#c5a059] rounded-xl placeholder:text-[#c5a059]/40"
                    />
                    <label class="sr-only" for="login-email">{ "Email" }</label>
                    <input
                        id="login-email"
                        type="email"
                        autocomplete="email"
                        placeholder="name@example.com"
                        value={(*email).clone()}
                        oninput={on_email}
                        disabled={props.busy}
                        class="w-full text-center text-xl py-3 bg-transparent text-[#c5a059] border-2 border-[#c5a059] rounded-xl placeholder:text-[#c5a059]/40"
                    />
                    if let Some(error) = props.error.clone() {
                        <p id="login-error" class="text-red-300 text-xs text-center" role="alert">{ error }</p>
                    }
                    <button
                        type="submit"
                        class="w-full bg-[#c5a059] text-[#1e3a5f] py-3 rounded-xl font-bold text-lg shadow-lg"
                        disabled={props.busy}
                        aria-busy={props.busy.to_string()}
                    >
                        { if props.busy { "Boarding…" } else { "Onboard" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
