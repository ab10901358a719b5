use std::rc::Rc;

use voyager_core::AdminOverview;
use yew::prelude::*;

/// Where the overview fetch currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminLoad {
    #[default]
    Loading,
    Ready(Rc<AdminOverview>),
    Failed(AttrValue),
}

#[derive(Properties, Clone, PartialEq)]
pub struct AdminPageProps {
    pub display_name: AttrValue,
    pub load: AdminLoad,
    pub on_refresh: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(AdminPage)]
pub fn admin_page(props: &AdminPageProps) -> Html {
    let on_refresh = {
        let cb = props.on_refresh.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_logout = {
        let cb = props.on_logout.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let body = match &props.load {
        AdminLoad::Loading => html! {
            <p class="text-gray-500 text-sm" aria-busy="true">{ "Loading participants…" }</p>
        },
        AdminLoad::Failed(message) => html! {
            <p id="admin-error" class="text-red-600 text-sm" role="alert">{ message.clone() }</p>
        },
        AdminLoad::Ready(overview) => render_overview(overview),
    };

    html! {
        <div class="min-h-screen bg-gray-50 p-6">
            <div class="max-w-5xl mx-auto space-y-6">
                <header class="flex items-center justify-between">
                    <div>
                        <h1 class="text-2xl font-bold text-gray-800">{ "Voyager Control Room" }</h1>
                        <p class="text-xs text-gray-500 uppercase tracking-wider">{ format!("Signed in as {}", props.display_name) }</p>
                    </div>
                    <div class="flex gap-2">
                        <button id="admin-refresh" type="button" class="btn btn-sm" onclick={on_refresh}>{ "Refresh" }</button>
                        <button id="admin-logout" type="button" class="btn btn-sm btn-ghost" onclick={on_logout}>{ "Logout" }</button>
                    </div>
                </header>
                { body }
            </div>
        </div>
    }
}

fn render_overview(overview: &AdminOverview) -> Html {
    let tiles = [
        ("Participants", overview.total_users.to_string()),
        ("Attempts", overview.total_attempts.to_string()),
        ("Wins", overview.total_wins.to_string()),
        (
            "Completed",
            format!(
                "{} ({}%)",
                overview.fully_completed,
                overview.completion_percent()
            ),
        ),
    ];
    html! {
        <>
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4" id="admin-stats">
                { for tiles.iter().map(|(label, value)| html! {
                    <div class="bg-white rounded-xl shadow p-4">
                        <p class="text-xs text-gray-500 uppercase">{ *label }</p>
                        <p class="text-2xl font-bold text-gray-800">{ value.clone() }</p>
                    </div>
                }) }
            </div>
            <table class="table w-full bg-white rounded-xl shadow" id="admin-users">
                <thead>
                    <tr><th>{ "Name" }</th><th>{ "Email" }</th><th>{ "Attempts" }</th><th>{ "Wins" }</th><th>{ "Status" }</th></tr>
                </thead>
                <tbody>
                    if overview.users.is_empty() {
                        <tr><td colspan="5" class="text-center text-gray-400">{ "No participants yet" }</td></tr>
                    }
                    { for overview.users.iter().map(|row| html! {
                        <tr key={row.email.clone()}>
                            <td>{ row.name.clone() }</td>
                            <td>{ row.email.clone() }</td>
                            <td>{ row.attempts.to_string() }</td>
                            <td>{ row.wins.to_string() }</td>
                            <td>{ if row.completed { "Completed" } else { "In progress" } }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </>
    }
}
