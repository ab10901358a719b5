pub mod screen;
pub mod wiring;

pub use screen::{Screen, screen_for};
pub use wiring::{Wiring, WiringError, build_ports};

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use chrono::{DateTime, Utc};
#[cfg(target_arch = "wasm32")]
use voyager_core::{
    Action, GameDescriptor, GameFinish, GameId, GameMetadata, bootstrap, load_admin_overview,
    login,
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::components::game_modal::GameModal;
#[cfg(target_arch = "wasm32")]
use crate::endpoints::Endpoints;
#[cfg(target_arch = "wasm32")]
use crate::pages::{
    admin::{AdminLoad, AdminPage},
    auth::{AuthPage, LoginForm},
    badge::BadgePage,
    loading::LoadingPage,
    passport::PassportPage,
};

#[cfg(target_arch = "wasm32")]
#[derive(Clone, PartialEq)]
struct OpenGame {
    game: GameDescriptor,
    started_at: DateTime<Utc>,
    seed: u64,
}

#[cfg(target_arch = "wasm32")]
#[derive(Clone, Default, PartialEq)]
struct LoginState {
    busy: bool,
    error: Option<AttrValue>,
}

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let wiring = use_memo((), |()| {
        Wiring::new(&Endpoints::from_env())
            .map(Rc::new)
            .map_err(|err| AttrValue::from(err.to_string()))
    });
    match (*wiring).clone() {
        Ok(wiring) => html! { <PassportShell {wiring} /> },
        Err(message) => {
            log::error!("{message}");
            html! {
                <div class="min-h-screen flex items-center justify-center bg-[#00152f] text-[#c5a059] p-6" role="alert">
                    { "The passport could not start. Please reload the page." }
                </div>
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Properties, PartialEq)]
struct ShellProps {
    wiring: Rc<Wiring>,
}

#[cfg(target_arch = "wasm32")]
#[function_component(PassportShell)]
fn passport_shell(props: &ShellProps) -> Html {
    let wiring = Rc::clone(&props.wiring);
    let runtime = wiring.runtime.clone();
    let update = use_force_update();
    let login_state = use_state(LoginState::default);
    let admin = use_state(AdminLoad::default);
    let admin_refresh = use_state(|| 0_u32);
    let open_game = use_state(|| None::<OpenGame>);

    {
        let wiring = Rc::clone(&wiring);
        use_effect_with((), move |()| {
            let runtime = wiring.runtime.clone();
            runtime.set_listener(move || update.force_update());
            {
                let wiring = Rc::clone(&wiring);
                spawn_local(async move {
                    let ports = wiring.runtime.runner().ports().clone();
                    let outcome =
                        bootstrap(&*ports.cache, &*ports.store, wiring.engine.catalog()).await;
                    wiring.runtime.dispatch(Action::BootstrapFinished(outcome));
                });
            }
            move || {
                runtime.set_listener(|| {});
                runtime.dispatch(Action::Teardown);
            }
        });
    }

    let screen = runtime.with_controller(screen_for);
    let is_admin_screen = matches!(screen, Screen::Admin { .. });

    {
        let wiring = Rc::clone(&wiring);
        let admin = admin.clone();
        use_effect_with((is_admin_screen, *admin_refresh), move |(active, _)| {
            if *active {
                admin.set(AdminLoad::Loading);
                spawn_local(async move {
                    let store = Rc::clone(&wiring.runtime.runner().ports().store);
                    match load_admin_overview(&*store, wiring.engine.catalog()).await {
                        Ok(overview) => admin.set(AdminLoad::Ready(Rc::new(overview))),
                        Err(err) => {
                            log::warn!("admin overview failed: {err}");
                            admin.set(AdminLoad::Failed(
                                "Could not load participants. Try refreshing.".into(),
                            ));
                        }
                    }
                });
            }
            || {}
        });
    }

    let on_login = {
        let wiring = Rc::clone(&wiring);
        let login_state = login_state.clone();
        Callback::from(move |form: LoginForm| {
            login_state.set(LoginState {
                busy: true,
                error: None,
            });
            let wiring = Rc::clone(&wiring);
            let login_state = login_state.clone();
            spawn_local(async move {
                let ports = wiring.runtime.runner().ports().clone();
                let config = wiring.engine.config();
                let result = login(
                    &*ports.store,
                    &*ports.cache,
                    wiring.engine.catalog(),
                    &form.email,
                    &form.name,
                    config.name_max_len,
                )
                .await;
                match result {
                    Ok(session) => {
                        login_state.set(LoginState::default());
                        wiring.runtime.dispatch(Action::LoggedIn(session));
                    }
                    Err(err) => {
                        log::warn!("login rejected: {err}");
                        login_state.set(LoginState {
                            busy: false,
                            error: Some(err.user_message().into()),
                        });
                    }
                }
            });
        })
    };
    let on_logout = {
        let runtime = runtime.clone();
        let open_game = open_game.clone();
        Callback::from(move |()| {
            open_game.set(None);
            runtime.dispatch(Action::Logout);
        })
    };
    let on_open_game = {
        let wiring = Rc::clone(&wiring);
        let open_game = open_game.clone();
        Callback::from(move |id: GameId| {
            let Some(game) = wiring.engine.catalog().get(id).cloned() else {
                log::warn!("ignoring unknown game {id}");
                return;
            };
            open_game.set(Some(OpenGame {
                game,
                started_at: Utc::now(),
                seed: crate::dom::random_seed(),
            }));
        })
    };
    let on_close_game = {
        let open_game = open_game.clone();
        Callback::from(move |()| open_game.set(None))
    };

    let modal = (*open_game).clone().map(|open| {
        let status = runtime
            .with_controller(|c| c.session().and_then(|s| s.progress.status(open.game.id)))
            .unwrap_or_default();
        let on_finish = {
            let runtime = runtime.clone();
            let id = open.game.id;
            let started_at = open.started_at;
            Callback::from(move |(won, metadata): (bool, GameMetadata)| {
                let finish = GameFinish::bare(id, won, started_at).with_metadata(metadata);
                runtime.dispatch(Action::GameFinished(finish));
            })
        };
        let key = format!("{}-{}", open.game.id, open.seed);
        let seed = open.seed;
        html! {
            <GameModal
                key={key}
                game={open.game}
                {status}
                {seed}
                minigames={Rc::clone(&wiring.minigames)}
                {on_finish}
                on_close={on_close_game.clone()}
            />
        }
    });

    let page = match screen {
        Screen::Loading => html! { <LoadingPage /> },
        Screen::Auth => html! {
            <AuthPage busy={login_state.busy} error={login_state.error.clone()} on_submit={on_login} />
        },
        Screen::Admin { display_name } => {
            let on_refresh = {
                let admin_refresh = admin_refresh.clone();
                Callback::from(move |()| admin_refresh.set(admin_refresh.wrapping_add(1)))
            };
            html! {
                <AdminPage {display_name} load={(*admin).clone()} {on_refresh} on_logout={on_logout.clone()} />
            }
        }
        Screen::Badge {
            display_name,
            passport_id,
            reward_link,
        } => html! {
            <BadgePage {display_name} {passport_id} {reward_link} on_logout={on_logout.clone()} />
        },
        Screen::Main {
            display_name,
            passport_id,
            stamps,
            celebrating,
        } => html! {
            <>
                <PassportPage {display_name} {passport_id} {stamps} {celebrating} {on_open_game} on_logout={on_logout.clone()} />
                { modal.unwrap_or_default() }
            </>
        },
    };

    html! {
        <>
            <style>{ crate::a11y::visible_focus_css() }</style>
            if wiring.offline {
                <div class="fixed bottom-2 left-2 text-[10px] uppercase tracking-widest text-gray-400">{ "Offline demo" }</div>
            }
            <div id={crate::a11y::STATUS_REGION_ID} class="sr-only" aria-live="polite"></div>
            { page }
        </>
    }
}
