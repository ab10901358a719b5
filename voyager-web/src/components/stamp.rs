use voyager_core::{GameCatalog, GameDescriptor, GameStatus, ProgressMap};
use yew::prelude::*;

/// One catalog entry paired with the player's status for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampEntry {
    pub game: GameDescriptor,
    pub status: GameStatus,
}

/// Stamps in catalog order. Games missing from the map show as unlocked.
#[must_use]
pub fn stamp_entries(catalog: &GameCatalog, progress: &ProgressMap) -> Vec<StampEntry> {
    catalog
        .games()
        .iter()
        .map(|game| StampEntry {
            game: game.clone(),
            status: progress.status(game.id).unwrap_or_default(),
        })
        .collect()
}

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub entry: StampEntry,
    pub on_click: Callback<()>,
}

#[function_component(Stamp)]
pub fn stamp(props: &Props) -> Html {
    let onclick = {
        let cb = props.on_click.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let status = props.entry.status;
    let class = classes!(
        "stamp",
        "relative",
        "aspect-square",
        "rounded-full",
        "flex",
        "flex-col",
        "items-center",
        "justify-center",
        "p-2",
        match status {
            GameStatus::Won => "stamp--won border-4 border-dashed border-red-400 rotate-[-5deg]",
            GameStatus::Participated =>
                "stamp--played border-4 border-dashed border-gray-300 grayscale opacity-60",
            GameStatus::Unlocked | GameStatus::Locked => "stamp--open border-2 border-gray-200 opacity-40",
        }
    );
    let label = format!("{} ({})", props.entry.game.title, status_label(status));

    html! {
        <button type="button" {class} {onclick} aria-label={label} data-status={status.as_str()}>
            if status.is_attempted() {
                <span class="absolute inset-0 flex items-center justify-center pointer-events-none opacity-20 text-3xl rotate-12">{ "PASSED" }</span>
            }
            <span class="text-3xl mb-1" aria-hidden="true">{ props.entry.game.icon.clone() }</span>
            <span class="text-[10px] font-bold uppercase text-center passport-font leading-tight">{ props.entry.game.title.clone() }</span>
            if status.is_won() {
                <span class="absolute -top-1 -right-1 bg-red-500 text-white text-[8px] px-1 rounded-sm rotate-12 font-bold">{ "APPROVED" }</span>
            }
        </button>
    }
}

const fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Won => "won",
        GameStatus::Participated => "played",
        GameStatus::Unlocked | GameStatus::Locked => "not played",
    }
}
