pub mod celebration;
pub mod game_modal;
pub mod games;
pub mod stamp;
