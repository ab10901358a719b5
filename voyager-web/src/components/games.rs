//! Mini-game widgets hosted by the game modal.
//!
//! Each widget owns its presentation state and reports exactly one
//! `(won, metadata)` pair through `on_finish`; scoring lives in
//! `voyager_core::minigames`.

pub mod certification;
pub mod erp_flow;
pub mod error_spot;
pub mod fast_tap;
pub mod maze;
pub mod module_match;
pub mod quiz;
pub mod wheel;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use voyager_core::GameMetadata;
use yew::Callback;

/// Completion callback shared by every mini-game.
pub type OnFinish = Callback<(bool, GameMetadata)>;

pub(crate) fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}
