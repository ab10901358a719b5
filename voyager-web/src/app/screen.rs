use voyager_core::{PassportController, View};
use yew::AttrValue;

use crate::components::stamp::{StampEntry, stamp_entries};

/// Data for the screen the controller currently selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Auth,
    Admin {
        display_name: AttrValue,
    },
    Badge {
        display_name: AttrValue,
        passport_id: AttrValue,
        reward_link: Option<AttrValue>,
    },
    Main {
        display_name: AttrValue,
        passport_id: AttrValue,
        stamps: Vec<StampEntry>,
        celebrating: bool,
    },
}

#[must_use]
pub fn screen_for(controller: &PassportController) -> Screen {
    let view = controller.view();
    let Some(session) = controller.session() else {
        return if view == View::Loading {
            Screen::Loading
        } else {
            Screen::Auth
        };
    };
    let display_name = AttrValue::from(session.display_name.clone());
    let passport_id = AttrValue::from(session.passport_id.clone());
    match view {
        View::Loading => Screen::Loading,
        View::Auth => Screen::Auth,
        View::Admin => Screen::Admin { display_name },
        View::Badge => Screen::Badge {
            display_name,
            passport_id,
            reward_link: controller.reward_link().map(|link| AttrValue::from(link.to_string())),
        },
        View::Main => Screen::Main {
            display_name,
            passport_id,
            stamps: stamp_entries(controller.catalog(), &session.progress),
            celebrating: controller.is_celebrating(),
        },
    }
}
