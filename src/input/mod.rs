//! Turns raw macroquad input into [`Intent`]s.
//!
//! Renderers call these once per frame and queue the result on their
//! [`GameHandle`](crate::application::GameHandle); nothing here touches
//! simulation state.

use macroquad::prelude::*;

use crate::application::Intent;
use crate::domain::Life;
use crate::ui::{Button, Control, SPEED_STEP_LEVELS};

/// What a panel control asks for, given the current state
pub fn control_intent(control: Control, life: &Life) -> Intent {
    match control {
        Control::PlayPause if life.is_running => Intent::Stop,
        Control::PlayPause => Intent::Start,
        Control::Randomize => Intent::Randomize,
        Control::Reset => Intent::Reset,
        Control::Slower => speed_step(life, -SPEED_STEP_LEVELS),
        Control::Faster => speed_step(life, SPEED_STEP_LEVELS),
    }
}

fn speed_step(life: &Life, delta: i32) -> Intent {
    Intent::SetSpeedLevel(i32::from(life.speed_level().value()) + delta)
}

/// Keyboard shortcuts mirror the panel controls
const SHORTCUTS: [(KeyCode, Control); 5] = [
    (KeyCode::Space, Control::PlayPause),
    (KeyCode::R, Control::Randomize),
    (KeyCode::C, Control::Reset),
    (KeyCode::Down, Control::Slower),
    (KeyCode::Up, Control::Faster),
];

/// Intents for shortcut keys pressed this frame
pub fn keyboard_intents(life: &Life) -> Vec<Intent> {
    SHORTCUTS
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|&(_, control)| control_intent(control, life))
        .collect()
}

/// Intents for panel buttons clicked this frame
pub fn button_intents(buttons: &[Button], life: &Life, mouse_pos: (f32, f32)) -> Vec<Intent> {
    buttons
        .iter()
        .filter(|button| button.is_clicked(mouse_pos))
        .map(|button| control_intent(button.control(), life))
        .collect()
}

/// Left click position this frame, if any
pub fn left_click() -> Option<(f32, f32)> {
    is_mouse_button_pressed(MouseButton::Left).then(mouse_position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Grid, SpeedLevel};

    fn life(is_running: bool, level: i32) -> Life {
        Life {
            is_running,
            ..Life::new(Grid::dead(2, 2), SpeedLevel::new(level))
        }
    }

    #[test]
    fn test_play_pause_depends_on_state() {
        assert_eq!(control_intent(Control::PlayPause, &life(true, 50)), Intent::Stop);
        assert_eq!(control_intent(Control::PlayPause, &life(false, 50)), Intent::Start);
    }

    #[test]
    fn test_speed_controls_step_from_current_level() {
        assert_eq!(
            control_intent(Control::Faster, &life(false, 50)),
            Intent::SetSpeedLevel(60)
        );
        assert_eq!(
            control_intent(Control::Slower, &life(false, 5)),
            Intent::SetSpeedLevel(-5)
        );
    }
}
