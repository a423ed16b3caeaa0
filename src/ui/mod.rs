mod button;

pub use button::Button;

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 40.0;
pub const BUTTON_GAP: f32 = 10.0;
/// Speed levels added or removed by the Faster/Slower controls
pub const SPEED_STEP_LEVELS: i32 = 10;

/// Panel controls, top to bottom
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    PlayPause,
    Randomize,
    Reset,
    Slower,
    Faster,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::PlayPause,
        Control::Randomize,
        Control::Reset,
        Control::Slower,
        Control::Faster,
    ];

    pub const fn label(self, is_running: bool) -> &'static str {
        match self {
            Control::PlayPause if is_running => "Pause",
            Control::PlayPause => "Play",
            Control::Randomize => "Random",
            Control::Reset => "Reset",
            Control::Slower => "Slower",
            Control::Faster => "Faster",
        }
    }
}

/// Stack one button per control, starting at (x, y)
pub fn create_buttons(x: f32, y: f32) -> Vec<Button> {
    Control::ALL
        .iter()
        .enumerate()
        .map(|(idx, &control)| {
            let top = y + idx as f32 * (BUTTON_HEIGHT + BUTTON_GAP);
            Button::new(x, top, PANEL_WIDTH, BUTTON_HEIGHT, control)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_button_per_control_without_overlap() {
        let buttons = create_buttons(0.0, 100.0);
        assert_eq!(buttons.len(), Control::ALL.len());
        // The gap between the first two buttons belongs to neither
        let gap = (1.0, 100.0 + BUTTON_HEIGHT + BUTTON_GAP / 2.0);
        assert!(buttons.iter().all(|button| !button.is_hovered(gap)));
        assert!(buttons[1].is_hovered((1.0, 100.0 + BUTTON_HEIGHT + BUTTON_GAP)));
        assert_eq!(buttons[4].control(), Control::Faster);
    }

    #[test]
    fn test_play_pause_label_follows_state() {
        assert_eq!(Control::PlayPause.label(true), "Pause");
        assert_eq!(Control::PlayPause.label(false), "Play");
    }
}
