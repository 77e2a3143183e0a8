//! Manual control panel: three ON/OFF selectors with no backing hardware.
//!
//! The only rule: with Grid Power OFF the Diesel Generator is shown ON and
//! cannot be selected. The operator's own diesel choice is kept aside and
//! shows again once grid power returns.

use tracing::info;

/// Acknowledgment shown after "Apply Changes".
pub const APPLY_ACKNOWLEDGMENT: &str = "Manual Control Settings Applied Successfully!";

/// Position of a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum SwitchState {
    #[default]
    #[strum(to_string = "ON")]
    On,
    #[strum(to_string = "OFF")]
    Off,
}

impl SwitchState {
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// Equipment with a manual selector, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Equipment {
    #[strum(to_string = "Grid Power")]
    GridPower,
    #[strum(to_string = "Diesel Generator")]
    DieselGenerator,
    #[strum(to_string = "Transformer")]
    Transformer,
}

/// Operator-selected positions for one render of the Manual Control view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlPanel {
    grid_power: SwitchState,
    diesel_generator: SwitchState,
    transformer: SwitchState,
}

impl ControlPanel {
    /// Whether the operator may change this selector right now.
    pub fn is_selectable(&self, equipment: Equipment) -> bool {
        !(equipment == Equipment::DieselGenerator && self.grid_power == SwitchState::Off)
    }

    /// Set a selector. Returns `false` when the selector is locked.
    pub fn set(&mut self, equipment: Equipment, state: SwitchState) -> bool {
        if !self.is_selectable(equipment) {
            return false;
        }
        match equipment {
            Equipment::GridPower => self.grid_power = state,
            Equipment::DieselGenerator => self.diesel_generator = state,
            Equipment::Transformer => self.transformer = state,
        }
        true
    }

    /// Flip a selector. Returns `false` when the selector is locked.
    pub fn toggle(&mut self, equipment: Equipment) -> bool {
        let next = self.selected(equipment).toggled();
        self.set(equipment, next)
    }

    /// The position the operator picked, ignoring the grid rule.
    pub fn selected(&self, equipment: Equipment) -> SwitchState {
        match equipment {
            Equipment::GridPower => self.grid_power,
            Equipment::DieselGenerator => self.diesel_generator,
            Equipment::Transformer => self.transformer,
        }
    }

    /// The position shown under "Current Settings".
    pub fn effective(&self, equipment: Equipment) -> SwitchState {
        if equipment == Equipment::DieselGenerator && self.grid_power == SwitchState::Off {
            SwitchState::On
        } else {
            self.selected(equipment)
        }
    }

    /// Effective settings in display order.
    pub fn settings(&self) -> [(Equipment, SwitchState); 3] {
        [
            Equipment::GridPower,
            Equipment::DieselGenerator,
            Equipment::Transformer,
        ]
        .map(|e| (e, self.effective(e)))
    }

    /// "Apply Changes": acknowledge only. Nothing is actuated or stored.
    pub fn apply(&self) -> &'static str {
        info!(
            grid = %self.effective(Equipment::GridPower),
            diesel = %self.effective(Equipment::DieselGenerator),
            transformer = %self.effective(Equipment::Transformer),
            "manual control settings applied"
        );
        APPLY_ACKNOWLEDGMENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_all_on() {
        let panel = ControlPanel::default();
        assert_eq!(
            panel.settings(),
            [
                (Equipment::GridPower, SwitchState::On),
                (Equipment::DieselGenerator, SwitchState::On),
                (Equipment::Transformer, SwitchState::On),
            ]
        );
    }

    #[test]
    fn grid_off_forces_diesel_on() {
        let mut panel = ControlPanel::default();
        assert!(panel.set(Equipment::DieselGenerator, SwitchState::Off));
        assert!(panel.set(Equipment::GridPower, SwitchState::Off));
        assert_eq!(panel.effective(Equipment::DieselGenerator), SwitchState::On);
    }

    #[test]
    fn diesel_is_locked_while_grid_is_off() {
        let mut panel = ControlPanel::default();
        panel.set(Equipment::GridPower, SwitchState::Off);
        assert!(!panel.is_selectable(Equipment::DieselGenerator));
        assert!(!panel.toggle(Equipment::DieselGenerator));
        assert_eq!(panel.effective(Equipment::DieselGenerator), SwitchState::On);
    }

    #[test]
    fn operator_choice_returns_with_grid() {
        let mut panel = ControlPanel::default();
        panel.set(Equipment::DieselGenerator, SwitchState::Off);
        panel.toggle(Equipment::GridPower);
        panel.toggle(Equipment::GridPower);
        assert_eq!(panel.effective(Equipment::DieselGenerator), SwitchState::Off);
    }

    #[test]
    fn transformer_is_independent() {
        let mut panel = ControlPanel::default();
        panel.set(Equipment::GridPower, SwitchState::Off);
        assert!(panel.toggle(Equipment::Transformer));
        assert_eq!(panel.effective(Equipment::Transformer), SwitchState::Off);
    }

    #[test]
    fn apply_only_acknowledges() {
        let panel = ControlPanel::default();
        assert_eq!(panel.apply(), APPLY_ACKNOWLEDGMENT);
        assert_eq!(panel, ControlPanel::default());
    }
}
