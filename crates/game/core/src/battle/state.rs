use strum::Display;

/// Lifecycle states of a battle session.
///
/// `Start` exists only during initialization; turn order immediately moves
/// the session to one of the turn states. `Victory`, `Defeat`, and `Fled`
/// are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleState {
    Start,
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
    Fled,
}

impl BattleState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Fled)
    }
}
