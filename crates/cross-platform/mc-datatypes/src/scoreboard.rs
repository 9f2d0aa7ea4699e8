use std::fmt;
use std::fmt::{Display, Formatter};

use bijective_enum_map::injective_enum_map;
#[cfg(feature = "derive_serde")]
use serde::{Deserialize, Serialize};

use crate::color::Color;


/// Objective names longer than this are rejected by the game.
pub const MAX_OBJECTIVE_LENGTH: usize = 16;


/// A place where a scoreboard objective can be displayed.
#[cfg_attr(feature = "derive_serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreboardSlot {
    List,
    Sidebar,
    BelowName,
    /// Shown in the sidebar to members of teams with this color; never [`Color::Reset`].
    SidebarTeam(Color),
}

impl ScoreboardSlot {
    const TEAM_PREFIX: &'static str = "sidebar.team.";

    pub fn parse(slot: &str) -> Option<Self> {
        match slot {
            "list"      => Some(Self::List),
            "sidebar"   => Some(Self::Sidebar),
            "belowName" => Some(Self::BelowName),
            _ => {
                let color = Color::try_from(slot.strip_prefix(Self::TEAM_PREFIX)?).ok()?;
                (color != Color::Reset).then_some(Self::SidebarTeam(color))
            }
        }
    }

    /// Every valid slot, in a stable order.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::List, Self::Sidebar, Self::BelowName]
            .into_iter()
            .chain(Color::BASE.map(Self::SidebarTeam))
    }
}

impl Display for ScoreboardSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::List               => f.write_str("list"),
            Self::Sidebar            => f.write_str("sidebar"),
            Self::BelowName          => f.write_str("belowName"),
            Self::SidebarTeam(color) => write!(f, "{}{}", Self::TEAM_PREFIX, color.name()),
        }
    }
}

/// An operator of `scoreboard players operation`.
#[cfg_attr(feature = "derive_serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreboardOperation {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Min,
    Max,
    Swap,
}

injective_enum_map! {
    ScoreboardOperation, &'static str, &str,
    Assign   <=> "=",
    Add      <=> "+=",
    Subtract <=> "-=",
    Multiply <=> "*=",
    Divide   <=> "/=",
    Modulo   <=> "%=",
    Min      <=> "<",
    Max      <=> ">",
    Swap     <=> "><",
}

impl ScoreboardOperation {
    pub const ALL: [Self; 9] = [
        Self::Assign, Self::Add, Self::Subtract, Self::Multiply, Self::Divide,
        Self::Modulo, Self::Min, Self::Max, Self::Swap,
    ];

    #[inline]
    pub fn symbol(self) -> &'static str {
        self.into()
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn slots() {
        assert_eq!(ScoreboardSlot::parse("belowName"), Some(ScoreboardSlot::BelowName));
        assert_eq!(
            ScoreboardSlot::parse("sidebar.team.dark_aqua"),
            Some(ScoreboardSlot::SidebarTeam(Color::DarkAqua)),
        );
        assert_eq!(ScoreboardSlot::parse("sidebar.team.reset"), None);
        assert_eq!(ScoreboardSlot::parse("sidebar.team."), None);
        assert_eq!(ScoreboardSlot::parse("belowname"), None);
    }

    #[test]
    fn slot_display_round_trips() {
        assert_eq!(ScoreboardSlot::all().count(), 19);
        for slot in ScoreboardSlot::all() {
            assert_eq!(ScoreboardSlot::parse(&slot.to_string()), Some(slot));
        }
    }

    #[test]
    fn operations() {
        assert_eq!(ScoreboardOperation::try_from("><"), Ok(ScoreboardOperation::Swap));
        assert!(ScoreboardOperation::try_from("==").is_err());
        assert!(ScoreboardOperation::try_from("<<").is_err());
        for operation in ScoreboardOperation::ALL {
            assert_eq!(ScoreboardOperation::try_from(operation.symbol()), Ok(operation));
        }
        assert_eq!(ScoreboardOperation::Modulo.symbol(), "%=");
    }
}
