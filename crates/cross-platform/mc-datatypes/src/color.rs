use bijective_enum_map::injective_enum_map;
#[cfg(feature = "derive_serde")]
use serde::{Deserialize, Serialize};


/// A named text or team color.
#[cfg_attr(feature = "derive_serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    /// Not a color of its own, but accepted wherever a color argument is.
    Reset,
}

injective_enum_map! {
    Color, &'static str, &str,
    Black       <=> "black",
    DarkBlue    <=> "dark_blue",
    DarkGreen   <=> "dark_green",
    DarkAqua    <=> "dark_aqua",
    DarkRed     <=> "dark_red",
    DarkPurple  <=> "dark_purple",
    Gold        <=> "gold",
    Gray        <=> "gray",
    DarkGray    <=> "dark_gray",
    Blue        <=> "blue",
    Green       <=> "green",
    Aqua        <=> "aqua",
    Red         <=> "red",
    LightPurple <=> "light_purple",
    Yellow      <=> "yellow",
    White       <=> "white",
    Reset       <=> "reset",
}

impl Color {
    /// The sixteen actual colors, excluding [`Color::Reset`].
    pub const BASE: [Self; 16] = [
        Self::Black, Self::DarkBlue, Self::DarkGreen, Self::DarkAqua,
        Self::DarkRed, Self::DarkPurple, Self::Gold, Self::Gray,
        Self::DarkGray, Self::Blue, Self::Green, Self::Aqua,
        Self::Red, Self::LightPurple, Self::Yellow, Self::White,
    ];

    #[inline]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Every color name, including `reset`.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::BASE.into_iter().chain([Self::Reset]).map(Self::name)
    }
}
