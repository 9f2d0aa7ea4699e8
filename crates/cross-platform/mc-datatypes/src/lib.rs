//! Small Minecraft datatypes which appear as command arguments.

#[cfg(feature = "color")]
mod color;
#[cfg(feature = "identifier")]
mod identifier;
#[cfg(feature = "positions")]
mod positions;
#[cfg(feature = "scoreboard")]
mod scoreboard;


#[cfg(feature = "color")]
pub use self::color::Color;
#[cfg(feature = "identifier")]
pub use self::identifier::{
    DEFAULT_NAMESPACE, IdentifierParseError, IdentifierParseOptions, NamespacedIdentifier,
    allowed_in_namespace, allowed_in_path,
};
#[cfg(feature = "positions")]
pub use self::positions::{
    Axis, Coordinate, CoordinateKind, Swizzle, SwizzleError, WorldBounds,
};
#[cfg(feature = "scoreboard")]
pub use self::scoreboard::{
    MAX_OBJECTIVE_LENGTH, ScoreboardOperation, ScoreboardSlot,
};
