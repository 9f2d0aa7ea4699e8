use mcfunction_datatypes::{Axis, Coordinate, CoordinateKind, WorldBounds};
use mcfunction_grammar::NodeProperties;
use mcfunction_reader::{ARGUMENT_SEPARATOR, ReaderError, StringReader, Suggestion, SuggestionKind};

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// `minecraft:block_pos`: three coordinates, which must be whole numbers unless relative
/// or local, and inside the world.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockPosParser {
    bounds: WorldBounds,
}

impl BlockPosParser {
    #[inline]
    pub fn new(bounds: WorldBounds) -> Self {
        Self { bounds }
    }
}

impl ArgumentParser for BlockPosParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();
        let position = read_position(reader, true)?;

        let outside = Axis::ALL.into_iter().zip(position).any(|(axis, coordinate)| {
            coordinate.kind == CoordinateKind::Absolute
                && !self.bounds.contains(axis, coordinate.value)
        });
        if outside {
            return Err(ArgumentError::OutOfWorld { span: start..reader.cursor() });
        }

        Ok(None)
    }

    fn suggestions(
        &self,
        prefix:      &str,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Vec<Suggestion> {
        position_suggestions(prefix)
    }
}

/// `minecraft:vec3`: three coordinates, each of which may have a fractional part.
#[derive(Debug, Default, Clone, Copy)]
pub struct Vec3Parser;

impl ArgumentParser for Vec3Parser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        read_position(reader, false)?;
        Ok(None)
    }

    fn suggestions(
        &self,
        prefix:      &str,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Vec<Suggestion> {
        position_suggestions(prefix)
    }
}

// ================================
//      Reading coordinates
// ================================

fn read_position(
    reader:   &mut StringReader<'_>,
    integers: bool,
) -> Result<[Coordinate; 3], ArgumentError> {
    let start = reader.cursor();
    let mut position = [Coordinate { kind: CoordinateKind::Absolute, value: 0. }; 3];

    for (index, coordinate) in position.iter_mut().enumerate() {
        if index > 0 {
            if reader.peek() != Some(ARGUMENT_SEPARATOR) {
                return Err(ArgumentError::IncompletePosition { span: start..reader.cursor() });
            }
            reader.skip();
        }
        *coordinate = read_coordinate(reader, integers)?;
    }

    let local = position.iter().filter(|coordinate| coordinate.kind == CoordinateKind::Local);
    match local.count() {
        0 | 3 => Ok(position),
        _     => Err(ArgumentError::MixedCoordinates { span: start..reader.cursor() }),
    }
}

fn read_coordinate(
    reader:   &mut StringReader<'_>,
    integers: bool,
) -> Result<Coordinate, ArgumentError> {
    if let Some(kind) = reader.peek().and_then(CoordinateKind::from_prefix) {
        reader.skip();
        // An omitted offset is zero
        if matches!(reader.peek(), None | Some(ARGUMENT_SEPARATOR)) {
            return Ok(Coordinate { kind, value: 0. });
        }
        let value = reader.read_float()?;
        return Ok(Coordinate { kind, value });
    }

    let value = if integers {
        read_block_coordinate(reader)?
    } else {
        reader.read_float()?
    };
    Ok(Coordinate { kind: CoordinateKind::Absolute, value })
}

fn read_block_coordinate(reader: &mut StringReader<'_>) -> Result<f64, ArgumentError> {
    match reader.read_int() {
        // World coordinates are far below 2^52, anything larger is out of the world anyway
        Ok(value) => Ok(value as f64),
        Err(ReaderError::InvalidInt { start, end, number }) if number.parse::<f64>().is_ok() => {
            Err(ArgumentError::FloatBlockPosition { found: number, span: start..end })
        }
        Err(err) => Err(err.into()),
    }
}

/// Offers the remaining coordinates as `~` (or `^`, if the position started with one).
fn position_suggestions(prefix: &str) -> Vec<Suggestion> {
    if prefix.is_empty() {
        return vec![
            Suggestion::new("~ ~ ~", 0, SuggestionKind::Value),
            Suggestion::new("^ ^ ^", 0, SuggestionKind::Value),
        ];
    }

    let parts: Vec<&str> = prefix.split(ARGUMENT_SEPARATOR).collect();
    let written = parts.len() - 1;
    if written == 0 || written >= 3 || parts.last().is_some_and(|last| !last.is_empty()) {
        return Vec::new();
    }

    let marker = if prefix.starts_with('^') { "^" } else { "~" };
    let remaining = vec![marker; 3 - written].join(" ");
    vec![Suggestion::new(remaining, prefix.len(), SuggestionKind::Value)]
}
