use mcfunction_datatypes::{MAX_OBJECTIVE_LENGTH, ScoreboardOperation, ScoreboardSlot};
use mcfunction_grammar::NodeProperties;
use mcfunction_reader::{ARGUMENT_SEPARATOR, StringReader, Suggestion, SuggestionKind};
use mcfunction_util::PrefixFilter as _;

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


/// `minecraft:operation`, such as `+=` or `><`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationParser;

impl ArgumentParser for OperationParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();
        let operation = reader.read_until(|ch| ch == ARGUMENT_SEPARATOR);

        if ScoreboardOperation::try_from(operation).is_ok() {
            Ok(None)
        } else {
            Err(ArgumentError::InvalidOperation {
                found: operation.to_owned(),
                span:  start..reader.cursor(),
            })
        }
    }

    fn suggestions(
        &self,
        prefix:      &str,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Vec<Suggestion> {
        ScoreboardOperation::ALL
            .into_iter()
            .map(ScoreboardOperation::symbol)
            .filter(|symbol| symbol.starts_with(prefix))
            .map(|symbol| Suggestion::new(symbol, 0, SuggestionKind::Enum))
            .collect()
    }
}

/// `minecraft:objective`
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectiveParser;

impl ArgumentParser for ObjectiveParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();
        let objective = reader.read_unquoted_string();

        if objective.is_empty() {
            Err(ArgumentError::ExpectedObjective { position: start })
        } else if objective.chars().count() > MAX_OBJECTIVE_LENGTH {
            Err(ArgumentError::ObjectiveTooLong {
                objective: objective.to_owned(),
                max:       MAX_OBJECTIVE_LENGTH,
                span:      start..reader.cursor(),
            })
        } else {
            Ok(None)
        }
    }
}

/// `minecraft:scoreboard_slot`, such as `sidebar` or `sidebar.team.red`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreboardSlotParser;

impl ArgumentParser for ScoreboardSlotParser {
    fn parse(
        &self,
        reader:      &mut StringReader<'_>,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let start = reader.cursor();
        let slot = reader.read_unquoted_string();

        if ScoreboardSlot::parse(slot).is_some() {
            Ok(None)
        } else {
            Err(ArgumentError::UnknownSlot {
                slot: slot.to_owned(),
                span: start..reader.cursor(),
            })
        }
    }

    fn suggestions(
        &self,
        prefix:      &str,
        _properties: &NodeProperties<'_>,
        _context:    &CommandContext,
    ) -> Vec<Suggestion> {
        ScoreboardSlot::all()
            .map(|slot| slot.to_string())
            .starting_with(prefix)
            .into_iter()
            .map(|slot| Suggestion::new(slot, 0, SuggestionKind::Enum))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use mcfunction_reader::Diagnose;

    use super::*;


    fn parse<P: ArgumentParser>(parser: &P, input: &str) -> Result<usize, ArgumentError> {
        let mut reader = StringReader::new(input);
        parser
            .parse(&mut reader, &NodeProperties::empty("arg"), &CommandContext::new())
            .map(|_| reader.cursor())
    }

    fn suggest<P: ArgumentParser>(parser: &P, prefix: &str) -> Vec<String> {
        parser
            .suggestions(prefix, &NodeProperties::empty("arg"), &CommandContext::new())
            .into_iter()
            .map(|suggestion| suggestion.text)
            .collect()
    }

    #[test]
    fn operations() {
        assert_eq!(parse(&OperationParser, "%= @s").unwrap(), 2);
        assert_eq!(parse(&OperationParser, "><").unwrap(), 2);

        let err = parse(&OperationParser, "=>").unwrap_err();
        assert_eq!(err.category(), "arguments.operation.invalid");
        assert_eq!(err.span(), 0..2);

        assert_eq!(suggest(&OperationParser, ">"), [">", "><"]);
    }

    #[test]
    fn objectives() {
        assert_eq!(parse(&ObjectiveParser, "kills").unwrap(), 5);

        let err = parse(&ObjectiveParser, "a_very_long_objective").unwrap_err();
        assert_eq!(err.category(), "arguments.objective.toolong");
        assert_eq!(err.span(), 0..21);

        let err = parse(&ObjectiveParser, "").unwrap_err();
        assert_eq!(err.category(), "arguments.objective.expected");
    }

    #[test]
    fn slots() {
        assert!(parse(&ScoreboardSlotParser, "sidebar.team.gold").is_ok());

        let err = parse(&ScoreboardSlotParser, "sidebar.team.reset").unwrap_err();
        assert_eq!(err.category(), "argument.slot.unknown");
        assert_eq!(err.span(), 0..18);

        assert_eq!(suggest(&ScoreboardSlotParser, "b"), ["belowName"]);
        assert_eq!(suggest(&ScoreboardSlotParser, "sidebar.team.").len(), 16);
    }
}
