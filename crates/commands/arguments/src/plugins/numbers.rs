use mcfunction_grammar::NodeProperties;
use mcfunction_reader::StringReader;

use crate::{context::CommandContext, error::ArgumentError, parser::ArgumentParser};


// The game stores these arguments in Java's `int`, `long`, `float`, and `double`,
// so bounds declared by the command tree are clamped to those ranges.

/// `brigadier:integer`
#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerParser;

/// `brigadier:long`
#[derive(Debug, Default, Clone, Copy)]
pub struct LongParser;

/// `brigadier:float`
#[derive(Debug, Default, Clone, Copy)]
pub struct FloatParser;

/// `brigadier:double`
#[derive(Debug, Default, Clone, Copy)]
pub struct DoubleParser;

enum OutOfRange<T> {
    Low(T),
    High(T),
}

fn check_range<T: PartialOrd>(found: &T, min: T, max: T) -> Option<OutOfRange<T>> {
    if *found < min {
        Some(OutOfRange::Low(min))
    } else if *found > max {
        Some(OutOfRange::High(max))
    } else {
        None
    }
}

fn integer_bounds(properties: &NodeProperties<'_>, lowest: i64, highest: i64) -> (i64, i64) {
    let clamp = |bound: i64| bound.clamp(lowest, highest);
    (
        properties.get_i64("min").map_or(lowest, clamp),
        properties.get_i64("max").map_or(highest, clamp),
    )
}

fn float_bounds(properties: &NodeProperties<'_>, lowest: f64, highest: f64) -> (f64, f64) {
    let clamp = |bound: f64| bound.clamp(lowest, highest);
    (
        properties.get_f64("min").map_or(lowest, clamp),
        properties.get_f64("max").map_or(highest, clamp),
    )
}

impl ArgumentParser for IntegerParser {
    fn parse(
        &self,
        reader:     &mut StringReader<'_>,
        properties: &NodeProperties<'_>,
        _context:   &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let (min, max) = integer_bounds(properties, i32::MIN.into(), i32::MAX.into());
        let start = reader.cursor();
        let found = reader.read_int()?;
        let span = start..reader.cursor();

        match check_range(&found, min, max) {
            Some(OutOfRange::Low(min))  => Err(ArgumentError::IntegerTooLow { min, found, span }),
            Some(OutOfRange::High(max)) => Err(ArgumentError::IntegerTooHigh { max, found, span }),
            None                        => Ok(None),
        }
    }
}

impl ArgumentParser for LongParser {
    fn parse(
        &self,
        reader:     &mut StringReader<'_>,
        properties: &NodeProperties<'_>,
        _context:   &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let (min, max) = integer_bounds(properties, i64::MIN, i64::MAX);
        let start = reader.cursor();
        let found = reader.read_int()?;
        let span = start..reader.cursor();

        match check_range(&found, min, max) {
            Some(OutOfRange::Low(min))  => Err(ArgumentError::LongTooLow { min, found, span }),
            Some(OutOfRange::High(max)) => Err(ArgumentError::LongTooHigh { max, found, span }),
            None                        => Ok(None),
        }
    }
}

impl ArgumentParser for FloatParser {
    fn parse(
        &self,
        reader:     &mut StringReader<'_>,
        properties: &NodeProperties<'_>,
        _context:   &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let (min, max) = float_bounds(properties, f32::MIN.into(), f32::MAX.into());
        let start = reader.cursor();
        let found = reader.read_float()?;
        let span = start..reader.cursor();

        match check_range(&found, min, max) {
            Some(OutOfRange::Low(min))  => Err(ArgumentError::FloatTooLow { min, found, span }),
            Some(OutOfRange::High(max)) => Err(ArgumentError::FloatTooHigh { max, found, span }),
            None                        => Ok(None),
        }
    }
}

impl ArgumentParser for DoubleParser {
    fn parse(
        &self,
        reader:     &mut StringReader<'_>,
        properties: &NodeProperties<'_>,
        _context:   &CommandContext,
    ) -> Result<Option<CommandContext>, ArgumentError> {
        let (min, max) = float_bounds(properties, f64::MIN, f64::MAX);
        let start = reader.cursor();
        let found = reader.read_float()?;
        let span = start..reader.cursor();

        match check_range(&found, min, max) {
            Some(OutOfRange::Low(min))  => Err(ArgumentError::DoubleTooLow { min, found, span }),
            Some(OutOfRange::High(max)) => Err(ArgumentError::DoubleTooHigh { max, found, span }),
            None                        => Ok(None),
        }
    }
}


#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use mcfunction_reader::Diagnose;

    use super::*;


    fn parse<P: ArgumentParser>(
        parser: &P,
        bounds: &Value,
        input:  &str,
    ) -> Result<usize, ArgumentError> {
        let properties = NodeProperties::new("number", bounds.as_object().unwrap());
        let mut reader = StringReader::new(input);
        parser
            .parse(&mut reader, &properties, &CommandContext::new())
            .map(|_| reader.cursor())
    }

    #[test]
    fn integer_in_range() {
        let bounds = json!({ "min": -10, "max": 100 });
        assert_eq!(parse(&IntegerParser, &bounds, "50").unwrap(), 2);
        assert_eq!(parse(&IntegerParser, &bounds, "-10 rest").unwrap(), 3);
    }

    #[test]
    fn integer_too_low() {
        let bounds = json!({ "min": -10 });
        let err = parse(&IntegerParser, &bounds, "-999999999999").unwrap_err();

        assert!(matches!(err, ArgumentError::IntegerTooLow { min: -10, .. }));
        assert_eq!(err.span(), 0..13);
        assert!(err.to_string().contains("-10"));
    }

    #[test]
    fn integer_too_high() {
        let bounds = json!({ "min": -10, "max": 100 });
        let err = parse(&IntegerParser, &bounds, "500").unwrap_err();
        assert_eq!(err.category(), "argument.integer.big");
        assert_eq!(err.span(), 0..3);
    }

    #[test]
    fn integer_bounds_are_clamped() {
        let bounds = json!({ "max": 3_000_000_000_i64 });
        let err = parse(&IntegerParser, &bounds, "2147483648").unwrap_err();
        assert!(matches!(err, ArgumentError::IntegerTooHigh { max: 2_147_483_647, .. }));

        // Without declared bounds, the range of the type still applies
        let err = parse(&IntegerParser, &json!({}), "-2147483649").unwrap_err();
        assert!(matches!(err, ArgumentError::IntegerTooLow { .. }));
    }

    #[test]
    fn integer_rejects_decimals() {
        let err = parse(&IntegerParser, &json!({}), "1.5").unwrap_err();
        assert_eq!(err.category(), "parsing.int.invalid");
    }

    #[test]
    fn longs() {
        assert!(parse(&LongParser, &json!({}), "-2147483649").is_ok());
        let err = parse(&LongParser, &json!({ "min": 0 }), "-1").unwrap_err();
        assert_eq!(err.category(), "argument.long.low");
    }

    #[test]
    fn floats() {
        assert_eq!(parse(&FloatParser, &json!({ "min": 0.0 }), "1.5").unwrap(), 3);

        let err = parse(&FloatParser, &json!({ "min": 0.0, "max": 1.0 }), "1.25").unwrap_err();
        assert_eq!(err.category(), "argument.float.big");
        assert_eq!(err.span(), 0..4);

        let err = parse(&FloatParser, &json!({}), "1.2.3").unwrap_err();
        assert_eq!(err.category(), "parsing.float.invalid");

        let huge = format!("-{}", "9".repeat(40));
        let err = parse(&FloatParser, &json!({ "min": -1e300 }), &huge).unwrap_err();
        assert!(matches!(err, ArgumentError::FloatTooLow { min, .. } if min == f64::from(f32::MIN)));
    }

    #[test]
    fn doubles() {
        let huge = format!("-{}", "9".repeat(40));
        assert!(parse(&DoubleParser, &json!({}), &huge).is_ok());

        let err = parse(&DoubleParser, &json!({ "max": 0.5 }), "0.75").unwrap_err();
        assert_eq!(err.category(), "argument.double.big");
    }
}
