//! Module for parsing SNBT inside a command.
//!
//! Unlike a standalone SNBT parser, this one reads from the command's own
//! [`StringReader`], stops as soon as the value is complete, and on failure reports
//! the path of keys leading to the failure so that completion can resume there.

use mcfunction_reader::{ContainerPosition, ResumeHint, StringReader, is_quote};

use crate::{
    error::{NbtError, NbtErrorKind},
    settings::DepthLimit,
    tag::{NbtCompound, NbtTag},
};


/// The path segment used for the elements of a list or array.
pub const LIST_ITEM_SEGMENT: &str = ".";


/// Parses a compound tag starting at the reader's cursor, leaving the cursor just past its
/// closing `}`. Leading whitespace is skipped.
pub fn parse_compound(
    reader:      &mut StringReader<'_>,
    depth_limit: DepthLimit,
) -> Result<NbtCompound, NbtError> {
    SnbtParser::new(reader, depth_limit).compound(0)
}

/// Parses any tag starting at the reader's cursor, leaving the cursor just past it.
pub fn parse_value(
    reader:      &mut StringReader<'_>,
    depth_limit: DepthLimit,
) -> Result<NbtTag, NbtError> {
    SnbtParser::new(reader, depth_limit).value(0, ContainerPosition::Value)
}

/// Parses a string which should consist of exactly one compound tag, with optional
/// surrounding whitespace.
pub fn parse_full_compound(snbt: &str, depth_limit: DepthLimit) -> Result<NbtCompound, NbtError> {
    let mut reader = StringReader::new(snbt);
    let compound = parse_compound(&mut reader, depth_limit)?;

    reader.skip_whitespace();
    if reader.can_read() {
        let hint = ResumeHint {
            anchor: reader.cursor(),
            ..ResumeHint::default()
        };
        Err(NbtError::new(NbtErrorKind::Trailing, reader.cursor()..reader.total_length(), hint))
    } else {
        Ok(compound)
    }
}

// ================================
//      Actual parsing
// ================================

struct SnbtParser<'r, 'a> {
    reader:      &'r mut StringReader<'a>,
    depth_limit: DepthLimit,
    /// Keys of the containers currently being parsed, outermost first.
    path:        Vec<String>,
}

impl<'r, 'a> SnbtParser<'r, 'a> {
    fn new(reader: &'r mut StringReader<'a>, depth_limit: DepthLimit) -> Self {
        Self {
            reader,
            depth_limit,
            path: Vec::new(),
        }
    }

    fn hint(&self, position: Option<ContainerPosition>, anchor: usize) -> ResumeHint {
        let partial = self.reader
            .string()
            .get(anchor..self.reader.cursor())
            .unwrap_or_default();

        ResumeHint {
            anchor,
            partial: partial.to_owned(),
            path: self.path.clone(),
            position,
            ..ResumeHint::default()
        }
    }

    /// The span of the character at the cursor, which is empty at the end of input.
    fn found_span(&self) -> std::ops::Range<usize> {
        let start = self.reader.cursor();
        start..start + self.reader.peek().map_or(0, char::len_utf8)
    }

    fn check_depth(&self, depth: u32) -> Result<(), NbtError> {
        if self.depth_limit.exceeded_at(depth) {
            let start = self.reader.cursor();
            Err(NbtError::new(
                NbtErrorKind::ExceededDepthLimit { limit: self.depth_limit },
                self.found_span(),
                self.hint(None, start),
            ))
        } else {
            Ok(())
        }
    }

    fn value(&mut self, depth: u32, position: ContainerPosition) -> Result<NbtTag, NbtError> {
        self.reader.skip_whitespace();
        let start = self.reader.cursor();

        match self.reader.peek() {
            Some('{') => self.compound(depth).map(NbtTag::Compound),
            Some('[') => self.list_or_array(depth),
            Some(quote) if is_quote(quote) => self.reader
                .read_quoted_string()
                .map(NbtTag::String)
                .map_err(|err| NbtError::reader(err, self.hint(Some(position), start))),
            _ => {
                let token = self.reader.read_unquoted_string();
                if token.is_empty() {
                    return Err(NbtError::new(
                        NbtErrorKind::ExpectedValue,
                        self.found_span(),
                        self.hint(Some(position), start),
                    ));
                }

                classify_unquoted(token).ok_or_else(|| NbtError::new(
                    NbtErrorKind::InvalidNumber(token.to_owned()),
                    start..self.reader.cursor(),
                    self.hint(Some(position), start),
                ))
            }
        }
    }

    fn compound(&mut self, depth: u32) -> Result<NbtCompound, NbtError> {
        self.reader.skip_whitespace();
        let start = self.reader.cursor();

        if self.reader.peek() != Some('{') {
            let mut hint = self.hint(Some(ContainerPosition::Value), start);
            hint.completions.push("{".to_owned());
            return Err(NbtError::new(NbtErrorKind::ExpectedCompound, self.found_span(), hint));
        }
        self.check_depth(depth)?;
        self.reader.skip();

        let mut compound = NbtCompound::new();

        self.reader.skip_whitespace();
        if self.reader.peek() == Some('}') {
            self.reader.skip();
            return Ok(compound);
        }

        loop {
            self.reader.skip_whitespace();
            let key_start = self.reader.cursor();
            let key_hint = |parser: &Self, compound: &NbtCompound| {
                let mut hint = parser.hint(Some(ContainerPosition::Key), key_start);
                hint.existing_keys = compound.keys().cloned().collect();
                hint
            };

            let key = match self.reader.peek() {
                Some(quote) if is_quote(quote) => self.reader
                    .read_quoted_string()
                    .map_err(|err| NbtError::reader(err, key_hint(self, &compound)))?,
                _ => {
                    let key = self.reader.read_unquoted_string();
                    if key.is_empty() {
                        return Err(NbtError::new(
                            NbtErrorKind::ExpectedKey,
                            self.found_span(),
                            key_hint(self, &compound),
                        ));
                    }
                    key.to_owned()
                }
            };

            let key_end = self.reader.cursor();
            self.reader.skip_whitespace();

            if self.reader.peek() != Some(':') {
                let found = self.reader.peek();
                let hint = if found.is_none() && key_end < self.reader.cursor() {
                    // The key was finished with whitespace, so only the colon can follow
                    let mut hint = self.hint(None, self.reader.cursor());
                    hint.completions.push(":".to_owned());
                    hint
                } else {
                    let mut hint = key_hint(self, &compound);
                    hint.partial.truncate(key_end - key_start);
                    hint
                };
                return Err(NbtError::new(
                    NbtErrorKind::UnexpectedCharacter { expected: "':'", found },
                    self.found_span(),
                    hint,
                ));
            }
            self.reader.skip();

            self.path.push(key.clone());
            let value = self.value(depth + 1, ContainerPosition::Value)?;
            self.path.pop();

            compound.insert(key, value);

            if self.end_of_element('}', "',' or '}'")? {
                return Ok(compound);
            }
        }
    }

    fn list_or_array(&mut self, depth: u32) -> Result<NbtTag, NbtError> {
        self.check_depth(depth)?;
        // Skip the '['
        self.reader.skip();

        if self.reader.peek_at(1) == Some(';') {
            if let Some(type_char) = self.reader.peek() {
                return self.array(type_char, depth);
            }
        }

        self.list(depth)
    }

    fn list(&mut self, depth: u32) -> Result<NbtTag, NbtError> {
        let mut list: Vec<NbtTag> = Vec::new();

        self.reader.skip_whitespace();
        if self.reader.peek() == Some(']') {
            self.reader.skip();
            return Ok(NbtTag::List(list));
        }

        self.path.push(LIST_ITEM_SEGMENT.to_owned());
        loop {
            self.reader.skip_whitespace();
            let item_start = self.reader.cursor();
            let item = self.value(depth + 1, ContainerPosition::ListItem)?;

            if let Some(first) = list.first() {
                if first.tag_type() != item.tag_type() {
                    return Err(NbtError::new(
                        NbtErrorKind::MixedList {
                            list:  first.tag_type(),
                            found: item.tag_type(),
                        },
                        item_start..self.reader.cursor(),
                        self.hint(Some(ContainerPosition::ListItem), item_start),
                    ));
                }
            }
            list.push(item);

            if self.end_of_element(']', "',' or ']'")? {
                break;
            }
        }
        self.path.pop();

        Ok(NbtTag::List(list))
    }

    /// The cursor should be on the type character of `[B;`, `[I;`, or `[L;`.
    fn array(&mut self, type_char: char, depth: u32) -> Result<NbtTag, NbtError> {
        let type_start = self.reader.cursor();
        let mut array = match type_char {
            'B' => NbtTag::ByteArray(Vec::new()),
            'I' => NbtTag::IntArray(Vec::new()),
            'L' => NbtTag::LongArray(Vec::new()),
            other => {
                let mut hint = self.hint(None, type_start);
                hint.completions = vec!["B;".to_owned(), "I;".to_owned(), "L;".to_owned()];
                return Err(NbtError::new(
                    NbtErrorKind::InvalidArrayType(other),
                    self.found_span(),
                    hint,
                ));
            }
        };
        let array_type = array.tag_type();

        // Skip the type character and the ';'
        self.reader.skip();
        self.reader.skip();

        self.reader.skip_whitespace();
        if self.reader.peek() == Some(']') {
            self.reader.skip();
            return Ok(array);
        }

        self.path.push(LIST_ITEM_SEGMENT.to_owned());
        loop {
            self.reader.skip_whitespace();
            let item_start = self.reader.cursor();
            let item = self.value(depth + 1, ContainerPosition::ListItem)?;

            match (&mut array, item) {
                (NbtTag::ByteArray(bytes), NbtTag::Byte(byte)) => bytes.push(byte),
                (NbtTag::IntArray(ints),   NbtTag::Int(int))   => ints.push(int),
                (NbtTag::LongArray(longs), NbtTag::Long(long)) => longs.push(long),
                (_, item) => {
                    return Err(NbtError::new(
                        NbtErrorKind::MixedArray {
                            array: array_type,
                            found: item.tag_type(),
                        },
                        item_start..self.reader.cursor(),
                        self.hint(Some(ContainerPosition::ListItem), item_start),
                    ));
                }
            }

            if self.end_of_element(']', "',' or ']'")? {
                break;
            }
        }
        self.path.pop();

        Ok(array)
    }

    /// After an element of a container, read either a `,` (returning `false`)
    /// or the container's closing character (returning `true`).
    fn end_of_element(&mut self, closing: char, expected: &'static str) -> Result<bool, NbtError> {
        self.reader.skip_whitespace();

        match self.reader.peek() {
            Some(',') => {
                self.reader.skip();
                Ok(false)
            }
            Some(ch) if ch == closing => {
                self.reader.skip();
                Ok(true)
            }
            found => {
                let mut hint = self.hint(None, self.reader.cursor());
                hint.completions = vec![",".to_owned(), closing.to_string()];
                Err(NbtError::new(
                    NbtErrorKind::UnexpectedCharacter { expected, found },
                    self.found_span(),
                    hint,
                ))
            }
        }
    }
}

// ================================
//      Unquoted tokens
// ================================

/// Interprets an unquoted token as a number, boolean, or string.
/// Returns `None` for a token which is written as a number but is out of range for its type.
fn classify_unquoted(token: &str) -> Option<NbtTag> {
    match token {
        "true"  => return Some(NbtTag::Byte(1)),
        "false" => return Some(NbtTag::Byte(0)),
        _ => {}
    }

    let (body, suffix) = split_suffix(token);

    match suffix {
        Some('b') if is_integer(body) => body.parse().ok().map(NbtTag::Byte),
        Some('s') if is_integer(body) => body.parse().ok().map(NbtTag::Short),
        Some('l') if is_integer(body) => body.parse().ok().map(NbtTag::Long),
        Some('f') if is_decimal(body, false) => {
            body.parse::<f32>().ok().filter(|float| float.is_finite()).map(NbtTag::Float)
        }
        Some('d') if is_decimal(body, false) => {
            body.parse::<f64>().ok().filter(|double| double.is_finite()).map(NbtTag::Double)
        }
        None if is_integer(body) => body.parse().ok().map(NbtTag::Int),
        None if is_decimal(body, true) => {
            body.parse::<f64>().ok().filter(|double| double.is_finite()).map(NbtTag::Double)
        }
        _ => Some(NbtTag::String(token.to_owned())),
    }
}

/// Splits off a lowercased type suffix, such as the `b` of `1b`.
fn split_suffix(token: &str) -> (&str, Option<char>) {
    match token.chars().last() {
        Some(last) if token.len() > 1 && "bBsSlLfFdD".contains(last) => {
            (&token[..token.len() - 1], Some(last.to_ascii_lowercase()))
        }
        _ => (token, None),
    }
}

fn all_digits(digits: &str) -> bool {
    digits.bytes().all(|byte| byte.is_ascii_digit())
}

/// `[-+]?[0-9]+`
fn is_integer(body: &str) -> bool {
    let digits = body.strip_prefix(['-', '+']).unwrap_or(body);
    !digits.is_empty() && all_digits(digits)
}

/// `[-+]?([0-9]+.?|[0-9]*.[0-9]+)(e[-+]?[0-9]+)?`, where the `.` may be required.
fn is_decimal(body: &str, require_dot: bool) -> bool {
    let body = body.strip_prefix(['-', '+']).unwrap_or(body);

    let mantissa = match body.find(['e', 'E']) {
        Some(e_index) => {
            let exponent = &body[e_index + 1..];
            let exponent = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
            if exponent.is_empty() || !all_digits(exponent) {
                return false;
            }
            &body[..e_index]
        }
        None => body,
    };

    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (mantissa, None),
    };

    if require_dot && fraction.is_none() {
        return false;
    }

    let digit_count = whole.len() + fraction.map_or(0, str::len);
    digit_count > 0 && all_digits(whole) && fraction.is_none_or(all_digits)
}
