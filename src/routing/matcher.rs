//! Route pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a path template into literal and parameter segments (once)
//! - Match a token stream against the segments, one token per step
//! - Accumulate parameter characters and cast them on segment boundaries
//! - Discard all progress on the first mismatching token
//!
//! # Design Decisions
//! - The compiled `Pattern` is immutable; progress lives in a separate
//!   `MatchState`, so one pattern can be matched by many states at once
//! - A parameter ends at the first token its type does not allow; that token
//!   is then tried against the next segment in the same step
//! - A boundary token that completes the pattern is not consumed, it belongs
//!   to whatever follows (end of input or a sub-router)
//! - The matcher never moves the scanner; callers decide when to accept

use crate::lexer::{Scanner, Token, TokenKind, TokenKinds};
use crate::params::types::string_kinds;
use crate::params::{Parameter, ParameterType, ParameterTypes};
use crate::routing::error::TemplateError;

/// One unit of a compiled pattern.
#[derive(Debug, Clone)]
pub enum Segment {
    Literal(char),
    Parameter { name: String, ty: ParameterType },
}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse `template`, resolving placeholder types in `types`.
    pub fn compile(
        template: &str,
        types: &ParameterTypes,
        invalid: TokenKinds,
    ) -> Result<Self, TemplateError> {
        let segments = TemplateParser {
            scanner: Scanner::new(template, invalid),
            types,
            segments: Vec::new(),
        }
        .parse()?;

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Parameter { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

/// Grammar: `{name: type}` placeholders between literal characters.
struct TemplateParser<'a, 't> {
    scanner: Scanner<'a>,
    types: &'t ParameterTypes,
    segments: Vec<Segment>,
}

impl TemplateParser<'_, '_> {
    fn parse(mut self) -> Result<Vec<Segment>, TemplateError> {
        if self.scanner.is_end() {
            return Err(TemplateError::Empty);
        }

        while !self.scanner.is_end() {
            let token = *self.scanner.current();
            match (token.kind, token.character) {
                (TokenKind::OpenBrace, _) => self.parameter()?,
                (TokenKind::CloseBrace, _) => {
                    return Err(TemplateError::UnexpectedClose(token.position))
                }
                (_, Some(c)) => {
                    self.segments.push(Segment::Literal(c));
                    self.scanner.accept()?;
                }
                (_, None) => break,
            }
        }
        Ok(self.segments)
    }

    fn parameter(&mut self) -> Result<(), TemplateError> {
        self.scanner.accept()?;
        self.skip_spaces()?;
        let name = self.word("a parameter name")?;
        self.skip_spaces()?;
        self.expect(TokenKind::Colon, "':'")?;
        self.skip_spaces()?;
        let type_name = self.word("a type name")?;
        self.skip_spaces()?;
        self.expect(TokenKind::CloseBrace, "'}'")?;

        let ty = self.types.resolve(&type_name)?.clone();
        let declared = self.segments.iter().any(
            |segment| matches!(segment, Segment::Parameter { name: existing, .. } if *existing == name),
        );
        if declared {
            return Err(TemplateError::DuplicateName(name));
        }

        self.segments.push(Segment::Parameter { name, ty });
        Ok(())
    }

    fn word(&mut self, expected: &'static str) -> Result<String, TemplateError> {
        let kinds = string_kinds();
        let mut word = String::new();
        while kinds.contains(self.scanner.current().kind) {
            if let Some(c) = self.scanner.current().character {
                word.push(c);
            }
            self.scanner.accept()?;
        }

        if word.is_empty() {
            return Err(self.expected(expected));
        }
        Ok(word)
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), TemplateError> {
        if self.scanner.current().kind != kind {
            return Err(self.expected(expected));
        }
        self.scanner.accept()?;
        Ok(())
    }

    fn skip_spaces(&mut self) -> Result<(), TemplateError> {
        while self.scanner.current().kind == TokenKind::Space {
            self.scanner.accept()?;
        }
        Ok(())
    }

    fn expected(&self, expected: &'static str) -> TemplateError {
        TemplateError::Expected {
            expected,
            position: self.scanner.current().position,
        }
    }
}

/// Result of feeding one token to a [`MatchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The token was matched and belongs to this pattern.
    Consumed,
    /// A trailing parameter ended at this token, completing the pattern.
    /// The token itself is left for the caller.
    Boundary,
    /// The token does not fit; all progress was discarded.
    Mismatch,
    /// The pattern was already complete before this token.
    Exhausted,
}

impl Step {
    pub fn is_match(self) -> bool {
        matches!(self, Step::Consumed | Step::Boundary)
    }
}

/// Progress of one match attempt against a [`Pattern`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchState {
    segment: usize,
    accumulator: String,
    parameters: Vec<Parameter>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, pattern: &Pattern, token: &Token) -> Step {
        let Some(segment) = pattern.segments.get(self.segment) else {
            return Step::Exhausted;
        };

        match segment {
            Segment::Literal(expected) => {
                if token.character == Some(*expected) {
                    self.segment += 1;
                    Step::Consumed
                } else {
                    self.reset();
                    Step::Mismatch
                }
            }
            Segment::Parameter { name, ty } => {
                if ty.allows(token.kind) {
                    if let Some(c) = token.character {
                        self.accumulator.push(c);
                    }
                    return Step::Consumed;
                }

                let Some(value) = ty.cast(&self.accumulator) else {
                    self.reset();
                    return Step::Mismatch;
                };
                self.parameters
                    .push(Parameter::new(name.clone(), ty.name(), value));
                self.accumulator.clear();
                self.segment += 1;

                if self.is_complete(pattern) {
                    Step::Boundary
                } else {
                    self.step(pattern, token)
                }
            }
        }
    }

    pub fn is_complete(&self, pattern: &Pattern) -> bool {
        self.segment >= pattern.segments.len()
    }

    pub fn reset(&mut self) {
        self.segment = 0;
        self.accumulator.clear();
        self.parameters.clear();
    }

    pub fn segment_index(&self) -> usize {
        self.segment
    }

    pub fn accumulated(&self) -> &str {
        &self.accumulator
    }

    /// Parameters finalized so far, in template order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn into_parameters(self) -> Vec<Parameter> {
        self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Tokenizer;
    use crate::params::Value;

    fn compile(template: &str) -> Pattern {
        Pattern::compile(template, &ParameterTypes::builtin(), TokenKinds::template_invalid())
            .unwrap()
    }

    /// Feed every token of `input`, END included, stopping at the first non-match.
    fn feed(pattern: &Pattern, input: &str) -> (Vec<Step>, MatchState) {
        let mut state = MatchState::new();
        let mut steps = Vec::new();
        for token in Tokenizer::new(input) {
            let step = state.step(pattern, &token);
            steps.push(step);
            if !step.is_match() {
                break;
            }
        }
        (steps, state)
    }

    #[test]
    fn test_compile_segments() {
        let pattern = compile("/user/{id: int}/name/{ name :string }");
        assert_eq!(pattern.segments().len(), 14);
        assert!(matches!(pattern.segments()[0], Segment::Literal('/')));
        assert_eq!(pattern.parameter_names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(pattern.template(), "/user/{id: int}/name/{ name :string }");
    }

    #[test]
    fn test_compile_errors() {
        let types = ParameterTypes::builtin();
        let invalid = TokenKinds::template_invalid();

        let err = Pattern::compile("/{id: uuid}", &types, invalid).unwrap_err();
        assert!(matches!(err, TemplateError::Type(_)));

        let err = Pattern::compile("/{id int}", &types, invalid).unwrap_err();
        assert_eq!(err, TemplateError::Expected { expected: "':'", position: 5 });

        let err = Pattern::compile("/{: int}", &types, invalid).unwrap_err();
        assert!(matches!(err, TemplateError::Expected { .. }));

        let err = Pattern::compile("/{id: int", &types, invalid).unwrap_err();
        assert!(matches!(err, TemplateError::Expected { expected: "'}'", .. }));

        let err = Pattern::compile("/a}", &types, invalid).unwrap_err();
        assert_eq!(err, TemplateError::UnexpectedClose(2));

        let err = Pattern::compile("/{id: int}/{id: int}", &types, invalid).unwrap_err();
        assert_eq!(err, TemplateError::DuplicateName("id".into()));

        let err = Pattern::compile("", &types, invalid).unwrap_err();
        assert_eq!(err, TemplateError::Empty);

        let err = Pattern::compile("/a\tb", &types, invalid).unwrap_err();
        assert!(matches!(err, TemplateError::Scan(_)));
    }

    #[test]
    fn test_literal_pattern_matches_exactly() {
        let pattern = compile("/foo");
        let (steps, state) = feed(&pattern, "/foo");
        assert_eq!(&steps[..4], &[Step::Consumed; 4]);
        assert_eq!(steps[4], Step::Exhausted);
        assert!(state.is_complete(&pattern));
        assert!(state.parameters().is_empty());
    }

    #[test]
    fn test_parameters_extracted_in_order() {
        let pattern = compile("/user/{id: int}/name/{name: string}");
        let (steps, state) = feed(&pattern, "/user/12/name/luther");
        assert_eq!(steps.last(), Some(&Step::Boundary));
        assert_eq!(
            state.parameters(),
            &[
                Parameter::new("id", "int", 12),
                Parameter::new("name", "string", "luther"),
            ]
        );
    }

    #[test]
    fn test_boundary_token_not_consumed() {
        let pattern = compile("/user/{id: integer}");
        let mut state = MatchState::new();
        let mut scanner = Scanner::new("/user/21/22", TokenKinds::request_invalid());
        loop {
            match state.step(&pattern, scanner.current()) {
                Step::Consumed => scanner.accept().unwrap(),
                Step::Boundary => break,
                other => panic!("unexpected step {:?}", other),
            }
        }
        assert_eq!(scanner.remaining(), "/22");
        assert_eq!(state.parameters()[0].value, Value::Integer(21));
    }

    #[test]
    fn test_mismatch_resets_everything() {
        let pattern = compile("/user/{id: int}/name");
        let (steps, state) = feed(&pattern, "/user/12/nope");
        assert_eq!(steps.last(), Some(&Step::Mismatch));
        assert_eq!(state, MatchState::new());
        assert_eq!(state.segment_index(), 0);
        assert_eq!(state.accumulated(), "");
        assert!(state.parameters().is_empty());
    }

    #[test]
    fn test_empty_parameter_is_a_mismatch() {
        let pattern = compile("/user/{id: int}");
        let (steps, _) = feed(&pattern, "/user/");
        assert_eq!(steps.last(), Some(&Step::Mismatch));

        let (steps, _) = feed(&pattern, "/user/abc");
        assert_eq!(steps.last(), Some(&Step::Mismatch));
    }

    #[test]
    fn test_adjacent_parameters() {
        let pattern = compile("/{n: int}{s: string}");
        let (_, state) = feed(&pattern, "/42abc");
        assert_eq!(state.parameters()[0].value, Value::Integer(42));
        assert_eq!(state.parameters()[1].value, Value::from("abc"));
    }
}
