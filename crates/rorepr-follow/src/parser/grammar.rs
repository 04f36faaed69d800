use indexmap::IndexMap;
use rowan::{TextRange, TextSize};

use super::lexer::{Token, TokenKind, token_text};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::path::{Criteria, Path, PathSpec, Segment};

pub(super) struct Parser<'src> {
    source: &'src str,
    /// Non-trivia tokens only.
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Diagnostics,
}

impl<'src> Parser<'src> {
    pub(super) fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens: tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect(),
            pos: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    pub(super) fn parse_spec(mut self) -> (PathSpec, Diagnostics) {
        let mut spec = PathSpec::default();
        if self.eof() {
            return (spec, self.diagnostics);
        }

        let mut seen: Vec<(Path, TextRange)> = Vec::new();
        loop {
            let start = self.current_span().start();
            let parsed = self.parse_path();
            let range = TextRange::new(start, self.prev_end().max(start));

            if let Some(path) = parsed {
                if let Some((_, first)) = seen.iter().find(|(p, _)| *p == path) {
                    self.diagnostics
                        .report(DiagnosticKind::DuplicatePath, range)
                        .message(path.to_string())
                        .related_to("first listed here", *first)
                        .emit();
                } else {
                    seen.push((path.clone(), range));
                    spec.push(path);
                }
            }

            if self.at(TokenKind::Comma) {
                self.bump();
                continue;
            }
            if self.eof() {
                break;
            }
            // parse_path only returns at `,` or EOF
            self.bump();
        }

        (spec, self.diagnostics)
    }

    /// Returns `None` when the path had errors.
    fn parse_path(&mut self) -> Option<Path> {
        if self.at(TokenKind::Comma) || self.eof() {
            self.diagnostics
                .report(DiagnosticKind::EmptyPath, TextRange::empty(self.current_span().start()))
                .emit();
            return None;
        }

        let mut segments = Vec::new();
        let mut valid = true;

        loop {
            match self.parse_segment() {
                Some(segment) => segments.push(segment),
                None => valid = false,
            }

            match self.current() {
                Some(TokenKind::Dot | TokenKind::Whitespace) => {
                    self.bump();
                }
                Some(TokenKind::Comma) | None => break,
                Some(TokenKind::BracketOpen) => {
                    self.unclosed_bracket();
                    return None;
                }
                Some(TokenKind::BracketClose) => {
                    self.unexpected_bracket_close();
                    valid = false;
                    if matches!(self.current(), Some(TokenKind::Comma) | None) {
                        break;
                    }
                    if self.at(TokenKind::Dot) {
                        self.bump();
                    }
                }
                Some(TokenKind::Name | TokenKind::Criteria) => {
                    let gap = TextRange::new(self.prev_end(), self.current_span().start());
                    self.diagnostics
                        .report(DiagnosticKind::MissingSeparator, gap)
                        .fix("descend with `.`", ".")
                        .emit();
                    valid = false;
                }
            }
        }

        valid.then(|| Path::new(segments))
    }

    fn parse_segment(&mut self) -> Option<Segment> {
        match self.current() {
            Some(TokenKind::Name) => {
                let name = self.current_text().to_string();
                self.bump();
                if !self.at(TokenKind::Criteria) {
                    return Some(Segment::new(name));
                }
                let criteria = self.parse_criteria();
                self.bump();
                criteria.map(|c| Segment::with_criteria(name, c))
            }
            Some(TokenKind::Criteria) => {
                self.diagnostics
                    .report(DiagnosticKind::ExpectedSegmentName, self.current_span())
                    .emit();
                self.bump();
                None
            }
            Some(TokenKind::BracketOpen) => {
                self.unclosed_bracket();
                None
            }
            Some(TokenKind::BracketClose) => {
                self.unexpected_bracket_close();
                None
            }
            Some(TokenKind::Dot | TokenKind::Comma | TokenKind::Whitespace) | None => {
                self.diagnostics
                    .report(
                        DiagnosticKind::EmptySegment,
                        TextRange::empty(self.current_span().start()),
                    )
                    .emit();
                None
            }
        }
    }

    /// Parses the current `Criteria` token without consuming it.
    fn parse_criteria(&mut self) -> Option<Criteria> {
        let token_span = self.current_span();
        let text = self.current_text();
        let inner = &text[1..text.len() - 1];
        let inner_start = token_span.start() + TextSize::from(1);

        let clauses = split_clauses(inner);
        if clauses.is_empty() {
            self.diagnostics
                .report(DiagnosticKind::EmptyCriteria, token_span)
                .fix("remove the empty brackets", "")
                .emit();
            return None;
        }

        let mut valid = true;
        let mut keys: IndexMap<&str, TextRange> = IndexMap::new();
        let mut criteria = Criteria::new();

        for (offset, clause) in clauses {
            let clause_start = inner_start + TextSize::from(offset as u32);
            let clause_range = TextRange::at(clause_start, TextSize::from(clause.len() as u32));

            let Some((key, value)) = clause.split_once('=') else {
                self.diagnostics
                    .report(DiagnosticKind::MissingEquals, clause_range)
                    .message(clause)
                    .emit();
                valid = false;
                continue;
            };

            if key.is_empty() {
                self.diagnostics
                    .report(DiagnosticKind::EmptyCriteriaKey, clause_range)
                    .emit();
                valid = false;
                continue;
            }

            let key_range = TextRange::at(clause_start, TextSize::from(key.len() as u32));
            if let Some(first) = keys.get(key) {
                self.diagnostics
                    .report(DiagnosticKind::DuplicateCriteriaKey, key_range)
                    .message(key)
                    .related_to("first given here", *first)
                    .emit();
                valid = false;
                continue;
            }

            keys.insert(key, key_range);
            criteria.insert(key, value);
        }

        valid.then_some(criteria)
    }

    /// Reports the `[` and skips the rest of the path.
    fn unclosed_bracket(&mut self) {
        let open = self.current_span();
        self.diagnostics
            .report(DiagnosticKind::UnclosedBracket, open)
            .hint("a criteria clause cannot contain `[` or `]`")
            .emit();
        while !self.eof() && !self.at(TokenKind::Comma) {
            self.bump();
        }
    }

    fn unexpected_bracket_close(&mut self) {
        self.diagnostics
            .report(DiagnosticKind::UnexpectedBracketClose, self.current_span())
            .emit();
        self.bump();
    }

    fn current(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    fn current_text(&self) -> &'src str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    fn prev_end(&self) -> TextSize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(TextSize::from(0), |t| t.span.end())
    }

    fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }
}

/// Whitespace-separated clauses with their byte offsets.
fn split_clauses(inner: &str) -> Vec<(usize, &str)> {
    let mut clauses = Vec::new();
    let mut start = None;

    for (i, c) in inner.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                clauses.push((s, &inner[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        clauses.push((s, &inner[s..]));
    }

    clauses
}
