//! Rule-free reference engine.
//!
//! Checks the structure every CSS-like syntax shares (comments, strings and
//! balanced braces) and collects disable directives. It evaluates no rules,
//! so its reports never contain warnings.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use stylelint_types::DisableRange;

use super::{EngineFailure, EngineOutcome, EngineReport, LintEngine, Source};
use crate::EngineOptions;

#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinEngine;

impl BuiltinEngine {
    pub fn new() -> Self {
        Self
    }
}

impl LintEngine for BuiltinEngine {
    fn lint_source(&self, source: &Source<'_>, options: &EngineOptions) -> EngineOutcome {
        let syntax = Syntax::resolve(source, options).map_err(|f| f.with_file(source.filename))?;
        let comments = scan(source.code, syntax).map_err(|f| f.with_file(source.filename))?;

        let disabled_ranges = if options.ignore_disables {
            Vec::new()
        } else {
            collect_disabled_ranges(&comments)
        };

        Ok(EngineReport {
            disabled_ranges,
            ..EngineReport::default()
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Css,
    Scss,
    Less,
    /// Indented syntax: no braces.
    Sass,
}

impl Syntax {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "css" | "postcss" => Some(Syntax::Css),
            "scss" | "postcss-scss" => Some(Syntax::Scss),
            "less" | "postcss-less" => Some(Syntax::Less),
            "sass" | "sugarss" => Some(Syntax::Sass),
            _ => None,
        }
    }

    fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("scss") => Syntax::Scss,
            Some("less") => Syntax::Less,
            Some("sass") | Some("sss") => Syntax::Sass,
            _ => Syntax::Css,
        }
    }

    /// `customSyntax` wins over `syntax`; without either the file extension decides.
    fn resolve(source: &Source<'_>, options: &EngineOptions) -> Result<Self, EngineFailure> {
        match options
            .custom_syntax
            .as_deref()
            .or(options.syntax.as_deref())
        {
            Some(name) => Self::from_name(name).ok_or_else(|| {
                EngineFailure::fatal("Error", format!("Cannot resolve syntax \"{}\"", name))
            }),
            None => Ok(source
                .filename
                .map(Self::from_filename)
                .unwrap_or(Syntax::Css)),
        }
    }

    fn allows_line_comments(self) -> bool {
        self != Syntax::Css
    }

    fn uses_braces(self) -> bool {
        self != Syntax::Sass
    }
}

/// A comment and the lines it spans (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Comment {
    text: String,
    start_line: u32,
    end_line: u32,
}

/// Character cursor tracking 1-based line and column.
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    fn new(code: &'a str) -> Self {
        Self {
            chars: code.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Returns the next character with the position it was found at.
    fn bump(&mut self) -> Option<(char, u32, u32)> {
        let c = self.chars.next()?;
        let position = (c, self.line, self.column);
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(position)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }
}

fn scan(code: &str, syntax: Syntax) -> Result<Vec<Comment>, EngineFailure> {
    let mut cursor = Cursor::new(code);
    let mut open_blocks: Vec<(u32, u32)> = Vec::new();
    let mut comments = Vec::new();
    let mut prev = ' ';

    while let Some((c, line, column)) = cursor.bump() {
        match c {
            '/' if cursor.peek() == Some('*') => {
                cursor.bump();
                comments.push(block_comment(&mut cursor, line, column)?);
                prev = ' ';
                continue;
            }
            // `//` inside values such as `url(http://…)` follows a `:`
            '/' if syntax.allows_line_comments()
                && cursor.peek() == Some('/')
                && (prev.is_whitespace() || matches!(prev, ';' | '{' | '}' | ',')) =>
            {
                cursor.bump();
                comments.push(line_comment(&mut cursor, line));
                prev = ' ';
                continue;
            }
            '"' | '\'' => skip_string(&mut cursor, c, line, column)?,
            '\\' => {
                cursor.bump();
            }
            '{' if syntax.uses_braces() => open_blocks.push((line, column)),
            '}' if syntax.uses_braces() => {
                if open_blocks.pop().is_none() {
                    return Err(EngineFailure::syntax("Unexpected }", line, column));
                }
            }
            _ => {}
        }
        prev = c;
    }

    if let Some(&(line, column)) = open_blocks.last() {
        return Err(EngineFailure::syntax("Unclosed block", line, column));
    }

    Ok(comments)
}

fn block_comment(cursor: &mut Cursor<'_>, line: u32, column: u32) -> Result<Comment, EngineFailure> {
    let mut text = String::new();

    while let Some((c, end_line, _)) = cursor.bump() {
        if c == '*' && cursor.peek() == Some('/') {
            cursor.bump();
            return Ok(Comment {
                text,
                start_line: line,
                end_line,
            });
        }
        text.push(c);
    }

    Err(EngineFailure::syntax("Unclosed comment", line, column))
}

fn line_comment(cursor: &mut Cursor<'_>, line: u32) -> Comment {
    let mut text = String::new();
    while let Some(c) = cursor.peek() {
        if c == '\n' {
            break;
        }
        text.push(c);
        cursor.bump();
    }

    Comment {
        text,
        start_line: line,
        end_line: line,
    }
}

fn skip_string(
    cursor: &mut Cursor<'_>,
    quote: char,
    line: u32,
    column: u32,
) -> Result<(), EngineFailure> {
    while let Some((c, _, _)) = cursor.bump() {
        if c == '\\' {
            cursor.bump();
        } else if c == quote {
            return Ok(());
        }
    }

    Err(EngineFailure::syntax("Unclosed string", line, column))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Disable,
    DisableLine,
    DisableNextLine,
    Enable,
}

/// A parsed `stylelint-*` comment. An empty rule list means every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    command: Command,
    rules: Vec<String>,
}

impl Directive {
    fn parse(text: &str) -> Option<Self> {
        // Anything after ` -- ` is a description
        let text = text.split(" -- ").next().unwrap_or_default().trim();
        let (command, rest) = match text.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest),
            None => (text, ""),
        };

        let command = match command {
            "stylelint-disable" => Command::Disable,
            "stylelint-disable-line" => Command::DisableLine,
            "stylelint-disable-next-line" => Command::DisableNextLine,
            "stylelint-enable" => Command::Enable,
            _ => return None,
        };

        let rules = rest
            .split(',')
            .map(str::trim)
            .filter(|rule| !rule.is_empty())
            .map(str::to_string)
            .collect();

        Some(Self { command, rules })
    }

    fn target_rules(&self) -> Vec<String> {
        if self.rules.is_empty() {
            vec![DisableRange::ALL_RULES.to_string()]
        } else {
            self.rules.clone()
        }
    }
}

fn collect_disabled_ranges(comments: &[Comment]) -> Vec<DisableRange> {
    let mut ranges: Vec<DisableRange> = Vec::new();

    for comment in comments {
        let Some(directive) = Directive::parse(&comment.text) else {
            continue;
        };

        match directive.command {
            Command::DisableLine => {
                for rule in directive.target_rules() {
                    ranges.push(DisableRange::new(rule, comment.start_line, comment.start_line));
                }
            }
            Command::DisableNextLine => {
                let line = comment.end_line + 1;
                for rule in directive.target_rules() {
                    ranges.push(DisableRange::new(rule, line, line));
                }
            }
            Command::Disable => {
                for rule in directive.target_rules() {
                    let already_open = ranges
                        .iter()
                        .any(|range| range.end.is_none() && range.rule == rule);
                    if !already_open {
                        ranges.push(DisableRange::open(rule, comment.start_line));
                    }
                }
            }
            Command::Enable => {
                for range in ranges.iter_mut().filter(|range| range.end.is_none()) {
                    if directive.rules.is_empty() || directive.rules.contains(&range.rule) {
                        range.end = Some(comment.start_line);
                    }
                }
            }
        }
    }

    ranges
}
