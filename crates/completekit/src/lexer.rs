//! # Lexing
//!
//! ## Overview
//!
//! This module splits raw buffer text into classified [Lexeme]s and collects
//! the distinct completable words out of them. The grammar is the small
//! C-family surface the editor completes: reserved words, identifiers,
//! single-character symbols, string and numeric literals, and line and block
//! comments.
//!
//! Lexing never fails: unterminated strings and block comments extend to the
//! end of the buffer, and any character no parser claims is emitted as a
//! [LexemeKind::Symbol] so that tokenizing always terminates.
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while, take_while1},
    character::complete::{char, one_of, satisfy},
    combinator::{opt, recognize, rest},
    sequence::{pair, preceded, terminated},
    IResult,
};

use crate::buffer::CharOff;

/// Reserved words of the completed language. These are always completion
/// candidates, whether or not they appear in the buffer.
pub const RESERVED_WORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "of",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "undefined",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// Classification of a single lexeme.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LexemeKind {
    /// A reserved word of the language.
    Keyword,

    /// A word that is not reserved.
    Identifier,

    /// A single operator or punctuation character.
    Symbol,

    /// A string or numeric literal.
    Literal,

    /// A line or block comment.
    Comment,

    /// A run of spaces, tabs, or newlines.
    Whitespace,
}

/// A classified token produced from the buffer text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lexeme {
    /// The matched text.
    pub text: String,

    /// How the text was classified.
    pub kind: LexemeKind,

    /// Character offset of the first character within the buffer.
    pub start: CharOff,
}

/// Whether a character is an operator or punctuation character, and thereby
/// a word boundary.
pub fn is_symbol(c: char) -> bool {
    match c {
        '(' | ')' | '{' | '}' | '[' | ']' => true,
        ';' | ',' | '.' | ':' | '?' | '@' | '#' | '\\' => true,
        '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '~' => true,
        '"' | '\'' | '`' => true,
        _ => false,
    }
}

/// Whether a word is one of the language's reserved words.
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

fn is_word_char(c: char) -> bool {
    !is_symbol(c) && !c.is_whitespace()
}

fn lex_line_comment(input: &str) -> IResult<&str, (LexemeKind, &str)> {
    let (rest, text) = recognize(pair(tag("//"), take_till(|c| c == '\n')))(input)?;

    Ok((rest, (LexemeKind::Comment, text)))
}

fn lex_block_comment(input: &str) -> IResult<&str, (LexemeKind, &str)> {
    // An unterminated comment runs to the end of the buffer.
    let body = alt((terminated(take_until("*/"), tag("*/")), rest));
    let (rest, text) = recognize(preceded(tag("/*"), body))(input)?;

    Ok((rest, (LexemeKind::Comment, text)))
}

fn lex_string(input: &str) -> IResult<&str, (LexemeKind, &str)> {
    let (remaining, quote) = one_of("\"'`")(input)?;

    // An unterminated string runs to the end of the buffer.
    let (remaining, _) = take_till(|c| c == quote)(remaining)?;
    let (remaining, _) = opt(char(quote))(remaining)?;

    let consumed = input.len() - remaining.len();

    Ok((remaining, (LexemeKind::Literal, &input[..consumed])))
}

fn lex_number(input: &str) -> IResult<&str, (LexemeKind, &str)> {
    let digits = take_while1(|c: char| c.is_ascii_digit());
    let fraction = opt(pair(char('.'), take_while(|c: char| c.is_ascii_digit())));
    let (rest, text) = recognize(pair(digits, fraction))(input)?;

    Ok((rest, (LexemeKind::Literal, text)))
}

fn lex_word(input: &str) -> IResult<&str, (LexemeKind, &str)> {
    let (rest, text) = take_while1(is_word_char)(input)?;

    let kind = if is_reserved_word(text) {
        LexemeKind::Keyword
    } else {
        LexemeKind::Identifier
    };

    Ok((rest, (kind, text)))
}

fn lex_whitespace(input: &str) -> IResult<&str, (LexemeKind, &str)> {
    let (rest, text) = take_while1(char::is_whitespace)(input)?;

    Ok((rest, (LexemeKind::Whitespace, text)))
}

fn lex_symbol(input: &str) -> IResult<&str, (LexemeKind, &str)> {
    let (rest, text) = recognize(satisfy(is_symbol))(input)?;

    Ok((rest, (LexemeKind::Symbol, text)))
}

fn lex_token(input: &str) -> IResult<&str, (LexemeKind, &str)> {
    alt((
        lex_line_comment,
        lex_block_comment,
        lex_string,
        lex_number,
        lex_word,
        lex_whitespace,
        lex_symbol,
    ))(input)
}

/// Split buffer text into an ordered sequence of classified [Lexeme]s.
///
/// Lexemes never merge across a symbol, space, tab, or newline boundary, and
/// malformed input still terminates: unterminated constructs extend to the
/// end of the buffer.
pub fn tokenize(text: &str) -> Vec<Lexeme> {
    let mut lexemes = Vec::new();
    let mut input = text;
    let mut start = 0;

    while !input.is_empty() {
        match lex_token(input) {
            Ok((remaining, (kind, matched))) => {
                lexemes.push(Lexeme {
                    text: matched.to_string(),
                    kind,
                    start: CharOff::from(start),
                });

                start += matched.chars().count();
                input = remaining;
            },
            Err(_) => {
                // No parser claimed the character; emit it as a symbol so
                // that lexing always makes progress.
                let Some(c) = input.chars().next() else {
                    break;
                };

                lexemes.push(Lexeme {
                    text: c.to_string(),
                    kind: LexemeKind::Symbol,
                    start: CharOff::from(start),
                });

                start += 1;
                input = &input[c.len_utf8()..];
            },
        }
    }

    return lexemes;
}

/// The deduplicated keyword- and identifier-class lexeme texts, preserving
/// first-seen order.
pub fn extract_keywords(lexemes: &[Lexeme]) -> Vec<String> {
    let mut words = Vec::new();

    for lexeme in lexemes {
        if !matches!(lexeme.kind, LexemeKind::Keyword | LexemeKind::Identifier) {
            continue;
        }

        if !words.contains(&lexeme.text) {
            words.push(lexeme.text.clone());
        }
    }

    return words;
}
