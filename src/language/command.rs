use crate::language::{
    ast::{Command, Instruction, Operand, Operation},
    errors::CommandError,
};
use nom::{
    IResult, Parser as NomParser,
    bytes::complete::{take_till1, take_while},
    character::complete::digit1,
    combinator::all_consuming,
};
use std::num::ParseIntError;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
}

/// Commands are case-insensitive; every line is lowercased before it is split.
pub fn normalize(line: &str) -> String {
    line.trim_end_matches(['\r', '\n']).to_lowercase()
}

fn separator(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

pub fn split_words(line: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut remaining = line;
    let mut offset = 0usize;

    loop {
        if let Ok((rest, space)) = separator(remaining) {
            offset += space.len();
            remaining = rest;
        }
        match word(remaining) {
            Ok((rest, text)) => {
                words.push(Word {
                    text,
                    span: offset..offset + text.len(),
                });
                offset += text.len();
                remaining = rest;
            }
            Err(_) => break,
        }
    }

    words
}

/// A word made only of ASCII digits is a literal, anything else names a register.
pub fn parse_operand(text: &str) -> Result<Operand, ParseIntError> {
    let digits: IResult<&str, &str> = all_consuming(digit1).parse(text);
    match digits {
        Ok((_, digits)) => digits.parse().map(Operand::Literal),
        Err(_) => Ok(Operand::Register(text.to_string())),
    }
}

pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let normalized = normalize(line);
    let words = split_words(&normalized);

    match words.as_slice() {
        [] => Ok(Command::Blank),
        [only] if only.text == "quit" => Ok(Command::Quit),
        [keyword, target] if keyword.text == "print" => Ok(Command::Print {
            register: target.text.to_string(),
        }),
        [register, operation, operand] => {
            let Some(operation) = Operation::from_keyword(operation.text) else {
                return Err(CommandError::new(
                    format!("Unknown operation `{}`", operation.text),
                    operation.span.clone(),
                )
                .with_label("not an operation")
                .with_help(operation_help()));
            };
            let operand = parse_operand(operand.text).map_err(|err| {
                CommandError::new(
                    format!("Integer literal `{}` is out of range: {err}", operand.text),
                    operand.span.clone(),
                )
                .with_label("does not fit in a 64-bit integer")
            })?;
            Ok(Command::Define {
                register: register.text.to_string(),
                instruction: Instruction::new(operation, operand),
            })
        }
        _ => {
            let start = words.first().map_or(0, |w| w.span.start);
            let end = words.last().map_or(normalized.len(), |w| w.span.end);
            Err(CommandError::new("Invalid input", start..end)
                .with_label("expected `print <register>` or `<register> <operation> <value>`")
                .with_help(syntax_help()))
        }
    }
}

fn operation_help() -> String {
    let names: Vec<&str> = Operation::ALL.iter().map(|op| op.keyword()).collect();
    format!("Supported operations: {}", names.join(", "))
}

fn syntax_help() -> String {
    "Syntax: <register> <add|subtract|multiply> <value>, print <register>, or quit".into()
}
