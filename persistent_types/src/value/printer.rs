use crate::descriptor::Descriptor;
use crate::format::TypeList;
use crate::io::{BinaryRead, BufferReader};
use crate::value::Value;
use crate::{Error, Result};
use std::str::Chars;

#[derive(PartialEq, Eq, Debug)]
enum Piece {
    Literal(String),
    Placeholder,
}

/// Renders a persisted argument list through a format string, in which each
/// `{}` is replaced by the next argument. `{{` and `}}` are literal braces.
///
/// Only the descriptor and the payload are needed; the static types of the
/// arguments are not.
#[derive(Debug)]
pub struct Printer<'a> {
    pieces: Vec<Piece>,
    descriptor: &'a [u8],
}

impl<'a> Printer<'a> {
    pub fn new(format: &str, descriptor: &'a [u8]) -> Result<Self> {
        let pieces = parse_format(format)?;
        Ok(Self { pieces, descriptor })
    }

    pub fn placeholder_count(&self) -> usize {
        self.pieces
            .iter()
            .filter(|piece| **piece == Piece::Placeholder)
            .count()
    }

    /// Surplus arguments are ignored.
    pub fn print<R: BinaryRead + ?Sized>(&self, r: &mut R) -> Result<String> {
        let args = Value::decode_args(self.descriptor, r)?;
        if args.len() < self.placeholder_count() {
            return Err(Error::InvalidFormat(format!(
                "{} placeholders but {} arguments",
                self.placeholder_count(),
                args.len()
            )));
        }

        let mut args = args.iter();
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Placeholder => {
                    if let Some(arg) = args.next() {
                        out.push_str(&arg.to_string());
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Encodes `args` and renders them in one go.
pub fn render<L: TypeList>(format: &str, args: &L) -> Result<String> {
    let descriptor = Descriptor::of_args(args);
    let mut payload = Vec::with_capacity(args.buffer_size());
    args.write(&mut payload)?;
    Printer::new(format, &descriptor)?.print(&mut BufferReader::new(&payload))
}

fn parse_format(format: &str) -> Result<Vec<Piece>> {
    let mut pieces = vec![];
    let mut literal = String::new();
    let mut chars: Chars = format.chars();
    while let Some(c) = chars.next() {
        match (c, chars.clone().next()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                literal.push(c);
                chars.next();
            }
            ('{', Some('}')) => {
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Placeholder);
                chars.next();
            }
            ('{', _) | ('}', _) => {
                let offset = format.len() - chars.as_str().len() - c.len_utf8();
                return Err(Error::InvalidFormat(format!(
                    "Unmatched '{c}' at byte {offset} of {format:?}"
                )));
            }
            _ => literal.push(c),
        }
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(pieces)
}
