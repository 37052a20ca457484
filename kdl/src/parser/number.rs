//! Number literal parsing.
//!
//! Handles decimal literals (with optional fraction, exponent, and `_`
//! separators) and `0x`/`0o`/`0b` radix-prefixed integer literals. The
//! accumulated digit text is kept on the value so printing can reproduce
//! the author's rendering.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::chars::is_digit_in_radix;
use crate::error::{KdlError, Result};
use crate::reader::{CharSource, ParseContext, StrSource};
use crate::value::{KdlNumber, Radix};

use super::KdlParser;

/// Longest accepted exponent, in digits.
const MAX_EXPONENT_DIGITS: usize = 10;

/// Parses a complete string as a single number literal. Used to re-parse
/// string values queried as numbers.
pub(crate) fn parse_number_str(s: &str) -> Result<KdlNumber> {
    let parser = KdlParser::new();
    let mut context = ParseContext::new(StrSource::new(s));
    let number = parser.parse_number(&mut context)?;
    if context.peek()?.is_some() {
        return Err(KdlError::parse(format!("Invalid number: '{}'", s)));
    }
    Ok(number)
}

impl KdlParser {
    /// Parses a number in any radix, including an optional leading sign.
    pub(crate) fn parse_number<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
    ) -> Result<KdlNumber> {
        let mut negative = false;
        match context.peek()? {
            Some('+') => {
                context.read()?;
            }
            Some('-') => {
                context.read()?;
                negative = true;
            }
            _ => {}
        }

        match self.parse_radix_prefix(context)? {
            Radix::Decimal => self.parse_decimal_number(context, negative),
            radix => self.parse_non_decimal_number(context, negative, radix),
        }
    }

    /// Detects a `0x`/`0o`/`0b` prefix, pushing the `0` back when the
    /// number turns out to be plain decimal.
    fn parse_radix_prefix<S: CharSource>(&self, context: &mut ParseContext<S>) -> Result<Radix> {
        if context.peek()? != Some('0') {
            return Ok(Radix::Decimal);
        }
        context.read()?;
        match context.peek()? {
            Some('x') => {
                context.read()?;
                Ok(Radix::Hexadecimal)
            }
            Some('o') => {
                context.read()?;
                Ok(Radix::Octal)
            }
            Some('b') => {
                context.read()?;
                Ok(Radix::Binary)
            }
            _ => {
                context.unread('0')?;
                Ok(Radix::Decimal)
            }
        }
    }

    /// Parses a decimal literal, tracking fraction and exponent state.
    ///
    /// `_` separators are dropped. A sign is only legal directly after the
    /// exponent marker; a dot must be followed by a digit and may appear at
    /// most once, never inside the exponent.
    fn parse_decimal_number<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
        negative: bool,
    ) -> Result<KdlNumber> {
        let mut text = String::new();
        if negative {
            text.push('-');
        }

        let mut in_fraction = false;
        let mut in_exponent = false;
        let mut sign_legal = false;
        let mut exponent_digits = 0usize;
        let mut digits_seen = false;

        loop {
            let c = match context.peek()? {
                Some(c) => c,
                None => break,
            };
            let body_empty = text.is_empty() || text == "-";
            match c {
                '0'..='9' => {
                    context.read()?;
                    text.push(c);
                    digits_seen = true;
                    sign_legal = false;
                    if in_exponent {
                        exponent_digits += 1;
                        if exponent_digits > MAX_EXPONENT_DIGITS {
                            return Err(KdlError::internal("exponent too long to represent"));
                        }
                    }
                }
                '_' => {
                    if body_empty {
                        return Err(KdlError::parse("Numbers may not begin with '_'"));
                    }
                    if sign_legal {
                        // directly after the exponent marker
                        return Err(KdlError::parse(
                            "Digit separator may not follow exponent marker",
                        ));
                    }
                    context.read()?;
                }
                'e' | 'E' => {
                    if body_empty {
                        return Err(KdlError::parse(format!(
                            "Numbers may not begin with '{}'",
                            c
                        )));
                    }
                    if in_exponent {
                        return Err(KdlError::parse("Numbers may have at most one exponent"));
                    }
                    context.read()?;
                    text.push(c);
                    in_exponent = true;
                    sign_legal = true;
                }
                '.' => {
                    if in_exponent {
                        return Err(KdlError::parse("A fraction may not follow an exponent"));
                    }
                    if in_fraction {
                        return Err(KdlError::parse("Numbers may have at most one decimal point"));
                    }
                    context.read()?;
                    match context.peek()? {
                        Some(d) if d.is_ascii_digit() => {}
                        _ => {
                            return Err(KdlError::parse(
                                "A decimal point must be followed by a digit",
                            ));
                        }
                    }
                    text.push('.');
                    in_fraction = true;
                    sign_legal = false;
                }
                '+' | '-' => {
                    if !sign_legal {
                        return Err(KdlError::parse(format!("Unexpected '{}' in number", c)));
                    }
                    context.read()?;
                    text.push(c);
                    sign_legal = false;
                }
                _ => break,
            }
        }

        if !digits_seen {
            return Err(KdlError::parse("No digits in number"));
        }
        if in_exponent && exponent_digits == 0 {
            return Err(KdlError::parse("No digits in exponent"));
        }

        // a bare leading dot is legal input; give the text an integer part
        if text.starts_with('.') {
            text.insert(0, '0');
        } else if text.starts_with("-.") {
            text.insert(1, '0');
        }

        let value = BigDecimal::from_str(&text).map_err(|_| {
            KdlError::internal(format!("failed to parse pre-vetted number: '{}'", text))
        })?;
        Ok(KdlNumber::from_parts(value, Radix::Decimal, text))
    }

    /// Parses the digits of a radix-prefixed integer literal.
    fn parse_non_decimal_number<S: CharSource>(
        &self,
        context: &mut ParseContext<S>,
        negative: bool,
        radix: Radix,
    ) -> Result<KdlNumber> {
        if context.peek()? == Some('_') {
            return Err(KdlError::parse("Digit separator may not follow radix prefix"));
        }

        let mut digits = String::new();
        loop {
            let c = match context.peek()? {
                Some(c) => c,
                None => break,
            };
            if c == '_' {
                context.read()?;
                continue;
            }
            if !is_digit_in_radix(c, radix.value()) {
                break;
            }
            context.read()?;
            digits.push(c);
        }
        if digits.is_empty() {
            return Err(KdlError::parse(format!(
                "No digits after radix prefix '{}'",
                radix.prefix()
            )));
        }

        let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix.value()).ok_or_else(|| {
            KdlError::internal(format!(
                "failed to parse pre-vetted base-{} digits: '{}'",
                radix.value(),
                digits
            ))
        })?;
        let magnitude = if negative { -magnitude } else { magnitude };

        let mut text = String::new();
        if negative {
            text.push('-');
        }
        text.push_str(&digits);
        Ok(KdlNumber::from_parts(BigDecimal::from(magnitude), radix, text))
    }
}
