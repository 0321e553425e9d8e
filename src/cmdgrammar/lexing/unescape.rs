//! Decoding of double-quoted string literals.

/// Strip the surrounding quotes of `literal` and resolve its escape sequences.
///
/// Supported escapes: `\a \b \f \n \r \t \v \\ \" \'`, octal `\NNN` and `\xHH` (ASCII range
/// only), `\uHHHH` and `\UHHHHHHHH`. Anything else is reported as an error message.
pub fn unquote(literal: &str) -> Result<String, String> {
    let inner = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| "missing surrounding quotes".to_string())?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escape = chars
            .next()
            .ok_or_else(|| "trailing backslash".to_string())?;
        let decoded = match escape {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0b}',
            '\\' | '"' | '\'' => escape,
            '0'..='7' => {
                let mut digits = String::from(escape);
                digits.extend(chars.by_ref().take(2));
                ascii_from(&digits, 8)?
            }
            'x' => ascii_from(&take_digits(&mut chars, 2)?, 16)?,
            'u' => code_point(&take_digits(&mut chars, 4)?)?,
            'U' => code_point(&take_digits(&mut chars, 8)?)?,
            other => return Err(format!("unknown escape sequence \\{}", other)),
        };
        out.push(decoded);
    }

    Ok(out)
}

fn take_digits(chars: &mut std::str::Chars<'_>, count: usize) -> Result<String, String> {
    let digits: String = chars.by_ref().take(count).collect();
    if digits.chars().count() != count {
        return Err(format!("escape sequence needs {} digits", count));
    }
    Ok(digits)
}

fn ascii_from(digits: &str, radix: u32) -> Result<char, String> {
    if radix == 8 && digits.len() != 3 {
        return Err("octal escape needs 3 digits".to_string());
    }
    let value = u32::from_str_radix(digits, radix)
        .map_err(|_| format!("invalid escape digits {:?}", digits))?;
    if value > 0x7f {
        return Err(format!("byte escape {:#x} is outside the ASCII range", value));
    }
    char::from_u32(value).ok_or_else(|| format!("invalid escape value {:#x}", value))
}

fn code_point(digits: &str) -> Result<char, String> {
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| format!("invalid escape digits {:?}", digits))?;
    char::from_u32(value).ok_or_else(|| format!("invalid code point {:#x}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_string() {
        assert_eq!(unquote(r#""/tmp/test.csv""#).unwrap(), "/tmp/test.csv");
        assert_eq!(unquote(r#""""#).unwrap(), "");
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(unquote(r#""a\tb\n\"c\"\\""#).unwrap(), "a\tb\n\"c\"\\");
    }

    #[test]
    fn test_numeric_escapes() {
        assert_eq!(unquote(r#""\x41\101é\U0001F600""#).unwrap(), "AAé😀");
    }

    #[test]
    fn test_malformed_escapes() {
        assert!(unquote(r#""\q""#).is_err());
        assert!(unquote(r#""\x4""#).is_err());
        assert!(unquote(r#""\xff""#).is_err());
        assert!(unquote(r#""\12""#).is_err());
        assert!(unquote(r#""\ud800""#).is_err());
    }
}
