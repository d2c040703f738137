use super::cursor::Cursor;

const QUOTES: [char; 2] = ['"', '\''];
const ESCAPE: char = '\\';

/// Whether `separator` can delimit fields without clashing with the quoting
/// grammar or the row layout.
pub fn is_valid_separator(separator: char) -> bool {
    !QUOTES.contains(&separator) && separator != ESCAPE && separator != '\n' && separator != '\r'
}

/// Split one row of delimited text into fields.
///
/// Fields may be wrapped in single or double quotes; inside them a
/// backslash-escaped quote of the same kind becomes a literal quote and every
/// other escape is kept as written. Unquoted fields may contain inner
/// whitespace but no separator, quote or backslash. Whitespace around fields
/// is dropped and a trailing separator yields a trailing empty field.
///
/// A whitespace separator (a tab, say) is never treated as padding.
///
/// Returns `None` when the row does not follow that grammar.
pub fn split_row(raw_row: &str, separator: char) -> Option<Vec<String>> {
    if !is_valid_separator(separator) {
        return None;
    }

    let padding = |c: char| c.is_whitespace() && c != separator;
    let mut cursor = Cursor::new(raw_row);
    let mut fields = Vec::new();
    cursor.skip_while(padding);
    if cursor.eof() {
        return Some(fields);
    }

    loop {
        cursor.skip_while(padding);
        let field = match cursor.peek() {
            Some(quote) if QUOTES.contains(&quote) => {
                cursor.bump();
                quoted_field(&mut cursor, quote)?
            }
            _ => bare_field(&mut cursor, separator)?,
        };
        fields.push(field);

        cursor.skip_while(padding);
        match cursor.bump() {
            None => return Some(fields),
            Some(c) if c == separator => {
                cursor.skip_while(padding);
                if cursor.eof() {
                    fields.push(String::new());
                    return Some(fields);
                }
            }
            Some(_) => return None,
        }
    }
}

/// Reads up to the closing `quote`, which is consumed.
fn quoted_field(cursor: &mut Cursor, quote: char) -> Option<String> {
    let mut field = String::new();
    loop {
        match cursor.bump()? {
            ESCAPE => {
                let escaped = cursor.bump()?;
                if escaped != quote {
                    field.push(ESCAPE);
                }
                field.push(escaped);
            }
            c if c == quote => return Some(field),
            c => field.push(c),
        }
    }
}

/// Reads up to the next separator (not consumed) or the end of the row.
fn bare_field(cursor: &mut Cursor, separator: char) -> Option<String> {
    let mut field = String::new();
    while let Some(c) = cursor.peek() {
        if c == separator {
            break;
        }
        if QUOTES.contains(&c) || c == ESCAPE {
            return None;
        }
        field.push(c);
        cursor.bump();
    }
    Some(field.trim_end().to_string())
}
