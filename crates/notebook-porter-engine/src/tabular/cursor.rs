/// A cursor for character-by-character row scanning.
///
/// Works on chars rather than bytes so separators outside ASCII are
/// handled like any other.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The row being scanned.
    s: &'a str,
    /// Current byte index into `s`, always on a char boundary.
    i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current char without advancing.
    pub fn peek(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    /// Advances by one char, returning it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Advances while `pred` holds for the current char.
    pub fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }
}
