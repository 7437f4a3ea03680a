//! Shape classification for date strings.
//!
//! Strings are matched against three fixed shapes before any calendar
//! arithmetic happens:
//!
//! | shape            | pattern                                               |
//! |------------------|-------------------------------------------------------|
//! | `Date`           | `YYYY-MM-DD`                                          |
//! | `LocalDateTime`  | `YYYY-MM-DD[ T]hh:mm:ss(.f+)?`                        |
//! | `OffsetDateTime` | `YYYY-MM-DD[ T]hh:mm:ss(.f+)?(Z\|[+-]hh:?mm)`         |
//!
//! Field values are only range-checked later, when they are turned into
//! chrono types.

/// Which accepted shape a string has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateFormat {
    Date,
    LocalDateTime,
    OffsetDateTime,
}

/// Time of day fields, unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClockFields {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanos: u32,
}

/// Fields of a string that matched one of the accepted shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub clock: Option<ClockFields>,
    /// `(sign, hours, minutes)` of an explicit offset. `Z` is `(1, 0, 0)`.
    pub offset: Option<(i32, u32, u32)>,
}

impl DateFields {
    pub fn format(&self) -> DateFormat {
        match (self.clock, self.offset) {
            (_, Some(_)) => DateFormat::OffsetDateTime,
            (Some(_), None) => DateFormat::LocalDateTime,
            (None, None) => DateFormat::Date,
        }
    }
}

/// Splits `s` into fields if it has one of the accepted shapes.
pub(crate) fn scan(s: &str) -> Option<DateFields> {
    let mut cursor = Cursor::new(s.as_bytes());

    let year = cursor.digits(4)?;
    cursor.expect(b'-')?;
    let month = cursor.digits(2)?;
    cursor.expect(b'-')?;
    let day = cursor.digits(2)?;

    let mut fields = DateFields {
        year: year as i32,
        month,
        day,
        clock: None,
        offset: None,
    };
    if cursor.at_end() {
        return Some(fields);
    }

    cursor.one_of(b" T")?;
    let hour = cursor.digits(2)?;
    cursor.expect(b':')?;
    let minute = cursor.digits(2)?;
    cursor.expect(b':')?;
    let second = cursor.digits(2)?;
    let nanos = if cursor.eat(b'.') {
        cursor.fraction_nanos()?
    } else {
        0
    };
    fields.clock = Some(ClockFields {
        hour,
        minute,
        second,
        nanos,
    });
    if cursor.at_end() {
        return Some(fields);
    }

    fields.offset = Some(match cursor.one_of(b"Z+-")? {
        b'Z' => (1, 0, 0),
        sign => {
            let hours = cursor.digits(2)?;
            cursor.eat(b':');
            let minutes = cursor.digits(2)?;
            (if sign == b'-' { -1 } else { 1 }, hours, minutes)
        }
    });

    cursor.at_end().then_some(fields)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Option<()> {
        self.eat(byte).then_some(())
    }

    fn one_of(&mut self, set: &[u8]) -> Option<u8> {
        let byte = self.peek().filter(|b| set.contains(b))?;
        self.pos += 1;
        Some(byte)
    }

    /// Exactly `count` ASCII digits.
    fn digits(&mut self, count: usize) -> Option<u32> {
        let end = self.pos.checked_add(count)?;
        let run = self.bytes.get(self.pos..end)?;
        if !run.iter().all(u8::is_ascii_digit) {
            return None;
        }
        self.pos = end;
        Some(run.iter().fold(0, |acc, b| acc * 10 + u32::from(b - b'0')))
    }

    /// One or more digits read as a decimal fraction of a second. Digits past
    /// nanosecond precision are consumed and dropped.
    fn fraction_nanos(&mut self) -> Option<u32> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let run = &self.bytes[start..self.pos];
        if run.is_empty() {
            return None;
        }
        let kept = &run[..run.len().min(9)];
        let value = kept.iter().fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
        Some(value * 10u32.pow((9 - kept.len()) as u32))
    }
}
