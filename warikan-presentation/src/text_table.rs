use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: usize = 2;

/// Plain-text table with a header rule, padded for monospace terminals.
#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(display_width(cell));
            }
        }

        let mut table = String::with_capacity(
            (col_widths.iter().sum::<usize>() + col_count * COLUMN_GAP + 1)
                * (self.rows.len() + 2),
        );
        self.write_line(&mut table, self.headers, &col_widths);
        let rule: Vec<Cow<'_, str>> = col_widths
            .iter()
            .map(|width| Cow::Owned("-".repeat(*width)))
            .collect();
        self.write_line(&mut table, &rule, &col_widths);
        for row in &self.rows {
            self.write_line(&mut table, row.as_ref(), &col_widths);
        }

        table.truncate(table.trim_end().len());
        table
    }

    fn write_line(&self, out: &mut String, cells: &[Cow<'_, str>], col_widths: &[usize]) {
        let mut line = String::new();
        for (i, width) in col_widths.iter().enumerate() {
            if i > 0 {
                line.push_str(&" ".repeat(COLUMN_GAP));
            }
            let cell = cells.get(i).map_or("", |cell| cell.as_ref());
            let alignment = self.alignments.get(i).copied().unwrap_or_default();
            pad(&mut line, cell, *width, alignment);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn pad(out: &mut String, text: &str, width: usize, alignment: Alignment) {
    let fill = width.saturating_sub(display_width(text));
    let (left, right) = match alignment {
        Alignment::Left => (0, fill),
        Alignment::Center => (fill / 2, fill - fill / 2),
        Alignment::Right => (fill, 0),
    };
    out.push_str(&" ".repeat(left));
    out.push_str(text);
    out.push_str(&" ".repeat(right));
}

/// Terminal column count; East Asian wide characters take two columns.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{115F}' | // Hangul Jamo
        '\u{2E80}'..='\u{303E}' | // CJK radicals, punctuation
        '\u{3041}'..='\u{33FF}' | // Kana, CJK compatibility
        '\u{3400}'..='\u{4DBF}' |
        '\u{4E00}'..='\u{9FFF}' |
        '\u{AC00}'..='\u{D7A3}' | // Hangul syllables
        '\u{F900}'..='\u{FAFF}' |
        '\u{FF00}'..='\u{FF60}' | // Fullwidth forms
        '\u{FFE0}'..='\u{FFE6}'
    )
}
