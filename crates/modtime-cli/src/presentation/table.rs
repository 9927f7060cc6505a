//! Plain text tables with per-row cell formats.

/// Score of a row selector naming the row explicitly; always beats the catch-all.
const LINE_MATCH_WEIGHT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
    /// Words spread to fill the column; a single word is centered
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFormat {
    pub align: Align,
    /// Cut the padded cell to the column width
    pub truncate: bool,
}

impl Default for CellFormat {
    fn default() -> Self {
        Self {
            align: Align::Left,
            truncate: true,
        }
    }
}

impl CellFormat {
    pub fn aligned(align: Align) -> Self {
        Self {
            align,
            ..Self::default()
        }
    }
}

/// Which rows a list of cell formats applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelector {
    All,
    /// Row indices; negative ones count from the end (`-1` is the last row)
    Lines(Vec<isize>),
}

impl RowSelector {
    pub fn line(line: isize) -> Self {
        RowSelector::Lines(vec![line])
    }

    fn score(&self, row: usize, n_rows: usize) -> Option<usize> {
        match self {
            RowSelector::All => Some(1),
            RowSelector::Lines(lines) => {
                let hits = lines
                    .iter()
                    .filter(|&&line| resolve_line(line, n_rows) == Some(row))
                    .count();
                (hits > 0).then_some(hits * LINE_MATCH_WEIGHT)
            }
        }
    }
}

fn resolve_line(line: isize, n_rows: usize) -> Option<usize> {
    if line >= 0 {
        Some(line.unsigned_abs())
    } else {
        n_rows.checked_sub(line.unsigned_abs())
    }
}

/// Rows of text cells aligned in columns.
///
/// Each row picks the format list of the best matching selector (first one
/// on ties). Cells beyond the list reuse its last format.
#[derive(Debug, Clone)]
pub struct Table {
    formats: Vec<(RowSelector, Vec<CellFormat>)>,
    rows: Vec<Vec<String>>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            formats: vec![(RowSelector::All, vec![CellFormat::default()])],
            rows: Vec::new(),
        }
    }

    /// Sets the formats for the selected rows, replacing those of an equal selector.
    pub fn set_row_formats(&mut self, selector: RowSelector, formats: Vec<CellFormat>) {
        match self.formats.iter_mut().find(|(existing, _)| *existing == selector) {
            Some((_, current)) => *current = formats,
            None => self.formats.push((selector, formats)),
        }
    }

    pub fn set_default_formats(&mut self, formats: Vec<CellFormat>) {
        self.set_row_formats(RowSelector::All, formats);
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn add_rows<R, I, S>(&mut self, rows: R)
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self.add_row(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row_formats(&self, row: usize) -> &[CellFormat] {
        let mut best: Option<(usize, &[CellFormat])> = None;
        for (selector, formats) in &self.formats {
            let Some(score) = selector.score(row, self.rows.len()) else {
                continue;
            };
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, formats.as_slice()));
            }
        }
        best.map(|(_, formats)| formats).unwrap_or_default()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths = Vec::new();
        for row in &self.rows {
            for (column, cell) in row.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(column) {
                    Some(current) => *current = width.max(*current),
                    None => widths.push(width),
                }
            }
        }
        widths
    }

    /// One string per row, cells separated by a single space.
    pub fn render(&self) -> Vec<String> {
        let widths = self.column_widths();
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let formats = self.row_formats(index);
                let cells: Vec<String> = row
                    .iter()
                    .enumerate()
                    .map(|(column, cell)| {
                        let format = formats
                            .get(column)
                            .or_else(|| formats.last())
                            .copied()
                            .unwrap_or_default();
                        align_cell(cell, widths[column], format)
                    })
                    .collect();
                cells.join(" ").trim_end().to_string()
            })
            .collect()
    }
}

fn align_cell(cell: &str, width: usize, format: CellFormat) -> String {
    let aligned = match format.align {
        Align::Left => format!("{:<width$}", cell),
        Align::Right => format!("{:>width$}", cell),
        Align::Center => center(cell, width),
        Align::Justified => justify(cell, width),
    };
    if format.truncate && aligned.chars().count() > width {
        aligned.chars().take(width).collect()
    } else {
        aligned
    }
}

fn center(cell: &str, width: usize) -> String {
    let free = width.saturating_sub(cell.chars().count());
    let left = free / 2;
    format!("{}{}{}", " ".repeat(left), cell, " ".repeat(free - left))
}

fn justify(cell: &str, width: usize) -> String {
    let words: Vec<&str> = cell.split_whitespace().collect();
    if words.len() <= 1 {
        return center(cell, width);
    }

    let gaps = words.len() - 1;
    let text: usize = words.iter().map(|word| word.chars().count()).sum();
    let free = width.saturating_sub(text).max(gaps);

    let mut justified = String::from(words[0]);
    let mut assigned = 0;
    for (gap, word) in words[1..].iter().enumerate() {
        // extra spaces land on the later gaps
        let target = (gap + 1) * free / gaps;
        justified.push_str(&" ".repeat(target - assigned));
        justified.push_str(word);
        assigned = target;
    }
    justified
}
