use crate::parsing::blocks::types::{Block, Table};

pub struct PipeTable;

impl PipeTable {
    pub const PIPE: char = '|';
    pub const SEPARATOR: &'static str = "|-";
    /// Caption lines are quoted (`> 表 2-1 …`) and mention a table.
    pub const CAPTION_PREFIX: char = '>';
    pub const CAPTION_MARKER: char = '表';

    fn is_row(line: &str) -> bool {
        line.trim().starts_with(Self::PIPE)
    }

    fn is_separator(line: &str) -> bool {
        line.trim().starts_with(Self::SEPARATOR)
    }

    fn is_caption(line: &str) -> bool {
        line.starts_with(Self::CAPTION_PREFIX) && line.contains(Self::CAPTION_MARKER)
    }

    /// Splits a row into trimmed cells, dropping the empty fields outside the
    /// leading and trailing pipes.
    pub fn cells(row: &str) -> Vec<&str> {
        let mut cells: Vec<&str> = row.trim().split(Self::PIPE).map(str::trim).collect();
        if cells.first().is_some_and(|c| c.is_empty()) {
            cells.remove(0);
        }
        if cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        cells
    }
}

pub fn matches(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed
        .strip_prefix(PipeTable::PIPE)
        .is_some_and(|rest| rest.contains(PipeTable::PIPE))
}

/// Consumes the run of pipe rows (separator rows dropped), any blank lines
/// after it, and a caption line if one follows.
///
/// The header keeps only its non-empty cells and fixes the column count;
/// data rows are padded or truncated to it and rows without cells are
/// skipped.
pub fn consume<'a>(lines: &[&'a str], start: usize) -> (Block<'a>, usize) {
    let mut i = start;
    let mut rows = Vec::new();

    while i < lines.len() && PipeTable::is_row(lines[i]) {
        if !PipeTable::is_separator(lines[i]) {
            rows.push(lines[i]);
        }
        i += 1;
    }
    i = i.max(start + 1);

    while i < lines.len() && lines[i].trim().is_empty() {
        i += 1;
    }

    let caption = match lines.get(i).copied() {
        Some(line) if PipeTable::is_caption(line) => {
            i += 1;
            Some(line.trim_matches(|c: char| c == PipeTable::CAPTION_PREFIX || c == ' '))
        }
        _ => None,
    };

    let mut rows = rows.into_iter();
    let header: Vec<&str> = rows
        .next()
        .map(|row| {
            PipeTable::cells(row)
                .into_iter()
                .filter(|cell| !cell.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let columns = header.len();
    let rows = rows
        .map(PipeTable::cells)
        .filter(|cells| !cells.is_empty())
        .map(|mut cells| {
            cells.resize(columns, "");
            cells
        })
        .collect();

    (
        Block::Table(Table {
            caption,
            header,
            rows,
        }),
        i,
    )
}
