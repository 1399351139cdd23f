use crate::Grid;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// RLE output lines are wrapped at this width.
const RLE_LINE_LIMIT: usize = 70;

/// Text formats a [`Grid`] can be loaded from and saved to.
///
/// See https://conwaylife.com/wiki/Run_Length_Encoded and
/// https://conwaylife.com/wiki/Plaintext.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridFormat {
    /// Run-length encoding: `x = W, y = H, rule = B3/S23` header
    /// followed by runs of `b` (dead), `o` (alive) and `$` (end of row),
    /// terminated by `!`. Lines starting with `#` are comments.
    ///
    /// The header dimensions are the board dimensions; only the B3/S23 rule
    /// is accepted.
    RLE,
    /// One line per row, `.` for dead and `O` for alive cells.
    /// Lines starting with `!` are comments. Short rows are padded with
    /// dead cells up to the longest one.
    Plaintext,
}

impl GridFormat {
    /// Guesses the format from a file name: `.rle` or `.cells`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        match path.as_ref().extension()?.to_str()? {
            "rle" => Some(Self::RLE),
            "cells" => Some(Self::Plaintext),
            _ => None,
        }
    }
}

impl Grid {
    /// Creates a grid from data in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is malformed, describes an empty board,
    /// or (for RLE) specifies a rule other than B3/S23.
    pub fn from_format(format: GridFormat, data: &[u8]) -> Result<Self> {
        match format {
            GridFormat::RLE => Self::from_rle(data),
            GridFormat::Plaintext => Self::from_plaintext(data),
        }
    }

    /// Serializes the grid to the specified format.
    pub fn to_format(&self, format: GridFormat) -> Vec<u8> {
        match format {
            GridFormat::RLE => self.to_rle(),
            GridFormat::Plaintext => self.to_plaintext(),
        }
    }

    /// Loads a grid from a file, picking the format by its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = GridFormat::from_path(path)
            .ok_or_else(|| anyhow!("Unsupported pattern extension: {}", path.display()))?;
        let data =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let grid = Self::from_format(format, &data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::debug!(
            "Loaded {}x{} grid from {}",
            grid.height(),
            grid.width(),
            path.display()
        );
        Ok(grid)
    }

    /// Saves the grid to a file, picking the format by its extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = GridFormat::from_path(path)
            .ok_or_else(|| anyhow!("Unsupported pattern extension: {}", path.display()))?;
        std::fs::write(path, self.to_format(format))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Saved grid to {}", path.display());
        Ok(())
    }

    fn from_rle(data: &[u8]) -> Result<Self> {
        let mut lines = data
            .split(|&b| b == b'\n')
            .map(|x| x.strip_suffix(b"\r").unwrap_or(x))
            .filter(|x| !x.trim_ascii().is_empty() && x[0] != b'#');
        let header = lines.next().ok_or_else(|| anyhow!("Missing header"))?;
        let header = std::str::from_utf8(header).context("Invalid header: not UTF-8")?;
        let fields = header
            .split(',')
            .map(|part| {
                part.split_once('=')
                    .map(|(key, value)| (key.trim(), value.trim()))
                    .ok_or_else(|| anyhow!("Invalid header field \"{}\"", part.trim()))
            })
            .collect::<Result<Vec<_>>>()?;

        // the rule is optional, nothing else may follow it
        let (width, height) = match fields.as_slice() {
            [("x", x), ("y", y)] => (x, y),
            [("x", x), ("y", y), ("rule", rule)] => {
                if !rule.eq_ignore_ascii_case("B3/S23") {
                    return Err(anyhow!("Only B3/S23 rule is supported, got {}", rule));
                }
                (x, y)
            }
            _ => {
                return Err(anyhow!(
                    "Invalid header: expected \"x = <width>, y = <height>[, rule = B3/S23]\", got \"{}\"",
                    header.trim()
                ))
            }
        };
        let width: usize = width
            .parse()
            .with_context(|| format!("Invalid width \"{}\"", width))?;
        let height: usize = height
            .parse()
            .with_context(|| format!("Invalid height \"{}\"", height))?;

        let mut grid = Grid::blank(height, width)?;
        let (mut x, mut y, mut count) = (0usize, 0usize, 0usize);

        'outer: for line in lines {
            for &b in line {
                match b {
                    b'0'..=b'9' => {
                        count = count
                            .checked_mul(10)
                            .and_then(|c| c.checked_add((b - b'0') as usize))
                            .ok_or_else(|| anyhow!("Run length is too large"))?;
                    }
                    b'b' => {
                        x = x
                            .checked_add(count.max(1))
                            .filter(|&x| x <= width)
                            .ok_or_else(|| anyhow!("Pattern data out of bounds at y = {}", y))?;
                        count = 0;
                    }
                    b'o' => {
                        let c = count.max(1);
                        let end = x
                            .checked_add(c)
                            .filter(|&end| end <= width && y < height)
                            .ok_or_else(|| {
                                anyhow!("Pattern data out of bounds: x = {}, y = {}", x, y)
                            })?;
                        for col in x..end {
                            grid.set((y, col).into(), true)?;
                        }
                        x = end;
                        count = 0;
                    }
                    b'$' => {
                        // a trailing '$' may step just past the last row
                        y = y
                            .checked_add(count.max(1))
                            .filter(|&y| y <= height)
                            .ok_or_else(|| anyhow!("Pattern data out of bounds below y = {}", y))?;
                        x = 0;
                        count = 0;
                    }
                    b'!' => break 'outer,
                    b' ' | b'\t' => continue,
                    _ => return Err(anyhow!("Invalid RLE character: '{}'", b as char)),
                }
            }
        }

        Ok(grid)
    }

    fn to_rle(&self) -> Vec<u8> {
        fn push_run(result: &mut Vec<u8>, line_length: &mut usize, run_length: usize, tag: u8) {
            let mut run = Vec::new();
            if run_length > 1 {
                run.extend_from_slice(run_length.to_string().as_bytes());
            }
            run.push(tag);
            if *line_length + run.len() > RLE_LINE_LIMIT {
                result.push(b'\n');
                *line_length = 0;
            }
            result.extend_from_slice(&run);
            *line_length += run.len();
        }

        let mut result = format!(
            "x = {}, y = {}, rule = B3/S23\n",
            self.width(),
            self.height()
        )
        .into_bytes();
        let mut line_length = 0;
        // row ends are buffered so that trailing blank rows collapse into the final '!'
        let mut pending_rows = 0;

        for row in self.rows() {
            // trailing dead cells of a row are implied
            let Some(last_alive) = row.iter().rposition(|&alive| alive) else {
                pending_rows += 1;
                continue;
            };
            if pending_rows > 0 {
                push_run(&mut result, &mut line_length, pending_rows, b'$');
            }

            let mut run_length = 0;
            let mut last_state = row[0];
            for &state in &row[..=last_alive] {
                if state == last_state {
                    run_length += 1;
                } else {
                    let tag = if last_state { b'o' } else { b'b' };
                    push_run(&mut result, &mut line_length, run_length, tag);
                    run_length = 1;
                    last_state = state;
                }
            }
            push_run(&mut result, &mut line_length, run_length, b'o');
            pending_rows = 1;
        }

        if line_length + 1 > RLE_LINE_LIMIT {
            result.push(b'\n');
        }
        result.push(b'!');
        result.push(b'\n');
        result
    }

    fn from_plaintext(data: &[u8]) -> Result<Self> {
        let rows = data
            .split(|&b| b == b'\n')
            .map(|x| x.strip_suffix(b"\r").unwrap_or(x))
            .filter(|x| !x.starts_with(b"!"))
            .map(|line| {
                line.iter()
                    .map(|&b| match b {
                        b'.' => Ok(false),
                        b'O' | b'*' => Ok(true),
                        _ => Err(anyhow!("Invalid plaintext character: '{}'", b as char)),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        // a trailing newline leaves an empty last line
        let height = rows.iter().rposition(|row| !row.is_empty()).map_or(0, |i| i + 1);
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .take(height)
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();
        Ok(Grid::from_rows(rows)?)
    }

    fn to_plaintext(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.height() * (self.width() + 1));
        for row in self.rows() {
            result.extend(row.iter().map(|&alive| if alive { b'O' } else { b'.' }));
            result.push(b'\n');
        }
        result
    }
}
