//! Heightmap parsing from text.
//!
//! A heightmap is an ASCII block of elevation codes `'a'..='z'`, with one
//! `'S'` marking the start cell (elevation `'a'`) and one `'E'` marking the
//! summit cell (elevation `'z'`).

use std::fmt;

use crate::elevation::Elevation;
use crate::geom::Point;
use crate::grid::ElevationGrid;

/// A parsed heightmap: the elevation grid plus the two marked cells.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    pub grid: ElevationGrid,
    pub start: Point,
    pub summit: Point,
}

impl HeightMap {
    /// Parse a heightmap from text.
    ///
    /// Leading/trailing whitespace is trimmed from the whole string but not
    /// from individual lines. Every line must have the same width, and the
    /// map must contain exactly one `'S'` and exactly one `'E'`.
    pub fn parse(s: &str) -> Result<Self, HeightMapError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HeightMapError::Empty);
        }

        let lines: Vec<&str> = s.split('\n').collect();
        let width = lines[0].chars().count();
        if width == 0 {
            return Err(HeightMapError::Empty);
        }

        let mut grid = ElevationGrid::new(width as i32, lines.len() as i32);
        let mut start = None;
        let mut summit = None;

        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() != width {
                return Err(HeightMapError::InconsistentSize);
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let elev = match ch {
                    'S' => {
                        if start.replace(p).is_some() {
                            return Err(HeightMapError::DuplicateStart);
                        }
                        Elevation::LOWEST
                    }
                    'E' => {
                        if summit.replace(p).is_some() {
                            return Err(HeightMapError::DuplicateSummit);
                        }
                        Elevation::HIGHEST
                    }
                    ch => Elevation::from_code(ch)
                        .ok_or(HeightMapError::InvalidGlyph { ch, pos: p })?,
                };
                grid.set(p, elev);
            }
        }

        let start = start.ok_or(HeightMapError::MissingStart)?;
        let summit = summit.ok_or(HeightMapError::MissingSummit)?;
        Ok(Self {
            grid,
            start,
            summit,
        })
    }
}

/// Errors that can occur when parsing a heightmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeightMapError {
    /// The input contains no cells.
    Empty,
    /// Lines have inconsistent widths.
    InconsistentSize,
    /// A character outside `'a'..='z'`/`'S'`/`'E'` was found.
    InvalidGlyph { ch: char, pos: Point },
    /// No `'S'` marker was found.
    MissingStart,
    /// No `'E'` marker was found.
    MissingSummit,
    /// More than one `'S'` marker was found.
    DuplicateStart,
    /// More than one `'E'` marker was found.
    DuplicateSummit,
}

impl fmt::Display for HeightMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "heightmap: empty input"),
            Self::InconsistentSize => write!(f, "heightmap: lines have inconsistent widths"),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "heightmap: invalid glyph {ch:?} at {pos}")
            }
            Self::MissingStart => write!(f, "heightmap: no start marker 'S'"),
            Self::MissingSummit => write!(f, "heightmap: no summit marker 'E'"),
            Self::DuplicateStart => write!(f, "heightmap: more than one start marker 'S'"),
            Self::DuplicateSummit => write!(f, "heightmap: more than one summit marker 'E'"),
        }
    }
}

impl std::error::Error for HeightMapError {}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Sabqponm
abcryxxl
accszExk
acctuvwj
abdefghi";

    #[test]
    fn parse_example() {
        let map = HeightMap::parse(EXAMPLE).unwrap();
        assert_eq!(map.grid.size(), Point::new(8, 5));
        assert_eq!(map.start, Point::new(0, 0));
        assert_eq!(map.summit, Point::new(5, 2));
        // Markers are substituted with concrete elevations.
        assert_eq!(map.grid.at(map.start), Some(Elevation::LOWEST));
        assert_eq!(map.grid.at(map.summit), Some(Elevation::HIGHEST));
        assert_eq!(map.grid.at(Point::new(1, 0)), Elevation::from_code('a'));
        assert_eq!(map.grid.at(Point::new(7, 4)), Elevation::from_code('i'));
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let map = HeightMap::parse("\n\nSbE\n\n").unwrap();
        assert_eq!(map.grid.size(), Point::new(3, 1));
        assert_eq!(map.start, Point::new(0, 0));
        assert_eq!(map.summit, Point::new(2, 0));
    }

    #[test]
    fn empty_input() {
        assert_eq!(HeightMap::parse(""), Err(HeightMapError::Empty));
        assert_eq!(HeightMap::parse("   \n  "), Err(HeightMapError::Empty));
    }

    #[test]
    fn inconsistent_width() {
        assert_eq!(
            HeightMap::parse("Sab\nabcd\nabE"),
            Err(HeightMapError::InconsistentSize)
        );
    }

    #[test]
    fn invalid_glyph() {
        let err = HeightMap::parse("Sa#\nabE").unwrap_err();
        assert_eq!(
            err,
            HeightMapError::InvalidGlyph {
                ch: '#',
                pos: Point::new(2, 0)
            }
        );
    }

    #[test]
    fn missing_markers() {
        assert_eq!(HeightMap::parse("abc"), Err(HeightMapError::MissingStart));
        assert_eq!(HeightMap::parse("Sbc"), Err(HeightMapError::MissingSummit));
    }

    #[test]
    fn duplicate_markers() {
        assert_eq!(
            HeightMap::parse("SaS\nabE"),
            Err(HeightMapError::DuplicateStart)
        );
        assert_eq!(
            HeightMap::parse("SaE\nabE"),
            Err(HeightMapError::DuplicateSummit)
        );
    }

    #[test]
    fn display_mentions_position() {
        let err = HeightMap::parse("S1E").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('1'));
        assert!(msg.contains("(1, 0)"));
    }
}
