//! Source regions: file plus a line/column range.
//!
//! Regions are attached to every AST node and to every error raised while
//! evaluating one. Rendering the referenced text is left to the driver.

use std::fmt;

use crate::{Name, StringInterner};

/// A 1-based line/column position.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        SourcePosition { line, column }
    }
}

impl fmt::Debug for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A range of source text in one file.
///
/// `end` is inclusive of the last character, matching how the parser
/// reports token ends.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SourceRegion {
    /// Interned path of the source file.
    pub file: Name,
    pub begin: SourcePosition,
    pub end: SourcePosition,
}

impl SourceRegion {
    /// Region for synthesized nodes that have no source text.
    pub const DUMMY: SourceRegion = SourceRegion {
        file: Name::EMPTY,
        begin: SourcePosition::new(0, 0),
        end: SourcePosition::new(0, 0),
    };

    #[inline]
    pub const fn new(file: Name, begin: SourcePosition, end: SourcePosition) -> Self {
        SourceRegion { file, begin, end }
    }

    /// Region covering both `self` and `other`.
    ///
    /// The file of `self` is kept.
    #[must_use]
    pub fn merge(self, other: SourceRegion) -> SourceRegion {
        SourceRegion {
            file: self.file,
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }

    /// True for regions that point at real source text.
    #[inline]
    pub fn is_dummy(&self) -> bool {
        self.begin.line == 0
    }

    /// Render as `file:line:col-line:col` using the interner for the path.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> impl fmt::Display + 'a {
        RegionDisplay {
            region: self,
            interner,
        }
    }
}

impl fmt::Debug for SourceRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.begin, self.end)
    }
}

struct RegionDisplay<'a> {
    region: &'a SourceRegion,
    interner: &'a StringInterner,
}

impl fmt::Display for RegionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.interner.lookup(self.region.file);
        let file = if file.is_empty() { "<unknown>" } else { file };
        write!(
            f,
            "{file}:{}:{}-{}:{}",
            self.region.begin.line,
            self.region.begin.column,
            self.region.end.line,
            self.region.end.column
        )
    }
}
