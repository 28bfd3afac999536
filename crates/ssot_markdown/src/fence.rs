//! Line classification for fenced and indented code.
//!
//! A fence marker is a run of three or more identical backticks or tildes starting at column 0.
//! While a fence is open only a marker of the same character that is at least as long as the
//! opener closes it; every other line, marker-shaped or not, is fenced content. There is no
//! nesting: one [`FenceState`] describes the whole document at any line.

/// Fence state threaded through a single pass over a document.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FenceState {
    /// Not inside a fenced block.
    #[default]
    Closed,
    /// Inside a fenced block opened by `len` repetitions of `marker` on line `opened_at`.
    Open {
        /// Marker character, either `` ` `` or `~`.
        marker: char,
        /// Length of the opening marker run.
        len: usize,
        /// 1-based line number of the opening marker.
        opened_at: usize,
    },
}

/// Classification of one line relative to code regions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineClass {
    /// Ordinary document text.
    Text,
    /// A marker line that opened or closed a fence.
    FenceMarker,
    /// Content inside an open fence, including marker lines that do not close it.
    Fenced,
    /// Four-space or tab indented code outside any fence.
    Indented,
}

impl LineClass {
    /// Whether the line belongs to any code region.
    pub fn is_code(self) -> bool {
        !matches!(self, Self::Text)
    }

    /// Whether the line belongs to a fenced block, marker lines included.
    pub fn is_fenced(self) -> bool {
        matches!(self, Self::FenceMarker | Self::Fenced)
    }
}

/// One classified line of a document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClassifiedLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Line text without its terminator.
    pub text: &'a str,
    /// Classification computed from this line and the lines before it.
    pub class: LineClass,
}

impl FenceState {
    /// Classify `line` and advance the state machine past it.
    pub fn advance(&mut self, line: &str, line_no: usize) -> LineClass {
        if let Some((marker, len)) = fence_marker(line) {
            return match *self {
                Self::Closed => {
                    *self = Self::Open {
                        marker,
                        len,
                        opened_at: line_no,
                    };
                    LineClass::FenceMarker
                }
                Self::Open {
                    marker: open_marker,
                    len: open_len,
                    ..
                } if marker == open_marker && len >= open_len => {
                    *self = Self::Closed;
                    LineClass::FenceMarker
                }
                Self::Open { .. } => LineClass::Fenced,
            };
        }

        if self.is_open() {
            return LineClass::Fenced;
        }
        if line.starts_with("    ") || line.starts_with('\t') {
            return LineClass::Indented;
        }
        LineClass::Text
    }

    /// Whether a fence is currently open.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Line number of the currently open fence, if any.
    pub fn opened_at(&self) -> Option<usize> {
        match self {
            Self::Open { opened_at, .. } => Some(*opened_at),
            Self::Closed => None,
        }
    }
}

/// Parse a fence marker at column 0, returning its character and run length.
pub fn fence_marker(line: &str) -> Option<(char, usize)> {
    let first = line.as_bytes().first().copied()?;
    if first != b'`' && first != b'~' {
        return None;
    }
    let len = line.bytes().take_while(|b| *b == first).count();
    (len >= 3).then_some((char::from(first), len))
}

/// Classify every line of `text` in a single forward pass.
pub fn classify_lines(text: &str) -> Vec<ClassifiedLine<'_>> {
    let mut state = FenceState::Closed;
    text.lines()
        .enumerate()
        .map(|(idx, line)| {
            let number = idx + 1;
            ClassifiedLine {
                number,
                text: line,
                class: state.advance(line, number),
            }
        })
        .collect()
}

/// Return `text` with every code-region line removed, joined by `\n`.
pub fn strip_code(text: &str) -> String {
    classify_lines(text)
        .into_iter()
        .filter(|line| !line.class.is_code())
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line number of a fence that is still open at the end of `text`.
pub fn unclosed_fence(text: &str) -> Option<usize> {
    let mut state = FenceState::Closed;
    for (idx, line) in text.lines().enumerate() {
        state.advance(line, idx + 1);
    }
    state.opened_at()
}
