use std::fmt;

/// Index of a virtual page, `0..num_pages`.
pub type PageId = usize;
/// Index of a physical frame, `0..num_frames`.
pub type FrameId = usize;

/// The kind of memory access recorded by a trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    Read,
    Write,
}

impl AccessType {
    /// Parses the single-character trace encoding (`r` / `w`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(AccessType::Read),
            'w' => Some(AccessType::Write),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            AccessType::Read => 'r',
            AccessType::Write => 'w',
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, AccessType::Write)
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
