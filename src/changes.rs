//! Change flags returned by every state transition
//!
//! Transitions never notify anyone directly. They return a `Changes` value
//! describing what moved, callers merge the values of a whole event, and the
//! boundary dispatches notifications once (see [`crate::notify`]).

use std::fmt;

/// Which parts of widget state changed, plus an optional invoked item
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Changes {
    bits: u8,
    /// List item invoked by this transition (click, double-click, Enter, select)
    pub invoked: Option<usize>,
}

impl Changes {
    pub const NONE: Changes = Changes::from_bits(0);
    pub const SCROLL: Changes = Changes::from_bits(0b0000_0001);
    pub const SELECTION: Changes = Changes::from_bits(0b0000_0010);
    pub const TEXT: Changes = Changes::from_bits(0b0000_0100);
    pub const CARET: Changes = Changes::from_bits(0b0000_1000);
    pub const CARET_VISIBILITY: Changes = Changes::from_bits(0b0001_0000);
    pub const ITEMS: Changes = Changes::from_bits(0b0010_0000);
    /// Drag or button press state of a scrollbar (affects pressed visuals)
    pub const INTERACTION: Changes = Changes::from_bits(0b0100_0000);

    const fn from_bits(bits: u8) -> Self {
        Changes {
            bits,
            invoked: None,
        }
    }

    /// Changes carrying only an invoked item
    pub const fn invoked(index: usize) -> Self {
        Changes {
            bits: 0,
            invoked: Some(index),
        }
    }

    /// `flag` if `condition`, otherwise nothing
    #[inline]
    pub const fn when(condition: bool, flag: Changes) -> Self {
        if condition {
            flag
        } else {
            Changes::NONE
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0 && self.invoked.is_none()
    }

    #[inline]
    pub const fn contains(self, other: Changes) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Combine two change sets. A later invoked item wins.
    #[inline]
    pub const fn union(self, other: Changes) -> Changes {
        Changes {
            bits: self.bits | other.bits,
            invoked: match other.invoked {
                Some(i) => Some(i),
                None => self.invoked,
            },
        }
    }

    pub fn merge(&mut self, other: Changes) {
        *self = self.union(other);
    }

    /// Whether anything visible changed and a repaint is needed
    pub const fn needs_redraw(self) -> bool {
        self.bits != 0
    }
}

impl std::ops::BitOr for Changes {
    type Output = Changes;

    fn bitor(self, rhs: Changes) -> Changes {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Changes {
    fn bitor_assign(&mut self, rhs: Changes) {
        self.merge(rhs);
    }
}

impl fmt::Display for Changes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Changes, &str); 7] = [
            (Changes::SCROLL, "scroll"),
            (Changes::SELECTION, "selection"),
            (Changes::TEXT, "text"),
            (Changes::CARET, "caret"),
            (Changes::CARET_VISIBILITY, "caret-visibility"),
            (Changes::ITEMS, "items"),
            (Changes::INTERACTION, "interaction"),
        ];

        let mut parts: Vec<String> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| name.to_string())
            .collect();
        if let Some(i) = self.invoked {
            parts.push(format!("invoked({})", i));
        }
        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join("|"))
        }
    }
}
