use std::clone::Clone;
use std::cmp::{Eq, PartialEq};
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Record identifier for users, polls, and options within a poll.
///
/// Ids are 1-based and sequential: the id of a freshly appended record is
/// the length of its collection plus one. Records are never deleted, so
/// assignment by position never collides. `Id(0)` is the nil value and
/// never refers to a stored record.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Id(pub u32);

impl Id {
    pub const fn nil() -> Id {
        Id(0)
    }

    /// 1-based id for the record at 0-based `index` in its collection.
    pub const fn from_index(index: usize) -> Id {
        Id(index as u32 + 1)
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<u32> for Id {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}
