use std::fmt::{Display, Formatter};
use std::ops::Neg;

/// A signed reference to a circuit variable.
///
/// The magnitude is the circuit-variable id (1-based), the sign encodes negation.
/// Zero never names a variable; the session rejects it at every entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ref(i32);

impl Ref {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub(crate) const fn positive(id: u32) -> Self {
        Self(id as i32)
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negated(&self) -> bool {
        self.0 < 0
    }

    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Return the internal (signed) representation of the reference.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Return the unsigned circuit-variable id.
    pub const fn id(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Return the non-negated form of the reference.
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

impl Neg for Ref {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl From<i32> for Ref {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Ref> for i32 {
    fn from(r: Ref) -> Self {
        r.0
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", if self.is_negated() { "~" } else { "" }, self.id())
    }
}
