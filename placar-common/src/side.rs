use derivative::Derivative;
use enum_iterator::Sequence;

#[derive(Derivative, Sequence)]
#[derivative(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Side {
    #[derivative(Default)]
    A,
    B,
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}
