use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var {
    index: u32,
}

impl Var {
    pub(crate) const MAX_VAR: Var = Var { index: (u32::MAX >> 1) - 1 };

    pub fn from_index(index: u32) -> Self {
        assert!(index <= Self::MAX_VAR.index);
        Self { index }
    }

    pub fn from_dimacs(var: i32) -> Self {
        assert!(var > 0);
        Self::from_index((var - 1).try_into().expect("var - 1 is greater or equal to 0"))
    }

    pub fn to_dimacs(self) -> i32 {
        (self.index + 1).try_into().expect("index + 1 should always be smaller than i32::MAX")
    }

    pub(crate) fn as_index(self) -> usize {
        usize::try_from(self.index).unwrap()
    }

    pub fn positive(self) -> Lit {
        Lit::positive(self)
    }

    pub fn negative(self) -> Lit {
        Lit::negative(self)
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// A literal, i.e., a variable together with a polarity.
///
/// The least significant bit stores the sign, so `lit` and `!lit` are
/// neighbours and the variable is recovered by a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit {
    repr: u32,
}

const _: () = assert!(std::mem::size_of::<Lit>() == 4);

impl Lit {
    pub const fn new(variable: Var, polarity: bool) -> Self {
        assert!(variable.index <= Var::MAX_VAR.index);
        Self { repr: (variable.index << 1) | (!polarity as u32) }
    }

    pub const fn positive(variable: Var) -> Self {
        Self::new(variable, true)
    }

    pub const fn negative(variable: Var) -> Self {
        Self::new(variable, false)
    }

    pub fn var(self) -> Var {
        Var { index: self.repr >> 1 }
    }

    pub fn is_negative(self) -> bool {
        (self.repr & 1) == 1
    }

    pub fn is_positive(self) -> bool {
        !self.is_negative()
    }

    pub fn from_dimacs(lit: i32) -> Self {
        Self::new(Var::from_dimacs(lit.abs()), lit > 0)
    }

    pub fn to_dimacs(self) -> i32 {
        if self.is_negative() {
            -self.var().to_dimacs()
        } else {
            self.var().to_dimacs()
        }
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl std::ops::Not for Lit {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self { repr: self.repr ^ 1 }
    }
}

/// Helper struct which implements [`Display`] for [`Lit`] slices
#[derive(Debug, Clone, Copy)]
pub(crate) struct LitSlice<'a>(&'a [Lit]);

impl<'a> From<&'a [Lit]> for LitSlice<'a> {
    fn from(slice: &'a [Lit]) -> Self {
        Self(slice)
    }
}

impl<'a> Display for LitSlice<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(")?;
        for (idx, lit) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{lit}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn negation() {
        let a = Var::from_dimacs(1);
        let l = Lit::positive(a);
        let neg_l = !l;
        assert_ne!(l, neg_l);
        assert_eq!(neg_l, Lit::negative(a));
        assert_eq!(l, !neg_l);
        assert_eq!(neg_l.var(), a);
    }

    #[test]
    fn dimacs() {
        assert_eq!(Lit::from_dimacs(-3).to_dimacs(), -3);
        assert_eq!(Lit::from_dimacs(7), Var::from_dimacs(7).positive());
        assert_eq!(LitSlice::from(&[Lit::from_dimacs(1), Lit::from_dimacs(-2)][..]).to_string(), "(1 -2)");
    }

    proptest! {
        #[test]
        fn sign_and_variable(lit in strategy::lit(0..1000u32)) {
            prop_assert_eq!(lit.is_positive(), lit.to_dimacs() > 0);
            prop_assert_eq!((!lit).var(), lit.var());
            prop_assert_eq!(Lit::new(lit.var(), lit.is_positive()), lit);
        }
    }

    #[test]
    #[should_panic]
    fn larger_than_max_var() {
        let _max = Var::from_index(Var::MAX_VAR.index + 1);
    }
}
