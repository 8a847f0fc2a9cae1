use alloc::boxed::Box;

use crate::{Mapping, Record};

// -----------------------------------------------------------------------------
// Subject

/// What a [`Keyed`] value exposes for reading.
#[derive(Clone, Copy)]
pub enum Subject<'a> {
    /// No subject at all; reads yield defaults.
    Absent,
    Record(&'a dyn Record),
    Mapping(&'a Mapping),
}

/// What a [`KeyedMut`] value exposes for writing.
pub enum SubjectMut<'a> {
    /// No subject at all; writes are no-ops.
    Absent,
    Record(&'a mut dyn Record),
    Mapping(&'a mut Mapping),
}

// -----------------------------------------------------------------------------
// Keyed

/// Anything whose entries can be read by string key.
///
/// Implemented for [`Mapping`], `dyn Record`, every `#[derive(Record)]` type,
/// references and boxes of those, and `Option<S>` where `None` is an absent
/// subject.
///
/// # Examples
///
/// ```
/// use f_reflect::Mapping;
/// use f_reflect::access::{Keyed, get_value};
///
/// let m: Mapping = [("a", 1_i32)].into_iter().collect();
/// let none: Option<&Mapping> = None;
/// let subjects: [&dyn Keyed; 2] = [&m, &none];
///
/// assert_eq!(get_value::<i32>("a", subjects[0]), Ok(1));
/// assert_eq!(get_value::<i32>("a", subjects[1]), Ok(0));
/// ```
pub trait Keyed {
    fn subject(&self) -> Subject<'_>;
}

/// Anything whose entries can be written by string key.
pub trait KeyedMut: Keyed {
    fn subject_mut(&mut self) -> SubjectMut<'_>;
}

impl Keyed for Mapping {
    #[inline]
    fn subject(&self) -> Subject<'_> {
        Subject::Mapping(self)
    }
}

impl KeyedMut for Mapping {
    #[inline]
    fn subject_mut(&mut self) -> SubjectMut<'_> {
        SubjectMut::Mapping(self)
    }
}

impl Keyed for dyn Record {
    #[inline]
    fn subject(&self) -> Subject<'_> {
        Subject::Record(self)
    }
}

impl KeyedMut for dyn Record {
    #[inline]
    fn subject_mut(&mut self) -> SubjectMut<'_> {
        SubjectMut::Record(self)
    }
}

impl<S: Keyed + ?Sized> Keyed for &S {
    #[inline]
    fn subject(&self) -> Subject<'_> {
        (**self).subject()
    }
}

impl<S: Keyed + ?Sized> Keyed for &mut S {
    #[inline]
    fn subject(&self) -> Subject<'_> {
        (**self).subject()
    }
}

impl<S: KeyedMut + ?Sized> KeyedMut for &mut S {
    #[inline]
    fn subject_mut(&mut self) -> SubjectMut<'_> {
        (**self).subject_mut()
    }
}

impl<S: Keyed + ?Sized> Keyed for Box<S> {
    #[inline]
    fn subject(&self) -> Subject<'_> {
        (**self).subject()
    }
}

impl<S: KeyedMut + ?Sized> KeyedMut for Box<S> {
    #[inline]
    fn subject_mut(&mut self) -> SubjectMut<'_> {
        (**self).subject_mut()
    }
}

impl<S: Keyed> Keyed for Option<S> {
    #[inline]
    fn subject(&self) -> Subject<'_> {
        match self {
            Some(inner) => inner.subject(),
            None => Subject::Absent,
        }
    }
}

impl<S: KeyedMut> KeyedMut for Option<S> {
    #[inline]
    fn subject_mut(&mut self) -> SubjectMut<'_> {
        match self {
            Some(inner) => inner.subject_mut(),
            None => SubjectMut::Absent,
        }
    }
}
