//! Compile-time capability checks.
//!
//! `is_read_target!(T)` is `true` iff `T: PersistRead`, and
//! `is_write_source!(T)` is `true` iff `T: Persist`. Both expand to constant
//! expressions.
//!
//! An inherent associated const shadows a trait associated const of the same
//! name, but only when the inherent impl's bounds hold. Otherwise, resolution
//! falls through to the blanket trait, which says `false`.

use std::marker::PhantomData;

#[doc(hidden)]
pub struct Probe<T: ?Sized>(PhantomData<T>);

#[doc(hidden)]
pub trait Fallback {
    const IS_READ_TARGET: bool = false;
    const IS_WRITE_SOURCE: bool = false;
}
impl<T: ?Sized> Fallback for Probe<T> {}

impl<T: super::PersistRead> Probe<T> {
    pub const IS_READ_TARGET: bool = true;
}
impl<T: super::Persist + ?Sized> Probe<T> {
    pub const IS_WRITE_SOURCE: bool = true;
}

#[macro_export]
macro_rules! is_read_target {
    ($t:ty) => {{
        #[allow(unused_imports)]
        use $crate::format::Fallback as _;
        <$crate::format::Probe<$t>>::IS_READ_TARGET
    }};
}

#[macro_export]
macro_rules! is_write_source {
    ($t:ty) => {{
        #[allow(unused_imports)]
        use $crate::format::Fallback as _;
        <$crate::format::Probe<$t>>::IS_WRITE_SOURCE
    }};
}
