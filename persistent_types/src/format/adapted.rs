/// Persists a struct as the ordered list of the named fields.
///
/// The descriptor entry has the same shape as the tuple of the field types,
/// under the `Adapted` type code. Reading requires the struct to implement
/// `Default`; fields not listed keep their default values.
///
/// ```
/// use persistent_types::{persistent_adapted, DateTime};
///
/// #[derive(Default)]
/// struct Point {
///     at: DateTime,
///     seq: u64,
///     value: f64,
/// }
/// persistent_adapted!(Point { at: DateTime, seq: u64, value: f64 });
/// ```
#[macro_export]
macro_rules! persistent_adapted {
    ($ty:ty { $($field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::format::Adapted for $ty {
            type Fields = ($($fty,)*);
        }

        impl $crate::format::Persist for $ty {
            const FIXED_SIZE: ::std::option::Option<usize> =
                <($($fty,)*) as $crate::format::Persist>::FIXED_SIZE;

            fn format(f: &mut $crate::format::FormatBuf) {
                f.push_list(
                    $crate::types::CompositeTypeId::Adapted,
                    <($($fty,)*) as $crate::format::TypeList>::format_members,
                );
            }
            fn buffer_size(&self) -> usize {
                0 $(+ <$fty as $crate::format::Persist>::buffer_size(&self.$field))*
            }
            #[allow(unused_variables)]
            fn write<W: $crate::io::BinaryWrite + ?Sized>(&self, w: &mut W) -> $crate::Result<()> {
                $(
                    let field: &$fty = &self.$field;
                    $crate::format::Persist::write(field, w)?;
                )*
                Ok(())
            }
        }

        impl $crate::format::PersistRead for $ty {
            fn read_new<R: $crate::io::BinaryRead + ?Sized>(r: &mut R) -> $crate::Result<Self> {
                let mut value = <$ty as ::std::default::Default>::default();
                $crate::format::PersistRead::read(&mut value, r)?;
                Ok(value)
            }
            #[allow(unused_variables)]
            fn read<R: $crate::io::BinaryRead + ?Sized>(&mut self, r: &mut R) -> $crate::Result<()> {
                $(
                    let field: &mut $fty = &mut self.$field;
                    $crate::format::PersistRead::read(field, r)?;
                )*
                Ok(())
            }
        }
    };
}
