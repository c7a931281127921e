use crate::format::{sum_fixed_sizes, FormatBuf, MemberList, Persist, PersistRead, ReadArgs, TypeList};
use crate::io::{BinaryRead, BinaryWrite};
use crate::types::CompositeTypeId;
use crate::Result;

macro_rules! count {
    () => { 0 };
    ($head:ident $($tail:ident)*) => { 1 + count!($($tail)*) };
}

macro_rules! persist_tuple {
    ($($name:ident $idx:tt),*) => {
        impl<$($name: Persist),*> TypeList for ($($name,)*) {
            const LEN: usize = count!($($name)*);

            #[allow(unused_variables)]
            fn format_members(members: &mut MemberList) {
                $( members.push::<$name>(); )*
            }
        }

        impl<$($name: Persist),*> Persist for ($($name,)*) {
            const FIXED_SIZE: Option<usize> = sum_fixed_sizes(&[$($name::FIXED_SIZE),*]);

            fn format(f: &mut FormatBuf) {
                f.push_list(CompositeTypeId::Tuple, <Self as TypeList>::format_members);
            }
            fn buffer_size(&self) -> usize {
                0 $(+ self.$idx.buffer_size())*
            }
            #[allow(unused_variables)]
            fn write<W: BinaryWrite + ?Sized>(&self, w: &mut W) -> Result<()> {
                $( self.$idx.write(w)?; )*
                Ok(())
            }
        }

        impl<$($name: PersistRead),*> PersistRead for ($($name,)*) {
            #[allow(unused_variables)]
            fn read_new<R: BinaryRead + ?Sized>(r: &mut R) -> Result<Self> {
                Ok(($($name::read_new(r)?,)*))
            }
            #[allow(unused_variables)]
            fn read<R: BinaryRead + ?Sized>(&mut self, r: &mut R) -> Result<()> {
                $( self.$idx.read(r)?; )*
                Ok(())
            }
        }

        impl<'a, $($name: PersistRead),*> ReadArgs for ($(&'a mut $name,)*) {
            type Types = ($($name,)*);

            #[allow(unused_variables)]
            fn read_args<R: BinaryRead + ?Sized>(&mut self, r: &mut R) -> Result<()> {
                $( self.$idx.read(r)?; )*
                Ok(())
            }
        }
    };
}

persist_tuple!();
persist_tuple!(A 0);
persist_tuple!(A 0, B 1);
persist_tuple!(A 0, B 1, C 2);
persist_tuple!(A 0, B 1, C 2, D 3);
persist_tuple!(A 0, B 1, C 2, D 3, E 4);
persist_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
persist_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
persist_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
persist_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
persist_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
persist_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
persist_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);
