use crate::descriptor::DescriptorCursor;
use crate::types::{BasicTypeId, CompositeTypeId, ModifierFlags, TypeCode};
use derive_more::Display;

/// The shape of a descriptor entry, as classified from its first two bytes.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Display, Debug)]
pub enum EntryKind {
    Basic,
    BasicArray,
    FixedSizeBasicArray,
    Array,
    FixedSizeArray,
    Tuple,
    Adapted,
    TypeList,
    Optional,
    /// No entry remains.
    End,
}
impl EntryKind {
    pub fn classify(code: TypeCode, mods: ModifierFlags) -> Self {
        match code {
            TypeCode::Basic(_) if mods.is_fixed_array() => Self::FixedSizeBasicArray,
            TypeCode::Basic(_) if mods.is_array() => Self::BasicArray,
            TypeCode::Basic(_) => Self::Basic,
            TypeCode::Composite(id) => match id {
                CompositeTypeId::FixedArray => Self::FixedSizeArray,
                CompositeTypeId::Vector => Self::Array,
                CompositeTypeId::Tuple => Self::Tuple,
                CompositeTypeId::Optional => Self::Optional,
                CompositeTypeId::TypeList => Self::TypeList,
                CompositeTypeId::Adapted => Self::Adapted,
            },
        }
    }
}

/// One decoded descriptor entry.
#[derive(Clone, Debug)]
pub enum Entry<'a> {
    Basic(BasicType),
    BasicArray(BasicArrayType),
    FixedSizeBasicArray(FixedSizeBasicArrayType),
    Array(ArrayType<'a>),
    FixedSizeArray(FixedSizeArrayType<'a>),
    Tuple(TupleType<'a>),
    Adapted(AdaptedType<'a>),
    TypeList(TypeListType<'a>),
    Optional(OptionalType<'a>),
}
impl<'a> Entry<'a> {
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Basic(_) => EntryKind::Basic,
            Self::BasicArray(_) => EntryKind::BasicArray,
            Self::FixedSizeBasicArray(_) => EntryKind::FixedSizeBasicArray,
            Self::Array(_) => EntryKind::Array,
            Self::FixedSizeArray(_) => EntryKind::FixedSizeArray,
            Self::Tuple(_) => EntryKind::Tuple,
            Self::Adapted(_) => EntryKind::Adapted,
            Self::TypeList(_) => EntryKind::TypeList,
            Self::Optional(_) => EntryKind::Optional,
        }
    }
}

/* Views */

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct BasicType {
    pub(super) basic_type_id: BasicTypeId,
    pub(super) modifiers: ModifierFlags,
}
impl BasicType {
    pub fn basic_type_id(&self) -> BasicTypeId {
        self.basic_type_id
    }
    pub fn modifiers(&self) -> ModifierFlags {
        self.modifiers
    }
}

/// A growable sequence of a basic element; the count lives in the payload.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct BasicArrayType {
    pub(super) basic_type_id: BasicTypeId,
}
impl BasicArrayType {
    pub fn basic_type_id(&self) -> BasicTypeId {
        self.basic_type_id
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct FixedSizeBasicArrayType {
    pub(super) basic_type_id: BasicTypeId,
    pub(super) array_size: usize,
}
impl FixedSizeBasicArrayType {
    pub fn basic_type_id(&self) -> BasicTypeId {
        self.basic_type_id
    }
    pub fn array_size(&self) -> usize {
        self.array_size
    }
}

/// A growable sequence of a non-basic element.
#[derive(Clone, Debug)]
pub struct ArrayType<'a> {
    pub(super) element: DescriptorCursor<'a>,
}
impl<'a> ArrayType<'a> {
    /// A cursor over the element descriptor. Its size is 1.
    pub fn cursor(&self) -> DescriptorCursor<'a> {
        self.element.clone()
    }
}

#[derive(Clone, Debug)]
pub struct FixedSizeArrayType<'a> {
    pub(super) element: DescriptorCursor<'a>,
    pub(super) array_size: usize,
}
impl<'a> FixedSizeArrayType<'a> {
    pub fn cursor(&self) -> DescriptorCursor<'a> {
        self.element.clone()
    }
    pub fn array_size(&self) -> usize {
        self.array_size
    }
}

#[derive(Clone, Debug)]
pub struct OptionalType<'a> {
    pub(super) element: DescriptorCursor<'a>,
}
impl<'a> OptionalType<'a> {
    pub fn cursor(&self) -> DescriptorCursor<'a> {
        self.element.clone()
    }
}

macro_rules! list_view {
    ($($(#[$doc:meta])* $name:ident => $id:ident;)*) => { $(
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $name<'a> {
            pub(super) members: DescriptorCursor<'a>,
        }
        impl<'a> $name<'a> {
            /// A cursor over the members, positioned at the first one.
            pub fn cursor(&self) -> DescriptorCursor<'a> {
                self.members.clone()
            }
            pub fn member_count(&self) -> usize {
                self.members.size()
            }
            pub fn tuple_type_id(&self) -> CompositeTypeId {
                CompositeTypeId::$id
            }
        }
    )* };
}

list_view! {
    TupleType => Tuple;
    /// A user type persisted as its field list.
    AdaptedType => Adapted;
    /// The root of an argument list.
    TypeListType => TypeList;
}
