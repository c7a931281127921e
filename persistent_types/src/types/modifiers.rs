use bitflags::bitflags;

bitflags! {
    /// The second byte of every descriptor entry.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct ModifierFlags: u8 {
        const ARRAY = 0x01;
        const FIXED = 0x02;

        // Reserved. Never emitted, but preserved when read.
        const CONSTANT = 0x04;
        const BIG_ENDIAN = 0x08;
        const SEQUENCE = 0x10;
    }
}

impl ModifierFlags {
    pub const NONE: Self = Self::empty();
    pub const FIXED_ARRAY: Self = Self::ARRAY.union(Self::FIXED);

    pub fn is_array(self) -> bool {
        self.contains(Self::ARRAY)
    }
    pub fn is_fixed_array(self) -> bool {
        self.contains(Self::FIXED_ARRAY)
    }
}
