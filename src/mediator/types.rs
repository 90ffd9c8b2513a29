//! Management bus address types.

use crate::constants::{MAC_ADDR_LEN, MAX_PHY_ADDR, MAX_REG_ADDR, PHY_ADDR_COUNT};
use crate::error::{ArgumentError, Result};

/// MAC address (6 bytes)
pub type MacAddress = [u8; MAC_ADDR_LEN];

/// PHY bus address (0-31)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyAddress(u8);

impl PhyAddress {
    /// Lowest bus address
    pub const MIN: Self = Self(0);
    /// Highest bus address
    pub const MAX: Self = Self(MAX_PHY_ADDR);

    /// Create an address, rejecting values outside 0-31
    pub const fn new(addr: u8) -> Result<Self> {
        if addr > MAX_PHY_ADDR {
            return Err(crate::Error::InvalidArgument(ArgumentError::InvalidPhyAddress));
        }
        Ok(Self(addr))
    }

    /// Raw 5-bit value
    #[inline(always)]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// All 32 addresses in ascending order
    pub fn all() -> impl DoubleEndedIterator<Item = PhyAddress> + ExactSizeIterator {
        (0..=MAX_PHY_ADDR).map(PhyAddress)
    }
}

impl TryFrom<u8> for PhyAddress {
    type Error = crate::Error;

    fn try_from(addr: u8) -> Result<Self> {
        Self::new(addr)
    }
}

impl TryFrom<u32> for PhyAddress {
    type Error = crate::Error;

    fn try_from(addr: u32) -> Result<Self> {
        u8::try_from(addr)
            .map_err(|_| crate::Error::from(ArgumentError::InvalidPhyAddress))
            .and_then(Self::new)
    }
}

impl From<PhyAddress> for u8 {
    fn from(addr: PhyAddress) -> Self {
        addr.0
    }
}

impl core::fmt::Display for PhyAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// PHY register index (Clause 22, 0-31)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterIndex(u8);

impl RegisterIndex {
    /// Create an index, rejecting values outside 0-31
    pub const fn new(reg: u8) -> Result<Self> {
        if reg > MAX_REG_ADDR {
            return Err(crate::Error::InvalidArgument(ArgumentError::InvalidRegister));
        }
        Ok(Self(reg))
    }

    /// Create an index from a constant known to be in range
    ///
    /// Out-of-range values fail at compile time when used in a const context.
    pub(crate) const fn from_const(reg: u8) -> Self {
        assert!(reg <= MAX_REG_ADDR, "register index out of range");
        Self(reg)
    }

    /// Raw 5-bit value
    #[inline(always)]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// All 32 register indices in ascending order
    pub fn all() -> impl DoubleEndedIterator<Item = RegisterIndex> + ExactSizeIterator {
        (0..=MAX_REG_ADDR).map(RegisterIndex)
    }
}

impl TryFrom<u8> for RegisterIndex {
    type Error = crate::Error;

    fn try_from(reg: u8) -> Result<Self> {
        Self::new(reg)
    }
}

impl From<RegisterIndex> for u8 {
    fn from(reg: RegisterIndex) -> Self {
        reg.0
    }
}

/// Set of PHY addresses, one bit per address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyAddressSet(u32);

impl PhyAddressSet {
    /// Empty set
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add an address
    pub fn insert(&mut self, addr: PhyAddress) {
        self.0 |= 1 << addr.value();
    }

    /// Check membership
    pub const fn contains(&self, addr: PhyAddress) -> bool {
        self.0 & (1 << addr.value()) != 0
    }

    /// Number of addresses in the set
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Lowest address in the set
    pub const fn first(&self) -> Option<PhyAddress> {
        if self.0 == 0 {
            None
        } else {
            Some(PhyAddress(self.0.trailing_zeros() as u8))
        }
    }

    /// Raw presence map, bit N set for address N
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Addresses in ascending order
    pub fn iter(&self) -> impl Iterator<Item = PhyAddress> + '_ {
        PhyAddress::all().filter(|addr| self.contains(*addr))
    }
}

const _: () = assert!(PHY_ADDR_COUNT == u32::BITS as usize);

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;
    use crate::Error;

    #[test]
    fn phy_address_range() {
        assert_eq!(PhyAddress::new(0).unwrap().value(), 0);
        assert_eq!(PhyAddress::new(31).unwrap().value(), 31);
        assert_eq!(
            PhyAddress::new(32),
            Err(Error::InvalidArgument(ArgumentError::InvalidPhyAddress))
        );
        assert!(PhyAddress::try_from(0x1_0000u32).is_err());
        assert_eq!(PhyAddress::try_from(7u32).unwrap().value(), 7);
    }

    #[test]
    fn register_index_range() {
        assert!(RegisterIndex::new(31).is_ok());
        assert_eq!(
            RegisterIndex::new(32),
            Err(Error::InvalidArgument(ArgumentError::InvalidRegister))
        );
    }

    #[test]
    fn all_addresses_ascending() {
        let addrs: Vec<u8> = PhyAddress::all().map(PhyAddress::value).collect();
        assert_eq!(addrs.len(), 32);
        assert!(addrs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(addrs.first(), Some(&0));
        assert_eq!(addrs.last(), Some(&31));
    }

    #[test]
    fn address_set_membership() {
        let mut set = PhyAddressSet::new();
        assert!(set.is_empty());
        assert_eq!(set.first(), None);

        set.insert(PhyAddress::new(31).unwrap());
        set.insert(PhyAddress::new(4).unwrap());

        assert_eq!(set.len(), 2);
        assert_eq!(set.first(), Some(PhyAddress::new(4).unwrap()));
        assert!(set.contains(PhyAddress::MAX));
        assert!(!set.contains(PhyAddress::MIN));
        assert_eq!(set.bits(), (1 << 31) | (1 << 4));

        let members: Vec<u8> = set.iter().map(u8::from).collect();
        assert_eq!(members, [4, 31]);
    }
}
