//! Controller permission bitmask.

use core::ops::BitOr;

use alloy_primitives::U256;

/// 256-bit set of capability flags stored under `AddressPermissions:Permissions:<address>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Permissions(pub U256);

const fn bit(value: u64) -> Permissions {
    Permissions(U256::from_limbs([value, 0, 0, 0]))
}

impl Permissions {
    pub const NONE: Self = Self(U256::ZERO);
    pub const ALL: Self = bit(0x3f_ffff);

    pub const CHANGEOWNER: Self = bit(0x01);
    pub const ADDPERMISSIONS: Self = bit(0x02);
    pub const CHANGEPERMISSIONS: Self = bit(0x04);
    pub const ADDEXTENSIONS: Self = bit(0x08);
    pub const CHANGEEXTENSIONS: Self = bit(0x10);
    pub const ADDUNIVERSALRECEIVERDELEGATE: Self = bit(0x20);
    pub const CHANGEUNIVERSALRECEIVERDELEGATE: Self = bit(0x40);
    pub const REENTRANCY: Self = bit(0x80);
    pub const SUPER_TRANSFERVALUE: Self = bit(0x100);
    pub const TRANSFERVALUE: Self = bit(0x200);
    pub const SUPER_CALL: Self = bit(0x400);
    pub const CALL: Self = bit(0x800);
    pub const SUPER_STATICCALL: Self = bit(0x1000);
    pub const STATICCALL: Self = bit(0x2000);
    pub const SUPER_DELEGATECALL: Self = bit(0x4000);
    pub const DELEGATECALL: Self = bit(0x8000);
    pub const DEPLOY: Self = bit(0x1_0000);
    pub const SUPER_SETDATA: Self = bit(0x2_0000);
    pub const SETDATA: Self = bit(0x4_0000);
    pub const ENCRYPT: Self = bit(0x8_0000);
    pub const DECRYPT: Self = bit(0x10_0000);
    pub const SIGN: Self = bit(0x20_0000);

    /// Interpret a raw stored value.
    ///
    /// Only a full 32-byte word is a usable bitmask; anything else reads as "no permissions".
    pub fn from_stored(value: &[u8]) -> Self {
        if value.len() != 32 {
            return Self::NONE;
        }
        Self(U256::from_be_slice(value))
    }

    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }

    pub fn is_empty(self) -> bool {
        self.0.is_zero()
    }

    /// True if every flag of `required` is set.
    pub fn contains(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// True if the base flag or its SUPER variant is set.
    pub fn grants(self, base: Self, super_flag: Self) -> bool {
        self.contains(base) || self.contains(super_flag)
    }
}

impl BitOr for Permissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Name used in `NotAuthorised` errors for a single flag.
pub fn permission_name(flag: Permissions) -> &'static str {
    const NAMES: &[(Permissions, &str)] = &[
        (Permissions::CHANGEOWNER, "CHANGEOWNER"),
        (Permissions::ADDPERMISSIONS, "ADDPERMISSIONS"),
        (Permissions::CHANGEPERMISSIONS, "CHANGEPERMISSIONS"),
        (Permissions::ADDEXTENSIONS, "ADDEXTENSIONS"),
        (Permissions::CHANGEEXTENSIONS, "CHANGEEXTENSIONS"),
        (Permissions::ADDUNIVERSALRECEIVERDELEGATE, "ADDUNIVERSALRECEIVERDELEGATE"),
        (Permissions::CHANGEUNIVERSALRECEIVERDELEGATE, "CHANGEUNIVERSALRECEIVERDELEGATE"),
        (Permissions::REENTRANCY, "REENTRANCY"),
        (Permissions::SUPER_TRANSFERVALUE, "SUPER_TRANSFERVALUE"),
        (Permissions::TRANSFERVALUE, "TRANSFERVALUE"),
        (Permissions::SUPER_CALL, "SUPER_CALL"),
        (Permissions::CALL, "CALL"),
        (Permissions::SUPER_STATICCALL, "SUPER_STATICCALL"),
        (Permissions::STATICCALL, "STATICCALL"),
        (Permissions::SUPER_DELEGATECALL, "SUPER_DELEGATECALL"),
        (Permissions::DELEGATECALL, "DELEGATECALL"),
        (Permissions::DEPLOY, "DEPLOY"),
        (Permissions::SUPER_SETDATA, "SUPER_SETDATA"),
        (Permissions::SETDATA, "SETDATA"),
        (Permissions::ENCRYPT, "ENCRYPT"),
        (Permissions::DECRYPT, "DECRYPT"),
        (Permissions::SIGN, "SIGN"),
    ];
    NAMES
        .iter()
        .find(|(p, _)| *p == flag)
        .map(|(_, name)| *name)
        .unwrap_or("UNKNOWN")
}
