//! Protocol constants shared on-chain and off-chain.

/// Version word prepended to every relay call message.
pub const LSP25_VERSION: u64 = 25;

// ERC-1271 return values.
pub const ERC1271_MAGIC_VALUE: [u8; 4] = [0x16, 0x26, 0xba, 0x7e];
pub const ERC1271_FAIL_VALUE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

// ERC-165 interface ids advertised by the key manager.
pub const INTERFACE_ID_ERC165: [u8; 4] = [0x01, 0xff, 0xc9, 0xa7];
pub const INTERFACE_ID_ERC1271: [u8; 4] = ERC1271_MAGIC_VALUE;
pub const INTERFACE_ID_LSP6: [u8; 4] = [0x23, 0xf3, 0x4c, 0x62];
pub const INTERFACE_ID_LSP25: [u8; 4] = [0x5a, 0xc7, 0x99, 0x08];
pub const INTERFACE_ID_LSP20_CALL_VERIFIER: [u8; 4] = [0x0d, 0x6e, 0xca, 0xc7];

// LSP20 return values. The last byte of the verify-call magic asks the account to come back
// with the call result.
pub const LSP20_VERIFY_CALL_WITH_POST_VERIFICATION: [u8; 4] = [0xde, 0x92, 0x8f, 0x01];
pub const LSP20_VERIFY_CALL_WITHOUT_POST_VERIFICATION: [u8; 4] = [0xde, 0x92, 0x8f, 0x00];
pub const LSP20_VERIFY_CALL_RESULT_MAGIC_VALUE: [u8; 4] = [0xd3, 0xfc, 0x45, 0xd3];

// LSP14 two-step renounce: blocks to wait, then blocks during which confirmation is accepted.
pub const RENOUNCE_OWNERSHIP_CONFIRMATION_DELAY: u64 = 200;
pub const RENOUNCE_OWNERSHIP_CONFIRMATION_PERIOD: u64 = 200;

/// Length of an ECDSA signature `r || s || v`.
pub const SIGNATURE_LENGTH: usize = 65;

/// Half the secp256k1 group order, big-endian. Signatures with a larger `s` are rejected.
pub const SECP256K1N_HALF: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];
