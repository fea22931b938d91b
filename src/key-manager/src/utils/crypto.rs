//! Signature recovery through the `ecrecover` precompile.

use stylus_sdk::{
    alloy_primitives::{Address, FixedBytes},
    call::RawCall,
};

use key_manager_core::has_low_s;

const ECRECOVER: Address = Address::new([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
]);
const ECRECOVER_GAS: u64 = 50_000;

/// Recover the signer of `digest` from an `r || s || v` signature.
///
/// Never fails: wrong length, unknown `v`, an upper-half `s` or a rejected signature all yield
/// `Address::ZERO`, which holds no permissions.
pub fn ecrecover_address(digest: FixedBytes<32>, sig: &[u8]) -> Address {
    // The precompile accepts both `s` and `n - s`; only the lower one is a valid signature here.
    if !has_low_s(sig) {
        return Address::ZERO;
    }
    let v = match sig[64] {
        27 | 28 => sig[64],
        0 | 1 => sig[64] + 27,
        _ => return Address::ZERO,
    };

    let mut input = [0u8; 128];
    input[0..32].copy_from_slice(digest.as_slice());
    input[63] = v;
    input[64..128].copy_from_slice(&sig[0..64]);

    match unsafe { RawCall::new_static().gas(ECRECOVER_GAS).call(ECRECOVER, &input) } {
        // 32-byte word, address in the low 20 bytes; empty output on failure.
        Ok(out) if out.len() >= 32 => Address::from_slice(&out[12..32]),
        _ => Address::ZERO,
    }
}
