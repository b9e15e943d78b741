//! Minigame blacklist packing.
//!
//! Bit order contract: bit i of the packed field is minigame index i.
//! Inputs longer than BLACKLIST_CAPACITY are rejected, never truncated.

use crate::{
    error::{SaveError, SaveResult},
    types::BLACKLIST_CAPACITY,
};

fn check_capacity(len: usize) -> SaveResult<()> {
    if len > BLACKLIST_CAPACITY {
        log::warn!("Rejected blacklist of {len} entries (capacity {BLACKLIST_CAPACITY})");
        return Err(SaveError::BlacklistOverflow {
            len,
            capacity: BLACKLIST_CAPACITY,
        });
    }
    Ok(())
}

/// Pack one flag per minigame into a bitfield.
pub fn pack(flags: &[bool]) -> SaveResult<u32> {
    check_capacity(flags.len())?;
    Ok(flags
        .iter()
        .enumerate()
        .fold(0u32, |bits, (i, &excluded)| bits | (u32::from(excluded) << i)))
}

/// Unpack the first `out.len()` flags from a bitfield.
pub fn unpack(bits: u32, out: &mut [bool]) -> SaveResult<()> {
    check_capacity(out.len())?;
    for (i, flag) in out.iter_mut().enumerate() {
        *flag = (bits >> i) & 1 == 1;
    }
    Ok(())
}
