//! Reader for signed XRPL SignIn transactions.
//!
//! The Xaman app answers a sign-in request with a binary-serialized
//! pseudo-transaction. The signer's key and signature travel inside it and the
//! challenge is carried as `MemoData`. Only the fields needed for verification
//! are extracted; the rest of the blob is walked to keep field boundaries
//! honest and copied verbatim into the unsigned payload.

use crate::{
    crypto::digest::{xrpl_payload, SigningPayload, TRANSACTION_SIGN_PREFIX},
    error::{AuthError, Result},
};

const TYPE_AMOUNT: u8 = 6;
const TYPE_BLOB: u8 = 7;
const TYPE_ACCOUNT_ID: u8 = 8;
const TYPE_OBJECT: u8 = 14;
const TYPE_ARRAY: u8 = 15;
const TYPE_VECTOR256: u8 = 19;

const FIELD_END_MARKER: u8 = 1;
const FIELD_SIGNING_PUB_KEY: u8 = 3;
const FIELD_TXN_SIGNATURE: u8 = 4;
const FIELD_ACCOUNT: u8 = 1;
const FIELD_MEMO_DATA: u8 = 13;

/// Fields of a signed transaction relevant to sign-in verification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub signing_pub_key: Vec<u8>,
    pub txn_signature: Vec<u8>,
    pub account: Option<[u8; 20]>,
    pub memo_data: Vec<Vec<u8>>,
    unsigned: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FieldId {
    type_code: u8,
    field_code: u8,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn byte(&mut self) -> Result<u8> {
        let b = *self
            .bytes
            .get(self.pos)
            .ok_or_else(|| truncated("field header"))?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| truncated("field value"))?;
        let out = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn field_id(&mut self) -> Result<FieldId> {
        let header = self.byte()?;
        let mut type_code = header >> 4;
        let mut field_code = header & 0x0F;
        if type_code == 0 {
            type_code = self.byte()?;
        }
        if field_code == 0 {
            field_code = self.byte()?;
        }
        Ok(FieldId {
            type_code,
            field_code,
        })
    }

    fn variable_length(&mut self) -> Result<usize> {
        let b1 = self.byte()? as usize;
        match b1 {
            0..=192 => Ok(b1),
            193..=240 => {
                let b2 = self.byte()? as usize;
                Ok(193 + (b1 - 193) * 256 + b2)
            }
            241..=254 => {
                let b2 = self.byte()? as usize;
                let b3 = self.byte()? as usize;
                Ok(12481 + (b1 - 241) * 65536 + b2 * 256 + b3)
            }
            _ => Err(AuthError::MalformedTransaction(
                "invalid variable length prefix".to_string(),
            )),
        }
    }
}

fn truncated(what: &str) -> AuthError {
    AuthError::MalformedTransaction(format!("blob truncated while reading {what}"))
}

impl SignedTransaction {
    /// Parse a binary-serialized signed transaction
    ///
    /// # Errors
    /// `MalformedTransaction` when the blob is truncated, uses a field type
    /// this reader does not know, has unbalanced objects or arrays, or lacks
    /// exactly one `SigningPubKey` and one `TxnSignature`.
    pub fn parse(blob: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(blob);
        let mut depth: usize = 0;
        let mut signing_pub_key = None;
        let mut txn_signature = None;
        let mut signature_span = None;
        let mut account: Option<[u8; 20]> = None;
        let mut memo_data = Vec::new();

        while !cursor.is_empty() {
            let start = cursor.pos;
            let id = cursor.field_id()?;

            match id.type_code {
                TYPE_OBJECT | TYPE_ARRAY => {
                    if id.field_code == FIELD_END_MARKER {
                        depth = depth.checked_sub(1).ok_or_else(|| {
                            AuthError::MalformedTransaction("unbalanced end marker".to_string())
                        })?;
                    } else {
                        depth += 1;
                    }
                }
                TYPE_BLOB | TYPE_ACCOUNT_ID | TYPE_VECTOR256 => {
                    let len = cursor.variable_length()?;
                    let value = cursor.take(len)?;
                    match (id.type_code, id.field_code, depth) {
                        (TYPE_BLOB, FIELD_SIGNING_PUB_KEY, 0) => {
                            if signing_pub_key.replace(value.to_vec()).is_some() {
                                return Err(duplicate("SigningPubKey"));
                            }
                        }
                        (TYPE_BLOB, FIELD_TXN_SIGNATURE, 0) => {
                            if txn_signature.replace(value.to_vec()).is_some() {
                                return Err(duplicate("TxnSignature"));
                            }
                            signature_span = Some((start, cursor.pos));
                        }
                        (TYPE_BLOB, FIELD_MEMO_DATA, _) => memo_data.push(value.to_vec()),
                        (TYPE_ACCOUNT_ID, FIELD_ACCOUNT, 0) => {
                            account = value.try_into().ok();
                        }
                        _ => {}
                    }
                }
                TYPE_AMOUNT => {
                    // Amounts: 8 bytes for XRP drops, 48 for issued currencies
                    let first = *cursor
                        .bytes
                        .get(cursor.pos)
                        .ok_or_else(|| truncated("amount"))?;
                    let len = if first & 0x80 != 0 { 48 } else { 8 };
                    cursor.take(len)?;
                }
                type_code => {
                    let len = fixed_width(type_code).ok_or_else(|| {
                        AuthError::MalformedTransaction(format!(
                            "unsupported field type {type_code}"
                        ))
                    })?;
                    cursor.take(len)?;
                }
            }
        }

        if depth != 0 {
            return Err(AuthError::MalformedTransaction(
                "unterminated object or array".to_string(),
            ));
        }

        let signing_pub_key = signing_pub_key.ok_or_else(|| missing("SigningPubKey"))?;
        let txn_signature = txn_signature.ok_or_else(|| missing("TxnSignature"))?;
        let (sig_start, sig_end) = signature_span.ok_or_else(|| missing("TxnSignature"))?;

        let mut unsigned = Vec::with_capacity(blob.len() - (sig_end - sig_start));
        unsigned.extend_from_slice(&blob[..sig_start]);
        unsigned.extend_from_slice(&blob[sig_end..]);

        Ok(Self {
            signing_pub_key,
            txn_signature,
            account,
            memo_data,
            unsigned,
        })
    }

    /// Serialized transaction without its `TxnSignature` field
    pub fn unsigned_blob(&self) -> &[u8] {
        &self.unsigned
    }

    /// Payload the signer signed: `STX\0 ‖ unsigned blob`
    pub fn signing_payload(&self) -> SigningPayload {
        xrpl_payload(TRANSACTION_SIGN_PREFIX, &self.unsigned)
    }

    /// Whether any memo carries exactly `challenge`
    pub fn carries_challenge(&self, challenge: &[u8]) -> bool {
        self.memo_data.iter().any(|memo| memo.as_slice() == challenge)
    }
}

fn fixed_width(type_code: u8) -> Option<usize> {
    match type_code {
        1 => Some(2),   // UInt16
        2 => Some(4),   // UInt32
        3 => Some(8),   // UInt64
        4 => Some(16),  // Hash128
        5 => Some(32),  // Hash256
        16 => Some(1),  // UInt8
        17 => Some(20), // Hash160
        20 => Some(12), // UInt96
        21 => Some(24), // Hash192
        22 => Some(48), // UInt384
        23 => Some(64), // UInt512
        _ => None,
    }
}

fn missing(field: &str) -> AuthError {
    AuthError::MalformedTransaction(format!("missing {field}"))
}

fn duplicate(field: &str) -> AuthError {
    AuthError::MalformedTransaction(format!("duplicate {field}"))
}
