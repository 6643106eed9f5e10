//! Customer log record format
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, whole record)
//! +------------------+
//! | Customer ID      | (16 raw UUID bytes)
//! +------------------+
//! | Tombstone Flag   | (u8: 0 = live, 1 = deleted)
//! +------------------+
//! | Body             | (length-prefixed JSON, empty for tombstones)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! The checksum covers every byte before it, length prefix included.

use std::io;

use uuid::Uuid;

use super::checksum::{compute_checksum, verify_checksum};
use crate::model::{Customer, CustomerId};

const ID_LEN: usize = 16;

/// len + id + tombstone + body len + checksum
pub const MIN_RECORD_SIZE: usize = 4 + ID_LEN + 1 + 4 + 4;

/// One entry in the customer log. Latest entry per id wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub is_tombstone: bool,
    pub body: Vec<u8>,
}

impl CustomerRecord {
    /// Full-document record for a live customer
    pub fn live(customer: &Customer) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: customer.id,
            is_tombstone: false,
            body: serde_json::to_vec(customer)?,
        })
    }

    /// Deletion marker
    pub fn tombstone(id: CustomerId) -> Self {
        Self {
            id,
            is_tombstone: true,
            body: Vec::new(),
        }
    }

    pub fn decode_customer(&self) -> Result<Customer, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn serialize(&self) -> Vec<u8> {
        let record_length = (MIN_RECORD_SIZE + self.body.len()) as u32;

        let mut buf = Vec::with_capacity(record_length as usize);
        buf.extend_from_slice(&record_length.to_le_bytes());
        buf.extend_from_slice(self.id.as_uuid().as_bytes());
        buf.push(u8::from(self.is_tombstone));
        buf.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.body);

        let checksum = compute_checksum(&buf);
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf
    }

    /// Parse one record from the front of `data`, verifying its checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = read_u32(data, 0) as usize;
        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }
        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let expected = read_u32(data, checksum_offset);
        if !verify_checksum(&data[..checksum_offset], expected) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum mismatch",
            ));
        }

        let mut id_bytes = [0u8; ID_LEN];
        id_bytes.copy_from_slice(&data[4..4 + ID_LEN]);
        let id = CustomerId::from(Uuid::from_bytes(id_bytes));

        let is_tombstone = match data[4 + ID_LEN] {
            0 => false,
            1 => true,
            flag => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Invalid tombstone flag: {}", flag),
                ))
            }
        };

        let body_start = 4 + ID_LEN + 1 + 4;
        let body_len = read_u32(data, 4 + ID_LEN + 1) as usize;
        if body_start + body_len != checksum_offset {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Body length {} does not match record length {}",
                    body_len, record_length
                ),
            ));
        }

        Ok((
            Self {
                id,
                is_tombstone,
                body: data[body_start..checksum_offset].to_vec(),
            },
            record_length,
        ))
    }
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
