//! Shard Iterator
//!
//! Walks every filled entry of a shard, whatever its layout. Entries that
//! carry the "no data" sentinel are skipped.

use crate::record::{decode, Record};

use super::{Shard, ShardLayout, DIRECT_ENTRY_SIZE, HEADER_SIZE};

/// Iterator over `(suffix, record)` pairs of a shard
///
/// Direct shards yield in suffix order; sorted shards yield in file order,
/// which is suffix order for any shard that passes validation.
pub struct ShardRecords<'a> {
    shard: &'a Shard,
    layout: ShardLayout,
    index: usize,
    count: usize,
}

impl<'a> ShardRecords<'a> {
    pub(super) fn new(shard: &'a Shard) -> Self {
        Self {
            shard,
            layout: shard.layout(),
            index: 0,
            count: shard.record_count(),
        }
    }
}

impl Iterator for ShardRecords<'_> {
    type Item = (u32, Record);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.count {
            let index = self.index;
            self.index += 1;

            let (suffix, b1, b2) = match self.layout {
                ShardLayout::Direct => {
                    let offset = HEADER_SIZE + index * DIRECT_ENTRY_SIZE;
                    let bytes = self.shard.as_bytes();
                    (index as u32, bytes[offset], bytes[offset + 1])
                }
                ShardLayout::Sorted => {
                    let (b1, b2) = self.shard.data_at(index);
                    (self.shard.key_at(index), b1, b2)
                }
            };

            if let Some(record) = decode(b1, b2) {
                return Some((suffix, record));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.count - self.index))
    }
}
