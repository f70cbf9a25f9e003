//! Incoming packet descriptors.

/// One packet as seen by the indexer.
///
/// Only timing and sizing matter here; payload bytes never reach the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    /// Track this packet belongs to. Zero never routes anywhere.
    pub track_id: u32,
    /// Timestamp in milliseconds.
    pub time: u64,
    /// Payload size in bytes.
    pub size: u64,
    /// Presentation offset stored on the part.
    pub offset: u64,
    /// Whether the packet starts a keyframe.
    pub keyframe: bool,
    /// Byte position in an on-demand storage container.
    pub bpos: Option<u64>,
}

impl Packet {
    /// Create a packet for `track_id` at `time` carrying `size` payload bytes.
    pub fn new(track_id: u32, time: u64, size: u64) -> Self {
        Self {
            track_id,
            time,
            size,
            ..Default::default()
        }
    }

    /// Mark the packet as a keyframe.
    pub fn keyframe(mut self) -> Self {
        self.keyframe = true;
        self
    }

    /// Set the presentation offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the storage byte position, marking the packet as on-demand.
    pub fn bpos(mut self, bpos: u64) -> Self {
        self.bpos = Some(bpos);
        self
    }
}

/// What a packet did to a track.
///
/// Variants are ordered by how much structure the packet opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Update {
    /// The packet went backwards in time and was dropped.
    Rejected,
    /// A part was appended to the current key.
    Part,
    /// A new key was opened inside the current fragment.
    Key,
    /// A new key was opened and it started a new fragment.
    Fragment,
}

impl Update {
    /// Whether the packet changed the track.
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_builder() {
        let packet = Packet::new(2, 4000, 512).keyframe().offset(40).bpos(9000);
        assert_eq!(packet.track_id, 2);
        assert_eq!(packet.time, 4000);
        assert_eq!(packet.size, 512);
        assert_eq!(packet.offset, 40);
        assert!(packet.keyframe);
        assert_eq!(packet.bpos, Some(9000));
    }

    #[test]
    fn test_default_packet_is_live() {
        let packet = Packet::new(1, 0, 10);
        assert!(!packet.keyframe);
        assert_eq!(packet.bpos, None);
    }

    #[test]
    fn test_update_ordering() {
        assert!(Update::Fragment > Update::Key);
        assert!(Update::Key > Update::Part);
        assert!(!Update::Rejected.is_applied());
        assert!(Update::Part.is_applied());
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_packet_json() {
        let packet = Packet::new(3, 120, 64).bpos(77);
        let json = serde_json::to_string(&packet).unwrap();
        assert!(json.contains("\"bpos\":77"));
        let back: Packet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, packet);
    }
}
