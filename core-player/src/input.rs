//! Input normalisation: operations that accept "one or many" take any of the
//! shapes below and always forward a sequence.

use bridge_traits::player::Track;

/// One or more tracks, copied out of the caller's data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackList(Vec<Track>);

impl TrackList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Track> {
        self.0
    }
}

impl From<Track> for TrackList {
    fn from(track: Track) -> Self {
        Self(vec![track])
    }
}

impl From<&Track> for TrackList {
    fn from(track: &Track) -> Self {
        Self(vec![track.clone()])
    }
}

impl From<Vec<Track>> for TrackList {
    fn from(tracks: Vec<Track>) -> Self {
        Self(tracks)
    }
}

impl From<&Vec<Track>> for TrackList {
    fn from(tracks: &Vec<Track>) -> Self {
        Self(tracks.clone())
    }
}

impl From<&[Track]> for TrackList {
    fn from(tracks: &[Track]) -> Self {
        Self(tracks.to_vec())
    }
}

impl<const N: usize> From<[Track; N]> for TrackList {
    fn from(tracks: [Track; N]) -> Self {
        Self(tracks.into())
    }
}

/// One or more queue indexes. Order and duplicates are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexList(Vec<u32>);

impl IndexList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl From<u32> for IndexList {
    fn from(index: u32) -> Self {
        Self(vec![index])
    }
}

impl From<Vec<u32>> for IndexList {
    fn from(indexes: Vec<u32>) -> Self {
        Self(indexes)
    }
}

impl From<&[u32]> for IndexList {
    fn from(indexes: &[u32]) -> Self {
        Self(indexes.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for IndexList {
    fn from(indexes: [u32; N]) -> Self {
        Self(indexes.into())
    }
}
