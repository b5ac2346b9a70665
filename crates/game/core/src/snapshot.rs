//! Save documents.
//!
//! A save is a versioned envelope around the full [`GameState`], encoded with
//! bincode. The core never touches the filesystem; callers decide where the
//! bytes go. Decoding restores the state bit-for-bit, RNG included.

use sha2::{Digest, Sha256};

use crate::state::GameState;

/// Bumped whenever `GameState` changes shape.
pub const SAVE_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub state: GameState,
}

impl SaveEnvelope {
    pub fn new(state: GameState) -> Self {
        Self {
            version: SAVE_VERSION,
            state,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("save version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("save document is malformed: {0}")]
    Codec(#[from] bincode::Error),
}

pub fn encode(state: &GameState) -> Result<Vec<u8>, SnapshotError> {
    let envelope = SaveEnvelope::new(state.clone());
    Ok(bincode::serialize(&envelope)?)
}

pub fn decode(bytes: &[u8]) -> Result<GameState, SnapshotError> {
    let envelope: SaveEnvelope = bincode::deserialize(bytes)?;
    if envelope.version != SAVE_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: envelope.version,
            expected: SAVE_VERSION,
        });
    }
    tracing::debug!(day = envelope.state.day, nonce = envelope.state.nonce, "save decoded");
    Ok(envelope.state)
}

/// SHA-256 of the bincode encoding of `state`. Equal states give equal
/// digests.
pub fn digest(state: &GameState) -> Result<[u8; 32], SnapshotError> {
    let bytes = bincode::serialize(state)?;
    Ok(Sha256::digest(&bytes).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::GameMode;

    #[test]
    fn round_trip_restores_rng_position() {
        let config = GameConfig::default();
        let mut state = GameState::new("save", GameMode::Endless, &config);
        state.rng.next_u32();
        state.gold = 77;

        let bytes = encode(&state).expect("encode");
        let mut restored = decode(&bytes).expect("decode");
        assert_eq!(restored, state);
        assert_eq!(restored.rng.next_u64(), state.rng.next_u64());
    }

    #[test]
    fn future_versions_are_rejected() {
        let config = GameConfig::default();
        let state = GameState::new("save", GameMode::Campaign, &config);
        let envelope = SaveEnvelope {
            version: SAVE_VERSION + 1,
            state,
        };
        let bytes = bincode::serialize(&envelope).expect("encode");
        assert!(matches!(
            decode(&bytes),
            Err(SnapshotError::UnsupportedVersion { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn garbage_is_a_codec_error() {
        assert!(matches!(decode(&[1, 2, 3]), Err(SnapshotError::Codec(_))));
    }

    #[test]
    fn digest_tracks_state() {
        let config = GameConfig::default();
        let state = GameState::new("digest", GameMode::Campaign, &config);
        let mut other = state.clone();
        assert_eq!(digest(&state).expect("digest"), digest(&other).expect("digest"));
        other.gold += 1;
        assert_ne!(digest(&state).expect("digest"), digest(&other).expect("digest"));
    }
}
