// -*- mode: rust; -*-
//
// This file is part of threshold-bbsplus.
//
// The distributed signing protocol (component C5) and its reconstructor
// (component C6), modelled as a trusted in-memory orchestrator sequencing
// all parties in one process (spec §5).

pub mod reconstruct;
pub mod signer;

pub use reconstruct::reconstruct;
pub use signer::DistributedSigning;

use crate::curve::{G1Projective, Scalar};

/// A single server's contribution to a jointly-produced BBS+ signature.
///
/// Across one signing session `e` and `s` are identical in every share (the
/// jointly sampled nonces); `r_i` and `u_i` are per-server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignatureShare {
    /// The id of the server that produced this share.
    pub server_id: usize,
    /// The jointly sampled nonce `e`, identical across all shares.
    pub e: Scalar,
    /// The jointly sampled nonce `s`, identical across all shares.
    pub s: Scalar,
    /// This server's contribution to the aggregate `R`.
    pub r_i: G1Projective,
    /// This server's contribution to the aggregate `u`.
    pub u_i: Scalar,
}
