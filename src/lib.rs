#![doc(html_root_url = "https://docs.rs/threshold-bbsplus/0.1.0")]
#![cfg_attr(feature = "nightly", feature(external_doc))]
#![cfg_attr(feature = "nightly", doc(include = "../README.md"))]
#![deny(missing_docs)]

//! A threshold BBS+ credential issuance and selective-disclosure proof stack
//! over BLS12-381.
//!
//! The monolithic path: [`SigningKey`] and [`PublicKey`] support [`sign`],
//! [`PublicKey::verify`], [`PublicKey::create_proof`] and
//! [`PublicKey::verify_proof`] directly.
//!
//! The threshold path composes [`run_dkg`] (distributed key generation),
//! [`DistributedSigning`] (share generation for one signing session) and
//! [`reconstruct`] (combining shares into a signature that verifies under
//! the same [`PublicKey`] API).
//!
//! Docs require the `nightly` feature until RFC 1990 lands.

mod bbs;
mod curve;
mod dkg;
mod error;
mod lagrange;
mod shamir;
mod threshold;

pub use bbs::{sign, Proof, PublicKey, Signature, SignatureBytes, SigningKey, DEFAULT_NONCE};
pub use curve::{G1Projective, G2Projective, Scalar};
pub use dkg::{run as run_dkg, DkgOutput};
pub use error::Error;
pub use lagrange::{interpolate_g2_points, interpolate_scalars};
pub use shamir::{create_random_polynomial, evaluate as evaluate_polynomial};
pub use threshold::{reconstruct, DistributedSigning, SignatureShare};
