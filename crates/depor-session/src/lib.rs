//! # depor-session
//!
//! Session state for the Depor dashboard.
//!
//! The session is held by the client only. To make that a real trust
//! boundary, the payload travels as a Biscuit token signed with an Ed25519
//! key. The server never trusts role claims it did not sign itself.
//!
//! | Piece | Module |
//! |-------|--------|
//! | Keypair load/generate | [`keys`] |
//! | Token mint/verify | [`token`] |
//! | `Anonymous` / `Authenticated` state machine | [`session`] |

pub mod error;
pub mod keys;
pub mod session;
pub mod token;

pub use biscuit_auth::PublicKey;
pub use error::SessionError;
pub use keys::KeyPair;
pub use session::{
    LOGIN_FAILED_MESSAGE, LOGIN_REDIRECT, LOGOUT_REDIRECT, Principal, Session, SessionPayload,
    Transition,
};
pub use token::{SessionIssuer, SessionVerifier, VerifiedSession};
