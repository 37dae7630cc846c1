//! Privacy-preserving set membership built from blind RSA signatures and a
//! Bloom filter.
//!
//! The server signs every member of its set and inserts the signatures into a
//! [`filter::MembershipFilter`] that it hands to clients. A client holding
//! the filter asks the server to blind-sign a candidate, unblinds the answer
//! and looks the resulting signature up locally, so the server never learns
//! which element was queried.
#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate log;

pub mod utils;
pub mod hash;
pub mod signature;
pub mod filter;
pub mod parameters;
pub mod channels;
pub mod transcript;
pub mod protocols;

#[cfg(test)]
mod proptests;
