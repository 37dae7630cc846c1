//! The accumulator: a server with perfect knowledge of a finite universe
//! signs every member, inserts the signatures into a [`MembershipFilter`]
//! and hands the filter out. A client then learns whether a candidate is a
//! member by having the server blind-sign it and looking the unblinded
//! signature up locally.
//!
//! Phases run in a fixed order, enforced by the types involved:
//! [`Server::build`] gives an [`Accumulator`], [`Accumulator::distribute`]
//! gives the filter a [`Client`] is made from, [`Client::request`] gives a
//! [`PendingQuery`] that only [`Client::check`] can consume.
use crate::{
    channels::query::{QueryClientChannel, QueryServerChannel},
    filter::MembershipFilter,
    parameters::FilterParameters,
    protocols::{
        blind::{blind_sign, BlindingContext, Protocol as BlindingProtocol},
        QueryError, SetupError,
    },
    signature::{KeyPair, PublicKey, Signature, Signer},
};
use rand::seq::SliceRandom;
use rand::Rng;
use rug::rand::MutRandState;
use std::collections::HashSet;

pub mod universe;

pub struct Server {
    signer: Signer,
    parameters: FilterParameters,
}

/// What the server remembers about a build. Dropped on distribution.
pub struct AccumulatorState {
    signatures: Vec<Signature>,
}

pub struct Accumulator {
    state: AccumulatorState,
    filter: MembershipFilter,
}

impl Server {
    pub fn setup(key_pair: KeyPair, parameters: &FilterParameters) -> Result<Server, SetupError> {
        parameters.is_valid()?;
        info!("setting up accumulator server with {}", parameters);
        Ok(Server {
            signer: Signer::new(key_pair),
            parameters: parameters.clone(),
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        self.signer.public_key()
    }

    pub fn parameters(&self) -> &FilterParameters {
        &self.parameters
    }

    /// Inserts the signature of every member, then checks that no non-member
    /// signature is reported present.
    pub fn build<S: AsRef<str>>(
        &self,
        members: &[S],
        non_members: &[S],
    ) -> Result<Accumulator, SetupError> {
        let member_set: HashSet<&str> = members.iter().map(|m| m.as_ref()).collect();
        if let Some(both) = non_members
            .iter()
            .map(|m| m.as_ref())
            .find(|m| member_set.contains(m))
        {
            return Err(SetupError::OverlappingUniverse(both.to_string()));
        }

        let mut filter = MembershipFilter::new(&self.parameters)?;
        let mut signatures = Vec::with_capacity(members.len());
        for member in members {
            let signature = self.signer.sign(member.as_ref())?;
            filter.insert(signature.to_hex().as_bytes());
            signatures.push(signature);
        }
        debug!(
            "inserted {} members, {} of {} buckets set",
            signatures.len(),
            filter.bits_set(),
            filter.num_buckets()
        );

        for non_member in non_members {
            let signature = self.signer.sign(non_member.as_ref())?;
            if filter.contains(signature.to_hex().as_bytes()) {
                return Err(SetupError::FalsePositive(non_member.as_ref().to_string()));
            }
        }
        info!(
            "built accumulator: {} members, {} non-members checked, estimated false positive rate {:.2e}",
            signatures.len(),
            non_members.len(),
            filter.estimated_false_positive_rate()
        );

        Ok(Accumulator {
            state: AccumulatorState { signatures },
            filter,
        })
    }

    /// Answers one blinded query.
    pub fn respond<C: QueryClientChannel>(&self, client_channel: &mut C) -> Result<(), QueryError> {
        let blinded = client_channel.receive_blinded_message()?;
        let blind_signature = blind_sign(&self.signer, &blinded)?;
        client_channel.send_blind_signature(&blind_signature)?;
        debug!("answered a blinded query");
        Ok(())
    }
}

impl Accumulator {
    pub fn members(&self) -> usize {
        self.state.signatures.len()
    }

    pub fn filter(&self) -> &MembershipFilter {
        &self.filter
    }

    pub fn distribute(self) -> MembershipFilter {
        self.filter
    }
}

/// Samples `count` distinct entries of `universe`, or all of them when
/// `count` is larger.
pub fn select_candidates<'a, T, R: Rng + ?Sized>(
    universe: &'a [T],
    count: usize,
    rng: &mut R,
) -> Vec<&'a T> {
    universe.choose_multiple(rng, count).collect()
}

pub struct PendingQuery {
    candidate: String,
    context: BlindingContext,
}

impl PendingQuery {
    pub fn candidate(&self) -> &str {
        &self.candidate
    }
}

pub struct Client {
    protocol: BlindingProtocol,
    filter: MembershipFilter,
}

impl Client {
    pub fn new(public_key: &PublicKey, filter: MembershipFilter) -> Client {
        Client {
            protocol: BlindingProtocol::from_public_key(public_key),
            filter,
        }
    }

    pub fn filter(&self) -> &MembershipFilter {
        &self.filter
    }

    pub fn request<R: MutRandState, C: QueryServerChannel>(
        &self,
        server_channel: &mut C,
        rng: &mut R,
        candidate: &str,
    ) -> Result<PendingQuery, QueryError> {
        let (context, blinded) = self.protocol.prepare(candidate, rng)?;
        server_channel.send_blinded_message(&blinded)?;
        Ok(PendingQuery {
            candidate: candidate.to_string(),
            context,
        })
    }

    /// Unblinds the server's answer to `pending` and looks the signature up
    /// in the local filter copy.
    pub fn check<C: QueryServerChannel>(
        &self,
        server_channel: &mut C,
        pending: PendingQuery,
    ) -> Result<bool, QueryError> {
        let blind_signature = server_channel.receive_blind_signature()?;
        let signature =
            self.protocol
                .unblind_verified(&blind_signature, &pending.context, &pending.candidate)?;
        let present = self.filter.contains(signature.to_hex().as_bytes());
        debug!("{:?} present: {}", pending.candidate, present);
        Ok(present)
    }
}
