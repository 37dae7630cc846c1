use crate::{
    channels::{
        query::{QueryClientChannel, QueryServerChannel},
        ChannelError,
    },
    protocols::blind::{BlindSignature, BlindedMessage},
};
use merlin::Transcript;
use rug::Integer;
use std::cell::RefCell;

use super::{TranscriptChannelError, TranscriptProtocolChallenge, TranscriptProtocolInteger};

pub const BINDING_BITS: u16 = 128;

pub trait TranscriptProtocolQuery: TranscriptProtocolInteger + TranscriptProtocolChallenge {
    fn query_domain_sep(&mut self);
}

impl TranscriptProtocolQuery for Transcript {
    fn query_domain_sep(&mut self) {
        self.append_message(b"dom-sep", b"blind_query");
    }
}

/// In-memory link between the two channels of one query. Holds at most one
/// message in each direction.
#[derive(Debug, Default)]
pub struct QueryMailbox {
    blinded_message: Option<BlindedMessage>,
    blind_signature: Option<BlindSignature>,
}

impl QueryMailbox {
    pub fn new() -> QueryMailbox {
        QueryMailbox::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blinded_message.is_none() && self.blind_signature.is_none()
    }
}

/// Everything that crossed the wire during one query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryExchange {
    pub blinded_message: BlindedMessage,
    pub blind_signature: BlindSignature,
}

fn exchange(
    blinded_message: &Option<BlindedMessage>,
    blind_signature: &Option<BlindSignature>,
) -> Result<QueryExchange, TranscriptChannelError> {
    match (blinded_message, blind_signature) {
        (Some(blinded_message), Some(blind_signature)) => Ok(QueryExchange {
            blinded_message: blinded_message.clone(),
            blind_signature: blind_signature.clone(),
        }),
        _ => Err(TranscriptChannelError::Incomplete),
    }
}

fn binding<T: TranscriptProtocolQuery>(transcript: &RefCell<T>) -> Result<Integer, ChannelError> {
    let mut transcript = transcript.try_borrow_mut()?;
    transcript.query_domain_sep();
    Ok(transcript.challenge_scalar(b"binding", BINDING_BITS))
}

/// The client's end: talks to the server.
pub struct TranscriptServerChannel<'a, T: TranscriptProtocolQuery> {
    mailbox: &'a RefCell<QueryMailbox>,
    transcript: &'a RefCell<T>,
    blinded_message: Option<BlindedMessage>,
    blind_signature: Option<BlindSignature>,
}

impl<'a, T: TranscriptProtocolQuery> TranscriptServerChannel<'a, T> {
    pub fn new(
        mailbox: &'a RefCell<QueryMailbox>,
        transcript: &'a RefCell<T>,
    ) -> TranscriptServerChannel<'a, T> {
        TranscriptServerChannel {
            mailbox,
            transcript,
            blinded_message: None,
            blind_signature: None,
        }
    }

    pub fn exchange(&self) -> Result<QueryExchange, TranscriptChannelError> {
        exchange(&self.blinded_message, &self.blind_signature)
    }

    /// Squeezes a challenge from the transcript. Equal on both ends once the
    /// exchange is complete; call it once per query.
    pub fn binding(&self) -> Result<Integer, ChannelError> {
        binding(self.transcript)
    }
}

impl<'a, T: TranscriptProtocolQuery> QueryServerChannel for TranscriptServerChannel<'a, T> {
    fn send_blinded_message(&mut self, message: &BlindedMessage) -> Result<(), ChannelError> {
        let mut mailbox = self.mailbox.try_borrow_mut()?;
        if mailbox.blinded_message.is_some() {
            return Err(ChannelError::CouldNotSend);
        }
        let mut transcript = self.transcript.try_borrow_mut()?;
        transcript.query_domain_sep();
        transcript.append_integer_scalar(b"blinded_message", message.as_integer());
        mailbox.blinded_message = Some(message.clone());
        self.blinded_message = Some(message.clone());
        Ok(())
    }

    fn receive_blind_signature(&mut self) -> Result<BlindSignature, ChannelError> {
        let signature = self
            .mailbox
            .try_borrow_mut()?
            .blind_signature
            .take()
            .ok_or(ChannelError::NothingToReceive)?;
        let mut transcript = self.transcript.try_borrow_mut()?;
        transcript.query_domain_sep();
        transcript.append_integer_scalar(b"blind_signature", signature.as_integer());
        self.blind_signature = Some(signature.clone());
        Ok(signature)
    }
}

/// The server's end: talks to the client.
pub struct TranscriptClientChannel<'a, T: TranscriptProtocolQuery> {
    mailbox: &'a RefCell<QueryMailbox>,
    transcript: &'a RefCell<T>,
    blinded_message: Option<BlindedMessage>,
    blind_signature: Option<BlindSignature>,
}

impl<'a, T: TranscriptProtocolQuery> TranscriptClientChannel<'a, T> {
    pub fn new(
        mailbox: &'a RefCell<QueryMailbox>,
        transcript: &'a RefCell<T>,
    ) -> TranscriptClientChannel<'a, T> {
        TranscriptClientChannel {
            mailbox,
            transcript,
            blinded_message: None,
            blind_signature: None,
        }
    }

    pub fn exchange(&self) -> Result<QueryExchange, TranscriptChannelError> {
        exchange(&self.blinded_message, &self.blind_signature)
    }

    pub fn binding(&self) -> Result<Integer, ChannelError> {
        binding(self.transcript)
    }
}

impl<'a, T: TranscriptProtocolQuery> QueryClientChannel for TranscriptClientChannel<'a, T> {
    fn receive_blinded_message(&mut self) -> Result<BlindedMessage, ChannelError> {
        let message = self
            .mailbox
            .try_borrow_mut()?
            .blinded_message
            .take()
            .ok_or(ChannelError::NothingToReceive)?;
        let mut transcript = self.transcript.try_borrow_mut()?;
        transcript.query_domain_sep();
        transcript.append_integer_scalar(b"blinded_message", message.as_integer());
        self.blinded_message = Some(message.clone());
        Ok(message)
    }

    fn send_blind_signature(&mut self, signature: &BlindSignature) -> Result<(), ChannelError> {
        let mut mailbox = self.mailbox.try_borrow_mut()?;
        if mailbox.blind_signature.is_some() {
            return Err(ChannelError::CouldNotSend);
        }
        let mut transcript = self.transcript.try_borrow_mut()?;
        transcript.query_domain_sep();
        transcript.append_integer_scalar(b"blind_signature", signature.as_integer());
        mailbox.blind_signature = Some(signature.clone());
        self.blind_signature = Some(signature.clone());
        Ok(())
    }
}
