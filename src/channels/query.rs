use super::ChannelError;
use crate::protocols::blind::{BlindSignature, BlindedMessage};

pub trait QueryServerChannel {
    fn send_blinded_message(&mut self, message: &BlindedMessage) -> Result<(), ChannelError>;
    fn receive_blind_signature(&mut self) -> Result<BlindSignature, ChannelError>;
}

pub trait QueryClientChannel {
    fn receive_blinded_message(&mut self) -> Result<BlindedMessage, ChannelError>;
    fn send_blind_signature(&mut self, signature: &BlindSignature) -> Result<(), ChannelError>;
}
