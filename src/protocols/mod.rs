use crate::{channels::ChannelError, parameters::ParametersError, signature::SignatureError};

pub mod accumulator;
pub mod blind;

quick_error! {
    #[derive(Debug)]
    pub enum SetupError {
        InvalidParameters(err: ParametersError) {
            from()
        }
        SignatureError(err: SignatureError) {
            from()
        }
        OverlappingUniverse(element: String) {
            display("{:?} is listed as both a member and a non-member", element)
        }
        FalsePositive(element: String) {
            display("filter reports non-member {:?} as present", element)
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum QueryError {
        VerificationFailed {}
        SignatureError(err: SignatureError) {
            from()
        }
        ChannelError(err: ChannelError) {
            from()
        }
    }
}
