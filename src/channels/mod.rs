//! Message-passing seams between the two parties of a query.
//!
//! Each trait is named after the party on the other end: the client sends
//! through a [`query::QueryServerChannel`], the server answers through a
//! [`query::QueryClientChannel`].
pub mod query;

use std::cell::{BorrowError, BorrowMutError};

quick_error! {
    #[derive(Debug)]
    pub enum ChannelError {
        CouldNotSend {}
        NothingToReceive {}
        CouldNotBorrow(e: BorrowError) {
            from()
        }
        CouldNotBorrowMut(e: BorrowMutError) {
            from()
        }
    }
}
