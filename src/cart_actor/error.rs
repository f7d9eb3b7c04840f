use thiserror::Error;

/// Errors that can occur talking to the cart actor.
///
/// Cart operations themselves never fail: unknown ids and invalid edits are
/// absorbed as no-ops. Only the channel to the actor can break.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
