//! # Generic Messages
//!
//! Message types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a reference actor.
///
/// Reference data is registered once and then only read, so the protocol is
/// reduced to the two operations the service needs:
///
/// - **Create**: registers a new entity from [`ActorEntity::Create`] and answers with its ID.
/// - **Get**: looks an entity up by ID; a missing ID is answered with `Ok(None)`.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
}
