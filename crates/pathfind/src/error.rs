use thiserror::Error;

/// Contract violations of the pathfinder
///
/// Running out of time or exhausting the open list is not an error; those
/// searches return `Ok(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("a path search is already running on this path finder")]
    SearchInProgress,
}
