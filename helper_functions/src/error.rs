use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("no validators are active")]
    NoActiveValidators,
}
