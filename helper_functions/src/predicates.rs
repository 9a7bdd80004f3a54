use types::phase0::{containers::Validator, primitives::Epoch};

#[must_use]
pub fn is_active_validator(validator: &Validator, epoch: Epoch) -> bool {
    (validator.activation_epoch..validator.exit_epoch).contains(&epoch)
}
