use crate::env_or;

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31).
    pub cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self {
            cost: env_or("BCRYPT_COST", bcrypt::DEFAULT_COST).clamp(4, 31),
        }
    }
}
